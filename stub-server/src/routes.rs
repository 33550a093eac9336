use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse, web};
use futures::{StreamExt, TryStreamExt};
use log::{info, warn};
use serde::Serialize;
use shared::AdviceRequest;
use std::io::Write;
use uuid::Uuid;

use crate::model::{advice_text, calculate_image_hash, classify, structured_advice};
use crate::state::StubState;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/predict").route(web::post().to(handle_predict)))
        .service(web::resource("/advice").route(web::post().to(handle_advice)))
        .service(
            web::resource("/advice/structured").route(web::post().to(handle_structured_advice)),
        );
}

fn scripted_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn handle_predict(
    state: web::Data<StubState>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let request_id = Uuid::new_v4();
    let call = state.record_predict();

    let mut image_data = Vec::new();
    while let Ok(Some(mut field)) = payload.try_next().await {
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            image_data.write_all(&data)?;
        }
        if !image_data.is_empty() {
            break;
        }
    }

    let scripted_failure = state
        .script
        .predict_status
        .filter(|_| state.script.predict_status_limit.map_or(true, |limit| call <= limit));
    if let Some(code) = scripted_failure {
        warn!("[{}] predict #{}: scripted status {}", request_id, call, code);
        return Ok(HttpResponse::build(scripted_status(code)).json(ErrorResponse {
            error: "Scripted failure".into(),
        }));
    }

    if image_data.is_empty() {
        warn!("[{}] predict #{}: no image in request", request_id, call);
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "No image provided".into(),
        }));
    }

    if let Some(body) = &state.script.predict_body {
        return Ok(HttpResponse::Ok()
            .content_type("application/json")
            .body(body.clone()));
    }

    let prediction = state
        .script
        .prediction
        .clone()
        .unwrap_or_else(|| classify(&image_data));
    info!(
        "[{}] predict #{}: {} bytes, sha256 {} -> {} ({:.2})",
        request_id,
        call,
        image_data.len(),
        calculate_image_hash(&image_data),
        prediction.class,
        prediction.confidence
    );
    Ok(HttpResponse::Ok().json(prediction))
}

async fn handle_advice(state: web::Data<StubState>, body: String) -> HttpResponse {
    let call = state.record_advice();
    let disease = body.trim();
    info!("advice #{}: text request for '{}'", call, disease);

    if let Some(code) = state.script.advice_status {
        return HttpResponse::build(scripted_status(code)).body("Scripted failure");
    }
    let text = state
        .script
        .advice_text
        .clone()
        .unwrap_or_else(|| advice_text(disease));
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(text)
}

async fn handle_structured_advice(
    state: web::Data<StubState>,
    request: web::Json<AdviceRequest>,
) -> HttpResponse {
    let call = state.record_advice();
    info!("advice #{}: structured request for '{}'", call, request.disease);

    if let Some(code) = state.script.advice_status {
        return HttpResponse::build(scripted_status(code)).json(ErrorResponse {
            error: "Scripted failure".into(),
        });
    }
    // A scripted body is sent as-is so callers can exercise malformed replies.
    match &state.script.advice_text {
        Some(raw) => HttpResponse::Ok()
            .content_type("application/json")
            .body(raw.clone()),
        None => HttpResponse::Ok().json(structured_advice(&request.disease)),
    }
}
