use actix_web::{App, HttpServer, web};
use std::env;
use stub_server::{StubScript, StubState, configure_routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let port = match env::var("PORT") {
        Ok(raw) => raw.parse::<u16>().map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Invalid PORT: {}", e))
        })?,
        Err(_) => 8081,
    };

    let state = web::Data::new(StubState::new(StubScript::default()));
    log::info!("Starting stub server on 0.0.0.0:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure_routes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
