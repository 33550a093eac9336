use scanner::api::build_http_client;
use scanner::notify::NotificationLevel;
use scanner::{
    AdviceClient, DetectionClient, MessageKey, ScanController, ScanSession, ScanState,
    Translations, UploadedImage,
};
use shared::{AdviceResponseMode, Language, PredictionResult, TreatmentAdvice};
use std::sync::Arc;
use std::time::Duration;
use stub_server::{RunningStub, StubScript};
use url::Url;

type Controller = ScanController<DetectionClient, AdviceClient>;

fn controller(stub: &RunningStub, advice_path: &str, mode: AdviceResponseMode) -> Controller {
    controller_in(stub, advice_path, mode, Language::En)
}

fn controller_in(
    stub: &RunningStub,
    advice_path: &str,
    mode: AdviceResponseMode,
    language: Language,
) -> Controller {
    let http_client = build_http_client(Duration::from_secs(10)).unwrap();
    let detection = DetectionClient::new(
        http_client.clone(),
        Url::parse(&stub.url("/predict")).unwrap(),
    );
    let advice = AdviceClient::new(http_client, Url::parse(&stub.url(advice_path)).unwrap(), mode);
    ScanController::new(
        ScanSession::new(Translations::for_language(language)),
        Arc::new(detection),
        Arc::new(advice),
    )
}

fn jpeg(name: &str, size: usize) -> UploadedImage {
    UploadedImage::new(name, "image/jpeg", vec![0xAB; size])
}

fn keys(c: &mut Controller) -> Vec<(NotificationLevel, MessageKey)> {
    c.session_mut()
        .drain_notifications()
        .into_iter()
        .map(|n| (n.level, n.key))
        .collect()
}

#[actix_web::test]
async fn confident_detection_leads_to_cleaned_advice() {
    let stub = stub_server::spawn(StubScript {
        prediction: Some(PredictionResult::new("Leaf Blight", 0.92)),
        advice_text: Some("Sure, let's talk about treatment.\n\n\nApply fungicide.".into()),
        ..Default::default()
    })
    .unwrap();
    let mut c = controller(&stub, "/advice", AdviceResponseMode::Text);

    c.select_image(jpeg("leaf.jpg", 2 * 1024 * 1024)).unwrap();
    assert_eq!(c.state(), ScanState::ImageSelected);
    c.request_detection().unwrap();
    assert_eq!(c.settle().await, ScanState::DetectedConfident);

    let prediction = c.session().prediction().unwrap();
    assert_eq!(prediction.class, "Leaf Blight");
    assert!((prediction.confidence_percent() - 92.0).abs() < 1e-9);
    assert_eq!(
        keys(&mut c),
        vec![(NotificationLevel::Success, MessageKey::DetectedSuccessfully)]
    );

    c.request_advice().unwrap();
    assert_eq!(c.settle().await, ScanState::AdviceReady);
    assert_eq!(
        c.session().advice(),
        Some(&TreatmentAdvice::text("Let's discuss treatment.\n\nApply fungicide."))
    );
    assert_eq!(
        keys(&mut c),
        vec![(NotificationLevel::Success, MessageKey::TreatmentGenerated)]
    );
    assert_eq!(stub.predict_calls(), 1);
    assert_eq!(stub.advice_calls(), 1);

    stub.stop().await;
}

#[actix_web::test]
async fn uncertain_result_never_requests_advice() {
    let stub = stub_server::spawn(StubScript {
        prediction: Some(PredictionResult::new("Uncertain", 0.3)),
        ..Default::default()
    })
    .unwrap();
    let mut c = controller(&stub, "/advice", AdviceResponseMode::Text);

    c.select_image(jpeg("blurry.jpg", 4096)).unwrap();
    c.request_detection().unwrap();
    assert_eq!(c.settle().await, ScanState::DetectedUncertain);
    assert_eq!(
        keys(&mut c),
        vec![(NotificationLevel::Warning, MessageKey::UploadClearerImage)]
    );

    assert!(!c.session().can_request_advice());
    assert!(c.request_advice().is_err());
    assert_eq!(c.settle().await, ScanState::DetectedUncertain);
    assert_eq!(stub.advice_calls(), 0);

    stub.stop().await;
}

#[actix_web::test]
async fn server_error_returns_to_image_selected_and_retry_succeeds() {
    let stub = stub_server::spawn(StubScript {
        prediction: Some(PredictionResult::new("Powdery Mildew", 0.77)),
        predict_status: Some(500),
        predict_status_limit: Some(1),
        ..Default::default()
    })
    .unwrap();
    let mut c = controller(&stub, "/advice", AdviceResponseMode::Text);

    c.select_image(jpeg("leaf.jpg", 1024)).unwrap();
    c.request_detection().unwrap();
    assert_eq!(c.settle().await, ScanState::ImageSelected);
    assert!(c.session().prediction().is_none());
    assert_eq!(
        keys(&mut c),
        vec![(NotificationLevel::Error, MessageKey::BackendUnavailable)]
    );

    c.request_detection().unwrap();
    assert_eq!(c.settle().await, ScanState::DetectedConfident);
    assert_eq!(c.session().prediction().unwrap().class, "Powdery Mildew");
    assert_eq!(stub.predict_calls(), 2);

    stub.stop().await;
}

#[actix_web::test]
async fn malformed_prediction_is_an_invalid_response() {
    let stub = stub_server::spawn(StubScript {
        predict_body: Some(r#"{"label":"Leaf Blight"}"#.into()),
        ..Default::default()
    })
    .unwrap();
    let mut c = controller(&stub, "/advice", AdviceResponseMode::Text);

    c.select_image(jpeg("leaf.jpg", 1024)).unwrap();
    c.request_detection().unwrap();
    assert_eq!(c.settle().await, ScanState::ImageSelected);
    assert_eq!(
        keys(&mut c),
        vec![(NotificationLevel::Error, MessageKey::InvalidResponse)]
    );

    stub.stop().await;
}

#[actix_web::test]
async fn structured_advice_is_used_verbatim() {
    let stub = stub_server::spawn(StubScript {
        prediction: Some(PredictionResult::new("Leaf Rust", 0.88)),
        ..Default::default()
    })
    .unwrap();
    let mut c = controller(&stub, "/advice/structured", AdviceResponseMode::Structured);

    c.select_image(jpeg("leaf.png", 1024)).unwrap();
    c.request_detection().unwrap();
    assert_eq!(c.settle().await, ScanState::DetectedConfident);
    c.request_advice().unwrap();
    assert_eq!(c.settle().await, ScanState::AdviceReady);

    match c.session().advice() {
        Some(TreatmentAdvice::Structured(advice)) => {
            assert_eq!(advice, &stub_server::model::structured_advice("Leaf Rust"));
        }
        other => panic!("expected structured advice, got {:?}", other),
    }

    stub.stop().await;
}

#[actix_web::test]
async fn blank_advice_is_reported_and_can_be_retried() {
    let stub = stub_server::spawn(StubScript {
        prediction: Some(PredictionResult::new("Leaf Blight", 0.92)),
        advice_text: Some("Okay, \n\n\n\n".into()),
        ..Default::default()
    })
    .unwrap();
    let mut c = controller(&stub, "/advice", AdviceResponseMode::Text);

    c.select_image(jpeg("leaf.jpg", 1024)).unwrap();
    c.request_detection().unwrap();
    c.settle().await;
    keys(&mut c);

    c.request_advice().unwrap();
    assert_eq!(c.settle().await, ScanState::DetectedConfident);
    assert!(c.session().advice().is_none());
    assert_eq!(
        keys(&mut c),
        vec![(NotificationLevel::Error, MessageKey::NoAdviceReceived)]
    );

    c.request_advice().unwrap();
    c.settle().await;
    assert_eq!(stub.advice_calls(), 2);

    stub.stop().await;
}

#[actix_web::test]
async fn advice_server_error_keeps_the_prediction() {
    let stub = stub_server::spawn(StubScript {
        prediction: Some(PredictionResult::new("Leaf Blight", 0.92)),
        advice_status: Some(503),
        ..Default::default()
    })
    .unwrap();
    let mut c = controller(&stub, "/advice", AdviceResponseMode::Text);

    c.select_image(jpeg("leaf.jpg", 1024)).unwrap();
    c.request_detection().unwrap();
    c.settle().await;
    keys(&mut c);

    c.request_advice().unwrap();
    assert_eq!(c.settle().await, ScanState::DetectedConfident);
    assert_eq!(c.session().prediction().unwrap().class, "Leaf Blight");
    assert_eq!(
        keys(&mut c),
        vec![(NotificationLevel::Error, MessageKey::UnableToGenerateAdvice)]
    );

    stub.stop().await;
}

#[actix_web::test]
async fn rejected_files_never_reach_the_network() {
    let stub = stub_server::spawn(StubScript::default()).unwrap();
    let mut c = controller(&stub, "/advice", AdviceResponseMode::Text);

    assert!(c.select_image(UploadedImage::new("notes.pdf", "application/pdf", vec![1; 10])).is_err());
    assert!(c.select_image(jpeg("huge.jpg", 10 * 1024 * 1024 + 1)).is_err());
    assert_eq!(c.state(), ScanState::Idle);
    assert!(c.request_detection().is_err());
    assert_eq!(
        keys(&mut c),
        vec![
            (NotificationLevel::Error, MessageKey::SelectImageFile),
            (NotificationLevel::Error, MessageKey::FileSizeError),
            (NotificationLevel::Error, MessageKey::SelectImageFirst),
        ]
    );
    assert_eq!(stub.predict_calls(), 0);

    stub.stop().await;
}

#[actix_web::test]
async fn notifications_follow_the_session_language() {
    let stub = stub_server::spawn(StubScript {
        prediction: Some(PredictionResult::new("Leaf Blight", 0.92)),
        ..Default::default()
    })
    .unwrap();
    let mut c = controller_in(&stub, "/advice", AdviceResponseMode::Text, Language::Es);

    c.select_image(jpeg("hoja.jpg", 1024)).unwrap();
    c.request_detection().unwrap();
    c.settle().await;

    let notes = c.session_mut().drain_notifications();
    let expected = Translations::for_language(Language::Es).message(MessageKey::DetectedSuccessfully);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, expected);

    stub.stop().await;
}

#[actix_web::test]
async fn reselecting_discards_the_first_response() {
    let stub = stub_server::spawn(StubScript::default()).unwrap();
    let mut c = controller(&stub, "/advice", AdviceResponseMode::Text);

    let first = UploadedImage::new("first.jpg", "image/jpeg", b"first leaf".to_vec());
    let second = UploadedImage::new("second.jpg", "image/jpeg", b"second leaf".to_vec());
    let expected = stub_server::model::classify(&second.bytes);

    c.select_image(first).unwrap();
    c.request_detection().unwrap();
    c.select_image(second).unwrap();
    c.request_detection().unwrap();

    c.settle().await;
    while c.next_completion().await.is_some() {}

    assert_eq!(c.session().prediction(), Some(&expected));
    assert_eq!(c.session_mut().drain_notifications().len(), 1);
    assert_eq!(stub.predict_calls(), 2);

    stub.stop().await;
}
