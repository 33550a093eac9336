use scanner::api::build_http_client;
use scanner::notify::{Notification, NotificationLevel};
use scanner::preferences::{self, JsonFilePreferences};
use scanner::{
    AdviceClient, DetectionClient, ScanConfig, ScanController, ScanError, ScanSession, ScanState,
    Translations, UploadedImage,
};
use shared::Language;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

fn print_notifications(notifications: Vec<Notification>) -> bool {
    let mut had_error = false;
    for n in notifications {
        let tag = match n.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        };
        had_error |= n.is_error();
        println!("[{}] {}", tag, n.message);
    }
    had_error
}

fn usage() -> ExitCode {
    eprintln!("usage: scanner [--lang en|es|fr|sw] <image-path>");
    ExitCode::from(2)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let mut lang_arg = None;
    let mut image_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lang" => match args.next().map(|code| Language::from_str(&code)) {
                Some(Ok(lang)) => lang_arg = Some(lang),
                _ => return usage(),
            },
            _ if image_path.is_none() => image_path = Some(PathBuf::from(&arg)),
            _ => return usage(),
        }
    }
    let Some(image_path) = image_path else {
        return usage();
    };

    let config = match ScanConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Language preference lives outside the scan session.
    let language = match JsonFilePreferences::open(&config.preferences_path) {
        Ok(mut store) => {
            if let Some(lang) = lang_arg {
                if let Err(e) = preferences::save_language(&mut store, lang) {
                    log::warn!("Failed to save language preference: {}", e);
                }
            }
            lang_arg.unwrap_or_else(|| preferences::load_language(&store, config.default_language))
        }
        Err(e) => {
            log::warn!("Ignoring preference file {}: {}", config.preferences_path.display(), e);
            lang_arg.unwrap_or(config.default_language)
        }
    };
    log::info!("Using language {} ({})", language.native_name(), language);

    let http_client = match build_http_client(config.request_timeout) {
        Ok(client) => client,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let detection = DetectionClient::new(http_client.clone(), config.detection_url.clone());
    let advice = AdviceClient::new(http_client, config.advice_url.clone(), config.advice_mode);

    let session = ScanSession::new(Translations::for_language(language));
    let mut controller = ScanController::new(session, Arc::new(detection), Arc::new(advice));

    let image = match UploadedImage::from_path(&image_path).await {
        Ok(image) => image,
        Err(ScanError::Validation(e)) => {
            log::warn!("Rejected {}: {}", image_path.display(), e);
            let rejection = Notification::new(
                NotificationLevel::Error,
                e.message_key(),
                controller.session().translations(),
            );
            print_notifications(vec![rejection]);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            log::error!("Failed to read {}: {}", image_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut had_error = false;
    if controller.select_image(image).is_ok() && controller.request_detection().is_ok() {
        controller.settle().await;
    }
    had_error |= print_notifications(controller.session_mut().drain_notifications());

    if let Some(prediction) = controller.session().prediction() {
        println!(
            "{}: {} ({:.1}%)",
            image_path.display(),
            prediction.class,
            prediction.confidence_percent()
        );
    }

    if controller.state() == ScanState::DetectedConfident && controller.request_advice().is_ok() {
        controller.settle().await;
        had_error |= print_notifications(controller.session_mut().drain_notifications());
        if let Some(advice) = controller.session().advice() {
            println!("\n{}", advice.render());
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
