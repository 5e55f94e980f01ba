use std::{
    fs::{self, File},
    process::ExitCode,
    sync::{Arc, Mutex},
};

use backend::{BackendError, OfflineStore, RestStore};
use reader_core::{
    config::{config_root, Config},
    speech::{SpeechEngine, SpeechPlayer},
    Store,
};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use ui::{app::App, reader_view::Theme, speech::CommandSpeechEngine};

const LOG_ENV: &str = "QUILLIFY_LOG";
const LOG_FILE: &str = "quillify.log";

fn main() -> ExitCode {
    init_logging();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let store: Arc<dyn Store> = match RestStore::new(&config.backend) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("starting without a backend: {e}");
            if matches!(e, BackendError::Unconfigured) {
                warn!(
                    "set [backend] url and anon_key in config.toml \
                     or QUILLIFY_BACKEND_URL and QUILLIFY_ANON_KEY"
                );
            }
            Arc::new(OfflineStore::new(&e))
        }
    };

    let engine = CommandSpeechEngine::from_config(&config.speech)
        .map(|engine| Box::new(engine) as Box<dyn SpeechEngine>);
    let speech = SpeechPlayer::new(engine, config.speech.preferred_voices.clone());
    let theme = Theme::from_config(&config.theme);

    let app = App::new(store, config, speech).with_theme(theme);
    if let Err(e) = app.run() {
        error!("terminal error: {e}");
        eprintln!("Terminal error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Logs go to a file in the config dir so they never draw over the UI.
fn init_logging() {
    let Some(dir) = config_root() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join(LOG_FILE)) else {
        return;
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    info!("logging to {}", dir.join(LOG_FILE).display());
}
