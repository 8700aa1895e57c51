pub mod assistant;
pub mod config;
pub mod error;
pub mod interaction_log;
pub mod logging;
pub mod model;
pub mod providers;
pub mod repl;

use anyhow::{Context, Result};
use reqwest::Client;
use std::io;
use std::time::Duration;
use tracing::info;

use assistant::AssistantClient;
use config::Config;
use interaction_log::InteractionLog;
use repl::run_repl;

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = logging::init();

    let cfg = Config::from_env();
    info!(
        model = %cfg.model,
        model_base_url = %cfg.model_base_url,
        model_timeout_secs = cfg.model_timeout_secs,
        api_key_present = cfg.has_api_key(),
        log_path = %cfg.log_path.display(),
        "loaded runtime configuration"
    );

    let client = Client::builder()
        .timeout(Duration::from_secs(cfg.model_timeout_secs))
        .build()
        .context("Failed to initialize HTTP client")?;

    let assistant = AssistantClient::new(&client, &cfg);
    let log = InteractionLog::new(cfg.log_path.clone());

    run_repl(&assistant, &log, io::stdin().lock(), io::stdout()).await
}
