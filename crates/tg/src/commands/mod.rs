//! CLI command implementations.

pub(crate) mod examples;
pub(crate) mod generate;

pub(crate) use examples::ExamplesArgs;
pub(crate) use generate::GenerateArgs;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tg_app::{AnalyticsSink, GuideController, NoopSink, TracingSink};
use tg_client::GuideClient;
use tg_config::{API_URL_ENV, CliSettings, Config};

use crate::error::CliError;

/// Options shared by every command that talks to the backend.
#[derive(Args)]
pub(crate) struct BackendArgs {
    /// Path to configuration file (default: auto-discover tableguide.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config and the environment).
    #[arg(long)]
    api_url: Option<String>,

    /// Emit analytics events to the log.
    #[arg(long)]
    analytics: bool,
}

impl BackendArgs {
    /// Load configuration with these arguments applied on top.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            base_url: self.api_url.clone(),
            analytics_enabled: self.analytics.then_some(true),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Build a controller for the configured backend.
pub(crate) fn build_controller(config: &Config) -> GuideController {
    let client = GuideClient::from_config(&config.api);
    GuideController::new(client).with_sink(analytics_sink(config))
}

fn analytics_sink(config: &Config) -> Arc<dyn AnalyticsSink> {
    if config.analytics.enabled {
        Arc::new(TracingSink)
    } else {
        Arc::new(NoopSink)
    }
}

/// Where the backend URL came from, for status output.
pub(crate) fn describe_backend(config: &Config) -> String {
    match &config.config_path {
        Some(path) => format!("{} (config: {})", config.api.base_url, path.display()),
        None if std::env::var_os(API_URL_ENV).is_some() => {
            format!("{} (from {API_URL_ENV})", config.api.base_url)
        }
        None => config.api.base_url.clone(),
    }
}
