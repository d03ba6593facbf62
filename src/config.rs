use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::chat::widget::GREETING;
use crate::utilities::files::MAX_UPLOAD_BYTES;
use crate::utilities::flash::{FADE_AFTER_MS, FlashTiming, REMOVE_AFTER_MS};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Base URL of the site serving the chat endpoint
    #[arg(long, env = "CHAT_BASE_URL")]
    pub base_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub chat: ChatConfig,
    pub page: PageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    pub base_url: String,
    pub endpoint: String,
    pub greeting: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PageConfig {
    pub flash_fade_ms: u64,
    pub flash_remove_ms: u64,
    pub max_upload_bytes: u64,
}

impl PageConfig {
    pub fn flash_timing(&self) -> FlashTiming {
        FlashTiming {
            fade_after: Duration::from_millis(self.flash_fade_ms),
            remove_after: Duration::from_millis(self.flash_remove_ms),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chat: ChatConfig {
                base_url: "http://127.0.0.1:5000".to_string(),
                endpoint: "/chatbot".to_string(),
                greeting: GREETING.to_string(),
            },
            page: PageConfig {
                flash_fade_ms: FADE_AFTER_MS,
                flash_remove_ms: REMOVE_AFTER_MS,
                max_upload_bytes: MAX_UPLOAD_BYTES,
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    /// Priority: CLI flag (or its env var) > `MEDI_` env > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("chat.base_url", defaults.chat.base_url)?
            .set_default("chat.endpoint", defaults.chat.endpoint)?
            .set_default("chat.greeting", defaults.chat.greeting)?
            .set_default("page.flash_fade_ms", defaults.page.flash_fade_ms)?
            .set_default("page.flash_remove_ms", defaults.page.flash_remove_ms)?
            .set_default("page.max_upload_bytes", defaults.page.max_upload_bytes)?;

        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // E.g. MEDI_CHAT__BASE_URL=http://localhost:8000
        builder = builder.add_source(
            Environment::with_prefix("MEDI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(base_url) = &cli.base_url {
            builder = builder.set_override("chat.base_url", base_url.as_str())?;
        }

        builder.build()?.try_deserialize()
    }
}
