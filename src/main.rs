//! MediDiagnosis chat console
//!
//! Drives the chat widget headlessly against a live `/chatbot` endpoint:
//! every stdin line is typed into the widget and sent with Enter.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use medi_diagnosis_ui::chat::{ChatMessage, ChatRole, HttpTransport};
use medi_diagnosis_ui::config::{AppConfig, Cli};
use medi_diagnosis_ui::ui::dom::Document;
use medi_diagnosis_ui::ui::markup;
use medi_diagnosis_ui::Page;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = AppConfig::from_cli(&cli).context("Failed to load configuration")?;
    let transport = HttpTransport::from_config(&config.chat).context("Invalid chat endpoint")?;

    info!(
        name: "chat.config.loaded",
        endpoint = %transport.endpoint(),
        "Chat configuration loaded"
    );

    let mut doc = Document::new();
    let body = doc.body();
    let elements = markup::chat_widget(&mut doc, body);
    let page = Page::load(doc, Arc::new(transport), &config);
    let widget = page
        .chat()
        .context("Chat widget markup is incomplete")?
        .clone();

    page.click(elements.toggle).settle().await;
    let mut shown = print_new(&widget.messages(), 0);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        page.type_into(elements.input, &line);
        page.press_key(elements.input, "Enter").settle().await;
        shown = print_new(&widget.messages(), shown);
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

/// Print messages past `from`; returns the new count.
fn print_new(messages: &[ChatMessage], from: usize) -> usize {
    for message in messages.iter().skip(from) {
        match message.role {
            ChatRole::User => println!("you> {}", message.text),
            ChatRole::Bot => println!("MJ> {}", message.text),
        }
    }
    messages.len()
}
