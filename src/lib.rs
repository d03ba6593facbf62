//! MediDiagnosis page scripts
//!
//! The interactive layer of the MediDiagnosis site: an assistant chat widget
//! that exchanges messages with the site's `/chatbot` endpoint, and a set of
//! page-wide behaviors for flash messages, forms, number fields and uploads.
//! Everything runs against a headless document model so it can be driven
//! and tested without a browser.
//!
//! # Modules
//!
//! - [`chat`]: Chat widget, reply outcomes and the HTTP transport
//! - [`utilities`]: Flash dismissal, required fields, numeric clamp, upload gate
//! - [`format`]: Date formatting helpers
//! - [`ui`]: Document model and UI-event dispatch
//! - [`page`]: Binds everything to one document at load time
//! - [`config`]: Layered configuration

pub mod chat;
pub mod config;
pub mod error;
pub mod format;
pub mod page;
pub mod ui;
pub mod utilities;

pub use chat::{ChatOutcome, ChatTransport, ChatWidget, HttpTransport};
pub use error::{Error, Result};
pub use format::{format_date, format_date_time};
pub use page::Page;
