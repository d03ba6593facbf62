//! Chat widget and its transport.
//!
//! # Architecture
//!
//! - [`widget`]: [`ChatWidget`], the overlay's state and message cycle
//! - [`transport`]: [`ChatTransport`] trait and the HTTP implementation
//! - [`outcome`]: Displayed messages and how a chat turn ended

pub mod outcome;
pub mod transport;
pub mod widget;

pub use outcome::{ChatMessage, ChatOutcome, ChatRole};
pub use transport::{ChatReply, ChatTransport, HttpTransport, TransportError};
pub use widget::{ChatElements, ChatWidget, PendingReply};
