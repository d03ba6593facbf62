//! Chat message and reply-outcome types.

use serde::Serialize;

use super::transport::{ChatReply, TransportError};

/// Shown when the server answers with an error flag.
pub const SERVER_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Shown when the exchange itself fails.
pub const CONNECTION_ERROR_REPLY: &str =
    "Sorry, I'm having trouble connecting. Please try again later.";

/// Who authored a displayed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

impl ChatRole {
    /// CSS modifier class for the message element.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

/// A message as displayed in the conversation view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Bot,
            text: text.into(),
        }
    }
}

/// How one chat turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// The server answered with a response text.
    Reply(String),
    /// The server answered with an error flag.
    ServerError,
    /// The exchange failed (network, status, malformed body).
    TransportFailure,
}

impl ChatOutcome {
    /// Text of the bot message this outcome produces.
    pub fn reply_text(&self) -> &str {
        match self {
            Self::Reply(text) => text,
            Self::ServerError => SERVER_ERROR_REPLY,
            Self::TransportFailure => CONNECTION_ERROR_REPLY,
        }
    }
}

impl From<Result<ChatReply, TransportError>> for ChatOutcome {
    fn from(result: Result<ChatReply, TransportError>) -> Self {
        match result {
            Ok(ChatReply::Response(text)) => Self::Reply(text),
            Ok(ChatReply::ServerError(_)) => Self::ServerError,
            Err(_) => Self::TransportFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_texts() {
        let reply = ChatOutcome::from(Ok(ChatReply::Response("Hi there".to_string())));
        assert_eq!(reply.reply_text(), "Hi there");

        let flagged = ChatOutcome::from(Ok(ChatReply::ServerError(serde_json::json!(true))));
        assert_eq!(flagged.reply_text(), SERVER_ERROR_REPLY);

        let failed = ChatOutcome::from(Err(TransportError::Status(502)));
        assert_eq!(failed, ChatOutcome::TransportFailure);
        assert_eq!(failed.reply_text(), CONNECTION_ERROR_REPLY);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&ChatMessage::bot("hello")).unwrap();
        assert_eq!(json, r#"{"role":"bot","text":"hello"}"#);
        assert_eq!(ChatRole::User.as_str(), "user");
    }
}
