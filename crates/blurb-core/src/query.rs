//! Query building: one request payload per record.
//!
//! Payloads and identifiers are emitted as two parallel lists. Position is the
//! only link between a completion and its record, so both lists keep input
//! order and always have the same length.

use serde::{Deserialize, Serialize};

use crate::types::Record;

/// Request shape used for the generation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStyle {
    /// Chat Completions: a list of role/content messages
    #[default]
    Chat,
    /// Legacy Completions: a raw prompt string
    Completion,
}

impl ApiStyle {
    /// Model used when the config does not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            ApiStyle::Chat => "gpt-3.5-turbo",
            ApiStyle::Completion => "gpt-3.5-turbo-instruct",
        }
    }
}

impl std::fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiStyle::Chat => write!(f, "chat"),
            ApiStyle::Completion => write!(f, "completion"),
        }
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// One request unit built from one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Message list for the chat API
    Chat(Vec<ChatMessage>),
    /// Prompt string for the legacy completion API
    Prompt(String),
}

/// Payloads with their positionally aligned identifiers.
#[derive(Debug, Clone, Default)]
pub struct QuerySet {
    pub payloads: Vec<Payload>,
    pub ids: Vec<String>,
}

/// Build one payload per record, carrying `instruction` ahead of the title.
pub fn build_queries(records: &[Record], instruction: &str, style: ApiStyle) -> QuerySet {
    let mut set = QuerySet {
        payloads: Vec::with_capacity(records.len()),
        ids: Vec::with_capacity(records.len()),
    };

    for record in records {
        let payload = match style {
            ApiStyle::Chat => Payload::Chat(vec![
                ChatMessage::system(instruction),
                ChatMessage::user(record.title.as_str()),
            ]),
            ApiStyle::Completion => Payload::Prompt(format!("{instruction}\n\n{}", record.title)),
        };
        set.payloads.push(payload);
        set.ids.push(record.identifier.clone());
    }

    tracing::debug!("Built {} {style} payload(s)", set.payloads.len());
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTRUCTION: &str = "Write six sentences in Polish.";

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new(format!("B{i:03}"), format!("Product {i}")))
            .collect()
    }

    #[test]
    fn test_ids_align_with_payloads() {
        for n in [0, 1, 2, 7] {
            let input = records(n);
            let set = build_queries(&input, INSTRUCTION, ApiStyle::Chat);
            assert_eq!(set.payloads.len(), n);
            assert_eq!(set.ids.len(), n);
            for (record, id) in input.iter().zip(&set.ids) {
                assert_eq!(&record.identifier, id);
            }
        }
    }

    #[test]
    fn test_chat_payload_shape() {
        let input = vec![Record::new("B001", "Wireless Mouse")];
        let set = build_queries(&input, INSTRUCTION, ApiStyle::Chat);
        assert_eq!(
            set.payloads[0],
            Payload::Chat(vec![
                ChatMessage::system(INSTRUCTION),
                ChatMessage::user("Wireless Mouse"),
            ])
        );
        assert_eq!(set.ids, vec!["B001"]);
    }

    #[test]
    fn test_completion_payload_shape() {
        let input = vec![Record::new("B001", "Wireless Mouse")];
        let set = build_queries(&input, INSTRUCTION, ApiStyle::Completion);
        match &set.payloads[0] {
            Payload::Prompt(prompt) => {
                assert!(prompt.starts_with(INSTRUCTION));
                assert!(prompt.ends_with("\n\nWireless Mouse"));
            }
            other => panic!("Expected prompt payload, got {other:?}"),
        }
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::system("x")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"x"}"#);
    }

    #[test]
    fn test_default_models() {
        assert_eq!(ApiStyle::Chat.default_model(), "gpt-3.5-turbo");
        assert_eq!(ApiStyle::Completion.default_model(), "gpt-3.5-turbo-instruct");
    }
}
