//! Serde models for the Gmail API `users.messages` resources.
//!
//! Only the fields the pipeline consumes are modeled. The API omits most
//! fields freely (a `multipart/*` container has no `body.data`, a leaf has no
//! `parts`), so everything defaults.

use serde::Deserialize;

/// A message fetched with `format=full`: id, preview snippet and the root of
/// the MIME part tree.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub id: String,
    pub snippet: String,
    pub payload: Option<MessagePart>,
}

impl Message {
    /// Look up a header by name, ASCII-case-insensitively.
    ///
    /// When the same header appears more than once, the last occurrence wins
    /// (matches iteration order over the header list).
    pub fn header(&self, name: &str) -> Option<&str> {
        let headers = self.payload.as_ref()?.headers.as_slice();
        let mut found = None;
        for h in headers {
            if h.name.eq_ignore_ascii_case(name) {
                found = Some(h.value.as_str());
            }
        }
        found
    }

    /// `Subject` header, or empty string when absent.
    pub fn subject(&self) -> &str {
        self.header("Subject").unwrap_or_default()
    }

    /// `From` header, or empty string when absent.
    pub fn sender(&self) -> &str {
        self.header("From").unwrap_or_default()
    }
}

/// One name/value header pair.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// A node of the MIME part tree: either a leaf with inline or fetchable
/// content, or a `multipart/*` container with children.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MessagePart {
    pub mime_type: String,
    /// Empty string when the part is not an attachment.
    pub filename: String,
    pub headers: Vec<Header>,
    pub body: Option<PartBody>,
    pub parts: Vec<MessagePart>,
}

/// What role a part plays in the tree. Containers are checked first: a
/// `multipart/*` part is never a leaf even if it carries a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Container,
    Attachment,
    Text,
    Html,
    Other,
}

impl MessagePart {
    /// Discriminate this part's role.
    pub fn kind(&self) -> PartKind {
        if self.mime_type.starts_with("multipart/") {
            PartKind::Container
        } else if self.attachment_id().is_some() && !self.filename.is_empty() {
            PartKind::Attachment
        } else if self.mime_type == "text/plain" {
            PartKind::Text
        } else if self.mime_type == "text/html" {
            PartKind::Html
        } else {
            PartKind::Other
        }
    }

    /// Inline base64url payload, if any.
    pub fn inline_data(&self) -> Option<&str> {
        self.body.as_ref()?.data.as_deref()
    }

    /// Attachment identifier for separately fetched payloads, if any.
    pub fn attachment_id(&self) -> Option<&str> {
        self.body.as_ref()?.attachment_id.as_deref()
    }
}

/// A part's body: inline base64url data, or a reference to attachment data
/// that must be fetched separately.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PartBody {
    pub data: Option<String>,
    pub attachment_id: Option<String>,
    pub size: u64,
}

/// Response of `users.messages.list`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageList {
    pub messages: Vec<MessageRef>,
    pub result_size_estimate: u64,
}

/// A bare message reference from a listing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageRef {
    pub id: String,
    pub thread_id: String,
}

/// Response of `users.messages.attachments.get`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AttachmentBody {
    pub data: Option<String>,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_message() {
        let json = r#"{
            "id": "18f0a",
            "snippet": "Sua fatura chegou",
            "payload": {
                "mimeType": "multipart/mixed",
                "filename": "",
                "headers": [
                    {"name": "Subject", "value": "Fatura de maio"},
                    {"name": "From", "value": "cobranca@itau.com.br"}
                ],
                "parts": [
                    {
                        "mimeType": "text/plain",
                        "filename": "",
                        "body": {"data": "b2k", "size": 2}
                    },
                    {
                        "mimeType": "application/pdf",
                        "filename": "fatura.pdf",
                        "body": {"attachmentId": "att-1", "size": 1024}
                    }
                ]
            }
        }"#;

        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "18f0a");
        assert_eq!(msg.subject(), "Fatura de maio");
        assert_eq!(msg.sender(), "cobranca@itau.com.br");

        let payload = msg.payload.as_ref().unwrap();
        assert_eq!(payload.kind(), PartKind::Container);
        assert_eq!(payload.parts.len(), 2);
        assert_eq!(payload.parts[0].kind(), PartKind::Text);
        assert_eq!(payload.parts[0].inline_data(), Some("b2k"));
        assert_eq!(payload.parts[1].kind(), PartKind::Attachment);
        assert_eq!(payload.parts[1].attachment_id(), Some("att-1"));
    }

    #[test]
    fn deserializes_nested_parts() {
        let json = r#"{
            "mimeType": "multipart/mixed",
            "parts": [
                {
                    "mimeType": "multipart/alternative",
                    "parts": [
                        {"mimeType": "text/plain", "body": {"data": "aGk", "size": 2}},
                        {"mimeType": "text/html", "body": {"data": "PGI+aGk8L2I+", "size": 12}}
                    ]
                }
            ]
        }"#;

        let part: MessagePart = serde_json::from_str(json).unwrap();
        assert_eq!(part.parts.len(), 1);
        assert_eq!(part.parts[0].kind(), PartKind::Container);
        assert_eq!(part.parts[0].parts.len(), 2);
    }

    #[test]
    fn duplicate_headers_keep_last_occurrence() {
        let json = r#"{
            "id": "m1",
            "payload": {
                "mimeType": "text/plain",
                "headers": [
                    {"name": "Subject", "value": "first"},
                    {"name": "Subject", "value": "second"}
                ]
            }
        }"#;

        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.subject(), "second");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let json = r#"{
            "id": "m1",
            "payload": {
                "mimeType": "text/plain",
                "headers": [{"name": "subject", "value": "lower"}]
            }
        }"#;

        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.header("Subject"), Some("lower"));
    }

    #[test]
    fn missing_headers_yield_empty_fields() {
        let msg: Message = serde_json::from_str(r#"{"id": "m1"}"#).unwrap();
        assert_eq!(msg.subject(), "");
        assert_eq!(msg.sender(), "");
        assert_eq!(msg.snippet, "");
    }

    #[test]
    fn multipart_with_body_is_still_a_container() {
        let json = r#"{
            "mimeType": "multipart/related",
            "body": {"data": "eA", "size": 1},
            "parts": [{"mimeType": "text/plain"}]
        }"#;

        let part: MessagePart = serde_json::from_str(json).unwrap();
        assert_eq!(part.kind(), PartKind::Container);
    }

    #[test]
    fn deserializes_message_list() {
        let json = r#"{
            "messages": [{"id": "a", "threadId": "t1"}, {"id": "b", "threadId": "t2"}],
            "resultSizeEstimate": 2
        }"#;

        let list: MessageList = serde_json::from_str(json).unwrap();
        assert_eq!(list.messages.len(), 2);
        assert_eq!(list.messages[0].id, "a");
    }

    #[test]
    fn empty_message_list() {
        let list: MessageList = serde_json::from_str("{}").unwrap();
        assert!(list.messages.is_empty());
    }
}
