//! Gmail REST API accessor — wire types and the reqwest-backed client.

pub mod client;
pub mod types;

pub use client::{AttachmentFetcher, GmailClient, MessageStore};
pub use types::{Header, Message, MessagePart, PartBody, PartKind};
