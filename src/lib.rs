//! mailsift — fetches Gmail messages, classifies them with keyword rules, and
//! files metadata plus PDF/XML attachments under a category-keyed tree.

pub mod auth;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod gmail;
pub mod pipeline;
pub mod storage;

pub use error::{Error, Result};
