//! Extraction core — walks a message's MIME part tree for body text and
//! binary attachments.

pub mod attachments;
pub mod body;

pub use attachments::{extract_attachments, Attachment};
pub use body::extract_body;

use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};

/// Decode the API's base64url payload encoding.
///
/// Gmail emits unpadded data for some payloads, so the padded engine is tried
/// first with an unpadded fallback. Malformed input yields `None` — decode
/// failures are never fatal.
pub(crate) fn decode_base64url(data: &str) -> Option<Vec<u8>> {
    URL_SAFE
        .decode(data)
        .or_else(|_| URL_SAFE_NO_PAD.decode(data))
        .ok()
}
