//! Attachment extraction from a message's part tree.
//!
//! The full tree is walked: `multipart/*` parts expand into their children
//! and are never attachment candidates themselves. Candidates need both a
//! filename and an attachment id, and are filtered to a `.pdf`/`.xml`
//! extension allowlist before their payloads are fetched.

use crate::error::ApiError;
use crate::extract::decode_base64url;
use crate::gmail::client::AttachmentFetcher;
use crate::gmail::types::{MessagePart, PartKind};

/// File extensions worth keeping, matched case-insensitively.
const ALLOWED_EXTENSIONS: &[&str] = &[".pdf", ".xml"];

/// A fetched attachment: original filename and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Whether a filename passes the extension allowlist.
pub fn has_allowed_extension(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Collect candidate parts in traversal order.
fn collect_candidates<'a>(parts: &'a [MessagePart], out: &mut Vec<&'a MessagePart>) {
    for part in parts {
        if part.kind() == PartKind::Container {
            collect_candidates(&part.parts, out);
            continue;
        }

        if part.filename.is_empty() || part.attachment_id().is_none() {
            continue;
        }
        if !has_allowed_extension(&part.filename) {
            continue;
        }

        out.push(part);
    }
}

/// Extract the allowlisted attachments under `root`, fetching each payload
/// through the collaborator.
///
/// A candidate whose fetch yields no data, or whose data does not decode, is
/// skipped silently. Collaborator errors propagate and abort the run.
///
/// A childless root that itself carries an attachment id (a single-part
/// message that is an attachment) is treated as a one-element part list.
pub async fn extract_attachments<F>(
    fetcher: &F,
    message_id: &str,
    root: &MessagePart,
) -> Result<Vec<Attachment>, ApiError>
where
    F: AttachmentFetcher + ?Sized,
{
    let top_level: &[MessagePart] = if root.parts.is_empty() && root.attachment_id().is_some() {
        std::slice::from_ref(root)
    } else {
        &root.parts
    };

    let mut candidates = Vec::new();
    collect_candidates(top_level, &mut candidates);

    let mut attachments = Vec::with_capacity(candidates.len());
    for part in candidates {
        // Checked by collect_candidates.
        let Some(attachment_id) = part.attachment_id() else {
            continue;
        };

        let Some(data) = fetcher.fetch_attachment(message_id, attachment_id).await? else {
            continue;
        };
        let Some(bytes) = decode_base64url(&data) else {
            continue;
        };

        attachments.push(Attachment {
            filename: part.filename.clone(),
            data: bytes,
        });
    }

    Ok(attachments)
}
