//! Filesystem projection of classified messages.
//!
//! Each message is written to `<root>/<category>/<message_id>/`: an
//! `info.txt` metadata file plus one file per attachment. All writes are
//! idempotent overwrites, so reprocessing a message fully rewrites its
//! directory and repairs any earlier partial write.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};

use crate::classify::Category;
use crate::error::StorageError;
use crate::extract::Attachment;

/// Metadata file written into every message directory.
const INFO_FILE: &str = "info.txt";

/// Body text beyond this many characters is truncated in `info.txt`.
const BODY_LIMIT_CHARS: usize = 2000;

/// Appended when the body was truncated.
const TRUNCATION_MARKER: &str = "...";

/// Metadata of a message to be projected.
#[derive(Debug, Clone)]
pub struct MessageRecord<'a> {
    pub id: &'a str,
    pub subject: &'a str,
    pub sender: &'a str,
    pub snippet: &'a str,
    pub body: &'a str,
}

/// Write a message's metadata and attachments under the category tree.
///
/// Creates `<root>/<category>/<id>/` (no error when already present) and
/// returns that directory. Failures propagate; nothing is rolled back.
pub async fn project(
    root: &Path,
    category: Category,
    record: &MessageRecord<'_>,
    attachments: &[Attachment],
) -> Result<PathBuf, StorageError> {
    let dir = root.join(category.as_str()).join(record.id);
    fs::create_dir_all(&dir)
        .await
        .map_err(|source| StorageError::CreateDir {
            path: dir.clone(),
            source,
        })?;

    let info_path = dir.join(INFO_FILE);
    fs::write(&info_path, render_info(record))
        .await
        .map_err(|source| StorageError::WriteFile {
            path: info_path,
            source,
        })?;

    for attachment in attachments {
        let path = dir.join(safe_file_name(&attachment.filename));
        fs::write(&path, &attachment.data)
            .await
            .map_err(|source| StorageError::WriteFile { path, source })?;
    }

    Ok(dir)
}

/// Render the fixed-order `info.txt` content.
fn render_info(record: &MessageRecord<'_>) -> String {
    format!(
        "{sep}\n\
         ID da Mensagem: {id}\n\
         Assunto: {subject}\n\
         De: {sender}\n\n\
         Trecho: {snippet}\n\n\
         Corpo do email:\n\
         {body}\n\n",
        sep = "=".repeat(50),
        id = record.id,
        subject = record.subject,
        sender = record.sender,
        snippet = record.snippet,
        body = truncate_body(record.body),
    )
}

/// Truncate a body to the preview limit, marking the cut.
fn truncate_body(body: &str) -> String {
    let mut chars = body.chars();
    let preview: String = chars.by_ref().take(BODY_LIMIT_CHARS).collect();
    if chars.next().is_some() {
        format!("{preview}{TRUNCATION_MARKER}")
    } else {
        preview
    }
}

/// Reduce an attachment filename to its final path component so a hostile
/// name cannot escape the message directory.
fn safe_file_name(filename: &str) -> String {
    Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment.bin")
        .to_string()
}

/// Recursively delete the output tree.
///
/// OS-level errors are reported, not propagated; a missing directory is a
/// no-op.
pub async fn reset(root: &Path) {
    match fs::remove_dir_all(root).await {
        Ok(()) => info!(path = %root.display(), "Output directory removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %root.display(), "Output directory does not exist, nothing to reset");
        }
        Err(e) => warn!(path = %root.display(), error = %e, "Failed to remove output directory"),
    }
}
