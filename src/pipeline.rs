//! Run orchestrator — drives listing, extraction, classification and
//! filesystem projection, one message at a time.
//!
//! Processing is strictly sequential and fail-fast: a collaborator or
//! filesystem error aborts the run. Output directories are keyed by message
//! id, so reordering the listing produces the same final tree.

use std::path::PathBuf;

use tracing::info;

use crate::classify::classify;
use crate::error::Result;
use crate::extract::{extract_attachments, extract_body};
use crate::gmail::client::{AttachmentFetcher, MessageStore};
use crate::storage::{self, MessageRecord};

/// Counters for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Messages fetched, classified and projected.
    pub processed: usize,
    /// Attachments written across all messages.
    pub attachments: usize,
}

/// The fetch-classify-project pipeline.
pub struct Pipeline<S> {
    store: S,
    output_dir: PathBuf,
    max_results: u32,
}

impl<S> Pipeline<S>
where
    S: MessageStore + AttachmentFetcher,
{
    pub fn new(store: S, output_dir: PathBuf, max_results: u32) -> Self {
        Self {
            store,
            output_dir,
            max_results,
        }
    }

    /// Process up to `max_results` messages from the store.
    pub async fn run(&self) -> Result<RunSummary> {
        info!(max_results = self.max_results, "Listing messages");
        let ids = self.store.list_messages(self.max_results).await?;

        if ids.is_empty() {
            info!("No messages found");
            return Ok(RunSummary::default());
        }

        let mut summary = RunSummary::default();
        for id in &ids {
            summary.attachments += self.process_message(id).await?;
            summary.processed += 1;
        }

        Ok(summary)
    }

    /// Fetch, classify and project one message. Returns the number of
    /// attachments written.
    async fn process_message(&self, id: &str) -> Result<usize> {
        let message = self.store.get_message(id).await?;

        let subject = message.subject();
        let sender = message.sender();

        let (body, attachments) = match &message.payload {
            Some(payload) => {
                let body = extract_body(payload);
                let attachments = extract_attachments(&self.store, id, payload).await?;
                (body, attachments)
            }
            None => (String::new(), Vec::new()),
        };

        let category = classify(subject, sender, &body);

        let record = MessageRecord {
            id,
            subject,
            sender,
            snippet: &message.snippet,
            body: &body,
        };
        let dir = storage::project(&self.output_dir, category, &record, &attachments).await?;

        info!(
            id,
            category = %category,
            attachments = attachments.len(),
            path = %dir.display(),
            "Message archived"
        );

        Ok(attachments.len())
    }
}
