use async_trait::async_trait;

use crate::error::{PostError, Result};

/// A status accepted by a messaging service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedStatus {
    pub id: String,
    pub url: Option<String>,
}

/// Result of delivering one thread through one poster
#[derive(Debug)]
pub struct PostOutcome {
    pub poster: &'static str,
    pub result: std::result::Result<Vec<PostedStatus>, PostError>,
}

impl PostOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Trait for delivery backends
#[async_trait]
pub trait StatusPoster: Send + Sync {
    /// Post the statuses as one thread, in order, each replying to the previous
    async fn post_thread(&self, statuses: &[String]) -> Result<Vec<PostedStatus>>;

    /// Get the poster name for display
    fn name(&self) -> &'static str;

    /// Check if the poster can be used (credentials present, etc.)
    fn is_available(&self) -> Result<()>;
}

/// Deliver one thread through every poster.
///
/// A failing poster never stops the others; each gets its own outcome.
pub async fn post_everywhere(
    posters: &[Box<dyn StatusPoster>],
    statuses: &[String],
) -> Vec<PostOutcome> {
    let mut outcomes = Vec::with_capacity(posters.len());

    for poster in posters {
        let result = match poster.is_available() {
            Ok(()) => poster.post_thread(statuses).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(posted) => log::info!("{}: posted {} status(es)", poster.name(), posted.len()),
            Err(e) => log::warn!("{}: delivery failed: {}", poster.name(), e),
        }

        outcomes.push(PostOutcome {
            poster: poster.name(),
            result,
        });
    }

    outcomes
}
