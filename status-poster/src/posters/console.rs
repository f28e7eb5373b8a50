//! Poster that writes threads to stdout instead of a messaging service.

use async_trait::async_trait;
use std::io::Write;

use crate::error::Result;
use crate::poster::{PostedStatus, StatusPoster};

pub struct ConsolePoster;

impl ConsolePoster {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsolePoster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusPoster for ConsolePoster {
    async fn post_thread(&self, statuses: &[String]) -> Result<Vec<PostedStatus>> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        let mut posted = Vec::with_capacity(statuses.len());
        for (i, status) in statuses.iter().enumerate() {
            writeln!(out, "{}\n", status)?;
            posted.push(PostedStatus {
                id: format!("console-{}", i),
                url: None,
            });
        }
        out.flush()?;

        Ok(posted)
    }

    fn name(&self) -> &'static str {
        "console"
    }

    fn is_available(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_posts_every_status() {
        let poster = ConsolePoster::new();
        let statuses = vec!["Dis is-a…".to_string(), "…da end.".to_string()];

        let posted = poster.post_thread(&statuses).await.unwrap();
        assert_eq!(posted.len(), 2);
        assert_eq!(posted[1].id, "console-1");
    }
}
