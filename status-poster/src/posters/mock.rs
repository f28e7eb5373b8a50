//! Mock poster for testing
//!
//! Records every thread it receives and can be configured to reject every
//! post with a fixed error.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{PostError, Result};
use crate::poster::{PostedStatus, StatusPoster};

/// A mock poster for testing delivery behavior
pub struct MockPoster {
    /// Current call count
    call_count: AtomicUsize,
    /// Error to return on failure (None = always succeed)
    fail_with: Mutex<Option<PostError>>,
    /// Every thread passed to post_thread, in call order
    threads: Mutex<Vec<Vec<String>>>,
    /// Whether is_available() succeeds
    available: bool,
    /// Poster name for display
    name: &'static str,
}

impl MockPoster {
    /// Create a poster that always fails with the given error
    pub fn always_fails(error: PostError) -> Self {
        Self {
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(Some(error)),
            threads: Mutex::new(Vec::new()),
            available: true,
            name: "mock",
        }
    }

    /// Create a poster that always succeeds
    pub fn always_succeeds() -> Self {
        Self {
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(None),
            threads: Mutex::new(Vec::new()),
            available: true,
            name: "mock",
        }
    }

    /// Get the number of times post_thread() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Threads received so far, including ones that were rejected
    pub fn threads(&self) -> Vec<Vec<String>> {
        self.threads.lock().unwrap().clone()
    }

    /// Set a custom poster name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Make is_available() report the poster as unusable
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

#[async_trait]
impl StatusPoster for MockPoster {
    async fn post_thread(&self, statuses: &[String]) -> Result<Vec<PostedStatus>> {
        let call_num = self.call_count.fetch_add(1, Ordering::SeqCst);

        self.threads.lock().unwrap().push(statuses.to_vec());

        if let Some(err) = self.fail_with.lock().unwrap().as_ref() {
            return Err(clone_error(err));
        }

        Ok(statuses
            .iter()
            .enumerate()
            .map(|(i, _)| PostedStatus {
                id: format!("{}-{}-{}", self.name, call_num, i),
                url: None,
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(PostError::Unavailable(format!("{} is switched off", self.name)))
        }
    }
}

/// Clone a PostError (needed because PostError doesn't implement Clone)
fn clone_error(err: &PostError) -> PostError {
    match err {
        PostError::Unavailable(s) => PostError::Unavailable(s.clone()),
        PostError::UnknownPoster(s) => PostError::UnknownPoster(s.clone()),
        PostError::Io(e) => PostError::Io(std::io::Error::new(e.kind(), e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thread() -> Vec<String> {
        vec!["Mamma mia!".to_string()]
    }

    #[tokio::test]
    async fn test_always_succeeds() {
        let poster = MockPoster::always_succeeds();

        let result = poster.post_thread(&thread()).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap()[0].id, "mock-0-0");
        assert_eq!(poster.call_count(), 1);
        assert_eq!(poster.threads(), vec![thread()]);
    }

    #[tokio::test]
    async fn test_always_fails() {
        let poster = MockPoster::always_fails(PostError::Unavailable("offline".to_string()));

        for _ in 0..3 {
            let err = poster.post_thread(&thread()).await.unwrap_err();
            assert_eq!(err.to_string(), "Poster not available: offline");
        }
        assert_eq!(poster.call_count(), 3);
        assert_eq!(poster.threads().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_io_is_cloned_per_call() {
        let poster = MockPoster::always_fails(PostError::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "closed",
        )));

        for _ in 0..2 {
            match poster.post_thread(&thread()).await {
                Err(PostError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }
}
