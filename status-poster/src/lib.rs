//! Delivery seam for the gen-statuses workspace
//!
//! Posts an ordered thread of statuses through one or more backends and
//! reports success or failure per backend.

pub mod error;
pub mod poster;
pub mod posters;

pub use error::{PostError, Result};
pub use poster::{PostOutcome, PostedStatus, StatusPoster, post_everywhere};
pub use posters::{ConsolePoster, MockPoster, PosterKind, get_poster};
