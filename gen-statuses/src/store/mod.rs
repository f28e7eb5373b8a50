//! Storage for generated statuses and the posting cursor.

mod cursor;
mod persistence;

pub use cursor::next_status;
pub use persistence::{CURSOR_FILE, STATUSES_FILE, StatusStore, default_persist_dir};
