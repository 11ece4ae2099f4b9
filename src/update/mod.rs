// Update module - checks GitHub for a newer release off the UI event loop

pub mod checker;

pub use checker::{
    LATEST_RELEASE_URL, RELEASES_PAGE_URL, UpdateChecker, UpdateError, UpdateStatus,
    evaluate_release_url, is_newer, spawn_check, spawn_update_check,
};
