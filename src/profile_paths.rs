use std::path::{Path, PathBuf};

/// Centralized helpers for the on-disk profile folder (durable session
/// storage plus console state). Keeps locations consistent across modules.
#[inline]
pub fn default_profile_root() -> PathBuf {
    PathBuf::from(std::env::var("SITEBOARD_PROFILE_DIR").unwrap_or_else(|_| ".siteboard".to_string()))
}

#[inline]
pub fn session_file(profile_root: &Path) -> PathBuf { profile_root.join("session.json") }

#[inline]
pub fn history_file(profile_root: &Path) -> PathBuf { profile_root.join("history.txt") }
