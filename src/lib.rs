pub mod api;
pub mod cli;
pub mod error;
pub mod identity;
pub mod profile_paths;
