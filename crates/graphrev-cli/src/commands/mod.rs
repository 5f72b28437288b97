pub mod delete;
pub mod diff;
pub mod export;
pub mod import;
pub mod list;
pub mod read;
pub mod status;
