// Client-side search history tracking
// Records the parameter sets a user searched with, deduplicates them,
// bounds their count and persists them across sessions per named consumer

// Include the configuration module
mod config;
pub use config::*;

// Include the callback detection module
mod auth;
pub use auth::*;

// Include the storage port module
mod storage;
pub use storage::*;

// Include the search module
mod search;
pub use search::*;
