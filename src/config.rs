// Application configuration module
// Supplies the environment name and the search history size bound

use serde::{Deserialize, Serialize};

/// Configuration surface consumed by the search history store
pub trait ConfigProvider {
    /// Name of the active deployment environment
    fn environment(&self) -> &str;

    /// Configured history bound, when one is set
    fn search_max_size(&self) -> Option<usize>;
}

/// Concrete configuration loaded from the application's JSON config document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment name (e.g. "test", "prod")
    pub environment: String,
    /// Maximum number of searches kept in history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_max_size: Option<usize>,
}

impl AppConfig {
    /// Parse configuration from a JSON document
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl ConfigProvider for AppConfig {
    fn environment(&self) -> &str {
        &self.environment
    }

    fn search_max_size(&self) -> Option<usize> {
        self.search_max_size
    }
}
