use serde::{Deserialize, Serialize};

/// An entry in the dashboard's stock picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOption {
    /// Label shown to the user
    pub name: String,
    /// Artifact key, or `all` for the pairwise comparison
    pub key: String,
}

impl StockOption {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}
