//! Connection-related data models.
//!
//! This module defines the registry entries loaded from configuration and the
//! summaries handed back to the agent.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported database types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    PostgreSQL,
    /// Includes MariaDB
    MySQL,
    SQLite,
}

impl DatabaseType {
    /// Detect the database type from a connection URL scheme.
    pub fn from_connection_string(connection_string: &str) -> Option<Self> {
        let lower = connection_string.to_lowercase();
        if lower.starts_with("postgres://") || lower.starts_with("postgresql://") {
            Some(Self::PostgreSQL)
        } else if lower.starts_with("mysql://") || lower.starts_with("mariadb://") {
            Some(Self::MySQL)
        } else if lower.starts_with("sqlite:") {
            Some(Self::SQLite)
        } else {
            None
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PostgreSQL => "PostgreSQL",
            Self::MySQL => "MySQL",
            Self::SQLite => "SQLite",
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A named connection definition. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionConfig {
    pub name: String,
    /// Driver URL. Contains credentials - log `masked_url()` instead.
    pub url: String,
    pub readonly: bool,
}

impl ConnectionConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>, readonly: bool) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            readonly,
        }
    }

    /// Database type implied by the URL scheme, if supported.
    pub fn db_type(&self) -> Option<DatabaseType> {
        DatabaseType::from_connection_string(&self.url)
    }

    /// Get a display-safe version of the URL (password masked).
    pub fn masked_url(&self) -> String {
        if let Some(at_pos) = self.url.find('@') {
            if let Some(colon_pos) = self.url[..at_pos].rfind(':') {
                // Only mask when the colon separates user and password, not the scheme.
                if !self.url[colon_pos..].starts_with("://") {
                    let prefix = &self.url[..colon_pos + 1];
                    let suffix = &self.url[at_pos..];
                    return format!("{}****{}", prefix, suffix);
                }
            }
        }
        self.url.clone()
    }

    pub fn summary(&self) -> ConnectionSummary {
        ConnectionSummary {
            name: self.name.clone(),
            readonly: self.readonly,
        }
    }
}

/// What `list_connections` reports per connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConnectionSummary {
    pub name: String,
    pub readonly: bool,
}
