//! Typed, cached configuration facade for a single domain
//!
//! This crate sits on top of an immutable settings store and turns raw stored
//! values into typed objects:
//! - Decodes strings, booleans, numbers, enums, forms, permissions, secrets,
//!   files, certificates and private keys
//! - Builds profile objects (directory, password policy, helpdesk, ...) through
//!   a compile-time factory registry
//! - Memoizes expensive or security sensitive derived values exactly once per
//!   facade instance, safe under concurrent first access
//! - Derives the instance security key with an ephemeral fallback
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         DomainConfig                             │
//! │  ┌──────────────┐   ┌──────────────────┐   ┌────────────────┐   │
//! │  │ SettingReader│   │ DerivedValueCache│   │ProfileRegistry │   │
//! │  └──────┬───────┘   └────────┬─────────┘   └───────┬────────┘   │
//! │         └────────────────────┼─────────────────────┘            │
//! │                        ┌─────▼─────┐                            │
//! │                        │  Decoder  │                            │
//! │                        └─────┬─────┘                            │
//! └──────────────────────────────┼──────────────────────────────────┘
//!                                ▼
//!                      StoredConfiguration (read-only)
//! ```
//!
//! The store is treated as frozen for the lifetime of a [`DomainConfig`]. A
//! configuration reload builds a new facade instead of mutating the old one,
//! so nothing cached here is ever invalidated.

pub mod cache;
pub mod facade;
pub mod locale;
pub mod options;
pub mod profile;
pub mod properties;
pub mod reader;
pub mod security_key;
pub mod setting;
pub mod store;
pub mod value;

// Re-export main types
pub use facade::{DomainConfig, DomainConfigBuilder, DomainId};
pub use locale::Locale;
pub use profile::{Profile, ProfileDefinition, ProfileMap};
pub use properties::AppProperties;
pub use reader::SettingReader;
pub use security_key::SecurityKey;
pub use setting::{Setting, SettingCategory, SettingSyntax};
pub use store::{MemoryStore, RecordType, StoredConfigItemKey, StoredConfiguration, TemplateSet};
pub use value::StoredValue;

/// Machine-checkable codes carried by unrecoverable configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Generic invalid or malformed configuration
    InvalidConfig,
    /// Security key is too short or cannot be turned into key material
    InvalidSecurityKey,
    /// A profile could not be built from its settings
    ProfileConstruction,
    /// No enabled directory profile exists
    NoLdapProfile,
    /// A setting holds a value that is no longer functional
    DeprecatedValue,
}

impl ErrorCode {
    /// Stable string form of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::InvalidSecurityKey => "INVALID_SECURITY_KEY",
            Self::ProfileConstruction => "PROFILE_CONSTRUCTION",
            Self::NoLdapProfile => "NO_LDAP_PROFILE",
            Self::DeprecatedValue => "DEPRECATED_VALUE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error types for configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("attempt to read setting value for setting '{key}' as non-profiled setting")]
    ProfiledSettingAccess { key: &'static str },

    #[error("unknown {category} profile id specified: '{profile_id}'")]
    UnknownProfile {
        category: SettingCategory,
        profile_id: String,
    },

    #[error("setting '{key}' has syntax {expected} but stored value is {found}")]
    ValueType {
        key: &'static str,
        expected: SettingSyntax,
        found: &'static str,
    },

    #[error("{code}: {detail}")]
    Unrecoverable { code: ErrorCode, detail: String },

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ConfigError {
    pub fn unrecoverable(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Unrecoverable {
            code,
            detail: detail.into(),
        }
    }

    pub fn invalid_config(detail: impl Into<String>) -> Self {
        Self::unrecoverable(ErrorCode::InvalidConfig, detail)
    }

    pub fn encryption(msg: impl Into<String>) -> Self {
        Self::Encryption(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Code of an unrecoverable error, `None` for every other class
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Unrecoverable { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// True for errors caused by calling the facade the wrong way rather
    /// than by the stored data
    pub fn is_programmer_error(&self) -> bool {
        matches!(
            self,
            Self::ProfiledSettingAccess { .. } | Self::UnknownProfile { .. } | Self::ValueType { .. }
        )
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
