//! Enumerated setting values
//!
//! Stored literals are the SCREAMING_SNAKE_CASE variant names.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::setting::Setting;
use crate::{ConfigError, ErrorCode, Result};

/// Where user data such as responses or OTP secrets is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataStorageMethod {
    Auto,
    Ldap,
    Db,
    #[serde(rename = "LOCALDB")]
    LocalDb,
    Nmas,
}

impl DataStorageMethod {
    /// Returns all storage methods
    pub fn all() -> &'static [DataStorageMethod] {
        &[Self::Auto, Self::Ldap, Self::Db, Self::LocalDb, Self::Nmas]
    }

    /// Stored tag of this method
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Ldap => "LDAP",
            Self::Db => "DB",
            Self::LocalDb => "LOCALDB",
            Self::Nmas => "NMAS",
        }
    }

    /// Parse a stored tag, matching exactly
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.tag() == tag)
    }
}

impl fmt::Display for DataStorageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Where issued tokens are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStorageMethod {
    #[serde(rename = "STORE_LOCALDB")]
    StoreLocalDb,
    StoreDb,
    StoreCrypto,
    StoreLdap,
}

impl TokenStorageMethod {
    /// Returns all token storage methods
    pub fn all() -> &'static [TokenStorageMethod] {
        &[
            Self::StoreLocalDb,
            Self::StoreDb,
            Self::StoreCrypto,
            Self::StoreLdap,
        ]
    }

    /// Stored literal of this method
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StoreLocalDb => "STORE_LOCALDB",
            Self::StoreDb => "STORE_DB",
            Self::StoreCrypto => "STORE_CRYPTO",
            Self::StoreLdap => "STORE_LDAP",
        }
    }

    /// Parse a stored literal, matching exactly
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.as_str() == tag)
    }
}

impl fmt::Display for TokenStorageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How server certificates are validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateMatchingMode {
    CertificateChain,
    #[default]
    CaOnly,
}

/// Severity threshold for the local event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Channel used to deliver tokens and notices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageSendMethod {
    None,
    #[serde(rename = "EMAILONLY")]
    EmailOnly,
    #[serde(rename = "SMSONLY")]
    SmsOnly,
    #[serde(rename = "CHOICE_SMS_EMAIL")]
    ChoiceSmsEmail,
    /// No longer functional, kept so old configurations still decode
    Both,
    /// No longer functional, kept so old configurations still decode
    EmailFirst,
    /// No longer functional, kept so old configurations still decode
    SmsFirst,
}

impl MessageSendMethod {
    /// Stored literal of this method
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::EmailOnly => "EMAILONLY",
            Self::SmsOnly => "SMSONLY",
            Self::ChoiceSmsEmail => "CHOICE_SMS_EMAIL",
            Self::Both => "BOTH",
            Self::EmailFirst => "EMAIL_FIRST",
            Self::SmsFirst => "SMS_FIRST",
        }
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, Self::Both | Self::EmailFirst | Self::SmsFirst)
    }

    /// Fail when a setting holds a method that no longer works
    pub fn ensure_supported(&self, setting: &Setting, profile_id: Option<&str>) -> Result<()> {
        if !self.is_deprecated() {
            return Ok(());
        }
        let location = match profile_id {
            Some(profile) => format!("{setting} [{profile}]"),
            None => setting.to_string(),
        };
        Err(ConfigError::unrecoverable(
            ErrorCode::DeprecatedValue,
            format!("{location} setting is using a no longer functional setting value: {self}"),
        ))
    }
}

impl fmt::Display for MessageSendMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ways a user can prove their identity during password recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecoveryVerificationMethod {
    PreviousAuth,
    Attributes,
    ChallengeResponses,
    Token,
    Otp,
    RemoteResponses,
}
