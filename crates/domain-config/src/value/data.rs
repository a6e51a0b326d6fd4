//! Structured value records carried by stored settings

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A secret string value
///
/// `Debug` output never shows the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordData(String);

impl PasswordData {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The plaintext secret
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for PasswordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordData(<redacted>)")
    }
}

/// Input type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    #[default]
    Text,
    Email,
    Number,
    Password,
    Tel,
    Select,
    Checkbox,
    Hidden,
}

/// A single form field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfiguration {
    pub name: String,
    /// Label per locale tag
    #[serde(default)]
    pub labels: IndexMap<String, String>,
    #[serde(default)]
    pub form_type: FormType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub minimum_length: u32,
    #[serde(default)]
    pub maximum_length: u32,
    #[serde(default)]
    pub regex: Option<String>,
}

impl FormConfiguration {
    pub fn new(name: impl Into<String>, form_type: FormType) -> Self {
        Self {
            name: name.into(),
            labels: IndexMap::new(),
            form_type,
            required: false,
            read_only: false,
            minimum_length: 0,
            maximum_length: 0,
            regex: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_label(mut self, locale: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(locale.into(), label.into());
        self
    }
}

/// How a user permission selects users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserPermissionType {
    LdapQuery,
    LdapGroup,
    LdapUser,
}

/// A user selection rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPermission {
    pub permission_type: UserPermissionType,
    /// Directory profile the rule applies to, `None` for all profiles
    #[serde(default)]
    pub ldap_profile_id: Option<String>,
    #[serde(default)]
    pub ldap_query: Option<String>,
    #[serde(default)]
    pub ldap_base: Option<String>,
}

impl UserPermission {
    /// Rule matching an LDAP filter
    pub fn query(filter: impl Into<String>) -> Self {
        Self {
            permission_type: UserPermissionType::LdapQuery,
            ldap_profile_id: None,
            ldap_query: Some(filter.into()),
            ldap_base: None,
        }
    }
}

/// What an action does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    Webservice {
        method: String,
        url: String,
        #[serde(default)]
        body: Option<String>,
    },
    Ldap {
        attribute: String,
        value: String,
    },
}

/// A named action run after an operation completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionConfiguration {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub actions: Vec<ActionKind>,
}

/// Descriptor of a remote service the application calls out to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteWebServiceConfiguration {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<PasswordData>,
    /// PEM encoded certificates trusted for this service
    #[serde(default)]
    pub certificates: Vec<String>,
}

/// A named secret and the usages it is allowed for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSecretData {
    pub password: PasswordData,
    #[serde(default)]
    pub usage: Vec<String>,
}

/// File metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileInformation {
    pub filename: String,
    pub content_type: String,
}

/// A stored file: metadata plus base64 encoded content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub info: FileInformation,
    pub content: String,
}

/// Decoded file content
#[derive(Clone, PartialEq, Eq)]
pub struct FileContent(Vec<u8>);

impl FileContent {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Hex SHA-256 of the content
    pub fn sha256(&self) -> String {
        hex::encode(Sha256::digest(&self.0))
    }
}

impl fmt::Debug for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileContent")
            .field("size", &self.size())
            .finish()
    }
}

/// A stored private key with its certificate chain, both PEM encoded
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPrivateKey {
    pub key_pem: String,
    #[serde(default)]
    pub certificates_pem: Vec<String>,
}

impl fmt::Debug for StoredPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredPrivateKey")
            .field("key_pem", &"<redacted>")
            .field("certificates", &self.certificates_pem.len())
            .finish()
    }
}

/// Summary of a parsed X.509 certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X509Certificate {
    pub subject: String,
    pub issuer: String,
    pub serial: String,
    /// Unix timestamp
    pub not_before: i64,
    /// Unix timestamp
    pub not_after: i64,
    pub der: Vec<u8>,
}

impl X509Certificate {
    /// Hex SHA-256 fingerprint of the DER encoding
    pub fn sha256_fingerprint(&self) -> String {
        hex::encode(Sha256::digest(&self.der))
    }
}

/// Private key material in DER form
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKeyMaterial {
    /// PEM label, e.g. `PRIVATE KEY` or `RSA PRIVATE KEY`
    pub label: String,
    pub der: Vec<u8>,
}

impl fmt::Debug for PrivateKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyMaterial")
            .field("label", &self.label)
            .field("der", &"<redacted>")
            .finish()
    }
}

/// Decoded private key bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKeyCertificate {
    pub key: PrivateKeyMaterial,
    pub certificates: Vec<X509Certificate>,
}

/// An email template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailItem {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body_plain: String,
    #[serde(default)]
    pub body_html: Option<String>,
}
