//! Raw stored values and their typed decoding
//!
//! [`StoredValue`] is the shape values have inside the settings store. The
//! [`decode`] functions turn them into typed results.

pub mod data;
pub mod decode;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::setting::SettingSyntax;

pub use data::{
    ActionConfiguration, ActionKind, EmailItem, FileContent, FileInformation, FormConfiguration,
    FormType, NamedSecretData, PasswordData, PrivateKeyCertificate, PrivateKeyMaterial,
    RemoteWebServiceConfiguration, StoredFile, StoredPrivateKey, UserPermission,
    UserPermissionType, X509Certificate,
};

/// A raw value as held by the settings store
///
/// Localized variants are keyed by locale tag (`""` is the default locale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "syntax", content = "value", rename_all = "snake_case")]
pub enum StoredValue {
    String(String),
    Boolean(bool),
    Numeric(i64),
    StringArray(Vec<String>),
    LocalizedString(IndexMap<String, String>),
    LocalizedStringArray(IndexMap<String, Vec<String>>),
    Select(String),
    OptionList(Vec<String>),
    Form(Vec<FormConfiguration>),
    UserPermission(Vec<UserPermission>),
    Action(Vec<ActionConfiguration>),
    RemoteWebService(Vec<RemoteWebServiceConfiguration>),
    Password(Option<PasswordData>),
    NamedSecret(IndexMap<String, NamedSecretData>),
    File(Vec<StoredFile>),
    /// PEM encoded certificates
    X509Cert(Vec<String>),
    PrivateKey(Option<StoredPrivateKey>),
    LocalizedEmail(IndexMap<String, EmailItem>),
}

impl StoredValue {
    /// Empty value for a syntax
    pub fn empty(syntax: SettingSyntax) -> Self {
        match syntax {
            SettingSyntax::String => Self::String(String::new()),
            SettingSyntax::Boolean => Self::Boolean(false),
            SettingSyntax::Numeric => Self::Numeric(0),
            SettingSyntax::StringArray => Self::StringArray(Vec::new()),
            SettingSyntax::LocalizedString => Self::LocalizedString(IndexMap::new()),
            SettingSyntax::LocalizedStringArray => Self::LocalizedStringArray(IndexMap::new()),
            SettingSyntax::Select => Self::Select(String::new()),
            SettingSyntax::OptionList => Self::OptionList(Vec::new()),
            SettingSyntax::Form => Self::Form(Vec::new()),
            SettingSyntax::UserPermission => Self::UserPermission(Vec::new()),
            SettingSyntax::Action => Self::Action(Vec::new()),
            SettingSyntax::RemoteWebService => Self::RemoteWebService(Vec::new()),
            SettingSyntax::Password => Self::Password(None),
            SettingSyntax::NamedSecret => Self::NamedSecret(IndexMap::new()),
            SettingSyntax::File => Self::File(Vec::new()),
            SettingSyntax::X509Cert => Self::X509Cert(Vec::new()),
            SettingSyntax::PrivateKey => Self::PrivateKey(None),
            SettingSyntax::LocalizedEmail => Self::LocalizedEmail(IndexMap::new()),
        }
    }

    /// Syntax this value is shaped for
    pub fn syntax(&self) -> SettingSyntax {
        match self {
            Self::String(_) => SettingSyntax::String,
            Self::Boolean(_) => SettingSyntax::Boolean,
            Self::Numeric(_) => SettingSyntax::Numeric,
            Self::StringArray(_) => SettingSyntax::StringArray,
            Self::LocalizedString(_) => SettingSyntax::LocalizedString,
            Self::LocalizedStringArray(_) => SettingSyntax::LocalizedStringArray,
            Self::Select(_) => SettingSyntax::Select,
            Self::OptionList(_) => SettingSyntax::OptionList,
            Self::Form(_) => SettingSyntax::Form,
            Self::UserPermission(_) => SettingSyntax::UserPermission,
            Self::Action(_) => SettingSyntax::Action,
            Self::RemoteWebService(_) => SettingSyntax::RemoteWebService,
            Self::Password(_) => SettingSyntax::Password,
            Self::NamedSecret(_) => SettingSyntax::NamedSecret,
            Self::File(_) => SettingSyntax::File,
            Self::X509Cert(_) => SettingSyntax::X509Cert,
            Self::PrivateKey(_) => SettingSyntax::PrivateKey,
            Self::LocalizedEmail(_) => SettingSyntax::LocalizedEmail,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::Numeric(_) => "numeric",
            Self::StringArray(_) => "string_array",
            Self::LocalizedString(_) => "localized_string",
            Self::LocalizedStringArray(_) => "localized_string_array",
            Self::Select(_) => "select",
            Self::OptionList(_) => "option_list",
            Self::Form(_) => "form",
            Self::UserPermission(_) => "user_permission",
            Self::Action(_) => "action",
            Self::RemoteWebService(_) => "remote_web_service",
            Self::Password(_) => "password",
            Self::NamedSecret(_) => "named_secret",
            Self::File(_) => "file",
            Self::X509Cert(_) => "x509_cert",
            Self::PrivateKey(_) => "private_key",
            Self::LocalizedEmail(_) => "localized_email",
        }
    }
}
