//! Pure conversions from raw stored values into typed results
//!
//! Every function checks that the stored value matches the syntax it is
//! asked to decode; a mismatch is a programmer error. Unknown enum literals
//! are not errors: they are logged and dropped, since the allowed values of a
//! setting can change between versions.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use indexmap::{IndexMap, IndexSet};
use serde::de::DeserializeOwned;
use std::hash::Hash;
use tracing::warn;

use crate::locale::{self, Locale};
use crate::setting::{Setting, SettingSyntax};
use crate::value::StoredValue;
use crate::value::data::{
    ActionConfiguration, EmailItem, FileContent, FileInformation, FormConfiguration,
    NamedSecretData, PasswordData, PrivateKeyCertificate, PrivateKeyMaterial,
    RemoteWebServiceConfiguration, UserPermission, X509Certificate,
};
use crate::{ConfigError, Result};

fn mismatch(setting: &Setting, value: &StoredValue) -> ConfigError {
    ConfigError::ValueType {
        key: setting.key(),
        expected: setting.syntax(),
        found: value.type_name(),
    }
}

pub fn value_to_string(setting: &Setting, value: &StoredValue) -> Result<String> {
    match value {
        StoredValue::String(s) | StoredValue::Select(s) => Ok(s.clone()),
        other => Err(mismatch(setting, other)),
    }
}

pub fn value_to_boolean(setting: &Setting, value: &StoredValue) -> Result<bool> {
    match value {
        StoredValue::Boolean(b) => Ok(*b),
        other => Err(mismatch(setting, other)),
    }
}

pub fn value_to_long(setting: &Setting, value: &StoredValue) -> Result<i64> {
    match value {
        StoredValue::Numeric(n) => Ok(*n),
        other => Err(mismatch(setting, other)),
    }
}

pub fn value_to_string_array(setting: &Setting, value: &StoredValue) -> Result<Vec<String>> {
    match value {
        StoredValue::StringArray(values) => Ok(values.clone()),
        other => Err(mismatch(setting, other)),
    }
}

/// Best locale match of a localized string, empty when nothing matches
pub fn value_to_localized_string(
    setting: &Setting,
    value: &StoredValue,
    locale: &Locale,
) -> Result<String> {
    match value {
        StoredValue::LocalizedString(values) => {
            Ok(locale::select(values, locale).cloned().unwrap_or_default())
        }
        other => Err(mismatch(setting, other)),
    }
}

/// Best locale match of a localized string array, empty when nothing matches
pub fn value_to_localized_string_array(
    setting: &Setting,
    value: &StoredValue,
    locale: &Locale,
) -> Result<Vec<String>> {
    match value {
        StoredValue::LocalizedStringArray(values) => {
            Ok(locale::select(values, locale).cloned().unwrap_or_default())
        }
        other => Err(mismatch(setting, other)),
    }
}

fn parse_literal<E: DeserializeOwned>(literal: &str) -> Option<E> {
    serde_json::from_value(serde_json::Value::String(literal.to_string())).ok()
}

/// Decode a select value into an enum
///
/// An unknown literal yields `None` with a warning.
pub fn value_to_enum<E: DeserializeOwned>(setting: &Setting, value: &StoredValue) -> Result<Option<E>> {
    let literal = match value {
        StoredValue::Select(s) | StoredValue::String(s) => s,
        other => return Err(mismatch(setting, other)),
    };

    let parsed = parse_literal(literal);
    if parsed.is_none() {
        warn!(
            setting = setting.key(),
            value = %literal,
            "unknown enum value for setting, ignoring"
        );
    }
    Ok(parsed)
}

/// Decode an option list into a set of enum values, skipping unknown literals
pub fn value_to_option_list<E>(setting: &Setting, value: &StoredValue) -> Result<IndexSet<E>>
where
    E: DeserializeOwned + Hash + Eq,
{
    let literals = match value {
        StoredValue::OptionList(values) => values,
        other => return Err(mismatch(setting, other)),
    };

    let mut result = IndexSet::new();
    for literal in literals {
        match parse_literal(literal) {
            Some(parsed) => {
                result.insert(parsed);
            }
            None => warn!(
                setting = setting.key(),
                value = %literal,
                "unknown option value for setting, ignoring"
            ),
        }
    }
    Ok(result)
}

pub fn value_to_form(setting: &Setting, value: &StoredValue) -> Result<Vec<FormConfiguration>> {
    match value {
        StoredValue::Form(fields) => Ok(fields.clone()),
        other => Err(mismatch(setting, other)),
    }
}

pub fn value_to_user_permissions(
    setting: &Setting,
    value: &StoredValue,
) -> Result<Vec<UserPermission>> {
    match value {
        StoredValue::UserPermission(permissions) => Ok(permissions.clone()),
        other => Err(mismatch(setting, other)),
    }
}

pub fn value_to_actions(setting: &Setting, value: &StoredValue) -> Result<Vec<ActionConfiguration>> {
    match value {
        StoredValue::Action(actions) => Ok(actions.clone()),
        other => Err(mismatch(setting, other)),
    }
}

pub fn value_to_remote_web_services(
    setting: &Setting,
    value: &StoredValue,
) -> Result<Vec<RemoteWebServiceConfiguration>> {
    match value {
        StoredValue::RemoteWebService(services) => Ok(services.clone()),
        other => Err(mismatch(setting, other)),
    }
}

/// `None` when no password is stored
pub fn value_to_password(setting: &Setting, value: &StoredValue) -> Result<Option<PasswordData>> {
    match value {
        StoredValue::Password(password) => Ok(password.clone()),
        other => Err(mismatch(setting, other)),
    }
}

pub fn value_to_named_secrets(
    setting: &Setting,
    value: &StoredValue,
) -> Result<IndexMap<String, NamedSecretData>> {
    match value {
        StoredValue::NamedSecret(secrets) => Ok(secrets.clone()),
        other => Err(mismatch(setting, other)),
    }
}

/// Decode stored files, base64 decoding their content
pub fn value_to_file(
    setting: &Setting,
    value: &StoredValue,
) -> Result<IndexMap<FileInformation, FileContent>> {
    let files = match value {
        StoredValue::File(files) => files,
        other => return Err(mismatch(setting, other)),
    };

    files
        .iter()
        .map(|file| {
            let bytes = BASE64.decode(file.content.trim()).map_err(|e| {
                ConfigError::invalid_config(format!(
                    "setting '{}' file '{}' has invalid content: {e}",
                    setting.key(),
                    file.info.filename
                ))
            })?;
            Ok((file.info.clone(), FileContent::new(bytes)))
        })
        .collect()
}

/// Parse every `CERTIFICATE` block of a PEM document
pub fn parse_certificates_pem(pem_text: &str) -> Result<Vec<X509Certificate>> {
    let blocks = pem::parse_many(pem_text)
        .map_err(|e| ConfigError::invalid_config(format!("invalid PEM data: {e}")))?;

    blocks
        .iter()
        .filter(|block| block.tag() == "CERTIFICATE")
        .map(|block| parse_certificate_der(block.contents()))
        .collect()
}

/// Parse a DER encoded certificate
pub fn parse_certificate_der(der: &[u8]) -> Result<X509Certificate> {
    let (_, cert) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| ConfigError::invalid_config(format!("invalid X.509 certificate: {e}")))?;

    Ok(X509Certificate {
        subject: cert.subject().to_string(),
        issuer: cert.issuer().to_string(),
        serial: cert.raw_serial_as_string(),
        not_before: cert.validity().not_before.timestamp(),
        not_after: cert.validity().not_after.timestamp(),
        der: der.to_vec(),
    })
}

pub fn value_to_x509_certificates(
    setting: &Setting,
    value: &StoredValue,
) -> Result<Vec<X509Certificate>> {
    let pems = match value {
        StoredValue::X509Cert(pems) => pems,
        other => return Err(mismatch(setting, other)),
    };

    let mut certificates = Vec::new();
    for pem_text in pems {
        certificates.extend(parse_certificates_pem(pem_text)?);
    }
    Ok(certificates)
}

/// Decode a private key bundle; `None` when nothing is stored
pub fn value_to_private_key(
    setting: &Setting,
    value: &StoredValue,
) -> Result<Option<PrivateKeyCertificate>> {
    let stored = match value {
        StoredValue::PrivateKey(Some(stored)) => stored,
        StoredValue::PrivateKey(None) => return Ok(None),
        other => return Err(mismatch(setting, other)),
    };

    let key_block = pem::parse(&stored.key_pem).map_err(|e| {
        ConfigError::invalid_config(format!(
            "setting '{}' holds an invalid private key: {e}",
            setting.key()
        ))
    })?;
    if !key_block.tag().ends_with("PRIVATE KEY") {
        return Err(ConfigError::invalid_config(format!(
            "setting '{}' expected a private key PEM block, found '{}'",
            setting.key(),
            key_block.tag()
        )));
    }

    let mut certificates = Vec::new();
    for pem_text in &stored.certificates_pem {
        certificates.extend(parse_certificates_pem(pem_text)?);
    }

    Ok(Some(PrivateKeyCertificate {
        key: PrivateKeyMaterial {
            label: key_block.tag().to_string(),
            der: key_block.contents().to_vec(),
        },
        certificates,
    }))
}

/// Email items keyed by parsed locale
pub fn value_to_localized_email(
    setting: &Setting,
    value: &StoredValue,
) -> Result<IndexMap<Locale, EmailItem>> {
    match value {
        StoredValue::LocalizedEmail(items) => Ok(items
            .iter()
            .map(|(tag, item)| (Locale::parse(tag), item.clone()))
            .collect()),
        other => Err(mismatch(setting, other)),
    }
}

/// Check a stored value against a declared syntax without decoding it
pub fn check_syntax(setting: &Setting, value: &StoredValue) -> Result<()> {
    let compatible = match (setting.syntax(), value.syntax()) {
        (expected, found) if expected == found => true,
        (SettingSyntax::Select, SettingSyntax::String) => true,
        _ => false,
    };
    if compatible {
        Ok(())
    } else {
        Err(mismatch(setting, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{DataStorageMethod, TokenStorageMethod};
    use crate::value::data::StoredFile;

    #[test]
    fn test_enum_decode() {
        let setting = Setting::TOKEN_STORAGE_METHOD;
        let value = StoredValue::Select("STORE_DB".into());
        let decoded: Option<TokenStorageMethod> = value_to_enum(&setting, &value).unwrap();
        assert_eq!(decoded, Some(TokenStorageMethod::StoreDb));
    }

    #[test]
    fn test_unknown_enum_literal_is_none() {
        let setting = Setting::TOKEN_STORAGE_METHOD;
        let value = StoredValue::Select("STORE_IN_THE_CLOUD".into());
        let decoded: Option<TokenStorageMethod> = value_to_enum(&setting, &value).unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn test_option_list_skips_unknown() {
        let setting = Setting::STORAGE_ENABLED_METHODS;
        let value = StoredValue::OptionList(vec!["DB".into(), "BOGUS".into(), "LDAP".into()]);
        let decoded: IndexSet<DataStorageMethod> = value_to_option_list(&setting, &value).unwrap();
        assert_eq!(
            decoded.into_iter().collect::<Vec<_>>(),
            vec![DataStorageMethod::Db, DataStorageMethod::Ldap]
        );
    }

    #[test]
    fn test_syntax_mismatch() {
        let err = value_to_boolean(&Setting::SITE_URL, &StoredValue::String("x".into()))
            .unwrap_err();
        assert!(err.is_programmer_error());
    }

    #[test]
    fn test_localized_string() {
        let mut values = IndexMap::new();
        values.insert(String::new(), "Welcome".to_string());
        values.insert("de".to_string(), "Willkommen".to_string());
        let value = StoredValue::LocalizedString(values);

        let german =
            value_to_localized_string(&Setting::APPLICATION_TITLE, &value, &Locale::parse("de_DE"))
                .unwrap();
        assert_eq!(german, "Willkommen");

        let fallback =
            value_to_localized_string(&Setting::APPLICATION_TITLE, &value, &Locale::parse("ja"))
                .unwrap();
        assert_eq!(fallback, "Welcome");
    }

    #[test]
    fn test_file_decode() {
        let value = StoredValue::File(vec![StoredFile {
            info: FileInformation {
                filename: "bundle.zip".into(),
                content_type: "application/zip".into(),
            },
            content: BASE64.encode(b"zip-bytes"),
        }]);

        let files = value_to_file(&Setting::DISPLAY_CUSTOM_RESOURCE_BUNDLE, &value).unwrap();
        let (info, content) = files.first().unwrap();
        assert_eq!(info.filename, "bundle.zip");
        assert_eq!(content.as_bytes(), b"zip-bytes");
    }

    #[test]
    fn test_file_decode_rejects_bad_base64() {
        let value = StoredValue::File(vec![StoredFile {
            info: FileInformation {
                filename: "broken.bin".into(),
                content_type: "application/octet-stream".into(),
            },
            content: "***".into(),
        }]);

        let err = value_to_file(&Setting::DISPLAY_CUSTOM_RESOURCE_BUNDLE, &value).unwrap_err();
        assert_eq!(err.error_code(), Some(crate::ErrorCode::InvalidConfig));
    }

    #[test]
    fn test_invalid_certificate_pem() {
        let value = StoredValue::X509Cert(vec![
            "-----BEGIN CERTIFICATE-----\nbm90IGEgY2VydA==\n-----END CERTIFICATE-----\n".into(),
        ]);
        let err = value_to_x509_certificates(&Setting::AUDIT_SYSLOG_CERTIFICATES, &value)
            .unwrap_err();
        assert_eq!(err.error_code(), Some(crate::ErrorCode::InvalidConfig));
    }

    #[test]
    fn test_empty_private_key() {
        let value = StoredValue::PrivateKey(None);
        assert!(
            value_to_private_key(&Setting::HTTPS_SERVER_CERT, &value)
                .unwrap()
                .is_none()
        );
    }
}
