//! Password policy for one profile and locale

use std::fmt;

use crate::locale::Locale;
use crate::profile::{construction_error, profile_id};
use crate::reader::SettingReader;
use crate::setting::Setting;
use crate::value::UserPermission;
use crate::Result;

/// Rule a candidate password broke
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyViolation {
    TooShort { minimum: usize },
    TooLong { maximum: usize },
    NotEnoughUppercase { minimum: usize },
    NotEnoughLowercase { minimum: usize },
    NotEnoughNumeric { minimum: usize },
    NotEnoughSpecial { minimum: usize },
    Disallowed,
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { minimum } => write!(f, "password must be at least {minimum} characters"),
            Self::TooLong { maximum } => write!(f, "password must be at most {maximum} characters"),
            Self::NotEnoughUppercase { minimum } => {
                write!(f, "password needs {minimum} uppercase characters")
            }
            Self::NotEnoughLowercase { minimum } => {
                write!(f, "password needs {minimum} lowercase characters")
            }
            Self::NotEnoughNumeric { minimum } => write!(f, "password needs {minimum} digits"),
            Self::NotEnoughSpecial { minimum } => {
                write!(f, "password needs {minimum} special characters")
            }
            Self::Disallowed => f.write_str("password is not allowed"),
        }
    }
}

/// Password rules of a profile, with its change message in one locale
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub profile_id: String,
    pub locale: Locale,
    pub query_match: Vec<UserPermission>,
    pub minimum_length: usize,
    pub maximum_length: usize,
    pub minimum_uppercase: usize,
    pub minimum_lowercase: usize,
    pub minimum_numeric: usize,
    pub minimum_special: usize,
    pub disallowed_values: Vec<String>,
    pub change_message: String,
}

fn read_count(reader: &SettingReader, setting: &Setting) -> Result<usize> {
    let value = reader.read_setting_as_long(setting)?;
    usize::try_from(value).map_err(|_| {
        construction_error(
            reader,
            format!("setting '{}' must not be negative, found {value}", setting.key()),
        )
    })
}

impl PasswordPolicy {
    /// Build from a profile-scoped reader
    pub fn from_reader(reader: &SettingReader, locale: &Locale) -> Result<Self> {
        let minimum_length = read_count(reader, &Setting::PASSWORD_POLICY_MINIMUM_LENGTH)?;
        let maximum_length = read_count(reader, &Setting::PASSWORD_POLICY_MAXIMUM_LENGTH)?;
        if maximum_length > 0 && minimum_length > maximum_length {
            return Err(construction_error(
                reader,
                format!(
                    "minimum password length {minimum_length} exceeds maximum {maximum_length}"
                ),
            ));
        }

        Ok(Self {
            profile_id: profile_id(reader).to_string(),
            locale: locale.clone(),
            query_match: reader
                .read_setting_as_user_permissions(&Setting::PASSWORD_POLICY_QUERY_MATCH)?,
            minimum_length,
            maximum_length,
            minimum_uppercase: read_count(reader, &Setting::PASSWORD_POLICY_MINIMUM_UPPERCASE)?,
            minimum_lowercase: read_count(reader, &Setting::PASSWORD_POLICY_MINIMUM_LOWERCASE)?,
            minimum_numeric: read_count(reader, &Setting::PASSWORD_POLICY_MINIMUM_NUMERIC)?,
            minimum_special: read_count(reader, &Setting::PASSWORD_POLICY_MINIMUM_SPECIAL)?,
            disallowed_values: reader
                .read_setting_as_string_array(&Setting::PASSWORD_POLICY_DISALLOWED_VALUES)?,
            change_message: reader
                .read_setting_as_localized_string(&Setting::PASSWORD_POLICY_CHANGE_MESSAGE, locale)?,
        })
    }

    /// Every rule `password` breaks; empty when it is acceptable
    pub fn check(&self, password: &str) -> Vec<PolicyViolation> {
        let mut violations = Vec::new();
        let length = password.chars().count();
        let count = |pred: fn(&char) -> bool| password.chars().filter(pred).count();

        if length < self.minimum_length {
            violations.push(PolicyViolation::TooShort {
                minimum: self.minimum_length,
            });
        }
        if self.maximum_length > 0 && length > self.maximum_length {
            violations.push(PolicyViolation::TooLong {
                maximum: self.maximum_length,
            });
        }
        if count(|c| c.is_uppercase()) < self.minimum_uppercase {
            violations.push(PolicyViolation::NotEnoughUppercase {
                minimum: self.minimum_uppercase,
            });
        }
        if count(|c| c.is_lowercase()) < self.minimum_lowercase {
            violations.push(PolicyViolation::NotEnoughLowercase {
                minimum: self.minimum_lowercase,
            });
        }
        if count(|c| c.is_numeric()) < self.minimum_numeric {
            violations.push(PolicyViolation::NotEnoughNumeric {
                minimum: self.minimum_numeric,
            });
        }
        if count(|c| !c.is_alphanumeric()) < self.minimum_special {
            violations.push(PolicyViolation::NotEnoughSpecial {
                minimum: self.minimum_special,
            });
        }
        if self
            .disallowed_values
            .iter()
            .any(|value| value.eq_ignore_ascii_case(password))
        {
            violations.push(PolicyViolation::Disallowed);
        }

        violations
    }
}
