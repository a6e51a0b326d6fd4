//! Outbound mail server profile

use crate::profile::{construction_error, profile_id, required_string};
use crate::reader::SettingReader;
use crate::setting::Setting;
use crate::value::PasswordData;
use crate::Result;

#[derive(Debug, Clone)]
pub struct EmailServerProfile {
    pub identifier: String,
    pub address: String,
    pub port: u16,
    pub username: String,
    pub password: Option<PasswordData>,
    pub default_from_address: String,
}

impl EmailServerProfile {
    pub fn from_reader(reader: &SettingReader) -> Result<Self> {
        let port = reader.read_setting_as_long(&Setting::EMAIL_SERVER_PORT)?;
        let port = u16::try_from(port)
            .ok()
            .filter(|port| *port > 0)
            .ok_or_else(|| construction_error(reader, format!("invalid mail server port {port}")))?;

        Ok(Self {
            identifier: profile_id(reader).to_string(),
            address: required_string(reader, &Setting::EMAIL_SERVER_ADDRESS)?,
            port,
            username: reader.read_setting_as_string(&Setting::EMAIL_USERNAME)?,
            password: reader.read_setting_as_password(&Setting::EMAIL_PASSWORD)?,
            default_from_address: reader.read_setting_as_string(&Setting::EMAIL_DEFAULT_FROM_ADDRESS)?,
        })
    }

    /// True when the server expects credentials
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && self.password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::DomainId;
    use crate::store::MemoryStore;
    use crate::value::StoredValue;
    use crate::ErrorCode;
    use std::sync::Arc;

    #[test]
    fn test_address_is_required() {
        let store = MemoryStore::builder()
            .profile(crate::SettingCategory::EmailServer, "smtp")
            .build()
            .unwrap();
        let reader = SettingReader::new(Arc::new(store), Some("smtp".into()), DomainId::default());
        let err = EmailServerProfile::from_reader(&reader).unwrap_err();
        assert_eq!(err.error_code(), Some(ErrorCode::ProfileConstruction));
    }

    #[test]
    fn test_invalid_port() {
        let store = MemoryStore::builder()
            .profile_setting(
                Setting::EMAIL_SERVER_ADDRESS,
                "smtp",
                StoredValue::String("mail.example.org".into()),
            )
            .profile_setting(Setting::EMAIL_SERVER_PORT, "smtp", StoredValue::Numeric(70000))
            .build()
            .unwrap();
        let reader = SettingReader::new(Arc::new(store), Some("smtp".into()), DomainId::default());
        assert!(EmailServerProfile::from_reader(&reader).is_err());
    }
}
