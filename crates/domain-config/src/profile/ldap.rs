//! Directory connection profile

use crate::locale::Locale;
use crate::profile::{construction_error, profile_id};
use crate::reader::SettingReader;
use crate::setting::Setting;
use crate::value::{PasswordData, X509Certificate};
use crate::Result;

/// Connection settings for one directory
#[derive(Debug, Clone)]
pub struct LdapProfile {
    pub identifier: String,
    pub enabled: bool,
    pub display_name: String,
    pub server_urls: Vec<String>,
    pub proxy_user_dn: String,
    pub proxy_password: Option<PasswordData>,
    pub server_certificates: Vec<X509Certificate>,
    pub login_contexts: Vec<String>,
    pub username_search_filter: String,
    pub guid_attribute: String,
}

impl LdapProfile {
    /// Build from a profile-scoped reader
    ///
    /// A disabled profile may be incomplete; an enabled one needs at least
    /// one server URL.
    pub fn from_reader(reader: &SettingReader) -> Result<Self> {
        let identifier = profile_id(reader).to_string();
        let enabled = reader.read_setting_as_boolean(&Setting::LDAP_PROFILE_ENABLED)?;
        let server_urls = reader.read_setting_as_string_array(&Setting::LDAP_SERVER_URLS)?;

        if enabled && server_urls.is_empty() {
            return Err(construction_error(reader, "enabled directory profile has no server URLs"));
        }

        let display_name = reader
            .read_setting_as_localized_string(&Setting::LDAP_PROFILE_DISPLAY_NAME, &Locale::root())?;

        Ok(Self {
            display_name: if display_name.is_empty() {
                identifier.clone()
            } else {
                display_name
            },
            identifier,
            enabled,
            server_urls,
            proxy_user_dn: reader.read_setting_as_string(&Setting::LDAP_PROXY_USER_DN)?,
            proxy_password: reader.read_setting_as_password(&Setting::LDAP_PROXY_USER_PASSWORD)?,
            server_certificates: reader.read_setting_as_certificates(&Setting::LDAP_SERVER_CERTS)?,
            login_contexts: reader.read_setting_as_string_array(&Setting::LDAP_LOGIN_CONTEXTS)?,
            username_search_filter: reader
                .read_setting_as_string(&Setting::LDAP_USERNAME_SEARCH_FILTER)?,
            guid_attribute: reader.read_setting_as_string(&Setting::LDAP_GUID_ATTRIBUTE)?,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
