//! Typed reads of individual settings
//!
//! A [`SettingReader`] is bound to an optional profile id. Settings of a
//! profiled category can only be read through a reader that has one; other
//! settings are always read unscoped.

use indexmap::{IndexMap, IndexSet};
use serde::de::DeserializeOwned;
use std::hash::Hash;
use std::sync::Arc;

use crate::facade::DomainId;
use crate::locale::{self, Locale};
use crate::setting::Setting;
use crate::store::StoredConfiguration;
use crate::value::decode;
use crate::value::{
    ActionConfiguration, EmailItem, FileContent, FileInformation, FormConfiguration,
    NamedSecretData, PasswordData, PrivateKeyCertificate, RemoteWebServiceConfiguration,
    StoredValue, UserPermission, X509Certificate,
};
use crate::{ConfigError, Result};

/// Typed read access to stored settings, optionally scoped to a profile
#[derive(Clone)]
pub struct SettingReader {
    store: Arc<dyn StoredConfiguration>,
    profile_id: Option<String>,
    domain: DomainId,
}

impl SettingReader {
    pub fn new(
        store: Arc<dyn StoredConfiguration>,
        profile_id: Option<String>,
        domain: DomainId,
    ) -> Self {
        Self {
            store,
            profile_id,
            domain,
        }
    }

    pub fn profile_id(&self) -> Option<&str> {
        self.profile_id.as_deref()
    }

    pub fn domain(&self) -> &DomainId {
        &self.domain
    }

    /// Profile scope for a read; profiled settings need a profile id
    fn scope(&self, setting: &Setting) -> Result<Option<&str>> {
        if !setting.category().has_profiles() {
            return Ok(None);
        }
        self.profile_id
            .as_deref()
            .map(Some)
            .ok_or(ConfigError::ProfiledSettingAccess { key: setting.key() })
    }

    /// Raw stored value, checked against profiled access rules
    pub fn read_raw(&self, setting: &Setting) -> Result<StoredValue> {
        let scope = self.scope(setting)?;
        Ok(self.store.read_setting(setting, scope))
    }

    pub fn is_default_value(&self, setting: &Setting) -> Result<bool> {
        let scope = self.scope(setting)?;
        Ok(self.store.is_default_value(setting, scope))
    }

    pub fn read_setting_as_string(&self, setting: &Setting) -> Result<String> {
        decode::value_to_string(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_boolean(&self, setting: &Setting) -> Result<bool> {
        decode::value_to_boolean(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_long(&self, setting: &Setting) -> Result<i64> {
        decode::value_to_long(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_string_array(&self, setting: &Setting) -> Result<Vec<String>> {
        decode::value_to_string_array(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_localized_string(
        &self,
        setting: &Setting,
        locale: &Locale,
    ) -> Result<String> {
        decode::value_to_localized_string(setting, &self.read_raw(setting)?, locale)
    }

    pub fn read_setting_as_localized_string_array(
        &self,
        setting: &Setting,
        locale: &Locale,
    ) -> Result<Vec<String>> {
        decode::value_to_localized_string_array(setting, &self.read_raw(setting)?, locale)
    }

    /// `None` when the stored literal is not a known variant
    pub fn read_setting_as_enum<E: DeserializeOwned>(&self, setting: &Setting) -> Result<Option<E>> {
        decode::value_to_enum(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_option_list<E>(&self, setting: &Setting) -> Result<IndexSet<E>>
    where
        E: DeserializeOwned + Hash + Eq,
    {
        decode::value_to_option_list(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_form(&self, setting: &Setting) -> Result<Vec<FormConfiguration>> {
        decode::value_to_form(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_user_permissions(&self, setting: &Setting) -> Result<Vec<UserPermission>> {
        decode::value_to_user_permissions(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_actions(&self, setting: &Setting) -> Result<Vec<ActionConfiguration>> {
        decode::value_to_actions(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_remote_web_services(
        &self,
        setting: &Setting,
    ) -> Result<Vec<RemoteWebServiceConfiguration>> {
        decode::value_to_remote_web_services(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_password(&self, setting: &Setting) -> Result<Option<PasswordData>> {
        decode::value_to_password(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_named_secrets(
        &self,
        setting: &Setting,
    ) -> Result<IndexMap<String, NamedSecretData>> {
        decode::value_to_named_secrets(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_file(
        &self,
        setting: &Setting,
    ) -> Result<IndexMap<FileInformation, FileContent>> {
        decode::value_to_file(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_certificates(&self, setting: &Setting) -> Result<Vec<X509Certificate>> {
        decode::value_to_x509_certificates(setting, &self.read_raw(setting)?)
    }

    pub fn read_setting_as_private_key(
        &self,
        setting: &Setting,
    ) -> Result<Option<PrivateKeyCertificate>> {
        decode::value_to_private_key(setting, &self.read_raw(setting)?)
    }

    /// Email item for the best matching locale, `None` when nothing matches
    pub fn read_setting_as_email(
        &self,
        setting: &Setting,
        locale: &Locale,
    ) -> Result<Option<EmailItem>> {
        let mut items = decode::value_to_localized_email(setting, &self.read_raw(setting)?)?;
        let Some(matched) = locale::resolve(locale, items.keys()).cloned() else {
            return Ok(None);
        };
        Ok(items.swap_remove(&matched))
    }
}

impl std::fmt::Debug for SettingReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingReader")
            .field("domain", &self.domain)
            .field("profile_id", &self.profile_id)
            .finish()
    }
}
