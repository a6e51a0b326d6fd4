//! Domain configuration facade
//!
//! [`DomainConfig`] is the typed entry point over one frozen settings store.
//! Simple reads go straight through a [`SettingReader`]; profile maps,
//! password policies, localized bundle text and the security key are
//! computed once and cached for the lifetime of the facade.

use indexmap::{IndexMap, IndexSet};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheStats, DerivedValueCache, LocalizedText};
use crate::locale::{Locale, LocaleBundle};
use crate::options::{
    CertificateMatchingMode, DataStorageMethod, LogLevel, MessageSendMethod, TokenStorageMethod,
};
use crate::profile::registry;
use crate::profile::{
    ActivateUserProfile, ChallengeProfile, ChangePasswordProfile, EmailServerProfile,
    ForgottenPasswordProfile, HelpdeskProfile, LdapProfile, NewUserProfile, PasswordPolicy,
    PeopleSearchProfile, Profile, ProfileDefinition, ProfileMap, SetupOtpProfile, TypedProfile,
    UpdateAttributesProfile,
};
use crate::properties::AppProperties;
use crate::reader::SettingReader;
use crate::security_key::SecurityKey;
use crate::setting::{Setting, SettingCategory};
use crate::store::{RecordType, StoredConfigItemKey, StoredConfiguration, TemplateSet};
use crate::value::{
    ActionConfiguration, EmailItem, FileContent, FileInformation, FormConfiguration,
    NamedSecretData, PasswordData, PrivateKeyCertificate, RemoteWebServiceConfiguration,
    UserPermission, X509Certificate,
};
use crate::{ConfigError, ErrorCode, Result};

/// Identifier of the tenant a facade serves
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainId(String);

impl DomainId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DomainId {
    fn default() -> Self {
        Self("default".to_string())
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Domain configuration builder
pub struct DomainConfigBuilder {
    store: Option<Arc<dyn StoredConfiguration>>,
    domain: DomainId,
    properties: AppProperties,
}

impl DomainConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            store: None,
            domain: DomainId::default(),
            properties: AppProperties::default(),
        }
    }

    /// Set the settings store
    pub fn with_store(mut self, store: Arc<dyn StoredConfiguration>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the domain this facade serves
    pub fn with_domain(mut self, domain: DomainId) -> Self {
        self.domain = domain;
        self
    }

    /// Set the application properties
    pub fn with_properties(mut self, properties: AppProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Build the facade
    pub fn build(self) -> Result<DomainConfig> {
        let store = self
            .store
            .ok_or_else(|| ConfigError::invalid_config("no settings store configured"))?;
        self.properties.validate()?;

        info!(domain = %self.domain, "Domain configuration created");

        Ok(DomainConfig {
            reader: SettingReader::new(Arc::clone(&store), None, self.domain.clone()),
            store,
            domain: self.domain,
            properties: self.properties,
            cache: DerivedValueCache::new(),
        })
    }
}

impl Default for DomainConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed, cached configuration of one domain
pub struct DomainConfig {
    store: Arc<dyn StoredConfiguration>,
    domain: DomainId,
    properties: AppProperties,
    /// Unscoped reader for non-profiled settings
    reader: SettingReader,
    cache: DerivedValueCache,
}

impl DomainConfig {
    /// Create a new builder
    pub fn builder() -> DomainConfigBuilder {
        DomainConfigBuilder::new()
    }

    /// Facade with default properties
    pub fn new(store: Arc<dyn StoredConfiguration>, domain: DomainId) -> Self {
        DomainConfig {
            reader: SettingReader::new(Arc::clone(&store), None, domain.clone()),
            store,
            domain,
            properties: AppProperties::default(),
            cache: DerivedValueCache::new(),
        }
    }

    pub fn domain_id(&self) -> &DomainId {
        &self.domain
    }

    pub fn properties(&self) -> &AppProperties {
        &self.properties
    }

    pub fn stored_configuration(&self) -> &Arc<dyn StoredConfiguration> {
        &self.store
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Reader scoped to one profile
    pub fn profile_reader(&self, profile_id: &str) -> SettingReader {
        SettingReader::new(
            Arc::clone(&self.store),
            Some(profile_id.to_string()),
            self.domain.clone(),
        )
    }

    // =========================================================================
    // Typed setting reads
    // =========================================================================

    pub fn read_setting_as_string(&self, setting: &Setting) -> Result<String> {
        self.reader.read_setting_as_string(setting)
    }

    pub fn read_setting_as_boolean(&self, setting: &Setting) -> Result<bool> {
        self.reader.read_setting_as_boolean(setting)
    }

    pub fn read_setting_as_long(&self, setting: &Setting) -> Result<i64> {
        self.reader.read_setting_as_long(setting)
    }

    pub fn read_setting_as_string_array(&self, setting: &Setting) -> Result<Vec<String>> {
        self.reader.read_setting_as_string_array(setting)
    }

    pub fn read_setting_as_localized_string(
        &self,
        setting: &Setting,
        locale: &Locale,
    ) -> Result<String> {
        self.reader.read_setting_as_localized_string(setting, locale)
    }

    pub fn read_setting_as_localized_string_array(
        &self,
        setting: &Setting,
        locale: &Locale,
    ) -> Result<Vec<String>> {
        self.reader
            .read_setting_as_localized_string_array(setting, locale)
    }

    pub fn read_setting_as_enum<E: DeserializeOwned>(&self, setting: &Setting) -> Result<Option<E>> {
        self.reader.read_setting_as_enum(setting)
    }

    pub fn read_setting_as_option_list<E>(&self, setting: &Setting) -> Result<IndexSet<E>>
    where
        E: DeserializeOwned + Hash + Eq,
    {
        self.reader.read_setting_as_option_list(setting)
    }

    pub fn read_setting_as_form(&self, setting: &Setting) -> Result<Vec<FormConfiguration>> {
        self.reader.read_setting_as_form(setting)
    }

    pub fn read_setting_as_user_permissions(&self, setting: &Setting) -> Result<Vec<UserPermission>> {
        self.reader.read_setting_as_user_permissions(setting)
    }

    pub fn read_setting_as_actions(&self, setting: &Setting) -> Result<Vec<ActionConfiguration>> {
        self.reader.read_setting_as_actions(setting)
    }

    pub fn read_setting_as_remote_web_services(
        &self,
        setting: &Setting,
    ) -> Result<Vec<RemoteWebServiceConfiguration>> {
        self.reader.read_setting_as_remote_web_services(setting)
    }

    pub fn read_setting_as_password(&self, setting: &Setting) -> Result<Option<PasswordData>> {
        self.reader.read_setting_as_password(setting)
    }

    pub fn read_setting_as_named_secrets(
        &self,
        setting: &Setting,
    ) -> Result<IndexMap<String, NamedSecretData>> {
        self.reader.read_setting_as_named_secrets(setting)
    }

    pub fn read_setting_as_file(
        &self,
        setting: &Setting,
    ) -> Result<IndexMap<FileInformation, FileContent>> {
        self.reader.read_setting_as_file(setting)
    }

    pub fn read_setting_as_certificates(&self, setting: &Setting) -> Result<Vec<X509Certificate>> {
        self.reader.read_setting_as_certificates(setting)
    }

    pub fn read_setting_as_private_key(
        &self,
        setting: &Setting,
    ) -> Result<Option<PrivateKeyCertificate>> {
        self.reader.read_setting_as_private_key(setting)
    }

    pub fn read_setting_as_email(
        &self,
        setting: &Setting,
        locale: &Locale,
    ) -> Result<Option<EmailItem>> {
        self.reader.read_setting_as_email(setting, locale)
    }

    pub fn is_default_value(&self, setting: &Setting) -> Result<bool> {
        self.reader.is_default_value(setting)
    }

    /// Fail when a setting uses a send method that no longer works
    pub fn check_deprecated_send_method(
        setting: &Setting,
        profile_id: Option<&str>,
        value: Option<MessageSendMethod>,
    ) -> Result<()> {
        match value {
            Some(method) => method.ensure_supported(setting, profile_id),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Profiles
    // =========================================================================

    /// Every profile of a definition, built once
    fn cached_profile_map(
        &self,
        definition: ProfileDefinition,
    ) -> Result<Arc<IndexMap<String, Profile>>> {
        self.cache.profile_maps.get_or_try_init(definition, || {
            let mut profiles = IndexMap::new();
            if definition.factory().is_none() {
                return Ok(Arc::new(profiles));
            }

            for profile_id in self.store.profile_ids(definition.category()) {
                let reader = self.profile_reader(&profile_id);
                let profile = registry::build_profile(definition, &reader).inspect_err(|e| {
                    error!(
                        domain = %self.domain,
                        profile = %profile_id,
                        definition = %definition,
                        "Failed to build profile: {e}"
                    );
                })?;
                profiles.insert(profile_id, profile);
            }

            debug!(
                domain = %self.domain,
                definition = %definition,
                count = profiles.len(),
                "Profile map built"
            );
            Ok(Arc::new(profiles))
        })
    }

    /// Every profile of a definition, keyed by profile id in configured order
    ///
    /// Empty for definitions that have no map factory.
    pub fn profile_map(&self, definition: ProfileDefinition) -> Result<IndexMap<String, Profile>> {
        Ok(self.cached_profile_map(definition)?.as_ref().clone())
    }

    fn typed_profile_map<T: TypedProfile>(
        &self,
        definition: ProfileDefinition,
    ) -> Result<ProfileMap<T>> {
        let profiles = self.cached_profile_map(definition)?;
        Ok(profiles
            .iter()
            .filter_map(|(id, profile)| {
                T::from_profile(profile).map(|typed| (id.clone(), Arc::clone(typed)))
            })
            .collect())
    }

    /// Every directory profile, enabled or not
    pub fn all_ldap_profiles(&self) -> Result<ProfileMap<LdapProfile>> {
        self.typed_profile_map(ProfileDefinition::Ldap)
    }

    /// Enabled directory profiles, in configured order
    pub fn ldap_profiles(&self) -> Result<ProfileMap<LdapProfile>> {
        let enabled = self.cache.enabled_ldap_profiles.get_or_try_init(|| {
            let enabled: ProfileMap<LdapProfile> = self
                .all_ldap_profiles()?
                .into_iter()
                .filter(|(_, profile)| profile.is_enabled())
                .collect();
            if enabled.is_empty() {
                warn!(domain = %self.domain, "No enabled directory profiles configured");
            }
            Ok(Arc::new(enabled))
        })?;
        Ok(enabled.as_ref().clone())
    }

    /// First enabled directory profile
    pub fn default_ldap_profile(&self) -> Result<Arc<LdapProfile>> {
        self.ldap_profiles()?
            .into_values()
            .next()
            .ok_or_else(|| {
                ConfigError::unrecoverable(
                    ErrorCode::NoLdapProfile,
                    "no enabled directory profile is configured",
                )
            })
    }

    pub fn change_password_profiles(&self) -> Result<ProfileMap<ChangePasswordProfile>> {
        self.typed_profile_map(ProfileDefinition::ChangePassword)
    }

    pub fn forgotten_password_profiles(&self) -> Result<ProfileMap<ForgottenPasswordProfile>> {
        self.typed_profile_map(ProfileDefinition::ForgottenPassword)
    }

    pub fn activate_user_profiles(&self) -> Result<ProfileMap<ActivateUserProfile>> {
        self.typed_profile_map(ProfileDefinition::ActivateUser)
    }

    pub fn new_user_profiles(&self) -> Result<ProfileMap<NewUserProfile>> {
        self.typed_profile_map(ProfileDefinition::NewUser)
    }

    pub fn helpdesk_profiles(&self) -> Result<ProfileMap<HelpdeskProfile>> {
        self.typed_profile_map(ProfileDefinition::Helpdesk)
    }

    pub fn setup_otp_profiles(&self) -> Result<ProfileMap<SetupOtpProfile>> {
        self.typed_profile_map(ProfileDefinition::SetupOtp)
    }

    pub fn update_attributes_profiles(&self) -> Result<ProfileMap<UpdateAttributesProfile>> {
        self.typed_profile_map(ProfileDefinition::UpdateAttributes)
    }

    pub fn people_search_profiles(&self) -> Result<ProfileMap<PeopleSearchProfile>> {
        self.typed_profile_map(ProfileDefinition::PeopleSearch)
    }

    pub fn email_server_profiles(&self) -> Result<ProfileMap<EmailServerProfile>> {
        self.typed_profile_map(ProfileDefinition::EmailServer)
    }

    /// The people search profile for unauthenticated users, when enabled
    pub fn public_people_search_profile(&self) -> Result<Option<Arc<PeopleSearchProfile>>> {
        if !self.read_setting_as_boolean(&Setting::PEOPLE_SEARCH_ENABLE_PUBLIC)? {
            return Ok(None);
        }
        let profile_id = self.read_setting_as_string(&Setting::PEOPLE_SEARCH_PUBLIC_PROFILE)?;
        let mut profiles =
            self.typed_profile_map::<PeopleSearchProfile>(ProfileDefinition::PeopleSearchPublic)?;
        Ok(profiles.swap_remove(&profile_id))
    }

    pub fn password_profile_ids(&self) -> Vec<String> {
        self.store.profile_ids(SettingCategory::PasswordPolicy)
    }

    pub fn challenge_profile_ids(&self) -> Vec<String> {
        self.store.profile_ids(SettingCategory::ChallengePolicy)
    }

    /// Resolve a requested profile id against the configured ones
    ///
    /// The empty id selects the first configured profile, or `default` when
    /// the category has none.
    fn resolve_profile_id(&self, category: SettingCategory, profile_id: &str) -> Result<String> {
        let configured = self.store.profile_ids(category);
        if profile_id.is_empty() {
            return Ok(configured
                .into_iter()
                .next()
                .unwrap_or_else(|| "default".to_string()));
        }
        if configured.iter().any(|id| id == profile_id) {
            Ok(profile_id.to_string())
        } else {
            Err(ConfigError::UnknownProfile {
                category,
                profile_id: profile_id.to_string(),
            })
        }
    }

    /// Password policy of a profile in a locale, built once per pair
    pub fn password_policy(&self, profile_id: &str, locale: &Locale) -> Result<Arc<PasswordPolicy>> {
        let profile_id = self.resolve_profile_id(SettingCategory::PasswordPolicy, profile_id)?;
        let key = (profile_id.clone(), locale.clone());
        self.cache.password_policies.get_or_try_init(key, || {
            let reader = self.profile_reader(&profile_id);
            let policy = PasswordPolicy::from_reader(&reader, locale)?;
            debug!(
                domain = %self.domain,
                profile = %profile_id,
                locale = %locale,
                "Password policy built"
            );
            Ok(Arc::new(policy))
        })
    }

    /// Challenge profile of a profile in a locale
    ///
    /// Built fresh on every call; callers may modify it.
    pub fn challenge_profile(&self, profile_id: &str, locale: &Locale) -> Result<ChallengeProfile> {
        let profile_id = self.resolve_profile_id(SettingCategory::ChallengePolicy, profile_id)?;
        ChallengeProfile::from_reader(&self.profile_reader(&profile_id), locale)
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Instance security key
    ///
    /// Without a configured key an ephemeral one is generated once and kept
    /// for the lifetime of the facade. A configured key shorter than
    /// `security_min_key_length` is rejected.
    pub fn security_key(&self) -> Result<Arc<SecurityKey>> {
        self.cache
            .security_key
            .get_or_try_init(|| self.derive_security_key())
            .map(Arc::clone)
    }

    fn derive_security_key(&self) -> Result<Arc<SecurityKey>> {
        let configured = self
            .read_setting_as_password(&Setting::SECURITY_KEY)?
            .filter(|value| !value.is_empty());

        let Some(configured) = configured else {
            warn!(
                domain = %self.domain,
                code = %ErrorCode::InvalidSecurityKey,
                "Security key value is not configured, will generate temp value for use by runtime instance"
            );
            let length = self.properties.ephemeral_key_length();
            let value = self
                .cache
                .ephemeral_key_value
                .get_or_init(|| SecurityKey::generate_value(length));
            return SecurityKey::ephemeral(value).map(Arc::new);
        };

        let minimum = self.properties.security_min_key_length;
        if configured.char_len() < minimum {
            return Err(ConfigError::unrecoverable(
                ErrorCode::InvalidSecurityKey,
                format!("security key must be at least {minimum} characters in length"),
            ));
        }

        SecurityKey::new(configured.expose())
            .map(Arc::new)
            .inspect_err(|e| {
                error!(domain = %self.domain, "Unexpected error generating security key crypto: {e}");
            })
    }

    /// Stored overrides of a bundle key by locale, `None` when not overridden
    pub fn read_localized_bundle(
        &self,
        bundle: LocaleBundle,
        key: &str,
    ) -> Option<Arc<LocalizedText>> {
        let cache_key = format!("{bundle}-{key}");
        let cached = self.cache.localized_text.get_or_try_init(cache_key, || {
            let text = self.store.read_locale_bundle_map(bundle, key).and_then(|stored| {
                let localized: LocalizedText = stored
                    .into_iter()
                    .map(|(tag, text)| (Locale::parse(&tag), text))
                    .collect();
                (!localized.is_empty()).then(|| Arc::new(localized))
            });
            Ok(text)
        });
        cached.ok().flatten()
    }

    /// SHA-256 hex digest over every modified item, computed once
    pub fn configuration_hash(&self) -> Result<String> {
        self.cache
            .configuration_hash
            .get_or_try_init(|| {
                let mut hasher = Sha256::new();
                for item in self.store.modified_items() {
                    hasher.update(item.to_string().as_bytes());
                    hasher.update(self.item_fingerprint_bytes(&item)?);
                }
                Ok(hex::encode(hasher.finalize()))
            })
            .cloned()
    }

    fn item_fingerprint_bytes(&self, item: &StoredConfigItemKey) -> Result<Vec<u8>> {
        let serialized = match item.record_type {
            RecordType::Setting => match item.to_setting() {
                Some(setting) => serde_json::to_vec(
                    &self.store.read_setting(&setting, item.profile_id.as_deref()),
                ),
                None => return Ok(Vec::new()),
            },
            RecordType::LocaleBundle => {
                let Some((bundle, key)) = item.record_id.split_once('-') else {
                    return Ok(Vec::new());
                };
                match LocaleBundle::parse(bundle) {
                    Some(bundle) => {
                        serde_json::to_vec(&self.store.read_locale_bundle_map(bundle, key))
                    }
                    None => return Ok(Vec::new()),
                }
            }
            RecordType::Property => return Ok(Vec::new()),
        };
        serialized.map_err(|e| ConfigError::parse(format!("unable to serialize {item}: {e}")))
    }

    // =========================================================================
    // Derived queries
    // =========================================================================

    fn storage_locations(&self, setting: &Setting) -> Result<Vec<DataStorageMethod>> {
        let input = self.read_setting_as_string(setting)?;
        let mut methods = Vec::new();
        for token in input.split('-').filter(|token| !token.is_empty()) {
            match DataStorageMethod::from_tag(token) {
                Some(method) => methods.push(method),
                None => error!(
                    domain = %self.domain,
                    setting = setting.key(),
                    "unknown STORAGE_METHOD found: {token}"
                ),
            }
        }
        Ok(methods)
    }

    /// Ordered storage methods for challenge responses, from a dash-delimited setting
    pub fn response_storage_locations(&self, setting: &Setting) -> Result<Vec<DataStorageMethod>> {
        self.storage_locations(setting)
    }

    /// Ordered storage methods for OTP secrets, from a dash-delimited setting
    pub fn otp_secret_storage_locations(&self, setting: &Setting) -> Result<Vec<DataStorageMethod>> {
        self.storage_locations(setting)
    }

    /// Configured token storage method, `None` when the literal is unknown
    pub fn token_storage_method(&self) -> Result<Option<TokenStorageMethod>> {
        let literal = self.read_setting_as_string(&Setting::TOKEN_STORAGE_METHOD)?;
        let method = TokenStorageMethod::from_tag(&literal);
        if method.is_none() {
            warn!(
                domain = %self.domain,
                code = %ErrorCode::InvalidConfig,
                "unknown storage method specified: {literal}"
            );
        }
        Ok(method)
    }

    /// True when every database connection setting is present
    pub fn has_db_configured(&self) -> Result<bool> {
        Ok(!self.read_setting_as_string(&Setting::DATABASE_CLASS)?.is_empty()
            && !self.read_setting_as_string(&Setting::DATABASE_URL)?.is_empty()
            && !self.read_setting_as_string(&Setting::DATABASE_USERNAME)?.is_empty()
            && self.read_setting_as_password(&Setting::DATABASE_PASSWORD)?.is_some())
    }

    /// Non-profiled settings whose stored value differs from the default
    pub fn non_default_settings(&self) -> IndexSet<Setting> {
        self.store
            .modified_items()
            .into_iter()
            .filter(|item| item.record_type == RecordType::Setting && item.profile_id.is_none())
            .filter_map(|item| item.to_setting())
            .collect()
    }

    pub fn template(&self) -> TemplateSet {
        self.store.template_set()
    }

    /// Locales the application offers, the root locale when none are configured
    pub fn known_locales(&self) -> Result<Vec<Locale>> {
        let locales: IndexSet<Locale> = self
            .read_setting_as_string_array(&Setting::KNOWN_LOCALES)?
            .iter()
            .map(|tag| Locale::parse(tag))
            .collect();
        if locales.is_empty() {
            return Ok(vec![Locale::root()]);
        }
        Ok(locales.into_iter().collect())
    }

    /// Flag code per known locale: the country when present, else the language
    pub fn known_locale_flag_map(&self) -> Result<IndexMap<Locale, String>> {
        Ok(self
            .known_locales()?
            .into_iter()
            .map(|locale| {
                let flag = locale
                    .country()
                    .unwrap_or_else(|| locale.language())
                    .to_lowercase();
                (locale, flag)
            })
            .collect())
    }

    pub fn event_log_local_db_level(&self) -> Result<Option<LogLevel>> {
        self.read_setting_as_enum(&Setting::EVENTS_LOCALDB_LOG_LEVEL)
    }

    /// Certificate validation mode, `CaOnly` when the stored literal is unknown
    pub fn certificate_matching_mode(&self) -> Result<CertificateMatchingMode> {
        Ok(self
            .read_setting_as_enum(&Setting::CERTIFICATE_VALIDATION_MODE)?
            .unwrap_or_default())
    }

    pub fn is_dev_debug_mode(&self) -> bool {
        self.properties.dev_debug_mode
    }

    pub fn non_default_app_properties(&self) -> IndexMap<String, String> {
        self.properties.non_default()
    }
}

impl fmt::Debug for DomainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainConfig")
            .field("domain", &self.domain)
            .field("properties", &self.properties)
            .field("cache", &self.cache.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::value::StoredValue;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_facade_is_send_sync() {
        assert_send_sync::<DomainConfig>();
    }

    #[test]
    fn test_builder_requires_store() {
        assert!(DomainConfig::builder().build().is_err());
    }

    #[test]
    fn test_builder_rejects_invalid_properties() {
        let result = DomainConfig::builder()
            .with_store(Arc::new(MemoryStore::default()))
            .with_properties(AppProperties {
                security_min_key_length: 0,
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_profiled_setting_through_facade_fails() {
        let config = DomainConfig::new(Arc::new(MemoryStore::default()), DomainId::default());
        let err = config
            .read_setting_as_boolean(&Setting::LDAP_PROFILE_ENABLED)
            .unwrap_err();
        assert!(err.is_programmer_error());
    }

    #[test]
    fn test_unknown_password_profile() {
        let store = MemoryStore::builder()
            .profile(SettingCategory::PasswordPolicy, "default")
            .build()
            .unwrap();
        let config = DomainConfig::new(Arc::new(store), DomainId::default());

        let err = config
            .password_policy("missing", &Locale::root())
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { .. }));
        assert!(config.password_policy("", &Locale::root()).is_ok());
    }

    #[test]
    fn test_certificate_matching_mode_fallback() {
        let store = MemoryStore::builder()
            .setting(
                Setting::CERTIFICATE_VALIDATION_MODE,
                StoredValue::Select("PINNED".into()),
            )
            .build()
            .unwrap();
        let config = DomainConfig::new(Arc::new(store), DomainId::default());
        assert_eq!(
            config.certificate_matching_mode().unwrap(),
            CertificateMatchingMode::CaOnly
        );
    }

    #[test]
    fn test_known_locales() {
        let store = MemoryStore::builder()
            .setting(
                Setting::KNOWN_LOCALES,
                StoredValue::StringArray(vec!["en".into(), "de-AT".into(), "en".into()]),
            )
            .build()
            .unwrap();
        let config = DomainConfig::new(Arc::new(store), DomainId::default());

        let locales = config.known_locales().unwrap();
        assert_eq!(locales, vec![Locale::parse("en"), Locale::parse("de_AT")]);

        let flags = config.known_locale_flag_map().unwrap();
        assert_eq!(flags[&Locale::parse("de_AT")], "at");
        assert_eq!(flags[&Locale::parse("en")], "en");
    }

    #[test]
    fn test_known_locales_fallback_to_root() {
        let store = MemoryStore::builder()
            .setting(Setting::KNOWN_LOCALES, StoredValue::StringArray(vec![]))
            .build()
            .unwrap();
        let config = DomainConfig::new(Arc::new(store), DomainId::default());
        assert_eq!(config.known_locales().unwrap(), vec![Locale::root()]);
    }
}
