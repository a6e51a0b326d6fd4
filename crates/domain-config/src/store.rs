//! Read-only settings store interface
//!
//! The facade never writes to the store and assumes it does not change while
//! a facade instance is alive. [`MemoryStore`] is a frozen in-memory snapshot
//! usable when the configuration is assembled by the embedding application.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;

use crate::locale::LocaleBundle;
use crate::setting::{Setting, SettingCategory};
use crate::value::{StoredValue, decode};
use crate::{ConfigError, Result};

/// Kind of record a modified item refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// A setting value, optionally scoped to a profile
    Setting,
    /// A display text override
    LocaleBundle,
    /// A structural property of the configuration document itself
    Property,
}

/// Key of an item that differs from its default
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoredConfigItemKey {
    pub record_type: RecordType,
    /// Setting key, `"{bundle}-{key}"` or property name
    pub record_id: String,
    pub profile_id: Option<String>,
}

impl StoredConfigItemKey {
    pub fn for_setting(setting: &Setting, profile_id: Option<&str>) -> Self {
        Self {
            record_type: RecordType::Setting,
            record_id: setting.key().to_string(),
            profile_id: profile_id.map(String::from),
        }
    }

    pub fn for_locale_bundle(bundle: LocaleBundle, key: &str) -> Self {
        Self {
            record_type: RecordType::LocaleBundle,
            record_id: format!("{bundle}-{key}"),
            profile_id: None,
        }
    }

    pub fn for_property(name: &str) -> Self {
        Self {
            record_type: RecordType::Property,
            record_id: name.to_string(),
            profile_id: None,
        }
    }

    /// The setting this item refers to, for setting records
    pub fn to_setting(&self) -> Option<Setting> {
        match self.record_type {
            RecordType::Setting => Setting::by_key(&self.record_id),
            _ => None,
        }
    }
}

impl fmt::Display for StoredConfigItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.profile_id {
            Some(profile) => write!(f, "{:?}:{}[{}]", self.record_type, self.record_id, profile),
            None => write!(f, "{:?}:{}", self.record_type, self.record_id),
        }
    }
}

/// Deployment template names the configuration was created from
///
/// Opaque to this crate; passed through to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet(Vec<String>);

impl TemplateSet {
    pub fn new<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(templates.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, template: &str) -> bool {
        self.0.iter().any(|t| t == template)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Read-only view over stored configuration
pub trait StoredConfiguration: Send + Sync {
    /// Raw value of a setting, its default when nothing is stored
    fn read_setting(&self, setting: &Setting, profile_id: Option<&str>) -> StoredValue;

    /// Locale tag to text overrides for a bundle key, `None` when not overridden
    fn read_locale_bundle_map(
        &self,
        bundle: LocaleBundle,
        key: &str,
    ) -> Option<IndexMap<String, String>>;

    fn is_default_value(&self, setting: &Setting, profile_id: Option<&str>) -> bool;

    /// Snapshot of every item differing from its default
    fn modified_items(&self) -> Vec<StoredConfigItemKey>;

    fn template_set(&self) -> TemplateSet;

    /// Profile ids configured for a category, in configured order
    fn profile_ids(&self, category: SettingCategory) -> Vec<String>;
}

/// Frozen in-memory configuration snapshot
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: IndexMap<(Setting, Option<String>), StoredValue>,
    profiles: HashMap<SettingCategory, Vec<String>>,
    bundles: IndexMap<(LocaleBundle, String), IndexMap<String, String>>,
    properties: IndexMap<String, String>,
    templates: TemplateSet,
}

impl MemoryStore {
    /// Create a new builder
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::new()
    }
}

impl StoredConfiguration for MemoryStore {
    fn read_setting(&self, setting: &Setting, profile_id: Option<&str>) -> StoredValue {
        self.values
            .get(&(*setting, profile_id.map(String::from)))
            .cloned()
            .unwrap_or_else(|| setting.default_value())
    }

    fn read_locale_bundle_map(
        &self,
        bundle: LocaleBundle,
        key: &str,
    ) -> Option<IndexMap<String, String>> {
        self.bundles
            .get(&(bundle, key.to_string()))
            .filter(|map| !map.is_empty())
            .cloned()
    }

    fn is_default_value(&self, setting: &Setting, profile_id: Option<&str>) -> bool {
        self.values
            .get(&(*setting, profile_id.map(String::from)))
            .is_none_or(|value| *value == setting.default_value())
    }

    fn modified_items(&self) -> Vec<StoredConfigItemKey> {
        let settings = self
            .values
            .iter()
            .filter(|((setting, _), value)| **value != setting.default_value())
            .map(|((setting, profile), _)| {
                StoredConfigItemKey::for_setting(setting, profile.as_deref())
            });
        let bundles = self
            .bundles
            .keys()
            .map(|(bundle, key)| StoredConfigItemKey::for_locale_bundle(*bundle, key));
        let properties = self
            .properties
            .keys()
            .map(|name| StoredConfigItemKey::for_property(name));

        settings.chain(bundles).chain(properties).collect()
    }

    fn template_set(&self) -> TemplateSet {
        self.templates.clone()
    }

    fn profile_ids(&self, category: SettingCategory) -> Vec<String> {
        self.profiles.get(&category).cloned().unwrap_or_default()
    }
}

/// Builder for [`MemoryStore`]
#[derive(Debug, Default)]
pub struct MemoryStoreBuilder {
    store: MemoryStore,
    errors: Vec<String>,
}

impl MemoryStoreBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value for a non-profiled setting
    pub fn setting(mut self, setting: Setting, value: StoredValue) -> Self {
        if setting.category().has_profiles() {
            self.errors.push(format!(
                "setting '{}' belongs to profiled category {}",
                setting.key(),
                setting.category()
            ));
            return self;
        }
        self.insert(setting, None, value);
        self
    }

    /// Store a value for a profiled setting; registers the profile if needed
    pub fn profile_setting(
        mut self,
        setting: Setting,
        profile_id: impl Into<String>,
        value: StoredValue,
    ) -> Self {
        let profile_id = profile_id.into();
        if !setting.category().has_profiles() {
            self.errors.push(format!(
                "setting '{}' of category {} has no profiles",
                setting.key(),
                setting.category()
            ));
            return self;
        }
        self = self.profile(setting.category(), profile_id.clone());
        self.insert(setting, Some(profile_id), value);
        self
    }

    /// Register a profile id for a category, keeping first registration order
    pub fn profile(mut self, category: SettingCategory, profile_id: impl Into<String>) -> Self {
        let profile_id = profile_id.into();
        let ids = self.store.profiles.entry(category).or_default();
        if !ids.contains(&profile_id) {
            ids.push(profile_id);
        }
        self
    }

    /// Override display text for a bundle key
    pub fn locale_bundle<I, L, T>(mut self, bundle: LocaleBundle, key: &str, texts: I) -> Self
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: Into<String>,
    {
        let texts = texts
            .into_iter()
            .map(|(locale, text)| (locale.into(), text.into()))
            .collect();
        self.store.bundles.insert((bundle, key.to_string()), texts);
        self
    }

    /// Set a structural property of the configuration document
    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.store.properties.insert(name.into(), value.into());
        self
    }

    pub fn templates(mut self, templates: TemplateSet) -> Self {
        self.store.templates = templates;
        self
    }

    /// Freeze the snapshot
    pub fn build(self) -> Result<MemoryStore> {
        if !self.errors.is_empty() {
            return Err(ConfigError::invalid_config(self.errors.join("; ")));
        }
        Ok(self.store)
    }

    fn insert(&mut self, setting: Setting, profile_id: Option<String>, value: StoredValue) {
        if let Err(e) = decode::check_syntax(&setting, &value) {
            self.errors.push(e.to_string());
            return;
        }
        self.store.values.insert((setting, profile_id), value);
    }
}
