use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use domain_config::locale::LocaleBundle;
use domain_config::options::{DataStorageMethod, LogLevel, TokenStorageMethod};
use domain_config::value::PasswordData;
use domain_config::{
    AppProperties, ConfigError, DomainConfig, DomainId, ErrorCode, Locale, MemoryStore,
    ProfileDefinition, Setting, SettingCategory, StoredConfigItemKey, StoredConfiguration,
    StoredValue, TemplateSet,
};
use indexmap::IndexMap;

/// Store wrapper that counts how often profile ids are enumerated
struct CountingStore {
    inner: MemoryStore,
    profile_id_reads: AtomicUsize,
    bundle_reads: AtomicUsize,
}

impl CountingStore {
    fn new(inner: MemoryStore) -> Arc<Self> {
        Arc::new(Self {
            inner,
            profile_id_reads: AtomicUsize::new(0),
            bundle_reads: AtomicUsize::new(0),
        })
    }
}

impl StoredConfiguration for CountingStore {
    fn read_setting(&self, setting: &Setting, profile_id: Option<&str>) -> StoredValue {
        self.inner.read_setting(setting, profile_id)
    }

    fn read_locale_bundle_map(
        &self,
        bundle: LocaleBundle,
        key: &str,
    ) -> Option<IndexMap<String, String>> {
        self.bundle_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_locale_bundle_map(bundle, key)
    }

    fn is_default_value(&self, setting: &Setting, profile_id: Option<&str>) -> bool {
        self.inner.is_default_value(setting, profile_id)
    }

    fn modified_items(&self) -> Vec<StoredConfigItemKey> {
        self.inner.modified_items()
    }

    fn template_set(&self) -> TemplateSet {
        self.inner.template_set()
    }

    fn profile_ids(&self, category: SettingCategory) -> Vec<String> {
        self.profile_id_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.profile_ids(category)
    }
}

fn facade(store: MemoryStore) -> DomainConfig {
    DomainConfig::builder()
        .with_store(Arc::new(store))
        .with_domain(DomainId::new("acme"))
        .build()
        .expect("facade builds")
}

fn ldap_store() -> MemoryStore {
    MemoryStore::builder()
        .profile_setting(
            Setting::LDAP_SERVER_URLS,
            "A",
            StoredValue::StringArray(vec!["ldaps://a.example.org".into()]),
        )
        .profile_setting(Setting::LDAP_PROFILE_ENABLED, "B", StoredValue::Boolean(false))
        .profile_setting(
            Setting::LDAP_SERVER_URLS,
            "C",
            StoredValue::StringArray(vec!["ldaps://c.example.org".into()]),
        )
        .build()
        .expect("store builds")
}

#[test]
fn simple_reads_and_defaults() {
    let config = facade(
        MemoryStore::builder()
            .setting(
                Setting::SITE_URL,
                StoredValue::String("https://id.example.org".into()),
            )
            .build()
            .unwrap(),
    );

    assert_eq!(
        config.read_setting_as_string(&Setting::SITE_URL).unwrap(),
        "https://id.example.org"
    );
    assert_eq!(
        config.read_setting_as_long(&Setting::IDLE_TIMEOUT_SECONDS).unwrap(),
        600
    );
    assert!(config.is_default_value(&Setting::IDLE_TIMEOUT_SECONDS).unwrap());
    assert!(!config.is_default_value(&Setting::SITE_URL).unwrap());
    assert_eq!(
        config.event_log_local_db_level().unwrap(),
        Some(LogLevel::Trace)
    );
    assert_eq!(config.domain_id().as_str(), "acme");
}

#[test]
fn profiled_setting_read_without_profile_is_rejected() {
    let config = facade(ldap_store());

    let err = config
        .read_setting_as_string_array(&Setting::LDAP_SERVER_URLS)
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ProfiledSettingAccess { key: "ldap.serverUrls" }
    ));

    // A profile-scoped reader can read it
    let urls = config
        .profile_reader("A")
        .read_setting_as_string_array(&Setting::LDAP_SERVER_URLS)
        .unwrap();
    assert_eq!(urls, vec!["ldaps://a.example.org"]);
}

#[test]
fn enabled_ldap_profiles_keep_order() {
    let config = facade(ldap_store());

    let all = config.all_ldap_profiles().unwrap();
    assert_eq!(all.keys().collect::<Vec<_>>(), vec!["A", "B", "C"]);

    let enabled = config.ldap_profiles().unwrap();
    assert_eq!(enabled.keys().collect::<Vec<_>>(), vec!["A", "C"]);

    let default = config.default_ldap_profile().unwrap();
    assert_eq!(default.identifier, "A");
    assert_eq!(default.display_name, "A");
}

#[test]
fn default_ldap_profile_without_profiles() {
    let config = facade(MemoryStore::default());

    assert!(config.ldap_profiles().unwrap().is_empty());
    let err = config.default_ldap_profile().unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::NoLdapProfile));
}

#[test]
fn profile_maps_are_built_once() {
    let store = CountingStore::new(ldap_store());
    let config = DomainConfig::new(store.clone(), DomainId::default());

    let first = config.all_ldap_profiles().unwrap();
    let second = config.all_ldap_profiles().unwrap();
    let _ = config.ldap_profiles().unwrap();
    let _ = config.profile_map(ProfileDefinition::Ldap).unwrap();

    assert_eq!(store.profile_id_reads.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first["A"], &second["A"]));
    assert_eq!(config.cache_stats().profile_maps, 1);
}

#[test]
fn profile_map_copies_are_independent() {
    let config = facade(ldap_store());

    let mut copy = config.all_ldap_profiles().unwrap();
    copy.shift_remove("A");

    assert_eq!(copy.len(), 2);
    assert_eq!(config.all_ldap_profiles().unwrap().len(), 3);
}

#[test]
fn broken_profile_fails_construction() {
    let store = MemoryStore::builder()
        .profile(SettingCategory::LdapProfile, "broken")
        .build()
        .unwrap();
    let config = facade(store);

    // Enabled by default but without server URLs
    let err = config.all_ldap_profiles().unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::ProfileConstruction));
    assert!(err.to_string().contains("broken"));
}

#[test]
fn definitions_without_factory_yield_empty_maps() {
    let store = MemoryStore::builder()
        .profile(SettingCategory::PasswordPolicy, "default")
        .build()
        .unwrap();
    let config = facade(store);

    assert!(
        config
            .profile_map(ProfileDefinition::PasswordPolicy)
            .unwrap()
            .is_empty()
    );
    assert_eq!(config.password_profile_ids(), vec!["default"]);
}

#[test]
fn activity_profile_maps() {
    let store = MemoryStore::builder()
        .profile(SettingCategory::Helpdesk, "desk")
        .profile(SettingCategory::ChangePassword, "default")
        .profile(SettingCategory::SetupOtp, "otp")
        .build()
        .unwrap();
    let config = facade(store);

    assert_eq!(
        config.helpdesk_profiles().unwrap().keys().collect::<Vec<_>>(),
        vec!["desk"]
    );
    assert_eq!(config.change_password_profiles().unwrap().len(), 1);
    assert_eq!(config.setup_otp_profiles().unwrap().len(), 1);
    assert!(config.activate_user_profiles().unwrap().is_empty());
    assert!(config.update_attributes_profiles().unwrap().is_empty());
    assert!(config.email_server_profiles().unwrap().is_empty());
}

#[test]
fn public_people_search_profile() {
    let disabled = facade(
        MemoryStore::builder()
            .profile(SettingCategory::PeopleSearch, "default")
            .build()
            .unwrap(),
    );
    assert!(disabled.public_people_search_profile().unwrap().is_none());

    let enabled = facade(
        MemoryStore::builder()
            .profile(SettingCategory::PeopleSearch, "default")
            .setting(
                Setting::PEOPLE_SEARCH_ENABLE_PUBLIC,
                StoredValue::Boolean(true),
            )
            .build()
            .unwrap(),
    );
    let public = enabled
        .public_people_search_profile()
        .unwrap()
        .expect("public profile");
    assert!(public.public);
    assert!(public.query_match.is_empty());

    // The authenticated variant is unaffected
    let private = enabled.people_search_profiles().unwrap();
    assert!(!private["default"].public);
}

#[test]
fn password_policy_is_cached_per_profile_and_locale() {
    let store = MemoryStore::builder()
        .profile_setting(
            Setting::PASSWORD_POLICY_MINIMUM_LENGTH,
            "strict",
            StoredValue::Numeric(12),
        )
        .profile(SettingCategory::PasswordPolicy, "relaxed")
        .build()
        .unwrap();
    let config = facade(store);
    let en = Locale::parse("en");
    let de = Locale::parse("de");

    let first = config.password_policy("strict", &en).unwrap();
    let again = config.password_policy("strict", &en).unwrap();
    let german = config.password_policy("strict", &de).unwrap();
    let relaxed = config.password_policy("relaxed", &en).unwrap();

    assert!(Arc::ptr_eq(&first, &again));
    assert!(!Arc::ptr_eq(&first, &german));
    assert_eq!(first.minimum_length, 12);
    assert_eq!(relaxed.minimum_length, 2);
    assert_eq!(config.cache_stats().password_policies, 3);

    // Empty id resolves to the first configured profile
    let implicit = config.password_policy("", &en).unwrap();
    assert!(Arc::ptr_eq(&first, &implicit));

    let err = config.password_policy("nope", &en).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnknownProfile {
            category: SettingCategory::PasswordPolicy,
            ..
        }
    ));
}

#[test]
fn challenge_profile_is_rebuilt_every_call() {
    let store = MemoryStore::builder()
        .profile(SettingCategory::ChallengePolicy, "default")
        .build()
        .unwrap();
    let config = facade(store);

    let mut first = config.challenge_profile("default", &Locale::root()).unwrap();
    first.min_random_required = 99;
    let second = config.challenge_profile("", &Locale::root()).unwrap();

    assert_ne!(second.min_random_required, 99);
    assert_eq!(config.challenge_profile_ids(), vec!["default"]);
    assert!(config.challenge_profile("other", &Locale::root()).is_err());
}

#[test]
fn storage_locations_skip_unknown_tokens() {
    let store = MemoryStore::builder()
        .setting(
            Setting::RESPONSE_STORAGE_READ,
            StoredValue::String("LDAP-DB-UNKNOWNX".into()),
        )
        .setting(
            Setting::OTP_SECRET_READ_PREFERENCE,
            StoredValue::String("LOCALDB".into()),
        )
        .build()
        .unwrap();
    let config = facade(store);

    assert_eq!(
        config
            .response_storage_locations(&Setting::RESPONSE_STORAGE_READ)
            .unwrap(),
        vec![DataStorageMethod::Ldap, DataStorageMethod::Db]
    );
    assert_eq!(
        config
            .otp_secret_storage_locations(&Setting::OTP_SECRET_READ_PREFERENCE)
            .unwrap(),
        vec![DataStorageMethod::LocalDb]
    );
}

#[test]
fn token_storage_method() {
    let config = facade(MemoryStore::default());
    assert_eq!(
        config.token_storage_method().unwrap(),
        Some(TokenStorageMethod::StoreLocalDb)
    );

    let unknown = facade(
        MemoryStore::builder()
            .setting(
                Setting::TOKEN_STORAGE_METHOD,
                StoredValue::Select("STORE_PIGEON".into()),
            )
            .build()
            .unwrap(),
    );
    assert_eq!(unknown.token_storage_method().unwrap(), None);
}

#[test]
fn has_db_configured() {
    let partial = MemoryStore::builder()
        .setting(
            Setting::DATABASE_CLASS,
            StoredValue::String("org.postgresql.Driver".into()),
        )
        .setting(
            Setting::DATABASE_URL,
            StoredValue::String("jdbc:postgresql://db/ssp".into()),
        )
        .setting(Setting::DATABASE_USERNAME, StoredValue::String("ssp".into()));

    assert!(!facade(partial.build().unwrap()).has_db_configured().unwrap());

    let complete = MemoryStore::builder()
        .setting(
            Setting::DATABASE_CLASS,
            StoredValue::String("org.postgresql.Driver".into()),
        )
        .setting(
            Setting::DATABASE_URL,
            StoredValue::String("jdbc:postgresql://db/ssp".into()),
        )
        .setting(Setting::DATABASE_USERNAME, StoredValue::String("ssp".into()))
        .setting(
            Setting::DATABASE_PASSWORD,
            StoredValue::Password(Some(PasswordData::new("hunter2"))),
        )
        .build()
        .unwrap();
    assert!(facade(complete).has_db_configured().unwrap());
}

#[test]
fn non_default_settings_exclude_profiles_and_bundles() {
    let store = MemoryStore::builder()
        .setting(
            Setting::SITE_URL,
            StoredValue::String("https://id.example.org".into()),
        )
        .setting(Setting::IDLE_TIMEOUT_SECONDS, StoredValue::Numeric(600))
        .setting(
            Setting::DISPLAY_SHOW_DETAILED_ERRORS,
            StoredValue::Boolean(true),
        )
        .profile_setting(
            Setting::LDAP_SERVER_URLS,
            "A",
            StoredValue::StringArray(vec!["ldaps://a".into()]),
        )
        .locale_bundle(LocaleBundle::Display, "Title_Application", [("en", "Portal")])
        .property("configIsEditable", "false")
        .build()
        .unwrap();
    let config = facade(store);

    let settings: Vec<Setting> = config.non_default_settings().into_iter().collect();
    assert_eq!(settings, vec![Setting::SITE_URL]);
}

#[test]
fn localized_bundle_lookup_caches_absence() {
    let store = CountingStore::new(
        MemoryStore::builder()
            .locale_bundle(
                LocaleBundle::Display,
                "Title_Application",
                [("en", "Portal"), ("de-DE", "Portal DE")],
            )
            .build()
            .unwrap(),
    );
    let config = DomainConfig::new(store.clone(), DomainId::default());

    let text = config
        .read_localized_bundle(LocaleBundle::Display, "Title_Application")
        .expect("overridden");
    assert_eq!(text[&Locale::parse("de_DE")], "Portal DE");
    let again = config
        .read_localized_bundle(LocaleBundle::Display, "Title_Application")
        .unwrap();
    assert!(Arc::ptr_eq(&text, &again));

    assert!(config.read_localized_bundle(LocaleBundle::Error, "Missing").is_none());
    assert!(config.read_localized_bundle(LocaleBundle::Error, "Missing").is_none());

    assert_eq!(store.bundle_reads.load(Ordering::SeqCst), 2);
    assert_eq!(config.cache_stats().localized_text, 2);
}

#[test]
fn configuration_hash_tracks_content() {
    let a = facade(
        MemoryStore::builder()
            .setting(Setting::SITE_URL, StoredValue::String("https://a".into()))
            .build()
            .unwrap(),
    );
    let b = facade(
        MemoryStore::builder()
            .setting(Setting::SITE_URL, StoredValue::String("https://b".into()))
            .build()
            .unwrap(),
    );

    let hash = a.configuration_hash().unwrap();
    assert_eq!(hash.len(), 64);
    assert_eq!(hash, a.configuration_hash().unwrap());
    assert_ne!(hash, b.configuration_hash().unwrap());
}

#[test]
fn template_and_properties_pass_through() {
    let store = MemoryStore::builder()
        .templates(TemplateSet::new(["LDAP", "DB"]))
        .build()
        .unwrap();
    let config = DomainConfig::builder()
        .with_store(Arc::new(store))
        .with_properties(AppProperties {
            dev_debug_mode: true,
            ..Default::default()
        })
        .build()
        .unwrap();

    assert!(config.template().contains("DB"));
    assert!(config.is_dev_debug_mode());
    assert_eq!(
        config.non_default_app_properties().get("dev_debug_mode"),
        Some(&"true".to_string())
    );
}
