//! Setting identifiers, syntaxes and categories
//!
//! The schema is fixed at compile time: every setting the facade knows about
//! is an associated constant on [`Setting`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::StoredValue;

/// Value syntax a setting is declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingSyntax {
    String,
    Boolean,
    Numeric,
    StringArray,
    LocalizedString,
    LocalizedStringArray,
    /// Single enum literal
    Select,
    /// Set of enum literals
    OptionList,
    Form,
    UserPermission,
    Action,
    RemoteWebService,
    Password,
    NamedSecret,
    File,
    X509Cert,
    PrivateKey,
    LocalizedEmail,
}

impl fmt::Display for SettingSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Numeric => "numeric",
            Self::StringArray => "string_array",
            Self::LocalizedString => "localized_string",
            Self::LocalizedStringArray => "localized_string_array",
            Self::Select => "select",
            Self::OptionList => "option_list",
            Self::Form => "form",
            Self::UserPermission => "user_permission",
            Self::Action => "action",
            Self::RemoteWebService => "remote_web_service",
            Self::Password => "password",
            Self::NamedSecret => "named_secret",
            Self::File => "file",
            Self::X509Cert => "x509_cert",
            Self::PrivateKey => "private_key",
            Self::LocalizedEmail => "localized_email",
        };
        f.write_str(name)
    }
}

/// Category a setting belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingCategory {
    /// General application behaviour
    Application,
    /// Security key, certificates
    Security,
    /// External database connection
    Database,
    /// Token storage and delivery
    Token,
    /// Where responses and OTP secrets are stored
    Storage,
    /// Email templates
    Email,
    /// Outbound web services and their secrets
    Webservices,
    /// Event logging
    Events,
    /// Global people search switches
    PeopleSearchSettings,
    /// Directory connection profiles
    LdapProfile,
    PasswordPolicy,
    ChallengePolicy,
    ChangePassword,
    ForgottenPassword,
    ActivateUser,
    NewUser,
    Helpdesk,
    SetupOtp,
    UpdateAttributes,
    PeopleSearch,
    EmailServer,
}

impl SettingCategory {
    /// Returns all categories
    pub fn all() -> &'static [SettingCategory] {
        &[
            Self::Application,
            Self::Security,
            Self::Database,
            Self::Token,
            Self::Storage,
            Self::Email,
            Self::Webservices,
            Self::Events,
            Self::PeopleSearchSettings,
            Self::LdapProfile,
            Self::PasswordPolicy,
            Self::ChallengePolicy,
            Self::ChangePassword,
            Self::ForgottenPassword,
            Self::ActivateUser,
            Self::NewUser,
            Self::Helpdesk,
            Self::SetupOtp,
            Self::UpdateAttributes,
            Self::PeopleSearch,
            Self::EmailServer,
        ]
    }

    /// Whether settings of this category are stored per named profile
    pub fn has_profiles(&self) -> bool {
        !matches!(
            self,
            Self::Application
                | Self::Security
                | Self::Database
                | Self::Token
                | Self::Storage
                | Self::Email
                | Self::Webservices
                | Self::Events
                | Self::PeopleSearchSettings
        )
    }
}

impl fmt::Display for SettingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Application => "application",
            Self::Security => "security",
            Self::Database => "database",
            Self::Token => "token",
            Self::Storage => "storage",
            Self::Email => "email",
            Self::Webservices => "webservices",
            Self::Events => "events",
            Self::PeopleSearchSettings => "people_search_settings",
            Self::LdapProfile => "ldap_profile",
            Self::PasswordPolicy => "password_policy",
            Self::ChallengePolicy => "challenge_policy",
            Self::ChangePassword => "change_password",
            Self::ForgottenPassword => "forgotten_password",
            Self::ActivateUser => "activate_user",
            Self::NewUser => "new_user",
            Self::Helpdesk => "helpdesk",
            Self::SetupOtp => "setup_otp",
            Self::UpdateAttributes => "update_attributes",
            Self::PeopleSearch => "people_search",
            Self::EmailServer => "email_server",
        };
        f.write_str(name)
    }
}

/// An immutable setting identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Setting {
    key: &'static str,
    syntax: SettingSyntax,
    category: SettingCategory,
    default: &'static str,
}

impl Setting {
    pub const fn new(
        key: &'static str,
        syntax: SettingSyntax,
        category: SettingCategory,
        default: &'static str,
    ) -> Self {
        Self {
            key,
            syntax,
            category,
            default,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn syntax(&self) -> SettingSyntax {
        self.syntax
    }

    pub fn category(&self) -> SettingCategory {
        self.category
    }

    /// Declared default as a raw stored value
    ///
    /// Scalar syntaxes parse the default literal; array syntaxes split it on
    /// commas; structured syntaxes default to empty.
    pub fn default_value(&self) -> StoredValue {
        let literal = self.default;
        match self.syntax {
            SettingSyntax::String => StoredValue::String(literal.to_string()),
            SettingSyntax::Select => StoredValue::Select(literal.to_string()),
            SettingSyntax::Boolean => StoredValue::Boolean(literal == "true"),
            SettingSyntax::Numeric => StoredValue::Numeric(literal.parse().unwrap_or_default()),
            SettingSyntax::StringArray => StoredValue::StringArray(split_literal(literal)),
            SettingSyntax::OptionList => StoredValue::OptionList(split_literal(literal)),
            SettingSyntax::LocalizedString if !literal.is_empty() => StoredValue::LocalizedString(
                [(String::new(), literal.to_string())].into_iter().collect(),
            ),
            syntax => StoredValue::empty(syntax),
        }
    }

    /// Look a setting up by key
    pub fn by_key(key: &str) -> Option<Setting> {
        Self::ALL.iter().copied().find(|s| s.key == key)
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key)
    }
}

fn split_literal(literal: &str) -> Vec<String> {
    literal
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

use SettingCategory as C;
use SettingSyntax as S;

impl Setting {
    // Application
    pub const SITE_URL: Setting = Setting::new("pwm.selfURL", S::String, C::Application, "");
    pub const IDLE_TIMEOUT_SECONDS: Setting =
        Setting::new("idleTimeoutSeconds", S::Numeric, C::Application, "600");
    pub const DISPLAY_SHOW_DETAILED_ERRORS: Setting = Setting::new(
        "display.showDetailedErrors",
        S::Boolean,
        C::Application,
        "true",
    );
    pub const APPLICATION_TITLE: Setting =
        Setting::new("display.title", S::LocalizedString, C::Application, "");
    pub const KNOWN_LOCALES: Setting =
        Setting::new("knownLocales", S::StringArray, C::Application, "en");
    pub const ADMIN_PERMISSION: Setting =
        Setting::new("pwmAdmin.queryMatch", S::UserPermission, C::Application, "");
    pub const DISPLAY_CUSTOM_RESOURCE_BUNDLE: Setting = Setting::new(
        "display.customResourceBundle",
        S::File,
        C::Application,
        "",
    );
    pub const EXTERNAL_CHANGE_ACTIONS: Setting =
        Setting::new("external.pwChange.actions", S::Action, C::Application, "");

    // Security
    pub const SECURITY_KEY: Setting = Setting::new("pwm.securityKey", S::Password, C::Security, "");
    pub const CERTIFICATE_VALIDATION_MODE: Setting = Setting::new(
        "security.certificate.validationMode",
        S::Select,
        C::Security,
        "CA_ONLY",
    );
    pub const HTTPS_SERVER_CERT: Setting =
        Setting::new("https.server.cert", S::PrivateKey, C::Security, "");
    pub const AUDIT_SYSLOG_CERTIFICATES: Setting =
        Setting::new("audit.syslog.certificates", S::X509Cert, C::Security, "");

    // Database
    pub const DATABASE_CLASS: Setting = Setting::new("db.classname", S::String, C::Database, "");
    pub const DATABASE_URL: Setting =
        Setting::new("db.connectionString", S::String, C::Database, "");
    pub const DATABASE_USERNAME: Setting = Setting::new("db.username", S::String, C::Database, "");
    pub const DATABASE_PASSWORD: Setting =
        Setting::new("db.password", S::Password, C::Database, "");

    // Token
    pub const TOKEN_STORAGE_METHOD: Setting =
        Setting::new("token.storageMethod", S::Select, C::Token, "STORE_LOCALDB");

    // Storage
    pub const RESPONSE_STORAGE_READ: Setting =
        Setting::new("responses.storageMethod.read", S::String, C::Storage, "LDAP");
    pub const RESPONSE_STORAGE_WRITE: Setting =
        Setting::new("responses.storageMethod.write", S::String, C::Storage, "LDAP");
    pub const OTP_SECRET_READ_PREFERENCE: Setting =
        Setting::new("otp.secret.readPreference", S::String, C::Storage, "LDAP");
    pub const OTP_SECRET_WRITE_PREFERENCE: Setting =
        Setting::new("otp.secret.writePreference", S::String, C::Storage, "LDAP");
    pub const STORAGE_ENABLED_METHODS: Setting =
        Setting::new("storage.enabledMethods", S::OptionList, C::Storage, "LDAP");

    // Email
    pub const EMAIL_CHANGE_PASSWORD: Setting =
        Setting::new("email.changePassword", S::LocalizedEmail, C::Email, "");

    // Webservices
    pub const EXTERNAL_WEB_SERVICES: Setting =
        Setting::new("external.webservices", S::RemoteWebService, C::Webservices, "");
    pub const WEBSERVICES_NAMED_SECRETS: Setting =
        Setting::new("webservices.namedSecrets", S::NamedSecret, C::Webservices, "");

    // Events
    pub const EVENTS_LOCALDB_LOG_LEVEL: Setting =
        Setting::new("events.localdb.logLevel", S::Select, C::Events, "TRACE");

    // People search switches
    pub const PEOPLE_SEARCH_ENABLE_PUBLIC: Setting = Setting::new(
        "peopleSearch.enablePublic",
        S::Boolean,
        C::PeopleSearchSettings,
        "false",
    );
    pub const PEOPLE_SEARCH_PUBLIC_PROFILE: Setting = Setting::new(
        "peopleSearch.publicProfile",
        S::String,
        C::PeopleSearchSettings,
        "default",
    );

    // LDAP profile
    pub const LDAP_PROFILE_ENABLED: Setting =
        Setting::new("ldap.profile.enabled", S::Boolean, C::LdapProfile, "true");
    pub const LDAP_PROFILE_DISPLAY_NAME: Setting = Setting::new(
        "ldap.profile.displayName",
        S::LocalizedString,
        C::LdapProfile,
        "",
    );
    pub const LDAP_SERVER_URLS: Setting =
        Setting::new("ldap.serverUrls", S::StringArray, C::LdapProfile, "");
    pub const LDAP_PROXY_USER_DN: Setting =
        Setting::new("ldap.proxy.username", S::String, C::LdapProfile, "");
    pub const LDAP_PROXY_USER_PASSWORD: Setting =
        Setting::new("ldap.proxy.password", S::Password, C::LdapProfile, "");
    pub const LDAP_SERVER_CERTS: Setting =
        Setting::new("ldap.serverCerts", S::X509Cert, C::LdapProfile, "");
    pub const LDAP_LOGIN_CONTEXTS: Setting =
        Setting::new("ldap.selectableContexts", S::StringArray, C::LdapProfile, "");
    pub const LDAP_USERNAME_SEARCH_FILTER: Setting = Setting::new(
        "ldap.usernameSearchFilter",
        S::String,
        C::LdapProfile,
        "(&(objectClass=inetOrgPerson)(cn=%USERNAME%))",
    );
    pub const LDAP_GUID_ATTRIBUTE: Setting =
        Setting::new("ldap.guidAttribute", S::String, C::LdapProfile, "entryUUID");

    // Password policy profile
    pub const PASSWORD_POLICY_QUERY_MATCH: Setting = Setting::new(
        "password.policy.queryMatch",
        S::UserPermission,
        C::PasswordPolicy,
        "",
    );
    pub const PASSWORD_POLICY_MINIMUM_LENGTH: Setting = Setting::new(
        "password.policy.minimumLength",
        S::Numeric,
        C::PasswordPolicy,
        "2",
    );
    pub const PASSWORD_POLICY_MAXIMUM_LENGTH: Setting = Setting::new(
        "password.policy.maximumLength",
        S::Numeric,
        C::PasswordPolicy,
        "64",
    );
    pub const PASSWORD_POLICY_MINIMUM_UPPERCASE: Setting = Setting::new(
        "password.policy.minimumUpperCase",
        S::Numeric,
        C::PasswordPolicy,
        "0",
    );
    pub const PASSWORD_POLICY_MINIMUM_LOWERCASE: Setting = Setting::new(
        "password.policy.minimumLowerCase",
        S::Numeric,
        C::PasswordPolicy,
        "0",
    );
    pub const PASSWORD_POLICY_MINIMUM_NUMERIC: Setting = Setting::new(
        "password.policy.minimumNumeric",
        S::Numeric,
        C::PasswordPolicy,
        "0",
    );
    pub const PASSWORD_POLICY_MINIMUM_SPECIAL: Setting = Setting::new(
        "password.policy.minimumSpecial",
        S::Numeric,
        C::PasswordPolicy,
        "0",
    );
    pub const PASSWORD_POLICY_DISALLOWED_VALUES: Setting = Setting::new(
        "password.policy.disallowedValues",
        S::StringArray,
        C::PasswordPolicy,
        "",
    );
    pub const PASSWORD_POLICY_CHANGE_MESSAGE: Setting = Setting::new(
        "password.policy.changeMessage",
        S::LocalizedString,
        C::PasswordPolicy,
        "",
    );

    // Challenge policy profile
    pub const CHALLENGE_REQUIRED_CHALLENGES: Setting = Setting::new(
        "challenge.requiredChallenges",
        S::LocalizedStringArray,
        C::ChallengePolicy,
        "",
    );
    pub const CHALLENGE_RANDOM_CHALLENGES: Setting = Setting::new(
        "challenge.randomChallenges",
        S::LocalizedStringArray,
        C::ChallengePolicy,
        "",
    );
    pub const CHALLENGE_MIN_RANDOM_REQUIRED: Setting = Setting::new(
        "challenge.minRandomRequired",
        S::Numeric,
        C::ChallengePolicy,
        "0",
    );

    // Change password profile
    pub const CHANGE_PASSWORD_QUERY_MATCH: Setting = Setting::new(
        "changePassword.queryMatch",
        S::UserPermission,
        C::ChangePassword,
        "",
    );
    pub const CHANGE_PASSWORD_REQUIRE_CURRENT: Setting = Setting::new(
        "changePassword.requireCurrent",
        S::Boolean,
        C::ChangePassword,
        "true",
    );
    pub const CHANGE_PASSWORD_WRITE_ATTRIBUTES: Setting = Setting::new(
        "changePassword.writeAttributes",
        S::Action,
        C::ChangePassword,
        "",
    );

    // Forgotten password profile
    pub const RECOVERY_QUERY_MATCH: Setting = Setting::new(
        "recovery.queryMatch",
        S::UserPermission,
        C::ForgottenPassword,
        "",
    );
    pub const RECOVERY_SEARCH_FORM: Setting =
        Setting::new("recovery.form", S::Form, C::ForgottenPassword, "");
    pub const RECOVERY_VERIFICATION_METHODS: Setting = Setting::new(
        "recovery.verificationMethods",
        S::OptionList,
        C::ForgottenPassword,
        "CHALLENGE_RESPONSES",
    );
    pub const RECOVERY_TOKEN_SEND_METHOD: Setting = Setting::new(
        "recovery.token.sendMethod",
        S::Select,
        C::ForgottenPassword,
        "EMAILONLY",
    );

    // Activate user profile
    pub const ACTIVATE_USER_QUERY_MATCH: Setting = Setting::new(
        "activateUser.queryMatch",
        S::UserPermission,
        C::ActivateUser,
        "",
    );
    pub const ACTIVATE_USER_FORM: Setting =
        Setting::new("activateUser.form", S::Form, C::ActivateUser, "");
    pub const ACTIVATE_USER_POST_WRITE_ATTRIBUTES: Setting = Setting::new(
        "activateUser.writePostAttributes",
        S::Action,
        C::ActivateUser,
        "",
    );

    // New user profile
    pub const NEW_USER_FORM: Setting = Setting::new("newUser.form", S::Form, C::NewUser, "");
    pub const NEW_USER_CONTEXT: Setting =
        Setting::new("newUser.createContext", S::String, C::NewUser, "");
    pub const NEW_USER_LDAP_PROFILE: Setting =
        Setting::new("newUser.ldapProfile", S::String, C::NewUser, "");
    pub const NEW_USER_WRITE_ATTRIBUTES: Setting =
        Setting::new("newUser.writeAttributes", S::Action, C::NewUser, "");

    // Helpdesk profile
    pub const HELPDESK_QUERY_MATCH: Setting =
        Setting::new("helpdesk.queryMatch", S::UserPermission, C::Helpdesk, "");
    pub const HELPDESK_SEARCH_FORM: Setting =
        Setting::new("helpdesk.searchForm", S::Form, C::Helpdesk, "");
    pub const HELPDESK_ACTIONS: Setting =
        Setting::new("helpdesk.actions", S::Action, C::Helpdesk, "");

    // Setup OTP profile
    pub const SETUP_OTP_QUERY_MATCH: Setting =
        Setting::new("otp.queryMatch", S::UserPermission, C::SetupOtp, "");
    pub const SETUP_OTP_FORCE_SETUP: Setting =
        Setting::new("otp.forceSetup", S::Boolean, C::SetupOtp, "false");

    // Update attributes profile
    pub const UPDATE_ATTRIBUTES_QUERY_MATCH: Setting = Setting::new(
        "updateAttributes.queryMatch",
        S::UserPermission,
        C::UpdateAttributes,
        "",
    );
    pub const UPDATE_ATTRIBUTES_FORM: Setting =
        Setting::new("updateAttributes.form", S::Form, C::UpdateAttributes, "");
    pub const UPDATE_ATTRIBUTES_WRITE_ATTRIBUTES: Setting = Setting::new(
        "updateAttributes.writeAttributes",
        S::Action,
        C::UpdateAttributes,
        "",
    );

    // People search profile
    pub const PEOPLE_SEARCH_QUERY_MATCH: Setting = Setting::new(
        "peopleSearch.queryMatch",
        S::UserPermission,
        C::PeopleSearch,
        "",
    );
    pub const PEOPLE_SEARCH_SEARCH_FORM: Setting =
        Setting::new("peopleSearch.searchForm", S::Form, C::PeopleSearch, "");
    pub const PEOPLE_SEARCH_RESULT_FORM: Setting =
        Setting::new("peopleSearch.resultForm", S::Form, C::PeopleSearch, "");
    pub const PEOPLE_SEARCH_MAX_RESULTS: Setting =
        Setting::new("peopleSearch.result.limit", S::Numeric, C::PeopleSearch, "250");

    // Email server profile
    pub const EMAIL_SERVER_ADDRESS: Setting =
        Setting::new("email.smtp.address", S::String, C::EmailServer, "");
    pub const EMAIL_SERVER_PORT: Setting =
        Setting::new("email.smtp.port", S::Numeric, C::EmailServer, "25");
    pub const EMAIL_USERNAME: Setting =
        Setting::new("email.smtp.username", S::String, C::EmailServer, "");
    pub const EMAIL_PASSWORD: Setting =
        Setting::new("email.smtp.userpassword", S::Password, C::EmailServer, "");
    pub const EMAIL_DEFAULT_FROM_ADDRESS: Setting =
        Setting::new("email.default.fromAddress", S::String, C::EmailServer, "");

    /// Every known setting, in schema order
    pub const ALL: &'static [Setting] = &[
        Self::SITE_URL,
        Self::IDLE_TIMEOUT_SECONDS,
        Self::DISPLAY_SHOW_DETAILED_ERRORS,
        Self::APPLICATION_TITLE,
        Self::KNOWN_LOCALES,
        Self::ADMIN_PERMISSION,
        Self::DISPLAY_CUSTOM_RESOURCE_BUNDLE,
        Self::EXTERNAL_CHANGE_ACTIONS,
        Self::SECURITY_KEY,
        Self::CERTIFICATE_VALIDATION_MODE,
        Self::HTTPS_SERVER_CERT,
        Self::AUDIT_SYSLOG_CERTIFICATES,
        Self::DATABASE_CLASS,
        Self::DATABASE_URL,
        Self::DATABASE_USERNAME,
        Self::DATABASE_PASSWORD,
        Self::TOKEN_STORAGE_METHOD,
        Self::RESPONSE_STORAGE_READ,
        Self::RESPONSE_STORAGE_WRITE,
        Self::OTP_SECRET_READ_PREFERENCE,
        Self::OTP_SECRET_WRITE_PREFERENCE,
        Self::STORAGE_ENABLED_METHODS,
        Self::EMAIL_CHANGE_PASSWORD,
        Self::EXTERNAL_WEB_SERVICES,
        Self::WEBSERVICES_NAMED_SECRETS,
        Self::EVENTS_LOCALDB_LOG_LEVEL,
        Self::PEOPLE_SEARCH_ENABLE_PUBLIC,
        Self::PEOPLE_SEARCH_PUBLIC_PROFILE,
        Self::LDAP_PROFILE_ENABLED,
        Self::LDAP_PROFILE_DISPLAY_NAME,
        Self::LDAP_SERVER_URLS,
        Self::LDAP_PROXY_USER_DN,
        Self::LDAP_PROXY_USER_PASSWORD,
        Self::LDAP_SERVER_CERTS,
        Self::LDAP_LOGIN_CONTEXTS,
        Self::LDAP_USERNAME_SEARCH_FILTER,
        Self::LDAP_GUID_ATTRIBUTE,
        Self::PASSWORD_POLICY_QUERY_MATCH,
        Self::PASSWORD_POLICY_MINIMUM_LENGTH,
        Self::PASSWORD_POLICY_MAXIMUM_LENGTH,
        Self::PASSWORD_POLICY_MINIMUM_UPPERCASE,
        Self::PASSWORD_POLICY_MINIMUM_LOWERCASE,
        Self::PASSWORD_POLICY_MINIMUM_NUMERIC,
        Self::PASSWORD_POLICY_MINIMUM_SPECIAL,
        Self::PASSWORD_POLICY_DISALLOWED_VALUES,
        Self::PASSWORD_POLICY_CHANGE_MESSAGE,
        Self::CHALLENGE_REQUIRED_CHALLENGES,
        Self::CHALLENGE_RANDOM_CHALLENGES,
        Self::CHALLENGE_MIN_RANDOM_REQUIRED,
        Self::CHANGE_PASSWORD_QUERY_MATCH,
        Self::CHANGE_PASSWORD_REQUIRE_CURRENT,
        Self::CHANGE_PASSWORD_WRITE_ATTRIBUTES,
        Self::RECOVERY_QUERY_MATCH,
        Self::RECOVERY_SEARCH_FORM,
        Self::RECOVERY_VERIFICATION_METHODS,
        Self::RECOVERY_TOKEN_SEND_METHOD,
        Self::ACTIVATE_USER_QUERY_MATCH,
        Self::ACTIVATE_USER_FORM,
        Self::ACTIVATE_USER_POST_WRITE_ATTRIBUTES,
        Self::NEW_USER_FORM,
        Self::NEW_USER_CONTEXT,
        Self::NEW_USER_LDAP_PROFILE,
        Self::NEW_USER_WRITE_ATTRIBUTES,
        Self::HELPDESK_QUERY_MATCH,
        Self::HELPDESK_SEARCH_FORM,
        Self::HELPDESK_ACTIONS,
        Self::SETUP_OTP_QUERY_MATCH,
        Self::SETUP_OTP_FORCE_SETUP,
        Self::UPDATE_ATTRIBUTES_QUERY_MATCH,
        Self::UPDATE_ATTRIBUTES_FORM,
        Self::UPDATE_ATTRIBUTES_WRITE_ATTRIBUTES,
        Self::PEOPLE_SEARCH_QUERY_MATCH,
        Self::PEOPLE_SEARCH_SEARCH_FORM,
        Self::PEOPLE_SEARCH_RESULT_FORM,
        Self::PEOPLE_SEARCH_MAX_RESULTS,
        Self::EMAIL_SERVER_ADDRESS,
        Self::EMAIL_SERVER_PORT,
        Self::EMAIL_USERNAME,
        Self::EMAIL_PASSWORD,
        Self::EMAIL_DEFAULT_FROM_ADDRESS,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_categories() {
        assert!(!SettingCategory::Security.has_profiles());
        assert!(!SettingCategory::Database.has_profiles());
        assert!(SettingCategory::LdapProfile.has_profiles());
        assert!(SettingCategory::EmailServer.has_profiles());
    }

    #[test]
    fn test_setting_keys_are_unique() {
        let mut keys: Vec<_> = Setting::ALL.iter().map(Setting::key).collect();
        keys.sort_unstable();
        let total = keys.len();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_default_values() {
        assert_eq!(
            Setting::IDLE_TIMEOUT_SECONDS.default_value(),
            StoredValue::Numeric(600)
        );
        assert_eq!(
            Setting::LDAP_PROFILE_ENABLED.default_value(),
            StoredValue::Boolean(true)
        );
        assert_eq!(
            Setting::SECURITY_KEY.default_value(),
            StoredValue::Password(None)
        );
        assert_eq!(
            Setting::KNOWN_LOCALES.default_value(),
            StoredValue::StringArray(vec!["en".to_string()])
        );
    }

    #[test]
    fn test_by_key() {
        assert_eq!(Setting::by_key("db.classname"), Some(Setting::DATABASE_CLASS));
        assert_eq!(Setting::by_key("no.such.setting"), None);
    }
}
