//! Profiles: typed, named bundles of settings for one category
//!
//! Every profiled category has a [`ProfileDefinition`]. Definitions with a
//! factory (see [`registry`]) are built once per profile id and cached by the
//! facade as a [`Profile`] map; typed getters hand out `Arc` clones of the
//! same instances.

pub mod activity;
pub mod challenge;
pub mod email_server;
pub mod ldap;
pub mod password_policy;
pub mod registry;

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::reader::SettingReader;
use crate::setting::{Setting, SettingCategory};
use crate::{ConfigError, ErrorCode, Result};

pub use activity::{
    ActivateUserProfile, ChangePasswordProfile, ForgottenPasswordProfile, HelpdeskProfile,
    NewUserProfile, PeopleSearchProfile, SetupOtpProfile, UpdateAttributesProfile,
};
pub use challenge::ChallengeProfile;
pub use email_server::EmailServerProfile;
pub use ldap::LdapProfile;
pub use password_policy::PasswordPolicy;
pub use registry::ProfileFactory;

/// Insertion-ordered profiles keyed by profile id
pub type ProfileMap<T> = IndexMap<String, Arc<T>>;

/// Kinds of profile the facade knows how to expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileDefinition {
    Ldap,
    /// Built per locale through the password policy cache, no map factory
    PasswordPolicy,
    /// Re-read on every lookup, no map factory
    Challenge,
    ChangePassword,
    ForgottenPassword,
    ActivateUser,
    NewUser,
    Helpdesk,
    SetupOtp,
    UpdateAttributes,
    PeopleSearch,
    /// People search profiles exposed to unauthenticated users
    PeopleSearchPublic,
    EmailServer,
}

impl ProfileDefinition {
    /// Returns all definitions
    pub fn all() -> &'static [ProfileDefinition] {
        &[
            Self::Ldap,
            Self::PasswordPolicy,
            Self::Challenge,
            Self::ChangePassword,
            Self::ForgottenPassword,
            Self::ActivateUser,
            Self::NewUser,
            Self::Helpdesk,
            Self::SetupOtp,
            Self::UpdateAttributes,
            Self::PeopleSearch,
            Self::PeopleSearchPublic,
            Self::EmailServer,
        ]
    }

    /// Category the profile ids of this definition are enumerated from
    pub fn category(&self) -> SettingCategory {
        match self {
            Self::Ldap => SettingCategory::LdapProfile,
            Self::PasswordPolicy => SettingCategory::PasswordPolicy,
            Self::Challenge => SettingCategory::ChallengePolicy,
            Self::ChangePassword => SettingCategory::ChangePassword,
            Self::ForgottenPassword => SettingCategory::ForgottenPassword,
            Self::ActivateUser => SettingCategory::ActivateUser,
            Self::NewUser => SettingCategory::NewUser,
            Self::Helpdesk => SettingCategory::Helpdesk,
            Self::SetupOtp => SettingCategory::SetupOtp,
            Self::UpdateAttributes => SettingCategory::UpdateAttributes,
            Self::PeopleSearch | Self::PeopleSearchPublic => SettingCategory::PeopleSearch,
            Self::EmailServer => SettingCategory::EmailServer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ldap => "ldap",
            Self::PasswordPolicy => "password_policy",
            Self::Challenge => "challenge",
            Self::ChangePassword => "change_password",
            Self::ForgottenPassword => "forgotten_password",
            Self::ActivateUser => "activate_user",
            Self::NewUser => "new_user",
            Self::Helpdesk => "helpdesk",
            Self::SetupOtp => "setup_otp",
            Self::UpdateAttributes => "update_attributes",
            Self::PeopleSearch => "people_search",
            Self::PeopleSearchPublic => "people_search_public",
            Self::EmailServer => "email_server",
        }
    }
}

impl fmt::Display for ProfileDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A built profile of any kind
#[derive(Debug, Clone)]
pub enum Profile {
    Ldap(Arc<LdapProfile>),
    ChangePassword(Arc<ChangePasswordProfile>),
    ForgottenPassword(Arc<ForgottenPasswordProfile>),
    ActivateUser(Arc<ActivateUserProfile>),
    NewUser(Arc<NewUserProfile>),
    Helpdesk(Arc<HelpdeskProfile>),
    SetupOtp(Arc<SetupOtpProfile>),
    UpdateAttributes(Arc<UpdateAttributesProfile>),
    PeopleSearch(Arc<PeopleSearchProfile>),
    EmailServer(Arc<EmailServerProfile>),
}

impl Profile {
    pub fn identifier(&self) -> &str {
        match self {
            Self::Ldap(p) => p.identifier(),
            Self::ChangePassword(p) => p.identifier(),
            Self::ForgottenPassword(p) => p.identifier(),
            Self::ActivateUser(p) => p.identifier(),
            Self::NewUser(p) => p.identifier(),
            Self::Helpdesk(p) => p.identifier(),
            Self::SetupOtp(p) => p.identifier(),
            Self::UpdateAttributes(p) => p.identifier(),
            Self::PeopleSearch(p) => p.identifier(),
            Self::EmailServer(p) => p.identifier(),
        }
    }
}

/// A concrete profile type that can be extracted from a [`Profile`]
pub trait TypedProfile: fmt::Debug + Send + Sync + Sized + 'static {
    fn identifier(&self) -> &str;

    /// The typed instance, `None` when `profile` holds another kind
    fn from_profile(profile: &Profile) -> Option<&Arc<Self>>;
}

macro_rules! typed_profile {
    ($ty:ty, $variant:ident) => {
        impl TypedProfile for $ty {
            fn identifier(&self) -> &str {
                &self.identifier
            }

            fn from_profile(profile: &Profile) -> Option<&Arc<Self>> {
                match profile {
                    Profile::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

typed_profile!(LdapProfile, Ldap);
typed_profile!(ChangePasswordProfile, ChangePassword);
typed_profile!(ForgottenPasswordProfile, ForgottenPassword);
typed_profile!(ActivateUserProfile, ActivateUser);
typed_profile!(NewUserProfile, NewUser);
typed_profile!(HelpdeskProfile, Helpdesk);
typed_profile!(SetupOtpProfile, SetupOtp);
typed_profile!(UpdateAttributesProfile, UpdateAttributes);
typed_profile!(PeopleSearchProfile, PeopleSearch);
typed_profile!(EmailServerProfile, EmailServer);

/// Profile id of a profile-scoped reader, empty when unscoped
pub(crate) fn profile_id(reader: &SettingReader) -> &str {
    reader.profile_id().unwrap_or_default()
}

/// Error for a profile that cannot be built from its settings
pub(crate) fn construction_error(reader: &SettingReader, detail: impl fmt::Display) -> ConfigError {
    ConfigError::unrecoverable(
        ErrorCode::ProfileConstruction,
        format!("profile '{}': {detail}", profile_id(reader)),
    )
}

/// Read a string setting that must not be blank
pub(crate) fn required_string(reader: &SettingReader, setting: &Setting) -> Result<String> {
    let value = reader.read_setting_as_string(setting)?;
    if value.trim().is_empty() {
        return Err(construction_error(
            reader,
            format!("required setting '{}' is not configured", setting.key()),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_categories_are_profiled() {
        for definition in ProfileDefinition::all() {
            assert!(
                definition.category().has_profiles(),
                "{definition} maps to an unprofiled category"
            );
        }
    }

    #[test]
    fn test_public_people_search_shares_category() {
        assert_eq!(
            ProfileDefinition::PeopleSearch.category(),
            ProfileDefinition::PeopleSearchPublic.category()
        );
    }
}
