//! Compile-time profile factory registry

use std::sync::Arc;

use crate::profile::{
    ActivateUserProfile, ChangePasswordProfile, EmailServerProfile, ForgottenPasswordProfile,
    HelpdeskProfile, LdapProfile, NewUserProfile, PeopleSearchProfile, Profile, ProfileDefinition,
    SetupOtpProfile, UpdateAttributesProfile, construction_error,
};
use crate::reader::SettingReader;
use crate::{ConfigError, ErrorCode, Result};

/// Builds one profile from a reader scoped to its profile id
pub type ProfileFactory = fn(&SettingReader) -> Result<Profile>;

impl ProfileDefinition {
    /// Factory for this definition, `None` for definitions built elsewhere
    pub fn factory(&self) -> Option<ProfileFactory> {
        let factory: ProfileFactory = match self {
            Self::Ldap => build_ldap,
            Self::ChangePassword => build_change_password,
            Self::ForgottenPassword => build_forgotten_password,
            Self::ActivateUser => build_activate_user,
            Self::NewUser => build_new_user,
            Self::Helpdesk => build_helpdesk,
            Self::SetupOtp => build_setup_otp,
            Self::UpdateAttributes => build_update_attributes,
            Self::PeopleSearch => build_people_search,
            Self::PeopleSearchPublic => build_public_people_search,
            Self::EmailServer => build_email_server,
            Self::PasswordPolicy | Self::Challenge => return None,
        };
        Some(factory)
    }
}

/// Build a profile, reporting any failure as a construction error
pub fn build_profile(definition: ProfileDefinition, reader: &SettingReader) -> Result<Profile> {
    let factory = definition.factory().ok_or_else(|| {
        ConfigError::unrecoverable(
            ErrorCode::ProfileConstruction,
            format!("no profile factory defined for {definition}"),
        )
    })?;

    factory(reader).map_err(|e| match e {
        ConfigError::Unrecoverable { .. } => e,
        other => construction_error(reader, format!("unable to build {definition} profile: {other}")),
    })
}

fn build_ldap(reader: &SettingReader) -> Result<Profile> {
    Ok(Profile::Ldap(Arc::new(LdapProfile::from_reader(reader)?)))
}

fn build_change_password(reader: &SettingReader) -> Result<Profile> {
    Ok(Profile::ChangePassword(Arc::new(
        ChangePasswordProfile::from_reader(reader)?,
    )))
}

fn build_forgotten_password(reader: &SettingReader) -> Result<Profile> {
    Ok(Profile::ForgottenPassword(Arc::new(
        ForgottenPasswordProfile::from_reader(reader)?,
    )))
}

fn build_activate_user(reader: &SettingReader) -> Result<Profile> {
    Ok(Profile::ActivateUser(Arc::new(
        ActivateUserProfile::from_reader(reader)?,
    )))
}

fn build_new_user(reader: &SettingReader) -> Result<Profile> {
    Ok(Profile::NewUser(Arc::new(NewUserProfile::from_reader(reader)?)))
}

fn build_helpdesk(reader: &SettingReader) -> Result<Profile> {
    Ok(Profile::Helpdesk(Arc::new(HelpdeskProfile::from_reader(reader)?)))
}

fn build_setup_otp(reader: &SettingReader) -> Result<Profile> {
    Ok(Profile::SetupOtp(Arc::new(SetupOtpProfile::from_reader(reader)?)))
}

fn build_update_attributes(reader: &SettingReader) -> Result<Profile> {
    Ok(Profile::UpdateAttributes(Arc::new(
        UpdateAttributesProfile::from_reader(reader)?,
    )))
}

fn build_people_search(reader: &SettingReader) -> Result<Profile> {
    Ok(Profile::PeopleSearch(Arc::new(
        PeopleSearchProfile::from_reader(reader, false)?,
    )))
}

fn build_public_people_search(reader: &SettingReader) -> Result<Profile> {
    Ok(Profile::PeopleSearch(Arc::new(
        PeopleSearchProfile::from_reader(reader, true)?,
    )))
}

fn build_email_server(reader: &SettingReader) -> Result<Profile> {
    Ok(Profile::EmailServer(Arc::new(
        EmailServerProfile::from_reader(reader)?,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::DomainId;
    use crate::store::MemoryStore;

    #[test]
    fn test_factories_registered() {
        for definition in ProfileDefinition::all() {
            let expected = !matches!(
                definition,
                ProfileDefinition::PasswordPolicy | ProfileDefinition::Challenge
            );
            assert_eq!(definition.factory().is_some(), expected, "{definition}");
        }
    }

    #[test]
    fn test_build_without_factory_fails() {
        let reader = SettingReader::new(
            Arc::new(MemoryStore::default()),
            Some("default".into()),
            DomainId::default(),
        );
        let err = build_profile(ProfileDefinition::Challenge, &reader).unwrap_err();
        assert_eq!(err.error_code(), Some(ErrorCode::ProfileConstruction));
    }

    #[test]
    fn test_public_and_private_people_search() {
        let reader = SettingReader::new(
            Arc::new(MemoryStore::default()),
            Some("default".into()),
            DomainId::default(),
        );
        let Profile::PeopleSearch(public) =
            build_profile(ProfileDefinition::PeopleSearchPublic, &reader).unwrap()
        else {
            panic!("expected a people search profile");
        };
        assert!(public.public);
        assert_eq!(public.identifier, "default");
    }
}
