//! Profiles for the end-user and helpdesk modules
//!
//! Each profile selects the users it applies to through `query_match` and
//! carries the forms and actions of its module.

use indexmap::IndexSet;

use crate::options::{MessageSendMethod, RecoveryVerificationMethod};
use crate::profile::{construction_error, profile_id, required_string};
use crate::reader::SettingReader;
use crate::setting::Setting;
use crate::value::{ActionConfiguration, FormConfiguration, UserPermission};
use crate::Result;

#[derive(Debug, Clone)]
pub struct ChangePasswordProfile {
    pub identifier: String,
    pub query_match: Vec<UserPermission>,
    pub require_current_password: bool,
    pub write_attributes: Vec<ActionConfiguration>,
}

impl ChangePasswordProfile {
    pub fn from_reader(reader: &SettingReader) -> Result<Self> {
        Ok(Self {
            identifier: profile_id(reader).to_string(),
            query_match: reader
                .read_setting_as_user_permissions(&Setting::CHANGE_PASSWORD_QUERY_MATCH)?,
            require_current_password: reader
                .read_setting_as_boolean(&Setting::CHANGE_PASSWORD_REQUIRE_CURRENT)?,
            write_attributes: reader
                .read_setting_as_actions(&Setting::CHANGE_PASSWORD_WRITE_ATTRIBUTES)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ForgottenPasswordProfile {
    pub identifier: String,
    pub query_match: Vec<UserPermission>,
    pub search_form: Vec<FormConfiguration>,
    pub verification_methods: IndexSet<RecoveryVerificationMethod>,
    pub token_send_method: MessageSendMethod,
}

impl ForgottenPasswordProfile {
    /// Build from a profile-scoped reader
    ///
    /// A deprecated token send method fails the build; an unknown one falls
    /// back to email.
    pub fn from_reader(reader: &SettingReader) -> Result<Self> {
        let verification_methods: IndexSet<RecoveryVerificationMethod> =
            reader.read_setting_as_option_list(&Setting::RECOVERY_VERIFICATION_METHODS)?;
        if verification_methods.is_empty() {
            return Err(construction_error(
                reader,
                "no usable recovery verification method is configured",
            ));
        }

        let token_send_method = reader
            .read_setting_as_enum::<MessageSendMethod>(&Setting::RECOVERY_TOKEN_SEND_METHOD)?
            .unwrap_or(MessageSendMethod::EmailOnly);
        token_send_method.ensure_supported(&Setting::RECOVERY_TOKEN_SEND_METHOD, reader.profile_id())?;

        Ok(Self {
            identifier: profile_id(reader).to_string(),
            query_match: reader.read_setting_as_user_permissions(&Setting::RECOVERY_QUERY_MATCH)?,
            search_form: reader.read_setting_as_form(&Setting::RECOVERY_SEARCH_FORM)?,
            verification_methods,
            token_send_method,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ActivateUserProfile {
    pub identifier: String,
    pub query_match: Vec<UserPermission>,
    pub form: Vec<FormConfiguration>,
    pub post_write_attributes: Vec<ActionConfiguration>,
}

impl ActivateUserProfile {
    pub fn from_reader(reader: &SettingReader) -> Result<Self> {
        Ok(Self {
            identifier: profile_id(reader).to_string(),
            query_match: reader
                .read_setting_as_user_permissions(&Setting::ACTIVATE_USER_QUERY_MATCH)?,
            form: reader.read_setting_as_form(&Setting::ACTIVATE_USER_FORM)?,
            post_write_attributes: reader
                .read_setting_as_actions(&Setting::ACTIVATE_USER_POST_WRITE_ATTRIBUTES)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewUserProfile {
    pub identifier: String,
    pub form: Vec<FormConfiguration>,
    /// Directory container new entries are created in
    pub create_context: String,
    /// Directory profile new users are written to, empty for the default one
    pub ldap_profile: String,
    pub write_attributes: Vec<ActionConfiguration>,
}

impl NewUserProfile {
    pub fn from_reader(reader: &SettingReader) -> Result<Self> {
        Ok(Self {
            identifier: profile_id(reader).to_string(),
            form: reader.read_setting_as_form(&Setting::NEW_USER_FORM)?,
            create_context: required_string(reader, &Setting::NEW_USER_CONTEXT)?,
            ldap_profile: reader.read_setting_as_string(&Setting::NEW_USER_LDAP_PROFILE)?,
            write_attributes: reader.read_setting_as_actions(&Setting::NEW_USER_WRITE_ATTRIBUTES)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct HelpdeskProfile {
    pub identifier: String,
    pub query_match: Vec<UserPermission>,
    pub search_form: Vec<FormConfiguration>,
    pub actions: Vec<ActionConfiguration>,
}

impl HelpdeskProfile {
    pub fn from_reader(reader: &SettingReader) -> Result<Self> {
        Ok(Self {
            identifier: profile_id(reader).to_string(),
            query_match: reader.read_setting_as_user_permissions(&Setting::HELPDESK_QUERY_MATCH)?,
            search_form: reader.read_setting_as_form(&Setting::HELPDESK_SEARCH_FORM)?,
            actions: reader.read_setting_as_actions(&Setting::HELPDESK_ACTIONS)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SetupOtpProfile {
    pub identifier: String,
    pub query_match: Vec<UserPermission>,
    pub force_setup: bool,
}

impl SetupOtpProfile {
    pub fn from_reader(reader: &SettingReader) -> Result<Self> {
        Ok(Self {
            identifier: profile_id(reader).to_string(),
            query_match: reader.read_setting_as_user_permissions(&Setting::SETUP_OTP_QUERY_MATCH)?,
            force_setup: reader.read_setting_as_boolean(&Setting::SETUP_OTP_FORCE_SETUP)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct UpdateAttributesProfile {
    pub identifier: String,
    pub query_match: Vec<UserPermission>,
    pub form: Vec<FormConfiguration>,
    pub write_attributes: Vec<ActionConfiguration>,
}

impl UpdateAttributesProfile {
    pub fn from_reader(reader: &SettingReader) -> Result<Self> {
        Ok(Self {
            identifier: profile_id(reader).to_string(),
            query_match: reader
                .read_setting_as_user_permissions(&Setting::UPDATE_ATTRIBUTES_QUERY_MATCH)?,
            form: reader.read_setting_as_form(&Setting::UPDATE_ATTRIBUTES_FORM)?,
            write_attributes: reader
                .read_setting_as_actions(&Setting::UPDATE_ATTRIBUTES_WRITE_ATTRIBUTES)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PeopleSearchProfile {
    pub identifier: String,
    /// Built for unauthenticated use
    pub public: bool,
    pub query_match: Vec<UserPermission>,
    pub search_form: Vec<FormConfiguration>,
    pub result_form: Vec<FormConfiguration>,
    pub max_results: usize,
}

impl PeopleSearchProfile {
    pub fn from_reader(reader: &SettingReader, public: bool) -> Result<Self> {
        let max_results = reader.read_setting_as_long(&Setting::PEOPLE_SEARCH_MAX_RESULTS)?;
        Ok(Self {
            identifier: profile_id(reader).to_string(),
            public,
            // Public searches are not tied to an authenticated user
            query_match: if public {
                Vec::new()
            } else {
                reader.read_setting_as_user_permissions(&Setting::PEOPLE_SEARCH_QUERY_MATCH)?
            },
            search_form: reader.read_setting_as_form(&Setting::PEOPLE_SEARCH_SEARCH_FORM)?,
            result_form: reader.read_setting_as_form(&Setting::PEOPLE_SEARCH_RESULT_FORM)?,
            max_results: usize::try_from(max_results).unwrap_or_default(),
        })
    }
}
