//! Challenge (security question) profile
//!
//! Challenge sets are handed to callers that edit question text, so a new
//! instance is built on every lookup and none is cached.

use crate::locale::Locale;
use crate::profile::{construction_error, profile_id};
use crate::reader::SettingReader;
use crate::setting::Setting;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeProfile {
    pub profile_id: String,
    pub locale: Locale,
    pub required_challenges: Vec<String>,
    pub random_challenges: Vec<String>,
    pub min_random_required: usize,
}

impl ChallengeProfile {
    pub fn from_reader(reader: &SettingReader, locale: &Locale) -> Result<Self> {
        let random_challenges = reader
            .read_setting_as_localized_string_array(&Setting::CHALLENGE_RANDOM_CHALLENGES, locale)?;
        let min_random = reader.read_setting_as_long(&Setting::CHALLENGE_MIN_RANDOM_REQUIRED)?;

        let min_random_required = usize::try_from(min_random)
            .ok()
            .filter(|count| *count <= random_challenges.len())
            .ok_or_else(|| {
                construction_error(
                    reader,
                    format!(
                        "requires {min_random} random challenges but {} are defined",
                        random_challenges.len()
                    ),
                )
            })?;

        Ok(Self {
            profile_id: profile_id(reader).to_string(),
            locale: locale.clone(),
            required_challenges: reader.read_setting_as_localized_string_array(
                &Setting::CHALLENGE_REQUIRED_CHALLENGES,
                locale,
            )?,
            random_challenges,
            min_random_required,
        })
    }

    /// Number of answers a user has to give
    pub fn minimum_responses(&self) -> usize {
        self.required_challenges.len() + self.min_random_required
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::DomainId;
    use crate::store::MemoryStore;
    use crate::value::StoredValue;
    use indexmap::IndexMap;
    use std::sync::Arc;

    fn questions(entries: &[(&str, &[&str])]) -> StoredValue {
        let map: IndexMap<String, Vec<String>> = entries
            .iter()
            .map(|(locale, qs)| (locale.to_string(), qs.iter().map(|q| q.to_string()).collect()))
            .collect();
        StoredValue::LocalizedStringArray(map)
    }

    #[test]
    fn test_localized_challenges() {
        let store = MemoryStore::builder()
            .profile_setting(
                Setting::CHALLENGE_RANDOM_CHALLENGES,
                "default",
                questions(&[
                    ("", &["First pet?", "Favorite color?"]),
                    ("de", &["Erstes Haustier?", "Lieblingsfarbe?"]),
                ]),
            )
            .profile_setting(
                Setting::CHALLENGE_MIN_RANDOM_REQUIRED,
                "default",
                StoredValue::Numeric(1),
            )
            .build()
            .unwrap();
        let reader = SettingReader::new(Arc::new(store), Some("default".into()), DomainId::default());

        let profile = ChallengeProfile::from_reader(&reader, &Locale::parse("de_CH")).unwrap();
        assert_eq!(profile.random_challenges[0], "Erstes Haustier?");
        assert_eq!(profile.minimum_responses(), 1);
    }

    #[test]
    fn test_more_random_required_than_defined() {
        let store = MemoryStore::builder()
            .profile_setting(
                Setting::CHALLENGE_MIN_RANDOM_REQUIRED,
                "default",
                StoredValue::Numeric(3),
            )
            .build()
            .unwrap();
        let reader = SettingReader::new(Arc::new(store), Some("default".into()), DomainId::default());

        assert!(ChallengeProfile::from_reader(&reader, &Locale::root()).is_err());
    }
}
