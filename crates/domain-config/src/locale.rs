//! Locale tags and best-match resolution

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized locale tag such as `en`, `en_US` or the root locale `""`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// The root locale, used for default values
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parse a locale tag, accepting `-` or `_` separators
    ///
    /// Language is lowercased and country uppercased; any variant is kept as is.
    pub fn parse(tag: &str) -> Self {
        let mut parts = tag.trim().split(['_', '-']).filter(|p| !p.is_empty());
        let Some(language) = parts.next() else {
            return Self::root();
        };

        let mut normalized = language.to_lowercase();
        if let Some(country) = parts.next() {
            normalized.push('_');
            normalized.push_str(&country.to_uppercase());
        }
        for variant in parts {
            normalized.push('_');
            normalized.push_str(variant);
        }
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn language(&self) -> &str {
        self.0.split('_').next().unwrap_or_default()
    }

    pub fn country(&self) -> Option<&str> {
        self.0.split('_').nth(1)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

/// Display text bundle that stored configuration can override per key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocaleBundle {
    Display,
    Error,
    Message,
    Config,
    Admin,
}

impl LocaleBundle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Display => "Display",
            Self::Error => "Error",
            Self::Message => "Message",
            Self::Config => "Config",
            Self::Admin => "Admin",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        [
            Self::Display,
            Self::Error,
            Self::Message,
            Self::Config,
            Self::Admin,
        ]
        .into_iter()
        .find(|bundle| bundle.as_str() == name)
    }
}

impl fmt::Display for LocaleBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the best available locale for `desired`
///
/// Order: exact match, bare language, any locale sharing the language, root.
pub fn resolve<'a, I>(desired: &Locale, available: I) -> Option<&'a Locale>
where
    I: IntoIterator<Item = &'a Locale>,
    I::IntoIter: Clone,
{
    let available = available.into_iter();

    if let Some(exact) = available.clone().find(|l| *l == desired) {
        return Some(exact);
    }

    let language = desired.language();
    if !language.is_empty() {
        if let Some(bare) = available.clone().find(|l| l.as_str() == language) {
            return Some(bare);
        }
        if let Some(same_language) = available.clone().find(|l| l.language() == language) {
            return Some(same_language);
        }
    }

    available.clone().find(|l| l.is_root())
}

/// Look up the best matching entry of a map keyed by raw locale tags
pub fn select<'a, V>(values: &'a IndexMap<String, V>, desired: &Locale) -> Option<&'a V> {
    let parsed: Vec<(Locale, &V)> = values.iter().map(|(k, v)| (Locale::parse(k), v)).collect();
    let matched = resolve(desired, parsed.iter().map(|(locale, _)| locale))?;
    parsed
        .iter()
        .find(|(locale, _)| locale == matched)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(Locale::parse("en-us").as_str(), "en_US");
        assert_eq!(Locale::parse("DE").as_str(), "de");
        assert_eq!(Locale::parse("").as_str(), "");
        assert!(Locale::parse("  ").is_root());
        assert_eq!(Locale::parse("en_US").country(), Some("US"));
    }

    #[test]
    fn test_resolve_order() {
        let available = [Locale::root(), Locale::parse("en"), Locale::parse("de_AT")];

        assert_eq!(
            resolve(&Locale::parse("en_GB"), available.iter()),
            Some(&available[1])
        );
        assert_eq!(
            resolve(&Locale::parse("de"), available.iter()),
            Some(&available[2])
        );
        assert_eq!(
            resolve(&Locale::parse("fr"), available.iter()),
            Some(&available[0])
        );
    }

    #[test]
    fn test_resolve_without_root() {
        let available = [Locale::parse("en")];
        assert_eq!(resolve(&Locale::parse("fr"), available.iter()), None);
    }

    #[test]
    fn test_select_from_map() {
        let mut values = IndexMap::new();
        values.insert(String::new(), "default".to_string());
        values.insert("fr".to_string(), "bonjour".to_string());

        assert_eq!(select(&values, &Locale::parse("fr_CA")).unwrap(), "bonjour");
        assert_eq!(select(&values, &Locale::parse("es")).unwrap(), "default");
    }
}
