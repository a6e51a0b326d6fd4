//! Compute-once slots for derived values
//!
//! The store behind a facade never changes, so a slot is filled at most once
//! and never invalidated. Concurrent first readers wait on the slot's init
//! guard and all observe the single computed value. A failed computation
//! leaves the slot empty; the next caller recomputes.

use dashmap::DashMap;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

use crate::Result;
use crate::locale::Locale;
use crate::profile::{LdapProfile, PasswordPolicy, Profile, ProfileDefinition, ProfileMap};
use crate::security_key::SecurityKey;

// =============================================================================
// Lazy Slot
// =============================================================================

/// A value computed at most once, on first access
pub struct LazySlot<T> {
    value: OnceLock<T>,
    init: Mutex<()>,
}

impl<T> LazySlot<T> {
    pub fn new() -> Self {
        Self {
            value: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// The value, if already computed
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    /// The value, computing it with `init` if this is the first access
    ///
    /// Only one caller runs `init` at a time; an error is returned to that
    /// caller and nothing is stored.
    pub fn get_or_try_init<F>(&self, init: F) -> Result<&T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let _guard = self.init.lock();
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let computed = init()?;
        Ok(self.value.get_or_init(|| computed))
    }
}

impl<T> Default for LazySlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for LazySlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LazySlot").field(&self.value.get()).finish()
    }
}

// =============================================================================
// Keyed Slots
// =============================================================================

/// One [`LazySlot`] per key
///
/// The map shard lock is only held while the slot is looked up, never while
/// a value is being computed.
pub struct KeyedSlots<K, V> {
    slots: DashMap<K, Arc<LazySlot<V>>>,
}

impl<K, V> KeyedSlots<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    pub fn get_or_try_init<F>(&self, key: K, init: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        let slot = Arc::clone(self.slots.entry(key).or_default().value());
        slot.get_or_try_init(init).cloned()
    }

    /// Number of keys holding a computed value
    pub fn computed(&self) -> usize {
        self.slots
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }
}

impl<K, V> Default for KeyedSlots<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Derived Value Cache
// =============================================================================

/// Locale to text overrides of one bundle key
pub type LocalizedText = IndexMap<Locale, String>;

/// Every derived value a facade memoizes
#[derive(Default)]
pub struct DerivedValueCache {
    pub(crate) enabled_ldap_profiles: LazySlot<Arc<ProfileMap<LdapProfile>>>,
    pub(crate) security_key: LazySlot<Arc<SecurityKey>>,
    /// Generated key string, set at most once when no key is configured
    pub(crate) ephemeral_key_value: OnceLock<String>,
    pub(crate) password_policies: KeyedSlots<(String, Locale), Arc<PasswordPolicy>>,
    /// `None` records a bundle key without overrides
    pub(crate) localized_text: KeyedSlots<String, Option<Arc<LocalizedText>>>,
    pub(crate) profile_maps: KeyedSlots<ProfileDefinition, Arc<IndexMap<String, Profile>>>,
    pub(crate) configuration_hash: LazySlot<String>,
}

impl DerivedValueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts of computed entries, for debug output
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            password_policies: self.password_policies.computed(),
            localized_text: self.localized_text.computed(),
            profile_maps: self.profile_maps.computed(),
            security_key: self.security_key.get().is_some(),
        }
    }
}

/// Snapshot of how much of a [`DerivedValueCache`] has been filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub password_policies: usize,
    pub localized_text: usize,
    pub profile_maps: usize,
    pub security_key: bool,
}
