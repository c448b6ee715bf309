use crate::data::Category;
use crate::storage::{MemoryStore, Storage, StorageError, keys};
use parking_lot::RwLock;
use rand::{Rng, distributions::Alphanumeric, thread_rng};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

const MAX_SESSION_COUNT: usize = 4096;
const SESSION_ID_LEN: usize = 24;

/// The two session-scoped fields, created by the profile form and read by
/// every page for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProfile {
    pub name: String,
    pub category: Option<Category>,
}

impl SessionProfile {
    /// `None` unless a non-blank name is present. An unrecognized stored
    /// category is treated as unset.
    pub fn load(storage: &dyn Storage) -> Option<Self> {
        let name = storage.get(keys::SESSION_NAME).ok().flatten()?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return None;
        }
        let category = storage
            .get(keys::SESSION_TYPE)
            .ok()
            .flatten()
            .and_then(|raw| raw.parse::<Category>().ok());
        Some(Self { name, category })
    }

    pub fn save(&self, storage: &dyn Storage) -> Result<(), StorageError> {
        storage.set(keys::SESSION_NAME, &self.name)?;
        match self.category {
            Some(category) => storage.set(keys::SESSION_TYPE, category.as_str()),
            None => storage.remove(keys::SESSION_TYPE),
        }
    }
}

/// Raw profile-form input, before validation.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileError {
    MissingName,
    MissingCategory,
}

impl ProfileError {
    /// Inline message shown next to the form.
    pub fn message(&self) -> &'static str {
        match self {
            ProfileError::MissingName => "Please enter your name.",
            ProfileError::MissingCategory => "Please choose who you are.",
        }
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ProfileError {}

impl ProfileForm {
    /// Requires a non-blank name and a selected, recognized category radio.
    pub fn validate(&self) -> Result<SessionProfile, ProfileError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProfileError::MissingName);
        }
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or(ProfileError::MissingCategory)?
            .parse::<Category>()
            .map_err(|_| ProfileError::MissingCategory)?;
        Ok(SessionProfile {
            name: name.to_string(),
            category: Some(category),
        })
    }
}

struct SessionSlot {
    store: Arc<MemoryStore>,
    last_seen_ts: u64,
}

/// Per-session key-value stores, keyed by the session cookie id. The table
/// is capped; the least-recently-seen session is dropped to make room,
/// which is also how a session's fields die with the session.
#[derive(Default)]
pub struct SessionRegistry {
    inner: RwLock<HashMap<String, SessionSlot>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store for `id`, created on first sight.
    pub fn store(&self, id: &str) -> Arc<MemoryStore> {
        let mut guard = self.inner.write();
        if guard.len() >= MAX_SESSION_COUNT && !guard.contains_key(id) {
            if let Some(oldest) = oldest_session_key(&guard) {
                guard.remove(&oldest);
            }
        }
        let slot = guard.entry(id.to_string()).or_insert_with(|| SessionSlot {
            store: Arc::new(MemoryStore::new()),
            last_seen_ts: 0,
        });
        slot.last_seen_ts = now_ts();
        slot.store.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

fn oldest_session_key(sessions: &HashMap<String, SessionSlot>) -> Option<String> {
    sessions
        .iter()
        .min_by_key(|(_, slot)| slot.last_seen_ts)
        .map(|(key, _)| key.clone())
}

fn now_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

pub fn generate_session_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_ID_LEN)
        .map(char::from)
        .collect()
}

/// A session id is only trusted if it looks like one we minted.
pub fn is_valid_session_id(id: &str) -> bool {
    id.len() == SESSION_ID_LEN && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_round_trips_through_session_storage() {
        let store = MemoryStore::new();
        let profile = SessionProfile {
            name: "Maya".into(),
            category: Some(Category::Graduate),
        };
        profile.save(&store).unwrap();
        assert_eq!(SessionProfile::load(&store), Some(profile));
        assert_eq!(
            store.get(keys::SESSION_TYPE).unwrap().as_deref(),
            Some("graduate")
        );
    }

    #[test]
    fn load_requires_a_name() {
        let store = MemoryStore::new();
        store.set(keys::SESSION_TYPE, "student").unwrap();
        assert_eq!(SessionProfile::load(&store), None);
        store.set(keys::SESSION_NAME, "   ").unwrap();
        assert_eq!(SessionProfile::load(&store), None);
    }

    #[test]
    fn load_treats_unknown_category_as_unset() {
        let store = MemoryStore::new();
        store.set(keys::SESSION_NAME, "Ira").unwrap();
        store.set(keys::SESSION_TYPE, "wizard").unwrap();
        let profile = SessionProfile::load(&store).unwrap();
        assert_eq!(profile.category, None);
    }

    #[test]
    fn form_validation_covers_both_failure_modes() {
        let missing_name = ProfileForm {
            name: "  ".into(),
            category: Some("student".into()),
        };
        assert_eq!(missing_name.validate(), Err(ProfileError::MissingName));

        let missing_category = ProfileForm {
            name: "Ira".into(),
            category: None,
        };
        assert_eq!(
            missing_category.validate(),
            Err(ProfileError::MissingCategory)
        );

        let unknown_category = ProfileForm {
            name: "Ira".into(),
            category: Some("wizard".into()),
        };
        assert_eq!(
            unknown_category.validate(),
            Err(ProfileError::MissingCategory)
        );
    }

    #[test]
    fn form_validation_trims_and_parses() {
        let form = ProfileForm {
            name: "  Maya  ".into(),
            category: Some(" Professional ".into()),
        };
        let profile = form.validate().unwrap();
        assert_eq!(profile.name, "Maya");
        assert_eq!(profile.category, Some(Category::Professional));
    }

    #[test]
    fn registry_returns_the_same_store_per_id() {
        let registry = SessionRegistry::new();
        let id = generate_session_id();
        registry
            .store(&id)
            .set(keys::SESSION_NAME, "Maya")
            .unwrap();
        assert_eq!(
            registry.store(&id).get(keys::SESSION_NAME).unwrap().as_deref(),
            Some("Maya")
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_prunes_at_the_session_cap() {
        let registry = SessionRegistry::new();
        for idx in 0..MAX_SESSION_COUNT {
            registry.store(&format!("session-{idx:04}"));
        }
        assert_eq!(registry.len(), MAX_SESSION_COUNT);
        registry.store("one-more");
        assert_eq!(registry.len(), MAX_SESSION_COUNT);
    }

    #[test]
    fn session_ids_are_alphanumeric_and_fixed_length() {
        let id = generate_session_id();
        assert!(is_valid_session_id(&id));
        assert!(!is_valid_session_id("short"));
        assert!(!is_valid_session_id("invalid-session-id-here!"));
    }
}
