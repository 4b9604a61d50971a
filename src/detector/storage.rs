use super::fingerprint::{find_unique, Fingerprints};
use crate::{
    config::ModelConfig,
    file_model::{self, ModelFileError},
    model::{LanguageProfiles, ProfileTable},
};
use ::core::sync::atomic::{AtomicU64, Ordering};
use ::std::{fmt, path::Path, sync::Arc};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};

pub(super) struct Models {
    pub(super) profiles: LanguageProfiles,
    pub(super) fingerprints: Arc<Fingerprints>,
}

impl Models {
    fn new(profiles: LanguageProfiles) -> Self {
        let fingerprints = Arc::new(find_unique(profiles.char_profiles()));
        Self {
            profiles,
            fingerprints,
        }
    }
}

/// Reference profiles, with the fingerprint table
/// recomputed on every profiles change
pub struct ModelsStorage {
    models: RwLock<Models>,
    version: AtomicU64,
}

impl fmt::Debug for ModelsStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelsStorage")
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}

impl Default for ModelsStorage {
    #[inline]
    fn default() -> Self {
        Self::new(LanguageProfiles::default())
    }
}

impl ModelsStorage {
    #[inline]
    pub fn new(profiles: LanguageProfiles) -> Self {
        Self {
            models: RwLock::new(Models::new(profiles)),
            version: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn from_tables(word_profiles: ProfileTable, char_profiles: ProfileTable) -> Self {
        Self::new(LanguageProfiles::from_tables(word_profiles, char_profiles))
    }

    /// Loads `dict_word.json` and `dict_character.json` (or their `.br` versions) from `dir`
    #[inline]
    pub fn load(dir: &Path) -> Result<Self, ModelFileError> {
        file_model::load_profiles(dir).map(Self::new)
    }

    /// Loads from `config.output_path`
    #[inline]
    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelFileError> {
        Self::load(&config.output_path)
    }

    pub fn save(&self, dir: &Path, compress: bool) -> Result<(), ModelFileError> {
        let profiles = self.profiles().clone();
        file_model::save_profiles(profiles, dir, compress)
    }

    #[inline]
    pub fn profiles(&self) -> MappedRwLockReadGuard<'_, LanguageProfiles> {
        RwLockReadGuard::map(self.models.read(), |models| &models.profiles)
    }

    #[inline]
    pub(super) fn models(&self) -> RwLockReadGuard<'_, Models> {
        self.models.read()
    }

    /// Changes the profiles and recomputes the fingerprint table
    /// before the write lock is released
    pub fn update<R>(&self, f: impl FnOnce(&mut LanguageProfiles) -> R) -> R {
        let mut models = self.models.write();
        let res = f(&mut models.profiles);
        let fingerprints = find_unique(models.profiles.char_profiles());
        models.fingerprints = Arc::new(fingerprints);
        let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!("Fingerprints recomputed for profiles version {version}");
        res
    }

    #[inline]
    pub fn replace(&self, profiles: LanguageProfiles) {
        self.update(|p| *p = profiles);
    }

    /// Incremented on every profiles update
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    #[inline]
    pub fn fingerprints(&self) -> Arc<Fingerprints> {
        self.models.read().fingerprints.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{distribution::Distribution, model::LanguageProfile};

    fn char_table() -> ProfileTable {
        [
            ("en".into(), Distribution::from_counts([("a", 1), ("w", 1)])),
            ("fr".into(), Distribution::from_counts([("a", 1), ("é", 1)])),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_fingerprints_cached() {
        let storage = ModelsStorage::from_tables(ProfileTable::new(), char_table());
        let first = storage.fingerprints();
        let second = storage.fingerprints();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(storage.version(), 0);
        assert!(first.get("en").unwrap().contains(&'w'));
    }

    #[test]
    fn test_fingerprints_recomputed_after_update() {
        let storage = ModelsStorage::from_tables(ProfileTable::new(), char_table());
        let before = storage.fingerprints();

        storage.update(|profiles| {
            profiles.insert(
                "pl",
                LanguageProfile {
                    word: None,
                    character: Distribution::from_counts([("w", 1), ("ł", 1)]),
                },
            )
        });
        assert_eq!(storage.version(), 1);

        let after = storage.fingerprints();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(after.get("en").unwrap().is_empty());
        assert!(after.get("pl").unwrap().contains(&'ł'));
        assert!(Arc::ptr_eq(&after, &storage.fingerprints()));
    }

    #[test]
    fn test_replace() {
        let storage = ModelsStorage::default();
        assert!(storage.fingerprints().is_empty());
        storage.replace(LanguageProfiles::from_tables(ProfileTable::new(), char_table()));
        assert_eq!(storage.fingerprints().len(), 2);
        assert_eq!(storage.profiles().len(), 2);
    }

    #[test]
    fn test_debug_inside_update() {
        let storage = ModelsStorage::from_tables(ProfileTable::new(), char_table());
        let debug = storage.update(|profiles| {
            profiles.remove("fr");
            format!("{storage:?}")
        });
        assert_eq!(debug, "ModelsStorage { version: 0, .. }");
        assert_eq!(format!("{storage:?}"), "ModelsStorage { version: 1, .. }");
    }

    #[cfg(not(target_family = "wasm"))]
    #[test]
    fn test_parallel_reads() {
        use rayon::prelude::*;

        let storage = ModelsStorage::from_tables(ProfileTable::new(), char_table());
        let first = storage.fingerprints();
        let all_cached = (0..64)
            .into_par_iter()
            .all(|_| Arc::ptr_eq(&first, &storage.fingerprints()));
        assert!(all_cached);
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ModelsStorage::from_tables(char_table(), char_table());
        storage.save(dir.path(), false).unwrap();

        let config = ModelConfig::new().output_path(dir.path());
        let loaded = ModelsStorage::from_config(&config).unwrap();
        assert_eq!(*loaded.profiles(), *storage.profiles());
        assert_eq!(*loaded.fingerprints(), *storage.fingerprints());
    }
}
