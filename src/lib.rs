//! # Natural language detection by token frequencies
//!
//! Reference word and character distributions are built per language from a labeled corpus.
//! A text is detected by a character unique to one language,
//! or else by the least Kullback-Leibler divergence of its words from a language word model.
//!
//! Supported scripts are listed in [`ScriptClass`](enum.ScriptClass.html).
//!
//! # Example
//! ```rust
//! use langfreq::{DetectorBuilder, ModelBuilder, ModelConfig, ModelsStorage, Sample};
//!
//! let corpus = [
//!     Sample::new("en", "the cat sat on the mat"),
//!     Sample::new("fr", "le chat est sur le tapis"),
//!     Sample::new("ja", "猫はマットの上に座った"),
//! ];
//! let model_builder = ModelBuilder::new(ModelConfig::new().frequency_threshold(0.0));
//! let models_storage = ModelsStorage::new(model_builder.build_profiles(&corpus));
//! let detector = DetectorBuilder::new(&models_storage).build();
//!
//! // single thread
//! assert_eq!(detector.detect("the cat").unwrap(), "en");
//! assert_eq!(detector.detect("猫").unwrap(), "ja");
//!
//! // or multithreaded (rayon for example)
//! use rayon::iter::IntoParallelRefIterator;
//! use rayon::iter::ParallelIterator;
//!
//! let texts = &["le chat", "the mat"];
//! let results: Vec<_> = texts
//!     .par_iter()
//!     .map(|text| detector.detect(text))
//!     .collect();
//! ```
//! Models are saved and loaded with [`ModelsStorage::save`](struct.ModelsStorage.html#method.save)
//! and [`ModelsStorage::load`](struct.ModelsStorage.html#method.load).

#[allow(unused_macros)]
macro_rules! ahashmap {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(ahashmap!(@single $rest)),*]));

    ($($key:expr => $value:expr,)+) => { ahashmap!($($key => $value),+) };
    ($($key:expr => $value:expr),*) => {
        {
            let _cap = ahashmap!(@count $($key),*);
            let mut _map = ::ahash::AHashMap::with_capacity(_cap);
            $(
                let _ = _map.insert($key, $value);
            )*
            _map.into()
        }
    };
}

#[allow(unused_macros)]
macro_rules! ahashset {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(ahashset!(@single $rest)),*]));

    ($($key:expr,)+) => { ahashset!($($key),+) };
    ($($key:expr),*) => {
        {
            let _cap = ahashset!(@count $($key),*);
            let mut _set = ::ahash::AHashSet::with_capacity(_cap);
            $(
                let _ = _set.insert($key);
            )*
            _set.into()
        }
    };
}

pub mod config;
mod detector;
pub mod distribution;
pub mod divergence;
pub mod file_model;
pub mod model;
pub mod profile;
pub mod script;
mod token_mode;
pub mod train;

pub use config::{ConfigError, ModelConfig};
pub use detector::{
    detect_language,
    fingerprint::{find_unique, Fingerprint, Fingerprints},
    DetectionError, Detector, DetectorBuilder, ModelsStorage,
};
pub use distribution::{Distribution, DistributionError, TokenCounts};
pub use file_model::ModelFileError;
pub use model::{LanguageProfile, LanguageProfiles, ProfileTable};
pub use profile::{profile, profile_by_name};
pub use script::{CharFilter, ScriptClass, ScriptClasses, ScriptClassesTrait};
pub use token_mode::{InvalidModeError, TokenMode};
pub use train::{ModelBuilder, Sample};
