use crate::script::{ScriptClass, ScriptClasses, ScriptClassesTrait};
use ::std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};
use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const DEFAULT_FREQUENCY_THRESHOLD: f64 = 0.0002;

/// Languages written without word separating spaces (or otherwise poorly split),
/// which get no word model by default
pub const DEFAULT_EXCLUDED_LANGUAGES: &[&str] = &["ja", "ar", "th", "zh", "ur", "ru"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config read error")]
    Read(#[source] io::Error),
    #[error("Config parse error")]
    Parse(#[from] serde_json::Error),
}

/// Training and model location settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Labeled training corpus
    pub corpus_path: PathBuf,
    /// Directory of the reference tables
    pub output_path: PathBuf,
    /// Minimal relative frequency of a kept word, `0.0` disables pruning
    pub frequency_threshold: f64,
    /// Languages without a word model
    pub excluded_languages: BTreeSet<CompactString>,
    #[serde(
        serialize_with = "serialize_scripts",
        deserialize_with = "deserialize_scripts"
    )]
    pub scripts: ScriptClasses,
    /// Brotli compress written tables
    pub compress: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("train.csv"),
            output_path: PathBuf::from("."),
            frequency_threshold: DEFAULT_FREQUENCY_THRESHOLD,
            excluded_languages: DEFAULT_EXCLUDED_LANGUAGES
                .iter()
                .map(|&l| l.into())
                .collect(),
            scripts: ScriptClasses::all(),
            compress: false,
        }
    }
}

impl ModelConfig {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(serde_json::from_str(&content)?)
    }

    #[inline]
    pub fn corpus_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.corpus_path = path.into();
        self
    }

    #[inline]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    #[inline]
    pub fn frequency_threshold(mut self, threshold: f64) -> Self {
        self.frequency_threshold = threshold;
        self
    }

    #[inline]
    pub fn excluded_languages<L: Into<CompactString>>(
        mut self,
        languages: impl IntoIterator<Item = L>,
    ) -> Self {
        self.excluded_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn scripts(mut self, scripts: impl Iterator<Item = ScriptClass>) -> Self {
        self.scripts = ScriptClasses::new_merged(scripts);
        self
    }

    #[inline]
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    #[inline]
    pub fn is_excluded(&self, language: &str) -> bool {
        self.excluded_languages.contains(language)
    }
}

fn serialize_scripts<S: Serializer>(scripts: &ScriptClasses, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(scripts.iter().map(|s| s.into_str()))
}

/// Unknown names are ignored
fn deserialize_scripts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ScriptClasses, D::Error> {
    let names = Vec::<String>::deserialize(deserializer)?;
    Ok(ScriptClasses::from_names(names.iter().map(String::as_str)))
}
