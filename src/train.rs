use crate::{
    config::ModelConfig,
    distribution::TokenCounts,
    model::{LanguageProfiles, ProfileTable},
    profile::count_tokens,
    script::CharFilter,
    token_mode::{InvalidModeError, TokenMode},
};
use ::std::collections::hash_map::Entry;
use ahash::AHashMap;
use compact_str::CompactString;
use serde::Deserialize;

/// Labeled training text
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Sample {
    #[serde(alias = "labels")]
    pub label: CompactString,
    pub text: String,
}

impl Sample {
    #[inline]
    pub fn new(label: impl Into<CompactString>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Default)]
struct TrainingCounts(AHashMap<CompactString, TokenCounts>);

impl TrainingCounts {
    fn merge(mut self, other: Self) -> Self {
        for (language, counts) in other.0 {
            match self.0.entry(language) {
                Entry::Occupied(e) => e.into_mut().merge(counts),
                Entry::Vacant(e) => {
                    e.insert(counts);
                }
            }
        }
        self
    }
}

/// Builds per language reference distributions from a labeled corpus
#[derive(Clone, Debug)]
pub struct ModelBuilder {
    config: ModelConfig,
    filter: CharFilter,
}

impl Default for ModelBuilder {
    #[inline]
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl ModelBuilder {
    pub fn new(config: ModelConfig) -> Self {
        let filter = CharFilter::new(config.scripts.iter().copied());
        Self { config, filter }
    }

    #[inline]
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn count_sample(&self, counts: &mut TrainingCounts, label: &str, text: &str, mode: TokenMode) {
        if mode == TokenMode::Word && self.config.is_excluded(label) {
            return;
        }

        let language_counts = counts.0.entry(CompactString::new(label)).or_default();
        match mode {
            TokenMode::Word => count_tokens(text, mode, &self.filter, language_counts),
            TokenMode::Character => {
                count_tokens(&text.to_lowercase(), mode, &self.filter, language_counts)
            }
        }
    }

    #[cfg(not(target_family = "wasm"))]
    fn count(&self, corpus: &[Sample], mode: TokenMode) -> TrainingCounts {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

        corpus
            .par_iter()
            .fold(TrainingCounts::default, |mut counts, sample| {
                self.count_sample(&mut counts, &sample.label, &sample.text, mode);
                counts
            })
            .reduce(TrainingCounts::default, TrainingCounts::merge)
    }

    #[cfg(target_family = "wasm")]
    #[inline]
    fn count(&self, corpus: &[Sample], mode: TokenMode) -> TrainingCounts {
        self.count_iter(
            corpus
                .iter()
                .map(|s| (s.label.as_str(), s.text.as_str())),
            mode,
        )
    }

    fn count_iter<'s>(
        &self,
        corpus: impl IntoIterator<Item = (&'s str, &'s str)>,
        mode: TokenMode,
    ) -> TrainingCounts {
        let mut counts = TrainingCounts::default();
        for (label, text) in corpus {
            self.count_sample(&mut counts, label, text, mode);
        }
        counts
    }

    fn normalize(&self, counts: TrainingCounts, mode: TokenMode) -> ProfileTable {
        let mut table = ProfileTable::new();
        for (language, mut language_counts) in counts.0 {
            let total = language_counts.total();
            let distinct = language_counts.len();
            if mode == TokenMode::Word {
                language_counts.prune(self.config.frequency_threshold);
            }

            let distribution = language_counts.into_distribution();
            tracing::debug!(
                "{language} {mode} model: {total} tokens, {distinct} distinct, {} kept",
                distribution.len()
            );

            if mode == TokenMode::Word && distribution.is_empty() {
                tracing::warn!("{language} has no words left, word model skipped");
                continue;
            }
            table.insert(language, distribution);
        }
        table
    }

    /// Counts the corpus in parallel shards, then merges them
    pub fn build(&self, corpus: &[Sample], mode: TokenMode) -> ProfileTable {
        let counts = self.count(corpus, mode);
        self.normalize(counts, mode)
    }

    /// Single pass over `(label, text)` pairs
    pub fn build_from_iter<'s>(
        &self,
        corpus: impl IntoIterator<Item = (&'s str, &'s str)>,
        mode: TokenMode,
    ) -> ProfileTable {
        let counts = self.count_iter(corpus, mode);
        self.normalize(counts, mode)
    }

    #[inline]
    pub fn build_by_mode_name(
        &self,
        corpus: &[Sample],
        mode: &str,
    ) -> Result<ProfileTable, InvalidModeError> {
        Ok(self.build(corpus, mode.parse()?))
    }

    /// Word and character tables of the corpus
    pub fn build_profiles(&self, corpus: &[Sample]) -> LanguageProfiles {
        let word_profiles = self.build(corpus, TokenMode::Word);
        let char_profiles = self.build(corpus, TokenMode::Character);
        tracing::debug!(
            "Built {} word models and {} character models",
            word_profiles.len(),
            char_profiles.len()
        );
        LanguageProfiles::from_tables(word_profiles, char_profiles)
    }
}
