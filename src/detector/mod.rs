use crate::{
    distribution::Distribution,
    divergence::divergence,
    model::ProfileTable,
    profile::profile,
    script::CharFilter,
    token_mode::TokenMode,
};
use ahash::AHashSet;
use compact_str::CompactString;
use thiserror::Error;

mod builder;
pub mod fingerprint;
mod storage;

pub use builder::DetectorBuilder;
use fingerprint::{find_unique, Fingerprints};
pub use storage::ModelsStorage;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionError {
    #[error("No language matches the text and every divergence is infinite")]
    Undetectable,
}

#[derive(Clone, Debug)]
pub struct Detector<'m> {
    models_storage: &'m ModelsStorage,
    /// All languages of the storage if [`None`]
    pub languages: Option<AHashSet<CompactString>>,
    filter: CharFilter,
}

impl<'m> Detector<'m> {
    #[inline]
    fn new(builder: DetectorBuilder<'m>) -> Self {
        Self {
            models_storage: builder.models_storage,
            languages: builder.languages,
            filter: if builder.scripts.is_empty() {
                CharFilter::default()
            } else {
                CharFilter::new(builder.scripts)
            },
        }
    }

    /// Clone detector with new languages selected
    #[inline]
    pub fn clone_with_languages<L: Into<CompactString>>(
        &self,
        languages: impl IntoIterator<Item = L>,
    ) -> Self {
        Self {
            models_storage: self.models_storage,
            languages: Some(languages.into_iter().map(Into::into).collect()),
            filter: self.filter.clone(),
        }
    }

    #[inline]
    fn is_selected(&self, language: &str) -> bool {
        self.languages
            .as_ref()
            .is_none_or(|languages| languages.contains(language))
    }

    /// Detects the language of `text`.
    ///
    /// A character of the text unique to one language decides it right away,
    /// otherwise the language with the least divergence
    /// of its word model from the text words wins.
    /// Ties go to the language code first in order.
    pub fn detect(&self, text: &str) -> Result<CompactString, DetectionError> {
        let models = self.models_storage.models();

        detect_with(
            text,
            models.profiles.word_profiles(),
            &models.fingerprints,
            &self.filter,
            |language| self.is_selected(language),
        )
    }
}

/// Characters of `text` left after dropping ASCII letters, of the filter scripts
fn script_chars(text: &str, filter: &CharFilter) -> AHashSet<char> {
    filter
        .filter(text)
        .filter(|ch| !ch.is_ascii_alphabetic())
        .collect()
}

/// Language with the strictly least finite divergence, first one on ties
fn least_divergent<'p>(
    input: &Distribution,
    word_profiles: impl Iterator<Item = (&'p CompactString, &'p Distribution)>,
) -> Option<&'p CompactString> {
    let mut best: Option<(&CompactString, f32)> = None;
    for (language, reference) in word_profiles {
        let score = divergence(input, reference);
        tracing::trace!("{language} divergence {score}");
        if score.is_finite() && best.is_none_or(|(_, best_score)| score < best_score) {
            best = Some((language, score));
        }
    }
    best.map(|(language, _)| language)
}

fn detect_with<'p>(
    text: &str,
    word_profiles: impl Iterator<Item = (&'p CompactString, &'p Distribution)>,
    fingerprints: &Fingerprints,
    filter: &CharFilter,
    is_selected: impl Fn(&str) -> bool,
) -> Result<CompactString, DetectionError> {
    let chars = script_chars(text, filter);
    if let Some(language) = fingerprints.find_match(&chars, &is_selected) {
        tracing::trace!("{language} unique character found");
        return Ok(language.clone());
    }

    let input = profile(text, TokenMode::Word, filter);
    least_divergent(
        &input,
        word_profiles.filter(|(language, _)| is_selected(language.as_str())),
    )
    .cloned()
    .ok_or(DetectionError::Undetectable)
}

/// Detects the language of `text` against the two reference tables,
/// with all scripts retained.
///
/// Computes the unique characters of every language on each call,
/// [`ModelsStorage`] with a [`Detector`] keeps them between calls.
pub fn detect_language(
    text: &str,
    word_profiles: &ProfileTable,
    char_profiles: &ProfileTable,
) -> Result<CompactString, DetectionError> {
    let fingerprints = find_unique(char_profiles);
    detect_with(
        text,
        word_profiles.iter(),
        &fingerprints,
        &CharFilter::default(),
        |_| true,
    )
}
