use crate::distribution::Distribution;
use ::std::collections::BTreeMap;
use ahash::{AHashMap, AHashSet};
use compact_str::CompactString;

/// Characters that occur in one language's character model only
pub type Fingerprint = AHashSet<char>;

/// Fingerprints of all languages, ordered by language code.
/// Pairwise disjoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fingerprints(BTreeMap<CompactString, Fingerprint>);

impl Fingerprints {
    #[inline]
    pub fn get(&self, language: &str) -> Option<&Fingerprint> {
        self.0.get(language)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&CompactString, &Fingerprint)> + Clone {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First language (by code) sharing a character with `chars`
    pub fn find_match<'f>(
        &'f self,
        chars: &AHashSet<char>,
        is_selected: impl Fn(&str) -> bool,
    ) -> Option<&'f CompactString> {
        if chars.is_empty() {
            return None;
        }
        self.0
            .iter()
            .filter(|(language, _)| is_selected(language.as_str()))
            .find(|(_, fingerprint)| !fingerprint.is_disjoint(chars))
            .map(|(language, _)| language)
    }
}

fn distribution_chars(language: &str, distribution: &Distribution) -> AHashSet<char> {
    distribution
        .tokens()
        .filter_map(|token| {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(ch),
                _ => {
                    tracing::warn!("{language} character model has a token {token:?}, skipped");
                    None
                }
            }
        })
        .collect()
}

/// For every language, the characters of its distribution
/// that are absent from the distributions of all other languages.
pub fn find_unique<'a>(
    char_profiles: impl IntoIterator<Item = (&'a CompactString, &'a Distribution)>,
) -> Fingerprints {
    let languages_chars: Vec<(&CompactString, AHashSet<char>)> = char_profiles
        .into_iter()
        .map(|(language, distribution)| (language, distribution_chars(language, distribution)))
        .collect();

    // in how many languages each character occurs
    let mut occurrences = AHashMap::<char, usize>::new();
    for (_, chars) in languages_chars.iter() {
        for &ch in chars.iter() {
            *occurrences.entry(ch).or_default() += 1;
        }
    }

    let fingerprints = languages_chars
        .into_iter()
        .map(|(language, chars)| {
            let unique = chars
                .into_iter()
                .filter(|ch| occurrences.get(ch) == Some(&1))
                .collect();
            (language.clone(), unique)
        })
        .collect();

    Fingerprints(fingerprints)
}
