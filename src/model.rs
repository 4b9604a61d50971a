use crate::distribution::Distribution;
use ::std::collections::BTreeMap;
use compact_str::CompactString;

/// Language code to distribution, ordered by language code
pub type ProfileTable = BTreeMap<CompactString, Distribution>;

/// Reference data of one language
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LanguageProfile {
    /// Absent for languages excluded from word modeling
    pub word: Option<Distribution>,
    pub character: Distribution,
}

/// Profiles of all languages, ordered by language code
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LanguageProfiles(BTreeMap<CompactString, LanguageProfile>);

impl LanguageProfiles {
    /// Joins word and character tables.
    /// A language missing from the character table gets an empty character distribution.
    pub fn from_tables(word_profiles: ProfileTable, char_profiles: ProfileTable) -> Self {
        let mut profiles: BTreeMap<CompactString, LanguageProfile> = char_profiles
            .into_iter()
            .map(|(language, character)| {
                (
                    language,
                    LanguageProfile {
                        word: None,
                        character,
                    },
                )
            })
            .collect();

        for (language, word) in word_profiles {
            profiles.entry(language).or_default().word = Some(word);
        }

        Self(profiles)
    }

    pub fn into_tables(self) -> (ProfileTable, ProfileTable) {
        let mut word_profiles = ProfileTable::new();
        let mut char_profiles = ProfileTable::new();
        for (language, profile) in self.0 {
            if let Some(word) = profile.word {
                word_profiles.insert(language.clone(), word);
            }
            char_profiles.insert(language, profile.character);
        }
        (word_profiles, char_profiles)
    }

    #[inline]
    pub fn get(&self, language: &str) -> Option<&LanguageProfile> {
        self.0.get(language)
    }

    #[inline]
    pub fn insert(&mut self, language: impl Into<CompactString>, profile: LanguageProfile) {
        self.0.insert(language.into(), profile);
    }

    #[inline]
    pub fn remove(&mut self, language: &str) -> Option<LanguageProfile> {
        self.0.remove(language)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn languages(&self) -> impl Iterator<Item = &CompactString> {
        self.0.keys()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&CompactString, &LanguageProfile)> {
        self.0.iter()
    }

    /// Only languages that have a word distribution
    #[inline]
    pub fn word_profiles(&self) -> impl Iterator<Item = (&CompactString, &Distribution)> {
        self.0
            .iter()
            .filter_map(|(l, p)| p.word.as_ref().map(|w| (l, w)))
    }

    #[inline]
    pub fn char_profiles(&self) -> impl Iterator<Item = (&CompactString, &Distribution)> {
        self.0.iter().map(|(l, p)| (l, &p.character))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(languages: &[&str]) -> ProfileTable {
        languages
            .iter()
            .map(|&l| (l.into(), Distribution::from_counts([(l, 1)])))
            .collect()
    }

    #[test]
    fn test_tables_round_trip() {
        let word_profiles = table(&["en", "fr"]);
        let char_profiles = table(&["en", "fr", "ja"]);
        let profiles = LanguageProfiles::from_tables(word_profiles.clone(), char_profiles.clone());

        assert_eq!(profiles.len(), 3);
        assert!(profiles.get("ja").unwrap().word.is_none());
        assert_eq!(
            profiles.word_profiles().map(|(l, _)| l.as_str()).collect::<Vec<_>>(),
            ["en", "fr"]
        );
        assert_eq!(profiles.into_tables(), (word_profiles, char_profiles));
    }

    #[test]
    fn test_sorted_by_language() {
        let profiles = LanguageProfiles::from_tables(table(&["zz", "de"]), table(&["ru", "aa"]));
        assert_eq!(
            profiles.languages().map(CompactString::as_str).collect::<Vec<_>>(),
            ["aa", "de", "ru", "zz"]
        );
        assert!(profiles.get("zz").unwrap().character.is_empty());
    }
}
