use crate::{
    distribution::{Distribution, TokenCounts},
    script::CharFilter,
    token_mode::{InvalidModeError, TokenMode},
};

/// Adds the tokens of `text` to `counts`.
///
/// Words are lower-cased and split on whitespace.
/// Characters are taken as-is, only those retained by `filter`.
#[inline]
pub fn count_tokens(text: &str, mode: TokenMode, filter: &CharFilter, counts: &mut TokenCounts) {
    match mode {
        TokenMode::Word => text
            .to_lowercase()
            .split_whitespace()
            .for_each(|word| counts.add(word)),
        TokenMode::Character => filter.filter(text).for_each(|ch| counts.add_char(ch)),
    }
}

/// Normalized token frequencies of `text`. Empty if there are no tokens.
pub fn profile(text: &str, mode: TokenMode, filter: &CharFilter) -> Distribution {
    let mut counts = TokenCounts::default();
    count_tokens(text, mode, filter, &mut counts);
    counts.into_distribution()
}

/// Same as [`profile`], with the mode given by its name
#[inline]
pub fn profile_by_name(
    text: &str,
    mode: &str,
    filter: &CharFilter,
) -> Result<Distribution, InvalidModeError> {
    Ok(profile(text, mode.parse()?, filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptClass;
    use float_cmp::approx_eq;
    use rstest::*;

    #[rstest(
        text,
        case("the quick brown fox jumps over the lazy dog"),
        case("Der schnelle braune Fuchs springt über den faulen Hund"),
        case("съешь же ещё этих мягких французских булок"),
        case("  many   spaces\tand\nnewlines  "),
        case("東京は日本の首都です"),
        case("single"),
        case(""),
        case("   \t\n")
    )]
    fn test_sums_to_one(text: &str) {
        let filter = CharFilter::default();
        for mode in [TokenMode::Word, TokenMode::Character] {
            let distribution = profile(text, mode, &filter);
            assert!(
                distribution.is_empty() || approx_eq!(f64, distribution.sum(), 1.0, epsilon = 1e-6),
                "{mode} profile of {text:?} sums to {}",
                distribution.sum()
            );
        }
    }

    #[test]
    fn test_word_profile() {
        let distribution = profile("The cat saw the Dog", TokenMode::Word, &CharFilter::default());
        assert_eq!(distribution.len(), 4);
        assert!(approx_eq!(f64, distribution.get("the"), 0.4));
        assert!(approx_eq!(f64, distribution.get("dog"), 0.2));
        assert!(!distribution.contains("The"));
    }

    #[test]
    fn test_empty_word_profile() {
        assert!(profile("", TokenMode::Word, &CharFilter::default()).is_empty());
        assert!(profile(" \n ", TokenMode::Word, &CharFilter::default()).is_empty());
    }

    #[test]
    fn test_character_profile() {
        let distribution = profile("Aab, 1!", TokenMode::Character, &CharFilter::default());
        assert_eq!(distribution.len(), 3);
        assert!(approx_eq!(f64, distribution.get("a"), 1.0 / 3.0));
        assert!(approx_eq!(f64, distribution.get("A"), 1.0 / 3.0));
        assert!(!distribution.contains(","));
        assert!(!distribution.contains(" "));
    }

    #[test]
    fn test_character_profile_selected_scripts() {
        let filter = CharFilter::new([ScriptClass::Hiragana, ScriptClass::Katakana]);
        let distribution = profile("カタカナ and ひらがな 漢字", TokenMode::Character, &filter);
        assert!(distribution.contains("カ"));
        assert!(distribution.contains("ひ"));
        assert!(!distribution.contains("漢"));
        assert!(!distribution.contains("a"));
        assert!(approx_eq!(f64, distribution.get("カ"), 2.0 / 8.0));
    }

    #[test]
    fn test_profile_by_name() {
        let filter = CharFilter::default();
        assert_eq!(
            profile_by_name("a b", "word", &filter).unwrap(),
            profile("a b", TokenMode::Word, &filter)
        );
        let err = profile_by_name("a b", "sentence", &filter).unwrap_err();
        assert_eq!(err, InvalidModeError("sentence".to_owned()));
    }
}
