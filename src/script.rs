use ::core::{ops::RangeInclusive, str::FromStr};
use arrayvec::ArrayVec;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Named set of Unicode code point ranges
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ScriptClass {
    Latin,
    Hiragana,
    Katakana,
    Cjk,
    Arabic,
    Cyrillic,
    Greek,
    Thai,
    ExtendedLatin,
}

const LATIN: &[RangeInclusive<char>] = &['a'..='z', 'A'..='Z'];
const HIRAGANA: &[RangeInclusive<char>] = &['\u{3040}'..='\u{309F}'];
const KATAKANA: &[RangeInclusive<char>] = &['\u{30A0}'..='\u{30FF}'];
const CJK: &[RangeInclusive<char>] = &['\u{4E00}'..='\u{9FAF}'];
// with Arabic Supplement
const ARABIC: &[RangeInclusive<char>] = &['\u{0600}'..='\u{06FF}', '\u{0750}'..='\u{077F}'];
const CYRILLIC: &[RangeInclusive<char>] = &['\u{0400}'..='\u{04FF}'];
const GREEK: &[RangeInclusive<char>] = &['\u{0370}'..='\u{03FF}'];
const THAI: &[RangeInclusive<char>] = &['\u{0E00}'..='\u{0E7F}'];
const EXTENDED_LATIN: &[RangeInclusive<char>] = &['\u{0100}'..='\u{017F}'];

impl ScriptClass {
    /// Inclusive code point ranges of the class
    #[inline]
    pub fn ranges(self) -> &'static [RangeInclusive<char>] {
        use ScriptClass::*;
        match self {
            Latin => LATIN,
            Hiragana => HIRAGANA,
            Katakana => KATAKANA,
            Cjk => CJK,
            Arabic => ARABIC,
            Cyrillic => CYRILLIC,
            Greek => GREEK,
            Thai => THAI,
            ExtendedLatin => EXTENDED_LATIN,
        }
    }

    #[inline]
    pub fn contains(self, ch: char) -> bool {
        self.ranges().iter().any(|r| r.contains(&ch))
    }

    #[inline]
    pub fn into_str(self) -> &'static str {
        self.into()
    }
}

pub type ScriptClasses = ArrayVec<ScriptClass, { ScriptClass::COUNT }>;

pub trait ScriptClassesTrait: Sized {
    fn merge(&mut self, classes: impl Iterator<Item = ScriptClass>);
    fn new_merged(classes: impl Iterator<Item = ScriptClass>) -> Self;
    fn all() -> Self;
    /// Parses names like `"latin, cjk"`. Unknown names are skipped.
    fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self;
}

impl ScriptClassesTrait for ScriptClasses {
    fn merge(&mut self, classes: impl Iterator<Item = ScriptClass>) {
        for class in classes {
            if !self.contains(&class) {
                self.push(class);
            }
        }
        self.sort_unstable();
    }

    #[inline]
    fn new_merged(classes: impl Iterator<Item = ScriptClass>) -> Self {
        let mut new = Self::new_const();
        new.merge(classes);
        new
    }

    #[inline]
    fn all() -> Self {
        Self::new_merged(ScriptClass::iter())
    }

    fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let classes = names
            .into_iter()
            .flat_map(|n| n.split(','))
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .filter_map(|n| match ScriptClass::from_str(n) {
                Ok(class) => Some(class),
                Err(_) => {
                    tracing::debug!("Unknown script class {n:?} ignored");
                    None
                }
            });
        Self::new_merged(classes)
    }
}

/// Keeps characters of the selected script classes, strips everything else
#[derive(Clone, Debug)]
pub struct CharFilter {
    ranges: Vec<RangeInclusive<char>>,
}

impl Default for CharFilter {
    /// All script classes
    #[inline]
    fn default() -> Self {
        Self::new(ScriptClass::iter())
    }
}

impl CharFilter {
    pub fn new(classes: impl IntoIterator<Item = ScriptClass>) -> Self {
        let ranges = classes
            .into_iter()
            .flat_map(|c| c.ranges().iter().cloned())
            .collect();
        Self { ranges }
    }

    #[inline]
    pub fn retains(&self, ch: char) -> bool {
        self.ranges.iter().any(|r| r.contains(&ch))
    }

    /// `true` for characters outside of every selected class
    #[inline]
    pub fn is_stripped(&self, ch: char) -> bool {
        !self.retains(ch)
    }

    #[inline]
    pub fn filter<'t>(&'t self, text: &'t str) -> impl Iterator<Item = char> + 't {
        text.chars().filter(|&ch| self.retains(ch))
    }

    #[inline]
    pub fn strip(&self, text: &str) -> String {
        self.filter(text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest(
        class,
        ch,
        case(ScriptClass::Latin, 'q'),
        case(ScriptClass::Latin, 'Q'),
        case(ScriptClass::Hiragana, 'の'),
        case(ScriptClass::Katakana, 'カ'),
        case(ScriptClass::Cjk, '語'),
        case(ScriptClass::Arabic, 'ب'),
        case(ScriptClass::Arabic, '\u{0750}'),
        case(ScriptClass::Cyrillic, 'ж'),
        case(ScriptClass::Greek, 'λ'),
        case(ScriptClass::Thai, 'ก'),
        case(ScriptClass::ExtendedLatin, 'ł')
    )]
    fn test_class_contains(class: ScriptClass, ch: char) {
        assert!(class.contains(ch), "{ch:?} must be in {class:?}");
        for other in ScriptClass::iter().filter(|&c| c != class) {
            assert!(!other.contains(ch), "{ch:?} must not be in {other:?}");
        }
    }

    #[test]
    fn test_from_names() {
        let classes = ScriptClasses::from_names(["cyrillic, Latin", "unknown", " cjk "]);
        assert_eq!(
            classes.as_slice(),
            &[ScriptClass::Latin, ScriptClass::Cjk, ScriptClass::Cyrillic]
        );
    }

    #[test]
    fn test_from_unknown_names_is_empty() {
        let classes = ScriptClasses::from_names(["klingon", ""]);
        assert!(classes.is_empty());

        let filter = CharFilter::new(classes);
        assert_eq!(filter.strip("abc жук"), "");
    }

    #[test]
    fn test_all_names_round_trip() {
        let names: Vec<&str> = ScriptClass::iter().map(ScriptClass::into_str).collect();
        assert_eq!(ScriptClasses::from_names(names), ScriptClasses::all());
        assert_eq!(ScriptClass::ExtendedLatin.into_str(), "extended_latin");
    }

    #[test]
    fn test_default_filter() {
        let filter = CharFilter::default();
        assert_eq!(filter.strip("Hé, мир! 東京 1-2"), "Hмир東京");
        assert!(filter.is_stripped(' '));
        assert!(filter.is_stripped('é'));
        assert!(!filter.is_stripped('ā'));
    }

    #[test]
    fn test_selected_filter() {
        let filter = CharFilter::new([ScriptClass::Cyrillic]);
        assert_eq!(filter.strip("hello мир"), "мир");
    }
}
