use super::{Detector, ModelsStorage};
use crate::script::{ScriptClass, ScriptClasses, ScriptClassesTrait};
use ahash::AHashSet;
use compact_str::CompactString;

#[derive(Clone, Debug)]
pub struct DetectorBuilder<'m> {
    pub(super) models_storage: &'m ModelsStorage,
    pub(super) languages: Option<AHashSet<CompactString>>,
    pub(super) scripts: ScriptClasses,
}

impl<'m> DetectorBuilder<'m> {
    /// Will have all languages of the storage and all scripts
    #[inline]
    pub fn new(models_storage: &'m ModelsStorage) -> Self {
        Self {
            models_storage,
            languages: None,
            scripts: ScriptClasses::all(),
        }
    }

    #[inline]
    pub fn build(self) -> Detector<'m> {
        Detector::new(self)
    }

    /// Restrict detection to these languages
    #[inline]
    pub fn languages<L: Into<CompactString>>(mut self, languages: impl IntoIterator<Item = L>) -> Self {
        self.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    /// Scripts kept when looking for unique characters.
    /// All scripts if none selected.
    #[inline]
    pub fn scripts(mut self, scripts: impl Iterator<Item = ScriptClass>) -> Self {
        self.scripts = ScriptClasses::new_merged(scripts);
        self
    }
}
