use crate::{
    model::{LanguageProfiles, ProfileTable},
    token_mode::TokenMode,
};
use ::std::{
    fs::{create_dir_all, File},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};
use brotli::{CompressorWriter, Decompressor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelFileError {
    #[error("Model file {0:?} open error")]
    Open(PathBuf, #[source] io::Error),
    #[error("Model file {0:?} read error")]
    Read(PathBuf, #[source] io::Error),
    #[error("Model file {0:?} write error")]
    Write(PathBuf, #[source] io::Error),
    #[error("Model file {0:?} is not a valid table")]
    Json(PathBuf, #[source] serde_json::Error),
}

#[inline]
fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "br")
}

/// Reads `{language: {token: probability}}` JSON, brotli compressed if the extension is `.br`
pub fn read_table(path: &Path) -> Result<ProfileTable, ModelFileError> {
    let file = File::open(path).map_err(|e| ModelFileError::Open(path.to_owned(), e))?;

    let mut content = String::new();
    let read = if is_compressed(path) {
        Decompressor::new(file, 4096).read_to_string(&mut content)
    } else {
        let mut file = file;
        file.read_to_string(&mut content)
    };
    read.map_err(|e| ModelFileError::Read(path.to_owned(), e))?;

    let table: ProfileTable =
        serde_json::from_str(&content).map_err(|e| ModelFileError::Json(path.to_owned(), e))?;
    tracing::info!("Loaded {} models from {path:?}", table.len());

    Ok(table)
}

pub fn write_table(table: &ProfileTable, path: &Path) -> Result<(), ModelFileError> {
    let write_err = |e: io::Error| ModelFileError::Write(path.to_owned(), e);

    if let Some(parent) = path.parent() {
        create_dir_all(parent).map_err(write_err)?;
    }
    let file = File::create(path).map_err(write_err)?;

    let json =
        serde_json::to_string(table).map_err(|e| ModelFileError::Json(path.to_owned(), e))?;
    if is_compressed(path) {
        let mut compressed_file = CompressorWriter::new(file, 4096, 11, 22);
        compressed_file.write_all(json.as_bytes()).map_err(write_err)?;
        compressed_file.flush().map_err(write_err)?;
    } else {
        let mut file = file;
        file.write_all(json.as_bytes()).map_err(write_err)?;
    }
    tracing::info!("Written {} models to {path:?}", table.len());

    Ok(())
}

/// Path of the mode table inside `dir`, the compressed one if it exists
pub fn table_path(dir: &Path, mode: TokenMode) -> PathBuf {
    let compressed = dir.join(mode.file_name(true));
    if compressed.exists() {
        compressed
    } else {
        dir.join(mode.file_name(false))
    }
}

/// Reads both tables from `dir`
pub fn load_profiles(dir: &Path) -> Result<LanguageProfiles, ModelFileError> {
    let word_profiles = read_table(&table_path(dir, TokenMode::Word))?;
    let char_profiles = read_table(&table_path(dir, TokenMode::Character))?;
    Ok(LanguageProfiles::from_tables(word_profiles, char_profiles))
}

/// Writes both tables into `dir`
pub fn save_profiles(
    profiles: LanguageProfiles,
    dir: &Path,
    compress: bool,
) -> Result<(), ModelFileError> {
    let (word_profiles, char_profiles) = profiles.into_tables();
    write_table(&word_profiles, &dir.join(TokenMode::Word.file_name(compress)))?;
    write_table(
        &char_profiles,
        &dir.join(TokenMode::Character.file_name(compress)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Distribution;
    use ::std::fs;
    use rstest::*;

    fn table() -> ProfileTable {
        [
            ("en".into(), Distribution::from_counts([("the", 3), ("cat", 1)])),
            ("fr".into(), Distribution::from_counts([("le", 1), ("chat", 1)])),
        ]
        .into_iter()
        .collect()
    }

    #[rstest(file_name, case("dict_word.json"), case("dict_word.json.br"))]
    fn test_table_round_trip(file_name: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(file_name);
        write_table(&table(), &path).unwrap();
        assert_eq!(read_table(&path).unwrap(), table());
    }

    #[test]
    fn test_plain_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict_word.json");
        write_table(&table(), &path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            r#"{"en":{"cat":0.25,"the":0.75},"fr":{"chat":0.5,"le":0.5}}"#
        );
    }

    #[rstest(file_name, case("dict_character.json"), case("dict_character.json.br"))]
    fn test_inexact_probabilities_round_trip(file_name: &str) {
        let table: ProfileTable = [
            ("en".into(), Distribution::from_counts([("h", 2), ("e", 15)])),
            ("ja".into(), Distribution::from_counts([("猫", 1), ("の", 10)])),
            ("ru".into(), Distribution::from_counts([("а", 1), ("б", 2), ("в", 4)])),
        ]
        .into_iter()
        .collect();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(file_name);
        write_table(&table, &path).unwrap();
        let loaded = read_table(&path).unwrap();
        for (language, distribution) in &table {
            for (token, probability) in distribution.iter() {
                assert_eq!(
                    loaded[language].get(token).to_bits(),
                    probability.to_bits(),
                    "{language} {token:?}"
                );
            }
        }
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_invalid_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict_word.json");

        fs::write(&path, r#"{"en": {"the": 0.5}}"#).unwrap();
        assert!(matches!(read_table(&path), Err(ModelFileError::Json(..))));

        fs::write(&path, r#"{"en": ["the"]}"#).unwrap();
        assert!(matches!(read_table(&path), Err(ModelFileError::Json(..))));

        let missing = dir.path().join("missing.json");
        assert!(matches!(read_table(&missing), Err(ModelFileError::Open(..))));
    }

    #[rstest(compress, case(false), case(true))]
    fn test_profiles_round_trip(compress: bool) {
        let dir = tempfile::tempdir().unwrap();
        let profiles = LanguageProfiles::from_tables(table(), table());
        save_profiles(profiles.clone(), dir.path(), compress).unwrap();

        assert_eq!(
            table_path(dir.path(), TokenMode::Word),
            dir.path().join(TokenMode::Word.file_name(compress))
        );
        assert_eq!(load_profiles(dir.path()).unwrap(), profiles);
    }
}
