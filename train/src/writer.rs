use crate::corpus::{read_corpus, CorpusError};
use langfreq::{ConfigError, ModelBuilder, ModelConfig, ModelFileError, ModelsStorage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Corpus(#[from] CorpusError),
    #[error(transparent)]
    ModelFile(#[from] ModelFileError),
    #[error("Corpus has no samples")]
    EmptyCorpus,
}

/// Builds word and character models from `config.corpus_path`
/// and writes them to `config.output_path`.
pub fn train_and_write(config: &ModelConfig) -> Result<ModelsStorage, TrainError> {
    let corpus = read_corpus(&config.corpus_path)?;
    if corpus.is_empty() {
        return Err(TrainError::EmptyCorpus);
    }

    let profiles = ModelBuilder::new(config.clone()).build_profiles(&corpus);
    tracing::info!("Trained {} languages", profiles.len());

    let models_storage = ModelsStorage::new(profiles);
    models_storage.save(&config.output_path, config.compress)?;

    Ok(models_storage)
}
