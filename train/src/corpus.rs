use ::std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};
use langfreq::Sample;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Corpus {0:?} open error")]
    Open(PathBuf, #[source] io::Error),
    #[error("Corpus {0:?} record {1} is invalid")]
    Record(PathBuf, usize, #[source] csv::Error),
}

/// Reads CSV records with a `labels` (or `label`) and a `text` column,
/// other columns are ignored
pub fn read_samples<R: io::Read>(reader: R) -> impl Iterator<Item = Result<Sample, csv::Error>> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader)
        .into_deserialize()
}

pub fn read_corpus(path: &Path) -> Result<Vec<Sample>, CorpusError> {
    let file = File::open(path).map_err(|e| CorpusError::Open(path.to_owned(), e))?;

    let samples = read_samples(io::BufReader::new(file))
        .enumerate()
        .map(|(i, sample)| sample.map_err(|e| CorpusError::Record(path.to_owned(), i + 1, e)))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!("Read {} samples from {path:?}", samples.len());

    Ok(samples)
}
