use ::std::{path::PathBuf, process::ExitCode};
use clap::Parser;
use langfreq::{DetectorBuilder, ModelsStorage};
use langfreq_train::{evaluate, init_tracing, read_corpus};

/// Measures detection accuracy on a labeled CSV test set
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Models directory
    #[arg(short = 'm', long, default_value = ".")]
    models: PathBuf,

    /// CSV test set with `labels` and `text` columns
    #[arg(short = 'i', long, default_value = "test.csv")]
    inp: PathBuf,

    /// Detect only these languages, comma separated
    #[arg(short = 'l', long, value_delimiter = ',')]
    languages: Option<Vec<String>>,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let models_storage = match ModelsStorage::load(&args.models) {
        Ok(models_storage) => models_storage,
        Err(e) => {
            tracing::error!("{e}: {:?}", ::std::error::Error::source(&e));
            return ExitCode::FAILURE;
        }
    };
    let samples = match read_corpus(&args.inp) {
        Ok(samples) => samples,
        Err(e) => {
            tracing::error!("{e}: {:?}", ::std::error::Error::source(&e));
            return ExitCode::FAILURE;
        }
    };

    let mut detector_builder = DetectorBuilder::new(&models_storage);
    if let Some(languages) = args.languages {
        detector_builder = detector_builder.languages(languages);
    }
    let detector = detector_builder.build();

    println!("{}", evaluate(&detector, &samples));
    ExitCode::SUCCESS
}
