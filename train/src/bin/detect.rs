use ::std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};
use clap::Parser;
use langfreq::{DetectorBuilder, ModelsStorage};
use langfreq_train::init_tracing;

/// Detects the language of every line read from stdin
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Models directory
    #[arg(short = 'm', long, default_value = ".")]
    models: PathBuf,
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
    let detector = DetectorBuilder::new(&models_storage).build();

    let mut stdout = io::stdout().lock();
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("stdin read error: {e}");
                return ExitCode::FAILURE;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let written = match detector.detect(&line) {
            Ok(language) => writeln!(stdout, "{language}"),
            Err(e) => writeln!(stdout, "error: {e}"),
        };
        if written.is_err() {
            break;
        }
    }

    ExitCode::SUCCESS
}
