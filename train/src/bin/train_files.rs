use ::std::{path::PathBuf, process::ExitCode};
use clap::Parser;
use langfreq::{ModelConfig, ScriptClasses, ScriptClassesTrait};
use langfreq_train::{init_tracing, train_and_write, TrainError};

/// Builds `dict_word.json` and `dict_character.json` from a labeled CSV corpus
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// JSON config, flags override its values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// CSV corpus with `labels` and `text` columns
    #[arg(short = 'i', long)]
    inp: Option<PathBuf>,

    /// Models directory
    #[arg(short = 'o', long)]
    out: Option<PathBuf>,

    /// Minimal relative word frequency, 0 disables pruning
    #[arg(short = 't', long)]
    threshold: Option<f64>,

    /// Languages without a word model, comma separated
    #[arg(short = 'e', long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Character scripts, comma separated, unknown names are ignored
    #[arg(short = 's', long)]
    scripts: Option<String>,

    /// Write brotli compressed `.json.br` files
    #[arg(long)]
    compress: bool,
}

impl Args {
    fn into_config(self) -> Result<ModelConfig, TrainError> {
        let mut config = match self.config {
            Some(path) => ModelConfig::from_file(path)?,
            None => ModelConfig::default(),
        };
        if let Some(inp) = self.inp {
            config = config.corpus_path(inp);
        }
        if let Some(out) = self.out {
            config = config.output_path(out);
        }
        if let Some(threshold) = self.threshold {
            config = config.frequency_threshold(threshold);
        }
        if let Some(exclude) = self.exclude {
            config = config.excluded_languages(exclude.iter().map(|l| l.trim()));
        }
        if let Some(scripts) = self.scripts {
            config = config.scripts(ScriptClasses::from_names([scripts.as_str()]).into_iter());
        }
        if self.compress {
            config = config.compress(true);
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let result = args.into_config().and_then(|config| {
        tracing::debug!("{config:?}");
        train_and_write(&config).map(|_| config)
    });
    match result {
        Ok(config) => {
            tracing::info!("Models written to {:?}", config.output_path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}: {:?}", ::std::error::Error::source(&e));
            ExitCode::FAILURE
        }
    }
}
