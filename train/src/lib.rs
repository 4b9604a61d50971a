pub mod corpus;
pub mod evaluate;
mod writer;

pub use corpus::{read_corpus, CorpusError};
pub use evaluate::{evaluate, Evaluation, LanguageScore};
pub use writer::{train_and_write, TrainError};

/// Logs to stderr, `RUST_LOG` overrides the `info` level
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(::std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
