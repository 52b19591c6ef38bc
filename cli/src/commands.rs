//! Subcommands of the `wordvec` binary

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use wordvec::{
    open, BackendConfig, EmbeddingProvider, FastTextConfig, GloVeConfig, PretrainedKind, Word2Vec,
    Word2VecConfig,
};

#[derive(Subcommand)]
pub enum Command {
    /// Load a backend and print its kind, dimension and vocabulary size
    Info {
        #[command(flatten)]
        backend: BackendArgs,
    },

    /// Print vectors for WORDS (read from stdin when none are given)
    Extract {
        #[command(flatten)]
        backend: BackendArgs,

        /// Query words, in output order
        words: Vec<String>,
    },

    /// Rewrite a word2vec table between text and binary formats
    Convert {
        /// Source table
        #[arg(long, short)]
        input: PathBuf,

        /// Destination table
        #[arg(long, short)]
        output: PathBuf,

        /// Source is in text format
        #[arg(long)]
        from_text: bool,

        /// Write text format instead of binary
        #[arg(long)]
        to_text: bool,

        /// Convert at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Backend selection shared by `info` and `extract`
#[derive(Args, Debug, Default)]
pub struct BackendArgs {
    /// JSON backend configuration file
    #[arg(long, conflicts_with = "backend")]
    pub config: Option<PathBuf>,

    /// Backend: glove, word2vec or fasttext
    #[arg(long, short)]
    pub backend: Option<PretrainedKind>,

    /// Vector file (word2vec, fasttext)
    #[arg(long, short)]
    pub path: Option<PathBuf>,

    /// GloVe set name
    #[arg(long)]
    pub name: Option<String>,

    /// GloVe vector dimension
    #[arg(long)]
    pub dim: Option<usize>,

    /// GloVe cache directory
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Load at most this many vectors
    #[arg(long)]
    pub limit: Option<usize>,

    /// word2vec file is in text format
    #[arg(long)]
    pub text: bool,
}

impl BackendArgs {
    pub fn to_config(&self) -> Result<BackendConfig> {
        if let Some(path) = &self.config {
            return BackendConfig::from_json_file(path)
                .with_context(|| format!("reading backend config {}", path.display()));
        }

        let Some(kind) = self.backend else {
            bail!("either --config or --backend is required");
        };

        let config = match kind {
            PretrainedKind::GloVe => {
                let mut cfg = GloVeConfig::default().with_max_vectors(self.limit);
                if let Some(name) = &self.name {
                    cfg = cfg.with_name(name);
                }
                if let Some(dim) = self.dim {
                    cfg = cfg.with_dim(dim);
                }
                cfg.cache = self.cache.clone();
                BackendConfig::GloVe(cfg)
            }
            PretrainedKind::Word2Vec => BackendConfig::Word2Vec(
                Word2VecConfig::new(self.require_path(kind)?)
                    .with_limit(self.limit)
                    .with_binary(!self.text),
            ),
            PretrainedKind::FastText => BackendConfig::FastText(
                FastTextConfig::new(self.require_path(kind)?).with_limit(self.limit),
            ),
        };
        Ok(config)
    }

    fn require_path(&self, kind: PretrainedKind) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => bail!("--path is required for the {} backend", kind),
        }
    }

    fn load(&self) -> Result<Box<dyn EmbeddingProvider>> {
        let config = self.to_config()?;
        let kind = config.kind();
        open(&config).with_context(|| format!("loading {} vectors", kind))
    }
}

#[derive(Serialize)]
struct InfoOutput {
    backend: PretrainedKind,
    dim: usize,
    vocab_size: usize,
}

#[derive(Serialize)]
struct ExtractOutput<'a> {
    dim: usize,
    words: &'a [String],
    vectors: Vec<Vec<f32>>,
}

/// Run `command`, writing JSON results to `out`
pub fn run(command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Info { backend } => {
            let provider = backend.load()?;
            let info = InfoOutput {
                backend: provider.kind(),
                dim: provider.dim(),
                vocab_size: provider.vocab_size(),
            };
            serde_json::to_writer_pretty(&mut *out, &info)?;
            writeln!(out)?;
        }
        Command::Extract { backend, words } => {
            let words = if words.is_empty() {
                read_words(io::stdin().lock())?
            } else {
                words
            };
            let provider = backend.load()?;
            extract(provider.as_ref(), &words, out)?;
        }
        Command::Convert {
            input,
            output,
            from_text,
            to_text,
            limit,
        } => {
            let table = Word2Vec::load(&input, limit, !from_text)
                .with_context(|| format!("reading {}", input.display()))?;
            table
                .save(&output, !to_text)
                .with_context(|| format!("writing {}", output.display()))?;
            tracing::info!(
                "Converted {} vectors: {} -> {}",
                table.vocab_size(),
                input.display(),
                output.display()
            );
        }
    }
    Ok(())
}

fn extract(provider: &dyn EmbeddingProvider, words: &[String], out: &mut impl Write) -> Result<()> {
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let matrix = provider.extract(&refs);

    let found = refs.iter().filter(|w| provider.contains(w)).count();
    tracing::debug!("{} of {} words in vocabulary", found, refs.len());

    let output = ExtractOutput {
        dim: provider.dim(),
        words,
        vectors: matrix.rows().into_iter().map(|row| row.to_vec()).collect(),
    };
    serde_json::to_writer(&mut *out, &output)?;
    writeln!(out)?;
    Ok(())
}

fn read_words(mut input: impl Read) -> Result<Vec<String>> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("reading words from stdin")?;
    Ok(text.split_whitespace().map(str::to_string).collect())
}
