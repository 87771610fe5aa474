use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use futures::StreamExt;
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tracing::info;

use orthotok::tokenizer::{
    split_contractions, split_possessive_markers, web_tokenizer, word_tokenizer,
};
use orthotok::{split_multi, split_single, Language, SegmentConfig};

#[derive(Parser, Debug)]
#[command(name = "orthotok")]
#[command(about = "Rule-based sentence segmenter and word tokenizer")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split text from stdin into one sentence per output line
    Segment {
        /// Language of the abbreviation lexicon
        #[arg(long, value_enum, default_value = "generic")]
        language: Language,

        /// Treat the whole input as one fragment instead of splitting at
        /// blank lines
        #[arg(long)]
        single: bool,

        /// Stats output file path
        #[arg(long)]
        stats_out: Option<PathBuf>,
    },
    /// Tokenize each stdin line into whitespace-separated tokens
    Tokenize {
        /// Keep URLs and e-mail addresses as single tokens
        #[arg(long)]
        web: bool,

        /// Split possessive markers off their stems
        #[arg(long)]
        possessives: bool,

        /// Split verb contractions off their stems
        #[arg(long)]
        contractions: bool,

        /// Stats output file path
        #[arg(long)]
        stats_out: Option<PathBuf>,
    },
}

#[derive(Serialize, Debug, Default)]
struct RunStats {
    bytes_in: u64,
    sentences_out: u64,
    tokens_out: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "parsed CLI arguments");

    let stats = match args.command {
        Command::Segment { language, single, ref stats_out } => {
            let stats = run_segment(language, single).await?;
            write_stats(stats_out.as_deref(), &stats).await?;
            stats
        }
        Command::Tokenize { web, possessives, contractions, ref stats_out } => {
            let stats = run_tokenize(web, possessives, contractions).await?;
            write_stats(stats_out.as_deref(), &stats).await?;
            stats
        }
    };

    info!(?stats, "run complete");
    Ok(())
}

async fn run_segment(language: Language, single: bool) -> Result<RunStats> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("reading stdin")?;

    let sentences = if single {
        split_single(&text)
    } else {
        split_multi(&text, &SegmentConfig { language })
    };

    let mut stdout = tokio::io::stdout();
    let mut out = String::new();
    for sentence in &sentences {
        // sentences may span line breaks in the input; flatten them so the
        // one-sentence-per-line contract holds
        for word in sentence.text.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        out.clear();
    }
    stdout.flush().await?;

    Ok(RunStats {
        bytes_in: text.len() as u64,
        sentences_out: sentences.len() as u64,
        ..RunStats::default()
    })
}

async fn run_tokenize(web: bool, possessives: bool, contractions: bool) -> Result<RunStats> {
    let reader = BufReader::new(tokio::io::stdin());
    let mut lines = LinesStream::new(tokio::io::AsyncBufReadExt::lines(reader));
    let mut stdout = tokio::io::stdout();
    let mut stats = RunStats::default();

    while let Some(line) = lines.next().await {
        let line = line.context("reading stdin")?;
        stats.bytes_in += line.len() as u64 + 1;

        let mut tokens = if web { web_tokenizer(&line) } else { word_tokenizer(&line) };
        if possessives {
            tokens = split_possessive_markers(tokens);
        }
        if contractions {
            tokens = split_contractions(tokens);
        }
        stats.tokens_out += tokens.len() as u64;

        let mut out = String::with_capacity(line.len() + tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(token.text());
        }
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
    }
    stdout.flush().await?;

    Ok(stats)
}

async fn write_stats(path: Option<&std::path::Path>, stats: &RunStats) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let json = serde_json::to_string_pretty(stats)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing stats to {}", path.display()))?;
    info!(path = %path.display(), "wrote run stats");
    Ok(())
}
