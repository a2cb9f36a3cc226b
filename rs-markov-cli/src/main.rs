use std::path::PathBuf;

use clap::Parser;
use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rs_markov_core::{generate_with, Error, GenerationPolicy, TrigramModel};

/// Trains a trigram model on corpus files and prints generated lines.
#[derive(Parser, Debug)]
#[command(name = "rs-markov", version)]
struct Cli {
    /// Corpus files, one training line per line
    #[arg(required = true)]
    corpus: Vec<PathBuf>,

    /// Number of lines to generate
    #[arg(short, long, default_value_t = 1)]
    number: usize,

    /// Outputs must be shorter than this many characters (0 = no limit)
    #[arg(long, default_value_t = 120)]
    char_limit: usize,

    /// Abandon walks longer than this many words
    #[arg(long, default_value_t = 100)]
    max_words: usize,

    /// Walks attempted per output before giving up
    #[arg(long, default_value_t = 100)]
    attempts: usize,

    /// Word every output starts with
    #[arg(short, long)]
    initial: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Avoid printing lines copied from the corpus
    #[arg(long)]
    reject_training: bool,

    /// Print model statistics before generating
    #[arg(long)]
    stats: bool,
}

impl Cli {
    fn policy(&self) -> Result<GenerationPolicy, Error> {
        let mut policy = GenerationPolicy::new(self.char_limit, self.max_words, self.attempts)?;
        policy.reject_training_lines = self.reject_training;
        Ok(policy)
    }
}

/// Generates `number` outputs, skipping those that exhaust their attempts.
fn run<R: Rng + ?Sized>(cli: &Cli, model: &TrigramModel, rng: &mut R) -> Result<Vec<String>, Error> {
    let policy = cli.policy()?;
    let mut lines = Vec::with_capacity(cli.number);
    for i in 0..cli.number {
        match generate_with(model, &policy, cli.initial.as_deref(), &mut *rng) {
            Ok(text) => lines.push(text),
            Err(e @ Error::AttemptsExhausted { .. }) => warn!("Output {}: {e}", i + 1),
            Err(e) => return Err(e),
        }
    }
    Ok(lines)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    // Training reads every file once, line by line
    let model = TrigramModel::from_files(&cli.corpus)?;

    if cli.stats {
        let stats = model.stats();
        println!(
            "lines: {}, contexts: {}, distinct trigrams: {}, observations: {}",
            stats.sentences, stats.contexts, stats.distinct_trigrams, stats.observations
        );
    }

    let lines = match cli.seed {
        Some(seed) => run(&cli, &model, &mut StdRng::seed_from_u64(seed))?,
        None => run(&cli, &model, &mut rand::rng())?,
    };
    for line in lines {
        println!("{line}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let cli = Cli::parse_from(["rs-markov", "headlines.txt"]);
        assert_eq!(cli.number, 1);
        assert_eq!(cli.policy().unwrap(), GenerationPolicy::default());
    }

    #[test]
    fn requires_a_corpus() {
        assert!(Cli::try_parse_from(["rs-markov"]).is_err());
    }

    #[test]
    fn generates_the_requested_number() {
        let cli = Cli::parse_from(["rs-markov", "x.txt", "-n", "5", "--initial", "the"]);
        let model = TrigramModel::train(["the cat sat", "the cat ran"]);
        let lines = run(&cli, &model, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l == "the cat sat" || l == "the cat ran"));
    }

    #[test]
    fn skips_outputs_over_the_limit() {
        let cli = Cli::parse_from(["rs-markov", "x.txt", "-n", "3", "--char-limit", "4", "--attempts", "5"]);
        let model = TrigramModel::train(["too long for this"]);
        assert!(run(&cli, &model, &mut StdRng::seed_from_u64(1)).unwrap().is_empty());
    }

    #[test]
    fn rejects_zero_attempts() {
        let cli = Cli::parse_from(["rs-markov", "x.txt", "--attempts", "0"]);
        let model = TrigramModel::train(["a b"]);
        assert!(matches!(run(&cli, &model, &mut StdRng::seed_from_u64(1)), Err(Error::InvalidPolicy(_))));
    }
}
