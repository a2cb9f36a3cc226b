use std::collections::{HashMap, HashSet};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::Path;

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::sampler;
use super::token::Token;
use super::tokenizer::tokenize_line;
use super::trigram::{trigrams, Context, Trigram};
use crate::error::{Error, Result};
use crate::io::read_lines;

/// Summary of a trained model.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModelStats {
	/// Number of corpus lines consumed.
	pub sentences: usize,
	/// Number of distinct contexts with at least one candidate.
	pub contexts: usize,
	pub distinct_trigrams: usize,
	/// Total trigram occurrences, i.e. the sum of every count.
	pub observations: usize,
}

/// Trigram frequency model built from a corpus.
///
/// Two tables are kept:
/// - `candidates`: for each context, the distinct successors in the order
///   they were first observed
/// - `counts`: for each trigram, how many times it occurred
///
/// A successor is appended to its context's candidates only the first time
/// its trigram is seen; repeats only bump the count. Sampling weights come
/// from `counts`.
///
/// # Invariants
/// - Every context in `candidates` has at least one candidate
/// - Every `(context, candidate)` pair has a count >= 1 in `counts`
/// - `End` never appears inside a context
///
/// The model is built once by [`TrigramModel::train`] (or one of its
/// variants) and is read-only afterwards, so a single instance can be
/// shared across threads without locking.
#[derive(Clone, Debug, Default)]
pub struct TrigramModel {
	candidates: HashMap<Context, Vec<Token>>,
	counts: HashMap<Trigram, usize>,
	/// Fingerprints of the tokenized training lines, 8 bytes per distinct
	/// line instead of its text. A collision only makes
	/// `contains_sentence` report a false positive.
	sentences: HashSet<u64>,
	nb_sentences: usize,
	observations: usize,
}

impl TrigramModel {
	/// Builds a model in a single pass over `lines`.
	pub fn train<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut model = Self::default();
		for line in lines {
			model.add_sentence(line.as_ref());
		}
		model.log_trained();
		model
	}

	/// Same as [`TrigramModel::train`] for a line source that can fail,
	/// such as a file being read. Stops at the first error.
	pub fn try_train<I, S, E>(lines: I) -> std::result::Result<Self, E>
	where
		I: IntoIterator<Item = std::result::Result<S, E>>,
		S: AsRef<str>,
	{
		let mut model = Self::default();
		for line in lines {
			model.add_sentence(line?.as_ref());
		}
		model.log_trained();
		Ok(model)
	}

	/// Trains one model from several corpus files, read lazily one after
	/// the other.
	///
	/// # Errors
	/// Returns [`Error::NoCorpus`] if `paths` is empty, or an I/O error if a
	/// file cannot be opened or read.
	pub fn from_files<I, P>(paths: I) -> Result<Self>
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		let mut model = Self::default();
		let mut nb_files = 0;
		for path in paths {
			info!("Reading corpus {}", path.as_ref().display());
			for line in read_lines(&path)? {
				model.add_sentence(&line?);
			}
			nb_files += 1;
		}
		if nb_files == 0 {
			return Err(Error::NoCorpus);
		}
		model.log_trained();
		Ok(model)
	}

	/// Tokenizes one line and records all of its trigrams.
	fn add_sentence(&mut self, line: &str) {
		let tokens = tokenize_line(line);
		for trigram in trigrams(&tokens) {
			self.observe(trigram);
		}
		self.sentences.insert(line_fingerprint(tokens.iter().filter_map(Token::as_word)));
		self.nb_sentences += 1;
	}

	fn observe(&mut self, trigram: Trigram) {
		self.observations += 1;
		match self.counts.get_mut(&trigram) {
			Some(count) => *count += 1,
			None => {
				self.candidates
					.entry(trigram.context.clone())
					.or_default()
					.push(trigram.successor.clone());
				self.counts.insert(trigram, 1);
			}
		}
	}

	fn log_trained(&self) {
		let stats = self.stats();
		info!(
			"Trained on {} lines: {} contexts, {} distinct trigrams, {} observations",
			stats.sentences, stats.contexts, stats.distinct_trigrams, stats.observations
		);
	}

	/// Distinct successors of `context` in first-seen order.
	///
	/// Empty if the context was never observed.
	pub fn candidates(&self, context: &Context) -> &[Token] {
		self.candidates.get(context).map(Vec::as_slice).unwrap_or_default()
	}

	/// Number of times `trigram` occurred in the corpus (0 if never).
	pub fn count(&self, trigram: &Trigram) -> usize {
		self.counts.get(trigram).copied().unwrap_or(0)
	}

	/// Candidates of `context` paired with their occurrence counts, in
	/// candidate order.
	pub fn weighted_candidates<'a>(&'a self, context: &'a Context) -> impl Iterator<Item = (&'a Token, usize)> + 'a {
		self.candidates(context)
			.iter()
			.map(move |word| (word, self.count(&context.extend(word.clone()))))
	}

	/// Draws the successor of `context`, weighted by observed frequency.
	///
	/// See [`sampler::sample`].
	pub fn predict<R: Rng + ?Sized>(&self, context: &Context, rng: &mut R) -> Token {
		sampler::sample(self, context, rng)
	}

	/// Whether `text` is exactly one of the training lines once tokenized
	/// (lowercased, whitespace collapsed).
	pub fn contains_sentence(&self, text: &str) -> bool {
		let lowercase = text.to_lowercase();
		self.sentences.contains(&line_fingerprint(lowercase.split_whitespace()))
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	pub fn stats(&self) -> ModelStats {
		ModelStats {
			sentences: self.nb_sentences,
			contexts: self.candidates.len(),
			distinct_trigrams: self.counts.len(),
			observations: self.observations,
		}
	}
}

/// Hashes a word sequence. `DefaultHasher::new` uses fixed keys, so the
/// same words always give the same value.
fn line_fingerprint<'a>(words: impl Iterator<Item = &'a str>) -> u64 {
	let mut hasher = DefaultHasher::new();
	for word in words {
		word.hash(&mut hasher);
	}
	hasher.finish()
}
