use log::{debug, warn};
use rand::Rng;

use super::generator::Walk;
use super::trigram_model::TrigramModel;
use crate::error::{Error, Result};

/// Caller-side limits applied around [`generate`](super::generator::generate).
///
/// A walk is not guaranteed to end, and its output may be too long for the
/// place it is published. `GenerationPolicy` bounds both and resamples a
/// fresh walk whenever one is rejected.
///
/// # Invariants
/// - `max_words >= 1`
/// - `nb_try >= 1`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationPolicy {
	/// Outputs must be strictly shorter than this many characters. 0 disables the check.
	char_limit: usize,

	/// Step cap: walks yielding more words are abandoned.
	max_words: usize,

	/// Number of walks attempted before giving up.
	nb_try: usize,

	/// Prefer outputs that are not a verbatim training line.
	pub reject_training_lines: bool,
}

impl Default for GenerationPolicy {
	fn default() -> Self {
		Self { char_limit: 120, max_words: 100, nb_try: 100, reject_training_lines: false }
	}
}

impl GenerationPolicy {
	/// # Errors
	/// Returns [`Error::InvalidPolicy`] if `max_words` or `nb_try` is 0.
	pub fn new(char_limit: usize, max_words: usize, nb_try: usize) -> Result<Self> {
		let mut policy = Self { char_limit, ..Self::default() };
		policy.set_max_words(max_words)?;
		policy.set_nb_try(nb_try)?;
		Ok(policy)
	}

	pub fn char_limit(&self) -> usize {
		self.char_limit
	}

	pub fn max_words(&self) -> usize {
		self.max_words
	}

	pub fn nb_try(&self) -> usize {
		self.nb_try
	}

	pub fn set_char_limit(&mut self, char_limit: usize) {
		self.char_limit = char_limit;
	}

	/// # Errors
	/// Returns an error if `max_words` is 0.
	pub fn set_max_words(&mut self, max_words: usize) -> Result<()> {
		if max_words == 0 {
			return Err(Error::InvalidPolicy("max_words must be >= 1".to_owned()));
		}
		self.max_words = max_words;
		Ok(())
	}

	/// # Errors
	/// Returns an error if `nb_try` is 0.
	pub fn set_nb_try(&mut self, nb_try: usize) -> Result<()> {
		if nb_try == 0 {
			return Err(Error::InvalidPolicy("nb_try must be >= 1".to_owned()));
		}
		self.nb_try = nb_try;
		Ok(())
	}

	fn fits(&self, text: &str) -> bool {
		self.char_limit == 0 || text.chars().count() < self.char_limit
	}
}

/// Generates one text that satisfies `policy`, resampling as needed.
///
/// # Behavior
/// - Each attempt is a fresh [`Walk`], stopped one word past `max_words`.
/// - Attempts over the step cap or the character limit are discarded.
/// - With `reject_training_lines`, attempts that reproduce a training line
///   are discarded too, but the first of them is kept as a fallback and
///   returned if nothing better shows up.
///
/// # Errors
/// Returns [`Error::AttemptsExhausted`] if no attempt fits the step cap and
/// the character limit. Retrying with a new call is always valid.
pub fn generate_with<R: Rng + ?Sized>(
	model: &TrigramModel,
	policy: &GenerationPolicy,
	initial: Option<&str>,
	rng: &mut R,
) -> Result<String> {
	let mut fallback: Option<String> = None;

	for attempt in 1..=policy.nb_try {
		let words: Vec<String> = Walk::new(model, initial, &mut *rng).take(policy.max_words.saturating_add(1)).collect();
		if words.len() > policy.max_words {
			debug!("Attempt {attempt}: over {} words, resampling", policy.max_words);
			continue;
		}

		let text = words.join(" ");
		if !policy.fits(&text) {
			debug!("Attempt {attempt}: {} chars over limit {}, resampling", text.chars().count(), policy.char_limit);
			continue;
		}

		if policy.reject_training_lines && model.contains_sentence(&text) {
			debug!("Attempt {attempt}: reproduces a training line, resampling");
			fallback.get_or_insert(text);
			continue;
		}

		return Ok(text);
	}

	match fallback {
		Some(text) => {
			warn!("Every attempt reproduced a training line, returning one anyway");
			Ok(text)
		}
		None => Err(Error::AttemptsExhausted { attempts: policy.nb_try }),
	}
}
