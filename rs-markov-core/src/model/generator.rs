use rand::Rng;

use super::sampler;
use super::token::Token;
use super::trigram::Context;
use super::trigram_model::TrigramModel;

/// A random walk through a [`TrigramModel`], one word per step.
///
/// The walk keeps a rolling `(previous, current)` context. Each step yields
/// the current word, then samples its successor and slides the context.
/// It ends when the sampler returns `End`.
///
/// Nothing bounds the length of a walk: a model whose cycles never reach
/// `End` would yield forever. Callers that need a hard stop use
/// [`Iterator::take`] or a [`GenerationPolicy`](super::policy::GenerationPolicy).
pub struct Walk<'m, R> {
	model: &'m TrigramModel,
	rng: R,
	context: Context,
}

impl<'m, R: Rng> Walk<'m, R> {
	/// Starts a walk from `initial`, or from a word drawn after
	/// `(Begin, Begin)` when no initial word is given.
	///
	/// A blank initial word counts as none. The initial word is used as
	/// given, without lowercasing.
	pub fn new(model: &'m TrigramModel, initial: Option<&str>, mut rng: R) -> Self {
		let first = match initial.map(str::trim).filter(|w| !w.is_empty()) {
			Some(word) => Token::word(word),
			None => sampler::sample(model, &Context::begin(), &mut rng),
		};
		Self { model, rng, context: Context::new(Token::Begin, first) }
	}
}

impl<R: Rng> Iterator for Walk<'_, R> {
	type Item = String;

	fn next(&mut self) -> Option<String> {
		let word = self.context.current.as_word()?.to_owned();
		let next = sampler::sample(self.model, &self.context, &mut self.rng);
		self.context.shift(next);
		Some(word)
	}
}

/// Generates one text by walking the model until `End`.
///
/// Words are joined by single spaces; sentinels never appear in the result.
/// An empty model (or a corpus of empty lines) produces an empty string.
pub fn generate<R: Rng + ?Sized>(model: &TrigramModel, initial: Option<&str>, rng: &mut R) -> String {
	Walk::new(model, initial, rng).collect::<Vec<_>>().join(" ")
}
