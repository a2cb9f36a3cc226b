use std::mem;

use super::token::Token;

/// Two consecutive tokens, used as the lookup key of the model.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Context {
	pub previous: Token,
	pub current: Token,
}

impl Context {
	pub fn new(previous: Token, current: Token) -> Self {
		Self { previous, current }
	}

	/// The context every walk starts from: `(Begin, Begin)`.
	pub fn begin() -> Self {
		Self::new(Token::Begin, Token::Begin)
	}

	/// Builds the trigram made of this context followed by `successor`.
	pub fn extend(&self, successor: Token) -> Trigram {
		Trigram { context: self.clone(), successor }
	}

	/// Slides the context one token forward: `(a, b)` becomes `(b, next)`.
	pub fn shift(&mut self, next: Token) {
		self.previous = mem::replace(&mut self.current, next);
	}
}

/// A context extended by the token observed right after it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Trigram {
	pub context: Context,
	pub successor: Token,
}

/// Yields the `n - 2` overlapping trigrams of a sequence, left to right.
///
/// Sequences shorter than three tokens yield nothing.
pub fn trigrams(tokens: &[Token]) -> impl Iterator<Item = Trigram> + '_ {
	tokens.windows(3).map(|w| Trigram {
		context: Context::new(w[0].clone(), w[1].clone()),
		successor: w[2].clone(),
	})
}
