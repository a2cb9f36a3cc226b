use std::fmt;

/// Rendering of the begin sentinel.
pub const BEGIN_MARK: &str = "^";

/// Rendering of the end sentinel.
pub const END_MARK: &str = "$";

/// A unit of text seen by the model.
///
/// Sentinels are their own variants, so a corpus word that happens to be
/// spelled `^` or `$` is still a plain `Word` and never ends a walk.
///
/// # Invariants
/// - `Begin` only occupies the first two slots of a tokenized line
/// - `End` only occupies the last slot and is never part of a context
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
	Begin,
	End,
	Word(String),
}

impl Token {
	pub fn word(word: impl Into<String>) -> Self {
		Token::Word(word.into())
	}

	pub fn is_end(&self) -> bool {
		matches!(self, Token::End)
	}

	/// Returns the corpus word, or `None` for a sentinel.
	pub fn as_word(&self) -> Option<&str> {
		match self {
			Token::Word(w) => Some(w),
			_ => None,
		}
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Token::Begin => f.write_str(BEGIN_MARK),
			Token::End => f.write_str(END_MARK),
			Token::Word(w) => f.write_str(w),
		}
	}
}
