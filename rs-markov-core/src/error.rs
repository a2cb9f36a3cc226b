use thiserror::Error;

/// Errors raised by the collaborator-facing parts of the crate.
///
/// Training, sampling and plain generation never fail: an unseen context
/// simply ends the walk. Only file loading and bounded generation can
/// produce one of these.
#[derive(Debug, Error)]
pub enum Error {
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),

	#[error("invalid generation policy: {0}")]
	InvalidPolicy(String),

	/// Every walk broke the policy's hard limits.
	#[error("no output satisfied the generation policy after {attempts} attempts")]
	AttemptsExhausted { attempts: usize },

	#[error("no corpus given")]
	NoCorpus,

	/// A corpus name that could resolve outside its directory.
	#[error("invalid corpus name: {0:?}")]
	InvalidCorpusName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
