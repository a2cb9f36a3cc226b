//! Word-level trigram Markov text generation.
//!
//! A corpus is read line by line and turned into a frequency model mapping
//! each pair of consecutive words to the words observed after it. New text
//! is generated by walking that model from the start of a line until an end
//! marker is drawn.
//!
//! ```
//! use rand::SeedableRng;
//!
//! let model = rs_markov_core::train(["the cat sat", "the cat ran"]);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let text = rs_markov_core::generate(&model, None, &mut rng);
//! assert!(text == "the cat sat" || text == "the cat ran");
//! ```

/// Tokenizer, frequency model, sampler and generator.
pub mod model;

/// Corpus file helpers (lazy line reading, listing, naming).
pub mod io;

pub mod error;

pub use error::{Error, Result};
pub use model::generator::generate;
pub use model::policy::{generate_with, GenerationPolicy};
pub use model::token::Token;
pub use model::trigram_model::{ModelStats, TrigramModel};

/// Builds a model from a corpus in a single pass, one training line per item.
pub fn train<I, S>(corpus: I) -> TrigramModel
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	TrigramModel::train(corpus)
}
