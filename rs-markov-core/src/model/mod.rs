//! Trigram Markov chain over words.
//!
//! Data flows leaf-first through the submodules:
//! lines → `tokenizer` → `trigram` → `trigram_model` → `sampler` → `generator`,
//! with `policy` bounding generation for callers that publish the output.

/// Word tokens and the begin/end sentinels.
pub mod token;

/// Line to bounded token sequence.
pub mod tokenizer;

/// Two-token contexts, trigrams, and the sliding-window extractor.
pub mod trigram;

/// Frequency model: candidate lists and trigram counts.
///
/// Built once from a corpus, read-only afterwards.
pub mod trigram_model;

/// Frequency-weighted draw of a context's successor.
pub mod sampler;

/// Random walk producing one generated text.
pub mod generator;

/// Step cap, length limit and resampling around the generator.
pub mod policy;
