use std::path::PathBuf;

use clap::Parser;

/// Server configuration, from the command line or the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "rs-markov-server", version, about = "Serves trigram Markov text generation over HTTP")]
pub struct Config {
	/// Address to bind
	#[arg(long, env = "MARKOV_HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Port to bind
	#[arg(long, env = "MARKOV_PORT", default_value_t = 5000)]
	pub port: u16,

	/// Directory holding the `<name>.txt` corpora
	#[arg(long, env = "MARKOV_DATA_DIR", default_value = "./data")]
	pub data_dir: String,

	/// Comma-separated corpus names to train on at startup
	#[arg(long, env = "MARKOV_CORPORA", value_delimiter = ',')]
	pub corpora: Vec<String>,

	/// Allow cross-origin requests from any origin
	#[arg(long, env = "MARKOV_CORS")]
	pub cors: bool,
}

impl Config {
	/// Path of the corpus file for `name`, inside `data_dir`.
	pub fn corpus_path(&self, name: &str) -> rs_markov_core::Result<PathBuf> {
		rs_markov_core::io::corpus_file(&self.data_dir, name, "txt")
	}
}
