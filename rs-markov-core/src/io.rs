use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Opens a text file and returns a lazy iterator over its lines.
///
/// - Lines are read one at a time, the file is never loaded whole
/// - Splits on `\n` / `\r\n`
pub fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<impl Iterator<Item = io::Result<String>>> {
	Ok(BufReader::new(File::open(filename)?).lines())
}

/// Resolves the file `<dir>/<name>.<extension>` for a corpus name.
///
/// A name must be a plain file stem: not empty, not starting with `.`, and
/// free of `/`, `\\` and `:`. This keeps every resolved path directly
/// inside `dir`.
///
/// # Errors
/// Returns [`Error::InvalidCorpusName`] for any other name.
pub fn corpus_file<P: AsRef<Path>>(dir: P, name: &str, extension: &str) -> Result<PathBuf> {
	let plain = !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\', ':']);
	if !plain {
		return Err(Error::InvalidCorpusName(name.to_owned()));
	}
	Ok(dir.as_ref().join(format!("{name}.{extension}")))
}

/// Names (file stems) of the files with `extension` directly inside `dir`,
/// sorted.
pub fn list_corpora<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut names = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if !path.is_file() || path.extension() != Some(std::ffi::OsStr::new(extension)) {
			continue;
		}
		if let Some(stem) = path.file_stem() {
			names.push(stem.to_string_lossy().into_owned());
		}
	}

	names.sort();
	Ok(names)
}
