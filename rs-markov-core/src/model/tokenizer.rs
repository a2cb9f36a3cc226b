use super::token::Token;

/// Splits one corpus line into a bounded token sequence.
///
/// The line is lowercased and split on whitespace. Punctuation stays attached
/// to its word. The result is always `[Begin, Begin, w1, .., wn, End]`, so an
/// empty line still yields `[Begin, Begin, End]`.
pub fn tokenize_line(line: &str) -> Vec<Token> {
	let mut tokens = vec![Token::Begin, Token::Begin];
	tokens.extend(line.to_lowercase().split_whitespace().map(Token::word));
	tokens.push(Token::End);
	tokens
}

/// Lazily tokenizes a stream of lines, one sequence per line.
///
/// Nothing is buffered beyond the current line; restarting means handing
/// over a fresh line source.
pub fn tokenize<I, S>(lines: I) -> impl Iterator<Item = Vec<Token>>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	lines.into_iter().map(|line| tokenize_line(line.as_ref()))
}
