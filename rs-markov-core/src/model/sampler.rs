use rand::Rng;

use super::token::Token;
use super::trigram::Context;
use super::trigram_model::TrigramModel;

/// Selects a candidate from a cumulative-count scan.
///
/// Counts are accumulated in iteration order and the first candidate whose
/// running total exceeds `draw` is returned. With `draw` uniform in
/// `[0, total)`, each candidate is picked with probability `count / total`.
///
/// Returns `None` when `draw >= total`.
pub fn pick_weighted<T, I>(weighted: I, draw: usize) -> Option<T>
where
	I: IntoIterator<Item = (T, usize)>,
{
	let mut cumulative = 0;
	for (candidate, count) in weighted {
		cumulative += count;
		if cumulative > draw {
			return Some(candidate);
		}
	}
	None
}

/// Draws the successor of `context` with probability proportional to its
/// trigram count.
///
/// An unseen context yields `End`: this is how a walk terminates, not an
/// error. O(k) in the number of candidates of the context.
pub fn sample<R: Rng + ?Sized>(model: &TrigramModel, context: &Context, rng: &mut R) -> Token {
	let weighted: Vec<(&Token, usize)> = model.weighted_candidates(context).collect();
	let total: usize = weighted.iter().map(|(_, count)| count).sum();
	if total == 0 {
		return Token::End;
	}

	let draw = rng.random_range(0..total);
	// Cannot miss while draw < total
	pick_weighted(weighted, draw).cloned().unwrap_or(Token::End)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn draws_split_by_cumulative_counts() {
		let weighted = [("c", 9), ("d", 1)];
		for draw in 0..9 {
			assert_eq!(pick_weighted(weighted, draw), Some("c"));
		}
		assert_eq!(pick_weighted(weighted, 9), Some("d"));
		assert_eq!(pick_weighted(weighted, 10), None);
	}

	#[test]
	fn nothing_to_pick_from() {
		assert_eq!(pick_weighted(Vec::<(&str, usize)>::new(), 0), None);
	}

	#[test]
	fn unseen_context_ends_the_walk() {
		let model = TrigramModel::train(["the cat sat"]);
		let mut rng = StdRng::seed_from_u64(7);
		let context = Context::new(Token::word("dog"), Token::word("barked"));
		for _ in 0..10 {
			assert_eq!(sample(&model, &context, &mut rng), Token::End);
		}
		assert_eq!(sample(&TrigramModel::default(), &Context::begin(), &mut rng), Token::End);
	}

	#[test]
	fn single_candidate_is_certain() {
		let model = TrigramModel::train(["the cat sat", "the cat ran"]);
		let mut rng = StdRng::seed_from_u64(1);
		let context = Context::new(Token::Begin, Token::word("the"));
		for _ in 0..20 {
			assert_eq!(model.predict(&context, &mut rng), Token::word("cat"));
		}
	}

	#[test]
	fn frequencies_follow_counts() {
		let mut corpus = vec!["a b c"; 9];
		corpus.push("a b d");
		let model = TrigramModel::train(corpus);
		let context = Context::new(Token::word("a"), Token::word("b"));

		let mut rng = StdRng::seed_from_u64(42);
		let nb_c = (0..10_000)
			.filter(|_| sample(&model, &context, &mut rng) == Token::word("c"))
			.count();
		// Expected 9000, sd ~30
		assert!((8700..=9300).contains(&nb_c), "got {nb_c}");
	}

	#[test]
	fn same_seed_same_draws() {
		let model = TrigramModel::train(["x y a", "x y b", "x y c", "x y b"]);
		let context = Context::new(Token::word("x"), Token::word("y"));
		let run = |seed| {
			let mut rng = StdRng::seed_from_u64(seed);
			(0..50).map(|_| sample(&model, &context, &mut rng)).collect::<Vec<_>>()
		};
		assert_eq!(run(3), run(3));
	}
}
