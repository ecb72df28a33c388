use std::cmp::Ordering;
use std::collections::HashSet;

use crate::cube::cubestate::CubeState;

/// Compares cubes against every orientation of a goal cube.
///
/// The orientations are computed once, so a single scorer can rate
/// all the cubes a search produces.
#[derive(Clone, Debug)]
pub struct Scorer {
	goals: Vec<CubeState>,
	lookup: HashSet<CubeState>,
}

impl Scorer {
	pub fn new(goal: &CubeState) -> Self {
		let goals = goal.all_orientations();
		let lookup = goals.iter().cloned().collect();
		Self { goals, lookup }
	}

	/// The number of facets a perfect match has.
	pub fn max_score(&self) -> usize {
		self.goals.first().map_or(0, |goal| goal.facets().len())
	}

	/// The most facets `cube` shares with any orientation of the goal.
	/// Cubes of another width never share a facet.
	pub fn score(&self, cube: &CubeState) -> usize {
		self.goals
			.iter()
			.filter(|goal| goal.width() == cube.width())
			.map(|goal| {
				goal.facets()
					.iter()
					.zip(cube.facets())
					.filter(|(a, b)| a == b)
					.count()
			})
			.max()
			.unwrap_or(0)
	}

	/// Whether `cube` is the goal, held in any way.
	pub fn is_goal(&self, cube: &CubeState) -> bool {
		self.lookup.contains(cube)
	}
}

/// Shorthand for a one-off `Scorer::score`.
pub fn score(cube: &CubeState, goal: &CubeState) -> usize {
	Scorer::new(goal).score(cube)
}

/// Score per move spent, `score / depth`.
///
/// Compared exactly by cross multiplying, so 2/4 and 1/2 are equal.
/// A depth of 0 ranks above everything else.
#[derive(Clone, Copy, Debug)]
pub struct Efficiency {
	pub score: usize,
	pub depth: usize,
}

impl Efficiency {
	pub const fn new(score: usize, depth: usize) -> Self {
		Self { score, depth }
	}
}

impl Ord for Efficiency {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self.depth, other.depth) {
			(0, 0) => self.score.cmp(&other.score),
			(0, _) => Ordering::Greater,
			(_, 0) => Ordering::Less,
			_ => (self.score * other.depth).cmp(&(other.score * self.depth)),
		}
	}
}

impl PartialOrd for Efficiency {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for Efficiency {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Efficiency {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cube::turn::*;

	#[test]
	/// Every orientation of the goal is a perfect match
	fn orientations_score_perfectly() {
		for width in 1..=4 {
			let mut goal = CubeState::solved(width).unwrap();
			goal.apply_moves(random_moves(width, 20)).unwrap();
			let scorer = Scorer::new(&goal);

			assert_eq!(scorer.max_score(), 6 * width * width);
			for orientation in goal.all_orientations() {
				assert_eq!(scorer.score(&orientation), 6 * width * width);
				assert_eq!(score(&orientation, &goal), 6 * width * width);
				assert!(scorer.is_goal(&orientation));
			}
		}
	}

	#[test]
	fn slice_turn_lowers_score() {
		let goal = CubeState::solved(3).unwrap();
		let scorer = Scorer::new(&goal);

		let mut cube = goal.clone();
		cube.apply_turn(Axis::Y, 1, false).unwrap();

		// Four rows of three facets moved to the wrong face
		assert_eq!(scorer.score(&cube), 54 - 12);
		assert!(!scorer.is_goal(&cube));
	}

	#[test]
	fn other_widths_never_match() {
		let scorer = Scorer::new(&CubeState::solved(2).unwrap());
		let cube = CubeState::solved(3).unwrap();
		assert_eq!(scorer.score(&cube), 0);
		assert!(!scorer.is_goal(&cube));
	}

	#[test]
	fn efficiency_is_exact() {
		assert_eq!(Efficiency::new(2, 4), Efficiency::new(1, 2));
		assert!(Efficiency::new(54, 3) > Efficiency::new(35, 2));
		assert!(Efficiency::new(53, 3) < Efficiency::new(36, 2));
		assert!(Efficiency::new(1, 0) > Efficiency::new(54, 1));
		assert_eq!(
			Efficiency::new(36, 2).cmp(&Efficiency::new(54, 3)),
			Ordering::Equal
		);
	}
}
