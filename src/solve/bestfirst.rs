use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use log::{debug, info, trace};
use rayon::prelude::*;

use crate::cube::{cubestate::CubeState, turn::*, CubeError};
use crate::solve::scorer::{Efficiency, Scorer};

/// Why no sequence of moves was returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
	#[error("Cannot turn a cube of width {start} into a cube of width {goal}")]
	WidthMismatch { start: usize, goal: usize },
	#[error("The goal cannot be reached from the start")]
	NoSolution,
	#[error("Gave up after expanding {expanded} nodes")]
	LimitReached { expanded: usize },
	#[error(transparent)]
	Cube(#[from] CubeError),
}

/// Bounds for a search. Everything is unbounded by default.
///
/// max_depth: Nodes this many moves away from the start are not expanded
/// max_expansions: Stop after expanding this many nodes and return the best
///                 solution found so far
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct SolverConfig {
	pub max_depth: Option<usize>,
	pub max_expansions: Option<usize>,
}

impl SolverConfig {
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = Some(max_depth);
		self
	}

	pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
		self.max_expansions = Some(max_expansions);
		self
	}
}

/// Counters of a single search.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct SolveStats {
	/// Nodes stored, including the start and the solutions
	pub created: usize,
	pub expanded: usize,
	/// Known nodes which got a new parent
	pub reparented: usize,
	/// Children thrown away because they were already known
	pub discarded: usize,
}

/// A cube reached by the search.
///
/// producing_move: The move turning the parent into this state
/// parent: Index of the parent in the arena, `None` for the start
#[derive(Clone, Debug)]
struct SearchNode {
	state: CubeState,
	score: usize,
	producing_move: Option<Move>,
	depth: usize,
	parent: Option<usize>,
}

/// An entry of the frontier. The best efficiency comes first,
/// ties go to the node pushed first.
#[derive(PartialEq, Eq)]
struct Candidate {
	efficiency: Efficiency,
	seq: usize,
	id: usize,
}

impl Ord for Candidate {
	fn cmp(&self, other: &Self) -> Ordering {
		self.efficiency
			.cmp(&other.efficiency)
			.then_with(|| other.seq.cmp(&self.seq))
	}
}

impl PartialOrd for Candidate {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// A child of the expanded node, computed off the main thread.
struct Child {
	mv: Move,
	state: CubeState,
	solved: bool,
	score: usize,
	key: CubeState,
}

/// Greedy best-first search for a sequence of moves which turns `start`
/// into the goal, held in any orientation.
///
/// Nodes are ranked by score per move. Every state is stored once per
/// orientation class, so a cube reached again in another orientation is
/// not searched twice. The result is a valid sequence but not necessarily
/// the shortest one.
pub struct Solver {
	start: CubeState,
	goal: CubeState,
	scorer: Scorer,
	config: SolverConfig,

	nodes: Vec<SearchNode>,
	visited: HashMap<CubeState, usize>,
	frontier: BinaryHeap<Candidate>,
	seq: usize,
	/// Index and length of the shortest solution so far
	best: Option<(usize, usize)>,
	stats: SolveStats,
}

impl Solver {
	pub fn new(start: &CubeState, goal: &CubeState) -> Self {
		Self::with_config(start, goal, SolverConfig::default())
	}

	pub fn with_config(start: &CubeState, goal: &CubeState, config: SolverConfig) -> Self {
		Self {
			start: start.clone(),
			goal: goal.clone(),
			scorer: Scorer::new(goal),
			config,
			nodes: vec![],
			visited: HashMap::new(),
			frontier: BinaryHeap::new(),
			seq: 0,
			best: None,
			stats: SolveStats::default(),
		}
	}

	/// The counters of the last call to `solve`.
	pub fn stats(&self) -> SolveStats {
		self.stats
	}

	/// Run the search. Returns an empty sequence if the start already
	/// is the goal.
	pub fn solve(&mut self) -> Result<Vec<Move>, SolveError> {
		self.reset();

		if self.start.width() != self.goal.width() {
			return Err(SolveError::WidthMismatch {
				start: self.start.width(),
				goal: self.goal.width(),
			});
		}
		if self.start.color_counts() != self.goal.color_counts() {
			debug!("Start and goal don't have the same colors");
			return Err(SolveError::NoSolution);
		}
		if self.scorer.is_goal(&self.start) {
			return Ok(vec![]);
		}

		info!(
			"Searching for a solution of a {}x{} cube",
			self.start.width(),
			self.start.width()
		);
		let time = Instant::now();

		let root = self.push_node(
			self.start.clone(),
			self.scorer.score(&self.start),
			None,
			0,
			None,
		);
		self.visited.insert(self.start.canonical(), root);

		let mut limited = !self.budget_left();
		if !limited && self.may_expand(root, &mut limited) {
			self.expand(root)?;
		}

		while let Some(Candidate { id, .. }) = self.frontier.pop() {
			let depth = self.nodes[id].depth;
			if self.best.is_some_and(|(_, len)| len <= depth + 1) {
				continue;
			}
			if !self.budget_left() {
				debug!("Expansion budget of {} exhausted", self.stats.expanded);
				limited = true;
				break;
			}
			if !self.may_expand(id, &mut limited) {
				continue;
			}

			self.expand(id)?;
		}

		info!(
			"Search finished in {:.3}s: {} nodes created, {} expanded",
			time.elapsed().as_secs_f64(),
			self.stats.created,
			self.stats.expanded
		);
		debug!("{:?}", self.stats);

		match self.best {
			Some((id, _)) => {
				let path = self.path_to(id);
				info!("Found a solution with {} moves", path.len());
				Ok(path)
			}
			None if limited => Err(SolveError::LimitReached {
				expanded: self.stats.expanded,
			}),
			None => Err(SolveError::NoSolution),
		}
	}

	// ===== Helpers =====

	fn reset(&mut self) {
		self.nodes.clear();
		self.visited.clear();
		self.frontier.clear();
		self.seq = 0;
		self.best = None;
		self.stats = SolveStats::default();
	}

	fn budget_left(&self) -> bool {
		self.config
			.max_expansions
			.map_or(true, |max| self.stats.expanded < max)
	}

	/// Whether the node lies within the depth bound. Sets `limited` if it doesn't.
	fn may_expand(&self, id: usize, limited: &mut bool) -> bool {
		match self.config.max_depth {
			Some(max) if self.nodes[id].depth >= max => {
				*limited = true;
				false
			}
			_ => true,
		}
	}

	fn push_node(
		&mut self,
		state: CubeState,
		score: usize,
		producing_move: Option<Move>,
		depth: usize,
		parent: Option<usize>,
	) -> usize {
		self.nodes.push(SearchNode {
			state,
			score,
			producing_move,
			depth,
			parent,
		});
		self.stats.created += 1;
		self.nodes.len() - 1
	}

	/// Apply every move to the node and merge the results into the search.
	fn expand(&mut self, id: usize) -> Result<(), SolveError> {
		let node = &self.nodes[id];
		let depth = node.depth + 1;
		let scorer = &self.scorer;

		trace!(
			"Expanding node {} at depth {} with score {}",
			id,
			node.depth,
			node.score
		);

		let children = all_moves(node.state.width())
			.into_par_iter()
			.map(|mv| -> Result<Child, CubeError> {
				let mut state = node.state.clone();
				state.apply_move(mv)?;

				let solved = scorer.is_goal(&state);
				let score = scorer.score(&state);
				let key = state.canonical();

				Ok(Child {
					mv,
					state,
					solved,
					score,
					key,
				})
			})
			.collect::<Result<Vec<_>, _>>()?;

		self.stats.expanded += 1;

		for child in children {
			self.merge(id, depth, child);
		}

		Ok(())
	}

	fn merge(&mut self, parent: usize, depth: usize, child: Child) {
		if child.solved {
			if self.best.map_or(true, |(_, len)| depth < len) {
				let id = self.push_node(child.state, child.score, Some(child.mv), depth, Some(parent));
				debug!("Found a solution with {} moves", depth);
				self.best = Some((id, depth));
			} else {
				self.stats.discarded += 1;
			}
			return;
		}

		if let Some(&known) = self.visited.get(&child.key) {
			let node = &mut self.nodes[known];

			// Only an identical state can take over the path, an orientation
			// of it would need another producing move
			if depth <= node.depth && node.state == child.state {
				node.parent = Some(parent);
				node.producing_move = Some(child.mv);
				node.depth = depth;
				self.stats.reparented += 1;
			} else {
				self.stats.discarded += 1;
			}
			return;
		}

		let id = self.push_node(child.state, child.score, Some(child.mv), depth, Some(parent));
		self.visited.insert(child.key, id);
		self.frontier.push(Candidate {
			efficiency: Efficiency::new(child.score, depth),
			seq: self.seq,
			id,
		});
		self.seq += 1;
	}

	/// Walk the parents back to the start.
	fn path_to(&self, id: usize) -> Vec<Move> {
		let mut out = vec![];
		let mut current = Some(id);

		while let Some(id) = current {
			let node = &self.nodes[id];
			if let Some(mv) = node.producing_move {
				out.push(mv);
			}
			current = node.parent;
		}

		out.reverse();
		out
	}
}

/// Find a sequence of moves turning `start` into `goal`, held in any orientation.
pub fn solve(start: &CubeState, goal: &CubeState) -> Result<Vec<Move>, SolveError> {
	Solver::new(start, goal).solve()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;

	fn solved(width: usize) -> CubeState {
		CubeState::solved(width).unwrap()
	}

	fn scramble(width: usize, moves: &str) -> CubeState {
		let mut cube = solved(width);
		cube.apply_moves(parse_moves(moves).unwrap()).unwrap();
		cube
	}

	/// Applies the solution and checks that it reaches the goal in some orientation.
	fn assert_solves(start: &CubeState, goal: &CubeState, solution: &[Move]) {
		let mut cube = start.clone();
		cube.apply_moves(solution.iter().copied()).unwrap();
		assert!(cube.same_orientation_class(goal), "{:?} doesn't solve\n{}", solution, start);
	}

	#[test_log::test]
	fn already_solved() {
		for width in 1..=4 {
			let cube = scramble(width, "X0 Y0'");
			assert_eq!(solve(&cube, &cube), Ok(vec![]));

			for orientation in cube.all_orientations() {
				assert_eq!(solve(&cube, &orientation), Ok(vec![]));
			}
		}
	}

	#[test_log::test]
	/// A single move is undone by its inverse, nothing else fits on bigger cubes
	fn single_move_is_inverted() {
		for width in 3..=5 {
			for mv in all_moves(width) {
				let mut cube = solved(width);
				cube.apply_move(mv).unwrap();

				let solution = solve(&cube, &solved(width)).unwrap();
				assert_eq!(solution, vec![mv.inverse()], "width={width} {mv}");
			}
		}
	}

	#[test_log::test]
	/// On a 2x2 an outer turn is a rotation plus a turn of the other layer
	fn single_move_on_small_cubes() {
		for width in 1..=2 {
			for mv in all_moves(width) {
				let mut cube = solved(width);
				cube.apply_move(mv).unwrap();

				let solution = solve(&cube, &solved(width)).unwrap();
				assert!(solution.len() <= 1);
				assert_solves(&cube, &solved(width), &solution);
			}
		}
	}

	#[test_log::test]
	fn two_moves() {
		let cube = scramble(3, "X2 Z0");
		let mut solver = Solver::new(&cube, &solved(3));
		let solution = solver.solve().unwrap();

		assert_eq!(solution, parse_moves("Z0' X2'").unwrap());
		// The start and the node next to the solution
		assert_eq!(solver.stats().expanded, 2);
	}

	#[test_log::test]
	fn three_moves() {
		for (width, moves) in [(3, "X2 Z0 Y2"), (3, "X0 Y1 Z2'"), (2, "X0 Y1' Z0")] {
			let cube = scramble(width, moves);
			let solution = solve(&cube, &solved(width)).unwrap();

			assert!(solution.len() <= 3, "{moves}: {:?}", solution);
			assert_solves(&cube, &solved(width), &solution);
		}
	}

	#[test_log::test]
	/// The goal doesn't have to be the solved cube
	fn scrambled_goal() {
		let goal = scramble(3, "Y1 X0'");
		let mut start = goal.clone();
		start.apply_moves(parse_moves("Z1 X2").unwrap()).unwrap();
		start.rotate_whole(Axis::Y, true);

		let solution = solve(&start, &goal).unwrap();
		assert!(solution.len() <= 2);
		assert_solves(&start, &goal, &solution);
	}

	#[test]
	fn different_widths() {
		assert_eq!(
			solve(&solved(2), &solved(3)),
			Err(SolveError::WidthMismatch { start: 2, goal: 3 })
		);
	}

	#[test]
	fn different_colors() {
		let mut tokens = vec!["w"; 54];
		tokens[4] = "r";
		let start = CubeState::from_tokens(tokens).unwrap();

		let mut solver = Solver::new(&start, &solved(3));
		assert_eq!(solver.solve(), Err(SolveError::NoSolution));
		assert_eq!(solver.stats().expanded, 0);
	}

	#[test_log::test]
	/// A mirror image has the right colors, but no sequence of moves reaches it
	fn mirrored_cube() {
		let start = CubeState::from_str("wgobry").unwrap();
		let mut solver = Solver::new(&start, &solved(1));

		assert_eq!(solver.solve(), Err(SolveError::NoSolution));
		assert!(solver.stats().expanded > 0);
	}

	#[test_log::test]
	fn expansion_limit() {
		let cube = scramble(3, "X2 Z0 Y2");
		let config = SolverConfig::default().with_max_expansions(1);
		let mut solver = Solver::with_config(&cube, &solved(3), config);
		assert_eq!(solver.solve(), Err(SolveError::LimitReached { expanded: 1 }));

		// Enough to find the solution, which is returned even though the search stops early
		let cube = scramble(3, "X2 Z0");
		let config = SolverConfig::default().with_max_expansions(2);
		let solution = Solver::with_config(&cube, &solved(3), config).solve().unwrap();
		assert_solves(&cube, &solved(3), &solution);
	}

	#[test_log::test]
	fn depth_limit() {
		let cube = scramble(3, "X2 Z0");

		let config = SolverConfig::default().with_max_depth(1);
		let mut solver = Solver::with_config(&cube, &solved(3), config);
		assert!(matches!(solver.solve(), Err(SolveError::LimitReached { .. })));
		assert_eq!(solver.stats().expanded, 1);

		let config = SolverConfig::default().with_max_depth(2);
		let solution = Solver::with_config(&cube, &solved(3), config).solve().unwrap();
		assert_eq!(solution.len(), 2);
	}

	#[test]
	fn limits_dont_affect_trivial_cases() {
		let config = SolverConfig::default().with_max_expansions(0).with_max_depth(0);
		let cube = solved(3);
		assert_eq!(Solver::with_config(&cube, &cube, config).solve(), Ok(vec![]));

		let cube = scramble(3, "Y0");
		assert_eq!(
			Solver::with_config(&cube, &solved(3), config).solve(),
			Err(SolveError::LimitReached { expanded: 0 })
		);
	}

	#[test_log::test]
	/// Solving twice with the same solver gives the same answer
	fn solver_is_reusable() {
		let cube = scramble(2, "X0 Y1' Z0");
		let mut solver = Solver::new(&cube, &solved(2));

		let first = solver.solve().unwrap();
		let stats = solver.stats();
		assert_eq!(solver.solve().unwrap(), first);
		assert_eq!(solver.stats(), stats);
		assert!(stats.created > stats.expanded);
	}
}
