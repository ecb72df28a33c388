use std::str::FromStr;

use rand::Rng;
use strum::{EnumCount, IntoEnumIterator};

use crate::cube::CubeError;

/// The three axes a layer can be turned around.
///
/// With face 0 on top and face 1 facing the observer:
/// X spans left to right, Y spans top to bottom and Z spans front to back.
#[derive(
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Debug,
	strum::EnumIter,
	strum::EnumCount,
	strum::Display,
	serde::Serialize,
	serde::Deserialize,
)]
#[repr(u8)]
pub enum Axis {
	X,
	Y,
	Z,
}

const AXES: [Axis; Axis::COUNT] = [Axis::X, Axis::Y, Axis::Z];

/// A single quarter turn.
///
/// axis: The axis the layer rotates around
/// position: The layer. 0 is the left-most column (X), the top row (Y)
///           or the layer closest to the observer (Z).
/// reverse: Turn the other way round. The normal direction turns the
///          layer at position 0 clockwise when looking at the face
///          capping that end of the axis.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub struct Move {
	pub axis: Axis,
	pub position: usize,
	pub reverse: bool,
}

impl Move {
	pub const fn new(axis: Axis, position: usize, reverse: bool) -> Self {
		Self {
			axis,
			position,
			reverse,
		}
	}

	/// Create a move from a signed layer position, rejecting negative ones.
	pub fn try_new(axis: Axis, position: i64, reverse: bool) -> Result<Self, CubeError> {
		let position =
			usize::try_from(position).map_err(|_| CubeError::NegativePosition(position))?;
		Ok(Self::new(axis, position, reverse))
	}

	/// The move which undoes this one.
	pub const fn inverse(self) -> Self {
		Self {
			reverse: !self.reverse,
			..self
		}
	}

	/// Turn itself into the move which negates itself.
	pub fn invert(&mut self) {
		self.reverse = !self.reverse;
	}
}

impl std::fmt::Display for Move {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}{}", self.axis, self.position)?;
		if self.reverse {
			write!(f, "'")?;
		}
		Ok(())
	}
}

impl FromStr for Move {
	type Err = CubeError;

	/// Parses the notation written by `Display`, e.g. "X0", "y2'".
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = || CubeError::InvalidMove(s.to_string());

		let mut chars = s.chars();
		let axis = match chars.next() {
			Some('X' | 'x') => Axis::X,
			Some('Y' | 'y') => Axis::Y,
			Some('Z' | 'z') => Axis::Z,
			_ => return Err(invalid()),
		};

		let rest = chars.as_str();
		let (digits, reverse) = match rest.strip_suffix('\'') {
			Some(digits) => (digits, true),
			None => (rest, false),
		};
		let position: i64 = digits.parse().map_err(|_| invalid())?;

		Self::try_new(axis, position, reverse)
	}
}

/// Parse a whitespace separated sequence of moves.
pub fn parse_moves<T>(string: T) -> Result<Vec<Move>, CubeError>
where
	T: AsRef<str>,
{
	string.as_ref().split_whitespace().map(Move::from_str).collect()
}

/// Every legal move on a cube of the given width, in the order the solver
/// tries them: axis by axis, layer by layer, reverse before normal.
pub fn all_moves(width: usize) -> Vec<Move> {
	let mut out = Vec::with_capacity(Axis::COUNT * width * 2);

	for axis in Axis::iter() {
		for position in 0..width {
			out.push(Move::new(axis, position, true));
			out.push(Move::new(axis, position, false));
		}
	}

	out
}

/// Generate a random sequence of legal moves for a cube of the given width.
pub fn random_moves(width: usize, count: usize) -> Vec<Move> {
	if width == 0 {
		return vec![];
	}

	let mut rng = rand::thread_rng();
	(0..count)
		.map(|_| {
			Move::new(
				AXES[rng.gen_range(0..AXES.len())],
				rng.gen_range(0..width),
				rng.gen_bool(0.5),
			)
		})
		.collect()
}
