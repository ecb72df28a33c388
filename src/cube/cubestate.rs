use std::str::FromStr;

use crate::cube::{turn::*, *};

/// A puzzle cube of any width, using a single array of facets.
///
/// The facet in row `r` and column `c` of face `f` lives at
/// `f * width² + r * width + c`. Rows of the ring faces run top to bottom
/// and columns left to right, as seen from outside the cube. The top face
/// has its last row next to the front face, the bottom face its first row.
///
/// Equality, hashing and ordering compare the width first and then every
/// facet, so two states are equal exactly when every face looks the same.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Vec<Vec<Color>>>", into = "Vec<Vec<Vec<Color>>>")]
pub struct CubeState {
	width: usize,
	data: Vec<Color>,
}

// ===== Layer turns =====

#[derive(Clone, Copy)]
enum Line {
	Row,
	Col,
}

/// A row or column of one face, read in the direction the turn moves it.
///
/// mirrored: The strip sits at `width - 1 - position` instead of `position`
/// reversed: The strip is read from its last facet to its first
#[derive(Clone, Copy)]
struct Strip {
	face: usize,
	line: Line,
	mirrored: bool,
	reversed: bool,
}

const fn strip(face: usize, line: Line, mirrored: bool, reversed: bool) -> Strip {
	Strip {
		face,
		line,
		mirrored,
		reversed,
	}
}

/*
 * The four strips moved by a layer turn.
 * A normal turn lets strip i receive strip i+1 (the last one receives the first),
 * a reverse turn runs the cycle the other way round.
 *
 * The back face is seen from behind, so its columns are mirrored against the
 * top and bottom faces. Around Z the top and bottom rows meet the side columns
 * at opposite ends, hence the reversals.
 */
const CYCLE_X: [Strip; 4] = [
	strip(TOP, Line::Col, false, false),
	strip(BACK, Line::Col, true, true),
	strip(BOTTOM, Line::Col, false, false),
	strip(FRONT, Line::Col, false, false),
];

const CYCLE_Y: [Strip; 4] = [
	strip(FRONT, Line::Row, false, false),
	strip(RIGHT, Line::Row, false, false),
	strip(BACK, Line::Row, false, false),
	strip(LEFT, Line::Row, false, false),
];

const CYCLE_Z: [Strip; 4] = [
	strip(TOP, Line::Row, true, false),
	strip(LEFT, Line::Col, true, true),
	strip(BOTTOM, Line::Row, false, true),
	strip(RIGHT, Line::Col, false, false),
];

const fn layer_cycle(axis: Axis) -> [Strip; 4] {
	match axis {
		Axis::X => CYCLE_X,
		Axis::Y => CYCLE_Y,
		Axis::Z => CYCLE_Z,
	}
}

/// The faces capping position 0 and position width-1 of an axis.
/// A normal turn rotates the first one clockwise and the second one counter-clockwise.
const fn layer_caps(axis: Axis) -> (usize, usize) {
	match axis {
		Axis::X => (LEFT, RIGHT),
		Axis::Y => (TOP, BOTTOM),
		Axis::Z => (FRONT, BACK),
	}
}

// ===== Whole cube rotations =====

/// R[slot] = (face, quarters): after the rotation, `slot` holds what `face`
/// held before, turned clockwise `quarters` times.
/// Equal to turning every layer of the axis in the same direction.
type Relabel = [(usize, u8); NUM_SIDES];

const R_X: Relabel = [(BACK, 2), (TOP, 0), (RIGHT, 3), (BOTTOM, 2), (LEFT, 1), (FRONT, 0)];
const R_X_REV: Relabel = [(FRONT, 0), (BOTTOM, 0), (RIGHT, 1), (TOP, 2), (LEFT, 3), (BACK, 2)];
const R_Y: Relabel = [(TOP, 1), (RIGHT, 0), (BACK, 0), (LEFT, 0), (FRONT, 0), (BOTTOM, 3)];
const R_Y_REV: Relabel = [(TOP, 3), (LEFT, 0), (FRONT, 0), (RIGHT, 0), (BACK, 0), (BOTTOM, 1)];
const R_Z: Relabel = [(LEFT, 1), (FRONT, 1), (TOP, 1), (BACK, 3), (BOTTOM, 1), (RIGHT, 1)];
const R_Z_REV: Relabel = [(RIGHT, 3), (FRONT, 3), (BOTTOM, 3), (BACK, 1), (TOP, 3), (LEFT, 3)];

const fn whole_rotation(axis: Axis, reverse: bool) -> &'static Relabel {
	match (axis, reverse) {
		(Axis::X, false) => &R_X,
		(Axis::X, true) => &R_X_REV,
		(Axis::Y, false) => &R_Y,
		(Axis::Y, true) => &R_Y_REV,
		(Axis::Z, false) => &R_Z,
		(Axis::Z, true) => &R_Z_REV,
	}
}

/// Returns the width n for which `count == 6 * n * n`.
fn width_from_count(count: usize) -> Option<usize> {
	if count == 0 || count % NUM_SIDES != 0 {
		return None;
	}

	let area = count / NUM_SIDES;
	let width = (1..=area).find(|w| w * w >= area)?;
	(width * width == area).then_some(width)
}

impl CubeState {
	/// Creates a *solved* cube, face `i` showing the `i`-th color.
	pub fn solved(width: usize) -> Result<Self, CubeError> {
		if width == 0 {
			return Err(CubeError::InvalidWidth(width));
		}

		let area = width * width;
		let data = (0..NUM_SIDES)
			.flat_map(|face| std::iter::repeat(Color::of_face(face).unwrap_or_default()).take(area))
			.collect();

		Ok(Self { width, data })
	}

	/// Creates a cube from six n-by-n grids, indexed `[face][row][column]`.
	pub fn from_faces(faces: &[Vec<Vec<Color>>]) -> Result<Self, CubeError> {
		if faces.len() != NUM_SIDES {
			return Err(CubeError::FaceCount(faces.len()));
		}

		let width = faces[0].len();
		if width == 0 {
			return Err(CubeError::InvalidWidth(width));
		}

		for (face, grid) in faces.iter().enumerate() {
			if grid.len() != width || grid.iter().any(|row| row.len() != width) {
				return Err(CubeError::NotSquare { face, width });
			}
		}

		let data = faces.iter().flatten().flatten().copied().collect();
		Ok(Self { width, data })
	}

	/// Creates a cube from a flat list of color names or initials, face by face
	/// and row by row. The number of tokens must be 6 * n * n.
	pub fn from_tokens<I, S>(tokens: I) -> Result<Self, CubeError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let tokens: Vec<S> = tokens.into_iter().collect();
		let width = width_from_count(tokens.len()).ok_or(CubeError::TokenCount(tokens.len()))?;

		let data = tokens
			.iter()
			.map(|token| {
				let token = token.as_ref();
				Color::from_str(token).map_err(|_| CubeError::UnknownColor(token.to_string()))
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self { width, data })
	}

	/// The n-by-n size of the cube.
	pub fn width(&self) -> usize {
		self.width
	}

	/// The number of facets on a single face.
	pub fn area(&self) -> usize {
		self.width * self.width
	}

	/// All facets, face by face and row by row.
	pub fn facets(&self) -> &[Color] {
		&self.data
	}

	/// The facets of a single face, row by row.
	pub fn face(&self, face: usize) -> &[Color] {
		let area = self.area();
		&self.data[face * area..(face + 1) * area]
	}

	pub fn get(&self, face: usize, row: usize, col: usize) -> Color {
		self.data[self.index(face, row, col)]
	}

	/// Copy the cube into six grids, indexed `[face][row][column]`.
	pub fn faces(&self) -> Vec<Vec<Vec<Color>>> {
		(0..NUM_SIDES)
			.map(|face| self.face(face).chunks(self.width).map(<[Color]>::to_vec).collect())
			.collect()
	}

	/// How often each color shows up on the cube.
	/// Turning never changes this.
	pub fn color_counts(&self) -> [usize; NUM_SIDES] {
		let mut out = [0; NUM_SIDES];
		for color in self.data.iter() {
			out[*color as usize] += 1;
		}
		out
	}

	/// Whether every face shows a single color, no matter which.
	pub fn is_solved(&self) -> bool {
		(0..NUM_SIDES).all(|face| {
			let facets = self.face(face);
			facets.iter().all(|c| *c == facets[0])
		})
	}

	/// Apply a quarter turn. Fails without touching the cube if the
	/// layer doesn't exist.
	pub fn apply_move(&mut self, mv: Move) -> Result<&mut Self, CubeError> {
		self.check_move(mv)?;
		self.turn_layer(mv.axis, mv.position, mv.reverse);
		Ok(self)
	}

	pub fn apply_turn(
		&mut self,
		axis: Axis,
		position: usize,
		reverse: bool,
	) -> Result<&mut Self, CubeError> {
		self.apply_move(Move::new(axis, position, reverse))
	}

	/// Apply the given sequence of moves.
	/// Every move is checked first, so an invalid one leaves the cube untouched.
	pub fn apply_moves<I>(&mut self, moves: I) -> Result<&mut Self, CubeError>
	where
		I: IntoIterator<Item = Move>,
	{
		let moves: Vec<Move> = moves.into_iter().collect();
		for mv in moves.iter() {
			self.check_move(*mv)?;
		}

		for mv in moves {
			self.turn_layer(mv.axis, mv.position, mv.reverse);
		}

		Ok(self)
	}

	/// Rotate the entire cube. This doesn't change the puzzle, only the way
	/// you look at it.
	pub fn rotate_whole(&mut self, axis: Axis, reverse: bool) -> &mut Self {
		let area = self.area();
		let bef = self.data.clone();

		for (slot, &(face, quarters)) in whole_rotation(axis, reverse).iter().enumerate() {
			self.data[slot * area..(slot + 1) * area]
				.copy_from_slice(&bef[face * area..(face + 1) * area]);

			match quarters {
				1 => self.rotate_face(slot, true),
				2 => {
					self.rotate_face(slot, true);
					self.rotate_face(slot, true);
				}
				3 => self.rotate_face(slot, false),
				_ => {}
			}
		}

		self
	}

	/// Same as `rotate_whole`, the position of the move is ignored.
	pub fn rotate_whole_by(&mut self, mv: Move) -> &mut Self {
		self.rotate_whole(mv.axis, mv.reverse)
	}

	// ===== Helpers =====

	fn index(&self, face: usize, row: usize, col: usize) -> usize {
		face * self.area() + row * self.width + col
	}

	fn check_move(&self, mv: Move) -> Result<(), CubeError> {
		if mv.position >= self.width {
			return Err(CubeError::PositionOutOfRange {
				position: mv.position,
				width: self.width,
			});
		}
		Ok(())
	}

	fn strip_indices(&self, strip: Strip, position: usize) -> Vec<usize> {
		let k = if strip.mirrored {
			self.width - 1 - position
		} else {
			position
		};

		let mut out: Vec<usize> = (0..self.width)
			.map(|i| match strip.line {
				Line::Row => self.index(strip.face, k, i),
				Line::Col => self.index(strip.face, i, k),
			})
			.collect();

		if strip.reversed {
			out.reverse();
		}
		out
	}

	fn turn_layer(&mut self, axis: Axis, position: usize, reverse: bool) {
		let strips = layer_cycle(axis).map(|s| self.strip_indices(s, position));
		let snapshot: Vec<Vec<Color>> = strips
			.iter()
			.map(|indices| indices.iter().map(|i| self.data[*i]).collect())
			.collect();

		for (i, indices) in strips.iter().enumerate() {
			let src = if reverse {
				&snapshot[(i + 3) % 4]
			} else {
				&snapshot[(i + 1) % 4]
			};
			for (dst, color) in indices.iter().zip(src) {
				self.data[*dst] = *color;
			}
		}

		// Only the outer layers drag a whole face along
		let (low, high) = layer_caps(axis);
		if position == 0 {
			self.rotate_face(low, !reverse);
		}
		if position == self.width - 1 {
			self.rotate_face(high, reverse);
		}
	}

	/// Turn a single face by 90 degrees, as seen from outside the cube.
	fn rotate_face(&mut self, face: usize, clockwise: bool) {
		let n = self.width;
		let base = face * self.area();
		let bef = self.data[base..base + self.area()].to_vec();

		for r in 0..n {
			for c in 0..n {
				let (sr, sc) = if clockwise { (n - 1 - c, r) } else { (c, n - 1 - r) };
				self.data[base + r * n + c] = bef[sr * n + sc];
			}
		}
	}
}

impl TryFrom<Vec<Vec<Vec<Color>>>> for CubeState {
	type Error = CubeError;

	fn try_from(faces: Vec<Vec<Vec<Color>>>) -> Result<Self, Self::Error> {
		Self::from_faces(&faces)
	}
}

impl From<CubeState> for Vec<Vec<Vec<Color>>> {
	fn from(cube: CubeState) -> Self {
		cube.faces()
	}
}

/// Split a token into the color atoms it stands for.
/// A token is either one color name (or initial) or a run of initials.
fn expand_token(token: &str) -> Vec<String> {
	let is_initials = token.len() > 1
		&& token
			.chars()
			.all(|c| Color::from_str(c.encode_utf8(&mut [0; 4])).is_ok());

	if Color::from_str(token).is_err() && is_initials {
		token.chars().map(String::from).collect()
	} else {
		vec![token.to_string()]
	}
}

impl FromStr for CubeState {
	type Err = CubeError;

	/// Parses comma and/or whitespace separated color names, e.g.
	/// "white, white, ..." or runs of initials, e.g. "wwwwwwwww ggggggggg ...".
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let tokens: Vec<String> = s
			.split(|c: char| c == ',' || c.is_whitespace())
			.filter(|t| !t.is_empty())
			.flat_map(expand_token)
			.collect();

		Self::from_tokens(tokens)
	}
}

// ===== Tests =====
