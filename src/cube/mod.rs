pub mod cubestate;
pub mod format;
pub mod orientation;
pub mod turn;

use strum::EnumCount;

/// The number of sides of a cube
pub const NUM_SIDES: usize = 6;

// Face slots. Faces 1-4 form the ring around the equator:
//
//           [0] top
// [4] left  [1] front  [2] right  [3] back
//           [5] bottom
pub const TOP: usize = 0;
pub const FRONT: usize = 1;
pub const RIGHT: usize = 2;
pub const BACK: usize = 3;
pub const LEFT: usize = 4;
pub const BOTTOM: usize = 5;

/// The color of a single facet.
/// The ordinal of a color is the face it belongs to on a solved cube.
#[derive(
	Clone,
	Copy,
	Default,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Debug,
	strum::EnumIter,
	strum::EnumCount,
	strum::FromRepr,
	strum::Display,
	strum::EnumString,
	serde::Serialize,
	serde::Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Color {
	#[default]
	#[strum(to_string = "White", serialize = "w")]
	White,
	#[strum(to_string = "Green", serialize = "g")]
	Green,
	#[strum(to_string = "Red", serialize = "r")]
	Red,
	#[strum(to_string = "Blue", serialize = "b")]
	Blue,
	#[strum(to_string = "Orange", serialize = "o")]
	Orange,
	#[strum(to_string = "Yellow", serialize = "y")]
	Yellow,
}

const _: () = assert!(Color::COUNT == NUM_SIDES);

impl Color {
	/// The single letter used in the compact notation
	pub const fn initial(self) -> char {
		match self {
			Color::White => 'w',
			Color::Green => 'g',
			Color::Red => 'r',
			Color::Blue => 'b',
			Color::Orange => 'o',
			Color::Yellow => 'y',
		}
	}

	/// The color a solved cube shows on the given face slot.
	pub fn of_face(face: usize) -> Option<Self> {
		Self::from_repr(u8::try_from(face).ok()?)
	}
}

/// Returns the ANSI-colorcode for the given color.
pub fn get_ansii_color(color: Color) -> &'static str {
	match color {
		Color::White => "\x1b[97m",
		Color::Green => "\x1b[32m",
		Color::Red => "\x1b[31m",
		Color::Blue => "\x1b[34m",
		Color::Orange => "\x1b[33m",
		Color::Yellow => "\x1b[93m",
	}
}

/// Everything that can go wrong while building a cube or turning it.
/// Nothing is modified when one of these is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
	#[error("A cube cannot have width {0}")]
	InvalidWidth(usize),
	#[error("A cube needs exactly {} faces, got {0}", NUM_SIDES)]
	FaceCount(usize),
	#[error("Face {face} is not a {width}x{width} grid")]
	NotSquare { face: usize, width: usize },
	#[error("Incorrect number of colors ({0}), a cube must have 6 n-by-n grids")]
	TokenCount(usize),
	#[error("Could not parse color \"{0}\"")]
	UnknownColor(String),
	#[error("Layer position {0} cannot be negative")]
	NegativePosition(i64),
	#[error("Layer position {position} must be smaller than the width {width}")]
	PositionOutOfRange { position: usize, width: usize },
	#[error("Invalid move \"{0}\"")]
	InvalidMove(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::str::FromStr;
	use strum::IntoEnumIterator;

	#[test]
	/// Full names and initials parse in any case
	fn parse_colors() {
		for color in Color::iter() {
			let name = color.to_string();
			assert_eq!(Color::from_str(&name).unwrap(), color);
			assert_eq!(Color::from_str(&name.to_lowercase()).unwrap(), color);
			assert_eq!(Color::from_str(&name.to_uppercase()).unwrap(), color);

			let initial = color.initial().to_string();
			assert_eq!(Color::from_str(&initial).unwrap(), color);
			assert_eq!(Color::from_str(&initial.to_uppercase()).unwrap(), color);
		}

		assert!(Color::from_str("purple").is_err());
		assert!(Color::from_str("").is_err());
	}

	#[test]
	fn face_colors_follow_ordinals() {
		for (i, color) in Color::iter().enumerate() {
			assert_eq!(Color::of_face(i), Some(color));
			assert_eq!(color as usize, i);
		}
		assert_eq!(Color::of_face(NUM_SIDES), None);
	}
}
