use std::fmt::Write;

use crate::cube::{cubestate::CubeState, *};

/// How a single color is written.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ColorNames {
	/// "White", "Green", ...
	#[default]
	Full,
	/// "w", "g", ...
	Initial,
}

/// What separates the colors of one row.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Delimiter {
	Comma,
	Space,
	#[default]
	CommaSpace,
	/// Only applies to initials. Full names still need a space between them.
	None,
}

impl Delimiter {
	fn as_str(self, names: ColorNames) -> &'static str {
		match (self, names) {
			(Delimiter::Comma, _) => ",",
			(Delimiter::Space, _) | (Delimiter::None, ColorNames::Full) => " ",
			(Delimiter::CommaSpace, _) => ", ",
			(Delimiter::None, ColorNames::Initial) => "",
		}
	}
}

/// The layout used by `CubeState::render`.
/// Every face is written as `width` lines, one per row.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CubeFormat {
	pub names: ColorNames,
	pub delimiter: Delimiter,
	pub blank_line_between_faces: bool,
}

impl CubeFormat {
	/// "White, White, White" and an empty line after every face.
	pub const FULL: Self = Self {
		names: ColorNames::Full,
		delimiter: Delimiter::CommaSpace,
		blank_line_between_faces: true,
	};

	/// "wwg", one row per line.
	pub const COMPACT: Self = Self {
		names: ColorNames::Initial,
		delimiter: Delimiter::None,
		blank_line_between_faces: false,
	};
}

impl Default for CubeFormat {
	fn default() -> Self {
		Self::FULL
	}
}

impl CubeState {
	/// Write the cube as text, which `FromStr` reads back into the same cube.
	pub fn render(&self, format: &CubeFormat) -> String {
		let delimiter = format.delimiter.as_str(format.names);
		let mut out = String::new();

		for face in 0..NUM_SIDES {
			if face > 0 && format.blank_line_between_faces {
				out.push('\n');
			}

			for row in self.face(face).chunks(self.width()) {
				let line: Vec<String> = row
					.iter()
					.map(|color| match format.names {
						ColorNames::Full => color.to_string(),
						ColorNames::Initial => color.initial().to_string(),
					})
					.collect();
				let _ = writeln!(out, "{}", line.join(delimiter));
			}
		}

		out
	}

	/// Prints the cube as an unfolded net using ANSI colors.
	pub fn print(&self) {
		let width = self.width();
		// One face is two characters per facet plus the gap
		let space: String = " ".repeat(2 * width + 1);

		let print_cap = |face: usize| {
			for row in 0..width {
				print!("{}", space);
				for col in 0..width {
					print!("{}▀ ", get_ansii_color(self.get(face, row, col)));
				}
				println!();
			}
		};

		print_cap(TOP);

		const RING: [usize; 4] = [LEFT, FRONT, RIGHT, BACK];
		for row in 0..width {
			for face in RING {
				for col in 0..width {
					print!("{}▄ ", get_ansii_color(self.get(face, row, col)));
				}
				print!(" ");
			}
			println!();
		}
		println!();

		print_cap(BOTTOM);

		// Reset ansii color
		println!("\x1b[00m");
	}
}

impl std::fmt::Display for CubeState {
	/// `{}` writes full names, `{:#}` the compact initials.
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let format = if f.alternate() {
			CubeFormat::COMPACT
		} else {
			CubeFormat::FULL
		};
		write!(f, "{}", self.render(&format))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cube::turn::*;
	use std::str::FromStr;

	fn scrambled(width: usize) -> CubeState {
		let mut cube = CubeState::solved(width).unwrap();
		for (i, mv) in all_moves(width).into_iter().enumerate() {
			if i % 3 != 1 {
				cube.apply_move(mv).unwrap();
			}
		}
		cube
	}

	#[test]
	fn full_format_of_solved_cube() {
		let cube = CubeState::solved(1).unwrap();
		assert_eq!(
			cube.to_string(),
			"White\n\nGreen\n\nRed\n\nBlue\n\nOrange\n\nYellow\n"
		);

		let cube = CubeState::solved(2).unwrap();
		assert!(cube.to_string().starts_with("White, White\nWhite, White\n\nGreen, Green\n"));
	}

	#[test]
	fn compact_format() {
		let cube = CubeState::solved(2).unwrap();
		assert_eq!(format!("{:#}", cube), "ww\nww\ngg\ngg\nrr\nrr\nbb\nbb\noo\noo\nyy\nyy\n");
	}

	#[test]
	/// Every format can be read back
	fn render_then_parse() {
		let names = [ColorNames::Full, ColorNames::Initial];
		let delimiters = [
			Delimiter::Comma,
			Delimiter::Space,
			Delimiter::CommaSpace,
			Delimiter::None,
		];

		for width in 1..=4 {
			let cube = scrambled(width);

			for names in names {
				for delimiter in delimiters {
					for blank_line_between_faces in [false, true] {
						let format = CubeFormat {
							names,
							delimiter,
							blank_line_between_faces,
						};
						let text = cube.render(&format);
						assert_eq!(CubeState::from_str(&text).unwrap(), cube, "{format:?}\n{text}");
					}
				}
			}

			assert_eq!(CubeState::from_str(&cube.to_string()).unwrap(), cube);
			assert_eq!(CubeState::from_str(&format!("{:#}", cube)).unwrap(), cube);
		}
	}

	#[test]
	fn full_names_keep_a_separator() {
		let format = CubeFormat {
			names: ColorNames::Full,
			delimiter: Delimiter::None,
			blank_line_between_faces: false,
		};
		let text = CubeState::solved(2).unwrap().render(&format);
		assert!(text.starts_with("White White\n"));
	}
}
