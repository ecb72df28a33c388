use crate::cube::{cubestate::CubeState, turn::Axis};

/// The number of ways a cube can be placed in space
pub const NUM_ORIENTATIONS: usize = 24;

/// The whole cube rotations bringing each face to the top, (axis, reverse).
/// The first entry keeps the cube as it is, the last one turns it upside down.
const TOP_FACE_ROTATIONS: [&[(Axis, bool)]; 6] = [
	&[],
	&[(Axis::X, true)],
	&[(Axis::Z, true)],
	&[(Axis::X, false)],
	&[(Axis::Z, false)],
	&[(Axis::X, false), (Axis::X, false)],
];

impl CubeState {
	/// All 24 ways to look at this cube.
	///
	/// For each face brought to the top, the cube is spun around the
	/// vertical axis four times. The first entry is the cube itself.
	/// Cubes with symmetric colorings may return the same state multiple times.
	pub fn all_orientations(&self) -> Vec<CubeState> {
		let mut out = Vec::with_capacity(NUM_ORIENTATIONS);

		for rotations in TOP_FACE_ROTATIONS {
			let mut base = self.clone();
			for (axis, reverse) in rotations {
				base.rotate_whole(*axis, *reverse);
			}

			for _ in 0..4 {
				out.push(base.clone());
				base.rotate_whole(Axis::Y, false);
			}
		}

		out
	}

	/// The smallest of all orientations.
	/// Two cubes which only differ by the way they are held share the same canonical form.
	pub fn canonical(&self) -> CubeState {
		self.all_orientations()
			.into_iter()
			.min()
			.unwrap_or_else(|| self.clone())
	}

	/// Whether `other` is this cube, possibly rotated as a whole.
	pub fn same_orientation_class(&self, other: &CubeState) -> bool {
		self.width() == other.width() && self.all_orientations().contains(other)
	}
}
