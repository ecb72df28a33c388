use std::{error::Error, io::Write, str::FromStr};

use clap::Parser;
use log::{debug, info, LevelFilter};

use puzzlecube::prelude::*;

/// Turn and solve n×n×n puzzle cubes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Width of the cube (ignored if --set is used)
	#[arg(long, default_value_t = 3)]
	width: usize,

	/// Set the cube from a string (the same format as when you output the cube via the "-c"-flag)
	#[arg(long, default_value_t = String::new())]
	set: String,

	/// The cube to solve into, the solved cube by default
	#[arg(long, default_value_t = String::new())]
	goal: String,

	/// Use a sequence to apply on the cube, e.g. "X0 Y1' Z2"
	#[arg(short, default_value_t = String::new())]
	sequence: String,

	/// Scramble the cube with the given number of random moves
	#[arg(long, default_value_t = 0)]
	random: usize,

	/// Solve the cube (the output is a sequence)
	#[arg(long, default_value_t = false)]
	solve: bool,

	/// Output length of sequence (if --solve is used)
	#[arg(short, long, default_value_t = false)]
	length: bool,

	/// Output the cube as a string rather than colored
	#[arg(short, long, default_value_t = false)]
	char_print: bool,

	/// Output the cube or the solution as JSON
	#[arg(long, default_value_t = false)]
	json: bool,

	/// Don't expand nodes this many moves away from the start
	#[arg(long)]
	max_depth: Option<usize>,

	/// Give up after expanding this many nodes
	#[arg(long)]
	max_expansions: Option<usize>,

	/// Print the output to a file rather to the stdout
	#[arg(short, long, default_value_t = String::new())]
	output: String,

	/// Increase logging verbosity (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

impl Args {
	fn solver_config(&self) -> SolverConfig {
		SolverConfig {
			max_depth: self.max_depth,
			max_expansions: self.max_expansions,
		}
	}
}

fn main() -> Result<(), Box<dyn Error>> {
	let args = Args::parse();

	env_logger::Builder::new()
		.filter_level(match args.verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		})
		.init();

	// Whether to redirect it to the stdout or a file
	let mut out: Box<dyn Write> = if args.output.is_empty() {
		Box::new(std::io::stdout())
	} else {
		Box::new(std::fs::File::create(&args.output)?)
	};

	// Parses a cube out of the cube string
	let mut cube = if args.set.is_empty() {
		CubeState::solved(args.width)?
	} else {
		CubeState::from_str(&args.set)?
	};

	if args.random > 0 {
		let scramble = random_moves(cube.width(), args.random);
		info!(
			"Scramble: {}",
			scramble.iter().map(Move::to_string).collect::<Vec<_>>().join(" ")
		);
		cube.apply_moves(scramble)?;
	}

	cube.apply_moves(parse_moves(&args.sequence)?)?;

	// Solve the cube and only outputs the sequence
	if args.solve {
		let goal = if args.goal.is_empty() {
			CubeState::solved(cube.width())?
		} else {
			CubeState::from_str(&args.goal)?
		};

		let mut solver = Solver::with_config(&cube, &goal, args.solver_config());
		let turns = solver.solve()?;
		debug!("{:?}", solver.stats());

		if args.json {
			writeln!(out, "{}", serde_json::to_string(&turns)?)?;
			return Ok(());
		}

		let len = turns.len();
		for turn in turns {
			write!(out, "{} ", turn)?;
		}
		if args.length {
			writeln!(out, "(len={})", len)?;
		} else {
			writeln!(out)?;
		}
		return Ok(());
	}

	// Print the resulting cube (either as a string or with colors)
	if args.json {
		writeln!(out, "{}", serde_json::to_string(&cube)?)?;
	} else if args.char_print {
		write!(out, "{:#}", cube)?;
	} else {
		cube.print();
	}

	Ok(())
}
