use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use wayfinder_navigator::{AddressingMode, TransitionPolicy};

#[derive(Parser, Debug)]
#[command(name = "wayfinder-demo")]
#[command(about = "Walks a home screen through a numbers flow and back")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Navigator settings in TOML; flags below override it
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// How screens address their actions
	#[arg(long, value_enum)]
	pub addressing: Option<Addressing>,

	/// How compound navigation changes are animated
	#[arg(long, value_enum)]
	pub transitions: Option<Transitions>,

	/// Duration of each simulated animation
	#[arg(long, default_value_t = 350, value_name = "MS")]
	pub animation_ms: u64,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Addressing {
	Positional,
	Identified,
}

impl From<Addressing> for AddressingMode {
	fn from(value: Addressing) -> Self {
		match value {
			Addressing::Positional => Self::Positional,
			Addressing::Identified => Self::Identified,
		}
	}
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Transitions {
	Sequenced,
	Simultaneous,
}

impl From<Transitions> for TransitionPolicy {
	fn from(value: Transitions) -> Self {
		match value {
			Transitions::Sequenced => Self::Sequenced,
			Transitions::Simultaneous => Self::Simultaneous,
		}
	}
}
