use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::PathBuf;
use tilecut::{config::ExtractConfig, extract};

// Define the command-line interface using the clap crate
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// lowest zoom level to copy
	#[arg(long, value_name = "INT", display_order = 1)]
	min_zoom: u8,

	/// highest zoom level to copy
	#[arg(long, value_name = "INT", display_order = 1)]
	max_zoom: u8,

	/// region to copy, in degrees
	#[arg(
		long,
		num_args = 4,
		value_names = ["MIN_LON", "MIN_LAT", "MAX_LON", "MAX_LAT"],
		allow_negative_numbers = true,
		required = true,
		display_order = 2
	)]
	region: Vec<f64>,

	/// MBTiles file to read from
	#[arg(long, value_name = "PATH", display_order = 3)]
	source: PathBuf,

	/// MBTiles file to add the tiles to, created if missing
	#[arg(long, value_name = "PATH", display_order = 3)]
	destination: PathBuf,

	#[command(flatten)]
	verbose: Verbosity<WarnLevel>,
}

impl Cli {
	fn to_config(&self) -> Result<ExtractConfig> {
		let region: [f64; 4] = self
			.region
			.as_slice()
			.try_into()
			.map_err(|_| anyhow::anyhow!("region must contain exactly 4 numbers, but got {:?}", self.region))?;
		ExtractConfig::new(self.min_zoom, self.max_zoom, region, &self.source, &self.destination)
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	// Initialize logger and set log level based on verbosity flag
	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
	log::debug!("{cli:?}");
	let config = cli.to_config()?;
	extract::run(&config)?;
	Ok(())
}
