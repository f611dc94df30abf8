use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::info;

use mktg_core::config::DEFAULT_CORPUS_PATH;
use mktg_core::io::read_corpus;
use mktg_core::{ChainConfig, MarkovChain, RngSource};

/// Character-level Markov chain text generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Corpus text file to train from
	#[arg(value_name = "CORPUS", default_value = DEFAULT_CORPUS_PATH)]
	corpus: PathBuf,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging();

	match run(cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("error: {}", e);
			ExitCode::FAILURE
		}
	}
}

fn init_logging() {
	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
	builder.format_timestamp_millis();
	let _ = builder.try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
	let config = ChainConfig::default().with_corpus_path(cli.corpus);

	// Nothing is generated unless the whole corpus was read
	let corpus = read_corpus(&config.corpus_path)?;
	info!("training on {} (k = {})", config.corpus_path.display(), config.context_len());

	let chain = MarkovChain::train(&corpus, &config)?;
	println!("{}", chain.table());

	print!("\n\nGenerated Text:\n\n");
	println!("{}", chain.generate(&mut RngSource::thread())?);

	Ok(())
}
