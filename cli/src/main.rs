use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use env_logger::Env;
use log::debug;

mod error;
mod generate;
mod utils;

use error::Result;

const USAGE: &str = "\
tbrsa {-r | -g bits}, where:
            -r=run tests
            -g=generate keys with 'bits' length
  bits should be a large power of 2";

#[derive(Parser, Debug)]
#[command(name = "tbrsa")]
#[command(about = "Textbook RSA key generator with PKCS#1 DER output", long_about = None)]
#[command(disable_help_flag = true)]
#[command(group(ArgGroup::new("mode").required(true).args(["run_tests", "generate"])))]
struct Cli {
    /// Generate keys of various lengths and run encrypt/decrypt tests until interrupted
    #[arg(short = 'r')]
    run_tests: bool,

    /// Generate a key pair of `bits` length and write tbprivate.der and tbpublic.der
    #[arg(short = 'g', value_name = "bits")]
    generate: Option<u64>,
}

fn run(cli: Cli) -> Result<()> {
    match cli.generate {
        Some(bits) => generate::execute(bits),
        None => run_tests::execute(),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            debug!("argument parsing failed: {err}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tbrsa: {err}");
            ExitCode::FAILURE
        }
    }
}
