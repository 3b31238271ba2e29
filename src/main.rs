mod analysis;
mod cli;
mod report;

use analysis::run_analysis;
use clap::Parser;
use cli::Cli;
use report::{render_json, render_summary};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so that `--json` output on stdout stays parseable.
    TermLogger::init(
        cli.log_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    // Beam, load and solver settings come from the optional JSON file and
    // fall back to a 10 m beam with a 1 kN load at midspan.
    let config = cli.load_config()?;

    // Both methods run independently; one failing does not stop the other.
    // The Euler-Bernoulli beam equation is described at
    // https://en.wikipedia.org/wiki/Euler%E2%80%93Bernoulli_beam_theory.
    let summary = run_analysis(&config)?;

    if cli.json {
        println!("{}", render_json(&summary)?);
    } else {
        println!("{}", render_summary(&summary, cli.every.get()));
    }

    Ok(())
}
