//! Noesis demo - activation and propagation over a small concept network.

mod config;
mod network;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::config::DemoConfig;

#[derive(Parser)]
#[command(name = "noesis-demo")]
#[command(author, version, about = "Noesis - concept activation demo", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Activation threshold for every concept (overrides config)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Nudge active concepts toward the query after propagation
    #[arg(short, long)]
    learn: bool,

    /// Use the strict preset (fires only on near-identical input)
    #[arg(short, long)]
    strict: bool,

    /// Learning rate (overrides config)
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Print the final network snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Print the default config and exit
    #[arg(long)]
    print_config: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.print_config {
        print!("{}", DemoConfig::default_toml()?);
        return Ok(());
    }

    let mut config = DemoConfig::load(cli.config.as_deref())?;
    if cli.strict {
        config.apply_strict();
    }
    if let Some(threshold) = cli.threshold {
        config.network.activation_threshold = threshold;
    }
    if let Some(rate) = cli.learning_rate {
        config.network.learning_rate = rate;
    }
    let learn = cli.learn || config.run.learn;
    let node_config = config.node_config()?;

    let mut net = network::build_network(&node_config).context("Failed to build network")?;
    let query = network::cat_query();

    if !cli.json {
        println!("{}", "Creating a simple concept network...".white().bold());
        println!("Input: vector similar to the 'cat' concept");
    }

    let report = network::run_round(&mut net, &query).context("Activation round failed")?;
    let all_active = report.all_active();

    if learn {
        network::learn(&mut net, &all_active, &query, node_config.learning_rate)
            .context("Learning step failed")?;
    }

    if cli.json {
        println!("{}", net.snapshot().to_json_pretty()?);
    } else {
        render::print_round(&net, &report);
        render::print_network_state(&net, &all_active);
        println!();
        println!("{}", "Experiment complete!".green());
    }

    Ok(())
}
