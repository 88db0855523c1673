//! partsim: drive a contiguous-memory allocator from a trace script.
//!
//! The binary reads a script, feeds each event to the engine, and prints a
//! report after every event. Rejected events (out of memory, unknown pid)
//! are reported and the trace continues; anything else aborts the run.

mod render;
mod script;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use partsim_core::{Allocator, PlacementPolicy};

use crate::script::Script;

/// Simulate contiguous-memory allocation over a scripted event trace.
#[derive(Debug, Parser)]
#[command(name = "partsim", version, about)]
struct Args {
    /// Trace script: partition size first, then one event record per line.
    script: PathBuf,

    /// Placement policy for choosing free blocks.
    #[arg(short, long, value_enum, ignore_case = true)]
    policy: PolicyArg,

    /// Emit one JSON object per event instead of text reports.
    #[arg(long)]
    json: bool,
}

/// Flag spellings for the placement policies.
///
/// The classic single-letter and long spellings (`f`, `fifo`, `b`,
/// `bestfit`, `w`, `worstfit`) are accepted, case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// First free block that fits, free list kept in release order.
    #[value(alias = "f", alias = "fifo")]
    FirstFit,
    /// Smallest free block that fits.
    #[value(alias = "b", alias = "bestfit")]
    BestFit,
    /// Largest free block that fits.
    #[value(alias = "w", alias = "worstfit")]
    WorstFit,
}

impl From<PolicyArg> for PlacementPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::FirstFit => Self::FirstFit,
            PolicyArg::BestFit => Self::BestFit,
            PolicyArg::WorstFit => Self::WorstFit,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let input = fs::read_to_string(&args.script)
        .with_context(|| format!("unable to open {}", args.script.display()))?;
    let script = Script::parse(&input)
        .with_context(|| format!("malformed script {}", args.script.display()))?;

    run(&script, args.policy.into(), args.json)
}

/// Install the fmt subscriber on stderr; `RUST_LOG` overrides the level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(script: &Script, policy: PlacementPolicy, json: bool) -> Result<()> {
    let mut allocator = Allocator::new(script.partition_size, policy)?;

    for event in &script.events {
        let error = match allocator.apply(*event) {
            Ok(()) => None,
            Err(err) if err.is_recoverable() => {
                warn!(%event, error = %err, "event rejected");
                Some(err.to_string())
            }
            Err(err) => return Err(err).with_context(|| format!("cannot apply {event}")),
        };

        if json {
            let report = render::Report {
                event,
                error: error.as_deref(),
                free: allocator.free_list().as_slice(),
                allocated: allocator.allocated_list().as_slice(),
            };
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{}", render::RULE);
            println!("{event}");
            if let Some(message) = &error {
                println!("Error: {message}");
            }
            println!("{}", render::RULE);
            print!("{}", render::state(&allocator));
            println!();
        }
    }
    Ok(())
}
