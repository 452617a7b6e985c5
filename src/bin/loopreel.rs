use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::SeedableRng as _;

use loopreel::{Catalog, DEFAULT_COMMON, RandomSource, Scheduler, gif_duration_ms};

#[derive(Parser, Debug)]
#[command(name = "loopreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the computed playback duration of one GIF file.
    Probe(ProbeArgs),
    /// Scan a directory of GIFs and print a selection sequence.
    Cycle(CycleArgs),
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Input GIF path.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct CycleArgs {
    /// Directory holding the animation files.
    #[arg(long)]
    dir: PathBuf,

    /// Number of selections to print.
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Seed for a deterministic sequence; omitted means thread-local entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Emit one JSON object per selection instead of plain text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Probe(args) => cmd_probe(args),
        Command::Cycle(args) => cmd_cycle(args),
    }
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read '{}'", args.in_path.display()))?;
    println!("{} ms", gif_duration_ms(&bytes));
    Ok(())
}

fn cmd_cycle(args: CycleArgs) -> anyhow::Result<()> {
    let catalog = Catalog::scan_dir(&args.dir, DEFAULT_COMMON);
    match args.seed {
        Some(seed) => {
            let sched = Scheduler::with_random(catalog, rand::rngs::StdRng::seed_from_u64(seed));
            run_cycle(sched, args.count, args.json)
        }
        None => run_cycle(Scheduler::new(catalog), args.count, args.json),
    }
}

fn run_cycle<R: RandomSource>(
    mut sched: Scheduler<R>,
    count: usize,
    json: bool,
) -> anyhow::Result<()> {
    for _ in 0..count {
        let sel = sched.select_next();
        if json {
            println!("{}", serde_json::to_string(&sel)?);
        } else {
            let pool = if sel.is_rare { "rare" } else { "common" };
            let ms = sel
                .duration_ms
                .map_or_else(|| "-".to_string(), |d| d.to_string());
            println!("{:<8} {:>8} ms  {}", pool, ms, sel.name);
        }
    }
    Ok(())
}
