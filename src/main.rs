//! tsp-exact CLI: solve a random Euclidean instance exactly.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use u_tsp_exact::bnb::{BnbConfig, BnbRunner, BoundKind};
use u_tsp_exact::enumerate;
use u_tsp_exact::instance::{CostMatrix, InstanceConfig, Point};
use u_tsp_exact::report::RunReport;
use u_tsp_exact::trace::TurtleScript;
use u_tsp_exact::TspResult;

#[derive(Parser)]
#[command(name = "tsp-exact")]
#[command(about = "Exact symmetric TSP by branch-and-bound tour enumeration")]
#[command(version)]
struct Cli {
    /// Number of vertices (at least 2)
    #[arg(required_unless_present = "test")]
    n: Option<usize>,

    /// Seed for the coordinate generator
    #[arg(short, long, default_value = "1")]
    seed: u32,

    /// Coordinates are drawn from [0, BOUND-1]
    #[arg(short, long, default_value = "20000")]
    bound: u32,

    /// Write a Python turtle script replaying each improving tour
    #[arg(short, long, num_args = 0..=1, default_missing_value = "python/generated.py")]
    python: Option<PathBuf>,

    /// Print the cost matrix before searching
    #[arg(short, long)]
    verbose: bool,

    /// Run the built-in self checks and exit
    #[arg(short, long)]
    test: bool,

    /// Add a minimum spanning tree to the pruning bound
    #[arg(long)]
    spanning_tree: bool,

    /// Explore every branch (same best cost, more calls)
    #[arg(long)]
    no_pruning: bool,

    /// Stop after this many recursive calls
    #[arg(long)]
    max_calls: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.test {
        return if self_checks(cli.seed) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    match cli.n {
        Some(n) if n >= 2 => {}
        other => {
            eprintln!("Error: the number of vertices must be at least 2, got {other:?}");
            return ExitCode::FAILURE;
        }
    }

    if let Err(e) = cmd_solve(&cli) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn cmd_solve(cli: &Cli) -> TspResult<()> {
    let n = cli.n.unwrap_or_default();
    let instance = InstanceConfig::default()
        .with_vertices(n)
        .with_seed(cli.seed)
        .with_bound(cli.bound)
        .build()?;

    if cli.verbose {
        println!("Cost matrix:");
        print!("{}", instance.matrix);
    }

    let mut config = BnbConfig::default().with_pruning(!cli.no_pruning);
    if cli.spanning_tree {
        config = config.with_bound(BoundKind::SpanningTree);
    }
    if let Some(max) = cli.max_calls {
        config = config.with_max_calls(max);
    }

    let result = match &cli.python {
        Some(path) => {
            let mut script = TurtleScript::new(create(path)?, &instance.points, instance.bound)?;
            let result = BnbRunner::run_with_observer(&instance.matrix, &config, &mut script)?;
            let tours = script.tours();
            script.finish()?;
            log::info!("trace: {tours} tours written to {}", path.display());
            result
        }
        None => BnbRunner::run(&instance.matrix, &config)?,
    };

    println!("{}", RunReport::new(n, &result));
    if result.exhausted {
        eprintln!("warning: call budget exhausted, the cost above may not be optimal");
    }
    Ok(())
}

fn create(path: &Path) -> TspResult<BufWriter<File>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Known answers and cross-checks against full enumeration.
fn self_checks(seed: u32) -> bool {
    let mut failures = 0;
    let mut check = |name: &str, outcome: TspResult<bool>| {
        let ok = matches!(outcome, Ok(true));
        match outcome {
            Ok(true) => println!("ok      {name}"),
            Ok(false) => println!("FAILED  {name}"),
            Err(e) => println!("FAILED  {name}: {e}"),
        }
        if !ok {
            failures += 1;
        }
    };

    check("unit square has perimeter 40", (|| -> TspResult<bool> {
        let square = [(0, 0), (0, 10), (10, 10), (10, 0)].map(Point::from);
        let m = CostMatrix::from_points(&square, 100)?;
        let r = BnbRunner::run(&m, &BnbConfig::default())?;
        Ok(r.best_cost == Some(40))
    })());

    check("two vertices: go and return", (|| -> TspResult<bool> {
        let m = random(2, seed)?;
        let r = BnbRunner::run(&m, &BnbConfig::default())?;
        Ok(r.best_cost == Some(2 * m.get(0, 1)))
    })());

    check("one vertex: cost 0 in one call", (|| -> TspResult<bool> {
        let m = CostMatrix::from_points(&[Point::new(0, 0)], 100)?;
        let r = BnbRunner::run(&m, &BnbConfig::default())?;
        Ok(r.best_cost == Some(0) && r.calls == 1)
    })());

    for n in 3..=8 {
        check(&format!("n={n}: matches full enumeration"), (|| -> TspResult<bool> {
            let m = random(n, seed)?;
            let expected = enumerate::min_tour(&m)?.best_cost;
            let r = BnbRunner::run(&m, &BnbConfig::default())?;
            Ok(r.best_cost == Some(expected))
        })());

        check(&format!("n={n}: pruning keeps the best cost"), (|| -> TspResult<bool> {
            let m = random(n, seed)?;
            let pruned = BnbRunner::run(&m, &BnbConfig::default())?;
            let full = BnbRunner::run(&m, &BnbConfig::default().with_pruning(false))?;
            let mst = BnbRunner::run(&m, &BnbConfig::default().with_bound(BoundKind::SpanningTree))?;
            Ok(pruned.best_cost == full.best_cost && mst.best_cost == full.best_cost)
        })());
    }

    println!("{failures} failure(s)");
    failures == 0
}

fn random(n: usize, seed: u32) -> TspResult<CostMatrix> {
    Ok(InstanceConfig::default()
        .with_vertices(n)
        .with_seed(seed)
        .build()?
        .matrix)
}
