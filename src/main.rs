//! Delivery Route Solver - Command Line Interface
//!
//! A heuristic solver for closed delivery routes over 2-D locations.

use clap::{Parser, Subcommand, ValueEnum};
use delivery_route_solver::heuristics::construction::{
    ConstructionHeuristic, NearestNeighborHeuristic,
};
use delivery_route_solver::heuristics::local_search::{LocalSearch, TwoOptSearch};
use delivery_route_solver::instance::RouteInstance;
use delivery_route_solver::solution::Solution;

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "delivery-route-solver")]
#[command(version = "1.0")]
#[command(about = "A heuristic solver for delivery route optimization")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance file
    Solve {
        /// Path to the instance file
        #[arg(short, long)]
        instance: PathBuf,

        /// Algorithm to use
        #[arg(short, long, value_enum, default_value = "two-opt")]
        algorithm: Algorithm,

        /// Maximum number of 2-opt passes (runs to convergence if omitted)
        #[arg(long)]
        max_passes: Option<usize>,

        /// Output solution to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Read locations from the terminal and solve
    Interactive,

    /// Generate a random instance file
    Generate {
        /// Number of locations
        #[arg(short = 'n', long)]
        locations: usize,

        /// Random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Coordinates are drawn uniformly from [0, extent)
        #[arg(short, long, default_value = "100.0")]
        extent: f64,

        /// Output instance file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Analyze an instance
    Analyze {
        /// Path to the instance file
        #[arg(short, long)]
        instance: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Algorithm {
    /// Nearest Neighbor construction only
    Nn,
    /// Nearest Neighbor followed by 2-opt local search
    TwoOpt,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            instance,
            algorithm,
            max_passes,
            output,
            verbose,
        } => {
            solve_instance(&instance, algorithm, max_passes, output, verbose);
        }

        Commands::Interactive => {
            if let Err(e) = interactive_session() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }

        Commands::Generate {
            locations,
            seed,
            extent,
            output,
        } => {
            generate_instance(locations, seed, extent, &output);
        }

        Commands::Analyze { instance } => {
            analyze_instance(&instance);
        }
    }
}

fn solve(instance: &RouteInstance, algorithm: Algorithm, max_passes: Option<usize>) -> Solution {
    let nn = NearestNeighborHeuristic::new();
    let mut solution = nn.construct(instance);

    if algorithm == Algorithm::TwoOpt {
        let two_opt = match max_passes {
            Some(limit) => TwoOptSearch::with_max_passes(limit),
            None => TwoOptSearch::new(),
        };
        two_opt.improve(instance, &mut solution);
        solution.algorithm = "NearestNeighbor+2-Opt".to_string();
    }

    solution
}

fn print_route(solution: &Solution) {
    let route: Vec<String> = solution.tour.iter().map(|loc| loc.to_string()).collect();
    println!("Optimal Route: {}", route.join(" "));
    println!("Total Distance: {}", solution.cost);
}

fn solve_instance(
    path: &PathBuf,
    algorithm: Algorithm,
    max_passes: Option<usize>,
    output: Option<PathBuf>,
    verbose: bool,
) {
    println!("Loading instance from {:?}...", path);

    let instance = match RouteInstance::from_file(path) {
        Ok(inst) => inst,
        Err(e) => {
            eprintln!("Error loading instance: {}", e);
            std::process::exit(1);
        }
    };

    if verbose {
        println!("{}", instance.statistics());
    }

    println!("Solving with {:?} algorithm...", algorithm);
    let start = Instant::now();
    let solution = solve(&instance, algorithm, max_passes);
    let elapsed = start.elapsed();

    println!("\n========== Results ==========");
    println!("Algorithm: {}", solution.algorithm);
    println!("Cost: {:.2}", solution.cost);
    println!("Time: {:.4}s", elapsed.as_secs_f64());
    if let Some(passes) = solution.passes {
        println!("Passes: {}", passes);
    }
    if verbose {
        println!("Tour: {:?}", solution.tour);
    }

    println!();
    print_route(&solution);

    if let Some(out_path) = output {
        let json = serde_json::to_string_pretty(&solution).unwrap();
        std::fs::write(&out_path, json).expect("Failed to write output");
        println!("\nSolution saved to {:?}", out_path);
    }
}

fn read_token(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    buffer: &mut VecDeque<String>,
) -> Result<String, String> {
    loop {
        if let Some(token) = buffer.pop_front() {
            return Ok(token);
        }
        match lines.next() {
            Some(Ok(line)) => buffer.extend(line.split_whitespace().map(str::to_string)),
            Some(Err(e)) => return Err(format!("Read error: {}", e)),
            None => return Err("Unexpected end of input".to_string()),
        }
    }
}

fn interactive_session() -> Result<(), String> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut tokens = VecDeque::new();

    print!("Enter the number of delivery locations: ");
    io::stdout().flush().map_err(|e| format!("Write error: {}", e))?;
    let n: usize = read_token(&mut lines, &mut tokens)?
        .parse()
        .map_err(|_| "Invalid location count".to_string())?;
    if n == 0 {
        return Err("Instance must contain at least one location".to_string());
    }

    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        print!("Enter coordinates (x y) for location {}: ", i);
        io::stdout().flush().map_err(|e| format!("Write error: {}", e))?;
        let x: f64 = read_token(&mut lines, &mut tokens)?
            .parse()
            .map_err(|_| format!("Invalid x coordinate for location {}", i))?;
        let y: f64 = read_token(&mut lines, &mut tokens)?
            .parse()
            .map_err(|_| format!("Invalid y coordinate for location {}", i))?;
        points.push((x, y));
    }

    let instance = RouteInstance::from_points("interactive", &points)?;

    for i in 0..instance.dimension {
        for j in i + 1..instance.dimension {
            println!(
                "Distance between location {} and location {}: {}",
                i,
                j,
                instance.distance(i, j)
            );
        }
    }

    let solution = solve(&instance, Algorithm::TwoOpt, None);
    print_route(&solution);

    Ok(())
}

fn generate_instance(n: usize, seed: u64, extent: f64, output: &PathBuf) {
    let instance = match RouteInstance::generate_random(&format!("random-{}", n), n, seed, extent)
    {
        Ok(inst) => inst,
        Err(e) => {
            eprintln!("Error generating instance: {}", e);
            std::process::exit(1);
        }
    };

    match instance.save_to_file(output) {
        Ok(()) => println!("Instance with {} locations saved to {:?}", n, output),
        Err(e) => {
            eprintln!("Error saving instance: {}", e);
            std::process::exit(1);
        }
    }
}

fn analyze_instance(path: &PathBuf) {
    let instance = match RouteInstance::from_file(path) {
        Ok(inst) => inst,
        Err(e) => {
            eprintln!("Error loading instance: {}", e);
            std::process::exit(1);
        }
    };

    println!("========== Instance Analysis ==========\n");
    println!("{}", instance.statistics());

    let nn = NearestNeighborHeuristic::new();
    let nn_solution = nn.construct(&instance);

    let mut improved = nn_solution.clone();
    let two_opt = TwoOptSearch::new();
    two_opt.improve(&instance, &mut improved);

    println!("\nQuick Solution Estimates:");
    println!("  Nearest Neighbor: {:.2}", nn_solution.cost);
    println!("  Nearest Neighbor + 2-Opt: {:.2}", improved.cost);
}
