//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 200 runs to first prestige
//!   cargo run --bin simulate -- -n 50 -p 3     # 50 runs to prestige 3
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use luck_roller::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              LUCK ROLLER BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Target:         P{}", config.target_prestige);
    println!("  Max Rolls:      {}", config.max_rolls_per_run);
    println!("  Buy Upgrades:   {}", config.buy_upgrades);
    println!("  Use Potions:    {}", config.use_potions);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "-p" | "--prestige" => {
                if i + 1 < args.len() {
                    config.target_prestige = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-r" | "--rolls" => {
                if i + 1 < args.len() {
                    config.max_rolls_per_run = args[i + 1].parse().unwrap_or(500_000);
                    i += 1;
                }
            }
            "--no-shop" => {
                config.buy_upgrades = false;
            }
            "--no-potions" => {
                config.use_potions = false;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Luck Roller Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of simulation runs (default: 200)");
    println!("    -p, --prestige <P>  Prestige count to reach (default: 1)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -r, --rolls <R>     Max rolls per run (default: 500,000)");
    println!("    --no-shop           Never buy upgrades");
    println!("    --no-potions        Never drink potions");
    println!("    -v, --verbose       Verbose output");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick test (25 runs, 200k rolls)");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                    # Default run");
    println!("    cargo run --bin simulate -- -n 50 -p 3     # 50 runs to prestige 3");
    println!("    cargo run --bin simulate -- --seed 42      # Reproducible");
    println!("    cargo run --bin simulate -- --no-shop      # Luck from rolling only");
}
