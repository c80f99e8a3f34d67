//! # Osim Host Daemon
//!
//! Main entry point for the headless simulation driver.

use osimd::{HostRuntime, HostRuntimeConfig};
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    let mut runtime = HostRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    if let Err(e) = runtime.run() {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<HostRuntimeConfig, String> {
    let mut config = HostRuntimeConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--max-steps" | "-n" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --max-steps".to_string());
                }
                config.max_steps = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid max-steps value: {}", args[i]))?;
            }
            "--scenario" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --scenario".to_string());
                }
                config.scenario = Some(PathBuf::from(&args[i]));
            }
            "--json" => {
                config.json = true;
            }
            "--no-spawn" => {
                config.no_spawn = true;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -n, --max-steps <N>    Number of ticks to run (default 32)");
    eprintln!("  -s, --scenario <FILE>  JSON scenario replacing the built-in templates");
    eprintln!("      --json             Emit one JSON snapshot line per tick");
    eprintln!("      --no-spawn         Disable dynamic load injection");
    eprintln!("  -h, --help             Show this help");
}
