use chrono::Utc;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use nextpass::catalog::Catalog;
use nextpass::config::Config;
use nextpass::predict::Sgp4Elements;
use nextpass::scheduler::{ElevationDurationCheck, PassCandidate, Scheduler};
use nextpass::timeexpr::TimeExpr;
use nextpass::web::{run_server, StationScheduler};

#[derive(Parser)]
#[command(name = "nextpass")]
#[command(about = "Pick the next satellite pass over a ground station")]
struct Cli {
    /// Station configuration file
    #[arg(short, long, global = true, default_value = "nextpass.yaml")]
    config: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Next pass over all active objects
    Next {
        /// Search start: now, T+10m, or RFC3339
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Next pass of one object, active or not
    NextFor {
        name: String,
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List tracked objects
    Catalog,
    /// Run the HTTP API
    Serve,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match Config::from_file(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading {}: {}", cli.config, e);
            return ExitCode::FAILURE;
        }
    };
    let catalog = match config.load_catalog() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading catalog: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Next { at, json } => next(&config, &catalog, at.as_deref(), json),
        Commands::NextFor { name, at, json } => {
            next_for(&config, &catalog, &name, at.as_deref(), json)
        }
        Commands::Catalog => list(&catalog),
        Commands::Serve => serve(config, catalog),
    }
}

fn scheduler(config: &Config) -> Option<StationScheduler> {
    let built = config.oracle().and_then(|oracle| {
        Ok(Scheduler::new(
            oracle,
            ElevationDurationCheck,
            config.thresholds.clone(),
            config.search_config()?,
        ))
    });
    match built {
        Ok(s) => Some(s),
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            None
        }
    }
}

fn parse_start(at: Option<&str>) -> Result<Option<chrono::DateTime<Utc>>, ExitCode> {
    let Some(at) = at else {
        return Ok(None);
    };
    match at.parse::<TimeExpr>().and_then(|expr| expr.resolve(Utc::now())) {
        Ok(start) => Ok(Some(start)),
        Err(e) => {
            eprintln!("Invalid --at: {}", e);
            Err(ExitCode::FAILURE)
        }
    }
}

fn next(
    config: &Config,
    catalog: &Catalog<Sgp4Elements>,
    at: Option<&str>,
    json: bool,
) -> ExitCode {
    let start = match parse_start(at) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let Some(scheduler) = scheduler(config) else {
        return ExitCode::FAILURE;
    };

    let scheduled = scheduler.next_pass(catalog, start);
    if json {
        return print_json(&scheduled);
    }
    match scheduled {
        Some(s) => {
            print_pass(&s.pass);
            println!("  {}", if s.armed { "armed" } else { "below thresholds" });
        }
        None => println!("No pass found"),
    }
    ExitCode::SUCCESS
}

fn next_for(
    config: &Config,
    catalog: &Catalog<Sgp4Elements>,
    name: &str,
    at: Option<&str>,
    json: bool,
) -> ExitCode {
    let start = match parse_start(at) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let Some(scheduler) = scheduler(config) else {
        return ExitCode::FAILURE;
    };

    let pass = match scheduler.next_pass_for(catalog, name, start) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if json {
        return print_json(&pass);
    }
    match pass {
        Some(p) => print_pass(&p),
        None => println!("No pass found for {}", name),
    }
    ExitCode::SUCCESS
}

fn list(catalog: &Catalog<Sgp4Elements>) -> ExitCode {
    println!("{} objects", catalog.len());
    for entry in catalog.entries() {
        println!(
            "  [{}] {}",
            if entry.active { "x" } else { " " },
            entry.name
        );
    }
    ExitCode::SUCCESS
}

fn serve(config: Config, catalog: Catalog<Sgp4Elements>) -> ExitCode {
    let Some(scheduler) = scheduler(&config) else {
        return ExitCode::FAILURE;
    };
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_server(
        &config.web.bind,
        catalog.into_shared(),
        scheduler,
    )) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_pass(pass: &PassCandidate) {
    println!("{}", pass.object);
    println!("  rise: {}", pass.rise.to_rfc3339());
    println!("  set:  {}", pass.set.to_rfc3339());
    println!(
        "  max elevation: {:.2}°, duration: {}s",
        pass.max_elevation_deg,
        pass.duration().num_seconds()
    );
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{}", s);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            ExitCode::FAILURE
        }
    }
}
