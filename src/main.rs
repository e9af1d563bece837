use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, info};

use cpu_sched_sim::metrics::MetricsCalculator;
use cpu_sched_sim::{config, Scenario, SchedulingAlgorithm, Simulation, SyncMode};

/// Simulador de algoritmos de planificación de CPU y de sincronización de recursos.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Aumenta el detalle de los logs (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Planifica los procesos con un algoritmo")]
    Schedule {
        /// Algoritmo: fifo, sjf, srt, rr o priority.
        #[arg(short, long)]
        algorithm: String,
        /// Quantum en ciclos (obligatorio para rr).
        #[arg(short, long, allow_negative_numbers = true)]
        quantum: Option<i64>,
        /// Imprime el resultado en JSON.
        #[arg(long)]
        json: bool,
        /// Imprime el reporte en CSV.
        #[arg(long, conflicts_with = "json")]
        csv: bool,
        /// Escenario JSON; sin él se usa el escenario de demostración.
        scenario: Option<PathBuf>,
    },
    #[command(about = "Simula el acceso a recursos con mutex o semáforo")]
    Sync {
        /// Modo: mutex o semaphore.
        #[arg(short, long, default_value = "mutex")]
        mode: String,
        /// Imprime el resultado en JSON.
        #[arg(long)]
        json: bool,
        scenario: Option<PathBuf>,
    },
    #[command(about = "Compara los cinco algoritmos sobre el mismo escenario")]
    Compare {
        #[arg(
            short,
            long,
            default_value_t = config::DEFAULT_QUANTUM,
            allow_negative_numbers = true
        )]
        quantum: i64,
        scenario: Option<PathBuf>,
    },
}

fn load_simulation(path: Option<&PathBuf>) -> Result<Simulation> {
    let scenario = match path {
        Some(path) => Scenario::from_path(path)?,
        None => {
            debug!("Sin escenario: usando el escenario de demostración");
            config::demo_scenario()
        }
    };
    info!(
        "Escenario: {} procesos, {} recursos, {} acciones",
        scenario.processes.len(),
        scenario.resources.len(),
        scenario.actions.len()
    );
    Ok(Simulation::new(scenario)?)
}

fn cmd_schedule(
    algorithm: &str,
    quantum: Option<i64>,
    json: bool,
    csv: bool,
    scenario: Option<&PathBuf>,
) -> Result<()> {
    let algorithm = SchedulingAlgorithm::from_name(algorithm, quantum)?;
    let simulation = load_simulation(scenario)?;
    let result = simulation.schedule(&algorithm)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if csv {
        print!("{}", simulation.generate_csv_report(&result));
    } else {
        println!("{}", simulation.generate_report(&result));
    }
    Ok(())
}

fn cmd_sync(mode: &str, json: bool, scenario: Option<&PathBuf>) -> Result<()> {
    let mode: SyncMode = mode.parse()?;
    let simulation = load_simulation(scenario)?;
    let result = simulation.synchronize(mode);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let summary = simulation.summarize_sync(mode, &result);
    println!("=== {} ===", mode.to_string().to_uppercase());
    print!("{}", MetricsCalculator::format_sync_timeline(&result));
    println!("\nEsperas por proceso: {:?}", result.waiting_counts);
    println!("Total de esperas: {}", summary.total_waits);
    println!(
        "Tasa de espera: {:.3} ({} ciclos)",
        summary.waiting_rate, summary.total_cycles
    );
    Ok(())
}

fn cmd_compare(quantum: i64, scenario: Option<&PathBuf>) -> Result<()> {
    let simulation = load_simulation(scenario)?;
    let summaries = simulation
        .compare(quantum)
        .context("No se pudo ejecutar la comparación")?;

    println!(
        "| {:<26} | {:>10} | {:>10} | {:>10} | {:>8} | {:>8} |",
        "Algoritmo", "Espera", "Turnaround", "Throughput", "Duración", "Cambios"
    );
    println!("|{}|", "-".repeat(89));
    for s in &summaries {
        println!(
            "| {:<26} | {:>10.2} | {:>10.2} | {:>10.3} | {:>8} | {:>8} |",
            s.algorithm,
            s.average_waiting_time,
            s.average_turnaround_time,
            s.throughput,
            s.makespan,
            s.context_switches
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let llv = match cli.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    match &cli.command {
        Commands::Schedule {
            algorithm,
            quantum,
            json,
            csv,
            scenario,
        } => cmd_schedule(algorithm, *quantum, *json, *csv, scenario.as_ref()),
        Commands::Sync {
            mode,
            json,
            scenario,
        } => cmd_sync(mode, *json, scenario.as_ref()),
        Commands::Compare { quantum, scenario } => cmd_compare(*quantum, scenario.as_ref()),
    }
}
