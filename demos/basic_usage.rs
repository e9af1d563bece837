//! Ejemplo básico de uso del simulador de planificación y sincronización

use cpu_sched_sim::metrics::MetricsCalculator;
use cpu_sched_sim::{config, SchedulingAlgorithm, Simulation, SyncMode};

fn main() -> anyhow::Result<()> {
    println!("=== Ejemplo: Uso Básico del Simulador ===\n");

    let simulation = Simulation::new(config::demo_scenario())?;

    // Planificación con SRT
    println!("1. Ejecutando planificación SRT...");
    let srt = simulation.schedule(&SchedulingAlgorithm::Srt)?;
    println!("{}", simulation.generate_report(&srt));

    // Planificación con Round Robin
    println!("2. Ejecutando Round Robin (quantum {})...", config::DEFAULT_QUANTUM);
    let rr = simulation.schedule(&SchedulingAlgorithm::round_robin(config::DEFAULT_QUANTUM)?)?;
    println!("{}", MetricsCalculator::format_timeline(&rr));

    // Comparación de algoritmos
    println!("\n=== Comparación de Algoritmos ===");
    println!("| Algoritmo                  | Espera  | Turnaround | Throughput |");
    println!("|----------------------------|---------|------------|------------|");
    for summary in simulation.compare(config::DEFAULT_QUANTUM)? {
        println!(
            "| {:<26} | {:>7.2} | {:>10.2} | {:>10.3} |",
            summary.algorithm,
            summary.average_waiting_time,
            summary.average_turnaround_time,
            summary.throughput
        );
    }

    // Mutex frente a semáforo sobre las mismas acciones
    for mode in [SyncMode::Mutex, SyncMode::Semaphore] {
        println!("\n=== {} ===", mode.to_string().to_uppercase());
        let result = simulation.synchronize(mode);
        print!("{}", MetricsCalculator::format_sync_timeline(&result));
        let summary = simulation.summarize_sync(mode, &result);
        println!(
            "Total de esperas: {} (tasa {:.3})",
            summary.total_waits, summary.waiting_rate
        );
    }

    Ok(())
}
