//! # Módulo de Métricas y Reportes
//!
//! Funciones puras de agregación sobre los resultados de las simulaciones,
//! más la generación de reportes en texto y CSV.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::algorithms::TimelineSlice;
use crate::process::{arrival_times, Cycle, Process};
use crate::scheduler::ScheduleResult;
use crate::sync::{SyncMode, SyncResult};

/// Tiempo de espera promedio (0.0 si no hay procesos).
pub fn average_waiting_time(waiting_times: &BTreeMap<String, Cycle>) -> f64 {
    if waiting_times.is_empty() {
        return 0.0;
    }
    let total: Cycle = waiting_times.values().sum();
    total as f64 / waiting_times.len() as f64
}

/// Total de veces que algún proceso tuvo que esperar.
pub fn total_waits(waiting_counts: &BTreeMap<String, u64>) -> u64 {
    waiting_counts.values().sum()
}

/// Proporción de esperas frente a ciclos totales (0.0 si `total_cycles <= 0`).
pub fn waiting_rate(waiting_counts: &BTreeMap<String, u64>, total_cycles: i64) -> f64 {
    if total_cycles <= 0 {
        return 0.0;
    }
    total_waits(waiting_counts) as f64 / total_cycles as f64
}

/// Procesos completados por ciclo.
///
/// Si `total_time <= 0` se infiere como `max(completion) + 1`.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use cpu_sched_sim::metrics::throughput;
///
/// let completions = BTreeMap::from([("A".to_string(), 4), ("B".to_string(), 9)]);
/// assert_eq!(throughput(&completions, 0), 0.2);
/// assert_eq!(throughput(&completions, 4), 0.5);
/// ```
pub fn throughput(completions: &BTreeMap<String, Cycle>, total_time: i64) -> f64 {
    if completions.is_empty() {
        return 0.0;
    }
    let total_time = if total_time <= 0 {
        completions.values().max().copied().unwrap_or(0) as f64 + 1.0
    } else {
        total_time as f64
    };
    completions.len() as f64 / total_time
}

/// Turnaround promedio `completion - arrival`; llegadas ausentes cuentan como 0.
pub fn average_turnaround_time(
    completion_times: &BTreeMap<String, Cycle>,
    arrival_times: &BTreeMap<String, Cycle>,
) -> f64 {
    if completion_times.is_empty() {
        return 0.0;
    }
    let total: f64 = completion_times
        .iter()
        .map(|(pid, &finish)| {
            let arrival = arrival_times.get(pid).copied().unwrap_or(0);
            finish as f64 - arrival as f64
        })
        .sum();
    total / completion_times.len() as f64
}

/// Pares de intervalos consecutivos cuyo pid cambia.
///
/// Los huecos ociosos y las rebanadas seguidas del mismo proceso no cuentan.
pub fn context_switches(timeline: &[TimelineSlice]) -> usize {
    timeline
        .windows(2)
        .filter(|pair| pair[0].pid != pair[1].pid)
        .count()
}

/// Resumen agregado de una planificación.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub algorithm: String,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub throughput: f64,
    /// Fin del último intervalo
    pub makespan: Cycle,
    /// Cambios de proceso en la CPU
    pub context_switches: usize,
}

/// Resumen agregado de una simulación de sincronización.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncSummary {
    pub mode: String,
    pub total_waits: u64,
    pub waiting_rate: f64,
    pub accessed: usize,
    pub total_cycles: Cycle,
}

/// Calculadora de métricas y reportes.
///
/// No guarda estado; agrupa las funciones de agregación y formateo que
/// consumen las capas de presentación.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Crea el calculador.
    pub fn new() -> Self {
        Self
    }

    /// Resume una planificación sobre los procesos que la originaron.
    pub fn summarize_schedule(
        &self,
        processes: &[Process],
        result: &ScheduleResult,
    ) -> ScheduleSummary {
        let arrivals = arrival_times(processes);
        ScheduleSummary {
            algorithm: result.algorithm.to_string(),
            average_waiting_time: average_waiting_time(&result.waiting_times),
            average_turnaround_time: average_turnaround_time(
                &result.completion_times,
                &arrivals,
            ),
            throughput: throughput(&result.completion_times, 0),
            makespan: result.makespan(),
            context_switches: context_switches(&result.timeline),
        }
    }

    /// Resume una simulación de sincronización.
    pub fn summarize_sync(&self, mode: SyncMode, result: &SyncResult) -> SyncSummary {
        let total_cycles = result.total_cycles();
        SyncSummary {
            mode: mode.to_string(),
            total_waits: total_waits(&result.waiting_counts),
            waiting_rate: waiting_rate(&result.waiting_counts, total_cycles as i64),
            accessed: result.accessed_count(),
            total_cycles,
        }
    }

    /// Genera un reporte detallado por proceso con estadísticas resumidas.
    pub fn generate_report(&self, processes: &[Process], result: &ScheduleResult) -> String {
        let summary = self.summarize_schedule(processes, result);
        let mut report = String::new();

        report.push_str(&format!(
            "\n=== REPORTE DE PLANIFICACIÓN: {} ===\n\n",
            result.algorithm.description()
        ));
        report.push_str(&format!(
            "{:^8} {:^10} {:^8} {:^10} {:^12} {:^10} {:^12}\n",
            "PID", "Llegada", "Ráfaga", "Prioridad", "Fin", "Espera", "Turnaround"
        ));
        report.push_str(&format!("{}\n", "-".repeat(76)));

        for p in processes {
            let completion = result.completion_times.get(&p.pid).copied();
            let waiting = result.waiting_times.get(&p.pid).copied();
            report.push_str(&format!(
                "{:^8} {:^10} {:^8} {:^10} {:^12} {:^10} {:^12}\n",
                p.pid,
                p.arrival_time,
                p.burst_time,
                p.priority,
                Self::format_cycle(completion),
                Self::format_cycle(waiting),
                Self::format_cycle(completion.map(|c| c.saturating_sub(p.arrival_time))),
            ));
        }

        report.push_str("\n=== ESTADÍSTICAS RESUMIDAS ===\n");
        report.push_str(&format!(
            "Tiempo promedio de espera: {:.2} ciclos\n",
            summary.average_waiting_time
        ));
        report.push_str(&format!(
            "Tiempo promedio de turnaround: {:.2} ciclos\n",
            summary.average_turnaround_time
        ));
        report.push_str(&format!("Throughput: {:.3} procesos/ciclo\n", summary.throughput));
        report.push_str(&format!("Duración total: {} ciclos\n", summary.makespan));
        report.push_str(&format!("Cambios de contexto: {}\n", summary.context_switches));
        report.push_str(&format!("Línea de tiempo: {}\n", Self::format_timeline(result)));

        report
    }

    /// Genera un reporte en CSV con una fila por proceso.
    pub fn generate_csv_report(&self, processes: &[Process], result: &ScheduleResult) -> String {
        let mut csv = String::from("pid,arrival,burst,priority,completion,waiting,turnaround\n");

        for p in processes {
            let completion = result.completion_times.get(&p.pid).copied();
            let waiting = result.waiting_times.get(&p.pid).copied();
            let turnaround = completion.map(|c| c.saturating_sub(p.arrival_time));
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                p.pid,
                p.arrival_time,
                p.burst_time,
                p.priority,
                Self::csv_cycle(completion),
                Self::csv_cycle(waiting),
                Self::csv_cycle(turnaround),
            ));
        }

        csv
    }

    /// Diagrama de Gantt en una línea: `|P1 0-5|P2 5-8|`.
    pub fn format_timeline(result: &ScheduleResult) -> String {
        if result.timeline.is_empty() {
            return "(vacía)".to_string();
        }
        let mut line = String::from("|");
        for slice in &result.timeline {
            line.push_str(&format!("{} {}-{}|", slice.pid, slice.start, slice.end));
        }
        line
    }

    /// Una línea por evento: `[Cycle  3] P1   → R1  : ACCESSED`.
    pub fn format_sync_timeline(result: &SyncResult) -> String {
        result
            .timeline
            .iter()
            .map(|e| {
                format!(
                    "[Cycle {:2}] {:4} → {:3} : {}\n",
                    e.cycle, e.pid, e.resource, e.state
                )
            })
            .collect()
    }

    fn format_cycle(value: Option<Cycle>) -> String {
        value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
    }

    fn csv_cycle(value: Option<Cycle>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new()
    }
}
