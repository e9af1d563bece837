//! # Módulo de Simulación Principal
//!
//! Este módulo agrupa un conjunto completo de entradas (`Scenario`) y el
//! orquestador (`Simulation`) que lo valida una vez y luego ejecuta sobre él
//! planificaciones, simulaciones de sincronización y comparaciones.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::metrics::{MetricsCalculator, ScheduleSummary, SyncSummary};
use crate::process::{Action, Cycle, Process, Resource};
use crate::scheduler::{schedule, ScheduleResult, SchedulingAlgorithm};
use crate::sync::{synchronize, SyncMode, SyncResult};

/// Conjunto de registros de entrada de una simulación.
///
/// Se describe en JSON: `{ "processes": [...], "resources": [...], "actions": [...] }`.
/// Cada lista es opcional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub processes: Vec<Process>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Scenario {
    /// Interpreta un escenario en JSON y lo valida.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_sched_sim::Scenario;
    ///
    /// let scenario = Scenario::from_json(
    ///     r#"{"processes": [{"pid": "P1", "burst_time": 3, "arrival_time": 0, "priority": 1}]}"#,
    /// ).unwrap();
    /// assert_eq!(scenario.processes.len(), 1);
    /// assert!(scenario.resources.is_empty());
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Self =
            serde_json::from_str(text).map_err(|e| SimError::MalformedInput(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Lee y valida un escenario desde un archivo JSON.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("No se pudo leer el escenario {}", path.display()))?;
        let scenario = Self::from_json(&text)
            .with_context(|| format!("Escenario inválido en {}", path.display()))?;
        Ok(scenario)
    }

    /// Comprueba que los registros sean estructuralmente válidos.
    ///
    /// - pids no vacíos y únicos, `burst_time > 0`
    /// - nombres de recurso no vacíos y únicos, `count > 0`
    /// - la llegada más tardía más la suma de ráfagas cabe en `Cycle`
    pub fn validate(&self) -> Result<()> {
        let mut pids = HashSet::new();
        let mut total_burst: Cycle = 0;
        let mut last_arrival: Cycle = 0;
        for p in &self.processes {
            if p.pid.trim().is_empty() {
                return Err(SimError::MalformedInput("proceso sin pid".to_string()));
            }
            if !pids.insert(p.pid.as_str()) {
                return Err(SimError::MalformedInput(format!("pid duplicado: {}", p.pid)));
            }
            if p.burst_time == 0 {
                return Err(SimError::MalformedInput(format!(
                    "burst_time de {} debe ser > 0",
                    p.pid
                )));
            }
            last_arrival = last_arrival.max(p.arrival_time);
            total_burst = total_burst.checked_add(p.burst_time).ok_or_else(|| {
                SimError::MalformedInput("la suma de ráfagas desborda el reloj".to_string())
            })?;
        }
        // El reloj nunca supera la última llegada más todo el trabajo pendiente
        if last_arrival.checked_add(total_burst).is_none() {
            return Err(SimError::MalformedInput(
                "llegada y ráfagas desbordan el reloj".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for r in &self.resources {
            if r.name.trim().is_empty() {
                return Err(SimError::MalformedInput("recurso sin nombre".to_string()));
            }
            if !names.insert(r.name.as_str()) {
                return Err(SimError::MalformedInput(format!(
                    "recurso duplicado: {}",
                    r.name
                )));
            }
            if r.count == 0 {
                return Err(SimError::MalformedInput(format!(
                    "count de {} debe ser > 0",
                    r.name
                )));
            }
        }

        Ok(())
    }
}

/// Orquestador de simulaciones sobre un escenario validado.
pub struct Simulation {
    scenario: Scenario,
    metrics_calculator: MetricsCalculator,
}

impl Simulation {
    /// Crea una simulación validando el escenario.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_sched_sim::{config, Simulation, SchedulingAlgorithm};
    ///
    /// let simulation = Simulation::new(config::demo_scenario()).unwrap();
    /// let result = simulation.schedule(&SchedulingAlgorithm::Srt).unwrap();
    /// assert!(!result.timeline.is_empty());
    /// ```
    pub fn new(scenario: Scenario) -> Result<Self> {
        scenario.validate()?;
        Ok(Self {
            scenario,
            metrics_calculator: MetricsCalculator::new(),
        })
    }

    /// Escenario validado sobre el que trabaja la simulación.
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Planifica los procesos del escenario con el algoritmo dado.
    pub fn schedule(&self, algorithm: &SchedulingAlgorithm) -> Result<ScheduleResult> {
        schedule(&self.scenario.processes, algorithm)
    }

    /// Simula el acceso a recursos del escenario con el modo dado.
    pub fn synchronize(&self, mode: SyncMode) -> SyncResult {
        synchronize(
            &self.scenario.processes,
            &self.scenario.resources,
            &self.scenario.actions,
            mode,
        )
    }

    /// Ejecuta los cinco algoritmos y devuelve un resumen por cada uno,
    /// en el orden FIFO, SJF, SRT, RR, Priority.
    pub fn compare(&self, quantum: i64) -> Result<Vec<ScheduleSummary>> {
        let algorithms = [
            SchedulingAlgorithm::Fifo,
            SchedulingAlgorithm::Sjf,
            SchedulingAlgorithm::Srt,
            SchedulingAlgorithm::round_robin(quantum)?,
            SchedulingAlgorithm::Priority,
        ];

        let mut summaries = Vec::with_capacity(algorithms.len());
        for algorithm in &algorithms {
            let result = self.schedule(algorithm)?;
            let summary = self
                .metrics_calculator
                .summarize_schedule(&self.scenario.processes, &result);
            info!(
                "{}: espera promedio {:.2}, turnaround promedio {:.2}",
                algorithm, summary.average_waiting_time, summary.average_turnaround_time
            );
            summaries.push(summary);
        }
        Ok(summaries)
    }

    /// Resumen de una planificación ya ejecutada.
    pub fn summarize(&self, result: &ScheduleResult) -> ScheduleSummary {
        self.metrics_calculator
            .summarize_schedule(&self.scenario.processes, result)
    }

    /// Resumen de una simulación de sincronización ya ejecutada.
    pub fn summarize_sync(&self, mode: SyncMode, result: &SyncResult) -> SyncSummary {
        self.metrics_calculator.summarize_sync(mode, result)
    }

    /// Genera un reporte detallado de una planificación.
    pub fn generate_report(&self, result: &ScheduleResult) -> String {
        self.metrics_calculator
            .generate_report(&self.scenario.processes, result)
    }

    /// Genera un reporte CSV de una planificación.
    pub fn generate_csv_report(&self, result: &ScheduleResult) -> String {
        self.metrics_calculator
            .generate_csv_report(&self.scenario.processes, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;

    #[test]
    fn test_scenario_lists_are_optional() {
        let scenario =
            Scenario::from_json(r#"{"resources": [{"name": "R", "count": 2}]}"#).unwrap();
        assert!(scenario.processes.is_empty());
        assert_eq!(scenario.resources[0].count, 2);
    }

    #[test]
    fn test_scenario_rejects_bad_json() {
        assert!(matches!(
            Scenario::from_json("{ not json"),
            Err(SimError::MalformedInput(_))
        ));
        // arrival_time negativo no cabe en Cycle
        assert!(Scenario::from_json(
            r#"{"processes": [{"pid": "A", "burst_time": 1, "arrival_time": -1}]}"#
        )
        .is_err());
    }

    #[test]
    fn test_validate_duplicates_and_zeroes() {
        let dup = Scenario {
            processes: vec![Process::new("A", 1, 0, 0), Process::new("A", 2, 0, 0)],
            ..Default::default()
        };
        assert!(dup.validate().is_err());

        let zero_burst = Scenario {
            processes: vec![Process::new("A", 0, 0, 0)],
            ..Default::default()
        };
        assert!(zero_burst.validate().is_err());

        let zero_count = Scenario {
            resources: vec![Resource::new("R", 0)],
            ..Default::default()
        };
        assert!(Simulation::new(zero_count).is_err());
    }

    #[test]
    fn test_validate_rejects_clock_overflow() {
        let late = Scenario {
            processes: vec![Process::new("A", 2, Cycle::MAX - 1, 0)],
            ..Default::default()
        };
        assert!(matches!(late.validate(), Err(SimError::MalformedInput(_))));

        let huge = Scenario {
            processes: vec![
                Process::new("A", Cycle::MAX, 0, 0),
                Process::new("B", 1, 0, 0),
            ],
            ..Default::default()
        };
        assert!(matches!(Simulation::new(huge), Err(SimError::MalformedInput(_))));

        let edge = Scenario {
            processes: vec![Process::new("A", 1, Cycle::MAX - 1, 0)],
            ..Default::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_compare_runs_all_algorithms() {
        let simulation = Simulation::new(config::demo_scenario()).unwrap();
        let summaries = simulation.compare(config::DEFAULT_QUANTUM).unwrap();
        let names: Vec<&str> = summaries.iter().map(|s| s.algorithm.as_str()).collect();
        assert_eq!(
            names,
            vec!["FIFO", "SJF", "SRT", "Round Robin (quantum 2)", "Priority"]
        );
        assert!(simulation.compare(0).is_err());
    }

    #[test]
    fn test_demo_synchronization() {
        let simulation = Simulation::new(config::demo_scenario()).unwrap();
        let result = simulation.synchronize(SyncMode::Semaphore);
        assert_eq!(result.timeline.len(), simulation.scenario().actions.len());
    }
}
