//! # Módulo de Despacho de Planificación
//!
//! Este módulo define los algoritmos de planificación disponibles como una
//! enumeración con sus opciones explícitas (el quantum de Round Robin) y el
//! despachador que los ejecuta y deriva los tiempos de finalización.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::info;
use serde::Serialize;

use crate::algorithms::{fifo, priority, rr, sjf, srt, AlgorithmOutput, TimelineSlice};
use crate::error::{Result, SimError};
use crate::process::{Cycle, Process};

/// Algoritmos de planificación disponibles.
///
/// Cada variante lleva sus propios parámetros, validados al construirla:
/// - FIFO, SJF y Priority son no preemptivos
/// - SRT desaloja en cada ciclo
/// - Round Robin desaloja al agotar el quantum
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SchedulingAlgorithm {
    /// First-In-First-Out: orden de llegada, sin desalojo.
    Fifo,
    /// Shortest Job First: ráfaga más corta entre los listos, sin desalojo.
    Sjf,
    /// Shortest Remaining Time: menor tiempo restante, reevaluado cada ciclo.
    Srt,
    /// Round Robin con quantum fijo.
    RoundRobin {
        /// Ciclos máximos contiguos por turno
        quantum: Cycle,
    },
    /// Prioridad no preemptiva (menor valor gana).
    Priority,
}

impl SchedulingAlgorithm {
    /// Identificadores aceptados por [`SchedulingAlgorithm::from_name`].
    pub const NAMES: [&'static str; 5] = ["fifo", "sjf", "srt", "rr", "priority"];

    /// Crea un Round Robin validando el quantum.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_sched_sim::SchedulingAlgorithm;
    ///
    /// let rr = SchedulingAlgorithm::round_robin(4).unwrap();
    /// assert_eq!(rr.quantum(), Some(4));
    /// assert!(SchedulingAlgorithm::round_robin(0).is_err());
    /// ```
    pub fn round_robin(quantum: i64) -> Result<Self> {
        if quantum <= 0 {
            return Err(SimError::InvalidParameter {
                parameter: "quantum",
                value: quantum,
            });
        }
        Ok(Self::RoundRobin {
            quantum: quantum as Cycle,
        })
    }

    /// Resuelve un algoritmo por nombre (sin distinguir mayúsculas).
    ///
    /// `quantum` solo se usa para `rr`, donde es obligatorio y positivo;
    /// los demás algoritmos lo ignoran.
    ///
    /// # Errors
    ///
    /// - `UnknownAlgorithm` si el nombre no es uno de [`Self::NAMES`]
    /// - `MissingParameter` si es `rr` y no hay quantum
    /// - `InvalidParameter` si es `rr` y el quantum es <= 0
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_sched_sim::SchedulingAlgorithm;
    ///
    /// assert_eq!(
    ///     SchedulingAlgorithm::from_name("SJF", None).unwrap(),
    ///     SchedulingAlgorithm::Sjf
    /// );
    /// assert!(SchedulingAlgorithm::from_name("rr", None).is_err());
    /// ```
    pub fn from_name(name: &str, quantum: Option<i64>) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "fifo" => Ok(Self::Fifo),
            "sjf" => Ok(Self::Sjf),
            "srt" => Ok(Self::Srt),
            "priority" => Ok(Self::Priority),
            "rr" => {
                let quantum = quantum.ok_or(SimError::MissingParameter {
                    algorithm: "Round Robin",
                    parameter: "quantum",
                })?;
                Self::round_robin(quantum)
            }
            _ => Err(SimError::UnknownAlgorithm(name.to_string())),
        }
    }

    /// Identificador corto del algoritmo.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Sjf => "sjf",
            Self::Srt => "srt",
            Self::RoundRobin { .. } => "rr",
            Self::Priority => "priority",
        }
    }

    /// Determina si el algoritmo puede interrumpir un proceso en ejecución.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::Srt | Self::RoundRobin { .. })
    }

    /// Quantum configurado, solo para Round Robin.
    pub fn quantum(&self) -> Option<Cycle> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Descripción textual del algoritmo y sus parámetros.
    pub fn description(&self) -> String {
        match self {
            Self::Fifo => "First-In-First-Out (no preemptivo)".to_string(),
            Self::Sjf => "Shortest Job First (no preemptivo)".to_string(),
            Self::Srt => "Shortest Remaining Time (preemptivo por ciclo)".to_string(),
            Self::RoundRobin { quantum } => {
                format!("Round Robin preemptivo (quantum: {} ciclos)", quantum)
            }
            Self::Priority => "Prioridad (no preemptivo)".to_string(),
        }
    }
}

impl fmt::Display for SchedulingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fifo => write!(f, "FIFO"),
            Self::Sjf => write!(f, "SJF"),
            Self::Srt => write!(f, "SRT"),
            Self::RoundRobin { quantum } => write!(f, "Round Robin (quantum {})", quantum),
            Self::Priority => write!(f, "Priority"),
        }
    }
}

/// Parseo sin parámetros; `rr` requiere la forma `rr:<quantum>`.
impl FromStr for SchedulingAlgorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((name, quantum)) if name.eq_ignore_ascii_case("rr") => {
                let quantum = quantum.trim().parse::<i64>().map_err(|_| {
                    SimError::MalformedInput(format!("quantum no numérico: {}", quantum))
                })?;
                Self::round_robin(quantum)
            }
            _ => Self::from_name(s, None),
        }
    }
}

/// Resultado completo de una planificación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleResult {
    pub algorithm: SchedulingAlgorithm,
    /// Intervalos `(pid, inicio, fin)` en orden de emisión
    pub timeline: Vec<TimelineSlice>,
    pub waiting_times: BTreeMap<String, Cycle>,
    /// Fin del último intervalo de cada pid
    pub completion_times: BTreeMap<String, Cycle>,
}

impl ScheduleResult {
    fn from_output(algorithm: SchedulingAlgorithm, output: AlgorithmOutput) -> Self {
        let completion_times = completion_times(&output.timeline);
        Self {
            algorithm,
            timeline: output.timeline,
            waiting_times: output.waiting_times,
            completion_times,
        }
    }

    /// Ciclo en que termina el último intervalo (0 si no hubo ejecución).
    pub fn makespan(&self) -> Cycle {
        self.timeline.iter().map(|s| s.end).max().unwrap_or(0)
    }
}

/// Para cada pid, el mayor `end` de todos sus intervalos.
pub fn completion_times(timeline: &[TimelineSlice]) -> BTreeMap<String, Cycle> {
    let mut completions: BTreeMap<String, Cycle> = BTreeMap::new();
    for slice in timeline {
        let entry = completions.entry(slice.pid.clone()).or_insert(0);
        *entry = (*entry).max(slice.end);
    }
    completions
}

/// Ejecuta un algoritmo ya validado sobre los procesos dados.
///
/// # Examples
///
/// ```rust
/// use cpu_sched_sim::{schedule, Process, SchedulingAlgorithm};
///
/// let procs = vec![Process::new("P1", 5, 0, 0), Process::new("P2", 3, 1, 0)];
/// let result = schedule(&procs, &SchedulingAlgorithm::Fifo).unwrap();
/// assert_eq!(result.completion_times["P2"], 8);
/// ```
pub fn schedule(processes: &[Process], algorithm: &SchedulingAlgorithm) -> Result<ScheduleResult> {
    info!("Planificando {} procesos con {}", processes.len(), algorithm);

    let output = match algorithm {
        SchedulingAlgorithm::Fifo => fifo::schedule(processes),
        SchedulingAlgorithm::Sjf => sjf::schedule(processes),
        SchedulingAlgorithm::Srt => srt::schedule(processes),
        SchedulingAlgorithm::RoundRobin { quantum } => rr::schedule(processes, *quantum)?,
        SchedulingAlgorithm::Priority => priority::schedule(processes),
    };

    Ok(ScheduleResult::from_output(*algorithm, output))
}

/// Despachador por nombre: valida nombre y quantum y luego planifica.
pub fn run_scheduling(
    processes: &[Process],
    algorithm: &str,
    quantum: Option<i64>,
) -> Result<ScheduleResult> {
    let algorithm = SchedulingAlgorithm::from_name(algorithm, quantum)?;
    schedule(processes, &algorithm)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Process> {
        vec![
            Process::new("P1", 5, 0, 2),
            Process::new("P2", 3, 1, 1),
            Process::new("P3", 1, 2, 3),
        ]
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(
            SchedulingAlgorithm::from_name("FiFo", None).unwrap(),
            SchedulingAlgorithm::Fifo
        );
        assert_eq!(
            SchedulingAlgorithm::from_name("PRIORITY", Some(3)).unwrap(),
            SchedulingAlgorithm::Priority
        );
        assert_eq!(
            SchedulingAlgorithm::from_name("Rr", Some(3)).unwrap(),
            SchedulingAlgorithm::RoundRobin { quantum: 3 }
        );
    }

    #[test]
    fn test_unknown_algorithm() {
        assert_eq!(
            run_scheduling(&sample(), "lottery", None),
            Err(SimError::UnknownAlgorithm("lottery".into()))
        );
    }

    #[test]
    fn test_rr_quantum_validation() {
        assert!(matches!(
            run_scheduling(&sample(), "rr", None),
            Err(SimError::MissingParameter { .. })
        ));
        assert_eq!(
            run_scheduling(&sample(), "rr", Some(-2)),
            Err(SimError::InvalidParameter {
                parameter: "quantum",
                value: -2
            })
        );
    }

    #[test]
    fn test_completion_times_use_last_interval() {
        let result = run_scheduling(&sample(), "rr", Some(2)).unwrap();
        assert_eq!(result.completion_times["P1"], 9);
        assert_eq!(result.completion_times["P2"], 8);
        assert_eq!(result.completion_times["P3"], 5);
        assert_eq!(result.makespan(), 9);
    }

    #[test]
    fn test_from_str_with_quantum() {
        let rr: SchedulingAlgorithm = "RR:4".parse().unwrap();
        assert_eq!(rr.quantum(), Some(4));
        assert!("rr".parse::<SchedulingAlgorithm>().is_err());
        assert!("rr:x".parse::<SchedulingAlgorithm>().is_err());
        assert_eq!("srt".parse::<SchedulingAlgorithm>().unwrap(), SchedulingAlgorithm::Srt);
    }

    #[test]
    fn test_preemptive_flags_and_display() {
        assert!(!SchedulingAlgorithm::Fifo.is_preemptive());
        assert!(SchedulingAlgorithm::Srt.is_preemptive());
        assert!(SchedulingAlgorithm::RoundRobin { quantum: 1 }.is_preemptive());
        assert_eq!(
            format!("{}", SchedulingAlgorithm::RoundRobin { quantum: 3 }),
            "Round Robin (quantum 3)"
        );
        assert!(SchedulingAlgorithm::Sjf.description().contains("Shortest Job"));
    }

    #[test]
    fn test_empty_process_list() {
        let result = run_scheduling(&[], "srt", None).unwrap();
        assert!(result.timeline.is_empty());
        assert!(result.completion_times.is_empty());
        assert_eq!(result.makespan(), 0);
    }
}
