//! # Simulador de Planificación de CPU y Sincronización
//!
//! Esta biblioteca simula, sobre procesos sintéticos y un reloj lógico
//! discreto, cómo se comportan cinco algoritmos clásicos de planificación y
//! dos disciplinas de bloqueo de recursos.
//!
//! ## Características principales
//!
//! - **Planificación**: FIFO, SJF, SRT, Round Robin (quantum configurable) y
//!   Prioridad. Cada algoritmo produce una línea de tiempo de intervalos y los
//!   tiempos de espera de cada proceso.
//! - **Sincronización**: simuladores de Mutex (capacidad 1) y Semáforo
//!   (capacidad `count`) que registran, ciclo a ciclo, qué accesos se
//!   conceden y cuáles esperan.
//! - **Métricas**: espera promedio, turnaround promedio, throughput, total de
//!   esperas y tasa de espera, con reportes en texto y CSV.
//!
//! Todas las simulaciones son cálculos deterministas de un solo hilo: la
//! misma entrada produce siempre la misma salida.
//!
//! ## Estructura del proyecto
//!
//! - `process`: Registros de entrada (procesos, recursos y acciones)
//! - `algorithms`: Los cinco algoritmos de planificación
//! - `scheduler`: Selección de algoritmo y despacho de la planificación
//! - `sync`: Simuladores de Mutex y Semáforo y su despachador
//! - `metrics`: Cálculo de métricas y reportes
//! - `simulation`: Escenarios de entrada y orquestación

pub mod algorithms;
pub mod error;
pub mod metrics;
pub mod process;
pub mod scheduler;
pub mod simulation;
pub mod sync;

// Re-exportar las estructuras principales para facilitar su uso
pub use algorithms::TimelineSlice;
pub use error::SimError;
pub use metrics::MetricsCalculator;
pub use process::{Action, Cycle, Process, Resource};
pub use scheduler::{run_scheduling, schedule, ScheduleResult, SchedulingAlgorithm};
pub use simulation::{Scenario, Simulation};
pub use sync::{run_synchronization, synchronize, AccessState, SyncEvent, SyncMode, SyncResult};

/// Configuración por defecto del simulador
pub mod config {
    use super::{Action, Process, Resource, Scenario};

    /// Quantum por defecto para Round Robin (en ciclos)
    pub const DEFAULT_QUANTUM: i64 = 2;

    /// Procesos de ejemplo: `(pid, ráfaga, llegada, prioridad)`
    pub fn default_processes() -> Vec<Process> {
        [
            ("P1", 8, 0, 3),
            ("P2", 4, 1, 1),
            ("P3", 9, 2, 4),
            ("P4", 5, 3, 2),
            ("P5", 2, 10, 1),
        ]
        .into_iter()
        .map(|(pid, burst, arrival, priority)| Process::new(pid, burst, arrival, priority))
        .collect()
    }

    /// Recursos de ejemplo
    pub fn default_resources() -> Vec<Resource> {
        vec![Resource::new("R1", 1), Resource::new("R2", 2)]
    }

    /// Acciones de ejemplo sobre los recursos por defecto
    pub fn default_actions() -> Vec<Action> {
        [
            ("P1", "READ", "R1", 0),
            ("P2", "WRITE", "R1", 0),
            ("P3", "READ", "R2", 1),
            ("P4", "READ", "R2", 1),
            ("P5", "WRITE", "R2", 1),
            ("P2", "WRITE", "R1", 2),
            ("P1", "WRITE", "R2", 3),
            ("P3", "READ", "R1", 3),
        ]
        .into_iter()
        .map(|(pid, action, resource, cycle)| Action::new(pid, action, resource, cycle))
        .collect()
    }

    /// Escenario completo usado cuando no se proporciona uno
    pub fn demo_scenario() -> Scenario {
        Scenario {
            processes: default_processes(),
            resources: default_resources(),
            actions: default_actions(),
        }
    }
}
