//! Planificación por prioridad (no preemptiva).

use super::{run_to_completion, AlgorithmOutput};
use crate::process::Process;

/// Igual que SJF, pero la clave de selección es `priority` (menor valor gana).
pub fn schedule(processes: &[Process]) -> AlgorithmOutput {
    run_to_completion(processes, |p| p.priority)
}
