//! # Módulo de Sincronización
//!
//! Simuladores de contención de recursos ciclo a ciclo. Cada acción de la
//! entrada produce exactamente una entrada en la línea de tiempo, marcada
//! como `ACCESSED` o `WAITING`. La disponibilidad se reinicia al comienzo de
//! cada ciclo y una acción en espera no se reintenta automáticamente.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use log::{debug, info, warn};
use serde::Serialize;

use crate::error::{Result, SimError};
use crate::process::{Action, Cycle, Process, Resource};

pub mod mutex;
pub mod semaphore;

/// Resultado de un intento de acceso en un ciclo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessState {
    /// El recurso tenía capacidad libre en el ciclo
    Accessed,
    /// El recurso estaba agotado o no existe
    Waiting,
}

impl fmt::Display for AccessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accessed => write!(f, "ACCESSED"),
            Self::Waiting => write!(f, "WAITING"),
        }
    }
}

/// Entrada de la línea de tiempo de sincronización.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncEvent {
    pub cycle: Cycle,
    pub pid: String,
    pub resource: String,
    /// Resultado del intento
    pub state: AccessState,
}

/// Resultado de una simulación de sincronización.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncResult {
    pub timeline: Vec<SyncEvent>,
    /// Veces que cada pid tuvo que esperar
    pub waiting_counts: BTreeMap<String, u64>,
}

impl SyncResult {
    /// Ciclos simulados: del 0 al mayor ciclo con acciones, inclusive.
    pub fn total_cycles(&self) -> Cycle {
        self.timeline
            .iter()
            .map(|e| e.cycle + 1)
            .max()
            .unwrap_or(0)
    }

    /// Número de accesos concedidos.
    pub fn accessed_count(&self) -> usize {
        self.timeline
            .iter()
            .filter(|e| e.state == AccessState::Accessed)
            .count()
    }
}

/// Disciplina de bloqueo a simular.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SyncMode {
    /// Exclusión mutua: capacidad 1 por recurso y ciclo
    Mutex,
    /// Semáforo contador: capacidad `count` por recurso y ciclo
    Semaphore,
}

impl SyncMode {
    /// Identificador corto del modo.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mutex => "mutex",
            Self::Semaphore => "semaphore",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mutex => write!(f, "Mutex"),
            Self::Semaphore => write!(f, "Semáforo"),
        }
    }
}

impl FromStr for SyncMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mutex" => Ok(Self::Mutex),
            "semaphore" => Ok(Self::Semaphore),
            _ => Err(SimError::UnknownMode(s.to_string())),
        }
    }
}

/// Bucle común de ambos simuladores.
///
/// `capacity` fija cuántos accesos admite cada recurso declarado por ciclo.
/// Las acciones sobre recursos no declarados siempre quedan en espera.
pub(crate) fn simulate_with_capacity<F>(
    processes: &[Process],
    resources: &[Resource],
    actions: &[Action],
    capacity: F,
) -> SyncResult
where
    F: Fn(&Resource) -> u32,
{
    let mut by_cycle: BTreeMap<Cycle, Vec<&Action>> = BTreeMap::new();
    for action in actions {
        by_cycle.entry(action.cycle).or_default().push(action);
    }

    let capacities: HashMap<&str, u32> = resources
        .iter()
        .map(|r| (r.name.as_str(), capacity(r)))
        .collect();

    let mut result = SyncResult {
        timeline: Vec::with_capacity(actions.len()),
        waiting_counts: processes.iter().map(|p| (p.pid.clone(), 0)).collect(),
    };

    // Los ciclos sin acciones no producen eventos, así que basta con
    // recorrer los ciclos presentes en orden ascendente.
    for (cycle, cycle_actions) in by_cycle {
        let mut available = capacities.clone();
        for action in cycle_actions {
            let state = match available.get_mut(action.resource.as_str()) {
                Some(slots) if *slots > 0 => {
                    *slots -= 1;
                    AccessState::Accessed
                }
                Some(_) => AccessState::Waiting,
                None => {
                    warn!(
                        "Ciclo {}: {} accede al recurso no declarado '{}'",
                        cycle, action.pid, action.resource
                    );
                    AccessState::Waiting
                }
            };
            if state == AccessState::Waiting {
                *result.waiting_counts.entry(action.pid.clone()).or_insert(0) += 1;
            }
            debug!(
                "Ciclo {}: {} -> {} : {}",
                cycle, action.pid, action.resource, state
            );
            result.timeline.push(SyncEvent {
                cycle,
                pid: action.pid.clone(),
                resource: action.resource.clone(),
                state,
            });
        }
    }

    result
}

/// Ejecuta el simulador correspondiente al modo.
pub fn synchronize(
    processes: &[Process],
    resources: &[Resource],
    actions: &[Action],
    mode: SyncMode,
) -> SyncResult {
    info!(
        "Simulando {} acciones sobre {} recursos con {}",
        actions.len(),
        resources.len(),
        mode
    );
    match mode {
        SyncMode::Mutex => mutex::simulate(processes, resources, actions),
        SyncMode::Semaphore => semaphore::simulate(processes, resources, actions),
    }
}

/// Despachador por nombre de modo (`mutex` o `semaphore`, sin distinguir mayúsculas).
///
/// # Examples
///
/// ```rust
/// use cpu_sched_sim::{run_synchronization, Action, Process, Resource};
///
/// let procs = vec![Process::new("P1", 1, 0, 0)];
/// let res = vec![Resource::new("R", 1)];
/// let acts = vec![Action::new("P1", "READ", "R", 0)];
/// let out = run_synchronization(&procs, &res, &acts, "Mutex").unwrap();
/// assert_eq!(out.timeline.len(), 1);
/// assert!(run_synchronization(&procs, &res, &acts, "spinlock").is_err());
/// ```
pub fn run_synchronization(
    processes: &[Process],
    resources: &[Resource],
    actions: &[Action],
    mode: &str,
) -> Result<SyncResult> {
    let mode: SyncMode = mode.parse()?;
    Ok(synchronize(processes, resources, actions, mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("MUTEX".parse::<SyncMode>().unwrap(), SyncMode::Mutex);
        assert_eq!("Semaphore".parse::<SyncMode>().unwrap(), SyncMode::Semaphore);
        assert_eq!(
            "monitor".parse::<SyncMode>(),
            Err(SimError::UnknownMode("monitor".into()))
        );
    }

    #[test]
    fn test_undeclared_resource_always_waits() {
        let procs = vec![Process::new("P1", 1, 0, 0)];
        let acts = vec![Action::new("P1", "READ", "ghost", 0)];
        let out = simulate_with_capacity(&procs, &[], &acts, |r| r.count);
        assert_eq!(out.timeline[0].state, AccessState::Waiting);
        assert_eq!(out.waiting_counts["P1"], 1);
    }

    #[test]
    fn test_unknown_pid_gets_counter_on_wait() {
        let res = vec![Resource::new("R", 1)];
        let acts = vec![
            Action::new("X", "READ", "R", 0),
            Action::new("Y", "WRITE", "R", 0),
        ];
        let out = simulate_with_capacity(&[], &res, &acts, |r| r.count);
        assert!(!out.waiting_counts.contains_key("X"));
        assert_eq!(out.waiting_counts["Y"], 1);
    }

    #[test]
    fn test_timeline_ordered_by_cycle_then_input() {
        let res = vec![Resource::new("R", 2)];
        let acts = vec![
            Action::new("A", "READ", "R", 3),
            Action::new("B", "READ", "R", 0),
            Action::new("C", "READ", "R", 3),
        ];
        let out = simulate_with_capacity(&[], &res, &acts, |r| r.count);
        let order: Vec<(&str, Cycle)> = out
            .timeline
            .iter()
            .map(|e| (e.pid.as_str(), e.cycle))
            .collect();
        assert_eq!(order, vec![("B", 0), ("A", 3), ("C", 3)]);
        assert_eq!(out.total_cycles(), 4);
        assert_eq!(out.accessed_count(), 3);
    }

    #[test]
    fn test_access_state_display() {
        assert_eq!(AccessState::Accessed.to_string(), "ACCESSED");
        assert_eq!(AccessState::Waiting.to_string(), "WAITING");
    }
}
