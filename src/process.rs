//! # Módulo de Registros de Entrada
//!
//! Este módulo define los registros inmutables que consumen todos los
//! algoritmos: procesos, recursos y acciones de acceso a recursos.
//! No contienen comportamiento; se crean una vez por simulación.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Unidad de tiempo lógico de la simulación (ciclos de CPU).
pub type Cycle = u64;

/// Proceso sintético que compite por la CPU.
///
/// Un valor de `priority` menor significa mayor urgencia.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Identificador único del proceso
    pub pid: String,
    /// Ciclos de CPU totales que necesita el proceso
    pub burst_time: Cycle,
    /// Ciclo a partir del cual el proceso puede ejecutarse
    pub arrival_time: Cycle,
    /// Prioridad (menor valor = más urgente)
    #[serde(default)]
    pub priority: i32,
}

impl Process {
    /// Crea un nuevo proceso.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_sched_sim::Process;
    ///
    /// let p = Process::new("P1", 5, 0, 1);
    /// assert_eq!(p.pid, "P1");
    /// assert_eq!(p.burst_time, 5);
    /// ```
    pub fn new(
        pid: impl Into<String>,
        burst_time: Cycle,
        arrival_time: Cycle,
        priority: i32,
    ) -> Self {
        Self {
            pid: pid.into(),
            burst_time,
            arrival_time,
            priority,
        }
    }
}

/// Recurso compartido con una capacidad máxima de accesos por ciclo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Nombre único del recurso
    pub name: String,
    /// Accesos simultáneos permitidos por ciclo
    pub count: u32,
}

impl Resource {
    /// Crea un recurso con la capacidad dada.
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Intento de acceso de un proceso a un recurso en un ciclo concreto.
///
/// El campo `action` (por ejemplo `READ` o `WRITE`) es solo informativo:
/// los simuladores no lo interpretan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Proceso que intenta el acceso
    pub pid: String,
    /// Tipo de acceso (informativo)
    pub action: String,
    /// Nombre del recurso solicitado
    pub resource: String,
    /// Ciclo en que se intenta el acceso
    pub cycle: Cycle,
}

impl Action {
    /// Crea una acción de acceso.
    pub fn new(
        pid: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
        cycle: Cycle,
    ) -> Self {
        Self {
            pid: pid.into(),
            action: action.into(),
            resource: resource.into(),
            cycle,
        }
    }
}

/// Construye el mapa `pid -> arrival_time` que necesitan las métricas de turnaround.
pub fn arrival_times(processes: &[Process]) -> BTreeMap<String, Cycle> {
    processes
        .iter()
        .map(|p| (p.pid.clone(), p.arrival_time))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_creation() {
        let p = Process::new("P7", 3, 2, -1);
        assert_eq!(p.pid, "P7");
        assert_eq!(p.arrival_time, 2);
        assert_eq!(p.priority, -1);
    }

    #[test]
    fn test_priority_defaults_to_zero() {
        let p: Process =
            serde_json::from_str(r#"{"pid":"A","burst_time":4,"arrival_time":1}"#).unwrap();
        assert_eq!(p.priority, 0);
    }

    #[test]
    fn test_arrival_times_map() {
        let procs = vec![Process::new("B", 1, 4, 0), Process::new("A", 2, 0, 0)];
        let map = arrival_times(&procs);
        assert_eq!(map.get("A"), Some(&0));
        assert_eq!(map.get("B"), Some(&4));
        assert_eq!(map.len(), 2);
    }
}
