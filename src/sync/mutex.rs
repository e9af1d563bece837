//! Simulación de acceso exclusivo (mutex).

use super::{simulate_with_capacity, SyncResult};
use crate::process::{Action, Process, Resource};

/// Cada recurso admite un solo acceso por ciclo, sin importar su `count`
/// declarado.
pub fn simulate(processes: &[Process], resources: &[Resource], actions: &[Action]) -> SyncResult {
    simulate_with_capacity(processes, resources, actions, |_| 1)
}
