//! Simulación de semáforo contador.

use super::{simulate_with_capacity, SyncResult};
use crate::process::{Action, Process, Resource};

/// Cada recurso admite hasta `count` accesos por ciclo.
pub fn simulate(processes: &[Process], resources: &[Resource], actions: &[Action]) -> SyncResult {
    simulate_with_capacity(processes, resources, actions, |r| r.count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::AccessState;

    #[test]
    fn test_semaphore_honours_count() {
        let res = vec![Resource::new("R", 2)];
        let acts = vec![
            Action::new("P1", "READ", "R", 0),
            Action::new("P2", "READ", "R", 0),
            Action::new("P3", "READ", "R", 0),
        ];
        let procs = vec![
            Process::new("P1", 1, 0, 0),
            Process::new("P2", 1, 0, 0),
            Process::new("P3", 1, 0, 0),
        ];
        let out = simulate(&procs, &res, &acts);
        let states: Vec<AccessState> = out.timeline.iter().map(|e| e.state).collect();
        assert_eq!(
            states,
            vec![AccessState::Accessed, AccessState::Accessed, AccessState::Waiting]
        );
        assert_eq!(out.waiting_counts["P3"], 1);
        assert_eq!(out.waiting_counts["P1"], 0);
    }

    #[test]
    fn test_semaphore_declared_count_five() {
        let res = vec![Resource::new("R", 5)];
        let acts = vec![
            Action::new("P1", "READ", "R", 0),
            Action::new("P2", "READ", "R", 0),
        ];
        let out = simulate(&[], &res, &acts);
        assert_eq!(out.accessed_count(), 2);
    }

    #[test]
    fn test_semaphore_no_actions() {
        let procs = vec![Process::new("P1", 1, 0, 0)];
        let out = simulate(&procs, &[Resource::new("R", 1)], &[]);
        assert!(out.timeline.is_empty());
        assert_eq!(out.waiting_counts["P1"], 0);
        assert_eq!(out.total_cycles(), 0);
    }
}
