//! Shortest Job First (no preemptivo).

use super::{run_to_completion, AlgorithmOutput};
use crate::process::Process;

/// En cada punto de decisión elige, entre los procesos ya llegados, el de
/// ráfaga más corta. Empates: el primero en entrar a la cola de listos.
pub fn schedule(processes: &[Process]) -> AlgorithmOutput {
    run_to_completion(processes, |p| p.burst_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Cycle;

    #[test]
    fn test_sjf_reference_example() {
        let procs = vec![
            Process::new("P1", 5, 0, 0),
            Process::new("P2", 3, 1, 0),
            Process::new("P3", 1, 2, 0),
        ];
        let out = schedule(&procs);
        let slices: Vec<(&str, Cycle, Cycle)> = out
            .timeline
            .iter()
            .map(|s| (s.pid.as_str(), s.start, s.end))
            .collect();
        assert_eq!(slices, vec![("P1", 0, 5), ("P3", 5, 6), ("P2", 6, 9)]);
        assert_eq!(out.waiting_times["P3"], 3);
        assert_eq!(out.waiting_times["P2"], 5);
    }

    #[test]
    fn test_sjf_tie_goes_to_earlier_admission() {
        let procs = vec![
            Process::new("long", 4, 0, 0),
            Process::new("x", 2, 1, 0),
            Process::new("y", 2, 2, 0),
        ];
        let out = schedule(&procs);
        let order: Vec<&str> = out.timeline.iter().map(|s| s.pid.as_str()).collect();
        assert_eq!(order, vec!["long", "x", "y"]);
    }

    #[test]
    fn test_sjf_fast_forwards_idle_gap() {
        let procs = vec![Process::new("A", 1, 0, 0), Process::new("B", 3, 7, 0)];
        let out = schedule(&procs);
        assert_eq!(out.timeline[1].start, 7);
        assert_eq!(out.timeline[1].end, 10);
    }
}
