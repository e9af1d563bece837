//! Round Robin (preemptivo por quantum).

use std::collections::VecDeque;

use super::{by_arrival, AlgorithmOutput, TimelineSlice};
use crate::error::{Result, SimError};
use crate::process::{Cycle, Process};

/// Planifica los procesos en rondas de como máximo `quantum` ciclos.
///
/// Los procesos que llegan durante una rebanada se encolan antes de
/// reencolar al proceso que acaba de ejecutarse.
///
/// # Errors
///
/// `SimError::InvalidParameter` si `quantum` es 0.
///
/// # Examples
///
/// ```rust
/// use cpu_sched_sim::Process;
/// use cpu_sched_sim::algorithms::rr;
///
/// let procs = vec![Process::new("A", 3, 0, 0), Process::new("B", 2, 0, 0)];
/// let out = rr::schedule(&procs, 2).unwrap();
/// assert_eq!(out.timeline.len(), 3);
/// assert!(rr::schedule(&procs, 0).is_err());
/// ```
pub fn schedule(processes: &[Process], quantum: Cycle) -> Result<AlgorithmOutput> {
    if quantum == 0 {
        return Err(SimError::InvalidParameter {
            parameter: "quantum",
            value: 0,
        });
    }

    let procs = by_arrival(processes);
    let mut remaining: Vec<Cycle> = procs.iter().map(|p| p.burst_time).collect();
    let mut finish: Vec<Cycle> = vec![0; procs.len()];
    let mut ready: VecDeque<usize> = VecDeque::new();
    let mut timeline = Vec::new();
    let mut next = 0;
    let mut clock: Cycle = 0;

    let admit = |next: &mut usize, clock: Cycle, ready: &mut VecDeque<usize>| {
        while procs.get(*next).is_some_and(|p| p.arrival_time <= clock) {
            ready.push_back(*next);
            *next += 1;
        }
    };

    loop {
        admit(&mut next, clock, &mut ready);

        let Some(idx) = ready.pop_front() else {
            match procs.get(next) {
                Some(p) => {
                    clock = p.arrival_time;
                    continue;
                }
                None => break,
            }
        };

        let run = quantum.min(remaining[idx]);
        timeline.push(TimelineSlice::new(&procs[idx].pid, clock, clock + run));
        remaining[idx] -= run;
        clock += run;

        // Llegadas durante la rebanada van por delante del proceso desalojado
        admit(&mut next, clock, &mut ready);

        if remaining[idx] > 0 {
            ready.push_back(idx);
        } else {
            finish[idx] = clock;
        }
    }

    let waiting_times = procs
        .iter()
        .zip(finish)
        .map(|(p, end)| (p.pid.clone(), end - p.arrival_time - p.burst_time))
        .collect();

    Ok(AlgorithmOutput {
        timeline,
        waiting_times,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices(out: &AlgorithmOutput) -> Vec<(&str, Cycle, Cycle)> {
        out.timeline
            .iter()
            .map(|s| (s.pid.as_str(), s.start, s.end))
            .collect()
    }

    #[test]
    fn test_rr_zero_quantum_rejected() {
        let procs = vec![Process::new("A", 3, 0, 0)];
        assert_eq!(
            schedule(&procs, 0),
            Err(SimError::InvalidParameter {
                parameter: "quantum",
                value: 0
            })
        );
    }

    #[test]
    fn test_rr_reference_processes() {
        let procs = vec![
            Process::new("P1", 5, 0, 0),
            Process::new("P2", 3, 1, 0),
            Process::new("P3", 1, 2, 0),
        ];
        let out = schedule(&procs, 2).unwrap();
        assert_eq!(
            slices(&out),
            vec![
                ("P1", 0, 2),
                ("P2", 2, 4),
                ("P3", 4, 5),
                ("P1", 5, 7),
                ("P2", 7, 8),
                ("P1", 8, 9),
            ]
        );
        assert_eq!(out.waiting_times["P1"], 4);
        assert_eq!(out.waiting_times["P2"], 4);
        assert_eq!(out.waiting_times["P3"], 2);
    }

    #[test]
    fn test_rr_same_cycle_arrival_goes_first() {
        // B llega justo cuando termina la rebanada de A
        let procs = vec![Process::new("A", 4, 0, 0), Process::new("B", 1, 2, 0)];
        let out = schedule(&procs, 2).unwrap();
        assert_eq!(slices(&out), vec![("A", 0, 2), ("B", 2, 3), ("A", 3, 5)]);
    }

    #[test]
    fn test_rr_large_quantum_behaves_like_fifo() {
        let procs = vec![Process::new("A", 3, 0, 0), Process::new("B", 2, 1, 0)];
        let out = schedule(&procs, 100).unwrap();
        assert_eq!(slices(&out), vec![("A", 0, 3), ("B", 3, 5)]);
        assert_eq!(out.waiting_times["B"], 2);
    }

    #[test]
    fn test_rr_idle_gap() {
        let procs = vec![Process::new("A", 1, 0, 0), Process::new("B", 3, 5, 0)];
        let out = schedule(&procs, 2).unwrap();
        assert_eq!(slices(&out), vec![("A", 0, 1), ("B", 5, 7), ("B", 7, 8)]);
        assert_eq!(out.waiting_times["B"], 0);
    }
}
