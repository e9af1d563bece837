//! First-In-First-Out: los procesos se ejecutan completos en orden de llegada.

use super::{by_arrival, AlgorithmOutput, TimelineSlice};
use crate::process::{Cycle, Process};

/// Planifica los procesos en orden de llegada (empates: orden de entrada).
///
/// # Examples
///
/// ```rust
/// use cpu_sched_sim::Process;
/// use cpu_sched_sim::algorithms::fifo;
///
/// let procs = vec![Process::new("P1", 5, 0, 0), Process::new("P2", 3, 1, 0)];
/// let out = fifo::schedule(&procs);
/// assert_eq!(out.timeline[1].start, 5);
/// assert_eq!(out.waiting_times["P2"], 4);
/// ```
pub fn schedule(processes: &[Process]) -> AlgorithmOutput {
    let mut output = AlgorithmOutput::default();
    let mut clock: Cycle = 0;

    for p in by_arrival(processes) {
        // Si la CPU está libre antes de la llegada, queda ociosa
        clock = clock.max(p.arrival_time);
        let end = clock + p.burst_time;
        output.timeline.push(TimelineSlice::new(&p.pid, clock, end));
        output
            .waiting_times
            .insert(p.pid.clone(), clock - p.arrival_time);
        clock = end;
    }

    output
}
