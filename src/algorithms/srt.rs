//! Shortest Remaining Time (preemptivo, granularidad de 1 ciclo).

use super::{by_arrival, AlgorithmOutput, TimelineSlice};
use crate::process::{Cycle, Process};

/// Planifica ciclo a ciclo eligiendo el proceso con menor tiempo restante.
///
/// Los ciclos contiguos de un mismo proceso se fusionan en un único
/// intervalo. Empates: el primero en orden de llegada (y de entrada), aunque
/// eso implique desalojar al proceso en ejecución.
pub fn schedule(processes: &[Process]) -> AlgorithmOutput {
    let procs = by_arrival(processes);
    let mut remaining: Vec<Cycle> = procs.iter().map(|p| p.burst_time).collect();
    let mut unfinished = remaining.iter().filter(|&&r| r > 0).count();
    let mut output = AlgorithmOutput::default();
    let mut clock: Cycle = 0;
    // (índice del proceso en CPU, ciclo en que abrió su intervalo)
    let mut running: Option<(usize, Cycle)> = None;

    while unfinished > 0 {
        let chosen = procs
            .iter()
            .enumerate()
            .filter(|(i, p)| p.arrival_time <= clock && remaining[*i] > 0)
            .min_by_key(|(i, _)| remaining[*i])
            .map(|(i, _)| i);

        let Some(idx) = chosen else {
            let next_arrival = procs
                .iter()
                .enumerate()
                .filter(|(i, p)| remaining[*i] > 0 && p.arrival_time > clock)
                .map(|(_, p)| p.arrival_time)
                .min();
            match next_arrival {
                Some(at) => {
                    clock = at;
                    continue;
                }
                None => break,
            }
        };

        let opened_at = match running {
            Some((current, start)) if current == idx => start,
            Some((current, start)) => {
                output
                    .timeline
                    .push(TimelineSlice::new(&procs[current].pid, start, clock));
                clock
            }
            None => clock,
        };
        running = Some((idx, opened_at));

        remaining[idx] -= 1;
        clock += 1;

        if remaining[idx] == 0 {
            let p = procs[idx];
            output
                .timeline
                .push(TimelineSlice::new(&p.pid, opened_at, clock));
            output
                .waiting_times
                .insert(p.pid.clone(), clock - p.arrival_time - p.burst_time);
            running = None;
            unfinished -= 1;
        }
    }

    output
}
