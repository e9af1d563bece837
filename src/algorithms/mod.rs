//! # Algoritmos de Planificación
//!
//! Cinco funciones puras que convierten un conjunto de procesos en una línea
//! de tiempo de ejecución y en los tiempos de espera de cada proceso.
//!
//! - `fifo`: no preemptivo, orden de llegada
//! - `sjf`: no preemptivo, ráfaga más corta primero
//! - `priority`: no preemptivo, prioridad más baja primero
//! - `rr`: preemptivo por quantum
//! - `srt`: preemptivo ciclo a ciclo, menor tiempo restante primero

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use log::debug;
use serde::Serialize;

use crate::process::{Cycle, Process};

pub mod fifo;
pub mod priority;
pub mod rr;
pub mod sjf;
pub mod srt;

/// Intervalo semiabierto `[start, end)` durante el cual `pid` ocupó la CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineSlice {
    pub pid: String,
    pub start: Cycle,
    pub end: Cycle,
}

impl TimelineSlice {
    /// Crea el intervalo `[start, end)` para `pid`.
    pub fn new(pid: &str, start: Cycle, end: Cycle) -> Self {
        debug!("{} ocupa la CPU en [{}, {})", pid, start, end);
        Self {
            pid: pid.to_string(),
            start,
            end,
        }
    }

    /// Ciclos que abarca el intervalo.
    pub fn duration(&self) -> Cycle {
        self.end - self.start
    }
}

/// Salida cruda de un algoritmo: línea de tiempo y tiempos de espera por pid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlgorithmOutput {
    pub timeline: Vec<TimelineSlice>,
    /// Espera de cada pid (finalización - llegada - ráfaga)
    pub waiting_times: BTreeMap<String, Cycle>,
}

/// Copia de los procesos ordenada por llegada; empates en orden de entrada.
pub(crate) fn by_arrival(processes: &[Process]) -> Vec<&Process> {
    let mut procs: Vec<&Process> = processes.iter().collect();
    procs.sort_by_key(|p| p.arrival_time);
    procs
}

/// Cola de listos estable para SJF y Priority.
///
/// Los elementos se ordenan por `(clave, orden de admisión)`, de modo que
/// entre claves iguales sale primero el admitido antes.
struct ReadyQueue<K: Ord> {
    heap: BinaryHeap<Reverse<(K, usize)>>,
}

impl<K: Ord> ReadyQueue<K> {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    fn push(&mut self, key: K, admission: usize) {
        self.heap.push(Reverse((key, admission)));
    }

    fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|Reverse((_, admission))| admission)
    }
}

/// Bucle común de los algoritmos no preemptivos con cola de listos.
///
/// `key` decide qué proceso admitido se ejecuta a continuación (el menor gana).
/// Como los procesos se admiten en orden de llegada, el índice en `procs`
/// coincide con el orden de admisión.
pub(crate) fn run_to_completion<K, F>(processes: &[Process], key: F) -> AlgorithmOutput
where
    K: Ord,
    F: Fn(&Process) -> K,
{
    let procs = by_arrival(processes);
    let mut output = AlgorithmOutput::default();
    let mut ready = ReadyQueue::new();
    let mut next = 0;
    let mut clock: Cycle = 0;

    loop {
        while let Some(p) = procs.get(next).filter(|p| p.arrival_time <= clock) {
            ready.push(key(*p), next);
            next += 1;
        }

        let Some(idx) = ready.pop() else {
            // CPU ociosa hasta la siguiente llegada
            match procs.get(next) {
                Some(p) => {
                    clock = p.arrival_time;
                    continue;
                }
                None => break,
            }
        };

        let p = procs[idx];
        let end = clock + p.burst_time;
        output.timeline.push(TimelineSlice::new(&p.pid, clock, end));
        output
            .waiting_times
            .insert(p.pid.clone(), clock - p.arrival_time);
        clock = end;
    }

    output
}
