//! Bounded sampling buffers for energy observations
//!
//! An [`EnergyHistory`] is fed one scalar per physics step but only records
//! every `stride`-th value, keeping at most `capacity` samples with
//! oldest-first eviction. Several independent instances track the different
//! energy quantities of the chain.

use std::collections::VecDeque;

/// Ring buffer of periodically sampled scalar observations
#[derive(Debug, Clone)]
pub struct EnergyHistory {
    stride: u64,            // record every stride-th push
    capacity: usize,        // bound on buffered samples, mutable at runtime
    counter: u64,           // total pushes seen, recorded or not
    samples: VecDeque<f64>, // FIFO, oldest sample at the front
}

impl EnergyHistory {
    pub fn new(stride: u64, capacity: usize) -> Self {
        Self {
            stride: stride.max(1),
            capacity: capacity.max(1),
            counter: 0,
            samples: VecDeque::new(),
        }
    }

    /// Offer one observation
    ///
    /// The internal counter advances on every call; the value is only
    /// appended when the counter lands on a multiple of `stride`, and the
    /// front is then evicted while the buffer exceeds `capacity`.
    pub fn push(&mut self, value: f64) {
        let record = self.counter % self.stride == 0;
        self.counter += 1;
        if record {
            self.samples.push_back(value);
            while self.samples.len() > self.capacity {
                self.samples.pop_front();
            }
        }
    }

    /// Change the sample bound
    ///
    /// No eager eviction: a later recording push trims the buffer down to
    /// the new bound.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Buffered samples, oldest first
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Most recently recorded sample, if any
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Maximum value currently buffered; `0.0` on an empty buffer, which
    /// callers must tolerate at startup
    pub fn max_over_window(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_every_stride_th_push() {
        let mut history = EnergyHistory::new(10, 5);
        for i in 0..25 {
            history.push(i as f64);
        }
        // Pushes 0, 10 and 20 are recorded
        assert_eq!(history.len(), 3);
        let got: Vec<f64> = history.samples().collect();
        assert_eq!(got, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut history = EnergyHistory::new(1, 3);
        for i in 0..5 {
            history.push(i as f64);
        }
        let got: Vec<f64> = history.samples().collect();
        assert_eq!(got, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn capacity_shrink_takes_effect_on_next_recording_push() {
        let mut history = EnergyHistory::new(1, 4);
        for i in 0..4 {
            history.push(i as f64);
        }
        history.set_capacity(2);
        // Nothing evicted yet
        assert_eq!(history.len(), 4);
        history.push(4.0);
        let got: Vec<f64> = history.samples().collect();
        assert_eq!(got, vec![3.0, 4.0]);
    }

    #[test]
    fn max_over_window_is_zero_when_empty() {
        let history = EnergyHistory::new(1, 4);
        assert_eq!(history.max_over_window(), 0.0);
    }

    #[test]
    fn max_over_window_ignores_evicted_samples() {
        let mut history = EnergyHistory::new(1, 2);
        history.push(9.0);
        history.push(1.0);
        history.push(2.0);
        assert_eq!(history.max_over_window(), 2.0);
    }
}
