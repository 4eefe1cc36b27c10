//! Bounded run history
//!
//! Newest result first. Pushing past capacity evicts the oldest entry.

use crate::assessment::SimulationResult;
use std::collections::vec_deque;
use std::collections::VecDeque;

/// Point of the temperature/humidity chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub sequence: u64,
    pub temperature: f64,
    pub humidity: f64,
}

/// Log of past evaluations, newest first
#[derive(Debug, Clone)]
pub struct RunHistory {
    entries: VecDeque<SimulationResult>,
    capacity: usize,
}

impl RunHistory {
    /// Empty history keeping at most `capacity` entries (minimum 1)
    ///
    /// Storage grows with the entries; the capacity is only a bound.
    pub fn new(capacity: usize) -> Self {
        RunHistory {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Prepend a result, evicting the oldest beyond capacity
    pub fn push(&mut self, result: SimulationResult) {
        self.entries.push_front(result);
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Most recent result
    pub fn latest(&self) -> Option<&SimulationResult> {
        self.entries.front()
    }

    /// Results, newest first
    pub fn iter(&self) -> vec_deque::Iter<'_, SimulationResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Temperature and humidity of every entry, oldest first, for charting
    pub fn temperature_humidity_series(&self) -> Vec<SeriesPoint> {
        self.entries
            .iter()
            .rev()
            .map(|result| SeriesPoint {
                sequence: result.sequence,
                temperature: *result.parameters.temperature,
                humidity: *result.parameters.humidity,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a RunHistory {
    type Item = &'a SimulationResult;
    type IntoIter = vec_deque::Iter<'a, SimulationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
