use log::debug;
use std::collections::VecDeque;

use crate::calculator::CalculationResult;
use crate::error::{Error, Result};

/// Computed results, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: VecDeque<CalculationResult>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// A history that keeps at most `limit` entries, dropping the oldest.
    pub fn with_capacity_limit(limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(Error::Config("history limit must be at least 1".to_string()));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(limit),
            limit: Some(limit),
        })
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Prepend a result. Returns the entry evicted by the capacity limit, if any.
    pub fn record(&mut self, result: CalculationResult) -> Option<CalculationResult> {
        self.entries.push_front(result);
        match self.limit {
            Some(limit) if self.entries.len() > limit => {
                let evicted = self.entries.pop_back();
                debug!("history over limit of {}, evicted oldest entry", limit);
                evicted
            }
            _ => None,
        }
    }

    /// Remove the entry at `index` (0 = most recent). Out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) -> Option<CalculationResult> {
        self.entries.remove(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &VecDeque<CalculationResult> {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CalculationResult> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of savings across every retained entry.
    pub fn total_savings(&self) -> f64 {
        self.entries.iter().map(|e| e.yearly_savings()).sum()
    }
}
