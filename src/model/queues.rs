// src/model/queues.rs

use crate::error::{checked_quantity, Result};
use std::collections::VecDeque;

/// Lead time of every pipeline in the chain, in weeks.
pub const DEFAULT_DELAY: usize = 2;
/// Steady-state flow used to pre-fill pipelines and as the first order.
pub const EQUILIBRIUM_QUANTITY: u32 = 4;

/// A fixed-length shift register of pending quantities.
///
/// Slot 0 is the head (next to arrive), the last slot is the tail (this
/// week's new entry). A value injected after an advance comes back out of
/// `advance()` exactly `len()` calls later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayPipeline {
    slots: VecDeque<u32>,
}

impl DelayPipeline {
    pub fn new(length: usize, initial_value: u32) -> Self {
        let mut slots = VecDeque::with_capacity(length);
        // Pre-fill so the chain starts in equilibrium
        for _ in 0..length {
            slots.push_back(initial_value);
        }

        Self { slots }
    }

    /// Two-week pipeline holding 4 cases in every slot.
    pub fn equilibrium() -> Self {
        Self::new(DEFAULT_DELAY, EQUILIBRIUM_QUANTITY)
    }

    /// Moves everything one week forward and returns what exits at the head.
    /// The freed tail slot starts at zero.
    pub fn advance(&mut self) -> u32 {
        match self.slots.pop_front() {
            Some(output) => {
                self.slots.push_back(0);
                output
            }
            None => 0,
        }
    }

    /// Overwrites the tail slot. Injecting twice in the same week replaces
    /// the first value.
    pub fn inject(&mut self, quantity: u32) {
        if let Some(tail) = self.slots.back_mut() {
            *tail = quantity;
        }
    }

    /// Same as [`inject`](Self::inject) for callers working in signed units.
    pub fn try_inject(&mut self, quantity: i64) -> Result<()> {
        let quantity = checked_quantity("injected quantity", quantity)?;
        self.inject(quantity);
        Ok(())
    }

    /// The value that the next `advance()` will return.
    pub fn peek(&self) -> u32 {
        self.slots.front().copied().unwrap_or(0)
    }

    /// Sum of every slot, widened so full `u32` slots cannot overflow it.
    pub fn total(&self) -> u64 {
        self.slots.iter().map(|&quantity| u64::from(quantity)).sum()
    }

    pub fn snapshot(&self) -> Vec<u32> {
        self.slots.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for DelayPipeline {
    fn default() -> Self {
        Self::equilibrium()
    }
}
