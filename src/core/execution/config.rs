//! Configuration for replaying an event log
//!
//! Defaults reproduce the standard console output; the options cover the
//! points where the replay can reasonably differ.

use crate::core::waiting::WaitingOrder;

/// Options controlling a replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Order in which waiting clients get a freed table
    pub waiting_order: WaitingOrder,
    /// Echo a too-early line before its `NotOpenYet` notice
    pub echo_dropped_lines: bool,
}

impl ReplayConfig {
    /// Create a configuration with default values
    ///
    /// Default configuration hands tables out in arrival order and does not
    /// echo dropped lines
    pub fn new() -> Self {
        Self {
            waiting_order: WaitingOrder::default(),
            echo_dropped_lines: false,
        }
    }

    /// Set the order of the waiting set
    ///
    /// # Arguments
    /// * `order` - How the next waiting client is chosen
    pub fn with_waiting_order(mut self, order: WaitingOrder) -> Self {
        self.waiting_order = order;
        self
    }

    /// Echo lines that arrive before opening time
    pub fn with_echo_dropped_lines(mut self, echo: bool) -> Self {
        self.echo_dropped_lines = echo;
        self
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self::new()
    }
}
