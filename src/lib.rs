pub mod core;

// Re-export commonly used types
pub use crate::core::club::{Club, Table, TableReport};
pub use crate::core::errors::{ClubError, ClubResult};
pub use crate::core::event::{classify_line, Classified, Event, EventKind, Header};
pub use crate::core::execution::{replay, replay_str, run_file, ReplayConfig, SimulationEngine};
pub use crate::core::output::{JsonLinesSink, LineSink, Notice, Output, OutputSink};
pub use crate::core::state::ClubState;
pub use crate::core::time::Time;
pub use crate::core::waiting::{WaitingOrder, WaitingSet};
