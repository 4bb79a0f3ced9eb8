pub mod config;
pub mod simulation_engine;

// Re-export commonly used types
pub use config::ReplayConfig;
pub use simulation_engine::{replay, replay_str, run_file, SimulationEngine};
