pub mod club;
pub mod errors;
pub mod event;
pub mod execution;
pub mod handlers;
pub mod output;
pub mod state;
pub mod time;
pub mod waiting;
