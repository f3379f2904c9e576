//! Runtime module - connects the game core to a real terminal and clock.
//!
//! - [`TokioScheduler`]: timers as tokio tasks that post tokens to the loop
//! - [`InputReader`]: crossterm events on a dedicated thread, one latch cycle at a time
//! - [`run_loop`]: the single-consumer host loop
//! - [`run_session`]: wires all of the above to a [`TerminalRenderer`](crate::term::TerminalRenderer)
//!
//! # Environment Variables
//!
//! See [`HostConfig::from_env`] and [`GameConfig::from_env`](crate::core::GameConfig::from_env).

pub mod config;
pub mod event;
pub mod host;
pub mod reader;
pub mod scheduler;
pub mod sink;

pub use simon_core as core;
pub use simon_input as input;
pub use simon_term as term;
pub use simon_types as types;

pub use config::{HostConfig, InputConfig};
pub use event::LoopEvent;
pub use host::{run_loop, run_session, Outcome};
pub use reader::{read_cycle, read_loop, CrosstermEvents, Cycle, EventSource, InputReader};
pub use scheduler::TokioScheduler;
pub use sink::{RenderSink, TerminalSink};
