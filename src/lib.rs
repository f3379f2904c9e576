//! Simon (workspace facade crate).
//!
//! Re-exports the member crates under one roof so the binary, the integration
//! tests and the benches can use `simon::{core,input,runtime,term,types}`.

pub use simon_core as core;
pub use simon_input as input;
pub use simon_runtime as runtime;
pub use simon_term as term;
pub use simon_types as types;
