//! Agent-native command schema (ANCS).
//!
//! Declarative risk/safety metadata attached to every command so that
//! automation (and help output) can reason about a command before running
//! it. Pure data, authored statically, never mutated at runtime.

mod registry;
mod schema;

pub use registry::{find, registry};
pub use schema::{
    merge, CommandKind, Confirm, OsUser, ParallelSafety, Risk, Schema, Volatility,
};
