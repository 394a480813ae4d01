//! Shared integration plumbing
//!
//! Common types used by the integration crates in this workspace: the
//! entity platform enum, config flow step results, and the in-memory
//! config entry handed from a finished flow to integration setup.

pub mod entry;
pub mod flow;
pub mod platform;

pub use entry::{ConfigEntry, ConfigEntrySource};
pub use flow::{FlowResult, FormField};
pub use platform::Platform;
