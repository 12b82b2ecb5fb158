//! Long-running loops: the signal poller and the command listener

pub mod commands;
pub mod listener;
pub mod runtime;

pub use commands::{parse_entry_command, EntryCommand};
pub use listener::{CommandListener, InboxCursor, PollOutcome};
pub use runtime::{PassSummary, RuntimeConfig, SignalRuntime};
