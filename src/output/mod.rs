//! Output sinks driven by the timer: the live console line and the run log

pub mod console;
pub mod run_log;

pub use console::ConsoleRenderer;
pub use run_log::RunLog;
