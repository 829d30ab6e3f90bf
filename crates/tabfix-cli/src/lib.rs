//! Library side of the `tabfix` binary: configuration, logging, the run
//! pipeline and CSV output.

pub mod config;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod types;
