//! Library side of the `wpt-aggregate` binary: job configuration, job
//! runners and logging setup.

pub mod commands;
pub mod config;
pub mod logging;
pub mod types;
