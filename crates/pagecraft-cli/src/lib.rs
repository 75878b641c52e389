//! pagecraft command-line front end
//!
//! Every command reads JSON files and writes JSON to stdout.

pub mod cli;
pub mod commands;
pub mod io;
pub mod logging;
