//! # Pagecraft Configuration Library
//!
//! Configuration for the pagecraft prop-controller runtime: the device
//! breakpoints used by responsive values, the identifier policies applied when
//! duplicating data, resolution settings and logging defaults.
//!
//! ## Features
//!
//! - Multi-format support (TOML, YAML, JSON)
//! - Validation of breakpoint ordering
//! - Per-namespace identifier policies for copy operations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagecraft_config::ConfigLoader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::load_from_file("pagecraft.toml")?;
//!     println!("base breakpoint: {}", config.base_breakpoint().id);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod breakpoints;
mod config;
mod ids;
mod loader;

pub use breakpoints::*;
pub use config::*;
pub use ids::*;
pub use loader::*;
