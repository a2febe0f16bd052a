//! # Gas Generator Module
//!
//! Properties of fuel-rich O2/CH4 combustion products taken from a pressure-indexed table.
//!
//! - [`gg_table`]: table loading, pressure-level bracketing, process-wide cache
//! - [`interpolation`]: 1-D linear interpolation with linear extrapolation
//! - [`gg_resolver`]: forward (known T) and inverse (known mixture ratio) lookups
//!
//! ```no_run
//! use PeroxideReactor::GasGenerator::gg_resolver::resolve_gg_properties;
//! let gg = resolve_gg_properties(7.5e6, None, Some(0.3)).unwrap();
//! gg.pretty_print();
//! ```
pub mod gg_resolver;
pub mod gg_table;
pub mod interpolation;
