//! # Catalytic Reactor Module
//!
//! Steady-state model of a packed catalyst bed where a hydrogen peroxide/water feed
//! decomposes into superheated steam and oxygen.
//!
//! ## Model Assumptions
//!
//! - one-dimensional plug flow, no radial gradients
//! - single-step first-order Arrhenius decomposition `2 H2O2 => 2 H2O + O2`
//! - liquid density is constant, gas phase is an ideal mixture of steam and oxygen
//! - heat release is spent in a fixed order: sensible heating to saturation,
//!   vaporization, superheat of the gas phase
//! - packed-bed pressure drop by the Ergun correlation with a two-phase viscosity
//!   blended by gas volume fraction
//!
//! ## Nomenclature
//!
//! | Symbol | Description | Units |
//! |--------|-------------|-------|
//! | `m_*` | mass flow of a species | kg/s |
//! | `T` | temperature | K |
//! | `P` | pressure | Pa |
//! | `Q` | heat flow available in a segment | W |
//! | `X` | degree of decomposition, 1 - m_H2O2/m_H2O2_in | - |
//!
//! Properties come from any [`PropertySource`](crate::Thermodynamics::property_api::PropertySource).
pub mod marching_solver;
pub mod reactor_geometry;
pub mod reactor_output;
pub mod task_parser;
mod reactor_tests;
