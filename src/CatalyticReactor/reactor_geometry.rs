//! Geometry of the catalyst bed and its hydraulic resistance.
//!
//! Pressure gradient across the packed bed follows the Ergun correlation:
//!
//! ```text
//! dP/dx = 150*(1-ε)²/ε³ * μ*u/d²  +  1.75*(1-ε)/ε³ * ρ*u²/d
//! ```
//!
//! | Symbol | Description | Units |
//! |--------|-------------|-------|
//! | `ε` | bed porosity | - |
//! | `d` | characteristic size of the packing cell | m |
//! | `μ` | effective viscosity | Pa·s |
//! | `u` | superficial velocity | m/s |
//! | `ρ` | effective density | kg/m³ |
use super::marching_solver::ReactorError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReactorGeometry {
    /// m
    pub diameter: f64,
    /// m
    pub length: f64,
    /// packing characteristic length, m
    pub cell_size: f64,
    /// void fraction of the bed
    pub porosity: f64,
    /// cross-sectional area, m²
    pub area: f64,
}

impl ReactorGeometry {
    pub fn new(
        diameter: f64,
        length: f64,
        cell_size: f64,
        porosity: f64,
    ) -> Result<Self, ReactorError> {
        positive("diameter", diameter)?;
        positive("length", length)?;
        positive("cell_size", cell_size)?;
        if !(porosity > 0.0 && porosity < 1.0) {
            return Err(ReactorError::InvalidInput {
                parameter: "porosity",
                value: porosity,
            });
        }
        Ok(Self {
            diameter,
            length,
            cell_size,
            porosity,
            area: PI * diameter.powi(2) / 4.0,
        })
    }

    /// step length for a march of `segments` equal steps
    pub fn step(&self, segments: usize) -> f64 {
        self.length / segments as f64
    }
}

/// geometry as it is written in a task file; the area is always derived
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeometryInput {
    pub diameter: f64,
    pub length: f64,
    pub cell_size: f64,
    pub porosity: f64,
}

impl TryFrom<GeometryInput> for ReactorGeometry {
    type Error = ReactorError;
    fn try_from(input: GeometryInput) -> Result<Self, Self::Error> {
        ReactorGeometry::new(
            input.diameter,
            input.length,
            input.cell_size,
            input.porosity,
        )
    }
}

pub(crate) fn positive(parameter: &'static str, value: f64) -> Result<f64, ReactorError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ReactorError::InvalidInput { parameter, value })
    }
}

/// Ergun resistance closed over a fixed bed
#[derive(Debug, Clone, Copy)]
pub struct ErgunBed {
    viscous_factor: f64,
    inertial_factor: f64,
}

impl ErgunBed {
    pub fn from_geometry(geometry: &ReactorGeometry) -> Self {
        let eps = geometry.porosity;
        let d = geometry.cell_size;
        Self {
            viscous_factor: 150.0 * (1.0 - eps).powi(2) / eps.powi(3) / d.powi(2),
            inertial_factor: 1.75 * (1.0 - eps) / eps.powi(3) / d,
        }
    }

    /// pressure drop per unit length, Pa/m; zero velocity gives zero drop
    pub fn pressure_gradient(&self, u: f64, mu: f64, rho: f64) -> f64 {
        self.viscous_factor * mu * u + self.inertial_factor * rho * u.powi(2)
    }
}
