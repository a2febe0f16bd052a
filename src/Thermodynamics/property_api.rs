//! # Property API
//!
//! Contract between the reactor model and a real-fluid property oracle.
//!
//! The reactor needs five queries: heat capacity of a substance at (T, P), saturation
//! temperature of water at P, latent heat of vaporization of water at P, molar mass and
//! specific gas constant of a substance. Every query may fail (state outside the validity
//! range of a correlation, non-physical result) and failures are returned as
//! [`PropertyError`], never replaced by a default value.
//!
//! Implementations are dispatched through [`PropertyEnum`] (same pattern as `ThermoEnum`
//! for NIST/NASA calculators), but every consumer is generic over the trait so a caller
//! may also plug in its own source.
//!
//! | Query | Units |
//! |-------|-------|
//! | `heat_capacity` | J/(kg·K) |
//! | `saturation_temperature` | K |
//! | `latent_heat` | J/kg |
//! | `molar_mass` | kg/mol |
//! | `gas_constant` | J/(kg·K) |
use super::FixedData::FixedData;
use super::IF97data::IF97data;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Universal gas constant in J/(mol·K)
pub const R_G: f64 = 8.314462618;
/// Molar mass of hydrogen peroxide, kg/mol
pub const M_H2O2: f64 = 0.034015;
/// Molar mass of water, kg/mol
pub const M_H2O: f64 = 0.018015;
/// Molar mass of oxygen, kg/mol
pub const M_O2: f64 = 0.031999;

/// Species (and phase, where it matters for the oracle) known to the reactor model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Substance {
    /// liquid hydrogen peroxide
    HydrogenPeroxide,
    /// liquid water
    Water,
    /// water vapour
    Steam,
    /// gaseous oxygen
    Oxygen,
}

impl Substance {
    pub fn formula(&self) -> &'static str {
        match self {
            Substance::HydrogenPeroxide => "H2O2",
            Substance::Water => "H2O(l)",
            Substance::Steam => "H2O(g)",
            Substance::Oxygen => "O2",
        }
    }
}

impl fmt::Display for Substance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.formula())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[allow(non_snake_case)]
pub enum PropertyError {
    /// state outside the validity range of the correlation
    #[error("{query}: {quantity} = {value} is outside the valid range [{min}, {max}]")]
    OutOfRange {
        query: &'static str,
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// the oracle could not resolve the property at this state
    #[error("{query} for {substance} failed at T = {T} K, P = {P} Pa")]
    QueryFailed {
        query: &'static str,
        substance: Substance,
        T: f64,
        P: f64,
    },
    #[error("{query} is not available for {substance}")]
    Unsupported {
        query: &'static str,
        substance: Substance,
    },
}

#[allow(non_snake_case)]
#[enum_dispatch]
pub trait PropertySource {
    /// isobaric specific heat capacity, J/(kg·K)
    fn heat_capacity(&self, substance: Substance, T: f64, P: f64) -> Result<f64, PropertyError>;
    /// saturation temperature of water at pressure P, K
    fn saturation_temperature(&self, P: f64) -> Result<f64, PropertyError>;
    /// h(x=1) - h(x=0) of water at pressure P, J/kg
    fn latent_heat(&self, P: f64) -> Result<f64, PropertyError>;
    /// kg/mol
    fn molar_mass(&self, substance: Substance) -> Result<f64, PropertyError>;
    /// specific gas constant R_G/M, J/(kg·K)
    fn gas_constant(&self, substance: Substance) -> Result<f64, PropertyError>;
}

#[derive(Debug, Clone)]
#[enum_dispatch(PropertySource)]
pub enum PropertyEnum {
    IF97(IF97data),
    Fixed(FixedData),
}

pub enum PropertyType {
    /// IAPWS-IF97 water/steam, NASA polynomials for oxygen
    IF97,
    /// constant values, mostly for tests and quick estimates
    Fixed,
}

pub fn create_property_source(source_type: PropertyType) -> PropertyEnum {
    match source_type {
        PropertyType::IF97 => PropertyEnum::IF97(IF97data::new()),
        PropertyType::Fixed => PropertyEnum::Fixed(FixedData::default()),
    }
}

/// molar masses are shared by every source
pub fn molar_mass_of(substance: Substance) -> f64 {
    match substance {
        Substance::HydrogenPeroxide => M_H2O2,
        Substance::Water | Substance::Steam => M_H2O,
        Substance::Oxygen => M_O2,
    }
}

/// Rejects non-finite and non-positive oracle output.
#[allow(non_snake_case)]
pub fn checked_property(
    query: &'static str,
    substance: Substance,
    T: f64,
    P: f64,
    value: f64,
) -> Result<f64, PropertyError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PropertyError::QueryFailed {
            query,
            substance,
            T,
            P,
        })
    }
}

pub fn check_range(
    query: &'static str,
    quantity: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, PropertyError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(PropertyError::OutOfRange {
            query,
            quantity,
            value,
            min,
            max,
        })
    }
}
