//! # Catalytic decomposition of hydrogen peroxide
//!
//! Single-step reaction `2 H2O2 => 2 H2O + O2` with first-order Arrhenius kinetics:
//!
//! ```text
//! w = A * exp(-Ea/(R*T)) * C_H2O2        [mol/(m³·s)]
//! ```
//!
//! where `C_H2O2` is moles of peroxide per unit volume of liquid. Each kilogram of
//! decomposed peroxide yields `O2_SHARE` kg of oxygen and `H2O_SHARE` kg of water and
//! releases `Q_reaction` J of heat.
use crate::Thermodynamics::property_api::{PropertyError, PropertySource, R_G, Substance};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// mass of O2 per unit mass of decomposed H2O2
pub const O2_SHARE: f64 = 0.4706;
/// mass of H2O per unit mass of decomposed H2O2
pub const H2O_SHARE: f64 = 0.5294;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KineticsError {
    #[error("invalid input for reaction rate: {parameter} = {value}")]
    InvalidInput { parameter: &'static str, value: f64 },
}

/// Arrhenius parameters of the decomposition on the catalyst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct ArrheniusDecomposition {
    /// pre-exponential factor, 1/s
    pub A: f64,
    /// activation energy, J/mol
    pub Ea: f64,
}

impl Default for ArrheniusDecomposition {
    fn default() -> Self {
        Self { A: 1.0e9, Ea: 4.9e4 }
    }
}

#[allow(non_snake_case)]
impl ArrheniusDecomposition {
    pub fn new(A: f64, Ea: f64) -> Self {
        Self { A, Ea }
    }

    pub fn K_const(&self, T: f64) -> Result<f64, KineticsError> {
        if !(T > 0.0) {
            return Err(KineticsError::InvalidInput {
                parameter: "T",
                value: T,
            });
        }
        Ok(self.A * f64::exp(-self.Ea / (R_G * T)))
    }

    /// Moles of peroxide consumed per unit volume per unit time.
    pub fn rate(&self, T: f64, concentration: f64) -> Result<f64, KineticsError> {
        if !(concentration >= 0.0) {
            return Err(KineticsError::InvalidInput {
                parameter: "concentration",
                value: concentration,
            });
        }
        Ok(self.K_const(T)? * concentration)
    }
}

/// Splits converted peroxide mass into (oxygen, water) product masses.
pub fn split_products(converted: f64) -> (f64, f64) {
    (converted * O2_SHARE, converted * H2O_SHARE)
}

/// Constants of the decomposition, fixed for the whole march
#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct ChemicalConstants {
    /// kg/mol
    pub M_H2O2: f64,
    /// kg/mol
    pub M_H2O: f64,
    /// kg/mol
    pub M_O2: f64,
    /// J/(mol·K)
    pub R: f64,
    pub kinetics: ArrheniusDecomposition,
    /// heat released per kg of decomposed peroxide, J/kg
    pub Q_reaction: f64,
}

/// Enthalpy of 2 H2O2(l) => 2 H2O(l) + O2(g) per kg of peroxide
pub const Q_DECOMPOSITION: f64 = 2.887e6;

#[allow(non_snake_case)]
impl ChemicalConstants {
    /// molar masses come from the property source, everything else is fixed
    pub fn from_source<S: PropertySource + ?Sized>(
        source: &S,
        kinetics: ArrheniusDecomposition,
        Q_reaction: f64,
    ) -> Result<Self, PropertyError> {
        Ok(Self {
            M_H2O2: source.molar_mass(Substance::HydrogenPeroxide)?,
            M_H2O: source.molar_mass(Substance::Water)?,
            M_O2: source.molar_mass(Substance::Oxygen)?,
            R: R_G,
            kinetics,
            Q_reaction,
        })
    }
}
