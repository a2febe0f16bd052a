//! Property source with constant values.
//!
//! Deterministic and cheap; used by tests and for quick hand estimates. An optional
//! pressure window makes pressure-dependent queries fail outside it, which lets tests
//! exercise error propagation through the reactor march.
use super::property_api::{
    PropertyError, PropertySource, R_G, Substance, check_range, molar_mass_of,
};

#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct FixedData {
    /// J/(kg·K)
    pub H2O2_Cp: f64,
    /// J/(kg·K)
    pub water_Cp: f64,
    /// J/(kg·K)
    pub steam_Cp: f64,
    /// J/(kg·K)
    pub O2_Cp: f64,
    /// K
    pub T_sat: f64,
    /// J/kg
    pub latent_heat: f64,
    /// pressure window for saturation temperature and latent heat, Pa
    pub P_range: (f64, f64),
}

impl Default for FixedData {
    /// rough values for water near 5 MPa
    fn default() -> Self {
        Self {
            H2O2_Cp: 2619.0,
            water_Cp: 4500.0,
            steam_Cp: 3500.0,
            O2_Cp: 1000.0,
            T_sat: 537.0,
            latent_heat: 1.64e6,
            P_range: (0.0, f64::INFINITY),
        }
    }
}

#[allow(non_snake_case)]
impl FixedData {
    pub fn new(T_sat: f64, latent_heat: f64) -> Self {
        Self {
            T_sat,
            latent_heat,
            ..Self::default()
        }
    }
    pub fn with_P_range(mut self, P_min: f64, P_max: f64) -> Self {
        self.P_range = (P_min, P_max);
        self
    }
}

#[allow(non_snake_case)]
impl PropertySource for FixedData {
    fn heat_capacity(&self, substance: Substance, _T: f64, _P: f64) -> Result<f64, PropertyError> {
        Ok(match substance {
            Substance::HydrogenPeroxide => self.H2O2_Cp,
            Substance::Water => self.water_Cp,
            Substance::Steam => self.steam_Cp,
            Substance::Oxygen => self.O2_Cp,
        })
    }

    fn saturation_temperature(&self, P: f64) -> Result<f64, PropertyError> {
        check_range("saturation temperature", "P, Pa", P, self.P_range.0, self.P_range.1)?;
        Ok(self.T_sat)
    }

    fn latent_heat(&self, P: f64) -> Result<f64, PropertyError> {
        check_range("latent heat", "P, Pa", P, self.P_range.0, self.P_range.1)?;
        Ok(self.latent_heat)
    }

    fn molar_mass(&self, substance: Substance) -> Result<f64, PropertyError> {
        Ok(molar_mass_of(substance))
    }

    fn gas_constant(&self, substance: Substance) -> Result<f64, PropertyError> {
        Ok(R_G / molar_mass_of(substance))
    }
}
