//! Production property source.
//!
//! - water and steam: IAPWS-IF97 through the `seuif97` crate (MPa, °C, kJ based units,
//!   converted to SI here); saturation temperature from the region 4 backward equation
//! - oxygen: NASA 7-coefficient polynomial (ideal gas)
//! - liquid hydrogen peroxide: constant heat capacity
use super::property_api::{
    PropertyError, PropertySource, R_G, Substance, check_range, checked_property, molar_mass_of,
};
use seuif97::{OCP, OH, pt, px};

const P4_MIN: f64 = 611.213; // Pa, triple point
const P4_MAX: f64 = 22.064e6; // Pa, critical point
const T_REGION1_MAX: f64 = 623.15;
const T_REGION2_MAX: f64 = 1073.15;
const T_REGION5_MAX: f64 = 2273.15;
const T_IF97_MIN: f64 = 273.15;
const K_TO_C: f64 = 273.15;

// IF97 region 4, coefficients n1..n10
const N4: [f64; 10] = [
    0.116_705_214_527_67e4,
    -0.724_213_167_032_06e6,
    -0.170_738_469_400_92e2,
    0.120_208_247_024_70e5,
    -0.323_255_503_223_33e7,
    0.149_151_086_135_30e2,
    -0.482_326_573_615_91e4,
    0.405_113_405_420_57e6,
    -0.238_555_575_678_49,
    0.650_175_348_447_98e3,
];

// O2, GRI-Mech 3.0: a1..a5 for 200-1000 K and 1000-3500 K, Cp/R
const O2_NASA_LOW: [f64; 5] = [
    3.782_456_36,
    -2.996_734_16e-3,
    9.847_302_01e-6,
    -9.681_295_09e-9,
    3.243_728_37e-12,
];
const O2_NASA_HIGH: [f64; 5] = [
    3.282_537_84,
    1.483_087_54e-3,
    -7.579_666_69e-7,
    2.094_705_55e-10,
    -2.167_177_94e-14,
];
const O2_T_RANGE: (f64, f64, f64) = (200.0, 1000.0, 3500.0);

/// Saturation temperature of water, K. Closed-form IF97 backward equation, P in Pa.
#[allow(non_snake_case)]
pub fn saturation_temperature_IF97(P: f64) -> Result<f64, PropertyError> {
    check_range("saturation temperature", "P, Pa", P, P4_MIN, P4_MAX)?;
    let beta = (P / 1e6).powf(0.25);
    let E = beta.powi(2) + N4[2] * beta + N4[5];
    let F = N4[0] * beta.powi(2) + N4[3] * beta + N4[6];
    let G = N4[1] * beta.powi(2) + N4[4] * beta + N4[7];
    let D = 2.0 * G / (-F - (F.powi(2) - 4.0 * E * G).sqrt());
    let T = (N4[9] + D - ((N4[9] + D).powi(2) - 4.0 * (N4[8] + N4[9] * D)).sqrt()) / 2.0;
    checked_property("saturation temperature", Substance::Water, T, P, T)
}

/// NASA-7 heat capacity of oxygen, J/(kg·K)
#[allow(non_snake_case)]
pub fn oxygen_Cp(T: f64) -> Result<f64, PropertyError> {
    let (t_min, t_mid, t_max) = O2_T_RANGE;
    check_range("heat capacity of O2", "T, K", T, t_min, t_max)?;
    let a = if T <= t_mid { &O2_NASA_LOW } else { &O2_NASA_HIGH };
    let cp_molar = R_G * (a[0] + a[1] * T + a[2] * T.powi(2) + a[3] * T.powi(3) + a[4] * T.powi(4));
    Ok(cp_molar / molar_mass_of(Substance::Oxygen))
}

#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct IF97data {
    /// heat capacity of liquid hydrogen peroxide, J/(kg·K)
    pub H2O2_Cp: f64,
    /// temperature window where the constant peroxide heat capacity is accepted, K
    pub H2O2_T_range: (f64, f64),
}

impl IF97data {
    pub fn new() -> Self {
        Self {
            H2O2_Cp: 2619.0,
            H2O2_T_range: (250.0, 600.0),
        }
    }

    #[allow(non_snake_case)]
    fn water_Cp(&self, T: f64, P: f64) -> Result<f64, PropertyError> {
        check_range("heat capacity of H2O(l)", "T, K", T, T_IF97_MIN, T_REGION1_MAX)?;
        let cp = pt(P / 1e6, T - K_TO_C, (OCP, 1)) * 1000.0;
        checked_property("heat capacity", Substance::Water, T, P, cp)
    }

    #[allow(non_snake_case)]
    fn steam_Cp(&self, T: f64, P: f64) -> Result<f64, PropertyError> {
        check_range("heat capacity of H2O(g)", "T, K", T, T_IF97_MIN, T_REGION5_MAX)?;
        let p_mpa = P / 1e6;
        // region 2 is forced so that states sitting exactly on the saturation line
        // are evaluated as vapour
        let cp_kj = if T <= T_REGION2_MAX {
            pt(p_mpa, T - K_TO_C, (OCP, 2))
        } else {
            pt(p_mpa, T - K_TO_C, OCP)
        };
        checked_property("heat capacity", Substance::Steam, T, P, cp_kj * 1000.0)
    }
}

impl Default for IF97data {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(non_snake_case)]
impl PropertySource for IF97data {
    fn heat_capacity(&self, substance: Substance, T: f64, P: f64) -> Result<f64, PropertyError> {
        match substance {
            Substance::HydrogenPeroxide => {
                let (t_min, t_max) = self.H2O2_T_range;
                check_range("heat capacity of H2O2", "T, K", T, t_min, t_max)?;
                Ok(self.H2O2_Cp)
            }
            Substance::Water => self.water_Cp(T, P),
            Substance::Steam => self.steam_Cp(T, P),
            Substance::Oxygen => oxygen_Cp(T),
        }
    }

    fn saturation_temperature(&self, P: f64) -> Result<f64, PropertyError> {
        saturation_temperature_IF97(P)
    }

    fn latent_heat(&self, P: f64) -> Result<f64, PropertyError> {
        check_range("latent heat", "P, Pa", P, P4_MIN, P4_MAX)?;
        let p_mpa = P / 1e6;
        let h_vapour = px(p_mpa, 1.0, OH);
        let h_liquid = px(p_mpa, 0.0, OH);
        let T_sat = saturation_temperature_IF97(P)?;
        checked_property(
            "latent heat",
            Substance::Water,
            T_sat,
            P,
            (h_vapour - h_liquid) * 1000.0,
        )
    }

    fn molar_mass(&self, substance: Substance) -> Result<f64, PropertyError> {
        Ok(molar_mass_of(substance))
    }

    fn gas_constant(&self, substance: Substance) -> Result<f64, PropertyError> {
        match substance {
            Substance::Steam | Substance::Oxygen => Ok(R_G / molar_mass_of(substance)),
            _ => Err(PropertyError::Unsupported {
                query: "gas constant",
                substance,
            }),
        }
    }
}
