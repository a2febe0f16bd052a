//! Two-stage lookup of gas-generator properties.
//!
//! Forward mode (T known): every property is interpolated along the temperature curve of
//! both bracketing pressure levels, then linearly across pressure.
//! Inverse mode (MR known): the mixture-ratio curve of both bracketing levels is inverted to
//! a temperature, the two temperatures are interpolated across pressure, and the remaining
//! properties are taken as in forward mode at that temperature.
use super::gg_table::{
    GGColumn, GGError, GGPropertyTable, LevelInterpolators, PressureLevel, gg_table,
};
use super::interpolation::{InterpError, lerp};
use prettytable::{Table, row};
use serde::Serialize;

/// Resolved state of the gas-generator products, SI units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[allow(non_snake_case)]
pub struct GGProperties {
    pub mixture_ratio: f64,
    /// K
    pub T: f64,
    /// Cp/Cv
    pub k: f64,
    /// J/(kg·K)
    pub R: f64,
    /// J/(kg·K)
    pub Cp: f64,
}

impl GGProperties {
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Property", "Value"]);
        table.add_row(row!["mixture ratio", format!("{:.4}", self.mixture_ratio)]);
        table.add_row(row!["T, K", format!("{:.2}", self.T)]);
        table.add_row(row!["k", format!("{:.4}", self.k)]);
        table.add_row(row!["R, J/(kg K)", format!("{:.2}", self.R)]);
        table.add_row(row!["Cp, J/(kg K)", format!("{:.1}", self.Cp)]);
        table
    }

    pub fn pretty_print(&self) {
        println!("\n=== GAS GENERATOR PRODUCTS ===");
        self.table().printstd();
    }
}

fn interpolation_error(level: &PressureLevel) -> impl FnOnce(InterpError) -> GGError {
    let label = level.label.clone();
    move |source| GGError::Interpolation { label, source }
}

pub struct GGPropertyResolver<'a> {
    table: &'a GGPropertyTable,
}

#[allow(non_snake_case)]
impl<'a> GGPropertyResolver<'a> {
    pub fn new(table: &'a GGPropertyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &GGPropertyTable {
        self.table
    }

    /// Exactly one of `T` (K) and `MR` must be given. `P` in Pa.
    pub fn resolve(&self, P: f64, T: Option<f64>, MR: Option<f64>) -> Result<GGProperties, GGError> {
        match (T, MR) {
            (Some(T), None) => self.forward(P, T),
            (None, Some(MR)) => self.inverse(P, MR),
            (Some(_), Some(MR)) => Err(GGError::InvalidInput {
                parameter: "MR (T is given as well)",
                value: MR,
            }),
            (None, None) => Err(GGError::InvalidInput {
                parameter: "T or MR (neither is given)",
                value: f64::NAN,
            }),
        }
    }

    /// Properties at pressure `P` (Pa) and temperature `T` (K).
    pub fn forward(&self, P: f64, T: f64) -> Result<GGProperties, GGError> {
        if !(T.is_finite() && T > 0.0) {
            return Err(GGError::InvalidInput {
                parameter: "T",
                value: T,
            });
        }
        let P_MPa = Self::pressure_MPa(P)?;
        let mixture_ratio = self.along_T(P_MPa, GGColumn::MR, T)?;
        self.assemble(P_MPa, T, mixture_ratio)
    }

    /// Properties at pressure `P` (Pa) and mixture ratio `MR`.
    pub fn inverse(&self, P: f64, MR: f64) -> Result<GGProperties, GGError> {
        if !MR.is_finite() {
            return Err(GGError::InvalidInput {
                parameter: "MR",
                value: MR,
            });
        }
        let P_MPa = Self::pressure_MPa(P)?;
        let T = self.across_P(P_MPa, |level, interpolators| interpolators.T_of_MR(level, MR))?;
        self.assemble(P_MPa, T, MR)
    }

    fn pressure_MPa(P: f64) -> Result<f64, GGError> {
        if P.is_finite() && P > 0.0 {
            Ok(P / 1e6)
        } else {
            Err(GGError::InvalidInput {
                parameter: "P",
                value: P,
            })
        }
    }

    /// evaluates `f` on both bracketing levels and interpolates linearly across pressure
    fn across_P<F>(&self, P_MPa: f64, f: F) -> Result<f64, GGError>
    where
        F: Fn(&PressureLevel, &LevelInterpolators) -> Result<f64, InterpError>,
    {
        let (lo, hi) = self.table.bracket(P_MPa)?;
        let at = |i: usize| {
            let (level, interpolators) = self.table.level_with_interpolators(i);
            f(level, interpolators)
                .map(|y| (level.pressure_MPa, y))
                .map_err(interpolation_error(level))
        };
        let (p_lo, y_lo) = at(lo)?;
        if lo == hi {
            return Ok(y_lo);
        }
        let (p_hi, y_hi) = at(hi)?;
        Ok(lerp(p_lo, y_lo, p_hi, y_hi, P_MPa))
    }

    fn along_T(&self, P_MPa: f64, column: GGColumn, T: f64) -> Result<f64, GGError> {
        self.across_P(P_MPa, |_, interpolators| interpolators.along_T(column, T))
    }

    /// k, R, Cp at the resolved temperature; R and Cp converted from kJ to J
    fn assemble(&self, P_MPa: f64, T: f64, mixture_ratio: f64) -> Result<GGProperties, GGError> {
        let k = self.along_T(P_MPa, GGColumn::K, T)?;
        let R = self.along_T(P_MPa, GGColumn::R, T)?;
        let Cp = self.along_T(P_MPa, GGColumn::Cp, T)?;
        Ok(GGProperties {
            mixture_ratio,
            T,
            k,
            R: R * 1000.0,
            Cp: Cp * 1000.0,
        })
    }
}

/// Resolves against the process-wide table (see [`gg_table`]).
#[allow(non_snake_case)]
pub fn resolve_gg_properties(P: f64, T: Option<f64>, MR: Option<f64>) -> Result<GGProperties, GGError> {
    GGPropertyResolver::new(gg_table()?).resolve(P, T, MR)
}
