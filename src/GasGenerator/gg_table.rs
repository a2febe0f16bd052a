//! Gas-generator property table: per-pressure curves of mixture ratio, heat capacity ratio,
//! gas constant and specific heat against temperature.
//!
//! File layout (JSON), one entry per pressure level, label = number + unit:
//! ```json
//! {
//!   "5MPa":  { "T": [600.0, 700.0], "MR": [0.19, 0.21], "k": [1.118, 1.112], "R": [0.482, 0.481], "Cp": [3.52, 3.60] },
//!   "10MPa": { "T": [600.0, 700.0], "MR": [0.19, 0.21], "k": [1.119, 1.113], "R": [0.481, 0.480], "Cp": [3.55, 3.63] }
//! }
//! ```
//! `R` and `Cp` are stored in kJ/(kg·K). Accepted units: `MPa`, `kPa`, `bar`, `Pa`.
//!
//! The table is loaded once per process ([`init_gg_table`] or lazily by [`gg_table`])
//! and never mutated afterwards.
use super::interpolation::{InterpError, LinearInterpolator};
use log::{info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

pub const DEFAULT_GG_TABLE_PATH: &str = "data/gg_properties.json";

const PRESSURE_LABEL: &str = r"^\s*([0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)\s*(MPa|kPa|bar|Pa)\s*$";

#[derive(Error, Debug)]
#[allow(non_snake_case)]
pub enum GGError {
    #[error("invalid input: {parameter} = {value}")]
    InvalidInput { parameter: &'static str, value: f64 },
    #[error("pressure {pressure_MPa} MPa is outside the tabulated span {min_MPa}..{max_MPa} MPa")]
    OutOfRange {
        pressure_MPa: f64,
        min_MPa: f64,
        max_MPa: f64,
    },
    #[error("cannot read pressure label '{0}'")]
    BadPressureLabel(String),
    #[error("pressure level {0} MPa appears more than once")]
    DuplicateLevel(f64),
    #[error("malformed curve '{label}': {reason}")]
    MalformedCurve { label: String, reason: String },
    #[error("interpolation on curve '{label}' failed: {source}")]
    Interpolation { label: String, source: InterpError },
    #[error("property table has no pressure levels")]
    EmptyTable,
    #[error("property table is already initialised")]
    AlreadyInitialised,
    #[error("failed to read property table: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse property table: {0}")]
    Serde(#[from] serde_json::Error),
}

/// One pressure level as stored in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct GGCurve {
    /// K
    pub T: Vec<f64>,
    /// oxidizer to fuel mass ratio
    pub MR: Vec<f64>,
    /// Cp/Cv
    pub k: Vec<f64>,
    /// kJ/(kg·K)
    pub R: Vec<f64>,
    /// kJ/(kg·K)
    pub Cp: Vec<f64>,
}

impl GGCurve {
    fn validate(&self, label: &str) -> Result<(), GGError> {
        let malformed = |reason: String| GGError::MalformedCurve {
            label: label.to_string(),
            reason,
        };
        let n = self.T.len();
        if n < 2 {
            return Err(malformed(format!("{} temperature points, at least 2 needed", n)));
        }
        for (name, column) in [("MR", &self.MR), ("k", &self.k), ("R", &self.R), ("Cp", &self.Cp)] {
            if column.len() != n {
                return Err(malformed(format!(
                    "column {} has {} values, T has {}",
                    name,
                    column.len(),
                    n
                )));
            }
        }
        let all = [&self.T, &self.MR, &self.k, &self.R, &self.Cp];
        if all.iter().any(|c| c.iter().any(|v| !v.is_finite())) {
            return Err(malformed("non-finite value".to_string()));
        }
        Ok(())
    }

    fn is_sorted(&self) -> bool {
        self.T.windows(2).all(|w| w[0] < w[1])
    }

    /// rows reordered by increasing temperature
    fn sorted(&self) -> Self {
        let mut order: Vec<usize> = (0..self.T.len()).collect();
        order.sort_by(|&a, &b| self.T[a].total_cmp(&self.T[b]));
        let pick = |column: &Vec<f64>| order.iter().map(|&i| column[i]).collect::<Vec<f64>>();
        Self {
            T: pick(&self.T),
            MR: pick(&self.MR),
            k: pick(&self.k),
            R: pick(&self.R),
            Cp: pick(&self.Cp),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct PressureLevel {
    pub label: String,
    pub pressure_MPa: f64,
    pub curve: GGCurve,
}

impl PressureLevel {
    /// (min, max) tabulated temperature, K
    pub fn temperature_span(&self) -> (f64, f64) {
        let T = &self.curve.T;
        (T[0], T[T.len() - 1])
    }
}

/// Parses labels like `5MPa`, `50 bar`, `2500kPa`, `1e6Pa` into MPa.
#[allow(non_snake_case)]
pub fn parse_pressure_label(label: &str) -> Result<f64, GGError> {
    let re = Regex::new(PRESSURE_LABEL).map_err(|e| GGError::BadPressureLabel(e.to_string()))?;
    let caps = re
        .captures(label)
        .ok_or_else(|| GGError::BadPressureLabel(label.to_string()))?;
    let value: f64 = caps[1]
        .parse()
        .map_err(|_| GGError::BadPressureLabel(label.to_string()))?;
    // divide by exact factors so the level rounds the same way as a query `P / 1e6`
    let per_MPa = match &caps[2] {
        "MPa" => 1.0,
        "kPa" => 1e3,
        "bar" => 10.0,
        _ => 1e6,
    };
    let P = value / per_MPa;
    if P > 0.0 {
        Ok(P)
    } else {
        Err(GGError::BadPressureLabel(label.to_string()))
    }
}

/// Tabulated columns that are interpolated against temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GGColumn {
    MR,
    K,
    R,
    Cp,
}

/// Interpolators of one pressure level, built once when the table is loaded
#[allow(non_snake_case)]
pub(crate) struct LevelInterpolators {
    MR: LinearInterpolator,
    k: LinearInterpolator,
    R: LinearInterpolator,
    Cp: LinearInterpolator,
    /// T against MR; None when the mixture ratio repeats on the curve and cannot be inverted
    inverse: Option<LinearInterpolator>,
}

#[allow(non_snake_case)]
impl LevelInterpolators {
    fn build(level: &PressureLevel) -> Result<Self, GGError> {
        let curve = &level.curve;
        let against_T = |y: &[f64]| {
            LinearInterpolator::new(&curve.T, y).map_err(|source| GGError::Interpolation {
                label: level.label.clone(),
                source,
            })
        };
        let inverse = match LinearInterpolator::new(&curve.MR, &curve.T) {
            Ok(f) => Some(f),
            Err(e) => {
                warn!("mixture ratio of curve '{}' cannot be inverted: {}", level.label, e);
                None
            }
        };
        Ok(Self {
            MR: against_T(&curve.MR)?,
            k: against_T(&curve.k)?,
            R: against_T(&curve.R)?,
            Cp: against_T(&curve.Cp)?,
            inverse,
        })
    }

    pub(crate) fn along_T(&self, column: GGColumn, T: f64) -> Result<f64, InterpError> {
        match column {
            GGColumn::MR => self.MR.eval(T),
            GGColumn::K => self.k.eval(T),
            GGColumn::R => self.R.eval(T),
            GGColumn::Cp => self.Cp.eval(T),
        }
    }

    /// temperature at which the level reaches `MR`; repeats the inversion to report why
    /// it is not possible
    pub(crate) fn T_of_MR(&self, level: &PressureLevel, MR: f64) -> Result<f64, InterpError> {
        match &self.inverse {
            Some(f) => f.eval(MR),
            None => LinearInterpolator::new(&level.curve.MR, &level.curve.T)?.eval(MR),
        }
    }
}

/// Pressure levels ordered by increasing pressure
#[derive(Clone)]
pub struct GGPropertyTable {
    levels: Vec<PressureLevel>,
    interpolators: Arc<Vec<LevelInterpolators>>,
}

impl fmt::Debug for GGPropertyTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GGPropertyTable")
            .field("levels", &self.levels)
            .finish()
    }
}

/// interpolators are derived from the levels
impl PartialEq for GGPropertyTable {
    fn eq(&self, other: &Self) -> bool {
        self.levels == other.levels
    }
}

#[allow(non_snake_case)]
impl GGPropertyTable {
    pub fn from_curves(curves: HashMap<String, GGCurve>) -> Result<Self, GGError> {
        if curves.is_empty() {
            return Err(GGError::EmptyTable);
        }
        let mut levels = Vec::with_capacity(curves.len());
        for (label, curve) in curves {
            let pressure_MPa = parse_pressure_label(&label)?;
            curve.validate(&label)?;
            let curve = if curve.is_sorted() {
                curve
            } else {
                warn!("curve '{}' is not ordered by temperature, sorting it", label);
                curve.sorted()
            };
            if let Some(w) = curve.T.windows(2).find(|w| w[0] == w[1]) {
                return Err(GGError::MalformedCurve {
                    label,
                    reason: format!("temperature {} appears more than once", w[0]),
                });
            }
            levels.push(PressureLevel {
                label,
                pressure_MPa,
                curve,
            });
        }
        levels.sort_by(|a, b| a.pressure_MPa.total_cmp(&b.pressure_MPa));
        if let Some(w) = levels.windows(2).find(|w| w[0].pressure_MPa == w[1].pressure_MPa) {
            return Err(GGError::DuplicateLevel(w[0].pressure_MPa));
        }
        let interpolators = levels
            .iter()
            .map(LevelInterpolators::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            levels,
            interpolators: Arc::new(interpolators),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self, GGError> {
        let curves: HashMap<String, GGCurve> = serde_json::from_str(content)?;
        Self::from_curves(curves)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GGError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)?;
        let (min, max) = table.pressure_span_MPa();
        info!(
            "GG property table loaded from '{}': {} pressure levels, {}..{} MPa",
            path.display(),
            table.levels.len(),
            min,
            max
        );
        Ok(table)
    }

    pub fn levels(&self) -> &[PressureLevel] {
        &self.levels
    }

    pub(crate) fn level_with_interpolators(&self, i: usize) -> (&PressureLevel, &LevelInterpolators) {
        (&self.levels[i], &self.interpolators[i])
    }

    /// tabulated pressures in increasing order, MPa
    pub fn pressure_levels(&self) -> Vec<f64> {
        self.levels.iter().map(|l| l.pressure_MPa).collect()
    }

    pub fn pressure_span_MPa(&self) -> (f64, f64) {
        (
            self.levels[0].pressure_MPa,
            self.levels[self.levels.len() - 1].pressure_MPa,
        )
    }

    /// Indices of the levels bracketing `P_MPa`; an exact hit returns the same index twice.
    pub fn bracket(&self, P_MPa: f64) -> Result<(usize, usize), GGError> {
        let (min_MPa, max_MPa) = self.pressure_span_MPa();
        if !(P_MPa >= min_MPa && P_MPa <= max_MPa) {
            return Err(GGError::OutOfRange {
                pressure_MPa: P_MPa,
                min_MPa,
                max_MPa,
            });
        }
        let upper = self.levels.partition_point(|l| l.pressure_MPa < P_MPa);
        if self.levels[upper].pressure_MPa == P_MPa {
            Ok((upper, upper))
        } else {
            Ok((upper - 1, upper))
        }
    }
}

/// Where the process-wide table comes from
#[derive(Debug, Clone)]
pub enum GGTableSource {
    File(PathBuf),
    Json(String),
    Table(GGPropertyTable),
}

impl Default for GGTableSource {
    fn default() -> Self {
        GGTableSource::File(PathBuf::from(DEFAULT_GG_TABLE_PATH))
    }
}

impl GGTableSource {
    pub fn load(self) -> Result<GGPropertyTable, GGError> {
        match self {
            GGTableSource::File(path) => GGPropertyTable::from_file(path),
            GGTableSource::Json(content) => GGPropertyTable::from_json_str(&content),
            GGTableSource::Table(table) => Ok(table),
        }
    }
}

static GG_TABLE: OnceLock<GGPropertyTable> = OnceLock::new();

/// One-time initialisation of the process-wide table from an explicit source.
pub fn init_gg_table(source: GGTableSource) -> Result<&'static GGPropertyTable, GGError> {
    if GG_TABLE.get().is_some() {
        return Err(GGError::AlreadyInitialised);
    }
    let table = source.load()?;
    GG_TABLE.set(table).map_err(|_| GGError::AlreadyInitialised)?;
    gg_table()
}

/// Process-wide table, loaded from [`DEFAULT_GG_TABLE_PATH`] on first use.
pub fn gg_table() -> Result<&'static GGPropertyTable, GGError> {
    if let Some(table) = GG_TABLE.get() {
        return Ok(table);
    }
    let table = GGTableSource::default().load()?;
    Ok(GG_TABLE.get_or_init(|| table))
}
