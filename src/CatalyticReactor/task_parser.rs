//! Reactor task in JSON form.
//!
//! ```json
//! {
//!   "problem_name": "HTP 90% gas generator bed",
//!   "geometry": { "diameter": 0.17, "length": 0.15, "cell_size": 0.001, "porosity": 0.7 },
//!   "inlet": { "mass_flow": 5.8, "peroxide_fraction": 0.9, "T_in": 293.15, "P_in": 5.0e6 },
//!   "march": { "segments": 100 },
//!   "kinetics": { "A": 1.0e9, "Ea": 49000.0 },
//!   "Q_reaction": 2.887e6
//! }
//! ```
//! `march`, `kinetics` and `Q_reaction` are optional.
use super::marching_solver::{AxialMarchingIntegrator, MarchConfig, ReactorError, ReactorInlet};
use super::reactor_geometry::{GeometryInput, ReactorGeometry};
use super::reactor_output::ReactorSolution;
use crate::Kinetics::decomposition::{ArrheniusDecomposition, Q_DECOMPOSITION};
use crate::Thermodynamics::property_api::PropertySource;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[allow(non_snake_case)]
fn default_Q_reaction() -> f64 {
    Q_DECOMPOSITION
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct ReactorTask {
    #[serde(default)]
    pub problem_name: Option<String>,
    pub geometry: GeometryInput,
    pub inlet: ReactorInlet,
    #[serde(default)]
    pub march: MarchConfig,
    #[serde(default)]
    pub kinetics: ArrheniusDecomposition,
    #[serde(default = "default_Q_reaction")]
    pub Q_reaction: f64,
}

impl ReactorTask {
    pub fn parse(content: &str) -> Result<Self, ReactorError> {
        let task: ReactorTask = serde_json::from_str(content)?;
        task.validate()?;
        Ok(task)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReactorError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ReactorError::TaskFile(format!(
                "File '{}' does not exist",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let task = Self::parse(&content)?;
        info!(
            "reactor task '{}' loaded from '{}'",
            task.problem_name.as_deref().unwrap_or("unnamed"),
            path.display()
        );
        Ok(task)
    }

    pub fn validate(&self) -> Result<(), ReactorError> {
        self.reactor_geometry()?;
        self.inlet.validate()?;
        self.march.validate()
    }

    pub fn reactor_geometry(&self) -> Result<ReactorGeometry, ReactorError> {
        ReactorGeometry::try_from(self.geometry)
    }

    pub fn solve<S: PropertySource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<ReactorSolution, ReactorError> {
        AxialMarchingIntegrator::with_kinetics(
            self.reactor_geometry()?,
            source,
            self.kinetics,
            self.Q_reaction,
        )?
        .with_config(self.march.clone())?
        .march(&self.inlet)
    }
}
