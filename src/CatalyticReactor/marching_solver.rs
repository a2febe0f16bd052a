//! # Axial marching integrator
//!
//! A single control volume (really a set of mass flow rates, kg/s) is marched from the
//! inlet to the outlet of the catalyst bed in `segments` equal steps. On every step:
//!
//! 1. liquid and gas volumes, superficial velocity
//! 2. decomposition rate, converted mass capped by the peroxide still present
//! 3. mass update with the stoichiometric split
//! 4. heat released by the reaction
//! 5. sensible heating of the whole inventory up to the saturation temperature
//! 6. vaporization of liquid water with the heat that is left, whenever T is at or above
//!    saturation (including product water released into an already superheated stream)
//! 7. superheating of the gas phase (vapour + oxygen); leftover heat is not carried over
//! 8. Ergun pressure drop with blended two-phase viscosity and density
//! 9. (T, P, decomposition degree) appended to the profile
//!
//! The march always runs the configured number of segments. Once the peroxide is gone the
//! kinetics step is skipped explicitly.
//!
//! Any failed property query aborts the march with [`ReactorError::PropertyQuery`],
//! naming the query and the segment.
use super::reactor_geometry::{ErgunBed, ReactorGeometry, positive};
use super::reactor_output::{ProfileRecord, ReactorSolution, SolutionQuality};
use crate::Kinetics::decomposition::{
    ArrheniusDecomposition, ChemicalConstants, KineticsError, Q_DECOMPOSITION, split_products,
};
use crate::Thermodynamics::property_api::{PropertyError, PropertySource, Substance};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SEGMENTS: usize = 100;

#[derive(Debug, Error)]
pub enum ReactorError {
    #[error("invalid input: {parameter} = {value}")]
    InvalidInput { parameter: &'static str, value: f64 },
    #[error("{query} query failed {}: {source}", segment_label(.segment))]
    PropertyQuery {
        query: &'static str,
        /// None for queries made outside the march
        segment: Option<usize>,
        source: PropertyError,
    },
    #[error("pressure dropped to zero before segment {segment}")]
    PressureDepleted { segment: usize },
    #[error("task file error: {0}")]
    TaskFile(String),
    #[error("failed to read task file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse task: {0}")]
    Serde(#[from] serde_json::Error),
}

fn segment_label(segment: &Option<usize>) -> String {
    match segment {
        Some(i) => format!("in segment {}", i),
        None => "outside the march".to_string(),
    }
}

impl From<KineticsError> for ReactorError {
    fn from(err: KineticsError) -> Self {
        match err {
            KineticsError::InvalidInput { parameter, value } => {
                ReactorError::InvalidInput { parameter, value }
            }
        }
    }
}

impl ReactorError {
    /// wraps a property failure, for use with `map_err`
    pub fn query(
        query: &'static str,
        segment: Option<usize>,
    ) -> impl FnOnce(PropertyError) -> ReactorError {
        move |source| ReactorError::PropertyQuery {
            query,
            segment,
            source,
        }
    }
}

/// Model constants of the march
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchConfig {
    pub segments: usize,
    /// how close to T_sat the mixture counts as saturated, K
    pub saturation_tolerance: f64,
    /// kg/m³
    pub liquid_density: f64,
    /// Pa·s
    pub liquid_viscosity: f64,
    /// Pa·s
    pub gas_viscosity: f64,
    /// used when the total volume is zero, kg/m³
    pub fallback_density: f64,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            saturation_tolerance: 1e-6,
            liquid_density: 1300.0,
            liquid_viscosity: 1e-3,
            gas_viscosity: 2e-5,
            fallback_density: 1000.0,
        }
    }
}

impl MarchConfig {
    pub fn validate(&self) -> Result<(), ReactorError> {
        if self.segments == 0 {
            return Err(ReactorError::InvalidInput {
                parameter: "segments",
                value: 0.0,
            });
        }
        positive("liquid_density", self.liquid_density)?;
        positive("liquid_viscosity", self.liquid_viscosity)?;
        positive("gas_viscosity", self.gas_viscosity)?;
        positive("fallback_density", self.fallback_density)?;
        if !(self.saturation_tolerance >= 0.0) {
            return Err(ReactorError::InvalidInput {
                parameter: "saturation_tolerance",
                value: self.saturation_tolerance,
            });
        }
        Ok(())
    }
}

/// Inlet boundary conditions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct ReactorInlet {
    /// kg/s
    pub mass_flow: f64,
    /// mass fraction of H2O2 in the feed, the rest is water
    pub peroxide_fraction: f64,
    /// K
    pub T_in: f64,
    /// Pa
    pub P_in: f64,
}

#[allow(non_snake_case)]
impl ReactorInlet {
    pub fn new(
        mass_flow: f64,
        peroxide_fraction: f64,
        T_in: f64,
        P_in: f64,
    ) -> Result<Self, ReactorError> {
        let inlet = Self {
            mass_flow,
            peroxide_fraction,
            T_in,
            P_in,
        };
        inlet.validate()?;
        Ok(inlet)
    }

    pub fn validate(&self) -> Result<(), ReactorError> {
        positive("mass_flow", self.mass_flow)?;
        positive("T_in", self.T_in)?;
        positive("P_in", self.P_in)?;
        if !(self.peroxide_fraction > 0.0 && self.peroxide_fraction <= 1.0) {
            return Err(ReactorError::InvalidInput {
                parameter: "peroxide_fraction",
                value: self.peroxide_fraction,
            });
        }
        Ok(())
    }
}

/// Mass flows of the four species and the thermodynamic state of the mixture
#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct ControlVolumeState {
    pub m_H2O2: f64,
    pub m_H2O_liquid: f64,
    pub m_H2O_vapour: f64,
    pub m_O2: f64,
    /// K
    pub T: f64,
    /// Pa
    pub P: f64,
}

#[allow(non_snake_case)]
impl ControlVolumeState {
    pub fn from_inlet(inlet: &ReactorInlet) -> Self {
        let m_H2O2 = inlet.mass_flow * inlet.peroxide_fraction;
        Self {
            m_H2O2,
            m_H2O_liquid: inlet.mass_flow - m_H2O2,
            m_H2O_vapour: 0.0,
            m_O2: 0.0,
            T: inlet.T_in,
            P: inlet.P_in,
        }
    }
    pub fn total_mass(&self) -> f64 {
        self.m_H2O2 + self.m_H2O_liquid + self.m_H2O_vapour + self.m_O2
    }
    pub fn liquid_mass(&self) -> f64 {
        self.m_H2O2 + self.m_H2O_liquid
    }
    pub fn gas_mass(&self) -> f64 {
        self.m_H2O_vapour + self.m_O2
    }
}

/// What happened inside one segment
#[derive(Debug, Clone, Default)]
#[allow(non_snake_case)]
pub struct SegmentReport {
    /// kg/s of H2O2 decomposed
    pub converted: f64,
    /// kg/s of water vaporized
    pub evaporated: f64,
    /// heat left after step 7 with nothing to absorb it, W
    pub discarded_heat: f64,
    /// |total mass after - total mass before|, kg/s
    pub mass_residual: f64,
    /// superficial velocity, m/s
    pub velocity: f64,
    /// Pa/m
    pub dPdx: f64,
}

pub struct AxialMarchingIntegrator<'a, S: PropertySource + ?Sized> {
    pub geometry: ReactorGeometry,
    pub constants: ChemicalConstants,
    pub config: MarchConfig,
    bed: ErgunBed,
    source: &'a S,
}

#[allow(non_snake_case)]
impl<'a, S: PropertySource + ?Sized> AxialMarchingIntegrator<'a, S> {
    /// integrator with default decomposition kinetics and reaction heat
    pub fn new(geometry: ReactorGeometry, source: &'a S) -> Result<Self, ReactorError> {
        Self::with_kinetics(
            geometry,
            source,
            ArrheniusDecomposition::default(),
            Q_DECOMPOSITION,
        )
    }

    pub fn with_kinetics(
        geometry: ReactorGeometry,
        source: &'a S,
        kinetics: ArrheniusDecomposition,
        Q_reaction: f64,
    ) -> Result<Self, ReactorError> {
        positive("A", kinetics.A)?;
        positive("Q_reaction", Q_reaction)?;
        let constants = ChemicalConstants::from_source(source, kinetics, Q_reaction)
            .map_err(ReactorError::query("molar mass", None))?;
        Ok(Self {
            bed: ErgunBed::from_geometry(&geometry),
            geometry,
            constants,
            config: MarchConfig::default(),
            source,
        })
    }

    pub fn with_config(mut self, config: MarchConfig) -> Result<Self, ReactorError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Marches from inlet to outlet. Stateless between calls.
    pub fn march(&self, inlet: &ReactorInlet) -> Result<ReactorSolution, ReactorError> {
        inlet.validate()?;
        let segments = self.config.segments;
        let dx = self.geometry.step(segments);
        let mut state = ControlVolumeState::from_inlet(inlet);
        let m_H2O2_0 = state.m_H2O2;
        let mut profile = ProfileRecord::with_capacity(segments);
        let mut quality = SolutionQuality::default();
        info!(
            "march started: {} segments, dx = {:.3e} m, m = {} kg/s, w(H2O2) = {}, T = {} K, P = {} Pa",
            segments, dx, inlet.mass_flow, inlet.peroxide_fraction, inlet.T_in, inlet.P_in
        );
        for i in 0..segments {
            let report = self.step(&mut state, dx, i)?;
            let decomposition = 1.0 - state.m_H2O2 / m_H2O2_0;
            profile.push(state.T, state.P / 1e6, decomposition);
            debug!(
                "segment {}: T = {:.2} K, P = {:.0} Pa, X = {:.4}, u = {:.3} m/s",
                i, state.T, state.P, decomposition, report.velocity
            );
            quality.mass_residual_max = quality.mass_residual_max.max(report.mass_residual);
            quality.discarded_heat += report.discarded_heat;
            if state.m_H2O2 == 0.0 && quality.depletion_segment.is_none() {
                quality.depletion_segment = Some(i);
                if i + 1 < segments {
                    warn!(
                        "peroxide fully decomposed in segment {} of {}, remaining segments carry no reaction",
                        i, segments
                    );
                }
            }
        }
        let (Cp_gas_out, R_gas_out) = self.gas_mixture_properties(&state, None)?;
        info!(
            "march finished: T_out = {:.2} K, P_out = {:.0} Pa, remaining H2O2 = {:.4}",
            state.T,
            state.P,
            state.m_H2O2 / m_H2O2_0
        );
        Ok(ReactorSolution {
            T_out: state.T,
            P_out: state.P,
            remaining_H2O2_fraction: state.m_H2O2 / m_H2O2_0,
            m_H2O_liquid: state.m_H2O_liquid,
            m_H2O_vapour: state.m_H2O_vapour,
            m_O2: state.m_O2,
            Cp_gas_out,
            R_gas_out,
            profile,
            quality,
        })
    }

    /// Advances the control volume by one segment of length `dx`.
    pub fn step(
        &self,
        state: &mut ControlVolumeState,
        dx: f64,
        segment: usize,
    ) -> Result<SegmentReport, ReactorError> {
        let c = &self.constants;
        let cfg = &self.config;
        let mass_before = state.total_mass();

        // 1. volumes and superficial velocity
        let V_liquid = state.liquid_mass() / cfg.liquid_density;
        let n_gas = state.m_O2 / c.M_O2 + state.m_H2O_vapour / c.M_H2O;
        let V_gas = if n_gas > 0.0 {
            if state.P <= 0.0 {
                return Err(ReactorError::PressureDepleted { segment });
            }
            n_gas * c.R * state.T / state.P
        } else {
            0.0
        };
        let V_total = V_liquid + V_gas;
        let u = V_total / self.geometry.area;

        // 2. kinetics
        let converted = if state.m_H2O2 > 0.0 {
            let concentration = if V_liquid > 0.0 {
                state.m_H2O2 / c.M_H2O2 / V_liquid
            } else {
                0.0
            };
            let mass_rate = c.kinetics.rate(state.T, concentration)? * c.M_H2O2;
            let capacity = mass_rate * self.geometry.area * self.geometry.porosity * dx;
            capacity.min(state.m_H2O2)
        } else {
            0.0
        };

        // 3. mass update
        let (dm_O2, dm_H2O) = split_products(converted);
        state.m_H2O2 -= converted;
        state.m_O2 += dm_O2;
        state.m_H2O_liquid += dm_H2O;

        // 4. heat release
        let mut Q = converted * c.Q_reaction;

        // 5. sensible heating up to saturation
        let T_sat = self
            .source
            .saturation_temperature(state.P)
            .map_err(ReactorError::query("saturation temperature", Some(segment)))?;
        if state.T < T_sat {
            let Cp_liquid = self.liquid_Cp(state, segment)?;
            let heat_capacity = state.total_mass() * Cp_liquid;
            let Q_to_saturation = heat_capacity * (T_sat - state.T);
            if Q > Q_to_saturation {
                Q -= Q_to_saturation;
                state.T = T_sat;
            } else {
                state.T += Q / heat_capacity;
                Q = 0.0;
            }
        }

        // 6. vaporization at or above saturation, not only within the tolerance of T_sat:
        // pressure drop lowers T_sat so a saturated mixture from the previous segment sits
        // above the new T_sat, and product water released into a superheated stream is
        // boiled off here before any superheat
        let mut evaporated = 0.0;
        if state.T >= T_sat - cfg.saturation_tolerance && Q > 0.0 && state.m_H2O_liquid > 0.0 {
            let L = self
                .source
                .latent_heat(state.P)
                .map_err(ReactorError::query("latent heat", Some(segment)))?;
            if Q / L < state.m_H2O_liquid {
                evaporated = Q / L;
                state.m_H2O_liquid -= evaporated;
                Q = 0.0;
            } else {
                evaporated = state.m_H2O_liquid;
                state.m_H2O_liquid = 0.0;
                Q -= evaporated * L;
            }
            state.m_H2O_vapour += evaporated;
        }

        // 7. superheat of the gas phase
        let mut discarded_heat = 0.0;
        if Q > 0.0 {
            let m_gas = state.gas_mass();
            let (Cp_mix, _) = self.gas_mixture_properties(state, Some(segment))?;
            if m_gas > 0.0 && Cp_mix > 0.0 {
                state.T += Q / (m_gas * Cp_mix);
            } else {
                discarded_heat = Q;
            }
        }

        // 8. pressure drop
        let gas_fraction = if V_total > 0.0 { V_gas / V_total } else { 0.0 };
        let mu = cfg.liquid_viscosity + (cfg.gas_viscosity - cfg.liquid_viscosity) * gas_fraction;
        let rho = if V_total > 0.0 {
            state.total_mass() / V_total
        } else {
            cfg.fallback_density
        };
        let dPdx = self.bed.pressure_gradient(u, mu, rho);
        state.P = (state.P - dPdx * dx).max(0.0);

        Ok(SegmentReport {
            converted,
            evaporated,
            discarded_heat,
            mass_residual: (state.total_mass() - mass_before).abs(),
            velocity: u,
            dPdx,
        })
    }

    /// mass-weighted heat capacity of the liquid (H2O2 + water)
    fn liquid_Cp(&self, state: &ControlVolumeState, segment: usize) -> Result<f64, ReactorError> {
        let water = self
            .source
            .heat_capacity(Substance::Water, state.T, state.P)
            .map_err(ReactorError::query("heat capacity of liquid water", Some(segment)))?;
        let m_liquid = state.liquid_mass();
        if state.m_H2O2 <= 0.0 || m_liquid <= 0.0 {
            return Ok(water);
        }
        let peroxide = self
            .source
            .heat_capacity(Substance::HydrogenPeroxide, state.T, state.P)
            .map_err(ReactorError::query("heat capacity of H2O2", Some(segment)))?;
        Ok((state.m_H2O2 * peroxide + state.m_H2O_liquid * water) / m_liquid)
    }

    /// Mass-weighted Cp and gas constant of vapour + oxygen; (0, 0) without gas.
    /// Only species that are present are queried.
    fn gas_mixture_properties(
        &self,
        state: &ControlVolumeState,
        segment: Option<usize>,
    ) -> Result<(f64, f64), ReactorError> {
        let m_gas = state.gas_mass();
        if m_gas <= 0.0 {
            return Ok((0.0, 0.0));
        }
        let mut Cp = 0.0;
        let mut R = 0.0;
        for (substance, m) in [
            (Substance::Steam, state.m_H2O_vapour),
            (Substance::Oxygen, state.m_O2),
        ] {
            if m > 0.0 {
                Cp += m * self
                    .source
                    .heat_capacity(substance, state.T, state.P)
                    .map_err(ReactorError::query("gas heat capacity", segment))?;
                R += m * self
                    .source
                    .gas_constant(substance)
                    .map_err(ReactorError::query("gas constant", segment))?;
            }
        }
        Ok((Cp / m_gas, R / m_gas))
    }
}

/// One-call entry point: geometry, inlet and a property source in, solution out.
#[allow(non_snake_case, clippy::too_many_arguments)]
pub fn simulate_reactor<S: PropertySource + ?Sized>(
    diameter: f64,
    length: f64,
    cell_size: f64,
    porosity: f64,
    mass_flow: f64,
    peroxide_fraction: f64,
    T_in: f64,
    P_in: f64,
    source: &S,
) -> Result<ReactorSolution, ReactorError> {
    let geometry = ReactorGeometry::new(diameter, length, cell_size, porosity)?;
    let inlet = ReactorInlet::new(mass_flow, peroxide_fraction, T_in, P_in)?;
    AxialMarchingIntegrator::new(geometry, source)?.march(&inlet)
}
