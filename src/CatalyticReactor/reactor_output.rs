//! Results of the reactor march: outlet scalars, axial profiles and quality figures.
use nalgebra::DMatrix;
use prettytable::{Table, row};
use serde::Serialize;

/// Append-only axial profiles, one entry per segment from inlet to outlet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[allow(non_snake_case)]
pub struct ProfileRecord {
    /// K
    pub T: Vec<f64>,
    /// MPa
    pub P_MPa: Vec<f64>,
    /// 1 - remaining H2O2 / inlet H2O2
    pub decomposition: Vec<f64>,
}

#[allow(non_snake_case)]
impl ProfileRecord {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            T: Vec::with_capacity(n),
            P_MPa: Vec::with_capacity(n),
            decomposition: Vec::with_capacity(n),
        }
    }
    pub fn push(&mut self, T: f64, P_MPa: f64, decomposition: f64) {
        self.T.push(T);
        self.P_MPa.push(P_MPa);
        self.decomposition.push(decomposition);
    }
    pub fn len(&self) -> usize {
        self.T.len()
    }
    pub fn is_empty(&self) -> bool {
        self.T.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SolutionQuality {
    /// largest change of total mass over one segment, kg/s
    pub mass_residual_max: f64,
    /// heat released with no gas phase to absorb it, summed over segments, W
    pub discarded_heat: f64,
    /// first segment where the peroxide was used up
    pub depletion_segment: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[allow(non_snake_case)]
pub struct ReactorSolution {
    /// K
    pub T_out: f64,
    /// Pa
    pub P_out: f64,
    /// remaining H2O2 / inlet H2O2
    pub remaining_H2O2_fraction: f64,
    /// kg/s
    pub m_H2O_liquid: f64,
    /// kg/s
    pub m_H2O_vapour: f64,
    /// kg/s
    pub m_O2: f64,
    /// heat capacity of the outlet gas phase, J/(kg·K)
    pub Cp_gas_out: f64,
    /// gas constant of the outlet gas phase, J/(kg·K)
    pub R_gas_out: f64,
    pub profile: ProfileRecord,
    pub quality: SolutionQuality,
}

impl ReactorSolution {
    /// profiles as a (segments x 3) matrix with columns T [K], P [MPa], decomposition
    pub fn profiles_matrix(&self) -> DMatrix<f64> {
        let n = self.profile.len();
        DMatrix::from_fn(n, 3, |i, j| match j {
            0 => self.profile.T[i],
            1 => self.profile.P_MPa[i],
            _ => self.profile.decomposition[i],
        })
    }

    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        table.add_row(row!["T_out, K", format!("{:.2}", self.T_out)]);
        table.add_row(row!["P_out, MPa", format!("{:.4}", self.P_out / 1e6)]);
        table.add_row(row![
            "remaining H2O2",
            format!("{:.4e}", self.remaining_H2O2_fraction)
        ]);
        table.add_row(row!["H2O liquid, kg/s", format!("{:.4}", self.m_H2O_liquid)]);
        table.add_row(row!["H2O vapour, kg/s", format!("{:.4}", self.m_H2O_vapour)]);
        table.add_row(row!["O2, kg/s", format!("{:.4}", self.m_O2)]);
        table.add_row(row!["Cp gas, J/(kg K)", format!("{:.1}", self.Cp_gas_out)]);
        table.add_row(row!["R gas, J/(kg K)", format!("{:.2}", self.R_gas_out)]);
        table.add_row(row![
            "max mass residual",
            format!("{:.2e}", self.quality.mass_residual_max)
        ]);
        if let Some(i) = self.quality.depletion_segment {
            table.add_row(row!["H2O2 used up in segment", i]);
        }
        table
    }

    /// every `stride`-th segment plus the outlet
    pub fn profile_table(&self, stride: usize) -> Table {
        let mut table = Table::new();
        table.add_row(row!["segment", "T, K", "P, MPa", "decomposition"]);
        let n = self.profile.len();
        let stride = stride.max(1);
        for i in (0..n).filter(|i| i % stride == 0 || *i + 1 == n) {
            table.add_row(row![
                i,
                format!("{:.2}", self.profile.T[i]),
                format!("{:.4}", self.profile.P_MPa[i]),
                format!("{:.4}", self.profile.decomposition[i])
            ]);
        }
        table
    }

    pub fn pretty_print(&self) {
        println!("\n=== REACTOR OUTLET ===");
        self.summary_table().printstd();
        println!("\n=== AXIAL PROFILES ===");
        self.profile_table(10).printstd();
    }
}
