#[cfg(test)]
#[allow(non_snake_case)]
mod tests {
    use crate::CatalyticReactor::marching_solver::*;
    use crate::CatalyticReactor::reactor_geometry::ReactorGeometry;
    use crate::CatalyticReactor::task_parser::ReactorTask;
    use crate::Kinetics::decomposition::{ArrheniusDecomposition, H2O_SHARE, O2_SHARE};
    use crate::Thermodynamics::FixedData::FixedData;
    use crate::Thermodynamics::IF97data::IF97data;
    use crate::Thermodynamics::property_api::{PropertyError, PropertySource};
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn scenario_geometry() -> ReactorGeometry {
        ReactorGeometry::new(0.170, 0.15, 0.001, 0.7).unwrap()
    }

    fn scenario_inlet() -> ReactorInlet {
        ReactorInlet::new(5.8, 0.90, 293.15, 5.0e6).unwrap()
    }

    fn is_non_decreasing(v: &[f64]) -> bool {
        v.windows(2).all(|w| w[1] >= w[0])
    }

    #[test]
    fn march_invariants_segment_by_segment() {
        let source = FixedData::default();
        let integrator = AxialMarchingIntegrator::new(scenario_geometry(), &source).unwrap();
        let dx = integrator.geometry.step(DEFAULT_SEGMENTS);
        let mut state = ControlVolumeState::from_inlet(&scenario_inlet());
        let total = state.total_mass();
        for i in 0..DEFAULT_SEGMENTS {
            let before = state.clone();
            let report = integrator.step(&mut state, dx, i).unwrap();
            // peroxide never grows and never goes negative
            assert!(state.m_H2O2 <= before.m_H2O2);
            assert!(state.m_H2O2 >= 0.0);
            assert!(state.m_H2O_liquid >= 0.0 && state.m_H2O_vapour >= 0.0 && state.m_O2 >= 0.0);
            // products follow the stoichiometric split of the converted mass
            assert_relative_eq!(
                state.m_O2 - before.m_O2,
                report.converted * O2_SHARE,
                epsilon = 1e-12
            );
            assert_relative_eq!(
                (state.m_H2O_liquid + state.m_H2O_vapour)
                    - (before.m_H2O_liquid + before.m_H2O_vapour),
                report.converted * H2O_SHARE,
                epsilon = 1e-12
            );
            // total mass is conserved
            assert_relative_eq!(state.total_mass(), total, max_relative = 1e-12);
            // pressure is floored at zero and falls whenever the flow moves
            assert!(state.P >= 0.0);
            if report.velocity > 0.0 {
                assert!(state.P <= before.P);
            }
        }
    }

    #[test]
    fn scenario_with_fixed_properties() {
        let source = FixedData::default();
        let integrator = AxialMarchingIntegrator::new(scenario_geometry(), &source).unwrap();
        let solution = integrator.march(&scenario_inlet()).unwrap();
        assert_eq!(solution.profile.len(), DEFAULT_SEGMENTS);
        assert!(is_non_decreasing(&solution.profile.decomposition));
        assert!(solution.T_out > source.T_sat);
        assert!(solution.remaining_H2O2_fraction < 1e-6);
        assert!(solution.P_out > 0.0 && solution.P_out < 5.0e6);
        assert!(solution.quality.mass_residual_max < 1e-12);
        assert_eq!(solution.quality.discarded_heat, 0.0);
        let total = solution.m_H2O_liquid + solution.m_H2O_vapour + solution.m_O2;
        assert_relative_eq!(total, 5.8, max_relative = 1e-6);
        assert_relative_eq!(solution.m_O2, 5.8 * 0.9 * O2_SHARE, max_relative = 1e-6);
        // pressure profile in MPa, never increasing
        let P = &solution.profile.P_MPa;
        assert!(P.windows(2).all(|w| w[1] <= w[0]));
        assert_relative_eq!(*P.last().unwrap(), solution.P_out / 1e6, max_relative = 1e-12);
    }

    #[test]
    fn scenario_with_IF97_properties() {
        let source = IF97data::new();
        let solution = simulate_reactor(
            0.170, 0.15, 0.001, 0.7, 5.8, 0.90, 293.15, 5.0e6, &source,
        )
        .unwrap();
        assert_eq!(solution.profile.len(), 100);
        assert_eq!(solution.profile.T.len(), solution.profile.P_MPa.len());
        assert!(is_non_decreasing(&solution.profile.decomposition));
        let T_sat_out = source.saturation_temperature(solution.P_out).unwrap();
        assert!(solution.T_out > T_sat_out);
        assert!(solution.remaining_H2O2_fraction < 1e-6);
        assert!(solution.m_H2O_vapour > solution.m_H2O_liquid);
        assert!(solution.quality.depletion_segment.is_some());
        // outlet gas is a steam/oxygen mixture
        assert!(solution.R_gas_out > 259.0 && solution.R_gas_out < 462.0);
        assert!(solution.Cp_gas_out > 0.0);
        let matrix = solution.profiles_matrix();
        assert_eq!(matrix.shape(), (100, 3));
        assert_eq!(matrix[(99, 0)], solution.T_out);
    }

    #[test]
    fn sensible_heating_below_saturation() {
        let source = FixedData::default();
        let integrator = AxialMarchingIntegrator::new(scenario_geometry(), &source).unwrap();
        let mut state = ControlVolumeState::from_inlet(&scenario_inlet());
        let T0 = state.T;
        let report = integrator.step(&mut state, 0.0015, 0).unwrap();
        assert!(report.converted > 0.0);
        // heat is not enough to reach saturation at the inlet
        assert!(state.T < source.T_sat);
        assert_eq!(report.evaporated, 0.0);
        let m_liquid = state.m_H2O2 + state.m_H2O_liquid;
        let Cp_liquid = (state.m_H2O2 * source.H2O2_Cp + state.m_H2O_liquid * source.water_Cp)
            / m_liquid;
        let dT = report.converted * integrator.constants.Q_reaction
            / (state.total_mass() * Cp_liquid);
        assert_relative_eq!(state.T, T0 + dT, max_relative = 1e-12);
    }

    #[test]
    fn vaporization_at_saturation() {
        let source = FixedData::default();
        let integrator = AxialMarchingIntegrator::new(scenario_geometry(), &source).unwrap();
        let mut state = ControlVolumeState {
            m_H2O2: 0.5,
            m_H2O_liquid: 3.0,
            m_H2O_vapour: 1.0,
            m_O2: 1.0,
            T: source.T_sat,
            P: 4.0e6,
        };
        let report = integrator.step(&mut state, 1e-4, 7).unwrap();
        assert!(report.converted > 0.0);
        let Q = report.converted * integrator.constants.Q_reaction;
        assert_relative_eq!(report.evaporated, Q / source.latent_heat, max_relative = 1e-12);
        // all heat went into vaporization
        assert_eq!(state.T, source.T_sat);
    }

    #[test]
    fn crossing_saturation_within_one_segment() {
        let source = FixedData::default();
        let integrator = AxialMarchingIntegrator::new(scenario_geometry(), &source).unwrap();
        let T0 = source.T_sat - 1.0;
        let mut state = ControlVolumeState {
            m_H2O2: 0.5,
            m_H2O_liquid: 3.0,
            m_H2O_vapour: 0.0,
            m_O2: 0.0,
            T: T0,
            P: 4.0e6,
        };
        let report = integrator.step(&mut state, 1e-4, 3).unwrap();
        // fast kinetics near saturation: the whole peroxide converts, liquid Cp is water's
        assert_relative_eq!(report.converted, 0.5, max_relative = 1e-12);
        let Q = report.converted * integrator.constants.Q_reaction;
        let Q_to_saturation = state.total_mass() * source.water_Cp * (source.T_sat - T0);
        assert!(Q > Q_to_saturation);
        assert_eq!(state.T, source.T_sat);
        assert_relative_eq!(
            report.evaporated,
            (Q - Q_to_saturation) / source.latent_heat,
            max_relative = 1e-12
        );
        assert!(state.m_H2O_liquid > 0.0);
    }

    #[test]
    fn superheat_energy_balance() {
        // product water released into a superheated stream is vaporized before superheat
        let source = FixedData::default();
        let geometry = scenario_geometry();
        let integrator = AxialMarchingIntegrator::with_kinetics(
            geometry,
            &source,
            ArrheniusDecomposition::new(1.0e12, 4.9e4),
            2.887e6,
        )
        .unwrap();
        let mut state = ControlVolumeState {
            m_H2O2: 0.2,
            m_H2O_liquid: 0.0,
            m_H2O_vapour: 2.0,
            m_O2: 1.0,
            T: 700.0,
            P: 4.0e6,
        };
        let report = integrator.step(&mut state, 0.0015, 50).unwrap();
        // very fast kinetics: everything converts, product water evaporates
        assert_relative_eq!(report.converted, 0.2, max_relative = 1e-12);
        assert_eq!(state.m_H2O2, 0.0);
        assert_eq!(state.m_H2O_liquid, 0.0);
        assert_relative_eq!(report.evaporated, 0.2 * H2O_SHARE, max_relative = 1e-12);
        let Q = 0.2 * 2.887e6 - report.evaporated * source.latent_heat;
        let m_gas = state.m_H2O_vapour + state.m_O2;
        let Cp_mix = (state.m_H2O_vapour * source.steam_Cp + state.m_O2 * source.O2_Cp) / m_gas;
        assert_relative_eq!(state.T, 700.0 + Q / (m_gas * Cp_mix), max_relative = 1e-12);
    }

    #[test]
    fn exhausted_peroxide_stops_reaction() {
        let source = FixedData::default();
        let integrator = AxialMarchingIntegrator::with_kinetics(
            scenario_geometry(),
            &source,
            ArrheniusDecomposition::new(1.0e15, 4.9e4),
            2.887e6,
        )
        .unwrap();
        let solution = integrator.march(&scenario_inlet()).unwrap();
        assert_eq!(solution.quality.depletion_segment, Some(0));
        assert!(solution.profile.decomposition.iter().all(|x| *x == 1.0));
        assert_eq!(solution.remaining_H2O2_fraction, 0.0);
        // no reaction after depletion: temperature settles once the heat is spent
        let T = &solution.profile.T;
        assert_eq!(T[1], T[DEFAULT_SEGMENTS - 1]);
    }

    #[test]
    fn segment_count_is_configurable() {
        let source = FixedData::default();
        let config = MarchConfig {
            segments: 37,
            ..MarchConfig::default()
        };
        let solution = AxialMarchingIntegrator::new(scenario_geometry(), &source)
            .unwrap()
            .with_config(config)
            .unwrap()
            .march(&scenario_inlet())
            .unwrap();
        assert_eq!(solution.profile.len(), 37);
        let zero = MarchConfig {
            segments: 0,
            ..MarchConfig::default()
        };
        let err = AxialMarchingIntegrator::new(scenario_geometry(), &source)
            .unwrap()
            .with_config(zero)
            .err()
            .unwrap();
        assert!(matches!(err, ReactorError::InvalidInput { parameter: "segments", .. }));
    }

    #[test]
    fn property_failure_aborts_march_with_segment() {
        // saturation data only down to 4.99 MPa: the bed pressure drop leaves that window
        let source = FixedData::default().with_P_range(4.99e6, 6.0e6);
        let integrator = AxialMarchingIntegrator::new(scenario_geometry(), &source).unwrap();
        match integrator.march(&scenario_inlet()) {
            Err(ReactorError::PropertyQuery {
                query,
                segment: Some(i),
                source: PropertyError::OutOfRange { value, .. },
            }) => {
                assert_eq!(query, "saturation temperature");
                assert!(i > 0);
                assert!(value < 4.99e6);
            }
            other => panic!("expected a property failure, got {:?}", other),
        }
        // out of range already at the inlet
        let inlet = ReactorInlet::new(5.8, 0.9, 293.15, 7.0e6).unwrap();
        match integrator.march(&inlet) {
            Err(ReactorError::PropertyQuery { segment, .. }) => assert_eq!(segment, Some(0)),
            other => panic!("expected a property failure, got {:?}", other),
        }
    }

    #[test]
    fn pressure_is_floored_at_zero() {
        let source = FixedData::default();
        let geometry = ReactorGeometry::new(0.01, 0.1, 1e-4, 0.5).unwrap();
        let integrator = AxialMarchingIntegrator::new(geometry, &source).unwrap();
        let mut state = ControlVolumeState::from_inlet(&ReactorInlet::new(5.8, 0.9, 293.15, 1.0e5).unwrap());
        integrator.step(&mut state, 0.01, 0).unwrap();
        assert_eq!(state.P, 0.0);
        let err = integrator.step(&mut state, 0.01, 1).unwrap_err();
        assert!(matches!(err, ReactorError::PressureDepleted { segment: 1 }));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let source = FixedData::default();
        let err = simulate_reactor(0.17, 0.15, 0.001, 1.2, 5.8, 0.9, 293.15, 5e6, &source)
            .unwrap_err();
        assert!(matches!(err, ReactorError::InvalidInput { parameter: "porosity", value } if value == 1.2));
        let err = simulate_reactor(0.17, 0.15, 0.001, 0.7, 5.8, 1.5, 293.15, 5e6, &source)
            .unwrap_err();
        assert!(matches!(err, ReactorError::InvalidInput { parameter: "peroxide_fraction", .. }));
        let err = simulate_reactor(0.17, 0.15, 0.001, 0.7, -1.0, 0.9, 293.15, 5e6, &source)
            .unwrap_err();
        assert!(matches!(err, ReactorError::InvalidInput { parameter: "mass_flow", .. }));
        let err = simulate_reactor(0.17, 0.15, 0.001, 0.7, 5.8, 0.9, 0.0, 5e6, &source)
            .unwrap_err();
        assert!(matches!(err, ReactorError::InvalidInput { parameter: "T_in", .. }));
        assert!(err.to_string().contains("T_in"));
    }

    const TASK_JSON: &str = r#"{
        "problem_name": "HTP bed",
        "geometry": { "diameter": 0.17, "length": 0.15, "cell_size": 0.001, "porosity": 0.7 },
        "inlet": { "mass_flow": 5.8, "peroxide_fraction": 0.9, "T_in": 293.15, "P_in": 5.0e6 },
        "march": { "segments": 50 }
    }"#;

    #[test]
    fn task_from_json() {
        let task = ReactorTask::parse(TASK_JSON).unwrap();
        assert_eq!(task.problem_name.as_deref(), Some("HTP bed"));
        assert_eq!(task.march.segments, 50);
        assert_eq!(task.march.liquid_density, 1300.0);
        assert_eq!(task.kinetics, ArrheniusDecomposition::default());
        assert_eq!(task.Q_reaction, 2.887e6);
        let solution = task.solve(&FixedData::default()).unwrap();
        assert_eq!(solution.profile.len(), 50);
    }

    #[test]
    fn task_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TASK_JSON.as_bytes()).unwrap();
        let task = ReactorTask::from_file(file.path()).unwrap();
        assert_relative_eq!(task.reactor_geometry().unwrap().area, 0.022698, epsilon = 1e-6);

        let err = ReactorTask::from_file("no_such_task.json").unwrap_err();
        assert!(matches!(err, ReactorError::TaskFile(_)));
        let err = ReactorTask::parse("{ \"geometry\": 1 }").unwrap_err();
        assert!(matches!(err, ReactorError::Serde(_)));
        let bad = TASK_JSON.replace("\"porosity\": 0.7", "\"porosity\": 0.0");
        let err = ReactorTask::parse(&bad).unwrap_err();
        assert!(matches!(err, ReactorError::InvalidInput { parameter: "porosity", .. }));
    }
}
