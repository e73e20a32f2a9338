mod common;

use approx::assert_relative_eq;
use flyer_trim::components::{
    AircraftModel, ConfigError, ControlKind, EngineKind, FullAircraftConfig, InitialConditions,
    StopCriterion, TrimConfigFile, TrimMode,
};
use flyer_trim::systems::TrimSolver;
use pretty_assertions::assert_eq;

use common::{assert_trim_result_valid, data_path, CRUISE_AIRSPEED, CRUISE_ALTITUDE};

#[test]
fn test_aircraft_file_matches_programmed_cessna() {
    let loaded = FullAircraftConfig::from_file(data_path("aircraft/cessna_172.yaml"))
        .expect("aircraft file loads");
    let programmed = FullAircraftConfig::cessna_172();

    assert_eq!(loaded.name, "Cessna 172");
    assert_relative_eq!(loaded.mass.mass, programmed.mass.mass);
    assert_relative_eq!(loaded.geometry.wing_area, programmed.geometry.wing_area);
    assert_relative_eq!(loaded.aero_coef.lift.c_l_alpha, programmed.aero_coef.lift.c_l_alpha);
    assert_relative_eq!(loaded.aero_coef.pitch.c_m_0, programmed.aero_coef.pitch.c_m_0);

    let stall = loaded.aero_coef.stall.expect("stall envelope present");
    assert_relative_eq!(stall.alpha_min, (-5.0_f64).to_radians(), epsilon = 1e-12);
    assert_relative_eq!(stall.alpha_max, 16.0_f64.to_radians(), epsilon = 1e-12);

    assert_eq!(loaded.propulsion.engines.len(), 1);
    assert_eq!(loaded.propulsion.engines[0].kind, EngineKind::Piston);
    assert_eq!(loaded.gear.contacts.len(), 3);
}

#[test]
fn test_cruise_file_configures_solver() {
    let file = TrimConfigFile::from_file(data_path("trim/cessna_cruise.yaml"))
        .expect("trim file loads");
    assert_eq!(file.name, "cessna-cruise");
    assert_eq!(file.mode, TrimMode::Longitudinal);

    let config = file.solver_config();
    assert_eq!(config.max_iterations, 2500);
    assert_eq!(config.stop_criterion, StopCriterion::StopOnDelta);
    assert_relative_eq!(config.tolerance, 1e-10);
    assert_relative_eq!(config.coefficients.gamma, 2.0);

    let throttle = config.control_overrides[&ControlKind::Throttle];
    assert_eq!(throttle.initial_value, Some(0.6));
    assert_eq!(throttle.step_size, Some(0.05));
    assert_eq!(config.control_overrides[&ControlKind::Elevator].initial_value, None);

    let mut ic = InitialConditions::default();
    file.apply(&mut ic);
    assert_relative_eq!(ic.true_airspeed, CRUISE_AIRSPEED);
    assert_relative_eq!(ic.altitude, CRUISE_ALTITUDE);
    assert_relative_eq!(ic.target_nlf, 1.0);

    let model = AircraftModel::cessna_172();
    let mut solver = TrimSolver::new(config);
    solver.select_mode(file.mode, &model.config, &ic);
    let throttle = &solver.controls()[0];
    assert_eq!(throttle.kind(), ControlKind::Throttle);
    assert_eq!((throttle.initial, throttle.step), (0.6, 0.05));
}

#[test]
fn test_turn_file_derives_load_factor_from_bank() {
    let file =
        TrimConfigFile::from_file(data_path("trim/cessna_turn.yaml")).expect("trim file loads");
    assert_eq!(file.mode, TrimMode::Turn);
    assert_eq!(file.solver_config().max_iterations, 4000);
    // Unset search values fall back to the defaults
    assert_relative_eq!(file.solver_config().coefficients.sigma, 0.5);

    let mut ic = InitialConditions::default();
    file.apply(&mut ic);
    assert_relative_eq!(ic.phi, 45.0_f64.to_radians(), epsilon = 1e-12);
    assert_relative_eq!(ic.target_nlf, 2.0_f64.sqrt(), epsilon = 1e-12);
    assert_relative_eq!(ic.true_airspeed, 50.0);
}

#[test]
fn test_explicit_load_factor_overrides_bank() {
    let file = TrimConfigFile::from_yaml("mode: turn\ntrim:\n  nlf: 2.0\n").expect("valid file");
    assert_eq!(file.trim.nlf, Some(2.0));

    let mut ic = InitialConditions::level_flight(50.0, 1000.0);
    file.apply(&mut ic);
    assert_relative_eq!(ic.target_nlf, 2.0);

    let banked = TrimConfigFile::from_yaml("mode: turn\ntrim:\n  phi: 45.0\n  nlf: 1.2\n")
        .expect("valid file");
    banked.apply(&mut ic);
    assert_relative_eq!(ic.target_nlf, 1.2);
}

#[test]
fn test_file_loaded_case_trims() {
    let aircraft = FullAircraftConfig::from_file(data_path("aircraft/cessna_172.yaml"))
        .expect("aircraft file loads");
    let file = TrimConfigFile::from_file(data_path("trim/cessna_cruise.yaml"))
        .expect("trim file loads");

    let mut model = AircraftModel::new(aircraft);
    let mut ic = InitialConditions::default();
    file.apply(&mut ic);
    let mut solver = TrimSolver::new(file.solver_config());
    solver.select_mode(file.mode, &model.config, &ic);

    let result = solver.do_trim(&mut model, &mut ic).expect("trim runs");

    assert!(result.success, "cost {:e}", result.cost);
    assert_trim_result_valid(&result);
}

#[test]
fn test_malformed_files_are_rejected() {
    let half_stall = "name: Broken\nmass: 1000.0\nwing_area: 16.0\nwing_span: 11.0\nmac: 1.5\n\
alpha_stall_max: 16.0\n";
    assert!(matches!(
        FullAircraftConfig::from_yaml(half_stall),
        Err(ConfigError::ValidationError(_))
    ));

    let massless = "name: Broken\nmass: 0.0\nwing_area: 16.0\nwing_span: 11.0\nmac: 1.5\n";
    assert!(matches!(
        FullAircraftConfig::from_yaml(massless),
        Err(ConfigError::ValidationError(_))
    ));

    assert!(matches!(
        TrimConfigFile::from_yaml("mode: sideways\n"),
        Err(ConfigError::YamlError(_))
    ));
    assert!(matches!(
        TrimConfigFile::from_file(data_path("trim/missing.yaml")),
        Err(ConfigError::FileError(_))
    ));
}
