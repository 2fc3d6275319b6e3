//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "reproducible"
        random_seed = 42
        run_count = 3

        [termination]
        seconds_spent_limit = 30
        unimproved_step_count_limit = 10000

        [[phases]]
        type = "construction_heuristic"
        talk_order = "declared"

        [[phases]]
        type = "local_search"
        move_tabu_size = 8
        [phases.acceptor]
        type = "simulated_annealing"
        starting_temperature = 5.0
        decay_rate = 0.99
        worsening_move_limit = 50
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.run_count, 3);
    assert_eq!(config.time_limit(), Duration::from_secs(30));
    assert_eq!(
        config.termination.as_ref().unwrap().unimproved_step_count_limit,
        Some(10_000)
    );
    assert_eq!(config.construction_heuristic().talk_order, TalkOrder::Declared);

    let ls = config.local_search();
    assert_eq!(ls.move_tabu_size(), 8);
    match ls.acceptor() {
        AcceptorConfig::SimulatedAnnealing(sa) => {
            assert_eq!(sa.starting_temperature(), 5.0);
            assert_eq!(sa.decay_rate(), 0.99);
            assert_eq!(
                sa.minimum_temperature(),
                SimulatedAnnealingConfig::DEFAULT_MINIMUM_TEMPERATURE
            );
            assert_eq!(sa.worsening_move_limit(), 50);
        }
        other => panic!("unexpected acceptor {other:?}"),
    }
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: full_assert
        random_seed: 42
        termination:
          millis_spent_limit: 1500
          best_score_limit: "0hard/-2soft"
        phases:
          - type: construction_heuristic
          - type: local_search
            acceptor:
              type: hill_climbing
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.time_limit(), Duration::from_millis(1500));
    assert_eq!(
        config.best_score_limit().unwrap(),
        Some(HardSoftScore::penalty(0, 2))
    );
    assert!(matches!(
        config.local_search().acceptor(),
        AcceptorConfig::HillClimbing
    ));
}

#[test]
fn test_defaults() {
    let config = SolverConfig::default();
    assert_eq!(config.run_count, 1);
    assert_eq!(config.time_limit(), DEFAULT_TIME_LIMIT);
    assert_eq!(config.best_score_limit().unwrap(), None);
    assert_eq!(config.construction_heuristic().talk_order, TalkOrder::TrackFlowId);

    let ls = config.local_search();
    assert_eq!(ls.neighborhood_size(), LocalSearchConfig::DEFAULT_NEIGHBORHOOD_SIZE);
    assert!(matches!(ls.acceptor(), AcceptorConfig::SimulatedAnnealing(_)));
    assert_eq!(
        SimulatedAnnealingConfig::default().worsening_move_limit(),
        SimulatedAnnealingConfig::DEFAULT_WORSENING_MOVE_LIMIT
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config.run_count, 1);
    assert!(config.phases.is_empty());
}

#[test]
fn test_combined_time_limit() {
    let termination = TerminationConfig {
        minutes_spent_limit: Some(1),
        seconds_spent_limit: Some(5),
        ..TerminationConfig::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_secs(65)));
    assert_eq!(TerminationConfig::default().time_limit(), None);
}

#[test]
fn test_huge_time_limit_saturates() {
    let config = SolverConfig::from_toml_str(
        r#"
        [termination]
        seconds_spent_limit = 9223372036854775807
        minutes_spent_limit = 9223372036854775807
        millis_spent_limit = 5
        "#,
    )
    .unwrap();
    assert_eq!(config.time_limit(), Duration::from_millis(u64::MAX));
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_step_limit(500)
        .with_run_count(2)
        .with_phase(PhaseConfig::ConstructionHeuristic(
            ConstructionHeuristicConfig::default(),
        ))
        .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig::default()));

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.time_limit(), Duration::from_secs(60));
    assert_eq!(config.termination.as_ref().unwrap().step_count_limit, Some(500));
    assert_eq!(config.phases.len(), 2);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_values_rejected() {
    let err = SolverConfig::from_toml_str("run_count = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = SolverConfig::from_toml_str(
        r#"
        [termination]
        best_score_limit = "zero"
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = SolverConfig::from_toml_str(
        r#"
        [[phases]]
        type = "local_search"
        [phases.acceptor]
        type = "simulated_annealing"
        decay_rate = 1.5
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_phase_order_rejected() {
    let config = SolverConfig::new()
        .with_phase(PhaseConfig::LocalSearch(LocalSearchConfig::default()))
        .with_phase(PhaseConfig::ConstructionHeuristic(
            ConstructionHeuristicConfig::default(),
        ));
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_malformed_toml() {
    let err = SolverConfig::from_toml_str("run_count = \"many\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file() {
    let err = SolverConfig::load("does/not/exist.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_environment_mode_flags() {
    assert!(!EnvironmentMode::NonReproducible.is_reproducible());
    assert!(EnvironmentMode::FastAssert.is_reproducible());
    assert!(EnvironmentMode::FullAssert.is_asserted());
    assert!(!EnvironmentMode::Reproducible.is_asserted());
}
