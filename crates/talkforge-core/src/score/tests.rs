//! Tests for the score type.

use super::*;

#[test]
fn test_penalty_counts() {
    let score = HardSoftScore::penalty(2, 7);
    assert_eq!(score.hard(), -2);
    assert_eq!(score.soft(), -7);
    assert_eq!(score.hard_violations(), 2);
    assert_eq!(score.soft_penalty(), 7);
}

#[test]
fn test_feasibility() {
    assert!(HardSoftScore::ZERO.is_feasible());
    assert!(HardSoftScore::penalty(0, 50).is_feasible());
    assert!(!HardSoftScore::penalty(1, 0).is_feasible());
}

#[test]
fn test_hard_dominates_soft() {
    let fewer_hard = HardSoftScore::penalty(0, 1_000);
    let more_hard = HardSoftScore::penalty(1, 0);
    assert!(fewer_hard > more_hard);

    let a = HardSoftScore::penalty(1, 2);
    let b = HardSoftScore::penalty(1, 3);
    assert!(a > b);
}

#[test]
fn test_arithmetic() {
    let a = HardSoftScore::of(-2, -5);
    let b = HardSoftScore::of(-1, -3);

    assert_eq!(a + b, HardSoftScore::of(-3, -8));
    assert_eq!(a - b, HardSoftScore::of(-1, -2));
    assert_eq!(-a, HardSoftScore::of(2, 5));

    let mut c = HardSoftScore::ZERO;
    c += HardSoftScore::ONE_HARD;
    c += HardSoftScore::ONE_SOFT;
    c -= HardSoftScore::ONE_SOFT;
    assert_eq!(c, HardSoftScore::penalty(1, 0));
}

#[test]
fn test_display_and_parse() {
    let score = HardSoftScore::penalty(1, 12);
    assert_eq!(score.to_string(), "-1hard/-12soft");
    assert_eq!("-1hard/-12soft".parse::<HardSoftScore>().unwrap(), score);
    assert_eq!(" 0hard/0soft ".parse::<HardSoftScore>().unwrap(), HardSoftScore::ZERO);
}

#[test]
fn test_parse_errors() {
    assert!("0hard".parse::<HardSoftScore>().is_err());
    assert!("0hard/xsoft".parse::<HardSoftScore>().is_err());
    assert!("0soft/0hard".parse::<HardSoftScore>().is_err());

    let err = "0hard".parse::<HardSoftScore>().unwrap_err();
    assert!(err.to_string().starts_with("Score parse error: "));
    let source: &dyn std::error::Error = &err;
    assert!(source.source().is_none());
}

#[test]
fn test_scalar_orders_like_score() {
    let a = HardSoftScore::penalty(0, 999);
    let b = HardSoftScore::penalty(1, 0);
    assert!(a.to_scalar() > b.to_scalar());
    assert_eq!(a.to_level_numbers(), [0, -999]);
}

#[test]
fn test_medium_level_ranks_between_hard_and_soft() {
    let infeasible = HardMediumSoftScore::of(-1, 0, 0);
    let partial = HardMediumSoftScore::of(0, -1, 0);
    let complete = HardMediumSoftScore::of(0, 0, -500);

    assert!(complete > partial);
    assert!(partial > infeasible);
    assert!(complete.is_complete_and_feasible());
    assert!(!partial.is_complete_and_feasible());
    assert!(complete.to_scalar() > partial.to_scalar());
    assert!(partial.to_scalar() > infeasible.to_scalar());
}

#[test]
fn test_medium_from_parts() {
    let planning = HardMediumSoftScore::from_parts(HardSoftScore::penalty(2, 4), 3);
    assert_eq!(planning.to_level_numbers(), [-2, -3, -4]);
    assert_eq!(planning.unassigned_count(), 3);
    assert_eq!(planning.to_hard_soft(), HardSoftScore::penalty(2, 4));
    assert_eq!(planning.to_string(), "-2hard/-3medium/-4soft");
}
