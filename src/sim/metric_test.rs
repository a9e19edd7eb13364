use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const PERCENT: MetricSpec = MetricSpec {
    key: "moisture",
    label: "Soil Moisture",
    unit: "%",
    initial: 45.0,
    delta: 1.0,
    min: 0.0,
    max: Some(100.0),
    decimals: None,
};

const FLOORED: MetricSpec = MetricSpec {
    key: "energy",
    label: "Energy Consumption",
    unit: "kWh",
    initial: 300.0,
    delta: 5.0,
    min: 0.0,
    max: None,
    decimals: None,
};

// =============================================================================
// Clamp invariant
// =============================================================================

#[test]
fn value_stays_in_range_over_many_ticks() {
    let mut rng = StdRng::seed_from_u64(7);
    let spec = MetricSpec { initial: 0.5, delta: 3.0, ..PERCENT };
    let mut metric = Metric::new(spec);
    for _ in 0..10_000 {
        let v = metric.step(&mut rng);
        assert!((0.0..=100.0).contains(&v), "value {v} escaped range");
    }
}

#[test]
fn value_pinned_at_upper_bound_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(11);
    let spec = MetricSpec { initial: 100.0, delta: 50.0, ..PERCENT };
    let mut metric = Metric::new(spec);
    for _ in 0..1_000 {
        assert!(metric.step(&mut rng) <= 100.0);
    }
}

#[test]
fn floored_metric_never_negative() {
    let mut rng = StdRng::seed_from_u64(3);
    let spec = MetricSpec { initial: 1.0, ..FLOORED };
    let mut metric = Metric::new(spec);
    for _ in 0..10_000 {
        assert!(metric.step(&mut rng) >= 0.0);
    }
}

#[test]
fn step_moves_at_most_delta() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut metric = Metric::new(FLOORED);
    for _ in 0..1_000 {
        let before = metric.value();
        let after = metric.step(&mut rng);
        assert!((after - before).abs() <= FLOORED.delta + 1e-9);
    }
}

#[test]
fn initial_value_is_clamped() {
    let spec = MetricSpec { initial: 140.0, ..PERCENT };
    assert!((Metric::new(spec).value() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn zero_delta_is_constant() {
    let mut rng = StdRng::seed_from_u64(1);
    let spec = MetricSpec { delta: 0.0, ..PERCENT };
    let mut metric = Metric::new(spec);
    for _ in 0..10 {
        assert!((metric.step(&mut rng) - 45.0).abs() < f64::EPSILON);
    }
}

#[test]
fn negative_delta_treated_as_magnitude() {
    let mut rng = StdRng::seed_from_u64(5);
    let spec = MetricSpec { delta: -2.0, ..PERCENT };
    let mut metric = Metric::new(spec);
    let v = metric.step(&mut rng);
    assert!((v - 45.0).abs() <= 2.0);
}

// =============================================================================
// Rounding
// =============================================================================

#[test]
fn rounding_keeps_one_decimal() {
    let mut rng = StdRng::seed_from_u64(9);
    let spec = MetricSpec {
        key: "temperature",
        initial: 22.0,
        delta: 0.25,
        max: Some(40.0),
        decimals: Some(1),
        ..PERCENT
    };
    let mut metric = Metric::new(spec);
    for _ in 0..500 {
        let v = metric.step(&mut rng);
        let scaled = v * 10.0;
        assert!((scaled - scaled.round()).abs() < 1e-6, "{v} has more than one decimal");
    }
}

#[test]
fn integer_metric_moves_by_whole_steps() {
    let mut rng = StdRng::seed_from_u64(21);
    let spec = MetricSpec {
        key: "occupancy",
        initial: 0.0,
        delta: 1.0,
        max: Some(16.0),
        decimals: Some(0),
        ..PERCENT
    };
    let mut metric = Metric::new(spec);
    for _ in 0..500 {
        let v = metric.step(&mut rng);
        assert!((v - v.round()).abs() < f64::EPSILON);
        assert!((0.0..=16.0).contains(&v));
    }
}

// =============================================================================
// Spec helpers
// =============================================================================

#[test]
fn with_max_overrides_bound() {
    let spec = FLOORED.with_max(10.0);
    assert_eq!(spec.max, Some(10.0));
    assert!((spec.clamp(50.0) - 10.0).abs() < f64::EPSILON);
}

#[test]
fn reading_reflects_spec_and_value() {
    let reading = Metric::new(PERCENT).reading();
    assert_eq!(reading.key, "moisture");
    assert_eq!(reading.unit, "%");
    assert!((reading.value - 45.0).abs() < f64::EPSILON);
    assert_eq!(reading.max, Some(100.0));
}

// =============================================================================
// MetricBank
// =============================================================================

#[test]
fn bank_ticks_every_metric() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut bank = MetricBank::new([PERCENT, FLOORED]);
    let before: Vec<f64> = bank.iter().map(Metric::value).collect();
    for _ in 0..20 {
        bank.tick(&mut rng);
    }
    let after: Vec<f64> = bank.iter().map(Metric::value).collect();
    assert_eq!(before.len(), after.len());
    assert!(before.iter().zip(&after).all(|(b, a)| (b - a).abs() > f64::EPSILON));
}

#[test]
fn bank_lookup_by_key() {
    let bank = MetricBank::new([PERCENT, FLOORED]);
    assert_eq!(bank.get("energy").map(|m| m.spec().unit), Some("kWh"));
    assert!(bank.get("nope").is_none());
}

#[test]
fn bank_readings_serialize_missing_max_as_null() {
    let bank = MetricBank::new([FLOORED]);
    let json = serde_json::to_value(bank.readings()).unwrap();
    assert_eq!(json[0]["key"], "energy");
    assert!(json[0]["max"].is_null());
}
