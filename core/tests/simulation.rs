//! Improvement simulator tests — boundaries, immutability, the savings
//! heuristic.

use callmetrics_core::config::AnalyticsConfig;
use callmetrics_core::error::MetricsError;
use callmetrics_core::record::CallRecord;
use callmetrics_core::simulation::simulate_aht_reduction;

fn call(id: &str, duration: f64, reason: &str) -> CallRecord {
    serde_json::from_value(serde_json::json!({
        "call_id": id,
        "duration": duration,
        "reason": reason,
        "customer": {"customer_id": "C1"},
    }))
    .unwrap()
}

/// Two long calls (600s, 900s) and two normal ones against the default
/// 530s threshold.
fn sample_calls() -> Vec<CallRecord> {
    vec![
        call("a", 600.0, "slow internet"),
        call("b", 900.0, "billing dispute"),
        call("c", 120.0, "call drop"),
        call("d", 300.0, "slow internet"),
    ]
}

#[test]
fn zero_factor_is_a_no_op() {
    let calls = sample_calls();
    let result = simulate_aht_reduction(&calls, &AnalyticsConfig::default(), 0.0, 8.0).unwrap();
    assert_eq!(result.original_aht, result.new_aht);
    assert_eq!(result.original_long_calls, result.new_long_calls);
    assert_eq!(result.aht_reduction, 0.0);
    assert_eq!(result.estimated_annual_savings, 0.0);
}

#[test]
fn full_factor_zeroes_every_long_call() {
    let calls = sample_calls();
    let result = simulate_aht_reduction(&calls, &AnalyticsConfig::default(), 1.0, 8.0).unwrap();
    assert_eq!(result.new_long_calls, 0, "no call survives a 100% reduction");
    // Remaining durations: 0, 0, 120, 300 → mean 105.
    assert!((result.new_aht - 105.0).abs() < 1e-9);
}

#[test]
fn half_factor_recomputes_aht_on_the_derived_set() {
    let calls = sample_calls();
    let result = simulate_aht_reduction(&calls, &AnalyticsConfig::default(), 0.5, 8.0).unwrap();
    // Original mean: (600+900+120+300)/4 = 480.
    assert!((result.original_aht - 480.0).abs() < 1e-9);
    // Simulated durations: 300, 450, 120, 300 → mean 292.5.
    assert!((result.new_aht - 292.5).abs() < 1e-9);
    assert_eq!(result.original_long_calls, 2);
    assert_eq!(result.new_long_calls, 0);
    assert!((result.aht_reduction - 187.5).abs() < 1e-9);
    assert!((result.reduction_percentage - 39.0625).abs() < 1e-9);
}

#[test]
fn savings_formula_is_the_documented_heuristic() {
    let calls = sample_calls();
    let factor = 0.5;
    let cost = 8.0;
    let result =
        simulate_aht_reduction(&calls, &AnalyticsConfig::default(), factor, cost).unwrap();
    // Long-call seconds: 600 + 900 = 1500; saved = 750.
    let expected = 750.0 / 3600.0 * (cost / 3600.0) * 4.0;
    assert!(
        (result.estimated_annual_savings - expected).abs() < 1e-12,
        "formula must match the product definition exactly"
    );
}

#[test]
fn original_set_is_never_mutated() {
    let calls = sample_calls();
    let before: Vec<Option<f64>> = calls.iter().map(|c| c.duration).collect();
    simulate_aht_reduction(&calls, &AnalyticsConfig::default(), 0.9, 8.0).unwrap();
    let after: Vec<Option<f64>> = calls.iter().map(|c| c.duration).collect();
    assert_eq!(before, after, "simulation works on cloned records only");
}

#[test]
fn empty_call_set_returns_zero_sentinels() {
    let result = simulate_aht_reduction(&[], &AnalyticsConfig::default(), 0.5, 8.0).unwrap();
    assert_eq!(result.original_aht, 0.0);
    assert_eq!(result.new_aht, 0.0);
    assert_eq!(result.reduction_percentage, 0.0, "no division by zero");
    assert_eq!(result.original_long_calls, 0);
    assert_eq!(result.estimated_annual_savings, 0.0);
}

#[test]
fn long_call_reasons_are_profiled_not_all_reasons() {
    let calls = sample_calls();
    let result = simulate_aht_reduction(&calls, &AnalyticsConfig::default(), 0.5, 8.0).unwrap();
    // Only the two long calls contribute reasons.
    assert_eq!(result.top_contact_reasons.len(), 2);
    assert!(result
        .top_contact_reasons
        .iter()
        .all(|(_, count)| *count == 1));
}

#[test]
fn out_of_range_parameters_are_rejected() {
    let calls = sample_calls();
    let config = AnalyticsConfig::default();

    for bad_factor in [-0.1, 1.5] {
        let err = simulate_aht_reduction(&calls, &config, bad_factor, 8.0).unwrap_err();
        assert!(
            matches!(err, MetricsError::InvalidParameter { name: "improvement_factor", .. }),
            "factor {bad_factor} should be rejected, got {err:?}"
        );
    }

    let err = simulate_aht_reduction(&calls, &config, 0.5, 0.0).unwrap_err();
    assert!(
        matches!(err, MetricsError::InvalidParameter { name: "cost_per_call", .. }),
        "non-positive cost should be rejected, got {err:?}"
    );
}

#[test]
fn inputs_are_echoed_back_in_the_result() {
    let calls = sample_calls();
    let result = simulate_aht_reduction(&calls, &AnalyticsConfig::default(), 0.25, 6.5).unwrap();
    assert_eq!(result.improvement_factor, 0.25);
    assert_eq!(result.cost_per_call, 6.5);
}
