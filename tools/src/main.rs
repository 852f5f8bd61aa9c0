//! metrics-runner: headless runner for the call analytics core.
//!
//! Usage:
//!   metrics-runner --mode summary  --data data/calls.jsonl
//!   metrics-runner --mode simulate --data data/calls.jsonl --factor 0.5 --cost-per-call 8
//!   metrics-runner --mode generate --out data/calls.jsonl --seed 42 --count 1000

use anyhow::Result;
use callmetrics_core::{
    config::AnalyticsConfig,
    engine::AnalyticsEngine,
    generator::generate_calls,
    store::{CallStore, FeedbackStore},
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mode = parse_str(&args, "--mode", "summary");
    let data = parse_str(&args, "--data", "data/calls.jsonl");
    let feedback_path = parse_str(&args, "--feedback", "data/feedback.jsonl");
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => AnalyticsConfig::load(&w[1])?,
        None => AnalyticsConfig::default(),
    };

    if mode == "generate" {
        let seed = parse_arg(&args, "--seed", 42u64);
        let count = parse_arg(&args, "--count", 1000usize);
        let out = parse_str(&args, "--out", "data/calls.jsonl");
        let calls = generate_calls(seed, count);
        CallStore::save(&out, &calls)?;
        println!("{count} records written to {out} (seed {seed})");
        return Ok(());
    }

    let calls = CallStore::load(&data)?;
    let engine = AnalyticsEngine::new(config, calls, FeedbackStore::new(feedback_path));

    match mode.as_str() {
        "summary" => {
            let cost = parse_arg(&args, "--cost-per-call", 8.0f64);
            let summary = engine.aht_summary(cost)?;
            println!("=== AHT SUMMARY ===");
            println!("  average aht:         {:.2}s", summary.average_aht);
            println!("  long calls:          {}", summary.long_calls_count);
            println!("  long call share:     {:.2}%", summary.long_calls_percentage);
            println!("  cost per call:       ${:.2}", summary.cost_per_call);
            println!(
                "  est. annual savings: ${:.2}",
                summary.estimated_annual_savings
            );
            println!();
            println!("=== TOP CONTACT REASONS ===");
            for (reason, count) in &summary.top_contact_reasons {
                println!("  {reason}: {count} calls");
            }
        }
        "simulate" => {
            let factor = parse_arg(&args, "--factor", 0.5f64);
            let cost = parse_arg(&args, "--cost-per-call", 8.0f64);
            let result = engine.simulate(factor, cost)?;
            println!("=== AHT SIMULATION ===");
            println!("  original aht:        {:.2}s", result.original_aht);
            println!("  new aht:             {:.2}s", result.new_aht);
            println!(
                "  reduction:           {:.2}s ({:.2}%)",
                result.aht_reduction, result.reduction_percentage
            );
            println!(
                "  long calls:          {} -> {}",
                result.original_long_calls, result.new_long_calls
            );
            println!(
                "  est. annual savings: ${:.2}",
                result.estimated_annual_savings
            );
            println!();
            println!("=== TOP REASONS FOR LONG CALLS ===");
            for (reason, count) in &result.top_contact_reasons {
                println!("  {reason}: {count} calls");
            }
        }
        "reason" => {
            let reason = require_str(&args, "--reason")?;
            let insights = engine.reason_insights(&reason)?;
            println!("{}", serde_json::to_string_pretty(&insights)?);
        }
        "call" => {
            let call_id = require_str(&args, "--call-id")?;
            let details = engine.call_details(&call_id)?;
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
        "customer" => {
            let customer_id = require_str(&args, "--customer-id")?;
            let insight = engine.customer_insight(&customer_id)?;
            println!("{}", serde_json::to_string_pretty(&insight)?);
        }
        "feedback" => {
            let summary = engine.feedback_summary()?;
            let report = engine.feedback_effectiveness()?;
            println!("=== FEEDBACK SUMMARY ===");
            println!("  records:           {}", summary.total);
            println!("  average score:     {:.2}", summary.average_score);
            println!("  avg reduction:     {:.2}s", summary.avg_duration_reduction);
            println!("  avg pct reduction: {:.2}%", summary.avg_percent_reduction);
            println!();
            println!("=== EFFECTIVENESS BY RECOMMENDATION ===");
            let mut keys: Vec<&String> = report.by_recommendation.keys().collect();
            keys.sort();
            for key in keys {
                let group = &report.by_recommendation[key];
                println!("  {key}");
                println!(
                    "    count: {}  avg reduction: {:.2}s  avg score: {:.2}",
                    group.count, group.avg_duration_reduction, group.avg_score
                );
            }
        }
        other => anyhow::bail!("Unknown mode: {other}"),
    }

    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn parse_str(args: &[String], flag: &str, default: &str) -> String {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
        .unwrap_or_else(|| default.to_string())
}

fn require_str(args: &[String], flag: &str) -> Result<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
        .ok_or_else(|| anyhow::anyhow!("Missing required flag: {flag}"))
}
