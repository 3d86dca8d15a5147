//! `deskrail eval`: run the synthetic suite and print the report.
//!
//! Replays the built-in evaluation cases through a fresh pipeline, one
//! session per case, and scores the observed escalation decisions against
//! the expected ones.

use deskrail_agent::SessionRegistry;
use deskrail_config::AppConfig;
use deskrail_core::SessionId;
use deskrail_eval::{build_report, cases, score_cases};
use std::time::Instant;

pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = SessionRegistry::from_config(&config)?;
    let suite = cases();

    let mut observed = Vec::with_capacity(suite.len());
    let mut latencies = Vec::with_capacity(suite.len());

    println!("Running {} evaluation cases", suite.len());
    for case in &suite {
        // One session per case so unresolved-turn counters do not leak.
        let session_id = SessionId::new();
        let started = Instant::now();
        let result = registry.handle(&session_id, &case.query).await?;
        latencies.push(started.elapsed().as_secs_f64() * 1000.0);

        let mark = if result.escalated == case.expected_escalation {
            "ok"
        } else {
            "miss"
        };
        println!("  [{mark}] {}", case.query);
        observed.push(result.escalated);
    }

    let correct = score_cases(&suite, &observed);
    let report = build_report(&correct, &observed, &latencies);

    println!();
    println!("  accuracy:      {:.2}", report.accuracy);
    println!("  autonomy rate: {:.2}", report.autonomy_rate);
    println!("  avg latency:   {:.1} ms", report.avg_latency_ms);

    Ok(())
}
