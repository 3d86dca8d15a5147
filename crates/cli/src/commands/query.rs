//! `deskrail query`: one message through the full support pipeline.

use deskrail_agent::SessionRegistry;
use deskrail_config::AppConfig;
use deskrail_core::SessionId;
use std::time::Instant;

pub async fn run(
    config: AppConfig,
    message: &str,
    session: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = SessionRegistry::from_config(&config)?;
    let session_id = session.map(SessionId::from).unwrap_or_default();

    let started = Instant::now();
    let result = registry.handle(&session_id, message).await?;
    let elapsed_ms = started.elapsed().as_millis();

    println!("{}", result.response);
    println!();
    println!("  session:    {session_id}");
    println!("  escalated:  {}", result.escalated);
    if let Some(reason) = &result.escalation_reason {
        println!("  reason:     {reason}");
    }
    println!("  confidence: {:.2}", result.confidence);
    println!("  latency:    {elapsed_ms} ms");

    Ok(())
}
