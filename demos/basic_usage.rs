//! Basic usage example for pretty_logger_system
//!
//! Run with: cargo run --example basic_usage

use pretty_logger_system::handlers::ChannelHandler;
use pretty_logger_system::prelude::*;
use pretty_logger_system::{info, warning};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
#[error("quota exceeded for {0}")]
struct QuotaError(String);

fn main() -> Result<()> {
    println!("=== Pretty Logger System - Basic Usage ===\n");

    // Shared logger from the process-wide registry
    let logger = get_logger(Some("demo"));

    println!("1. Plain messages:");
    logger.debug("Debug message");
    logger.info("Application started");
    info!(logger, "Listening on port", 8080);
    warning!(logger, "Retry attempt", 3, "of", 5);

    println!("\n2. Structured values:");
    info!(
        logger,
        "Loaded config:",
        json!({"workers": 4, "features": ["cache", "metrics"], "debug": false})
    );
    logger.json(
        json!({"user": {"id": 42, "roles": ["admin"]}}),
        Some("session"),
        Severity::Info,
    );

    println!("\n3. Handlers:");
    let dir = std::env::temp_dir().join("pretty_logger_demo");
    std::fs::create_dir_all(&dir)?;
    let log_path = dir.join("demo.log");
    logger.add_file(&log_path);

    let (handler, records) = ChannelHandler::unbounded();
    logger.attach(Arc::new(handler));
    logger.error("Written to console, file and channel");
    if let Ok(record) = records.try_recv() {
        println!("   channel received: {}", record.message.trim_end());
    }
    println!("   file: {}", log_path.display());

    println!("\n4. Errors:");
    logger.exception(&QuotaError("tenant-7".into()), vec!["Upload rejected".into()]);

    println!("\n5. Call tracing:");
    let upload = instrument(Arc::clone(&logger), "upload", |(tenant, bytes): (&str, u64)| {
        if bytes > 1024 {
            Err(QuotaError(tenant.to_string()))
        } else {
            Ok(bytes)
        }
    });
    let _ = upload(("tenant-1", 512));
    let _ = upload(("tenant-7", 4096));

    println!("\n6. Metrics:");
    let metrics = logger.metrics();
    println!("   emitted: {}", metrics.emitted());
    println!("   suppressed: {}", metrics.suppressed());
    println!("   dispatched: {}", metrics.dispatched());

    logger.flush()?;
    println!("\n=== Example completed successfully ===");
    Ok(())
}
