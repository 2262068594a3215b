use anyhow::{Context, Result};
use std::path::PathBuf;
use veil_config::Config;
use veil_core::BlurLevel;
use veil_engine::ProcessRequest;

use super::build_processor;

pub async fn handle(config: &Config, path: PathBuf, mode: String, blur: i64) -> Result<()> {
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    let processor = build_processor(config).await?;
    let result = processor
        .process(ProcessRequest {
            filename,
            bytes,
            mode,
            blur_level: BlurLevel::from_level(blur),
        })
        .await?;

    let record = &result.record;
    println!("✓ Processed {}", record.original_filename);
    println!("  Mode: {} (applied {:?})", record.mode, result.applied);
    println!("  Blur: {}", record.blur_level);
    println!(
        "  Output: {}",
        processor.uploads().root().join(&record.processed_filename).display()
    );
    if let Some(counts) = result.counts {
        println!(
            "  Found: {} email(s), {} phone(s), {} card(s)",
            counts.email, counts.phone, counts.card
        );
    }
    if let Some(fallback) = &result.fallback {
        println!("  Note: {}", fallback);
    }

    Ok(())
}
