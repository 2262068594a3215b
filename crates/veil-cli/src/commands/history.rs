use anyhow::Result;
use veil_config::Config;
use veil_core::HISTORY_LIMIT;
use veil_storage::HistoryStore;

pub async fn handle(config: &Config, limit: u32) -> Result<()> {
    let history = HistoryStore::new(&config.storage.db_path()).await?;
    let records = history.recent(limit.min(HISTORY_LIMIT)).await?;

    if records.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    for record in records {
        let counts = match record.counts() {
            Some(c) => format!("emails={} phones={} cards={}", c.email, c.phone, c.card),
            None => "-".to_string(),
        };
        println!(
            "{}  {} -> {}  [{} blur={}] {}",
            record.created_at,
            record.original_filename,
            record.processed_filename,
            record.mode,
            record.blur_level,
            counts
        );
    }

    Ok(())
}
