use crate::models::StatTable;
use crate::utils::sql::insert_statement;
use anyhow::{Context, Result};
use std::path::Path;

/// Save a collected table to a JSON cache file
pub fn save_to_cache(table: &StatTable, cache_file: impl AsRef<Path>) -> Result<()> {
    let cache_file = cache_file.as_ref();
    if let Some(dir) = cache_file.parent() {
        std::fs::create_dir_all(dir).context("Failed to create cache directory")?;
    }
    let json = serde_json::to_string_pretty(table).context("Failed to serialize stats table")?;
    std::fs::write(cache_file, json).context("Failed to write cache file")?;
    Ok(())
}

/// Load a table previously written by [`save_to_cache`]
pub fn load_from_cache(cache_file: impl AsRef<Path>) -> Result<StatTable> {
    let json = std::fs::read_to_string(cache_file).context("Failed to read cache file")?;
    let table: StatTable =
        serde_json::from_str(&json).context("Failed to deserialize stats table")?;
    Ok(table)
}

/// Save a table to CSV, one header row plus one row per record
pub fn save_to_csv(table: &StatTable, filename: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(filename).context("Failed to create CSV file")?;

    writer.write_record(table.shape.column_names())?;
    for record in &table.records {
        writer.write_record(&record.values)?;
    }
    writer.flush()?;

    Ok(())
}

/// Write the table as a single INSERT statement
pub fn save_to_sql(table: &StatTable, table_name: &str, filename: impl AsRef<Path>) -> Result<()> {
    let sql = insert_statement(table_name, &table.records)
        .context("Failed to render SQL")?
        .unwrap_or_default();
    std::fs::write(filename, sql).context("Failed to write SQL file")?;
    Ok(())
}
