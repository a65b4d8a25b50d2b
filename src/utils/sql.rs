use crate::error::Result;
use crate::models::{ColumnKind, StatRecord};
use crate::utils::date::normalize_date;

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Render a record as a SQL value tuple, e.g. `('GSW','OKC','2018-10-16','W',240,...,'2018-2019')`.
///
/// Text columns are single quoted (embedded quotes doubled), date columns are
/// normalized to `YYYY-MM-DD` first, numeric columns are emitted verbatim.
pub fn to_sql_tuple(record: &StatRecord) -> Result<String> {
    let values = record
        .fields()
        .map(|(column, value)| match column.kind {
            ColumnKind::Text => Ok(quote(value)),
            ColumnKind::Date => normalize_date(value).map(|d| quote(&d)),
            ColumnKind::Numeric => Ok(value.to_string()),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(format!("({})", values.join(",")))
}

/// Build one multi-row INSERT statement; `None` when there is nothing to insert
pub fn insert_statement(table_name: &str, records: &[StatRecord]) -> Result<Option<String>> {
    let Some(first) = records.first() else {
        return Ok(None);
    };

    let columns = first
        .shape
        .column_names()
        .iter()
        .map(|name| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(",");

    let tuples = records
        .iter()
        .map(to_sql_tuple)
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(format!(
        "INSERT INTO {} ({}) VALUES\n{};",
        table_name,
        columns,
        tuples.join(",\n")
    )))
}
