//! Tab-separated state-name table parsing.

use incident_map_incident_models::{ResourceKind, StateNameTable};

use crate::SourceError;

/// Parses a TSV document with `id` and `name` columns into a
/// [`StateNameTable`].
///
/// Extra columns are ignored. Rows with an empty id are skipped.
///
/// # Errors
///
/// Returns [`SourceError::InvalidInput`] if the header lacks an `id` or
/// `name` column, or [`SourceError::Csv`] if the document is malformed.
pub fn parse_state_names(text: &str) -> Result<StateNameTable, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SourceError::InvalidInput {
                resource: ResourceKind::StateNames,
                message: format!("missing '{name}' column in header"),
            })
    };
    let id_col = column("id")?;
    let name_col = column("name")?;

    let mut table = StateNameTable::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let id = row.get(id_col).unwrap_or_default();
        if id.is_empty() {
            log::warn!("Skipping state-name row {} with empty id", i + 2);
            continue;
        }
        table.insert(id, row.get(name_col).unwrap_or_default());
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_id_and_name_columns() {
        let tsv = "id\tname\n1\tAlabama\n2\tAlaska\n6\tCalifornia\n";
        let table = parse_state_names(tsv).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.resolve("06"), Some("California"));
        assert_eq!(table.resolve("1"), Some("Alabama"));
    }

    #[test]
    fn ignores_extra_columns_and_order() {
        let tsv = "name\tcode\tid\nTexas\tTX\t48\n";
        let table = parse_state_names(tsv).unwrap();
        assert_eq!(table.resolve("48"), Some("Texas"));
    }

    #[test]
    fn skips_rows_without_id() {
        let tsv = "id\tname\n\tNowhere\n56\tWyoming\n";
        let table = parse_state_names(tsv).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_column_is_invalid_input() {
        let err = parse_state_names("code\tname\n1\tAlabama\n").unwrap_err();
        assert!(matches!(
            err,
            SourceError::InvalidInput {
                resource: ResourceKind::StateNames,
                ..
            }
        ));
    }
}
