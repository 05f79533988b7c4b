use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Column, QuarterbackRecord, QuarterbackTable, PLAYER};
use crate::error::{QbError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a quarterback table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma-separated, header row
/// * `.tsv`     – tab-separated, header row
/// * `.json`    – `[{ "Player": "...", "Attempts": 412, ... }, ...]`
/// * `.parquet` – string `Player` column, integer or float stat columns
///
/// Columns beyond `Player`, `Attempts`, `Yards`, `Touchdowns` and
/// `CompletionPct` are ignored.
pub fn load_file(path: &Path) -> Result<QuarterbackTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        _ => {
            return Err(QbError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: ext,
            })
        }
    };

    if table.is_empty() {
        log::warn!("{} contains no players", path.display());
    } else {
        log::info!(
            "Loaded {} players from {} with columns {:?}",
            table.len(),
            path.display(),
            table.column_names()
        );
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Row assembly shared by all formats
// ---------------------------------------------------------------------------

/// Collects validated rows for one source, rejecting repeated players.
struct TableBuilder<'a> {
    path: &'a Path,
    records: Vec<QuarterbackRecord>,
    seen: HashSet<String>,
}

impl<'a> TableBuilder<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            records: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn invalid(&self, row: usize, column: &str, value: impl Into<String>) -> QbError {
        QbError::InvalidValue {
            path: self.path.to_path_buf(),
            row,
            column: column.to_string(),
            value: value.into(),
        }
    }

    fn player(&self, row: usize, raw: &str) -> Result<String> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(self.invalid(row, PLAYER, raw));
        }
        Ok(name.to_string())
    }

    /// Check a stat value: finite, and non-negative for counts.
    fn stat(&self, row: usize, column: Column, value: f64, raw: &str) -> Result<f64> {
        if !value.is_finite() || (column.is_count() && value < 0.0) {
            return Err(self.invalid(row, column.name(), raw));
        }
        // -0 would sort below 0 and print as "-0"
        Ok(value + 0.0)
    }

    /// Parse a text cell into a stat value.
    fn text_stat(&self, row: usize, column: Column, raw: &str) -> Result<f64> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| self.invalid(row, column.name(), raw))?;
        self.stat(row, column, value, raw)
    }

    /// `stats` is in `Column::SOURCE` order.
    fn push(&mut self, player: String, stats: [f64; 4]) -> Result<()> {
        if !self.seen.insert(player.clone()) {
            return Err(QbError::DuplicatePlayer {
                path: self.path.to_path_buf(),
                player,
            });
        }
        let [attempts, yards, touchdowns, completion_pct] = stats;
        self.records.push(QuarterbackRecord::new(
            player,
            attempts,
            yards,
            touchdowns,
            completion_pct,
        ));
        Ok(())
    }

    fn finish(self) -> QuarterbackTable {
        QuarterbackTable::new(self.path.display().to_string(), self.records)
    }
}

fn data_source_error(
    path: &Path,
    source: impl std::error::Error + Send + Sync + 'static,
) -> QbError {
    QbError::DataSource {
        path: path.to_path_buf(),
        source: Box::new(source),
    }
}

fn missing_column(path: &Path, column: &str) -> QbError {
    QbError::Schema {
        path: path.to_path_buf(),
        column: column.to_string(),
    }
}

fn log_ignored_columns<'h>(path: &Path, headers: impl IntoIterator<Item = &'h str>) {
    let ignored: Vec<&str> = headers
        .into_iter()
        .filter(|h| *h != PLAYER && Column::from_name(h).is_none())
        .collect();
    if !ignored.is_empty() {
        log::debug!("{}: ignoring columns {ignored:?}", path.display());
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names, one player per line.
/// Rows are numbered from 1, the first line after the header.
fn load_delimited(path: &Path, delimiter: u8) -> Result<QuarterbackTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| data_source_error(path, e))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| data_source_error(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| missing_column(path, name))
    };
    let player_idx = position(PLAYER)?;
    let stat_idx = [
        position(Column::Attempts.name())?,
        position(Column::Yards.name())?,
        position(Column::Touchdowns.name())?,
        position(Column::CompletionPct.name())?,
    ];
    log_ignored_columns(path, headers.iter().map(String::as_str));

    let mut builder = TableBuilder::new(path);

    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| data_source_error(path, e))?;

        let player = builder.player(row, record.get(player_idx).unwrap_or(""))?;
        let mut stats = [0.0; 4];
        for ((slot, &idx), column) in stats.iter_mut().zip(&stat_idx).zip(Column::SOURCE) {
            *slot = builder.text_stat(row, column, record.get(idx).unwrap_or(""))?;
        }
        builder.push(player, stats)?;
    }

    Ok(builder.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Player": "Drake Maye", "Attempts": 412, "Yards": 3120,
///     "Touchdowns": 21, "CompletionPct": 70.6 },
///   ...
/// ]
/// ```
///
/// Numbers may also be given as numeric strings.
fn load_json(path: &Path) -> Result<QuarterbackTable> {
    let text = std::fs::read_to_string(path).map_err(|e| data_source_error(path, e))?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|e| data_source_error(path, e))?;

    let records = root.as_array().ok_or_else(|| QbError::InvalidValue {
        path: path.to_path_buf(),
        row: 0,
        column: "<root>".to_string(),
        value: "expected a top-level JSON array".to_string(),
    })?;

    let mut builder = TableBuilder::new(path);
    let mut keys = BTreeSet::new();

    for (i, rec) in records.iter().enumerate() {
        let row = i + 1;
        let obj = rec
            .as_object()
            .ok_or_else(|| builder.invalid(row, "<row>", rec.to_string()))?;
        keys.extend(obj.keys().cloned());

        let player = match obj.get(PLAYER) {
            Some(JsonValue::String(s)) => builder.player(row, s)?,
            Some(other) => return Err(builder.invalid(row, PLAYER, other.to_string())),
            None => return Err(missing_column(path, PLAYER)),
        };

        let mut stats = [0.0; 4];
        for (slot, column) in stats.iter_mut().zip(Column::SOURCE) {
            *slot = match obj.get(column.name()) {
                Some(JsonValue::Number(n)) => {
                    let raw = n.to_string();
                    let value = n
                        .as_f64()
                        .ok_or_else(|| builder.invalid(row, column.name(), raw.clone()))?;
                    builder.stat(row, column, value, &raw)?
                }
                Some(JsonValue::String(s)) => builder.text_stat(row, column, s)?,
                Some(other) => return Err(builder.invalid(row, column.name(), other.to_string())),
                None => return Err(missing_column(path, column.name())),
            };
        }
        builder.push(player, stats)?;
    }

    log_ignored_columns(path, keys.iter().map(String::as_str));
    Ok(builder.finish())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of quarterback stats.
///
/// Expected schema:
/// - `Player`: Utf8 or LargeUtf8
/// - `Attempts`, `Yards`, `Touchdowns`, `CompletionPct`: any integer or float type
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<QuarterbackTable> {
    let file = std::fs::File::open(path).map_err(|e| data_source_error(path, e))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).map_err(|e| data_source_error(path, e))?;

    // A file without rows yields no batches, so check the schema up front.
    let file_schema = builder.schema();
    for name in std::iter::once(PLAYER).chain(Column::SOURCE.iter().map(|c| c.name())) {
        if file_schema.index_of(name).is_err() {
            return Err(missing_column(path, name));
        }
    }

    let reader = builder.build().map_err(|e| data_source_error(path, e))?;

    let mut table = TableBuilder::new(path);
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.map_err(|e| data_source_error(path, e))?;
        let schema = batch.schema();

        let column_at = |name: &str| -> Result<ArrayRef> {
            let idx = schema
                .index_of(name)
                .map_err(|_| missing_column(path, name))?;
            Ok(batch.column(idx).clone())
        };

        let players = cast(&column_at(PLAYER)?, &DataType::Utf8)
            .map_err(|e| data_source_error(path, e))?;
        let players = players.as_string::<i32>();

        let mut stat_columns = Vec::with_capacity(Column::SOURCE.len());
        for column in Column::SOURCE {
            let array = column_at(column.name())?;
            if !array.data_type().is_numeric() {
                return Err(table.invalid(
                    row_offset + 1,
                    column.name(),
                    format!("{:?} column", array.data_type()),
                ));
            }
            let floats = cast(&array, &DataType::Float64).map_err(|e| data_source_error(path, e))?;
            stat_columns.push(floats);
        }
        if row_offset == 0 {
            log_ignored_columns(path, schema.fields().iter().map(|f| f.name().as_str()));
        }

        for i in 0..batch.num_rows() {
            let row = row_offset + i + 1;
            if players.is_null(i) {
                return Err(table.invalid(row, PLAYER, "null"));
            }
            let player = table.player(row, players.value(i))?;

            let mut stats = [0.0; 4];
            for ((slot, array), column) in stats.iter_mut().zip(&stat_columns).zip(Column::SOURCE)
            {
                if array.is_null(i) {
                    return Err(table.invalid(row, column.name(), "null"));
                }
                let value = array.as_primitive::<Float64Type>().value(i);
                *slot = table.stat(row, column, value, &value.to_string())?;
            }
            table.push(player, stats)?;
        }
        row_offset += batch.num_rows();
    }

    Ok(table.finish())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    use super::*;

    const HEADER: &str = "Player,Attempts,Yards,Touchdowns,CompletionPct";

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        write!(file, "{contents}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn csv_rows_keep_source_order() {
        let file = write_temp(
            ".csv",
            &format!("{HEADER}\nZed,100,800,5,61.5\nAmy,200,1500,12,68.0\n"),
        );
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.players().collect::<Vec<_>>(), vec!["Zed", "Amy"]);
        let amy = &table.records()[1];
        assert_eq!(amy.attempts, 200.0);
        assert_eq!(amy.yards, 1500.0);
        assert_eq!(amy.touchdowns, 12.0);
        assert_eq!(amy.completion_pct, 68.0);
        assert!(!table.has_metrics());
    }

    #[test]
    fn extra_columns_are_dropped_and_order_is_irrelevant() {
        let file = write_temp(
            ".csv",
            "Team,CompletionPct,Touchdowns,Player,Yards,Attempts,INT\nNE,70.5,21,Drake Maye,3120,412,7\n",
        );
        let table = load_file(file.path()).unwrap();

        assert_eq!(
            table.column_names(),
            vec!["Player", "Attempts", "Yards", "Touchdowns", "CompletionPct"]
        );
        assert_eq!(
            table.records()[0],
            QuarterbackRecord::new("Drake Maye", 412.0, 3120.0, 21.0, 70.5)
        );
    }

    #[test]
    fn tsv_uses_tab_delimiter() {
        let file = write_temp(
            ".tsv",
            "Player\tAttempts\tYards\tTouchdowns\tCompletionPct\nA\t20\t200\t2\t65.0\n",
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.records()[0].yards, 200.0);
    }

    #[test]
    fn missing_file_is_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, QbError::DataSource { .. }));
    }

    #[test]
    fn missing_column_is_schema_error() {
        let file = write_temp(".csv", "Player,Attempts,Yards,CompletionPct\nA,20,200,65.0\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, QbError::Schema { ref column, .. } if column == "Touchdowns"));
    }

    #[test]
    fn non_numeric_cell_is_rejected() {
        let file = write_temp(".csv", &format!("{HEADER}\nA,20,lots,2,65.0\n"));
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            QbError::InvalidValue { row: 1, ref column, ref value, .. }
                if column == "Yards" && value == "lots"
        ));
    }

    #[test]
    fn negative_count_is_rejected() {
        let file = write_temp(".csv", &format!("{HEADER}\nA,20,200,2,65.0\nB,-3,10,0,50.0\n"));
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            QbError::InvalidValue { row: 2, ref column, .. } if column == "Attempts"
        ));
    }

    #[test]
    fn negative_zero_reads_as_zero() {
        let file = write_temp(".csv", &format!("{HEADER}\nA,20,200,-0,65.0\n"));
        let table = load_file(file.path()).unwrap();
        let touchdowns = table.records()[0].touchdowns;
        assert_eq!(touchdowns, 0.0);
        assert!(touchdowns.is_sign_positive());
    }

    #[test]
    fn duplicate_player_is_rejected() {
        let file = write_temp(".csv", &format!("{HEADER}\nA,20,200,2,65.0\nA,30,300,3,66.0\n"));
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, QbError::DuplicatePlayer { ref player, .. } if player == "A"));
    }

    #[test]
    fn header_only_file_gives_empty_table() {
        let file = write_temp(".csv", &format!("{HEADER}\n"));
        assert!(load_file(file.path()).unwrap().is_empty());
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, QbError::UnsupportedFormat { ref extension, .. } if extension == "xlsx"));
    }

    #[test]
    fn json_records() {
        let file = write_temp(
            ".json",
            r#"[
                {"Player": "A", "Attempts": 20, "Yards": 200, "Touchdowns": 2, "CompletionPct": 65.0},
                {"Player": "B", "Attempts": "30", "Yards": 240, "Touchdowns": 1, "CompletionPct": 70.0, "Team": "NE"}
            ]"#,
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.players().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(table.records()[1].attempts, 30.0);
    }

    #[test]
    fn json_missing_key_is_schema_error() {
        let file = write_temp(
            ".json",
            r#"[{"Player": "A", "Attempts": 20, "Yards": 200, "CompletionPct": 65.0}]"#,
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, QbError::Schema { ref column, .. } if column == "Touchdowns"));
    }

    #[test]
    fn empty_parquet_still_needs_required_columns() {
        let schema = Arc::new(Schema::new(vec![Field::new("Name", DataType::Utf8, false)]));
        let file = NamedTempFile::with_suffix(".parquet").unwrap();
        let writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.close().unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, QbError::Schema { ref column, .. } if column == "Player"));
    }

    #[test]
    fn parquet_with_mixed_numeric_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Player", DataType::Utf8, false),
            Field::new("Attempts", DataType::Int64, false),
            Field::new("Yards", DataType::Int64, false),
            Field::new("Touchdowns", DataType::Int64, false),
            Field::new("CompletionPct", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(Int64Array::from(vec![20, 30])),
                Arc::new(Int64Array::from(vec![200, 240])),
                Arc::new(Int64Array::from(vec![2, 1])),
                Arc::new(Float64Array::from(vec![65.0, 70.0])),
            ],
        )
        .unwrap();

        let file = NamedTempFile::with_suffix(".parquet").unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(
            table.records(),
            &[
                QuarterbackRecord::new("A", 20.0, 200.0, 2.0, 65.0),
                QuarterbackRecord::new("B", 30.0, 240.0, 1.0, 70.0),
            ]
        );
    }
}
