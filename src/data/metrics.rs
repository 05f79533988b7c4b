use super::model::{QuarterbackRecord, QuarterbackTable};
use crate::error::{QbError, Result};

// ---------------------------------------------------------------------------
// Derived efficiency columns
// ---------------------------------------------------------------------------

/// Return a copy of `table` with `YPA` and `TD_per_Att` set on every record.
///
/// Values are recomputed from the source columns, so running this on an
/// already-enriched table yields the same numbers. A record with zero
/// attempts fails the whole pass with [`QbError::ArithmeticUndefined`].
pub fn compute_metrics(table: &QuarterbackTable) -> Result<QuarterbackTable> {
    let records = table
        .records()
        .iter()
        .map(enrich)
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Computed YPA and TD_per_Att for {} players in {}", records.len(), table.name());
    Ok(QuarterbackTable::enriched(table.name(), records))
}

fn enrich(record: &QuarterbackRecord) -> Result<QuarterbackRecord> {
    if record.attempts == 0.0 {
        return Err(QbError::ArithmeticUndefined {
            player: record.player.clone(),
        });
    }
    Ok(QuarterbackRecord {
        ypa: Some(record.yards / record.attempts),
        td_per_att: Some(record.touchdowns / record.attempts),
        ..record.clone()
    })
}
