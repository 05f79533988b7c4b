use std::fmt;

use crate::error::{QbError, Result};

/// Header text of the identifier column.
pub const PLAYER: &str = "Player";

// ---------------------------------------------------------------------------
// Column – the numeric columns of a quarterback table
// ---------------------------------------------------------------------------

/// A numeric column, named exactly as in the source header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Attempts,
    Yards,
    Touchdowns,
    CompletionPct,
    /// Yards per attempt (derived).
    Ypa,
    /// Touchdowns per attempt (derived).
    TdPerAtt,
}

impl Column {
    /// Numeric columns every input source must supply.
    pub const SOURCE: [Column; 4] = [
        Column::Attempts,
        Column::Yards,
        Column::Touchdowns,
        Column::CompletionPct,
    ];

    /// Columns appended by the metrics pass.
    pub const DERIVED: [Column; 2] = [Column::Ypa, Column::TdPerAtt];

    pub const fn name(self) -> &'static str {
        match self {
            Column::Attempts => "Attempts",
            Column::Yards => "Yards",
            Column::Touchdowns => "Touchdowns",
            Column::CompletionPct => "CompletionPct",
            Column::Ypa => "YPA",
            Column::TdPerAtt => "TD_per_Att",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::SOURCE
            .into_iter()
            .chain(Self::DERIVED)
            .find(|c| c.name() == name)
    }

    pub const fn is_derived(self) -> bool {
        matches!(self, Column::Ypa | Column::TdPerAtt)
    }

    /// Counts must never be negative.
    pub const fn is_count(self) -> bool {
        matches!(self, Column::Attempts | Column::Yards | Column::Touchdowns)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// QuarterbackRecord – one row of a table
// ---------------------------------------------------------------------------

/// One player's season line.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterbackRecord {
    pub player: String,
    pub attempts: f64,
    pub yards: f64,
    pub touchdowns: f64,
    pub completion_pct: f64,
    /// Set by the metrics pass.
    pub ypa: Option<f64>,
    /// Set by the metrics pass.
    pub td_per_att: Option<f64>,
}

impl QuarterbackRecord {
    pub fn new(
        player: impl Into<String>,
        attempts: f64,
        yards: f64,
        touchdowns: f64,
        completion_pct: f64,
    ) -> Self {
        Self {
            player: player.into(),
            attempts,
            yards,
            touchdowns,
            completion_pct,
            ypa: None,
            td_per_att: None,
        }
    }

    /// Value of a numeric column, `None` for a derived column not yet computed.
    pub fn value(&self, column: Column) -> Option<f64> {
        match column {
            Column::Attempts => Some(self.attempts),
            Column::Yards => Some(self.yards),
            Column::Touchdowns => Some(self.touchdowns),
            Column::CompletionPct => Some(self.completion_pct),
            Column::Ypa => self.ypa,
            Column::TdPerAtt => self.td_per_att,
        }
    }
}

// ---------------------------------------------------------------------------
// QuarterbackTable – an ordered, uniformly-schemed set of records
// ---------------------------------------------------------------------------

/// Records in source order plus the name of the source they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterbackTable {
    name: String,
    records: Vec<QuarterbackRecord>,
    has_metrics: bool,
}

impl QuarterbackTable {
    /// A freshly loaded table: source columns only.
    pub fn new(name: impl Into<String>, records: Vec<QuarterbackRecord>) -> Self {
        Self {
            name: name.into(),
            records,
            has_metrics: false,
        }
    }

    /// A table whose records all carry the derived columns.
    pub(super) fn enriched(name: impl Into<String>, records: Vec<QuarterbackRecord>) -> Self {
        Self {
            name: name.into(),
            records,
            has_metrics: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[QuarterbackRecord] {
        &self.records
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.player.as_str())
    }

    pub fn has_metrics(&self) -> bool {
        self.has_metrics
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<&'static str> {
        let mut names = vec![PLAYER];
        names.extend(Column::SOURCE.iter().map(|c| c.name()));
        if self.has_metrics() {
            names.extend(Column::DERIVED.iter().map(|c| c.name()));
        }
        names
    }

    /// Resolve a column name against this table's schema.
    pub fn column(&self, name: &str) -> Result<Column> {
        if name == PLAYER {
            return Err(QbError::NonNumericColumn {
                table: self.name.clone(),
                column: name.to_string(),
            });
        }
        match Column::from_name(name) {
            Some(column) if !column.is_derived() || self.has_metrics() => Ok(column),
            _ => Err(QbError::ColumnNotFound {
                table: self.name.clone(),
                column: name.to_string(),
            }),
        }
    }

    /// Column values in row order.
    pub fn values(&self, column: Column) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.value(column).unwrap_or(f64::NAN))
            .collect()
    }
}
