use std::io::Write;

use super::model::{Column, QuarterbackTable, PLAYER};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Ranking – a sorted view over a table
// ---------------------------------------------------------------------------

/// One line of a ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankEntry<'a> {
    pub player: &'a str,
    pub value: f64,
}

/// Records ordered by one column, highest first. The table itself is not reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<'a> {
    pub column: Column,
    pub entries: Vec<RankEntry<'a>>,
}

/// Sort `table` by `column`, descending. Equal values keep their row order.
pub fn rank<'a>(table: &'a QuarterbackTable, column: &str) -> Result<Ranking<'a>> {
    let column = table.column(column)?;
    let mut entries: Vec<RankEntry<'a>> = table
        .records()
        .iter()
        .map(|r| RankEntry {
            player: &r.player,
            value: r.value(column).unwrap_or(f64::NAN),
        })
        .collect();
    // sort_by is stable
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    Ok(Ranking { column, entries })
}

/// Counts print as integers when integral; ratios and percentages with four decimals.
pub fn format_value(column: Column, value: f64) -> String {
    if column.is_count() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}

/// Print `table` ranked by `column` under a `Ranking by {title}:` header.
pub fn display_ranking(
    out: &mut impl Write,
    table: &QuarterbackTable,
    column: &str,
    title: &str,
) -> Result<()> {
    let ranking = rank(table, column)?;
    let rows: Vec<(&str, String)> = ranking
        .entries
        .iter()
        .map(|e| (e.player, format_value(ranking.column, e.value)))
        .collect();

    let player_width = rows
        .iter()
        .map(|(p, _)| p.chars().count())
        .chain([PLAYER.len()])
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, v)| v.len())
        .chain([ranking.column.name().len()])
        .max()
        .unwrap_or(0);

    writeln!(out, "\nRanking by {title}:\n")?;
    writeln!(
        out,
        "{PLAYER:<player_width$}  {:>value_width$}",
        ranking.column.name()
    )?;
    for (player, value) in &rows {
        writeln!(out, "{player:<player_width$}  {value:>value_width$}")?;
    }
    Ok(())
}
