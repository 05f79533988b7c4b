use crate::data::model::QuarterbackTable;
use crate::error::Result;

/// Label offset as a share of the x-range.
const LABEL_OFFSET_X: f64 = 0.01;
/// Label offset as a share of the y-range.
const LABEL_OFFSET_Y: f64 = 0.02;

// ---------------------------------------------------------------------------
// Figure data – what the plot layer draws
// ---------------------------------------------------------------------------

/// One bar per player, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct BarFigure {
    pub title: String,
    pub y_label: String,
    pub bars: Vec<(String, f64)>,
}

/// A scatter point and where its player label goes.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPoint {
    pub player: String,
    pub x: f64,
    pub y: f64,
    pub label: [f64; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<LabeledPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Bar(BarFigure),
    Scatter(ScatterFigure),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Figure::Bar(bar) => &bar.title,
            Figure::Scatter(scatter) => &scatter.title,
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Bar chart of `column` against player.
pub fn plot_bar(
    table: &QuarterbackTable,
    column: &str,
    title: &str,
    y_label: &str,
) -> Result<BarFigure> {
    let column = table.column(column)?;
    let bars = table
        .players()
        .map(str::to_string)
        .zip(table.values(column))
        .collect();
    Ok(BarFigure {
        title: title.to_string(),
        y_label: y_label.to_string(),
        bars,
    })
}

/// Scatter of `y_column` against `x_column`, each point labeled with its player.
pub fn plot_scatter(
    table: &QuarterbackTable,
    x_column: &str,
    y_column: &str,
    title: &str,
) -> Result<ScatterFigure> {
    let x_col = table.column(x_column)?;
    let y_col = table.column(y_column)?;
    let xs = table.values(x_col);
    let ys = table.values(y_col);
    let dx = label_offset(&xs, LABEL_OFFSET_X);
    let dy = label_offset(&ys, LABEL_OFFSET_Y);

    let points = table
        .players()
        .zip(xs.iter().zip(&ys))
        .map(|(player, (&x, &y))| LabeledPoint {
            player: player.to_string(),
            x,
            y,
            label: [x + dx, y + dy],
        })
        .collect();

    Ok(ScatterFigure {
        title: title.to_string(),
        x_label: x_col.name().to_string(),
        y_label: y_col.name().to_string(),
        points,
    })
}

/// `fraction` of the data range, or of the largest magnitude when all values are equal.
fn label_offset(values: &[f64], fraction: f64) -> f64 {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range.is_finite() && range > f64::EPSILON {
        range * fraction
    } else {
        let magnitude = values.iter().map(|v| v.abs()).fold(0.0, f64::max);
        magnitude.max(1.0) * fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::metrics::compute_metrics;
    use crate::data::model::QuarterbackRecord;
    use crate::error::QbError;

    fn top5() -> QuarterbackTable {
        compute_metrics(&QuarterbackTable::new(
            "top5",
            vec![
                QuarterbackRecord::new("A", 20.0, 200.0, 2.0, 65.0),
                QuarterbackRecord::new("B", 40.0, 300.0, 2.0, 75.0),
            ],
        ))
        .unwrap()
    }

    #[test]
    fn bars_follow_table_order() {
        let bar = plot_bar(&top5(), "YPA", "Top 5 QBs: Yards per Attempt", "Yards per Attempt")
            .unwrap();
        assert_eq!(
            bar.bars,
            vec![("A".to_string(), 10.0), ("B".to_string(), 7.5)]
        );
        assert_eq!(bar.y_label, "Yards per Attempt");
    }

    #[test]
    fn scatter_labels_sit_beside_points() {
        let scatter = plot_scatter(&top5(), "CompletionPct", "YPA", "YPA vs Completion %").unwrap();
        assert_eq!(scatter.x_label, "CompletionPct");
        assert_eq!(scatter.y_label, "YPA");

        let a = &scatter.points[0];
        assert_eq!((a.player.as_str(), a.x, a.y), ("A", 65.0, 10.0));
        // x range 10, y range 2.5
        assert!((a.label[0] - 65.1).abs() < 1e-9);
        assert!((a.label[1] - 10.05).abs() < 1e-9);
    }

    #[test]
    fn flat_series_still_gets_an_offset() {
        assert!((label_offset(&[0.05, 0.05], 0.02) - 0.02).abs() < 1e-12);
        assert!((label_offset(&[300.0, 300.0], 0.01) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn missing_columns_fail() {
        assert!(matches!(
            plot_bar(&top5(), "INT", "t", "y"),
            Err(QbError::ColumnNotFound { .. })
        ));
        assert!(matches!(
            plot_scatter(&top5(), "YPA", "Sacks", "t"),
            Err(QbError::ColumnNotFound { ref column, .. }) if column == "Sacks"
        ));
        assert!(matches!(
            plot_bar(&top5(), "Player", "t", "y"),
            Err(QbError::NonNumericColumn { .. })
        ));
    }
}
