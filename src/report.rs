use std::io::Write;
use std::path::Path;

use crate::chart::{plot_bar, plot_scatter, Figure};
use crate::data::loader::load_file;
use crate::data::metrics::compute_metrics;
use crate::data::model::QuarterbackTable;
use crate::data::ranking::display_ranking;
use crate::error::Result;

/// Drake Maye and his peer group.
pub const PEERS_PATH: &str = "data/qb_stats.csv";
/// Drake Maye and the league's top five passers.
pub const TOP5_PATH: &str = "data/qb_stats_top5.csv";

/// Column and display title of each printed ranking.
pub const RANKINGS: [(&str, &str); 3] = [
    ("CompletionPct", "Completion Percentage"),
    ("YPA", "Yards per Attempt"),
    ("TD_per_Att", "Touchdowns per Attempt"),
];

pub enum ChartPlan {
    Bar {
        column: &'static str,
        title: &'static str,
        y_label: &'static str,
    },
    Scatter {
        x_column: &'static str,
        y_column: &'static str,
        title: &'static str,
    },
}

/// The charts drawn for the top-5 table, in display order.
pub const CHARTS: [ChartPlan; 5] = [
    ChartPlan::Bar {
        column: "CompletionPct",
        title: "Top 5 QBs: Completion Percentage",
        y_label: "Completion %",
    },
    ChartPlan::Bar {
        column: "YPA",
        title: "Top 5 QBs: Yards per Attempt",
        y_label: "Yards per Attempt",
    },
    ChartPlan::Bar {
        column: "Touchdowns",
        title: "Top 5 QBs: Total Passing Touchdowns",
        y_label: "Touchdowns",
    },
    ChartPlan::Scatter {
        x_column: "CompletionPct",
        y_column: "YPA",
        title: "Top 5 QBs: YPA vs Completion %",
    },
    ChartPlan::Scatter {
        x_column: "YPA",
        y_column: "TD_per_Att",
        title: "Top 5 QBs: TD per Attempt vs YPA",
    },
];

impl ChartPlan {
    pub fn build(&self, table: &QuarterbackTable) -> Result<Figure> {
        Ok(match *self {
            ChartPlan::Bar {
                column,
                title,
                y_label,
            } => Figure::Bar(plot_bar(table, column, title, y_label)?),
            ChartPlan::Scatter {
                x_column,
                y_column,
                title,
            } => Figure::Scatter(plot_scatter(table, x_column, y_column, title)?),
        })
    }
}

// ---------------------------------------------------------------------------
// Report – everything the run prints and draws
// ---------------------------------------------------------------------------

/// The two enriched tables and the figures built from them.
#[derive(Debug, Clone)]
pub struct Report {
    pub peers: QuarterbackTable,
    pub top5: QuarterbackTable,
    pub figures: Vec<Figure>,
}

impl Report {
    /// Load both sources and enrich them.
    pub fn load(peers_path: &Path, top5_path: &Path) -> Result<Self> {
        let peers = load_file(peers_path)?;
        let top5 = load_file(top5_path)?;
        Self::from_tables(&peers, &top5)
    }

    pub fn from_tables(peers: &QuarterbackTable, top5: &QuarterbackTable) -> Result<Self> {
        let peers = compute_metrics(peers)?;
        let top5 = compute_metrics(top5)?;
        let figures = CHARTS
            .iter()
            .map(|plan| plan.build(&top5))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            peers,
            top5,
            figures,
        })
    }

    /// Heading and table for each comparison group.
    pub fn groups(&self) -> [(&'static str, &QuarterbackTable); 2] {
        [
            ("Peer Group Comparison", &self.peers),
            ("Top 5 Quarterbacks Comparison", &self.top5),
        ]
    }

    /// Print the three rankings of each group.
    pub fn print_rankings(&self, out: &mut impl Write) -> Result<()> {
        for (i, (heading, table)) in self.groups().into_iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{heading}:")?;
            for (column, title) in RANKINGS {
                display_ranking(out, table, column, title)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::error::QbError;

    fn write_csv(dir: &TempDir, name: &str, rows: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Player,Attempts,Yards,Touchdowns,CompletionPct").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        path
    }

    fn sample() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let peers = write_csv(&dir, "peers.csv", &["A,20,200,2,65.0", "B,40,300,4,70.0"]);
        let top5 = write_csv(
            &dir,
            "top5.csv",
            &["A,20,200,2,65.0", "C,50,400,3,68.0", "D,25,275,1,62.0"],
        );
        (dir, peers, top5)
    }

    #[test]
    fn builds_all_five_figures() {
        let (_dir, peers, top5) = sample();
        let report = Report::load(&peers, &top5).unwrap();

        let titles: Vec<_> = report.figures.iter().map(Figure::title).collect();
        assert_eq!(
            titles,
            vec![
                "Top 5 QBs: Completion Percentage",
                "Top 5 QBs: Yards per Attempt",
                "Top 5 QBs: Total Passing Touchdowns",
                "Top 5 QBs: YPA vs Completion %",
                "Top 5 QBs: TD per Attempt vs YPA",
            ]
        );
        match &report.figures[4] {
            Figure::Scatter(s) => {
                assert_eq!((s.x_label.as_str(), s.y_label.as_str()), ("YPA", "TD_per_Att"));
                assert_eq!(s.points.len(), 3);
            }
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn prints_six_rankings_under_group_headings() {
        let (_dir, peers, top5) = sample();
        let report = Report::load(&peers, &top5).unwrap();
        let mut out = Vec::new();
        report.print_rankings(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Peer Group Comparison:\n\nRanking by Completion Percentage:"));
        assert!(text.contains("\n\nTop 5 Quarterbacks Comparison:\n"));
        assert_eq!(text.matches("Ranking by ").count(), 6);

        let peers_part = &text[..text.find("Top 5").unwrap()];
        let ypa = &peers_part[peers_part.find("Yards per Attempt").unwrap()..];
        // A: 10.0 YPA, B: 7.5 YPA
        assert!(ypa.find("A ").unwrap() < ypa.find("B ").unwrap());
    }

    #[test]
    fn zero_attempts_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let peers = write_csv(&dir, "peers.csv", &["A,20,200,2,65.0"]);
        let top5 = write_csv(&dir, "top5.csv", &["Backup,0,0,0,0.0"]);
        let err = Report::load(&peers, &top5).unwrap_err();
        assert!(matches!(err, QbError::ArithmeticUndefined { .. }));
    }

    #[test]
    fn missing_source_stops_the_run() {
        let (dir, peers, _) = sample();
        let err = Report::load(&peers, &dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, QbError::DataSource { .. }));
    }
}
