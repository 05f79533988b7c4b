use crate::chart::Figure;
use crate::color::PlayerColors;
use crate::report::Report;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Enriched tables and built figures; read-only once the window opens.
    pub report: Report,

    /// Index into `report.figures` of the chart on screen.
    pub selected: usize,

    /// Hue per player across both tables.
    pub colors: PlayerColors,
}

impl AppState {
    pub fn new(report: Report) -> Self {
        let colors = PlayerColors::new(report.peers.players().chain(report.top5.players()));
        Self {
            report,
            selected: 0,
            colors,
        }
    }

    pub fn selected_figure(&self) -> Option<&Figure> {
        self.report.figures.get(self.selected)
    }

    pub fn select(&mut self, index: usize) {
        if index < self.report.figures.len() {
            self.selected = index;
        }
    }

    /// Step to the next chart, wrapping around.
    pub fn next(&mut self) {
        let n = self.report.figures.len();
        if n > 0 {
            self.selected = (self.selected + 1) % n;
        }
    }

    /// Step to the previous chart, wrapping around.
    pub fn previous(&mut self) {
        let n = self.report.figures.len();
        if n > 0 {
            self.selected = (self.selected + n - 1) % n;
        }
    }
}
