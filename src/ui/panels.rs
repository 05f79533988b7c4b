use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::QuarterbackTable;
use crate::data::ranking::{format_value, rank};
use crate::report::RANKINGS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – rankings
// ---------------------------------------------------------------------------

/// Render the left ranking panel: three rankings per comparison group.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Rankings");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (heading, table) in state.report.groups() {
                ui.strong(heading);
                for (column, title) in RANKINGS {
                    egui::CollapsingHeader::new(RichText::new(title).strong())
                        .id_salt((heading, column))
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            ranking_grid(ui, state, table, column);
                        });
                }
                ui.separator();
            }
        });
}

fn ranking_grid(ui: &mut Ui, state: &AppState, table: &QuarterbackTable, column: &str) {
    let ranking = match rank(table, column) {
        Ok(ranking) => ranking,
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
            return;
        }
    };

    egui::Grid::new((table.name(), column))
        .striped(true)
        .num_columns(3)
        .show(ui, |ui: &mut Ui| {
            ui.strong("#");
            ui.strong("Player");
            ui.strong(ranking.column.name());
            ui.end_row();

            for (place, entry) in ranking.entries.iter().enumerate() {
                ui.label((place + 1).to_string());
                ui.label(RichText::new(entry.player).color(state.colors.color_for(entry.player)));
                ui.label(format_value(ranking.column, entry.value));
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the chart selector.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let titles: Vec<String> = state
            .report
            .figures
            .iter()
            .map(|f| f.title().to_string())
            .collect();

        for (i, title) in titles.iter().enumerate() {
            let short = title.strip_prefix("Top 5 QBs: ").unwrap_or(title);
            if ui.selectable_label(state.selected == i, short).clicked() {
                state.select(i);
            }
        }

        ui.separator();

        ui.label(format!(
            "{} peers, {} top-5 players  ·  ← / → to switch charts",
            state.report.peers.len(),
            state.report.top5.len()
        ));
    });
}
