use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::chart::{BarFigure, Figure, ScatterFigure};
use crate::color::{PlayerColors, BAR_COLOR, POINT_COLOR};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected chart in the central panel.
pub fn figure_plot(ui: &mut Ui, state: &AppState) {
    let Some(figure) = state.selected_figure() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No charts to show");
        });
        return;
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(figure.title());
    });
    ui.add_space(4.0);

    match figure {
        Figure::Bar(bar) => bar_plot(ui, bar),
        Figure::Scatter(scatter) => scatter_plot(ui, scatter, &state.colors),
    }
}

/// Bars sit at x = 0, 1, 2, … and the x-axis prints player names at those marks.
fn bar_plot(ui: &mut Ui, figure: &BarFigure) {
    let players: Vec<String> = figure.bars.iter().map(|(p, _)| p.clone()).collect();

    let bars: Vec<Bar> = figure
        .bars
        .iter()
        .enumerate()
        .map(|(i, (player, value))| {
            Bar::new(i as f64, *value)
                .name(player)
                .fill(BAR_COLOR)
                .width(0.6)
        })
        .collect();

    Plot::new(("bar_plot", &figure.title))
        .y_axis_label(figure.y_label.as_str())
        .x_axis_formatter(move |mark, _range| category_label(&players, mark.value))
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name(&figure.y_label));
        });
}

/// Name of the bar at `x`, blank between bars.
fn category_label(players: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    players.get(index as usize).cloned().unwrap_or_default()
}

fn scatter_plot(ui: &mut Ui, figure: &ScatterFigure, colors: &PlayerColors) {
    let points: PlotPoints = figure.points.iter().map(|p| [p.x, p.y]).collect();

    Plot::new(("scatter_plot", &figure.title))
        .legend(Legend::default())
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .radius(6.0)
                    .color(POINT_COLOR)
                    .name(format!("{} vs {}", figure.y_label, figure.x_label)),
            );

            for p in &figure.points {
                let label = RichText::new(&p.player).color(colors.color_for(&p.player));
                plot_ui.text(
                    Text::new(PlotPoint::new(p.label[0], p.label[1]), label)
                        .anchor(Align2::LEFT_BOTTOM),
                );
            }
        });
}
