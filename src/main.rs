mod app;
mod chart;
mod color;
mod data;
mod error;
mod report;
mod state;
mod ui;

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use app::QbPandaApp;
use eframe::egui;
use report::{Report, PEERS_PATH, TOP5_PATH};

fn main() -> ExitCode {
    env_logger::init();

    exit_code(run())
}

/// Report a failed run once, through the logger, and turn it into a status.
fn exit_code(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let report = Report::load(Path::new(PEERS_PATH), Path::new(TOP5_PATH))
        .context("preparing quarterback report")?;

    {
        let mut out = io::stdout().lock();
        report.print_rankings(&mut out).context("printing rankings")?;
        out.flush().context("printing rankings")?;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "QB Panda – Quarterback Comparison",
        options,
        Box::new(|_cc| Ok(Box::new(QbPandaApp::new(report)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running chart window")
}
