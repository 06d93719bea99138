#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod config;
mod error;
mod gui;
mod languages;
mod playback;
mod session;
mod storage;

use eframe::egui;

use config::load_config;
use gui::TalkboxApp;

pub const WINDOW_WIDTH: f32 = 600.0;
pub const WINDOW_HEIGHT: f32 = 420.0;

fn main() -> eframe::Result {
    let initial_config = load_config();

    let viewport_builder = egui::ViewportBuilder::default()
        .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
        .with_min_inner_size([480.0, 320.0]);

    let options = eframe::NativeOptions {
        viewport: viewport_builder,
        ..Default::default()
    };

    eframe::run_native(
        "Text to Speech Converter",
        options,
        Box::new(move |_cc| Ok(Box::new(TalkboxApp::new(initial_config)))),
    )
}
