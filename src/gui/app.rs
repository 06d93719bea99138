use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::time::Duration;

use anyhow::anyhow;
use eframe::egui;

use crate::api;
use crate::config::{save_config, Config};
use crate::error::TtsError;
use crate::languages;
use crate::playback::{self, PlaybackEvent};
use crate::session::{AudioClip, SessionState};
use crate::storage;

/// Outcome line shown under the buttons. Errors render in red.
struct StatusLine {
    text: String,
    is_error: bool,
}

impl StatusLine {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(err: &TtsError) -> Self {
        Self {
            text: err.to_string(),
            is_error: true,
        }
    }
}

pub struct TalkboxApp {
    config: Config,
    input_text: String,
    selected_language: String,
    play_on_convert: bool,
    save_path: String,
    session: SessionState,
    status: Option<StatusLine>,

    // One receiver per in-flight conversion; Some(..) doubles as the
    // "request in flight" flag that keeps Convert disabled.
    synthesis_rx: Option<Receiver<Result<AudioClip, TtsError>>>,
    // Long-lived channel shared by every playback thread
    playback_tx: Sender<PlaybackEvent>,
    playback_rx: Receiver<PlaybackEvent>,
}

impl TalkboxApp {
    pub fn new(config: Config) -> Self {
        let (playback_tx, playback_rx) = channel();

        let selected_language = if languages::code_for(&config.default_language).is_some() {
            config.default_language.clone()
        } else {
            "English".to_string()
        };

        let save_path = config
            .last_save_dir
            .clone()
            .unwrap_or_default()
            .join(storage::default_file_name())
            .display()
            .to_string();

        let play_on_convert = config.play_on_convert;

        Self {
            config,
            input_text: String::new(),
            selected_language,
            play_on_convert,
            save_path,
            session: SessionState::default(),
            status: None,
            synthesis_rx: None,
            playback_tx,
            playback_rx,
        }
    }

    fn conversion_in_flight(&self) -> bool {
        self.synthesis_rx.is_some()
    }

    /// Kick off a synthesis on a worker thread. The UI thread only ever
    /// polls the channel; it never blocks on the network.
    fn start_conversion(&mut self) {
        let code = match languages::code_for(&self.selected_language) {
            Some(code) => code,
            None => {
                let err =
                    TtsError::InvalidInput(format!("Unknown language: {}", self.selected_language));
                self.status = Some(StatusLine::error(&err));
                return;
            }
        };

        let (tx, rx) = channel();
        self.synthesis_rx = Some(rx);
        self.status = Some(StatusLine::info("Converting..."));

        let config = self.config.clone();
        let text = self.input_text.clone();
        std::thread::spawn(move || {
            let _ = tx.send(api::tts::synthesize(&config, &text, code));
        });
    }

    fn poll_synthesis(&mut self) {
        let Some(rx) = &self.synthesis_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(clip)) => {
                self.synthesis_rx = None;
                self.session.record_synthesis(clip.clone());
                self.status = Some(StatusLine::info(format!(
                    "Converted: {} bytes of audio.",
                    clip.len()
                )));
                if self.play_on_convert {
                    playback::play(clip, self.playback_tx.clone());
                }
            }
            Ok(Err(err)) => {
                self.synthesis_rx = None;
                self.status = Some(StatusLine::error(&err));
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.synthesis_rx = None;
                let err = TtsError::SynthesisFailed(anyhow!("Conversion worker exited"));
                self.status = Some(StatusLine::error(&err));
            }
        }
    }

    fn poll_playback(&mut self) {
        while let Ok(event) = self.playback_rx.try_recv() {
            if let PlaybackEvent::Failed(err) = event {
                self.status = Some(StatusLine::error(&err));
            }
        }
    }

    fn play_again(&mut self) {
        match self.session.require_audio() {
            Ok(clip) => {
                playback::play(clip, self.playback_tx.clone());
                self.status = Some(StatusLine::info("Playing."));
            }
            Err(err) => self.status = Some(StatusLine::error(&err)),
        }
    }

    fn save(&mut self) {
        let clip = match self.session.require_audio() {
            Ok(clip) => clip,
            Err(err) => {
                self.status = Some(StatusLine::error(&err));
                return;
            }
        };

        let path = PathBuf::from(self.save_path.trim());
        if path.as_os_str().is_empty() {
            let err = TtsError::InvalidInput("Enter a destination path first.".to_string());
            self.status = Some(StatusLine::error(&err));
            return;
        }

        match storage::save_clip(&clip, &path) {
            Ok(()) => {
                self.status = Some(StatusLine::info(format!("Saved to {}.", path.display())));
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        self.config.last_save_dir = Some(parent.to_path_buf());
                    }
                }
            }
            Err(err) => self.status = Some(StatusLine::error(&err)),
        }
    }

    fn clear(&mut self) {
        self.input_text.clear();
        self.session.clear();
        self.status = Some(StatusLine::info("Cleared."));
    }
}

impl eframe::App for TalkboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_synthesis();
        self.poll_playback();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Text to Speech Converter");
            ui.add_space(8.0);

            ui.label("Enter text:");
            ui.add(
                egui::TextEdit::multiline(&mut self.input_text)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Language:");
                egui::ComboBox::from_id_salt("language")
                    .selected_text(self.selected_language.clone())
                    .show_ui(ui, |ui| {
                        for name in languages::names() {
                            ui.selectable_value(
                                &mut self.selected_language,
                                name.to_string(),
                                name,
                            );
                        }
                    });
                ui.checkbox(&mut self.play_on_convert, "Pronunciation (play immediately)");
            });
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let convert =
                    ui.add_enabled(!self.conversion_in_flight(), egui::Button::new("Convert"));
                if convert.clicked() {
                    self.start_conversion();
                }
                if ui.button("Play Again").clicked() {
                    self.play_again();
                }
                if ui.button("Save").clicked() {
                    self.save();
                }
                if ui.button("Clear").clicked() {
                    self.clear();
                }
            });
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Save to:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.save_path)
                        .desired_width(f32::INFINITY)
                        .hint_text("path/to/output.mp3"),
                );
            });

            if let Some(status) = &self.status {
                ui.add_space(8.0);
                ui.separator();
                if status.is_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, &status.text);
                } else {
                    ui.label(&status.text);
                }
            }
        });

        // Keep polling while a conversion is pending; otherwise egui only
        // repaints on input events and the result would sit unread.
        if self.conversion_in_flight() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.config.default_language = self.selected_language.clone();
        self.config.play_on_convert = self.play_on_convert;
        save_config(&self.config);
    }
}
