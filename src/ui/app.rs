use eframe::egui;
use std::sync::mpsc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::message::Notice;
use crate::model::session::Session;
use crate::model::word::WordList;
use crate::ui::dialogue_tab::draw_dialogue_tab;
use crate::ui::settings::UiSettings;
use crate::ui::settings_io::load_settings;
use crate::ui::settings_tab::draw_settings_tab;
use crate::ui::word_list_tab::draw_word_list_tab;

const MAX_NOTICES: usize = 6;

/* =========================
   Tabs
   ========================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dialogue,
    WordList,
    Settings,
}

/* =========================
   UI State
   ========================= */

#[derive(Default)]
pub struct UiState {
    pub tab: Tab,

    /// Last list the engine read from disk.
    pub words: WordList,

    pub new_word: String,
    pub new_word_in_list: String,

    pub session: Session,
    pub generating: bool,

    pub notices: Vec<Notice>,

    /// Settings being edited; applied on save.
    pub config: AppConfig,
    pub settings: UiSettings,
}

impl UiState {
    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            let excess = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..excess);
        }
    }
}

/* =========================
   App
   ========================= */

pub struct VocabApp {
    pub ui: UiState,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl VocabApp {
    pub fn new(
        config: AppConfig,
        cmd_tx: mpsc::Sender<EngineCommand>,
        resp_rx: mpsc::Receiver<EngineResponse>,
    ) -> Self {
        let app = Self {
            ui: UiState {
                config,
                settings: load_settings(),
                ..Default::default()
            },
            cmd_tx,
            resp_rx,
        };
        app.send_command(EngineCommand::Refresh);
        app
    }

    pub fn send_command(&self, cmd: EngineCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            tracing::error!("engine thread is gone");
        }
    }

    fn drain_responses(&mut self) {
        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::Words(words) => {
                    self.ui.words = words;
                }
                EngineResponse::Notice(notice) => self.ui.push_notice(notice),
                EngineResponse::Generated(session) => {
                    // Keep picks made while the request was in flight.
                    let picks = std::mem::take(&mut self.ui.session.picks);
                    self.ui.session = Session { picks, ..session };
                    self.ui.generating = false;
                }
                EngineResponse::GenerateSkipped => {
                    self.ui.generating = false;
                }
            }
        }
    }

    fn draw_notices(&mut self, ui: &mut egui::Ui) {
        let mut clear = false;

        for notice in &self.ui.notices {
            ui.colored_label(self.ui.settings.color(notice.level()), notice.text());
        }

        if !self.ui.notices.is_empty() && ui.small_button("Clear messages").clicked() {
            clear = true;
        }

        if clear {
            self.ui.notices.clear();
        }
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for VocabApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.ui.settings.ui_scale);

        self.drain_responses();

        /* TABS */
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.heading("Word Learning App");
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.ui.tab, Tab::Dialogue, "💬 Dialogue Creation");
                ui.selectable_value(&mut self.ui.tab, Tab::WordList, "📚 Word List");
                ui.selectable_value(&mut self.ui.tab, Tab::Settings, "⚙ Settings");
            });
        });

        /* NOTICES */
        egui::TopBottomPanel::bottom("notices").show(ctx, |ui| {
            self.draw_notices(ui);
        });

        /* CENTER */
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.ui.tab {
                Tab::Dialogue => draw_dialogue_tab(ui, &mut self.ui, &self.cmd_tx),
                Tab::WordList => draw_word_list_tab(ui, &mut self.ui, &self.cmd_tx),
                Tab::Settings => draw_settings_tab(ui, &mut self.ui, &self.cmd_tx),
            });
        });

        // Responses arrive from another thread; keep polling while waiting.
        if self.ui.generating {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else {
            ctx.request_repaint_after(Duration::from_millis(500));
        }
    }
}

/* =========================
   UI Helpers
   ========================= */

/// Single-line input plus button; returns the trimmed text when submitted.
pub fn word_input(ui: &mut egui::Ui, text: &mut String, hint: &str, button: &str) -> Option<String> {
    let mut submitted = false;

    ui.horizontal(|ui| {
        let response = ui.add_sized(
            [220.0, 20.0],
            egui::TextEdit::singleline(text).hint_text(hint),
        );

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submitted = true;
        }

        if ui.button(button).clicked() {
            submitted = true;
        }
    });

    if submitted && !text.trim().is_empty() {
        let word = text.trim().to_string();
        text.clear();
        Some(word)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_are_capped() {
        let mut state = UiState::default();
        for i in 0..10 {
            state.push_notice(Notice::Info(i.to_string()));
        }
        assert_eq!(state.notices.len(), MAX_NOTICES);
        assert_eq!(state.notices[0], Notice::Info("4".into()));
    }
}
