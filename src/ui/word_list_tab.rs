use eframe::egui;
use std::sync::mpsc::Sender;

use crate::engine::protocol::EngineCommand;
use crate::model::word::Word;
use crate::ui::app::{word_input, UiState};

pub fn draw_word_list_tab(ui: &mut egui::Ui, state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    ui.heading("Manage Your Word List 📚");

    if state.words.is_empty() {
        ui.label("No words registered yet. Add some in the Dialogue Creation tab.");
        return;
    }

    let mut remove: Option<(usize, Word)> = None;

    for (i, word) in state.words.iter().enumerate() {
        ui.horizontal(|ui| {
            ui.label(format!("• {word}"));
            if ui.small_button("🗑").clicked() {
                remove = Some((i, word.clone()));
            }
        });
    }

    if let Some((index, word)) = remove {
        let _ = cmd_tx.send(EngineCommand::Remove { index, word });
    }

    ui.separator();

    if let Some(word) = word_input(ui, &mut state.new_word_in_list, "Add another word", "Add") {
        let _ = cmd_tx.send(EngineCommand::Register(word));
    }

    ui.separator();

    ui.horizontal(|ui| {
        if ui.button("Export…").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .set_file_name("words.txt")
                .add_filter("Text", &["txt"])
                .save_file()
            {
                let _ = cmd_tx.send(EngineCommand::Export(path));
            }
        }

        if ui.button("Reload").clicked() {
            let _ = cmd_tx.send(EngineCommand::Refresh);
        }
    });
}
