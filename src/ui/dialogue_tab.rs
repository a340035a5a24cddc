use eframe::egui;
use std::sync::mpsc::Sender;

use crate::engine::protocol::EngineCommand;
use crate::model::message::NoticeLevel;
use crate::model::session::SelectionMode;
use crate::model::word::join_words;
use crate::ui::app::{word_input, UiState};

pub fn draw_dialogue_tab(ui: &mut egui::Ui, state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    ui.heading("Generate a Dialogue 🗣️");

    ui.collapsing("➕ Add / Register a new word", |ui| {
        if let Some(word) = word_input(ui, &mut state.new_word, "Enter a new English word", "Register Word") {
            let _ = cmd_tx.send(EngineCommand::Register(word));
        }
    });

    let registered = if state.words.is_empty() {
        "None yet.".to_string()
    } else {
        join_words(&state.words)
    };
    ui.label(egui::RichText::new(format!("Registered words: {registered}")).small());

    ui.separator();

    if state.words.is_empty() {
        ui.colored_label(state.settings.color(NoticeLevel::Warning), "Register some words first.");
        return;
    }

    let k = state.config.dialogue.random_pick_count;
    ui.horizontal(|ui| {
        ui.label("Select mode");
        ui.radio_value(&mut state.session.mode, SelectionMode::Random, format!("🎲 Random {k} words"));
        ui.radio_value(&mut state.session.mode, SelectionMode::Manual, "📝 Pick my own");
    });

    match state.session.mode {
        SelectionMode::Random => draw_random(ui, state, cmd_tx, k),
        SelectionMode::Manual => draw_manual(ui, state, cmd_tx),
    }

    draw_result(ui, state);
}

fn draw_random(ui: &mut egui::Ui, state: &mut UiState, cmd_tx: &Sender<EngineCommand>, k: usize) {
    if state.words.len() < k {
        ui.colored_label(
            state.settings.color(NoticeLevel::Warning),
            format!("At least {k} words must be registered."),
        );
        return;
    }

    if generate_button(ui, state.generating, "Select & Generate") {
        start_generation(state, cmd_tx);
    }
}

fn draw_manual(ui: &mut egui::Ui, state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    state.session.retain_picks(&state.words);

    ui.label("Choose as many words as you like (min 1)");
    ui.horizontal_wrapped(|ui| {
        for word in &state.words {
            let mut picked = state.session.is_picked(word);
            if ui.checkbox(&mut picked, word.as_str()).changed() {
                state.session.toggle_pick(word);
            }
        }
    });

    if generate_button(ui, state.generating, "Generate with selected words") {
        // An empty pick list is refused by the engine with a warning.
        start_generation(state, cmd_tx);
    }
}

fn generate_button(ui: &mut egui::Ui, busy: bool, label: &str) -> bool {
    ui.horizontal(|ui| {
        let clicked = ui.add_enabled(!busy, egui::Button::new(label)).clicked();
        if busy {
            ui.spinner();
            ui.label("Generating…");
        }
        clicked
    })
    .inner
}

fn start_generation(state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    state.generating = true;
    state.session.clear_result();
    let _ = cmd_tx.send(EngineCommand::Generate(state.session.clone()));
}

fn draw_result(ui: &mut egui::Ui, state: &UiState) {
    let Some(dialogue) = state.session.dialogue.as_deref() else {
        return;
    };

    ui.separator();
    ui.label(egui::RichText::new("Selected Words").strong());
    ui.label(join_words(&state.session.selected));

    if let Some(extra) = &state.session.extra_word {
        ui.label(format!("Bonus word: {extra}"));
    }

    ui.add_space(8.0);
    ui.label(dialogue);
}
