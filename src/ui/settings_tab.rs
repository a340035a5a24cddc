use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::config::save_config;
use crate::engine::protocol::EngineCommand;
use crate::model::message::{Notice, NoticeLevel};
use crate::ui::app::UiState;
use crate::ui::settings_io::save_settings;

pub fn draw_settings_tab(ui: &mut egui::Ui, state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    ui.heading("Settings");

    ui.collapsing("Display", |ui| {
        ui.add(egui::Slider::new(&mut state.settings.ui_scale, 0.75..=2.0).text("UI Scale"));

        for level in NoticeLevel::ALL {
            let mut color = state.settings.color(level);
            ui.horizontal(|ui| {
                if ui.color_edit_button_srgba(&mut color).changed() {
                    state.settings.set_color(level, color);
                }
                ui.label(level.label());
            });
        }
    });

    let config = &mut state.config;

    ui.collapsing("Word list", |ui| {
        let mut path = config.store.path.display().to_string();
        ui.horizontal(|ui| {
            ui.label("File");
            if ui.text_edit_singleline(&mut path).changed() {
                config.store.path = PathBuf::from(path.trim());
            }
        });
        ui.checkbox(&mut config.store.backup_on_write, "Back up the file before each save");
        ui.add_enabled_ui(config.store.backup_on_write, |ui| {
            ui.horizontal(|ui| {
                ui.label("Backups to keep (0 = all)");
                ui.add(egui::DragValue::new(&mut config.store.backup_keep).range(0..=100));
            });
        });
        ui.checkbox(&mut config.store.dedupe, "Ignore duplicate words");
    });

    ui.collapsing("Dialogue", |ui| {
        ui.horizontal(|ui| {
            ui.label("Random words");
            ui.add(egui::DragValue::new(&mut config.dialogue.random_pick_count).range(1..=10));
        });
        ui.horizontal(|ui| {
            ui.label("Lines");
            ui.add(egui::DragValue::new(&mut config.dialogue.min_lines).range(1..=20));
            ui.label("to");
            ui.add(egui::DragValue::new(&mut config.dialogue.max_lines).range(1..=20));
        });
        ui.checkbox(&mut config.dialogue.extra_vocabulary, "Add one advanced bonus word");
    });

    ui.collapsing("Generation service", |ui| {
        ui.horizontal(|ui| {
            ui.label("API base");
            ui.text_edit_singleline(&mut config.generation.api_base);
        });
        ui.horizontal(|ui| {
            ui.label("Model");
            ui.text_edit_singleline(&mut config.generation.model);
        });
        ui.horizontal(|ui| {
            ui.label("Max tokens");
            ui.add(egui::DragValue::new(&mut config.generation.max_tokens).range(16..=4096));
        });
        ui.add(egui::Slider::new(&mut config.generation.temperature, 0.0..=2.0).text("Temperature"));
        ui.horizontal(|ui| {
            ui.label("API key variable");
            ui.text_edit_singleline(&mut config.generation.api_key_env);
        });
        if config.generation.api_key().is_none() {
            ui.small(format!("{} is not set.", config.generation.api_key_env));
        }
    });

    ui.separator();

    ui.horizontal(|ui| {
        if ui.button("Save settings").clicked() {
            save_settings(&state.settings);
            match save_config(&state.config) {
                Ok(()) => state.push_notice(Notice::Success("Settings saved.".into())),
                Err(e) => state.push_notice(Notice::Error(format!("Could not save settings: {e:#}"))),
            }
            let _ = cmd_tx.send(EngineCommand::Reconfigure(state.config.clone()));
        }

        if ui.button("Test connection").clicked() {
            let _ = cmd_tx.send(EngineCommand::TestConnection);
        }
    });
}
