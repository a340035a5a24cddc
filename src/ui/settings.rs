use serde::{Deserialize, Serialize};
use egui::Color32;
use std::collections::HashMap;

use crate::model::message::NoticeLevel;

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiSettings {
    pub ui_scale: f32,

    // Notice level → color mapping
    pub notice_colors: HashMap<NoticeLevel, [u8; 4]>,
}

impl Default for UiSettings {
    fn default() -> Self {
        let notice_colors = NoticeLevel::ALL
            .into_iter()
            .map(|level| (level, default_color(level)))
            .collect();

        Self {
            ui_scale: 1.0,
            notice_colors,
        }
    }
}

fn default_color(level: NoticeLevel) -> [u8; 4] {
    match level {
        NoticeLevel::Success => [60, 160, 90, 255],
        NoticeLevel::Info => [90, 130, 200, 255],
        NoticeLevel::Warning => [210, 160, 40, 255],
        NoticeLevel::Error => [200, 70, 70, 255],
    }
}

impl UiSettings {
    /// Falls back to the built-in colour for levels missing from a saved file.
    pub fn color(&self, level: NoticeLevel) -> Color32 {
        let c = self
            .notice_colors
            .get(&level)
            .copied()
            .unwrap_or_else(|| default_color(level));
        Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
    }

    pub fn set_color(&mut self, level: NoticeLevel, color: Color32) {
        self.notice_colors
            .insert(level, [color.r(), color.g(), color.b(), color.a()]);
    }
}
