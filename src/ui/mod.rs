pub mod app;
pub mod dialogue_tab;
pub mod settings;
pub mod settings_io;
pub mod settings_tab;
pub mod word_list_tab;
