use eframe::egui;
use tracing::info;

use vocab_dialogue::config::{self, GenerationConfig};
use vocab_dialogue::engine::engine::spawn;
use vocab_dialogue::engine::llm_client::OpenAiClient;
use vocab_dialogue::logging::init_tracing;
use vocab_dialogue::ui::app::VocabApp;

fn main() -> eframe::Result<()> {
    let _ = dotenvy::dotenv();

    let (config, source) = config::load_config();
    init_tracing(&config.log_level);
    source.log();
    info!(store = %config.store.path.display(), model = %config.generation.model, "starting");

    let (cmd_tx, resp_rx) = spawn::<OpenAiClient>(
        config.clone(),
        Box::new(|generation: &GenerationConfig| OpenAiClient::from_config(generation)),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Word Fun App",
        options,
        Box::new(move |_cc| Ok(Box::new(VocabApp::new(config, cmd_tx, resp_rx)))),
    )
}
