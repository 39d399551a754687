use winpredict::application::bootstrap::Bootstrap;
use winpredict::application::client::PredictionClient;
use winpredict::config::Config;
use winpredict::interfaces::ui::PredictorApp;

use anyhow::Context;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

// A writer that sends logs to the UI via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// Cloneable wrapper for MakeWriter
#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 0. Load Env (before starting anything)
    dotenvy::dotenv().ok();

    // 1. Create Log Channel
    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    // 2. Setup Logging (Stdout + UI)
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    info!("Starting Win Predictor {}...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let endpoint = config.predict_url()?.to_string();

    // 3. Tokio runtime on a background thread; it hosts every request
    let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Failed to build Tokio runtime: {}", e);
                return;
            }
        };

        let handle = rt.handle().clone();
        rt.block_on(async move {
            let controller = match Bootstrap::init(&config).await {
                Ok(controller) => controller,
                Err(e) => {
                    tracing::error!("Failed to initialize predictor: {:#}", e);
                    return;
                }
            };

            let _ = ready_tx.send((Arc::new(controller), handle));

            // Spawned requests need the runtime alive for the lifetime of the window
            std::future::pending::<()>().await;
        });
    });

    // 4. Wait for the controller (feature discovery may take up to its timeout)
    info!("Waiting for predictor to initialize...");
    let (controller, handle) = ready_rx
        .recv()
        .context("Predictor failed to initialize (see log above)")?;
    info!(
        "Predictor ready with {} features. Launching UI.",
        controller.feature_order().len()
    );

    let client = PredictionClient::new(controller, handle, log_rx);
    let app = PredictorApp::new(client, endpoint);

    // 5. Run UI (Blocks Main Thread)
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_title("Win Predictor"),
        ..Default::default()
    };

    eframe::run_native(
        "Win Predictor",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
