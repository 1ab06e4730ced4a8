use anyhow::Result;
use sirocco::bridge::{BridgeCommand, EnoceanBridge};
use sirocco::config::Config;
use sirocco::telegram::Telegram;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;
    sirocco::logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Logging init failed: {}", e))?;

    // Channel seams: the external transport feeds telegram_tx and drains
    // outbound_rx; commands arrive from host-platform integrations.
    let (telegram_tx, telegram_rx) = mpsc::unbounded_channel::<Telegram>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<BridgeCommand>();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Telegram>();

    let mut bridge = EnoceanBridge::new(config, telegram_rx, cmd_rx, cmd_tx.clone(), outbound_tx)
        .map_err(|e| anyhow::anyhow!("Failed to create bridge: {}", e))?;

    info!(
        "Sirocco EnOcean bridge starting up (version {})",
        env!("APP_VERSION")
    );

    // Transport attach point: log outbound telegrams until a transport
    // integration claims the channel ends.
    let transport_task = tokio::spawn(async move {
        while let Some(telegram) = outbound_rx.recv().await {
            debug!("Outbound {} telegram ready for transport: {:?}", telegram.org(), telegram);
        }
    });

    // Stop the main loop on interrupt
    let shutdown = bridge.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            let _ = shutdown.send(());
        }
    });

    // Keep the inbound seam open for the lifetime of the process
    let _inbound_seam = telegram_tx;

    match bridge.run().await {
        Ok(()) => {
            info!("Bridge shutdown complete");
            transport_task.abort();
            Ok(())
        }
        Err(e) => {
            error!("Bridge failed with error: {}", e);
            transport_task.abort();
            Err(anyhow::anyhow!("Bridge error: {}", e))
        }
    }
}
