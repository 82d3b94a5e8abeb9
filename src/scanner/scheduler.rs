use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::opportunity_scanner::{OpportunityScanner, ScanError};

/// Fires a scan on a fixed interval until shutdown is signalled.
pub struct ScanScheduler {
    scanner: Arc<OpportunityScanner>,
    interval_minutes: u64,
    shutdown: watch::Receiver<bool>,
}

impl ScanScheduler {
    pub fn new(
        scanner: Arc<OpportunityScanner>,
        interval_minutes: u64,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            scanner,
            interval_minutes,
            shutdown,
        }
    }

    /// Spawns the recurring scan loop. The first scan fires immediately.
    pub fn start(&self) -> JoinHandle<()> {
        let scanner = self.scanner.clone();
        let minutes = self.interval_minutes;
        let mut shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            info!("🚀 Scheduled scanning every {} minutes", minutes);
            let mut interval = tokio::time::interval(Duration::from_secs(minutes * 60));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match scanner.run_scan().await {
                            Ok(_) => {}
                            Err(ScanError::AlreadyRunning) => {
                                warn!("⏸️ Skipping scheduled scan, one is already running");
                            }
                        }
                    }
                    _ = shutdown.changed() => {
                        info!("🛑 Scan scheduler stopping");
                        break;
                    }
                }
            }
        })
    }
}
