//! Live monitor fed from stdin

use std::sync::Arc;

use boundary_engine::SystemClock;
use boundary_monitor::{MonitorConfig, MonitorInput, MonitorService, PresenterMessage};
use boundary_prefs::Preferences;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::error::CliResult;
use crate::output::print_json_line;

/// Read JSON-line inputs from stdin until EOF, answering each on stdout.
pub async fn execute(config: &MonitorConfig, prefs: Arc<dyn Preferences>) -> CliResult<()> {
    let (service, presenter_rx) = MonitorService::from_config(config, prefs, Arc::new(SystemClock));
    let presenter = tokio::spawn(drain_presenter(presenter_rx));

    service.start();

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    let mut line_no = 0usize;
    loop {
        buf.clear();
        if stdin.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(error) => {
                warn!(line = line_no, %error, "Skipping input that is not UTF-8");
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let input: MonitorInput = match serde_json::from_str(line) {
            Ok(input) => input,
            Err(error) => {
                warn!(line = line_no, %error, "Skipping malformed input");
                continue;
            }
        };

        // Preference writes may hit the disk; keep them off the runtime workers.
        let worker = service.clone();
        match tokio::task::spawn_blocking(move || worker.apply(input)).await {
            Ok(output) => print_json_line(&output)?,
            Err(error) => warn!(line = line_no, %error, "Input handler panicked"),
        }
    }

    drop(service);
    if let Err(error) = presenter.await {
        warn!(%error, "Presenter task ended abnormally");
    }
    Ok(())
}

/// Stand-in for the overlay UI: logs what it would have shown.
async fn drain_presenter(mut rx: mpsc::Receiver<PresenterMessage>) {
    while let Some(message) = rx.recv().await {
        let notice = message.notice();
        let what = match message {
            PresenterMessage::AppBounded(_) => "App bounded",
            PresenterMessage::OverlayRequested(_) => "Overlay requested",
        };
        info!(app_id = %notice.app_id, notice_id = %notice.notice_id, "{}", what);
    }
}
