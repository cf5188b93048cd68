use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Mutex, OnceLock};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static INIT: Mutex<()> = Mutex::new(());

/// Initialize the Prometheus recorder globally and store the handle.
///
/// The recorder is process-wide; later calls reuse the installed handle.
pub fn init_metrics() -> Result<()> {
    let _guard = INIT
        .lock()
        .map_err(|_| anyhow::anyhow!("metrics init lock poisoned"))?;

    if HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = HANDLE.set(handle);
    Ok(())
}

/// Render the current metrics in Prometheus text format.
pub fn render_metrics() -> String {
    HANDLE.get().map(|h| h.render()).unwrap_or_default()
}
