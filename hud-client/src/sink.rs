use anyhow::Result;
use hud_shared::ControlSignals;
use std::time::Duration;

/// Snapshots closer than this to the last delivered one are not resent
const MIN_CHANGE: f32 = 1e-3;

/// Posts control signals to an external renderer over HTTP
pub struct RendererSink {
    url: String,
    http_client: reqwest::blocking::Client,
    last_sent: Option<ControlSignals>,
}

impl RendererSink {
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()?;

        Ok(Self {
            url: format!("{}/api/signals", base_url.trim_end_matches('/')),
            http_client,
            last_sent: None,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send `signals` unless they match the last delivered snapshot.
    /// Returns true when the renderer accepted a new snapshot. Failures are
    /// logged and retried on the next call.
    pub fn publish(&mut self, signals: &ControlSignals) -> bool {
        if let Some(last) = self.last_sent {
            if last.approx_eq(signals, MIN_CHANGE) {
                return false;
            }
        }

        match self.http_client.post(&self.url).json(signals).send() {
            Ok(response) => {
                if response.status().is_success() {
                    self.last_sent = Some(*signals);
                    log::debug!("Signals sent: {:?}", signals);
                    true
                } else {
                    log::warn!("Renderer returned error: {}", response.status());
                    false
                }
            }
            Err(e) => {
                log::warn!("Failed to send signals: {}", e);
                false
            }
        }
    }
}
