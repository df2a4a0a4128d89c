//! Hazard notification sinks.
//!
//! A hazard notice is advisory: it is emitted while a load is still in
//! progress and never blocks the load itself.

use serde::{Deserialize, Serialize};

/// Advisory message raised by a hazard-notifier container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardNotice {
    /// Serial number of the container that raised the notice.
    pub serial: String,
    pub message: String,
    /// Cargo weight the triggering load would reach, when load-related.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_cargo: Option<f64>,
    /// Fill threshold that was crossed, when load-related.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

/// Destination for hazard notices.
pub trait HazardNotifier {
    fn notify(&mut self, notice: &HazardNotice);
}

/// Sink that writes each notice as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl HazardNotifier for TracingNotifier {
    fn notify(&mut self, notice: &HazardNotice) {
        tracing::warn!(
            serial = %notice.serial,
            projected_cargo = ?notice.projected_cargo,
            threshold = ?notice.threshold,
            "hazard: {}",
            notice.message
        );
    }
}

/// Sink that keeps every notice it receives, also logging it as a warning.
#[derive(Debug, Clone, Default)]
pub struct HazardLog {
    notices: Vec<HazardNotice>,
}

impl HazardLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[HazardNotice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Take the recorded notices, leaving the log empty.
    pub fn drain(&mut self) -> Vec<HazardNotice> {
        std::mem::take(&mut self.notices)
    }
}

impl HazardNotifier for HazardLog {
    fn notify(&mut self, notice: &HazardNotice) {
        TracingNotifier.notify(notice);
        self.notices.push(notice.clone());
    }
}
