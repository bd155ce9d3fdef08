//! Health probes and the aggregated health report.

use std::{sync::Arc, time::Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Outcome of a single probe.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub status: HealthStatus,
    pub description: String,
    pub data: Map<String, Value>,
}

impl ProbeResult {
    pub fn healthy(description: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            description: description.into(),
            data: Map::new(),
        }
    }

    pub fn unhealthy(description: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            description: description.into(),
            data: Map::new(),
        }
    }

    pub fn with_data(mut self, key: &str, value: Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }
}

#[async_trait]
pub trait HealthProbe: Send + Sync {
    fn name(&self) -> &str;
    async fn check(&self) -> ProbeResult;
}

/// Reports the process itself as operational.
pub struct ApiProbe;

#[async_trait]
impl HealthProbe for ApiProbe {
    fn name(&self) -> &str {
        "api"
    }

    async fn check(&self) -> ProbeResult {
        ProbeResult::healthy("API is operational")
            .with_data("status", json!("operational"))
            .with_data("timestamp", json!(Utc::now()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthEntry {
    pub name: String,
    pub status: HealthStatus,
    pub description: String,
    /// Milliseconds.
    pub duration: f64,
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Milliseconds.
    pub total_duration: f64,
    pub timestamp: DateTime<Utc>,
    pub entries: Vec<HealthEntry>,
}

#[derive(Default, Clone)]
pub struct HealthRegistry {
    probes: Vec<Arc<dyn HealthProbe>>,
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in `api` probe.
    pub fn with_defaults() -> Self {
        Self::new().register(Arc::new(ApiProbe))
    }

    pub fn register(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.probes.push(probe);
        self
    }

    /// Runs every probe in registration order. Healthy only if all are.
    pub async fn report(&self) -> HealthReport {
        let started = Instant::now();
        let mut entries = Vec::with_capacity(self.probes.len());
        for probe in &self.probes {
            let probe_started = Instant::now();
            let result = probe.check().await;
            entries.push(HealthEntry {
                name: probe.name().to_string(),
                status: result.status,
                description: result.description,
                duration: millis(probe_started),
                data: result.data,
            });
        }

        let status = if entries.iter().all(|e| e.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };
        HealthReport {
            status,
            total_duration: millis(started),
            timestamp: Utc::now(),
            entries,
        }
    }
}

fn millis(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
