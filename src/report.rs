//! Game result reporting
//!
//! Final scores are posted to an external ingestion service. Delivery is
//! best-effort: it runs in a spawned task, failures are logged and dropped,
//! and the turn that produced the report never waits on it.

use crate::questions::Category;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Metrics for one finished (or abandoned) game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub user_name: String,
    pub finished_at: DateTime<Utc>,
    pub duration_millis: u64,
    pub final_score: u32,
    pub category: Category,
}

/// Wire format expected by the ingestion service
#[derive(Debug, Serialize)]
pub struct ReportPayload<'a> {
    pub nombre: &'a str,
    #[serde(rename = "nombreUsuario")]
    pub nombre_usuario: &'a str,
    pub fecha: String,
    #[serde(rename = "tiempoDuracion")]
    pub tiempo_duracion: u64,
    #[serde(rename = "resultadoJuego")]
    pub resultado_juego: u32,
    pub category: Category,
}

impl<'a> From<&'a GameReport> for ReportPayload<'a> {
    fn from(report: &'a GameReport) -> Self {
        Self {
            nombre: &report.user_name,
            nombre_usuario: &report.user_name,
            fecha: report.finished_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            tiempo_duracion: report.duration_millis,
            resultado_juego: report.final_score,
            category: report.category,
        }
    }
}

/// Errors delivering a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to results service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("results service responded with status {0}")]
    Status(u16),
}

/// Destination for game reports
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn submit(&self, report: &GameReport) -> Result<(), ReportError>;
}

/// Posts reports as JSON to the results service
pub struct HttpResultSink {
    client: Client,
    url: String,
}

impl HttpResultSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ReportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ReportError::Client)?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ResultSink for HttpResultSink {
    async fn submit(&self, report: &GameReport) -> Result<(), ReportError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ReportPayload::from(report))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// Fire-and-forget dispatcher in front of a [`ResultSink`]
#[derive(Clone)]
pub struct ResultReporter {
    sink: Arc<dyn ResultSink>,
}

impl ResultReporter {
    pub fn new(sink: Arc<dyn ResultSink>) -> Self {
        Self { sink }
    }

    /// Hand a report off for delivery without waiting for it.
    ///
    /// Must be called from inside a tokio runtime; outside one the report is
    /// logged and dropped.
    pub fn report(&self, report: GameReport) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::error!(
                user = %report.user_name,
                score = report.final_score,
                "No async runtime available, dropping game result"
            );
            return;
        };

        let sink = Arc::clone(&self.sink);
        handle.spawn(async move {
            deliver(sink.as_ref(), &report).await;
        });
    }
}

/// Deliver one report, logging the outcome. Never fails.
pub async fn deliver(sink: &dyn ResultSink, report: &GameReport) {
    match sink.submit(report).await {
        Ok(()) => {
            tracing::info!(
                user = %report.user_name,
                category = %report.category,
                score = report.final_score,
                duration_ms = report.duration_millis,
                "Game result reported"
            );
        }
        Err(e) => {
            tracing::error!(
                user = %report.user_name,
                score = report.final_score,
                error = %e,
                "Failed to report game result"
            );
        }
    }
}
