//! reqwest implementations of the message and report services

use crate::reports::{ReportLookup, ReportSource};
use crate::usage::MessageSource;
use async_trait::async_trait;
use creditmeter_common::{CreditError, Message, MessageBatch, Report, Result};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Shared HTTP client for both upstream services
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CreditError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Fetches the current period's messages
pub struct HttpMessageSource {
    client: reqwest::Client,
    url: String,
}

impl HttpMessageSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl MessageSource for HttpMessageSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_messages(&self) -> Result<Vec<Message>> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            warn!("Message service unreachable: {}", e);
            CreditError::message_source(e.to_string())
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, "Message service returned an error");
            return Err(CreditError::message_source(format!("status {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CreditError::message_source(e.to_string()))?;
        let batch: MessageBatch = serde_json::from_slice(&body)?;

        debug!(count = batch.messages.len(), "Fetched messages");
        Ok(batch.messages)
    }
}

/// Looks up reports by id; `{id}` in the template is replaced
pub struct HttpReportSource {
    client: reqwest::Client,
    url_template: String,
}

impl HttpReportSource {
    pub fn new(client: reqwest::Client, url_template: impl Into<String>) -> Self {
        Self {
            client,
            url_template: url_template.into(),
        }
    }

    fn url_for(&self, report_id: i64) -> String {
        self.url_template.replace("{id}", &report_id.to_string())
    }
}

#[async_trait]
impl ReportSource for HttpReportSource {
    #[instrument(skip(self))]
    async fn lookup(&self, report_id: i64) -> ReportLookup {
        let url = self.url_for(report_id);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return ReportLookup::FetchFailed(format!("transport error: {}", e)),
        };

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return ReportLookup::NotFound,
            status => return ReportLookup::FetchFailed(format!("status {}", status)),
        }

        let report = match response.json::<Report>().await {
            Ok(report) => report,
            Err(e) => return ReportLookup::FetchFailed(format!("malformed report payload: {}", e)),
        };

        match report.validate() {
            Ok(()) => {
                debug!(report_id, name = %report.name, "Fetched report");
                ReportLookup::Found(report)
            }
            Err(e) => ReportLookup::FetchFailed(e.reason().to_string()),
        }
    }
}
