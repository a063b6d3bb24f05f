//! Completion notifications.
//!
//! When a result package lands in object storage, the pipeline announces it
//! to a configured results endpoint. The notifier is a trait so tests can
//! capture the payload and deployments can swap the transport; the shipped
//! implementation POSTs the notice as JSON over HTTP.
//!
//! Notification is not part of the invocation's correctness contract: the
//! pipeline logs a failed delivery and carries on.

use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;
use tracing::debug;

/// Payload announcing a finished result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionNotice {
    /// Location of the uploaded result package.
    pub url: String,
    /// Display name for the result. Empty in this version.
    pub name: String,
}

impl CompletionNotice {
    /// Creates a notice for an uploaded package location.
    pub fn for_location(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: String::new(),
        }
    }
}

/// Errors from delivering a completion notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// The request could not be sent.
    #[error("notification request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("notification endpoint returned status {status}")]
    Rejected { status: u16 },
}

/// Trait for completion notice delivery.
pub trait Notifier: Send + Sync {
    /// Delivers one completion notice.
    fn notify(
        &self,
        notice: &CompletionNotice,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Notifier that POSTs the notice as JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    endpoint: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Creates a notifier for the given results endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Returns the configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Notifier for WebhookNotifier {
    async fn notify(&self, notice: &CompletionNotice) -> Result<(), NotifyError> {
        debug!(endpoint = %self.endpoint, url = %notice.url, "delivering completion notice");
        let response = self
            .client
            .post(&self.endpoint)
            .json(notice)
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(NotifyError::Rejected {
                status: response.status().as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_for_location_has_empty_name() {
        let notice = CompletionNotice::for_location("https://objects/results/req-1_output.zip");
        assert_eq!(notice.url, "https://objects/results/req-1_output.zip");
        assert_eq!(notice.name, "");
    }

    #[test]
    fn test_notice_serializes_url_and_name() {
        let notice = CompletionNotice::for_location("https://x/y.zip");
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json, serde_json::json!({"url": "https://x/y.zip", "name": ""}));
    }

    #[test]
    fn test_webhook_notifier_keeps_endpoint() {
        let notifier = WebhookNotifier::new("https://hooks.example.com/results");
        assert_eq!(notifier.endpoint(), "https://hooks.example.com/results");
    }
}
