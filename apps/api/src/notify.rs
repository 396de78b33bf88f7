//! Notification collaborator boundary. Delivery mechanics live behind a
//! webhook; this module only implements the contract the pipeline's
//! callers consume: an invite in, a boolean out.

use serde::Serialize;
use tracing::{error, info, warn};

const NOTIFY_TIMEOUT_SECS: u64 = 30;

/// An interview invitation for a shortlisted candidate.
#[derive(Debug, Serialize)]
pub struct InterviewInvite<'a> {
    pub to_address: &'a str,
    pub candidate_name: &'a str,
    pub job_title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_link: Option<&'a str>,
}

/// Client for the external notification service. Success or failure is
/// reported to the caller but never fails a request: shortlisting does not
/// depend on delivery.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(NOTIFY_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            webhook_url,
        }
    }

    /// Posts the invite to the configured webhook. Returns whether delivery
    /// was accepted.
    pub async fn send_invite(&self, invite: &InterviewInvite<'_>) -> bool {
        let Some(url) = &self.webhook_url else {
            warn!("notification webhook not configured; skipping invite");
            return false;
        };

        match self.client.post(url).json(invite).send().await {
            Ok(response) if response.status().is_success() => {
                info!(to = %invite.to_address, "interview invite delivered");
                true
            }
            Ok(response) => {
                error!(
                    "notification service returned {} for {}",
                    response.status(),
                    invite.to_address
                );
                false
            }
            Err(e) => {
                error!("failed to reach notification service: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite() -> InterviewInvite<'static> {
        InterviewInvite {
            to_address: "candidate@example.com",
            candidate_name: "Alex",
            job_title: "Backend Engineer",
            assessment_link: Some("https://example.com/interview"),
        }
    }

    #[tokio::test]
    async fn test_accepted_delivery_reports_true() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/invites")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "to_address": "candidate@example.com",
                "job_title": "Backend Engineer"
            })))
            .with_status(200)
            .create_async()
            .await;

        let notifier = Notifier::new(Some(format!("{}/invites", server.url())));
        assert!(notifier.send_invite(&invite()).await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_delivery_reports_false() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/invites")
            .with_status(500)
            .create_async()
            .await;

        let notifier = Notifier::new(Some(format!("{}/invites", server.url())));
        assert!(!notifier.send_invite(&invite()).await);
    }

    #[tokio::test]
    async fn test_unconfigured_webhook_reports_false_without_sending() {
        let notifier = Notifier::new(None);
        assert!(!notifier.send_invite(&invite()).await);
    }
}
