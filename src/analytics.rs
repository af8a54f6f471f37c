//! Conversion tracking via the Google Apps Script webhook.
//!
//! One POST per confirmed booking, appended as a row to the conversions
//! sheet. Strictly best-effort.

use async_trait::async_trait;
use std::time::Duration;

use creneau_core::{AnalyticsSink, BookingError, BookingResult, ConversionEvent};

const RECORD_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ConversionsWebhook {
    url: String,
    client: reqwest::Client,
}

impl ConversionsWebhook {
    pub fn new(url: String) -> Self {
        ConversionsWebhook {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AnalyticsSink for ConversionsWebhook {
    async fn record(&self, event: &ConversionEvent) -> BookingResult<()> {
        let response = self
            .client
            .post(&self.url)
            .timeout(RECORD_TIMEOUT)
            .json(event)
            .send()
            .await
            .map_err(|e| BookingError::Analytics(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BookingError::Analytics(format!(
                "conversions webhook returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
