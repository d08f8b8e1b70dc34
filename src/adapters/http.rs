use crate::adapters::holidays::HolidaySet;
use crate::domain::ports::HolidaySource;
use crate::utils::error::{Result, WorkingDaysError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_HOLIDAYS_URL: &str = "https://content.capta.co/Recruitment/WorkingDays.json";

/// Downloads the holiday list from a JSON endpoint.
pub struct HttpHolidaySource {
    url: String,
    client: Client,
}

impl HttpHolidaySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl HolidaySource for HttpHolidaySource {
    async fn fetch(&self) -> Result<HolidaySet> {
        tracing::debug!("Making holiday request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("Holiday response status: {}", response.status());

        if !response.status().is_success() {
            return Err(WorkingDaysError::HolidaySourceStatus {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        HolidaySet::from_json_str(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
