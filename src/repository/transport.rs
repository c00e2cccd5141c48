use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client};

use crate::config::settings::TransportSettings;
use crate::domain::{FormData, FormPart};
use crate::util::TransportError;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, data: FormData) -> Result<(), TransportError>;
}

/// Posts the form as `multipart/form-data` to a fixed endpoint.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(settings: &TransportSettings) -> Result<Self, TransportError> {
        if settings.endpoint.trim().is_empty() {
            return Err(TransportError::Unavailable(
                "no upload endpoint configured".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn into_multipart(data: FormData) -> Result<multipart::Form, TransportError> {
    let mut form = multipart::Form::new();
    for (name, part) in data.into_parts() {
        form = match part {
            FormPart::Text(value) => form.text(name, value),
            FormPart::File(attachment) => {
                let part = multipart::Part::bytes(attachment.bytes)
                    .file_name(attachment.file_name)
                    .mime_str(&attachment.content_type)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, data: FormData) -> Result<(), TransportError> {
        let form = into_multipart(data)?;
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(endpoint = %self.endpoint, status = status.as_u16(), "upload rejected");
            return Err(TransportError::Rejected {
                status: status.as_u16(),
            });
        }
        tracing::info!(endpoint = %self.endpoint, "upload accepted");
        Ok(())
    }
}
