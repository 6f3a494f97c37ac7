//! HTTP implementation of the upscale service contract.

use async_trait::async_trait;
use reqwest::{multipart, Client};
use shared::{
    domain::ArtifactId,
    protocol::{
        self, ScaleFactorsResponse, UpscaleRejected, UpscaleResponse, FIELD_FILE, FIELD_MODE,
        FIELD_SCALE_FACTOR, FIELD_TARGET_HEIGHT, FIELD_TARGET_WIDTH,
    },
};
use url::Url;

use crate::{
    error::SubmissionError, SubmissionResult, UpscaleParams, UpscaleRequest, UpscaleService,
};

pub struct HttpUpscaleService {
    http: Client,
    base_url: Url,
}

impl HttpUpscaleService {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Absolute location of a processed artifact on this service.
    pub fn download_url(&self, artifact_id: &ArtifactId) -> String {
        self.endpoint(&protocol::download_path(artifact_id))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

#[async_trait]
impl UpscaleService for HttpUpscaleService {
    async fn scale_factors(&self) -> Result<Vec<u32>, SubmissionError> {
        let response = self
            .http
            .get(self.endpoint("scale-factors"))
            .send()
            .await
            .map_err(network_failure)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::ServiceRejected(format!(
                "scale factor request failed with status {status}"
            )));
        }
        let body: ScaleFactorsResponse = response.json().await.map_err(network_failure)?;
        Ok(body.scale_factors)
    }

    async fn upscale(&self, request: UpscaleRequest) -> Result<SubmissionResult, SubmissionError> {
        let file_name = request.file.file_name().to_string();
        let media_type = request.file.media_type().to_string();
        let file_part = multipart::Part::bytes(request.file.into_contents())
            .file_name(file_name)
            .mime_str(&media_type)
            .map_err(network_failure)?;

        let mut form = multipart::Form::new()
            .part(FIELD_FILE, file_part)
            .text(FIELD_MODE, request.params.mode().as_str());
        match request.params {
            UpscaleParams::Factor { scale_factor } => {
                form = form.text(FIELD_SCALE_FACTOR, scale_factor.to_string());
            }
            UpscaleParams::Resolution {
                target_width,
                target_height,
            } => {
                form = form
                    .text(FIELD_TARGET_WIDTH, target_width.to_string())
                    .text(FIELD_TARGET_HEIGHT, target_height.to_string());
            }
        }

        let response = self
            .http
            .post(self.endpoint("upscale"))
            .multipart(form)
            .send()
            .await
            .map_err(network_failure)?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<UpscaleRejected>().await {
                Ok(body) => body.error,
                Err(_) => format!("upscale request failed with status {status}"),
            };
            return Err(SubmissionError::ServiceRejected(message));
        }

        match response
            .json::<UpscaleResponse>()
            .await
            .map_err(network_failure)?
        {
            UpscaleResponse::Completed(body) if body.success => Ok(SubmissionResult {
                artifact_id: ArtifactId(body.output_file),
                summary_message: body.message,
                original_size: body.original_size,
                upscaled_size: body.upscaled_size,
            }),
            UpscaleResponse::Completed(_) => {
                Err(SubmissionError::ServiceRejected("upscaling failed".to_string()))
            }
            UpscaleResponse::Rejected(body) => Err(SubmissionError::ServiceRejected(body.error)),
        }
    }
}

fn network_failure(err: reqwest::Error) -> SubmissionError {
    SubmissionError::NetworkFailure(err.to_string())
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
