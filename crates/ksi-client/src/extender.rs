//! Extender service client

use crate::error::{Error, Result};
use crate::BoxFuture;
use ksi_types::CalendarHashChain;
use serde::{Deserialize, Serialize};

/// Request for a calendar hash chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendRequest {
    /// Aggregation time of the signature being extended
    pub aggregation_time: u64,
    /// Target publication time; absent means the calendar head
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_time: Option<u64>,
}

/// Extender response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendResponse {
    /// Zero on success
    pub status: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_hash_chain: Option<CalendarHashChain>,
}

impl ExtendResponse {
    /// A successful response carrying `chain`
    pub fn success(chain: CalendarHashChain) -> Self {
        Self {
            status: 0,
            error_message: None,
            calendar_hash_chain: Some(chain),
        }
    }

    /// A failed response
    pub fn failure(status: u64, message: Option<String>) -> Self {
        Self {
            status,
            error_message: message,
            calendar_hash_chain: None,
        }
    }

    /// Take the calendar chain out of the response
    ///
    /// A non-zero status becomes [`Error::Service`].
    pub fn into_calendar_chain(self) -> Result<CalendarHashChain> {
        if self.status != 0 {
            return Err(Error::Service {
                status: self.status,
                message: self.error_message,
            });
        }
        self.calendar_hash_chain
            .ok_or_else(|| Error::InvalidResponse("response carries no calendar hash chain".into()))
    }
}

/// Something that can extend a signature's aggregation time to a calendar root
pub trait ExtendService: Send + Sync {
    /// Issue one extend request
    fn extend(
        &self,
        aggregation_time: u64,
        publication_time: Option<u64>,
    ) -> BoxFuture<'_, Result<CalendarHashChain>>;
}

/// HTTP client for the extender service
pub struct ExtenderClient {
    /// Extender endpoint
    url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl ExtenderClient {
    /// Create an extender client sharing an existing HTTP client
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Send an extend request and return the raw response
    pub async fn send(&self, request: &ExtendRequest) -> Result<ExtendResponse> {
        tracing::debug!(
            "extend request to {}: aggregation time {}, publication time {:?}",
            self.url,
            request.aggregation_time,
            request.publication_time
        );
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Api(format!(
                "extender returned {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

impl ExtendService for ExtenderClient {
    fn extend(
        &self,
        aggregation_time: u64,
        publication_time: Option<u64>,
    ) -> BoxFuture<'_, Result<CalendarHashChain>> {
        Box::pin(async move {
            let request = ExtendRequest {
                aggregation_time,
                publication_time,
            };
            self.send(&request).await?.into_calendar_chain()
        })
    }
}

/// Stand-in used when no extender URL is configured
pub struct UnconfiguredExtender;

impl ExtendService for UnconfiguredExtender {
    fn extend(
        &self,
        _aggregation_time: u64,
        _publication_time: Option<u64>,
    ) -> BoxFuture<'_, Result<CalendarHashChain>> {
        Box::pin(async { Err(Error::NotConfigured("extender URL")) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ksi_types::{DataHash, HashAlgorithm};

    fn chain() -> CalendarHashChain {
        CalendarHashChain {
            publication_time: 200,
            aggregation_time: 100,
            input_hash: DataHash::new(HashAlgorithm::Sha2256, vec![1; 32]).unwrap(),
            links: Vec::new(),
        }
    }

    #[test]
    fn test_request_wire_format() {
        let request = ExtendRequest {
            aggregation_time: 100,
            publication_time: None,
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"aggregationTime":100}"#
        );
    }

    #[test]
    fn test_success_detaches_chain() {
        assert_eq!(
            ExtendResponse::success(chain()).into_calendar_chain().unwrap(),
            chain()
        );
    }

    #[test]
    fn test_nonzero_status_is_service_error() {
        let err = ExtendResponse::failure(1, Some("time not found".into()))
            .into_calendar_chain()
            .unwrap_err();
        match err {
            Error::Service { status, message } => {
                assert_eq!(status, 1);
                assert_eq!(message.as_deref(), Some("time not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_success_without_chain_is_invalid() {
        let response: ExtendResponse = serde_json::from_str(r#"{"status":0}"#).unwrap();
        assert!(matches!(
            response.into_calendar_chain(),
            Err(Error::InvalidResponse(_))
        ));
    }
}
