use crate::domain::model::{ErrorResponse, HealthResponse, HouseFeatures, PredictionResponse};
use crate::utils::error::{Result, ServeError};
use crate::utils::validation::validate_url;
use reqwest::{Client, Response};
use url::Url;

/// `/predict` 端點的簡易 client，用於冒煙測試
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: Url,
}

impl PredictionClient {
    pub fn new(base_url: &str) -> Result<Self> {
        validate_url("base_url", base_url)?;
        let mut base_url =
            Url::parse(base_url).map_err(|e| ServeError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: base_url.to_string(),
                reason: e.to_string(),
            })?;
        // 沒有結尾斜線時 join 會換掉最後一段路徑
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ServeError::ConfigError {
                message: format!("cannot build endpoint '{}': {}", path, e),
            })
    }

    pub async fn predict(&self, features: &HouseFeatures) -> Result<PredictionResponse> {
        self.predict_json(&serde_json::to_value(features)?).await
    }

    /// 直接送出任意 JSON，方便測試錯誤路徑
    pub async fn predict_json(&self, payload: &serde_json::Value) -> Result<PredictionResponse> {
        let url = self.endpoint("predict")?;
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).json(payload).send().await?;
        Self::decode(response).await
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = self.endpoint("health")?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(ErrorResponse {
                error,
                field: Some(field),
            }) => format!("{} (field: {})", error, field),
            Ok(ErrorResponse { error, field: None }) => error,
            Err(_) => body,
        };

        Err(ServeError::RemoteError {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(PredictionClient::new("not a url").is_err());
        assert!(PredictionClient::new("ftp://example.com").is_err());
        assert!(PredictionClient::new("http://127.0.0.1:5000").is_ok());
    }

    #[test]
    fn test_endpoint_joins_relative_path() {
        let client = PredictionClient::new("http://127.0.0.1:5000/").unwrap();

        assert_eq!(
            client.endpoint("predict").unwrap().as_str(),
            "http://127.0.0.1:5000/predict"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let bare = PredictionClient::new("http://127.0.0.1:5000/api").unwrap();
        let slashed = PredictionClient::new("http://127.0.0.1:5000/api/").unwrap();

        assert_eq!(
            bare.endpoint("predict").unwrap().as_str(),
            "http://127.0.0.1:5000/api/predict"
        );
        assert_eq!(
            slashed.endpoint("health").unwrap().as_str(),
            "http://127.0.0.1:5000/api/health"
        );
    }
}
