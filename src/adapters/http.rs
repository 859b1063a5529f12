use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{IntakeError, Result};

/// 固定的 API 版本前綴，加在每個端點之前
pub const API_PREFIX: &str = "/api/v1";

/// 後端回應信封：非 2xx 與 success=false 一律視為 ServiceRejected
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// 注入式 API client：程式啟動時建立一次，持有 base URL 與逾時設定。
/// 測試可直接以 mock server 的位址建構，不依賴任何全域狀態。
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &impl ConfigProvider) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// 第一階段：JD 結構化分析
    pub async fn analyze_jd(&self, jd_text: &str) -> Result<Value> {
        self.post_envelope("/jds/analyze", &json!({ "text": jd_text }))
            .await
    }

    /// 第二階段：以結構化 JD 對履歷評分
    pub async fn score_resume(&self, resume_content: &Value, jd_content: &Value) -> Result<Value> {
        self.post_envelope(
            "/resumes/score",
            &json!({
                "resume_content": resume_content,
                "jd_content": jd_content,
            }),
        )
        .await
    }

    /// 匯出履歷 PDF，回傳原始位元組。所有失敗都折疊成 ExportFailure。
    pub async fn download_pdf(&self, content: &Value, title: &str) -> Result<Vec<u8>> {
        let url = self.endpoint("/resumes/download-pdf");
        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(&json!({ "content": content, "title": title }))
            .send()
            .await
            .map_err(|e| IntakeError::ExportFailure {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IntakeError::ExportFailure {
                reason: format!("PDF generation failed: {}", status.as_u16()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| IntakeError::ExportFailure {
            reason: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }

    async fn post_envelope(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            // 優先採用伺服器提供的 detail/error 訊息
            let reason = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| server_reason(&v))
                .unwrap_or_else(|| format!("API error: {}", status.as_u16()));
            return Err(IntakeError::ServiceRejected { reason });
        }

        let envelope: ApiEnvelope = response.json().await.map_err(map_transport_error)?;
        if !envelope.success {
            let reason = envelope
                .error
                .or(envelope.detail)
                .unwrap_or_else(|| "Analysis failed".to_string());
            return Err(IntakeError::ServiceRejected { reason });
        }

        Ok(envelope.data.unwrap_or(Value::Null))
    }
}

fn map_transport_error(e: reqwest::Error) -> IntakeError {
    if e.is_timeout() {
        IntakeError::NetworkTimeout
    } else {
        IntakeError::ApiError(e)
    }
}

fn server_reason(body: &Value) -> Option<String> {
    body.get("detail")
        .or_else(|| body.get("error"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
