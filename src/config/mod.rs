pub mod file;

use std::time::Duration;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

/// 預設後端位址：可由環境變數覆寫，否則指向本機開發端點
pub fn default_base_url() -> String {
    std::env::var("JD_INTAKE_API_URL").unwrap_or_else(|_| "http://localhost:8001".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "jd-intake")]
#[command(about = "Ingest a job description and score a resume against it")]
pub struct CliConfig {
    /// JD 來源：檔案路徑，或 '-' 表示從標準輸入貼上
    pub input: String,

    #[arg(long, default_value_t = default_base_url())]
    pub api_url: String,

    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// 履歷快照（JSON 檔）；省略時使用空白履歷
    #[arg(long)]
    pub resume: Option<String>,

    /// 分析完成後將履歷 PDF 匯出到此路徑
    #[arg(long)]
    pub export: Option<String>,

    /// 以 TOML 設定檔取代命令列的服務設定
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.api_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_url", &self.api_url)?;
        validation::validate_range("timeout_secs", self.timeout_secs, 1, 600)?;
        validation::validate_non_empty_string("input", &self.input)?;
        Ok(())
    }
}
