use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::error::IntakeError;

/// 使用者上傳的原始文件，僅在擷取期間存活
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub name: String,
    pub declared_media_type: String,
    pub bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(
        name: impl Into<String>,
        declared_media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_media_type: declared_media_type.into(),
            bytes,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// 從檔名推導副檔名（小寫，不含點）
    pub fn extension(&self) -> String {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default()
    }
}

/// 擷取結果，每次擷取整批替換
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub content: String,
    pub word_count: usize,
    pub char_count: usize,
    pub source_name: String,
    pub source_size_bytes: usize,
}

/// 輸入驗證結果，每次輸入變更重新計算，不做快取
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub valid: bool,
    pub word_count: usize,
    pub char_count: usize,
    pub deficit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    AnalyzingJd,
    ScoringResume,
    Complete,
    Failed,
}

/// 一次 JD 分析流程的狀態，由 orchestrator 獨占持有與變更
#[derive(Debug)]
pub struct AnalysisSession {
    pub id: u64,
    pub jd_text: String,
    pub resume_snapshot: Value,
    pub jd_structured: Option<Value>,
    pub score_result: Option<Value>,
    pub phase: SessionPhase,
    pub error: Option<IntakeError>,
    pub started_at: DateTime<Utc>,
}

impl AnalysisSession {
    pub fn new(id: u64, jd_text: String, resume_snapshot: Value) -> Self {
        Self {
            id,
            jd_text,
            resume_snapshot,
            jd_structured: None,
            score_result: None,
            phase: SessionPhase::Idle,
            error: None,
            started_at: Utc::now(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, SessionPhase::Complete | SessionPhase::Failed)
    }

    /// 從評分結果取出 ats_score.overall_score
    pub fn overall_score(&self) -> Option<u64> {
        self.score_result
            .as_ref()?
            .get("ats_score")?
            .get("overall_score")?
            .as_u64()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Landing,
    JdInput,
    Dashboard,
    Editor,
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ViewState::Landing => "landing",
            ViewState::JdInput => "jd-input",
            ViewState::Dashboard => "dashboard",
            ViewState::Editor => "editor",
        };
        write!(f, "{}", name)
    }
}
