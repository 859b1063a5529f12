use serde_json::Value;

use crate::adapters::http::ApiClient;
use crate::core::extractor;
use crate::core::orchestrator::AnalysisOrchestrator;
use crate::core::state::SessionStateMachine;
use crate::core::validator;
use crate::domain::model::{
    AnalysisSession, ExtractedText, RawDocument, SessionPhase, ValidationVerdict, ViewState,
};
use crate::domain::ports::Notifier;
use crate::utils::error::{IntakeError, Result};

const EXPORT_NOTICE: &str = "export";

/// 單一入口的分析流程：擷取、驗證把關、協調兩階段呼叫、
/// 再把結果套用到視圖狀態機。視圖只讀，所有變更都經過這裡。
pub struct SessionFlow<N: Notifier> {
    orchestrator: AnalysisOrchestrator<N>,
    state: SessionStateMachine,
    client: ApiClient,
    notifier: N,
    resume_snapshot: Value,
    last_session: Option<AnalysisSession>,
}

impl<N: Notifier + Clone> SessionFlow<N> {
    pub fn new(client: ApiClient, notifier: N, resume_snapshot: Value) -> Self {
        Self {
            orchestrator: AnalysisOrchestrator::new(client.clone(), notifier.clone()),
            state: SessionStateMachine::new(),
            client,
            notifier,
            resume_snapshot,
            last_session: None,
        }
    }

    pub fn view(&self) -> ViewState {
        self.state.current()
    }

    pub fn last_session(&self) -> Option<&AnalysisSession> {
        self.last_session.as_ref()
    }

    pub fn get_started(&mut self) -> Result<()> {
        self.state.get_started()
    }

    pub fn navigate(&mut self, target: ViewState) -> Result<()> {
        self.state.navigate(target)
    }

    /// 履歷快照整份替換，不做增量合併
    pub fn update_resume(&mut self, snapshot: Value) {
        self.resume_snapshot = snapshot;
    }

    /// 上傳檔案的前門：擷取失敗在此終結，不會觸發任何網路呼叫
    pub fn ingest_document(&self, doc: &RawDocument) -> Result<ExtractedText> {
        extractor::extract(doc)
    }

    /// 每次輸入變更呼叫，提供即時字數回饋
    pub fn check_input(&self, text: &str) -> ValidationVerdict {
        validator::validate(text)
    }

    /// 驗證把關後執行兩階段分析；成功時驅動視圖進入儀表板，
    /// 失敗時視圖維持原地，使用者可重試（重試是全新 session）。
    pub async fn analyze(&mut self, jd_text: &str) -> Result<&AnalysisSession> {
        let verdict = validator::validate(jd_text);
        if !verdict.valid {
            return Err(IntakeError::InsufficientInput {
                word_count: verdict.word_count,
                deficit: verdict.deficit,
            });
        }

        let session = self
            .orchestrator
            .run_analysis(jd_text, &self.resume_snapshot)
            .await;

        if !self.orchestrator.is_current(session.id) {
            // 已被較新的 session 取代，結果不套用
            tracing::debug!("Ignoring superseded session {}", session.id);
            return self.last_session.as_ref().ok_or_else(|| {
                IntakeError::ServiceRejected {
                    reason: "Analysis superseded".to_string(),
                }
            });
        }

        if session.phase == SessionPhase::Complete {
            self.state.analysis_complete()?;
        }
        // 失敗時不做任何導覽：使用者留在輸入頁

        Ok(&*self.last_session.insert(session))
    }

    /// 匯出目前履歷為 PDF。只影響通知通道，不讀寫 session 或視圖。
    pub async fn export_pdf(&self, title: &str) -> Result<Vec<u8>> {
        if !self.state.can_export() {
            return Err(IntakeError::ExportFailure {
                reason: format!("export is not available from the {} view", self.state.current()),
            });
        }

        self.notifier.progress(EXPORT_NOTICE, "Generating PDF...");
        match self.client.download_pdf(&self.resume_snapshot, title).await {
            Ok(bytes) => {
                self.notifier
                    .success(EXPORT_NOTICE, "Resume downloaded successfully");
                Ok(bytes)
            }
            Err(e) => {
                self.notifier.error(EXPORT_NOTICE, &e.user_friendly_message());
                Err(e)
            }
        }
    }
}
