use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};

use crate::adapters::http::ApiClient;
use crate::domain::model::{AnalysisSession, SessionPhase};
use crate::domain::ports::Notifier;
use crate::utils::error::IntakeError;

/// 分析進度通知的固定 key：訊息就地更新，不產生新通知
pub const ANALYSIS_NOTICE: &str = "analysis";

/// 兩階段分析協調器。前置條件：輸入已通過 validator（由 SessionFlow 把關）。
///
/// 每次 run_analysis 取得一個遞增的 session id；較新的呼叫會讓
/// 進行中的舊 session 失效，舊 session 在下一個暫停點察覺後即停止，
/// 不會到達終止狀態，也不再產生任何通知或導覽副作用。
pub struct AnalysisOrchestrator<N: Notifier> {
    client: ApiClient,
    notifier: N,
    active: AtomicU64,
}

impl<N: Notifier> AnalysisOrchestrator<N> {
    pub fn new(client: ApiClient, notifier: N) -> Self {
        Self {
            client,
            notifier,
            active: AtomicU64::new(0),
        }
    }

    /// 指定 id 是否仍是目前唯一存活的 session
    pub fn is_current(&self, session_id: u64) -> bool {
        self.active.load(Ordering::SeqCst) == session_id
    }

    pub async fn run_analysis(&self, jd_text: &str, resume_snapshot: &Value) -> AnalysisSession {
        let id = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        let mut session = AnalysisSession::new(id, jd_text.to_string(), resume_snapshot.clone());

        // Phase 1: JD 結構化
        session.phase = SessionPhase::AnalyzingJd;
        self.notifier.dismiss(ANALYSIS_NOTICE);
        self.notifier
            .progress(ANALYSIS_NOTICE, "Analyzing job description...");
        tracing::info!(
            "🔎 Session {}: analyzing job description ({} words)",
            id,
            crate::core::validator::word_count(jd_text)
        );

        let jd_structured = match self.client.analyze_jd(jd_text).await {
            Ok(data) => data,
            Err(e) => return self.fail(session, e),
        };

        if !self.is_current(id) {
            return self.supersede(session);
        }
        session.jd_structured = Some(jd_structured.clone());

        // Phase 2: 履歷評分，請求內容依賴第一階段的回應
        session.phase = SessionPhase::ScoringResume;
        self.notifier.progress(ANALYSIS_NOTICE, "Scoring resume...");
        tracing::info!("📊 Session {}: scoring resume against structured JD", id);

        let jd_content = merge_jd_text(jd_structured, jd_text);
        match self.client.score_resume(resume_snapshot, &jd_content).await {
            Ok(score) => {
                if !self.is_current(id) {
                    return self.supersede(session);
                }
                session.score_result = Some(score);
                session.phase = SessionPhase::Complete;
                self.notifier.success(ANALYSIS_NOTICE, "Analysis complete");
                tracing::info!(
                    "✅ Session {} complete (overall score: {})",
                    id,
                    session
                        .overall_score()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "n/a".to_string())
                );
                session
            }
            Err(e) => self.fail(session, e),
        }
    }

    /// 失敗路徑：丟棄部分結果，重試會從頭開始一個全新 session
    fn fail(&self, mut session: AnalysisSession, error: IntakeError) -> AnalysisSession {
        session.jd_structured = None;
        session.score_result = None;
        session.phase = SessionPhase::Failed;
        tracing::error!("❌ Session {} failed: {}", session.id, error);
        if self.is_current(session.id) {
            self.notifier
                .error(ANALYSIS_NOTICE, &error.user_friendly_message());
        }
        session.error = Some(error);
        session
    }

    /// 被較新的 session 取代：結果直接丟棄，停在非終止狀態
    fn supersede(&self, mut session: AnalysisSession) -> AnalysisSession {
        tracing::debug!("Session {} superseded, discarding result", session.id);
        session.jd_structured = None;
        session.score_result = None;
        session
    }
}

/// 第二階段的 jd_content：結構化欄位之外附上原始 JD 全文
fn merge_jd_text(structured: Value, jd_text: &str) -> Value {
    match structured {
        Value::Object(mut map) => {
            map.insert("text".to_string(), Value::String(jd_text.to_string()));
            Value::Object(map)
        }
        other => json!({ "data": other, "text": jd_text }),
    }
}
