use std::time::Duration;

use anyhow::Result;
use httpmock::prelude::*;
use jd_intake::core::extractor::MAX_UPLOAD_BYTES;
use jd_intake::core::validator;
use jd_intake::domain::model::{RawDocument, SessionPhase, ViewState};
use jd_intake::domain::ports::ConfigProvider;
use jd_intake::{ApiClient, IntakeError, SessionFlow, TracingNotifier};

struct TestConfig {
    base_url: String,
    timeout: Duration,
}

impl ConfigProvider for TestConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_timeout(&self) -> Duration {
        self.timeout
    }
}

fn flow_for(server: &MockServer, timeout: Duration) -> SessionFlow<TracingNotifier> {
    let client = ApiClient::new(&TestConfig {
        base_url: server.base_url(),
        timeout,
    })
    .unwrap();
    SessionFlow::new(
        client,
        TracingNotifier,
        serde_json::json!({ "personalInfo": { "name": "Sam" } }),
    )
}

fn distinct_words(n: usize) -> String {
    (0..n).map(|i| format!("word{}", i)).collect::<Vec<_>>().join(" ")
}

#[tokio::test]
async fn test_pasted_jd_flows_to_dashboard() -> Result<()> {
    let server = MockServer::start();
    let analyze_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/jds/analyze");
        then.status(200).json_body(serde_json::json!({
            "success": true,
            "data": { "role": "Rust Engineer", "keywords": ["rust", "tokio"] }
        }));
    });
    let score_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/resumes/score");
        then.status(200).json_body(serde_json::json!({
            "success": true,
            "data": { "ats_score": { "overall_score": 82 } }
        }));
    });

    let mut flow = flow_for(&server, Duration::from_secs(5));
    flow.get_started()?;
    assert_eq!(flow.view(), ViewState::JdInput);

    let text = distinct_words(60);
    let verdict = flow.check_input(&text);
    assert!(verdict.valid);
    assert_eq!(verdict.deficit, 0);

    let session = flow.analyze(&text).await?;
    assert_eq!(session.phase, SessionPhase::Complete);
    assert_eq!(session.overall_score(), Some(82));
    assert_eq!(flow.view(), ViewState::Dashboard);

    analyze_mock.assert();
    score_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_short_paste_blocks_orchestration() -> Result<()> {
    let server = MockServer::start();
    let analyze_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/jds/analyze");
        then.status(200).json_body(serde_json::json!({ "success": true, "data": {} }));
    });

    let mut flow = flow_for(&server, Duration::from_secs(5));
    flow.get_started()?;

    let text = distinct_words(10);
    let verdict = flow.check_input(&text);
    assert!(!verdict.valid);
    assert_eq!(verdict.deficit, 40);

    let result = flow.analyze(&text).await;
    assert!(matches!(
        result,
        Err(IntakeError::InsufficientInput { deficit: 40, .. })
    ));

    // 驗證失敗的輸入絕不可觸發網路呼叫
    analyze_mock.assert_hits(0);
    assert_eq!(flow.view(), ViewState::JdInput);
    Ok(())
}

#[tokio::test]
async fn test_upload_size_boundary() -> Result<()> {
    let server = MockServer::start();
    let flow = flow_for(&server, Duration::from_secs(5));

    let sentence = "senior rust engineer building ingestion pipelines ";
    let four_mib: String = sentence.chars().cycle().take(4 * 1024 * 1024).collect();
    let doc = RawDocument::new("jd.txt", "text/plain", four_mib.into_bytes());
    assert!(flow.ingest_document(&doc).is_ok());

    let six_mib: String = sentence.chars().cycle().take(6 * 1024 * 1024).collect();
    let doc = RawDocument::new("jd.txt", "text/plain", six_mib.into_bytes());
    match flow.ingest_document(&doc) {
        Err(IntakeError::TooLarge { size_bytes, limit }) => {
            assert_eq!(size_bytes, 6 * 1024 * 1024);
            assert_eq!(limit, MAX_UPLOAD_BYTES);
        }
        other => panic!("expected TooLarge, got {:?}", other.map(|_| ())),
    }
    Ok(())
}

#[tokio::test]
async fn test_slow_backend_fails_session_and_keeps_view() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/jds/analyze");
        then.status(200)
            .delay(Duration::from_millis(400))
            .json_body(serde_json::json!({ "success": true, "data": {} }));
    });

    // 以縮短的逾時重現 30 秒逾時行為
    let mut flow = flow_for(&server, Duration::from_millis(100));
    flow.get_started()?;

    let session = flow.analyze(&distinct_words(60)).await?;
    assert_eq!(session.phase, SessionPhase::Failed);
    assert!(matches!(session.error, Some(IntakeError::NetworkTimeout)));
    assert_eq!(flow.view(), ViewState::JdInput);
    Ok(())
}

#[tokio::test]
async fn test_scoring_rejection_discards_partial_results() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/jds/analyze");
        then.status(200).json_body(serde_json::json!({
            "success": true,
            "data": { "role": "Rust Engineer" }
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/resumes/score");
        then.status(200)
            .json_body(serde_json::json!({ "success": false, "error": "bad input" }));
    });

    let mut flow = flow_for(&server, Duration::from_secs(5));
    flow.get_started()?;

    let session = flow.analyze(&distinct_words(60)).await?;
    assert_eq!(session.phase, SessionPhase::Failed);
    assert!(session.jd_structured.is_none());
    assert!(session.score_result.is_none());
    match &session.error {
        Some(IntakeError::ServiceRejected { reason }) => assert_eq!(reason, "bad input"),
        other => panic!("expected ServiceRejected, got {:?}", other),
    }
    assert_eq!(flow.view(), ViewState::JdInput);
    Ok(())
}

#[tokio::test]
async fn test_retry_after_failure_starts_fresh_session() -> Result<()> {
    let server = MockServer::start();
    let text = distinct_words(60);

    // 第一次呼叫失敗，之後成功
    let mut failing_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/jds/analyze");
        then.status(503);
    });

    let mut flow = flow_for(&server, Duration::from_secs(5));
    flow.get_started()?;

    let first_id = flow.analyze(&text).await?.id;
    assert_eq!(flow.last_session().map(|s| s.phase), Some(SessionPhase::Failed));
    failing_mock.delete();

    server.mock(|when, then| {
        when.method(POST).path("/api/v1/jds/analyze");
        then.status(200).json_body(serde_json::json!({ "success": true, "data": {} }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/resumes/score");
        then.status(200).json_body(serde_json::json!({
            "success": true,
            "data": { "ats_score": { "overall_score": 71 } }
        }));
    });

    let session = flow.analyze(&text).await?;
    assert!(session.id > first_id);
    assert_eq!(session.phase, SessionPhase::Complete);
    assert_eq!(flow.view(), ViewState::Dashboard);
    Ok(())
}

#[tokio::test]
async fn test_extracted_file_drives_full_flow() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/jds/analyze");
        then.status(200).json_body(serde_json::json!({ "success": true, "data": {} }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/resumes/score");
        then.status(200).json_body(serde_json::json!({
            "success": true,
            "data": { "ats_score": { "overall_score": 64 } }
        }));
    });

    let mut flow = flow_for(&server, Duration::from_secs(5));
    flow.get_started()?;

    let doc = RawDocument::new("posting.txt", "text/plain", distinct_words(80).into_bytes());
    let extracted = flow.ingest_document(&doc)?;
    assert_eq!(extracted.word_count, validator::word_count(&extracted.content));

    let session = flow.analyze(&extracted.content).await?;
    assert_eq!(session.phase, SessionPhase::Complete);
    assert_eq!(flow.view(), ViewState::Dashboard);

    // 完成後可在 Dashboard/Editor 間自由移動
    flow.navigate(ViewState::Editor)?;
    flow.navigate(ViewState::Dashboard)?;
    Ok(())
}
