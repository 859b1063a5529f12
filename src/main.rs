use std::io::Read;

use clap::Parser;
use jd_intake::config::file::TomlConfig;
use jd_intake::domain::model::RawDocument;
use jd_intake::utils::error::ErrorSeverity;
use jd_intake::utils::{logger, validation::Validate};
use jd_intake::{ApiClient, CliConfig, IntakeError, SessionFlow, TracingNotifier};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting jd-intake");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    // 設定檔優先於命令列的服務設定
    let (client, resume_path) = match &config.config {
        Some(path) => {
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            let resume_path = file_config
                .snapshot_path()
                .map(str::to_string)
                .or_else(|| config.resume.clone());
            (ApiClient::new(&file_config)?, resume_path)
        }
        None => (ApiClient::new(&config)?, config.resume.clone()),
    };

    let resume_snapshot: Value = match &resume_path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => serde_json::json!({}),
    };

    let mut flow = SessionFlow::new(client, TracingNotifier, resume_snapshot);
    flow.get_started()?;

    // 貼上模式（stdin）直接取全文；檔案模式先走擷取
    let jd_text = if config.input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        let bytes = std::fs::read(&config.input)?;
        let doc = RawDocument::new(config.input.clone(), "", bytes);
        match flow.ingest_document(&doc) {
            Ok(extracted) => {
                tracing::info!(
                    "📄 Extracted {} words from '{}'",
                    extracted.word_count,
                    extracted.source_name
                );
                extracted.content
            }
            Err(e) => return fail(e),
        }
    };

    let verdict = flow.check_input(&jd_text);
    tracing::info!(
        "📝 Input: {} words, {} characters",
        verdict.word_count,
        verdict.char_count
    );

    let outcome = match flow.analyze(&jd_text).await {
        Ok(session) => {
            let error_report = session
                .error
                .as_ref()
                .map(|e| (e.user_friendly_message(), e.recovery_suggestion(), e.severity()));
            match error_report {
                None => Ok(session.overall_score()),
                Some(report) => Err(report),
            }
        }
        Err(e) => return fail(e),
    };

    match outcome {
        Ok(score) => {
            tracing::info!("✅ Analysis complete");
            println!("✅ Analysis complete");
            match score {
                Some(score) => println!("📊 ATS score: {}%", score),
                None => println!("📊 No overall score in response"),
            }

            if let Some(export_path) = &config.export {
                let bytes = flow.export_pdf("Resume").await?;
                std::fs::write(export_path, bytes)?;
                tracing::info!("📁 Resume PDF saved to: {}", export_path);
                println!("📁 Resume PDF saved to: {}", export_path);
            }
        }
        Err((message, suggestion, severity)) => {
            tracing::error!("❌ Analysis failed: {}", message);
            eprintln!("❌ {}", message);
            eprintln!("💡 {}", suggestion);
            std::process::exit(exit_code(severity));
        }
    }

    Ok(())
}

fn fail(e: IntakeError) -> Result<(), Box<dyn std::error::Error>> {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.severity()));
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 2,
        ErrorSeverity::Critical => 3,
    }
}
