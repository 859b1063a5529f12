use regex::Regex;
use std::sync::LazyLock;

use crate::core::validator::word_count;
use crate::domain::model::{ExtractedText, RawDocument};
use crate::utils::error::{IntakeError, Result};

/// 上傳大小上限（5 MiB），在任何解碼之前檢查
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// 啟發式擷取的最低可用字元數，低於此值視為掃描檔或壓縮容器
pub const MIN_EXTRACTED_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
}

static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{3,}").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
// Word 的 run-text 標籤，直接掃描原始位元組解碼後的字串，不解開容器
static RUN_TEXT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:t[^>]*>([^<]*)</w:t>").unwrap());

/// 從上傳文件產生純文字。同一份文件重複呼叫結果相同。
pub fn extract(doc: &RawDocument) -> Result<ExtractedText> {
    if doc.size_bytes() > MAX_UPLOAD_BYTES {
        return Err(IntakeError::TooLarge {
            size_bytes: doc.size_bytes(),
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let kind = detect_kind(doc)?;
    tracing::debug!("📄 Extracting '{}' as {:?}", doc.name, kind);

    let raw = String::from_utf8_lossy(&doc.bytes);
    let content = match kind {
        DocumentKind::PlainText => raw.into_owned(),
        DocumentKind::Pdf => scrub_binary_text(&raw),
        DocumentKind::Docx => harvest_run_text(&raw),
    };

    if content.trim().is_empty() {
        return Err(IntakeError::EmptyDocument);
    }

    let chars = content.chars().count();
    if kind != DocumentKind::PlainText && chars < MIN_EXTRACTED_CHARS {
        return Err(IntakeError::LowYieldExtraction { chars });
    }

    Ok(ExtractedText {
        word_count: word_count(&content),
        char_count: chars,
        source_name: doc.name.clone(),
        source_size_bytes: doc.size_bytes(),
        content,
    })
}

/// 副檔名或宣告的 media type 任一匹配即接受；兩者皆不可信時拒絕
fn detect_kind(doc: &RawDocument) -> Result<DocumentKind> {
    let extension = doc.extension();
    let media_type = doc.declared_media_type.to_ascii_lowercase();

    let kind = match extension.as_str() {
        "txt" => Some(DocumentKind::PlainText),
        "pdf" => Some(DocumentKind::Pdf),
        "docx" => Some(DocumentKind::Docx),
        _ => match media_type.as_str() {
            "text/plain" => Some(DocumentKind::PlainText),
            "application/pdf" => Some(DocumentKind::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            | "application/msword" => Some(DocumentKind::Docx),
            _ => None,
        },
    };

    kind.ok_or_else(|| IntakeError::UnsupportedType {
        name: doc.name.clone(),
        media_type: doc.declared_media_type.clone(),
    })
}

/// PDF 路徑：非可列印 ASCII 以空白取代，3+ 連續空白折疊成段落分隔
fn scrub_binary_text(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if (' '..='~').contains(&ch) || matches!(ch, '\n' | '\r' | '\t') {
            cleaned.push(ch);
        } else {
            cleaned.push(' ');
        }
    }

    WHITESPACE_RUNS.replace_all(&cleaned, "\n\n").trim().to_string()
}

/// DOCX 路徑：收集 <w:t> 標籤內文。壓縮過的容器通常掃不到標籤，
/// 會落入 LowYieldExtraction / EmptyDocument，由使用者改貼純文字。
fn harvest_run_text(raw: &str) -> String {
    let fragments: Vec<&str> = RUN_TEXT_TAG
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    let joined = fragments.join(" ");
    WHITESPACE.replace_all(&joined, " ").trim().to_string()
}
