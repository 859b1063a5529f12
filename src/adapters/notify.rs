use crate::domain::ports::Notifier;

/// 預設通知通道：寫到 tracing。CLI 沒有 toast 可更新，
/// 以 key 欄位保留訊息身分，讓同一 key 的進度訊息可被對應。
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn progress(&self, key: &str, message: &str) {
        tracing::info!(notice = key, "⏳ {}", message);
    }

    fn success(&self, key: &str, message: &str) {
        tracing::info!(notice = key, "✅ {}", message);
    }

    fn error(&self, key: &str, message: &str) {
        tracing::error!(notice = key, "❌ {}", message);
    }

    fn dismiss(&self, key: &str) {
        tracing::debug!(notice = key, "notice dismissed");
    }
}
