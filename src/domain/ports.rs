use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}

/// 通知通道：fire-and-forget，同一 key 的訊息就地更新而非新增
pub trait Notifier: Send + Sync {
    fn progress(&self, key: &str, message: &str);
    fn success(&self, key: &str, message: &str);
    fn error(&self, key: &str, message: &str);
    fn dismiss(&self, key: &str);
}
