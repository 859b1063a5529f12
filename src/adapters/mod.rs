// Adapters layer: concrete implementations for external collaborators
// (backend HTTP services, notification channel).

pub mod http;
pub mod notify;
