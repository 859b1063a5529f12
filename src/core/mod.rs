pub mod extractor;
pub mod flow;
pub mod orchestrator;
pub mod state;
pub mod validator;

pub use crate::domain::model::{
    AnalysisSession, ExtractedText, RawDocument, SessionPhase, ValidationVerdict, ViewState,
};
pub use crate::domain::ports::{ConfigProvider, Notifier};
pub use crate::utils::error::Result;
