use crate::domain::model::ViewState;
use crate::utils::error::{IntakeError, Result};

/// 應用程式視圖狀態機。所有變更只透過這裡的轉移函式，
/// 視圖本身只讀取目前狀態。
#[derive(Debug)]
pub struct SessionStateMachine {
    current: ViewState,
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStateMachine {
    pub fn new() -> Self {
        Self {
            current: ViewState::Landing,
        }
    }

    pub fn current(&self) -> ViewState {
        self.current
    }

    /// Landing 頁的「開始使用」動作
    pub fn get_started(&mut self) -> Result<()> {
        self.transition_to(ViewState::JdInput, |from| from == ViewState::Landing)
    }

    /// 只能由分析成功完成觸發，從輸入頁進入儀表板
    pub fn analysis_complete(&mut self) -> Result<()> {
        self.transition_to(ViewState::Dashboard, |from| from == ViewState::JdInput)
    }

    /// 側邊導覽列：只在 Dashboard/Editor 顯示，JdInput 不是導覽目標
    pub fn navigate(&mut self, target: ViewState) -> Result<()> {
        if target == ViewState::JdInput {
            return Err(IntakeError::IllegalTransition {
                from: self.current,
                to: target,
            });
        }
        self.transition_to(target, |from| {
            matches!(from, ViewState::Dashboard | ViewState::Editor)
        })
    }

    /// 匯出僅在儀表板或編輯器可用；匯出本身不讀寫視圖狀態
    pub fn can_export(&self) -> bool {
        matches!(self.current, ViewState::Dashboard | ViewState::Editor)
    }

    fn transition_to<F>(&mut self, target: ViewState, allowed_from: F) -> Result<()>
    where
        F: Fn(ViewState) -> bool,
    {
        if !allowed_from(self.current) {
            return Err(IntakeError::IllegalTransition {
                from: self.current,
                to: target,
            });
        }
        tracing::debug!("🧭 View transition: {} -> {}", self.current, target);
        self.current = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_landing() {
        let machine = SessionStateMachine::new();
        assert_eq!(machine.current(), ViewState::Landing);
    }

    #[test]
    fn test_get_started_moves_to_jd_input() {
        let mut machine = SessionStateMachine::new();
        machine.get_started().unwrap();
        assert_eq!(machine.current(), ViewState::JdInput);
    }

    #[test]
    fn test_get_started_only_from_landing() {
        let mut machine = SessionStateMachine::new();
        machine.get_started().unwrap();
        assert!(matches!(
            machine.get_started(),
            Err(IntakeError::IllegalTransition { .. })
        ));
    }

    #[test]
    fn test_dashboard_only_reachable_via_completion() {
        let mut machine = SessionStateMachine::new();
        assert!(machine.analysis_complete().is_err());

        machine.get_started().unwrap();
        machine.analysis_complete().unwrap();
        assert_eq!(machine.current(), ViewState::Dashboard);
    }

    #[test]
    fn test_dashboard_and_editor_are_bidirectional() {
        let mut machine = SessionStateMachine::new();
        machine.get_started().unwrap();
        machine.analysis_complete().unwrap();

        machine.navigate(ViewState::Editor).unwrap();
        assert_eq!(machine.current(), ViewState::Editor);
        machine.navigate(ViewState::Dashboard).unwrap();
        assert_eq!(machine.current(), ViewState::Dashboard);
    }

    #[test]
    fn test_sidebar_can_return_home() {
        let mut machine = SessionStateMachine::new();
        machine.get_started().unwrap();
        machine.analysis_complete().unwrap();
        machine.navigate(ViewState::Landing).unwrap();
        assert_eq!(machine.current(), ViewState::Landing);
    }

    #[test]
    fn test_navigation_surface_absent_before_dashboard() {
        let mut machine = SessionStateMachine::new();
        assert!(machine.navigate(ViewState::Editor).is_err());

        machine.get_started().unwrap();
        assert!(machine.navigate(ViewState::Dashboard).is_err());
        assert_eq!(machine.current(), ViewState::JdInput);
    }

    #[test]
    fn test_jd_input_is_never_a_sidebar_target() {
        let mut machine = SessionStateMachine::new();
        machine.get_started().unwrap();
        machine.analysis_complete().unwrap();
        assert!(machine.navigate(ViewState::JdInput).is_err());
    }

    #[test]
    fn test_export_gate_follows_view() {
        let mut machine = SessionStateMachine::new();
        assert!(!machine.can_export());
        machine.get_started().unwrap();
        assert!(!machine.can_export());
        machine.analysis_complete().unwrap();
        assert!(machine.can_export());
        machine.navigate(ViewState::Editor).unwrap();
        assert!(machine.can_export());
    }

    #[test]
    fn test_failed_transition_leaves_state_unchanged() {
        let mut machine = SessionStateMachine::new();
        machine.get_started().unwrap();
        let _ = machine.navigate(ViewState::Editor);
        assert_eq!(machine.current(), ViewState::JdInput);
    }
}
