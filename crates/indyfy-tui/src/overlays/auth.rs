use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use indyfy_core::auth::{AuthError, AuthRequest, AuthWorkflow, Field, Step};
use indyfy_core::profile::{Account, Role};
use ratatui::Frame;
use ratatui::layout::Rect;

use super::OverlayUpdate;
use crate::auth::render_auth_overlay;
use crate::common::TaskId;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// The auth modal: a fresh workflow per opening plus focus bookkeeping.
#[derive(Debug, Default)]
pub struct AuthOverlayState {
    pub workflow: AuthWorkflow,
    /// Highlighted role on the role choice step.
    pub role_cursor: usize,
    /// Index into the current step's fields.
    pub focus: usize,
    task: Option<TaskId>,
}

type Begin = fn(&mut AuthWorkflow) -> Result<AuthRequest, AuthError>;

impl AuthOverlayState {
    /// Opens the modal at the role choice step.
    pub fn open() -> Self {
        tracing::debug!("auth modal opened");
        Self::default()
    }

    pub fn pending_task(&self) -> Option<TaskId> {
        self.task
    }

    /// Field that receives typed characters.
    pub fn focused_field(&self) -> Option<Field> {
        self.workflow.step().fields().get(self.focus).copied()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner_frame: usize) {
        render_auth_overlay(frame, self, area, spinner_frame);
    }

    /// Applies the outcome of the request started by this overlay.
    ///
    /// Returns the account when the modal should close.
    pub fn finish(&mut self, result: Result<Account, AuthError>) -> Option<Account> {
        self.task = None;
        self.workflow.finish(result)
    }

    pub fn handle_key(&mut self, tui: &mut TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return OverlayUpdate::close();
        }

        match self.workflow.step() {
            Step::RoleChoice => self.handle_role_choice_key(key),
            Step::Registration | Step::SignIn => self.handle_form_key(tui, key, ctrl),
        }
    }

    fn handle_role_choice_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let roles = Role::all();
        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Up | KeyCode::Left | KeyCode::BackTab => {
                self.role_cursor = (self.role_cursor + roles.len() - 1) % roles.len();
                OverlayUpdate::stay()
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Tab => {
                self.role_cursor = (self.role_cursor + 1) % roles.len();
                OverlayUpdate::stay()
            }
            KeyCode::Enter => {
                let role = roles.get(self.role_cursor).copied().unwrap_or(Role::Fan);
                self.choose(role)
            }
            KeyCode::Char('a') => self.choose(Role::Artist),
            KeyCode::Char('f') => self.choose(Role::Fan),
            KeyCode::Char('s') => self.navigate(AuthWorkflow::switch_mode),
            _ => OverlayUpdate::stay(),
        }
    }

    /// Applies a step transition; focus resets only when the step changed.
    fn navigate(&mut self, transition: fn(&mut AuthWorkflow)) -> OverlayUpdate {
        let before = self.workflow.step();
        transition(&mut self.workflow);
        if self.workflow.step() != before {
            self.focus = 0;
        }
        OverlayUpdate::stay()
    }

    fn choose(&mut self, role: Role) -> OverlayUpdate {
        if self.workflow.select_role(role).is_ok() {
            self.focus = 0;
        }
        OverlayUpdate::stay()
    }

    fn handle_form_key(&mut self, tui: &mut TuiState, key: KeyEvent, ctrl: bool) -> OverlayUpdate {
        let field_count = self.workflow.step().fields().len();
        match key.code {
            KeyCode::Esc => self.navigate(AuthWorkflow::go_back),
            KeyCode::Char('g') if ctrl => self.submit(tui, AuthWorkflow::begin_federated),
            KeyCode::Char('t') if ctrl => self.navigate(AuthWorkflow::switch_mode),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % field_count.max(1);
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + field_count.max(1) - 1) % field_count.max(1);
                OverlayUpdate::stay()
            }
            KeyCode::Enter => match self.workflow.step() {
                Step::Registration => self.submit(tui, AuthWorkflow::begin_registration),
                Step::SignIn => self.submit(tui, AuthWorkflow::begin_sign_in),
                Step::RoleChoice => OverlayUpdate::stay(),
            },
            KeyCode::Backspace => {
                if let Some(field) = self.focused_field() {
                    self.workflow.pop_char(field);
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(field) = self.focused_field() {
                    self.workflow.push_char(field, c);
                }
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    /// Inserts pasted text into the focused field, dropping line breaks.
    pub fn handle_paste(&mut self, text: &str) {
        let Some(field) = self.focused_field() else {
            return;
        };
        for c in text.chars().filter(|c| !c.is_control()) {
            self.workflow.push_char(field, c);
        }
    }

    fn submit(&mut self, tui: &mut TuiState, begin: Begin) -> OverlayUpdate {
        match begin(&mut self.workflow) {
            Ok(request) => {
                let task = tui.task_seq.next_id();
                self.task = Some(task);
                tracing::debug!(operation = ?request.operation(), "auth request submitted");
                OverlayUpdate::stay().with_ui_effects(vec![UiEffect::RunAuth { task, request }])
            }
            Err(error) => {
                tracing::debug!(?error, "auth submit not started");
                OverlayUpdate::stay()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use indyfy_core::auth::AuthOperation;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(state: &mut AuthOverlayState, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            state.handle_key(tui, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_role_choice_moves_to_registration() {
        let mut tui = TuiState::default();
        let mut state = AuthOverlayState::open();

        state.handle_key(&mut tui, key(KeyCode::Down));
        state.handle_key(&mut tui, key(KeyCode::Enter));

        assert_eq!(state.workflow.step(), Step::Registration);
        assert_eq!(state.workflow.role(), Some(Role::all()[1]));
        assert_eq!(state.focused_field(), Some(Field::Username));
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut tui = TuiState::default();
        let mut state = AuthOverlayState::open();
        state.handle_key(&mut tui, key(KeyCode::Char('a')));

        type_text(&mut state, &mut tui, "Luna");
        state.handle_key(&mut tui, key(KeyCode::Tab));
        type_text(&mut state, &mut tui, "luna@x.com");
        state.handle_key(&mut tui, key(KeyCode::Backspace));

        assert_eq!(state.workflow.form().username, "Luna");
        assert_eq!(state.workflow.form().email, "luna@x.co");
    }

    #[test]
    fn test_mismatch_is_retained_without_effect() {
        let mut tui = TuiState::default();
        let mut state = AuthOverlayState::open();
        state.handle_key(&mut tui, key(KeyCode::Char('f')));
        state.workflow.set_field(Field::Password, "abc123");
        state.workflow.set_field(Field::ConfirmPassword, "abc124");

        let update = state.handle_key(&mut tui, key(KeyCode::Enter));

        assert!(update.effects.is_empty());
        assert_eq!(state.workflow.error(), Some(AuthError::PasswordMismatch));
        assert_eq!(state.pending_task(), None);
    }

    #[test]
    fn test_valid_registration_emits_run_auth() {
        let mut tui = TuiState::default();
        let mut state = AuthOverlayState::open();
        state.handle_key(&mut tui, key(KeyCode::Char('a')));
        state.workflow.set_field(Field::Email, "luna@x.com");
        state.workflow.set_field(Field::Username, "Luna");
        state.workflow.set_field(Field::Password, "secret1");
        state.workflow.set_field(Field::ConfirmPassword, "secret1");

        let update = state.handle_key(&mut tui, key(KeyCode::Enter));

        let [UiEffect::RunAuth { task, request }] = update.effects.as_slice() else {
            panic!("expected one RunAuth effect, got {:?}", update.effects);
        };
        assert_eq!(request.operation(), AuthOperation::Registration);
        assert_eq!(state.pending_task(), Some(*task));
        assert!(state.workflow.is_busy());

        // A second Enter while busy does nothing.
        let update = state.handle_key(&mut tui, key(KeyCode::Enter));
        assert!(update.effects.is_empty());
    }

    #[test]
    fn test_federated_from_sign_in_without_role_is_rejected() {
        let mut tui = TuiState::default();
        let mut state = AuthOverlayState::open();
        state.handle_key(&mut tui, key(KeyCode::Char('s')));
        assert_eq!(state.workflow.step(), Step::SignIn);

        let update = state.handle_key(&mut tui, ctrl('g'));

        assert!(update.effects.is_empty());
        assert_eq!(state.workflow.error(), Some(AuthError::RoleRequired));
    }

    #[test]
    fn test_escape_goes_back_then_closes() {
        let mut tui = TuiState::default();
        let mut state = AuthOverlayState::open();
        state.handle_key(&mut tui, key(KeyCode::Char('a')));

        let update = state.handle_key(&mut tui, key(KeyCode::Esc));
        assert!(matches!(update.transition, OverlayTransition::Stay));
        assert_eq!(state.workflow.step(), Step::RoleChoice);

        let update = state.handle_key(&mut tui, key(KeyCode::Esc));
        assert!(matches!(update.transition, OverlayTransition::Close));
    }

    #[test]
    fn test_escape_and_mode_switch_wait_for_running_request() {
        let mut tui = TuiState::default();
        let mut state = AuthOverlayState::open();
        state.handle_key(&mut tui, key(KeyCode::Char('a')));
        state.workflow.set_field(Field::Email, "luna@x.com");
        state.workflow.set_field(Field::Password, "secret1");
        state.workflow.set_field(Field::ConfirmPassword, "secret1");
        state.handle_key(&mut tui, key(KeyCode::Tab));
        state.handle_key(&mut tui, key(KeyCode::Enter));
        assert!(state.workflow.is_busy());

        let update = state.handle_key(&mut tui, key(KeyCode::Esc));
        assert!(matches!(update.transition, OverlayTransition::Stay));
        state.handle_key(&mut tui, ctrl('t'));

        assert_eq!(state.workflow.step(), Step::Registration);
        assert_eq!(state.focused_field(), Some(Field::Email));
    }

    #[test]
    fn test_paste_skips_control_characters() {
        let mut tui = TuiState::default();
        let mut state = AuthOverlayState::open();
        state.handle_key(&mut tui, key(KeyCode::Char('s')));

        state.handle_paste("luna@x.com\n");

        assert_eq!(state.workflow.form().email, "luna@x.com");
    }
}
