//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::auth;
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::nav::Page;
use crate::overlays::{Overlay, OverlayTransition, OverlayUpdate};
use crate::pages::CalendarTab;
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Session(snapshot) => {
            tracing::debug!(signed_in = snapshot.is_signed_in(), "session snapshot");
            app.tui.session = snapshot;
            vec![]
        }
        UiEvent::TaskStarted { kind, started } => {
            let owned = match kind {
                TaskKind::Auth => {
                    app.overlay.as_ref().and_then(Overlay::pending_task) == Some(started.id)
                }
                TaskKind::SignOut => true,
            };
            if owned {
                app.tui.tasks.state_mut(kind).on_started(&started);
            } else {
                tracing::debug!(?kind, id = started.id.0, "task started after its modal closed");
            }
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if ok {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, id = completed.id.0, "dropping stale task result");
                vec![]
            }
        }
        UiEvent::AuthFinished { operation, result } => {
            auth::handle_auth_finished(app, operation, result)
        }
        UiEvent::SignedOut { result } => auth::handle_signed_out(&mut app.tui, result),
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => {
            if let Some(overlay) = &mut app.overlay {
                overlay.handle_paste(&text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    app.tui.notice = None;

    if let Some(overlay) = &mut app.overlay {
        let update = overlay.handle_key(&mut app.tui, key);
        return apply_overlay_update(app, update);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let page = app.tui.page;
    match key.code {
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Char(c @ '1'..='3') => {
            if let Some(page) = Page::from_key(c) {
                app.tui.page = page;
            }
            vec![]
        }
        KeyCode::Tab => {
            app.tui.page = page.next();
            vec![]
        }
        KeyCode::BackTab => {
            app.tui.page = page.prev();
            vec![]
        }
        KeyCode::Char('l') => {
            auth::open_auth_modal(app);
            vec![]
        }
        KeyCode::Char('o') => auth::request_sign_out(&mut app.tui),
        KeyCode::Char('j') | KeyCode::Enter if page == Page::Home => {
            auth::open_auth_modal(app);
            vec![]
        }
        KeyCode::Char('u') | KeyCode::Left if page == Page::Calendar => {
            app.tui.calendar = CalendarTab::Upcoming;
            vec![]
        }
        KeyCode::Char('p') | KeyCode::Right if page == Page::Calendar => {
            app.tui.calendar = CalendarTab::Past;
            vec![]
        }
        _ => vec![],
    }
}

fn apply_overlay_update(app: &mut AppState, update: OverlayUpdate) -> Vec<UiEffect> {
    match update.transition {
        OverlayTransition::Stay => {}
        OverlayTransition::Close => close_overlay(app),
    }
    update.effects
}

/// Closes the modal. An auth request still in flight keeps running, but its
/// result no longer belongs to any task and is dropped.
fn close_overlay(app: &mut AppState) {
    if app.overlay.take().is_some() {
        app.tui.tasks.state_mut(TaskKind::Auth).clear();
        tracing::debug!("auth modal closed");
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use indyfy_core::auth::{AuthError, AuthOperation, Field, Step};
    use indyfy_core::profile::{Account, AccountId, ProfileDocument, Role};
    use indyfy_core::session::SessionSnapshot;

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskStarted};
    use crate::overlays::OverlayExt;

    fn press(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn account() -> Account {
        Account {
            id: AccountId::new("uid-1"),
            email: "luna@x.com".to_string(),
            display_name: None,
        }
    }

    fn signed_in() -> SessionSnapshot {
        SessionSnapshot {
            account: Some(account()),
            profile: Some(ProfileDocument::new(
                "luna@x.com",
                "Luna",
                Role::Artist,
                Utc::now(),
            )),
        }
    }

    /// Opens the modal, fills a valid registration and submits it.
    fn submit_registration(app: &mut AppState) -> TaskId {
        press(app, KeyCode::Char('l'));
        press(app, KeyCode::Char('a'));
        let state = app.overlay.as_auth_mut().unwrap();
        state.workflow.set_field(Field::Email, "luna@x.com");
        state.workflow.set_field(Field::Username, "Luna");
        state.workflow.set_field(Field::Password, "secret1");
        state.workflow.set_field(Field::ConfirmPassword, "secret1");

        let effects = press(app, KeyCode::Enter);
        let [UiEffect::RunAuth { task, .. }] = effects.as_slice() else {
            panic!("expected RunAuth, got {effects:?}");
        };
        let task = *task;
        update(
            app,
            UiEvent::TaskStarted {
                kind: TaskKind::Auth,
                started: TaskStarted { id: task },
            },
        );
        task
    }

    fn complete(app: &mut AppState, id: TaskId, result: Result<Account, AuthError>) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind: TaskKind::Auth,
                completed: TaskCompleted {
                    id,
                    result: Box::new(UiEvent::AuthFinished {
                        operation: AuthOperation::Registration,
                        result,
                    }),
                },
            },
        )
    }

    #[test]
    fn test_number_keys_and_tab_switch_pages() {
        let mut app = AppState::new();
        assert_eq!(app.tui.page, Page::Home);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.tui.page, Page::Artists);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tui.page, Page::Home);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.tui.page, Page::Artists);
    }

    #[test]
    fn test_calendar_toggle_only_on_calendar_page() {
        let mut app = AppState::new();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.tui.calendar, CalendarTab::Upcoming);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.tui.calendar, CalendarTab::Past);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.tui.calendar, CalendarTab::Upcoming);
    }

    #[test]
    fn test_home_call_to_action_opens_modal() {
        let mut app = AppState::new();
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.overlay, Some(Overlay::Auth(_))));
    }

    #[test]
    fn test_reopened_modal_starts_at_role_choice() {
        let mut app = AppState::new();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('f'));
        app.overlay
            .as_auth_mut()
            .unwrap()
            .workflow
            .set_field(Field::Email, "x@y.com");
        update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(app.overlay.is_none());

        press(&mut app, KeyCode::Char('l'));
        let state = app.overlay.as_auth_mut().unwrap();
        assert_eq!(state.workflow.step(), Step::RoleChoice);
        assert_eq!(state.workflow.role(), None);
        assert_eq!(state.workflow.form().email, "");
    }

    #[test]
    fn test_keys_go_to_modal_while_open() {
        let mut app = AppState::new();
        press(&mut app, KeyCode::Char('l'));

        let effects = press(&mut app, KeyCode::Char('q'));

        assert!(effects.is_empty());
        assert!(app.overlay.is_some());
        assert!(!app.tui.should_quit);
    }

    #[test]
    fn test_successful_registration_closes_and_refreshes() {
        let mut app = AppState::new();
        let task = submit_registration(&mut app);
        assert!(app.tui.tasks.auth.is_running());

        let effects = complete(&mut app, task, Ok(account()));

        assert!(app.overlay.is_none());
        assert!(matches!(effects.as_slice(), [UiEffect::RefreshSession]));
        assert_eq!(app.tui.notice.as_deref(), Some("Signed in as luna@x.com"));
    }

    #[test]
    fn test_failed_registration_keeps_modal_and_form() {
        let mut app = AppState::new();
        let task = submit_registration(&mut app);

        let effects = complete(&mut app, task, Err(AuthError::EmailAlreadyInUse));

        assert!(effects.is_empty());
        let state = app.overlay.as_auth_mut().unwrap();
        assert_eq!(state.workflow.step(), Step::Registration);
        assert_eq!(state.workflow.error(), Some(AuthError::EmailAlreadyInUse));
        assert_eq!(state.workflow.form().email, "luna@x.com");
        assert!(!state.workflow.is_busy());
    }

    #[test]
    fn test_late_result_after_close_is_dropped() {
        let mut app = AppState::new();
        let task = submit_registration(&mut app);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Esc);
        assert!(app.overlay.is_none());

        // A new modal is open when the old result lands.
        press(&mut app, KeyCode::Char('l'));
        let effects = complete(&mut app, task, Ok(account()));

        assert!(effects.is_empty());
        assert!(app.tui.notice.is_none());
        let state = app.overlay.as_auth_mut().unwrap();
        assert_eq!(state.workflow.step(), Step::RoleChoice);
    }

    #[test]
    fn test_task_started_after_close_is_not_tracked() {
        let mut app = AppState::new();
        press(&mut app, KeyCode::Char('l'));
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::Auth,
                started: TaskStarted { id: TaskId(42) },
            },
        );
        assert!(!app.tui.tasks.auth.is_running());
    }

    #[test]
    fn test_session_snapshot_replaces_mirror() {
        let mut app = AppState::new();
        update(&mut app, UiEvent::Session(signed_in()));
        assert_eq!(app.tui.session.display_name(), Some("Luna"));

        update(&mut app, UiEvent::Session(SessionSnapshot::default()));
        assert!(!app.tui.session.is_signed_in());
    }

    #[test]
    fn test_sign_out_requires_session() {
        let mut app = AppState::new();
        assert!(press(&mut app, KeyCode::Char('o')).is_empty());

        app.tui.session = signed_in();
        let effects = press(&mut app, KeyCode::Char('o'));
        assert!(matches!(effects.as_slice(), [UiEffect::SignOut { .. }]));

        let effects = update(
            &mut app,
            UiEvent::SignedOut {
                result: Err("disk full".to_string()),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(app.tui.notice.as_deref(), Some("Sign-out failed: disk full"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = AppState::new();
        assert!(matches!(
            press(&mut app, KeyCode::Char('q')).as_slice(),
            [UiEffect::Quit]
        ));
    }
}
