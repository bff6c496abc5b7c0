//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! Async results come back through an inbox channel. Handlers are pure async
//! functions returning a `UiEvent`; `spawn_task` wraps them in the
//! `TaskStarted`/`TaskCompleted` lifecycle. Session snapshots are read from
//! the observer's watch channel once per loop iteration.

mod handlers;
mod inbox;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use indyfy_core::identity::IdentityService;
use indyfy_core::session::{SessionObserver, SessionSnapshot};
use tokio::sync::{mpsc, watch};

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::{self, CrosstermTerminal, TerminalGuard};
use crate::{render, update};

/// Tick interval while something is happening (spinner, typing).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Dropping it gives the terminal back.
pub struct TuiRuntime {
    terminal: CrosstermTerminal,
    _guard: TerminalGuard,
    /// Application state (split: tui + overlay).
    pub state: AppState,
    service: Arc<dyn IdentityService>,
    session: Option<SessionObserver>,
    session_rx: watch::Receiver<SessionSnapshot>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Creates the runtime and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(service: Arc<dyn IdentityService>, session: SessionObserver) -> Result<Self> {
        let (terminal, guard) = terminal::enter().context("Failed to setup terminal")?;

        let mut session_rx = session.subscribe();
        let state = AppState::with_session(session_rx.borrow_and_update().clone());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            _guard: guard,
            state,
            service,
            session: Some(session),
            session_rx,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Hands the session observer back so the caller can shut it down.
    pub fn take_session(&mut self) -> Option<SessionObserver> {
        self.session.take()
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if reading input or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Only Tick triggers render; other events batch into the next one.
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.tasks.is_any_running() || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        self.collect_session_events(&mut events);
        self.collect_inbox_events(&mut events);

        // Block until the next tick only when there is nothing to process yet.
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    /// Forwards the latest session snapshot, if it changed.
    fn collect_session_events(&mut self, events: &mut Vec<UiEvent>) {
        // An error means the observer stopped; the last snapshot stays.
        if self.session_rx.has_changed().unwrap_or(false) {
            let snapshot = self.session_rx.borrow_and_update().clone();
            events.push(UiEvent::Session(snapshot));
        }
    }

    fn collect_inbox_events(&mut self, events: &mut Vec<UiEvent>) {
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform `TaskStarted`/`TaskCompleted` lifecycle.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let _ = tx.send(UiEvent::TaskStarted {
            kind,
            started: TaskStarted { id },
        });
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::RunAuth { task, request } => {
                let service = Arc::clone(&self.service);
                self.spawn_task(TaskKind::Auth, task, move || {
                    handlers::run_auth(service, request)
                });
            }
            UiEffect::SignOut { task } => {
                let service = Arc::clone(&self.service);
                self.spawn_task(TaskKind::SignOut, task, move || handlers::sign_out(service));
            }
            UiEffect::RefreshSession => {
                if let Some(session) = &self.session {
                    session.refresh();
                }
            }
        }
    }
}
