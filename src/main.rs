//! Terminal Blockfall runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from
//! `blockfall-term`. Everything runs on this one thread: key events are
//! applied as they arrive and elapsed time is fed to the game and the
//! row-clear sweep once per frame.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::config::AppConfig;
use blockfall::core::{GameEvent, GameState};
use blockfall::input::{handle_key_event, handle_key_release, should_quit, SoftDropGrace};
use blockfall::persist::{load_high_score, save_high_score, EventLog};
use blockfall::term::{ClearAnimation, FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    let prior_high_score = match &config.high_score_path {
        Some(path) => load_high_score(path).unwrap_or_else(|e| {
            eprintln!("[blockfall] {}", e);
            0
        }),
        None => 0,
    };

    let event_log = match &config.event_log_path {
        Some(path) => match EventLog::open(path) {
            Ok(log) => Some(log),
            Err(e) => {
                eprintln!("[blockfall] {}", e);
                None
            }
        },
        None => None,
    };

    let mut app = App::new(config, prior_high_score, event_log);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = app.run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();

    for warning in &app.warnings {
        eprintln!("[blockfall] {}", warning);
    }
    eprintln!(
        "[blockfall] score {} level {} best {}",
        app.game.score(),
        app.game.level(),
        app.game.high_score()
    );
    result
}

struct App {
    config: AppConfig,
    game: GameState,
    view: GameView,
    grace: SoftDropGrace,
    clearing: Option<ClearAnimation>,
    event_log: Option<EventLog>,
    /// Reported on stderr once the terminal is restored
    warnings: Vec<String>,
}

impl App {
    fn new(config: AppConfig, prior_high_score: u32, event_log: Option<EventLog>) -> Self {
        Self {
            game: GameState::new(config.game_config(prior_high_score)),
            view: GameView::new(config.flavor),
            grace: SoftDropGrace::new(),
            clearing: None,
            event_log,
            warnings: Vec::new(),
            config,
        }
    }

    fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let tick_duration = Duration::from_millis(TICK_MS as u64);
        let mut last_tick = Instant::now();

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let mut fb = FrameBuffer::new(w, h);
        let mut snap = self.game.snapshot();

        loop {
            // Render; skipped when nothing visible changed.
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            if self.game.revision() != snap.revision {
                self.game.snapshot_into(&mut snap);
            }
            term.present(
                &self.view,
                &snap,
                self.clearing.as_ref(),
                Viewport::new(w, h),
                &mut fb,
            )?;

            // Input with timeout until next frame.
            let timeout = tick_duration
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => match key.kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            if should_quit(key) {
                                return Ok(());
                            }
                            if let Some(action) = handle_key_event(key).and_then(|a| self.grace.filter(a)) {
                                self.apply(action);
                            }
                        }
                        KeyEventKind::Release => {
                            if let Some(action) = handle_key_release(key).and_then(|a| self.grace.filter(a)) {
                                self.apply(action);
                            }
                        }
                    },
                    Event::Resize(..) => term.invalidate(),
                    _ => {}
                }
            }

            // Frame.
            let elapsed = last_tick.elapsed();
            if elapsed >= tick_duration {
                last_tick = Instant::now();
                let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
                self.frame(elapsed_ms);
            }
        }
    }

    fn frame(&mut self, elapsed_ms: u32) {
        if let Some(action) = self.grace.update(elapsed_ms) {
            self.apply(action);
        }

        let swept = self
            .clearing
            .as_mut()
            .is_some_and(|anim| anim.advance(elapsed_ms));
        if swept {
            self.clearing = None;
            self.game.on_clear_animation_complete();
        }

        self.game.advance(elapsed_ms);
        self.dispatch_events();
    }

    fn apply(&mut self, action: GameAction) {
        if action == GameAction::Restart {
            self.clearing = None;
        }
        self.game.apply_action(action);
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        for event in self.game.take_events() {
            match event {
                GameEvent::ClearAnimationRequested { rows } => {
                    self.clearing = Some(ClearAnimation::new(rows));
                }
                GameEvent::Broadcast(net) => {
                    let written = self.event_log.as_mut().map(|log| log.record(&net));
                    if let Some(Err(e)) = written {
                        self.warnings.push(e.to_string());
                        self.event_log = None;
                    }
                }
                GameEvent::HighScore { score } => {
                    if let Some(path) = &self.config.high_score_path {
                        if let Err(e) = save_high_score(path, score) {
                            self.warnings.push(e.to_string());
                        }
                    }
                }
                // The view reads score, level and phase from the snapshot;
                // there is no audio in the terminal.
                GameEvent::ScoreChanged { .. } | GameEvent::GameOver { .. } | GameEvent::Sound(_) => {}
            }
        }
    }
}
