//! Game state module - the rules state machine
//!
//! This module ties together all core components: board, catalog, generator,
//! scoring and the drop scheduler. It owns the active and next piece, the
//! run/pause/over lifecycle, score and level, and the row-clear handshake
//! with the animation collaborator.
//!
//! Everything runs on the caller's thread. Player operations run to
//! completion before the next call, and drop ticks only fire from
//! [`GameState::advance`], so a tick can never interleave with a move.

use std::mem;

use crate::board::{Board, RowList};
use crate::catalog;
use crate::collision::{can_place, spawn_blocked};
use crate::events::{GameEvent, NetEvent, SoundCue};
use crate::generator::{KindPolicy, Piece, PieceGenerator};
use crate::scheduler::{interval_for, DropScheduler};
use crate::scoring::{award, recompute_level, updated_high_score};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::*;

/// Most events queued between two drains
pub const EVENT_QUEUE_CAPACITY: usize = 16;

/// Explicit inputs of a run; nothing is read from ambient storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub mode: GameMode,
    pub kind_policy: KindPolicy,
    /// Best score before this run, compared against on top-out
    pub prior_high_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            mode: GameMode::Single,
            kind_policy: KindPolicy::Uniform,
            prior_high_score: 0,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Piece>,
    next: Option<Piece>,
    generator: PieceGenerator,
    phase: Phase,
    fast_forward: bool,
    score: u32,
    level: u32,
    high_score: u32,
    scheduler: DropScheduler,
    /// Rows handed to the clear animation and not yet removed
    pending_clear: Option<RowList>,
    /// Bumped on every change a snapshot would show
    revision: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game. The first next piece exists right away so the
    /// preview can show it before the run starts.
    pub fn new(config: GameConfig) -> Self {
        let mut generator = PieceGenerator::new(config.kind_policy.clone(), config.seed);
        let next = generator.generate();

        Self {
            high_score: config.prior_high_score,
            config,
            board: Board::new(),
            active: None,
            next: Some(next),
            generator,
            phase: Phase::Idle,
            fast_forward: false,
            score: 0,
            level: START_LEVEL,
            scheduler: DropScheduler::new(),
            pending_clear: None,
            revision: 0,
            events: Vec::with_capacity(EVENT_QUEUE_CAPACITY),
        }
    }

    /// Idle game on an existing board, for setting up positions
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        let mut state = Self::new(config);
        state.board = board;
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn fast_forward(&self) -> bool {
        self.fast_forward
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Best of the prior high score and this run's final score
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up positions in tests and tools
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Rows waiting for the clear animation, if any
    pub fn pending_clear(&self) -> Option<&RowList> {
        self.pending_clear.as_ref()
    }

    /// Changes whenever [`GameState::snapshot`] would differ: geometry,
    /// score, phase, fast-forward. Render sinks redraw on change.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Current drop interval for this level and fast-forward state
    pub fn drop_interval_ms(&self) -> u32 {
        interval_for(self.level, self.fast_forward)
    }

    pub fn scheduler(&self) -> &DropScheduler {
        &self.scheduler
    }

    /// Drain queued collaborator events, oldest first.
    ///
    /// Hosts drain after every call that can change the game. The queue holds
    /// at most [`EVENT_QUEUE_CAPACITY`] events; past that the oldest display
    /// event (`ScoreChanged`, `Sound`) is evicted, or the oldest event if
    /// there is none.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Take queued events as an owned list
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Gameplay input is accepted only while running with no clear animation
    /// outstanding.
    fn accepts_input(&self) -> bool {
        self.phase == Phase::Running && self.pending_clear.is_none()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= EVENT_QUEUE_CAPACITY {
            let evict = self
                .events
                .iter()
                .position(|e| matches!(e, GameEvent::ScoreChanged { .. } | GameEvent::Sound(_)))
                .unwrap_or(0);
            self.events.remove(evict);
        }
        self.events.push(event);
    }

    fn emit_score(&mut self) {
        self.emit(GameEvent::ScoreChanged {
            score: self.score,
            level: self.level,
        });
    }

    /// Re-derive the interval and re-arm the schedule, replacing any pending
    /// one. Disarms instead when not running or while a clear is outstanding.
    fn restart_schedule(&mut self) {
        if self.accepts_input() {
            self.scheduler.restart(self.drop_interval_ms());
        } else {
            self.scheduler.cancel();
        }
    }

    /// Start the run: spawn the first piece and arm the drop schedule.
    /// Only valid from `Idle`; returns false otherwise.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Running;
        self.emit_score();
        if self.spawn() {
            self.restart_schedule();
        }
        true
    }

    /// Promote the next piece to active and generate a new next piece.
    ///
    /// If the new active piece overlaps settled cells at its spawn placement
    /// the run tops out. Returns false on top-out, when there is no run, or
    /// while a piece is still falling or a clear is outstanding.
    pub fn spawn(&mut self) -> bool {
        if matches!(self.phase, Phase::Idle | Phase::Over)
            || self.active.is_some()
            || self.pending_clear.is_some()
        {
            return false;
        }

        let piece = match self.next.take() {
            Some(piece) => piece,
            None => self.generator.generate(),
        };
        self.next = Some(self.generator.generate());
        self.active = Some(piece);
        self.touch();

        if spawn_blocked(&self.board, piece.kind, piece.rotation, piece.offset()) {
            self.top_out();
            return false;
        }
        true
    }

    fn top_out(&mut self) {
        self.phase = Phase::Over;
        self.active = None;
        self.next = None;
        self.fast_forward = false;
        self.pending_clear = None;
        self.scheduler.cancel();
        self.touch();

        let score = self.score;
        self.emit(GameEvent::GameOver { score });
        match self.config.mode {
            GameMode::Versus => self.emit(GameEvent::Broadcast(NetEvent::GameOver)),
            GameMode::Single => {
                if let Some(best) = updated_high_score(self.config.prior_high_score, score) {
                    self.high_score = best;
                    self.emit(GameEvent::HighScore { score: best });
                }
            }
        }
    }

    /// Move the active piece by `(d_row, d_col)`.
    ///
    /// Commits and returns true if the target placement is legal; otherwise
    /// leaves everything unchanged and returns false. A no-op outside of
    /// `Running`.
    pub fn try_move(&mut self, d_row: i8, d_col: i8) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let target = (active.row + d_row, active.col + d_col);
        if !can_place(&self.board, active.kind, active.rotation, target) {
            return false;
        }

        self.active = Some(Piece {
            row: target.0,
            col: target.1,
            ..active
        });
        self.touch();
        true
    }

    /// Rotate by `step` states in place. Rejected silently if the new state
    /// does not fit at the current offset; no kick positions are tried.
    pub fn rotate(&mut self, step: i32) {
        if !self.accepts_input() {
            return;
        }
        let Some(active) = self.active else {
            return;
        };

        let rotation = catalog::wrap_rotation(active.kind, active.rotation, step);
        if rotation == active.rotation {
            return;
        }
        if can_place(&self.board, active.kind, rotation, active.offset()) {
            self.active = Some(Piece { rotation, ..active });
            self.touch();
        }
    }

    /// Press (`true`) or release (`false`) fast-forward.
    ///
    /// Pressing first tries a one-row move; if the piece is already resting
    /// the press is ignored. Releasing always clears the flag so a release
    /// during pause does not leave fast-forward stuck. The schedule is
    /// re-derived whenever the flag actually changes.
    pub fn soft_drop(&mut self, enable: bool) {
        if self.fast_forward == enable {
            return;
        }
        if enable && !self.try_move(1, 0) {
            return;
        }
        self.fast_forward = enable;
        self.touch();
        if self.accepts_input() {
            self.restart_schedule();
        }
    }

    /// Drop to the lowest legal row and land immediately
    pub fn hard_drop(&mut self) {
        if !self.accepts_input() || self.active.is_none() {
            return;
        }
        while self.try_move(1, 0) {}
        self.land();
    }

    /// One drop step: move down a row, or land if that is impossible
    pub fn tick(&mut self) {
        if !self.accepts_input() || self.active.is_none() {
            return;
        }
        if !self.try_move(1, 0) {
            self.land();
        }
    }

    /// Feed elapsed time to the drop scheduler and run every tick that falls
    /// due. Returns the number of ticks run.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let mut budget = elapsed_ms;
        let mut ticks = 0;
        while let Some(rest) = self.scheduler.consume(budget) {
            self.tick();
            ticks += 1;
            budget = rest;
        }
        ticks
    }

    /// Merge the active piece into the board.
    ///
    /// With filled rows, the schedule stops and the rows go to the clear
    /// animation; the run continues from [`GameState::on_clear_animation_complete`].
    /// Without, the next piece spawns right away.
    fn land(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        self.board.settle(&active.cells(), active.kind.cell_value());
        self.touch();

        let rows = self.board.filled_rows();
        if rows.is_empty() {
            if self.spawn() {
                self.restart_schedule();
            }
            return;
        }

        self.scheduler.cancel();
        self.pending_clear = Some(rows.clone());
        self.emit(GameEvent::ClearAnimationRequested { rows });
    }

    /// Completion callback of the clear animation. Returns false if no clear
    /// was outstanding.
    pub fn on_clear_animation_complete(&mut self) -> bool {
        match self.pending_clear.clone() {
            Some(rows) => self.clear_rows_and_continue(&rows),
            None => false,
        }
    }

    /// Remove `rows`, score them, re-check the level, spawn the next piece
    /// and re-arm the schedule.
    ///
    /// `rows` must be exactly the outstanding clear handed out with
    /// [`GameEvent::ClearAnimationRequested`]; anything else is ignored and
    /// returns false.
    pub fn clear_rows_and_continue(&mut self, rows: &[usize]) -> bool {
        if matches!(self.phase, Phase::Idle | Phase::Over) {
            return false;
        }
        match &self.pending_clear {
            Some(pending) if pending.as_slice() == rows => {}
            _ => return false,
        }
        self.pending_clear = None;

        let cleared = self.board.clear_rows(rows);
        self.touch();

        self.score = self.score.saturating_add(award(self.level, cleared));
        self.level = recompute_level(self.score, self.level);
        self.emit_score();
        if self.config.mode == GameMode::Versus {
            self.emit(GameEvent::Broadcast(NetEvent::Score { score: self.score }));
        }
        self.emit(GameEvent::Sound(SoundCue::LineClear));

        if self.spawn() {
            self.restart_schedule();
        }
        true
    }

    /// `Running <-> Paused`. Pausing cancels the schedule, resuming re-arms
    /// it. Returns false when neither applies.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.scheduler.cancel();
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                // A clear finishing during pause already spawned the next
                // piece; one outstanding now resumes from its callback.
                self.restart_schedule();
            }
            Phase::Idle | Phase::Over => return false,
        }
        self.touch();
        self.emit(GameEvent::Sound(SoundCue::Pause));
        true
    }

    /// Replace this run with a fresh idle one. The piece sequence continues
    /// and the best high score carries over.
    pub fn restart(&mut self) {
        let config = GameConfig {
            seed: self.generator.seed(),
            prior_high_score: self.high_score.max(self.config.prior_high_score),
            ..self.config.clone()
        };
        let revision = self.revision.wrapping_add(1);
        *self = Self::new(config);
        self.revision = revision;
    }

    /// Apply a player action. Actions that do not apply in the current phase
    /// are no-ops.
    pub fn apply_action(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => {
                self.try_move(0, -1);
            }
            GameAction::MoveRight => {
                self.try_move(0, 1);
            }
            GameAction::Rotate => self.rotate(1),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::SoftDropPress => self.soft_drop(true),
            GameAction::SoftDropRelease => self.soft_drop(false),
            GameAction::StartPause => {
                if !self.start() {
                    self.toggle_pause();
                }
            }
            GameAction::Restart => self.restart(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = self.active.map(PieceSnapshot::from);
        out.next = self.next.map(|p| PieceSnapshot {
            kind: p.kind,
            rotation: p.rotation,
            cells: p.shape(),
        });
        out.phase = self.phase;
        out.fast_forward = self.fast_forward;
        out.score = self.score;
        out.level = self.level;
        out.high_score = self.high_score;
        out.drop_interval_ms = self.drop_interval_ms();
        out.clearing.clear();
        if let Some(rows) = &self.pending_clear {
            out.clearing.extend(rows.iter().copied());
        }
        out.revision = self.revision;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(kinds: &[PieceKind]) -> GameState {
        GameState::new(GameConfig {
            kind_policy: KindPolicy::Scripted(kinds.to_vec()),
            ..GameConfig::default()
        })
    }

    fn fill_row_except(board: &mut Board, row: i8, gaps: &[i8]) {
        for col in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&col) {
                board.set(row, col, PieceKind::Z.cell_value());
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::default();

        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert!(state.active().is_none());
        assert!(state.next().is_some());
        assert!(!state.scheduler().is_armed());
    }

    #[test]
    fn test_start_spawns_next_and_arms_schedule() {
        let mut state = scripted(&[PieceKind::T, PieceKind::I]);
        assert!(state.start());

        let active = state.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!(active.offset(), (SPAWN_ROW, SPAWN_COL));
        assert_eq!(state.next().unwrap().kind, PieceKind::I);
        assert_eq!(state.scheduler().interval_ms(), Some(880));

        // Only valid from idle.
        assert!(!state.start());
    }

    #[test]
    fn test_start_emits_initial_score() {
        let mut state = GameState::default();
        state.start();
        let events = state.take_events();
        assert_eq!(events[0], GameEvent::ScoreChanged { score: 0, level: 1 });
    }

    #[test]
    fn test_operations_are_noops_when_idle() {
        let mut state = GameState::default();
        let before = state.revision();

        assert!(!state.try_move(0, 1));
        state.rotate(1);
        state.soft_drop(true);
        state.hard_drop();
        state.tick();

        assert_eq!(state.revision(), before);
        assert!(!state.fast_forward());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_move_rejected_leaves_state() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        for _ in 0..4 {
            assert!(state.try_move(0, -1));
        }
        let at_wall = state.active().unwrap();
        assert!(!state.try_move(0, -1));
        assert_eq!(state.active().unwrap(), at_wall);
    }

    #[test]
    fn test_rotation_cycles_back() {
        for (kind, count) in [
            (PieceKind::T, 4),
            (PieceKind::L, 4),
            (PieceKind::J, 4),
            (PieceKind::I, 2),
            (PieceKind::S, 2),
            (PieceKind::Z, 2),
            (PieceKind::O, 1),
        ] {
            let mut state = scripted(&[kind]);
            state.start();
            // Give room to rotate the tall states.
            state.try_move(2, 0);
            let start = state.active().unwrap().rotation;
            for i in 1..=count {
                state.rotate(1);
                let expected = i % count;
                assert_eq!(state.active().unwrap().rotation, expected, "{:?}", kind);
            }
            assert_eq!(state.active().unwrap().rotation, start);
        }
    }

    #[test]
    fn test_rotation_rejected_against_wall() {
        let mut state = scripted(&[PieceKind::I]);
        state.start();
        state.try_move(2, 0);
        state.rotate(1);
        // Vertical I hugs frame column 1; push the frame so that column is 0.
        while state.try_move(0, -1) {}
        assert_eq!(state.active().unwrap().col, -1);

        // Horizontal would need columns -1..=2: rejected, no kick.
        state.rotate(1);
        let active = state.active().unwrap();
        assert_eq!(active.rotation, 1);
        assert_eq!(active.col, -1);
    }

    #[test]
    fn test_negative_rotation_step_wraps() {
        let mut state = scripted(&[PieceKind::T]);
        state.start();
        state.try_move(2, 0);
        state.rotate(-1);
        assert_eq!(state.active().unwrap().rotation, 3);
    }

    #[test]
    fn test_tick_moves_down_then_lands() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]);
        state.start();

        state.tick();
        assert_eq!(state.active().unwrap().row, 1);

        while state.active().unwrap().kind == PieceKind::O {
            state.tick();
        }
        // O settled on the floor rows 18..=19, columns 4..=5.
        assert_eq!(state.board().cell_at(19, 4), Some(1));
        assert_eq!(state.board().cell_at(18, 5), Some(1));
        assert_eq!(state.active().unwrap().kind, PieceKind::T);
    }

    #[test]
    fn test_hard_drop_settles_at_floor() {
        let mut state = scripted(&[PieceKind::I, PieceKind::O]);
        state.start();
        state.hard_drop();

        for col in 3..7 {
            assert_eq!(state.board().cell_at(19, col), Some(2));
        }
        assert_eq!(state.active().unwrap().kind, PieceKind::O);
        assert!(state.scheduler().is_armed());
    }

    #[test]
    fn test_soft_drop_toggles_interval() {
        let mut state = GameState::default();
        state.start();
        assert_eq!(state.drop_interval_ms(), 880);

        state.soft_drop(true);
        assert!(state.fast_forward());
        assert_eq!(state.scheduler().interval_ms(), Some(80));
        assert_eq!(state.active().unwrap().row, 1);

        state.soft_drop(false);
        assert!(!state.fast_forward());
        assert_eq!(state.scheduler().interval_ms(), Some(880));
    }

    #[test]
    fn test_soft_drop_ignored_when_resting() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        while state.try_move(1, 0) {}
        let resting = state.active().unwrap();

        state.soft_drop(true);
        assert!(!state.fast_forward());
        assert_eq!(state.active().unwrap(), resting);
    }

    #[test]
    fn test_soft_drop_release_during_pause() {
        let mut state = GameState::default();
        state.start();
        state.soft_drop(true);
        state.toggle_pause();

        state.soft_drop(false);
        assert!(!state.fast_forward());
        assert!(!state.scheduler().is_armed());

        state.toggle_pause();
        assert_eq!(state.scheduler().interval_ms(), Some(880));
    }

    #[test]
    fn test_pause_cancels_and_resume_rearms() {
        let mut state = GameState::default();
        state.start();
        let row = state.active().unwrap().row;

        assert!(state.toggle_pause());
        assert!(state.paused());
        assert_eq!(state.advance(10_000), 0);
        assert_eq!(state.active().unwrap().row, row);
        assert!(!state.try_move(0, 1));

        assert!(state.toggle_pause());
        assert!(state.is_running());
        assert_eq!(state.advance(880), 1);
        assert_eq!(state.active().unwrap().row, row + 1);
    }

    #[test]
    fn test_advance_runs_due_ticks() {
        let mut state = scripted(&[PieceKind::O]);
        state.start();
        assert_eq!(state.advance(879), 0);
        assert_eq!(state.advance(1), 1);
        assert_eq!(state.advance(880 * 3), 3);
        assert_eq!(state.active().unwrap().row, 4);
    }

    #[test]
    fn test_line_clear_handshake() {
        let mut state = scripted(&[PieceKind::I, PieceKind::O]);
        fill_row_except(state.board_mut(), 19, &[3, 4, 5, 6]);
        state.start();
        state.take_events();

        state.hard_drop();
        assert_eq!(state.pending_clear().map(|r| r.as_slice()), Some(&[19][..]));
        assert!(state.active().is_none());
        assert!(!state.scheduler().is_armed());

        let events = state.take_events();
        assert!(matches!(
            &events[..],
            [GameEvent::ClearAnimationRequested { rows }] if rows.as_slice() == [19]
        ));

        // Gameplay is frozen until the animation reports back.
        state.tick();
        assert_eq!(state.advance(10_000), 0);
        assert!(state.active().is_none());

        assert!(state.on_clear_animation_complete());
        assert!(!state.on_clear_animation_complete());
        assert_eq!(state.score(), 10);
        assert!(state.board().cells().iter().all(|&c| c == 0));
        assert_eq!(state.active().unwrap().kind, PieceKind::O);
        assert!(state.scheduler().is_armed());

        let events = state.take_events();
        assert!(events.contains(&GameEvent::ScoreChanged { score: 10, level: 1 }));
        assert!(events.contains(&GameEvent::Sound(SoundCue::LineClear)));
    }

    #[test]
    fn test_clear_during_pause_resumes_cleanly() {
        let mut state = scripted(&[PieceKind::I, PieceKind::O]);
        fill_row_except(state.board_mut(), 19, &[3, 4, 5, 6]);
        state.start();
        state.hard_drop();
        state.toggle_pause();

        assert!(state.on_clear_animation_complete());
        assert!(state.paused());
        assert!(!state.scheduler().is_armed());
        assert!(state.active().is_some());

        state.toggle_pause();
        assert!(state.scheduler().is_armed());
    }

    #[test]
    fn test_level_up_after_clears() {
        let mut state = scripted(&[PieceKind::O]);
        fill_row_except(state.board_mut(), 19, &[4, 5]);
        state.start();
        state.score = 190;

        state.hard_drop();
        assert!(state.on_clear_animation_complete());
        assert_eq!(state.score(), 200);
        assert_eq!(state.level(), 2);
        assert_eq!(state.scheduler().interval_ms(), Some(680));
    }

    #[test]
    fn test_clear_rows_requires_the_outstanding_clear() {
        let mut state = scripted(&[PieceKind::T, PieceKind::I]);
        state.start();
        state.try_move(5, 0);
        let falling = state.active().unwrap();

        // Nothing outstanding: unfilled rows are never scored.
        assert!(!state.clear_rows_and_continue(&[19, 18]));
        assert_eq!(state.score(), 0);
        assert_eq!(state.active().unwrap(), falling);
        assert!(state.board().cells().iter().all(|&c| c == 0));

        let mut state = scripted(&[PieceKind::O, PieceKind::T]);
        fill_row_except(state.board_mut(), 19, &[4, 5]);
        state.start();
        state.hard_drop();

        assert!(!state.clear_rows_and_continue(&[18]));
        assert_eq!(state.pending_clear().map(|r| r.as_slice()), Some(&[19][..]));
        assert!(state.clear_rows_and_continue(&[19]));
        assert_eq!(state.score(), 10);
        assert!(state.pending_clear().is_none());
    }

    #[test]
    fn test_spawn_keeps_falling_piece() {
        let mut state = scripted(&[PieceKind::T, PieceKind::I]);
        state.start();
        state.try_move(5, 0);
        let falling = state.active().unwrap();
        let next = state.next().unwrap();

        assert!(!state.spawn());
        assert_eq!(state.active().unwrap(), falling);
        assert_eq!(state.next().unwrap(), next);
        assert!(state.board().cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_top_out() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]);
        state.start();
        // The O falls through; the T spawning next meets the filled top row.
        fill_row_except(state.board_mut(), 0, &[0]);
        state.take_events();

        state.hard_drop();
        assert!(state.game_over());
        assert!(state.active().is_none());
        assert!(state.next().is_none());
        assert!(!state.scheduler().is_armed());

        let events = state.take_events();
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));

        // Terminal: nothing restarts it except restart().
        assert!(!state.toggle_pause());
        assert!(!state.start());
        assert!(!state.spawn());
        state.tick();
        assert!(state.game_over());
    }

    /// Score one row, then top out when the shifted top row blocks the spawn.
    fn clear_then_top_out(state: &mut GameState) {
        fill_row_except(state.board_mut(), 19, &[4, 5]);
        state.start();
        fill_row_except(state.board_mut(), 0, &[0]);
        state.hard_drop();
        assert!(state.on_clear_animation_complete());
        assert!(state.game_over());
    }

    #[test]
    fn test_high_score_only_when_beaten() {
        let mut state = GameState::new(GameConfig {
            prior_high_score: 50,
            kind_policy: KindPolicy::Scripted(vec![PieceKind::O]),
            ..GameConfig::default()
        });
        fill_row_except(state.board_mut(), 19, &[4, 5]);
        state.start();
        state.score = 50;
        fill_row_except(state.board_mut(), 0, &[0]);
        state.hard_drop();
        assert!(state.on_clear_animation_complete());
        assert!(state.game_over());

        let events = state.take_events();
        assert!(events.contains(&GameEvent::HighScore { score: 60 }));
        assert_eq!(state.high_score(), 60);

        state.restart();
        assert_eq!(state.config().prior_high_score, 60);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.score(), 0);

        // 10 points do not beat 60.
        clear_then_top_out(&mut state);
        assert!(!state
            .take_events()
            .iter()
            .any(|e| matches!(e, GameEvent::HighScore { .. })));
    }

    #[test]
    fn test_versus_broadcasts() {
        let mut state = GameState::new(GameConfig {
            mode: GameMode::Versus,
            prior_high_score: 0,
            kind_policy: KindPolicy::Scripted(vec![PieceKind::O]),
            ..GameConfig::default()
        });
        clear_then_top_out(&mut state);

        let events = state.take_events();
        assert!(events.contains(&GameEvent::Broadcast(NetEvent::Score { score: 10 })));
        assert!(events.contains(&GameEvent::Broadcast(NetEvent::GameOver)));
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::HighScore { .. })));
    }

    #[test]
    fn test_undrained_queue_stays_bounded() {
        let mut state = GameState::default();
        state.start();
        for _ in 0..100 {
            state.toggle_pause();
        }
        state.emit(GameEvent::Broadcast(NetEvent::GameOver));
        for _ in 0..EVENT_QUEUE_CAPACITY {
            state.toggle_pause();
        }

        let events = state.take_events();
        assert_eq!(events.len(), EVENT_QUEUE_CAPACITY);
        // Display events go first; the broadcast survives.
        assert!(events.contains(&GameEvent::Broadcast(NetEvent::GameOver)));
    }

    #[test]
    fn test_revision_tracks_visible_changes() {
        let mut state = GameState::default();
        state.start();

        let before = state.revision();
        state.toggle_pause();
        assert_ne!(state.revision(), before);

        let before = state.revision();
        state.soft_drop(false);
        assert_eq!(state.revision(), before, "no change, no bump");

        state.toggle_pause();
        state.soft_drop(true);
        let before = state.revision();
        state.soft_drop(false);
        assert_ne!(state.revision(), before);

        let before = state.revision();
        state.restart();
        assert_ne!(state.revision(), before);
    }

    #[test]
    fn test_apply_action_start_pause() {
        let mut state = GameState::default();
        state.apply_action(GameAction::StartPause);
        assert!(state.is_running());
        state.apply_action(GameAction::StartPause);
        assert!(state.paused());
        state.apply_action(GameAction::StartPause);
        assert!(state.is_running());
    }

    #[test]
    fn test_restart_continues_sequence() {
        let mut a = GameState::new(GameConfig::with_seed(77));
        a.start();
        a.restart();
        assert_eq!(a.phase(), Phase::Idle);
        assert!(a.next().is_some());
        assert!(a.board().cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_snapshot_reflects_geometry() {
        let mut state = scripted(&[PieceKind::O, PieceKind::I]);
        state.start();
        let snap = state.snapshot();

        assert_eq!(snap.phase, Phase::Running);
        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::O);
        assert_eq!(active.cells, [(0, 4), (0, 5), (1, 4), (1, 5)]);
        let next = snap.next.unwrap();
        assert_eq!(next.kind, PieceKind::I);
        assert_eq!(next.cells, [(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(snap.revision, state.revision());
    }
}
