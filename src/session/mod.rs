//! Session orchestration: one engine, one score store, one scheduler.
//!
//! `GameSession` is what a presentation layer talks to. Inbound it takes
//! cell clicks, symbol choices and the deferred computer-move callback;
//! outbound it offers read accessors plus a drained queue of
//! [`SessionEvent`]s telling the frontend when to re-render and when to
//! announce a result.
//!
//! ## Round lifecycle
//!
//! A terminal move credits the tally from the [`RoundOutcome`] (never
//! from message text), persists it, emits `RoundEnded`, and silently
//! starts the next round. A failed save is logged and swallowed; the
//! outcome already shown to the player is unaffected.
//!
//! ## Scheduling discipline
//!
//! At most one computer move is pending at any time. Every round start
//! and symbol switch cancels the outstanding token before scheduling a
//! new one, so a stale callback cannot fire into a reset board; a
//! callback that slips through anyway is rejected by the engine's turn
//! check and dropped here.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Board, Coord, GameRng, Symbol, SymbolAssignment};
use crate::engine::{EngineError, GameEngine, RoundOutcome, TurnState};
use crate::schedule::{ManualScheduler, MoveScheduler, ScheduleToken, COMPUTER_MOVE_DELAY};
use crate::score::{FileScoreStore, ScoreStore, ScoreTally};

/// Notification for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Board, turn or tally changed; re-render.
    StateChanged,
    /// A round reached a terminal outcome. Emitted before the next round
    /// begins; `message` is ready for a result dialog.
    RoundEnded {
        outcome: RoundOutcome,
        message: String,
    },
}

/// Builder for [`GameSession`].
///
/// Defaults: entropy seed, [`FileScoreStore`] at `score.txt`, a
/// [`ManualScheduler`], the standard thinking delay, human plays X.
pub struct GameSessionBuilder {
    seed: Option<u64>,
    store: Option<Box<dyn ScoreStore>>,
    scheduler: Option<Box<dyn MoveScheduler>>,
    delay: Duration,
    human_symbol: Symbol,
}

impl Default for GameSessionBuilder {
    fn default() -> Self {
        Self {
            seed: None,
            store: None,
            scheduler: None,
            delay: COMPUTER_MOVE_DELAY,
            human_symbol: Symbol::X,
        }
    }
}

impl GameSessionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the opponent's random choices for reproducibility.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use a specific score store.
    #[must_use]
    pub fn store(mut self, store: impl ScoreStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Use a specific scheduler.
    #[must_use]
    pub fn scheduler(mut self, scheduler: impl MoveScheduler + 'static) -> Self {
        self.scheduler = Some(Box::new(scheduler));
        self
    }

    /// Override the computer's thinking delay.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Starting symbol choice for the human.
    #[must_use]
    pub fn human_symbol(mut self, symbol: Symbol) -> Self {
        self.human_symbol = symbol;
        self
    }

    /// Build the session: load the tally, start the first round.
    #[must_use]
    pub fn build(self) -> GameSession {
        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let store = self
            .store
            .unwrap_or_else(|| Box::new(FileScoreStore::default()));
        let scheduler = self
            .scheduler
            .unwrap_or_else(|| Box::new(ManualScheduler::new()));

        let tally = store.load();
        log::info!("session opened with tally {tally}, rng seed {}", rng.seed());

        let engine = GameEngine::new(rng, SymbolAssignment::new(self.human_symbol));
        let mut session = GameSession {
            engine,
            store,
            scheduler,
            delay: self.delay,
            tally,
            pending: None,
            events: VecDeque::new(),
        };
        // The constructor already opened round one.
        let opening = session.engine.turn();
        session.open_round(opening);
        session
    }
}

/// Long-lived game session spanning many rounds.
pub struct GameSession {
    engine: GameEngine,
    store: Box<dyn ScoreStore>,
    scheduler: Box<dyn MoveScheduler>,
    delay: Duration,
    tally: ScoreTally,
    pending: Option<ScheduleToken>,
    events: VecDeque<SessionEvent>,
}

impl GameSession {
    /// Start configuring a session.
    #[must_use]
    pub fn builder() -> GameSessionBuilder {
        GameSessionBuilder::new()
    }

    /// The current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    /// Whose move is expected.
    #[must_use]
    pub fn turn(&self) -> TurnState {
        self.engine.turn()
    }

    /// The current round's outcome so far.
    #[must_use]
    pub fn outcome(&self) -> RoundOutcome {
        self.engine.outcome()
    }

    /// Cumulative win counts.
    #[must_use]
    pub fn tally(&self) -> ScoreTally {
        self.tally
    }

    /// The current symbol assignment.
    #[must_use]
    pub fn symbols(&self) -> SymbolAssignment {
        self.engine.symbols()
    }

    /// Whether a computer move is scheduled and not yet run.
    #[must_use]
    pub fn has_pending_computer_move(&self) -> bool {
        self.pending.is_some()
    }

    /// Next notification, oldest first.
    pub fn poll_event(&mut self) -> Option<SessionEvent> {
        self.events.pop_front()
    }

    /// Forward a cell click. An illegal click (occupied cell, not the
    /// human's turn) is dropped without any state change.
    pub fn submit_human_move(&mut self, row: usize, col: usize) {
        let at = Coord::new(row, col);
        match self.engine.submit_human_move(at) {
            Ok(outcome) => {
                self.events.push_back(SessionEvent::StateChanged);
                self.after_move(outcome);
            }
            Err(err) => log::debug!("dropped click at {at}: {err}"),
        }
    }

    /// Run the scheduled computer move. The presentation layer calls this
    /// when the thinking delay elapses.
    ///
    /// # Errors
    ///
    /// Only [`EngineError::Invariant`] escapes; a stale callback arriving
    /// after a reset is dropped silently.
    pub fn run_computer_move(&mut self) -> Result<(), EngineError> {
        self.pending = None;
        match self.engine.run_computer_move() {
            Ok(outcome) => {
                self.events.push_back(SessionEvent::StateChanged);
                self.after_move(outcome);
                Ok(())
            }
            Err(EngineError::Illegal(err)) => {
                log::debug!("dropped computer move: {err}");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Change the human's symbol. Always restarts the round.
    pub fn switch_symbols(&mut self, human: Symbol) {
        self.cancel_pending();
        let opening = self.engine.switch_symbols(human);
        self.open_round(opening);
    }

    fn after_move(&mut self, outcome: RoundOutcome) {
        if outcome.is_terminal() {
            self.finish_round(outcome);
        } else if self.engine.turn() == TurnState::AwaitingComputer {
            self.schedule_computer_move();
        }
    }

    fn finish_round(&mut self, outcome: RoundOutcome) {
        if let Some(winner) = outcome.winner() {
            self.tally.credit(winner);
        }
        if let Err(err) = self.store.save(self.tally) {
            log::warn!("score update not persisted: {err}");
        }
        log::info!("round over: {outcome}, tally {}", self.tally);
        if let Some(message) = outcome.announcement() {
            self.events.push_back(SessionEvent::RoundEnded {
                outcome,
                message: message.to_string(),
            });
        }

        self.cancel_pending();
        let opening = self.engine.start_round();
        self.open_round(opening);
    }

    fn open_round(&mut self, opening: TurnState) {
        self.events.push_back(SessionEvent::StateChanged);
        if opening == TurnState::AwaitingComputer {
            self.schedule_computer_move();
        }
    }

    fn schedule_computer_move(&mut self) {
        self.cancel_pending();
        self.pending = Some(self.scheduler.schedule(self.delay));
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
    }
}
