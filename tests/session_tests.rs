//! Session-level tests: whole rounds driven the way a frontend would,
//! with a shared scheduler handle standing in for the event loop.

use tictactoe_engine::{
    FileScoreStore, GameSession, ManualScheduler, MemoryScoreStore, RoundOutcome, ScoreTally,
    SessionEvent, Symbol, TurnState, SCORE_FILE,
};

fn session_with(seed: u64) -> (GameSession, ManualScheduler, MemoryScoreStore) {
    let scheduler = ManualScheduler::new();
    let store = MemoryScoreStore::new();
    let session = GameSession::builder()
        .seed(seed)
        .store(store.clone())
        .scheduler(scheduler.clone())
        .build();
    (session, scheduler, store)
}

fn drain(session: &mut GameSession) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Some(event) = session.poll_event() {
        events.push(event);
    }
    events
}

/// Advance the session by one frontend step: either click the first open
/// cell or fire the pending computer callback.
fn step(session: &mut GameSession, scheduler: &ManualScheduler) {
    match session.turn() {
        TurnState::AwaitingHuman => {
            let at = session.board().empty_cells()[0];
            session.submit_human_move(at.row, at.col);
        }
        TurnState::AwaitingComputer => {
            scheduler.fire_next().expect("a computer move must be pending");
            session.run_computer_move().unwrap();
        }
        TurnState::RoundOver => unreachable!("the session rolls rounds over itself"),
    }
}

#[test]
fn test_tally_matches_round_results_over_many_rounds() {
    let (mut session, scheduler, store) = session_with(42);
    drain(&mut session);

    let mut results = Vec::new();
    while results.len() < 20 {
        step(&mut session, &scheduler);
        for event in drain(&mut session) {
            if let SessionEvent::RoundEnded { outcome, .. } = event {
                results.push(outcome);
            }
        }
        // Cancel-and-replace keeps at most one callback alive.
        assert!(scheduler.pending() <= 1);
    }

    let expected = ScoreTally::new(
        results
            .iter()
            .filter(|o| **o == RoundOutcome::HumanWin)
            .count() as u32,
        results
            .iter()
            .filter(|o| **o == RoundOutcome::ComputerWin)
            .count() as u32,
    );
    assert_eq!(session.tally(), expected);
    assert_eq!(store.record(), Some(session.tally()));
}

#[test]
fn test_round_end_message_matches_outcome() {
    let (mut session, scheduler, _store) = session_with(9);
    drain(&mut session);

    let mut seen = 0;
    while seen < 5 {
        step(&mut session, &scheduler);
        for event in drain(&mut session) {
            if let SessionEvent::RoundEnded { outcome, message } = event {
                assert_eq!(Some(message.as_str()), outcome.announcement());
                seen += 1;
            }
        }
    }
}

#[test]
fn test_seeded_sessions_replay_identically() {
    let (mut session1, scheduler1, _store1) = session_with(1234);
    let (mut session2, scheduler2, _store2) = session_with(1234);
    drain(&mut session1);
    drain(&mut session2);

    for _ in 0..40 {
        step(&mut session1, &scheduler1);
        step(&mut session2, &scheduler2);
        assert_eq!(session1.board(), session2.board());
        assert_eq!(session1.turn(), session2.turn());
        assert_eq!(session1.tally(), session2.tally());
        assert_eq!(drain(&mut session1), drain(&mut session2));
    }
}

#[test]
fn test_symbol_switch_interrupts_round_and_replaces_schedule() {
    let (mut session, scheduler, _store) = session_with(8);
    drain(&mut session);

    // Put a mark down and leave a computer move pending.
    let at = session.board().empty_cells()[0];
    session.submit_human_move(at.row, at.col);
    assert_eq!(scheduler.pending(), 1);
    let stale = scheduler.pending_tokens()[0];

    session.switch_symbols(Symbol::O);

    // Fresh board, new opener; the stale token is gone.
    assert_eq!(session.board().empty_cells().len(), 9);
    assert_eq!(session.symbols().human(), Symbol::O);
    assert!(!scheduler.pending_tokens().contains(&stale));
    assert_eq!(session.outcome(), RoundOutcome::Ongoing);

    // The interrupted round's mark never reached the tally.
    assert_eq!(session.tally(), ScoreTally::default());
}

#[test]
fn test_switching_back_keeps_play_going() {
    let (mut session, scheduler, _store) = session_with(15);
    drain(&mut session);

    session.switch_symbols(Symbol::O);
    session.switch_symbols(Symbol::X);
    drain(&mut session);

    // Whatever side opens, a full round still runs to completion.
    let mut ended = false;
    for _ in 0..12 {
        step(&mut session, &scheduler);
        if drain(&mut session)
            .iter()
            .any(|event| matches!(event, SessionEvent::RoundEnded { .. }))
        {
            ended = true;
            break;
        }
    }
    assert!(ended);
}

#[test]
fn test_tally_survives_a_session_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(SCORE_FILE);

    let scheduler = ManualScheduler::new();
    let mut session = GameSession::builder()
        .seed(21)
        .store(FileScoreStore::new(&path))
        .scheduler(scheduler.clone())
        .build();
    drain(&mut session);

    // Play until some round ends.
    loop {
        step(&mut session, &scheduler);
        if drain(&mut session)
            .iter()
            .any(|event| matches!(event, SessionEvent::RoundEnded { .. }))
        {
            break;
        }
    }
    let tally = session.tally();
    drop(session);

    let restarted = GameSession::builder()
        .store(FileScoreStore::new(&path))
        .scheduler(ManualScheduler::new())
        .build();
    assert_eq!(restarted.tally(), tally);
}

#[test]
fn test_session_with_corrupt_score_file_starts_from_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(SCORE_FILE);
    std::fs::write(&path, "not a score").unwrap();

    let session = GameSession::builder()
        .store(FileScoreStore::new(&path))
        .scheduler(ManualScheduler::new())
        .build();

    assert_eq!(session.tally(), ScoreTally::default());
}
