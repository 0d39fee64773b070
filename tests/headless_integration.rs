use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use kaos::runtime::{decode_key, AppEvent, FixedTicker, Runner, TestEventSource};
use kaos::session::{Session, Status};

// Headless integration using the internal runtime + Session without a TTY.
// Verifies that a minimal typing flow completes via Runner/TestEventSource.
#[test]
fn headless_typing_flow_completes() {
    // Arrange: a session with a two-char target
    let mut session = Session::new("hi");

    // Channel for the test event source
    let (tx, rx) = mpsc::channel();

    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(5));
    let runner = Runner::new(es, ticker);

    // Producer: two character keys. The cursor advances regardless of
    // correctness, so any two letters finish the session even though the
    // layout scrambles between them.
    tx.send(AppEvent::Key(KeyEvent::new(
        KeyCode::Char('h'),
        KeyModifiers::NONE,
    )))
    .unwrap();
    tx.send(AppEvent::Key(KeyEvent::new(
        KeyCode::Char('i'),
        KeyModifiers::NONE,
    )))
    .unwrap();

    // Act: drive a tiny event loop until finished (or bounded steps)
    for _ in 0..100u32 {
        match runner.step() {
            AppEvent::Tick => session.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                session.handle(decode_key(&key));
                if session.has_finished() {
                    break;
                }
            }
        }
    }

    // Assert: finished with frozen, sane stats
    assert!(session.has_finished(), "session should have finished typing");
    assert_eq!(session.keystrokes(), 2);
    assert!(session.accuracy() <= 100);
    let frozen = session.summary();
    session.on_tick();
    assert_eq!(session.summary(), frozen);
}

#[test]
fn headless_ticks_keep_elapsed_time_live() {
    let mut session = Session::new("hello");

    let (tx, rx) = mpsc::channel();
    tx.send(AppEvent::Key(KeyEvent::new(
        KeyCode::Char('h'),
        KeyModifiers::NONE,
    )))
    .unwrap();

    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(10));
    let runner = Runner::new(es, ticker);

    // First step delivers the keystroke and starts the clock, the rest
    // are ticks off the recv timeout.
    for _ in 0..5u32 {
        match runner.step() {
            AppEvent::Tick => session.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => session.handle(decode_key(&key)),
        }
    }

    assert_eq!(session.status(), Status::Active);
    assert!(session.elapsed_ms() > 0, "ticks should advance elapsed time");
}

#[test]
fn headless_tick_before_start_changes_nothing() {
    let mut session = Session::new("hello");

    let (_tx, rx) = mpsc::channel::<AppEvent>();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(5));
    let runner = Runner::new(es, ticker);

    for _ in 0..10u32 {
        if let AppEvent::Tick = runner.step() {
            session.on_tick();
        }
    }

    assert_eq!(session.status(), Status::Idle);
    assert_eq!(session.elapsed_ms(), 0);
    assert_eq!(session.wpm(), 0);
}
