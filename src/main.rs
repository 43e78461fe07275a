//! Terminal Prospector runner (default binary).
//!
//! Raw-mode crossterm loop on a fixed 16 ms tick: poll input with a
//! timeout to the next tick, route clicks through the view's hit-testing,
//! and advance the floating-score animations every tick.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use prospector::assets::{default_layout, HighScoreFile};
use prospector::core::{GameSession, GameSnapshot};
use prospector::input::{handle_key_event, mouse_click, should_quit};
use prospector::term::{is_draw_pile_card, GameView, TerminalRenderer, Viewport};
use prospector::types::{CardState, GameAction, Vec2, TICK_MS};

const HIGH_SCORE_FILE: &str = ".prospector_highscore";

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let layout = default_layout()?;
    let store = Box::new(HighScoreFile::new(HIGH_SCORE_FILE));
    let mut session = GameSession::new(entropy_seed(), layout, store)?;

    let mut view = GameView::new();
    let mut snap = GameSnapshot::default();
    let mut cursor: usize = 0;

    let mut last_tick = Instant::now();
    let tick = Duration::from_millis(u64::from(TICK_MS));

    loop {
        // Render.
        let (width, height) = crossterm::terminal::size().unwrap_or((100, 30));
        session.snapshot_into(&mut snap);

        let playable = snap.playable();
        if playable.is_empty() {
            cursor = 0;
        } else if cursor >= playable.len() {
            cursor = playable.len() - 1;
        }
        let selected = playable.get(cursor).copied();

        let frame = view.render(&snap, selected, Viewport::new(width, height));
        term.draw(&frame)?;

        // Input with timeout until the next tick.
        let timeout = tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        match action {
                            GameAction::CursorLeft => cursor = cursor.saturating_sub(1),
                            GameAction::CursorRight => {
                                if cursor + 1 < playable.len() {
                                    cursor += 1;
                                }
                            }
                            GameAction::PlayCursor => {
                                if let Some(id) = selected {
                                    let click = view
                                        .card_center_norm(id)
                                        .unwrap_or(Vec2::new(0.5, 0.5));
                                    session.attempt_mine(id, click);
                                }
                            }
                            GameAction::DrawNext => {
                                session.draw_next();
                            }
                            GameAction::Restart => {
                                session.restart(entropy_seed())?;
                                cursor = 0;
                            }
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some((col, row)) = mouse_click(&mouse) {
                        if let Some(id) = view.card_at(col, row) {
                            if is_draw_pile_card(&snap, id) {
                                session.draw_next();
                            } else if snap.card(id).map_or(false, |c| c.state == CardState::Mine) {
                                session.attempt_mine(id, view.click_norm(col, row));
                            }
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            session.tick(TICK_MS);
        }
    }
}

/// Seed each round from the clock; determinism per seed is for tests, not
/// for handing every player the same deal.
fn entropy_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
