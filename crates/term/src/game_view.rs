//! GameView: maps a `GameSnapshot` into a terminal frame.
//!
//! Pure with respect to I/O; it also remembers where every card landed on
//! screen so the runner can hit-test mouse clicks and aim floating scores.

use prospector_core::GameSnapshot;
use prospector_types::{CardId, CardState, RoundStatus, Suit, Vec2};

use crate::fb::{Frame, Rgb, Style};

/// Terminal cells per layout unit.
const UNIT_COLS: f32 = 6.0;
const UNIT_ROWS: f32 = 2.0;

/// Card box size in cells.
const CARD_W: u16 = 6;
const CARD_H: u16 = 4;

/// Rows reserved for the HUD above the table.
const HUD_ROWS: u16 = 2;

const FELT: Rgb = Rgb::new(12, 60, 32);
const CARD_FACE: Rgb = Rgb::new(235, 232, 220);
const CARD_BACK: Rgb = Rgb::new(40, 60, 140);
const INK_RED: Rgb = Rgb::new(180, 30, 30);
const INK_BLACK: Rgb = Rgb::new(30, 30, 30);
const GOLD: Rgb = Rgb::new(240, 200, 60);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl Rect {
    fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.w && row >= self.y && row < self.y + self.h
    }

    fn center(&self) -> (u16, u16) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Renders snapshots and answers "what did this click hit".
#[derive(Debug, Default)]
pub struct GameView {
    /// Card rects of the last rendered frame, in draw order (bottom first).
    rects: Vec<(CardId, Rect)>,
    viewport: Viewport,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(80, 24)
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render one frame. Also rebuilds the hit-test map.
    pub fn render(
        &mut self,
        snap: &GameSnapshot,
        cursor: Option<CardId>,
        viewport: Viewport,
    ) -> Frame {
        self.viewport = viewport;
        self.rects.clear();

        let mut frame = Frame::new(viewport.width, viewport.height);
        frame.fill(Style::new(Rgb::new(210, 210, 210), FELT));

        let map = WorldMap::fit(snap, viewport);

        // Bottom-most first, so overlapping cards occlude naturally.
        let mut order: Vec<usize> = (0..snap.cards.len()).collect();
        order.sort_by_key(|&i| snap.cards[i].depth);

        for i in order {
            let card = &snap.cards[i];
            let (col, row) = map.to_screen(card.x, card.y);
            let rect = Rect {
                x: col.saturating_sub(CARD_W / 2),
                y: row.saturating_sub(CARD_H / 2),
                w: CARD_W,
                h: CARD_H,
            };
            self.draw_card(&mut frame, card, rect, cursor == Some(card.id));
            self.rects.push((card.id, rect));
        }

        self.draw_hud(&mut frame, snap, viewport);
        self.draw_floats(&mut frame, snap, viewport);

        match snap.status {
            RoundStatus::Won => self.draw_banner(
                &mut frame,
                viewport,
                "YOU STRUCK GOLD!",
                &format!("round score {}  ·  R for a new claim", snap.score_this_round),
            ),
            RoundStatus::Lost => self.draw_banner(
                &mut frame,
                viewport,
                "THE CLAIM RAN DRY",
                &format!("final score {}  ·  R to try again", snap.score),
            ),
            RoundStatus::InProgress => {}
        }

        frame
    }

    /// Topmost card under a terminal cell.
    pub fn card_at(&self, col: u16, row: u16) -> Option<CardId> {
        self.rects
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(col, row))
            .map(|(id, _)| *id)
    }

    /// Screen center of a card, in normalized coordinates (y up), for
    /// launching floating scores from keyboard plays.
    pub fn card_center_norm(&self, id: CardId) -> Option<Vec2> {
        let (_, rect) = self.rects.iter().find(|(rid, _)| *rid == id)?;
        let (cx, cy) = rect.center();
        Some(normalize(cx, cy, self.viewport))
    }

    /// Normalize a click position (y up).
    pub fn click_norm(&self, col: u16, row: u16) -> Vec2 {
        normalize(col, row, self.viewport)
    }

    fn draw_card(&self, frame: &mut Frame, card: &prospector_core::CardSnapshot, rect: Rect, under_cursor: bool) {
        if card.face_up {
            let ink = if card.suit.is_red() { INK_RED } else { INK_BLACK };
            let face = Style::new(ink, CARD_FACE);
            frame.rect(rect.x, rect.y, rect.w, rect.h, ' ', face);

            let label = format!("{}{}", card.rank.as_str(), suit_char(card.suit));
            frame.text(rect.x + 1, rect.y + 1, &label, face.bold());
            // Mirrored in the opposite corner, like a real index.
            frame.text(
                rect.x + rect.w - 1 - label.chars().count() as u16,
                rect.y + rect.h - 2,
                &label,
                face,
            );

            let border = if under_cursor {
                Style::new(GOLD, CARD_FACE).bold()
            } else if card.playable {
                Style::new(Rgb::new(60, 140, 70), CARD_FACE).bold()
            } else {
                Style::new(Rgb::new(150, 150, 140), CARD_FACE)
            };
            self.draw_border(frame, rect, border);
        } else {
            let back = Style::new(Rgb::new(90, 110, 190), CARD_BACK);
            frame.rect(rect.x, rect.y, rect.w, rect.h, '▒', back);
            self.draw_border(frame, rect, Style::new(Rgb::new(160, 170, 220), CARD_BACK));
        }
    }

    fn draw_border(&self, frame: &mut Frame, rect: Rect, style: Style) {
        if rect.w < 2 || rect.h < 2 {
            return;
        }
        let (x1, y1) = (rect.x + rect.w - 1, rect.y + rect.h - 1);

        frame.set(rect.x, rect.y, '┌', style);
        frame.set(x1, rect.y, '┐', style);
        frame.set(rect.x, y1, '└', style);
        frame.set(x1, y1, '┘', style);
        for dx in 1..rect.w - 1 {
            frame.set(rect.x + dx, rect.y, '─', style);
            frame.set(rect.x + dx, y1, '─', style);
        }
        for dy in 1..rect.h - 1 {
            frame.set(rect.x, rect.y + dy, '│', style);
            frame.set(x1, rect.y + dy, '│', style);
        }
    }

    fn draw_hud(&self, frame: &mut Frame, snap: &GameSnapshot, viewport: Viewport) {
        let label = Style::new(GOLD, FELT).bold();
        let value = Style::new(Rgb::new(230, 230, 230), FELT);

        let line = format!(
            "GOLD {}   BEST {}   CHAIN {}   RUN {}   DRAW {}",
            snap.scoreboard, snap.high_score, snap.chain, snap.score_run, snap.draw_count
        );
        frame.text(1, 0, &line, label);

        let help = "click or ←→+Enter mine · Space draw · Q quit";
        let x = viewport.width.saturating_sub(help.chars().count() as u16 + 1);
        frame.text(x, 0, help, value.dim());
    }

    fn draw_floats(&self, frame: &mut Frame, snap: &GameSnapshot, viewport: Viewport) {
        for float in &snap.floats {
            let col = (float.x * f32::from(viewport.width.saturating_sub(1))).round() as i32;
            let row = ((1.0 - float.y) * f32::from(viewport.height.saturating_sub(1))).round()
                as i32;
            if col < 0 || row < 0 {
                continue;
            }

            let style = if float.held || float.font_size >= 40.0 {
                Style::new(GOLD, FELT).bold()
            } else if float.font_size >= 20.0 {
                Style::new(Rgb::new(250, 250, 250), FELT).bold()
            } else {
                Style::new(Rgb::new(200, 200, 200), FELT).dim()
            };
            frame.text(col as u16, row as u16, &format!("+{}", float.value), style);
        }
    }

    fn draw_banner(&self, frame: &mut Frame, viewport: Viewport, title: &str, detail: &str) {
        let style = Style::new(GOLD, Rgb::new(20, 20, 20)).bold();
        let sub = Style::new(Rgb::new(230, 230, 230), Rgb::new(20, 20, 20));

        let mid = viewport.height / 2;
        let center = |s: &str| viewport.width.saturating_sub(s.chars().count() as u16) / 2;
        frame.text(center(title), mid, title, style);
        frame.text(center(detail), mid + 1, detail, sub);
    }
}

/// World-to-screen transform, fitted once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WorldMap {
    min_x: f32,
    max_y: f32,
    pad_x: u16,
    pad_y: u16,
}

impl WorldMap {
    fn fit(snap: &GameSnapshot, viewport: Viewport) -> Self {
        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for card in &snap.cards {
            min_x = min_x.min(card.x);
            max_x = max_x.max(card.x);
            min_y = min_y.min(card.y);
            max_y = max_y.max(card.y);
        }
        if snap.cards.is_empty() {
            min_x = 0.0;
            max_x = 0.0;
            min_y = 0.0;
            max_y = 0.0;
        }

        let content_w = ((max_x - min_x) * UNIT_COLS) as u16 + CARD_W;
        let content_h = ((max_y - min_y) * UNIT_ROWS) as u16 + CARD_H;
        let pad_x = viewport.width.saturating_sub(content_w) / 2;
        let pad_y = HUD_ROWS
            + viewport
                .height
                .saturating_sub(HUD_ROWS)
                .saturating_sub(content_h)
                / 2;

        Self {
            min_x,
            max_y,
            pad_x,
            pad_y,
        }
    }

    /// Screen cell of a card center. World y grows upward, rows downward.
    fn to_screen(&self, x: f32, y: f32) -> (u16, u16) {
        let col = self.pad_x as i32
            + ((x - self.min_x) * UNIT_COLS).round() as i32
            + i32::from(CARD_W / 2);
        let row = self.pad_y as i32
            + ((self.max_y - y) * UNIT_ROWS).round() as i32
            + i32::from(CARD_H / 2);
        (col.max(0) as u16, row.max(0) as u16)
    }
}

fn suit_char(suit: Suit) -> char {
    suit.as_char()
}

fn normalize(col: u16, row: u16, viewport: Viewport) -> Vec2 {
    let w = f32::from(viewport.width.max(2) - 1);
    let h = f32::from(viewport.height.max(2) - 1);
    Vec2::new(f32::from(col) / w, 1.0 - f32::from(row) / h)
}

/// Convenience for the runner: does this click mean "draw"?
pub fn is_draw_pile_card(snap: &GameSnapshot, id: CardId) -> bool {
    snap.card(id)
        .map_or(false, |card| card.state == CardState::DrawPile)
}
