//! TerminalRenderer: flushes frames to the real terminal.
//!
//! Diffs against the previous frame and only repaints changed cell runs;
//! a resize or an explicit `invalidate` forces a full repaint.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Frame, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Frame>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    /// Raw mode + alternate screen + mouse reporting.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(event::EnableMouseCapture)?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Undo `enter`; always safe to call on the way out.
    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(event::DisableMouseCapture)?;
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint everything (terminal resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        let full = match &self.last {
            Some(prev) => prev.width() != frame.width() || prev.height() != frame.height(),
            None => true,
        };

        if full {
            self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut style: Option<Style> = None;
        for y in 0..frame.height() {
            let mut x = 0;
            while x < frame.width() {
                let cell = frame.get(x, y).unwrap_or_default();
                let unchanged = !full
                    && self
                        .last
                        .as_ref()
                        .and_then(|prev| prev.get(x, y))
                        .map_or(false, |prev| prev == cell);
                if unchanged {
                    x += 1;
                    continue;
                }

                // Repaint a run of changed cells from here.
                self.stdout.queue(cursor::MoveTo(x, y))?;
                while x < frame.width() {
                    let cell = frame.get(x, y).unwrap_or_default();
                    let same = !full
                        && self
                            .last
                            .as_ref()
                            .and_then(|prev| prev.get(x, y))
                            .map_or(false, |prev| prev == cell);
                    if same {
                        break;
                    }
                    if style != Some(cell.style) {
                        self.apply_style(cell.style)?;
                        style = Some(cell.style);
                    }
                    self.stdout.queue(Print(cell.ch))?;
                    x += 1;
                }
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        self.last = Some(frame.clone());
        Ok(())
    }

    fn apply_style(&mut self, style: Style) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(SetForegroundColor(to_color(style.fg)))?;
        self.stdout.queue(SetBackgroundColor(to_color(style.bg)))?;
        if style.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.stdout.queue(SetAttribute(Attribute::Dim))?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Terminal I/O itself is not unit-testable; at least pin the color
    // conversion and the invalidation flag.
    #[test]
    fn rgb_converts_losslessly() {
        let rgb = Rgb::new(1, 2, 3);
        assert_eq!(to_color(rgb), Color::Rgb { r: 1, g: 2, b: 3 });
    }

    #[test]
    fn invalidate_drops_the_cached_frame() {
        let mut renderer = TerminalRenderer::new();
        renderer.last = Some(Frame::new(2, 2));
        renderer.invalidate();
        assert!(renderer.last.is_none());
    }
}
