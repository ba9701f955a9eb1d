//! Terminal rendering of world changes.

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use life_core::Position;
use life_world::TileVisitor;
use std::io::{self, Stdout, Write};

const OCCUPIED: char = '■';
const EMPTY: char = ' ';

/// Queues one cursor move and glyph per changed tile; nothing reaches the
/// terminal until [`ConsoleRenderer::flush`].
pub struct ConsoleRenderer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush queued output, surfacing the first error hit while drawing.
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()
    }

    fn draw(&mut self, position: Position, occupied: bool) -> io::Result<()> {
        let column = u16::try_from(position.x)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "column out of range"))?;
        let row = u16::try_from(position.y)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "row out of range"))?;
        let glyph = if occupied { OCCUPIED } else { EMPTY };

        queue!(self.out, MoveTo(column, row), Print(glyph))
    }
}

impl<W: Write> TileVisitor for ConsoleRenderer<W> {
    fn visit(&mut self, position: Position, occupied: bool) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.draw(position, occupied) {
            self.error = Some(e);
        }
    }
}

/// Switches to the alternate screen for its lifetime.
pub struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_at_position() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer.visit(Position::new(1, 2), true);
        renderer.visit(Position::new(0, 0), false);
        renderer.flush().unwrap();

        let output = String::from_utf8(renderer.out).unwrap();
        assert_eq!(output, "\x1b[3;2H■\x1b[1;1H ");
    }

    #[test]
    fn test_negative_position_is_reported_on_flush() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer.visit(Position::new(-1, 0), true);
        renderer.visit(Position::new(0, 0), true);

        let err = renderer.flush().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        // Drawing stops at the first failure
        assert!(renderer.out.is_empty());
        // The error is only reported once
        assert!(renderer.flush().is_ok());
    }
}
