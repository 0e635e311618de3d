//! Terminal rendering module
//!
//! Maps the playfield's pixel coordinates onto character cells and draws a
//! frame with crossterm. No game logic lives here.

pub mod terminal;

pub use terminal::render;

use crate::sim::rect::Rect;

/// Colors for game elements
pub mod colors {
    use crossterm::style::Color;

    use crate::sim::brick::BrickColour;
    use crate::sim::round::Backdrop;

    pub const EDGE: Color = Color::Grey;
    pub const PADDLE: Color = Color::Red;
    pub const BALL: Color = Color::White;
    pub const HUD_SCORE: Color = Color::Yellow;
    pub const HUD_LIVES: Color = Color::Red;
    pub const CAPTION: Color = Color::White;
    pub const HINT: Color = Color::DarkGrey;

    pub fn brick(colour: BrickColour) -> Color {
        match colour {
            BrickColour::White => Color::White,
            BrickColour::Orange => Color::DarkYellow,
            BrickColour::Cyan => Color::Cyan,
            BrickColour::Green => Color::Green,
            BrickColour::Red => Color::Red,
            BrickColour::Blue => Color::Blue,
            BrickColour::Pink => Color::Magenta,
            BrickColour::Yellow => Color::Yellow,
            BrickColour::Silver => Color::Grey,
            BrickColour::Gold => Color::DarkYellow,
        }
    }

    pub fn backdrop(backdrop: Backdrop) -> Color {
        match backdrop {
            Backdrop::Blue => Color::DarkBlue,
            Backdrop::Green => Color::DarkGreen,
        }
    }
}

/// Pixel to character-cell mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Pixels per column
    pub cell_width: f32,
    /// Pixels per row
    pub cell_height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            cell_width: 10.0,
            cell_height: 20.0,
        }
    }
}

/// A run of cells on one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub col: u16,
    pub row: u16,
    pub len: u16,
}

impl Viewport {
    /// Viewport that fits a screen of `screen` pixels into `cols` x `rows` cells
    pub fn fit(screen: &Rect, cols: u16, rows: u16) -> Self {
        let fitted = Self {
            cell_width: screen.width() / f32::from(cols.max(1)),
            cell_height: screen.height() / f32::from(rows.max(1)),
        };
        let min = Self::default();
        Self {
            cell_width: fitted.cell_width.max(min.cell_width),
            cell_height: fitted.cell_height.max(min.cell_height),
        }
    }

    pub fn col(&self, x: f32) -> u16 {
        (x / self.cell_width).floor().max(0.0) as u16
    }

    pub fn row(&self, y: f32) -> u16 {
        (y / self.cell_height).floor().max(0.0) as u16
    }

    /// Cells covered by the top row of `rect`, at least one cell wide
    pub fn span(&self, rect: &Rect) -> CellSpan {
        let col = self.col(rect.left());
        let end = self.col(rect.right() - 0.01).max(col);
        CellSpan {
            col,
            row: self.row(rect.top()),
            len: end - col + 1,
        }
    }

    /// Rows covered by `rect`
    pub fn rows(&self, rect: &Rect) -> std::ops::RangeInclusive<u16> {
        self.row(rect.top())..=self.row(rect.bottom() - 0.01).max(self.row(rect.top()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_of_brick() {
        let vp = Viewport::default();
        let span = vp.span(&Rect::new(20.5, 122.0, 43.0, 21.0));
        assert_eq!(span, CellSpan { col: 2, row: 6, len: 5 });
    }

    #[test]
    fn test_tiny_rect_covers_a_cell() {
        let vp = Viewport::default();
        assert_eq!(vp.span(&Rect::new(305.0, 305.0, 2.0, 2.0)).len, 1);
    }

    #[test]
    fn test_fit_never_shrinks_cells() {
        let screen = Rect::new(0.0, 0.0, 600.0, 650.0);
        assert_eq!(Viewport::fit(&screen, 300, 300), Viewport::default());
        let vp = Viewport::fit(&screen, 30, 13);
        assert_eq!(vp.cell_width, 20.0);
        assert_eq!(vp.cell_height, 50.0);
    }

    #[test]
    fn test_wall_rows() {
        let vp = Viewport::default();
        let rows = vp.rows(&Rect::new(0.0, 60.0, 20.0, 590.0));
        assert_eq!(*rows.start(), 3);
        assert_eq!(*rows.end(), 32);
    }
}
