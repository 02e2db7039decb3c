//! Crossterm front end: a character-grid [`Surface`] and keyboard mapping.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    event::{KeyCode, KeyEvent, KeyEventKind},
    queue,
    style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::grid::{Direction, Grid};
use crate::render::{Color, Font, Surface};

/// Rows below the board reserved for the HUD.
const HUD_ROWS: usize = 2;

/// One grid cell is drawn as two terminal columns so it looks square.
const COLUMNS_PER_CELL: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    Quit,
}

/// Maps a key press to a game command. Releases and repeats are ignored.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let command = match key.code {
        KeyCode::Left | KeyCode::Char('a') => Command::Turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Command::Turn(Direction::Right),
        KeyCode::Up | KeyCode::Char('w') => Command::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Command::Turn(Direction::Down),
        KeyCode::Char('r') | KeyCode::Enter => Command::Restart,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
}

const BLANK: Glyph = Glyph {
    ch: ' ',
    fg: None,
    bg: None,
    bold: false,
};

/// Rasterizes drawing-unit coordinates onto a character buffer that is
/// written out with [`TerminalSurface::present`].
#[derive(Debug)]
pub struct TerminalSurface {
    step: i32,
    width: usize,
    height: usize,
    glyphs: Vec<Glyph>,
}

impl TerminalSurface {
    pub fn new(grid: &Grid) -> Self {
        let width = grid.columns().max(0) as usize * COLUMNS_PER_CELL;
        let height = grid.rows().max(0) as usize + HUD_ROWS;
        TerminalSurface {
            step: grid.step,
            width,
            height,
            glyphs: vec![BLANK; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.glyphs.fill(BLANK);
    }

    /// Terminal size needed to show the whole surface, as (columns, rows).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn glyph_mut(&mut self, column: usize, row: usize) -> Option<&mut Glyph> {
        if column < self.width && row < self.height {
            self.glyphs.get_mut(row * self.width + column)
        } else {
            None
        }
    }

    /// Grid index range covered by `[start, start + extent)`, clipped at zero.
    fn span(&self, start: i32, extent: i32) -> std::ops::Range<usize> {
        let first = start.div_euclid(self.step).max(0) as usize;
        let end = (start + extent + self.step - 1).div_euclid(self.step).max(0) as usize;
        first..end.max(first)
    }

    /// Writes the buffer to `out`, one terminal row per line.
    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        for (row, line) in self.glyphs.chunks(self.width.max(1)).enumerate() {
            queue!(out, MoveTo(0, row as u16))?;
            let mut current: Option<Glyph> = None;
            for glyph in line {
                let changed = current.map_or(true, |prev| {
                    prev.fg != glyph.fg || prev.bg != glyph.bg || prev.bold != glyph.bold
                });
                if changed {
                    let weight = if glyph.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(
                        out,
                        SetAttribute(weight),
                        SetForegroundColor(term_color(glyph.fg)),
                        SetBackgroundColor(term_color(glyph.bg)),
                    )?;
                    current = Some(*glyph);
                }
                queue!(out, Print(glyph.ch))?;
            }
            queue!(out, style::ResetColor, SetAttribute(Attribute::Reset))?;
        }
        out.flush()
    }

    #[cfg(test)]
    fn row_text(&self, row: usize) -> String {
        self.glyphs[row * self.width..(row + 1) * self.width]
            .iter()
            .map(|glyph| glyph.ch)
            .collect()
    }
}

impl Surface for TerminalSurface {
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        let columns = self.span(x, width);
        for row in self.span(y, height) {
            for cell in columns.clone() {
                for offset in 0..COLUMNS_PER_CELL {
                    if let Some(glyph) = self.glyph_mut(cell * COLUMNS_PER_CELL + offset, row) {
                        *glyph = Glyph {
                            bg: Some(color),
                            ..BLANK
                        };
                    }
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, font: Font) {
        if x < 0 || y < 0 {
            return;
        }
        let row = (y / self.step) as usize;
        let start = (x / self.step) as usize * COLUMNS_PER_CELL;
        for (i, ch) in text.chars().enumerate() {
            if let Some(glyph) = self.glyph_mut(start + i, row) {
                glyph.ch = ch;
                glyph.fg = Some(font.color);
                glyph.bold = font.bold;
            }
        }
    }
}

fn term_color(color: Option<Color>) -> style::Color {
    match color {
        None => style::Color::Reset,
        Some(Color::Gray) => style::Color::DarkGrey,
        Some(Color::Red) => style::Color::Red,
        Some(Color::Black) => style::Color::Black,
        Some(Color::White) => style::Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HUD_FONT;
    use crossterm::event::KeyModifiers;

    #[test]
    fn maps_arrows_and_commands() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(
            command_for(press(KeyCode::Left)),
            Some(Command::Turn(Direction::Left))
        );
        assert_eq!(
            command_for(press(KeyCode::Char('w'))),
            Some(Command::Turn(Direction::Up))
        );
        assert_eq!(command_for(press(KeyCode::Char('r'))), Some(Command::Restart));
        assert_eq!(command_for(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(command_for(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn ignores_key_release() {
        let mut key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(command_for(key), None);
    }

    #[test]
    fn rect_covers_two_columns_per_cell_and_clips() {
        let grid = Grid::new(40, 30, 10);
        let mut surface = TerminalSurface::new(&grid);
        assert_eq!(surface.size(), (8, 5));

        surface.fill_rect(10, 10, 10, 10, Color::Red);
        surface.fill_rect(30, 20, 50, 50, Color::White);
        let red: Vec<_> = surface
            .glyphs
            .iter()
            .enumerate()
            .filter(|(_, glyph)| glyph.bg == Some(Color::Red))
            .map(|(i, _)| (i % 8, i / 8))
            .collect();
        assert_eq!(red, vec![(2, 1), (3, 1)]);
        assert_eq!(surface.glyphs[2 * 8 + 7].bg, Some(Color::White));
    }

    #[test]
    fn text_lands_on_hud_row() {
        let grid = Grid::new(40, 30, 10);
        let mut surface = TerminalSurface::new(&grid);
        surface.fill_text("Score: 4", 0, grid.height + grid.step, HUD_FONT);
        assert_eq!(surface.row_text(4), "Score: 4");

        let mut out = Vec::new();
        surface.present(&mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("Score: 4"));
    }
}
