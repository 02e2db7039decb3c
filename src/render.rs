//! Drawing routines for the board, the HUD and the end-of-round banner.
//!
//! Everything is drawn through [`Surface`], which only knows how to fill
//! rectangles and print text at drawing-unit coordinates.

use crate::grid::{Cell, Grid};
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Gray,
    Red,
    Black,
    White,
}

pub const CANVAS_COLOR: Color = Color::Gray;
pub const FOOD_COLOR: Color = Color::Red;
pub const SNAKE_COLOR: Color = Color::Black;
pub const SNAKE_HEAD_COLOR: Color = Color::White;
pub const BANNER_COLOR: Color = Color::White;
pub const BANNER_TEXT_COLOR: Color = Color::Red;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    pub size: u16,
    pub bold: bool,
    pub color: Color,
}

pub const HUD_FONT: Font = Font {
    size: 12,
    bold: false,
    color: Color::White,
};

pub const BANNER_FONT: Font = Font {
    size: 15,
    bold: true,
    color: BANNER_TEXT_COLOR,
};

pub trait Surface {
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color);
    fn fill_text(&mut self, text: &str, x: i32, y: i32, font: Font);
}

/// Clears the board and draws the food.
pub fn draw_board(surface: &mut impl Surface, grid: &Grid, food: Option<Cell>) {
    surface.fill_rect(0, 0, grid.width, grid.height, CANVAS_COLOR);
    if let Some(food) = food {
        surface.fill_rect(food.x, food.y, grid.step, grid.step, FOOD_COLOR);
    }
}

pub fn draw_snake(surface: &mut impl Surface, grid: &Grid, snake: &Snake) {
    for (i, part) in snake.cells().enumerate() {
        let color = if i == 0 { SNAKE_HEAD_COLOR } else { SNAKE_COLOR };
        surface.fill_rect(part.x, part.y, grid.step, grid.step, color);
    }
}

/// Score and highscore lines, printed under the board.
pub fn draw_hud(surface: &mut impl Surface, grid: &Grid, score: u32, highscore: Option<u32>) {
    let y = grid.height + grid.step;
    surface.fill_text(&format!("Score: {score}"), 0, y, HUD_FONT);
    let highscore = match highscore {
        Some(highscore) => format!("Highscore: {highscore}"),
        None => "Highscore: -".to_owned(),
    };
    surface.fill_text(&highscore, grid.width / 2, y, HUD_FONT);
}

pub fn draw_end_banner(surface: &mut impl Surface, grid: &Grid, won: bool, score: u32) {
    let step = grid.step;
    let text = if won { "You won :)" } else { "You lost :(" };
    surface.fill_rect(step, step, step * 12, step * 5, BANNER_COLOR);
    surface.fill_text("Game over!", step * 2, step * 2, BANNER_FONT);
    surface.fill_text(text, step * 2, step * 3, BANNER_FONT);
    surface.fill_text(&format!("Score: {score}"), step * 2, step * 4, BANNER_FONT);
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        font: Font,
    },
}

/// Surface that remembers every call, for headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            DrawCall::Rect { .. } => None,
        })
    }

    /// Cells filled with `color` using one-cell rectangles.
    pub fn cells_with(&self, color: Color, step: i32) -> Vec<Cell> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                DrawCall::Rect {
                    x,
                    y,
                    width,
                    height,
                    color: c,
                } if c == color && width == step && height == step => Some(Cell::new(x, y)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        self.calls.push(DrawCall::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, font: Font) {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            x,
            y,
            font,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_is_drawn_in_its_own_color() {
        let grid = Grid::new(100, 100, 10);
        let snake = Snake::horizontal(&grid, 3);
        let mut surface = RecordingSurface::new();
        draw_board(&mut surface, &grid, Some(Cell::new(0, 0)));
        draw_snake(&mut surface, &grid, &snake);

        assert_eq!(
            surface.calls[0],
            DrawCall::Rect {
                x: 0,
                y: 0,
                width: 100,
                height: 100,
                color: CANVAS_COLOR
            }
        );
        assert_eq!(surface.cells_with(FOOD_COLOR, 10), vec![Cell::new(0, 0)]);
        assert_eq!(surface.cells_with(SNAKE_HEAD_COLOR, 10), vec![Cell::new(40, 50)]);
        assert_eq!(
            surface.cells_with(SNAKE_COLOR, 10),
            vec![Cell::new(30, 50), Cell::new(20, 50)]
        );
    }

    #[test]
    fn banner_names_outcome_and_score() {
        let grid = Grid::new(100, 100, 10);
        let mut surface = RecordingSurface::new();
        draw_end_banner(&mut surface, &grid, false, 7);
        let texts: Vec<_> = surface.texts().collect();
        assert_eq!(texts, vec!["Game over!", "You lost :(", "Score: 7"]);
    }

    #[test]
    fn hud_shows_missing_highscore() {
        let grid = Grid::new(100, 100, 10);
        let mut surface = RecordingSurface::new();
        draw_hud(&mut surface, &grid, 3, None);
        let texts: Vec<_> = surface.texts().collect();
        assert_eq!(texts, vec!["Score: 3", "Highscore: -"]);
    }
}
