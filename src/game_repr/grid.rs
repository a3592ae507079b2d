use crate::error::InvalidPositionError;

use super::moves::coords_to_square;
use super::piece::{Color, Piece, Type};
use super::position::{CastlingRights, Position};

/// Boundary board format: row 0 is rank 8, column 0 is file a.
/// Uppercase letters are white, lowercase black, `.` an empty square.
pub type Grid = [[char; 8]; 8];

pub const EMPTY_SQUARE: char = '.';

impl Position {
    /// Build a position from the symbolic grid. Castling rights are granted
    /// wherever king and rook still stand on their home squares; there is
    /// no en-passant square and the clocks start fresh.
    pub fn from_grid(grid: &Grid, white_to_move: bool) -> Result<Position, InvalidPositionError> {
        let mut pos = Position::empty(Color::from_is_white(white_to_move));

        for (row, cells) in grid.iter().enumerate() {
            for (col, &symbol) in cells.iter().enumerate() {
                if symbol == EMPTY_SQUARE {
                    continue;
                }
                let piece = Piece::from_char(symbol)
                    .ok_or(InvalidPositionError::UnknownSymbol { symbol, row, col })?;
                pos.put_piece(piece, coords_to_square(row, col));
            }
        }

        pos.set_castling(infer_castling(&pos));
        pos.finish_setup()
    }

    /// Replace this position with one read from a grid. On error the
    /// position is left untouched.
    pub fn set_position(&mut self, grid: &Grid, white_to_move: bool) -> Result<(), InvalidPositionError> {
        *self = Position::from_grid(grid, white_to_move)?;
        Ok(())
    }

    pub fn to_grid(&self) -> Grid {
        let mut grid = [[EMPTY_SQUARE; 8]; 8];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                if let Some(piece) = self.piece_at(coords_to_square(row, col)) {
                    *cell = piece.to_char();
                }
            }
        }
        grid
    }
}

fn infer_castling(pos: &Position) -> CastlingRights {
    let mut rights = CastlingRights::NONE;
    for (color, king_home) in [(Color::White, 4), (Color::Black, 60)] {
        if pos.piece_at(king_home) != Some(Piece::new(color, Type::King)) {
            continue;
        }
        let rook = Some(Piece::new(color, Type::Rook));
        if pos.piece_at(king_home + 3) == rook {
            rights.insert(CastlingRights::kingside(color));
        }
        if pos.piece_at(king_home - 4) == rook {
            rights.insert(CastlingRights::queenside(color));
        }
    }
    rights
}

/// Parse rows of text such as `"rnbqkbnr"` into a grid. Handy for tests and
/// tooling that keep boards as strings.
pub fn grid_from_rows(rows: [&str; 8]) -> Result<Grid, InvalidPositionError> {
    let mut grid = [[EMPTY_SQUARE; 8]; 8];
    for (row, text) in rows.iter().enumerate() {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 8 {
            return Err(InvalidPositionError::MalformedGrid { row, len: chars.len() });
        }
        grid[row].copy_from_slice(&chars);
    }
    Ok(grid)
}
