use crate::error::InvalidPositionError;

use super::moves::{parse_square, square_name};
use super::piece::{Color, Piece};
use super::position::{CastlingRights, Position};

fn malformed(msg: impl Into<String>) -> InvalidPositionError {
    InvalidPositionError::MalformedFen(msg.into())
}

impl Position {
    /// Parse a FEN string. Placement and side to move are required; missing
    /// castling, en-passant and clock fields default to `- - 0 1`.
    pub fn from_fen(fen: &str) -> Result<Position, InvalidPositionError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let placement = parts.first().ok_or_else(|| malformed("empty string"))?;

        let side = match parts.get(1).copied().unwrap_or("w") {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(malformed(format!("bad side to move {:?}", other))),
        };
        let mut pos = Position::empty(side);

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(malformed(format!("expected 8 ranks, found {}", ranks.len())));
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or_else(|| malformed(format!("unknown piece {:?}", c)))?;
                if file >= 8 {
                    return Err(malformed(format!("rank {} overflows", rank + 1)));
                }
                pos.put_piece(piece, rank * 8 + file);
                file += 1;
            }
            if file != 8 {
                return Err(malformed(format!("rank {} has {} files", rank + 1, file)));
            }
        }

        let mut castling = CastlingRights::NONE;
        if let Some(field) = parts.get(2).filter(|f| **f != "-") {
            for c in field.chars() {
                let right = match c {
                    'K' => CastlingRights::WHITE_KINGSIDE,
                    'Q' => CastlingRights::WHITE_QUEENSIDE,
                    'k' => CastlingRights::BLACK_KINGSIDE,
                    'q' => CastlingRights::BLACK_QUEENSIDE,
                    _ => return Err(malformed(format!("bad castling field {:?}", field))),
                };
                castling.insert(right);
            }
        }
        pos.set_castling(castling);

        if let Some(field) = parts.get(3).filter(|f| **f != "-") {
            let square = parse_square(field).ok_or_else(|| malformed(format!("bad en passant square {:?}", field)))?;
            pos.set_en_passant(Some(square));
        }

        let halfmove = parse_clock(parts.get(4), 0)?;
        let fullmove = parse_clock(parts.get(5), 1)?;
        pos.set_clocks(halfmove, fullmove);

        pos.finish_setup()
    }

    /// Converts the current position to FEN notation
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(rank * 8 + file) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let rights = self.castling_rights();
        if rights == CastlingRights::NONE {
            fen.push('-');
        } else {
            for (flag, c) in [
                (CastlingRights::WHITE_KINGSIDE, 'K'),
                (CastlingRights::WHITE_QUEENSIDE, 'Q'),
                (CastlingRights::BLACK_KINGSIDE, 'k'),
                (CastlingRights::BLACK_QUEENSIDE, 'q'),
            ] {
                if rights.has(flag) {
                    fen.push(c);
                }
            }
        }

        fen.push(' ');
        match self.en_passant() {
            Some(sq) => fen.push_str(&square_name(sq)),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock(), self.fullmove_number()));
        fen
    }
}

fn parse_clock(field: Option<&&str>, default: u16) -> Result<u16, InvalidPositionError> {
    match field {
        Some(text) => text.parse().map_err(|_| malformed(format!("bad clock {:?}", text))),
        None => Ok(default),
    }
}
