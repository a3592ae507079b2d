use std::fmt;

use smallvec::SmallVec;

use super::piece::Type;

/// Move buffer used by generation and ordering. Spills to the heap
/// only in the rare positions with more than 64 legal moves.
pub type MoveList = SmallVec<[Move; 64]>;

/// Special-move flag carried by every move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Normal,
    DoublePush,
    EnPassant,
    Castling,
}

/// A fully described move: everything make/unmake needs is stored here,
/// so undoing never has to look at the board to find out what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: u8,
    to: u8,
    piece: Type,
    captured: Option<Type>,
    promotion: Option<Type>,
    move_type: MoveType,
}

impl Move {
    pub fn new(from: usize, to: usize, piece: Type, captured: Option<Type>, move_type: MoveType) -> Move {
        debug_assert!(from < 64 && to < 64);
        Self {
            from: from as u8,
            to: to as u8,
            piece,
            captured,
            promotion: None,
            move_type,
        }
    }

    pub fn promotion(from: usize, to: usize, captured: Option<Type>, promote_to: Type) -> Move {
        Self {
            promotion: Some(promote_to),
            ..Self::new(from, to, Type::Pawn, captured, MoveType::Normal)
        }
    }

    #[inline(always)]
    pub fn from(&self) -> usize {
        self.from as usize
    }

    #[inline(always)]
    pub fn to(&self) -> usize {
        self.to as usize
    }

    #[inline(always)]
    pub fn piece(&self) -> Type {
        self.piece
    }

    #[inline(always)]
    pub fn captured(&self) -> Option<Type> {
        self.captured
    }

    #[inline(always)]
    pub fn promoted_to(&self) -> Option<Type> {
        self.promotion
    }

    #[inline(always)]
    pub fn move_type(&self) -> MoveType {
        self.move_type
    }

    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Neither a capture nor a promotion
    #[inline(always)]
    pub fn is_quiet(&self) -> bool {
        self.captured.is_none() && self.promotion.is_none()
    }

    /// Origin as a boundary `(row, col)` pair, row 0 being rank 8
    pub fn from_coords(&self) -> (usize, usize) {
        square_to_coords(self.from())
    }

    /// Destination as a boundary `(row, col)` pair, row 0 being rank 8
    pub fn to_coords(&self) -> (usize, usize) {
        square_to_coords(self.to())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from()), square_name(self.to()))?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// Board square for a boundary `(row, col)` pair
#[inline]
pub fn coords_to_square(row: usize, col: usize) -> usize {
    (7 - row) * 8 + col
}

#[inline]
pub fn square_to_coords(square: usize) -> (usize, usize) {
    (7 - square / 8, square % 8)
}

/// Algebraic name of a square, e.g. `e4`
pub fn square_name(square: usize) -> String {
    let file = (b'a' + (square % 8) as u8) as char;
    let rank = (b'1' + (square / 8) as u8) as char;
    format!("{}{}", file, rank)
}

/// Parse an algebraic square name
pub fn parse_square(name: &str) -> Option<usize> {
    let mut chars = name.chars();
    let file = chars.next()?;
    let rank = chars.next()?;
    if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    Some((rank as usize - '1' as usize) * 8 + (file as usize - 'a' as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_long_algebraic() {
        let mv = Move::new(12, 28, Type::Pawn, None, MoveType::DoublePush);
        assert_eq!(mv.to_string(), "e2e4");

        let promo = Move::promotion(52, 61, Some(Type::Rook), Type::Knight);
        assert_eq!(promo.to_string(), "e7f8n");
        assert!(promo.is_capture());
        assert!(!promo.is_quiet());
    }

    #[test]
    fn test_coords_follow_grid_orientation() {
        // a8 is the top-left cell of the grid
        assert_eq!(coords_to_square(0, 0), 56);
        // h1 is the bottom-right cell
        assert_eq!(coords_to_square(7, 7), 7);
        for sq in 0..64 {
            let (r, c) = square_to_coords(sq);
            assert_eq!(coords_to_square(r, c), sq);
        }
    }

    #[test]
    fn test_parse_square() {
        assert_eq!(parse_square("a1"), Some(0));
        assert_eq!(parse_square("h8"), Some(63));
        assert_eq!(parse_square("e4"), Some(28));
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("e9"), None);
        assert_eq!(parse_square("e44"), None);
    }
}
