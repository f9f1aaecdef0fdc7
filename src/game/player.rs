use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// The local human player, always moves first
    One,
    /// The remote player, moves come from the move service
    Two,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }

    /// Owner of a non-empty cell
    pub fn from_cell(cell: Cell) -> Option<Player> {
        match cell {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }

    pub fn is_remote(self) -> bool {
        self == Player::Two
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.other(), Player::One);
    }

    #[test]
    fn test_player_name() {
        assert_eq!(Player::One.name(), "Player 1");
        assert_eq!(Player::Two.name(), "Player 2");
    }

    #[test]
    fn test_cell_mapping() {
        assert_eq!(Player::from_cell(Player::One.to_cell()), Some(Player::One));
        assert_eq!(Player::from_cell(Player::Two.to_cell()), Some(Player::Two));
        assert_eq!(Player::from_cell(Cell::Empty), None);
    }
}
