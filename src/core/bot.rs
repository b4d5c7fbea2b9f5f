//=========================================================================
// AI Bot Handle
//=========================================================================
//
// The engine owns at most one AI opponent and replaces it wholesale on
// reset. Move selection lives with the board scenes; the engine only
// constructs the bot with its board geometry and hands it out read-only.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputPoint;

//=== Bot =================================================================

/// AI opponent configuration, owned by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Bot {
    difficulty: u8,
    board_radius: f64,
    board_center: InputPoint,
}

impl Bot {
    pub fn new(difficulty: u8, board_radius: f64, board_center: InputPoint) -> Self {
        Self {
            difficulty,
            board_radius,
            board_center,
        }
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    pub fn board_radius(&self) -> f64 {
        self.board_radius
    }

    pub fn board_center(&self) -> InputPoint {
        self.board_center
    }

    /// Returns `true` if a logical point lies on the circular board.
    pub fn is_on_board(&self, point: InputPoint) -> bool {
        point.distance_to(self.board_center) <= self.board_radius
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
