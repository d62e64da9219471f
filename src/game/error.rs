//! Turn engine errors.

use crate::game::seat::Seat;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// The wall ran out on a draw. Normal end of the round.
    #[error("the wall is exhausted")]
    WallExhausted,
    #[error("the round is over; reset to deal again")]
    RoundOver,
    #[error("{seat} acted out of turn ({turn} to act)")]
    OutOfTurn { seat: Seat, turn: Seat },
    #[error("{0} has already drawn this turn")]
    AlreadyDrawn(Seat),
    #[error("{0} must draw before discarding")]
    NotDrawn(Seat),
    #[error("hand index {index} out of range for {len} tiles")]
    BadIndex { index: usize, len: usize },
}

impl TurnError {
    /// True for conditions the engine should never reach through its own
    /// transitions.
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(self, TurnError::WallExhausted | TurnError::RoundOver)
    }
}
