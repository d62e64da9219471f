//! The table: single source of truth for one round.
//!
//! Everything is private; collaborators read through getters and mutate
//! only through [`Table::draw`] and [`Table::discard`], which check their
//! preconditions before touching anything.

use rand::Rng;
use serde::Serialize;

use crate::game::error::TurnError;
use crate::game::seat::Seat;
use crate::game::tile::{Tile, sort_hand};
use crate::game::wall::Wall;

/// Tiles dealt to every seat before the dealer's extra draw.
pub const HAND_SIZE: usize = 13;

#[derive(Debug, Clone, Serialize)]
pub struct Table {
    wall: Wall,
    hands: [Vec<Tile>; 4],
    rivers: [Vec<Tile>; 4],
    turn: Seat,
    has_drawn: bool,
    indicator: Tile,
    exhausted: bool,
    draws: u32,
    discards: u32,
    seed: Option<u64>,
}

impl Table {
    /// Shuffle a full set with `rng` and deal.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R, dealer: Seat, red_fives: bool) -> Table {
        // A full set always covers the deal.
        Table::deal(Wall::shuffled(rng, red_fives), dealer)
            .unwrap_or_else(|| unreachable!("full set is larger than the deal"))
    }

    /// Deal from a wall in its given order.
    ///
    /// Each seat takes 13 from the draw end in rotation order starting at the
    /// dealer, hands are sorted, the dealer draws a 14th (left unsorted at the
    /// end), and the indicator is set aside from the dead end. Returns `None`
    /// if the wall cannot cover all of that.
    pub fn deal(mut wall: Wall, dealer: Seat) -> Option<Table> {
        let mut hands: [Vec<Tile>; 4] = Default::default();
        for seat in dealer.rotation() {
            let hand = &mut hands[seat.index()];
            for _ in 0..HAND_SIZE {
                hand.push(wall.draw()?);
            }
            sort_hand(hand);
        }
        let extra = wall.draw()?;
        hands[dealer.index()].push(extra);
        let indicator = wall.set_aside()?;

        Some(Table {
            wall,
            hands,
            rivers: Default::default(),
            turn: dealer,
            has_drawn: true,
            indicator,
            exhausted: false,
            draws: 0,
            discards: 0,
            seed: None,
        })
    }

    pub(crate) fn with_seed(self, seed: u64) -> Table {
        Table {
            seed: Some(seed),
            ..self
        }
    }

    // ── State Store mutations ──────────────────────────────────────

    /// Move the top of the wall into `seat`'s hand.
    ///
    /// An empty wall ends the round: the table is marked exhausted and
    /// `WallExhausted` is returned with wall, hands and rivers untouched.
    pub fn draw(&mut self, seat: Seat) -> Result<Tile, TurnError> {
        self.check_turn(seat)?;
        if self.has_drawn {
            return Err(TurnError::AlreadyDrawn(seat));
        }
        let Some(tile) = self.wall.draw() else {
            self.exhausted = true;
            return Err(TurnError::WallExhausted);
        };
        self.hands[seat.index()].push(tile);
        self.has_drawn = true;
        self.draws += 1;
        Ok(tile)
    }

    /// Move `hand[index]` to `seat`'s river, re-sort the hand and pass the
    /// turn on.
    pub fn discard(&mut self, seat: Seat, index: usize) -> Result<Tile, TurnError> {
        self.check_turn(seat)?;
        let hand = &mut self.hands[seat.index()];
        if !self.has_drawn || hand.len() <= HAND_SIZE {
            return Err(TurnError::NotDrawn(seat));
        }
        if index >= hand.len() {
            return Err(TurnError::BadIndex {
                index,
                len: hand.len(),
            });
        }
        let tile = hand.remove(index);
        sort_hand(hand);
        self.rivers[seat.index()].push(tile);
        self.turn = seat.next();
        self.has_drawn = false;
        self.discards += 1;
        Ok(tile)
    }

    fn check_turn(&self, seat: Seat) -> Result<(), TurnError> {
        if self.exhausted {
            return Err(TurnError::RoundOver);
        }
        if seat != self.turn {
            return Err(TurnError::OutOfTurn {
                seat,
                turn: self.turn,
            });
        }
        Ok(())
    }

    // ── Read access ────────────────────────────────────────────────

    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    pub fn wall_len(&self) -> usize {
        self.wall.len()
    }

    pub fn hand(&self, seat: Seat) -> &[Tile] {
        &self.hands[seat.index()]
    }

    pub fn river(&self, seat: Seat) -> &[Tile] {
        &self.rivers[seat.index()]
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    pub fn indicator(&self) -> Tile {
        self.indicator
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn discards(&self) -> u32 {
        self.discards
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Every tile on the table: wall, hands, rivers and the indicator.
    pub fn all_tiles(&self) -> Vec<Tile> {
        let mut tiles = self.wall.tiles().to_vec();
        for seat in Seat::ALL {
            tiles.extend_from_slice(self.hand(seat));
            tiles.extend_from_slice(self.river(seat));
        }
        tiles.push(self.indicator);
        tiles
    }
}
