//! The wall: the shared draw pile.
//!
//! Stored as a `Vec` whose back is the draw end. The indicator tile is taken
//! from the front (the dead end), so it never collides with live draws.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::game::tile::{Suit, Tile};

/// Copies of each face in a full set.
pub const COPIES: usize = 4;

/// 34 faces x 4 copies.
pub const FULL_SET_SIZE: usize = 136;

/// The complete, unshuffled tile set in canonical order.
///
/// With `red_fives`, the first copy of 5m, 5p and 5s is the bonus variant.
pub fn full_set(red_fives: bool) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(FULL_SET_SIZE);
    for suit in Suit::ALL {
        for rank in 1..=suit.max_rank() {
            for copy in 0..COPIES {
                let Ok(tile) = Tile::new(rank, suit) else {
                    continue;
                };
                let red = red_fives && rank == 5 && suit != Suit::Honor && copy == 0;
                tiles.push(if red { tile.into_bonus() } else { tile });
            }
        }
    }
    tiles
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Wall {
    tiles: Vec<Tile>,
}

impl Wall {
    /// A wall in exactly the given order; the last tile is drawn first.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// A shuffled full set.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R, red_fives: bool) -> Self {
        let mut tiles = full_set(red_fives);
        tiles.shuffle(rng);
        Self { tiles }
    }

    /// Take one tile from the draw end.
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    /// Take one tile from the dead end (used for the indicator).
    pub fn set_aside(&mut self) -> Option<Tile> {
        if self.tiles.is_empty() {
            None
        } else {
            Some(self.tiles.remove(0))
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
