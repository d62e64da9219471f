//! Turn engine: draw, discard, pass.
//!
//! A seat awaiting a draw always draws. A seat awaiting a discard throws the
//! tile it just drew (tsumogiri), except the human seat with auto-play off,
//! which waits for a hand index from the board. Wall exhaustion is the only
//! way out and it is terminal until the session is reset.
//!
//! Each call advances at most one sub-step; pacing between steps belongs to
//! the caller (see [`pacing`]).

use crate::game::config::TableConfig;
use crate::game::error::TurnError;
use crate::game::seat::Seat;
use crate::game::table::Table;
use crate::game::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingDraw(Seat),
    AwaitingDiscard(Seat),
    Exhausted,
}

/// What one call to [`step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Drew(Seat, Tile),
    Discarded(Seat, Tile),
    /// Human seat holds 14 tiles and auto-play is off. Nothing changed.
    AwaitingHuman(Seat),
    /// The wall ran out (now or earlier). Nothing changed.
    Exhausted,
}

pub fn phase(table: &Table) -> Phase {
    if table.is_exhausted() {
        Phase::Exhausted
    } else if table.has_drawn() {
        Phase::AwaitingDiscard(table.turn())
    } else {
        Phase::AwaitingDraw(table.turn())
    }
}

/// Index of the most recently drawn tile.
pub fn tsumogiri_index(hand: &[Tile]) -> usize {
    hand.len().saturating_sub(1)
}

/// Whether `seat` discards on its own under `config`.
pub fn is_automated(seat: Seat, config: &TableConfig) -> bool {
    seat != config.human_seat || config.auto_play
}

/// Advance the table by one sub-step.
pub fn step(table: &mut Table, config: &TableConfig) -> Result<Step, TurnError> {
    match phase(table) {
        Phase::Exhausted => Ok(Step::Exhausted),
        Phase::AwaitingDraw(seat) => match table.draw(seat) {
            Ok(tile) => {
                log::debug!("{} drew {} ({} left)", seat, tile, table.wall_len());
                Ok(Step::Drew(seat, tile))
            }
            Err(TurnError::WallExhausted) => {
                log::info!(
                    "wall exhausted after {} draws and {} discards",
                    table.draws(),
                    table.discards()
                );
                Ok(Step::Exhausted)
            }
            Err(e) => Err(e),
        },
        Phase::AwaitingDiscard(seat) if is_automated(seat, config) => {
            let index = tsumogiri_index(table.hand(seat));
            let tile = table.discard(seat, index)?;
            log::debug!("{} discarded {}", seat, tile);
            Ok(Step::Discarded(seat, tile))
        }
        Phase::AwaitingDiscard(seat) => Ok(Step::AwaitingHuman(seat)),
    }
}

/// The human seat's explicit pick from the displayed hand.
pub fn discard_selected(
    table: &mut Table,
    config: &TableConfig,
    index: usize,
) -> Result<Tile, TurnError> {
    let human = config.human_seat;
    match phase(table) {
        Phase::Exhausted => return Err(TurnError::RoundOver),
        Phase::AwaitingDraw(seat) if seat == human => return Err(TurnError::NotDrawn(human)),
        Phase::AwaitingDraw(turn) | Phase::AwaitingDiscard(turn) if turn != human => {
            return Err(TurnError::OutOfTurn { seat: human, turn });
        }
        _ => {}
    }
    let tile = table.discard(human, index)?;
    log::debug!("{} chose to discard {} (index {})", human, tile, index);
    Ok(tile)
}

/// Milliseconds to wait before the next automatic [`step`], or `None` when
/// the table is waiting on a click or the round has ended.
pub fn pacing(table: &Table, config: &TableConfig) -> Option<u32> {
    let cpu_delay = if config.auto_play {
        config.fast_cpu_delay_ms
    } else {
        config.cpu_delay_ms
    };
    match phase(table) {
        Phase::Exhausted => None,
        Phase::AwaitingDraw(seat) | Phase::AwaitingDiscard(seat) if seat != config.human_seat => {
            Some(cpu_delay)
        }
        Phase::AwaitingDraw(_) => Some(0),
        Phase::AwaitingDiscard(_) if config.auto_play => Some(config.auto_discard_delay_ms),
        Phase::AwaitingDiscard(_) => None,
    }
}

/// Run automatic steps until the table needs the human or the wall runs out.
/// Returns the number of steps taken.
pub fn run_until_idle(table: &mut Table, config: &TableConfig) -> Result<usize, TurnError> {
    let mut steps = 0;
    loop {
        match step(table, config)? {
            Step::Drew(..) | Step::Discarded(..) => steps += 1,
            Step::AwaitingHuman(_) | Step::Exhausted => return Ok(steps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::table::HAND_SIZE;
    use crate::game::tile::is_sorted;
    use crate::game::wall::{Wall, full_set};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn table(seed: u64) -> Table {
        Table::shuffled(&mut SmallRng::seed_from_u64(seed), Seat::East, false)
    }

    fn manual() -> TableConfig {
        TableConfig::default().instant()
    }

    fn auto() -> TableConfig {
        TableConfig {
            auto_play: true,
            ..manual()
        }
    }

    fn multiset(t: &Table) -> Vec<(crate::game::tile::Suit, u8, bool)> {
        let mut keys: Vec<_> = t.all_tiles().iter().map(Tile::sort_key).collect();
        keys.sort();
        keys
    }

    #[test]
    fn fresh_table_waits_on_human_discard() {
        let mut t = table(1);
        assert_eq!(phase(&t), Phase::AwaitingDiscard(Seat::East));
        assert_eq!(step(&mut t, &manual()), Ok(Step::AwaitingHuman(Seat::East)));
        assert_eq!(t.hand(Seat::East).len(), 14);
        assert_eq!(pacing(&t, &manual()), None);
    }

    #[test]
    fn human_pick_then_cpu_rotation() {
        let mut t = table(2);
        let cfg = manual();
        discard_selected(&mut t, &cfg, 13).unwrap();
        assert_eq!(phase(&t), Phase::AwaitingDraw(Seat::South));

        // Three CPU seats draw and discard, then the human draws.
        for seat in [Seat::South, Seat::West, Seat::North] {
            assert!(matches!(step(&mut t, &cfg), Ok(Step::Drew(s, _)) if s == seat));
            let drawn = *t.hand(seat).last().unwrap();
            match step(&mut t, &cfg) {
                Ok(Step::Discarded(s, tile)) => {
                    assert_eq!(s, seat);
                    assert_eq!(tile.sort_key(), drawn.sort_key());
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(phase(&t), Phase::AwaitingDraw(Seat::East));
        assert_eq!(pacing(&t, &cfg), Some(0));
        assert!(matches!(step(&mut t, &cfg), Ok(Step::Drew(Seat::East, _))));
        assert_eq!(step(&mut t, &cfg), Ok(Step::AwaitingHuman(Seat::East)));
        assert_eq!(t.discards(), 4);
    }

    #[test]
    fn four_discards_return_the_pointer() {
        let mut t = table(3);
        let start = t.turn();
        let cfg = auto();
        let mut discards = 0;
        while discards < 4 {
            if let Ok(Step::Discarded(..)) = step(&mut t, &cfg) {
                discards += 1;
            }
        }
        assert_eq!(t.turn(), start);
    }

    #[test]
    fn discard_selected_rejects_wrong_phase() {
        let mut t = table(4);
        let cfg = manual();
        assert_eq!(
            discard_selected(&mut t, &cfg, 14),
            Err(TurnError::BadIndex { index: 14, len: 14 })
        );
        discard_selected(&mut t, &cfg, 0).unwrap();
        assert_eq!(
            discard_selected(&mut t, &cfg, 0),
            Err(TurnError::OutOfTurn {
                seat: Seat::East,
                turn: Seat::South
            })
        );
        assert_eq!(run_until_idle(&mut t, &cfg), Ok(7));
        assert_eq!(phase(&t), Phase::AwaitingDiscard(Seat::East));
    }

    #[test]
    fn human_must_draw_before_picking() {
        let mut t = table(5);
        let cfg = TableConfig {
            human_seat: Seat::South,
            ..manual()
        };
        step(&mut t, &cfg).unwrap(); // east tsumogiri
        assert_eq!(phase(&t), Phase::AwaitingDraw(Seat::South));
        assert_eq!(discard_selected(&mut t, &cfg, 0), Err(TurnError::NotDrawn(Seat::South)));
    }

    #[test]
    fn full_auto_play_draws_the_whole_wall() {
        let mut t = table(6);
        let initial_wall = t.wall_len();
        let steps = run_until_idle(&mut t, &auto()).unwrap();
        assert!(t.is_exhausted());
        assert_eq!(t.draws() as usize, initial_wall);
        assert_eq!(t.wall_len(), 0);
        // every draw is followed by a discard, plus the dealer's opening one
        assert_eq!(steps, 2 * initial_wall + 1);
        assert_eq!(step(&mut t, &auto()), Ok(Step::Exhausted));
        assert_eq!(pacing(&t, &auto()), None);
        assert_eq!(discard_selected(&mut t, &auto(), 0), Err(TurnError::RoundOver));
    }

    #[test]
    fn pacing_follows_the_seat() {
        let mut t = table(7);
        let slow = TableConfig::default();
        let fast = TableConfig {
            auto_play: true,
            ..TableConfig::default()
        };
        assert_eq!(pacing(&t, &fast), Some(100));
        discard_selected(&mut t, &slow, 13).unwrap();
        assert_eq!(pacing(&t, &slow), Some(400));
        assert_eq!(pacing(&t, &fast), Some(50));
    }

    #[test]
    fn tsumogiri_on_tiny_wall_ends_cleanly() {
        let tiles: Vec<Tile> = full_set(false).into_iter().take(58).collect();
        let mut t = Table::deal(Wall::from_tiles(tiles), Seat::East).unwrap();
        assert_eq!(t.wall_len(), 4);
        run_until_idle(&mut t, &auto()).unwrap();
        assert_eq!(t.draws(), 4);
        assert!(t.is_exhausted());
    }

    proptest! {
        #[test]
        fn invariants_hold_over_random_play(seed in any::<u64>(), picks in prop::collection::vec(0usize..14, 0..200)) {
            let mut t = table(seed);
            let cfg = manual();
            let original = multiset(&t);
            let mut picks = picks.into_iter();

            loop {
                let wall_before = t.wall_len();
                let turn_before = t.turn();
                let result = match step(&mut t, &cfg) {
                    Ok(Step::AwaitingHuman(_)) => match picks.next() {
                        Some(i) => discard_selected(&mut t, &cfg, i).map(|tile| Step::Discarded(cfg.human_seat, tile)),
                        None => break,
                    },
                    other => other,
                };
                match result {
                    Ok(Step::Drew(..)) => {
                        prop_assert_eq!(t.wall_len(), wall_before - 1);
                    }
                    Ok(Step::Discarded(..)) => {
                        prop_assert_eq!(t.wall_len(), wall_before);
                        prop_assert_eq!(t.turn(), turn_before.next());
                        prop_assert!(is_sorted(t.hand(turn_before)));
                    }
                    Ok(Step::Exhausted) => break,
                    Ok(Step::AwaitingHuman(_)) => unreachable!(),
                    Err(e) => prop_assert!(false, "engine error {}", e),
                }
                for seat in Seat::ALL {
                    let n = t.hand(seat).len();
                    prop_assert!(n == HAND_SIZE || n == HAND_SIZE + 1);
                }
                prop_assert!(t.wall_len() <= wall_before);
                prop_assert_eq!(multiset(&t), original.clone());
            }
        }
    }
}
