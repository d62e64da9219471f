//! Tile model: rank, suit and the cosmetic bonus ("red") flag.
//!
//! Text form follows the usual shorthand: `"5m"`, `"9p"`, `"1s"`, `"7z"`,
//! with a trailing `r` for bonus tiles (`"5mr"`). Tiles serialize to JSON
//! in that form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Suits in canonical hand order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Man,
    Pin,
    Sou,
    Honor,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Man, Suit::Pin, Suit::Sou, Suit::Honor];

    /// Highest rank in this suit (winds + dragons for honors).
    pub fn max_rank(self) -> u8 {
        match self {
            Suit::Honor => 7,
            _ => 9,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Suit::Man => 'm',
            Suit::Pin => 'p',
            Suit::Sou => 's',
            Suit::Honor => 'z',
        }
    }

    fn from_letter(c: char) -> Option<Suit> {
        match c {
            'm' => Some(Suit::Man),
            'p' => Some(Suit::Pin),
            's' => Some(Suit::Sou),
            'z' => Some(Suit::Honor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TileError {
    #[error("rank {rank} is out of range for suit {suit:?}")]
    Rank { rank: u8, suit: Suit },
    #[error("unrecognised tile '{0}'")]
    Parse(String),
}

/// One tile. Equality and hashing ignore the bonus flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Tile {
    rank: u8,
    suit: Suit,
    bonus: bool,
}

impl Tile {
    pub fn new(rank: u8, suit: Suit) -> Result<Tile, TileError> {
        if rank == 0 || rank > suit.max_rank() {
            return Err(TileError::Rank { rank, suit });
        }
        Ok(Tile {
            rank,
            suit,
            bonus: false,
        })
    }

    /// The same face, drawn as the bonus variant.
    pub fn into_bonus(self) -> Tile {
        Tile {
            bonus: true,
            ..self
        }
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn is_bonus(&self) -> bool {
        self.bonus
    }

    /// Canonical order key: suit, then rank, then plain before bonus.
    pub fn sort_key(&self) -> (Suit, u8, bool) {
        (self.suit, self.rank, self.bonus)
    }
}

/// Sort a hand into canonical order. Stable, so repeated sorting is a no-op.
pub fn sort_hand(hand: &mut [Tile]) {
    hand.sort_by_key(Tile::sort_key);
}

pub fn is_sorted(hand: &[Tile]) -> bool {
    hand.windows(2).all(|w| w[0].sort_key() <= w[1].sort_key())
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
        self.suit.hash(state);
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.letter())?;
        if self.bonus {
            f.write_str("r")?;
        }
        Ok(())
    }
}

impl FromStr for Tile {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TileError::Parse(s.to_string());
        let (face, bonus) = match s.strip_suffix('r') {
            Some(face) => (face, true),
            None => (s, false),
        };
        let mut chars = face.chars();
        let rank = chars.next().and_then(|c| c.to_digit(10)).ok_or_else(bad)? as u8;
        let suit = chars.next().and_then(Suit::from_letter).ok_or_else(bad)?;
        if chars.next().is_some() {
            return Err(bad());
        }
        let tile = Tile::new(rank, suit)?;
        Ok(if bonus { tile.into_bonus() } else { tile })
    }
}

impl From<Tile> for String {
    fn from(tile: Tile) -> String {
        tile.to_string()
    }
}

impl TryFrom<String> for Tile {
    type Error = TileError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Tile {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_prints_shorthand() {
        assert_eq!(t("5m").to_string(), "5m");
        assert_eq!(t("7z").suit(), Suit::Honor);
        assert!(t("5pr").is_bonus());
        assert_eq!(t("5pr").to_string(), "5pr");
    }

    #[test]
    fn rejects_bad_tiles() {
        assert!("8z".parse::<Tile>().is_err());
        assert!("0m".parse::<Tile>().is_err());
        assert!("5x".parse::<Tile>().is_err());
        assert!("55m".parse::<Tile>().is_err());
        assert!("".parse::<Tile>().is_err());
        assert_eq!(
            Tile::new(10, Suit::Sou),
            Err(TileError::Rank {
                rank: 10,
                suit: Suit::Sou
            })
        );
    }

    #[test]
    fn bonus_flag_is_cosmetic_for_equality() {
        assert_eq!(t("5m"), t("5mr"));
        assert_ne!(t("5m"), t("5p"));
    }

    #[test]
    fn canonical_order_is_suit_then_rank_then_bonus() {
        let mut hand = vec![t("1z"), t("5mr"), t("9s"), t("5m"), t("1p"), t("2m")];
        sort_hand(&mut hand);
        let text: Vec<String> = hand.iter().map(|x| x.to_string()).collect();
        assert_eq!(text, ["2m", "5m", "5mr", "1p", "9s", "1z"]);
        assert!(is_sorted(&hand));
    }

    #[test]
    fn sorting_is_idempotent() {
        let mut hand = vec![t("3s"), t("3m"), t("7z"), t("3p")];
        sort_hand(&mut hand);
        let once: Vec<_> = hand.iter().map(Tile::sort_key).collect();
        sort_hand(&mut hand);
        let twice: Vec<_> = hand.iter().map(Tile::sort_key).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn serializes_as_text() {
        let json = serde_json::to_string(&vec![t("1m"), t("5sr")]).unwrap();
        assert_eq!(json, r#"["1m","5sr"]"#);
        let back: Vec<Tile> = serde_json::from_str(&json).unwrap();
        assert!(back[1].is_bonus());
        assert!(serde_json::from_str::<Tile>(r#""9z""#).is_err());
    }
}
