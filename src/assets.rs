//! Tile art lookup.
//!
//! Art files are named `{size}{suit}{face}.png`: size `0` for the hand, `1`
//! for the table; suit `m`/`p`/`s`, or `j` for honors. Bonus tiles swap the
//! face digit for a letter where red art exists (3→c, 5→e, 1s→a, 7s→g).
//!
//! The page registers the PNG bytes once via `register_tile_image`; lookups
//! return `data:` URIs so fragments are self-contained. A missing image
//! resolves to an empty string and the board shows a text label instead.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::game::tile::{Suit, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSize {
    /// Large art for the player's hand.
    Hand,
    /// Small art for rivers and the indicator.
    Table,
}

impl TileSize {
    fn prefix(self) -> char {
        match self {
            TileSize::Hand => '0',
            TileSize::Table => '1',
        }
    }
}

thread_local! {
    static IMAGES: RefCell<HashMap<String, Vec<u8>>> = RefCell::new(HashMap::new());
}

/// Face character for bonus art, if this tile has any.
fn bonus_face(tile: &Tile) -> Option<char> {
    match (tile.suit(), tile.rank()) {
        (Suit::Man | Suit::Pin, 3) => Some('c'),
        (Suit::Man | Suit::Pin, 5) => Some('e'),
        (Suit::Sou, 1) => Some('a'),
        (Suit::Sou, 3) => Some('c'),
        (Suit::Sou, 5) => Some('e'),
        (Suit::Sou, 7) => Some('g'),
        _ => None,
    }
}

/// Art file name for a tile at a size.
pub fn asset_name(tile: &Tile, size: TileSize) -> String {
    let suit = match tile.suit() {
        Suit::Man => 'm',
        Suit::Pin => 'p',
        Suit::Sou => 's',
        Suit::Honor => 'j',
    };
    let digit = char::from(b'0' + tile.rank());
    let face = if tile.is_bonus() {
        bonus_face(tile).unwrap_or(digit)
    } else {
        digit
    };
    format!("{}{}{}.png", size.prefix(), suit, face)
}

pub fn register_image(name: &str, bytes: &[u8]) {
    IMAGES.with(|images| {
        images.borrow_mut().insert(name.to_string(), bytes.to_vec());
    });
}

pub fn clear_images() {
    IMAGES.with(|images| images.borrow_mut().clear());
}

pub fn registered_count() -> usize {
    IMAGES.with(|images| images.borrow().len())
}

/// `src` for a tile image, or `""` when no art is available.
///
/// With `asset_base` set, links to `<asset_base>/<file>` instead of
/// embedding registered bytes.
pub fn image_src(tile: &Tile, size: TileSize, asset_base: Option<&str>) -> String {
    let name = asset_name(tile, size);
    if let Some(base) = asset_base {
        return format!("{}/{}", base.trim_end_matches('/'), name);
    }
    IMAGES.with(|images| {
        images
            .borrow()
            .get(&name)
            .map(|bytes| format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
            .unwrap_or_default()
    })
}
