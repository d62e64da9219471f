//! Board rendering: the HTML fragment swapped into `#table` after every
//! request.
//!
//! The fragment carries its own pacing: while an automatic step is due it
//! includes a hidden element that posts `/api/table/step` after the
//! configured delay, so the page keeps playing without any JS of its own.

use crate::assets::{self, TileSize};
use crate::game::seat::Seat;
use crate::game::state::Session;
use crate::game::tile::Tile;
use crate::game::turns::{self, Phase};

/// Tailwind classes (label text, river border) per seat.
fn seat_classes(seat: Seat) -> (&'static str, &'static str) {
    match seat {
        Seat::East => ("text-kip-red", "border-kip-red"),
        Seat::South => ("text-emerald-400", "border-emerald-400"),
        Seat::West => ("text-blue-400", "border-blue-400"),
        Seat::North => ("text-yellow-400", "border-yellow-400"),
    }
}

fn tile_html(tile: &Tile, size: TileSize, asset_base: Option<&str>, style: &str) -> String {
    let src = assets::image_src(tile, size, asset_base);
    if src.is_empty() {
        format!(
            r#"<span class="inline-block px-1 rounded bg-amber-50 text-kip-drk-sienna font-mono text-xs" style="{}">{}</span>"#,
            style, tile
        )
    } else {
        format!(r#"<img src="{}" alt="{}" style="{}">"#, src, tile, style)
    }
}

fn htmx_post(path: &str) -> String {
    format!(
        r##"hx-post="{}" hx-target="#table" hx-swap="innerHTML""##,
        path
    )
}

/// Render the whole board for the session.
pub fn render_board(session: &Session) -> String {
    let table = &session.table;
    let config = &session.config;
    let base = config.asset_base.as_deref();
    let human = config.human_seat;
    let phase = turns::phase(table);
    let mut html = String::with_capacity(8192);

    // Controls
    html.push_str(r#"<div class="flex gap-4 items-center mb-3">"#);
    html.push_str(&format!(
        r#"<label class="text-sm cursor-pointer"><input type="checkbox" id="autoPlay" {}{}> Fast auto-play</label>"#,
        htmx_post("/api/table/autoplay"),
        if config.auto_play { " checked" } else { "" }
    ));
    html.push_str(&format!(
        r#"<button class="bg-kip-red hover:bg-kip-drk-sienna text-amber-50 font-bold py-1 px-3 rounded text-sm" {}>&#x1F504; Reset</button>"#,
        htmx_post("/api/table/reset")
    ));
    html.push_str(r#"</div>"#);

    // Wall count + indicator
    html.push_str(&format!(
        r#"<h3 class="text-lg font-bold">Board (wall: <span id="wall-count">{}</span>)</h3>"#,
        table.wall_len()
    ));
    html.push_str(r#"<figure class="mb-3">"#);
    html.push_str(&tile_html(
        &table.indicator(),
        TileSize::Table,
        base,
        "height:40px;",
    ));
    html.push_str(r#"<figcaption class="text-xs">Indicator</figcaption></figure>"#);

    // Rivers, fixed height so the layout doesn't jump as they grow
    html.push_str(r#"<div class="grid grid-cols-4 gap-2">"#);
    for seat in human.rotation() {
        let (label_class, border_class) = seat_classes(seat);
        let active = if table.turn() == seat && phase != Phase::Exhausted {
            " &#x25C0;"
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<div><p class="text-sm font-bold {}">{}{}</p>"#,
            label_class,
            seat.label(human),
            active
        ));
        html.push_str(&format!(
            r#"<div class="river border-2 {}" data-seat="{}" style="background:#1e272e; padding:5px; border-radius:5px; height:160px; overflow-y:auto;">"#,
            border_class, seat
        ));
        for tile in table.river(seat) {
            html.push_str(&tile_html(tile, TileSize::Table, base, "height:35px; margin:1px;"));
        }
        html.push_str(r#"</div></div>"#);
    }
    html.push_str(r#"</div>"#);

    html.push_str(r#"<hr class="my-3">"#);

    if phase == Phase::Exhausted {
        html.push_str(
            r#"<div class="p-2 rounded bg-amber-100 text-amber-800 text-sm mb-2">Exhaustive draw: the wall is empty. Reset to deal again.</div>"#,
        );
    }

    // Human hand. Clickable only while the human owes a discard.
    let can_pick = phase == Phase::AwaitingDiscard(human) && !config.auto_play;
    let hand = table.hand(human);
    let drawn_index = (table.turn() == human && table.has_drawn())
        .then(|| turns::tsumogiri_index(hand));
    html.push_str(r#"<h3 class="text-lg font-bold">Your hand</h3>"#);
    html.push_str(&format!(
        r#"<div id="hand" data-view="{}-{}" style="display:flex; gap:2px; justify-content:center; padding:10px; flex-wrap:nowrap; min-height:40px;">"#,
        table.draws(),
        table.discards()
    ));
    for (i, tile) in hand.iter().enumerate() {
        let gap = if Some(i) == drawn_index { " margin-left:12px;" } else { "" };
        let img = tile_html(tile, TileSize::Hand, base, "height:60px; border-radius:3px;");
        if can_pick {
            html.push_str(&format!(
                r#"<button class="tile cursor-pointer" style="{}" {} hx-vals='{{"index":"{}"}}' aria-label="Discard {}">{}</button>"#,
                gap.trim(),
                htmx_post("/api/table/discard"),
                i,
                tile,
                img
            ));
        } else {
            html.push_str(&format!(
                r#"<span class="tile" style="{}">{}</span>"#,
                gap.trim(),
                img
            ));
        }
    }
    html.push_str(r#"</div>"#);

    if let Some(delay) = turns::pacing(table, config) {
        html.push_str(&format!(
            r#"<div class="hidden" {} hx-trigger="load delay:{}ms"></div>"#,
            htmx_post("/api/table/step"),
            delay
        ));
    }

    html
}
