//! Shareable text for an open match

use crate::types::{Match, Season, MATCH_CAPACITY};
use crate::utils::format_display_date;

const SLOT_MARKERS: [&str; MATCH_CAPACITY] = ["1️⃣", "2️⃣", "3️⃣", "4️⃣"];
const EMPTY_SLOT: &str = "___________";

/// Message listing the match details and its four slots.
///
/// Signed-up ids that no longer resolve to a player are skipped, so the
/// remaining names move up and the freed slots show as open.
pub fn announcement(m: &Match, season: &Season, signup_url: Option<&str>) -> String {
    let names: Vec<&str> = m
        .signed_up
        .iter()
        .filter_map(|id| season.player(id))
        .map(|p| p.name.as_str())
        .collect();

    let slots: Vec<String> = SLOT_MARKERS
        .iter()
        .enumerate()
        .map(|(i, marker)| format!("{} {}", marker, names.get(i).copied().unwrap_or(EMPTY_SLOT)))
        .collect();

    let mut text = format!(
        "🎾 *PARTIDO DE PÁDEL* 🎾\n\n📅 *Fecha:* {}\n⏰ *Hora:* {}\n📍 *Lugar:* {}\n\n👥 *Jugadores:*\n{}",
        format_display_date(&m.date),
        m.time,
        m.location,
        slots.join("\n")
    );
    if let Some(url) = signup_url {
        text.push_str(&format!("\n\nApúntate aquí 👇\n{}", url));
    }
    text
}
