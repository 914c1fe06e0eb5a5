use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::model::Record;

pub static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| sel("details.row"));
static TEAM_SEL: LazyLock<Selector> = LazyLock::new(|| sel("div.team-name"));
static MANAGER_SEL: LazyLock<Selector> = LazyLock::new(|| sel("div.manager"));
static KPI_SEL: LazyLock<Selector> = LazyLock::new(|| sel("span.kpi"));
static CAPTAIN_SEL: LazyLock<Selector> = LazyLock::new(|| sel("div.captain"));

const ATTR_PLAYED_REM: &str = "data-played_rem";
const ATTR_GAMEWEEK: &str = "data-gw";
const ATTR_TOTAL: &str = "data-total";
const RANK_MARKER: &str = "OR";

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

/// Fault that discards a whole row. Absent sub-elements and attributes are
/// not faults; they take their defaults. Every lookup on the parsed tree is
/// currently infallible, so no variant exists yet.
#[derive(Debug, thiserror::Error)]
pub enum RowError {}

/// Derive all six fields of a row, or fail the whole row.
pub fn derive_record(row: ElementRef<'_>) -> Result<Record, RowError> {
    let team = find_text(row, &TEAM_SEL);
    let manager = find_text(row, &MANAGER_SEL);
    let badge = find_text(row, &KPI_SEL);
    let captain = find_text(row, &CAPTAIN_SEL);

    Ok(Record {
        name: compose_name(team.as_deref(), manager.as_deref()),
        overall_ranking: badge.as_deref().map(overall_ranking).unwrap_or_default(),
        yet_to_play: attr_or(row, ATTR_PLAYED_REM, "0"),
        captain: captain.unwrap_or_default(),
        gameweek_points: attr_or(row, ATTR_GAMEWEEK, "0"),
        total_points: attr_or(row, ATTR_TOTAL, "0"),
    })
}

/// Trimmed text of the first descendant matching `selector`, including
/// descendants of rows nested inside this one.
fn find_text(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    row.select(selector).next().map(text_of)
}

fn text_of(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    raw.trim().to_string()
}

fn compose_name(team: Option<&str>, manager: Option<&str>) -> String {
    let team = team.unwrap_or("");
    let manager = manager.unwrap_or("");
    match (team.is_empty(), manager.is_empty()) {
        (false, false) => format!("{}({})", team, manager),
        (false, true) => team.to_string(),
        _ => manager.to_string(),
    }
}

/// Badge text like "OR 12,345". Badges without the marker (e.g. "GR 7") are
/// other rankings and yield "".
fn overall_ranking(badge: &str) -> String {
    if badge.contains(RANK_MARKER) {
        badge.replace(RANK_MARKER, "").trim().to_string()
    } else {
        String::new()
    }
}

fn attr_or(row: ElementRef<'_>, name: &str, default: &str) -> String {
    row.value().attr(name).unwrap_or(default).to_string()
}

// ── Tests ──
