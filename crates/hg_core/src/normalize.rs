//! League normalizer: the untyped export document to the canonical model.
//!
//! Exports come in several loose historical schemas (aliased field names,
//! optional sections, floats where integers are expected). Everything
//! downstream operates only on the closed `League` model produced here;
//! no other component ever branches on raw-document shape.

use crate::error::{ImportError, Result};
use crate::models::{Award, CareerTotals, DraftFacts, League, Player, SeasonLine, Team};
use serde_json::{json, Value};
use std::collections::BTreeSet;

const TEAM_ID_ALIASES: &[&str] = &["tid", "teamId", "id"];

/// Normalize a parsed export document into a `League`.
///
/// Accepts either an object with a `players` array (and optionally a
/// `teams` array) or a bare top-level array of player-like objects.
/// Anything else is a `Schema` error. Output depends only on document
/// content; source array order is preserved for teams and players.
pub fn normalize(doc: &Value) -> Result<League> {
    let (teams_raw, players_raw) = league_arrays(doc)?;

    let teams: Vec<Team> = teams_raw
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_team(index, raw))
        .collect();

    let mut players = Vec::with_capacity(players_raw.len());
    for (index, raw) in players_raw.iter().enumerate() {
        players.push(normalize_player(index, raw));
    }

    let season_range = players
        .iter()
        .flat_map(|player| player.seasons.iter().map(|line| line.season))
        .fold(None, |range: Option<(i32, i32)>, season| match range {
            None => Some((season, season)),
            Some((lo, hi)) => Some((lo.min(season), hi.max(season))),
        });

    log::info!(
        "normalized league: {} teams, {} players, seasons {:?}",
        teams.len(),
        players.len(),
        season_range
    );

    Ok(League { teams, players, season_range })
}

fn league_arrays(doc: &Value) -> Result<(&[Value], &[Value])> {
    match doc {
        Value::Object(obj) => match obj.get("players").and_then(Value::as_array) {
            Some(players) => {
                let teams = obj.get("teams").and_then(Value::as_array).map_or(&[][..], |t| &t[..]);
                Ok((teams, players.as_slice()))
            }
            None => Err(ImportError::Schema("document has no `players` array".into())),
        },
        Value::Array(items) if items.iter().all(looks_like_player) => Ok((&[], items.as_slice())),
        _ => Err(ImportError::Schema(
            "document is neither a league object nor an array of players".into(),
        )),
    }
}

fn looks_like_player(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| {
        obj.contains_key("name")
            || obj.contains_key("firstName")
            || obj.contains_key("stats")
            || obj.contains_key("careerStats")
    })
}

fn normalize_team(index: usize, raw: &Value) -> Team {
    let id = field_u32(raw, TEAM_ID_ALIASES).unwrap_or(index as u32);
    let region = field_str(raw, &["region", "city"]);
    let name = field_str(raw, &["name"]);
    let display_name = match (region, name) {
        (Some(region), Some(name)) => format!("{} {}", region, name),
        (Some(region), None) => region.to_owned(),
        (None, Some(name)) => name.to_owned(),
        (None, None) => format!("Team {}", id),
    };
    let abbreviation = field_str(raw, &["abbrev", "abbreviation"])
        .map_or_else(|| format!("T{}", id), str::to_owned);
    Team { id, display_name, abbreviation }
}

fn normalize_player(index: usize, raw: &Value) -> Player {
    let id = field_u32(raw, &["pid", "playerId", "id"]).unwrap_or(index as u32);
    let name = player_name(raw);
    let birth_year = raw
        .get("born")
        .and_then(|born| field_i32(born, &["year"]))
        .or_else(|| field_i32(raw, &["bornYear", "birthYear"]));

    let mut seasons = season_lines(raw);
    // Stable, so same-season lines keep source order
    seasons.sort_by_key(|line| line.season);

    let awards = award_list(raw);
    let hall_of_fame = raw.get("hof").and_then(Value::as_bool).unwrap_or(false)
        || awards.iter().any(|a| a.kind.to_ascii_lowercase().contains("hall of fame"));

    // Membership: explicit team history unioned with teams the player
    // actually played regular-season games for.
    let mut teams_played_for = explicit_team_history(raw);
    teams_played_for.extend(
        seasons
            .iter()
            .filter(|line| !line.playoffs && line.games_played > 0)
            .filter_map(|line| line.team_id),
    );

    Player {
        id,
        name,
        birth_year,
        career: CareerTotals::from_seasons(&seasons),
        seasons,
        awards,
        teams_played_for,
        draft: draft_facts(raw),
        hall_of_fame,
    }
}

/// Explicit full name, else first + last, else the fallback.
fn player_name(raw: &Value) -> String {
    if let Some(name) = field_str(raw, &["name", "displayName"]) {
        return name.to_owned();
    }
    let first = field_str(raw, &["firstName", "first"]);
    let last = field_str(raw, &["lastName", "last"]);
    match (first, last) {
        (Some(first), Some(last)) => format!("{} {}", first, last),
        (Some(part), None) | (None, Some(part)) => part.to_owned(),
        (None, None) => "Unknown Player".to_owned(),
    }
}

fn season_lines(raw: &Value) -> Vec<SeasonLine> {
    let stats = field(raw, &["stats", "careerStats"]).and_then(Value::as_array);
    let Some(stats) = stats else {
        return Vec::new();
    };
    stats.iter().filter_map(season_line).collect()
}

/// A line without a usable season number is dropped entirely; a line
/// without a resolvable team id is kept (it still feeds career totals).
fn season_line(raw: &Value) -> Option<SeasonLine> {
    let season = field_i32(raw, &["season", "year"])?;
    let team_id = field_u32(raw, TEAM_ID_ALIASES);
    Some(SeasonLine {
        season,
        team_id,
        games_played: stat_u32(raw, &["gp", "gamesPlayed"]),
        pts: stat_u32(raw, &["pts", "points"]),
        ast: stat_u32(raw, &["ast", "assists"]),
        stl: stat_u32(raw, &["stl", "steals"]),
        blk: stat_u32(raw, &["blk", "blocks"]),
        threes_made: stat_u32(raw, &["tp", "tpm", "threesMade"]),
        total_rebounds: rebounds(raw),
        fga: stat_u32(raw, &["fga", "fieldGoalsAttempted"]),
        fta: stat_u32(raw, &["fta", "freeThrowsAttempted"]),
        tpa: stat_u32(raw, &["tpa", "threesAttempted"]),
        win_shares: opt_f64(raw, &["ws", "winShares"]),
        ows: opt_f64(raw, &["ows", "offensiveWinShares"]),
        dws: opt_f64(raw, &["dws", "defensiveWinShares"]),
        playoffs: raw.get("playoffs").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn rebounds(raw: &Value) -> u32 {
    if field(raw, &["trb", "reb", "totalRebounds"]).is_some() {
        stat_u32(raw, &["trb", "reb", "totalRebounds"])
    } else {
        stat_u32(raw, &["orb"]) + stat_u32(raw, &["drb"])
    }
}

fn award_list(raw: &Value) -> Vec<Award> {
    let Some(awards) = raw.get("awards").and_then(Value::as_array) else {
        return Vec::new();
    };
    awards
        .iter()
        .filter_map(|entry| {
            let kind = field_str(entry, &["type", "kind", "name"])?;
            Some(Award {
                season: field_i32(entry, &["season", "year"]).unwrap_or(0),
                kind: kind.to_owned(),
            })
        })
        .collect()
}

fn explicit_team_history(raw: &Value) -> BTreeSet<u32> {
    let mut out = BTreeSet::new();
    if let Some(tids) = raw.get("statsTids").and_then(Value::as_array) {
        out.extend(tids.iter().filter_map(|v| value_u32(v)));
    }
    if let Some(history) = raw.get("teamHistory").and_then(Value::as_array) {
        for entry in history {
            if let Some(tid) = value_u32(entry).or_else(|| field_u32(entry, TEAM_ID_ALIASES)) {
                out.insert(tid);
            }
        }
    }
    out
}

/// Non-positive pick/round numbers mean "no pick": several exports write
/// `pick: 0` for undrafted players.
fn draft_facts(raw: &Value) -> DraftFacts {
    let Some(draft) = raw.get("draft").filter(|v| v.is_object()) else {
        return DraftFacts::default();
    };
    DraftFacts {
        year: field_i32(draft, &["year", "season"]),
        round: field_u32(draft, &["round"]).filter(|&r| r > 0),
        pick: field_u32(draft, &["pick", "overall"]).filter(|&p| p > 0),
    }
}

// Field access helpers: first non-null alias wins, numbers tolerate floats.

fn field<'a>(raw: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names.iter().filter_map(|name| raw.get(name)).find(|v| !v.is_null())
}

fn field_str<'a>(raw: &'a Value, names: &[&str]) -> Option<&'a str> {
    field(raw, names).and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())
}

fn value_i64(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)
    })
}

fn value_u32(value: &Value) -> Option<u32> {
    value_i64(value).and_then(|n| u32::try_from(n).ok())
}

fn field_i32(raw: &Value, names: &[&str]) -> Option<i32> {
    field(raw, names).and_then(value_i64).and_then(|n| i32::try_from(n).ok())
}

fn field_u32(raw: &Value, names: &[&str]) -> Option<u32> {
    field(raw, names).and_then(value_u32)
}

fn opt_f64(raw: &Value, names: &[&str]) -> Option<f64> {
    field(raw, names).and_then(Value::as_f64)
}

fn stat_u32(raw: &Value, names: &[&str]) -> u32 {
    field(raw, names)
        .and_then(Value::as_f64)
        .filter(|f| f.is_finite() && *f > 0.0)
        .map_or(0, |f| f.round() as u32)
}

/// Re-encode a canonical `League` into the loose document shape accepted
/// by [`normalize`]. Normalizing the result yields an equivalent League;
/// this is also the documented output shape toward persistence.
pub fn export_document(league: &League) -> Value {
    json!({
        "teams": league.teams.iter().map(team_doc).collect::<Vec<_>>(),
        "players": league.players.iter().map(player_doc).collect::<Vec<_>>(),
    })
}

fn team_doc(team: &Team) -> Value {
    json!({
        "tid": team.id,
        "name": team.display_name,
        "abbrev": team.abbreviation,
    })
}

fn player_doc(player: &Player) -> Value {
    let mut doc = json!({
        "pid": player.id,
        "name": player.name,
        "hof": player.hall_of_fame,
        "statsTids": player.teams_played_for.iter().collect::<Vec<_>>(),
        "awards": player.awards.iter()
            .map(|award| json!({ "season": award.season, "type": award.kind }))
            .collect::<Vec<_>>(),
        "stats": player.seasons.iter().map(line_doc).collect::<Vec<_>>(),
        "draft": {
            "year": player.draft.year,
            "round": player.draft.round,
            "pick": player.draft.pick,
        },
    });
    if let Some(year) = player.birth_year {
        doc["born"] = json!({ "year": year });
    }
    doc
}

fn line_doc(line: &SeasonLine) -> Value {
    json!({
        "season": line.season,
        "tid": line.team_id,
        "gp": line.games_played,
        "pts": line.pts,
        "ast": line.ast,
        "stl": line.stl,
        "blk": line.blk,
        "tp": line.threes_made,
        "trb": line.total_rebounds,
        "fga": line.fga,
        "fta": line.fta,
        "tpa": line.tpa,
        "ws": line.win_shares,
        "ows": line.ows,
        "dws": line.dws,
        "playoffs": line.playoffs,
    })
}
