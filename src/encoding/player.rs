//! Player feature encoding
//!
//! One player record becomes a fixed-width, section-structured vector. The
//! layout is position-stable: a consumer can slice any section out of a
//! stored vector by offset alone.
//!
//! ### Layout
//!
//! - **RosterInfo** (9): identity code, position code, roster tier, draft
//!   team/year/pick, roster season, current-team code, age
//! - **Combine** (13): year, position code, height, weight, forty, bench,
//!   broad jump, shuttle, three-cone, vertical, 3 reserved
//! - **CollegeCareer** (64): tenure, passing, rushing, receiving, defense,
//!   kicking, team splits, opponent splits
//! - **NFLCareer** (116): basic, passing, rushing, receiving, defense,
//!   kicking, team performance, zero-filled tail
//! - **LastSeason** / **WorstSeason** / **BestSeason** (117 each): team
//!   code, games played/started, per-season detail placeholder
//! - **AverageSeason** (116): same, team code omitted
//!
//! The sections sum to 669; the final slot of the 670-wide vector is a
//! reserved pad that always stays zero, kept so previously stored vectors
//! retain their layout.

use log::warn;
use serde_json::{Map, Value};

use crate::encoding::coerce::{
    categorical_code, coerce_float, coerce_text, value_kind, IDENTITY_MODULUS, TEAM_MODULUS,
};
use crate::{GridironError, Position, Result};

type JsonMap = Map<String, Value>;

pub const ROSTER_INFO_DIM: usize = 9;
pub const COMBINE_DIM: usize = 13;
pub const COLLEGE_DIM: usize = 64;
pub const NFL_CAREER_DIM: usize = 116;
pub const SEASON_DIM: usize = 117;
pub const AVERAGE_SEASON_DIM: usize = 116;

/// Total player vector width
pub const PLAYER_DIM: usize = 670;

/// Encode a player record into a 670-wide feature vector
///
/// Never fails: a structurally broken record degrades to an all-zero vector
/// of the declared width, logged as a non-fatal anomaly. Missing or
/// unconvertible scalar fields are silently defaulted either way.
pub fn encode_player(record: &Value) -> Vec<f32> {
    match try_encode_player(record) {
        Ok(tensor) => tensor,
        Err(e) => {
            warn!("Player encoding degraded to zeros: {}", e);
            vec![0.0; PLAYER_DIM]
        }
    }
}

/// Encode a player record, surfacing structural failures to the caller
///
/// Returns an error only when the record itself (or one of its nested stat
/// mappings) is not a JSON object. Missing fields are not errors.
pub fn try_encode_player(record: &Value) -> Result<Vec<f32>> {
    let player = match record {
        Value::Object(map) => map,
        other => {
            return Err(GridironError::MalformedRecord {
                what: "player record",
                found: value_kind(other),
            })
        }
    };

    let mut tensor = vec![0.0f32; PLAYER_DIM];
    let mut idx = 0;

    fill(&mut tensor, &mut idx, &roster_info_section(player));
    fill(
        &mut tensor,
        &mut idx,
        &combine_section(sub_object(Some(player), "combine")?),
    );
    fill(
        &mut tensor,
        &mut idx,
        &college_section(sub_object(Some(player), "college")?)?,
    );
    fill(
        &mut tensor,
        &mut idx,
        &nfl_career_section(sub_object(Some(player), "nfl_career")?)?,
    );

    let seasonal = sub_object(Some(player), "seasonal")?;
    fill(
        &mut tensor,
        &mut idx,
        &season_section(sub_object(seasonal, "last")?, true),
    );
    fill(
        &mut tensor,
        &mut idx,
        &season_section(sub_object(seasonal, "worst")?, true),
    );
    fill(
        &mut tensor,
        &mut idx,
        &season_section(sub_object(seasonal, "best")?, true),
    );
    fill(
        &mut tensor,
        &mut idx,
        &season_section(sub_object(seasonal, "average")?, false),
    );

    // Slot 669 is the reserved trailing pad; it must never be written.
    debug_assert_eq!(idx, PLAYER_DIM - 1);

    Ok(tensor)
}

/// RosterInfo section (9 features)
fn roster_info_section(player: &JsonMap) -> [f32; ROSTER_INFO_DIM] {
    let mut out = [0.0f32; ROSTER_INFO_DIM];

    let identity = coerce_text(player.get("identity"), "unknown");
    out[0] = categorical_code(&identity, IDENTITY_MODULUS) as f32;
    out[1] = position_code(player.get("position"));
    out[2] = coerce_float(player.get("roster_tier"), 1.0);

    // A draft_info that is not an object just leaves the draft fields zero
    if let Some(draft) = player.get("draft_info").and_then(Value::as_object) {
        out[3] = team_code(draft.get("team"));
        out[4] = coerce_float(draft.get("year"), 0.0);
        out[5] = coerce_float(draft.get("pick"), 0.0);
    }

    out[6] = coerce_float(player.get("roster_season"), 2024.0);
    out[7] = team_code(player.get("current_team"));
    out[8] = coerce_float(player.get("age"), 25.0);

    out
}

/// Combine section (13 features, 3 reserved)
fn combine_section(stats: Option<&JsonMap>) -> [f32; COMBINE_DIM] {
    let mut out = [0.0f32; COMBINE_DIM];

    out[0] = stat(stats, "year");
    out[1] = position_code(stats.and_then(|m| m.get("position")));
    out[2] = stat(stats, "height");
    out[3] = stat(stats, "weight");
    out[4] = stat(stats, "forty");
    out[5] = stat(stats, "bench");
    out[6] = stat(stats, "broad_jump");
    out[7] = stat(stats, "shuttle");
    out[8] = stat(stats, "three_cone");
    out[9] = stat(stats, "vertical");

    out
}

/// Per-team split keys shared by the college `team` and `opp` blocks
const TEAM_SPLIT_KEYS: [&str; 15] = [
    "pass_completions",
    "pass_attempts",
    "pass_yards",
    "pass_td",
    "rush_attempts",
    "rush_yards",
    "rush_td",
    "total_plays",
    "pass_1d",
    "rush_1d",
    "pen_1d",
    "penalties",
    "pen_yards",
    "fumbles",
    "interceptions",
];

/// CollegeCareer section (64 features)
fn college_section(stats: Option<&JsonMap>) -> Result<[f32; COLLEGE_DIM]> {
    let mut out = [0.0f32; COLLEGE_DIM];
    let mut idx = 0;

    // Tenure (5)
    fill(
        &mut out,
        &mut idx,
        &[
            stat(stats, "seasons"),
            stat(stats, "first_season_school"),
            stat(stats, "last_season_school"),
            stat(stats, "first_school_seasons"),
            stat(stats, "last_school_seasons"),
        ],
    );

    // Passing (5)
    let passing = sub_object(stats, "passing")?;
    fill(
        &mut out,
        &mut idx,
        &[
            stat(passing, "completions"),
            stat(passing, "attempts"),
            stat(passing, "yards"),
            stat(passing, "touchdowns"),
            stat(passing, "interceptions"),
        ],
    );

    // Rushing (3)
    let rushing = sub_object(stats, "rushing")?;
    fill(
        &mut out,
        &mut idx,
        &[
            stat(rushing, "attempts"),
            stat(rushing, "yards"),
            stat(rushing, "touchdowns"),
        ],
    );

    // Receiving (3)
    let receiving = sub_object(stats, "receiving")?;
    fill(
        &mut out,
        &mut idx,
        &[
            stat(receiving, "receptions"),
            stat(receiving, "yards"),
            stat(receiving, "touchdowns"),
        ],
    );

    // Defense (11)
    let defense = sub_object(stats, "defense")?;
    fill(
        &mut out,
        &mut idx,
        &[
            stat(defense, "tackles"),
            stat(defense, "sacks"),
            stat(defense, "interceptions"),
            stat(defense, "int_yards"),
            stat(defense, "int_td"),
            stat(defense, "pd"),
            stat(defense, "fr"),
            stat(defense, "fr_yards"),
            stat(defense, "ff"),
            stat(defense, "tfl"),
            stat(defense, "qb_hits"),
        ],
    );

    // Kicking (6)
    let kicking = sub_object(stats, "kicking")?;
    fill(
        &mut out,
        &mut idx,
        &[
            stat(kicking, "fgm"),
            stat(kicking, "fga"),
            stat(kicking, "xpm"),
            stat(kicking, "xpa"),
            stat(kicking, "punts"),
            stat(kicking, "punt_yards"),
        ],
    );

    // Team splits (15)
    let team = sub_object(stats, "team")?;
    for key in TEAM_SPLIT_KEYS {
        out[idx] = stat(team, key);
        idx += 1;
    }

    // Opponent splits (15)
    let opp = sub_object(stats, "opp")?;
    for key in TEAM_SPLIT_KEYS {
        out[idx] = stat(opp, key);
        idx += 1;
    }

    Ok(out)
}

/// Team performance keys for the NFL career block
const TEAM_PERFORMANCE_KEYS: [&str; 30] = [
    "off_points",
    "off_yards",
    "off_plays",
    "off_turnovers",
    "off_fumbles",
    "off_1d",
    "pass_cmp",
    "pass_att",
    "pass_yds",
    "pass_td",
    "rush_att",
    "rush_yds",
    "rush_td",
    "penalties",
    "pen_yards",
    "def_points",
    "def_yards",
    "def_plays",
    "def_turnovers",
    "def_fumbles",
    "def_1d",
    "def_pass_cmp",
    "def_pass_att",
    "def_pass_yds",
    "def_pass_td",
    "def_rush_att",
    "def_rush_yds",
    "def_rush_td",
    "opp_penalties",
    "opp_pen_yards",
];

/// NFLCareer section (116 features, tail zero-filled)
fn nfl_career_section(stats: Option<&JsonMap>) -> Result<[f32; NFL_CAREER_DIM]> {
    let mut out = [0.0f32; NFL_CAREER_DIM];
    let mut idx = 0;

    // Basic (3)
    fill(
        &mut out,
        &mut idx,
        &[
            stat(stats, "seasons_played"),
            stat(stats, "games_played"),
            stat(stats, "games_started"),
        ],
    );

    // Passing (11)
    let passing = sub_object(stats, "passing")?;
    fill(
        &mut out,
        &mut idx,
        &[
            stat(passing, "record"),
            stat(passing, "completions"),
            stat(passing, "attempts"),
            stat(passing, "yards"),
            stat(passing, "touchdowns"),
            stat(passing, "interceptions"),
            stat(passing, "first_downs"),
            stat(passing, "longest"),
            stat(passing, "sacked"),
            stat(passing, "4qc"),
            stat(passing, "gwd"),
        ],
    );

    // Rushing (5)
    let rushing = sub_object(stats, "rushing")?;
    fill(
        &mut out,
        &mut idx,
        &[
            stat(rushing, "attempts"),
            stat(rushing, "yards"),
            stat(rushing, "touchdowns"),
            stat(rushing, "first_downs"),
            stat(rushing, "longest"),
        ],
    );

    // Receiving (6)
    let receiving = sub_object(stats, "receiving")?;
    fill(
        &mut out,
        &mut idx,
        &[
            stat(receiving, "targets"),
            stat(receiving, "receptions"),
            stat(receiving, "yards"),
            stat(receiving, "touchdowns"),
            stat(receiving, "first_downs"),
            stat(receiving, "longest"),
        ],
    );

    // Defense (15)
    let defense = sub_object(stats, "defense")?;
    fill(
        &mut out,
        &mut idx,
        &[
            stat(defense, "interceptions"),
            stat(defense, "int_yards"),
            stat(defense, "int_td"),
            stat(defense, "int_longest"),
            stat(defense, "pd"),
            stat(defense, "ff"),
            stat(defense, "fumbles"),
            stat(defense, "fr"),
            stat(defense, "fr_yards"),
            stat(defense, "fr_td"),
            stat(defense, "sacks"),
            stat(defense, "solo_tackles"),
            stat(defense, "assisted_tackles"),
            stat(defense, "tfl"),
            stat(defense, "qb_hits"),
        ],
    );

    // Kicking (15): field goals by distance bucket, then extra points and punts
    let kicking = sub_object(stats, "kicking")?;
    fill(
        &mut out,
        &mut idx,
        &[
            stat(kicking, "fga_0_19"),
            stat(kicking, "fgm_0_19"),
            stat(kicking, "fga_20_29"),
            stat(kicking, "fgm_20_29"),
            stat(kicking, "fga_30_39"),
            stat(kicking, "fgm_30_39"),
            stat(kicking, "fga_40_49"),
            stat(kicking, "fgm_40_49"),
            stat(kicking, "fga_50_plus"),
            stat(kicking, "fgm_50_plus"),
            stat(kicking, "longest"),
            stat(kicking, "xpa"),
            stat(kicking, "xpm"),
            stat(kicking, "punts"),
            stat(kicking, "punt_yards"),
        ],
    );

    // Team performance (30)
    let team_perf = sub_object(stats, "team_performance")?;
    for key in TEAM_PERFORMANCE_KEYS {
        out[idx] = stat(team_perf, key);
        idx += 1;
    }

    Ok(out)
}

/// Seasonal section (117 features, or 116 with the team code omitted)
fn season_section(stats: Option<&JsonMap>, include_team: bool) -> Vec<f32> {
    let size = if include_team {
        SEASON_DIM
    } else {
        AVERAGE_SEASON_DIM
    };
    let mut out = vec![0.0f32; size];
    let mut idx = 0;

    if include_team {
        out[0] = team_code(stats.and_then(|m| m.get("team")));
        idx += 1;
    }

    out[idx] = stat(stats, "games_played");
    out[idx + 1] = stat(stats, "games_started");

    // Per-season stat detail beyond games played/started is not yet
    // populated by the ingestion layer; those slots stay zero.

    out
}

/// Copy `values` into `out` at the cursor and advance it
fn fill(out: &mut [f32], idx: &mut usize, values: &[f32]) {
    out[*idx..*idx + values.len()].copy_from_slice(values);
    *idx += values.len();
}

/// Look up a nested stat mapping
///
/// Absent and null are fine (every read then defaults); any other non-object
/// value is a structural failure.
fn sub_object<'a>(parent: Option<&'a JsonMap>, key: &'static str) -> Result<Option<&'a JsonMap>> {
    match parent.and_then(|m| m.get(key)) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(GridironError::MalformedRecord {
            what: key,
            found: value_kind(other),
        }),
    }
}

fn stat(map: Option<&JsonMap>, key: &str) -> f32 {
    coerce_float(map.and_then(|m| m.get(key)), 0.0)
}

fn position_code(value: Option<&Value>) -> f32 {
    Position::parse(&coerce_text(value, "")).map_or(0.0, |p| p.code())
}

fn team_code(value: Option<&Value>) -> f32 {
    categorical_code(&coerce_text(value, ""), TEAM_MODULUS) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_player() -> Value {
        json!({
            "identity": "BradTo00",
            "name": "Tom Brady",
            "position": "QB",
            "age": 45,
            "draft_info": {"team": "NE", "year": 2000, "pick": 199},
            "combine": {"height": 76, "weight": 225, "forty": 5.28},
            "college": {"passing": {"yards": 11000, "touchdowns": 100}},
            "nfl_career": {"passing": {"yards": 89000, "touchdowns": 649}},
            "seasonal": {
                "last": {"team": "TB", "games_played": 17, "games_started": 17},
                "worst": {},
                "best": {},
                "average": {"games_played": 15.2}
            }
        })
    }

    #[test]
    fn test_player_vector_shape() {
        let tensor = encode_player(&full_player());
        assert_eq!(tensor.len(), PLAYER_DIM);

        // Reserved trailing slot is never written
        assert_eq!(tensor[PLAYER_DIM - 1], 0.0);
    }

    #[test]
    fn test_section_widths_sum_to_one_below_total() {
        let written = ROSTER_INFO_DIM
            + COMBINE_DIM
            + COLLEGE_DIM
            + NFL_CAREER_DIM
            + 3 * SEASON_DIM
            + AVERAGE_SEASON_DIM;
        assert_eq!(written, PLAYER_DIM - 1);
    }

    #[test]
    fn test_roster_info_values() {
        let tensor = encode_player(&full_player());

        assert_eq!(tensor[1], 1.0); // QB
        assert_eq!(tensor[2], 1.0); // roster_tier default
        assert_eq!(tensor[4], 2000.0); // draft year
        assert_eq!(tensor[5], 199.0); // draft pick
        assert_eq!(tensor[6], 2024.0); // roster_season default
        assert_eq!(tensor[8], 45.0); // age

        // Identity code is a stable hash in [0, 1_000_000)
        assert_eq!(
            tensor[0],
            categorical_code("BradTo00", IDENTITY_MODULUS) as f32
        );
    }

    #[test]
    fn test_combine_offsets() {
        let tensor = encode_player(&full_player());

        // Combine starts at 9; height sits at its third slot
        assert_eq!(tensor[11], 76.0);
        assert_eq!(tensor[12], 225.0);
        assert_eq!(tensor[13], 5.28);
    }

    #[test]
    fn test_college_and_nfl_offsets() {
        let tensor = encode_player(&full_player());

        // College starts at 22, tenure (5) then passing; yards is passing[2]
        assert_eq!(tensor[22 + 5 + 2], 11000.0);
        assert_eq!(tensor[22 + 5 + 3], 100.0);

        // NFL career starts at 86, basic (3) then passing; yards is passing[3]
        assert_eq!(tensor[86 + 3 + 3], 89000.0);
        assert_eq!(tensor[86 + 3 + 4], 649.0);
    }

    #[test]
    fn test_seasonal_offsets() {
        let tensor = encode_player(&full_player());

        // LastSeason starts at 202: team code, games played, games started
        assert_eq!(tensor[202], categorical_code("TB", TEAM_MODULUS) as f32);
        assert_eq!(tensor[203], 17.0);
        assert_eq!(tensor[204], 17.0);

        // WorstSeason (319) and BestSeason (436) are empty blocks here;
        // their team codes hash the empty string
        assert_eq!(tensor[319], categorical_code("", TEAM_MODULUS) as f32);
        assert_eq!(tensor[320], 0.0);

        // AverageSeason starts at 553 with no team code
        assert_eq!(tensor[553], 15.2);
        assert_eq!(tensor[554], 0.0);
    }

    #[test]
    fn test_minimal_record_defaults() {
        let tensor = encode_player(&json!({"identity": "unknown", "name": "Unknown"}));

        assert_eq!(tensor.len(), PLAYER_DIM);
        assert_eq!(tensor[1], 0.0); // unknown position
        assert_eq!(tensor[2], 1.0); // roster_tier default
        assert_eq!(tensor[6], 2024.0); // roster_season default
        assert_eq!(tensor[8], 25.0); // age default
    }

    #[test]
    fn test_structural_failure_degrades_to_zeros() {
        let tensor = encode_player(&Value::Null);
        assert_eq!(tensor.len(), PLAYER_DIM);
        assert!(tensor.iter().all(|&v| v == 0.0));

        // A nested mapping of the wrong type fails the whole record
        let broken = json!({"identity": "x", "combine": 5});
        let tensor = encode_player(&broken);
        assert!(tensor.iter().all(|&v| v == 0.0));
        assert!(try_encode_player(&broken).is_err());
    }

    #[test]
    fn test_non_object_draft_info_is_tolerated() {
        // draft_info is the one nested block that degrades field-wise
        let record = json!({"identity": "x", "position": "RB", "draft_info": "2000"});
        let tensor = encode_player(&record);

        assert_eq!(tensor[1], 2.0); // RB still encoded
        assert_eq!(tensor[4], 0.0); // draft year left zero
        assert!(try_encode_player(&record).is_ok());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let record = full_player();
        let a = encode_player(&record);
        let b = encode_player(&record);
        assert_eq!(a, b);
    }
}
