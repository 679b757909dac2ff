// Core domain types: positions, qualitative ratings, stat lines, and the
// central Player record.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Fantasy football positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DST,
}

impl Position {
    /// The four offensive skill positions, in display order. Kickers and
    /// defenses are excluded from grading and team analytics.
    pub const SKILL: [Position; 4] = [Position::QB, Position::RB, Position::WR, Position::TE];

    /// Parse a position string (case-insensitive). "D/ST" is accepted as an
    /// alias for DST.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "K" => Some(Position::K),
            "DST" | "D/ST" => Some(Position::DST),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "DST",
        }
    }

    /// Whether this is an offensive skill position (QB/RB/WR/TE).
    pub fn is_skill(&self) -> bool {
        matches!(self, Position::QB | Position::RB | Position::WR | Position::TE)
    }

    /// Whether this position fills a FLEX slot (RB/WR/TE).
    pub fn is_flex(&self) -> bool {
        matches!(self, Position::RB | Position::WR | Position::TE)
    }

    /// Index into [`Position::SKILL`], or `None` for K/DST.
    pub fn skill_index(&self) -> Option<usize> {
        match self {
            Position::QB => Some(0),
            Position::RB => Some(1),
            Position::WR => Some(2),
            Position::TE => Some(3),
            Position::K | Position::DST => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Qualitative ratings
// ---------------------------------------------------------------------------

/// Injury risk assessment. Drives the fallback projected-games figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InjuryRisk {
    Low,
    Medium,
    High,
}

impl InjuryRisk {
    pub fn label(&self) -> &'static str {
        match self {
            InjuryRisk::Low => "Low",
            InjuryRisk::Medium => "Medium",
            InjuryRisk::High => "High",
        }
    }
}

/// Expected share of the offense's volume (targets, carries, snaps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpportunityShare {
    Low,
    Medium,
    High,
}

// ---------------------------------------------------------------------------
// Stat line
// ---------------------------------------------------------------------------

/// A sparse per-category stat record. Every field defaults to zero so a
/// dataset entry only has to carry the categories that apply to the player's
/// position; the points converter branches by position and never reads the
/// irrelevant ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatLine {
    // Offense
    pub passing_yards: u32,
    pub passing_tds: u32,
    pub interceptions: u32,
    pub rushing_yards: u32,
    pub rushing_tds: u32,
    pub receptions: u32,
    pub receiving_yards: u32,
    pub receiving_tds: u32,
    pub fumbles_lost: u32,
    // Kicking
    pub field_goals_0_39: u32,
    pub field_goals_40_49: u32,
    pub field_goals_50_plus: u32,
    pub extra_points: u32,
    // Defense / special teams
    pub sacks: u32,
    pub defensive_interceptions: u32,
    pub fumbles_recovered: u32,
    pub safeties: u32,
    pub defensive_tds: u32,
    pub points_allowed: u32,
    pub blocked_kicks: u32,
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The central player record.
///
/// Fields split into three groups: authoritative dataset fields, derived
/// fields recomputed by the scoring pipeline on every pool rebuild, and
/// draft-assignment state owned by the draft session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub team: String,
    pub bye_week: u8,
    /// Expert quality bucket, lower = better.
    pub tier: u8,
    /// Free-text role label (e.g. "Possession Receiver"), used only for
    /// roster-identity aggregation.
    pub archetype: String,
    pub injury_risk: InjuryRisk,
    /// Schedule difficulty rank, 1 (easiest) to 32 (hardest).
    pub strength_of_schedule: u8,
    pub opportunity_share: OpportunityShare,
    /// Market consensus draft position. Absent for deep sleepers.
    #[serde(default)]
    pub adp: Option<f64>,
    /// External expert rank (market overlay).
    #[serde(default)]
    pub market_rank: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,

    /// Completed-season stats.
    #[serde(default)]
    pub stats: StatLine,
    /// Games played in the completed season.
    #[serde(default)]
    pub games_played: u8,

    /// Externally supplied forward projection, if any.
    #[serde(default)]
    pub projected_stats: Option<StatLine>,
    /// Projected games for the upcoming season. Resolved by the projection
    /// engine when absent (see `scoring::projection`).
    #[serde(default)]
    pub projected_games: Option<u8>,

    /// Positive projection factors. Only the count feeds the model.
    #[serde(default)]
    pub catalysts: Vec<String>,
    /// Negative projection factors. Only the count feeds the model.
    #[serde(default)]
    pub concerns: Vec<String>,

    // -- Derived by the scoring pipeline; not authoritative --
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub ppg: f64,
    #[serde(default)]
    pub projected_points: f64,
    #[serde(default)]
    pub projected_ppg: f64,
    /// Dense 1..N rank over the whole pool by projected PPG descending.
    #[serde(default)]
    pub projection_rank: Option<u32>,
    /// Letter grade, or "N/A" for positions the grading model excludes.
    #[serde(default)]
    pub draft_grade: Option<String>,

    // -- Draft assignment --
    #[serde(default)]
    pub drafted: bool,
    #[serde(default)]
    pub draft_pick: Option<u32>,
    #[serde(default)]
    pub team_number: Option<u32>,
}

impl Player {
    /// ADP used for board ordering; undrafted-market players sort last.
    pub fn adp_for_ordering(&self) -> f64 {
        self.adp.unwrap_or(999.0)
    }

    /// Clear draft assignment back to the undrafted state.
    pub fn clear_draft_state(&mut self) {
        self.drafted = false;
        self.draft_pick = None;
        self.team_number = None;
    }

    /// Merge a partial update record into this player, overwriting only the
    /// fields the update carries.
    pub fn apply_update(&mut self, update: &PlayerUpdate) {
        if let Some(adp) = update.adp {
            self.adp = Some(adp);
        }
        if let Some(rank) = update.market_rank {
            self.market_rank = Some(rank);
        }
        if let Some(notes) = &update.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(tier) = update.tier {
            self.tier = tier;
        }
        if let Some(risk) = update.injury_risk {
            self.injury_risk = risk;
        }
        if let Some(share) = update.opportunity_share {
            self.opportunity_share = share;
        }
        if let Some(stats) = &update.projected_stats {
            self.projected_stats = Some(stats.clone());
        }
        if let Some(games) = update.projected_games {
            self.projected_games = Some(games);
        }
        if let Some(catalysts) = &update.catalysts {
            self.catalysts = catalysts.clone();
        }
        if let Some(concerns) = &update.concerns {
            self.concerns = concerns.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// Partial update record
// ---------------------------------------------------------------------------

/// A partial player update, merged by id onto the static baseline during a
/// data sync. Absent fields leave the baseline value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerUpdate {
    pub id: u32,
    pub adp: Option<f64>,
    pub market_rank: Option<u32>,
    pub notes: Option<String>,
    pub tier: Option<u8>,
    pub injury_risk: Option<InjuryRisk>,
    pub opportunity_share: Option<OpportunityShare>,
    pub projected_stats: Option<StatLine>,
    pub projected_games: Option<u8>,
    pub catalysts: Option<Vec<String>>,
    pub concerns: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_pos_all_positions() {
        assert_eq!(Position::from_str_pos("QB"), Some(Position::QB));
        assert_eq!(Position::from_str_pos("RB"), Some(Position::RB));
        assert_eq!(Position::from_str_pos("WR"), Some(Position::WR));
        assert_eq!(Position::from_str_pos("TE"), Some(Position::TE));
        assert_eq!(Position::from_str_pos("K"), Some(Position::K));
        assert_eq!(Position::from_str_pos("DST"), Some(Position::DST));
        assert_eq!(Position::from_str_pos("D/ST"), Some(Position::DST));
    }

    #[test]
    fn from_str_pos_case_insensitive() {
        assert_eq!(Position::from_str_pos("qb"), Some(Position::QB));
        assert_eq!(Position::from_str_pos("Dst"), Some(Position::DST));
    }

    #[test]
    fn from_str_pos_invalid() {
        assert_eq!(Position::from_str_pos("FLEX"), None);
        assert_eq!(Position::from_str_pos(""), None);
    }

    #[test]
    fn display_roundtrip() {
        for pos in [
            Position::QB,
            Position::RB,
            Position::WR,
            Position::TE,
            Position::K,
            Position::DST,
        ] {
            assert_eq!(Position::from_str_pos(pos.display_str()), Some(pos));
        }
    }

    #[test]
    fn skill_classification() {
        assert!(Position::QB.is_skill());
        assert!(Position::TE.is_skill());
        assert!(!Position::K.is_skill());
        assert!(!Position::DST.is_skill());

        assert!(!Position::QB.is_flex());
        assert!(Position::RB.is_flex());
        assert!(Position::WR.is_flex());
        assert!(Position::TE.is_flex());
    }

    #[test]
    fn skill_index_matches_skill_order() {
        for (i, pos) in Position::SKILL.iter().enumerate() {
            assert_eq!(pos.skill_index(), Some(i));
        }
        assert_eq!(Position::K.skill_index(), None);
        assert_eq!(Position::DST.skill_index(), None);
    }

    #[test]
    fn sparse_stat_line_deserializes_with_defaults() {
        let line: StatLine =
            serde_json::from_str(r#"{"rushing_yards": 1200, "rushing_tds": 11, "receptions": 40}"#)
                .unwrap();
        assert_eq!(line.rushing_yards, 1200);
        assert_eq!(line.rushing_tds, 11);
        assert_eq!(line.receptions, 40);
        assert_eq!(line.passing_yards, 0);
        assert_eq!(line.points_allowed, 0);
    }

    #[test]
    fn player_deserializes_without_derived_fields() {
        let json = r#"{
            "id": 1,
            "name": "Test Back",
            "position": "RB",
            "team": "SF",
            "bye_week": 9,
            "tier": 1,
            "archetype": "Workhorse Back",
            "injury_risk": "Medium",
            "strength_of_schedule": 14,
            "opportunity_share": "High",
            "adp": 2.5,
            "stats": {"rushing_yards": 1459, "rushing_tds": 14},
            "games_played": 16
        }"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.name, "Test Back");
        assert_eq!(player.position, Position::RB);
        assert!(!player.drafted);
        assert_eq!(player.draft_pick, None);
        assert_eq!(player.projection_rank, None);
        assert!(player.catalysts.is_empty());
        assert_eq!(player.adp, Some(2.5));
        assert_eq!(player.market_rank, None);
    }

    #[test]
    fn apply_update_overwrites_only_present_fields() {
        let mut player: Player = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Test Receiver",
                "position": "WR",
                "team": "DAL",
                "bye_week": 7,
                "tier": 2,
                "archetype": "Alpha X",
                "injury_risk": "Low",
                "strength_of_schedule": 20,
                "opportunity_share": "High",
                "adp": 11.0,
                "notes": "Old note"
            }"#,
        )
        .unwrap();

        let update = PlayerUpdate {
            id: 7,
            adp: Some(8.0),
            market_rank: Some(9),
            ..Default::default()
        };
        player.apply_update(&update);

        assert_eq!(player.adp, Some(8.0));
        assert_eq!(player.market_rank, Some(9));
        // Untouched fields survive.
        assert_eq!(player.notes.as_deref(), Some("Old note"));
        assert_eq!(player.tier, 2);
        assert_eq!(player.injury_risk, InjuryRisk::Low);
    }

    #[test]
    fn clear_draft_state_resets_assignment() {
        let mut player: Player = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "P",
                "position": "TE",
                "team": "KC",
                "bye_week": 6,
                "tier": 1,
                "archetype": "Move TE",
                "injury_risk": "Medium",
                "strength_of_schedule": 16,
                "opportunity_share": "High",
                "drafted": true,
                "draft_pick": 12,
                "team_number": 12
            }"#,
        )
        .unwrap();
        assert!(player.drafted);

        player.clear_draft_state();
        assert!(!player.drafted);
        assert_eq!(player.draft_pick, None);
        assert_eq!(player.team_number, None);
    }

    #[test]
    fn adp_for_ordering_defaults_to_999() {
        let mut player: Player = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "P",
                "position": "WR",
                "team": "NYJ",
                "bye_week": 12,
                "tier": 8,
                "archetype": "Deep Threat",
                "injury_risk": "Low",
                "strength_of_schedule": 5,
                "opportunity_share": "Low"
            }"#,
        )
        .unwrap();
        assert_eq!(player.adp_for_ordering(), 999.0);
        player.adp = Some(44.5);
        assert_eq!(player.adp_for_ordering(), 44.5);
    }
}
