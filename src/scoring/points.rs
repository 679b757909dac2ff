// Stat-to-fantasy-points conversion under a fixed PPR rule table.
//
// The converter branches by position so categories irrelevant to a position
// are never read, even if a dataset entry carries them.

use crate::player::{Position, StatLine};

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// Per-category scoring weights. Yardage categories are expressed as
/// yards-per-point divisors; everything else is points-per-unit.
#[derive(Debug, Clone, Copy)]
pub struct ScoringRules {
    pub passing_yards_per_point: f64,
    pub passing_td_points: f64,
    pub interception_points: f64,
    pub rushing_yards_per_point: f64,
    pub rushing_td_points: f64,
    pub reception_points: f64,
    pub receiving_yards_per_point: f64,
    pub receiving_td_points: f64,
    pub fumble_lost_points: f64,

    pub fg_0_39_points: f64,
    pub fg_40_49_points: f64,
    pub fg_50_plus_points: f64,
    pub extra_point_points: f64,

    pub sack_points: f64,
    pub defensive_interception_points: f64,
    pub fumble_recovery_points: f64,
    pub safety_points: f64,
    pub defensive_td_points: f64,
    pub blocked_kick_points: f64,
}

impl ScoringRules {
    /// Standard full-PPR rules.
    pub const fn ppr() -> Self {
        Self {
            passing_yards_per_point: 25.0,
            passing_td_points: 4.0,
            interception_points: -2.0,
            rushing_yards_per_point: 10.0,
            rushing_td_points: 6.0,
            reception_points: 1.0,
            receiving_yards_per_point: 10.0,
            receiving_td_points: 6.0,
            fumble_lost_points: -2.0,

            fg_0_39_points: 3.0,
            fg_40_49_points: 4.0,
            fg_50_plus_points: 5.0,
            extra_point_points: 1.0,

            sack_points: 1.0,
            defensive_interception_points: 2.0,
            fumble_recovery_points: 2.0,
            safety_points: 2.0,
            defensive_td_points: 6.0,
            blocked_kick_points: 2.0,
        }
    }

    /// Total fantasy points for a season stat line at the given position.
    ///
    /// Missing categories are zero by construction (see `StatLine`), so this
    /// is total and never errors. `games_played` is accepted for symmetry
    /// with the per-game derivation but does not affect the total. The
    /// result is floored at zero: a turnover-heavy line cannot take a
    /// player's season below 0.
    pub fn points_for(&self, stats: &StatLine, position: Position, _games_played: u8) -> f64 {
        let total = match position {
            Position::QB | Position::RB | Position::WR | Position::TE => {
                self.offense_points(stats)
            }
            Position::K => self.kicking_points(stats),
            Position::DST => self.defense_points(stats),
        };
        total.max(0.0)
    }

    fn offense_points(&self, s: &StatLine) -> f64 {
        f64::from(s.passing_yards) / self.passing_yards_per_point
            + f64::from(s.passing_tds) * self.passing_td_points
            + f64::from(s.interceptions) * self.interception_points
            + f64::from(s.rushing_yards) / self.rushing_yards_per_point
            + f64::from(s.rushing_tds) * self.rushing_td_points
            + f64::from(s.receptions) * self.reception_points
            + f64::from(s.receiving_yards) / self.receiving_yards_per_point
            + f64::from(s.receiving_tds) * self.receiving_td_points
            + f64::from(s.fumbles_lost) * self.fumble_lost_points
    }

    fn kicking_points(&self, s: &StatLine) -> f64 {
        f64::from(s.field_goals_0_39) * self.fg_0_39_points
            + f64::from(s.field_goals_40_49) * self.fg_40_49_points
            + f64::from(s.field_goals_50_plus) * self.fg_50_plus_points
            + f64::from(s.extra_points) * self.extra_point_points
    }

    fn defense_points(&self, s: &StatLine) -> f64 {
        f64::from(s.sacks) * self.sack_points
            + f64::from(s.defensive_interceptions) * self.defensive_interception_points
            + f64::from(s.fumbles_recovered) * self.fumble_recovery_points
            + f64::from(s.safeties) * self.safety_points
            + f64::from(s.defensive_tds) * self.defensive_td_points
            + f64::from(s.blocked_kicks) * self.blocked_kick_points
            + points_allowed_points(s.points_allowed)
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::ppr()
    }
}

/// Season-total bonus for points allowed, standard banding. A DST stat line
/// records the season aggregate, so the bands are applied to the per-game
/// average over a 17-game season.
fn points_allowed_points(points_allowed: u32) -> f64 {
    let per_game = f64::from(points_allowed) / 17.0;
    let per_game_bonus = if per_game == 0.0 {
        10.0
    } else if per_game <= 6.0 {
        7.0
    } else if per_game <= 13.0 {
        4.0
    } else if per_game <= 20.0 {
        1.0
    } else if per_game <= 27.0 {
        0.0
    } else if per_game <= 34.0 {
        -1.0
    } else {
        -4.0
    };
    per_game_bonus * 17.0
}

// ---------------------------------------------------------------------------
// Per-game derivation
// ---------------------------------------------------------------------------

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Points per game with a zero-games guard.
pub fn per_game(total: f64, games: u8) -> f64 {
    if games > 0 {
        round2(total / f64::from(games))
    } else {
        0.0
    }
}
