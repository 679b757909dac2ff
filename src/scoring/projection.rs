// Forward projection: trust an externally supplied forecast when present,
// otherwise extrapolate from the completed season with a regression discount
// and guard rails for players with no usable history.

use crate::player::{InjuryRisk, Player, Position};
use crate::scoring::points::{per_game, ScoringRules};

// ---------------------------------------------------------------------------
// Heuristic constants
// ---------------------------------------------------------------------------

/// Games in a full regular season.
pub const FULL_SEASON_GAMES: u8 = 17;

/// Discount applied to naive last-season extrapolation.
const REGRESSION_DISCOUNT: f64 = 0.95;

/// Projection boost per catalyst.
const CATALYST_BOOST: f64 = 0.02;

/// Projection penalty per concern.
const CONCERN_PENALTY: f64 = 0.025;

/// Projected games when no external forecast supplies one.
pub fn projected_games_for_risk(risk: InjuryRisk) -> u8 {
    match risk {
        InjuryRisk::High => 14,
        InjuryRisk::Medium => 16,
        InjuryRisk::Low => FULL_SEASON_GAMES,
    }
}

/// Season-total floor substituted when a player has no positive historical
/// points. Keeps rookies and new entrants away from a degenerate 0/0
/// projection.
pub fn position_floor_points(position: Position) -> f64 {
    match position {
        Position::QB => 250.0,
        Position::RB | Position::WR => 180.0,
        Position::TE => 100.0,
        Position::K => 120.0,
        Position::DST => 100.0,
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// A finalized forward projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub total: f64,
    pub games: u8,
    pub per_game: f64,
}

/// Project a player's upcoming season.
///
/// Expects `player.points` to already hold the completed-season total (the
/// pipeline computes it first). Total and never fails: a player missing both
/// history and a supplied forecast still receives a positive projection via
/// the position floor.
pub fn project(player: &Player, rules: &ScoringRules) -> Projection {
    let (base_total, games) = match (&player.projected_stats, player.projected_games) {
        (Some(stats), Some(games)) => {
            // External forecast supplied in full: trust it.
            (rules.points_for(stats, player.position, games), games)
        }
        _ => {
            let games = projected_games_for_risk(player.injury_risk);

            let mut base_points = player.points;
            let mut games_factor = if player.games_played > 0 {
                f64::from(player.games_played)
            } else {
                f64::from(FULL_SEASON_GAMES)
            };
            if base_points <= 0.0 {
                base_points = position_floor_points(player.position);
                games_factor = f64::from(FULL_SEASON_GAMES);
            }

            let total = (base_points / games_factor) * f64::from(games) * REGRESSION_DISCOUNT;
            (total, games)
        }
    };

    // Catalyst/concern adjustment applies on both paths.
    let modifier = 1.0 + CATALYST_BOOST * player.catalysts.len() as f64
        - CONCERN_PENALTY * player.concerns.len() as f64;
    let total = base_total * modifier;

    Projection {
        total,
        games,
        per_game: per_game(total, games),
    }
}
