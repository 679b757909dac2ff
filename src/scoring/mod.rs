// Player valuation pipeline: historical points, forward projection, then
// pool-wide ranking and grading. Re-run in full on every pool rebuild.

pub mod grading;
pub mod points;
pub mod projection;

pub use points::ScoringRules;

use crate::player::Player;
use points::per_game;

/// Run the full valuation pipeline over a player pool in place.
///
/// Stage order matters: the projection engine reads the historical totals
/// computed by the points converter, and the grading engine reads the
/// projected PPG written by the projection engine.
pub fn run_pipeline(players: &mut [Player], rules: &ScoringRules) {
    for player in players.iter_mut() {
        player.points = rules.points_for(&player.stats, player.position, player.games_played);
        player.ppg = per_game(player.points, player.games_played);

        let projection = projection::project(player, rules);
        player.projected_points = projection.total;
        player.projected_ppg = projection.per_game;
        player.projected_games = Some(projection.games);
    }

    grading::rank_and_grade(players);
}
