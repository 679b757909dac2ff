// Draft session state: the authoritative player pool, the pick counter, and
// every operation allowed to mutate them. All four mutations (draft, reset,
// sync, and nothing else) funnel through this module so the pool invariants
// are enforced in one place.

use thiserror::Error;
use tracing::warn;

use crate::draft::order;
use crate::player::{Player, PlayerUpdate};
use crate::scoring::points::round2;
use crate::scoring::{self, ScoringRules};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("unknown player id: {0}")]
    UnknownPlayer(u32),

    #[error("player already drafted: {name} went at pick {pick}")]
    AlreadyDrafted { name: String, pick: u32 },

    #[error("draft is complete: all {0} players are drafted")]
    DraftComplete(usize),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A single in-memory draft session.
///
/// Holds the pristine baseline records the pool is rebuilt from on reset and
/// sync, the live pool (pipeline-annotated), and the pick counter. The
/// baseline is never mutated: a sync merges updates into a copy, so a later
/// reset returns to the original hand-authored dataset.
#[derive(Debug, Clone)]
pub struct DraftSession {
    baseline: Vec<Player>,
    players: Vec<Player>,
    rules: ScoringRules,
    team_count: u32,
    my_slot: u32,
    current_pick: u32,
}

impl DraftSession {
    /// Build a session from the static baseline, running the full valuation
    /// pipeline over a copy of it.
    pub fn new(baseline: Vec<Player>, rules: ScoringRules, team_count: u32, my_slot: u32) -> Self {
        let mut players = baseline.clone();
        for player in players.iter_mut() {
            player.clear_draft_state();
        }
        scoring::run_pipeline(&mut players, &rules);

        DraftSession {
            baseline,
            players,
            rules,
            team_count,
            my_slot,
            current_pick: 1,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_pick(&self) -> u32 {
        self.current_pick
    }

    pub fn team_count(&self) -> u32 {
        self.team_count
    }

    pub fn my_slot(&self) -> u32 {
        self.my_slot
    }

    /// Whether every player in the pool has been drafted.
    pub fn is_complete(&self) -> bool {
        self.players.iter().all(|p| p.drafted)
    }

    /// The team on the clock for the current pick.
    pub fn team_on_clock(&self) -> u32 {
        order::team_on_clock(self.current_pick, self.team_count)
    }

    /// My team's next pick strictly after the current one, if any player
    /// pool remains to draft at it.
    pub fn my_next_pick(&self) -> Option<u32> {
        order::next_pick_for(
            self.my_slot,
            self.current_pick,
            self.team_count,
            self.players.len() as u32,
        )
    }

    /// Team numbers picking between now and my next turn, in pick order.
    pub fn teams_before_my_next_pick(&self) -> Vec<u32> {
        match self.my_next_pick() {
            Some(next) => order::teams_picking_between(self.current_pick, next, self.team_count),
            None => Vec::new(),
        }
    }

    // -- Partitions ---------------------------------------------------------

    /// Undrafted players ordered by market ADP ascending (unranked last).
    pub fn available_players(&self) -> Vec<&Player> {
        let mut available: Vec<&Player> = self.players.iter().filter(|p| !p.drafted).collect();
        available.sort_by(|a, b| {
            a.adp_for_ordering()
                .partial_cmp(&b.adp_for_ordering())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        available
    }

    /// Drafted players ordered by pick number.
    pub fn drafted_players(&self) -> Vec<&Player> {
        let mut drafted: Vec<&Player> = self.players.iter().filter(|p| p.drafted).collect();
        drafted.sort_by_key(|p| p.draft_pick.unwrap_or(0));
        drafted
    }

    /// Players drafted by the given team, in pick order.
    pub fn roster(&self, team: u32) -> Vec<&Player> {
        let mut roster: Vec<&Player> = self
            .players
            .iter()
            .filter(|p| p.drafted && p.team_number == Some(team))
            .collect();
        roster.sort_by_key(|p| p.draft_pick.unwrap_or(0));
        roster
    }

    /// My team's roster.
    pub fn my_roster(&self) -> Vec<&Player> {
        self.roster(self.my_slot)
    }

    // -- Mutations ----------------------------------------------------------

    /// Draft a player at the current pick.
    ///
    /// Atomic from the caller's perspective: on any error nothing changes;
    /// on success exactly one player flips to drafted, receives the current
    /// pick number and the on-clock team, and the pick counter advances by
    /// one.
    pub fn draft_player(&mut self, player_id: u32) -> Result<(), DraftError> {
        if self.is_complete() {
            return Err(DraftError::DraftComplete(self.players.len()));
        }

        let team = self.team_on_clock();
        let pick = self.current_pick;

        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(DraftError::UnknownPlayer(player_id))?;

        if player.drafted {
            return Err(DraftError::AlreadyDrafted {
                name: player.name.clone(),
                pick: player.draft_pick.unwrap_or(0),
            });
        }

        player.drafted = true;
        player.draft_pick = Some(pick);
        player.team_number = Some(team);
        self.current_pick += 1;
        Ok(())
    }

    /// Rebuild the pool from the pristine baseline, clearing all draft
    /// assignments and returning the pick counter to 1.
    pub fn reset(&mut self) {
        let mut players = self.baseline.clone();
        for player in players.iter_mut() {
            player.clear_draft_state();
        }
        scoring::run_pipeline(&mut players, &self.rules);
        self.players = players;
        self.current_pick = 1;
    }

    /// Merge partial update records onto the baseline, re-run the pipeline,
    /// and restart the draft. This is a full re-seed: draft assignments are
    /// intentionally cleared.
    ///
    /// Returns a human-readable change log, one line per changed field.
    /// Updates referencing unknown player ids are skipped.
    pub fn sync(&mut self, updates: &[PlayerUpdate]) -> Vec<String> {
        let mut changes = Vec::new();

        let mut merged = self.baseline.clone();
        for update in updates {
            let Some(current) = self.players.iter().find(|p| p.id == update.id) else {
                warn!("sync update references unknown player id {}", update.id);
                continue;
            };
            self.log_update_changes(current, update, &mut changes);

            if let Some(player) = merged.iter_mut().find(|p| p.id == update.id) {
                player.apply_update(update);
            }
        }

        for player in merged.iter_mut() {
            player.clear_draft_state();
        }
        scoring::run_pipeline(&mut merged, &self.rules);
        self.players = merged;
        self.current_pick = 1;

        changes
    }

    /// Append change-log lines comparing a live player against an update.
    fn log_update_changes(&self, player: &Player, update: &PlayerUpdate, changes: &mut Vec<String>) {
        if let Some(new_adp) = update.adp {
            if player.adp != Some(new_adp) {
                changes.push(format!(
                    "{}: ADP {} → {}",
                    player.name,
                    format_opt_number(player.adp),
                    format_number(new_adp),
                ));
            }
        }

        if let Some(new_rank) = update.market_rank {
            if player.market_rank != Some(new_rank) {
                let old = player
                    .market_rank
                    .map_or_else(|| "N/A".to_string(), |r| r.to_string());
                changes.push(format!("{}: Market rank {} → {}", player.name, old, new_rank));
            }
        }

        if let Some(notes) = &update.notes {
            if player.notes.as_ref() != Some(notes) {
                changes.push(format!("{}: Note updated", player.name));
            }
        }

        // Projection deltas are compared at one decimal so sub-0.05 noise is
        // not reported.
        if let Some(stats) = &update.projected_stats {
            let games = update
                .projected_games
                .or(player.projected_games)
                .unwrap_or(17);
            let new_total = self.rules.points_for(stats, player.position, games);
            let new_ppg = if games > 0 {
                round2(new_total / f64::from(games))
            } else {
                0.0
            };
            let old_ppg = player.projected_ppg;
            if format!("{old_ppg:.1}") != format!("{new_ppg:.1}") {
                let arrow = if old_ppg > new_ppg { "↓" } else { "↑" };
                changes.push(format!(
                    "{}: Projection {} {:.1} → {:.1} PPG",
                    player.name, arrow, old_ppg, new_ppg,
                ));
            }
        }
    }
}

/// Format a numeric value without a trailing ".0" when it is whole.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn format_opt_number(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), format_number)
}
