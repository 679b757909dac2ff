// Post-draft team analytics: per-team positional strength, league averages,
// ranks, and a roster-identity report. Purely local aggregation over the
// drafted partition.

use std::collections::BTreeMap;

use crate::player::{Player, Position};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// How a team stacks up against the league at one skill position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalAdvantage {
    pub position: Position,
    /// Sum of the team's drafted projected PPG at this position.
    pub my_ppg: f64,
    pub league_average_ppg: f64,
    /// 1-based rank among all teams, descending by accumulated PPG.
    pub rank: u32,
}

/// Roster-identity summary for a single team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamReport {
    pub grade: &'static str,
    pub title: String,
    pub summary: String,
    pub insights: Vec<String>,
    /// Occurrences of each archetype label across the roster. BTreeMap so
    /// iteration order is deterministic.
    pub archetype_counts: BTreeMap<String, u32>,
}

/// Full analytics output for one team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamAnalytics {
    pub advantages: Vec<PositionalAdvantage>,
    pub report: TeamReport,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Analyze one team's drafted roster against the rest of the league.
///
/// Only the four skill positions are modeled. Rank ties resolve to the first
/// match in the descending list, so teams with equal accumulated totals
/// share that rank.
pub fn analyze_team(players: &[Player], my_team: u32, team_count: u32) -> TeamAnalytics {
    // Accumulate drafted projected PPG per team per skill position.
    let teams = team_count as usize;
    let mut totals = vec![[0.0f64; 4]; teams];
    for player in players.iter().filter(|p| p.drafted) {
        let (Some(team), Some(slot)) = (player.team_number, player.position.skill_index()) else {
            continue;
        };
        if team >= 1 && team <= team_count {
            totals[(team - 1) as usize][slot] += player.projected_ppg;
        }
    }

    let my_idx = (my_team - 1) as usize;
    let mut advantages = Vec::with_capacity(Position::SKILL.len());
    for (slot, &position) in Position::SKILL.iter().enumerate() {
        let league_total: f64 = totals.iter().map(|t| t[slot]).sum();
        let league_average_ppg = league_total / f64::from(team_count);

        let mut sorted: Vec<f64> = totals.iter().map(|t| t[slot]).collect();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        let my_ppg = totals[my_idx][slot];
        let rank = sorted.iter().position(|&v| v == my_ppg).unwrap_or(0) as u32 + 1;

        advantages.push(PositionalAdvantage {
            position,
            my_ppg,
            league_average_ppg,
            rank,
        });
    }

    let my_roster: Vec<&Player> = players
        .iter()
        .filter(|p| p.drafted && p.team_number == Some(my_team))
        .collect();

    let report = build_report(&advantages, &my_roster, team_count);

    TeamAnalytics {
        advantages,
        report,
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Overall grade from the average positional rank, banded by percentile of
/// the league: top quarter A, top 40% B, top 60% C, else D.
fn grade_from_ranks(advantages: &[PositionalAdvantage], team_count: u32) -> &'static str {
    let average_rank: f64 =
        advantages.iter().map(|a| f64::from(a.rank)).sum::<f64>() / advantages.len() as f64;
    let percentile = average_rank / f64::from(team_count);
    if percentile <= 0.25 {
        "A"
    } else if percentile <= 0.40 {
        "B"
    } else if percentile <= 0.60 {
        "C"
    } else {
        "D"
    }
}

fn build_report(
    advantages: &[PositionalAdvantage],
    my_roster: &[&Player],
    team_count: u32,
) -> TeamReport {
    let mut archetype_counts: BTreeMap<String, u32> = BTreeMap::new();
    for player in my_roster {
        *archetype_counts.entry(player.archetype.clone()).or_insert(0) += 1;
    }

    let grade = grade_from_ranks(advantages, team_count);

    // The dominant archetype drives the roster's title; alphabetical order
    // (BTreeMap iteration) breaks count ties deterministically.
    let dominant = archetype_counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(name, _)| name.clone());
    let title = match &dominant {
        Some(name) => format!("{name} Core"),
        None => "Empty Roster".to_string(),
    };

    let average_rank: f64 =
        advantages.iter().map(|a| f64::from(a.rank)).sum::<f64>() / advantages.len() as f64;
    let summary = format!(
        "Graded {grade}: average positional rank {average_rank:.1} across {team_count} teams.",
    );

    let insights = advantages
        .iter()
        .map(|a| {
            let diff = a.my_ppg - a.league_average_ppg;
            let direction = if diff >= 0.0 { "above" } else { "below" };
            format!(
                "{}: rank {} of {team_count}, {:.1} PPG ({:+.1} {direction} league average)",
                a.position, a.rank, a.my_ppg, diff,
            )
        })
        .collect();

    TeamReport {
        grade,
        title,
        summary,
        insights,
        archetype_counts,
    }
}
