// Pool-wide ranking and letter grading.
//
// Ranks every player by projected PPG, then scores the offensive skill
// positions against six weighted criteria and maps the composite to a
// letter grade. Kickers and defenses are outside the model and grade "N/A".

use std::collections::HashMap;

use crate::player::{InjuryRisk, OpportunityShare, Player, Position};

// ---------------------------------------------------------------------------
// Composite weights and defaults
// ---------------------------------------------------------------------------

const WEIGHT_POINTS: f64 = 0.30;
const WEIGHT_VALUE: f64 = 0.20;
const WEIGHT_TIER: f64 = 0.20;
const WEIGHT_RISK: f64 = 0.10;
const WEIGHT_SOS: f64 = 0.10;
const WEIGHT_OPPORTUNITY: f64 = 0.10;

/// Market ADP assumed for players the market has not ranked. Deep enough
/// that an unranked player's value score rides almost entirely on their
/// projection rank.
const DEFAULT_ADP: f64 = 200.0;

/// Grade assigned to positions the composite model does not cover.
pub const GRADE_NOT_APPLICABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

fn tier_score(tier: u8) -> f64 {
    match tier {
        0 | 1 => 100.0,
        2 => 95.0,
        3 => 90.0,
        4 => 85.0,
        5 => 80.0,
        6 => 75.0,
        _ => 70.0,
    }
}

fn risk_score(risk: InjuryRisk) -> f64 {
    match risk {
        InjuryRisk::Low => 100.0,
        InjuryRisk::Medium => 70.0,
        InjuryRisk::High => 40.0,
    }
}

fn sos_score(strength_of_schedule: u8) -> f64 {
    (32.0 - f64::from(strength_of_schedule)) / 31.0 * 100.0
}

fn opportunity_score(share: OpportunityShare) -> f64 {
    match share {
        OpportunityShare::High => 100.0,
        OpportunityShare::Medium => 80.0,
        OpportunityShare::Low => 50.0,
    }
}

fn value_score(adp: Option<f64>, projection_rank: u32) -> f64 {
    let value_diff = adp.unwrap_or(DEFAULT_ADP) - f64::from(projection_rank);
    (50.0 + value_diff * 2.0).clamp(0.0, 100.0)
}

/// Map a composite 0-100 score to a letter grade.
pub fn score_to_grade(score: f64) -> &'static str {
    if score >= 97.0 {
        "A+"
    } else if score >= 93.0 {
        "A"
    } else if score >= 90.0 {
        "A-"
    } else if score >= 87.0 {
        "B+"
    } else if score >= 83.0 {
        "B"
    } else if score >= 80.0 {
        "B-"
    } else if score >= 77.0 {
        "C+"
    } else if score >= 73.0 {
        "C"
    } else if score >= 70.0 {
        "C-"
    } else if score >= 65.0 {
        "D+"
    } else if score >= 60.0 {
        "D"
    } else {
        "F"
    }
}

// ---------------------------------------------------------------------------
// Ranking & grading pass
// ---------------------------------------------------------------------------

/// Annotate every player with a dense projection rank and a draft grade.
///
/// Expects projected PPG to be populated. Idempotent: re-running on an
/// unchanged pool produces identical ranks and grades. Ties in projected
/// PPG keep their original pool order (stable sort).
pub fn rank_and_grade(players: &mut [Player]) {
    // Rank the whole pool by projected PPG descending.
    let mut order: Vec<usize> = (0..players.len()).collect();
    order.sort_by(|&a, &b| {
        players[b]
            .projected_ppg
            .partial_cmp(&players[a].projected_ppg)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (rank0, &idx) in order.iter().enumerate() {
        players[idx].projection_rank = Some(rank0 as u32 + 1);
    }

    // Per-position PPG ceiling used as the points-score denominator.
    let mut max_ppg_by_position: HashMap<Position, f64> = HashMap::new();
    for player in players.iter() {
        let entry = max_ppg_by_position.entry(player.position).or_insert(0.0);
        if player.projected_ppg > *entry {
            *entry = player.projected_ppg;
        }
    }

    for player in players.iter_mut() {
        player.draft_grade = Some(grade_player(player, &max_ppg_by_position).to_string());
    }
}

fn grade_player(player: &Player, max_ppg_by_position: &HashMap<Position, f64>) -> &'static str {
    let rank = match player.projection_rank {
        Some(rank) if player.position.is_skill() => rank,
        _ => return GRADE_NOT_APPLICABLE,
    };

    let max_ppg = max_ppg_by_position
        .get(&player.position)
        .copied()
        .filter(|&max| max > 0.0)
        .unwrap_or(1.0);
    let points_score = player.projected_ppg / max_ppg * 100.0;

    let overall = points_score * WEIGHT_POINTS
        + value_score(player.adp, rank) * WEIGHT_VALUE
        + tier_score(player.tier) * WEIGHT_TIER
        + risk_score(player.injury_risk) * WEIGHT_RISK
        + sos_score(player.strength_of_schedule) * WEIGHT_SOS
        + opportunity_score(player.opportunity_share) * WEIGHT_OPPORTUNITY;

    score_to_grade(overall)
}
