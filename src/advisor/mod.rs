// Draft recommendation collaborator: the wire types shared with the
// generative-language API, the advisor capability trait, and the
// deterministic local fallback that keeps the draft moving when the remote
// service is slow, erroring, or rate-limited.

pub mod client;
pub mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::draft::DraftSession;
use crate::player::Player;

// ---------------------------------------------------------------------------
// Advice wire types
// ---------------------------------------------------------------------------

/// A single recommended player with reasoning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub reasoning: String,
}

/// Percentage breakdown of which skill position to target with this pick.
/// Values are non-negative and, after normalization, sum to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalSplit {
    #[serde(rename = "QB")]
    pub qb: u32,
    #[serde(rename = "RB")]
    pub rb: u32,
    #[serde(rename = "WR")]
    pub wr: u32,
    #[serde(rename = "TE")]
    pub te: u32,
}

impl PositionalSplit {
    /// Neutral split used by the local fallback: RB-leaning, the market's
    /// long-run positional drift.
    pub const NEUTRAL: PositionalSplit = PositionalSplit {
        qb: 25,
        rb: 35,
        wr: 30,
        te: 10,
    };

    /// Even split, used when no positional signal exists at all.
    pub const EVEN: PositionalSplit = PositionalSplit {
        qb: 25,
        rb: 25,
        wr: 25,
        te: 25,
    };

    pub fn total(&self) -> u32 {
        self.qb + self.rb + self.wr + self.te
    }

    /// Force the split to sum to exactly 100.
    ///
    /// Buckets are first rescaled proportionally, then any residual rounding
    /// drift is absorbed by the largest bucket. An all-zero split becomes
    /// the even split.
    pub fn normalized(self) -> PositionalSplit {
        let total = self.total();
        if total == 100 {
            return self;
        }
        if total == 0 {
            return PositionalSplit::EVEN;
        }

        let scale = |v: u32| ((v as f64) * 100.0 / (total as f64)).round() as u32;
        let mut buckets = [
            scale(self.qb),
            scale(self.rb),
            scale(self.wr),
            scale(self.te),
        ];

        let scaled_total: u32 = buckets.iter().sum();
        let drift = 100i64 - i64::from(scaled_total);
        // First-largest bucket absorbs the drift (ties resolve to the
        // earliest position so the correction is deterministic).
        let mut largest = 0;
        for (i, &v) in buckets.iter().enumerate() {
            if v > buckets[largest] {
                largest = i;
            }
        }
        buckets[largest] = (i64::from(buckets[largest]) + drift).max(0) as u32;

        PositionalSplit {
            qb: buckets[0],
            rb: buckets[1],
            wr: buckets[2],
            te: buckets[3],
        }
    }
}

/// The full structured advice payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftAdvice {
    pub primary: Recommendation,
    /// 0..2 additional options.
    #[serde(default)]
    pub alternatives: Vec<Recommendation>,
    /// Player names expected to be gone before my next pick.
    #[serde(default)]
    pub predictions: Vec<String>,
    pub positional_analysis: PositionalSplit,
    #[serde(default)]
    pub strategic_narrative: String,
}

impl DraftAdvice {
    /// Sentinel returned when there is nothing left to draft.
    pub fn no_players_left() -> DraftAdvice {
        DraftAdvice {
            primary: Recommendation {
                name: String::new(),
                reasoning: "No players left to draft.".to_string(),
            },
            alternatives: Vec::new(),
            predictions: Vec::new(),
            positional_analysis: PositionalSplit::EVEN,
            strategic_narrative: "The draft board is empty.".to_string(),
        }
    }

    pub fn is_no_players_left(&self) -> bool {
        self.primary.name.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Advice request
// ---------------------------------------------------------------------------

/// Everything the collaborator needs to produce a recommendation. Owns its
/// player data so it can cross task boundaries.
#[derive(Debug, Clone)]
pub struct AdviceRequest {
    pub my_roster: Vec<Player>,
    /// Undrafted players, best-first (market ADP order).
    pub available: Vec<Player>,
    pub drafted: Vec<Player>,
    pub current_pick: u32,
    /// My team's next turn, if one remains.
    pub my_next_pick: Option<u32>,
    /// Teams picking between now and my next turn, in pick order.
    pub teams_picking_before_next: Vec<u32>,
}

impl AdviceRequest {
    /// Snapshot the current session state into a request.
    pub fn from_session(session: &DraftSession) -> AdviceRequest {
        AdviceRequest {
            my_roster: session.my_roster().into_iter().cloned().collect(),
            available: session.available_players().into_iter().cloned().collect(),
            drafted: session.drafted_players().into_iter().cloned().collect(),
            current_pick: session.current_pick(),
            my_next_pick: session.my_next_pick(),
            teams_picking_before_next: session.teams_before_my_next_pick(),
        }
    }
}

// ---------------------------------------------------------------------------
// Advisor capability
// ---------------------------------------------------------------------------

/// An advice-producing collaborator. How the advice is computed (remote
/// model, templates, tests) is the implementor's business.
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn advise(&self, request: &AdviceRequest) -> anyhow::Result<DraftAdvice>;
}

/// Events delivered by advisor tasks. The generation counter lets the
/// receiver discard responses that were superseded by a newer request.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisorEvent {
    Advice {
        advice: DraftAdvice,
        generation: u64,
    },
    Error {
        message: String,
        generation: u64,
    },
}

// ---------------------------------------------------------------------------
// Deterministic fallback
// ---------------------------------------------------------------------------

/// Local substitute advice: best remaining players by the best-first
/// ordering, a neutral positional split, and a short note carrying the
/// failure context when there is one.
pub fn fallback_advice(request: &AdviceRequest, failure_note: Option<&str>) -> DraftAdvice {
    let Some(best) = request.available.first() else {
        return DraftAdvice::no_players_left();
    };

    let reasoning = match failure_note {
        Some(note) => format!(
            "{note} {} is the best player available based on projections and would be a solid pick here.",
            best.name
        ),
        None => format!(
            "{} is the best player available based on projections and would be a solid pick here.",
            best.name
        ),
    };

    let alternatives = request
        .available
        .iter()
        .skip(1)
        .take(2)
        .map(|p| Recommendation {
            name: p.name.clone(),
            reasoning: "A strong value pick based on projections.".to_string(),
        })
        .collect();

    DraftAdvice {
        primary: Recommendation {
            name: best.name.clone(),
            reasoning,
        },
        alternatives,
        predictions: Vec::new(),
        positional_analysis: PositionalSplit::NEUTRAL,
        strategic_narrative: format!(
            "Take the board's best value at pick {} and revisit positional needs next turn.",
            request.current_pick
        ),
    }
}

/// Ask the advisor, degrading to the deterministic fallback on any failure.
/// Rate-limit failures get a friendlier note, mirroring how the remote API
/// reports them.
pub async fn advise_with_fallback(advisor: &dyn Advisor, request: &AdviceRequest) -> DraftAdvice {
    if request.available.is_empty() {
        return DraftAdvice::no_players_left();
    }

    match advisor.advise(request).await {
        Ok(advice) => DraftAdvice {
            positional_analysis: advice.positional_analysis.normalized(),
            ..advice
        },
        Err(error) => {
            let text = format!("{error:#}");
            let note = if text.contains("429") || text.contains("RESOURCE_EXHAUSTED") {
                "Advice is temporarily unavailable due to rate limiting."
            } else {
                "Unable to generate remote analysis."
            };
            fallback_advice(request, Some(note))
        }
    }
}
