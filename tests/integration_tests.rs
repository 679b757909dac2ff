// Integration tests for the draft assistant core.
//
// These tests exercise the full system end-to-end through the library
// crate's public API: the valuation pipeline over a realistic pool, snake
// draft progression, sync re-seeding, team analytics, and the advisor
// fallback path.

use std::path::Path;

use gridiron_draft::advisor::{self, AdviceRequest, Advisor, DraftAdvice};
use gridiron_draft::analytics;
use gridiron_draft::config;
use gridiron_draft::draft::{DraftError, DraftSession};
use gridiron_draft::player::{
    InjuryRisk, OpportunityShare, Player, PlayerUpdate, Position, StatLine,
};
use gridiron_draft::pool;
use gridiron_draft::scoring::ScoringRules;

use async_trait::async_trait;

// ===========================================================================
// Test helpers
// ===========================================================================

/// Build a pool player -- single source of truth for player fixtures.
#[allow(clippy::too_many_arguments)]
fn player(
    id: u32,
    name: &str,
    position: Position,
    archetype: &str,
    adp: f64,
    stats: StatLine,
    games_played: u8,
    injury_risk: InjuryRisk,
) -> Player {
    Player {
        id,
        name: name.into(),
        position,
        team: "TST".into(),
        bye_week: 9,
        tier: 2,
        archetype: archetype.into(),
        injury_risk,
        strength_of_schedule: 16,
        opportunity_share: OpportunityShare::Medium,
        adp: Some(adp),
        market_rank: None,
        notes: None,
        stats,
        games_played,
        projected_stats: None,
        projected_games: None,
        catalysts: Vec::new(),
        concerns: Vec::new(),
        points: 0.0,
        ppg: 0.0,
        projected_points: 0.0,
        projected_ppg: 0.0,
        projection_rank: None,
        draft_grade: None,
        drafted: false,
        draft_pick: None,
        team_number: None,
    }
}

fn rushing(yards: u32, tds: u32, receptions: u32) -> StatLine {
    StatLine {
        rushing_yards: yards,
        rushing_tds: tds,
        receptions,
        receiving_yards: receptions * 8,
        ..Default::default()
    }
}

fn passing(yards: u32, tds: u32, interceptions: u32) -> StatLine {
    StatLine {
        passing_yards: yards,
        passing_tds: tds,
        interceptions,
        ..Default::default()
    }
}

fn receiving(receptions: u32, yards: u32, tds: u32) -> StatLine {
    StatLine {
        receptions,
        receiving_yards: yards,
        receiving_tds: tds,
        ..Default::default()
    }
}

/// A mixed 28-player pool: QBs, RBs, WRs, TEs, a kicker, a defense, and one
/// rookie with no history.
fn sample_pool() -> Vec<Player> {
    let mut pool = Vec::new();
    let mut id = 0;
    let mut next_id = || {
        id += 1;
        id
    };

    for i in 0..4 {
        pool.push(player(
            next_id(),
            &format!("Quarterback {}", i + 1),
            Position::QB,
            "Pocket Passer",
            10.0 + f64::from(i) * 20.0,
            passing(4600 - i * 400, 38 - i * 4, 8 + i),
            17,
            InjuryRisk::Low,
        ));
    }
    for i in 0..8 {
        pool.push(player(
            next_id(),
            &format!("Running Back {}", i + 1),
            Position::RB,
            if i < 4 { "Workhorse Back" } else { "Satellite Back" },
            1.0 + f64::from(i) * 5.0,
            rushing(1600 - i * 120, 14u32.saturating_sub(i), 40),
            16,
            if i % 3 == 2 { InjuryRisk::High } else { InjuryRisk::Medium },
        ));
    }
    for i in 0..8 {
        pool.push(player(
            next_id(),
            &format!("Wide Receiver {}", i + 1),
            Position::WR,
            if i < 3 { "Alpha X" } else { "Possession Receiver" },
            3.0 + f64::from(i) * 6.0,
            receiving(110 - i * 8, 1500 - i * 110, 11u32.saturating_sub(i)),
            17,
            InjuryRisk::Low,
        ));
    }
    for i in 0..4 {
        pool.push(player(
            next_id(),
            &format!("Tight End {}", i + 1),
            Position::TE,
            "Move TE",
            20.0 + f64::from(i) * 25.0,
            receiving(85 - i * 12, 980 - i * 150, 8u32.saturating_sub(i)),
            16,
            InjuryRisk::Medium,
        ));
    }
    pool.push(player(
        next_id(),
        "Kicker 1",
        Position::K,
        "Automatic Leg",
        140.0,
        StatLine {
            field_goals_0_39: 22,
            field_goals_40_49: 8,
            field_goals_50_plus: 4,
            extra_points: 40,
            ..Default::default()
        },
        17,
        InjuryRisk::Low,
    ));
    pool.push(player(
        next_id(),
        "Defense 1",
        Position::DST,
        "Takeaway Unit",
        150.0,
        StatLine {
            sacks: 48,
            defensive_interceptions: 16,
            fumbles_recovered: 11,
            defensive_tds: 5,
            points_allowed: 310,
            ..Default::default()
        },
        17,
        InjuryRisk::Low,
    ));
    // Rookie: zero history, projection comes entirely from the floor path.
    pool.push(player(
        next_id(),
        "Rookie Back",
        Position::RB,
        "Satellite Back",
        90.0,
        StatLine::default(),
        0,
        InjuryRisk::High,
    ));
    // A player the market has not ranked.
    let mut unranked = player(
        next_id(),
        "Unranked Receiver",
        Position::WR,
        "Deep Threat",
        0.0,
        receiving(35, 600, 4),
        15,
        InjuryRisk::Low,
    );
    unranked.adp = None;
    pool.push(unranked);

    pool
}

fn twelve_team_session() -> DraftSession {
    DraftSession::new(sample_pool(), ScoringRules::ppr(), 12, 1)
}

// ===========================================================================
// Pipeline end-to-end
// ===========================================================================

#[test]
fn pipeline_annotates_the_whole_pool() {
    let session = twelve_team_session();
    let players = session.players();

    // Every player has a dense rank.
    let mut ranks: Vec<u32> = players.iter().map(|p| p.projection_rank.unwrap()).collect();
    ranks.sort_unstable();
    let expected: Vec<u32> = (1..=players.len() as u32).collect();
    assert_eq!(ranks, expected);

    // Every player has a projection and a grade.
    for p in players {
        assert!(p.projected_points > 0.0, "{}", p.name);
        assert!(p.projected_ppg > 0.0, "{}", p.name);
        assert!(p.draft_grade.is_some(), "{}", p.name);
    }
}

#[test]
fn kickers_and_defenses_grade_na_everyone_else_lettered() {
    let session = twelve_team_session();
    for p in session.players() {
        let grade = p.draft_grade.as_deref().unwrap();
        if matches!(p.position, Position::K | Position::DST) {
            assert_eq!(grade, "N/A", "{}", p.name);
        } else {
            assert_ne!(grade, "N/A", "{}", p.name);
        }
    }
}

#[test]
fn rookie_projection_uses_the_floor_path() {
    let session = twelve_team_session();
    let rookie = session
        .players()
        .iter()
        .find(|p| p.name == "Rookie Back")
        .unwrap();
    // High risk -> 14 games; RB floor 180 over a 17-game factor, discounted:
    // (180/17) * 14 * 0.95 = 140.82.
    assert_eq!(rookie.projected_games, Some(14));
    assert!(
        (rookie.projected_points - 140.823).abs() < 0.01,
        "got {}",
        rookie.projected_points
    );
}

// ===========================================================================
// Snake draft scenarios
// ===========================================================================

#[test]
fn fresh_twelve_team_draft_snakes_correctly() {
    let mut session = twelve_team_session();
    let ids: Vec<u32> = session.players().iter().map(|p| p.id).collect();

    for id in ids.iter().take(24) {
        session.draft_player(*id).unwrap();
    }

    let pick_team = |pick: u32| {
        session
            .players()
            .iter()
            .find(|p| p.draft_pick == Some(pick))
            .unwrap()
            .team_number
            .unwrap()
    };
    assert_eq!(pick_team(1), 1);
    assert_eq!(pick_team(12), 12);
    assert_eq!(pick_team(13), 12);
    assert_eq!(pick_team(24), 1);
}

#[test]
fn draft_monotonicity() {
    let mut session = twelve_team_session();
    let before_pick = session.current_pick();
    let drafted_before = session.drafted_players().len();

    let first_available = session.available_players()[0].id;
    session.draft_player(first_available).unwrap();

    assert_eq!(session.current_pick(), before_pick + 1);
    assert_eq!(session.drafted_players().len(), drafted_before + 1);
}

#[test]
fn invalid_draft_actions_never_mutate_state() {
    let mut session = twelve_team_session();
    session.draft_player(1).unwrap();
    let snapshot: Vec<(u32, bool, Option<u32>)> = session
        .players()
        .iter()
        .map(|p| (p.id, p.drafted, p.draft_pick))
        .collect();
    let pick = session.current_pick();

    assert!(matches!(
        session.draft_player(1),
        Err(DraftError::AlreadyDrafted { .. })
    ));
    assert!(matches!(
        session.draft_player(9999),
        Err(DraftError::UnknownPlayer(9999))
    ));

    let after: Vec<(u32, bool, Option<u32>)> = session
        .players()
        .iter()
        .map(|p| (p.id, p.drafted, p.draft_pick))
        .collect();
    assert_eq!(snapshot, after);
    assert_eq!(session.current_pick(), pick);
}

#[test]
fn draft_until_complete_then_reject() {
    let mut session = twelve_team_session();
    let ids: Vec<u32> = session.players().iter().map(|p| p.id).collect();
    for id in ids {
        session.draft_player(id).unwrap();
    }
    assert!(session.is_complete());
    assert!(matches!(
        session.draft_player(1),
        Err(DraftError::DraftComplete(_))
    ));
    // Pick numbers are a strictly increasing sequence starting at 1.
    let picks: Vec<u32> = session
        .drafted_players()
        .iter()
        .map(|p| p.draft_pick.unwrap())
        .collect();
    let expected: Vec<u32> = (1..=picks.len() as u32).collect();
    assert_eq!(picks, expected);
}

// ===========================================================================
// Sync
// ===========================================================================

#[test]
fn sync_reseeds_and_logs_changes() {
    let mut session = twelve_team_session();
    session.draft_player(1).unwrap();
    session.draft_player(2).unwrap();

    let target = session.players()[0].clone();
    let old_adp = target.adp.unwrap();

    let updates = vec![
        PlayerUpdate {
            id: target.id,
            adp: Some(old_adp + 5.0),
            notes: Some("Role expanded in camp".into()),
            ..Default::default()
        },
        // Unknown id: ignored, rest of the sync proceeds.
        PlayerUpdate {
            id: 9999,
            adp: Some(1.0),
            ..Default::default()
        },
    ];
    let changes = session.sync(&updates);

    assert!(changes.iter().any(|c| c.contains("ADP")), "{changes:?}");
    assert!(changes.iter().any(|c| c.contains("Note updated")), "{changes:?}");

    // Full re-seed: progress cleared, merge applied, pipeline re-run.
    assert_eq!(session.current_pick(), 1);
    assert!(session.players().iter().all(|p| !p.drafted));
    let merged = session
        .players()
        .iter()
        .find(|p| p.id == target.id)
        .unwrap();
    assert_eq!(merged.adp, Some(old_adp + 5.0));
    assert!(merged.projection_rank.is_some());
}

// ===========================================================================
// Team analytics
// ===========================================================================

#[test]
fn analytics_over_a_drafted_league() {
    // Draft the entire pool in board order across a 4-team league for a
    // denser analytics sample.
    let mut session4 = DraftSession::new(sample_pool(), ScoringRules::ppr(), 4, 1);
    let ids: Vec<u32> = session4
        .available_players()
        .iter()
        .map(|p| p.id)
        .collect();
    for id in ids {
        session4.draft_player(id).unwrap();
    }

    let analytics = analytics::analyze_team(session4.players(), 1, 4);
    assert_eq!(analytics.advantages.len(), 4);
    for advantage in &analytics.advantages {
        assert!(advantage.rank >= 1 && advantage.rank <= 4);
        assert!(advantage.league_average_ppg >= 0.0);
    }
    assert!(["A", "B", "C", "D"].contains(&analytics.report.grade));
    assert!(!analytics.report.insights.is_empty());

    // The board-order first pick went to team 1, so team 1's roster is
    // non-empty and its archetypes are tallied.
    assert!(!analytics.report.archetype_counts.is_empty());
}

// ===========================================================================
// Shipped dataset round trip
// ===========================================================================

#[test]
fn shipped_config_and_dataset_build_a_working_session() {
    // `cargo test` runs from the crate root, where config/ and data/ live.
    let config = config::load_config_from(Path::new(".")).expect("config should load");
    assert_eq!(config.league.num_teams, 12);

    let loaded = pool::load_all_from_paths(&config.data_paths).expect("dataset should load");
    assert!(!loaded.players.is_empty());
    assert!(!loaded.updates.is_empty());

    // The ADP overlay was applied by name.
    let cmc = loaded
        .players
        .iter()
        .find(|p| p.name == "Christian McCaffrey")
        .expect("dataset player");
    assert_eq!(cmc.adp, Some(1.2));

    let mut session = DraftSession::new(
        loaded.players,
        ScoringRules::ppr(),
        config.league.num_teams,
        config.league.my_slot,
    );

    // Every shipped player survives the pipeline with a rank and grade;
    // K/DST grade N/A.
    for p in session.players() {
        assert!(p.projection_rank.is_some(), "{}", p.name);
        match p.position {
            Position::K | Position::DST => {
                assert_eq!(p.draft_grade.as_deref(), Some("N/A"), "{}", p.name)
            }
            _ => assert_ne!(p.draft_grade.as_deref(), Some("N/A"), "{}", p.name),
        }
    }

    // A rookie with an empty stat line still projects above zero.
    let rookie = session
        .players()
        .iter()
        .find(|p| p.name == "Marvin Harrison Jr.")
        .expect("rookie");
    assert!(rookie.projected_points > 0.0);

    // The shipped updates produce a readable change log and re-seed the
    // session.
    session.draft_player(1).unwrap();
    let changes = session.sync(&loaded.updates);
    assert!(!changes.is_empty());
    assert!(changes.iter().any(|c| c.contains("ADP")), "{changes:?}");
    assert_eq!(session.current_pick(), 1);
    assert!(session.players().iter().all(|p| !p.drafted));
}

// ===========================================================================
// Advisor fallback and normalization
// ===========================================================================

struct OfflineAdvisor;

#[async_trait]
impl Advisor for OfflineAdvisor {
    async fn advise(&self, _request: &AdviceRequest) -> anyhow::Result<DraftAdvice> {
        Err(anyhow::anyhow!("API returned status 429: RESOURCE_EXHAUSTED"))
    }
}

#[tokio::test]
async fn advisor_failure_never_blocks_the_draft() {
    let mut session = twelve_team_session();

    let request = AdviceRequest::from_session(&session);
    assert_eq!(request.current_pick, 1);
    assert_eq!(request.my_next_pick, Some(24));
    assert_eq!(request.teams_picking_before_next.len(), 22);

    let advice = advisor::advise_with_fallback(&OfflineAdvisor, &request).await;

    // Deterministic local fallback: best remaining by board order.
    let best = session.available_players()[0].name.clone();
    assert_eq!(advice.primary.name, best);
    assert!(advice.primary.reasoning.contains("rate limiting"));
    assert_eq!(advice.positional_analysis.total(), 100);
    assert!(advice.alternatives.len() <= 2);

    // The draft proceeds regardless.
    let id = session.available_players()[0].id;
    session.draft_player(id).unwrap();
    assert_eq!(session.current_pick(), 2);
}

#[tokio::test]
async fn exhausted_board_yields_the_sentinel() {
    let mut session = twelve_team_session();
    let ids: Vec<u32> = session.players().iter().map(|p| p.id).collect();
    for id in ids {
        session.draft_player(id).unwrap();
    }

    let request = AdviceRequest::from_session(&session);
    assert!(request.available.is_empty());
    assert_eq!(request.my_next_pick, None);

    let advice = advisor::advise_with_fallback(&OfflineAdvisor, &request).await;
    assert!(advice.is_no_players_left());
    assert_eq!(advice.positional_analysis.total(), 100);
}
