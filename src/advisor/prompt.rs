// Prompt templates for the draft advisor.
//
// Constructs compact, structured prompts for the generative-language API.
// Each prompt includes pre-computed numbers so the model focuses on
// trade-offs and roster context rather than arithmetic.

use crate::advisor::AdviceRequest;

// ---------------------------------------------------------------------------
// System prompt
// ---------------------------------------------------------------------------

/// Static system prompt for all advice calls.
pub fn system_prompt(team_count: u32, my_slot: u32) -> String {
    format!(
        "You are an expert fantasy football draft analyst for a {team_count}-team \
         full-PPR snake draft. I draft from slot {my_slot}.\n\
         \n\
         For each pick you will provide, as JSON matching the schema I give you:\n\
         1. primary: the single best player to draft right now, with a compelling \
         2-sentence reason covering value, strategy, and risk\n\
         2. alternatives: up to two other strong options, 1-sentence reason each\n\
         3. predictions: three players likely to be gone before my next pick (names only)\n\
         4. positionalAnalysis: integer percentages for QB/RB/WR/TE summing to 100\n\
         5. strategicNarrative: one short paragraph on how this pick shapes my draft\n\
         \n\
         Be concise and direct. Use the pre-computed numbers I provide \u{2014} do NOT \
         redo arithmetic."
    )
}

// ---------------------------------------------------------------------------
// Advice prompt
// ---------------------------------------------------------------------------

/// Build the user prompt for one advice request.
///
/// Lists at most `max_candidates` available players; the list arrives
/// best-first so truncation keeps the most relevant names.
pub fn build_advice_prompt(request: &AdviceRequest, max_candidates: usize) -> String {
    let mut prompt = String::with_capacity(2048);

    // Section 1: PICK CONTEXT
    let next_pick = match request.my_next_pick {
        Some(pick) => pick.to_string(),
        None => "none remaining".to_string(),
    };
    prompt.push_str(&format!(
        "## PICK CONTEXT\n\
         It is my turn at pick #{}. My next pick: #{}.\n",
        request.current_pick, next_pick,
    ));
    if !request.teams_picking_before_next.is_empty() {
        let teams = request
            .teams_picking_before_next
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!("Teams picking before my next turn: {teams}.\n"));
    }
    prompt.push('\n');

    // Section 2: MY ROSTER
    prompt.push_str("## MY ROSTER\n");
    if request.my_roster.is_empty() {
        prompt.push_str("No players drafted yet.\n");
    } else {
        for player in &request.my_roster {
            prompt.push_str(&format!("  {} ({})\n", player.name, player.position));
        }
    }
    prompt.push('\n');

    // Section 3: TOP AVAILABLE
    prompt.push_str(&format!(
        "## TOP {} AVAILABLE (name, position, injury risk, projected PPG, grade)\n",
        request.available.len().min(max_candidates),
    ));
    for player in request.available.iter().take(max_candidates) {
        prompt.push_str(&format!(
            "  {} ({}, {} risk, {:.1} PPG, {})\n",
            player.name,
            player.position,
            player.injury_risk.label(),
            player.projected_ppg,
            player.draft_grade.as_deref().unwrap_or("N/A"),
        ));
    }
    prompt.push('\n');

    // Section 4: Closing instructions
    prompt.push_str(
        "## WHAT SHOULD I DO?\n\
         Respond with a single JSON object: {\"primary\": {\"name\", \"reasoning\"}, \
         \"alternatives\": [{\"name\", \"reasoning\"}], \"predictions\": [names], \
         \"positionalAnalysis\": {\"QB\", \"RB\", \"WR\", \"TE\"}, \
         \"strategicNarrative\": string}. No prose outside the JSON.",
    );

    prompt
}
