/// Output formatting: terminal tables and JSON.
use heatsheet_core::{Competitor, FinalLaneAssignment, Round, Standing};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize)]
struct JsonPlan<'a> {
    seed: &'a str,
    rounds: Vec<JsonRound>,
}

#[derive(Serialize)]
struct JsonRound {
    round_no: usize,
    phase: String,
    heats: Vec<JsonHeat>,
}

#[derive(Serialize)]
struct JsonHeat {
    heat_no: usize,
    entries: Vec<JsonPlanEntry>,
}

#[derive(Serialize)]
struct JsonPlanEntry {
    lane: u8,
    competitor_id: i64,
    plate: u32,
    name: String,
}

#[derive(Serialize)]
struct JsonStanding {
    rank: usize,
    competitor_id: i64,
    plate: u32,
    name: String,
    round_points: Vec<u32>,
    total_points: u32,
    best_position: Option<u8>,
    best_time_ms: Option<u64>,
    completed_rounds: usize,
    qualifies_for_final: bool,
}

#[derive(Serialize)]
struct JsonFinalLane {
    lane: u8,
    competitor_id: i64,
    plate: u32,
    name: String,
    choice_order: Option<usize>,
}

fn by_id(roster: &[Competitor]) -> HashMap<i64, &Competitor> {
    roster.iter().map(|c| (c.id, c)).collect()
}

fn full_name(competitor: Option<&&Competitor>) -> String {
    match competitor {
        Some(c) => format!("{} {}", c.first_name, c.last_name),
        None => "?".to_string(),
    }
}

fn plate_of(competitor: Option<&&Competitor>) -> u32 {
    competitor.map(|c| c.plate).unwrap_or(0)
}

fn format_time(ms: u64) -> String {
    format!("{}.{:03}s", ms / 1000, ms % 1000)
}

/// Print the built plan, round by round, entries in lane order.
pub fn print_plan_table(rounds: &[Round], roster: &[Competitor], seed: &str) {
    let riders = by_id(roster);

    let name_width = roster
        .iter()
        .map(|c| c.first_name.len() + c.last_name.len() + 1)
        .max()
        .unwrap_or(5)
        .max(5); // at least "Rider"

    for round in rounds {
        println!("Round {} ({})", round.order_no, round.phase);
        for heat in &round.heats {
            println!("  Heat {}", heat.heat_no);
            println!("    Lane | Plate | {:<name_width$}", "Rider");
            let mut entries = heat.entries.clone();
            entries.sort_by_key(|e| e.lane);
            for entry in &entries {
                let rider = riders.get(&entry.competitor_id);
                println!(
                    "    {:>4} | {:>5} | {:<name_width$}",
                    entry.lane,
                    plate_of(rider),
                    full_name(rider),
                );
            }
        }
        println!();
    }
    println!("Seed: \"{seed}\"");
}

pub fn print_plan_json(rounds: &[Round], roster: &[Competitor], seed: &str) {
    let riders = by_id(roster);
    let json_rounds = rounds
        .iter()
        .map(|round| JsonRound {
            round_no: round.order_no,
            phase: round.phase.to_string(),
            heats: round
                .heats
                .iter()
                .map(|heat| {
                    let mut entries = heat.entries.clone();
                    entries.sort_by_key(|e| e.lane);
                    JsonHeat {
                        heat_no: heat.heat_no,
                        entries: entries
                            .iter()
                            .map(|e| {
                                let rider = riders.get(&e.competitor_id);
                                JsonPlanEntry {
                                    lane: e.lane,
                                    competitor_id: e.competitor_id,
                                    plate: plate_of(rider),
                                    name: full_name(rider),
                                }
                            })
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect();

    let plan = JsonPlan {
        seed,
        rounds: json_rounds,
    };
    println!("{}", serde_json::to_string_pretty(&plan).unwrap());
}

/// Print the standings as a formatted terminal table.
pub fn print_standings_table(standings: &[Standing], roster: &[Competitor]) {
    let riders = by_id(roster);

    let name_width = standings
        .iter()
        .map(|s| full_name(riders.get(&s.competitor_id)).len())
        .max()
        .unwrap_or(5)
        .max(5);

    println!(
        " # | Plate | {:<name_width$} | Rounds      | Total | Best | Best time | Final",
        "Rider"
    );
    println!(
        "---|-------|-{}-|-------------|-------|------|-----------|------",
        "-".repeat(name_width)
    );

    for s in standings {
        let rider = riders.get(&s.competitor_id);
        let per_round: Vec<String> = s.rounds.iter().map(|r| r.points.to_string()).collect();
        let best_pos = s
            .best_position
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        let best_time = s
            .best_time_ms
            .map(format_time)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>2} | {:>5} | {:<name_width$} | {:<11} | {:>5} | {:>4} | {:>9} | {}",
            s.rank,
            plate_of(rider),
            full_name(rider),
            per_round.join("/"),
            s.total_points,
            best_pos,
            best_time,
            if s.qualifies_for_final { "Q" } else { "" },
        );
    }

    let qualified = standings.iter().filter(|s| s.qualifies_for_final).count();
    println!(
        "\n{} riders ranked, {} qualify for the final",
        standings.len(),
        qualified,
    );
}

pub fn print_standings_json(standings: &[Standing], roster: &[Competitor]) {
    let riders = by_id(roster);
    let items: Vec<JsonStanding> = standings
        .iter()
        .map(|s| {
            let rider = riders.get(&s.competitor_id);
            JsonStanding {
                rank: s.rank,
                competitor_id: s.competitor_id,
                plate: plate_of(rider),
                name: full_name(rider),
                round_points: s.rounds.iter().map(|r| r.points).collect(),
                total_points: s.total_points,
                best_position: s.best_position,
                best_time_ms: s.best_time_ms,
                completed_rounds: s.completed_rounds,
                qualifies_for_final: s.qualifies_for_final,
            }
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&items).unwrap());
}

/// Print the final lane assignment, in lane order.
pub fn print_final_table(lanes: &[FinalLaneAssignment], roster: &[Competitor]) {
    let riders = by_id(roster);

    let name_width = lanes
        .iter()
        .map(|a| full_name(riders.get(&a.competitor_id)).len())
        .max()
        .unwrap_or(5)
        .max(5);

    println!("Lane | Plate | {:<name_width$} | Choice", "Rider");
    let mut ordered = lanes.to_vec();
    ordered.sort_by_key(|a| a.lane);
    for assignment in &ordered {
        let rider = riders.get(&assignment.competitor_id);
        let choice = assignment
            .choice_order
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>4} | {:>5} | {:<name_width$} | {:>6}",
            assignment.lane,
            plate_of(rider),
            full_name(rider),
            choice,
        );
    }
}

pub fn print_final_json(lanes: &[FinalLaneAssignment], roster: &[Competitor]) {
    let riders = by_id(roster);
    let mut ordered = lanes.to_vec();
    ordered.sort_by_key(|a| a.lane);
    let items: Vec<JsonFinalLane> = ordered
        .iter()
        .map(|a| {
            let rider = riders.get(&a.competitor_id);
            JsonFinalLane {
                lane: a.lane,
                competitor_id: a.competitor_id,
                plate: plate_of(rider),
                name: full_name(rider),
                choice_order: a.choice_order,
            }
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&items).unwrap());
}
