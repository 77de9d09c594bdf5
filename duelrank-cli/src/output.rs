/// Output formatting: terminal table and JSON.
use duelrank_core::{RatingTable, TournamentSummary};
use serde::Serialize;

#[derive(Serialize)]
struct JsonRankedVariant {
    rank: usize,
    variant: String,
    rating: f64,
    games: usize,
}

#[derive(Serialize)]
struct JsonOutput {
    variants: Vec<JsonRankedVariant>,
    matches: usize,
    indeterminate: usize,
}

/// Print final standings as a formatted terminal table.
pub fn print_table(table: &RatingTable, summary: TournamentSummary) {
    let standings = table.standings();

    let name_width = standings
        .iter()
        .map(|(key, _)| key.as_str().len())
        .max()
        .unwrap_or(7)
        .max(7); // at least "Variant"

    println!(" # | {:<name_width$} |  Rating | Matches", "Variant");
    println!("---|-{}-|---------|--------", "-".repeat(name_width));

    for (i, (key, rating)) in standings.iter().enumerate() {
        println!(
            "{:>2} | {:<name_width$} | {:>7.1} | {:>7}",
            i + 1,
            key.as_str(),
            rating.rating,
            rating.games,
        );
    }

    println!(
        "\n{} variants rated across {} matches ({} indeterminate)",
        standings.len(),
        summary.matches,
        summary.indeterminate,
    );
}

/// Print final standings as JSON.
pub fn print_json(table: &RatingTable, summary: TournamentSummary) {
    let variants: Vec<JsonRankedVariant> = table
        .standings()
        .iter()
        .enumerate()
        .map(|(i, (key, rating))| JsonRankedVariant {
            rank: i + 1,
            variant: key.as_str().to_string(),
            rating: rating.rating,
            games: rating.games,
        })
        .collect();

    let output = JsonOutput {
        variants,
        matches: summary.matches,
        indeterminate: summary.indeterminate,
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
