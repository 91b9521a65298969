use comfy_table::{Table, ContentArrangement, presets::UTF8_FULL, Cell, Color};

use crate::import::ImportResult;
use loto_analysis::config::AnalysisConfig;
use loto_analysis::passes::PassKind;
use loto_analysis::report::{PassResult, SuggestionReport};
use loto_db::models::Draw;

fn format_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Numéros", "Chance"]);

    for draw in draws {
        let main: Vec<u32> = draw.sorted_main_numbers().iter().map(|&n| n as u32).collect();
        table.add_row(vec![
            draw.date.format("%d/%m/%Y").to_string(),
            format_numbers(&main),
            format!("{:2}", draw.lucky_number),
        ]);
    }

    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

fn display_pass(pass: &PassResult, top: usize) {
    println!(
        "\n── {} (poids {}) ──",
        pass.kind.label(),
        pass.kind.weight()
    );

    if pass.features.is_empty() {
        println!("  (aucune donnée)");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rang", "Clé", "Score"]);

    for (i, scored) in pass.features.iter().take(top).enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            scored.feature.to_string(),
            scored.score.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_analysis(passes: &[PassResult], top: usize, draw_count: usize) {
    println!("\n📊 Analyses sur {} tirages\n", draw_count);
    for pass in passes {
        display_pass(pass, top);
    }
}

pub fn display_report(report: &SuggestionReport, config: &AnalysisConfig) {
    println!("\n🎲 Suggestion\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Numéro", "Fréquence", "Tirage pondéré"]);

    let frequencies = report.pass(PassKind::Frequency).unwrap_or_default();

    for (i, &n) in report.suggested_numbers.iter().enumerate() {
        let frequency = frequencies
            .iter()
            .find(|f| f.feature.as_number() == Some(n))
            .map(|f| f.score.to_string())
            .unwrap_or_else(|| "—".to_string());
        let bonus = if report.weighted_random_numbers.contains(&n) {
            Cell::new(format!("+{}", config.random_bonus)).fg(Color::Green)
        } else {
            Cell::new("—")
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{:2}", n)),
            Cell::new(frequency),
            bonus,
        ]);
    }
    println!("{table}");

    println!("Tirage pondéré : {}", format_numbers(&report.weighted_random_numbers));

    if !report.diagnostics.is_empty() {
        println!("\n⚠ {} contribution(s) ignorée(s) :", report.diagnostics.len());
        for diag in &report.diagnostics {
            println!("  {}", diag);
        }
    }
}
