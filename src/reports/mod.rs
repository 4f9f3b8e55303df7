use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use paramforge::params::ScoredConfig;

pub fn print_ranking(ranked: &[ScoredConfig], top: usize) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Macro-F1").fg(Color::Cyan),
        Cell::new("Wght-F1"),
        Cell::new("Acc"),
        Cell::new("s/fold"),
        Cell::new("Configuration").add_attribute(Attribute::Bold),
    ]);

    for i in 0..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (rank, s) in ranked.iter().take(top).enumerate() {
        let m = &s.metrics;
        let score_cell = Cell::new(format!("{:.4}", m.macro_f1));
        let score_cell = if rank == 0 {
            score_cell.fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            score_cell
        };

        table.add_row(vec![
            Cell::new(rank + 1),
            score_cell,
            Cell::new(format!("{:.4}", m.weighted_f1)),
            Cell::new(format!("{:.4}", m.accuracy)),
            Cell::new(format!("{:.3}", m.time)),
            Cell::new(&s.code),
        ]);
    }

    println!("\nRanking ({} of {} evaluated)", ranked.len().min(top), ranked.len());
    println!("{}", table);
}

pub fn print_params(name: &str, best: &ScoredConfig) {
    println!("\nConfiguration: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for (param, value) in best.params.iter() {
        table.add_row(vec![
            Cell::new(param).add_attribute(Attribute::Bold),
            Cell::new(value.to_string()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}
