use std::fmt::Write;
use upskill_challenges::allocation::{Candidate, Instance, Selection};

const WIDTH: usize = 70;

/// Candidates in ascending order of value. Equal values keep their input order.
pub fn by_value(candidates: &[Candidate]) -> Vec<&Candidate> {
    let mut ordered: Vec<&Candidate> = candidates.iter().collect();
    ordered.sort_by_key(|candidate| candidate.value);
    ordered
}

/// Heading plus table for a preview of `rows` out of `total` candidates.
pub fn render_preview(heading: &str, rows: &[&Candidate], total: usize) -> String {
    format!(
        "--- {} ({} of {}) ---\n{}",
        heading,
        rows.len(),
        total,
        render_table(rows)
    )
}

pub fn render_table(candidates: &[&Candidate]) -> String {
    let ids: Vec<String> = candidates.iter().map(|c| c.id.to_string()).collect();
    let id_width = ids.iter().map(String::len).max().unwrap_or(0).max(2);

    let mut table = String::new();
    let _ = writeln!(table, "{:<id_width$}  {:>6}  {:>6}", "id", "cost", "value");
    for (id, candidate) in ids.iter().zip(candidates) {
        let _ = writeln!(
            table,
            "{:<id_width$}  {:>6}  {:>6}",
            id, candidate.cost, candidate.value
        );
    }
    table
}

/// Text report for `selection`; selected candidates are listed in input order.
pub fn render(instance: &Instance, selection: &Selection) -> String {
    let selected: Vec<&Candidate> = instance
        .candidates
        .iter()
        .filter(|candidate| selection.selected.contains(&candidate.id))
        .collect();
    let hours: i128 = selected.iter().map(|c| c.cost as i128).sum();

    let double_rule = "=".repeat(WIDTH);
    let rule = "-".repeat(WIDTH);

    let mut report = String::new();
    let _ = writeln!(report, "{}", double_rule);
    let _ = writeln!(report, "    TRAINING ALLOCATION REPORT");
    let _ = writeln!(report, "{}", double_rule);
    let _ = writeln!(report, "Training budget: {} hours", instance.capacity);
    let _ = writeln!(report, "{}", rule);
    let _ = writeln!(report, "Optimization results:");
    let _ = writeln!(report, "  > Maximum strategic value: {}", selection.best_value);
    let _ = writeln!(report, "  > Hours allocated: {} / {}", hours, instance.capacity);
    let _ = writeln!(report, "  > Candidates selected: {}", selected.len());
    let _ = writeln!(report, "{}", rule);
    let _ = writeln!(report, "Selected candidates:");
    report.push_str(&render_table(&selected));
    let _ = writeln!(report, "{}", double_rule);
    report
}
