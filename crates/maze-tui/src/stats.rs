use maze_core::SessionSummary;

/// Accuracy as a short display string; the zero-move finish has no defined
/// accuracy and shows as a dash.
pub fn format_accuracy(summary: &SessionSummary) -> String {
    match summary.accuracy_percent {
        Some(percent) => format!("{:.0}%", percent),
        None => "--".to_string(),
    }
}

/// One line per statistic, ready for the info panel
pub fn summary_lines(summary: &SessionSummary) -> Vec<String> {
    vec![
        format!("Moves:     {}", summary.moves),
        format!("Jumps:     {}", summary.jumps),
        format!("Shortest:  {} steps", summary.steps_to_solve),
        format!("Accuracy:  {}", format_accuracy(summary)),
    ]
}
