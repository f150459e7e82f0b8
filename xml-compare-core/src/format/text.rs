use crate::compare::{ComparisonOutcome, Difference};

/// Format differences as plain text, one block per difference.
///
/// Recoverable findings are marked `~`, hard ones `!`.
pub fn format_text(differences: &[Difference]) -> String {
    let mut lines = Vec::with_capacity(differences.len() * 3);
    for difference in differences {
        let marker = match difference.outcome {
            ComparisonOutcome::Similar => '~',
            _ => '!',
        };
        let path = difference
            .control_path
            .as_deref()
            .or(difference.test_path.as_deref())
            .unwrap_or("/");
        lines.push(format!("{marker} {path}: {}", difference.kind));
        lines.push(format!(
            "  control: {}",
            value_or_absent(&difference.control_value)
        ));
        lines.push(format!(
            "  test:    {}",
            value_or_absent(&difference.test_value)
        ));
    }
    lines.join("\n")
}

/// Format a simple summary of difference counts by outcome.
pub fn format_summary(differences: &[Difference]) -> String {
    let mut similar = 0;
    let mut different = 0;
    let mut critical = 0;

    for difference in differences {
        match difference.outcome {
            ComparisonOutcome::Similar => similar += 1,
            ComparisonOutcome::Different => different += 1,
            ComparisonOutcome::Critical => critical += 1,
            ComparisonOutcome::Equal => {}
        }
    }

    format!(
        "differences={total} similar={similar} different={different} critical={critical}",
        total = differences.len()
    )
}

fn value_or_absent(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("(absent)")
}
