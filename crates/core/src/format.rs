use crate::types::SummaryResult;

/// Format seconds as MM:SS, or HH:MM:SS once an hour is reached.
/// Invalid input (NaN, negative, infinite) renders as "00:00".
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }

    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Render the summaries of one video as markdown.
pub fn format_summaries_readable(
    title: Option<&str>,
    full_summary: &str,
    summaries: &[SummaryResult],
) -> String {
    let mut output = String::new();

    if let Some(title) = title {
        output.push_str(&format!("# Video: {}\n\n", title));
    }

    output.push_str("## Full Video Summary\n\n");
    output.push_str(full_summary);
    output.push_str("\n\n");

    if !summaries.is_empty() {
        output.push_str("## Segment Summaries\n\n");
        for segment in summaries {
            output.push_str(&format!("### {}\n\n", segment.time));
            output.push_str(&format!("{}\n\n", segment.summary));
        }
    }

    output
}
