use crate::{
    breakdown::{
        error::{BreakdownError, malformed_response},
        types::{MAX_STEPS, MIN_STEPS},
    },
    tasks::{Breakdown, BreakdownSource, BreakdownStep},
};

// One numbered step per line ending in "-- N min"; minor drift (bullets,
// dashes, "minutes") is tolerated, anything structurally off is a malformed
// response and the caller falls back locally.
pub fn parse_breakdown(text: &str) -> Result<Breakdown, BreakdownError> {
    let steps: Vec<BreakdownStep> = text.lines().filter_map(parse_step_line).collect();

    if !(MIN_STEPS..=MAX_STEPS).contains(&steps.len()) {
        return Err(malformed_response(format!(
            "expected {MIN_STEPS}-{MAX_STEPS} parseable steps, found {}",
            steps.len()
        )));
    }

    let total: u32 = steps.iter().map(|step| step.minutes as u32).sum();
    if total == 0 || total > u16::MAX as u32 {
        return Err(malformed_response(format!(
            "step minutes sum to an unusable total of {total}"
        )));
    }

    Ok(Breakdown {
        steps,
        total_minutes: total as u16,
        adapted: true,
        source: BreakdownSource::Assistant,
        encouragement: None,
    })
}

fn parse_step_line(line: &str) -> Option<BreakdownStep> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    // ASCII lowering keeps byte offsets aligned with the original line.
    let lower = trimmed.to_ascii_lowercase();
    let marker = lower.rfind("min")?;

    let before_marker = trimmed[..marker].trim_end();
    let digits_start = before_marker
        .rfind(|c: char| !c.is_ascii_digit())
        .map(|i| i + c_len(before_marker, i))
        .unwrap_or(0);
    let digits = &before_marker[digits_start..];
    let minutes: u16 = digits.parse().ok()?;
    if minutes == 0 {
        return None;
    }

    let title = strip_leading_marker(before_marker[..digits_start].trim_end_matches([
        ' ', '-', '\u{2013}', '\u{2014}', '(', '[', ':', ',',
    ]));
    if title.is_empty() {
        return None;
    }

    Some(BreakdownStep {
        title: title.to_string(),
        minutes,
    })
}

fn c_len(s: &str, byte_index: usize) -> usize {
    s[byte_index..].chars().next().map_or(1, char::len_utf8)
}

fn strip_leading_marker(line: &str) -> &str {
    let line = line.trim_start();
    let after_digits = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if after_digits.len() < line.len() {
        return after_digits
            .trim_start_matches(['.', ')', ':'])
            .trim_start();
    }
    line.trim_start_matches(['-', '*', '\u{2022}']).trim_start()
}
