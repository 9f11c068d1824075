use once_cell::sync::Lazy;
use regex::Regex;

// @module: LRC time tag encoding and decoding

// @const: Time tag at the start of a line, e.g. [01:23.45], [1:2:345] or [ 12:05 ]
static TIME_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\s*([0-9]{1,3}):([0-9]{1,2}(?:[:.][0-9]{1,3})?)\s*\]").unwrap()
});

/// Highest precision computed exactly; further digits are rendered as zeros
pub const MAX_DECIMAL_PLACES: u32 = 9;

/// Highest precision the time tag pattern reads back
pub const MAX_PARSEABLE_DECIMAL_PLACES: u32 = 3;

/// Split a leading time tag off a line.
///
/// Returns the tag's time in seconds and the text following the closing
/// bracket. Only the first tag is consumed, so `[00:01.00][00:02.00]x`
/// yields `1.0` and `"[00:02.00]x"`.
pub fn split_time_tag(line: &str) -> Option<(f64, &str)> {
    let caps = TIME_TAG_REGEX.captures(line)?;
    let whole = caps.get(0)?;

    let minutes: u32 = caps.get(1)
        .map_or(0, |m| m.as_str().parse().unwrap_or(0));
    // "mm:ss:xx" is a common variant, the second colon acts as decimal point
    let seconds: f64 = caps.get(2)
        .map_or(0.0, |m| m.as_str().replace(':', ".").parse().unwrap_or(0.0));

    Some((f64::from(minutes) * 60.0 + seconds, &line[whole.end()..]))
}

/// Parse a complete time tag, with or without brackets, into seconds
pub fn parse_time_tag(tag: &str) -> Option<f64> {
    let tag = tag.trim();
    let bracketed;
    let tag = if tag.starts_with('[') {
        tag
    } else {
        bracketed = format!("[{}]", tag);
        bracketed.as_str()
    };

    let (time, rest) = split_time_tag(tag)?;
    rest.is_empty().then_some(time)
}

/// Format a time in seconds as an LRC time tag.
///
/// The offset is subtracted from the time before formatting (a positive
/// offset makes lyrics appear earlier). Results below zero clamp to
/// `00:00`. The time is rounded to `decimal_places` digits before it is
/// split into minutes and seconds, so `59.9996` at three places becomes
/// `01:00.000`. With zero decimal places the dot is omitted.
pub fn format_time_tag(time: f64, decimal_places: u32, offset_ms: i64, with_brackets: bool) -> String {
    let mut adjustment = -(offset_ms as f64) / 1000.0;
    if !adjustment.is_finite() {
        adjustment = 0.0;
    }

    let adjusted = time + adjustment;
    let adjusted = if adjusted.is_finite() && adjusted > 0.0 { adjusted } else { 0.0 };

    let precision = decimal_places.min(MAX_DECIMAL_PLACES);
    let scale = 10u64.pow(precision);
    // `as` saturates on overflow
    let units = (adjusted * scale as f64).round() as u64;

    let whole_seconds = units / scale;
    let minutes = whole_seconds / 60;
    let seconds = whole_seconds % 60;

    let body = if decimal_places == 0 {
        format!("{:02}:{:02}", minutes, seconds)
    } else {
        format!(
            "{:02}:{:02}.{:0width$}{}",
            minutes,
            seconds,
            units % scale,
            "0".repeat((decimal_places - precision) as usize),
            width = precision as usize
        )
    };

    if with_brackets {
        format!("[{}]", body)
    } else {
        body
    }
}
