/*!
 * Tests for time tag encoding and decoding
 */

use lrcproc::time_tag::{format_time_tag, parse_time_tag, split_time_tag};

/// Test the basic tag layout
#[test]
fn test_format_time_tag_withTwoDecimals_shouldPadMinutesAndSeconds() {
    assert_eq!(format_time_tag(1.5, 2, 0, true), "[00:01.50]");
    assert_eq!(format_time_tag(125.25, 3, 0, false), "02:05.250");
}

/// Test that minutes grow past two digits instead of wrapping
#[test]
fn test_format_time_tag_withHundredMinutes_shouldUseThreeDigits() {
    assert_eq!(format_time_tag(6000.0, 3, 0, true), "[100:00.000]");
}

/// Test that the fraction is rounded, not truncated
#[test]
fn test_format_time_tag_withRoundingFraction_shouldRoundToNearest() {
    assert_eq!(format_time_tag(3.256, 2, 0, true), "[00:03.26]");
    assert_eq!(format_time_tag(3.254, 2, 0, true), "[00:03.25]");
    assert_eq!(format_time_tag(9.96, 1, 0, true), "[00:10.0]");
}

/// Test zero precision output
#[test]
fn test_format_time_tag_withZeroDecimals_shouldOmitDot() {
    assert_eq!(format_time_tag(61.6, 0, 0, true), "[01:02]");
}

/// Test that a positive offset moves tags earlier and a negative one later
#[test]
fn test_format_time_tag_withOffset_shouldShiftTime() {
    assert_eq!(format_time_tag(10.0, 3, 500, true), "[00:09.500]");
    assert_eq!(format_time_tag(10.0, 3, -1500, true), "[00:11.500]");
}

/// Test that an offset larger than the time clamps at zero
#[test]
fn test_format_time_tag_withOffsetPastZero_shouldClampToZero() {
    assert_eq!(format_time_tag(0.2, 3, 1000, true), "[00:00.000]");
    assert_eq!(format_time_tag(61.0, 2, 120_000, false), "00:00.00");
}

/// Test decoding complete tags
#[test]
fn test_parse_time_tag_withValidTags_shouldReturnSeconds() {
    assert_eq!(parse_time_tag("[01:02.5]"), Some(62.5));
    assert_eq!(parse_time_tag("01:02.5"), Some(62.5));
    assert_eq!(parse_time_tag(" [1:2] "), Some(62.0));
    assert_eq!(parse_time_tag("[00:03:25]"), Some(3.25));
}

/// Test that anything beyond a single tag is rejected
#[test]
fn test_parse_time_tag_withTrailingText_shouldReturnNone() {
    assert_eq!(parse_time_tag("[01:02.5]x"), None);
    assert_eq!(parse_time_tag("01:02]x"), None);
    assert_eq!(parse_time_tag("abc"), None);
    assert_eq!(parse_time_tag(""), None);
}

/// Test that split keeps the text after the first tag
#[test]
fn test_split_time_tag_withStackedTags_shouldConsumeOnlyFirst() {
    let (time, rest) = split_time_tag("[00:01.00][00:02.00]la").unwrap();
    assert_eq!(time, 1.0);
    assert_eq!(rest, "[00:02.00]la");
}

/// Test encode/decode stability for times below 100 minutes
#[test]
fn test_time_round_trip_withCommonPrecisions_shouldStayWithinResolution() {
    for decimal_places in 1..=3u32 {
        let tolerance = 10f64.powi(-(decimal_places as i32)) + 1e-9;
        for i in 0..4379 {
            let time = i as f64 * 1.37 + 0.0042;
            let tag = format_time_tag(time, decimal_places, 0, true);
            let decoded = parse_time_tag(&tag)
                .unwrap_or_else(|| panic!("tag {} should decode", tag));
            assert!(
                (decoded - time).abs() <= tolerance,
                "{} decoded to {} from {}", time, decoded, tag
            );
        }
    }
}

/// Test that a decoded tag formats back to the same text
#[test]
fn test_time_round_trip_withThreeDecimalTags_shouldReproduceTag() {
    for tag in ["[00:00.000]", "[00:59.999]", "[03:07.120]", "[99:59.001]"] {
        let time = parse_time_tag(tag).unwrap();
        assert_eq!(format_time_tag(time, 3, 0, true), tag);
    }
}
