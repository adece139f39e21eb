//! Duration values for the `expireAfter*` and `refreshAfterWrite` options.
//!
//! Two forms are accepted:
//!
//! | Form | Example | Notes |
//! |------|---------|-------|
//! | short | `10d`, `150h`, `10m`, `15s` | base-10 integer followed by one unit letter, case-insensitive |
//! | ISO-8601 | `PT10M`, `P1DT2H`, `PT0.5S` | starts with `P`; days, hours, minutes and (fractional) seconds only |
//!
//! Negative durations are not expressible in either form.

use core::fmt;
use core::time::Duration;

use crate::error::FormatIssue;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Parses a duration value in either the short or the ISO-8601 form.
///
/// # Examples
///
/// ```
/// use cache_spec::duration::parse_duration;
/// use core::time::Duration;
///
/// assert_eq!(parse_duration("150h"), Ok(Duration::from_secs(150 * 3600)));
/// assert_eq!(parse_duration("PT1M30S"), Ok(Duration::from_secs(90)));
/// assert!(parse_duration("10x").is_err());
/// ```
pub fn parse_duration(value: &str) -> Result<Duration, FormatIssue> {
    if value.starts_with(['P', 'p']) {
        return parse_iso(value).ok_or(FormatIssue::InvalidDuration);
    }

    let unit = value.chars().last().ok_or(FormatIssue::MissingValue)?;
    let amount = &value[..value.len() - unit.len_utf8()];
    let factor = match unit.to_ascii_lowercase() {
        'd' => SECS_PER_DAY,
        'h' => SECS_PER_HOUR,
        'm' => SECS_PER_MINUTE,
        's' => 1,
        _ => return Err(FormatIssue::UnknownTimeUnit),
    };
    digits(amount)
        .and_then(|n| n.checked_mul(factor))
        .map(Duration::from_secs)
        .ok_or(FormatIssue::InvalidDuration)
}

/// Parses a run of ASCII digits. Signs, whitespace and empty input are rejected.
pub(crate) fn digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_iso(value: &str) -> Option<Duration> {
    let rest = &value[1..];
    let (date, time) = match rest.find(['T', 't']) {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };

    let mut secs: u64 = 0;
    let mut nanos: u32 = 0;
    let mut seen = false;

    if !date.is_empty() {
        let days = date.strip_suffix(['D', 'd'])?;
        secs = digits(days)?.checked_mul(SECS_PER_DAY)?;
        seen = true;
    }

    if let Some(mut time) = time {
        if time.is_empty() {
            return None;
        }
        for (upper, lower, factor) in [('H', 'h', SECS_PER_HOUR), ('M', 'm', SECS_PER_MINUTE)] {
            if let Some(i) = time.find([upper, lower]) {
                let part = digits(&time[..i])?.checked_mul(factor)?;
                secs = secs.checked_add(part)?;
                time = &time[i + 1..];
                seen = true;
            }
        }
        if !time.is_empty() {
            let amount = time.strip_suffix(['S', 's'])?;
            let (whole, fraction) = match amount.split_once('.') {
                Some((whole, fraction)) => (whole, Some(fraction)),
                None => (amount, None),
            };
            secs = secs.checked_add(digits(whole)?)?;
            if let Some(fraction) = fraction {
                if fraction.len() > 9 {
                    return None;
                }
                let scale = 10u32.pow(9 - fraction.len() as u32);
                nanos = u32::try_from(digits(fraction)?).ok()? * scale;
            }
            seen = true;
        }
    }

    seen.then(|| Duration::new(secs, nanos))
}

/// Displays a duration in the form [`parse_duration`] reads back.
///
/// Whole seconds use the largest unit that divides them exactly; anything with a
/// sub-second part falls back to ISO-8601.
///
/// ```
/// use cache_spec::duration::DisplayDuration;
/// use core::time::Duration;
///
/// assert_eq!(DisplayDuration(Duration::from_secs(3600)).to_string(), "1h");
/// assert_eq!(DisplayDuration(Duration::from_secs(90)).to_string(), "90s");
/// assert_eq!(DisplayDuration(Duration::from_millis(1500)).to_string(), "PT1.5S");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayDuration(pub Duration);

impl fmt::Display for DisplayDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        let nanos = self.0.subsec_nanos();
        if nanos != 0 {
            let mut fraction = nanos;
            let mut width = 9;
            while fraction % 10 == 0 {
                fraction /= 10;
                width -= 1;
            }
            return write!(f, "PT{secs}.{fraction:0width$}S");
        }
        if secs == 0 {
            return f.write_str("0s");
        }
        for (factor, unit) in [(SECS_PER_DAY, 'd'), (SECS_PER_HOUR, 'h'), (SECS_PER_MINUTE, 'm')] {
            if secs % factor == 0 {
                return write!(f, "{}{}", secs / factor, unit);
            }
        }
        write!(f, "{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_short_form_units() {
        assert_eq!(parse_duration("10d"), Ok(Duration::from_secs(10 * 86_400)));
        assert_eq!(parse_duration("150h"), Ok(Duration::from_secs(150 * 3_600)));
        assert_eq!(parse_duration("10m"), Ok(Duration::from_secs(600)));
        assert_eq!(parse_duration("10s"), Ok(Duration::from_secs(10)));
        assert_eq!(parse_duration("0s"), Ok(Duration::ZERO));
    }

    #[test]
    fn test_short_form_units_ignore_case() {
        assert_eq!(parse_duration("2H"), parse_duration("2h"));
        assert_eq!(parse_duration("5M"), Ok(Duration::from_secs(300)));
    }

    #[test]
    fn test_short_form_rejections() {
        assert_eq!(parse_duration("10"), Err(FormatIssue::UnknownTimeUnit));
        assert_eq!(parse_duration("10w"), Err(FormatIssue::UnknownTimeUnit));
        assert_eq!(parse_duration("s"), Err(FormatIssue::InvalidDuration));
        assert_eq!(parse_duration("-5s"), Err(FormatIssue::InvalidDuration));
        assert_eq!(parse_duration("+5s"), Err(FormatIssue::InvalidDuration));
        assert_eq!(parse_duration("1 s"), Err(FormatIssue::InvalidDuration));
        assert_eq!(parse_duration("1.5h"), Err(FormatIssue::InvalidDuration));
        assert_eq!(parse_duration(""), Err(FormatIssue::MissingValue));
    }

    #[test]
    fn test_short_form_overflow() {
        assert_eq!(
            parse_duration("18446744073709551615d"),
            Err(FormatIssue::InvalidDuration)
        );
        assert_eq!(
            parse_duration("18446744073709551616s"),
            Err(FormatIssue::InvalidDuration)
        );
    }

    #[test]
    fn test_iso_form() {
        assert_eq!(parse_duration("PT10M"), Ok(Duration::from_secs(600)));
        assert_eq!(parse_duration("pt10m"), Ok(Duration::from_secs(600)));
        assert_eq!(
            parse_duration("P1DT2H3M4S"),
            Ok(Duration::from_secs(86_400 + 7_200 + 180 + 4))
        );
        assert_eq!(parse_duration("P2D"), Ok(Duration::from_secs(172_800)));
        assert_eq!(parse_duration("PT0.5S"), Ok(Duration::from_millis(500)));
        assert_eq!(
            parse_duration("PT1.000000001S"),
            Ok(Duration::new(1, 1))
        );
    }

    #[test]
    fn test_iso_form_rejections() {
        for bad in ["P", "PT", "P1H", "PT1D", "PT-1S", "PT1M1H", "PT1.S", "PT.5S", "P1W", "PT1.0000000001S"] {
            assert_eq!(parse_duration(bad), Err(FormatIssue::InvalidDuration), "{bad}");
        }
    }

    #[test]
    fn test_display_picks_largest_exact_unit() {
        let show = |secs| DisplayDuration(Duration::from_secs(secs)).to_string();
        assert_eq!(show(0), "0s");
        assert_eq!(show(10 * 86_400), "10d");
        assert_eq!(show(150 * 3_600), "150h");
        assert_eq!(show(60), "1m");
        assert_eq!(show(61), "61s");
    }

    #[test]
    fn test_display_round_trips() {
        for d in [
            Duration::from_secs(86_400 + 1),
            Duration::from_millis(1_250),
            Duration::new(3, 7),
        ] {
            let text = DisplayDuration(d).to_string();
            assert_eq!(parse_duration(&text), Ok(d), "{text}");
        }
    }
}
