//! Build numbers from before the `baseline.build` scheme.
//!
//! Old IDE builds were published as a single integer, such as `7512`. Small integers are really
//! a baseline on its own, larger ones are a build counter that maps to the baseline of the
//! release it shipped in.

use std::num::ParseIntError;

/// Bare integers below this value are a baseline with build `0`.
const BASELINE_THRESHOLD: u64 = 1000;

/// Historic build counter cutovers, as `(first build, baseline)`, newest first.
const HISTORIC_BASELINES: &[(u64, u64)] = &[
    (10000, 88),
    (9500, 85),
    (9100, 81),
    (8000, 80),
    (7500, 75),
    (7200, 72),
    (6900, 69),
    (6500, 65),
    (6000, 60),
    (5000, 55),
    (4000, 50),
];

/// Baseline of anything older than the oldest cutover.
const OLDEST_BASELINE: u64 = 40;

/// If `version` is a bare non-negative integer, return the canonical `baseline.build` form.
///
/// Returns `None` for anything else (including the empty string), which is then parsed as a
/// regular build number.
pub(crate) fn normalize(version: &str) -> Option<Result<String, ParseIntError>> {
    if version.is_empty() || !version.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let number = match version.parse::<u64>() {
        Ok(number) => number,
        Err(err) => return Some(Err(err)),
    };
    let canonical = if number < BASELINE_THRESHOLD {
        format!("{number}.0")
    } else {
        format!("{}.{number}", historic_baseline(number))
    };
    #[cfg(feature = "tracing")]
    tracing::debug!("Interpreting historic build number `{version}` as `{canonical}`");
    Some(Ok(canonical))
}

/// Look up the baseline of the release a historic build counter belongs to.
fn historic_baseline(build: u64) -> u64 {
    HISTORIC_BASELINES
        .iter()
        .find(|(first, _)| build >= *first)
        .map_or(OLDEST_BASELINE, |(_, baseline)| *baseline)
}

#[cfg(test)]
mod tests {
    use super::{historic_baseline, normalize};

    #[test]
    fn baselines() {
        assert_eq!(normalize("0"), Some(Ok("0.0".to_string())));
        assert_eq!(normalize("133"), Some(Ok("133.0".to_string())));
        assert_eq!(normalize("999"), Some(Ok("999.0".to_string())));
    }

    #[test]
    fn historic_builds() {
        assert_eq!(normalize("7512"), Some(Ok("75.7512".to_string())));
        assert_eq!(normalize("8987"), Some(Ok("80.8987".to_string())));
        assert_eq!(normalize("9200"), Some(Ok("81.9200".to_string())));
        assert_eq!(normalize("7300"), Some(Ok("72.7300".to_string())));
        assert_eq!(normalize("10500"), Some(Ok("88.10500".to_string())));
    }

    #[test]
    fn cutovers() {
        let cutovers = [
            (10000, 88, 85),
            (9500, 85, 81),
            (9100, 81, 80),
            (8000, 80, 75),
            (7500, 75, 72),
            (7200, 72, 69),
            (6900, 69, 65),
            (6500, 65, 60),
            (6000, 60, 55),
            (5000, 55, 50),
            (4000, 50, 40),
        ];
        for (first, baseline, previous) in cutovers {
            assert_eq!(historic_baseline(first), baseline, "{first}");
            assert_eq!(historic_baseline(first - 1), previous, "{}", first - 1);
        }
        assert_eq!(historic_baseline(1000), 40);
        assert_eq!(historic_baseline(u64::MAX - 1), 88);
    }

    #[test]
    fn not_bare_integers() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("133.0"), None);
        assert_eq!(normalize("IU-133"), None);
        assert_eq!(normalize("SNAPSHOT"), None);
        assert_eq!(normalize("+133"), None);
    }

    #[test]
    fn overflow() {
        assert!(matches!(normalize("99999999999999999999999"), Some(Err(_))));
    }
}
