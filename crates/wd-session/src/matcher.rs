//! Capability matching.
//!
//! Each registered descriptor earns one point per criterion it satisfies:
//! browser name, version, platform and JavaScript support. The highest score
//! wins. Ties go to the descriptor registered first, and a best score of
//! zero means nothing matched.

use wd_protocol::{Capabilities, Platform};

/// Number of criteria `registered` satisfies for `desired`.
pub fn score(registered: &Capabilities, desired: &Capabilities) -> u32 {
    let criteria = [
        text_matches(registered.browser_name.as_deref(), desired.browser_name.as_deref()),
        text_matches(registered.version.as_deref(), desired.version.as_deref()),
        platform_matches(registered.platform, desired.platform),
        javascript_matches(registered, desired),
    ];
    criteria.into_iter().filter(|matched| *matched).count() as u32
}

/// Index of the best candidate for `desired`, or `None` when nothing scores.
pub fn best_match<'a, I>(candidates: I, desired: &Capabilities) -> Option<usize>
where
    I: IntoIterator<Item = &'a Capabilities>,
{
    let mut best: Option<(usize, u32)> = None;
    for (index, registered) in candidates.into_iter().enumerate() {
        let points = score(registered, desired);
        // Strictly greater: the earliest registration keeps a tie.
        if points > best.map_or(0, |(_, top)| top) {
            best = Some((index, points));
        }
    }
    best.map(|(index, _)| index)
}

fn text_matches(registered: Option<&str>, desired: Option<&str>) -> bool {
    match (registered, desired) {
        (Some(r), Some(d)) => r.eq_ignore_ascii_case(d),
        _ => false,
    }
}

fn platform_matches(registered: Option<Platform>, desired: Option<Platform>) -> bool {
    match (registered, desired) {
        (None, _) | (_, None) => true,
        (Some(Platform::Any), _) | (_, Some(Platform::Any)) => true,
        (Some(r), Some(d)) => r.is_platform_type(d),
    }
}

fn javascript_matches(registered: &Capabilities, desired: &Capabilities) -> bool {
    desired
        .javascript_enabled
        .is_none_or(|wanted| wanted == registered.is_javascript_enabled())
}
