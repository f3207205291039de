//! Human-readable audience ranges, e.g. "ZŠ 5 – SŠ 2" or "SŠ 1 a starší".

use crate::event::{ContestantBound, Contestants};

pub const ANYONE: &str = "ktokoľvek";
pub const AND_YOUNGER: &str = " a mladší";
pub const AND_OLDER: &str = " a starší";
pub const RANGE_SEPARATOR: &str = " – ";

/// Render the audience range of an event
pub fn format_contestants(contestants: &Contestants) -> String {
    let Contestants { min, max } = contestants;

    match (min.school, max.school) {
        (None, None) => ANYONE.to_string(),
        (None, Some(_)) => format!("{}{}", format_bound(max, None), AND_YOUNGER),
        (Some(_), None) => format!("{}{}", format_bound(min, None), AND_OLDER),
        (Some(_), Some(_)) if min == max => format_bound(min, None),
        (Some(_), Some(_)) => format!(
            "{}{}{}",
            format_bound(min, None),
            RANGE_SEPARATOR,
            format_bound(max, Some(min))
        ),
    }
}

/// Render one bound. The level label is omitted when `relative_to` shares it.
pub fn format_bound(bound: &ContestantBound, relative_to: Option<&ContestantBound>) -> String {
    let same_level = relative_to.is_some_and(|other| other.school == bound.school);

    match (bound.school, bound.year) {
        (Some(_), Some(year)) if same_level => year.to_string(),
        (Some(school), Some(year)) => format!("{} {}", school.label(), year),
        (Some(school), None) => school.label().to_string(),
        (None, Some(year)) => year.to_string(),
        (None, None) => String::new(),
    }
}
