//! Repeated-upgrade notation ("Enhanced Turret x2") used by displays and the
//! squadron rarity check. These helpers work on plain text and never consult
//! the catalog.
use serde::{Deserialize, Serialize};
use std::iter;

/// An upgrade name with its repeat count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitUpgrade {
    pub upgrade: String,
    pub count: usize,
}

/// Merge consecutive repeats into a single "Name xN" entry.
///
/// A name merges into the previous output entry when that entry starts with
/// it, so only back-to-back repeats coalesce: `A, B, A` stays as is.
#[must_use]
pub fn coalesce_duplicate_upgrades<S: AsRef<str>>(upgrades: &[S]) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(upgrades.len());
    for name in upgrades.iter().map(AsRef::as_ref) {
        match result.last_mut() {
            Some(last) if last.starts_with(name) => {
                let count = split_duplicate_upgrade(last).count;
                *last = format!("{name} x{}", count + 1);
            }
            _ => result.push(name.to_string()),
        }
    }
    result
}

/// Inverse of [`coalesce_duplicate_upgrades`]: "Name xN" becomes N copies.
#[must_use]
pub fn expand_duplicate_upgrades<S: AsRef<str>>(upgrades: &[S]) -> Vec<String> {
    upgrades
        .iter()
        .flat_map(|entry| {
            let SplitUpgrade { upgrade, count } = split_duplicate_upgrade(entry.as_ref());
            iter::repeat_n(upgrade, count)
        })
        .collect()
}

/// Split "Name xN" into its name and count. Text without a count after its
/// last `x`/`X` is a single copy of itself. Whitespace and a `+` may sit
/// between the `x` and the digits; counts saturate at `u16::MAX`.
#[must_use]
pub fn split_duplicate_upgrade(text: &str) -> SplitUpgrade {
    let single = || SplitUpgrade {
        upgrade: text.to_string(),
        count: 1,
    };

    let Some(idx) = text.rfind(['x', 'X']) else {
        return single();
    };
    let after = text[idx + 1..].trim_start();
    let after = after.strip_prefix('+').unwrap_or(after);
    let digits: String = after.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return single();
    }
    let count = digits
        .parse::<u16>()
        .map_or(usize::from(u16::MAX), usize::from);

    // drop the separator in front of the "x"
    let mut upgrade = text[..idx].to_string();
    upgrade.pop();
    SplitUpgrade { upgrade, count }
}

/// Join upgrade names with ", ", replacing the spaces inside each name so a
/// renderer can keep names on one line (e.g. with `'\u{a0}'`).
#[must_use]
pub fn format_upgrades<S: AsRef<str>>(upgrades: &[S], space_replacement: &str) -> String {
    upgrades
        .iter()
        .map(|u| u.as_ref().replace(' ', space_replacement))
        .collect::<Vec<_>>()
        .join(", ")
}
