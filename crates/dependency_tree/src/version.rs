//! Ordering of artifact version strings.

use std::cmp::Ordering;

/// Compares two version strings.
///
/// Versions are split on `.` and `-`. Numeric segments compare numerically,
/// other segments case-insensitively. A missing segment counts as `0`
/// against a number and wins against a qualifier, so `1.0` sorts after
/// `1.0-SNAPSHOT` and equal to `1.0.0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
	let mut left = segments(a);
	let mut right = segments(b);
	loop {
		let ordering = match (left.next(), right.next()) {
			(None, None) => return Ordering::Equal,
			(Some(l), Some(r)) => compare_segment(l, r),
			(Some(l), None) => compare_missing(l).reverse(),
			(None, Some(r)) => compare_missing(r),
		};
		if ordering != Ordering::Equal {
			return ordering;
		}
	}
}

fn segments(version: &str) -> impl Iterator<Item = &str> {
	version.split(['.', '-']).filter(|segment| !segment.is_empty())
}

fn compare_segment(l: &str, r: &str) -> Ordering {
	match (l.parse::<u64>(), r.parse::<u64>()) {
		(Ok(l), Ok(r)) => l.cmp(&r),
		(Ok(_), Err(_)) => Ordering::Greater,
		(Err(_), Ok(_)) => Ordering::Less,
		(Err(_), Err(_)) => l.to_ascii_lowercase().cmp(&r.to_ascii_lowercase()),
	}
}

/// Ordering of a missing segment against `present`.
fn compare_missing(present: &str) -> Ordering {
	match present.parse::<u64>() {
		Ok(0) => Ordering::Equal,
		Ok(_) => Ordering::Less,
		Err(_) => Ordering::Greater,
	}
}
