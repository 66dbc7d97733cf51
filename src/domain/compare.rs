//! Component-wise ordering of version strings found in artifact names.
//!
//! This is deliberately not a semver comparison. Archival decisions for
//! existing artifacts depend on its exact quirks, which the tests pin.

use std::cmp::Ordering;

/// Compares two dot-separated version strings, walking the components of `a`.
///
/// - `a` running past the end of `b` is `Greater`.
/// - A component on either side that is not an integer makes the result `Less`.
/// - `b` having extra components is ignored, so `"1.2"` equals `"1.2.0"`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parts_b: Vec<&str> = b.split('.').collect();

    for (i, part_a) in a.split('.').enumerate() {
        let Some(part_b) = parts_b.get(i) else {
            return Ordering::Greater;
        };

        let (Ok(number_a), Ok(number_b)) = (part_a.parse::<u64>(), part_b.parse::<u64>()) else {
            return Ordering::Less;
        };

        match number_a.cmp(&number_b) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }

    Ordering::Equal
}
