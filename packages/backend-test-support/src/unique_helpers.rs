//! Unique fixture values so tests never collide on unique columns.

use ulid::Ulid;

/// Generate a unique string with the given prefix, e.g. `driver-01J...`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("driver");
/// let b = unique_str("driver");
/// assert_ne!(a, b);
/// assert!(a.starts_with("driver-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique driver username.
pub fn unique_username(prefix: &str) -> String {
    unique_str(prefix).to_lowercase()
}

/// Generate a unique license plate such as `FL-7Q2M9XK4TR`.
///
/// ```
/// use backend_test_support::unique_helpers::unique_license_plate;
///
/// let plate = unique_license_plate();
/// assert!(plate.starts_with("FL-"));
/// assert_eq!(plate.len(), 13);
/// ```
pub fn unique_license_plate() -> String {
    let ulid = Ulid::new().to_string();
    // The tail of a ULID is random; the head is a timestamp shared by
    // plates generated in the same millisecond.
    format!("FL-{}", &ulid[ulid.len() - 10..])
}
