//! Classifies a request path into the fleet resource it addresses.
//!
//! Runs before routing, so it reads the raw path instead of match info.

/// Resource and ids named by a request path, recorded on spans and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetTarget {
    pub resource: &'static str,
    pub driver_id: Option<i64>,
    pub car_id: Option<i64>,
}

impl FleetTarget {
    fn bare(resource: &'static str) -> Self {
        Self {
            resource,
            driver_id: None,
            car_id: None,
        }
    }

    pub fn from_path(path: &str) -> Self {
        let mut segments = path.trim_matches('/').split('/');
        match segments.next() {
            Some("drivers") => {
                let driver_id = segments.next().and_then(|s| s.parse().ok());
                let car_id = match (segments.next(), segments.next()) {
                    (Some("car"), Some(id)) if driver_id.is_some() => id.parse().ok(),
                    _ => None,
                };
                let resource = if car_id.is_some() {
                    "assignment"
                } else {
                    "driver"
                };
                Self {
                    resource,
                    driver_id,
                    car_id,
                }
            }
            Some("cars") => Self {
                car_id: segments.next().and_then(|s| s.parse().ok()),
                ..Self::bare("car")
            },
            Some("health") => Self::bare("health"),
            _ => Self::bare("other"),
        }
    }
}

/// `driverAction` query value, as sent.
pub fn driver_action(query: &str) -> Option<&str> {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("driverAction="))
        .filter(|v| !v.is_empty())
}
