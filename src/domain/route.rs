//! Travel routes between locations.

use std::fmt;

use super::id::LocationId;

/// Ordered waypoints between an origin and a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    waypoints: Vec<LocationId>,
}

impl Route {
    pub fn new(waypoints: Vec<LocationId>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[LocationId] {
        &self.waypoints
    }

    /// Number of waypoints on the route.
    pub fn hop_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

impl FromIterator<LocationId> for Route {
    fn from_iter<I: IntoIterator<Item = LocationId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Waypoints joined with `-`.
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, waypoint) in self.waypoints.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{waypoint}")?;
        }
        Ok(())
    }
}
