//! Errors raised while handling host commands.

use thiserror::Error;

use impact_geo::GeoError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Camera sits on the waypoint, so there is no approach direction.
    #[error("cannot launch: camera position coincides with the target")]
    DegenerateLaunch,
    #[error(transparent)]
    Geo(#[from] GeoError),
}
