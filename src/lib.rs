pub mod anchor;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dump;
pub mod geometry;
pub mod position;
pub mod request;
pub mod rotation;
pub mod warning;

pub use anchor::{Coordinate, NamedAnchor, Position};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, PlacementConfig, Viewport, load_config};
pub use geometry::{BoundingBox, Point, clamp};
pub use position::{AnchorPoints, Placement, PlacementInput, Pointer, compute_position};
pub use request::{PlacementRequest, RequestError, RequestSet, parse_requests};
pub use warning::{WarningLog, warning};
