// JSON request surface: one placement request or a batch of them, with the
// camelCase field names hosts already use for measured boxes.

use crate::anchor::{Coordinate, Position};
use crate::config::{Config, PlacementConfig, Viewport};
use crate::geometry::BoundingBox;
use crate::position::PlacementInput;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("request {index} is invalid: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("request batch is empty")]
    EmptyBatch,
}

/// A position or origin as written in JSON: an anchor name or an `[x, y]` pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PositionSpec {
    Name(String),
    Pair([Coordinate; 2]),
}

impl PositionSpec {
    pub fn into_position(self) -> Option<Position> {
        match self {
            Self::Name(name) => Position::parse(&name),
            Self::Pair([x, y]) => Some(Position::Coordinates(x, y)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRequest {
    #[serde(alias = "targetBoundingBox")]
    pub target: BoundingBox,
    #[serde(alias = "overBoundingBox")]
    pub overlay: BoundingBox,
    #[serde(default)]
    pub position: Option<PositionSpec>,
    #[serde(default)]
    pub origin: Option<PositionSpec>,
    /// Falls back to the loaded config when absent.
    #[serde(default)]
    pub config: Option<PlacementConfig>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
}

impl PlacementRequest {
    pub fn into_input(self, defaults: &Config) -> PlacementInput {
        PlacementInput {
            target: self.target,
            overlay: self.overlay,
            position: self.position.and_then(PositionSpec::into_position),
            origin: self.origin.and_then(PositionSpec::into_position),
            config: self.config.unwrap_or(defaults.placement),
            viewport: self.viewport.unwrap_or(defaults.viewport),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestSet {
    Single(PlacementRequest),
    Batch(Vec<PlacementRequest>),
}

pub fn parse_requests(input: &str) -> Result<RequestSet, RequestError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(RequestSet::Single(serde_json::from_value(value)?));
    };
    if items.is_empty() {
        return Err(RequestError::EmptyBatch);
    }
    let requests = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| RequestError::Invalid { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RequestSet::Batch(requests))
}
