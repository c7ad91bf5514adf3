use crate::geometry::Point;
use crate::position::Placement;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Flat, camelCase view of a [`Placement`] for JSON consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDump {
    pub top: f64,
    pub left: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_anchor_point: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_anchor_point: Option<Point>,
}

impl PlacementDump {
    pub fn from_placement(placement: &Placement) -> Self {
        Self {
            top: placement.top,
            left: placement.left,
            pointer_top: placement.pointer.map(|p| p.top),
            pointer_left: placement.pointer.map(|p| p.left),
            pointer_rotation: placement.pointer.map(|p| p.rotation),
            pointer_opacity: placement.pointer_opacity,
            relative_anchor_point: placement.anchor.map(|a| a.relative),
            absolute_anchor_point: placement.anchor.map(|a| a.absolute),
        }
    }
}

/// Pretty JSON to `output`, or stdout when no path is given.
pub fn write_placement_dump<T: Serialize>(dump: &T, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, dump)?;
            writeln!(writer)?;
            writer.flush()?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, dump)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
