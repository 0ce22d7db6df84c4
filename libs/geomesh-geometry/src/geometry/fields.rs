//! Mesh size fields.

use serde::{Deserialize, Serialize};

use super::Geometry;
use crate::entity::{Curve, Field, Point};
use crate::error::GeometryError;
use crate::format::{finite, join, num};
use crate::kernel::Kernel;

/// Refinement that grows from `size_min` near the given curves and points
/// to `size_max` away from them.
///
/// Inside `dist_min` the element size is `size_min`, beyond `dist_max` it is
/// `size_max`, and it is interpolated linearly in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryLayer {
    pub curves: Vec<Curve>,
    pub points: Vec<Point>,
    pub size_min: f64,
    pub size_max: f64,
    pub dist_min: f64,
    pub dist_max: f64,
    /// Samples per curve used by the distance computation.
    pub sampling: Option<u32>,
}

impl BoundaryLayer {
    pub fn new(size_min: f64, size_max: f64, dist_min: f64, dist_max: f64) -> Self {
        Self {
            curves: Vec::new(),
            points: Vec::new(),
            size_min,
            size_max,
            dist_min,
            dist_max,
            sampling: None,
        }
    }

    pub fn with_curves(mut self, curves: &[Curve]) -> Self {
        self.curves.extend_from_slice(curves);
        self
    }

    pub fn with_points(mut self, points: &[Point]) -> Self {
        self.points.extend_from_slice(points);
        self
    }

    pub fn with_sampling(mut self, sampling: u32) -> Self {
        self.sampling = Some(sampling);
        self
    }

    fn validate(&self) -> Result<(), GeometryError> {
        if self.curves.is_empty() && self.points.is_empty() {
            return Err(GeometryError::invalid_field(
                "boundary layer needs at least one curve or point",
            ));
        }
        for (value, name) in [
            (self.size_min, "size_min"),
            (self.size_max, "size_max"),
            (self.dist_min, "dist_min"),
            (self.dist_max, "dist_max"),
        ] {
            finite(value, name)?;
        }
        if self.size_min <= 0.0 || self.size_max < self.size_min {
            return Err(GeometryError::invalid_field(format!(
                "sizes must satisfy 0 < size_min <= size_max, got {} and {}",
                self.size_min, self.size_max
            )));
        }
        if self.dist_min < 0.0 || self.dist_max <= self.dist_min {
            return Err(GeometryError::invalid_field(format!(
                "distances must satisfy 0 <= dist_min < dist_max, got {} and {}",
                self.dist_min, self.dist_max
            )));
        }
        if self.sampling == Some(0) {
            return Err(GeometryError::invalid_field("sampling must be positive"));
        }
        Ok(())
    }
}

impl<K: Kernel> Geometry<K> {
    /// Declares a `Distance` field and a `Threshold` field on top of it.
    /// Returns the threshold field.
    pub fn add_boundary_layer(&mut self, layer: &BoundaryLayer) -> Result<Field, GeometryError> {
        layer.validate()?;

        let distance = self.next_field();
        self.push(format!("Field[{distance}] = Distance;"));
        if !layer.curves.is_empty() {
            let ids = join(layer.curves.iter().map(|c| c.id.as_str()));
            self.push(format!("Field[{distance}].CurvesList = {{{ids}}};"));
        }
        if !layer.points.is_empty() {
            let ids = join(layer.points.iter().map(|p| p.id.as_str()));
            self.push(format!("Field[{distance}].PointsList = {{{ids}}};"));
        }
        if let Some(sampling) = layer.sampling {
            self.push(format!("Field[{distance}].Sampling = {sampling};"));
        }

        let threshold = self.next_field();
        self.push(format!("Field[{threshold}] = Threshold;"));
        self.push(format!("Field[{threshold}].InField = {distance};"));
        for (key, value) in [
            ("SizeMin", layer.size_min),
            ("SizeMax", layer.size_max),
            ("DistMin", layer.dist_min),
            ("DistMax", layer.dist_max),
        ] {
            self.push(format!("Field[{threshold}].{key} = {};", num(value)));
        }
        Ok(Field { id: threshold })
    }

    /// Combines `fields` with a `Min` field and makes it the background
    /// mesh size.
    pub fn set_background_field(&mut self, fields: &[Field]) -> Result<Field, GeometryError> {
        if fields.is_empty() {
            return Err(GeometryError::invalid_field("no fields to combine"));
        }
        let min = self.next_field();
        let ids = join(fields.iter().map(|f| f.id.to_string()));
        self.push(format!("Field[{min}] = Min;"));
        self.push(format!("Field[{min}].FieldsList = {{{ids}}};"));
        self.push(format!("Background Field = {min};"));
        Ok(Field { id: min })
    }
}
