//! # Composite Shapes
//!
//! Circles, polygons and rectangles assembled from elementary entities.
//! All inputs are validated up front so that a rejected shape leaves no
//! partial statements behind.

use std::f64::consts::TAU;

use config::constants::{DEFAULT_CIRCLE_SECTIONS, EPSILON_TOLERANCE, MIN_CIRCLE_SECTIONS};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::{check_mesh_size, Geometry};
use crate::entity::{Curve, CurveLoop, Point, Surface};
use crate::error::GeometryError;
use crate::format::{finite, finite_vec3};
use crate::kernel::Kernel;

// =============================================================================
// CIRCLE
// =============================================================================

/// A circle in a plane of constant z, built from equal arcs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    /// Rim points, counter-clockwise starting on the +x axis.
    pub points: Vec<Point>,
    pub arcs: Vec<Curve>,
    pub curve_loop: CurveLoop,
    /// Plane surface filling the circle, when requested.
    pub surface: Option<Surface>,
}

// =============================================================================
// POLYGON
// =============================================================================

/// A closed polygon of straight lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    /// `lines[i]` joins `points[i]` to `points[i + 1]`, wrapping around.
    pub lines: Vec<Curve>,
    pub curve_loop: CurveLoop,
    pub surface: Option<Surface>,
}

impl<K: Kernel> Geometry<K> {
    /// Adds a circle of `radius` around `center` split into `sections` arcs
    /// (three by default).
    ///
    /// Each arc must be smaller than half a turn, so fewer than three
    /// sections are rejected. When `make_surface` is set, the circle is
    /// filled with a plane surface that excludes `holes`.
    pub fn add_circle(
        &mut self,
        center: [f64; 3],
        radius: f64,
        mesh_size: Option<f64>,
        sections: Option<usize>,
        holes: &[&CurveLoop],
        make_surface: bool,
    ) -> Result<Circle, GeometryError> {
        let c = finite_vec3(center, "circle center")?;
        finite(radius, "circle radius")?;
        if radius <= EPSILON_TOLERANCE {
            return Err(GeometryError::InvalidRadius { value: radius });
        }
        let sections = sections.unwrap_or(DEFAULT_CIRCLE_SECTIONS);
        if sections < MIN_CIRCLE_SECTIONS {
            return Err(GeometryError::InvalidSections {
                min: MIN_CIRCLE_SECTIONS,
                got: sections,
            });
        }
        if let Some(size) = mesh_size {
            check_mesh_size(size)?;
        }

        let center = self.add_point(c.to_array(), mesh_size)?;
        let mut points = Vec::with_capacity(sections);
        for k in 0..sections {
            let phi = TAU * k as f64 / sections as f64;
            let rim = c + radius * DVec3::new(phi.cos(), phi.sin(), 0.0);
            points.push(self.add_point(rim.to_array(), mesh_size)?);
        }

        let mut arcs = Vec::with_capacity(sections);
        for k in 0..sections {
            let next = &points[(k + 1) % sections];
            arcs.push(self.add_circle_arc(&points[k], &center, next)?);
        }

        let curve_loop = self.add_curve_loop(&arcs)?;
        let surface = if make_surface {
            Some(self.add_plane_surface(&curve_loop, holes)?)
        } else {
            None
        };

        Ok(Circle {
            center,
            radius,
            points,
            arcs,
            curve_loop,
            surface,
        })
    }

    /// Adds a closed polygon through `points`.
    ///
    /// The first point is not repeated at the end. Consecutive points,
    /// including the last and first, must be distinct.
    pub fn add_polygon(
        &mut self,
        points: &[[f64; 3]],
        mesh_size: Option<f64>,
        holes: &[&CurveLoop],
        make_surface: bool,
    ) -> Result<Polygon, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::TooFewPoints {
                shape: "polygon",
                min: 3,
                got: points.len(),
            });
        }
        let coords = points
            .iter()
            .map(|p| finite_vec3(*p, "polygon vertex"))
            .collect::<Result<Vec<_>, _>>()?;
        for (i, a) in coords.iter().enumerate() {
            let b = coords[(i + 1) % coords.len()];
            if a.distance(b) <= EPSILON_TOLERANCE {
                return Err(GeometryError::degenerate(format!(
                    "polygon vertices {i} and {} coincide",
                    (i + 1) % coords.len()
                )));
            }
        }
        if let Some(size) = mesh_size {
            check_mesh_size(size)?;
        }

        let points = coords
            .iter()
            .map(|c| self.add_point(c.to_array(), mesh_size))
            .collect::<Result<Vec<_>, _>>()?;
        let mut lines = Vec::with_capacity(points.len());
        for (i, start) in points.iter().enumerate() {
            lines.push(self.add_line(start, &points[(i + 1) % points.len()])?);
        }

        let curve_loop = self.add_curve_loop(&lines)?;
        let surface = if make_surface {
            Some(self.add_plane_surface(&curve_loop, holes)?)
        } else {
            None
        };

        Ok(Polygon {
            points,
            lines,
            curve_loop,
            surface,
        })
    }

    /// Adds an axis-aligned rectangle at height `z` as a four-sided
    /// polygon.
    #[allow(clippy::too_many_arguments)]
    pub fn add_rectangle(
        &mut self,
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
        z: f64,
        mesh_size: Option<f64>,
        holes: &[&CurveLoop],
        make_surface: bool,
    ) -> Result<Polygon, GeometryError> {
        for value in [xmin, xmax, ymin, ymax, z] {
            finite(value, "rectangle bounds")?;
        }
        if xmax - xmin <= EPSILON_TOLERANCE || ymax - ymin <= EPSILON_TOLERANCE {
            return Err(GeometryError::degenerate(format!(
                "rectangle [{xmin}, {xmax}] x [{ymin}, {ymax}] is empty"
            )));
        }
        self.add_polygon(
            &[
                [xmin, ymin, z],
                [xmax, ymin, z],
                [xmax, ymax, z],
                [xmin, ymax, z],
            ],
            mesh_size,
            holes,
            make_surface,
        )
    }
}
