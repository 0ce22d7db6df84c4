//! Translation, rotation and twist extrusions.
//!
//! Gmsh returns the extruded entities as a list: the top entity first, the
//! swept entity second, then the lateral entities. [`Extrusion`] exposes
//! those three parts as list expressions into that result.

use config::constants::EPSILON_TOLERANCE;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::Geometry;
use crate::entity::{Dim, Entity};
use crate::error::GeometryError;
use crate::format::{finite, finite_vec3, join, num, vec3};
use crate::kernel::Kernel;

// =============================================================================
// LAYERS
// =============================================================================

/// Structured layering of an extrusion.
///
/// Without layers gmsh meshes the swept entity freely. With layers the
/// mesh is extruded element by element; `recombine` keeps prisms and
/// hexahedra instead of splitting them into simplices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layers {
    counts: Vec<u32>,
    heights: Vec<f64>,
    recombine: bool,
}

impl Layers {
    /// `count` layers of equal height.
    pub fn uniform(count: u32) -> Self {
        Self {
            counts: vec![count],
            heights: Vec::new(),
            recombine: false,
        }
    }

    /// Layer groups with `counts[i]` elements ending at the normalized
    /// cumulative height `heights[i]`. Heights increase and end at 1.
    pub fn graded(counts: Vec<u32>, heights: Vec<f64>) -> Self {
        Self {
            counts,
            heights,
            recombine: false,
        }
    }

    /// Keeps extruded elements as prisms or hexahedra.
    pub fn recombined(mut self) -> Self {
        self.recombine = true;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), GeometryError> {
        if self.counts.is_empty() {
            return Err(GeometryError::invalid_layers("no layer counts given"));
        }
        if self.counts.contains(&0) {
            return Err(GeometryError::invalid_layers("layer counts must be positive"));
        }
        if self.heights.is_empty() {
            if self.counts.len() > 1 {
                return Err(GeometryError::invalid_layers(
                    "several layer groups need explicit heights",
                ));
            }
            return Ok(());
        }
        if self.heights.len() != self.counts.len() {
            return Err(GeometryError::invalid_layers(format!(
                "{} counts but {} heights",
                self.counts.len(),
                self.heights.len()
            )));
        }
        let mut previous = 0.0;
        for &h in &self.heights {
            finite(h, "layer height")?;
            if h <= previous {
                return Err(GeometryError::invalid_layers(
                    "layer heights must be strictly increasing and positive",
                ));
            }
            previous = h;
        }
        if (previous - 1.0).abs() > EPSILON_TOLERANCE {
            return Err(GeometryError::invalid_layers(format!(
                "layer heights must end at 1, got {previous}"
            )));
        }
        Ok(())
    }

    /// ` Layers{...};` with an optional ` Recombine;`.
    pub(crate) fn render(&self) -> String {
        let layers = if self.heights.is_empty() {
            self.counts[0].to_string()
        } else {
            format!(
                "{{{}}}, {{{}}}",
                join(self.counts.iter().map(u32::to_string)),
                join(self.heights.iter().map(|h| num(*h)))
            )
        };
        let mut out = format!(" Layers{{{layers}}};");
        if self.recombine {
            out.push_str(" Recombine;");
        }
        out
    }
}

// =============================================================================
// EXTRUSION RESULT
// =============================================================================

/// Parts of an extrusion result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extrusion {
    /// The translated or rotated copy of the input (`exN[0]`).
    pub top: Entity,
    /// The swept entity, one dimension higher than the input (`exN[1]`).
    pub extruded: Entity,
    /// Lateral entities (`exN[2..]`); `None` when extruding a point.
    pub lateral: Option<Entity>,
}

// =============================================================================
// OPERATIONS
// =============================================================================

impl<K: Kernel> Geometry<K> {
    /// Extrudes `entity` along `translation`.
    pub fn extrude(
        &mut self,
        entity: impl Into<Entity>,
        translation: [f64; 3],
        layers: Option<&Layers>,
    ) -> Result<Extrusion, GeometryError> {
        let translation = nonzero_vector(translation, "extrusion vector")?;
        self.extrude_with_head("Extrude", entity.into(), vec3(translation), layers)
    }

    /// Revolves `entity` by `angle` radians around the axis through
    /// `point_on_axis` with direction `axis`.
    pub fn revolve(
        &mut self,
        entity: impl Into<Entity>,
        axis: [f64; 3],
        point_on_axis: [f64; 3],
        angle: f64,
        layers: Option<&Layers>,
    ) -> Result<Extrusion, GeometryError> {
        let axis = nonzero_vector(axis, "rotation axis")?;
        let origin = finite_vec3(point_on_axis, "point on axis")?;
        self.check_angle(angle)?;
        let head = format!("{{{}}}, {{{}}}, {}", vec3(axis), vec3(origin), num(angle));
        self.extrude_with_head("Revolve", entity.into(), head, layers)
    }

    /// Extrudes along `translation` while rotating by `angle` around the
    /// given axis.
    pub fn twist(
        &mut self,
        entity: impl Into<Entity>,
        translation: [f64; 3],
        axis: [f64; 3],
        point_on_axis: [f64; 3],
        angle: f64,
        layers: Option<&Layers>,
    ) -> Result<Extrusion, GeometryError> {
        let translation = finite_vec3(translation, "twist translation")?;
        let axis = nonzero_vector(axis, "rotation axis")?;
        let origin = finite_vec3(point_on_axis, "point on axis")?;
        self.check_angle(angle)?;
        let head = format!(
            "{{{}}}, {{{}}}, {{{}}}, {}",
            vec3(translation),
            vec3(axis),
            vec3(origin),
            num(angle)
        );
        self.extrude_with_head("Twist", entity.into(), head, layers)
    }

    fn check_angle(&self, angle: f64) -> Result<(), GeometryError> {
        finite(angle, "rotation angle")?;
        if K::accepts_revolve_angle(angle) {
            Ok(())
        } else {
            Err(GeometryError::invalid_angle(
                angle,
                format!("not accepted by the {} kernel", K::NAME),
            ))
        }
    }

    fn extrude_with_head(
        &mut self,
        operation: &'static str,
        entity: Entity,
        head: String,
        layers: Option<&Layers>,
    ) -> Result<Extrusion, GeometryError> {
        let dim = entity.dim();
        let raised = dim
            .raised()
            .ok_or(GeometryError::UnsupportedDimension { operation, dim })?;
        if let Some(layers) = layers {
            layers.validate()?;
        }

        let name = self.next_name("ex");
        let layers = layers.map(Layers::render).unwrap_or_default();
        self.push(format!(
            "{name}[] = Extrude{{{head}}}{{{}{layers}}};",
            crate::entity::entity_list(dim, std::slice::from_ref(&entity))
        ));

        let lateral = (dim != Dim::Point)
            .then(|| Entity::from_expr(dim, format!("{name}[{{2:#{name}[]-1}}]")));
        Ok(Extrusion {
            top: Entity::from_expr(dim, format!("{name}[0]")),
            extruded: Entity::from_expr(raised, format!("{name}[1]")),
            lateral,
        })
    }
}

fn nonzero_vector(v: [f64; 3], context: &str) -> Result<DVec3, GeometryError> {
    let v = finite_vec3(v, context)?;
    if v.length() <= EPSILON_TOLERANCE {
        return Err(GeometryError::degenerate(format!("{context} has zero length")));
    }
    Ok(v)
}
