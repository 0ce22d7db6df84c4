//! # OpenCASCADE Operations
//!
//! Solid primitives and boolean operations. These exist only on
//! [`crate::OccGeometry`]; the built-in kernel has no counterpart.
//!
//! Boolean results are list expressions (`bo0[]`) because gmsh may split
//! the result into several entities.

use std::f64::consts::FRAC_PI_2;

use config::constants::EPSILON_TOLERANCE;
use tracing::debug;

use super::{common_dim, Geometry};
use crate::entity::{entity_list, Dim, Entity, Surface, Volume};
use crate::error::GeometryError;
use crate::format::{finite, finite_vec3, join, num, positive, vec3};
use crate::kernel::OpenCascade;

/// The four boolean operations of the OpenCASCADE kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Intersection,
    Difference,
    Fragments,
}

impl BooleanOp {
    /// Keyword of the operation in the `.geo` language.
    pub fn keyword(self) -> &'static str {
        match self {
            BooleanOp::Union => "BooleanUnion",
            BooleanOp::Intersection => "BooleanIntersection",
            BooleanOp::Difference => "BooleanDifference",
            BooleanOp::Fragments => "BooleanFragments",
        }
    }
}

impl Geometry<OpenCascade> {
    // =========================================================================
    // PRIMITIVES
    // =========================================================================

    /// Adds an elliptic disk in the plane of constant z. `ry` defaults to
    /// `rx`.
    pub fn add_disk(
        &mut self,
        center: [f64; 3],
        rx: f64,
        ry: Option<f64>,
    ) -> Result<Surface, GeometryError> {
        let center = finite_vec3(center, "disk center")?;
        let rx = radius(rx)?;
        let ry = radius(ry.unwrap_or(rx))?;
        // OpenCASCADE wants the x radius to be the larger one; a disk that
        // is taller than wide is built lying down and turned upright.
        let upright = ry > rx;
        let (major, minor) = if upright { (ry, rx) } else { (rx, ry) };
        let id = self.occ_entity(
            "d",
            "news",
            "Disk",
            format!("{}, {}, {}", vec3(center), num(major), num(minor)),
        );
        let disk = Surface { id };
        if upright {
            self.rotate(&disk, [0.0, 0.0, 1.0], center.to_array(), FRAC_PI_2)?;
        }
        Ok(disk)
    }

    /// Adds a rectangle with lower-left `corner`, optionally with rounded
    /// corners of `corner_radius`.
    pub fn add_rectangle_occ(
        &mut self,
        corner: [f64; 3],
        dx: f64,
        dy: f64,
        corner_radius: Option<f64>,
    ) -> Result<Surface, GeometryError> {
        let corner = finite_vec3(corner, "rectangle corner")?;
        let dx = positive(dx, "rectangle width")?;
        let dy = positive(dy, "rectangle height")?;
        let mut args = format!("{}, {}, {}", vec3(corner), num(dx), num(dy));
        if let Some(r) = corner_radius {
            let r = radius(r)?;
            if 2.0 * r > dx.min(dy) + EPSILON_TOLERANCE {
                return Err(GeometryError::degenerate(format!(
                    "corner radius {r} does not fit a {dx} x {dy} rectangle"
                )));
            }
            args.push_str(&format!(", {}", num(r)));
        }
        let id = self.occ_entity("rect", "news", "Rectangle", args);
        Ok(Surface { id })
    }

    /// Adds an axis-aligned box spanning `corner` to `corner + extents`.
    pub fn add_box(
        &mut self,
        corner: [f64; 3],
        extents: [f64; 3],
    ) -> Result<Volume, GeometryError> {
        let corner = finite_vec3(corner, "box corner")?;
        let extents = finite_vec3(extents, "box extents")?;
        if extents.min_element() <= EPSILON_TOLERANCE {
            return Err(GeometryError::degenerate(format!(
                "box extents must be positive, got {extents}"
            )));
        }
        let id = self.occ_entity(
            "box",
            "newv",
            "Box",
            format!("{}, {}", vec3(corner), vec3(extents)),
        );
        Ok(Volume { id })
    }

    /// Adds a ball.
    pub fn add_ball(&mut self, center: [f64; 3], r: f64) -> Result<Volume, GeometryError> {
        let center = finite_vec3(center, "ball center")?;
        let r = radius(r)?;
        let id = self.occ_entity("ball", "newv", "Sphere", format!("{}, {}", vec3(center), num(r)));
        Ok(Volume { id })
    }

    /// Adds a cylinder from `base` to `base + axis`.
    pub fn add_cylinder(
        &mut self,
        base: [f64; 3],
        axis: [f64; 3],
        r: f64,
    ) -> Result<Volume, GeometryError> {
        let base = finite_vec3(base, "cylinder base")?;
        let axis = finite_vec3(axis, "cylinder axis")?;
        if axis.length() <= EPSILON_TOLERANCE {
            return Err(GeometryError::degenerate("cylinder axis has zero length"));
        }
        let r = radius(r)?;
        let id = self.occ_entity(
            "cyl",
            "newv",
            "Cylinder",
            format!("{}, {}, {}", vec3(base), vec3(axis), num(r)),
        );
        Ok(Volume { id })
    }

    /// Adds a cone from `base` (radius `r0`) to `base + axis` (radius `r1`).
    /// One of the radii may be zero.
    pub fn add_cone(
        &mut self,
        base: [f64; 3],
        axis: [f64; 3],
        r0: f64,
        r1: f64,
    ) -> Result<Volume, GeometryError> {
        let base = finite_vec3(base, "cone base")?;
        let axis = finite_vec3(axis, "cone axis")?;
        if axis.length() <= EPSILON_TOLERANCE {
            return Err(GeometryError::degenerate("cone axis has zero length"));
        }
        finite(r0, "cone radius")?;
        finite(r1, "cone radius")?;
        if r0 < 0.0 || r1 < 0.0 || r0.max(r1) <= EPSILON_TOLERANCE {
            return Err(GeometryError::InvalidRadius {
                value: if r0 < 0.0 { r0 } else { r1 },
            });
        }
        let id = self.occ_entity(
            "cone",
            "newv",
            "Cone",
            format!("{}, {}, {}, {}", vec3(base), vec3(axis), num(r0), num(r1)),
        );
        Ok(Volume { id })
    }

    /// Adds a torus around the z axis through `center`. `r0` is the radius
    /// of the center line, `r1` that of the tube.
    pub fn add_torus(
        &mut self,
        center: [f64; 3],
        r0: f64,
        r1: f64,
    ) -> Result<Volume, GeometryError> {
        let center = finite_vec3(center, "torus center")?;
        let r0 = radius(r0)?;
        let r1 = radius(r1)?;
        if r1 >= r0 {
            return Err(GeometryError::degenerate(format!(
                "torus tube radius {r1} must be smaller than {r0}"
            )));
        }
        let id = self.occ_entity(
            "torus",
            "newv",
            "Torus",
            format!("{}, {}, {}", vec3(center), num(r0), num(r1)),
        );
        Ok(Volume { id })
    }

    fn occ_entity(
        &mut self,
        prefix: &'static str,
        allocator: &str,
        keyword: &str,
        args: String,
    ) -> String {
        let id = self.next_name(prefix);
        self.push(format!("{id} = {allocator};"));
        self.push(format!("{keyword}({id}) = {{{args}}};"));
        id
    }

    // =========================================================================
    // BOOLEANS
    // =========================================================================

    /// Fuses all `entities` into one.
    pub fn boolean_union<I, T>(
        &mut self,
        entities: I,
        delete_first: bool,
        delete_other: bool,
    ) -> Result<Entity, GeometryError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Entity>,
    {
        self.boolean_split(BooleanOp::Union, entities, delete_first, delete_other)
    }

    /// Keeps the region common to all `entities`.
    pub fn boolean_intersection<I, T>(
        &mut self,
        entities: I,
        delete_first: bool,
        delete_other: bool,
    ) -> Result<Entity, GeometryError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Entity>,
    {
        self.boolean_split(BooleanOp::Intersection, entities, delete_first, delete_other)
    }

    /// Splits all `entities` at their intersections, keeping every piece
    /// and making the result conformal.
    pub fn boolean_fragments<I, T>(
        &mut self,
        entities: I,
        delete_first: bool,
        delete_other: bool,
    ) -> Result<Entity, GeometryError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Entity>,
    {
        self.boolean_split(BooleanOp::Fragments, entities, delete_first, delete_other)
    }

    /// Removes `tool` from `input`.
    pub fn boolean_difference<I, T, J, U>(
        &mut self,
        input: I,
        tool: J,
        delete_first: bool,
        delete_other: bool,
    ) -> Result<Entity, GeometryError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Entity>,
        J: IntoIterator<Item = U>,
        U: Into<Entity>,
    {
        let input: Vec<Entity> = input.into_iter().map(Into::into).collect();
        let tool: Vec<Entity> = tool.into_iter().map(Into::into).collect();
        self.boolean(BooleanOp::Difference, input, tool, delete_first, delete_other)
    }

    fn boolean_split<I, T>(
        &mut self,
        op: BooleanOp,
        entities: I,
        delete_first: bool,
        delete_other: bool,
    ) -> Result<Entity, GeometryError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Entity>,
    {
        let mut input: Vec<Entity> = entities.into_iter().map(Into::into).collect();
        if input.is_empty() {
            return Err(GeometryError::EmptyOperands {
                operation: op.keyword(),
            });
        }
        let tool = input.split_off(1);
        self.boolean(op, input, tool, delete_first, delete_other)
    }

    /// Emits `boN[] = Op{ input; [Delete;] }{ tool; [Delete;] };`.
    pub fn boolean(
        &mut self,
        op: BooleanOp,
        input: Vec<Entity>,
        tool: Vec<Entity>,
        delete_first: bool,
        delete_other: bool,
    ) -> Result<Entity, GeometryError> {
        let operation = op.keyword();
        if input.is_empty() || tool.is_empty() {
            return Err(GeometryError::EmptyOperands { operation });
        }
        let all: Vec<Entity> = input.iter().chain(tool.iter()).cloned().collect();
        let dim = common_dim(operation, &all)?;
        if dim == Dim::Point {
            return Err(GeometryError::UnsupportedDimension { operation, dim });
        }

        let name = self.next_name("bo");
        let block = |entities: &[Entity], delete: bool| {
            let mut out = entity_list(dim, entities);
            if delete {
                out.push_str(" Delete;");
            }
            out
        };
        self.push(format!(
            "{name}[] = {operation}{{ {} }}{{ {} }};",
            block(&input, delete_first),
            block(&tool, delete_other)
        ));
        debug!(
            operation,
            inputs = %join(input.iter().map(Entity::reference)),
            tools = %join(tool.iter().map(Entity::reference)),
            "declared boolean operation"
        );
        Ok(Entity::from_expr(dim, format!("{name}[]")))
    }
}

fn radius(value: f64) -> Result<f64, GeometryError> {
    finite(value, "radius")?;
    if value > EPSILON_TOLERANCE {
        Ok(value)
    } else {
        Err(GeometryError::InvalidRadius { value })
    }
}
