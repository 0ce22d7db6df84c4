//! In-place transformations, embedding and structured meshing controls.

use config::constants::EPSILON_TOLERANCE;

use super::Geometry;
use crate::entity::{entity_list, Curve, Dim, Entity, Surface, Volume};
use crate::error::GeometryError;
use crate::format::{finite, finite_vec3, num, vec3};
use crate::kernel::Kernel;

impl<K: Kernel> Geometry<K> {
    // =========================================================================
    // TRANSFORMATIONS
    // =========================================================================

    /// Moves `entity` by `offset`.
    pub fn translate(
        &mut self,
        entity: impl Into<Entity>,
        offset: [f64; 3],
    ) -> Result<(), GeometryError> {
        let entity = entity.into();
        let offset = finite_vec3(offset, "translation")?;
        self.push(format!(
            "Translate {{{}}} {{ {} }}",
            vec3(offset),
            entity_list(entity.dim(), std::slice::from_ref(&entity))
        ));
        Ok(())
    }

    /// Rotates `entity` by `angle` radians around an axis.
    pub fn rotate(
        &mut self,
        entity: impl Into<Entity>,
        axis: [f64; 3],
        point_on_axis: [f64; 3],
        angle: f64,
    ) -> Result<(), GeometryError> {
        let entity = entity.into();
        let axis = finite_vec3(axis, "rotation axis")?;
        if axis.length() <= EPSILON_TOLERANCE {
            return Err(GeometryError::degenerate("rotation axis has zero length"));
        }
        let origin = finite_vec3(point_on_axis, "point on axis")?;
        finite(angle, "rotation angle")?;
        self.push(format!(
            "Rotate {{{{{}}}, {{{}}}, {}}} {{ {} }}",
            vec3(axis),
            vec3(origin),
            num(angle),
            entity_list(entity.dim(), std::slice::from_ref(&entity))
        ));
        Ok(())
    }

    /// Scales `entity` by `factor` around `center`.
    pub fn dilate(
        &mut self,
        entity: impl Into<Entity>,
        center: [f64; 3],
        factor: f64,
    ) -> Result<(), GeometryError> {
        let entity = entity.into();
        let center = finite_vec3(center, "dilation center")?;
        finite(factor, "dilation factor")?;
        if factor.abs() <= EPSILON_TOLERANCE {
            return Err(GeometryError::degenerate("dilation factor is zero"));
        }
        self.push(format!(
            "Dilate {{{{{}}}, {}}} {{ {} }}",
            vec3(center),
            num(factor),
            entity_list(entity.dim(), std::slice::from_ref(&entity))
        ));
        Ok(())
    }

    /// Mirrors `entity` through the plane `a*x + b*y + c*z + d = 0`.
    pub fn mirror(
        &mut self,
        entity: impl Into<Entity>,
        plane: [f64; 4],
    ) -> Result<(), GeometryError> {
        let entity = entity.into();
        for value in plane {
            finite(value, "mirror plane")?;
        }
        let [a, b, c, d] = plane;
        if (a * a + b * b + c * c).sqrt() <= EPSILON_TOLERANCE {
            return Err(GeometryError::degenerate("mirror plane normal has zero length"));
        }
        self.push(format!(
            "Symmetry {{{}, {}, {}, {}}} {{ {} }}",
            num(a),
            num(b),
            num(c),
            num(d),
            entity_list(entity.dim(), std::slice::from_ref(&entity))
        ));
        Ok(())
    }

    // =========================================================================
    // EMBEDDING
    // =========================================================================

    /// Forces the mesh of `surface` to conform to a point or curve.
    pub fn in_surface(
        &mut self,
        entity: impl Into<Entity>,
        surface: &Surface,
    ) -> Result<(), GeometryError> {
        self.embed(entity.into(), Dim::Surface, surface.id())
    }

    /// Forces the mesh of `volume` to conform to a point, curve or surface.
    pub fn in_volume(
        &mut self,
        entity: impl Into<Entity>,
        volume: &Volume,
    ) -> Result<(), GeometryError> {
        self.embed(entity.into(), Dim::Volume, volume.id())
    }

    fn embed(&mut self, entity: Entity, host: Dim, host_id: &str) -> Result<(), GeometryError> {
        let dim = entity.dim();
        if dim >= host {
            return Err(GeometryError::UnsupportedDimension {
                operation: "embedding",
                dim,
            });
        }
        // Embedded entities are referenced without orientation.
        self.push(format!(
            "{}{{{}}} In {}{{{host_id}}};",
            dim.keyword(),
            entity.id(),
            host.keyword()
        ));
        Ok(())
    }

    // =========================================================================
    // STRUCTURED MESHING
    // =========================================================================

    /// Places exactly `nodes` mesh nodes on `curve`, spaced geometrically by
    /// `progression`.
    pub fn set_transfinite_curve(
        &mut self,
        curve: &Curve,
        nodes: u32,
        progression: f64,
    ) -> Result<(), GeometryError> {
        if nodes < 2 {
            return Err(GeometryError::TooFewPoints {
                shape: "transfinite curve",
                min: 2,
                got: nodes as usize,
            });
        }
        finite(progression, "progression")?;
        if progression <= 0.0 {
            return Err(GeometryError::degenerate("progression must be positive"));
        }
        self.push(format!(
            "Transfinite Curve{{{}}} = {nodes} Using Progression {};",
            curve.id(),
            num(progression)
        ));
        Ok(())
    }

    /// Meshes `surface` with a structured grid; its boundary curves must be
    /// transfinite.
    pub fn set_transfinite_surface(&mut self, surface: &Surface) {
        self.push(format!("Transfinite Surface{{{}}};", surface.id()));
    }

    /// Recombines the triangles of `surface` into quadrangles.
    pub fn set_recombined_surface(&mut self, surface: &Surface) {
        self.push(format!("Recombine Surface{{{}}};", surface.id()));
    }
}
