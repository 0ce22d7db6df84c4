//! # Geometry Builder
//!
//! [`Geometry`] accumulates `.geo` statements in call order. Each `add_*`
//! call validates its input, allocates a fresh script variable from a
//! per-prefix counter, appends the statements and returns a handle.
//!
//! Kernel-independent operations live here and in the sibling modules;
//! OpenCASCADE-only operations are in [`occ`].

mod extrude;
mod fields;
pub mod occ;
mod shapes;
mod transform;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::marker::PhantomData;

use config::constants::EPSILON_TOLERANCE;
use tracing::debug;

use crate::entity::{Curve, CurveLoop, Dim, Entity, Point, Surface, SurfaceLoop, Volume};
use crate::error::GeometryError;
use crate::format::{finite_vec3, join, num, vec3};
use crate::kernel::{BuiltIn, Kernel, OpenCascade};

pub use extrude::{Extrusion, Layers};
pub use fields::BoundaryLayer;
pub use shapes::{Circle, Polygon};

/// Geometry declared with Gmsh's built-in kernel.
pub type BuiltInGeometry = Geometry<BuiltIn>;

/// Geometry declared with the OpenCASCADE kernel.
pub type OccGeometry = Geometry<OpenCascade>;

// =============================================================================
// GEOMETRY
// =============================================================================

/// Accumulator of declared entities, rendered to a Gmsh script by
/// [`Geometry::code`].
///
/// # Example
///
/// ```rust
/// use geomesh_geometry::BuiltInGeometry;
///
/// let mut geom = BuiltInGeometry::new();
/// let a = geom.add_point([0.0, 0.0, 0.0], Some(0.1)).unwrap();
/// let b = geom.add_point([1.0, 0.0, 0.0], Some(0.1)).unwrap();
/// geom.add_line(&a, &b).unwrap();
///
/// let code = geom.code();
/// assert!(code.contains("Line(l0) = {p0, p1};"));
/// ```
#[derive(Debug, Clone)]
pub struct Geometry<K: Kernel> {
    statements: Vec<String>,
    options: Vec<(String, String)>,
    counters: BTreeMap<&'static str, usize>,
    next_physical_tag: u32,
    next_field_id: u32,
    _kernel: PhantomData<K>,
}

/// A physical group created by [`Geometry::add_physical`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalGroup {
    /// Dimension of the grouped entities.
    pub dim: Dim,
    /// Tag written to the mesh file as `gmsh:physical`.
    pub tag: u32,
    /// Optional name, exported as field data.
    pub label: Option<String>,
}

impl<K: Kernel> Geometry<K> {
    /// Creates an empty geometry.
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
            options: Vec::new(),
            counters: BTreeMap::new(),
            next_physical_tag: 1,
            next_field_id: 1,
            _kernel: PhantomData,
        }
    }

    /// Name of the kernel this geometry targets.
    pub fn kernel_name(&self) -> &'static str {
        K::NAME
    }

    /// Number of statements emitted so far, options excluded.
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    // =========================================================================
    // SCRIPT PLUMBING
    // =========================================================================

    pub(crate) fn next_name(&mut self, prefix: &'static str) -> String {
        let counter = self.counters.entry(prefix).or_insert(0);
        let name = format!("{prefix}{counter}");
        *counter += 1;
        name
    }

    pub(crate) fn push(&mut self, statement: impl Into<String>) {
        self.statements.push(statement.into());
    }

    pub(crate) fn next_field(&mut self) -> u32 {
        let id = self.next_field_id;
        self.next_field_id += 1;
        id
    }

    /// Appends a `//` comment, one per line of `text`.
    pub fn add_comment(&mut self, text: &str) {
        for line in text.lines() {
            self.push(format!("// {line}"));
        }
    }

    /// Appends raw `.geo` code verbatim.
    pub fn add_raw_code(&mut self, code: impl Into<String>) {
        self.push(code);
    }

    /// Sets a numeric Gmsh option, e.g. `Mesh.Algorithm`. Setting the same
    /// option twice keeps the last value.
    pub fn set_option(&mut self, name: &str, value: f64) {
        self.set_option_raw(name, num(value));
    }

    /// Sets a string-valued Gmsh option.
    pub fn set_string_option(&mut self, name: &str, value: &str) {
        self.set_option_raw(name, format!("\"{}\"", value.replace('"', "\\\"")));
    }

    fn set_option_raw(&mut self, name: &str, value: String) {
        if let Some(slot) = self.options.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.options.push((name.to_string(), value));
        }
    }

    /// Lower bound on element sizes (`Mesh.CharacteristicLengthMin`).
    pub fn set_mesh_size_min(&mut self, value: f64) -> Result<(), GeometryError> {
        check_mesh_size(value)?;
        self.set_option("Mesh.CharacteristicLengthMin", value);
        Ok(())
    }

    /// Upper bound on element sizes (`Mesh.CharacteristicLengthMax`).
    pub fn set_mesh_size_max(&mut self, value: f64) -> Result<(), GeometryError> {
        check_mesh_size(value)?;
        self.set_option("Mesh.CharacteristicLengthMax", value);
        Ok(())
    }

    /// Renders the complete script: factory line, options, then the body.
    pub fn code(&self) -> String {
        let mut lines: Vec<String> = Vec::with_capacity(self.statements.len() + 4);
        lines.push(format!(
            "// Generated by geomesh-geometry {}",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(factory) = K::FACTORY {
            lines.push(format!("SetFactory(\"{factory}\");"));
        }
        for (name, value) in &self.options {
            lines.push(format!("{name} = {value};"));
        }
        lines.extend(self.statements.iter().cloned());

        debug!(
            kernel = K::NAME,
            statements = self.statements.len(),
            options = self.options.len(),
            "rendered geometry script"
        );

        let mut code = lines.join("\n");
        code.push('\n');
        code
    }

    // =========================================================================
    // ELEMENTARY ENTITIES
    // =========================================================================

    /// Adds a point, optionally with a characteristic mesh length.
    pub fn add_point(
        &mut self,
        coords: [f64; 3],
        mesh_size: Option<f64>,
    ) -> Result<Point, GeometryError> {
        let coords = finite_vec3(coords, "point coordinates")?;
        if let Some(size) = mesh_size {
            check_mesh_size(size)?;
        }

        let id = self.next_name("p");
        let body = match mesh_size {
            Some(size) => format!("{}, {}", vec3(coords), num(size)),
            None => vec3(coords),
        };
        self.push(format!("{id} = newp;"));
        self.push(format!("Point({id}) = {{{body}}};"));
        Ok(Point {
            id,
            coords,
            mesh_size,
        })
    }

    /// Adds a straight line between two distinct points.
    pub fn add_line(&mut self, start: &Point, end: &Point) -> Result<Curve, GeometryError> {
        if start.coords.distance(end.coords) <= EPSILON_TOLERANCE {
            return Err(GeometryError::degenerate(format!(
                "line from {} to {} has zero length",
                start.id, end.id
            )));
        }
        let id = self.next_name("l");
        self.push(format!("{id} = newl;"));
        self.push(format!("Line({id}) = {{{}, {}}};", start.id, end.id));
        Ok(Curve::new(id))
    }

    /// Adds a circle arc from `start` to `end` around `center`.
    ///
    /// The arc must be strictly smaller than π; larger arcs are split by the
    /// caller (see [`Geometry::add_circle`]).
    pub fn add_circle_arc(
        &mut self,
        start: &Point,
        center: &Point,
        end: &Point,
    ) -> Result<Curve, GeometryError> {
        check_arc(start, center, end)?;
        let id = self.next_name("ca");
        self.push(format!("{id} = newl;"));
        self.push(format!(
            "Circle({id}) = {{{}, {}, {}}};",
            start.id, center.id, end.id
        ));
        Ok(Curve::new(id))
    }

    /// Adds an ellipse arc. `major_axis` is any point on the major axis.
    pub fn add_ellipse_arc(
        &mut self,
        start: &Point,
        center: &Point,
        major_axis: &Point,
        end: &Point,
    ) -> Result<Curve, GeometryError> {
        check_arc(start, center, end)?;
        if major_axis.coords.distance(center.coords) <= EPSILON_TOLERANCE {
            return Err(GeometryError::degenerate(
                "ellipse major axis point coincides with the center",
            ));
        }
        let id = self.next_name("ea");
        self.push(format!("{id} = newl;"));
        self.push(format!(
            "Ellipse({id}) = {{{}, {}, {}, {}}};",
            start.id, center.id, major_axis.id, end.id
        ));
        Ok(Curve::new(id))
    }

    /// Adds an interpolating spline through `points`.
    pub fn add_spline(&mut self, points: &[&Point]) -> Result<Curve, GeometryError> {
        self.add_spline_like("Spline", "sp", points)
    }

    /// Adds a B-spline with `points` as control points.
    pub fn add_bspline(&mut self, points: &[&Point]) -> Result<Curve, GeometryError> {
        self.add_spline_like("BSpline", "bs", points)
    }

    fn add_spline_like(
        &mut self,
        keyword: &'static str,
        prefix: &'static str,
        points: &[&Point],
    ) -> Result<Curve, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints {
                shape: keyword,
                min: 2,
                got: points.len(),
            });
        }
        let id = self.next_name(prefix);
        let ids = join(points.iter().map(|p| p.id.as_str()));
        self.push(format!("{id} = newl;"));
        self.push(format!("{keyword}({id}) = {{{ids}}};"));
        Ok(Curve::new(id))
    }

    /// Adds a curve loop. Curves must be given head to tail; use
    /// [`Curve::reversed`] to flip one.
    pub fn add_curve_loop(&mut self, curves: &[Curve]) -> Result<CurveLoop, GeometryError> {
        if curves.is_empty() {
            return Err(GeometryError::OpenCurveLoop);
        }
        let id = self.next_name("ll");
        let refs = join(curves.iter().map(Curve::to_string));
        self.push(format!("{id} = newll;"));
        self.push(format!("Curve Loop({id}) = {{{refs}}};"));
        Ok(CurveLoop {
            id,
            curves: curves.to_vec(),
        })
    }

    /// Adds a plane surface bounded by `boundary`, minus `holes`.
    pub fn add_plane_surface(
        &mut self,
        boundary: &CurveLoop,
        holes: &[&CurveLoop],
    ) -> Result<Surface, GeometryError> {
        let id = self.next_name("s");
        let loops = join(
            std::iter::once(boundary.id.as_str()).chain(holes.iter().map(|h| h.id.as_str())),
        );
        self.push(format!("{id} = news;"));
        self.push(format!("Plane Surface({id}) = {{{loops}}};"));
        Ok(Surface { id })
    }

    /// Adds a filling surface through a loop of three or four curves.
    pub fn add_surface(&mut self, boundary: &CurveLoop) -> Result<Surface, GeometryError> {
        let id = self.next_name("rs");
        self.push(format!("{id} = news;"));
        self.push(format!("Surface({id}) = {{{}}};", boundary.id));
        Ok(Surface { id })
    }

    /// Adds a closed shell of surfaces.
    pub fn add_surface_loop(
        &mut self,
        surfaces: &[Surface],
    ) -> Result<SurfaceLoop, GeometryError> {
        if surfaces.is_empty() {
            return Err(GeometryError::EmptyOperands {
                operation: "Surface Loop",
            });
        }
        let id = self.next_name("sl");
        let refs = join(surfaces.iter().map(|s| s.id.as_str()));
        self.push(format!("{id} = newsl;"));
        self.push(format!("Surface Loop({id}) = {{{refs}}};"));
        Ok(SurfaceLoop { id })
    }

    /// Adds a volume bounded by `shell`, minus `holes`.
    pub fn add_volume(
        &mut self,
        shell: &SurfaceLoop,
        holes: &[&SurfaceLoop],
    ) -> Result<Volume, GeometryError> {
        let id = self.next_name("vol");
        let loops = join(
            std::iter::once(shell.id.as_str()).chain(holes.iter().map(|h| h.id.as_str())),
        );
        self.push(format!("{id} = newv;"));
        self.push(format!("Volume({id}) = {{{loops}}};"));
        Ok(Volume { id })
    }

    // =========================================================================
    // PHYSICAL GROUPS
    // =========================================================================

    /// Groups entities of one dimension under a physical tag.
    ///
    /// Once any physical group exists, gmsh only saves elements that belong
    /// to a physical group.
    pub fn add_physical<I, T>(
        &mut self,
        entities: I,
        label: Option<&str>,
    ) -> Result<PhysicalGroup, GeometryError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Entity>,
    {
        let entities: Vec<Entity> = entities.into_iter().map(Into::into).collect();
        let dim = common_dim("Physical", &entities)?;

        let tag = self.next_physical_tag;
        self.next_physical_tag += 1;

        let refs = join(entities.iter().map(Entity::reference));
        let head = match label {
            Some(label) => format!("\"{}\", {tag}", label.replace('"', "\\\"")),
            None => tag.to_string(),
        };
        self.push(format!("Physical {}({head}) = {{{refs}}};", dim.keyword()));
        Ok(PhysicalGroup {
            dim,
            tag,
            label: label.map(str::to_string),
        })
    }
}

impl<K: Kernel> Default for Geometry<K> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// VALIDATION HELPERS
// =============================================================================

pub(crate) fn check_mesh_size(value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidMeshSize { value })
    }
}

fn check_arc(start: &Point, center: &Point, end: &Point) -> Result<(), GeometryError> {
    let a = start.coords - center.coords;
    let b = end.coords - center.coords;
    let (ra, rb) = (a.length(), b.length());
    if ra <= EPSILON_TOLERANCE || rb <= EPSILON_TOLERANCE {
        return Err(GeometryError::degenerate(format!(
            "arc endpoint coincides with center {}",
            center.id
        )));
    }
    let cos = (a.dot(b) / (ra * rb)).clamp(-1.0, 1.0);
    let angle = cos.acos();
    if angle <= EPSILON_TOLERANCE {
        return Err(GeometryError::degenerate(format!(
            "arc from {} to {} has zero sweep",
            start.id, end.id
        )));
    }
    if angle >= PI - EPSILON_TOLERANCE {
        return Err(GeometryError::invalid_angle(
            angle,
            "circle arcs must be strictly smaller than pi",
        ));
    }
    Ok(())
}

/// Returns the shared dimension of `entities`, or an error if the list is
/// empty or mixes dimensions.
pub(crate) fn common_dim(operation: &'static str, entities: &[Entity]) -> Result<Dim, GeometryError> {
    let first = entities
        .first()
        .ok_or(GeometryError::EmptyOperands { operation })?
        .dim();
    for entity in &entities[1..] {
        if entity.dim() != first {
            return Err(GeometryError::MixedDimensions {
                operation,
                expected: first,
                found: entity.dim(),
            });
        }
    }
    Ok(first)
}
