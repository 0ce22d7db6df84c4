//! # Entity Handles
//!
//! Lightweight handles to entities declared in a [`crate::Geometry`].
//!
//! A handle carries the name of the script variable holding the entity's
//! tag (`p0`, `l3`, `s1`) or a list expression produced by an operation
//! (`bo1[]`, `ex0[1]`). Handles never own geometry: the external engine
//! does. They are cheap to clone and only meaningful for the geometry that
//! created them.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

// =============================================================================
// DIMENSION
// =============================================================================

/// Topological dimension of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dim {
    Point = 0,
    Curve = 1,
    Surface = 2,
    Volume = 3,
}

impl Dim {
    /// Keyword used by the `.geo` language for entity lists of this dimension.
    pub fn keyword(self) -> &'static str {
        match self {
            Dim::Point => "Point",
            Dim::Curve => "Curve",
            Dim::Surface => "Surface",
            Dim::Volume => "Volume",
        }
    }

    /// Returns the next higher dimension, if any.
    pub fn raised(self) -> Option<Dim> {
        match self {
            Dim::Point => Some(Dim::Curve),
            Dim::Curve => Some(Dim::Surface),
            Dim::Surface => Some(Dim::Volume),
            Dim::Volume => None,
        }
    }

    /// Numeric dimension.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

// =============================================================================
// ELEMENTARY HANDLES
// =============================================================================

/// A geometry point with its coordinates and optional characteristic length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub(crate) id: String,
    pub(crate) coords: DVec3,
    pub(crate) mesh_size: Option<f64>,
}

impl Point {
    /// Script variable holding the point tag.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Coordinates the point was declared with.
    pub fn coords(&self) -> DVec3 {
        self.coords
    }

    /// Characteristic mesh length at the point, if one was given.
    pub fn mesh_size(&self) -> Option<f64> {
        self.mesh_size
    }
}

/// A curve (line, arc, spline) with an orientation.
///
/// Reversing a curve does not create a new entity; it only flips the sign
/// used when the curve is referenced from a curve loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curve {
    pub(crate) id: String,
    pub(crate) reversed: bool,
}

impl Curve {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            reversed: false,
        }
    }

    /// Script variable holding the curve tag.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the same curve with the opposite orientation.
    pub fn reversed(&self) -> Self {
        Self {
            id: self.id.clone(),
            reversed: !self.reversed,
        }
    }

    /// Whether this handle refers to the curve in reverse.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reversed {
            write!(f, "-{}", self.id)
        } else {
            f.write_str(&self.id)
        }
    }
}

/// A closed loop of curves bounding a surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveLoop {
    pub(crate) id: String,
    pub(crate) curves: Vec<Curve>,
}

impl CurveLoop {
    /// Script variable holding the loop tag.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Curves forming the loop, in order.
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }
}

/// A surface: plane surface, filling surface, OCC primitive or the result
/// of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    pub(crate) id: String,
}

impl Surface {
    /// Script variable or list expression naming the surface.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A closed shell of surfaces bounding a volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceLoop {
    pub(crate) id: String,
}

impl SurfaceLoop {
    /// Script variable holding the shell tag.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub(crate) id: String,
}

impl Volume {
    /// Script variable or list expression naming the volume.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Mesh size field registered with `Field[n]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub(crate) id: u32,
}

impl Field {
    /// Numeric field tag.
    pub fn id(&self) -> u32 {
        self.id
    }
}

// =============================================================================
// ENTITY
// =============================================================================

/// Any entity that can take part in transformations, extrusions, physical
/// groups and boolean operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Point(Point),
    Curve(Curve),
    Surface(Surface),
    Volume(Volume),
}

impl Entity {
    /// Builds an entity of `dim` referring to the list expression `id`.
    pub(crate) fn from_expr(dim: Dim, id: String) -> Self {
        match dim {
            Dim::Point => Entity::Point(Point {
                id,
                coords: DVec3::ZERO,
                mesh_size: None,
            }),
            Dim::Curve => Entity::Curve(Curve::new(id)),
            Dim::Surface => Entity::Surface(Surface { id }),
            Dim::Volume => Entity::Volume(Volume { id }),
        }
    }

    /// Topological dimension.
    pub fn dim(&self) -> Dim {
        match self {
            Entity::Point(_) => Dim::Point,
            Entity::Curve(_) => Dim::Curve,
            Entity::Surface(_) => Dim::Surface,
            Entity::Volume(_) => Dim::Volume,
        }
    }

    /// Reference as written inside an entity list, including orientation.
    pub fn reference(&self) -> String {
        match self {
            Entity::Point(p) => p.id.clone(),
            Entity::Curve(c) => c.to_string(),
            Entity::Surface(s) => s.id.clone(),
            Entity::Volume(v) => v.id.clone(),
        }
    }

    /// Script name without orientation.
    pub fn id(&self) -> &str {
        match self {
            Entity::Point(p) => &p.id,
            Entity::Curve(c) => &c.id,
            Entity::Surface(s) => &s.id,
            Entity::Volume(v) => &v.id,
        }
    }

    /// Returns the surface handle if this entity is two-dimensional.
    pub fn as_surface(&self) -> Option<&Surface> {
        match self {
            Entity::Surface(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the volume handle if this entity is three-dimensional.
    pub fn as_volume(&self) -> Option<&Volume> {
        match self {
            Entity::Volume(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the curve handle if this entity is one-dimensional.
    pub fn as_curve(&self) -> Option<&Curve> {
        match self {
            Entity::Curve(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}}}", self.dim().keyword(), self.reference())
    }
}

macro_rules! impl_into_entity {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Entity {
                fn from(value: $ty) -> Self {
                    Entity::$ty(value)
                }
            }

            impl From<&$ty> for Entity {
                fn from(value: &$ty) -> Self {
                    Entity::$ty(value.clone())
                }
            }
        )*
    };
}

impl_into_entity!(Point, Curve, Surface, Volume);

impl From<&Entity> for Entity {
    fn from(value: &Entity) -> Self {
        value.clone()
    }
}

/// Renders `Keyword{a, b, c};` for a non-empty list of same-dimension
/// entities.
pub(crate) fn entity_list(dim: Dim, entities: &[Entity]) -> String {
    let refs: Vec<String> = entities.iter().map(Entity::reference).collect();
    format!("{}{{{}}};", dim.keyword(), refs.join(", "))
}
