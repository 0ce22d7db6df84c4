//! Number and list formatting for `.geo` statements.

use glam::DVec3;

use crate::error::GeometryError;

/// Formats a float so that gmsh parses it back to the same value.
///
/// `Debug` output is the shortest round-trip representation and always
/// carries a decimal point or exponent (`1.0`, `0.05`, `1e-7`).
pub(crate) fn num(value: f64) -> String {
    format!("{value:?}")
}

/// Formats `x, y, z`.
pub(crate) fn vec3(v: DVec3) -> String {
    format!("{}, {}, {}", num(v.x), num(v.y), num(v.z))
}

/// Joins already-formatted items with `, `.
pub(crate) fn join<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(item.as_ref());
    }
    out
}

/// Rejects NaN and infinities, naming `context` in the error.
pub(crate) fn finite(value: f64, context: &str) -> Result<f64, GeometryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::non_finite(context))
    }
}

/// Converts a coordinate triple, rejecting non-finite components.
pub(crate) fn finite_vec3(coords: [f64; 3], context: &str) -> Result<DVec3, GeometryError> {
    let v = DVec3::from_array(coords);
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GeometryError::non_finite(context))
    }
}

/// Rejects non-finite or non-positive lengths.
pub(crate) fn positive(value: f64, context: &str) -> Result<f64, GeometryError> {
    finite(value, context)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::degenerate(format!(
            "{context} must be positive, got {value}"
        )))
    }
}
