//! Procedural point field.
//!
//! Generates a `width × length` grid of points on an undulating sheet:
//!
//! - `u = i / width`, `v = j / length`, both in `[0, 1)`
//! - `x = u - 0.5`, `z = v - 0.5`
//! - `y = (sin(u·π·10) + sin(v·π·6)) / 20`
//! - color = `lerp(high, low, u)`
//!
//! Points are stored row-major by `i` (over width) then `j` (over length),
//! in two flat `f32` buffers laid out the way a GPU vertex buffer expects.
//! Generation is pure: the same dimensions always produce the same bits.

use std::{collections::TryReserveError, f64::consts::PI, fmt};

use crate::{color::Rgb, math::Vec3};

/// Sine cycles across the width axis.
pub const U_FREQUENCY: f64 = 10.0;
/// Sine cycles across the length axis.
pub const V_FREQUENCY: f64 = 6.0;
/// Divisor applied to the summed sines.
pub const HEIGHT_DIVISOR: f64 = 20.0;

/// Height of the sheet at normalized grid coordinates `(u, v)`.
pub fn surface_height(u: f64, v: f64) -> f64 {
    ((u * PI * U_FREQUENCY).sin() + (v * PI * V_FREQUENCY).sin()) / HEIGHT_DIVISOR
}

/// Endpoint colors of the field gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldPalette {
    /// Color at `u = 0`.
    pub high: Rgb,
    /// Color approached as `u -> 1`.
    pub low: Rgb,
}

impl Default for FieldPalette {
    fn default() -> Self {
        Self {
            high: Rgb::from_hex(0x4DE7DA),
            low: Rgb::from_hex(0x5B7FE9),
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    fn from_points(mut points: impl Iterator<Item = Vec3>) -> Option<Self> {
        let first = points.next()?;
        Some(points.fold(
            Self {
                min: first,
                max: first,
            },
            |acc, p| Self {
                min: acc.min.min(p),
                max: acc.max.max(p),
            },
        ))
    }
}

/// One point of the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldPoint {
    pub position: Vec3,
    pub color: Rgb,
}

/// Field generation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Width or length was zero.
    InvalidDimension { width: usize, length: usize },
    /// The buffers for `width × length` points do not fit in memory.
    TooLarge { width: usize, length: usize },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidDimension { width, length } => {
                write!(f, "invalid field dimension {width}x{length}: both must be positive")
            }
            FieldError::TooLarge { width, length } => {
                write!(f, "field dimension {width}x{length} is too large")
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Generated, immutable point field.
#[derive(Debug, Clone, PartialEq)]
pub struct PointField {
    width: usize,
    length: usize,
    positions: Vec<f32>,
    colors: Vec<f32>,
    bounds: Aabb,
}

impl PointField {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of points (`width * length`).
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    /// Always false for a generated field; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat `[x, y, z, x, y, z, ...]` buffer.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat `[r, g, b, r, g, b, ...]` buffer.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Bounding box over all positions, computed once at generation.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Index of grid cell `(i, j)`, if inside the grid.
    pub fn index_of(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.width && j < self.length).then(|| i * self.length + j)
    }

    pub fn point(&self, index: usize) -> Option<FieldPoint> {
        let p = self.positions.get(3 * index..3 * index + 3)?;
        let c = self.colors.get(3 * index..3 * index + 3)?;
        Some(FieldPoint {
            position: Vec3::new(p[0], p[1], p[2]),
            color: Rgb::new(c[0], c[1], c[2]),
        })
    }

    /// Iterates points in generation order.
    pub fn iter(&self) -> impl Iterator<Item = FieldPoint> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.colors.chunks_exact(3))
            .map(|(p, c)| FieldPoint {
                position: Vec3::new(p[0], p[1], p[2]),
                color: Rgb::new(c[0], c[1], c[2]),
            })
    }
}

/// Point field generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldGenerator {
    palette: FieldPalette,
}

impl FieldGenerator {
    pub fn new(palette: FieldPalette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> FieldPalette {
        self.palette
    }

    /// Generates the field for a `width × length` grid.
    pub fn generate(&self, width: usize, length: usize) -> Result<PointField, FieldError> {
        if width == 0 || length == 0 {
            return Err(FieldError::InvalidDimension { width, length });
        }
        let floats = width
            .checked_mul(length)
            .and_then(|n| n.checked_mul(3))
            .ok_or(FieldError::TooLarge { width, length })?;

        let too_large = |_: TryReserveError| FieldError::TooLarge { width, length };
        let mut positions: Vec<f32> = Vec::new();
        positions.try_reserve_exact(floats).map_err(too_large)?;
        let mut colors: Vec<f32> = Vec::new();
        colors.try_reserve_exact(floats).map_err(too_large)?;

        for i in 0..width {
            let u = i as f64 / width as f64;
            let color = self.palette.high.lerp(self.palette.low, u as f32);
            for j in 0..length {
                let v = j as f64 / length as f64;
                positions.extend_from_slice(&[
                    (u - 0.5) as f32,
                    surface_height(u, v) as f32,
                    (v - 0.5) as f32,
                ]);
                colors.extend_from_slice(&color.to_array());
            }
        }

        let bounds = Aabb::from_points(
            positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        )
        .ok_or(FieldError::InvalidDimension { width, length })?;

        Ok(PointField {
            width,
            length,
            positions,
            colors,
            bounds,
        })
    }
}

/// Generates a field with the default palette.
pub fn generate(width: usize, length: usize) -> Result<PointField, FieldError> {
    FieldGenerator::default().generate(width, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            generate(0, 5).unwrap_err(),
            FieldError::InvalidDimension {
                width: 0,
                length: 5
            }
        );
        assert!(matches!(
            generate(3, 0),
            Err(FieldError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        assert!(matches!(
            generate(usize::MAX, 2),
            Err(FieldError::TooLarge { .. })
        ));
    }

    #[test]
    fn rejects_unallocatable_dimensions() {
        assert_eq!(
            generate(usize::MAX / 3, 1).unwrap_err(),
            FieldError::TooLarge {
                width: usize::MAX / 3,
                length: 1
            }
        );
    }

    #[test]
    fn single_point_sits_at_corner() {
        let field = generate(1, 1).unwrap();
        assert_eq!(field.len(), 1);
        let p = field.point(0).unwrap();
        assert_eq!(p.position, Vec3::new(-0.5, 0.0, -0.5));
        assert_eq!(p.color, FieldPalette::default().high);
        assert_eq!(field.bounds().min, field.bounds().max);
    }

    #[test]
    fn layout_is_row_major_over_width() {
        let field = generate(4, 3).unwrap();
        let k = field.index_of(2, 1).unwrap();
        assert_eq!(k, 7);
        let p = field.point(k).unwrap();
        assert_eq!(p.position.x, (0.5f64 - 0.5) as f32);
        assert_eq!(p.position.z, (1.0f64 / 3.0 - 0.5) as f32);
        assert_eq!(field.index_of(4, 0), None);
        assert_eq!(field.point(12), None);
    }

    #[test]
    fn height_matches_formula() {
        let field = generate(20, 12).unwrap();
        let p = field.point(field.index_of(1, 1).unwrap()).unwrap();
        let expected = ((0.05 * PI * 10.0).sin() + ((1.0 / 12.0) * PI * 6.0).sin()) / 20.0;
        assert_eq!(p.position.y, expected as f32);
    }

    #[test]
    fn buffers_are_three_floats_per_point() {
        let field = generate(7, 9).unwrap();
        assert_eq!(field.positions().len(), 3 * 63);
        assert_eq!(field.colors().len(), 3 * 63);
        assert_eq!(field.iter().count(), 63);
    }
}
