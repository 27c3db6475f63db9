//! Point material description handed to the renderer.
//!
//! Everything here is fixed; only the alpha map is attached later, once its
//! texture finishes loading.

use crate::assets::TextureHandle;

/// World-space point size.
pub const POINT_SIZE: f32 = 0.1;
/// Fragments with alpha at or below this are discarded.
pub const ALPHA_TEST: f32 = 0.001;

bitflags::bitflags! {
    /// Material render-state flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MaterialFlags: u32 {
        const VERTEX_COLORS = 1 << 0;    // Per-point colors from the color buffer
        const TRANSPARENT = 1 << 1;
        const DEPTH_TEST = 1 << 2;
        const DEPTH_WRITE = 1 << 3;
        const SIZE_ATTENUATION = 1 << 4; // Points shrink with distance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blending {
    Normal,
    Additive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointsMaterial {
    pub size: f32,
    pub flags: MaterialFlags,
    pub alpha_test: f32,
    pub blending: Blending,
    pub alpha_map: Option<TextureHandle>,
}

impl PointsMaterial {
    /// Additive, vertex-colored, transparent particles without depth writes.
    pub fn particles() -> Self {
        Self {
            size: POINT_SIZE,
            flags: MaterialFlags::VERTEX_COLORS
                | MaterialFlags::TRANSPARENT
                | MaterialFlags::DEPTH_TEST
                | MaterialFlags::SIZE_ATTENUATION,
            alpha_test: ALPHA_TEST,
            blending: Blending::Additive,
            alpha_map: None,
        }
    }

    pub fn depth_write(&self) -> bool {
        self.flags.contains(MaterialFlags::DEPTH_WRITE)
    }
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self::particles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_material_constants() {
        let m = PointsMaterial::particles();
        assert_eq!(m.size, 0.1);
        assert_eq!(m.alpha_test, 0.001);
        assert_eq!(m.blending, Blending::Additive);
        assert!(m.flags.contains(MaterialFlags::VERTEX_COLORS | MaterialFlags::TRANSPARENT));
        assert!(!m.depth_write());
        assert_eq!(m.alpha_map, None);
    }
}
