// Copyright @yucwang 2026

use super::constants::{ Float, Vector3f, COS_THETA_FLOOR, GRAZING_EPS, NORMALIZE_EPS };

/// Per-pixel orthonormal shading basis. `z` is the (normalized) surface
/// normal; `x` and `y` span the tangent plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: Vector3f,
    pub y: Vector3f,
    pub z: Vector3f
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            x: Vector3f::new(1.0, 0.0, 0.0),
            y: Vector3f::new(0.0, 1.0, 0.0),
            z: Vector3f::new(0.0, 0.0, 1.0)
        }
    }
}

impl Frame {
    pub fn new(new_x: Vector3f, new_y: Vector3f, new_z: Vector3f) -> Frame {
        Frame {
            x: new_x,
            y: new_y,
            z: new_z
        }
    }

    /// Branchless sign-based construction, continuous over the whole
    /// sphere including the poles.
    /// [Duff et al. 17] Building An Orthonormal Basis, Revisited. JCGT. 2017.
    pub fn from_normal(n: &Vector3f) -> Frame {
        let len = n.norm().max(NORMALIZE_EPS);
        let z = n / len;

        let sgn = if z.z >= 0.0 { 1.0 } else { -1.0 };
        let a = -1.0 / (sgn + z.z);
        let b = z.x * z.y * a;

        Frame {
            x: Vector3f::new(1.0 + sgn * z.x * z.x * a, sgn * b, -sgn * z.x),
            y: Vector3f::new(b, sgn + z.y * z.y * a, -z.y),
            z
        }
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.x), v.dot(&self.y), v.dot(&self.z))
    }

    pub fn from_local(&self, v: &Vector3f) -> Vector3f {
        v.x * self.x + v.y * self.y + v.z * self.z
    }
}

/// A direction expressed in a shading frame. The z component is the cosine
/// with the surface normal; `valid` is false for directions that fell below
/// the grazing threshold before the stability clamp.
#[derive(Debug, Clone, Copy)]
pub struct ShadingDirection {
    pub dir: Vector3f,
    pub valid: bool
}

impl ShadingDirection {
    pub fn cos_theta(&self) -> Float {
        self.dir.z
    }
}

/// Transform a world direction into `frame`, optionally folding the lower
/// hemisphere onto the upper one, then mask and clamp the grazing region.
/// Directions with local z below the grazing threshold are flagged invalid;
/// their z is still floored and the vector renormalized so downstream
/// divisions stay finite.
pub fn to_shading_local(frame: &Frame, world: &Vector3f, double_sided: bool) -> ShadingDirection {
    let mut d = frame.to_local(world);
    if double_sided {
        d.z = d.z.abs();
    }

    let valid = d.z >= GRAZING_EPS;
    d.z = d.z.max(COS_THETA_FLOOR);
    let d = d / d.norm().max(NORMALIZE_EPS);

    ShadingDirection { dir: d, valid }
}
