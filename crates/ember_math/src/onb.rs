use crate::Vec3;

/// Orthonormal basis `(u, v, w)` used to carry local-frame directions
/// (z-up) into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onb {
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Onb {
    /// Basis whose `w` axis is the normalized `n`.
    pub fn from_w(n: Vec3) -> Self {
        let w = n.normalize();
        // Any helper axis works as long as it is not parallel to w
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let v = w.cross(a).normalize();
        let u = w.cross(v);
        Self { u, v, w }
    }

    pub fn u(&self) -> Vec3 {
        self.u
    }

    pub fn v(&self) -> Vec3 {
        self.v
    }

    pub fn w(&self) -> Vec3 {
        self.w
    }

    /// World-space vector for local coordinates `a`.
    #[inline]
    pub fn local(&self, a: Vec3) -> Vec3 {
        a.x * self.u + a.y * self.v + a.z * self.w
    }
}
