use std::f64::consts::FRAC_PI_2;
use std::f64::consts::PI;

use crate::math::angle::angle_between_two_lines_3d;
use crate::math::{Matrix3, Point3, Vector3};

/// The two-axis rotation that carries a plane normal onto `+z`.
///
/// Points are first rotated by `theta` about the z-axis (zeroing the
/// normal's y component), then by `phi` about the y-axis. The composed matrix
/// is `Ry(phi) · Rz(theta)`; the order is fixed. A spun rotation adds a
/// half turn about the y-axis on top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalRotation {
    theta: f64,
    phi: f64,
    sin_theta: f64,
    cos_theta: f64,
    sin_phi: f64,
    cos_phi: f64,
    spin180: bool,
}

impl CanonicalRotation {
    /// Rotation by the given angles (radians).
    #[must_use]
    pub fn from_angles(theta: f64, phi: f64) -> Self {
        Self {
            theta,
            phi,
            sin_theta: theta.sin(),
            cos_theta: theta.cos(),
            sin_phi: phi.sin(),
            cos_phi: phi.cos(),
            spin180: false,
        }
    }

    /// The frame a 2D path already lives in.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_angles(0.0, 0.0)
    }

    /// Rotation that brings the unit `normal` onto the z-axis.
    ///
    /// `theta` is kept within `[-π/2, π/2]`; when it would leave that range it
    /// is shifted by `π` and `phi` changes sign, so the normal may land on
    /// `-z` instead of `+z`.
    #[must_use]
    pub fn from_normal(normal: &Vector3) -> Self {
        let mut theta = -normal.y.atan2(normal.x);
        let in_xz = Point3::new(normal.x.hypot(normal.y), 0.0, normal.z);
        let mut phi =
            -angle_between_two_lines_3d(&Point3::origin(), &in_xz, &Point3::new(0.0, 0.0, 1.0));

        if theta > FRAC_PI_2 {
            theta -= PI;
            phi = -phi;
        }
        if theta < -FRAC_PI_2 {
            theta += PI;
            phi = -phi;
        }

        Self::from_angles(theta, phi)
    }

    /// This rotation with the half turn about the y-axis toggled when
    /// `spin180` is set.
    #[must_use]
    pub fn spun(mut self, spin180: bool) -> Self {
        self.spin180 ^= spin180;
        self
    }

    /// Whether the half turn about the y-axis is part of this rotation.
    #[must_use]
    pub fn is_spun(&self) -> bool {
        self.spin180
    }

    /// Rotation about the z-axis.
    #[must_use]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Rotation about the y-axis.
    #[must_use]
    pub fn phi(&self) -> f64 {
        self.phi
    }

    #[must_use]
    pub fn sin_theta(&self) -> f64 {
        self.sin_theta
    }

    #[must_use]
    pub fn cos_theta(&self) -> f64 {
        self.cos_theta
    }

    #[must_use]
    pub fn sin_phi(&self) -> f64 {
        self.sin_phi
    }

    #[must_use]
    pub fn cos_phi(&self) -> f64 {
        self.cos_phi
    }

    /// The composed matrix `Ry(phi) · Rz(theta)`.
    ///
    /// With `spin180` the x and z rows change sign, an extra half turn about
    /// the y-axis that aligns canonical frames whose normals face opposite
    /// ways. A spun rotation already carries that half turn, so `spin180`
    /// toggles it.
    #[must_use]
    #[rustfmt::skip]
    pub fn matrix(&self, spin180: bool) -> Matrix3 {
        let s = if self.spin180 == spin180 { 1.0 } else { -1.0 };
        let (st, ct, sp, cp) = (self.sin_theta, self.cos_theta, self.sin_phi, self.cos_phi);

        Matrix3::new(
             s * cp * ct, -s * cp * st, s * sp,
             st,           ct,          0.0,
            -s * sp * ct,  s * sp * st, s * cp,
        )
    }

    /// Maps a world point into the canonical frame.
    #[must_use]
    pub fn apply(&self, point: &Point3, spin180: bool) -> Point3 {
        self.matrix(spin180) * point
    }

    /// Maps a canonical-frame point back to world coordinates.
    #[must_use]
    pub fn invert(&self, point: &Point3, spin180: bool) -> Point3 {
        self.matrix(spin180).transpose() * point
    }
}
