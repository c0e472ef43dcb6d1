use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A simple 3D vector in simulation units.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Creates a new Vec3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    /// Creates a zero vector.
    pub fn zero() -> Self {
        Vec3 { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Unit vector for polar angle `theta` (from +z) and azimuth `phi`.
    pub fn from_spherical(theta: f64, phi: f64) -> Self {
        let sin_theta = theta.sin();
        Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), theta.cos())
    }

    /// Calculates the squared length (magnitude) of the vector.
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Calculates the length (magnitude) of the vector.
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Returns a normalized version of the vector (unit vector).
    /// Returns a zero vector if the original vector's length is zero.
    pub fn normalize_or_zero(&self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > 1e-24 {
            self.scale(1.0 / len_sq.sqrt())
        } else {
            Vec3::zero()
        }
    }

    /// Calculates the dot product with another vector.
    pub fn dot(&self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Scales the vector by a scalar value.
    pub fn scale(&self, scalar: f64) -> Self {
        Vec3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }

    /// Rotates the x and y components about the z-axis by `angle` radians.
    pub fn rotate_z(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec3::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
            self.z,
        )
    }

    /// Rotates the y and z components about the x-axis by `angle` radians.
    pub fn rotate_x(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec3::new(
            self.x,
            self.y * cos - self.z * sin,
            self.y * sin + self.z * cos,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// Implement standard operators for convenience
impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

/// Rotates the point `(x, y, z)` about the z-axis by `angle` radians.
pub fn rotate_z(x: f64, y: f64, z: f64, angle: f64) -> (f64, f64, f64) {
    let v = Vec3::new(x, y, z).rotate_z(angle);
    (v.x, v.y, v.z)
}
