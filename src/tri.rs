use crate::random::RandomSource;
use glam::Vec3;
use super::Uniform;

/// A triangle given by its three corner positions, in winding order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Triangle { a, b, c }
    }

    /// Half the magnitude of the cross product of the edges leaving `a`.
    pub fn area(&self) -> f32 {
        0.5 * self.cross().length()
    }

    /// Like `area`, but evaluated in `f64` so that large coordinates do not
    /// overflow the cross product.
    pub fn precise_area(&self) -> f64 {
        let (a, b, c) = (self.a.as_dvec3(), self.b.as_dvec3(), self.c.as_dvec3());
        0.5 * (b - a).cross(c - a).length()
    }

    /// Flat face normal following the winding order, or the zero vector
    /// for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        self.cross().normalize_or_zero()
    }

    /// Weights `a`, `b` and `c` with the given barycentric coordinates.
    pub fn interpolate(&self, bary: [f32; 3]) -> Vec3 {
        interpolate(bary, self.a, self.b, self.c)
    }

    fn cross(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a)
    }
}

impl From<[Vec3; 3]> for Triangle {
    fn from(corners: [Vec3; 3]) -> Self {
        Triangle::new(corners[0], corners[1], corners[2])
    }
}

impl From<(Vec3, Vec3, Vec3)> for Triangle {
    fn from((a, b, c): (Vec3, Vec3, Vec3)) -> Self {
        Triangle::new(a, b, c)
    }
}

impl Uniform for Triangle {
    fn uniform<R: RandomSource + ?Sized>(&self, random: &R) -> Vec3 {
        let u = random.random();
        let v = random.random();
        self.interpolate(sample_bary(u, v))
    }
}

/// Maps a point of the unit square to uniformly distributed barycentric
/// coordinates by folding the upper half of the square back onto the
/// lower one. Returns the weights for the first, second and third corner.
pub fn sample_bary(u: f64, v: f64) -> [f32; 3] {
    let (u, v) = if u + v > 1.0 {
        (1.0 - u, 1.0 - v)
    } else {
        (u, v)
    };

    [u as f32, v as f32, (1.0 - (u + v)) as f32]
}

pub(crate) fn interpolate(bary: [f32; 3], a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    bary[0] * a + bary[1] * b + bary[2] * c
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::random::ThreadRandom;

    #[test]
    fn test_sample_tri_point() {
        let tri = Triangle::new(
            Vec3::new(100.0, 100.0, 100.0),
            Vec3::new(200.0, 100.0, 100.0),
            Vec3::new(100.0, 200.0, 100.0),
        );

        for _ in 0..100 {
            let on_there = tri.uniform(&ThreadRandom);
            assert_ulps_eq!(on_there.z, 100.0);
            assert!(on_there.x > 100.0 - 1e-3 && on_there.x < 200.0 + 1e-3);
            assert!(on_there.y > 100.0 - 1e-3 && on_there.y < 200.0 + 1e-3);
            assert!(on_there.x + on_there.y < 300.0 + 1e-3);
        }
    }

    #[test]
    fn test_area_and_normal() {
        let tri = Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        );

        assert_ulps_eq!(2.0, tri.area());
        assert_eq!(Vec3::Z, tri.normal());

        let flipped = Triangle::new(tri.a, tri.c, tri.b);
        assert_eq!(-Vec3::Z, flipped.normal());
    }

    #[test]
    fn test_precise_area_of_huge_triangle() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::new(1e20, 0.0, 0.0), Vec3::new(0.0, 1e20, 0.0));

        assert_eq!(f32::INFINITY, tri.area());
        assert_relative_eq!(0.5e40, tri.precise_area(), max_relative = 1e-6);
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let line = Triangle::new(Vec3::ZERO, Vec3::X, 2.0 * Vec3::X);
        assert_eq!(0.0, line.area());
        assert_eq!(Vec3::ZERO, line.normal());
    }

    #[test]
    fn test_bary_folds_upper_half() {
        assert_eq!([0.25, 0.5, 0.25], sample_bary(0.25, 0.5));
        assert_eq!([0.25, 0.25, 0.5], sample_bary(0.75, 0.75));
    }

    #[test]
    fn test_bary_in_unit_simplex() {
        let steps = 20;
        for i in 0..steps {
            for j in 0..steps {
                let u = (i as f64 + 0.3) / steps as f64;
                let v = (j as f64 + 0.3) / steps as f64;
                let bary = sample_bary(u, v);
                assert!(bary.iter().all(|w| *w >= 0.0 && *w <= 1.0), "{:?}", bary);
                assert_relative_eq!(1.0, bary.iter().sum::<f32>(), epsilon = 1e-6);
            }
        }
    }
}
