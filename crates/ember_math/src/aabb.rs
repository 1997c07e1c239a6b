use crate::{Interval, Point3, Ray, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// Stored as its two extreme corners. A box whose `min` exceeds its `max` on
/// any axis is empty and is never hit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    /// Box spanning exactly `min..max` (no reordering).
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from two arbitrary corner points.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// Slab test: does `r` cross the box for some t inside `ray_t`?
    ///
    /// A zero direction component puts the ray parallel to that axis' slabs;
    /// the axis is then treated as always inside the slab and does not narrow
    /// the interval.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let dir = r.direction[axis];
            if dir == 0.0 {
                continue;
            }

            let inv_d = 1.0 / dir;
            let mut t0 = (self.min[axis] - r.origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - r.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }

    /// True when `other` lies entirely inside this box.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// True when `p` lies inside or on the box.
    pub fn contains_point(&self, p: Point3) -> bool {
        self.min.cmple(p).all() && self.max.cmpge(p).all()
    }

    /// The eight corners, x varying fastest.
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Move the box by `offset`.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb::new(self.min + offset, self.max + offset)
    }

    pub const EMPTY: Aabb = Aabb {
        min: Point3::splat(f64::INFINITY),
        max: Point3::splat(f64::NEG_INFINITY),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_points(Point3::splat(-1.0), Point3::splat(1.0))
    }

    #[test]
    fn test_aabb_from_points_orders_corners() {
        let aabb = Aabb::from_points(Point3::new(10.0, 0.0, 5.0), Point3::new(0.0, 10.0, -5.0));
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, -5.0));
        assert_eq!(aabb.max, Point3::new(10.0, 10.0, 5.0));
    }

    #[test]
    fn test_aabb_surrounding_contains_all_corners() {
        let a = Aabb::from_points(Point3::ZERO, Point3::new(5.0, 1.0, 5.0));
        let b = Aabb::from_points(Point3::new(3.0, -2.0, 3.0), Point3::new(10.0, 0.5, 4.0));
        let union = Aabb::surrounding(&a, &b);

        for corner in a.corners().iter().chain(b.corners().iter()) {
            assert!(union.contains_point(*corner), "{corner:?} outside {union:?}");
        }
        assert!(union.contains(&a));
        assert!(union.contains(&b));
    }

    #[test]
    fn test_aabb_surrounding_commutative_and_associative() {
        let a = Aabb::from_points(Point3::new(-1.0, 2.0, 0.0), Point3::new(0.5, 3.0, 1.0));
        let b = Aabb::from_points(Point3::new(4.0, -3.0, 2.0), Point3::new(6.0, 0.0, 2.5));
        let c = Aabb::from_points(Point3::new(0.0, 0.0, -9.0), Point3::new(0.1, 0.1, -8.0));

        assert_eq!(Aabb::surrounding(&a, &b), Aabb::surrounding(&b, &a));
        assert_eq!(
            Aabb::surrounding(&Aabb::surrounding(&a, &b), &c),
            Aabb::surrounding(&a, &Aabb::surrounding(&b, &c)),
        );
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &a), a);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = unit_box();

        let ray = Ray::new(Point3::new(0.2, 0.3, -5.0), Vec3::new(0.01, -0.02, 1.0), 0.0);
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Pointing away
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::new(0.1, 0.1, -1.0), 0.0);
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Interval ends before the box
        let ray = Ray::new(Point3::new(0.1, 0.1, -5.0), Vec3::new(0.01, 0.01, 1.0), 0.0);
        assert!(!aabb.hit(&ray, Interval::new(0.0, 3.0)));
    }

    #[test]
    fn test_aabb_zero_direction_component_is_inside_slab() {
        let aabb = unit_box();

        // Parallel to the x and y slabs, crossing z
        let ray = Ray::new(Point3::new(0.5, 0.5, -5.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Origin sitting exactly on a slab plane would give 0 * inf
        let ray = Ray::new(Point3::new(1.0, -1.0, -5.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_empty_never_hit() {
        let ray = Ray::new(Point3::ZERO, Vec3::new(1.0, 1.0, 1.0), 0.0);
        assert!(!Aabb::EMPTY.hit(&ray, Interval::UNIVERSE));
    }

    #[test]
    fn test_aabb_translate() {
        let aabb = Aabb::from_points(Point3::ZERO, Point3::splat(2.0));
        let moved = aabb.translate(Vec3::new(5.0, 0.0, -1.0));
        assert_eq!(moved.min, Point3::new(5.0, 0.0, -1.0));
        assert_eq!(moved.max, Point3::new(7.0, 2.0, 1.0));
    }
}
