//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over shared scene nodes. Each node caches the union of its
//! children's boxes; a ray that misses that box skips the whole subtree.
//!
//! Leaves remember where their object sat in the input. Two hits at exactly
//! the same `t` resolve to the earlier object, the same answer a linear scan
//! over the input gives.

use crate::{
    error::{BuildError, BuildResult},
    hittable::{HitRecord, Hittable, HittableList},
};
use ember_math::{Aabb, Interval, Ray};
use rand::{Rng, RngCore};
use std::cmp::Ordering;
use std::sync::Arc;

/// Interior BVH node. With a single object both children alias it.
pub struct BvhNode {
    left: BvhChild,
    right: BvhChild,
    bbox: Aabb,
    depth: usize,
}

#[derive(Clone)]
enum BvhChild {
    /// A scene object and its index in the input slice.
    Leaf {
        object: Arc<dyn Hittable>,
        order: usize,
    },
    Node(Arc<BvhNode>),
}

impl BvhChild {
    fn bounding_box(&self, time0: f64, time1: f64) -> Aabb {
        match self {
            BvhChild::Leaf { object, .. } => object.bounding_box(time0, time1),
            BvhChild::Node(node) => node.bbox,
        }
    }

    fn depth(&self) -> usize {
        match self {
            BvhChild::Leaf { .. } => 0,
            BvhChild::Node(node) => node.depth,
        }
    }

    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<(HitRecord<'_>, usize)> {
        match self {
            BvhChild::Leaf { object, order } => object.hit(ray, ray_t).map(|rec| (rec, *order)),
            BvhChild::Node(node) => node.hit_ordered(ray, ray_t),
        }
    }
}

type Indexed = (usize, Arc<dyn Hittable>);

/// Order two objects by the minimum corner of their boxes on `axis`.
fn box_compare(a: &Indexed, b: &Indexed, axis: usize, time0: f64, time1: f64) -> Ordering {
    let a_min = a.1.bounding_box(time0, time1).min[axis];
    let b_min = b.1.bounding_box(time0, time1).min[axis];
    a_min.total_cmp(&b_min)
}

/// Smallest `f64` above a finite `t`.
fn next_up(t: f64) -> f64 {
    if t == 0.0 {
        return f64::from_bits(1);
    }
    let bits = t.to_bits();
    if t > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

fn leaf((order, object): Indexed) -> BvhChild {
    BvhChild::Leaf { object, order }
}

impl BvhNode {
    /// Build a BVH over `objects`, whose boxes are taken over
    /// `[time0, time1]`. The boxes are cached, so that interval must already
    /// cover every ray time the tree will see.
    ///
    /// Split axes are chosen at random from `rng`.
    pub fn new(
        objects: &[Arc<dyn Hittable>],
        time0: f64,
        time1: f64,
        rng: &mut dyn RngCore,
    ) -> BuildResult<Self> {
        if objects.is_empty() {
            return Err(BuildError::EmptyObjectList);
        }

        let indexed = objects.iter().cloned().enumerate().collect();
        let node = Self::build(indexed, time0, time1, rng);
        log::debug!(
            "Built BVH over {} objects (depth {})",
            objects.len(),
            node.depth
        );
        Ok(node)
    }

    /// Build a BVH over the contents of a list. The list itself is untouched.
    pub fn from_list(
        list: &HittableList,
        time0: f64,
        time1: f64,
        rng: &mut dyn RngCore,
    ) -> BuildResult<Self> {
        Self::new(list.objects(), time0, time1, rng)
    }

    /// Recursive construction. `objects` is never empty.
    fn build(mut objects: Vec<Indexed>, time0: f64, time1: f64, rng: &mut dyn RngCore) -> Self {
        let axis = rng.gen_range(0..3);

        let (left, right) = match objects.len() {
            1 => {
                let only = leaf(objects.remove(0));
                (only.clone(), only)
            }
            2 => {
                let b = objects.remove(1);
                let a = objects.remove(0);
                if box_compare(&a, &b, axis, time0, time1) == Ordering::Greater {
                    (leaf(b), leaf(a))
                } else {
                    (leaf(a), leaf(b))
                }
            }
            n => {
                objects.sort_by(|a, b| box_compare(a, b, axis, time0, time1));

                // Split at midpoint
                let right_objects = objects.split_off(n / 2);
                let left_node = Self::build(objects, time0, time1, rng);
                let right_node = Self::build(right_objects, time0, time1, rng);
                (
                    BvhChild::Node(Arc::new(left_node)),
                    BvhChild::Node(Arc::new(right_node)),
                )
            }
        };

        let bbox = Aabb::surrounding(
            &left.bounding_box(time0, time1),
            &right.bounding_box(time0, time1),
        );
        let depth = 1 + left.depth().max(right.depth());

        Self {
            left,
            right,
            bbox,
            depth,
        }
    }

    /// Number of interior levels from this node down to the deepest leaf.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Closest hit plus the input index of the object that produced it.
    fn hit_ordered(&self, ray: &Ray, ray_t: Interval) -> Option<(HitRecord<'_>, usize)> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let hit_left = self.left.hit(ray, ray_t);

        // Right is searched up to and including the left hit's t
        let right_max = hit_left.as_ref().map_or(ray_t.max, |(rec, _)| next_up(rec.t));
        let hit_right = self.right.hit(ray, Interval::new(ray_t.min, right_max));

        match (hit_left, hit_right) {
            (Some(left), Some(right)) => {
                let right_wins =
                    right.0.t < left.0.t || (right.0.t == left.0.t && right.1 < left.1);
                Some(if right_wins { right } else { left })
            }
            (left, right) => left.or(right),
        }
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.hit_ordered(ray, ray_t).map(|(rec, _)| rec)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Aabb {
        self.bbox
    }
}
