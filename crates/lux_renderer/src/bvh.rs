//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree built top-down by a median split along a randomly chosen
//! axis. The tree shape differs between builds; hit results do not.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::sampling::gen_axis;
use crate::{HitRecord, Hittable, HittableList};
use lux_math::{Aabb, Interval, Ray};
use rand::RngCore;

/// BVH node with exactly two children.
///
/// Children are shared: a node over a single object holds that object in
/// both slots.
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Arc<dyn Hittable>,
    bbox: Aabb,
    depth: usize,
}

impl BvhNode {
    /// Build a BVH over a list of hittable objects.
    ///
    /// An empty input gives a node that never reports a hit.
    pub fn new(mut objects: Vec<Arc<dyn Hittable>>, rng: &mut dyn RngCore) -> Self {
        if objects.is_empty() {
            let empty: Arc<dyn Hittable> = Arc::new(HittableList::new());
            return Self::with_children(empty.clone(), empty, 1);
        }
        Self::build(&mut objects, rng)
    }

    /// Build a BVH from the contents of a flat list.
    pub fn from_list(list: HittableList, rng: &mut dyn RngCore) -> Self {
        Self::new(list.into_objects(), rng)
    }

    fn with_children(left: Arc<dyn Hittable>, right: Arc<dyn Hittable>, depth: usize) -> Self {
        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());
        Self {
            left,
            right,
            bbox,
            depth,
        }
    }

    /// Recursive construction over a non-empty slice.
    fn build(objects: &mut [Arc<dyn Hittable>], rng: &mut dyn RngCore) -> Self {
        match objects.len() {
            1 => Self::with_children(objects[0].clone(), objects[0].clone(), 1),
            2 => Self::with_children(objects[0].clone(), objects[1].clone(), 1),
            n => {
                let axis = gen_axis(rng);
                objects.sort_unstable_by(|a, b| box_compare(a.as_ref(), b.as_ref(), axis));

                let (left_objects, right_objects) = objects.split_at_mut(n / 2);
                let left = Self::build(left_objects, rng);
                let right = Self::build(right_objects, rng);
                let depth = 1 + left.depth.max(right.depth);

                Self::with_children(Arc::new(left), Arc::new(right), depth)
            }
        }
    }

    /// Number of BVH nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Order two objects by the minimum of their bounding boxes along `axis`.
fn box_compare(a: &dyn Hittable, b: &dyn Hittable, axis: usize) -> Ordering {
    let a_min = a.bounding_box().axis_interval(axis).min;
    let b_min = b.bounding_box().axis_interval(axis).min;
    a_min.total_cmp(&b_min)
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        let hit_left = self.left.hit(ray, ray_t);

        // Only check right up to closest hit
        let right_max = hit_left.map_or(ray_t.max, |rec| rec.t);
        let hit_right = self.right.hit(ray, Interval::new(ray_t.min, right_max));

        hit_right.or(hit_left)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
