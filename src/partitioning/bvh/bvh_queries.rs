use smallvec::SmallVec;

use super::{Bvh, BvhObject};
use crate::math::Real;
use crate::query::{Frustum, Ray, SideResult};

const TRAVERSAL_STACK_SIZE: usize = 32;

struct RayQueryState<'a> {
    closest_only: bool,
    shortest_time: Real,
    closest_intersect: Option<u32>,
    all_hits: &'a mut Vec<u32>,
    tested_nodes: &'a mut Vec<u32>,
}

impl Bvh {
    /// Collects the ids of every object whose AABB is not outside `frustum`.
    ///
    /// Subtrees fully inside the frustum are emitted without further plane
    /// tests; subtrees fully outside are pruned; leaves crossing the
    /// boundary classify each of their objects individually.
    pub fn query<T: BvhObject>(&self, objects: &[T], frustum: &Frustum) -> Vec<u32> {
        let mut visible = Vec::new();

        let Some(root) = self.root else {
            return visible;
        };

        let mut stack: SmallVec<[u32; TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        stack.push(root);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id as usize];

            match frustum.classify(&node.bv) {
                SideResult::Outside => {}
                SideResult::Inside => {
                    // The whole subtree is visible, no more tests needed.
                    self.traverse_level_order_objects_from(objects, id, |object| {
                        visible.push(object.id());
                    });
                }
                SideResult::Intersecting => {
                    if node.is_leaf() {
                        let mut object = node.first_object;
                        while let Some(i) = object {
                            let item = &objects[i as usize];
                            if frustum.classify(&item.aabb()) != SideResult::Outside {
                                visible.push(item.id());
                            }
                            object = item.bvh_info().next;
                        }
                    } else {
                        for child in node.children.into_iter().flatten() {
                            stack.push(child);
                        }
                    }
                }
            }
        }

        visible
    }

    /// Casts `ray` against the tree, returning the id of the closest
    /// intersected object.
    ///
    /// `tested_nodes` receives the index of every node whose AABB was cast
    /// against. `all_hits` receives the id of every intersected object, or
    /// exactly the closest one when `closest_only` is set. Both vectors are
    /// cleared on entry.
    ///
    /// With `closest_only` the traversal descends into the nearest child
    /// first and skips the farther child whenever the best hit so far is
    /// closer than that child's entry time, which prunes a substantial part
    /// of the AABB tests.
    pub fn query_debug<T: BvhObject>(
        &self,
        objects: &[T],
        ray: &Ray,
        closest_only: bool,
        all_hits: &mut Vec<u32>,
        tested_nodes: &mut Vec<u32>,
    ) -> Option<u32> {
        all_hits.clear();
        tested_nodes.clear();

        let root = self.root?;

        let closest = {
            let mut state = RayQueryState {
                closest_only,
                shortest_time: Real::MAX,
                closest_intersect: None,
                all_hits,
                tested_nodes,
            };

            state.tested_nodes.push(root);
            if self.nodes[root as usize].bv.cast_ray(ray).is_some() {
                let _ = self.query_node_ray(objects, root, ray, &mut state);
            }

            state.closest_intersect
        };

        let closest = closest?;

        if closest_only {
            all_hits.clear();
            all_hits.push(closest);
        }

        Some(closest)
    }

    /// Returns the entry time of the closest object hit in the subtree
    /// rooted at `id`, tracking the global best in `state`.
    fn query_node_ray<T: BvhObject>(
        &self,
        objects: &[T],
        id: u32,
        ray: &Ray,
        state: &mut RayQueryState<'_>,
    ) -> Option<Real> {
        let node = &self.nodes[id as usize];

        if node.is_leaf() {
            let mut node_shortest: Option<Real> = None;

            let mut object = node.first_object;
            while let Some(i) = object {
                let item = &objects[i as usize];

                if let Some(time) = item.aabb().cast_ray(ray) {
                    if !state.closest_only {
                        state.all_hits.push(item.id());
                    }

                    if node_shortest.map_or(true, |best| time < best) {
                        node_shortest = Some(time);
                    }

                    if time < state.shortest_time {
                        state.shortest_time = time;
                        state.closest_intersect = Some(item.id());
                    }
                }

                object = item.bvh_info().next;
            }

            return node_shortest;
        }

        let [Some(first), Some(second)] = node.children else {
            unreachable!("bvh: internal node with a single child");
        };

        state.tested_nodes.push(first);
        let first_t = self.nodes[first as usize].bv.cast_ray(ray);
        state.tested_nodes.push(second);
        let second_t = self.nodes[second as usize].bv.cast_ray(ray);

        match (first_t, second_t) {
            (None, None) => None,
            (Some(_), None) => self.query_node_ray(objects, first, ray, state),
            (None, Some(_)) => self.query_node_ray(objects, second, ray, state),
            (Some(first_t), Some(second_t)) => {
                let (near, far, far_t) = if first_t < second_t {
                    (first, second, second_t)
                } else {
                    (second, first, first_t)
                };

                let near_best = self.query_node_ray(objects, near, ray, state);

                // The farther child only matters when the nearer subtree
                // missed or its best hit lies beyond the far entry time.
                if !state.closest_only || near_best.map_or(true, |t| t > far_t) {
                    let far_best = self.query_node_ray(objects, far, ray, state);
                    match (near_best, far_best) {
                        (Some(a), Some(b)) => Some(a.min(b)),
                        (a, b) => a.or(b),
                    }
                } else {
                    near_best
                }
            }
        }
    }
}
