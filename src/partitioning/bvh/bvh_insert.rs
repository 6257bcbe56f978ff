use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use super::{Bvh, BvhBuildConfig, BvhNode, BvhObject};
use crate::bounding_volume::Aabb;
use crate::math::Real;

/// Tolerance absorbing floating-point noise when comparing candidate costs.
const COST_EPSILON: Real = 1.0e-3;

/// One candidate position for a single-object insertion.
///
/// `cost_to_node` accumulates the volume inflation along the path from the
/// root down to `node`; routing the object through `node` would grow its
/// volume by `new_geom_change`, while splitting `node` under a new parent
/// would add a whole `new_geom` volume instead.
struct NodeCost {
    node: u32,
    level: u32,
    new_aabb: Aabb,
    new_geom: Real,
    new_geom_change: Real,
    root_to_new_parent_cost: Real,
    root_to_node_cost: Real,
}

impl NodeCost {
    fn new(bvh: &Bvh, node: u32, object_bv: &Aabb, cost_to_node: Real, level: u32) -> Self {
        let node_bv = bvh.nodes[node as usize].bv;
        let new_aabb = node_bv.merged(object_bv);
        let new_geom = new_aabb.volume();
        let new_geom_change = new_geom - node_bv.volume();

        Self {
            node,
            level,
            new_aabb,
            new_geom,
            new_geom_change,
            root_to_new_parent_cost: new_geom + cost_to_node,
            root_to_node_cost: cost_to_node + new_geom_change,
        }
    }
}

/// Pop order of the branch-and-bound frontier: deepest level first, ties
/// broken toward the smallest volume inflation.
struct FrontierEntry(NodeCost);

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.level.cmp(&other.0.level).then_with(|| {
            OrderedFloat(other.0.new_geom_change).cmp(&OrderedFloat(self.0.new_geom_change))
        })
    }
}

impl Bvh {
    /// Inserts every object of `objects` one by one, in slice order.
    ///
    /// Shuffle the slice beforehand to obtain a stochastically balanced
    /// tree on adversarial input orders.
    pub fn insert_all<T: BvhObject>(&mut self, objects: &mut [T], config: &BvhBuildConfig) {
        for i in 0..objects.len() as u32 {
            self.insert(objects, i, config);
        }
    }

    /// Inserts the object at position `object` into the tree.
    ///
    /// The insertion point is searched best-first: a frontier of candidate
    /// nodes is explored by descending level, pruning nothing above the
    /// cheapest known way of either appending the object to an existing
    /// leaf or splitting an existing node under a new parent. The search
    /// stops at the first leaf popped from the frontier, which is the leaf
    /// reachable through the least accumulated inflation.
    pub fn insert<T: BvhObject>(
        &mut self,
        objects: &mut [T],
        object: u32,
        config: &BvhBuildConfig,
    ) {
        self.object_count += 1;

        let object_bv = objects[object as usize].aabb();

        let Some(root) = self.root else {
            let id = self.push_node(BvhNode::new(object_bv));
            self.root = Some(id);
            self.add_object(objects, id, object);
            return;
        };

        // Explore the tree best-first, recording every popped candidate.
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry(NodeCost::new(self, root, &object_bv, 0.0, 0)));

        let mut visited: Vec<NodeCost> = Vec::new();
        let mut best = 0;
        let mut leaf_hit = false;

        while let Some(FrontierEntry(cost)) = frontier.pop() {
            let best_cost = visited
                .get(best)
                .map_or(Real::MAX, |c| c.root_to_new_parent_cost);
            if cost.root_to_new_parent_cost <= best_cost + COST_EPSILON {
                best = visited.len();
            }

            let node = cost.node;
            let level = cost.level;
            let root_to_node_cost = cost.root_to_node_cost;
            let children = self.nodes[node as usize].children;
            visited.push(cost);

            if let [Some(left), Some(right)] = children {
                frontier.push(FrontierEntry(NodeCost::new(
                    self,
                    left,
                    &object_bv,
                    root_to_node_cost,
                    level + 1,
                )));
                frontier.push(FrontierEntry(NodeCost::new(
                    self,
                    right,
                    &object_bv,
                    root_to_node_cost,
                    level + 1,
                )));
            } else {
                leaf_hit = true;
                break;
            }
        }

        if leaf_hit {
            let leaf_index = visited.len() - 1;
            let leaf = &visited[leaf_index];

            // Appending to the reached leaf beats creating a parent anywhere
            // cheaper on the trail?
            if leaf.root_to_node_cost < visited[best].root_to_new_parent_cost {
                let append_directly = self.node_object_count(objects, leaf.node)
                    < config.min_objects
                    || leaf.level >= config.max_depth;

                // A filled leaf that is past the volume threshold and would
                // actually inflate is split in place instead of growing.
                let split_at_leaf = !append_directly
                    && leaf.new_geom >= config.min_volume
                    && leaf.new_geom_change > 0.0;

                if split_at_leaf {
                    best = leaf_index;
                } else {
                    for cost in &visited {
                        self.nodes[cost.node as usize].bv = cost.new_aabb;
                    }

                    let leaf_node = visited[leaf_index].node;
                    self.add_object(objects, leaf_node, object);
                    return;
                }
            }
        }

        // Introduce a new internal node above the best candidate.
        let best_node = visited[best].node;
        let best_aabb = visited[best].new_aabb;

        if best_node == root {
            let new_root = self.push_node(BvhNode::new(best_aabb));
            let leaf = self.push_node(BvhNode::new(object_bv));
            self.nodes[new_root as usize].children = [Some(best_node), Some(leaf)];
            self.root = Some(new_root);
            self.add_object(objects, leaf, object);
            return;
        }

        // Grow every node recorded before the split point.
        for cost in &visited[..best] {
            self.nodes[cost.node as usize].bv = cost.new_aabb;
        }

        // The frontier pops a parent before pushing its children, so the
        // parent of the split node is always on the recorded trail.
        let parent = visited[..best]
            .iter()
            .map(|cost| cost.node)
            .find(|&id| self.nodes[id as usize].children.contains(&Some(best_node)))
            .unwrap_or_else(|| panic!("bvh: split node {} has no recorded parent", best_node));

        // Keep the split node on the same side it occupied under its parent.
        let slot = usize::from(self.nodes[parent as usize].children[0] != Some(best_node));

        let new_internal = self.push_node(BvhNode::new(best_aabb));
        let leaf = self.push_node(BvhNode::new(object_bv));

        let mut children = [None; 2];
        children[slot] = Some(best_node);
        children[slot ^ 1] = Some(leaf);
        self.nodes[new_internal as usize].children = children;
        self.nodes[parent as usize].children[slot] = Some(new_internal);

        self.add_object(objects, leaf, object);
    }
}
