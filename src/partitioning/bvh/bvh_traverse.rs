use std::collections::VecDeque;

use super::{Bvh, BvhNode, BvhObject};

impl Bvh {
    /// Visits every node of the tree in breadth-first order.
    pub fn traverse_level_order(&self, mut f: impl FnMut(u32, &BvhNode)) {
        if let Some(root) = self.root {
            self.traverse_level_order_from(root, &mut f);
        }
    }

    /// Visits every node of the subtree rooted at `id` in breadth-first
    /// order.
    pub fn traverse_level_order_from(&self, id: u32, mut f: impl FnMut(u32, &BvhNode)) {
        let mut queue = VecDeque::new();
        queue.push_back(id);

        while let Some(curr) = queue.pop_front() {
            let node = &self.nodes[curr as usize];

            for child in node.children.into_iter().flatten() {
                queue.push_back(child);
            }

            f(curr, node);
        }
    }

    /// Visits every object of every leaf of the tree, leaves in
    /// breadth-first order.
    pub fn traverse_level_order_objects<T: BvhObject>(
        &self,
        objects: &[T],
        mut f: impl FnMut(&T),
    ) {
        if let Some(root) = self.root {
            self.traverse_level_order_objects_from(objects, root, &mut f);
        }
    }

    /// Visits every object of every leaf of the subtree rooted at `id`.
    pub fn traverse_level_order_objects_from<T: BvhObject>(
        &self,
        objects: &[T],
        id: u32,
        mut f: impl FnMut(&T),
    ) {
        let mut queue = VecDeque::new();
        queue.push_back(id);

        while let Some(curr) = queue.pop_front() {
            let node = &self.nodes[curr as usize];

            for child in node.children.into_iter().flatten() {
                queue.push_back(child);
            }

            if !node.is_leaf() {
                continue;
            }

            let mut object = node.first_object;
            while let Some(i) = object {
                let item = &objects[i as usize];
                // Read the link before the callback in case it relinks the
                // object.
                object = item.bvh_info().next;
                f(item);
            }
        }
    }

    /// Mutable variant of [`Self::traverse_level_order_objects`]. The `next`
    /// link is read before the callback runs, so the callback may reset the
    /// object's membership data.
    pub(crate) fn traverse_level_order_objects_mut<T: BvhObject>(
        &self,
        objects: &mut [T],
        mut f: impl FnMut(&mut T),
    ) {
        let Some(root) = self.root else {
            return;
        };

        let mut queue = VecDeque::new();
        queue.push_back(root);

        while let Some(curr) = queue.pop_front() {
            let node = &self.nodes[curr as usize];

            for child in node.children.into_iter().flatten() {
                queue.push_back(child);
            }

            if !node.is_leaf() {
                continue;
            }

            let mut object = node.first_object;
            while let Some(i) = object {
                object = objects[i as usize].bvh_info().next;
                f(&mut objects[i as usize]);
            }
        }
    }
}
