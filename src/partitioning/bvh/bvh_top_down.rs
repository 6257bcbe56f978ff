use super::{Bvh, BvhBuildConfig, BvhNode, BvhObject};

impl Bvh {
    /// Builds the hierarchy over `objects` with a recursive top-down median
    /// split.
    ///
    /// Each recursion level bounds its range, then sorts it by AABB center
    /// along the longest axis of the bound and splits it in two halves.
    /// A range becomes a leaf once it is small enough
    /// (`config.min_objects`), tight enough (`config.min_volume`) or deep
    /// enough (`config.max_depth`).
    ///
    /// Any previous content of the tree is cleared first, so rebuilding over
    /// a populated tree is well-defined.
    pub fn build_top_down<T: BvhObject>(&mut self, objects: &mut [T], config: &BvhBuildConfig) {
        if self.root.is_some() {
            log::debug!(
                "rebuilding a non-empty bvh: dropping {} nodes",
                self.nodes.len()
            );
        }
        self.clear(objects);

        if objects.is_empty() {
            return;
        }

        let mut range: Vec<u32> = (0..objects.len() as u32).collect();
        self.build_top_down_range(objects, &mut range, config, None, 0);
    }

    fn build_top_down_range<T: BvhObject>(
        &mut self,
        objects: &mut [T],
        range: &mut [u32],
        config: &BvhBuildConfig,
        parent: Option<u32>,
        level: u32,
    ) {
        if range.is_empty() {
            return;
        }

        // Bound and count the range in a single pass.
        let mut bv = objects[range[0] as usize].aabb();
        for &i in &range[1..] {
            bv.merge(&objects[i as usize].aabb());
        }
        let count = range.len() as u32;

        let id = self.push_node(BvhNode::new(bv));
        match parent {
            Some(parent) => self.attach_child(parent, id),
            None => {
                self.root = Some(id);
                self.object_count = count;
            }
        }

        // A single object can never be split, whatever the configuration.
        if count <= config.min_objects.max(1)
            || bv.volume() <= config.min_volume
            || level >= config.max_depth
        {
            // The initial clear unlinked every object, so they thread onto
            // the fresh leaf from scratch.
            for &i in range.iter() {
                self.add_object(objects, id, i);
            }

            return;
        }

        let axis = bv.longest_axis();
        range.sort_unstable_by(|&a, &b| {
            let ca = objects[a as usize].aabb().center()[axis];
            let cb = objects[b as usize].aabb().center()[axis];
            ca.total_cmp(&cb)
        });

        let (lo, hi) = range.split_at_mut(count as usize / 2);
        self.build_top_down_range(objects, lo, config, Some(id), level + 1);
        self.build_top_down_range(objects, hi, config, Some(id), level + 1);
    }
}
