use std::io;

use super::{Bvh, BvhObject};

impl Bvh {
    /// Writes a human-readable description of the whole tree to `w`, one
    /// block per node in level order.
    pub fn dump_info<T: BvhObject, W: io::Write>(
        &self,
        objects: &[T],
        w: &mut W,
    ) -> io::Result<()> {
        writeln!(w, "GENERAL INFO:")?;
        writeln!(w, "{:>20} {}", "Depth:", self.depth())?;
        writeln!(w, "{:>20} {}", "Size:", self.size())?;
        writeln!(w)?;

        let mut result = Ok(());
        self.traverse_level_order(|id, _| {
            if result.is_ok() {
                result = self.dump_node_info(objects, id, w);
            }
        });
        result
    }

    /// Writes a human-readable description of the node `id` to `w`.
    pub fn dump_node_info<T: BvhObject, W: io::Write>(
        &self,
        objects: &[T],
        id: u32,
        w: &mut W,
    ) -> io::Result<()> {
        let node = &self.nodes[id as usize];
        let bv = &node.bv;

        writeln!(w, "NODE [{}]", id)?;
        writeln!(
            w,
            "{:>20} [{:.2},{:.2},{:.2}] [{:.2},{:.2},{:.2}]",
            "BV:", bv.mins.x, bv.mins.y, bv.mins.z, bv.maxs.x, bv.maxs.y, bv.maxs.z
        )?;
        writeln!(w, "{:>20} {:.2}", "Volume:", bv.volume())?;
        writeln!(w, "{:>20} {:.2}", "Surface area:", bv.surface_area())?;

        match node.children {
            [Some(left), Some(right)] => {
                writeln!(w, "{:>20}", "Children:")?;
                for child in [left, right] {
                    writeln!(w, "{:>25} [{}]", "NODE", child)?;
                    writeln!(w, "{:>30} {}", "Depth:", self.subtree_depth(child))?;
                    writeln!(w, "{:>30} {}", "Size:", self.subtree_size(child))?;
                }
            }
            _ => {
                writeln!(w, "{:>20} NONE", "Children:")?;
                writeln!(
                    w,
                    "{:>20} {}",
                    "Objects count:",
                    self.node_object_count(objects, id)
                )?;
            }
        }

        writeln!(w)
    }

    /// Writes a Graphviz script rendering the tree to `w`.
    ///
    /// The output is a `digraph` with one graph node per tree node,
    /// labelled with its bounds, surface area, volume and, for leaves, the
    /// object count, plus one edge per parent/child link.
    pub fn dump_graph<T: BvhObject, W: io::Write>(
        &self,
        objects: &[T],
        w: &mut W,
    ) -> io::Result<()> {
        writeln!(w, "digraph bvh {{")?;
        writeln!(
            w,
            "\tnode[group=\"\", shape=none, style=\"rounded,filled\", fontcolor=\"#101010\"]"
        )?;

        // Number the nodes by visit order so the script is stable across
        // arena layouts.
        let mut graph_ids = vec![0u32; self.nodes.len()];
        let mut next_id = 0u32;
        let mut result = Ok(());

        self.traverse_level_order(|id, node| {
            graph_ids[id as usize] = next_id;

            let bv = &node.bv;
            let mut label = format!(
                "[{:.2},{:.2},{:.2}]\\n[{:.2},{:.2},{:.2}]\\nSA: {:.2}\\nVOL: {:.2}",
                bv.mins.x,
                bv.mins.y,
                bv.mins.z,
                bv.maxs.x,
                bv.maxs.y,
                bv.maxs.z,
                bv.surface_area(),
                bv.volume()
            );
            if node.is_leaf() {
                label.push_str(&format!(
                    "\\n{} objects",
                    self.node_object_count(objects, id)
                ));
            }

            if result.is_ok() {
                result = writeln!(w, "\tNODE{}[label=\"{}\"];", next_id, label);
            }
            next_id += 1;
        });
        result?;

        let mut result = Ok(());
        self.traverse_level_order(|id, node| {
            for child in node.children.into_iter().flatten() {
                if result.is_ok() {
                    result = writeln!(
                        w,
                        "\tNODE{} -> NODE{};",
                        graph_ids[id as usize], graph_ids[child as usize]
                    );
                }
            }
        });
        result?;

        writeln!(w, "}}")
    }
}
