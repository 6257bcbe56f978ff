use crate::bounding_volume::Aabb;
use crate::math::Real;

/// Construction rules for the [`Bvh`] builders.
///
/// Not all rules apply to all building strategies.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BvhBuildConfig {
    /// Nodes at this depth are never split further.
    pub max_depth: u32,
    /// Nodes must hold more than this many objects to be split.
    pub min_objects: u32,
    /// Nodes with a volume not above this will not be split.
    pub min_volume: Real,
}

impl Default for BvhBuildConfig {
    fn default() -> Self {
        Self {
            max_depth: u32::MAX,
            min_objects: 10,
            min_volume: 0.0,
        }
    }
}

/// Intrusive tree-membership data embedded in every [`BvhObject`].
///
/// `prev` and `next` are positions in the caller's object storage and chain
/// the objects of a single leaf; `node` points back to that leaf. All three
/// are written exclusively by the tree.
#[derive(Copy, Clone, Debug, Default)]
pub struct BvhInfo {
    pub(crate) node: Option<u32>,
    pub(crate) prev: Option<u32>,
    pub(crate) next: Option<u32>,
}

impl BvhInfo {
    /// The leaf currently containing this object, if any.
    #[inline]
    pub fn node(&self) -> Option<u32> {
        self.node
    }

    /// Does this object currently belong to a tree?
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.node.is_some()
    }
}

/// Trait implemented by scene objects indexable by a [`Bvh`].
///
/// The tree never owns objects: every operation borrows them through a
/// caller-owned slice, and objects are designated by their position in that
/// slice. While an object is a member of a tree, the caller must keep the
/// slice order stable, must not mutate [`BvhObject::aabb`], and must leave
/// the [`BvhInfo`] to the tree.
pub trait BvhObject {
    /// Stable identifier reported by queries.
    fn id(&self) -> u32;

    /// The world-space bounding box of this object.
    fn aabb(&self) -> Aabb;

    /// Read access to the intrusive membership data.
    fn bvh_info(&self) -> &BvhInfo;

    /// Write access to the intrusive membership data.
    fn bvh_info_mut(&mut self) -> &mut BvhInfo;
}

/// A node (internal or leaf) of a [`Bvh`].
///
/// A node is either a leaf (no children, one or more objects threaded
/// through the intrusive list) or internal (both children, no objects).
/// Children always come in pairs: a node with a single child is never
/// observable.
#[derive(Clone, Debug)]
pub struct BvhNode {
    pub(crate) bv: Aabb,
    pub(crate) children: [Option<u32>; 2],
    pub(crate) first_object: Option<u32>,
    pub(crate) last_object: Option<u32>,
}

impl BvhNode {
    #[inline]
    pub(crate) fn new(bv: Aabb) -> Self {
        Self {
            bv,
            children: [None; 2],
            first_object: None,
            last_object: None,
        }
    }

    /// This node's bounding volume.
    #[inline]
    pub fn bv(&self) -> Aabb {
        self.bv
    }

    /// The children of this node.
    #[inline]
    pub fn children(&self) -> [Option<u32>; 2] {
        self.children
    }

    /// The head of this node's intrusive object list.
    #[inline]
    pub fn first_object(&self) -> Option<u32> {
        self.first_object
    }

    /// The tail of this node's intrusive object list.
    #[inline]
    pub fn last_object(&self) -> Option<u32> {
        self.last_object
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        // Children are always created in pairs so checking one slot suffices.
        self.children[0].is_none()
    }
}

/// A Bounding Volume Hierarchy over caller-owned objects, accelerating
/// view-frustum culling and ray-casting queries.
///
/// Nodes live in an internal arena and are designated by `u32` indices;
/// the caller's objects are threaded through intrusive per-leaf lists (see
/// [`BvhObject`]), so membership changes never allocate per object.
///
/// Nodes are only released by [`Bvh::clear`] or by dropping the tree.
/// Dropping does not touch the objects' [`BvhInfo`]; call [`Bvh::clear`]
/// first when the objects outlive the tree and will be indexed again.
#[derive(Default)]
pub struct Bvh {
    pub(crate) nodes: Vec<BvhNode>,
    pub(crate) root: Option<u32>,
    pub(crate) object_count: u32,
}

impl Bvh {
    /// An empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Does this tree contain no node and no object?
    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.object_count == 0
    }

    /// Index of the root node, or `None` when the tree is empty.
    pub fn root(&self) -> Option<u32> {
        self.root
    }

    /// The node at index `id`.
    ///
    /// Panics if `id` is not a live node index.
    pub fn node(&self, id: u32) -> &BvhNode {
        &self.nodes[id as usize]
    }

    /// Number of objects currently indexed by the tree.
    pub fn object_count(&self) -> u32 {
        self.object_count
    }

    /// Depth of the tree: `-1` when empty, `0` when the root is a leaf.
    pub fn depth(&self) -> i32 {
        match self.root {
            None => -1,
            Some(root) => self.subtree_depth(root) as i32,
        }
    }

    /// Number of nodes in the tree, `0` when empty.
    pub fn size(&self) -> u32 {
        self.root.map_or(0, |root| self.subtree_size(root))
    }

    /// Depth of the subtree rooted at `id`: `0` for a leaf.
    pub fn subtree_depth(&self, id: u32) -> u32 {
        match self.nodes[id as usize].children {
            [Some(left), Some(right)] => {
                1 + self.subtree_depth(left).max(self.subtree_depth(right))
            }
            _ => 0,
        }
    }

    /// Number of nodes in the subtree rooted at `id`: `1` for a leaf.
    pub fn subtree_size(&self, id: u32) -> u32 {
        match self.nodes[id as usize].children {
            [Some(left), Some(right)] => 1 + self.subtree_size(left) + self.subtree_size(right),
            _ => 1,
        }
    }

    /// Number of objects threaded on the node `id` itself (children excluded).
    pub fn node_object_count<T: BvhObject>(&self, objects: &[T], id: u32) -> u32 {
        let mut count = 0;
        let mut curr = self.nodes[id as usize].first_object;

        while let Some(object) = curr {
            count += 1;
            curr = objects[object as usize].bvh_info().next;
        }

        count
    }

    /// Appends the object at position `object` to the intrusive list of the
    /// node `id`.
    ///
    /// No-op when the object already belongs to `id`. An object belonging to
    /// another node is unlinked first by patching its neighbours; the former
    /// node's own head/tail are not updated, so callers moving objects
    /// between live nodes must refresh them.
    pub(crate) fn add_object<T: BvhObject>(&mut self, objects: &mut [T], id: u32, object: u32) {
        let info = *objects[object as usize].bvh_info();
        if info.node == Some(id) {
            return;
        }

        // Extract the object from the list it currently sits on.
        if info.is_linked() {
            if let Some(prev) = info.prev {
                objects[prev as usize].bvh_info_mut().next = info.next;
            }
            if let Some(next) = info.next {
                objects[next as usize].bvh_info_mut().prev = info.prev;
            }
        }

        let node = &mut self.nodes[id as usize];
        if node.first_object.is_none() {
            node.first_object = Some(object);
        }
        let last = node.last_object;
        node.last_object = Some(object);

        let info = objects[object as usize].bvh_info_mut();
        info.prev = last;
        info.next = None;
        info.node = Some(id);

        if let Some(last) = last {
            objects[last as usize].bvh_info_mut().next = Some(object);
        }
    }

    /// Pushes a fresh node on the arena and returns its index.
    pub(crate) fn push_node(&mut self, node: BvhNode) -> u32 {
        let id = self.nodes.len() as u32;
        self.nodes.push(node);
        id
    }

    /// Attaches `child` to the first vacant child slot of `parent`.
    ///
    /// Panics if `parent` already has two children.
    pub(crate) fn attach_child(&mut self, parent: u32, child: u32) {
        let node = &mut self.nodes[parent as usize];
        if node.children[0].is_none() {
            node.children[0] = Some(child);
        } else if node.children[1].is_none() {
            node.children[1] = Some(child);
        } else {
            panic!("bvh: node {} already has two children", parent);
        }
    }

    /// Resets the tree to empty.
    ///
    /// Every member object's intrusive data is reset before the node storage
    /// is released. The objects themselves belong to the caller and are left
    /// alive.
    pub fn clear<T: BvhObject>(&mut self, objects: &mut [T]) {
        if self.root.is_none() {
            return;
        }

        self.traverse_level_order_objects_mut(objects, |object| {
            *object.bvh_info_mut() = BvhInfo::default();
        });

        self.nodes.clear();
        self.root = None;
        self.object_count = 0;
    }
}
