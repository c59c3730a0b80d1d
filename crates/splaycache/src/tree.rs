//! Splay tree implementation
//!
//! Nodes live in an arena and reference each other by index, so the parent
//! back-links never own anything. Every successful access splays the touched
//! node to the root with zig, zig-zig and zig-zag steps.

use std::cmp::Ordering;

use crate::config::DuplicatePolicy;

type NodeId = usize;

/// Node in the splay tree arena
struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Self-adjusting binary search tree
pub struct SplayTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
    policy: DuplicatePolicy,
    rotations: u64,
}

impl<K, V> SplayTree<K, V>
where
    K: Ord,
{
    /// Create an empty tree that replaces values of re-inserted keys
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    /// Create an empty tree with the given duplicate-key policy
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            policy,
            rotations: 0,
        }
    }

    /// Insert a key-value pair and splay its node to the root.
    ///
    /// Returns the previous value when an existing key was overwritten,
    /// which only happens under [`DuplicatePolicy::Replace`].
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_node(key, value).1
    }

    /// Return the value for `key`, inserting `f()` on a miss.
    ///
    /// Either way the entry ends up at the root. The flag is `true` when
    /// the key was already present.
    pub fn find_or_insert_with<F>(&mut self, key: K, f: F) -> (&mut V, bool)
    where
        F: FnOnce() -> V,
    {
        let (id, found) = match self.search(&key) {
            Some(id) => {
                self.splay(id);
                (id, true)
            }
            None => (self.insert_node(key, f()).0, false),
        };
        (&mut self.nodes[id].value, found)
    }

    fn insert_node(&mut self, key: K, value: V) -> (NodeId, Option<V>) {
        let Some(mut current) = self.root else {
            let id = self.alloc_node(key, value, None);
            self.root = Some(id);
            return (id, None);
        };

        // Ties route right unless the policy overwrites in place
        loop {
            let node = &self.nodes[current];
            let (left, right) = (node.left, node.right);
            match key.cmp(&node.key) {
                Ordering::Less => match left {
                    Some(left) => current = left,
                    None => {
                        let id = self.alloc_node(key, value, Some(current));
                        self.nodes[current].left = Some(id);
                        self.splay(id);
                        return (id, None);
                    }
                },
                Ordering::Equal if self.policy == DuplicatePolicy::Replace => {
                    let old = std::mem::replace(&mut self.nodes[current].value, value);
                    self.splay(current);
                    return (current, Some(old));
                }
                _ => match right {
                    Some(right) => current = right,
                    None => {
                        let id = self.alloc_node(key, value, Some(current));
                        self.nodes[current].right = Some(id);
                        self.splay(id);
                        return (id, None);
                    }
                },
            }
        }
    }

    /// Look up a key, splaying its node to the root on a hit.
    ///
    /// A miss leaves the tree shape untouched.
    pub fn find(&mut self, key: &K) -> Option<&V> {
        let id = self.search(key)?;
        self.splay(id);
        Some(&self.nodes[id].value)
    }

    /// Like [`find`](Self::find), but yields a mutable value
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.search(key)?;
        self.splay(id);
        Some(&mut self.nodes[id].value)
    }

    /// Look up a key without restructuring the tree
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.search(key).map(|id| &self.nodes[id].value)
    }

    /// Check whether a key is present without restructuring the tree
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Key currently at the root
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|id| &self.nodes[id].key)
    }

    fn search(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }
}

impl<K, V> SplayTree<K, V> {
    /// Number of nodes (shadowed duplicates included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Duplicate-key policy in effect
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Total rotations performed since creation or the last `clear`
    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.rotations = 0;
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        height
    }

    /// In-order iterator over the entries
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    fn alloc_node(&mut self, key: K, value: V, parent: Option<NodeId>) -> NodeId {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            key,
            value,
            parent,
            left: None,
            right: None,
        });
        idx
    }

    fn splay(&mut self, id: NodeId) {
        while let Some(parent) = self.nodes[id].parent {
            let is_left = self.nodes[parent].left == Some(id);
            match self.nodes[parent].parent {
                // Zig
                None => {
                    if is_left {
                        self.rotate_right(parent);
                    } else {
                        self.rotate_left(parent);
                    }
                }
                Some(grandparent) => {
                    let parent_is_left = self.nodes[grandparent].left == Some(parent);
                    match (is_left, parent_is_left) {
                        // Zig-zig
                        (true, true) => {
                            self.rotate_right(grandparent);
                            self.rotate_right(parent);
                        }
                        (false, false) => {
                            self.rotate_left(grandparent);
                            self.rotate_left(parent);
                        }
                        // Zig-zag
                        (true, false) => {
                            self.rotate_right(parent);
                            self.rotate_left(grandparent);
                        }
                        (false, true) => {
                            self.rotate_left(parent);
                            self.rotate_right(grandparent);
                        }
                    }
                }
            }
        }
    }

    /// Promote the left child of `id` into its position
    fn rotate_right(&mut self, id: NodeId) {
        let Some(child) = self.nodes[id].left else {
            return;
        };

        let moved = self.nodes[child].right;
        self.nodes[id].left = moved;
        if let Some(moved) = moved {
            self.nodes[moved].parent = Some(id);
        }

        let parent = self.nodes[id].parent;
        self.nodes[child].parent = parent;
        self.replace_child(parent, id, child);

        self.nodes[child].right = Some(id);
        self.nodes[id].parent = Some(child);
        self.rotations += 1;
    }

    /// Promote the right child of `id` into its position
    fn rotate_left(&mut self, id: NodeId) {
        let Some(child) = self.nodes[id].right else {
            return;
        };

        let moved = self.nodes[child].left;
        self.nodes[id].right = moved;
        if let Some(moved) = moved {
            self.nodes[moved].parent = Some(id);
        }

        let parent = self.nodes[id].parent;
        self.nodes[child].parent = parent;
        self.replace_child(parent, id, child);

        self.nodes[child].left = Some(id);
        self.nodes[id].parent = Some(child);
        self.rotations += 1;
    }

    /// Point `parent`'s slot (or the root) that held `old` at `new`
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            None => self.root = Some(new),
            Some(parent) => {
                let node = &mut self.nodes[parent];
                if node.left == Some(old) {
                    node.left = Some(new);
                } else {
                    node.right = Some(new);
                }
            }
        }
    }
}

impl<K: Ord, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V> IntoIterator for &'a SplayTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`SplayTree`]
pub struct Iter<'a, K, V> {
    tree: &'a SplayTree<K, V>,
    stack: Vec<NodeId>,
}

impl<K, V> Iter<'_, K, V> {
    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.tree.nodes[id].left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.nodes[id];
        self.push_left_spine(node.right);
        Some((&node.key, &node.value))
    }
}
