use std::collections::BTreeSet;

use log::debug;
#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::config::IntervalMapConfig;
use crate::entry::Entry;
use crate::error::Result;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::interval::Interval;
use crate::iter::{Cursor, IntoIter, Iter, OverlappingRanges};
use crate::node::{Color, Node};
use crate::reconcile::Reconciled;

/// A map from disjoint half-open ranges to lists of values.
///
/// Inserting a range that overlaps stored ones splits both sides at every
/// boundary, so each stored range carries the values of every insert that
/// covered it.
#[derive(Debug)]
pub struct IntervalMap<V, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<V, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of elements in the map
    pub(crate) len: usize,
    /// Bumped on every structural change, checked by cursors
    pub(crate) mod_count: u64,
    pub(crate) config: IntervalMapConfig,
    /// Whether the most recent add reconciled an overlap
    pub(crate) last_add_overlap: bool,
    /// Whether the most recent add stopped at the recursion limit
    pub(crate) last_add_truncated: bool,
    /// `from` of every entry touched by reconciliation since the last clear
    pub(crate) overlaps: BTreeSet<i64>,
}

/// Where a range starting at a given `from` belongs.
pub(crate) enum Slot<Ix> {
    /// A stored entry already starts there.
    Occupied(NodeIndex<Ix>),
    /// Nothing starts there; a new node hangs off this parent.
    Vacant(NodeIndex<Ix>),
}

impl<V, Ix> IntervalMap<V, Ix>
where
    Ix: IndexType,
{
    /// Creates a new `IntervalMap` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_config(capacity, IntervalMapConfig::default())
    }

    /// Creates a new `IntervalMap` with estimated capacity and the given configuration.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_config(capacity: usize, config: IntervalMapConfig) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        IntervalMap {
            nodes,
            root: NodeIndex::sentinel(),
            len: 0,
            mod_count: 0,
            config,
            last_add_overlap: false,
            last_add_truncated: false,
            overlaps: BTreeSet::new(),
        }
    }

    /// Return the values of the range containing `key`.
    ///
    /// # Example
    /// ```rust
    /// use split_interval_map::IntervalMap;
    ///
    /// let mut map = IntervalMap::new();
    /// map.add(1, 3, 'a').unwrap();
    /// map.add(7, 11, 'b').unwrap();
    /// assert_eq!(map.get(2), Some(&['a'][..]));
    /// assert_eq!(map.get(7), Some(&['b'][..]));
    /// assert_eq!(map.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, key: i64) -> Option<&[V]> {
        self.search(key).map(|idx| self.node_ref(idx, Node::values))
    }

    /// Return the entry of the range containing `key`.
    #[inline]
    pub fn get_entry(&self, key: i64) -> Option<&Entry<V>> {
        self.search(key).map(|idx| self.node_ref(idx, Node::entry))
    }

    /// Check if some stored range contains `key`.
    #[inline]
    pub fn contains(&self, key: i64) -> bool {
        self.search(key).is_some()
    }

    /// Remove the range containing `key`, returning its values.
    ///
    /// # Example
    /// ```rust
    /// use split_interval_map::IntervalMap;
    ///
    /// let mut map = IntervalMap::new();
    /// map.add(1, 3, 1).unwrap();
    /// map.add(5, 9, 2).unwrap();
    /// assert_eq!(map.remove_range(4), None);
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.remove_range(8), Some(vec![2]));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn remove_range(&mut self, key: i64) -> Option<Vec<V>> {
        let node_idx = self.search(key)?;
        let (entry, _moved) = self.remove_node(node_idx);
        debug!("removed range [{}, {})", entry.from(), entry.to());
        Some(entry.into_values())
    }

    /// Get an iterator over the entries of the map, in ascending order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V, Ix> {
        Iter::new(self)
    }

    /// Get a detached cursor that fails fast if the map changes underneath it.
    ///
    /// # Example
    /// ```rust
    /// use split_interval_map::{Error, IntervalMap};
    ///
    /// let mut map = IntervalMap::new();
    /// map.add(0, 10, "a").unwrap();
    /// map.add(20, 30, "b").unwrap();
    ///
    /// let mut cursor = map.cursor();
    /// assert_eq!(cursor.next(&map).unwrap().map(|e| e.from()), Some(0));
    /// map.add(40, 50, "c").unwrap();
    /// assert_eq!(cursor.next(&map), Err(Error::ConcurrentModification));
    /// ```
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Cursor<Ix> {
        Cursor::new(self)
    }

    /// The entry with the lowest `from`.
    #[inline]
    pub fn first(&self) -> Option<&Entry<V>> {
        self.first_index().map(|idx| self.node_ref(idx, Node::entry))
    }

    /// The entry with the highest `from`.
    #[inline]
    pub fn last(&self) -> Option<&Entry<V>> {
        if self.node_ref(self.root, Node::is_sentinel) {
            return None;
        }
        let idx = self.tree_maximum(self.root);
        Some(self.node_ref(idx, Node::entry))
    }

    /// Remove all elements from the map
    #[inline]
    pub fn clear(&mut self) {
        debug!("clearing {} ranges", self.len);
        self.nodes.clear();
        self.nodes.push(Self::new_sentinel());
        self.root = NodeIndex::sentinel();
        self.len = 0;
        self.overlaps.clear();
        self.mod_count = self.mod_count.wrapping_add(1);
    }

    /// Return the number of elements in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the map contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the most recent `add`/`add_all` had to reconcile an overlap.
    #[inline]
    #[must_use]
    pub fn is_last_add_overlap(&self) -> bool {
        self.last_add_overlap
    }

    /// Whether the most recent `add`/`add_all` stopped at the recursion limit
    /// without reconciling everything it touched.
    #[inline]
    #[must_use]
    pub fn is_last_add_truncated(&self) -> bool {
        self.last_add_truncated
    }

    /// Entries touched by overlap reconciliation since the ledger was last
    /// cleared, in ascending order.
    ///
    /// # Example
    /// ```rust
    /// use split_interval_map::IntervalMap;
    ///
    /// let mut map = IntervalMap::new();
    /// map.add(10, 20, "A").unwrap();
    /// map.add(15, 25, "B").unwrap();
    /// let touched: Vec<_> = map.overlapping_ranges().map(|e| (e.from(), e.to())).collect();
    /// assert_eq!(touched, vec![(10, 15), (15, 20)]);
    /// ```
    #[inline]
    #[must_use]
    pub fn overlapping_ranges(&self) -> OverlappingRanges<'_, V, Ix> {
        OverlappingRanges::new(self)
    }

    /// Forget every entry recorded by [`overlapping_ranges`](Self::overlapping_ranges).
    #[inline]
    pub fn clear_overlapping_ranges(&mut self) {
        self.overlaps.clear();
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &IntervalMapConfig {
        &self.config
    }
}

impl<V, Ix> IntervalMap<V, Ix>
where
    V: Clone,
    Ix: IndexType,
{
    /// Associate `value` with [from, to), splitting any stored range it overlaps.
    /// Returns whether an overlap had to be reconciled.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRange`](crate::Error::InvalidRange) when `to <= from`, and
    /// [`Error::RecursionExhausted`](crate::Error::RecursionExhausted) when the
    /// reconciliation runs past `max_recursions` and `exhausted_is_error` is set.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use split_interval_map::IntervalMap;
    ///
    /// let mut map = IntervalMap::new();
    /// assert_eq!(map.add(10, 20, "A"), Ok(false));
    /// assert_eq!(map.add(15, 25, "B"), Ok(true));
    /// assert_eq!(map.get(12), Some(&["A"][..]));
    /// assert_eq!(map.get(17), Some(&["A", "B"][..]));
    /// assert_eq!(map.get(22), Some(&["B"][..]));
    /// assert_eq!(map.len(), 3);
    /// ```
    #[inline]
    pub fn add(&mut self, from: i64, to: i64, value: V) -> Result<bool> {
        self.add_all(from, to, [value])
    }

    /// Like [`add`](Self::add), associating several values at once.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    #[inline]
    pub fn add_all<I>(&mut self, from: i64, to: i64, values: I) -> Result<bool>
    where
        I: IntoIterator<Item = V>,
    {
        let interval = Interval::new(from, to)?;
        self.last_add_overlap = false;
        self.last_add_truncated = false;
        let values = values.into_iter().collect();
        if let Reconciled::Truncated = self.insert_range(interval, values)? {
            self.last_add_truncated = true;
        }
        Ok(self.last_add_overlap)
    }
}

impl<V> IntervalMap<V> {
    /// Create an empty `IntervalMap`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty `IntervalMap` with the given configuration
    #[inline]
    #[must_use]
    pub fn with_config(config: IntervalMapConfig) -> Self {
        Self::with_capacity_and_config(0, config)
    }
}

impl<V> Default for IntervalMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V, Ix> IntoIterator for &'a IntervalMap<V, Ix>
where
    Ix: IndexType,
{
    type Item = &'a Entry<V>;
    type IntoIter = Iter<'a, V, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, Ix> IntoIterator for IntervalMap<V, Ix>
where
    Ix: IndexType,
{
    type Item = Entry<V>;
    type IntoIter = IntoIter<V, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<V, Ix> IntervalMap<V, Ix>
where
    Ix: IndexType,
{
    /// Create a new sentinel node
    fn new_sentinel() -> Node<V, Ix> {
        Node {
            entry: None,
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent: NodeIndex::sentinel(),
            color: Color::Black,
        }
    }

    /// Create a new tree node
    fn new_node(entry: Entry<V>, parent: NodeIndex<Ix>) -> Node<V, Ix> {
        Node {
            entry: Some(entry),
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent,
            color: Color::Red,
        }
    }

    /// Locate the node starting at `from`, or the parent a new node would hang off.
    pub(crate) fn find_slot(&self, from: i64) -> Slot<Ix> {
        let mut y = NodeIndex::sentinel();
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            y = x;
            let x_from = self.node_ref(x, Node::from);
            if from == x_from {
                return Slot::Occupied(x);
            }
            if from < x_from {
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        Slot::Vacant(y)
    }

    /// Hang a new node off `parent` and rebalance.
    pub(crate) fn link_node(&mut self, parent: NodeIndex<Ix>, entry: Entry<V>) -> NodeIndex<Ix> {
        let z = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != z,
            "Reached maximum number of nodes"
        );
        let from = entry.from();
        self.nodes.push(Self::new_node(entry, parent));
        if self.node_ref(parent, Node::is_sentinel) {
            self.root = z;
        } else if from < self.node_ref(parent, Node::from) {
            self.node_mut(parent, Node::set_left(z));
        } else {
            self.node_mut(parent, Node::set_right(z));
        }

        self.insert_fixup(z);

        self.len = self.len.wrapping_add(1);
        self.mod_count = self.mod_count.wrapping_add(1);
        z
    }

    /// Detach a node, reclaim its slot and return its entry together with the
    /// index the last node in the arena was moved away from.
    pub(crate) fn remove_node(&mut self, z: NodeIndex<Ix>) -> (Entry<V>, NodeIndex<Ix>) {
        self.remove_inner(z);
        // Swap the node with the last node stored in the vector and update indices
        let mut node = self.nodes.swap_remove(z.index());
        let old = NodeIndex::<Ix>::new(self.nodes.len());
        self.update_idx(old, z);
        self.mod_count = self.mod_count.wrapping_add(1);

        let entry = node
            .take_entry()
            .expect("removed node must not be the sentinel");
        let _ignore = self.overlaps.remove(&entry.from());
        (entry, old)
    }

    /// Record `x` as touched by reconciliation.
    pub(crate) fn mark_overlap(&mut self, x: NodeIndex<Ix>) {
        self.last_add_overlap = true;
        let from = self.node_ref(x, Node::from);
        let _ignore = self.overlaps.insert(from);
    }

    /// Remove a node from the tree.
    fn remove_inner(&mut self, z: NodeIndex<Ix>) {
        let mut y_orig_color = self.node_ref(z, Node::color);
        let x;
        if self.left_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::right);
            self.transplant(z, x);
        } else if self.right_ref(z, Node::is_sentinel) {
            x = self.node_ref(z, Node::left);
            self.transplant(z, x);
        } else {
            let y = self.tree_minimum(self.node_ref(z, Node::right));
            y_orig_color = self.node_ref(y, Node::color);
            x = self.node_ref(y, Node::right);
            if self.node_ref(y, Node::parent) == z {
                self.node_mut(x, Node::set_parent(y));
            } else {
                self.transplant(y, x);
                self.node_mut(y, Node::set_right(self.node_ref(z, Node::right)));
                self.right_mut(y, Node::set_parent(y));
            }
            self.transplant(z, y);
            self.node_mut(y, Node::set_left(self.node_ref(z, Node::left)));
            self.left_mut(y, Node::set_parent(y));
            self.node_mut(y, Node::set_color(self.node_ref(z, Node::color)));
        }

        if matches!(y_orig_color, Color::Black) {
            self.remove_fixup(x);
        }

        self.len = self.len.wrapping_sub(1);
    }

    /// Search for the node whose range contains `key`.
    pub(crate) fn search(&self, key: i64) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        let mut floor = None;
        while !self.node_ref(x, Node::is_sentinel) {
            let x_from = self.node_ref(x, Node::from);
            if x_from <= key {
                floor = Some(x);
                if x_from == key {
                    break;
                }
                x = self.node_ref(x, Node::right);
            } else {
                x = self.node_ref(x, Node::left);
            }
        }
        floor.filter(|&f| self.node_ref(f, Node::to) > key)
    }

    /// Search for the node starting exactly at `from`.
    pub(crate) fn search_from(&self, from: i64) -> Option<NodeIndex<Ix>> {
        match self.find_slot(from) {
            Slot::Occupied(x) => Some(x),
            Slot::Vacant(_) => None,
        }
    }

    /// Index of the leftmost node.
    pub(crate) fn first_index(&self) -> Option<NodeIndex<Ix>> {
        if self.node_ref(self.root, Node::is_sentinel) {
            None
        } else {
            Some(self.tree_minimum(self.root))
        }
    }

    /// In-order successor of `x`.
    pub(crate) fn successor(&self, x: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        if !self.right_ref(x, Node::is_sentinel) {
            return Some(self.tree_minimum(self.node_ref(x, Node::right)));
        }
        let mut x = x;
        let mut y = self.node_ref(x, Node::parent);
        while !self.node_ref(y, Node::is_sentinel) && self.node_ref(y, Node::right) == x {
            x = y;
            y = self.node_ref(y, Node::parent);
        }
        (!self.node_ref(y, Node::is_sentinel)).then_some(y)
    }

    /// In-order predecessor of `x`.
    pub(crate) fn predecessor(&self, x: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        if !self.left_ref(x, Node::is_sentinel) {
            return Some(self.tree_maximum(self.node_ref(x, Node::left)));
        }
        let mut x = x;
        let mut y = self.node_ref(x, Node::parent);
        while !self.node_ref(y, Node::is_sentinel) && self.node_ref(y, Node::left) == x {
            x = y;
            y = self.node_ref(y, Node::parent);
        }
        (!self.node_ref(y, Node::is_sentinel)).then_some(y)
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.grand_parent_ref(z, Node::is_sentinel) {
                break;
            }
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after a remove.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>) {
        while x != self.root && self.node_ref(x, Node::is_black) {
            let mut w;
            if self.is_left_child(x) {
                w = self.parent_ref(x, Node::right);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::right);
                }
                if self.node_ref(w, Node::is_sentinel) {
                    break;
                }
                if self.left_ref(w, Node::is_black) && self.right_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.right_ref(w, Node::is_black) {
                        self.left_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.right_rotate(w);
                        w = self.parent_ref(x, Node::right);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.right_mut(w, Node::set_color(Color::Black));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            } else {
                w = self.parent_ref(x, Node::left);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::left);
                }
                if self.node_ref(w, Node::is_sentinel) {
                    break;
                }
                if self.right_ref(w, Node::is_black) && self.left_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.left_ref(w, Node::is_black) {
                        self.right_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.left_rotate(w);
                        w = self.parent_ref(x, Node::left);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.left_mut(w, Node::set_color(Color::Black));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            }
        }
        self.node_mut(x, Node::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.right_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::right);
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        if !self.left_ref(y, Node::is_sentinel) {
            self.left_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.left_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::left);
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        if !self.right_ref(y, Node::is_sentinel) {
            self.right_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Find the node with the lowest `from` in the subtree.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the node with the highest `from` in the subtree.
    fn tree_maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.right_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        if self.parent_ref(u, Node::is_sentinel) {
            self.root = v;
        } else if self.is_left_child(u) {
            self.parent_mut(u, Node::set_left(v));
        } else {
            self.parent_mut(u, Node::set_right(v));
        }
        self.node_mut(v, Node::set_parent(self.node_ref(u, Node::parent)));
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }

    /// Point every link that referenced `old` at `new` after a `swap_remove`.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if self.root == old {
            self.root = new;
        }
        if self.nodes.get(new.index()).is_some() {
            if !self.parent_ref(new, Node::is_sentinel) {
                if self.parent_ref(new, Node::left) == old {
                    self.parent_mut(new, Node::set_left(new));
                } else {
                    self.parent_mut(new, Node::set_right(new));
                }
            }
            self.left_mut(new, Node::set_parent(new));
            self.right_mut(new, Node::set_parent(new));
        }
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, V, Ix> IntervalMap<V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<V, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<V, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<V, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<V, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}

/// Serializes as the ascending sequence of entries.
#[cfg(feature = "serde")]
impl<V, Ix> Serialize for IntervalMap<V, Ix>
where
    V: Serialize,
    Ix: IndexType,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

/// Rebuilds the map by adding every entry in order.
#[cfg(feature = "serde")]
impl<'de, V, Ix> Deserialize<'de> for IntervalMap<V, Ix>
where
    V: Deserialize<'de> + Clone,
    Ix: IndexType,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<Entry<V>>::deserialize(deserializer)?;
        let mut map = Self::with_capacity(entries.len());
        for entry in entries {
            let (interval, values) = entry.into_parts();
            let _overlap = map
                .add_all(interval.from(), interval.to(), values)
                .map_err(de::Error::custom)?;
        }
        map.clear_overlapping_ranges();
        Ok(map)
    }
}
