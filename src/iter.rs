use std::collections::btree_set;
use std::iter::FusedIterator;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::intervalmap::IntervalMap;
use crate::node::Node;

/// An iterator over the entries of a `IntervalMap`, in ascending order.
#[derive(Debug)]
pub struct Iter<'a, V, Ix = DefaultIx> {
    /// Reference to the map
    map_ref: &'a IntervalMap<V, Ix>,
    /// Next node to yield
    next: Option<NodeIndex<Ix>>,
    /// Entries not yet yielded
    remaining: usize,
}

impl<'a, V, Ix> Iter<'a, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(map_ref: &'a IntervalMap<V, Ix>) -> Self {
        Iter {
            map_ref,
            next: map_ref.first_index(),
            remaining: map_ref.len(),
        }
    }
}

impl<'a, V, Ix> Iterator for Iter<'a, V, Ix>
where
    Ix: IndexType,
{
    type Item = &'a Entry<V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.next?;
        self.next = self.map_ref.successor(x);
        self.remaining -= 1;
        Some(self.map_ref.node_ref(x, Node::entry))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V, Ix> ExactSizeIterator for Iter<'_, V, Ix> where Ix: IndexType {}

impl<V, Ix> FusedIterator for Iter<'_, V, Ix> where Ix: IndexType {}

/// Pushes a link of nodes on the left to stack.
fn left_link<V, Ix>(map_ref: &IntervalMap<V, Ix>, mut x: NodeIndex<Ix>) -> Vec<NodeIndex<Ix>>
where
    Ix: IndexType,
{
    let mut nodes = vec![];
    while !map_ref.node_ref(x, Node::is_sentinel) {
        nodes.push(x);
        x = map_ref.node_ref(x, Node::left);
    }
    nodes
}

/// An into iterator over the entries of a `IntervalMap`, in ascending order.
#[derive(Debug)]
pub struct IntoIter<V, Ix = DefaultIx> {
    interval_map: IntervalMap<V, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<V, Ix> IntoIter<V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(interval_map: IntervalMap<V, Ix>) -> Self {
        let stack = left_link(&interval_map, interval_map.root);
        IntoIter {
            interval_map,
            stack,
        }
    }
}

impl<V, Ix> Iterator for IntoIter<V, Ix>
where
    Ix: IndexType,
{
    type Item = Entry<V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        // Only nodes that were not yielded yet are inspected, so taking the
        // entry out does not disturb the walk.
        self.stack.extend(left_link(
            &self.interval_map,
            self.interval_map.node_ref(x, Node::right),
        ));
        self.interval_map.nodes[x.index()].take_entry()
    }
}

/// A detached cursor over the entries of a `IntervalMap`.
///
/// The cursor does not borrow the map. Each step takes the map as an argument
/// and fails with [`Error::ConcurrentModification`] if the map was
/// structurally changed by anything other than this cursor since it was
/// created. Entries can be removed through the cursor.
///
/// # Example
/// ```rust
/// use split_interval_map::IntervalMap;
///
/// let mut map = IntervalMap::new();
/// for from in [0, 10, 20, 30] {
///     map.add(from, from + 5, from).unwrap();
/// }
///
/// let mut cursor = map.cursor();
/// while let Some(entry) = cursor.next(&map).unwrap() {
///     if entry.from() % 20 == 0 {
///         cursor.remove(&mut map).unwrap();
///     }
/// }
/// let left: Vec<_> = map.iter().map(|e| e.from()).collect();
/// assert_eq!(left, vec![10, 30]);
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<Ix = DefaultIx> {
    /// Modification count the map must still have
    expected_mod_count: u64,
    /// Next node to yield
    next: Option<NodeIndex<Ix>>,
    /// Node yielded by the last `next`, if not removed since
    last: Option<NodeIndex<Ix>>,
}

impl<Ix> Cursor<Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new<V>(map: &IntervalMap<V, Ix>) -> Self {
        Cursor {
            expected_mod_count: map.mod_count,
            next: map.first_index(),
            last: None,
        }
    }

    fn check<V>(&self, map: &IntervalMap<V, Ix>) -> Result<()> {
        if map.mod_count != self.expected_mod_count {
            return Err(Error::ConcurrentModification);
        }
        Ok(())
    }

    /// Advance to the next entry.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentModification`] if the map changed behind the cursor.
    pub fn next<'a, V>(&mut self, map: &'a IntervalMap<V, Ix>) -> Result<Option<&'a Entry<V>>> {
        self.check(map)?;
        let Some(x) = self.next else {
            self.last = None;
            return Ok(None);
        };
        self.next = map.successor(x);
        self.last = Some(x);
        Ok(Some(map.node_ref(x, Node::entry)))
    }

    /// Whether another call to `next` would yield an entry, assuming the map
    /// was not modified.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Remove the entry returned by the last call to `next`.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentModification`] if the map changed behind the cursor,
    /// [`Error::NoCurrentEntry`] if `next` has not yielded an entry since the
    /// last removal.
    pub fn remove<V>(&mut self, map: &mut IntervalMap<V, Ix>) -> Result<Entry<V>> {
        self.check(map)?;
        let last = self.last.take().ok_or(Error::NoCurrentEntry)?;
        let (entry, moved) = map.remove_node(last);
        // The arena slot of `last` now holds whatever node used to sit at `moved`.
        if self.next == Some(moved) {
            self.next = Some(last);
        }
        self.expected_mod_count = map.mod_count;
        Ok(entry)
    }
}

/// A read-only view of the entries touched by overlap reconciliation, in
/// ascending order.
#[derive(Debug)]
pub struct OverlappingRanges<'a, V, Ix = DefaultIx> {
    map_ref: &'a IntervalMap<V, Ix>,
    keys: btree_set::Iter<'a, i64>,
}

impl<'a, V, Ix> OverlappingRanges<'a, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(map_ref: &'a IntervalMap<V, Ix>) -> Self {
        OverlappingRanges {
            map_ref,
            keys: map_ref.overlaps.iter(),
        }
    }
}

impl<'a, V, Ix> Iterator for OverlappingRanges<'a, V, Ix>
where
    Ix: IndexType,
{
    type Item = &'a Entry<V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let map_ref = self.map_ref;
        self.keys.find_map(|&from| {
            map_ref
                .search_from(from)
                .map(|x| map_ref.node_ref(x, Node::entry))
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.keys.size_hint().1)
    }
}

impl<V, Ix> FusedIterator for OverlappingRanges<'_, V, Ix> where Ix: IndexType {}
