use crate::entry::Entry;
use crate::index::{IndexType, NodeIndex};

/// Node of the red-black tree
#[derive(Debug)]
pub struct Node<V, Ix> {
    /// Left children
    pub left: NodeIndex<Ix>,
    /// Right children
    pub right: NodeIndex<Ix>,
    /// Parent
    pub parent: NodeIndex<Ix>,
    /// Color of the node
    pub color: Color,

    /// Entry of the node, `None` for the sentinel
    pub entry: Option<Entry<V>>,
}

// Convenient getter/setter methods
impl<V, Ix> Node<V, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent
    }

    pub fn is_sentinel(&self) -> bool {
        self.entry.is_none()
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    /// # Panics
    ///
    /// Panics on the sentinel.
    pub fn entry(&self) -> &Entry<V> {
        self.entry.as_ref().expect("sentinel node has no entry")
    }

    /// # Panics
    ///
    /// Panics on the sentinel.
    pub fn entry_mut(&mut self) -> &mut Entry<V> {
        self.entry.as_mut().expect("sentinel node has no entry")
    }

    pub fn from(&self) -> i64 {
        self.entry().from()
    }

    pub fn to(&self) -> i64 {
        self.entry().to()
    }

    pub fn values(&self) -> &[V] {
        self.entry().values()
    }

    pub fn take_entry(&mut self) -> Option<Entry<V>> {
        self.entry.take()
    }

    pub fn set_to(to: i64) -> impl FnOnce(&mut Node<V, Ix>) {
        move |node: &mut Node<V, Ix>| node.entry_mut().set_to(to)
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<V, Ix>) {
        move |node: &mut Node<V, Ix>| {
            node.color = color;
        }
    }

    pub fn set_left(left: NodeIndex<Ix>) -> impl FnOnce(&mut Node<V, Ix>) {
        move |node: &mut Node<V, Ix>| {
            node.left = left;
        }
    }

    pub fn set_right(right: NodeIndex<Ix>) -> impl FnOnce(&mut Node<V, Ix>) {
        move |node: &mut Node<V, Ix>| {
            node.right = right;
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<V, Ix>) {
        move |node: &mut Node<V, Ix>| {
            node.parent = parent;
        }
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}
