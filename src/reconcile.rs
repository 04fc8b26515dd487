//! Overlap reconciliation.
//!
//! Every insert lands on a node starting at the requested `from`, either an
//! existing one (values are merged) or a freshly linked one. The node is then
//! compared with its neighbours and, where ranges overlap, the overlapping
//! part is cut off and handed back to be inserted again one level deeper.
//! Cuts always happen before the remainder is placed, so stopping at any
//! depth leaves the stored ranges disjoint.

use std::cmp::Ordering;

use log::{debug, trace, warn};

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::index::{IndexType, NodeIndex};
use crate::interval::Interval;
use crate::intervalmap::{IntervalMap, Slot};
use crate::node::Node;

/// Outcome of a reconciliation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reconciled {
    /// Every overlap was resolved.
    Complete,
    /// The recursion limit was hit and the remaining work was dropped.
    Truncated,
}

/// Part of an insert that still has to be placed, one level deeper.
type Remainder<V> = Option<(Interval, Vec<V>)>;

impl<V, Ix> IntervalMap<V, Ix>
where
    V: Clone,
    Ix: IndexType,
{
    /// Insert `values` over `interval` and reconcile until no overlap is left.
    ///
    /// Every cut hands back the piece that still overlaps, which is placed
    /// one level deeper on the next pass.
    pub(crate) fn insert_range(
        &mut self,
        interval: Interval,
        values: Vec<V>,
    ) -> Result<Reconciled> {
        let mut pending = Some((interval, values));
        let mut depth = 0_usize;
        while let Some((interval, values)) = pending {
            depth = depth.saturating_add(1);
            if depth > self.config.max_recursions {
                return self.exhausted(interval);
            }
            pending = match self.find_slot(interval.from()) {
                Slot::Occupied(x) => self.merge_into(x, interval.to(), values)?,
                Slot::Vacant(parent) => {
                    let z = self.link_node(parent, Entry::new(interval, values));
                    trace!("linked [{}, {})", interval.from(), interval.to());
                    self.range_fixup(z)?
                }
            };
        }
        Ok(Reconciled::Complete)
    }

    /// Apply the configured policy once the depth limit is passed.
    fn exhausted(&self, interval: Interval) -> Result<Reconciled> {
        let limit = self.config.max_recursions;
        if self.config.exhausted_is_error {
            debug!(
                "recursion limit {limit} exceeded while inserting [{}, {})",
                interval.from(),
                interval.to()
            );
            return Err(Error::RecursionExhausted { limit });
        }
        warn!(
            "recursion limit {limit} reached, [{}, {}) left unreconciled",
            interval.from(),
            interval.to()
        );
        Ok(Reconciled::Truncated)
    }

    /// The insert starts exactly where `x` does: merge, then cut at the
    /// shorter of the two ends and carry the rest over.
    fn merge_into(
        &mut self,
        x: NodeIndex<Ix>,
        to: i64,
        incoming: Vec<V>,
    ) -> Result<Remainder<V>> {
        let x_to = self.node_ref(x, Node::to);
        // What [min, max) keeps: the old values if the insert was shorter,
        // the new ones if it was longer.
        let carried = match to.cmp(&x_to) {
            Ordering::Less => Some(self.node_ref(x, |n| n.entry().cloned_values())),
            Ordering::Equal => None,
            Ordering::Greater => Some(incoming.clone()),
        };
        self.node_mut(x, |n| n.entry_mut().append(incoming));
        self.mark_overlap(x);

        let Some(carried) = carried else {
            return self.range_fixup(x);
        };
        let (lo, hi) = (to.min(x_to), to.max(x_to));
        self.node_mut(x, Node::set_to(lo));
        trace!("split at {lo}, carrying [{lo}, {hi})");
        Ok(Some((Interval::new(lo, hi)?, carried)))
    }

    /// Reconcile `x` against its neighbours. A predecessor bleeding into `x`
    /// is resolved before `x` bleeding into its successor.
    fn range_fixup(&mut self, x: NodeIndex<Ix>) -> Result<Remainder<V>> {
        let x_from = self.node_ref(x, Node::from);
        let x_to = self.node_ref(x, Node::to);

        if let Some(p) = self.predecessor(x) {
            if self.node_ref(p, Node::to) > x_from {
                return self.absorb_predecessor(x, p);
            }
        }
        if let Some(s) = self.successor(x) {
            let s_from = self.node_ref(s, Node::from);
            if s_from < x_to {
                return self.spill_into_successor(x, s_from);
            }
        }
        Ok(None)
    }

    /// `p` ends after `x` starts. Cut `p` at `x`, give `x` the values of `p`,
    /// and re-insert whichever of the two stuck out past the other.
    fn absorb_predecessor(
        &mut self,
        x: NodeIndex<Ix>,
        p: NodeIndex<Ix>,
    ) -> Result<Remainder<V>> {
        let x_from = self.node_ref(x, Node::from);
        let x_to = self.node_ref(x, Node::to);
        let p_to = self.node_ref(p, Node::to);
        let tail = self.node_ref(p, |n| n.entry().cloned_values());

        self.node_mut(p, Node::set_to(x_from));
        self.mark_overlap(p);

        let leftover = match p_to.cmp(&x_to) {
            Ordering::Less => {
                let own = self.node_ref(x, |n| n.entry().cloned_values());
                self.node_mut(x, Node::set_to(p_to));
                Some((Interval::new(p_to, x_to)?, own))
            }
            Ordering::Equal => None,
            Ordering::Greater => Some((Interval::new(x_to, p_to)?, tail.clone())),
        };
        self.node_mut(x, |n| n.entry_mut().prepend(tail));
        self.mark_overlap(x);
        trace!("predecessor cut at {x_from}, overlap ends at {}", p_to.min(x_to));

        Ok(leftover)
    }

    /// `x` runs past the start of its successor. Cut `x` there and insert the
    /// rest over the successor.
    fn spill_into_successor(
        &mut self,
        x: NodeIndex<Ix>,
        s_from: i64,
    ) -> Result<Remainder<V>> {
        let x_to = self.node_ref(x, Node::to);
        let own = self.node_ref(x, |n| n.entry().cloned_values());
        self.node_mut(x, Node::set_to(s_from));
        self.mark_overlap(x);
        trace!("cut at successor {s_from}, carrying [{s_from}, {x_to})");
        Ok(Some((Interval::new(s_from, x_to)?, own)))
    }
}
