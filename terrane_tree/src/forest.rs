// Copyright 2025 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core forest implementation: structure, insertion, deletion, queries.

use alloc::vec::Vec;
use kurbo::Rect;
use smallvec::SmallVec;
use terrane_geom::rect::{contains_rect, rects_overlap};
use terrane_geom::{Geometry, fully_contained, point_in_polygon};

use crate::types::{InsertError, NodeId};

/// A containment-driven bounding-box forest over map objects.
///
/// Each node owns one `(handle, geometry)` pair; children are nodes whose
/// boxes are (approximately) enclosed by their parent's. There is no fixed
/// branching factor and no balancing: structure emerges from which boxes
/// engulf which at insertion time, with larger-area boxes floating toward
/// the roots. Top-level roots are kept disjoint by merging intersecting
/// pairs after every mutation.
///
/// Nodes live in slot vectors addressed by generational [`NodeId`]s, so
/// restructuring (a new object becoming the ancestor of older ones) is an
/// index swap rather than a graph rewrite.
///
/// `H` is the caller's opaque object handle. The forest compares handles
/// only for equality and never inspects them; identity-style handles (ids,
/// `Rc` pointers compared by address) are expected, since two distinct map
/// objects may share identical geometry.
///
/// All operations run to completion on the calling thread; callers
/// serialize access.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use terrane_tree::Forest;
/// use terrane_geom::Geometry;
///
/// let square = |x0: f64, y0: f64, size: f64| {
///     Geometry::single(vec![
///         Point::new(x0, y0),
///         Point::new(x0 + size, y0),
///         Point::new(x0 + size, y0 + size),
///         Point::new(x0, y0 + size),
///     ])
/// };
///
/// let mut forest: Forest<u32> = Forest::new();
/// forest.insert(1, square(0.0, 0.0, 10.0))?;
/// forest.insert(2, square(4.0, 4.0, 2.0))?;
///
/// // The small square is fully inside the query rectangle.
/// let hits = forest.query_contained(Rect::new(3.0, 3.0, 7.0, 7.0));
/// assert_eq!(hits, vec![2]);
/// # Ok::<(), terrane_tree::InsertError>(())
/// ```
pub struct Forest<H> {
    /// slots
    nodes: Vec<Option<Node<H>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    roots: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Node<H> {
    generation: u32,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    handle: H,
    geometry: Geometry,
}

impl<H> core::fmt::Debug for Forest<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Forest")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("roots", &self.roots.len())
            .finish_non_exhaustive()
    }
}

impl<H> Default for Forest<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Forest<H> {
    /// Create an empty forest.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the forest holds no objects.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// The current top-level roots, in list order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// The children of a node, or an empty slice for stale ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.node(id).children
    }

    /// The parent of a live node, or `None` for roots and stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id).parent
    }

    /// The handle carried by a live node.
    pub fn handle_of(&self, id: NodeId) -> Option<&H> {
        if !self.is_alive(id) {
            return None;
        }
        Some(&self.node(id).handle)
    }

    /// The bounding box of a live node's geometry, recomputed on demand.
    pub fn bounding_box_of(&self, id: NodeId) -> Option<Rect> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.bounds(id))
    }

    /// Insert an object into the forest.
    ///
    /// The new node either descends into an existing root's subtree, engulfs
    /// older nodes and takes their place, or becomes a new root; any
    /// resulting intersections between top-level roots are then resolved by
    /// merging the smaller root under the larger.
    ///
    /// # Errors
    ///
    /// Rejects geometry with no points ([`InsertError::EmptyGeometry`]) and
    /// non-finite coordinates ([`InsertError::NonFinite`]); nothing is
    /// inserted in either case.
    pub fn insert(&mut self, handle: H, geometry: Geometry) -> Result<(), InsertError> {
        if geometry.bounding_box().is_none() {
            return Err(InsertError::EmptyGeometry);
        }
        if !geometry.is_finite() {
            return Err(InsertError::NonFinite);
        }

        let id = self.alloc(handle, geometry);
        if self.roots.is_empty() {
            self.roots.push(id);
            return Ok(());
        }

        let mut inserted = false;
        for root in self.roots.clone() {
            if self.try_insert_into(root, id) {
                inserted = true;
                break;
            }
        }
        if !inserted {
            self.roots.push(id);
        }

        self.resolve_root_intersections();
        Ok(())
    }

    /// Every node's bounding box, depth-first over every root.
    ///
    /// Intended for debug overlays; the result has no query semantics.
    pub fn bounding_boxes(&self) -> Vec<Rect> {
        let mut boxes = Vec::new();
        for &root in &self.roots {
            self.collect_boxes(root, &mut boxes);
        }
        boxes
    }

    fn collect_boxes(&self, id: NodeId, out: &mut Vec<Rect>) {
        out.push(self.bounds(id));
        for &child in &self.node(id).children {
            self.collect_boxes(child, out);
        }
    }

    // --- insertion internals ---

    /// Whether box `a` engulfs box `b`: contains it outright, or is at least
    /// as large and intersecting. The `>=` area tie-break deliberately lets
    /// an equal-area newcomer become the ancestor (insertion order wins).
    fn engulfs(a: Rect, b: Rect) -> bool {
        contains_rect(a, b) || (a.area() >= b.area() && rects_overlap(a, b))
    }

    fn try_insert_into(&mut self, current: NodeId, candidate: NodeId) -> bool {
        let current_bounds = self.bounds(current);
        let candidate_bounds = self.bounds(candidate);

        // Case A: the candidate engulfs the current node and takes its place.
        if Self::engulfs(candidate_bounds, current_bounds) {
            self.replace_with(current, candidate);
            return true;
        }

        // Case B: the current node holds or overlaps the candidate.
        if contains_rect(current_bounds, candidate_bounds)
            || rects_overlap(current_bounds, candidate_bounds)
        {
            return self.attach_or_reassign(current, candidate);
        }

        // Case C: no relation here; try the children.
        for child in self.node(current).children.clone() {
            if self.try_insert_into(child, candidate) {
                return true;
            }
        }
        false
    }

    /// Swap `candidate` into `old`'s position (in its grandparent's child
    /// list or the root list) and make `old` the candidate's child.
    fn replace_with(&mut self, old: NodeId, candidate: NodeId) {
        let grandparent = self.node(old).parent;
        let slot = match grandparent {
            Some(g) => self.node_mut(g).children.iter_mut().find(|c| **c == old),
            None => self.roots.iter_mut().find(|c| **c == old),
        };
        if let Some(slot) = slot {
            *slot = candidate;
        }
        self.node_mut(candidate).parent = grandparent;
        self.link(candidate, old);
    }

    fn attach_or_reassign(&mut self, parent: NodeId, candidate: NodeId) -> bool {
        let candidate_bounds = self.bounds(candidate);

        // Children the candidate engulfs move under it.
        let mut engulfed: SmallVec<[NodeId; 4]> = SmallVec::new();
        for &child in &self.node(parent).children {
            if Self::engulfs(candidate_bounds, self.bounds(child)) {
                engulfed.push(child);
            }
        }
        if !engulfed.is_empty() {
            self.node_mut(parent)
                .children
                .retain(|c| !engulfed.contains(c));
            for child in engulfed {
                self.link(candidate, child);
            }
            self.link(parent, candidate);
            return true;
        }

        // Otherwise descend into a child that holds or overlaps the candidate.
        for child in self.node(parent).children.clone() {
            let child_bounds = self.bounds(child);
            if contains_rect(child_bounds, candidate_bounds)
                || rects_overlap(child_bounds, candidate_bounds)
            {
                return self.try_insert_into(child, candidate);
            }
        }

        // No suitable child: attach directly.
        self.link(parent, candidate);
        true
    }

    /// Merge intersecting top-level roots: the larger-area root absorbs the
    /// smaller. The scan re-examines the slot a removal shifted into, so a
    /// merged root is immediately tested against the remaining list.
    fn resolve_root_intersections(&mut self) {
        let mut i = 0;
        while i < self.roots.len() {
            let mut j = i + 1;
            while j < self.roots.len() {
                let a = self.roots[i];
                let b = self.roots[j];
                let bounds_a = self.bounds(a);
                let bounds_b = self.bounds(b);
                if !rects_overlap(bounds_a, bounds_b) {
                    j += 1;
                    continue;
                }
                if bounds_a.area() >= bounds_b.area() {
                    let _ = self.roots.remove(j);
                    self.link(a, b);
                } else {
                    let _ = self.roots.remove(i);
                    self.link(b, a);
                }
                // Do not advance j: the removal shifted the list left.
            }
            i += 1;
        }
    }

    // --- arena internals ---

    fn alloc(&mut self, handle: H, geometry: Geometry) -> NodeId {
        let node = Node {
            generation: 0,
            parent: None,
            children: SmallVec::new(),
            handle,
            geometry,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node { generation, ..node });
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node { generation, ..node }));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        NodeId::new(idx, generation)
    }

    fn free(&mut self, id: NodeId) {
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node<H> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node<H> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    /// A live node's bounding box. Insertion rejects empty geometry, so the
    /// box always exists.
    fn bounds(&self, id: NodeId) -> Rect {
        self.node(id)
            .geometry
            .bounding_box()
            .expect("indexed geometry always has points")
    }
}

impl<H: PartialEq> Forest<H> {
    /// Whether any live node carries `handle`.
    pub fn contains(&self, handle: &H) -> bool {
        self.find_handle(handle).is_some()
    }

    /// Remove every node whose handle equals `handle`, at any depth, and
    /// return how many were removed. Unknown handles are a no-op.
    ///
    /// A removed node's children are promoted to its parent (or to the root
    /// list when the node was a root), so no subtree becomes unreachable;
    /// promotions may re-introduce top-level intersections, which are then
    /// resolved again.
    pub fn remove(&mut self, handle: &H) -> usize {
        let mut removed = 0;
        while let Some(id) = self.find_handle(handle) {
            self.remove_node(id);
            removed += 1;
        }
        if removed > 0 {
            self.resolve_root_intersections();
        }
        removed
    }

    fn find_handle(&self, handle: &H) -> Option<NodeId> {
        for &root in &self.roots {
            if let Some(found) = self.find_in_subtree(root, handle) {
                return Some(found);
            }
        }
        None
    }

    fn find_in_subtree(&self, id: NodeId, handle: &H) -> Option<NodeId> {
        let node = self.node(id);
        if node.handle == *handle {
            return Some(id);
        }
        for &child in &node.children {
            if let Some(found) = self.find_in_subtree(child, handle) {
                return Some(found);
            }
        }
        None
    }

    fn remove_node(&mut self, id: NodeId) {
        let parent = self.node(id).parent;
        let children = core::mem::take(&mut self.node_mut(id).children);
        match parent {
            Some(p) => {
                self.node_mut(p).children.retain(|c| *c != id);
                for child in children {
                    self.link(p, child);
                }
            }
            None => {
                self.roots.retain(|r| *r != id);
                for &child in &children {
                    self.node_mut(child).parent = None;
                }
                self.roots.extend(children);
            }
        }
        self.free(id);
    }
}

impl<H: Clone> Forest<H> {
    /// Handles of objects lying entirely inside `rect`.
    ///
    /// Depth-first: a node whose box is fully inside the rectangle is tested
    /// point-by-point with [`fully_contained`] and its subtree is not
    /// descended further; otherwise its children are tried without testing
    /// the node itself.
    pub fn query_contained(&self, rect: Rect) -> Vec<H> {
        let mut found = Vec::new();
        for &root in &self.roots {
            self.collect_contained(root, rect, &mut found);
        }
        found
    }

    fn collect_contained(&self, id: NodeId, rect: Rect, out: &mut Vec<H>) {
        let node = self.node(id);
        if contains_rect(rect, self.bounds(id)) {
            if fully_contained(&node.geometry, rect) {
                out.push(node.handle.clone());
            }
        } else {
            for &child in &node.children {
                self.collect_contained(child, rect, out);
            }
        }
    }

    /// Handles of objects overlapping `rect`, for cursor-driven picking.
    ///
    /// Two phases: exact containment first ([`Self::query_contained`]); when
    /// that yields nothing, every node whose box holds or touches the
    /// rectangle becomes a candidate (children are always inspected, even
    /// under a matching node) and candidates are kept when their geometry
    /// contains the rectangle's center point. Approximating area overlap by
    /// a single center-point test is deliberate: picking rectangles are a
    /// few pixels wide.
    pub fn query_area(&self, rect: Rect) -> Vec<H> {
        let found = self.query_contained(rect);
        if !found.is_empty() {
            return found;
        }

        let mut candidates = Vec::new();
        for &root in &self.roots {
            self.collect_overlapping(root, rect, &mut candidates);
        }

        let center = rect.center();
        let mut found = Vec::new();
        for id in candidates {
            let node = self.node(id);
            if point_in_polygon(center, &node.geometry) {
                found.push(node.handle.clone());
            }
        }
        found
    }

    fn collect_overlapping(&self, id: NodeId, rect: Rect, out: &mut Vec<NodeId>) {
        let bounds = self.bounds(id);
        if contains_rect(bounds, rect) || rects_overlap(bounds, rect) {
            out.push(id);
        }
        for &child in &self.node(id).children {
            self.collect_overlapping(child, rect, out);
        }
    }

    /// Handles of every live object, depth-first over every root.
    pub fn handles(&self) -> Vec<H> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.collect_handles(root, &mut out);
        }
        out
    }

    fn collect_handles(&self, id: NodeId, out: &mut Vec<H>) {
        out.push(self.node(id).handle.clone());
        for &child in &self.node(id).children {
            self.collect_handles(child, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use kurbo::Point;

    fn square(x0: f64, y0: f64, size: f64) -> Geometry {
        Geometry::single(vec![
            Point::new(x0, y0),
            Point::new(x0 + size, y0),
            Point::new(x0 + size, y0 + size),
            Point::new(x0, y0 + size),
        ])
    }

    fn root_handles(forest: &Forest<u32>) -> Vec<u32> {
        forest
            .roots()
            .iter()
            .map(|&r| *forest.handle_of(r).expect("root is live"))
            .collect()
    }

    fn child_handles(forest: &Forest<u32>, id: NodeId) -> Vec<u32> {
        forest
            .children_of(id)
            .iter()
            .map(|&c| *forest.handle_of(c).expect("child is live"))
            .collect()
    }

    #[test]
    fn small_square_nests_under_large() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 10.0)).unwrap();
        forest.insert(2, square(4.0, 4.0, 2.0)).unwrap();

        assert_eq!(root_handles(&forest), vec![1]);
        let root = forest.roots()[0];
        assert_eq!(child_handles(&forest, root), vec![2]);
    }

    #[test]
    fn large_square_replaces_small_root() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(4.0, 4.0, 2.0)).unwrap();
        forest.insert(2, square(0.0, 0.0, 10.0)).unwrap();

        // Case A: the newcomer engulfs the old root and takes its place.
        assert_eq!(root_handles(&forest), vec![2]);
        let root = forest.roots()[0];
        assert_eq!(child_handles(&forest, root), vec![1]);
    }

    #[test]
    fn equal_area_overlap_prefers_the_newcomer_as_ancestor() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 10.0)).unwrap();
        forest.insert(2, square(5.0, 5.0, 10.0)).unwrap();

        // The `>=` tie-break: equal areas, intersecting, so the inserted
        // node becomes the ancestor. Pins insertion-order-dependent
        // behavior.
        assert_eq!(root_handles(&forest), vec![2]);
        let root = forest.roots()[0];
        assert_eq!(child_handles(&forest, root), vec![1]);
    }

    #[test]
    fn overlapping_insert_is_absorbed_not_left_as_second_root() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 10.0)).unwrap();
        forest.insert(2, square(5.0, 5.0, 8.0)).unwrap();

        assert_eq!(forest.roots().len(), 1);
        assert_eq!(root_handles(&forest), vec![1]);
    }

    #[test]
    fn engulfing_root_absorbs_other_roots_via_resolution() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 4.0)).unwrap();
        forest.insert(2, square(6.0, 0.0, 4.0)).unwrap();
        assert_eq!(forest.roots().len(), 2);

        // Engulfs both disjoint roots: replaces the first in place (Case A),
        // then top-level resolution folds the second under it.
        forest.insert(3, square(-1.0, -1.0, 12.0)).unwrap();
        assert_eq!(root_handles(&forest), vec![3]);
        let root = forest.roots()[0];
        let mut children = child_handles(&forest, root);
        children.sort_unstable();
        assert_eq!(children, vec![1, 2]);

        // Root boxes are pairwise disjoint afterwards.
        assert_eq!(forest.roots().len(), 1);
    }

    #[test]
    fn candidate_adopts_engulfed_siblings() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 20.0)).unwrap();
        forest.insert(2, square(1.0, 1.0, 2.0)).unwrap();
        // The medium square engulfs the small child, so it takes it over.
        forest.insert(3, square(0.5, 0.5, 10.0)).unwrap();

        let root = forest.roots()[0];
        assert_eq!(child_handles(&forest, root), vec![3]);
        let medium = forest.children_of(root)[0];
        assert_eq!(child_handles(&forest, medium), vec![2]);
    }

    #[test]
    fn disjoint_candidate_descends_into_matching_child() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 20.0)).unwrap();
        forest.insert(2, square(2.0, 2.0, 10.0)).unwrap();
        forest.insert(3, square(4.0, 4.0, 2.0)).unwrap();

        // The smallest square is inside child 2, not directly under the root.
        let root = forest.roots()[0];
        assert_eq!(child_handles(&forest, root), vec![2]);
        let mid = forest.children_of(root)[0];
        assert_eq!(child_handles(&forest, mid), vec![3]);
    }

    #[test]
    fn query_contained_returns_enclosed_objects() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 2.0)).unwrap();
        forest.insert(2, square(10.0, 10.0, 2.0)).unwrap();

        let hits = forest.query_contained(Rect::new(-1.0, -1.0, 3.0, 3.0));
        assert_eq!(hits, vec![1]);

        let all = forest.query_contained(Rect::new(-1.0, -1.0, 13.0, 13.0));
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn query_soundness_for_disjoint_objects() {
        let mut forest: Forest<u32> = Forest::new();
        let geometries = [
            square(0.0, 0.0, 2.0),
            square(5.0, 0.0, 3.0),
            square(0.0, 6.0, 1.0),
        ];
        for (i, g) in geometries.iter().enumerate() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "test handles fit in u32"
            )]
            forest.insert(i as u32, g.clone()).unwrap();
        }

        let rect = Rect::new(-1.0, -1.0, 9.0, 4.0);
        let hits = forest.query_contained(rect);
        for (i, g) in geometries.iter().enumerate() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "test handles fit in u32"
            )]
            let handle = i as u32;
            assert_eq!(
                fully_contained(g, rect),
                hits.contains(&handle),
                "object {i} containment must match query result"
            );
        }
    }

    #[test]
    fn query_contained_on_empty_forest_is_empty() {
        let forest: Forest<u32> = Forest::new();
        assert!(forest.query_contained(Rect::new(0.0, 0.0, 1.0, 1.0)).is_empty());
        assert!(forest.query_area(Rect::new(0.0, 0.0, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn query_area_prefers_contained_results() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 10.0)).unwrap();
        forest.insert(2, square(4.0, 4.0, 1.0)).unwrap();

        // The small square is fully inside the rect, so phase one answers
        // and the big surrounding polygon is not reported.
        let hits = forest.query_area(Rect::new(3.0, 3.0, 6.0, 6.0));
        assert_eq!(hits, vec![2]);
    }

    #[test]
    fn query_area_falls_back_to_center_point_test() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 10.0)).unwrap();

        // Nothing is contained in the picking rect; the center lands inside
        // the polygon, so the fallback reports it.
        let hits = forest.query_area(Rect::new(4.0, 4.0, 6.0, 6.0));
        assert_eq!(hits, vec![1]);

        // Center outside the polygon: no hit even though boxes intersect.
        let miss = forest.query_area(Rect::new(9.5, 9.5, 13.0, 13.0));
        assert!(miss.is_empty());
    }

    #[test]
    fn query_area_center_inside_with_corners_beyond_bounds() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 10.0)).unwrap();

        // The rect's corners stick out past the polygon's bounding box, but
        // its center is inside the polygon.
        let hits = forest.query_area(Rect::new(-1.0, 4.0, 11.0, 6.0));
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn remove_deletes_every_occurrence_and_unknown_is_noop() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 10.0)).unwrap();
        forest.insert(2, square(4.0, 4.0, 2.0)).unwrap();
        // The same handle indexed twice (two level-of-detail variants).
        forest.insert(2, square(4.0, 4.0, 3.0)).unwrap();

        assert_eq!(forest.remove(&2), 2);
        assert!(!forest.contains(&2));
        assert_eq!(forest.remove(&7), 0, "unknown handle is a no-op");

        // Delete completeness: no query mode returns the handle anymore.
        let everywhere = Rect::new(-100.0, -100.0, 100.0, 100.0);
        assert!(!forest.query_contained(everywhere).contains(&2));
        assert!(!forest.query_area(Rect::new(4.5, 4.5, 5.5, 5.5)).contains(&2));
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn remove_promotes_children_to_parent() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 20.0)).unwrap();
        forest.insert(2, square(2.0, 2.0, 10.0)).unwrap();
        forest.insert(3, square(4.0, 4.0, 2.0)).unwrap();

        // Removing the middle node must not orphan its subtree.
        assert_eq!(forest.remove(&2), 1);
        assert!(forest.contains(&3));
        let root = forest.roots()[0];
        assert_eq!(child_handles(&forest, root), vec![3]);
        assert!(
            forest.query_area(Rect::new(4.5, 4.5, 5.0, 5.0)).contains(&3),
            "promoted child must stay reachable by queries"
        );
    }

    #[test]
    fn removing_a_root_promotes_children_to_roots() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 20.0)).unwrap();
        forest.insert(2, square(1.0, 1.0, 3.0)).unwrap();
        forest.insert(3, square(10.0, 10.0, 3.0)).unwrap();

        assert_eq!(forest.remove(&1), 1);
        let mut roots = root_handles(&forest);
        roots.sort_unstable();
        assert_eq!(roots, vec![2, 3]);
        for &r in forest.roots() {
            assert_eq!(forest.parent_of(r), None);
        }
    }

    #[test]
    fn root_boxes_stay_disjoint_after_promotion() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 20.0)).unwrap();
        // Two overlapping children of the root.
        forest.insert(2, square(1.0, 1.0, 6.0)).unwrap();
        forest.insert(3, square(5.0, 5.0, 4.0)).unwrap();

        // Handle 3 was absorbed under 2 (or alongside); removing the root
        // re-resolves the top level either way.
        assert_eq!(forest.remove(&1), 1);
        let roots = forest.roots();
        for (i, &a) in roots.iter().enumerate() {
            for &b in &roots[i + 1..] {
                let ba = forest.bounding_box_of(a).unwrap();
                let bb = forest.bounding_box_of(b).unwrap();
                assert!(
                    !rects_overlap(ba, bb),
                    "root boxes must be disjoint after resolution"
                );
            }
        }
    }

    #[test]
    fn insert_rejects_malformed_geometry() {
        let mut forest: Forest<u32> = Forest::new();
        assert_eq!(
            forest.insert(1, Geometry::default()),
            Err(InsertError::EmptyGeometry)
        );
        assert_eq!(
            forest.insert(1, Geometry::new(vec![vec![]])),
            Err(InsertError::EmptyGeometry)
        );
        assert_eq!(
            forest.insert(1, Geometry::single(vec![Point::new(f64::NAN, 0.0)])),
            Err(InsertError::NonFinite)
        );
        assert!(forest.is_empty());
    }

    #[test]
    fn bounding_boxes_cover_every_node() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 10.0)).unwrap();
        forest.insert(2, square(1.0, 1.0, 2.0)).unwrap();
        forest.insert(3, square(20.0, 20.0, 5.0)).unwrap();

        let boxes = forest.bounding_boxes();
        assert_eq!(boxes.len(), 3);
        assert!(boxes.contains(&Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(boxes.contains(&Rect::new(1.0, 1.0, 3.0, 3.0)));
        assert!(boxes.contains(&Rect::new(20.0, 20.0, 25.0, 25.0)));
    }

    #[test]
    fn slots_are_reused_with_bumped_generations() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 2.0)).unwrap();
        let first = forest.roots()[0];
        forest.remove(&1);
        assert!(!forest.is_alive(first));

        forest.insert(2, square(0.0, 0.0, 2.0)).unwrap();
        let second = forest.roots()[0];
        assert!(forest.is_alive(second));
        assert!(!forest.is_alive(first), "stale id must stay stale after reuse");
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn handles_walks_every_node() {
        let mut forest: Forest<u32> = Forest::new();
        forest.insert(1, square(0.0, 0.0, 10.0)).unwrap();
        forest.insert(2, square(2.0, 2.0, 2.0)).unwrap();
        forest.insert(3, square(20.0, 0.0, 4.0)).unwrap();

        let mut handles = forest.handles();
        handles.sort_unstable();
        assert_eq!(handles, vec![1, 2, 3]);
    }

    #[test]
    fn identical_geometry_distinct_handles_delete_independently() {
        let mut forest: Forest<u32> = Forest::new();
        let g = square(0.0, 0.0, 5.0);
        forest.insert(1, g.clone()).unwrap();
        forest.insert(2, g).unwrap();

        assert_eq!(forest.remove(&1), 1);
        assert!(forest.contains(&2), "handle equality, not geometry, keys deletion");
    }
}
