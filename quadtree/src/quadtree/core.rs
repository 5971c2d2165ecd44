use super::config::MAX_DEPTH_LIMIT;
use super::types::{quadrant_for, Element, Node, NodeRef, NIL, ROOT};
use super::{Config, QuadTree};
use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::{distance_sq, Rectangle};
use std::cell::RefCell;

impl<T> QuadTree<T> {
    pub fn new(bounds: Rectangle) -> Self {
        Self::with_config(bounds, Config::default())
    }

    pub fn with_config(bounds: Rectangle, config: Config) -> Self {
        let mut config = config;
        config.max_depth = config.max_depth.clamp(1, MAX_DEPTH_LIMIT);
        config.elements_per_node = config.elements_per_node.max(1);
        QuadTree {
            nodes: vec![Node::new_root(bounds)],
            free_blocks: Vec::new(),
            bounds,
            config,
            leaf_scratch: RefCell::new(Vec::new()),
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Total number of stored elements, O(1).
    pub fn len(&self) -> usize {
        self.nodes[ROOT as usize].size as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef {
            node: &self.nodes[ROOT as usize],
        }
    }

    /// Inserts a payload at `(x, y)`, splitting the target leaf when its
    /// local count exceeds `elements_per_node` below `max_depth`.
    pub fn insert(&mut self, x: f32, y: f32, data: T) -> QuadtreeResult<()> {
        let leaf = self.locate(x, y)?;
        self.nodes[leaf as usize].elements.push(Element::new(x, y, data));
        self.increment_sizes(leaf);
        let node = &self.nodes[leaf as usize];
        if node.elements.len() > self.config.elements_per_node && node.depth < self.config.max_depth
        {
            self.split(leaf);
        }
        Ok(())
    }

    /// Removes the first element at the leaf containing `(x, y)` whose
    /// payload equals `data`. Returns whether a removal occurred.
    pub fn remove(&mut self, x: f32, y: f32, data: &T) -> QuadtreeResult<bool>
    where
        T: PartialEq,
    {
        let leaf = self.locate(x, y)?;
        Ok(self.remove_from_leaf(leaf, data))
    }

    /// Like [`remove`](Self::remove), but scans every leaf overlapping
    /// `bounds`, for callers that are no longer certain which leaf holds
    /// the element, e.g. after a padded lookup.
    pub fn remove_in(&mut self, bounds: Rectangle, data: &T) -> QuadtreeResult<bool>
    where
        T: PartialEq,
    {
        self.check_rect(&bounds)?;
        let mut leaves = Vec::new();
        self.collect_leaves_in(&bounds, &mut leaves);
        for leaf in leaves {
            if self.remove_from_leaf(leaf, data) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Removes and returns the element closest to `(x, y)` within the leaf
    /// containing that point, or `None` if the leaf holds nothing. Ties go
    /// to the earliest-inserted element.
    pub fn remove_nearest(&mut self, x: f32, y: f32) -> QuadtreeResult<Option<Element<T>>> {
        let leaf = self.locate(x, y)?;
        let mut closest = None;
        let mut best = f32::INFINITY;
        for (i, element) in self.nodes[leaf as usize].elements.iter().enumerate() {
            let d = distance_sq(element.x, element.y, x, y);
            if d < best {
                best = d;
                closest = Some(i);
            }
        }
        match closest {
            Some(pos) => {
                let element = self.nodes[leaf as usize].elements.remove(pos);
                self.decrement_sizes(leaf);
                self.join_check(leaf);
                Ok(Some(element))
            }
            None => Ok(None),
        }
    }

    // Descends to the leaf owning `(x, y)`. Quadrant choice is total, so
    // the only failure is a point outside the universe.
    pub(crate) fn locate(&self, x: f32, y: f32) -> QuadtreeResult<u32> {
        if !self.bounds.contains_point(x, y) {
            return Err(QuadtreeError::PointOutOfBounds {
                x,
                y,
                bounds_min_x: self.bounds.left(),
                bounds_min_y: self.bounds.bottom(),
                bounds_max_x: self.bounds.right(),
                bounds_max_y: self.bounds.top(),
            });
        }
        let mut idx = ROOT;
        loop {
            let node = &self.nodes[idx as usize];
            if node.is_leaf() {
                return Ok(idx);
            }
            idx = node.children + quadrant_for(&node.bounds, x, y);
        }
    }

    pub(crate) fn check_rect(&self, rect: &Rectangle) -> QuadtreeResult<()> {
        if !self.bounds.overlaps(rect) {
            return Err(QuadtreeError::RectOutOfBounds {
                min_x: rect.left(),
                min_y: rect.bottom(),
                max_x: rect.right(),
                max_y: rect.top(),
                bounds_min_x: self.bounds.left(),
                bounds_min_y: self.bounds.bottom(),
                bounds_max_x: self.bounds.right(),
                bounds_max_y: self.bounds.top(),
            });
        }
        Ok(())
    }

    fn remove_from_leaf(&mut self, leaf: u32, data: &T) -> bool
    where
        T: PartialEq,
    {
        let pos = self.nodes[leaf as usize]
            .elements
            .iter()
            .position(|element| element.data == *data);
        match pos {
            Some(pos) => {
                self.nodes[leaf as usize].elements.remove(pos);
                self.decrement_sizes(leaf);
                self.join_check(leaf);
                true
            }
            None => false,
        }
    }

    fn join_check(&mut self, leaf: u32) {
        if self.config.join_threshold < 0 {
            return;
        }
        let parent = self.nodes[leaf as usize].parent;
        if parent == NIL {
            return;
        }
        if self.nodes[parent as usize].size < self.config.join_threshold as u32 {
            self.join(parent);
        }
    }

    fn increment_sizes(&mut self, mut idx: u32) {
        loop {
            let node = &mut self.nodes[idx as usize];
            node.size += 1;
            if node.parent == NIL {
                break;
            }
            idx = node.parent;
        }
    }

    fn decrement_sizes(&mut self, mut idx: u32) {
        loop {
            let node = &mut self.nodes[idx as usize];
            node.size -= 1;
            if node.parent == NIL {
                break;
            }
            idx = node.parent;
        }
    }
}
