use super::types::{quadrant_bounds, quadrant_for, Node, NodeStack, NIL};
use super::QuadTree;
use smallvec::SmallVec;
use std::mem;

impl<T> QuadTree<T> {
    // Turns a leaf into an internal node: four children take over its
    // quadrants and its elements are redistributed among them. Child blocks
    // freed by earlier joins are reused before the arena grows.
    pub(crate) fn split(&mut self, node_idx: u32) {
        debug_assert!(self.nodes[node_idx as usize].is_leaf());
        let bounds = self.nodes[node_idx as usize].bounds;
        let child_depth = self.nodes[node_idx as usize].depth + 1;
        let first = match self.free_blocks.pop() {
            Some(first) => {
                for quadrant in 0..4 {
                    let child_bounds = quadrant_bounds(&bounds, quadrant);
                    self.nodes[(first + quadrant) as usize].reset(
                        child_bounds,
                        node_idx,
                        child_depth,
                    );
                }
                first
            }
            None => {
                let first = self.nodes.len() as u32;
                for quadrant in 0..4 {
                    self.nodes.push(Node::new_child(
                        quadrant_bounds(&bounds, quadrant),
                        node_idx,
                        child_depth,
                    ));
                }
                first
            }
        };
        self.nodes[node_idx as usize].children = first;
        let elements = mem::take(&mut self.nodes[node_idx as usize].elements);
        for element in elements {
            let quadrant = quadrant_for(&bounds, element.x, element.y);
            let child = &mut self.nodes[(first + quadrant) as usize];
            child.size += 1;
            child.elements.push(element);
        }
    }

    // Inverse of split: drains every element of the subtree back into this
    // node and returns all child blocks to the free list. The whole subtree
    // is walked because a child may itself still be subdivided.
    pub(crate) fn join(&mut self, node_idx: u32) {
        let first = self.nodes[node_idx as usize].children;
        if first == NIL {
            return;
        }
        let mut elements = mem::take(&mut self.nodes[node_idx as usize].elements);
        let mut blocks: NodeStack = SmallVec::new();
        blocks.push(first);
        while let Some(block) = blocks.pop() {
            for quadrant in 0..4 {
                let idx = (block + quadrant) as usize;
                if self.nodes[idx].children != NIL {
                    blocks.push(self.nodes[idx].children);
                }
                let mut drained = mem::take(&mut self.nodes[idx].elements);
                elements.append(&mut drained);
                self.nodes[idx].release();
            }
            self.free_blocks.push(block);
        }
        let node = &mut self.nodes[node_idx as usize];
        node.children = NIL;
        node.elements = elements;
        debug_assert_eq!(node.size as usize, node.elements.len());
    }
}
