use super::types::{Element, LeafBuf, NodeRef, NodeStack, ROOT};
use super::QuadTree;
use crate::error::QuadtreeResult;
use common::shapes::Rectangle;
use smallvec::SmallVec;

impl<T> QuadTree<T> {
    /// Collects every element whose own coordinate lies within `bounds`.
    /// A leaf overlapping the query rectangle may still hold elements
    /// outside it, so each element is filtered individually.
    pub fn elements_in<'a>(
        &'a self,
        bounds: Rectangle,
        out: &mut Vec<&'a Element<T>>,
    ) -> QuadtreeResult<()> {
        self.check_rect(&bounds)?;
        let mut leaves = self.leaf_buf();
        self.collect_leaves_in(&bounds, &mut leaves);
        out.clear();
        for &leaf in leaves.iter() {
            for element in &self.nodes[leaf as usize].elements {
                if bounds.contains_point(element.x, element.y) {
                    out.push(element);
                }
            }
        }
        Ok(())
    }

    /// Collects the elements of every leaf overlapping `bounds`, without
    /// point-level filtering. Looser and cheaper than
    /// [`elements_in`](Self::elements_in).
    pub fn elements_near_rect<'a>(
        &'a self,
        bounds: Rectangle,
        out: &mut Vec<&'a Element<T>>,
    ) -> QuadtreeResult<()> {
        self.check_rect(&bounds)?;
        let mut leaves = self.leaf_buf();
        self.collect_leaves_in(&bounds, &mut leaves);
        out.clear();
        for &leaf in leaves.iter() {
            out.extend(&self.nodes[leaf as usize].elements);
        }
        Ok(())
    }

    /// Collects every stored element, in leaf traversal order.
    pub fn elements<'a>(&'a self, out: &mut Vec<&'a Element<T>>) {
        let mut leaves = self.leaf_buf();
        self.collect_leaves(&mut leaves);
        out.clear();
        for &leaf in leaves.iter() {
            out.extend(&self.nodes[leaf as usize].elements);
        }
    }

    /// Collects every leaf node, for full enumeration by renderers.
    pub fn leaves<'a>(&'a self, out: &mut Vec<NodeRef<'a, T>>) {
        let mut buf = self.leaf_buf();
        self.collect_leaves(&mut buf);
        out.clear();
        for &leaf in buf.iter() {
            out.push(NodeRef {
                node: &self.nodes[leaf as usize],
            });
        }
    }

    /// Collects every leaf whose bounds overlap `bounds`, pruning subtrees
    /// that do not.
    pub fn leaves_in<'a>(
        &'a self,
        bounds: Rectangle,
        out: &mut Vec<NodeRef<'a, T>>,
    ) -> QuadtreeResult<()> {
        self.check_rect(&bounds)?;
        let mut buf = self.leaf_buf();
        self.collect_leaves_in(&bounds, &mut buf);
        out.clear();
        for &leaf in buf.iter() {
            out.push(NodeRef {
                node: &self.nodes[leaf as usize],
            });
        }
        Ok(())
    }

    pub(crate) fn leaf_buf(&self) -> LeafBuf<'_> {
        if self.config.allocate_results {
            LeafBuf::Fresh(Vec::new())
        } else {
            let mut scratch = self.leaf_scratch.borrow_mut();
            scratch.clear();
            LeafBuf::Scratch(scratch)
        }
    }

    // Children are pushed in reverse so leaves come out in NW, NE, SW, SE
    // order, keeping collection order deterministic.
    pub(crate) fn collect_leaves_in(&self, rect: &Rectangle, out: &mut Vec<u32>) {
        let mut stack: NodeStack = SmallVec::new();
        stack.push(ROOT);
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx as usize];
            if !node.bounds.overlaps(rect) {
                continue;
            }
            if node.is_leaf() {
                out.push(idx);
            } else {
                for quadrant in (0..4).rev() {
                    stack.push(node.children + quadrant);
                }
            }
        }
    }

    pub(crate) fn collect_leaves(&self, out: &mut Vec<u32>) {
        let mut stack: NodeStack = SmallVec::new();
        stack.push(ROOT);
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx as usize];
            if node.is_leaf() {
                out.push(idx);
            } else {
                for quadrant in (0..4).rev() {
                    stack.push(node.children + quadrant);
                }
            }
        }
    }
}
