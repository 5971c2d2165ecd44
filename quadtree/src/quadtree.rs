mod config;
mod core;
mod maintenance;
mod query_point;
mod query_rect;
mod types;

pub use config::{Config, PaddingMode};
pub use types::{Element, NodeRef};

use common::shapes::Rectangle;
use std::cell::RefCell;
use std::fmt;
use types::Node;

/// Adaptive region quadtree over a bounded rectangular universe.
///
/// Leaves hold the elements; a leaf whose local count exceeds
/// `Config::elements_per_node` splits into four quadrants until
/// `Config::max_depth`, and removals can collapse a parent's quadrants back
/// into it once its subtree count drops below `Config::join_threshold`.
/// Nodes live in a flat arena and refer to each other by index, with child
/// quadrants allocated as contiguous blocks of four.
pub struct QuadTree<T> {
    nodes: Vec<Node<T>>,
    free_blocks: Vec<u32>,
    bounds: Rectangle,
    config: Config,
    leaf_scratch: RefCell<Vec<u32>>,
}

impl<T> fmt::Display for QuadTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        for idx in leaves {
            let node = &self.nodes[idx as usize];
            for _ in 0..node.depth {
                write!(f, "   ")?;
            }
            writeln!(
                f,
                "({}, {}, {}, {}), depth={}, elements={}",
                node.bounds.x,
                node.bounds.y,
                node.bounds.width,
                node.bounds.height,
                node.depth,
                node.elements.len()
            )?;
        }
        Ok(())
    }
}
