use super::config::PaddingMode;
use super::types::Element;
use super::QuadTree;
use crate::error::QuadtreeResult;
use common::shapes::{distance_sq, Rectangle};

impl<T> QuadTree<T> {
    /// Collects exactly the elements stored in the leaf containing
    /// `(x, y)`, with no correction for elements just across a leaf
    /// boundary. O(leaf density).
    pub fn elements_near<'a>(
        &'a self,
        x: f32,
        y: f32,
        out: &mut Vec<&'a Element<T>>,
    ) -> QuadtreeResult<()> {
        let leaf = self.locate(x, y)?;
        out.clear();
        out.extend(&self.nodes[leaf as usize].elements);
        Ok(())
    }

    /// Cheap nearest-neighbor: scans only the leaf containing `(x, y)`.
    /// An element just across the leaf boundary may be missed even when it
    /// is closer; [`nearest_padded`](Self::nearest_padded) corrects that.
    pub fn nearest(&self, x: f32, y: f32) -> QuadtreeResult<Option<&Element<T>>> {
        let leaf = self.locate(x, y)?;
        let mut closest = None;
        let mut best = f32::INFINITY;
        for element in &self.nodes[leaf as usize].elements {
            let d = distance_sq(element.x, element.y, x, y);
            if d < best {
                best = d;
                closest = Some(element);
            }
        }
        Ok(closest)
    }

    /// Boundary-correct nearest-neighbor: scans all elements inside the
    /// padded search rectangle around the leaf containing `(x, y)`. More
    /// expensive than [`nearest`](Self::nearest) but does not miss closer
    /// elements just across the leaf boundary.
    pub fn nearest_padded(&self, x: f32, y: f32) -> QuadtreeResult<Option<&Element<T>>> {
        let rect = self.padded_search_rect(x, y)?;
        self.nearest_in(x, y, rect)
    }

    /// Nearest-neighbor over an explicit search rectangle: scans every
    /// element whose coordinate lies within `bounds` and returns the one
    /// closest to `(x, y)`. Ties go to the earliest-inserted element.
    pub fn nearest_in(
        &self,
        x: f32,
        y: f32,
        bounds: Rectangle,
    ) -> QuadtreeResult<Option<&Element<T>>> {
        self.check_rect(&bounds)?;
        let mut leaves = self.leaf_buf();
        self.collect_leaves_in(&bounds, &mut leaves);
        let mut closest = None;
        let mut best = f32::INFINITY;
        for &leaf in leaves.iter() {
            for element in &self.nodes[leaf as usize].elements {
                if !bounds.contains_point(element.x, element.y) {
                    continue;
                }
                let d = distance_sq(element.x, element.y, x, y);
                if d < best {
                    best = d;
                    closest = Some(element);
                }
            }
        }
        Ok(closest)
    }

    /// The search rectangle [`nearest_padded`](Self::nearest_padded) uses:
    /// the bounds of the leaf containing `(x, y)`, expanded per the
    /// configured [`PaddingMode`]. Public so renderers can draw it.
    pub fn padded_search_rect(&self, x: f32, y: f32) -> QuadtreeResult<Rectangle> {
        let leaf = self.locate(x, y)?;
        let leaf_bounds = self.nodes[leaf as usize].bounds;
        let (pad_x, pad_y) = match self.config.padding {
            PaddingMode::FinestCell => {
                let cells = (1u32 << self.config.max_depth) as f32;
                (self.bounds.width / cells, self.bounds.height / cells)
            }
            PaddingMode::LeafExtent => (leaf_bounds.width, leaf_bounds.height),
        };
        Ok(leaf_bounds.expanded(pad_x, pad_y))
    }
}
