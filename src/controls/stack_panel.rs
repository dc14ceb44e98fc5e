//! Consecutive stacking along one axis.

use std::any::Any;

use crate::control::{Behavior, SizePolicy, SlotKind};
use crate::drawing::{DrawingContext, RectOptions};
use crate::geometry::Rect;
use crate::tree::{ControlId, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

/// Lays children out consecutively along its orientation axis; the cross
/// axis always gets the full box.
///
/// A child's offset is the sum of the extents of the preceding siblings
/// that are not BoundingBox-sized; a BoundingBox child takes whatever
/// room remains, so it is expected to be the trailing flexible element.
#[derive(Debug, Default)]
pub struct StackPanel {
    pub orientation: Orientation,
}

impl StackPanel {
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    /// Offset of `child` along the stacking axis.
    fn offset_of(&self, tree: &Tree, id: ControlId, child: ControlId) -> i32 {
        let mut offset = 0i32;
        for sibling in tree.children(id) {
            if sibling == child {
                break;
            }
            let policy = match self.orientation {
                Orientation::Horizontal => tree.width(sibling),
                Orientation::Vertical => tree.height(sibling),
            };
            if matches!(policy, SizePolicy::BoundingBox) {
                continue;
            }
            let extent = match self.orientation {
                Orientation::Horizontal => tree.actual_width(sibling),
                Orientation::Vertical => tree.actual_height(sibling),
            };
            offset = offset.saturating_add(extent);
        }
        offset
    }
}

impl Behavior for StackPanel {
    fn slot_kind(&self) -> SlotKind {
        SlotKind::Children
    }

    fn measure_bounding_box(&self, tree: &Tree, id: ControlId, child: ControlId) -> Rect {
        let width = tree.actual_width(id);
        let height = tree.actual_height(id);
        let offset = self.offset_of(tree, id, child);
        match self.orientation {
            Orientation::Vertical => {
                let extent = if matches!(tree.height(child), SizePolicy::BoundingBox) {
                    height.saturating_sub(offset)
                } else {
                    tree.actual_height(child)
                };
                Rect::new(0, offset, width, extent)
            }
            Orientation::Horizontal => {
                let extent = if matches!(tree.width(child), SizePolicy::BoundingBox) {
                    width.saturating_sub(offset)
                } else {
                    tree.actual_width(child)
                };
                Rect::new(offset, 0, extent, height)
            }
        }
    }

    fn max_width(&self, tree: &Tree, id: ControlId) -> i32 {
        match self.orientation {
            Orientation::Horizontal => tree
                .children(id)
                .iter()
                .filter(|&&c| !matches!(tree.width(c), SizePolicy::BoundingBox))
                .fold(0i32, |sum, &c| sum.saturating_add(tree.actual_width(c))),
            Orientation::Vertical => tree.content_max_width(id),
        }
    }

    fn max_height(&self, tree: &Tree, id: ControlId) -> i32 {
        match self.orientation {
            Orientation::Vertical => tree
                .children(id)
                .iter()
                .filter(|&&c| !matches!(tree.height(c), SizePolicy::BoundingBox))
                .fold(0i32, |sum, &c| sum.saturating_add(tree.actual_height(c))),
            Orientation::Horizontal => tree.content_max_height(id),
        }
    }

    fn render(&self, tree: &Tree, id: ControlId, ctx: &mut DrawingContext) {
        ctx.clear(RectOptions {
            foreground: tree.foreground(id),
            background: tree.background(id),
            ..RectOptions::default()
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf;

    impl Behavior for Leaf {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn fixed_stack(tree: &mut Tree, heights: &[i32]) -> (ControlId, Vec<ControlId>) {
        let stack = tree.add(StackPanel::new(Orientation::Vertical));
        tree.set_width(stack, SizePolicy::Fixed(20));
        tree.set_height(stack, SizePolicy::Fixed(15));
        let mut children = Vec::new();
        for &h in heights {
            let c = tree.add(Leaf);
            tree.set_height(c, SizePolicy::Fixed(h));
            tree.add_child(stack, c).unwrap();
            children.push(c);
        }
        (stack, children)
    }

    #[test]
    fn test_vertical_offsets_accumulate() {
        let mut tree = Tree::new();
        let (stack, children) = fixed_stack(&mut tree, &[3, 4, 5]);
        let panel = tree.behavior::<StackPanel>(stack);
        let offsets: Vec<i32> = children
            .iter()
            .map(|&c| panel.measure_bounding_box(&tree, stack, c).y)
            .collect();
        assert_eq!(offsets, vec![0, 3, 7]);
    }

    #[test]
    fn test_cross_axis_gets_full_box() {
        let mut tree = Tree::new();
        let (stack, children) = fixed_stack(&mut tree, &[3]);
        let bb = tree
            .behavior::<StackPanel>(stack)
            .measure_bounding_box(&tree, stack, children[0]);
        assert_eq!(bb, Rect::new(0, 0, 20, 3));
    }

    #[test]
    fn test_bounding_box_child_takes_remainder_and_adds_no_offset() {
        let mut tree = Tree::new();
        let stack = tree.add(StackPanel::new(Orientation::Vertical));
        tree.set_width(stack, SizePolicy::Fixed(10));
        tree.set_height(stack, SizePolicy::Fixed(12));
        let a = tree.add(Leaf);
        tree.set_height(a, SizePolicy::Fixed(4));
        let flexible = tree.add(Leaf);
        let after = tree.add(Leaf);
        tree.set_height(after, SizePolicy::Fixed(2));
        for c in [a, flexible, after] {
            tree.add_child(stack, c).unwrap();
        }
        let panel = tree.behavior::<StackPanel>(stack);
        assert_eq!(
            panel.measure_bounding_box(&tree, stack, flexible),
            Rect::new(0, 4, 10, 8)
        );
        // the flexible sibling does not advance the running offset
        assert_eq!(panel.measure_bounding_box(&tree, stack, after).y, 4);
    }

    #[test]
    fn test_max_by_content_sums_stacking_axis() {
        let mut tree = Tree::new();
        let (stack, _) = fixed_stack(&mut tree, &[3, 4, 5]);
        tree.set_height(stack, SizePolicy::MaxByContent);
        assert_eq!(tree.actual_height(stack), 12);
    }
}
