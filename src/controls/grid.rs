//! Row/column track layout.
//!
//! Tracks are sized in two passes per axis: Fixed and Auto tracks first,
//! then the remaining space is split across Grow tracks by weight, with
//! the first weighted track absorbing the integer-division remainder.
//! Placement metadata is a typed side-table keyed by [`ControlId`], so any
//! control can sit in a grid without carrying grid fields.

use std::any::Any;
use std::collections::HashMap;

use crate::cell::{Cell, CellAttr};
use crate::control::{Behavior, SizePolicy, SlotKind};
use crate::drawing::{frame_piece, DrawingContext, FramePiece, FrameStyle, RectOptions};
use crate::geometry::Rect;
use crate::tree::{ControlId, Tree};

// =============================================================================
// Track and placement types
// =============================================================================

/// One row or column track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSize {
    /// Exactly this many cells.
    Fixed(i32),
    /// A weighted share of the space left after Fixed and Auto tracks.
    Grow(i32),
    /// Sized to the largest assigned child; becomes a fill track when
    /// every assigned child is BoundingBox-sized, and zero with none.
    Auto,
}

/// Where a child sits in the grid. Defaults to the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlacement {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub column_span: usize,
}

impl Default for GridPlacement {
    fn default() -> Self {
        Self {
            row: 0,
            column: 0,
            row_span: 1,
            column_span: 1,
        }
    }
}

impl GridPlacement {
    pub fn at(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            ..Self::default()
        }
    }

    pub fn spanning(mut self, row_span: usize, column_span: usize) -> Self {
        self.row_span = row_span.max(1);
        self.column_span = column_span.max(1);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Rows,
    Columns,
}

// =============================================================================
// Grid
// =============================================================================

/// A rows × columns container, optionally drawing its track separators.
#[derive(Debug, Default)]
pub struct Grid {
    pub rows: Vec<GridSize>,
    pub columns: Vec<GridSize>,
    pub borders: Option<FrameStyle>,
    placements: HashMap<ControlId, GridPlacement>,
}

impl Grid {
    pub fn new(rows: Vec<GridSize>, columns: Vec<GridSize>) -> Self {
        Self {
            rows,
            columns,
            borders: None,
            placements: HashMap::new(),
        }
    }

    pub fn with_borders(mut self, style: FrameStyle) -> Self {
        self.borders = Some(style);
        self
    }

    /// Assign a child's grid placement.
    pub fn place(&mut self, child: ControlId, placement: GridPlacement) {
        self.placements.insert(child, placement);
    }

    pub fn placement(&self, child: ControlId) -> GridPlacement {
        self.placements.get(&child).copied().unwrap_or_default()
    }

    fn tracks(&self, axis: Axis) -> Vec<GridSize> {
        let tracks = match axis {
            Axis::Rows => &self.rows,
            Axis::Columns => &self.columns,
        };
        if tracks.is_empty() {
            vec![GridSize::Grow(1)]
        } else {
            tracks.clone()
        }
    }

    /// Clamp a placement onto the actual track grid.
    fn clamped(&self, child: ControlId, row_count: usize, column_count: usize) -> GridPlacement {
        let p = self.placement(child);
        let row = p.row.min(row_count - 1);
        let column = p.column.min(column_count - 1);
        GridPlacement {
            row,
            column,
            row_span: p.row_span.max(1).min(row_count - row),
            column_span: p.column_span.max(1).min(column_count - column),
        }
    }

    /// The extent of each child along `axis`, considered for Auto tracks:
    /// single-span, not BoundingBox-sized.
    fn auto_candidate(&self, tree: &Tree, child: ControlId, axis: Axis) -> Option<i32> {
        let policy = match axis {
            Axis::Rows => tree.height(child),
            Axis::Columns => tree.width(child),
        };
        if matches!(policy, SizePolicy::BoundingBox) {
            return None;
        }
        Some(match axis {
            Axis::Rows => tree.actual_height(child),
            Axis::Columns => tree.actual_width(child),
        })
    }

    /// Resolve track sizes along one axis for the given total extent.
    fn resolve(&self, tree: &Tree, id: ControlId, axis: Axis, extent: i32) -> Vec<i32> {
        let tracks = self.tracks(axis);
        let count = tracks.len();
        let separator = i32::from(self.borders.is_some());
        let available = extent
            .saturating_sub(separator * (count as i32 + 1))
            .max(0);

        // Pass 1: Fixed and Auto sizes, Grow weights.
        let children = tree.children(id);
        let mut sizes = vec![0i32; count];
        let mut weights = vec![0i32; count];
        for (index, track) in tracks.iter().enumerate() {
            match *track {
                GridSize::Fixed(n) => sizes[index] = n.max(0),
                GridSize::Grow(w) => weights[index] = w.max(0),
                GridSize::Auto => {
                    let mut assigned = false;
                    let mut best: Option<i32> = None;
                    for &child in &children {
                        let p = self.placement(child);
                        let (track_index, span) = match axis {
                            Axis::Rows => (p.row, p.row_span.max(1)),
                            Axis::Columns => (p.column, p.column_span.max(1)),
                        };
                        if track_index != index || span != 1 {
                            continue;
                        }
                        assigned = true;
                        if let Some(size) = self.auto_candidate(tree, child, axis) {
                            best = Some(best.unwrap_or(0).max(size));
                        }
                    }
                    match (assigned, best) {
                        (_, Some(size)) => sizes[index] = size,
                        // Only BoundingBox children: fill like Grow(1).
                        (true, None) => weights[index] = 1,
                        (false, None) => sizes[index] = 0,
                    }
                }
            }
        }

        // Pass 2: split what remains across the weighted tracks.
        let used: i32 = sizes.iter().fold(0, |sum, &s| sum.saturating_add(s));
        let remaining = available.saturating_sub(used).max(0);
        let total_weight: i32 = weights.iter().sum();
        if total_weight > 0 {
            let unit = remaining / total_weight;
            for index in 0..count {
                if weights[index] > 0 {
                    sizes[index] = weights[index] * unit;
                }
            }
            if let Some(first) = (0..count).find(|&i| weights[i] > 0) {
                sizes[first] += remaining - unit * total_weight;
            }
        }
        sizes
    }

    /// Positions of the grid lines for one axis: `count + 1` entries.
    /// Without borders these are plain prefix sums.
    fn line_positions(&self, sizes: &[i32]) -> Vec<i32> {
        let separator = i32::from(self.borders.is_some());
        let mut positions = Vec::with_capacity(sizes.len() + 1);
        let mut pos = 0i32;
        positions.push(pos);
        for &size in sizes {
            pos = pos.saturating_add(size + separator);
            positions.push(pos);
        }
        positions
    }

    fn child_rect(&self, tree: &Tree, id: ControlId, child: ControlId) -> Rect {
        let widths = self.resolve(tree, id, Axis::Columns, tree.actual_width(id));
        let heights = self.resolve(tree, id, Axis::Rows, tree.actual_height(id));
        let p = self.clamped(child, heights.len(), widths.len());
        let separator = i32::from(self.borders.is_some());
        let xs = self.line_positions(&widths);
        let ys = self.line_positions(&heights);
        let x = xs[p.column] + separator;
        let y = ys[p.row] + separator;
        Rect::new(
            x,
            y,
            xs[p.column + p.column_span] - x,
            ys[p.row + p.row_span] - y,
        )
    }

    /// Cell owner map for separator suppression: `(row, column)` to the
    /// spanning child covering it.
    fn occupancy(&self, tree: &Tree, id: ControlId, rows: usize, columns: usize) -> HashMap<(usize, usize), ControlId> {
        let mut map = HashMap::new();
        for child in tree.children(id) {
            let p = self.clamped(child, rows, columns);
            for r in p.row..p.row + p.row_span {
                for c in p.column..p.column + p.column_span {
                    map.insert((r, c), child);
                }
            }
        }
        map
    }

    fn draw_separators(&self, tree: &Tree, id: ControlId, ctx: &mut DrawingContext, style: FrameStyle) {
        let widths = self.resolve(tree, id, Axis::Columns, tree.actual_width(id));
        let heights = self.resolve(tree, id, Axis::Rows, tree.actual_height(id));
        let columns = widths.len();
        let rows = heights.len();
        let xs = self.line_positions(&widths);
        let ys = self.line_positions(&heights);
        let occupancy = self.occupancy(tree, id, rows, columns);
        let owner = |r: usize, c: usize| occupancy.get(&(r, c)).copied();

        // A separator segment between two cells of the same spanning
        // child is suppressed; outer edges always draw.
        let vertical_segment = |line: usize, row: usize| -> bool {
            if line == 0 || line == columns {
                return true;
            }
            match (owner(row, line - 1), owner(row, line)) {
                (Some(a), Some(b)) => a != b,
                _ => true,
            }
        };
        let horizontal_segment = |line: usize, column: usize| -> bool {
            if line == 0 || line == rows {
                return true;
            }
            match (owner(line - 1, column), owner(line, column)) {
                (Some(a), Some(b)) => a != b,
                _ => true,
            }
        };

        let foreground = tree.foreground(id);
        let background = tree.background(id);
        let mut put = |piece: FramePiece, x: i32, y: i32| {
            let glyph = frame_piece(piece, style);
            ctx.put_char(
                Cell::styled(glyph, foreground, background, CellAttr::empty()),
                x,
                y,
            );
        };

        for line in 0..=columns {
            for row in 0..rows {
                if !vertical_segment(line, row) {
                    continue;
                }
                for y in ys[row] + 1..ys[row + 1] {
                    put(FramePiece::VERTICAL, xs[line], y);
                }
            }
        }
        for line in 0..=rows {
            for column in 0..columns {
                if !horizontal_segment(line, column) {
                    continue;
                }
                for x in xs[column] + 1..xs[column + 1] {
                    put(FramePiece::HORIZONTAL, x, ys[line]);
                }
            }
        }

        // Junction glyph = the union of the incident visible segments.
        for line_x in 0..=columns {
            for line_y in 0..=rows {
                let mut piece = FramePiece::empty();
                if line_y > 0 && vertical_segment(line_x, line_y - 1) {
                    piece |= FramePiece::TOP;
                }
                if line_y < rows && vertical_segment(line_x, line_y) {
                    piece |= FramePiece::BOTTOM;
                }
                if line_x > 0 && horizontal_segment(line_y, line_x - 1) {
                    piece |= FramePiece::LEFT;
                }
                if line_x < columns && horizontal_segment(line_y, line_x) {
                    piece |= FramePiece::RIGHT;
                }
                if !piece.is_empty() {
                    put(piece, xs[line_x], ys[line_y]);
                }
            }
        }
    }

    pub(crate) fn draw(&self, tree: &Tree, id: ControlId, ctx: &mut DrawingContext) {
        ctx.clear(RectOptions {
            foreground: tree.foreground(id),
            background: tree.background(id),
            ..RectOptions::default()
        });
        if let Some(style) = self.borders {
            self.draw_separators(tree, id, ctx, style);
        }
    }

    /// Content-based extent along one axis: Fixed and Auto sizes plus
    /// separator overhead. Grow tracks contribute nothing.
    fn content_extent(&self, tree: &Tree, id: ControlId, axis: Axis) -> i32 {
        let sizes = self.resolve(tree, id, axis, 0);
        let separator = i32::from(self.borders.is_some());
        let overhead = separator * (self.tracks(axis).len() as i32 + 1);
        sizes
            .iter()
            .fold(0i32, |sum, &s| sum.saturating_add(s))
            .saturating_add(overhead)
    }
}

impl Behavior for Grid {
    fn slot_kind(&self) -> SlotKind {
        SlotKind::Children
    }

    fn measure_bounding_box(&self, tree: &Tree, id: ControlId, child: ControlId) -> Rect {
        self.child_rect(tree, id, child)
    }

    fn max_width(&self, tree: &Tree, id: ControlId) -> i32 {
        self.content_extent(tree, id, Axis::Columns)
    }

    fn max_height(&self, tree: &Tree, id: ControlId) -> i32 {
        self.content_extent(tree, id, Axis::Rows)
    }

    fn render(&self, tree: &Tree, id: ControlId, ctx: &mut DrawingContext) {
        self.draw(tree, id, ctx);
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
    use crate::backend::TestBackend;

    struct Leaf;

    impl Behavior for Leaf {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn sized_grid(tree: &mut Tree, grid: Grid, width: i32, height: i32) -> ControlId {
        let id = tree.add(grid);
        tree.set_width(id, SizePolicy::Fixed(width));
        tree.set_height(id, SizePolicy::Fixed(height));
        id
    }

    #[test]
    fn test_grow_tracks_split_by_weight() {
        let mut tree = Tree::new();
        let grid = Grid::new(
            vec![GridSize::Grow(1)],
            vec![GridSize::Fixed(10), GridSize::Grow(1), GridSize::Grow(2)],
        );
        let id = sized_grid(&mut tree, grid, 40, 10);
        let widths = tree
            .behavior::<Grid>(id)
            .resolve(&tree, id, Axis::Columns, 40);
        assert_eq!(widths, vec![10, 10, 20]);
    }

    #[test]
    fn test_first_grow_track_absorbs_remainder() {
        let mut tree = Tree::new();
        let grid = Grid::new(vec![], vec![GridSize::Grow(1), GridSize::Grow(1), GridSize::Grow(1)]);
        let id = sized_grid(&mut tree, grid, 10, 5);
        let widths = tree
            .behavior::<Grid>(id)
            .resolve(&tree, id, Axis::Columns, 10);
        assert_eq!(widths, vec![4, 3, 3]);
        assert_eq!(widths.iter().sum::<i32>(), 10);
    }

    #[test]
    fn test_line_positions_accumulate_tracks_and_separators() {
        let plain = Grid::new(vec![], vec![]);
        assert_eq!(plain.line_positions(&[4, 3]), vec![0, 4, 7]);
        let bordered = Grid::new(vec![], vec![]).with_borders(FrameStyle::Single);
        assert_eq!(bordered.line_positions(&[4, 3]), vec![0, 5, 9]);
    }

    #[test]
    fn test_auto_track_takes_largest_child() {
        let mut tree = Tree::new();
        let grid = Grid::new(vec![GridSize::Grow(1)], vec![GridSize::Auto, GridSize::Grow(1)]);
        let id = sized_grid(&mut tree, grid, 30, 5);
        let a = tree.add(Leaf);
        let b = tree.add(Leaf);
        tree.set_width(a, SizePolicy::Fixed(7));
        tree.set_width(b, SizePolicy::Fixed(4));
        tree.add_child(id, a).unwrap();
        tree.add_child(id, b).unwrap();
        tree.update::<Grid, _>(id, |g| {
            g.place(a, GridPlacement::at(0, 0));
            g.place(b, GridPlacement::at(0, 0));
        });
        let widths = tree
            .behavior::<Grid>(id)
            .resolve(&tree, id, Axis::Columns, 30);
        assert_eq!(widths, vec![7, 23]);
    }

    #[test]
    fn test_empty_auto_track_is_zero() {
        let mut tree = Tree::new();
        let grid = Grid::new(vec![], vec![GridSize::Auto, GridSize::Grow(1)]);
        let id = sized_grid(&mut tree, grid, 12, 3);
        let widths = tree
            .behavior::<Grid>(id)
            .resolve(&tree, id, Axis::Columns, 12);
        assert_eq!(widths, vec![0, 12]);
    }

    #[test]
    fn test_auto_track_with_only_flexible_children_fills() {
        let mut tree = Tree::new();
        let grid = Grid::new(vec![], vec![GridSize::Auto, GridSize::Fixed(4)]);
        let id = sized_grid(&mut tree, grid, 12, 3);
        let child = tree.add(Leaf);
        tree.add_child(id, child).unwrap();
        let widths = tree
            .behavior::<Grid>(id)
            .resolve(&tree, id, Axis::Columns, 12);
        assert_eq!(widths, vec![8, 4]);
    }

    #[test]
    fn test_child_rect_spans_tracks() {
        let mut tree = Tree::new();
        let grid = Grid::new(
            vec![GridSize::Grow(1), GridSize::Grow(1)],
            vec![GridSize::Fixed(5), GridSize::Fixed(7)],
        );
        let id = sized_grid(&mut tree, grid, 12, 8);
        let child = tree.add(Leaf);
        tree.add_child(id, child).unwrap();
        tree.update::<Grid, _>(id, |g| {
            g.place(child, GridPlacement::at(0, 0).spanning(1, 2));
        });
        let rect = tree.behavior::<Grid>(id).child_rect(&tree, id, child);
        assert_eq!(rect, Rect::new(0, 0, 12, 4));
    }

    #[test]
    fn test_bordered_cells_are_inset() {
        let mut tree = Tree::new();
        let grid = Grid::new(
            vec![GridSize::Grow(1)],
            vec![GridSize::Grow(1), GridSize::Grow(1)],
        )
        .with_borders(FrameStyle::Single);
        // 11 wide: 3 lines + two 4-wide tracks.
        let id = sized_grid(&mut tree, grid, 11, 5);
        let child = tree.add(Leaf);
        tree.add_child(id, child).unwrap();
        tree.update::<Grid, _>(id, |g| g.place(child, GridPlacement::at(0, 1)));
        let rect = tree.behavior::<Grid>(id).child_rect(&tree, id, child);
        assert_eq!(rect, Rect::new(6, 1, 4, 3));
    }

    #[test]
    fn test_separators_draw_cross_junction() {
        let mut tree = Tree::new();
        let grid = Grid::new(
            vec![GridSize::Grow(1), GridSize::Grow(1)],
            vec![GridSize::Grow(1), GridSize::Grow(1)],
        )
        .with_borders(FrameStyle::Single);
        let id = sized_grid(&mut tree, grid, 7, 5);
        let mut backend = TestBackend::new(7, 5);
        let mut ctx = DrawingContext::root(&mut backend);
        tree.behavior::<Grid>(id).draw(&tree, id, &mut ctx);
        drop(ctx);
        assert_eq!(backend.buffer().row_text(0), "┌──┬──┐");
        assert_eq!(backend.buffer().row_text(2), "├──┼──┤");
        assert_eq!(backend.buffer().row_text(4), "└──┴──┘");
    }

    #[test]
    fn test_spanning_child_suppresses_interior_separator() {
        let mut tree = Tree::new();
        let grid = Grid::new(
            vec![GridSize::Grow(1), GridSize::Grow(1)],
            vec![GridSize::Grow(1), GridSize::Grow(1)],
        )
        .with_borders(FrameStyle::Single);
        let id = sized_grid(&mut tree, grid, 7, 5);
        let wide = tree.add(Leaf);
        let a = tree.add(Leaf);
        let b = tree.add(Leaf);
        for c in [wide, a, b] {
            tree.add_child(id, c).unwrap();
        }
        tree.update::<Grid, _>(id, |g| {
            g.place(wide, GridPlacement::at(0, 0).spanning(1, 2));
            g.place(a, GridPlacement::at(1, 0));
            g.place(b, GridPlacement::at(1, 1));
        });
        let mut backend = TestBackend::new(7, 5);
        let mut ctx = DrawingContext::root(&mut backend);
        tree.behavior::<Grid>(id).draw(&tree, id, &mut ctx);
        drop(ctx);
        // Top row has no tee: the span covers both cells of row 0.
        assert_eq!(backend.buffer().row_text(0), "┌─────┐");
        assert_eq!(backend.buffer().row_text(1), "│     │");
        // The middle line regains the junction where row 1 is split.
        assert_eq!(backend.buffer().row_text(2), "├──┬──┤");
        assert_eq!(backend.buffer().row_text(4), "└──┴──┘");
    }
}
