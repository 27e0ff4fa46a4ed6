//! A* pathfinding over a [`Grid`]'s cell topology.
//!
//! Every search allocates its own node array, so a [`PathFinder`] can be
//! reused for any number of sequential searches over any grid.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::grid::{Cell, Direction, Grid};
use crate::math::Vec2;

const ORTHOGONAL_STEP: f32 = 10.0;
const DIAGONAL_STEP: f32 = 14.0;
const ORTHOGONAL_ONLY_DIAGONAL_STEP: f32 = 20.0;

/// How the step cost between a node and its parent is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepCostMode {
    /// Orthogonal steps cost 10, diagonal steps 14 (20 when diagonals are
    /// disabled), each scaled by the entered cell's cost.
    #[default]
    Geometric,
    /// Every step costs 10 times the entered cell's cost, diagonal or not.
    Legacy,
}

/// Search state of a single node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeStatus {
    NotEvaluated,
    Open,
    Closed,
}

/// Per-cell bookkeeping for one search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub parent: Option<usize>,
    pub cost: f32,
    pub g: f32,
    pub h: f32,
    pub f: f32,
    pub status: NodeStatus,
}

impl Node {
    fn new(cost: f32) -> Self {
        Self {
            parent: None,
            cost,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            status: NodeStatus::NotEvaluated,
        }
    }
}

/// Result of a search, including the final node states.
#[derive(Clone, Debug, Default)]
pub struct Search {
    /// Cell indices from start to goal inclusive; empty if unreachable.
    pub path: Vec<usize>,
    pub nodes: Vec<Node>,
    /// Number of nodes that were closed.
    pub expanded: usize,
}

impl Search {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Accumulated G score at the end of the path, if one was found.
    pub fn path_cost(&self) -> Option<f32> {
        self.path.last().map(|&goal| self.nodes[goal].g)
    }
}

/// Open-set entry ordered so the binary heap pops the lowest F first and,
/// among equal F, the lowest cell index.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f: f32,
    index: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* pathfinder.
#[derive(Clone, Debug, Default)]
pub struct PathFinder {
    config: SearchConfig,
}

impl PathFinder {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find a path between two cell indices.
    ///
    /// `costs` holds a traversal cost per cell (missing entries count as 1);
    /// cells whose cost is not strictly positive are impassable. Returns the
    /// indices from `start` to `goal` inclusive, or an empty vector when the
    /// goal is unreachable or either index is out of range.
    pub fn find_path(
        &self,
        grid: &Grid,
        start: usize,
        goal: usize,
        costs: Option<&[f32]>,
    ) -> Vec<usize> {
        self.search(grid, start, goal, costs).path
    }

    /// Find a path between the cells containing two pixel positions.
    pub fn find_cell_path(
        &self,
        grid: &Grid,
        from: Vec2,
        to: Vec2,
        costs: Option<&[f32]>,
    ) -> Vec<Cell> {
        let (Some(start), Some(goal)) = (grid.cell_at(from), grid.cell_at(to)) else {
            return Vec::new();
        };
        self.find_path(grid, start.index, goal.index, costs)
            .into_iter()
            .filter_map(|index| grid.cell_by_index(index))
            .collect()
    }

    /// Run a full search and keep the node array for inspection.
    pub fn search(&self, grid: &Grid, start: usize, goal: usize, costs: Option<&[f32]>) -> Search {
        let size = grid.len();
        if start >= size || goal >= size {
            log::debug!(
                "path search skipped: start {} or goal {} outside grid of {} cells",
                start,
                goal,
                size
            );
            return Search::default();
        }

        if let Some(costs) = costs {
            if costs.len() < size {
                log::warn!(
                    "cost array has {} entries for {} cells; missing cells cost 1",
                    costs.len(),
                    size
                );
            }
        }
        let mut nodes: Vec<Node> = (0..size)
            .map(|i| Node::new(costs.and_then(|c| c.get(i).copied()).unwrap_or(1.0)))
            .collect();

        let directions: &[Direction] = if self.config.allow_diagonal {
            &Direction::ALL
        } else {
            &Direction::ORTHOGONAL
        };

        let mut open_set = BinaryHeap::new();
        nodes[start].status = NodeStatus::Open;
        let (g, h, f) = self.scores(grid, &nodes, start, None, goal);
        nodes[start].g = g;
        nodes[start].h = h;
        nodes[start].f = f;
        open_set.push(OpenEntry { f, index: start });

        let mut expanded = 0;
        let mut reached = false;

        while let Some(OpenEntry { f, index: current }) = open_set.pop() {
            let node = &nodes[current];
            // Stale entry left behind by a cheaper re-parenting.
            if node.status != NodeStatus::Open || node.f.to_bits() != f.to_bits() {
                continue;
            }

            nodes[current].status = NodeStatus::Closed;
            expanded += 1;
            if current == goal {
                reached = true;
                break;
            }

            for &direction in directions {
                let Some(neighbor) = grid.neighbor_index(current, direction) else {
                    continue;
                };
                let candidate = nodes[neighbor];
                if !(candidate.cost > 0.0) || candidate.status == NodeStatus::Closed {
                    continue;
                }

                let (g, h, f) = self.scores(grid, &nodes, neighbor, Some(current), goal);
                let node = &mut nodes[neighbor];
                match node.status {
                    NodeStatus::Open if g >= node.g => continue,
                    _ => {
                        node.status = NodeStatus::Open;
                        node.parent = Some(current);
                        node.g = g;
                        node.h = h;
                        node.f = f;
                        open_set.push(OpenEntry { f, index: neighbor });
                    }
                }
            }
        }

        let path = if reached {
            reconstruct(&nodes, start, goal)
        } else {
            Vec::new()
        };
        log::debug!(
            "path search {} -> {}: {} ({} nodes expanded)",
            start,
            goal,
            if reached { "found" } else { "unreachable" },
            expanded
        );

        Search {
            path,
            nodes,
            expanded,
        }
    }

    /// G, H and F scores of `index` as if it were entered from `parent`.
    fn scores(
        &self,
        grid: &Grid,
        nodes: &[Node],
        index: usize,
        parent: Option<usize>,
        goal: usize,
    ) -> (f32, f32, f32) {
        let columns = grid.columns();
        let (row, column) = (index / columns, index % columns);

        let g = match parent {
            None => 0.0,
            Some(parent) => {
                let same_line = match self.config.step_costs {
                    StepCostMode::Geometric => {
                        parent / columns == row || parent % columns == column
                    }
                    StepCostMode::Legacy => true,
                };
                let step = if same_line {
                    ORTHOGONAL_STEP
                } else if self.config.allow_diagonal {
                    DIAGONAL_STEP
                } else {
                    ORTHOGONAL_ONLY_DIAGONAL_STEP
                };
                nodes[parent].g + step * nodes[index].cost
            }
        };

        let row_distance = row.abs_diff(goal / columns) as f32;
        let column_distance = column.abs_diff(goal % columns) as f32;
        let h = 4.0 * row_distance.min(column_distance) + 10.0 * row_distance.max(column_distance);

        (g, h, g + h)
    }
}

fn reconstruct(nodes: &[Node], start: usize, goal: usize) -> Vec<usize> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match nodes[current].parent {
            Some(parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Find a path with the default step costs.
///
/// See [`PathFinder::find_path`].
pub fn find_path(
    grid: &Grid,
    start: usize,
    goal: usize,
    costs: Option<&[f32]>,
    allow_diagonal: bool,
) -> Vec<usize> {
    PathFinder::new(SearchConfig::default().with_diagonal(allow_diagonal))
        .find_path(grid, start, goal, costs)
}

/// Find a path between the cells under two pixel positions.
///
/// Returns an empty vector when either point lies outside the grid.
pub fn find_path_between_points(
    grid: &Grid,
    from: Vec2,
    to: Vec2,
    costs: Option<&[f32]>,
    allow_diagonal: bool,
) -> Vec<Cell> {
    PathFinder::new(SearchConfig::default().with_diagonal(allow_diagonal))
        .find_cell_path(grid, from, to, costs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(columns: usize, rows: usize) -> Grid {
        Grid::new(columns, rows, 32.0, 32.0).unwrap()
    }

    #[test]
    fn start_equals_goal() {
        let grid = grid(4, 4);
        assert_eq!(find_path(&grid, 5, 5, None, false), vec![5]);
        assert_eq!(find_path(&grid, 5, 5, None, true), vec![5]);
    }

    #[test]
    fn out_of_range_yields_nothing() {
        let grid = grid(4, 4);
        assert!(find_path(&grid, 16, 0, None, false).is_empty());
        assert!(find_path(&grid, 0, 99, None, true).is_empty());
    }

    #[test]
    fn straight_corridor() {
        let grid = grid(5, 5);
        assert_eq!(find_path(&grid, 0, 4, None, false), vec![0, 1, 2, 3, 4]);
        assert_eq!(find_path(&grid, 0, 20, None, true), vec![0, 5, 10, 15, 20]);
    }

    #[test]
    fn diagonal_shortcut() {
        let grid = grid(5, 5);
        assert_eq!(find_path(&grid, 0, 24, None, true), vec![0, 6, 12, 18, 24]);
        assert_eq!(find_path(&grid, 0, 24, None, false).len(), 9);
    }

    #[test]
    fn detours_around_a_wall() {
        // Column 2 blocked except for the bottom row.
        let grid = grid(5, 5);
        let mut costs = vec![1.0; 25];
        for row in 0..4 {
            costs[row * 5 + 2] = 0.0;
        }
        let path = find_path(&grid, 0, 4, Some(&costs), false);
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&4));
        assert!(path.contains(&22));
        assert!(path.iter().all(|&i| costs[i] > 0.0));
        assert_eq!(path.len(), 13);
    }

    #[test]
    fn zero_cost_goal_is_unreachable() {
        let grid = grid(4, 4);
        let mut costs = vec![1.0; 16];
        costs[10] = 0.0;
        assert!(find_path(&grid, 0, 10, Some(&costs), true).is_empty());
    }

    #[test]
    fn walled_in_goal_is_unreachable() {
        let grid = grid(5, 5);
        let mut costs = vec![1.0; 25];
        for &wall in &[6, 7, 8, 11, 13, 16, 17, 18] {
            costs[wall] = -1.0;
        }
        let search = PathFinder::new(SearchConfig::default().with_diagonal(true))
            .search(&grid, 0, 12, Some(&costs));
        assert!(!search.found());
        assert_eq!(search.path_cost(), None);
        assert_eq!(search.nodes[12].status, NodeStatus::NotEvaluated);
        assert!(search.nodes.iter().all(|n| n.status != NodeStatus::Open));
        assert_eq!(search.expanded, 16);
    }

    #[test]
    fn nan_costs_block() {
        let grid = grid(3, 1);
        let costs = [1.0, f32::NAN, 1.0];
        assert!(find_path(&grid, 0, 2, Some(&costs), false).is_empty());
    }

    #[test]
    fn short_cost_slice_defaults_to_one() {
        let grid = grid(4, 1);
        let costs = [1.0, 1.0];
        assert_eq!(find_path(&grid, 0, 3, Some(&costs), false), vec![0, 1, 2, 3]);
    }

    #[test]
    fn step_cost_modes() {
        let grid = grid(3, 3);
        let geometric = PathFinder::new(SearchConfig::default().with_diagonal(true))
            .search(&grid, 0, 8, None);
        assert_eq!(geometric.path, vec![0, 4, 8]);
        assert_eq!(geometric.path_cost(), Some(28.0));

        let legacy = PathFinder::new(
            SearchConfig::default()
                .with_diagonal(true)
                .with_step_costs(StepCostMode::Legacy),
        )
        .search(&grid, 0, 8, None);
        assert_eq!(legacy.path, vec![0, 4, 8]);
        assert_eq!(legacy.path_cost(), Some(20.0));
    }

    #[test]
    fn cheaper_cells_are_preferred() {
        // Row 1 is expensive, so the search goes around through row 2.
        let grid = grid(5, 3);
        let costs = [
            1.0, 9.0, 9.0, 9.0, 1.0, //
            1.0, 9.0, 9.0, 9.0, 1.0, //
            1.0, 1.0, 1.0, 1.0, 1.0,
        ];
        let path = find_path(&grid, 0, 4, Some(&costs), false);
        assert_eq!(path, vec![0, 5, 10, 11, 12, 13, 14, 9, 4]);
    }

    #[test]
    fn ties_prefer_lower_indices() {
        // Two equally short routes around a single block; the first one
        // found by index order wins.
        let grid = grid(3, 3);
        let mut costs = vec![1.0; 9];
        costs[4] = 0.0;
        assert_eq!(find_path(&grid, 3, 5, Some(&costs), false), vec![3, 0, 1, 2, 5]);
    }

    #[test]
    fn wraps_across_the_edge() {
        let grid = grid(6, 1).with_wrap(true, false);
        assert_eq!(find_path(&grid, 0, 5, None, false), vec![0, 5]);
    }

    #[test]
    fn pixel_endpoints() {
        let grid = grid(4, 4);
        let cells = find_path_between_points(
            &grid,
            Vec2::new(5.0, 5.0),
            Vec2::new(100.0, 5.0),
            None,
            false,
        );
        let indices: Vec<_> = cells.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(find_path_between_points(&grid, Vec2::new(-1.0, 0.0), Vec2::ZERO, None, true)
            .is_empty());
    }
}
