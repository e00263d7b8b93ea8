//! breadth first flow analysis from the source
use std::collections::{BTreeMap, VecDeque};

use fxhash::FxHashSet;
use tracing::instrument;

use crate::types::{NeighborDeterminableBoard, Position, SizeDeterminableBoard, SolvedDeterminableBoard};

use super::Board;

impl Board {
    /// Every cell the source feeds, bucketed by its hop count from the source.
    ///
    /// Bucket 0 holds only the source. A neighbor joins the next bucket when both
    /// sides open towards each other; a one sided opening carries no flow. Buckets
    /// are replayed in ascending order to animate the fill. Empty when there is no
    /// source.
    #[instrument(level = "trace", skip_all)]
    pub fn connected_with_distances(&self) -> BTreeMap<usize, Vec<Position>> {
        let mut buckets = BTreeMap::new();
        let source = match self.source {
            Some(source) if self.dimensions.contains(&source) => source,
            _ => return buckets,
        };

        let mut visited = FxHashSet::default();
        visited.insert(source);
        let mut frontier = vec![source];
        let mut distance = 0;
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for pos in frontier.iter() {
                for (_, neighbor) in self.connected_neighbors(pos) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            buckets.insert(distance, frontier);
            frontier = next;
            distance += 1;
        }
        buckets
    }

    /// every cell the source feeds
    pub fn connected_set(&self) -> FxHashSet<Position> {
        self.connected_with_distances()
            .into_iter()
            .flat_map(|(_, positions)| positions)
            .collect()
    }

    /// every pipe (walls excluded) the source does not feed
    #[instrument(level = "trace", skip_all)]
    pub fn unconnected_set(&self) -> FxHashSet<Position> {
        let reachable = self.reachable_from_source();
        self.positions()
            .into_iter()
            .filter(|pos| !self.cell(pos).is_wall() && !reachable.contains(pos))
            .collect()
    }

    fn reachable_from_source(&self) -> FxHashSet<Position> {
        let mut visited = FxHashSet::default();
        let source = match self.source {
            Some(source) if self.dimensions.contains(&source) => source,
            _ => return visited,
        };
        let mut queue = VecDeque::new();
        queue.push_back(source);
        visited.insert(source);
        while let Some(pos) = queue.pop_front() {
            for (_, neighbor) in self.connected_neighbors(&pos) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        visited
    }

    /// true when no opening of `pos` points at a neighbor that does not open back
    pub fn openings_matched_at(&self, pos: &Position) -> bool {
        let pipe = self.cell(pos);
        pipe.openings().iter().all(|dir| {
            self.neighbor(pos, dir)
                .map_or(false, |n| self.cell(&n).openings().contains(dir.opposite()))
        })
    }

    /// Every opening on the board is matched by its neighbor, independent of the
    /// source. Walls have no openings and are always matched.
    pub fn all_openings_connected(&self) -> bool {
        self.positions()
            .iter()
            .all(|pos| self.openings_matched_at(pos))
    }

    /// a source exists, no opening dangles and the source feeds every pipe
    pub fn is_fully_solved(&self) -> bool {
        self.source.is_some() && self.all_openings_connected() && self.unconnected_set().is_empty()
    }
}

impl SolvedDeterminableBoard for Board {
    fn is_solved(&self) -> bool {
        self.is_fully_solved()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::board_fixture;
    use crate::compact_representation::pipe::PipeType;

    fn p(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_closed_loop_is_solved() {
        let board = Board::from_glyphs("┏┓\n┗┛", Some(p(0, 0)), false).unwrap();
        let connected = board.connected_set();
        assert_eq!(connected.len(), 4);
        assert!(board.unconnected_set().is_empty());
        assert!(board.all_openings_connected());
        assert!(board.is_fully_solved());
        assert!(board.is_solved());
    }

    #[test]
    fn test_distance_buckets_follow_hops() {
        let board = Board::from_glyphs("┏┓\n┗┛", Some(p(0, 0)), false).unwrap();
        let buckets = board.connected_with_distances();
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[&0], vec![p(0, 0)]);
        assert_eq!(buckets[&1].iter().sorted().collect_vec(), vec![&p(0, 1), &p(1, 0)]);
        assert_eq!(buckets[&2], vec![p(1, 1)]);
    }

    #[test]
    fn test_dangling_corner_is_unreachable() {
        let board = Board::from_glyphs("┏╸\n╹╺", Some(p(0, 0)), false).unwrap();
        let connected = board.connected_set();
        assert_eq!(
            connected.iter().sorted().collect_vec(),
            vec![&p(0, 0), &p(0, 1), &p(1, 0)]
        );
        assert_eq!(board.unconnected_set().into_iter().collect_vec(), vec![p(1, 1)]);
        assert!(!board.all_openings_connected());
        assert!(!board.is_fully_solved());
    }

    #[test]
    fn test_overflow_connects_across_edges() {
        let board = Board::from_glyphs("┗━┛\n╳╳╳\n┏━┓", Some(p(0, 0)), true).unwrap();
        let connected = board.connected_set();
        assert_eq!(connected.len(), 6);
        for x in 0..3 {
            assert!(connected.contains(&p(x, 0)));
            assert!(connected.contains(&p(x, 2)));
            assert!(!connected.contains(&p(x, 1)));
        }
        assert!(board.unconnected_set().is_empty());
        assert!(board.is_fully_solved());
    }

    #[test]
    fn test_without_overflow_the_edges_dangle() {
        let board = Board::from_glyphs("┗━┛\n╳╳╳\n┏━┓", Some(p(0, 0)), false).unwrap();
        assert_eq!(board.connected_set().len(), 3);
        assert_eq!(board.unconnected_set().len(), 3);
        assert!(!board.all_openings_connected());
        assert!(!board.is_fully_solved());
    }

    #[test]
    fn test_no_source_means_nothing_connected() {
        let board = Board::from_glyphs("┏┓\n┗┛", None, false).unwrap();
        assert!(board.connected_with_distances().is_empty());
        assert!(board.connected_set().is_empty());
        assert_eq!(board.unconnected_set().len(), 4);
        assert!(board.all_openings_connected());
        assert!(!board.is_fully_solved());
    }

    #[test]
    fn test_closed_but_split_board_is_not_solved() {
        // two closed loops, the source only feeds the left one
        let board = Board::from_glyphs("┏┓┏┓\n┗┛┗┛", Some(p(0, 0)), false).unwrap();
        assert!(board.all_openings_connected());
        assert_eq!(board.unconnected_set().len(), 4);
        assert!(!board.is_fully_solved());
    }

    #[test]
    fn test_stale_source_on_wall() {
        let mut board = Board::from_glyphs("┏┓\n┗┛", Some(p(0, 0)), false).unwrap();
        board.replace(&p(0, 0), PipeType::Wall).unwrap();
        let buckets = board.connected_with_distances();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&0], vec![p(0, 0)]);
        assert!(!board.is_fully_solved());
    }

    #[test]
    fn test_fixture_board_is_solved() {
        let board = board_fixture(include_str!("../../../fixtures/solved_4x3.json"));
        assert!(board.is_fully_solved());
        let total: usize = board.connected_with_distances().values().map(|b| b.len()).sum();
        assert_eq!(total, 4 * 3 - board.wall_count());
    }

    #[test]
    fn test_solved_implies_nothing_unconnected() {
        let fixture = board_fixture(include_str!("../../../fixtures/solved_4x3.json"));
        for pos in fixture.positions() {
            for clockwise in [true, false].iter() {
                let mut board = fixture.clone();
                board.rotate(&pos, *clockwise).unwrap();
                if board.is_fully_solved() {
                    assert!(board.unconnected_set().is_empty());
                    assert!(board.source().is_some());
                }
            }
        }
    }
}
