//! Property-based invariants for generated mazes and the path solver.
//!
//! 1. Every pair of cells is connected.
//! 2. Open passages number exactly W*H - 1 (acyclic).
//! 3. Passage flags agree between neighbors.
//! 4. Solver output is a valid, repeatable, shortest walk.
//! 5. Generation is a pure function of the seed.

use proptest::prelude::*;
use shadow_maze::maze::{Dir, Maze, Pos};
use shadow_maze::path::{bfs_distance, shortest_path};

fn dims() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=24, 1usize..=24)
}

proptest! {
    #[test]
    fn every_cell_reachable_from_every_cell(
        (w, h) in (1usize..=8, 1usize..=8),
        seed in any::<u64>(),
    ) {
        let maze = Maze::generate_seeded(w, h, seed).unwrap();
        for a in 0..w * h {
            for b in 0..w * h {
                let from = Pos::new(a % w, a / w);
                let to = Pos::new(b % w, b / w);
                prop_assert!(
                    shortest_path(&maze, from, to).is_some(),
                    "no path {:?} -> {:?} in {}x{} seed {}", from, to, w, h, seed
                );
            }
        }
    }

    #[test]
    fn passages_equal_cells_minus_one((w, h) in dims(), seed in any::<u64>()) {
        let maze = Maze::generate_seeded(w, h, seed).unwrap();
        prop_assert_eq!(maze.passage_count(), w * h - 1);
        let dist = bfs_distance(&maze, Pos::new(0, 0));
        prop_assert!(dist.iter().flatten().all(|d| *d >= 0));
    }

    #[test]
    fn neighbor_flags_are_consistent((w, h) in dims(), seed in any::<u64>()) {
        let maze = Maze::generate_seeded(w, h, seed).unwrap();
        for (pos, _) in maze.cells() {
            for dir in Dir::ALL {
                match maze.neighbor(pos, dir) {
                    Some(next) => prop_assert_eq!(
                        maze.has_wall(pos, dir),
                        maze.has_wall(next, dir.opposite())
                    ),
                    None => prop_assert!(maze.has_wall(pos, dir)),
                }
            }
        }
    }

    #[test]
    fn solver_is_valid_shortest_and_repeatable(
        (w, h) in dims(),
        seed in any::<u64>(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let maze = Maze::generate_seeded(w, h, seed).unwrap();
        let ia = a.index(w * h);
        let ib = b.index(w * h);
        let start = Pos::new(ia % w, ia / w);
        let goal = Pos::new(ib % w, ib / w);

        let path = shortest_path(&maze, start, goal).unwrap();
        prop_assert_eq!(path.first(), Some(&start));
        prop_assert_eq!(path.last(), Some(&goal));
        for pair in path.windows(2) {
            prop_assert!(maze.open_neighbors(pair[0]).any(|n| n == pair[1]));
        }
        let dist = bfs_distance(&maze, start);
        prop_assert_eq!(path.len() as i32 - 1, dist[goal.y][goal.x]);
        prop_assert_eq!(shortest_path(&maze, start, goal), Some(path));
    }

    #[test]
    fn same_seed_same_maze((w, h) in dims(), seed in any::<u64>()) {
        prop_assert_eq!(
            Maze::generate_seeded(w, h, seed).unwrap(),
            Maze::generate_seeded(w, h, seed).unwrap()
        );
    }
}

#[test]
fn path_length_is_seed_determined() {
    let corner = Pos::new(19, 19);
    let len = |seed| {
        let maze = Maze::generate_seeded(20, 20, seed).unwrap();
        shortest_path(&maze, Pos::new(0, 0), corner).unwrap().len()
    };
    assert_eq!(len(2024), len(2024));

    // Different seeds give different mazes, and across a handful of seeds
    // the corner-to-corner route length varies.
    let lengths: Vec<usize> = (0..8).map(len).collect();
    assert!(lengths.iter().any(|l| *l != lengths[0]), "{:?}", lengths);
    assert_ne!(
        Maze::generate_seeded(20, 20, 1).unwrap(),
        Maze::generate_seeded(20, 20, 2).unwrap()
    );
}
