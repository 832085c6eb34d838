use crate::maze::{Maze, Pos};
use std::collections::{HashMap, VecDeque};

/// Shortest route from `start` to `goal` through open passages, both ends
/// included. `None` if either end is off the grid or the goal is unreachable.
pub fn shortest_path(maze: &Maze, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    if !maze.in_bounds(start) || !maze.in_bounds(goal) {
        return None;
    }

    let mut came_from: HashMap<Pos, Option<Pos>> = HashMap::new();
    let mut q = VecDeque::new();
    came_from.insert(start, None);
    q.push_back(start);

    while let Some(pos) = q.pop_front() {
        if pos == goal {
            break;
        }
        for next in maze.open_neighbors(pos) {
            if !came_from.contains_key(&next) {
                came_from.insert(next, Some(pos));
                q.push_back(next);
            }
        }
    }

    if !came_from.contains_key(&goal) {
        return None;
    }

    let mut path = Vec::new();
    let mut cur = Some(goal);
    while let Some(pos) = cur {
        path.push(pos);
        cur = came_from.get(&pos).copied().flatten();
    }
    path.reverse();
    Some(path)
}

/// Hop distance from `start` to every cell, -1 where unreachable.
pub fn bfs_distance(maze: &Maze, start: Pos) -> Vec<Vec<i32>> {
    let mut dist = vec![vec![-1; maze.width()]; maze.height()];
    if !maze.in_bounds(start) {
        return dist;
    }
    let mut q = VecDeque::new();
    dist[start.y][start.x] = 0;
    q.push_back(start);

    while let Some(pos) = q.pop_front() {
        let base = dist[pos.y][pos.x];
        for next in maze.open_neighbors(pos) {
            if dist[next.y][next.x] == -1 {
                dist[next.y][next.x] = base + 1;
                q.push_back(next);
            }
        }
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_runs_start_to_goal_through_open_sides() {
        let maze = Maze::generate_seeded(10, 10, 5).unwrap();
        let start = Pos::new(0, 0);
        let goal = Pos::new(9, 9);
        let path = shortest_path(&maze, start, goal).unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for pair in path.windows(2) {
            assert!(maze.open_neighbors(pair[0]).any(|n| n == pair[1]));
        }
    }

    #[test]
    fn path_length_matches_distance_field() {
        let maze = Maze::generate_seeded(14, 11, 8).unwrap();
        let dist = bfs_distance(&maze, Pos::new(0, 0));
        let path = shortest_path(&maze, Pos::new(0, 0), Pos::new(13, 10)).unwrap();
        assert_eq!(path.len() as i32 - 1, dist[10][13]);
    }

    #[test]
    fn start_equals_goal() {
        let maze = Maze::generate_seeded(4, 4, 1).unwrap();
        let p = Pos::new(2, 3);
        assert_eq!(shortest_path(&maze, p, p), Some(vec![p]));
    }

    #[test]
    fn out_of_bounds_is_not_found() {
        let maze = Maze::generate_seeded(4, 4, 1).unwrap();
        assert_eq!(shortest_path(&maze, Pos::new(0, 0), Pos::new(4, 0)), None);
        assert_eq!(shortest_path(&maze, Pos::new(9, 9), Pos::new(0, 0)), None);
    }

    #[test]
    fn distance_field_covers_every_cell() {
        let mut rng = rand::thread_rng();
        let maze = Maze::generate(6, 3, &mut rng).unwrap();
        let dist = bfs_distance(&maze, Pos::new(0, 0));
        assert_eq!(dist[0][0], 0);
        assert!(dist.iter().flatten().all(|d| *d >= 0));
    }

    #[test]
    fn repeated_calls_agree() {
        let maze = Maze::generate_seeded(20, 20, 77).unwrap();
        let a = shortest_path(&maze, Pos::new(3, 4), Pos::new(17, 2));
        let b = shortest_path(&maze, Pos::new(3, 4), Pos::new(17, 2));
        assert!(a.is_some());
        assert_eq!(a, b);
    }
}
