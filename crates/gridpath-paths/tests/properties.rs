use std::f64::consts::SQRT_2;

use gridpath_core::{Cell, Cost, Grid, step_cost};
use gridpath_paths::{
    DiagonalMoves, EngineStatus, Heuristic, InvalidEndpointError, PathfindingEngine,
    SearchOutcome, chebyshev, octile,
};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const EPS: f64 = 1e-9;

fn random_grid(rng: &mut StdRng, w: i32, h: i32, wall_pct: u32) -> Grid {
    let rows: Vec<Vec<u8>> = (0..h)
        .map(|_| {
            (0..w)
                .map(|_| u8::from(rng.random_range(0..100u32) < wall_pct))
                .collect()
        })
        .collect();
    Grid::from_rows(rows).unwrap()
}

fn random_free(rng: &mut StdRng, grid: &Grid) -> Option<Cell> {
    let free: Vec<Cell> = grid.free_cells().collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

/// Distances by repeated relaxation until nothing changes.
fn reference_distances(grid: &Grid, start: Cell, diagonals: DiagonalMoves) -> Vec<Cost> {
    let mut dist = vec![Cost::INFINITY; grid.len()];
    dist[grid.index(start).unwrap()] = 0.0;
    loop {
        let mut changed = false;
        for (c, _) in grid.cells() {
            let dc = dist[grid.index(c).unwrap()];
            if !dc.is_finite() || grid.is_blocked(c) {
                continue;
            }
            for n in c.neighbors_8() {
                if !grid.is_passable(n) || !diagonals.permits(grid, c, n) {
                    continue;
                }
                let ni = grid.index(n).unwrap();
                let cand = dc + step_cost(c, n);
                if cand + EPS < dist[ni] {
                    dist[ni] = cand;
                    changed = true;
                }
            }
        }
        if !changed {
            return dist;
        }
    }
}

fn check_path_shape(grid: &Grid, cells: &[Cell], diagonals: DiagonalMoves) {
    for w in cells.windows(2) {
        assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a step", w[0], w[1]);
        assert!(grid.is_passable(w[1]));
        assert!(diagonals.permits(grid, w[0], w[1]));
    }
}

fn run_and_compare<H: Heuristic>(engine: &mut PathfindingEngine<'_, H>, start: Cell, goal: Cell) {
    let grid = engine.grid();
    let diagonals = engine.diagonals();
    let reference = reference_distances(grid, start, diagonals);
    let expected = reference[grid.index(goal).unwrap()];

    let outcome = engine.find(start, goal).unwrap();
    let path = engine.trace(start, goal);
    if expected.is_finite() {
        assert_eq!(outcome, SearchOutcome::Found);
        assert_eq!(path.start(), Some(start));
        assert_eq!(path.goal(), Some(goal));
        check_path_shape(grid, path.cells(), diagonals);
        assert!((engine.distance_of(goal) - expected).abs() < EPS);
        assert!((path.cost() - engine.distance_of(goal)).abs() < EPS);
    } else {
        assert_eq!(outcome, SearchOutcome::Exhausted);
        assert!(path.is_empty());
    }
}

#[test]
fn aligned_open_grid_paths_are_straight() {
    let grid = Grid::new(9, 7).unwrap();
    let mut engine = PathfindingEngine::new(&grid);
    let start = Cell::new(3, 4);
    for goal in [
        Cell::new(3, 0),
        Cell::new(3, 8),
        Cell::new(0, 4),
        Cell::new(6, 4),
        Cell::new(3, 5),
    ] {
        engine.find(start, goal).unwrap();
        let path = engine.trace(start, goal);
        let d = (goal.row - start.row).abs().max((goal.col - start.col).abs());
        assert_eq!(path.len(), d as usize + 1);
        assert!((path.cost() - d as Cost).abs() < EPS);
        assert!(path.cells().iter().all(|c| c.row == start.row || c.col == start.col));
    }
}

#[test]
fn open_grid_costs_are_octile() {
    let grid = Grid::new(12, 12).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..40 {
        let s = random_free(&mut rng, &grid).unwrap();
        let t = random_free(&mut rng, &grid).unwrap();
        let mut engine = PathfindingEngine::new(&grid);
        engine.find(s, t).unwrap();
        assert!((engine.trace(s, t).cost() - octile(s, t)).abs() < EPS);
        assert_eq!(engine.trace(s, t).len(), chebyshev(s, t) as usize + 1);
    }
}

#[test]
fn trace_of_same_cell_needs_no_search() {
    let grid: Grid = "#.\n..".parse().unwrap();
    let engine = PathfindingEngine::new(&grid);
    let c = Cell::new(1, 1);
    let path = engine.trace(c, c);
    assert_eq!(path.cells(), &[c]);
    assert_eq!(path.cost(), 0.0);
    assert_eq!(engine.status(), EngineStatus::Idle);
}

#[test]
fn dijkstra_matches_reference_on_random_grids() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..60 {
        let w = rng.random_range(1..14);
        let h = rng.random_range(1..14);
        let grid = random_grid(&mut rng, w, h, 30);
        let (Some(s), Some(t)) = (random_free(&mut rng, &grid), random_free(&mut rng, &grid))
        else {
            continue;
        };
        let diagonals = if round % 2 == 0 {
            DiagonalMoves::Strict
        } else {
            DiagonalMoves::CutCorners
        };
        let mut engine = PathfindingEngine::new(&grid).with_diagonals(diagonals);
        run_and_compare(&mut engine, s, t);
    }
}

#[test]
fn guided_matches_reference_on_random_grids() {
    let mut rng = StdRng::seed_from_u64(42);
    for round in 0..60 {
        let grid = random_grid(&mut rng, 16, 12, 25);
        let (Some(s), Some(t)) = (random_free(&mut rng, &grid), random_free(&mut rng, &grid))
        else {
            continue;
        };
        let diagonals = if round % 3 == 0 {
            DiagonalMoves::CutCorners
        } else {
            DiagonalMoves::Strict
        };
        let mut engine = PathfindingEngine::guided(&grid).with_diagonals(diagonals);
        run_and_compare(&mut engine, s, t);
    }
}

#[test]
fn identical_inputs_give_identical_paths() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        let grid = random_grid(&mut rng, 20, 20, 20);
        let (Some(s), Some(t)) = (random_free(&mut rng, &grid), random_free(&mut rng, &grid))
        else {
            continue;
        };
        let mut a = PathfindingEngine::new(&grid);
        let mut b = PathfindingEngine::new(&grid);
        assert_eq!(a.find(s, t), b.find(s, t));
        assert_eq!(a.trace(s, t), b.trace(s, t));
        assert_eq!(a.expanded(), b.expanded());
        assert_eq!(a.stats(), b.stats());

        // Re-running on the same engine is just as deterministic.
        let first = a.trace(s, t);
        a.find(s, t).unwrap();
        assert_eq!(a.trace(s, t), first);
    }
}

#[test]
fn enclosed_goal_is_unreachable() {
    let grid: Grid = "\
.......
..###..
..#.#..
..###..
......."
        .parse()
        .unwrap();
    let (s, t) = (Cell::new(0, 0), Cell::new(2, 3));
    for cut in [DiagonalMoves::Strict, DiagonalMoves::CutCorners] {
        let mut engine = PathfindingEngine::new(&grid).with_diagonals(cut);
        assert_eq!(engine.find(s, t), Ok(SearchOutcome::Exhausted));
        assert!(engine.trace(s, t).is_empty());
        assert!(engine.try_trace(s, t).is_err());
        assert!(engine.distance_of(t).is_infinite());
    }
}

#[test]
fn cutting_corners_never_costs_more() {
    let grid: Grid = "\
..#..
..#..
...##
##...
..#.."
        .parse()
        .unwrap();
    let (s, t) = (Cell::new(0, 0), Cell::new(4, 4));
    let mut strict = PathfindingEngine::new(&grid);
    let mut loose = PathfindingEngine::new(&grid).with_diagonals(DiagonalMoves::CutCorners);
    assert_eq!(strict.find(s, t), Ok(SearchOutcome::Found));
    assert_eq!(loose.find(s, t), Ok(SearchOutcome::Found));
    assert!(loose.distance_of(t) <= strict.distance_of(t) + EPS);
}

#[test]
fn three_by_three_scenarios() {
    let open = Grid::from_rows([[0u8, 0, 0], [0, 0, 0], [0, 0, 0]]).unwrap();
    let (s, t) = (Cell::new(0, 0), Cell::new(2, 2));
    let mut engine = PathfindingEngine::new(&open);
    engine.find(s, t).unwrap();
    let path = engine.trace(s, t);
    assert_eq!(path.cells(), &[s, Cell::new(1, 1), t]);
    assert!((path.cost() - 2.0 * SQRT_2).abs() < EPS);

    let centre = Grid::from_rows([[0u8, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();
    let mut engine = PathfindingEngine::new(&centre);
    engine.find(s, t).unwrap();
    let path = engine.trace(s, t);
    assert!((path.cost() - 4.0).abs() < EPS);
    assert!((engine.distance_of(t) - 4.0).abs() < EPS);
    assert!(!path.cells().contains(&Cell::new(1, 1)));
}

#[test]
fn blocked_start_is_rejected_before_any_work() {
    let grid = Grid::from_rows([[1u8, 0], [0, 0]]).unwrap();
    let mut engine = PathfindingEngine::new(&grid);
    let err = engine.find(Cell::new(0, 0), Cell::new(1, 1)).unwrap_err();
    assert!(matches!(err, InvalidEndpointError::Blocked { .. }));
    assert_eq!(engine.status(), EngineStatus::Idle);
    assert!(grid.cells().all(|(c, _)| engine.distance_of(c) == Cost::INFINITY));
    assert_eq!(engine.expanded().len(), 0);
}

#[test]
fn shared_grid_concurrent_searches() {
    let mut rng = StdRng::seed_from_u64(3);
    let grid = random_grid(&mut rng, 24, 24, 20);
    let queries: Vec<(Cell, Cell)> = (0..8)
        .filter_map(|_| Some((random_free(&mut rng, &grid)?, random_free(&mut rng, &grid)?)))
        .collect();

    let sequential: Vec<_> = queries
        .iter()
        .map(|&(s, t)| {
            let mut e = PathfindingEngine::guided(&grid);
            e.find(s, t).unwrap();
            e.trace(s, t)
        })
        .collect();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = queries
            .iter()
            .map(|&(s, t)| {
                let grid = &grid;
                scope.spawn(move || {
                    let mut e = PathfindingEngine::guided(grid);
                    e.find(s, t).unwrap();
                    e.trace(s, t)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}
