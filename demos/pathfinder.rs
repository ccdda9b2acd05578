//! Terminal pathfinder demo using crossterm.
//!
//! Run: cargo run --bin pathfinder -- --algorithm astar --explored

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use gridpath_core::{Cell, Grid};
use gridpath_demos::{Algorithm, Rgb, Scene, log_filter, parse_cell, sample_grid, solve};
use gridpath_paths::DiagonalMoves;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest paths on an 8-connected occupancy grid")]
struct Args {
    /// Start cell as ROW,COL. Defaults to the map's `S`, then the top-left cell.
    #[arg(long, value_parser = parse_cell)]
    start: Option<Cell>,

    /// Goal cell as ROW,COL. Defaults to the map's `G`, then the bottom-right cell.
    #[arg(long, value_parser = parse_cell)]
    goal: Option<Cell>,

    /// Search to run.
    #[arg(long, value_enum, ignore_case = true, default_value_t = Algorithm::Dijkstra)]
    algorithm: Algorithm,

    /// ASCII map (`.` free, `#` wall, optional `S`/`G`). Defaults to the built-in maze.
    #[arg(long)]
    map: Option<PathBuf>,

    /// Shade every cell the search finalised.
    #[arg(long)]
    explored: bool,

    /// Allow diagonal steps that squeeze past a wall corner.
    #[arg(long)]
    cut_corners: bool,

    /// Log search progress to stderr (overridden by `RUST_LOG`).
    #[arg(short, long)]
    verbose: bool,
}

fn to_ct_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

fn paint(out: &mut impl Write, scene: &Scene) -> io::Result<()> {
    for row in scene.rows() {
        for tile in row {
            queue!(
                out,
                SetForegroundColor(Color::Black),
                SetBackgroundColor(to_ct_color(tile.color())),
                Print(tile.glyph()),
                Print(' ')
            )?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let (grid, marked_start, marked_goal) = match &args.map {
        Some(file) => {
            let text = std::fs::read_to_string(file)?;
            let parsed = Grid::parse_with_endpoints(&text)?;
            (parsed.grid, parsed.start, parsed.goal)
        }
        None => (sample_grid()?, None, None),
    };
    let start = args.start.or(marked_start).unwrap_or(Cell::ZERO);
    let goal = args
        .goal
        .or(marked_goal)
        .unwrap_or(Cell::new(grid.height() - 1, grid.width() - 1));
    let diagonals = if args.cut_corners {
        DiagonalMoves::CutCorners
    } else {
        DiagonalMoves::Strict
    };

    let solution = solve(&grid, start, goal, args.algorithm, diagonals)?;

    let mut scene = Scene::new(&grid, start, goal);
    if args.explored {
        scene = scene.with_explored(&solution.explored);
    }
    scene = scene.with_path(&solution.path);

    let mut stdout = io::stdout();
    paint(&mut stdout, &scene)?;

    match solution.cost {
        Some(cost) => {
            let cells: Vec<String> = solution.path.iter().map(ToString::to_string).collect();
            println!("Path (row, col): {}", cells.join(" "));
            println!(
                "Cost {cost:.3} over {} steps, {} cells explored",
                solution.path.len() - 1,
                solution.stats.expansions
            );
        }
        None => println!(
            "No path from {start} to {goal} ({} cells explored)",
            solution.stats.expansions
        ),
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(args.verbose)),
    )
    .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
