/// Search report tool
///
/// Runs the four strategies over maze problems and writes an org-mode
/// comparison report.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use indoc::indoc;

use maze_search::algorithms::Algorithm;
use maze_search::algorithms::solve;
use maze_search::engine::SearchOptions;
use maze_search::maze_2d::MazeHeuristicManhattan;
use maze_search::maze_2d::MazeProblem;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = maze_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, env = "REPORT", default_value = "/tmp/maze-search.org")]
    pub output: PathBuf,

    /// Cap on expansions per run.
    #[arg(short, long)]
    pub max_steps: Option<usize>,

    /// Record and report per-step traces.
    #[arg(short, long)]
    pub trace: bool,

    /// Strategies to run; defaults to all four.
    #[arg(short, long, value_enum)]
    pub algorithms: Vec<Algorithm>,

    /// Text maze files ('#' walls, 'S' start, 'G' goal).
    #[arg()]
    pub problems: Vec<PathBuf>,
}

fn report_problem<W: std::io::Write>(
    out: &mut BufWriter<W>,
    problem: &MazeProblem,
    algorithms: &[Algorithm],
    options: &SearchOptions,
) -> std::io::Result<()> {
    writeln!(out, "#+begin_quote\n{problem}#+end_quote")?;

    for &algorithm in algorithms {
        writeln!(out, "*** {algorithm}")?;

        match solve::<MazeHeuristicManhattan, _, _, _, _>(
            problem.space(),
            problem.start(),
            problem.goal(),
            algorithm,
            options,
        ) {
            Ok(result) => {
                writeln!(out, "#+begin_quote\n{result}\n#+end_quote")?;
                if options.record_trace {
                    writeln!(out, "**** Trace")?;
                    writeln!(out, "#+begin_src ron")?;
                    for record in &result.trace {
                        writeln!(out, "{record:?}")?;
                    }
                    writeln!(out, "#+end_src")?;
                }
            }
            Err(e) => {
                writeln!(out, "FIXME Search failed: {e}")?;
            }
        }
    }

    Ok(())
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    println!("Writing report to {:?}", args.output);

    let options = SearchOptions {
        max_steps: args.max_steps,
        record_trace: args.trace,
    };
    let algorithms = if args.algorithms.is_empty() {
        Algorithm::ALL.to_vec()
    } else {
        args.algorithms.clone()
    };

    let file = File::create(&args.output)?;
    let mut out = BufWriter::new(file);

    writeln!(out, ":PROPERTIES:")?;
    writeln!(out, ":VERSION: {:?}", maze_search::build::PKG_VERSION)?;
    writeln!(out, ":BUILD_IS_DEBUG: {}", shadow_rs::is_debug())?;
    writeln!(out, ":END:")?;
    writeln!(out, "#+title: Maze search comparison")?;
    writeln!(out)?;

    let maze_str = indoc! {"
        #########
        #S...#..#
        ##.#.#.##
        #..#...G#
        #.###.###
        #.......#
        #########
    "};
    writeln!(out, "** Built-in problem")?;
    match MazeProblem::try_from(maze_str) {
        Ok(problem) => report_problem(&mut out, &problem, &algorithms, &options)?,
        Err(e) => writeln!(out, "FIXME Built-in maze failed to parse: {e}")?,
    }

    for p in &args.problems {
        writeln!(out, "** Problem {p:?}")?;
        match MazeProblem::try_from(p.as_path()) {
            Ok(problem) => report_problem(&mut out, &problem, &algorithms, &options)?,
            Err(e) => {
                log::error!("skipping {p:?}: {e}");
                writeln!(out, "FIXME Failed to load: {e}")?;
            }
        }
    }

    out.flush()
}
