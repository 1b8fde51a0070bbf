use std::hash::Hash;

use derive_more::Display;
use nonmax::NonMaxU32;
use thiserror::Error;

use crate::space::Action;
use crate::space::Cost;
use crate::space::Heuristic;
use crate::space::Space;
use crate::space::State;

const RANDOM_STATE_MAX_TRIES: usize = 10_000;

pub(crate) type CoordIntrinsic = u32;
pub type Coord = NonMaxU32;

/// A cell position as (row, col), row 0 at the top.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[display("({row},{col})")]
pub struct MazeState {
    pub(crate) row: Coord,
    pub(crate) col: Coord,
}

impl MazeState {
    pub fn new(row: CoordIntrinsic, col: CoordIntrinsic) -> Option<MazeState> {
        Some(MazeState {
            row: Coord::new(row)?,
            col: Coord::new(col)?,
        })
    }

    pub fn new_from_usize(row: usize, col: usize) -> Option<MazeState> {
        let row = (row < CoordIntrinsic::MAX as usize).then_some(row as CoordIntrinsic)?;
        let col = (col < CoordIntrinsic::MAX as usize).then_some(col as CoordIntrinsic)?;
        MazeState::new(row, col)
    }

    #[must_use]
    pub fn row(&self) -> CoordIntrinsic {
        self.row.get()
    }

    #[must_use]
    pub fn col(&self) -> CoordIntrinsic {
        self.col.get()
    }

    pub(crate) fn safe_dimensions(rows: usize, cols: usize) -> bool {
        (rows < CoordIntrinsic::MAX as usize) && (cols < CoordIntrinsic::MAX as usize)
    }
}
impl State for MazeState {}

/// The four orthogonal moves.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum MazeAction {
    #[display("↑")]
    Up, // row--
    #[display("→")]
    Right, // col++
    #[display("↓")]
    Down, // row++
    #[display("←")]
    Left, // col--
}
impl Action for MazeAction {}

/// Neighbour enumeration order. Fixed: result determinism depends on it.
pub const DIRECTIONS: [MazeAction; 4] = [
    MazeAction::Up,
    MazeAction::Right,
    MazeAction::Down,
    MazeAction::Left,
];

pub type MazeCost = CoordIntrinsic;
impl Cost for MazeCost {}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum MazeCell {
    #[display("░")]
    Empty,
    #[display("█")]
    Wall,
}

#[derive(Debug, Error)]
pub enum MazeCellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for MazeCell {
    type Error = MazeCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            ' ' | '.' => Ok(MazeCell::Empty),
            '#' | '█' => Ok(MazeCell::Wall),
            ch => Err(MazeCellParseError::InvalidCharacter(ch)),
        }
    }
}

/// A rectangular grid of empty and wall cells.
#[derive(Clone)]
pub struct MazeSpace {
    pub(crate) map: Vec<Vec<MazeCell>>,
}

impl MazeSpace {
    pub fn new_from_map(map: Vec<Vec<MazeCell>>) -> Self {
        Self { map }
    }

    pub(crate) fn new_empty_with_dimensions(rows: usize, cols: usize) -> Self {
        Self {
            map: vec![vec![MazeCell::Empty; cols]; rows],
        }
    }

    /// (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        if self.map.is_empty() {
            return (0, 0);
        }
        (self.map.len(), self.map[0].len())
    }

    #[inline(always)]
    fn at(&self, state: &MazeState) -> MazeCell {
        debug_assert!(self.valid(state));
        self.map[state.row() as usize][state.col() as usize]
    }
}

impl Space<MazeState, MazeAction, MazeCost> for MazeSpace {
    #[inline(always)]
    fn apply(&self, state: &MazeState, action: &MazeAction) -> Option<MazeState> {
        let row = state.row();
        let col = state.col();

        let (row, col) = match action {
            MazeAction::Up => (row.checked_sub(1)?, col),
            MazeAction::Right => (row, col.checked_add(1)?),
            MazeAction::Down => (row.checked_add(1)?, col),
            MazeAction::Left => (row, col.checked_sub(1)?),
        };

        MazeState::new(row, col)
    }

    #[inline(always)]
    fn valid(&self, state: &MazeState) -> bool {
        let (rows, cols) = self.dimensions();
        (state.row() as usize) < rows && (state.col() as usize) < cols
    }

    /// Gets the walkable neighbours of a position, in [`DIRECTIONS`] order.
    fn neighbours(&self, state: &MazeState) -> Vec<(MazeState, MazeAction)> {
        let mut v = Vec::<(MazeState, MazeAction)>::with_capacity(DIRECTIONS.len());

        for action in DIRECTIONS {
            if let Some(s) = self.apply(state, &action) {
                if self.valid(&s) && self.at(&s) != MazeCell::Wall {
                    v.push((s, action));
                }
            }
        }
        v
    }

    fn size(&self) -> Option<usize> {
        let (rows, cols) = self.dimensions();
        Some(rows * cols)
    }

    fn supports_random_state() -> bool {
        true
    }

    fn random_state<R: rand::Rng>(&self, r: &mut R) -> Option<MazeState> {
        let (rows, cols) = self.dimensions();
        if rows == 0 || cols == 0 {
            return None;
        }
        let (rows, cols) = (rows as CoordIntrinsic, cols as CoordIntrinsic);

        for _tries in 0..RANDOM_STATE_MAX_TRIES {
            let row = r.random::<CoordIntrinsic>() % rows;
            let col = r.random::<CoordIntrinsic>() % cols;
            if self.map[row as usize][col as usize] == MazeCell::Empty {
                return MazeState::new(row, col);
            }
        }

        None
    }
}

impl std::fmt::Display for MazeSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let d = self.dimensions();
        writeln!(f, "Maze({}x{}):", d.0, d.1)?;
        for line in &self.map {
            for cell in line {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for MazeSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Maze{:?}", self.dimensions())
    }
}

/// A space plus one start and one goal.
#[derive(Clone, Debug)]
pub struct MazeProblem {
    space: MazeSpace,
    start: MazeState,
    goal: MazeState,
}

#[derive(Debug, Error)]
pub enum MazeProblemError {
    #[error("State {0} is outside the maze")]
    OutOfBounds(MazeState),
    #[error("State {0} is inside a wall")]
    InsideWall(MazeState),
    #[error("Dimensions {0}x{1} are not representable")]
    BadDimensions(usize, usize),
}

impl MazeProblem {
    /// Builds a problem, rejecting endpoints that are out of bounds or
    /// walled in.
    pub fn new(
        space: MazeSpace,
        start: MazeState,
        goal: MazeState,
    ) -> Result<Self, MazeProblemError> {
        for endpoint in [start, goal] {
            if !space.valid(&endpoint) {
                return Err(MazeProblemError::OutOfBounds(endpoint));
            }
            if space.at(&endpoint) == MazeCell::Wall {
                return Err(MazeProblemError::InsideWall(endpoint));
            }
        }

        Ok(MazeProblem { space, start, goal })
    }

    /// An all-empty `rows`x`cols` grid with the given endpoints.
    pub fn open_grid(
        rows: usize,
        cols: usize,
        start: (CoordIntrinsic, CoordIntrinsic),
        goal: (CoordIntrinsic, CoordIntrinsic),
    ) -> Result<Self, MazeProblemError> {
        if !MazeState::safe_dimensions(rows, cols) {
            return Err(MazeProblemError::BadDimensions(rows, cols));
        }
        let space = MazeSpace::new_empty_with_dimensions(rows, cols);
        let start = MazeState::new(start.0, start.1)
            .ok_or(MazeProblemError::BadDimensions(rows, cols))?;
        let goal =
            MazeState::new(goal.0, goal.1).ok_or(MazeProblemError::BadDimensions(rows, cols))?;

        MazeProblem::new(space, start, goal)
    }

    pub fn space(&self) -> &MazeSpace {
        &self.space
    }

    pub fn start(&self) -> MazeState {
        self.start
    }

    pub fn goal(&self) -> MazeState {
        self.goal
    }

    /// The same maze with freshly drawn distinct endpoints.
    pub fn randomize<R: rand::Rng>(&self, r: &mut R) -> Option<MazeProblem> {
        let start = self.space.random_state(r)?;
        for _tries in 0..RANDOM_STATE_MAX_TRIES {
            if let Some(goal) = self.space.random_state(r) {
                if goal != start {
                    return Some(MazeProblem {
                        space: self.space.clone(),
                        start,
                        goal,
                    });
                }
            }
        }

        None
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq)]
pub enum MazeProblemCell {
    Cell(MazeCell),
    #[display("S")]
    Start,
    #[display("G")]
    Goal,
}

impl std::convert::TryFrom<char> for MazeProblemCell {
    type Error = MazeCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            'S' => Ok(MazeProblemCell::Start),
            'G' => Ok(MazeProblemCell::Goal),
            ch => Ok(MazeProblemCell::Cell(MazeCell::try_from(ch)?)),
        }
    }
}

#[derive(Debug, Error)]
pub enum MazeProblemParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid cell {e} found at ({row},{col})")]
    InvalidCell {
        e: MazeCellParseError,
        row: usize,
        col: usize,
    },
    #[error("Line {row} is wider than the first line")]
    RaggedLine { row: usize },
    #[error("Dimensions {rows}x{cols} are not representable")]
    BadDimensions { rows: usize, cols: usize },
    #[error("No start cell ('S') found")]
    MissingStart,
    #[error("No goal cell ('G') found")]
    MissingGoal,
    #[error("Second start cell found at ({row},{col})")]
    DuplicateStart { row: usize, col: usize },
    #[error("Second goal cell found at ({row},{col})")]
    DuplicateGoal { row: usize, col: usize },
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
}

impl std::convert::TryFrom<&str> for MazeProblem {
    type Error = MazeProblemParseError;

    /// Parses a text maze: '#' walls, ' ' or '.' floor, exactly one 'S' and
    /// one 'G'. The endpoint cells themselves are walkable.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let lines: Vec<&str> = s.lines().collect();

        if lines.is_empty() || lines[0].is_empty() {
            return Err(MazeProblemParseError::EmptyInput);
        }

        let rows = lines.len();
        let cols = lines[0].chars().count();
        if !MazeState::safe_dimensions(rows, cols) {
            return Err(MazeProblemParseError::BadDimensions { rows, cols });
        }
        let mut space = MazeSpace::new_empty_with_dimensions(rows, cols);
        let mut start = None;
        let mut goal = None;

        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                // The first line sets the width; a shorter line is padded
                // with floor, a longer one is malformed.
                if col >= cols {
                    return Err(MazeProblemParseError::RaggedLine { row });
                }
                let cell = MazeProblemCell::try_from(ch)
                    .map_err(|e| MazeProblemParseError::InvalidCell { e, row, col })?;

                space.map[row][col] = match cell {
                    MazeProblemCell::Start => {
                        if start.is_some() {
                            return Err(MazeProblemParseError::DuplicateStart { row, col });
                        }
                        start = MazeState::new_from_usize(row, col);
                        MazeCell::Empty
                    }
                    MazeProblemCell::Goal => {
                        if goal.is_some() {
                            return Err(MazeProblemParseError::DuplicateGoal { row, col });
                        }
                        goal = MazeState::new_from_usize(row, col);
                        MazeCell::Empty
                    }
                    MazeProblemCell::Cell(c) => c,
                };
            }
        }

        let start = start.ok_or(MazeProblemParseError::MissingStart)?;
        let goal = goal.ok_or(MazeProblemParseError::MissingGoal)?;

        Ok(MazeProblem { space, start, goal })
    }
}

impl std::convert::TryFrom<&std::path::Path> for MazeProblem {
    type Error = MazeProblemParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let text = std::fs::read_to_string(p).map_err(|e| MazeProblemParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;

        MazeProblem::try_from(text.as_str())
    }
}

impl std::fmt::Display for MazeProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let d = self.space.dimensions();
        writeln!(f, "MazeProblem({}x{}) (s:{}, g:{}):", d.0, d.1, self.start, self.goal)?;

        for (row, line) in self.space.map.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                match MazeState::new_from_usize(row, col) {
                    Some(s) if s == self.start => write!(f, "S")?,
                    Some(s) if s == self.goal => write!(f, "G")?,
                    _ => write!(f, "{cell}")?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Manhattan distance. Admissible and consistent for orthogonal unit-cost
/// moves, so A* with it stays optimal.
#[derive(Debug)]
pub struct MazeHeuristicManhattan;

impl Heuristic<MazeState, MazeCost> for MazeHeuristicManhattan {
    #[inline(always)]
    fn h(s: &MazeState, goal: &MazeState) -> MazeCost {
        s.row().abs_diff(goal.row()) + s.col().abs_diff(goal.col())
    }
}
