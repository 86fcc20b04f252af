//! Level layouts
//!
//! A layout is pure input data: per row, a sequence of cell templates that
//! the brick field instantiates at setup. Malformed layouts are a fatal
//! configuration error and are rejected here rather than producing a
//! zero-sized stage.

use std::fmt;

use crate::consts::STAGE_MARGIN_ROWS;
use super::brick::Color;

/// Template for one cell run in a layout row
#[derive(Debug, Clone)]
pub struct CellTemplate {
    pub is_brick: bool,
    pub can_break: bool,
    pub life: u32,
    /// Width in cells
    pub size: u32,
    pub worth: Vec<u32>,
    pub colors: Vec<Color>,
}

impl CellTemplate {
    /// A breakable brick with the given health and bucket tables
    pub fn brick(life: u32, worth: Vec<u32>, colors: Vec<Color>) -> Self {
        Self {
            is_brick: true,
            can_break: true,
            life,
            size: 1,
            worth,
            colors,
        }
    }

    /// An unbreakable brick
    pub fn solid() -> Self {
        Self {
            is_brick: true,
            can_break: false,
            life: 1,
            size: 1,
            worth: vec![0],
            colors: vec!["grey"],
        }
    }

    /// An empty run of cells
    pub fn gap() -> Self {
        Self {
            is_brick: false,
            can_break: false,
            life: 1,
            size: 1,
            worth: vec![0],
            colors: vec!["grey"],
        }
    }

    /// Same template cast to a different width
    pub fn sized(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
}

/// Rejected layout configurations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Layout has no rows at all
    NoRows,
    /// Row produces zero stage width
    EmptyRow(usize),
    /// Brick with zero life
    ZeroLife(usize),
    /// Brick with an empty worth or color table
    EmptyTable(usize),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NoRows => write!(f, "layout has no rows"),
            LayoutError::EmptyRow(r) => write!(f, "row {r} has zero width"),
            LayoutError::ZeroLife(r) => write!(f, "row {r} contains a brick with zero life"),
            LayoutError::EmptyTable(r) => {
                write!(f, "row {r} contains a brick with an empty worth or color table")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// An immutable, validated level description
#[derive(Debug, Clone)]
pub struct Layout {
    rows: Vec<Vec<CellTemplate>>,
}

impl Layout {
    pub fn new(rows: Vec<Vec<CellTemplate>>) -> Result<Self, LayoutError> {
        if rows.is_empty() {
            return Err(LayoutError::NoRows);
        }
        for (r, row) in rows.iter().enumerate() {
            let width: u32 = row.iter().map(|t| t.size).sum();
            if width == 0 {
                return Err(LayoutError::EmptyRow(r));
            }
            for t in row.iter().filter(|t| t.is_brick) {
                if t.life == 0 {
                    return Err(LayoutError::ZeroLife(r));
                }
                if t.worth.is_empty() || t.colors.is_empty() {
                    return Err(LayoutError::EmptyTable(r));
                }
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<CellTemplate>] {
        &self.rows
    }

    /// Stage width in cells: the widest cumulative row
    pub fn width_units(&self) -> u32 {
        self.rows
            .iter()
            .map(|row| row.iter().map(|t| t.size).sum())
            .max()
            .unwrap_or(0)
    }

    /// Stage height in cells: brick rows plus travel space for paddle and
    /// ball
    pub fn height_units(&self) -> u32 {
        self.rows.len() as u32 + STAGE_MARGIN_ROWS
    }
}

/// The shipped level rotation
pub fn standard_levels() -> Vec<Layout> {
    vec![level_one(), level_two()]
}

/// Three plain rows, tougher at the top
fn level_one() -> Layout {
    let t1 = CellTemplate::brick(1, vec![1], vec!["green"]);
    let t2 = CellTemplate::brick(2, vec![3, 1], vec!["green", "yellow"]);
    let t3 = CellTemplate::brick(3, vec![5, 3, 1], vec!["green", "yellow", "red"]);

    Layout::new(vec![
        vec![t3.clone().sized(2), t3.clone().sized(2), t3.clone().sized(2), t3.sized(2)],
        vec![
            t2.clone().sized(1),
            t2.clone().sized(2),
            t2.clone().sized(2),
            t2.clone().sized(2),
            t2.sized(1),
        ],
        vec![t1.clone().sized(2), t1.clone().sized(2), t1.clone().sized(2), t1.sized(2)],
    ])
    .expect("built-in layout is valid")
}

/// Staggered rows mixing gaps, unbreakable anchors and high-value bricks
fn level_two() -> Layout {
    let gap = CellTemplate::gap();
    let solid = CellTemplate::solid();
    let t1 = CellTemplate::brick(1, vec![1], vec!["green"]);
    let t2 = CellTemplate::brick(2, vec![3, 1], vec!["green", "yellow"]);
    let t3 = CellTemplate::brick(3, vec![5, 3, 1], vec!["green", "yellow", "orange"]);
    let t4 = CellTemplate::brick(4, vec![10, 5, 3, 1], vec!["green", "yellow", "orange", "red"]);
    let t5 = CellTemplate::brick(
        5,
        vec![25, 10, 5, 3, 1],
        vec!["green", "yellow", "orange", "red", "purple"],
    );

    Layout::new(vec![
        vec![
            t5.clone().sized(2),
            t5.clone().sized(3),
            t4.clone().sized(2),
            t5.clone().sized(3),
            t5.sized(2),
        ],
        vec![
            t2.clone().sized(1),
            t4.clone().sized(2),
            gap.clone().sized(1),
            t4.clone().sized(2),
            t4.clone().sized(2),
            gap.clone().sized(1),
            t4.clone().sized(2),
            t2.clone().sized(1),
        ],
        vec![
            t3.clone().sized(2),
            gap.clone().sized(1),
            t3.clone().sized(2),
            solid.sized(2),
            t3.clone().sized(2),
            gap.clone().sized(1),
            t3.sized(2),
        ],
        vec![
            t4.clone().sized(1),
            t2.clone().sized(2),
            gap.clone().sized(1),
            t2.clone().sized(2),
            t2.clone().sized(2),
            gap.sized(1),
            t2.clone().sized(2),
            t4.sized(1),
        ],
        vec![
            t1.clone().sized(2),
            t1.clone().sized(3),
            t2.sized(2),
            t1.clone().sized(3),
            t1.sized(2),
        ],
    ])
    .expect("built-in layout is valid")
}
