use std::{fmt::Display, ops::RangeInclusive};

use log::debug;
use thiserror::Error;

use crate::geometry::{PixelPoint, Triangle};

/// Rows are labelled with single letters starting here, so a layout can
/// hold at most this many rows.
pub const MAX_ROWS: usize = 26;
pub const FIRST_ROW: char = 'A';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub row_count: usize,
    pub col_count: usize,
    pub scale: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            row_count: 6,
            col_count: 12,
            scale: 10,
        }
    }
}

/// A grid address: row letter plus 1-based column number, written `B7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: char,
    pub col: usize,
}

impl Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row, self.col)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("row '{row}' is not part of the layout (rows run '{FIRST_ROW}' through '{last}')")]
    InvalidRow { row: char, last: char },
    #[error("column {col} is outside the layout (columns run 1 through {max})")]
    InvalidColumn { col: usize, max: usize },
}

/// Pixel geometry of a triangle layout.
///
/// Every column pair shares one unit square of side `scale`; the odd column
/// is the square's lower-left triangle, the even column its upper-right one.
/// The row and column origin tables are built once here and never change, so
/// the cell-to-vertices derivation and its inverse are pure lookups over an
/// immutable shape.
pub struct TriangleLayout {
    scale: u32,
    row_origins: Vec<u32>,
    col_origins: Vec<u32>,
}

fn row_symbol(ordinal: usize) -> char {
    (FIRST_ROW as u8 + ordinal as u8) as char
}

impl TriangleLayout {
    /// Builds the origin tables for the given shape.
    ///
    /// # Panics
    ///
    /// Panics if the scale or either count is zero, if there are more than
    /// [`MAX_ROWS`] rows, or if the layout would not fit in pixel space.
    pub fn new(options: LayoutOptions) -> Self {
        assert!(options.scale > 0, "scale must be positive");
        assert!(
            options.row_count > 0 && options.row_count <= MAX_ROWS,
            "row count must be between 1 and {}",
            MAX_ROWS
        );
        assert!(options.col_count > 0, "column count must be positive");
        let pairs = (options.col_count as u64 + 1) / 2;
        let span = pairs.max(options.row_count as u64);
        assert!(
            span * options.scale as u64 <= u32::MAX as u64,
            "layout exceeds pixel space"
        );

        let row_origins = (0..options.row_count)
            .map(|ordinal| ordinal as u32 * options.scale)
            .collect();

        // Column 1 sits at zero; every odd column after that steps right by
        // one scale, and every even column shares its left neighbour's origin.
        let mut col_origins = Vec::with_capacity(options.col_count);
        for col in 1..=options.col_count {
            if col == 1 {
                col_origins.push(0);
            } else if col % 2 == 0 {
                col_origins.push(col_origins[col - 2]);
            } else {
                col_origins.push(col_origins[col - 2] + options.scale);
            }
        }

        debug!(
            "layout built: {} rows, {} columns, scale {}",
            options.row_count, options.col_count, options.scale
        );
        TriangleLayout {
            scale: options.scale,
            row_origins,
            col_origins,
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn row_count(&self) -> usize {
        self.row_origins.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_origins.len()
    }

    pub fn last_row(&self) -> char {
        row_symbol(self.row_origins.len() - 1)
    }

    /// Row letters in layout order.
    pub fn rows(&self) -> impl Iterator<Item = char> {
        (0..self.row_origins.len()).map(row_symbol)
    }

    /// Column numbers in layout order.
    pub fn cols(&self) -> RangeInclusive<usize> {
        1..=self.col_origins.len()
    }

    /// Width and height of the layout's pixel footprint.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.col_origins[self.col_origins.len() - 1] + self.scale,
            self.row_origins[self.row_origins.len() - 1] + self.scale,
        )
    }

    fn row_ordinal(&self, row: char) -> Option<usize> {
        let ordinal = (row as u32).checked_sub(FIRST_ROW as u32)? as usize;
        (ordinal < self.row_origins.len()).then_some(ordinal)
    }

    /// Checks a parsed (row, column) pair against the layout bounds.
    ///
    /// This is the guard meant to run on user input before [`vertices_of`];
    /// the derivations themselves do not validate.
    ///
    /// [`vertices_of`]: TriangleLayout::vertices_of
    pub fn validate(&self, row: char, col: usize) -> Result<(), LayoutError> {
        if self.row_ordinal(row).is_none() {
            return Err(LayoutError::InvalidRow {
                row,
                last: self.last_row(),
            });
        }
        if col == 0 || col > self.col_origins.len() {
            return Err(LayoutError::InvalidColumn {
                col,
                max: self.col_origins.len(),
            });
        }
        Ok(())
    }

    /// Pixel vertices of a cell's triangle.
    ///
    /// `v1` is always the right-angle corner, `v2` the far end of the
    /// vertical leg, `v3` the far end of the horizontal leg. Odd columns
    /// put the right angle at the square's lower-left corner, even columns
    /// at its upper-right, which is what makes the triple's order recover
    /// the column parity later.
    ///
    /// # Panics
    ///
    /// Panics if `cell` lies outside the layout; run [`validate`] first on
    /// anything user-supplied.
    ///
    /// [`validate`]: TriangleLayout::validate
    pub fn vertices_of(&self, cell: CellRef) -> Triangle {
        let ordinal = self.row_ordinal(cell.row).expect("row outside the layout");
        assert!(
            cell.col >= 1 && cell.col <= self.col_origins.len(),
            "column outside the layout"
        );
        let origin = PixelPoint::new(self.col_origins[cell.col - 1], self.row_origins[ordinal]);
        let s = self.scale;
        if cell.col % 2 == 0 {
            Triangle::new(origin.offset(s, 0), origin.offset(s, s), origin)
        } else {
            Triangle::new(origin.offset(0, s), origin, origin.offset(s, s))
        }
    }

    /// Finds the cell whose triangle is exactly `triangle`.
    ///
    /// The vertex order gives away the orientation (odd columns have
    /// `v1.y > v2.y`) and the reference corner then fixes the candidate row
    /// and column arithmetically. The candidate only stands if its own
    /// vertices reproduce the input field for field, so any triple that is
    /// not some cell's canonical one comes back as `None`.
    pub fn locate(&self, triangle: &Triangle) -> Option<CellRef> {
        let odd = triangle.v1.y > triangle.v2.y;
        // For both orientations this vertex is the cell's origin corner.
        let origin = if odd { triangle.v2 } else { triangle.v3 };

        let pair = (origin.x / self.scale) as usize;
        let col = if odd { 2 * pair + 1 } else { 2 * pair + 2 };
        let ordinal = (origin.y / self.scale) as usize;
        if col > self.col_origins.len() || ordinal >= self.row_origins.len() {
            return None;
        }

        let cell = CellRef {
            row: row_symbol(ordinal),
            col,
        };
        (self.vertices_of(cell) == *triangle).then_some(cell)
    }
}
