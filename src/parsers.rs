use nom::{
    character::complete::{char, digit1, satisfy},
    combinator::{all_consuming, map, map_res},
    sequence::{pair, separated_pair},
    IResult,
};

use crate::{geometry::PixelPoint, layout::CellRef};

/// Cell label: one row letter directly followed by the column number, as in
/// `B7`. Lowercase rows are folded to their canonical uppercase form; range
/// checking is the layout's job, not the parser's.
pub fn cell_label(i: &str) -> IResult<&str, CellRef> {
    map(
        pair(satisfy(|c| c.is_ascii_alphabetic()), number),
        |(row, col)| CellRef {
            row: row.to_ascii_uppercase(),
            col,
        },
    )(i)
}

/// Pixel point written `x,y`, both plain non-negative integers.
pub fn point(i: &str) -> IResult<&str, PixelPoint> {
    map(separated_pair(pixel, char(','), pixel), |(x, y)| {
        PixelPoint::new(x, y)
    })(i)
}

fn number(i: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(i)
}

fn pixel(i: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse)(i)
}

/// Parses a whole argument as a cell label, rejecting trailing input.
pub fn parse_cell_label(s: &str) -> Option<CellRef> {
    all_consuming(cell_label)(s).ok().map(|(_, cell)| cell)
}

/// Parses a whole argument as a pixel point, rejecting trailing input.
pub fn parse_point(s: &str) -> Option<PixelPoint> {
    all_consuming(point)(s).ok().map(|(_, p)| p)
}
