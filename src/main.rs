use std::process::exit;

use cli::Action;
use layout::{CellRef, TriangleLayout};
use tiny_skia::Paint;

pub mod check;
pub mod cli;
pub mod geometry;
pub mod layout;
pub mod parsers;
pub mod render;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match cli::parse_args(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("trigrid: {}", err);
            eprintln!();
            eprintln!("{}", cli::usage());
            exit(2);
        }
    };

    let layout = TriangleLayout::new(command.options);
    match command.action {
        Action::Vertices { cell } => {
            reject_invalid(&layout, cell);
            println!("{}", layout.vertices_of(cell));
        }
        Action::Locate { triangle } => match layout.locate(&triangle) {
            Some(cell) => println!("{}", cell),
            None => println!("no cell matches these vertices"),
        },
        Action::Check => {
            let report = layout.self_check();
            print!("{}", report);
            if !report.is_clean() {
                exit(1);
            }
        }
        Action::Render {
            output,
            highlight,
            magnify,
            padding,
        } => {
            if let Some(cell) = highlight {
                reject_invalid(&layout, cell);
            }
            let image = render::print_image(&layout, magnify, padding, |cell| {
                let mut paint = Paint::default();
                paint.anti_alias = true;
                if highlight == Some(cell) {
                    paint.set_color_rgba8(u8::MAX, 106, 0, u8::MAX);
                } else if cell.col % 2 == 1 {
                    paint.set_color_rgba8(u8::MAX, u8::MAX, u8::MAX, u8::MAX);
                } else {
                    paint.set_color_rgba8(222, 222, 222, u8::MAX);
                }
                paint
            });
            if let Err(err) = image.save_png(&output) {
                eprintln!("trigrid: could not write {}: {}", output.display(), err);
                exit(1);
            }
        }
    }
}

/// Cells typed on the command line get checked against the layout bounds
/// before any derivation runs on them.
fn reject_invalid(layout: &TriangleLayout, cell: CellRef) {
    if let Err(err) = layout.validate(cell.row, cell.col) {
        eprintln!("trigrid: {}", err);
        exit(1);
    }
}
