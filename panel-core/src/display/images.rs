//! Built-in images
//!
//! Both images are rendered at compile time into the controller's page
//! layout: byte `page * WIDTH + x` holds rows `page * 8 ..= page * 8 + 7`
//! of column `x`, least significant bit on top.

use super::{HEIGHT, PAGES, WIDTH};

/// Bytes in one full image
pub const IMAGE_SIZE: usize = WIDTH * PAGES;

pub type Image = [u8; IMAGE_SIZE];

#[derive(Clone, Copy)]
enum Pattern {
    Chip,
    Stripes,
}

/// IC package outline with pins on both long sides
pub static CHIP: Image = render(Pattern::Chip);

/// Diagonal stripes
pub static STRIPES: Image = render(Pattern::Stripes);

/// Image shown on even (`false`) and odd (`true`) draw cycles
pub fn select(odd: bool) -> &'static Image {
    if odd {
        &STRIPES
    } else {
        &CHIP
    }
}

const fn render(pattern: Pattern) -> Image {
    let mut image = [0u8; IMAGE_SIZE];
    let mut page = 0;
    while page < PAGES {
        let mut x = 0;
        while x < WIDTH {
            let mut byte = 0u8;
            let mut bit = 0;
            while bit < 8 {
                if pixel(pattern, x, page * 8 + bit) {
                    byte |= 1 << bit;
                }
                bit += 1;
            }
            image[page * WIDTH + x] = byte;
            x += 1;
        }
        page += 1;
    }
    image
}

const fn pixel(pattern: Pattern, x: usize, y: usize) -> bool {
    match pattern {
        Pattern::Chip => chip_pixel(x, y),
        Pattern::Stripes => (x + y) / 8 % 2 == 0,
    }
}

const fn chip_pixel(x: usize, y: usize) -> bool {
    const LEFT: usize = 24;
    const RIGHT: usize = 103;
    const TOP: usize = 16;
    const BOTTOM: usize = 47;

    let in_body = x >= LEFT && x <= RIGHT && y >= TOP && y <= BOTTOM;
    if in_body {
        let border = x == LEFT || x == RIGHT || y == TOP || y == BOTTOM;
        // Pin-1 marker
        let dot = x >= LEFT + 4 && x <= LEFT + 7 && y >= BOTTOM - 7 && y <= BOTTOM - 4;
        return border || dot;
    }

    // Eight pins per side, 3 columns wide on a 10 column pitch
    let pin_column = x >= LEFT + 4 && x < RIGHT - 2 && (x - (LEFT + 4)) % 10 < 3;
    let above = y >= TOP - 8 && y < TOP;
    let below = y > BOTTOM && y <= BOTTOM + 8 && y < HEIGHT;
    pin_column && (above || below)
}
