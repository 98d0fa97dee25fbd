//! The 64x32 monochrome framebuffer.

use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

type Pixels = [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Pixels = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// A framebuffer where every pixel is either set or clear.
#[derive(Clone, PartialEq, Eq)]
pub struct Display {
    pixels: Pixels,
}

impl Display {

    /// Create a display with every pixel clear.
    pub fn new() -> Display {
        Display { pixels: EMPTY_SCREEN }
    }

    /// Clear every pixel.
    pub fn clear(&mut self) {
        self.pixels = EMPTY_SCREEN;
    }

    /// Whether the pixel at `(x, y)` is set. Coordinates outside the frame are clear.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Iterate over the rows of pixels, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool; SCREEN_WIDTH]> {
        self.pixels.iter()
    }

    /// The number of set pixels.
    pub fn lit_pixels(&self) -> usize {
        self.pixels
            .iter()
            .map(|row| row.iter().filter(|p| **p).count())
            .sum()
    }

    /// XOR a sprite onto the display, with each byte of `sprite` being one 8 pixel row.
    ///
    /// The origin wraps around the frame, but the sprite itself is clipped at
    /// the right and bottom edges. Returns true if any set pixel was cleared.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x_coord = x as usize % SCREEN_WIDTH;
        let y_coord = y as usize % SCREEN_HEIGHT;

        let mut any_collisions = false;
        for (dy, &row) in sprite.iter().enumerate() {
            let py = y_coord + dy;
            if py >= SCREEN_HEIGHT {
                break;
            }
            for dx in 0..8 {
                let px = x_coord + dx;
                if px >= SCREEN_WIDTH {
                    break;
                }
                if row >> (7 - dx) & 1 == 0 {
                    continue;
                }
                let pixel = &mut self.pixels[py][px];
                if *pixel {
                    any_collisions = true;
                }
                *pixel = !*pixel;
            }
        }

        any_collisions
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for c in row.iter() {
                write!(f, "{}", if *c { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Display {{")?;
        fmt::Display::fmt(self, f)?;
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    const SQUARE: [u8; 2] = [0b1100_0000, 0b1100_0000];

    #[test]
    fn new_display_is_clear() {
        assert_eq!(Display::new().lit_pixels(), 0);
        assert_eq!(Display::new(), Display::default());
    }

    #[test]
    fn draw_sets_pixels_msb_first() {
        let mut display = Display::new();
        let collision = display.draw_sprite(3, 4, &[0b1000_0001]);
        assert!(!collision);
        assert!(display.get(3, 4));
        assert!(!display.get(4, 4));
        assert!(display.get(10, 4));
        assert_eq!(display.lit_pixels(), 2);
    }

    #[test]
    fn drawing_twice_restores_and_collides() {
        let mut display = Display::new();
        display.draw_sprite(10, 10, &SQUARE);
        let before = display.clone();
        assert!(!display.draw_sprite(20, 20, &SQUARE));
        assert!(display.draw_sprite(20, 20, &SQUARE));
        assert_eq!(display, before);
    }

    #[test]
    fn partial_overlap_toggles_only_shared_pixels() {
        let mut display = Display::new();
        display.draw_sprite(0, 0, &SQUARE);
        assert!(display.draw_sprite(1, 0, &SQUARE));
        assert!(display.get(0, 0));
        assert!(!display.get(1, 0));
        assert!(display.get(2, 0));
    }

    #[test]
    fn origin_wraps_around_frame() {
        let mut display = Display::new();
        display.draw_sprite(64 + 5, 32 + 6, &[0x80]);
        assert!(display.get(5, 6));
        assert_eq!(display.lit_pixels(), 1);
    }

    #[test]
    fn sprite_clips_at_right_and_bottom_edges() {
        let mut display = Display::new();
        display.draw_sprite(60, 30, &[0xFF, 0xFF, 0xFF, 0xFF]);

        // 4 columns by 2 rows remain inside the frame
        assert_eq!(display.lit_pixels(), 8);
        assert!(display.get(63, 31));
        assert!(!display.get(0, 30));
        assert!(!display.get(60, 0));
    }

    #[test]
    fn out_of_frame_coordinates_read_as_clear() {
        assert!(!Display::new().get(SCREEN_WIDTH, 0));
        assert!(!Display::new().get(0, SCREEN_HEIGHT));
    }

    #[test]
    fn renders_set_pixels_as_hashes() {
        let mut display = Display::new();
        display.draw_sprite(0, 0, &[0b1010_0000]);
        let text = display.to_string();
        let first_line = text.lines().next().unwrap();
        assert_eq!(&first_line[..4], "# # ");
        assert_eq!(text.lines().count(), SCREEN_HEIGHT);
    }
}
