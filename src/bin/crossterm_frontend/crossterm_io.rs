use chip_8_vm::emulator::display::{Display, SCREEN_HEIGHT, SCREEN_WIDTH};
use chip_8_vm::emulator::input::{EmulatorInput, InputEvent};
use chip_8_vm::emulator::keypad::{Keypad, NUM_KEYS};
use chip_8_vm::emulator::output::EmulatorOutput;

use super::key_manager::KeyManager;

use crossterm::event::KeyCode;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};

/// Terminals only report presses, so a key counts as held this long after its last press.
const KEY_HOLD: Duration = Duration::from_millis(250);

pub struct CrosstermInput<'a> {
    key_manager: &'a KeyManager,
    last_pressed: [Option<Instant>; NUM_KEYS],
}

impl CrosstermInput<'_> {
    pub fn new(key_manager: &KeyManager) -> CrosstermInput {
        CrosstermInput {
            key_manager,
            last_pressed: [None; NUM_KEYS],
        }
    }
}

impl EmulatorInput for CrosstermInput<'_> {
    fn poll(&mut self, keypad: &mut Keypad) -> InputEvent {
        let now = Instant::now();
        while let Some(key) = self.key_manager.next_key() {
            if key == KeyCode::Esc {
                return InputEvent::Quit;
            }
            if let Some(hex) = key_to_hex(key) {
                self.last_pressed[hex as usize] = Some(now);
            }
        }

        for (hex, last_pressed) in self.last_pressed.iter().enumerate() {
            let held = last_pressed.map_or(false, |at| now.duration_since(at) < KEY_HOLD);
            keypad.set(hex as u8, held);
        }
        InputEvent::Continue
    }
}

pub struct CrosstermOutput {
    stdout: Stdout,
    cells: [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT],
    tone: bool,
}

impl CrosstermOutput {
    pub fn new() -> io::Result<CrosstermOutput> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All)).map_err(to_io)?;
        terminal::enable_raw_mode().map_err(to_io)?;

        // Each pixel is two characters wide, with a one character border
        let bottom = SCREEN_HEIGHT + 1;
        let right = 2 * SCREEN_WIDTH + 1;
        for y in 0..=bottom {
            for x in 0..=right {
                let c = if y == 0 && x == 0 {
                    '┏'
                } else if y == 0 && x == right {
                    '┓'
                } else if y == bottom && x == 0 {
                    '┗'
                } else if y == bottom && x == right {
                    '┛'
                } else if y == 0 || y == bottom {
                    '━'
                } else if x == 0 || x == right {
                    '┃'
                } else {
                    continue;
                };
                queue!(stdout, cursor::MoveTo(x as u16, y as u16), Print(c)).map_err(to_io)?;
            }
        }
        stdout.flush()?;

        Ok(CrosstermOutput {
            stdout,
            cells: [[false; SCREEN_WIDTH]; SCREEN_HEIGHT],
            tone: false,
        })
    }

    fn draw(&mut self, x: usize, y: usize, state: bool) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(2 * x as u16 + 1, y as u16 + 1),
            Print(if state { "██" } else { "  " })
        )
        .map_err(to_io)
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.stdout, LeaveAlternateScreen, cursor::Show);
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn present(&mut self, display: &Display) -> io::Result<()> {
        for (y, row) in display.rows().enumerate() {
            for (x, &state) in row.iter().enumerate() {
                // Only redraw cells that changed
                if self.cells[y][x] != state {
                    self.cells[y][x] = state;
                    self.draw(x, y, state)?;
                }
            }
        }
        self.stdout.flush()
    }

    fn tone(&mut self, active: bool) -> io::Result<()> {
        // Ring the terminal bell when the tone starts
        if active && !self.tone {
            queue!(self.stdout, Print('\u{7}')).map_err(to_io)?;
            self.stdout.flush()?;
        }
        self.tone = active;
        Ok(())
    }
}

fn to_io<E>(error: E) -> io::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    io::Error::new(io::ErrorKind::Other, error)
}

/// Map the conventional layout onto the hexadecimal keypad.
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// q w e r      4 5 6 D
/// a s d f  ->  7 8 9 E
/// z x c v      A 0 B F
/// ```
pub fn key_to_hex(key: KeyCode) -> Option<u8> {
    let hex = match key {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            '1' => 0x1,
            '2' => 0x2,
            '3' => 0x3,
            '4' => 0xC,
            'q' => 0x4,
            'w' => 0x5,
            'e' => 0x6,
            'r' => 0xD,
            'a' => 0x7,
            's' => 0x8,
            'd' => 0x9,
            'f' => 0xE,
            'z' => 0xA,
            'x' => 0x0,
            'c' => 0xB,
            'v' => 0xF,
            _ => return None,
        },
        _ => return None,
    };
    Some(hex)
}

#[cfg(test)]
mod tests {

    use super::*;
    use test_case::test_case;

    #[test_case('1', 0x1)]
    #[test_case('4', 0xC)]
    #[test_case('q', 0x4)]
    #[test_case('R', 0xD)]
    #[test_case('f', 0xE)]
    #[test_case('x', 0x0)]
    #[test_case('v', 0xF)]
    fn layout_maps_to_hex(c: char, hex: u8) {
        assert_eq!(key_to_hex(KeyCode::Char(c)), Some(hex));
    }

    #[test]
    fn every_hex_key_is_reachable() {
        let mut seen = [false; NUM_KEYS];
        for c in "1234qwerasdfzxcv".chars() {
            seen[key_to_hex(KeyCode::Char(c)).unwrap() as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(key_to_hex(KeyCode::Char('5')), None);
        assert_eq!(key_to_hex(KeyCode::Esc), None);
        assert_eq!(key_to_hex(KeyCode::Enter), None);
    }
}
