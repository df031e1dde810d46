use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// the classic layout: the machine's 4x4 hex pad mapped onto the left
/// of a qwerty keyboard, 1-2-3-C on the top row down to Z-X-C-V
const KEYMAP: [(char, u8); 16] = [
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('4', 0x0c),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('r', 0x0d),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('f', 0x0e),
    ('z', 0x0a),
    ('x', 0x00),
    ('c', 0x0b),
    ('v', 0x0f),
];

/// The input collaborator: the only writer of the machine's key state.
/// Terminals deliver key presses but no releases, so the contract is
/// per-frame: the driver reads the keys buffered since the last flush,
/// marks exactly those down for the frame, then flushes.
pub trait Input {
    /// machine key codes (0x0-0xf) buffered since the last flush,
    /// without consuming them
    fn peek_keys(&mut self) -> Result<&[u8], io::Error>;

    /// drop everything buffered so far
    fn flush_keys(&mut self) -> Result<(), io::Error>;

    /// true once the user has asked to leave the emulator
    fn quit_requested(&self) -> bool;
}

/// reads the keyboard through crossterm's event queue
pub struct StdinInput {
    buffer: Vec<u8>,
    keymap: HashMap<char, u8>,
    quit: bool,
}

impl StdinInput {
    pub fn new() -> Self {
        terminal::enable_raw_mode().unwrap();
        StdinInput {
            buffer: Vec::new(),
            keymap: HashMap::from(KEYMAP),
            quit: false,
        }
    }

    /// drain pending terminal events without blocking; unmapped keys
    /// are dropped on the floor
    fn poll_events(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(event) = read()? {
                match event.code {
                    KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true;
                    }
                    KeyCode::Char(key) => {
                        if let Some(mapped) = self.keymap.get(&key.to_ascii_lowercase()) {
                            self.buffer.push(*mapped);
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

impl Default for StdinInput {
    fn default() -> Self {
        StdinInput::new()
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        terminal::disable_raw_mode().unwrap();
    }
}

impl Input for StdinInput {
    fn peek_keys(&mut self) -> Result<&[u8], io::Error> {
        self.poll_events()?;
        Ok(self.buffer.as_slice())
    }

    fn flush_keys(&mut self) -> Result<(), io::Error> {
        self.poll_events()?;
        self.buffer.clear();
        Ok(())
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// canned keypresses for testing
pub struct DummyInput {
    bytes: Vec<u8>,
}

impl DummyInput {
    pub fn new(keys: &[u8]) -> Self {
        DummyInput {
            bytes: Vec::from(keys),
        }
    }
}

impl Input for DummyInput {
    fn peek_keys(&mut self) -> Result<&[u8], io::Error> {
        Ok(self.bytes.as_slice())
    }

    fn flush_keys(&mut self) -> Result<(), io::Error> {
        self.bytes.clear();
        Ok(())
    }

    fn quit_requested(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_all_sixteen_keys() {
        let mut seen: Vec<u8> = KEYMAP.iter().map(|(_, key)| *key).collect();
        seen.sort_unstable();
        let expected: Vec<u8> = (0x00..=0x0f).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_keymap_has_no_duplicate_chars() {
        let map = HashMap::from(KEYMAP);
        assert_eq!(map.len(), 16);
    }

    #[test]
    fn test_dummy_input_peek_then_flush() -> Result<(), io::Error> {
        let mut input = DummyInput::new(&[0x1, 0xa]);
        assert_eq!(input.peek_keys()?, &[0x1, 0xa]);
        assert_eq!(input.peek_keys()?, &[0x1, 0xa]); // peek does not consume
        input.flush_keys()?;
        assert_eq!(input.peek_keys()?, &[] as &[u8]);
        assert!(!input.quit_requested());
        Ok(())
    }
}
