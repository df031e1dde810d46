use crate::error::{Fault, LoadError};

// NB. machine-visible addresses are u16; computed addresses are usize so
// that an out-of-range sum is reported instead of silently wrapping

/// total addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// where program bytes are loaded
pub const PROGRAM_ADDR: u16 = 0x200;

/// bytes available to a loaded program
pub const PROGRAM_SPACE: usize = MEMORY_SIZE - PROGRAM_ADDR as usize;

/// display geometry, row-major, index = y * width + x
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
pub const DISPLAY_PIXELS: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// call depth before a CALL faults
pub const STACK_DEPTH: usize = 16;

/// keys on the hex keypad
pub const KEY_COUNT: usize = 16;

/// each font glyph is 5 bytes, packed from address 0x000 up
pub const GLYPH_BYTES: u16 = 5;

const FONT_SET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// The whole machine: memory, registers, stack, timers, framebuffer and
/// keypad. Construction zeroes everything and bakes the font set into
/// low memory; `reset` restores exactly that state.
///
/// Fields are public because the machine is a state bag: the
/// interpreter mutates it, the driver reads the framebuffer and writes
/// the keypad, and tests poke registers directly. The methods carry the
/// invariants (bounds-checked memory access, timer floor, key masking).
pub struct Machine {
    pub memory: [u8; MEMORY_SIZE],
    /// V0-VF; VF doubles as the carry/borrow/collision flag
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub stack: [u16; STACK_DEPTH],
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    /// one byte per pixel, 0 or 1
    pub framebuffer: [u8; DISPLAY_PIXELS],
    pub keys: [bool; KEY_COUNT],
}

impl Machine {
    pub fn new() -> Self {
        let mut machine = Machine {
            memory: [0; MEMORY_SIZE],
            v: [0; 16],
            i: 0,
            pc: PROGRAM_ADDR,
            stack: [0; STACK_DEPTH],
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            framebuffer: [0; DISPLAY_PIXELS],
            keys: [false; KEY_COUNT],
        };
        machine.memory[..FONT_SET.len()].copy_from_slice(&FONT_SET);
        machine
    }

    /// back to power-on state, font included
    pub fn reset(&mut self) {
        *self = Machine::new();
    }

    /// copy a program image to 0x200; touches nothing else, so the
    /// caller resets first when switching programs
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > PROGRAM_SPACE {
            return Err(LoadError::TooLarge { len: program.len() });
        }
        let start = PROGRAM_ADDR as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read_byte(&self, addr: usize) -> Result<u8, Fault> {
        self.memory
            .get(addr)
            .copied()
            .ok_or(Fault::OutOfBounds { addr })
    }

    pub fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), Fault> {
        match self.memory.get_mut(addr) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(Fault::OutOfBounds { addr }),
        }
    }

    /// big-endian two-byte word (instruction fetch)
    pub fn read_word(&self, addr: usize) -> Result<u16, Fault> {
        let hi = self.read_byte(addr)?;
        let lo = self.read_byte(addr + 1)?;
        Ok(u16::from(hi) << 8 | u16::from(lo))
    }

    /// one 60 Hz tick: both timers count down to zero and stop there
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// the audio collaborator's whole interface to the machine
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    /// the input collaborator's whole interface to the machine
    pub fn set_key(&mut self, key: u8, down: bool) {
        self.keys[usize::from(key & 0x0f)] = down;
    }

    pub fn clear_keys(&mut self) {
        self.keys = [false; KEY_COUNT];
    }
}

impl Default for Machine {
    fn default() -> Self {
        Machine::new()
    }
}
