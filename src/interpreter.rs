use std::io;
use std::io::Read;

use crate::error::{Fault, LoadError};
use crate::instruction::Instruction;
use crate::machine::{Machine, DISPLAY_HEIGHT, DISPLAY_WIDTH, GLYPH_BYTES, STACK_DEPTH};

/// Behaviors on which CHIP-8 family interpreters historically disagree.
/// The defaults are the common modern readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quirks {
    /// 8XY6/8XYE shift VY into VX, as the original COSMAC VIP
    /// interpreter did, instead of shifting VX in place. Some older
    /// ROMs need this on.
    pub shift_reads_vy: bool,
}

/// The fetch/decode/execute engine. Owns the machine; the driver gets
/// at the framebuffer, keypad and timers through the accessors below.
///
/// `step` runs exactly one instruction and performs no I/O and no
/// timing. The first fault latches: every later `step` returns the same
/// fault without touching the machine, so a crashed program can never
/// corrupt state behind the driver's back. `reset` clears the latch.
pub struct Chip8Interpreter {
    machine: Machine,
    quirks: Quirks,
    fault: Option<Fault>,
}

impl Chip8Interpreter {
    pub fn new() -> Self {
        Chip8Interpreter::with_quirks(Quirks::default())
    }

    pub fn with_quirks(quirks: Quirks) -> Self {
        Chip8Interpreter {
            machine: Machine::new(),
            quirks,
            fault: None,
        }
    }

    /// load a program image at 0x200; the machine is otherwise left
    /// alone, so call `reset` first when switching programs
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<(), LoadError> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        self.machine.load(&program)
    }

    /// execute exactly one instruction
    pub fn step(&mut self) -> Result<(), Fault> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        self.fetch_execute().map_err(|fault| {
            self.fault = Some(fault);
            fault
        })
    }

    fn fetch_execute(&mut self) -> Result<(), Fault> {
        let addr = self.machine.pc;
        let opcode = self.machine.read_word(addr as usize)?;
        let instruction =
            Instruction::decode(opcode).ok_or(Fault::IllegalInstruction { addr, opcode })?;
        // PC moves past the instruction before it runs: jumps and calls
        // overwrite it, everything else falls through to addr + 2
        self.machine.pc = addr + 2;
        self.execute(addr, instruction)
    }

    fn execute(&mut self, addr: u16, instruction: Instruction) -> Result<(), Fault> {
        use Instruction::*;

        let quirks = self.quirks;
        let m = &mut self.machine;
        match instruction {
            ClearScreen => m.framebuffer.fill(0),
            Return => {
                if m.sp == 0 {
                    return Err(Fault::StackUnderflow { addr });
                }
                m.sp -= 1;
                m.pc = m.stack[m.sp as usize];
            }
            Jump { nnn } => m.pc = nnn,
            Call { nnn } => {
                if usize::from(m.sp) == STACK_DEPTH {
                    return Err(Fault::StackOverflow { addr });
                }
                m.stack[m.sp as usize] = m.pc;
                m.sp += 1;
                m.pc = nnn;
            }
            SkipEqImm { x, nn } => {
                if m.v[x as usize] == nn {
                    m.pc += 2;
                }
            }
            SkipNeImm { x, nn } => {
                if m.v[x as usize] != nn {
                    m.pc += 2;
                }
            }
            SkipEqReg { x, y } => {
                if m.v[x as usize] == m.v[y as usize] {
                    m.pc += 2;
                }
            }
            LoadImm { x, nn } => m.v[x as usize] = nn,
            AddImm { x, nn } => m.v[x as usize] = m.v[x as usize].wrapping_add(nn),
            Move { x, y } => m.v[x as usize] = m.v[y as usize],
            Or { x, y } => m.v[x as usize] |= m.v[y as usize],
            And { x, y } => m.v[x as usize] &= m.v[y as usize],
            Xor { x, y } => m.v[x as usize] ^= m.v[y as usize],
            Add { x, y } => {
                let sum = u16::from(m.v[x as usize]) + u16::from(m.v[y as usize]);
                m.v[0xf] = (sum > 0xff) as u8;
                m.v[x as usize] = sum as u8;
            }
            Sub { x, y } => {
                // flag first, from pre-mutation values
                m.v[0xf] = (m.v[x as usize] > m.v[y as usize]) as u8;
                m.v[x as usize] = m.v[x as usize].wrapping_sub(m.v[y as usize]);
            }
            ShiftRight { x, y } => {
                let src = if quirks.shift_reads_vy { y } else { x };
                m.v[0xf] = m.v[src as usize] & 0x01;
                m.v[x as usize] = m.v[src as usize] >> 1;
            }
            SubFrom { x, y } => {
                m.v[0xf] = (m.v[y as usize] > m.v[x as usize]) as u8;
                m.v[x as usize] = m.v[y as usize].wrapping_sub(m.v[x as usize]);
            }
            ShiftLeft { x, y } => {
                let src = if quirks.shift_reads_vy { y } else { x };
                m.v[0xf] = (m.v[src as usize] & 0x80) >> 7;
                m.v[x as usize] = m.v[src as usize] << 1;
            }
            SkipNeReg { x, y } => {
                if m.v[x as usize] != m.v[y as usize] {
                    m.pc += 2;
                }
            }
            LoadI { nnn } => m.i = nnn,
            JumpOffset { nnn } => m.pc = nnn + u16::from(m.v[0]),
            Random { x, nn } => m.v[x as usize] = rand::random::<u8>() & nn,
            Draw { x, y, n } => {
                let origin_x = m.v[x as usize] as usize;
                let origin_y = m.v[y as usize] as usize;
                m.v[0xf] = 0;
                for row in 0..n as usize {
                    let sprite = m.read_byte(m.i as usize + row)?;
                    for col in 0..8 {
                        if sprite & (0x80 >> col) == 0 {
                            continue;
                        }
                        // coordinates wrap; sprites are never clipped
                        let px = (origin_x + col) % DISPLAY_WIDTH;
                        let py = (origin_y + row) % DISPLAY_HEIGHT;
                        let pixel = &mut m.framebuffer[py * DISPLAY_WIDTH + px];
                        if *pixel == 1 {
                            m.v[0xf] = 1;
                        }
                        *pixel ^= 1;
                    }
                }
            }
            SkipKeyDown { x } => {
                if m.keys[usize::from(m.v[x as usize] & 0x0f)] {
                    m.pc += 2;
                }
            }
            SkipKeyUp { x } => {
                if !m.keys[usize::from(m.v[x as usize] & 0x0f)] {
                    m.pc += 2;
                }
            }
            ReadDelay { x } => m.v[x as usize] = m.delay_timer,
            SetDelay { x } => m.delay_timer = m.v[x as usize],
            SetSound { x } => m.sound_timer = m.v[x as usize],
            AddI { x } => m.i = m.i.wrapping_add(u16::from(m.v[x as usize])),
            LoadGlyph { x } => m.i = u16::from(m.v[x as usize]) * GLYPH_BYTES,
            StoreBcd { x } => {
                let value = m.v[x as usize];
                let i = m.i as usize;
                m.write_byte(i, value / 100)?;
                m.write_byte(i + 1, value / 10 % 10)?;
                m.write_byte(i + 2, value % 10)?;
            }
            StoreRegs { x } => {
                for offset in 0..=x as usize {
                    m.write_byte(m.i as usize + offset, m.v[offset])?;
                }
            }
            LoadRegs { x } => {
                for offset in 0..=x as usize {
                    m.v[offset] = m.read_byte(m.i as usize + offset)?;
                }
            }
        }
        Ok(())
    }

    /// back to power-on state; clears any latched fault
    pub fn reset(&mut self) {
        self.machine.reset();
        self.fault = None;
    }

    /// the fault that halted the machine, if any
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    // driver-facing ports

    pub fn framebuffer(&self) -> &[u8] {
        &self.machine.framebuffer
    }

    pub fn set_key(&mut self, key: u8, down: bool) {
        self.machine.set_key(key, down);
    }

    pub fn clear_keys(&mut self) {
        self.machine.clear_keys();
    }

    pub fn tick_timers(&mut self) {
        self.machine.tick_timers();
    }

    pub fn sound_active(&self) -> bool {
        self.machine.sound_active()
    }
}

impl Default for Chip8Interpreter {
    fn default() -> Self {
        Chip8Interpreter::new()
    }
}
