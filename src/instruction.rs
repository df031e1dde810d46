/// One decoded instruction. Field names follow the conventional opcode
/// notation: `x` and `y` are register indices taken from the second and
/// third nibbles (always < 16), `nn` the low byte, `nnn` the low twelve
/// bits, `n` the low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0: clear the framebuffer
    ClearScreen,
    /// 00EE: pop the call stack into PC
    Return,
    /// 1NNN
    Jump { nnn: u16 },
    /// 2NNN: push PC, then jump
    Call { nnn: u16 },
    /// 3XNN: skip next if VX == NN
    SkipEqImm { x: u8, nn: u8 },
    /// 4XNN: skip next if VX != NN
    SkipNeImm { x: u8, nn: u8 },
    /// 5XY0: skip next if VX == VY
    SkipEqReg { x: u8, y: u8 },
    /// 6XNN
    LoadImm { x: u8, nn: u8 },
    /// 7XNN: VX += NN, wrapping, no flag
    AddImm { x: u8, nn: u8 },
    /// 8XY0
    Move { x: u8, y: u8 },
    /// 8XY1
    Or { x: u8, y: u8 },
    /// 8XY2
    And { x: u8, y: u8 },
    /// 8XY3
    Xor { x: u8, y: u8 },
    /// 8XY4: VX += VY, VF = carry
    Add { x: u8, y: u8 },
    /// 8XY5: VX -= VY, VF = no-borrow
    Sub { x: u8, y: u8 },
    /// 8XY6: VF = low bit, then shift right
    ShiftRight { x: u8, y: u8 },
    /// 8XY7: VX = VY - VX, VF = no-borrow
    SubFrom { x: u8, y: u8 },
    /// 8XYE: VF = high bit, then shift left
    ShiftLeft { x: u8, y: u8 },
    /// 9XY0: skip next if VX != VY
    SkipNeReg { x: u8, y: u8 },
    /// ANNN
    LoadI { nnn: u16 },
    /// BNNN: jump to NNN + V0
    JumpOffset { nnn: u16 },
    /// CXNN: VX = random byte & NN
    Random { x: u8, nn: u8 },
    /// DXYN: XOR an N-row sprite from [I] at (VX, VY), VF = collision
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E: skip next if key VX is down
    SkipKeyDown { x: u8 },
    /// EXA1: skip next if key VX is up
    SkipKeyUp { x: u8 },
    /// FX07: VX = delay timer
    ReadDelay { x: u8 },
    /// FX15
    SetDelay { x: u8 },
    /// FX18
    SetSound { x: u8 },
    /// FX1E: I += VX, no flag
    AddI { x: u8 },
    /// FX29: I = address of the font glyph for VX
    LoadGlyph { x: u8 },
    /// FX33: decimal digits of VX to [I], [I+1], [I+2]
    StoreBcd { x: u8 },
    /// FX55: V0..=VX to memory from [I]
    StoreRegs { x: u8 },
    /// FX65: memory from [I] to V0..=VX
    LoadRegs { x: u8 },
}

impl Instruction {
    /// Decode a big-endian instruction word by its top nibble, then by
    /// low nibble or low byte for the 0x0/0x8/0xE/0xF families. `None`
    /// means no pattern matched; the interpreter treats that as a fatal
    /// illegal instruction. 0NNN machine-language calls and the
    /// SUPER-CHIP extensions are deliberately not patterns.
    pub fn decode(opcode: u16) -> Option<Instruction> {
        use Instruction::*;

        let x = ((opcode >> 8) & 0xf) as u8;
        let y = ((opcode >> 4) & 0xf) as u8;
        let n = (opcode & 0xf) as u8;
        let nn = (opcode & 0xff) as u8;
        let nnn = opcode & 0xfff;

        let instruction = match opcode >> 12 {
            0x0 => match opcode {
                0x00e0 => ClearScreen,
                0x00ee => Return,
                _ => return None,
            },
            0x1 => Jump { nnn },
            0x2 => Call { nnn },
            0x3 => SkipEqImm { x, nn },
            0x4 => SkipNeImm { x, nn },
            0x5 if n == 0 => SkipEqReg { x, y },
            0x6 => LoadImm { x, nn },
            0x7 => AddImm { x, nn },
            0x8 => match n {
                0x0 => Move { x, y },
                0x1 => Or { x, y },
                0x2 => And { x, y },
                0x3 => Xor { x, y },
                0x4 => Add { x, y },
                0x5 => Sub { x, y },
                0x6 => ShiftRight { x, y },
                0x7 => SubFrom { x, y },
                0xe => ShiftLeft { x, y },
                _ => return None,
            },
            0x9 if n == 0 => SkipNeReg { x, y },
            0xa => LoadI { nnn },
            0xb => JumpOffset { nnn },
            0xc => Random { x, nn },
            0xd => Draw { x, y, n },
            0xe => match nn {
                0x9e => SkipKeyDown { x },
                0xa1 => SkipKeyUp { x },
                _ => return None,
            },
            0xf => match nn {
                0x07 => ReadDelay { x },
                0x15 => SetDelay { x },
                0x18 => SetSound { x },
                0x1e => AddI { x },
                0x29 => LoadGlyph { x },
                0x33 => StoreBcd { x },
                0x55 => StoreRegs { x },
                0x65 => LoadRegs { x },
                _ => return None,
            },
            _ => return None,
        };
        Some(instruction)
    }
}
