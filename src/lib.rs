//! ## Design
//!
//! * the library is the machine; all I/O lives in the binary
//! * `machine` owns every piece of mutable state: 4K of RAM (font baked
//!   into 0x000..0x050, programs at 0x200), V0-VF, I, PC, the 16-deep
//!   call stack, both timers, the 64x32 framebuffer and the keypad
//! * `instruction` decodes a two-byte word into a tagged enum, one
//!   variant per opcode pattern, so the 34-way dispatch is exhaustive
//!   and checked by the compiler
//! * `interpreter` runs the fetch/decode/execute cycle one instruction
//!   at a time; a fault (illegal opcode, stack over/underflow, memory
//!   out of bounds) latches and stops the machine until reset
//! * the interpreter has no clock: the driver calls `step()` some
//!   number of times per frame (10 here), then `tick_timers()` once,
//!   then reads the framebuffer -- 60 frames per second
//! * display, input and sound are traits so the terminal front-end can
//!   be swapped out; each ships a dummy for headless tests
//! * config is limited to `Quirks` (the shift-instruction variant);
//!   CHIP-8 vs. SUPER-CHIP is out of scope

pub mod display;
pub mod error;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod machine;
pub mod sound;
