use std::env;
use std::error::Error;
use std::fs::File;
use std::process;
use std::time::{Duration, Instant};

use cosmac8::display::{Display, MonoTermDisplay};
use cosmac8::input::{Input, StdinInput};
use cosmac8::interpreter::Chip8Interpreter;
use cosmac8::machine::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use cosmac8::sound::{SimpleBeep, Sound};

/// instructions per frame; a speed choice, not an ISA property
const STEPS_PER_FRAME: u32 = 10;

/// 60 frames per second
const FRAME: Duration = Duration::from_nanos(1_000_000_000 / 60);

fn main() -> Result<(), Box<dyn Error>> {
    let rom_path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: cosmac8 <rom.ch8>");
            process::exit(2);
        }
    };

    let mut cpu = Chip8Interpreter::new();
    let mut rom = File::open(&rom_path)?;
    cpu.load_program(&mut rom)?;

    // input must outlive the loop: dropping it restores the terminal
    let mut display = MonoTermDisplay::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)?;
    let mut input = StdinInput::new();
    let mut sound = SimpleBeep::new();

    let result = run(&mut cpu, &mut display, &mut input, &mut sound);

    // shove some newlines on stdout to stop the cli messing up the
    // last frame
    for _ in 0..4 {
        println!();
    }
    result
}

/// the timing driver: keys in, a batch of instructions, one timer tick,
/// framebuffer out, sound out, sleep off the rest of the frame
fn run(
    cpu: &mut Chip8Interpreter,
    display: &mut impl Display,
    input: &mut impl Input,
    sound: &mut impl Sound,
) -> Result<(), Box<dyn Error>> {
    loop {
        let frame_start = Instant::now();

        cpu.clear_keys();
        for &key in input.peek_keys()? {
            cpu.set_key(key, true);
        }
        input.flush_keys()?;
        if input.quit_requested() {
            return Ok(());
        }

        for _ in 0..STEPS_PER_FRAME {
            cpu.step()?;
        }
        cpu.tick_timers();

        display.draw(cpu.framebuffer())?;
        sound.update(cpu.sound_active())?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            spin_sleep::sleep(FRAME - elapsed);
        }
    }
}
