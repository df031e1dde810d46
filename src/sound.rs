use beep::beep;
use std::error::Error;

/// The audio collaborator. The machine's only audio state is the sound
/// timer; the driver calls `update` once per frame with its nonzero
/// flag and the implementation turns the tone on and off at the edges.
pub trait Sound {
    fn update(&mut self, active: bool) -> Result<(), Box<dyn Error>>;
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C

/// a single fixed-pitch tone through the beep crate
pub struct SimpleBeep {
    is_beeping: bool,
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { is_beeping: false }
    }
}

impl Default for SimpleBeep {
    fn default() -> Self {
        SimpleBeep::new()
    }
}

impl Sound for SimpleBeep {
    fn update(&mut self, active: bool) -> Result<(), Box<dyn Error>> {
        if active && !self.is_beeping {
            beep(SIMPLEBEEP_PITCH)?;
            self.is_beeping = true;
        } else if !active && self.is_beeping {
            beep(0)?;
            self.is_beeping = false;
        }
        Ok(())
    }
}

/// for machines with no PC speaker, and for tests
pub struct Mute {
    pub active_frames: usize,
}

impl Mute {
    pub fn new() -> Self {
        Mute { active_frames: 0 }
    }
}

impl Default for Mute {
    fn default() -> Self {
        Mute::new()
    }
}

impl Sound for Mute {
    fn update(&mut self, active: bool) -> Result<(), Box<dyn Error>> {
        if active {
            self.active_frames += 1;
        }
        Ok(())
    }
}
