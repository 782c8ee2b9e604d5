//! Directional input
//!
//! Two independent sources feed movement: the physical keyboard and the
//! on-screen d-pad. Each is a set of held directions; the frame driver folds
//! them into one digital intent per axis.

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Element id of the matching on-screen button
    pub fn button_id(&self) -> &'static str {
        match self {
            Direction::Up => "btn-up",
            Direction::Down => "btn-down",
            Direction::Left => "btn-left",
            Direction::Right => "btn-right",
        }
    }

    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    /// On-screen buttons (mouse or touch, press-and-hold)
    VirtualPad,
}

/// Held directions for one source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionFlags {
    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    /// (x, y) contribution of this source, each in -1..=1
    fn axes(&self) -> (i32, i32) {
        (
            self.right as i32 - self.left as i32,
            self.down as i32 - self.up as i32,
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: DirectionFlags,
    pub virtual_pad: DirectionFlags,
}

impl InputState {
    pub fn set(&mut self, source: InputSource, dir: Direction, held: bool) {
        match source {
            InputSource::Keyboard => self.keyboard.set(dir, held),
            InputSource::VirtualPad => self.virtual_pad.set(dir, held),
        }
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Net movement intent. Opposing flags cancel; both sources pushing the
    /// same way still yield a unit step.
    pub fn tick_input(&self) -> TickInput {
        let (kx, ky) = self.keyboard.axes();
        let (vx, vy) = self.virtual_pad.axes();
        TickInput {
            dx: (kx + vx).signum(),
            dy: (ky + vy).signum(),
        }
    }
}
