//! Pointer tracking for the Super Scope, mice and Justifiers

use ogx_core::config::DEFAULT_POINTER_SPACE;

use crate::analog::DEAD_ZONE;
use crate::snapshot::{ChannelInput, PointerRay, Stick};

/// Width of the SNES active picture
pub const SCREEN_WIDTH: i32 = 256;
/// Height of the SNES active picture
pub const SCREEN_HEIGHT: i32 = 224;

/// Stick deflection is divided by this to get pixels per frame.
pub const CURSOR_DIVISOR: i32 = 20;

/// Pointer-capable emulated device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSlot {
    SuperScope,
    Mouse1,
    Mouse2,
    Justifier1,
    Justifier2,
}

impl PointerSlot {
    pub const ALL: [PointerSlot; 5] = [
        PointerSlot::SuperScope,
        PointerSlot::Mouse1,
        PointerSlot::Mouse2,
        PointerSlot::Justifier1,
        PointerSlot::Justifier2,
    ];

    /// Pointer code the emulation core listens on.
    pub fn code(self) -> u16 {
        0x80 + self as u16
    }

    pub fn mouse(emu_slot: usize) -> PointerSlot {
        if emu_slot == 0 {
            PointerSlot::Mouse1
        } else {
            PointerSlot::Mouse2
        }
    }

    pub fn justifier(emu_slot: usize) -> PointerSlot {
        if emu_slot == 0 {
            PointerSlot::Justifier1
        } else {
            PointerSlot::Justifier2
        }
    }
}

/// Native coordinate space of the pointing ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerSpace {
    pub width: u16,
    pub height: u16,
}

impl PointerSpace {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Project a ray position into the SNES picture.
    pub fn project(&self, ray: PointerRay) -> (i32, i32) {
        let x = ray.x as i32 * SCREEN_WIDTH / self.width as i32;
        let y = ray.y as i32 * SCREEN_HEIGHT / self.height as i32;
        (x, y)
    }
}

impl Default for PointerSpace {
    fn default() -> Self {
        Self::new(DEFAULT_POINTER_SPACE.0, DEFAULT_POINTER_SPACE.1)
    }
}

/// Cursor position in SNES picture coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub x: i32,
    pub y: i32,
}

impl Cursor {
    pub fn new(x: i32, y: i32) -> Self {
        let mut cursor = Self::default();
        cursor.set(x, y);
        cursor
    }

    pub fn set(&mut self, x: i32, y: i32) {
        self.x = x.clamp(0, SCREEN_WIDTH - 1);
        self.y = y.clamp(0, SCREEN_HEIGHT - 1);
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.set(self.x + dx, self.y + dy);
    }

    /// Nudge by a stick; stick up moves towards the top of the picture.
    pub fn nudge(&mut self, stick: Stick) {
        self.move_by(axis_step(stick.x), -axis_step(stick.y));
    }

    /// Snap to the ray when it is valid, otherwise nudge by the stick.
    /// Returns true when the cursor snapped.
    pub fn track(&mut self, ray: PointerRay, stick: Stick, space: PointerSpace) -> bool {
        if ray.valid {
            let (x, y) = space.project(ray);
            self.set(x, y);
            true
        } else {
            self.nudge(stick);
            false
        }
    }

    pub fn position(&self) -> (u16, u16) {
        (self.x as u16, self.y as u16)
    }
}

/// Pixels to move this frame for one stick axis.
pub fn axis_step(axis: i8) -> i32 {
    if !(-DEAD_ZONE..=DEAD_ZONE).contains(&axis) {
        axis as i32 / CURSOR_DIVISOR
    } else {
        0
    }
}

/// Cursor of every pointer-capable device. Positions persist across frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorState {
    cursors: [Cursor; 5],
}

impl CursorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: PointerSlot) -> Cursor {
        self.cursors[slot as usize]
    }

    pub fn get_mut(&mut self, slot: PointerSlot) -> &mut Cursor {
        &mut self.cursors[slot as usize]
    }

    /// Advance one cursor from the devices on `input`: the native pad stick
    /// always nudges, then the remote either snaps it to its ray or nudges
    /// it with its own stick.
    pub fn update(&mut self, slot: PointerSlot, input: &ChannelInput, space: PointerSpace) -> Cursor {
        self.update_all(slot, std::slice::from_ref(input), space)
    }

    /// Advance one cursor from every channel driving its slot, in order.
    /// The cursor moves once per frame however many channels feed it.
    pub fn update_all(&mut self, slot: PointerSlot, inputs: &[ChannelInput], space: PointerSpace) -> Cursor {
        let cursor = self.get_mut(slot);
        for input in inputs {
            cursor.nudge(input.pad.stick);
            if let Some(wpad) = input.wpad {
                cursor.track(wpad.ir, wpad.stick, space);
            }
        }
        *cursor
    }
}
