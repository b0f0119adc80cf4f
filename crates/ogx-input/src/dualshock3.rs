//! DualShock 3 bridged over the custom USB wire protocol
//!
//! The bridge hands us a raw button record and unsigned sticks. The decoder
//! only understands native pad bits, so the record is translated into that
//! layout before it is merged into the channel.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::buttons::{Directions, PadButtons, WpadButtons, PAD_DIRECTIONS};

/// Stick dead zone of the bridged controller, in raw units from centre.
pub const DS3_DEADZONE: i16 = 115;

bitflags! {
    /// DualShock 3 button flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Ds3Buttons: u32 {
        const SELECT   = 0x0001;
        const L3       = 0x0002;
        const R3       = 0x0004;
        const START    = 0x0008;
        const DPAD_UP  = 0x0010;
        const DPAD_RIGHT = 0x0020;
        const DPAD_DOWN  = 0x0040;
        const DPAD_LEFT  = 0x0080;
        const L2       = 0x0100;
        const R2       = 0x0200;
        const L1       = 0x0400;
        const R1       = 0x0800;
        const TRIANGLE = 0x1000;
        const CIRCLE   = 0x2000;
        const CROSS    = 0x4000;
        const SQUARE   = 0x8000;
    }
}

/// Controller state as read from the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ds3State {
    /// Button state (bitflags)
    pub buttons: u32,
    /// Left analog X (0-255, 128 = center)
    pub left_x: u8,
    /// Left analog Y (0-255, 128 = center, down is positive)
    pub left_y: u8,
}

impl Default for Ds3State {
    fn default() -> Self {
        Self {
            buttons: 0,
            left_x: 128,
            left_y: 128,
        }
    }
}

impl Ds3State {
    pub fn is_button_pressed(&self, button: Ds3Buttons) -> bool {
        (self.buttons & button.bits()) != 0
    }

    pub fn set_button(&mut self, button: Ds3Buttons, pressed: bool) {
        if pressed {
            self.buttons |= button.bits();
        } else {
            self.buttons &= !button.bits();
        }
    }

    /// Directions from the d-pad or from the left stick beyond the dead zone.
    pub fn directions(&self) -> Directions {
        let ax = self.left_x as i16 - 128;
        let ay = self.left_y as i16 - 128;
        Directions {
            up: self.is_button_pressed(Ds3Buttons::DPAD_UP) || ay < -DS3_DEADZONE,
            down: self.is_button_pressed(Ds3Buttons::DPAD_DOWN) || ay > DS3_DEADZONE,
            left: self.is_button_pressed(Ds3Buttons::DPAD_LEFT) || ax < -DS3_DEADZONE,
            right: self.is_button_pressed(Ds3Buttons::DPAD_RIGHT) || ax > DS3_DEADZONE,
        }
    }

    /// Translate into native pad bits.
    pub fn to_pad_bits(&self) -> u32 {
        const TABLE: [(Ds3Buttons, PadButtons); 10] = [
            (Ds3Buttons::CIRCLE, PadButtons::A),
            (Ds3Buttons::CROSS, PadButtons::B),
            (Ds3Buttons::TRIANGLE, PadButtons::X),
            (Ds3Buttons::SQUARE, PadButtons::Y),
            (Ds3Buttons::L1, PadButtons::TRIGGER_L),
            (Ds3Buttons::R1, PadButtons::TRIGGER_R),
            (Ds3Buttons::L2, PadButtons::TRIGGER_L),
            (Ds3Buttons::R2, PadButtons::TRIGGER_R),
            (Ds3Buttons::SELECT, PadButtons::TRIGGER_Z),
            (Ds3Buttons::START, PadButtons::START),
        ];

        let mut bits = self.directions().to_bits(PAD_DIRECTIONS);
        for (ds3, pad) in TABLE {
            if self.is_button_pressed(ds3) {
                bits |= pad.bits();
            }
        }
        bits
    }
}

/// What the host should do with the bridge this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCommand {
    None,
    Open,
    Close,
}

/// Tracks whether the bridge is linked and watches for the link gestures
/// on the first remote.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ds3Link {
    connected: bool,
}

impl Ds3Link {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Record the outcome of an open/close attempt.
    pub fn set_connected(&mut self, connected: bool) {
        if self.connected != connected {
            tracing::info!(
                "DualShock 3 bridge {}",
                if connected { "linked" } else { "unlinked" }
            );
        }
        self.connected = connected;
    }

    /// 1+2 closes a live link, MINUS+PLUS asks to open one.
    pub fn poll(&self, wpad_held: u32) -> LinkCommand {
        let held = WpadButtons::from_bits_truncate(wpad_held);
        if self.connected {
            if held.contains(WpadButtons::ONE | WpadButtons::TWO) {
                return LinkCommand::Close;
            }
        } else if held.contains(WpadButtons::MINUS | WpadButtons::PLUS) {
            return LinkCommand::Open;
        }
        LinkCommand::None
    }
}
