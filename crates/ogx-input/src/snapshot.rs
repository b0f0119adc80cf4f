//! Per-frame peripheral snapshots
//!
//! The polling layer builds one [`FrameInput`] per rendered frame. Every type
//! here defaults to "all released, sticks centred, no pointer", which is also
//! how a missing or failed channel is represented.

use serde::{Deserialize, Serialize};

/// Number of primary physical channels
pub const MAX_CHANNELS: usize = 4;

/// Digital state of one device for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonState {
    /// Currently held
    pub held: u32,
    /// Went down this frame
    pub pressed: u32,
    /// Went up this frame
    pub released: u32,
}

impl ButtonState {
    pub fn held(held: u32) -> Self {
        Self {
            held,
            ..Default::default()
        }
    }

    pub fn is_held(&self, mask: u32) -> bool {
        self.held & mask != 0
    }

    pub fn all_held(&self, mask: u32) -> bool {
        mask != 0 && self.held & mask == mask
    }
}

/// Signed stick reading, roughly -100..=100, positive Y is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stick {
    pub x: i8,
    pub y: i8,
}

impl Stick {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

/// Native gamepad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GcPadState {
    pub buttons: ButtonState,
    pub stick: Stick,
    /// C-stick
    pub substick: Stick,
    pub trigger_l: u8,
    pub trigger_r: u8,
}

/// Expansion plugged into a wireless remote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expansion {
    #[default]
    None,
    Nunchuk,
    Classic,
}

/// Absolute pointing ray in the remote's native coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerRay {
    pub valid: bool,
    pub x: u16,
    pub y: u16,
}

impl PointerRay {
    pub fn at(x: u16, y: u16) -> Self {
        Self { valid: true, x, y }
    }
}

/// Wireless remote plus its expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WpadState {
    pub buttons: ButtonState,
    pub expansion: Expansion,
    /// Classic-style expansion that is really a pro controller
    pub is_pro: bool,
    /// Expansion's main stick (nunchuk or classic left stick)
    pub stick: Stick,
    /// Classic right stick
    pub substick: Stick,
    pub ir: PointerRay,
}

impl WpadState {
    pub fn has_nunchuk(&self) -> bool {
        self.expansion == Expansion::Nunchuk
    }

    pub fn has_classic(&self) -> bool {
        self.expansion == Expansion::Classic
    }
}

/// Tablet gamepad; auxiliary to channel 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TabletState {
    pub buttons: ButtonState,
    pub stick: Stick,
    pub substick: Stick,
}

/// Everything connected to one physical channel this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelInput {
    pub pad: GcPadState,
    /// Wireless remote, when connected
    pub wpad: Option<WpadState>,
    /// Third-party USB adapters, OR-ed, in native pad layout
    pub adapters: u32,
    /// Bridged motion controller, while linked
    pub bridge: Option<crate::dualshock3::Ds3State>,
}

impl ChannelInput {
    pub fn wpad_held(&self) -> u32 {
        self.wpad.map_or(0, |w| w.buttons.held)
    }
}

/// Snapshot of every peripheral for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInput {
    pub channels: [ChannelInput; MAX_CHANNELS],
    pub tablet: Option<TabletState>,
}

impl FrameInput {
    pub fn channel(&self, chan: usize) -> ChannelInput {
        self.channels.get(chan).copied().unwrap_or_default()
    }

    /// Tablet state as seen from `chan`; the tablet only feeds channel 0.
    pub fn tablet_for(&self, chan: usize) -> Option<TabletState> {
        if chan == 0 {
            self.tablet
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_channel_is_released() {
        let frame = FrameInput::default();
        let chan = frame.channel(7);
        assert_eq!(chan, ChannelInput::default());
        assert_eq!(chan.wpad_held(), 0);
    }

    #[test]
    fn tablet_only_feeds_channel_zero() {
        let frame = FrameInput {
            tablet: Some(TabletState::default()),
            ..Default::default()
        };
        assert!(frame.tablet_for(0).is_some());
        assert!(frame.tablet_for(1).is_none());
    }

    #[test]
    fn chord_requires_every_bit() {
        let state = ButtonState::held(0b0110);
        assert!(state.all_held(0b0110));
        assert!(!state.all_held(0b0111));
        assert!(!state.all_held(0));
        assert!(state.is_held(0b0001 | 0b0100));
    }
}
