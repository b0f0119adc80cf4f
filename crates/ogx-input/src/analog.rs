//! Analog normalizer
//!
//! Sticks and triggers are folded into each family's held bits before any
//! map lookup, so a deflected stick looks exactly like a held d-pad.

use crate::buttons::{
    Directions, PadButtons, CLASSIC_DIRECTIONS, PAD_DIRECTIONS, TABLET_DIRECTIONS,
    WPAD_DIRECTIONS,
};
use crate::snapshot::{Expansion, FrameInput, GcPadState, Stick, TabletState, WpadState};

/// Stick magnitude that must be exceeded to count as a direction.
pub const DEAD_ZONE: i8 = 30;

/// Trigger magnitude that must be exceeded to count as a press (about half way).
pub const TRIGGER_THRESHOLD: u8 = 0x80;

/// Digital directions of a stick; positive Y is up.
pub fn stick_directions(stick: Stick) -> Directions {
    Directions {
        up: stick.y > DEAD_ZONE,
        down: stick.y < -DEAD_ZONE,
        left: stick.x < -DEAD_ZONE,
        right: stick.x > DEAD_ZONE,
    }
}

/// Native pad held bits plus stick directions and trigger presses.
pub fn normalize_pad(pad: &GcPadState) -> u32 {
    let mut held = pad.buttons.held | stick_directions(pad.stick).to_bits(PAD_DIRECTIONS);
    if pad.trigger_l > TRIGGER_THRESHOLD {
        held |= PadButtons::TRIGGER_L.bits();
    }
    if pad.trigger_r > TRIGGER_THRESHOLD {
        held |= PadButtons::TRIGGER_R.bits();
    }
    held
}

/// Remote held bits plus the expansion stick. A classic expansion reports
/// its stick as classic d-pad bits, anything else as the remote's d-pad.
pub fn normalize_wpad(wpad: &WpadState) -> u32 {
    let layout = if wpad.has_classic() {
        CLASSIC_DIRECTIONS
    } else {
        WPAD_DIRECTIONS
    };
    wpad.buttons.held | stick_directions(wpad.stick).to_bits(layout)
}

/// Tablet held bits plus left stick directions.
pub fn normalize_tablet(tablet: &TabletState) -> u32 {
    tablet.buttons.held | stick_directions(tablet.stick).to_bits(TABLET_DIRECTIONS)
}

/// Normalised held bits of every device on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizedChannel {
    /// Native pad, USB adapters and bridged controller, merged
    pub pad: u32,
    /// Remote and expansion; `None` when no remote is connected
    pub wpad: Option<NormalizedWpad>,
    /// Tablet, only ever present on channel 0
    pub tablet: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedWpad {
    pub held: u32,
    pub expansion: Expansion,
    pub is_pro: bool,
}

impl NormalizedChannel {
    pub fn wpad_held(&self) -> u32 {
        self.wpad.map_or(0, |w| w.held)
    }
}

/// Normalise everything connected to `chan` for this frame.
pub fn normalize_channel(frame: &FrameInput, chan: usize) -> NormalizedChannel {
    let input = frame.channel(chan);

    let mut pad = normalize_pad(&input.pad) | input.adapters;
    if let Some(ds3) = input.bridge {
        pad |= ds3.to_pad_bits();
    }

    let wpad = input.wpad.map(|w| NormalizedWpad {
        held: normalize_wpad(&w),
        expansion: w.expansion,
        is_pro: w.is_pro,
    });

    let tablet = frame.tablet_for(chan).map_or(0, |t| normalize_tablet(&t));

    NormalizedChannel { pad, wpad, tablet }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::{TabletButtons, WpadButtons};
    use crate::dualshock3::{Ds3Buttons, Ds3State};
    use crate::snapshot::ChannelInput;

    #[test]
    fn dead_zone_is_strict() {
        for axis in [DEAD_ZONE, -DEAD_ZONE, 0] {
            assert!(!stick_directions(Stick::new(axis, axis)).any());
        }
        let dirs = stick_directions(Stick::new(DEAD_ZONE + 1, DEAD_ZONE + 1));
        assert!(dirs.right && dirs.up && !dirs.left && !dirs.down);
        let dirs = stick_directions(Stick::new(-DEAD_ZONE - 1, -DEAD_ZONE - 1));
        assert!(dirs.left && dirs.down && !dirs.right && !dirs.up);
    }

    #[test]
    fn extreme_values_do_not_wrap() {
        let dirs = stick_directions(Stick::new(i8::MIN, i8::MAX));
        assert!(dirs.left && dirs.up);
    }

    #[test]
    fn triggers_press_past_half_way() {
        let mut pad = GcPadState {
            trigger_l: TRIGGER_THRESHOLD,
            ..Default::default()
        };
        assert_eq!(normalize_pad(&pad), 0);
        pad.trigger_l = TRIGGER_THRESHOLD + 1;
        pad.trigger_r = 0xFF;
        assert_eq!(
            normalize_pad(&pad),
            (PadButtons::TRIGGER_L | PadButtons::TRIGGER_R).bits()
        );
    }

    #[test]
    fn expansion_stick_uses_expansion_layout() {
        let mut wpad = WpadState {
            stick: Stick::new(0, 90),
            ..Default::default()
        };
        assert_eq!(normalize_wpad(&wpad), WpadButtons::UP.bits());
        wpad.expansion = Expansion::Classic;
        assert_eq!(normalize_wpad(&wpad), WpadButtons::CLASSIC_UP.bits());
    }

    #[test]
    fn tablet_stick_becomes_dpad() {
        let tablet = TabletState {
            stick: Stick::new(-50, 0),
            ..Default::default()
        };
        assert_eq!(normalize_tablet(&tablet), TabletButtons::LEFT.bits());
    }

    #[test]
    fn channel_merges_pad_sources() {
        let mut ds3 = Ds3State::default();
        ds3.set_button(Ds3Buttons::CIRCLE, true);
        let mut frame = FrameInput::default();
        frame.channels[1] = ChannelInput {
            adapters: PadButtons::START.bits(),
            bridge: Some(ds3),
            ..Default::default()
        };

        let chan = normalize_channel(&frame, 1);
        assert_eq!(chan.pad, (PadButtons::START | PadButtons::A).bits());
        assert!(chan.wpad.is_none());
        assert_eq!(chan.tablet, 0);
    }
}
