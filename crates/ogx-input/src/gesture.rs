//! Menu and turbo gestures
//!
//! Both gestures are tables of chords checked by [`any_chord_matches`].
//! Supporting another controller family means adding rows, not code.
//! Chords look at raw held bits and raw sticks, never at the normalised
//! state, so a deflected stick cannot complete a button chord.

use ogx_core::error::InputError;

use crate::buttons::{PadButtons as P, TabletButtons as T, WpadButtons as W};
use crate::snapshot::{ButtonState, ChannelInput, FrameInput, TabletState, MAX_CHANNELS};

/// Device a chord reads its held bits from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Pad,
    /// Remote and whatever expansion is attached
    Wpad,
    /// Remote, only while a nunchuk is attached
    Nunchuk,
    Tablet,
}

/// Stick axis a chord can test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    PadSubstickX,
    WpadSubstickX,
    TabletSubstickX,
}

/// One way of performing a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chord {
    /// Every bit of `mask` held on `source`
    Buttons { source: Source, mask: u32 },
    AxisBelow { axis: Axis, threshold: i8 },
    AxisAbove { axis: Axis, threshold: i8 },
}

impl Chord {
    pub fn matches(&self, input: &ChannelInput, tablet: Option<&TabletState>) -> bool {
        match *self {
            Chord::Buttons { source, mask } => {
                ButtonState::held(held_bits(source, input, tablet)).all_held(mask)
            }
            Chord::AxisBelow { axis, threshold } => {
                axis_value(axis, input, tablet).is_some_and(|v| v < threshold)
            }
            Chord::AxisAbove { axis, threshold } => {
                axis_value(axis, input, tablet).is_some_and(|v| v > threshold)
            }
        }
    }
}

fn held_bits(source: Source, input: &ChannelInput, tablet: Option<&TabletState>) -> u32 {
    match source {
        Source::Pad => input.pad.buttons.held,
        Source::Wpad => input.wpad_held(),
        Source::Nunchuk => input
            .wpad
            .filter(|w| w.has_nunchuk())
            .map_or(0, |w| w.buttons.held),
        Source::Tablet => tablet.map_or(0, |t| t.buttons.held),
    }
}

fn axis_value(axis: Axis, input: &ChannelInput, tablet: Option<&TabletState>) -> Option<i8> {
    match axis {
        Axis::PadSubstickX => Some(input.pad.substick.x),
        Axis::WpadSubstickX => input.wpad.map(|w| w.substick.x),
        Axis::TabletSubstickX => tablet.map(|t| t.substick.x),
    }
}

/// True when any chord in the table is being performed.
pub fn any_chord_matches(chords: &[Chord], input: &ChannelInput, tablet: Option<&TabletState>) -> bool {
    chords.iter().any(|chord| chord.matches(input, tablet))
}

const fn buttons(source: Source, mask: u32) -> Chord {
    Chord::Buttons { source, mask }
}

/// Ways of asking for the menu, checked on every channel.
pub const MENU_CHORDS: &[Chord] = &[
    // C-stick flicked left
    Chord::AxisBelow { axis: Axis::PadSubstickX, threshold: -70 },
    // Adapted NES/SNES pads on the native ports
    buttons(
        Source::Pad,
        P::START.bits() | P::A.bits() | P::B.bits() | P::TRIGGER_Z.bits(),
    ),
    buttons(Source::Wpad, W::HOME.bits()),
    buttons(Source::Wpad, W::CLASSIC_HOME.bits()),
    buttons(Source::Tablet, T::HOME.bits()),
    // Third-party classic-style pads without a home button
    buttons(
        Source::Wpad,
        W::CLASSIC_PLUS.bits() | W::CLASSIC_A.bits() | W::CLASSIC_B.bits() | W::CLASSIC_MINUS.bits(),
    ),
];

/// True when any channel asks for the menu. Pure; safe to call repeatedly.
pub fn menu_requested(frame: &FrameInput) -> bool {
    (0..MAX_CHANNELS).any(|chan| {
        let tablet = frame.tablet_for(chan);
        any_chord_matches(MENU_CHORDS, &frame.channel(chan), tablet.as_ref())
    })
}

/// Button that engages turbo mode while held. Persisted by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurboButton {
    #[default]
    RightStick,
    A,
    B,
    X,
    Y,
    L,
    R,
    ZL,
    ZR,
    Z,
    C,
    One,
    Two,
    Plus,
    Minus,
}

impl TurboButton {
    pub const ALL: [TurboButton; 15] = [
        TurboButton::RightStick,
        TurboButton::A,
        TurboButton::B,
        TurboButton::X,
        TurboButton::Y,
        TurboButton::L,
        TurboButton::R,
        TurboButton::ZL,
        TurboButton::ZR,
        TurboButton::Z,
        TurboButton::C,
        TurboButton::One,
        TurboButton::Two,
        TurboButton::Plus,
        TurboButton::Minus,
    ];

    pub fn from_index(index: u8) -> Result<Self, InputError> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(InputError::InvalidTurboButton(index))
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Chords that count as holding this turbo button.
    pub fn chords(self) -> &'static [Chord] {
        match self {
            TurboButton::RightStick => TURBO_RIGHT_STICK,
            TurboButton::A => TURBO_A,
            TurboButton::B => TURBO_B,
            TurboButton::X => TURBO_X,
            TurboButton::Y => TURBO_Y,
            TurboButton::L => TURBO_L,
            TurboButton::R => TURBO_R,
            TurboButton::ZL => TURBO_ZL,
            TurboButton::ZR => TURBO_ZR,
            TurboButton::Z => TURBO_Z,
            TurboButton::C => TURBO_C,
            TurboButton::One => TURBO_ONE,
            TurboButton::Two => TURBO_TWO,
            TurboButton::Plus => TURBO_PLUS,
            TurboButton::Minus => TURBO_MINUS,
        }
    }
}

const TURBO_RIGHT_STICK: &[Chord] = &[
    Chord::AxisAbove { axis: Axis::PadSubstickX, threshold: 70 },
    Chord::AxisAbove { axis: Axis::WpadSubstickX, threshold: 70 },
    Chord::AxisAbove { axis: Axis::TabletSubstickX, threshold: 45 },
];
const TURBO_A: &[Chord] = &[
    buttons(Source::Wpad, W::CLASSIC_A.bits()),
    buttons(Source::Wpad, W::A.bits()),
    buttons(Source::Pad, P::A.bits()),
    buttons(Source::Tablet, T::A.bits()),
];
const TURBO_B: &[Chord] = &[
    buttons(Source::Wpad, W::CLASSIC_B.bits()),
    buttons(Source::Wpad, W::B.bits()),
    buttons(Source::Pad, P::B.bits()),
    buttons(Source::Tablet, T::B.bits()),
];
// The remote on its own has no X/Y/L/R/ZL/ZR.
const TURBO_X: &[Chord] = &[
    buttons(Source::Wpad, W::CLASSIC_X.bits()),
    buttons(Source::Pad, P::X.bits()),
    buttons(Source::Tablet, T::X.bits()),
];
const TURBO_Y: &[Chord] = &[
    buttons(Source::Wpad, W::CLASSIC_Y.bits()),
    buttons(Source::Pad, P::Y.bits()),
    buttons(Source::Tablet, T::Y.bits()),
];
const TURBO_L: &[Chord] = &[
    buttons(Source::Wpad, W::CLASSIC_FULL_L.bits()),
    buttons(Source::Pad, P::TRIGGER_L.bits()),
    buttons(Source::Tablet, T::L.bits()),
];
const TURBO_R: &[Chord] = &[
    buttons(Source::Wpad, W::CLASSIC_FULL_R.bits()),
    buttons(Source::Pad, P::TRIGGER_R.bits()),
    buttons(Source::Tablet, T::R.bits()),
];
const TURBO_ZL: &[Chord] = &[
    buttons(Source::Wpad, W::CLASSIC_ZL.bits()),
    buttons(Source::Tablet, T::ZL.bits()),
];
const TURBO_ZR: &[Chord] = &[
    buttons(Source::Wpad, W::CLASSIC_ZR.bits()),
    buttons(Source::Tablet, T::ZR.bits()),
];
const TURBO_Z: &[Chord] = &[
    buttons(Source::Pad, P::TRIGGER_Z.bits()),
    buttons(Source::Nunchuk, W::NUNCHUK_Z.bits()),
];
const TURBO_C: &[Chord] = &[buttons(Source::Nunchuk, W::NUNCHUK_C.bits())];
const TURBO_ONE: &[Chord] = &[buttons(Source::Wpad, W::ONE.bits())];
const TURBO_TWO: &[Chord] = &[buttons(Source::Wpad, W::TWO.bits())];
const TURBO_PLUS: &[Chord] = &[
    buttons(Source::Wpad, W::CLASSIC_PLUS.bits()),
    buttons(Source::Wpad, W::PLUS.bits()),
    buttons(Source::Tablet, T::PLUS.bits()),
];
const TURBO_MINUS: &[Chord] = &[
    buttons(Source::Wpad, W::CLASSIC_MINUS.bits()),
    buttons(Source::Wpad, W::MINUS.bits()),
    buttons(Source::Tablet, T::MINUS.bits()),
];

/// True when the configured turbo button is held. Only the first channel
/// (and the tablet attached to it) can drive turbo.
pub fn turbo_held(frame: &FrameInput, button: TurboButton) -> bool {
    let tablet = frame.tablet_for(0);
    any_chord_matches(button.chords(), &frame.channel(0), tablet.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Expansion, Stick, WpadState};

    fn with_pad(held: u32) -> FrameInput {
        let mut frame = FrameInput::default();
        frame.channels[0].pad.buttons = ButtonState::held(held);
        frame
    }

    #[test]
    fn idle_frame_requests_nothing() {
        let frame = FrameInput::default();
        assert!(!menu_requested(&frame));
        for button in TurboButton::ALL {
            assert!(!turbo_held(&frame, button), "{:?}", button);
        }
    }

    #[test]
    fn menu_chord_needs_all_four_buttons() {
        let chord = (P::START | P::A | P::B | P::TRIGGER_Z).bits();
        assert!(menu_requested(&with_pad(chord)));
        assert!(!menu_requested(&with_pad(chord & !P::TRIGGER_Z.bits())));
    }

    #[test]
    fn menu_from_any_channel() {
        let mut frame = FrameInput::default();
        frame.channels[3].wpad = Some(WpadState {
            buttons: ButtonState::held(W::HOME.bits()),
            ..Default::default()
        });
        assert!(menu_requested(&frame));
        assert!(menu_requested(&frame));

        let mut frame = FrameInput::default();
        frame.channels[2].pad.substick = Stick::new(-71, 0);
        assert!(menu_requested(&frame));
        frame.channels[2].pad.substick = Stick::new(-70, 0);
        assert!(!menu_requested(&frame));
    }

    #[test]
    fn tablet_home_opens_menu() {
        let frame = FrameInput {
            tablet: Some(TabletState {
                buttons: ButtonState::held(T::HOME.bits()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(menu_requested(&frame));
    }

    #[test]
    fn turbo_only_reads_first_channel() {
        let mut frame = FrameInput::default();
        frame.channels[1].pad.buttons = ButtonState::held(P::A.bits());
        assert!(!turbo_held(&frame, TurboButton::A));
        frame.channels[0].pad.buttons = ButtonState::held(P::A.bits());
        assert!(turbo_held(&frame, TurboButton::A));
        assert!(!turbo_held(&frame, TurboButton::B));
    }

    #[test]
    fn right_stick_thresholds_differ_per_family() {
        let mut frame = FrameInput::default();
        frame.tablet = Some(TabletState {
            substick: Stick::new(46, 0),
            ..Default::default()
        });
        assert!(turbo_held(&frame, TurboButton::RightStick));

        let mut frame = FrameInput::default();
        frame.channels[0].pad.substick = Stick::new(70, 0);
        assert!(!turbo_held(&frame, TurboButton::RightStick));
        frame.channels[0].pad.substick = Stick::new(71, 0);
        assert!(turbo_held(&frame, TurboButton::RightStick));
    }

    #[test]
    fn nunchuk_buttons_need_a_nunchuk() {
        let mut frame = FrameInput::default();
        frame.channels[0].wpad = Some(WpadState {
            buttons: ButtonState::held(W::NUNCHUK_C.bits()),
            expansion: Expansion::Classic,
            ..Default::default()
        });
        assert!(!turbo_held(&frame, TurboButton::C));

        if let Some(wpad) = frame.channels[0].wpad.as_mut() {
            wpad.expansion = Expansion::Nunchuk;
        }
        assert!(turbo_held(&frame, TurboButton::C));
    }

    #[test]
    fn turbo_index_round_trip() {
        for button in TurboButton::ALL {
            assert_eq!(TurboButton::from_index(button.index()).unwrap(), button);
        }
        assert_eq!(
            TurboButton::from_index(15),
            Err(InputError::InvalidTurboButton(15))
        );
        assert_eq!(TurboButton::ALL.len(), ogx_core::config::TURBO_BUTTON_COUNT as usize);
    }
}
