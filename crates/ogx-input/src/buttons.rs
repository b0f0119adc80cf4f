//! Physical button layouts
//!
//! Every physical controller family reports its digital state as a `u32`
//! bitmask. The constants below name the bits of each family; the button map
//! stores raw masks built from them.

use bitflags::bitflags;

bitflags! {
    /// Native gamepad buttons. Third-party USB adapters and the bridged
    /// motion controller report in this layout as well.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PadButtons: u32 {
        const LEFT      = 0x0001;
        const RIGHT     = 0x0002;
        const DOWN      = 0x0004;
        const UP        = 0x0008;
        const TRIGGER_Z = 0x0010;
        const TRIGGER_R = 0x0020;
        const TRIGGER_L = 0x0040;
        const A         = 0x0100;
        const B         = 0x0200;
        const X         = 0x0400;
        const Y         = 0x0800;
        const START     = 0x1000;
    }
}

bitflags! {
    /// Wireless remote buttons.
    ///
    /// The low half holds the remote itself, the high half holds whichever
    /// expansion is attached. Nunchuk and classic bits overlap, so the
    /// expansion type decides how the high half is read.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WpadButtons: u32 {
        const TWO   = 0x0001;
        const ONE   = 0x0002;
        const B     = 0x0004;
        const A     = 0x0008;
        const MINUS = 0x0010;
        const HOME  = 0x0080;
        const LEFT  = 0x0100;
        const RIGHT = 0x0200;
        const DOWN  = 0x0400;
        const UP    = 0x0800;
        const PLUS  = 0x1000;

        const NUNCHUK_Z = 0x0001 << 16;
        const NUNCHUK_C = 0x0002 << 16;

        const CLASSIC_UP     = 0x0001 << 16;
        const CLASSIC_LEFT   = 0x0002 << 16;
        const CLASSIC_ZR     = 0x0004 << 16;
        const CLASSIC_X      = 0x0008 << 16;
        const CLASSIC_A      = 0x0010 << 16;
        const CLASSIC_Y      = 0x0020 << 16;
        const CLASSIC_B      = 0x0040 << 16;
        const CLASSIC_ZL     = 0x0080 << 16;
        const CLASSIC_FULL_R = 0x0200 << 16;
        const CLASSIC_PLUS   = 0x0400 << 16;
        const CLASSIC_HOME   = 0x0800 << 16;
        const CLASSIC_MINUS  = 0x1000 << 16;
        const CLASSIC_FULL_L = 0x2000 << 16;
        const CLASSIC_DOWN   = 0x4000 << 16;
        const CLASSIC_RIGHT  = 0x8000 << 16;
    }
}

bitflags! {
    /// Tablet gamepad buttons
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TabletButtons: u32 {
        const SYNC  = 0x0001;
        const HOME  = 0x0002;
        const MINUS = 0x0004;
        const PLUS  = 0x0008;
        const R     = 0x0010;
        const L     = 0x0020;
        const ZR    = 0x0040;
        const ZL    = 0x0080;
        const DOWN  = 0x0100;
        const UP    = 0x0200;
        const RIGHT = 0x0400;
        const LEFT  = 0x0800;
        const Y     = 0x1000;
        const X     = 0x2000;
        const B     = 0x4000;
        const A     = 0x8000;
    }
}

/// Directions synthesised from an analog stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    /// Direction bits of a button family.
    pub fn to_bits(self, layout: DirectionBits) -> u32 {
        let mut bits = 0;
        if self.up {
            bits |= layout.up;
        }
        if self.down {
            bits |= layout.down;
        }
        if self.left {
            bits |= layout.left;
        }
        if self.right {
            bits |= layout.right;
        }
        bits
    }

    pub fn any(self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Where a family keeps its d-pad bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionBits {
    pub up: u32,
    pub down: u32,
    pub left: u32,
    pub right: u32,
}

pub const PAD_DIRECTIONS: DirectionBits = DirectionBits {
    up: PadButtons::UP.bits(),
    down: PadButtons::DOWN.bits(),
    left: PadButtons::LEFT.bits(),
    right: PadButtons::RIGHT.bits(),
};

pub const WPAD_DIRECTIONS: DirectionBits = DirectionBits {
    up: WpadButtons::UP.bits(),
    down: WpadButtons::DOWN.bits(),
    left: WpadButtons::LEFT.bits(),
    right: WpadButtons::RIGHT.bits(),
};

pub const CLASSIC_DIRECTIONS: DirectionBits = DirectionBits {
    up: WpadButtons::CLASSIC_UP.bits(),
    down: WpadButtons::CLASSIC_DOWN.bits(),
    left: WpadButtons::CLASSIC_LEFT.bits(),
    right: WpadButtons::CLASSIC_RIGHT.bits(),
};

pub const TABLET_DIRECTIONS: DirectionBits = DirectionBits {
    up: TabletButtons::UP.bits(),
    down: TabletButtons::DOWN.bits(),
    left: TabletButtons::LEFT.bits(),
    right: TabletButtons::RIGHT.bits(),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_bits_share_the_high_half() {
        assert_eq!(WpadButtons::NUNCHUK_Z.bits(), WpadButtons::CLASSIC_UP.bits());
        assert_eq!(WpadButtons::all().bits() & 0xFFFF, 0x1F9F);
    }

    #[test]
    fn directions_pick_family_bits() {
        let dirs = Directions { up: true, right: true, ..Default::default() };
        assert_eq!(dirs.to_bits(PAD_DIRECTIONS), (PadButtons::UP | PadButtons::RIGHT).bits());
        assert_eq!(
            dirs.to_bits(CLASSIC_DIRECTIONS),
            (WpadButtons::CLASSIC_UP | WpadButtons::CLASSIC_RIGHT).bits()
        );
        assert!(!Directions::default().any());
    }
}
