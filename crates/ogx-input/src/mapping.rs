//! Button map table
//!
//! A fixed (device class x controller type x logical slot) array of physical
//! button masks. A zero entry is unmapped and never matches.

use ogx_core::config::ButtonMapEntry;
use ogx_core::error::InputError;

use crate::buttons::{PadButtons as P, TabletButtons as T, WpadButtons as W};

/// Largest number of logical buttons any device class has.
pub const MAX_BUTTONS: usize = 12;

const CLASS_COUNT: usize = 4;
const TYPE_COUNT: usize = 6;

/// Emulated device class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Joypad,
    SuperScope,
    Mouse,
    Justifier,
}

impl DeviceClass {
    pub const ALL: [DeviceClass; CLASS_COUNT] = [
        DeviceClass::Joypad,
        DeviceClass::SuperScope,
        DeviceClass::Mouse,
        DeviceClass::Justifier,
    ];

    /// Logical buttons this class reports.
    pub fn button_count(self) -> usize {
        match self {
            DeviceClass::Joypad => 12,
            DeviceClass::SuperScope => 6,
            DeviceClass::Mouse => 2,
            DeviceClass::Justifier => 3,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            DeviceClass::Joypad => "pad",
            DeviceClass::SuperScope => "scope",
            DeviceClass::Mouse => "mouse",
            DeviceClass::Justifier => "just",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DeviceClass::Joypad => "SNES Pad",
            DeviceClass::SuperScope => "Super Scope",
            DeviceClass::Mouse => "Mouse",
            DeviceClass::Justifier => "Justifier",
        }
    }
}

/// Physical controller type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerType {
    /// Native gamepad (also USB adapters and the bridged DualShock 3)
    GcPad,
    /// Wireless remote held sideways, no expansion
    Wiimote,
    /// Remote with nunchuk
    Nunchuk,
    /// Remote with classic controller
    Classic,
    /// Pro controller (reports as a classic expansion)
    WiiUPro,
    /// Tablet gamepad
    Tablet,
}

impl ControllerType {
    pub const ALL: [ControllerType; TYPE_COUNT] = [
        ControllerType::GcPad,
        ControllerType::Wiimote,
        ControllerType::Nunchuk,
        ControllerType::Classic,
        ControllerType::WiiUPro,
        ControllerType::Tablet,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ControllerType::GcPad => "gcpad",
            ControllerType::Wiimote => "wiimote",
            ControllerType::Nunchuk => "nunchuk",
            ControllerType::Classic => "classic",
            ControllerType::WiiUPro => "wupc",
            ControllerType::Tablet => "wiidrc",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ControllerType::GcPad => "GameCube Controller",
            ControllerType::Wiimote => "Wiimote",
            ControllerType::Nunchuk => "Nunchuk + Wiimote",
            ControllerType::Classic => "Classic Controller",
            ControllerType::WiiUPro => "Wii U Pro Controller",
            ControllerType::Tablet => "Wii U Gamepad",
        }
    }
}

/// Persisted key of a table slice, e.g. `btnmap_pad_gcpad`.
pub fn slice_key(class: DeviceClass, ty: ControllerType) -> String {
    format!("btnmap_{}_{}", class.key(), ty.key())
}

/// Human readable description of a table slice.
pub fn slice_description(class: DeviceClass, ty: ControllerType) -> String {
    format!("{} - {}", class.name(), ty.name())
}

/// Look up the (class, type) pair a persisted key refers to.
pub fn parse_slice_key(key: &str) -> Result<(DeviceClass, ControllerType), InputError> {
    DeviceClass::ALL
        .iter()
        .flat_map(|&class| ControllerType::ALL.iter().map(move |&ty| (class, ty)))
        .find(|&(class, ty)| slice_key(class, ty) == key)
        .ok_or_else(|| InputError::UnknownMapKey(key.to_string()))
}

/// Factory default masks for one slice. Pairs without a default are empty.
fn defaults(class: DeviceClass, ty: ControllerType) -> &'static [u32] {
    use ControllerType as C;
    use DeviceClass as D;

    const PAD_GCPAD: [u32; 12] = [
        P::A.bits(), P::B.bits(), P::X.bits(), P::Y.bits(),
        P::TRIGGER_L.bits(), P::TRIGGER_R.bits(), P::START.bits(), P::TRIGGER_Z.bits(),
        P::UP.bits(), P::DOWN.bits(), P::LEFT.bits(), P::RIGHT.bits(),
    ];
    // Remote held sideways: the d-pad is rotated a quarter turn.
    const PAD_WIIMOTE: [u32; 12] = [
        W::B.bits(), W::TWO.bits(), W::ONE.bits(), W::A.bits(),
        0, 0, W::PLUS.bits(), W::MINUS.bits(),
        W::RIGHT.bits(), W::LEFT.bits(), W::UP.bits(), W::DOWN.bits(),
    ];
    const PAD_CLASSIC: [u32; 12] = [
        W::CLASSIC_A.bits(), W::CLASSIC_B.bits(), W::CLASSIC_X.bits(), W::CLASSIC_Y.bits(),
        W::CLASSIC_FULL_L.bits(), W::CLASSIC_FULL_R.bits(), W::CLASSIC_PLUS.bits(), W::CLASSIC_MINUS.bits(),
        W::CLASSIC_UP.bits(), W::CLASSIC_DOWN.bits(), W::CLASSIC_LEFT.bits(), W::CLASSIC_RIGHT.bits(),
    ];
    const PAD_TABLET: [u32; 12] = [
        T::A.bits(), T::B.bits(), T::X.bits(), T::Y.bits(),
        T::L.bits(), T::R.bits(), T::PLUS.bits(), T::MINUS.bits(),
        T::UP.bits(), T::DOWN.bits(), T::LEFT.bits(), T::RIGHT.bits(),
    ];
    const PAD_NUNCHUK: [u32; 12] = [
        W::A.bits(), W::B.bits(), W::NUNCHUK_C.bits(), W::NUNCHUK_Z.bits(),
        W::TWO.bits(), W::ONE.bits(), W::PLUS.bits(), W::MINUS.bits(),
        W::UP.bits(), W::DOWN.bits(), W::LEFT.bits(), W::RIGHT.bits(),
    ];

    // Fire, AimOffscreen, Cursor, TurboOn, TurboOff, Pause
    const SCOPE_GCPAD: [u32; 6] = [
        P::A.bits(), P::B.bits(), P::TRIGGER_Z.bits(), P::Y.bits(), P::X.bits(), P::START.bits(),
    ];
    const SCOPE_WIIMOTE: [u32; 6] = [
        W::B.bits(), W::A.bits(), W::MINUS.bits(), W::UP.bits(), W::DOWN.bits(), W::PLUS.bits(),
    ];
    const SCOPE_CLASSIC: [u32; 6] = [
        W::CLASSIC_B.bits(), W::CLASSIC_A.bits(), W::CLASSIC_MINUS.bits(),
        W::CLASSIC_Y.bits(), W::CLASSIC_X.bits(), W::CLASSIC_PLUS.bits(),
    ];
    const SCOPE_TABLET: [u32; 6] = [
        T::B.bits(), T::A.bits(), T::MINUS.bits(), T::Y.bits(), T::X.bits(), T::PLUS.bits(),
    ];

    const MOUSE_GCPAD: [u32; 2] = [P::A.bits(), P::B.bits()];
    const MOUSE_WIIMOTE: [u32; 2] = [W::A.bits(), W::B.bits()];
    const MOUSE_CLASSIC: [u32; 2] = [W::CLASSIC_B.bits(), W::CLASSIC_A.bits()];
    const MOUSE_TABLET: [u32; 2] = [T::B.bits(), T::A.bits()];

    // Trigger, AimOffscreen, Start
    const JUST_GCPAD: [u32; 3] = [P::A.bits(), P::B.bits(), P::START.bits()];
    const JUST_WIIMOTE: [u32; 3] = [W::B.bits(), W::A.bits(), W::PLUS.bits()];
    const JUST_CLASSIC: [u32; 3] = [
        W::CLASSIC_B.bits(), W::CLASSIC_A.bits(), W::CLASSIC_PLUS.bits(),
    ];
    const JUST_TABLET: [u32; 3] = [T::B.bits(), T::A.bits(), T::PLUS.bits()];

    match (class, ty) {
        (D::Joypad, C::GcPad) => &PAD_GCPAD,
        (D::Joypad, C::Wiimote) => &PAD_WIIMOTE,
        (D::Joypad, C::Classic | C::WiiUPro) => &PAD_CLASSIC,
        (D::Joypad, C::Tablet) => &PAD_TABLET,
        (D::Joypad, C::Nunchuk) => &PAD_NUNCHUK,

        (D::SuperScope, C::GcPad) => &SCOPE_GCPAD,
        (D::SuperScope, C::Wiimote) => &SCOPE_WIIMOTE,
        (D::SuperScope, C::Classic | C::WiiUPro) => &SCOPE_CLASSIC,
        (D::SuperScope, C::Tablet) => &SCOPE_TABLET,

        (D::Mouse, C::GcPad) => &MOUSE_GCPAD,
        (D::Mouse, C::Wiimote) => &MOUSE_WIIMOTE,
        (D::Mouse, C::Classic | C::WiiUPro) => &MOUSE_CLASSIC,
        (D::Mouse, C::Tablet) => &MOUSE_TABLET,

        (D::Justifier, C::GcPad) => &JUST_GCPAD,
        (D::Justifier, C::Wiimote) => &JUST_WIIMOTE,
        (D::Justifier, C::Classic | C::WiiUPro) => &JUST_CLASSIC,
        (D::Justifier, C::Tablet) => &JUST_TABLET,

        (_, C::Nunchuk) => &[],
    }
}

/// Button map for every (device class, controller type) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonMap {
    table: [[[u32; MAX_BUTTONS]; TYPE_COUNT]; CLASS_COUNT],
}

impl ButtonMap {
    /// Table with every pair set to its factory default.
    pub fn new() -> Self {
        let mut map = Self::empty();
        map.reset_controls(None, None);
        map
    }

    /// Table with every entry unmapped.
    pub fn empty() -> Self {
        Self {
            table: [[[0; MAX_BUTTONS]; TYPE_COUNT]; CLASS_COUNT],
        }
    }

    /// Restore factory defaults for every pair matching the filters.
    ///
    /// `None` matches every value in that dimension. Entries outside the
    /// filters keep any customisation.
    pub fn reset_controls(&mut self, class: Option<DeviceClass>, ty: Option<ControllerType>) {
        for c in DeviceClass::ALL {
            if class.is_some_and(|want| want != c) {
                continue;
            }
            for t in ControllerType::ALL {
                if ty.is_some_and(|want| want != t) {
                    continue;
                }
                let slice = &mut self.table[c as usize][t as usize];
                let defaults = defaults(c, t);
                slice[..defaults.len()].copy_from_slice(defaults);
            }
        }
        tracing::debug!("Reset button map (class: {:?}, type: {:?})", class, ty);
    }

    /// Physical mask for one logical slot; 0 when unmapped or out of range.
    pub fn get(&self, class: DeviceClass, ty: ControllerType, slot: usize) -> u32 {
        self.table[class as usize][ty as usize]
            .get(slot)
            .copied()
            .unwrap_or(0)
    }

    /// Remap one logical slot. Slots past the table width are ignored.
    pub fn set(&mut self, class: DeviceClass, ty: ControllerType, slot: usize, mask: u32) {
        if let Some(entry) = self.table[class as usize][ty as usize].get_mut(slot) {
            *entry = mask;
        }
    }

    pub fn slice(&self, class: DeviceClass, ty: ControllerType) -> &[u32; MAX_BUTTONS] {
        &self.table[class as usize][ty as usize]
    }

    /// Overwrite a slice from persisted values. Extra values are ignored and
    /// missing ones leave the current entries alone.
    pub fn load_slice(&mut self, class: DeviceClass, ty: ControllerType, values: &[u32]) {
        let slice = &mut self.table[class as usize][ty as usize];
        for (entry, value) in slice.iter_mut().zip(values) {
            *entry = *value;
        }
    }

    /// True when `held` hits the mask of this slot.
    pub fn matches(&self, class: DeviceClass, ty: ControllerType, slot: usize, held: u32) -> bool {
        held & self.get(class, ty, slot) != 0
    }

    /// Persisted form of every slice, trimmed to the class's button count.
    pub fn export(&self) -> Vec<ButtonMapEntry> {
        let mut entries = Vec::with_capacity(CLASS_COUNT * TYPE_COUNT);
        for class in DeviceClass::ALL {
            for ty in ControllerType::ALL {
                entries.push(ButtonMapEntry {
                    name: slice_key(class, ty),
                    buttons: self.slice(class, ty)[..class.button_count()].to_vec(),
                });
            }
        }
        entries
    }

    /// Overwrite slices named by persisted entries. Unknown keys are skipped
    /// and returned so the caller can report them.
    pub fn apply_persisted(&mut self, entries: &[ButtonMapEntry]) -> Vec<InputError> {
        let mut rejected = Vec::new();
        for entry in entries {
            match parse_slice_key(&entry.name) {
                Ok((class, ty)) => self.load_slice(class, ty, &entry.buttons),
                Err(err) => {
                    tracing::warn!("Skipping persisted button map: {}", err);
                    rejected.push(err);
                }
            }
        }
        rejected
    }
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_snes_layout() {
        let map = ButtonMap::new();
        assert_eq!(map.get(DeviceClass::Joypad, ControllerType::GcPad, 0), P::A.bits());
        assert_eq!(map.get(DeviceClass::Joypad, ControllerType::GcPad, 11), P::RIGHT.bits());
        assert_eq!(map.get(DeviceClass::Joypad, ControllerType::Wiimote, 8), W::RIGHT.bits());
        assert_eq!(
            map.slice(DeviceClass::Joypad, ControllerType::WiiUPro),
            map.slice(DeviceClass::Joypad, ControllerType::Classic)
        );
    }

    #[test]
    fn unpopulated_entries_stay_zero() {
        let map = ButtonMap::new();
        // Remote alone has no shoulder buttons.
        assert_eq!(map.get(DeviceClass::Joypad, ControllerType::Wiimote, 4), 0);
        assert_eq!(map.get(DeviceClass::Joypad, ControllerType::Wiimote, 5), 0);
        for class in [DeviceClass::SuperScope, DeviceClass::Mouse, DeviceClass::Justifier] {
            assert!(map.slice(class, ControllerType::Nunchuk).iter().all(|&m| m == 0));
            for slot in class.button_count()..MAX_BUTTONS {
                assert_eq!(map.get(class, ControllerType::GcPad, slot), 0);
            }
        }
        assert!(!map.matches(DeviceClass::Joypad, ControllerType::Wiimote, 4, u32::MAX));
    }

    #[test]
    fn narrow_reset_keeps_other_customisations() {
        let mut map = ButtonMap::new();
        map.set(DeviceClass::Joypad, ControllerType::GcPad, 0, P::X.bits());
        map.set(DeviceClass::Mouse, ControllerType::Wiimote, 0, W::TWO.bits());

        map.reset_controls(Some(DeviceClass::Joypad), Some(ControllerType::GcPad));
        assert_eq!(map.get(DeviceClass::Joypad, ControllerType::GcPad, 0), P::A.bits());
        assert_eq!(map.get(DeviceClass::Mouse, ControllerType::Wiimote, 0), W::TWO.bits());

        map.reset_controls(None, None);
        assert_eq!(map, ButtonMap::new());
    }

    #[test]
    fn class_only_filter_resets_every_type() {
        let mut map = ButtonMap::empty();
        map.reset_controls(Some(DeviceClass::Mouse), None);
        assert_eq!(map.get(DeviceClass::Mouse, ControllerType::Tablet, 0), T::B.bits());
        assert_eq!(map.get(DeviceClass::Joypad, ControllerType::GcPad, 0), 0);
    }

    #[test]
    fn slice_keys_round_trip() {
        assert_eq!(slice_key(DeviceClass::Justifier, ControllerType::Wiimote), "btnmap_just_wiimote");
        assert_eq!(
            parse_slice_key("btnmap_pad_wiidrc").unwrap(),
            (DeviceClass::Joypad, ControllerType::Tablet)
        );
        assert_eq!(
            parse_slice_key("btnmap_pad_keyboard"),
            Err(InputError::UnknownMapKey("btnmap_pad_keyboard".to_string()))
        );
        assert_eq!(
            slice_description(DeviceClass::Joypad, ControllerType::Nunchuk),
            "SNES Pad - Nunchuk + Wiimote"
        );
    }

    #[test]
    fn persisted_slices_overwrite_table() {
        let mut map = ButtonMap::new();
        let entries = vec![
            ButtonMapEntry {
                name: "btnmap_scope_gcpad".to_string(),
                buttons: vec![P::B.bits(), P::A.bits()],
            },
            ButtonMapEntry {
                name: "btnmap_bogus".to_string(),
                buttons: vec![1],
            },
        ];
        let rejected = map.apply_persisted(&entries);
        assert_eq!(rejected.len(), 1);
        assert_eq!(map.get(DeviceClass::SuperScope, ControllerType::GcPad, 0), P::B.bits());
        assert_eq!(map.get(DeviceClass::SuperScope, ControllerType::GcPad, 1), P::A.bits());
        // Short slice leaves the rest alone.
        assert_eq!(map.get(DeviceClass::SuperScope, ControllerType::GcPad, 5), P::START.bits());
    }

    #[test]
    fn export_then_apply_restores_customisations() {
        let mut custom = ButtonMap::new();
        custom.set(DeviceClass::Joypad, ControllerType::Classic, 3, W::CLASSIC_ZL.bits());
        let exported = custom.export();
        assert_eq!(exported.len(), 24);

        let mut fresh = ButtonMap::new();
        assert!(fresh.apply_persisted(&exported).is_empty());
        assert_eq!(fresh, custom);
    }
}
