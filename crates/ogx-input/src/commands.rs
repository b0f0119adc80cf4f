//! Codes the emulation core listens on
//!
//! Every logical button and pointer the decoder reports is identified by a
//! small integer code. [`default_bindings`] pairs each code with the core's
//! command name so a host can fill its command table in one pass.

use crate::mapping::DeviceClass;
use crate::pointer::PointerSlot;

pub const SCOPE_BASE: u16 = 0x50;
pub const MOUSE_BASE: u16 = 0x60;
pub const JUSTIFIER_BASE: u16 = 0x70;
pub const POINTER_BASE: u16 = 0x80;
pub const SCREENSHOT: u16 = 0x90;

/// Superscope slots that toggle turbo rather than report a button.
pub const SCOPE_TURBO_ON: usize = 3;
pub const SCOPE_TURBO_OFF: usize = 4;

pub const JOYPAD_BUTTONS: [&str; 12] = [
    "A", "B", "X", "Y", "L", "R", "Start", "Select", "Up", "Down", "Left", "Right",
];
pub const SCOPE_BUTTONS: [&str; 6] = [
    "Fire", "AimOffscreen", "Cursor", "ToggleTurbo", "ToggleTurbo", "Pause",
];
pub const MOUSE_BUTTONS: [&str; 2] = ["L", "R"];
pub const JUSTIFIER_BUTTONS: [&str; 3] = ["Trigger", "AimOffscreen", "Start"];

/// Code of joypad button `button` on emulated joypad `slot`.
pub fn joypad_code(slot: usize, button: usize) -> u16 {
    (((slot + 1) << 4) + button) as u16
}

/// First code of `class` on emulated slot `emu_slot`.
pub fn button_base(class: DeviceClass, emu_slot: usize) -> u16 {
    match class {
        DeviceClass::Joypad => joypad_code(emu_slot, 0),
        DeviceClass::SuperScope => SCOPE_BASE,
        DeviceClass::Mouse => MOUSE_BASE + 2 * emu_slot as u16,
        DeviceClass::Justifier => JUSTIFIER_BASE + 3 * emu_slot as u16,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Button,
    Pointer,
}

/// One entry of the emulation core's command table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub code: u16,
    pub command: String,
    pub kind: BindingKind,
}

impl Binding {
    fn button(code: u16, command: String) -> Self {
        Self { code, command, kind: BindingKind::Button }
    }
}

/// Every code the decoder can report, with its command name.
pub fn default_bindings() -> Vec<Binding> {
    let mut bindings = Vec::new();

    for slot in 0..4 {
        for (i, name) in JOYPAD_BUTTONS.iter().enumerate() {
            bindings.push(Binding::button(
                joypad_code(slot, i),
                format!("Joypad{} {}", slot + 1, name),
            ));
        }
    }

    for (i, name) in SCOPE_BUTTONS.iter().enumerate() {
        bindings.push(Binding::button(SCOPE_BASE + i as u16, format!("Superscope {}", name)));
    }

    for slot in 0..2 {
        let base = button_base(DeviceClass::Mouse, slot);
        for (i, name) in MOUSE_BUTTONS.iter().enumerate() {
            bindings.push(Binding::button(base + i as u16, format!("Mouse{} {}", slot + 1, name)));
        }
    }

    for slot in 0..2 {
        let base = button_base(DeviceClass::Justifier, slot);
        for (i, name) in JUSTIFIER_BUTTONS.iter().enumerate() {
            bindings.push(Binding::button(
                base + i as u16,
                format!("Justifier{} {}", slot + 1, name),
            ));
        }
    }

    for slot in PointerSlot::ALL {
        let device = match slot {
            PointerSlot::SuperScope => "Superscope",
            PointerSlot::Mouse1 => "Mouse1",
            PointerSlot::Mouse2 => "Mouse2",
            PointerSlot::Justifier1 => "Justifier1",
            PointerSlot::Justifier2 => "Justifier2",
        };
        bindings.push(Binding {
            code: slot.code(),
            command: format!("Pointer {}", device),
            kind: BindingKind::Pointer,
        });
    }

    bindings.push(Binding::button(SCREENSHOT, "Screenshot".to_string()));
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(code: u16) -> Option<String> {
        default_bindings()
            .into_iter()
            .find(|b| b.code == code)
            .map(|b| b.command)
    }

    #[test]
    fn joypad_codes() {
        assert_eq!(joypad_code(0, 0), 0x10);
        assert_eq!(joypad_code(3, 11), 0x4B);
        assert_eq!(command(0x2B).as_deref(), Some("Joypad2 Right"));
        assert_eq!(command(0x17).as_deref(), Some("Joypad1 Select"));
    }

    #[test]
    fn peripheral_codes() {
        assert_eq!(button_base(DeviceClass::Mouse, 1), 0x62);
        assert_eq!(button_base(DeviceClass::Justifier, 1), 0x73);
        assert_eq!(command(0x55).as_deref(), Some("Superscope Pause"));
        assert_eq!(command(0x63).as_deref(), Some("Mouse2 R"));
        assert_eq!(command(0x75).as_deref(), Some("Justifier2 Start"));
        assert_eq!(command(0x84).as_deref(), Some("Pointer Justifier2"));
        assert_eq!(command(0x90).as_deref(), Some("Screenshot"));
    }

    #[test]
    fn codes_are_unique() {
        let bindings = default_bindings();
        assert_eq!(bindings.len(), 48 + 6 + 4 + 6 + 5 + 1);
        let mut codes: Vec<u16> = bindings.iter().map(|b| b.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), bindings.len());
        assert_eq!(
            bindings.iter().filter(|b| b.kind == BindingKind::Pointer).count(),
            5
        );
    }
}
