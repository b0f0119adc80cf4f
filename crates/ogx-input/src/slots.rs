//! Slot assignment policy
//!
//! Decides which emulated joypad each physical channel drives and what is
//! plugged into the two SNES ports for the current [`EmulationMode`].

use ogx_core::config::{EmulationMode, InputConfig};
use ogx_core::error::InputError;

use crate::mapping::DeviceClass;
use crate::pointer::PointerSlot;
use crate::snapshot::MAX_CHANNELS;

/// Physical channel -> emulated joypad index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAssignment([u8; MAX_CHANNELS]);

impl SlotAssignment {
    /// Build an assignment, rejecting indices past the last joypad.
    pub fn new(mapping: [u8; MAX_CHANNELS]) -> Result<Self, InputError> {
        for (channel, &slot) in mapping.iter().enumerate() {
            if slot as usize >= MAX_CHANNELS {
                return Err(InputError::InvalidAssignment { channel, slot });
            }
        }
        Ok(Self(mapping))
    }

    /// Build an assignment, replacing invalid indices with the channel's own.
    pub fn clamped(mapping: [u8; MAX_CHANNELS]) -> Self {
        let mut fixed = mapping;
        for (channel, slot) in fixed.iter_mut().enumerate() {
            if *slot as usize >= MAX_CHANNELS {
                tracing::warn!("Channel {} mapped to invalid slot {}, using {}", channel, slot, channel);
                *slot = channel as u8;
            }
        }
        Self(fixed)
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::clamped(config.player_mapping)
    }

    /// Emulated joypad driven by `channel`; `None` past the last channel.
    pub fn slot_for(&self, channel: usize) -> Option<u8> {
        self.0.get(channel).copied()
    }

    pub fn as_array(&self) -> [u8; MAX_CHANNELS] {
        self.0
    }
}

impl Default for SlotAssignment {
    fn default() -> Self {
        Self([0, 1, 2, 3])
    }
}

/// What the emulation core plugs into one SNES port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDevice {
    Joypad(u8),
    /// Multitap carrying joypads 1, 2 and 3
    MultiTap,
    SuperScope,
    Mouse(u8),
    /// Pair of Justifiers
    Justifiers,
}

/// Devices on port 0 and port 1 for a mode.
pub fn ports(mode: EmulationMode) -> [PortDevice; 2] {
    match mode {
        EmulationMode::DualJoypad => [PortDevice::Joypad(0), PortDevice::Joypad(1)],
        EmulationMode::MultiTap5 => [PortDevice::Joypad(0), PortDevice::MultiTap],
        EmulationMode::SuperScope => [PortDevice::Joypad(0), PortDevice::SuperScope],
        EmulationMode::Mouse => [PortDevice::Mouse(0), PortDevice::Joypad(1)],
        EmulationMode::Justifier => [PortDevice::Joypad(0), PortDevice::Justifiers],
    }
}

/// Pointer device reported alongside emulated joypad `emu_slot`, if any.
/// The Super Scope and the mouse ride on slot 0, the Justifiers on 0 and 1.
pub fn pointer_device(mode: EmulationMode, emu_slot: usize) -> Option<(DeviceClass, PointerSlot)> {
    match mode {
        EmulationMode::SuperScope if emu_slot == 0 => {
            Some((DeviceClass::SuperScope, PointerSlot::SuperScope))
        }
        EmulationMode::Mouse if emu_slot == 0 => {
            Some((DeviceClass::Mouse, PointerSlot::mouse(emu_slot)))
        }
        EmulationMode::Justifier if emu_slot < 2 => {
            Some((DeviceClass::Justifier, PointerSlot::justifier(emu_slot)))
        }
        _ => None,
    }
}

/// One emulated joypad to decode this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPlan {
    pub emu_slot: usize,
    /// Every channel assigned to the slot, in channel order
    pub channels: Vec<usize>,
    pub pointer: Option<(DeviceClass, PointerSlot)>,
}

/// Emulated joypads to decode this frame, in slot order. Slots no channel
/// drives are skipped, as are channels mapped past the mode's joypad count.
pub fn plan(mode: EmulationMode, assignment: &SlotAssignment) -> Vec<SlotPlan> {
    (0..mode.joypad_count())
        .filter_map(|emu_slot| {
            let channels: Vec<usize> = (0..MAX_CHANNELS)
                .filter(|&channel| assignment.slot_for(channel) == Some(emu_slot as u8))
                .collect();
            (!channels.is_empty()).then(|| SlotPlan {
                emu_slot,
                channels,
                pointer: pointer_device(mode, emu_slot),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_slots() {
        assert_eq!(
            SlotAssignment::new([0, 1, 4, 3]),
            Err(InputError::InvalidAssignment { channel: 2, slot: 4 })
        );
        let assignment = SlotAssignment::new([3, 2, 1, 0]).unwrap();
        assert_eq!(assignment.slot_for(0), Some(3));
        assert_eq!(assignment.slot_for(4), None);
        assert_eq!(SlotAssignment::clamped([9, 0, 200, 1]).as_array(), [0, 0, 2, 1]);
    }

    #[test]
    fn ports_per_mode() {
        assert_eq!(ports(EmulationMode::DualJoypad), [PortDevice::Joypad(0), PortDevice::Joypad(1)]);
        assert_eq!(ports(EmulationMode::MultiTap5)[1], PortDevice::MultiTap);
        assert_eq!(ports(EmulationMode::Mouse), [PortDevice::Mouse(0), PortDevice::Joypad(1)]);
        assert_eq!(ports(EmulationMode::Justifier)[1], PortDevice::Justifiers);
    }

    #[test]
    fn plan_skips_inactive_slots() {
        let assignment = SlotAssignment::default();
        let slots: Vec<usize> = plan(EmulationMode::DualJoypad, &assignment)
            .iter()
            .map(|p| p.emu_slot)
            .collect();
        assert_eq!(slots, vec![0, 1]);
        assert_eq!(plan(EmulationMode::MultiTap5, &assignment).len(), 4);
    }

    #[test]
    fn plan_groups_shared_slots() {
        let shared = SlotAssignment::new([0, 0, 3, 1]).unwrap();
        let grouped = plan(EmulationMode::DualJoypad, &shared);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].emu_slot, 0);
        assert_eq!(grouped[0].channels, vec![0, 1]);
        assert_eq!(grouped[1].emu_slot, 1);
        assert_eq!(grouped[1].channels, vec![3]);

        // Nothing drives slot 2.
        let slots: Vec<usize> = plan(EmulationMode::MultiTap5, &shared)
            .iter()
            .map(|p| p.emu_slot)
            .collect();
        assert_eq!(slots, vec![0, 1, 3]);
    }

    #[test]
    fn pointer_devices_follow_mode() {
        assert_eq!(
            pointer_device(EmulationMode::SuperScope, 0),
            Some((DeviceClass::SuperScope, PointerSlot::SuperScope))
        );
        assert_eq!(pointer_device(EmulationMode::SuperScope, 1), None);
        assert_eq!(pointer_device(EmulationMode::Mouse, 1), None);
        assert_eq!(
            pointer_device(EmulationMode::Justifier, 1),
            Some((DeviceClass::Justifier, PointerSlot::Justifier2))
        );
        assert_eq!(pointer_device(EmulationMode::DualJoypad, 0), None);
        assert_eq!(pointer_device(EmulationMode::MultiTap5, 0), None);
    }
}
