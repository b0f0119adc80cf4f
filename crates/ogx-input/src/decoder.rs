//! Frame decoder
//!
//! Once per rendered frame the host hands [`FrameDecoder::decode_frame`] a
//! [`FrameInput`]. Every physical channel assigned to an active emulated
//! joypad is normalised, matched against the button map and reported to an
//! [`InputSink`]. Devices stacked on one channel, and channels sharing one
//! joypad, are OR-ed; none takes precedence over another.

use std::fmt;

use ogx_core::config::{EmulationMode, InputConfig};
use ogx_core::{input_debug, input_trace};

use crate::analog::{normalize_channel, NormalizedChannel, NormalizedWpad};
use crate::buttons::WpadButtons;
use crate::commands::{
    button_base, joypad_code, SCOPE_TURBO_OFF, SCOPE_TURBO_ON, SCREENSHOT,
};
use crate::gesture::{menu_requested, turbo_held, TurboButton};
use crate::mapping::{ButtonMap, ControllerType, DeviceClass, MAX_BUTTONS};
use crate::pointer::{CursorState, PointerSlot, PointerSpace};
use crate::slots::{plan, ports, PortDevice, SlotAssignment, SlotPlan};
use crate::snapshot::{ChannelInput, Expansion, FrameInput};

/// Receiver of decoded input, normally the emulation core.
pub trait InputSink {
    /// Report the state of one logical button for this frame.
    fn report_button(&mut self, code: u16, pressed: bool);

    /// Report a pointer position in SNES picture coordinates.
    fn report_pointer(&mut self, code: u16, x: u16, y: u16);

    /// Plug a device into a SNES port.
    fn set_controller(&mut self, port: usize, device: PortDevice) {
        let _ = (port, device);
    }
}

/// Event captured by [`RecordingSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Button { code: u16, pressed: bool },
    Pointer { code: u16, x: u16, y: u16 },
    Controller { port: usize, device: PortDevice },
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::Button { code, pressed } => {
                write!(f, "button 0x{:02x} {}", code, if *pressed { "down" } else { "up" })
            }
            InputEvent::Pointer { code, x, y } => write!(f, "pointer 0x{:02x} ({}, {})", code, x, y),
            InputEvent::Controller { port, device } => write!(f, "port {} <- {:?}", port, device),
        }
    }
}

/// Sink that keeps every event in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<InputEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Hand over the recorded events and start afresh.
    pub fn take(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Every state reported for a button code, oldest first.
    pub fn button_reports(&self, code: u16) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                InputEvent::Button { code: c, pressed } if c == code => Some(pressed),
                _ => None,
            })
            .collect()
    }

    /// Last position reported for a pointer code.
    pub fn last_pointer(&self, code: u16) -> Option<(u16, u16)> {
        self.events.iter().rev().find_map(|event| match *event {
            InputEvent::Pointer { code: c, x, y } if c == code => Some((x, y)),
            _ => None,
        })
    }
}

impl InputSink for RecordingSink {
    fn report_button(&mut self, code: u16, pressed: bool) {
        self.events.push(InputEvent::Button { code, pressed });
    }

    fn report_pointer(&mut self, code: u16, x: u16, y: u16) {
        self.events.push(InputEvent::Pointer { code, x, y });
    }

    fn set_controller(&mut self, port: usize, device: PortDevice) {
        self.events.push(InputEvent::Controller { port, device });
    }
}

/// Super Scope turbo toggle, so that holding a toggle fires it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurboLatch {
    /// Nothing toggled since power on; the scope starts with turbo off
    #[default]
    Off,
    FireOn,
    FireOff,
}

impl TurboLatch {
    pub fn is_on(self) -> bool {
        self == TurboLatch::FireOn
    }

    /// Feed a held toggle slot; returns whether to report it pressed.
    pub fn apply(&mut self, slot: usize) -> bool {
        let target = if slot == SCOPE_TURBO_ON {
            TurboLatch::FireOn
        } else {
            TurboLatch::FireOff
        };
        let already = match target {
            TurboLatch::FireOn => self.is_on(),
            _ => !self.is_on(),
        };
        if already {
            false
        } else {
            input_debug!("Super Scope turbo {:?} -> {:?}", self, target);
            *self = target;
            true
        }
    }
}

/// Per-frame settings, resolved from [`InputConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSettings {
    pub mode: EmulationMode,
    pub assignment: SlotAssignment,
    pub turbo_enabled: bool,
    pub turbo_button: TurboButton,
    pub sound_sync: bool,
    pub pointer_space: PointerSpace,
}

impl DecodeSettings {
    pub fn from_config(config: &InputConfig) -> Self {
        let turbo_button = TurboButton::from_index(config.turbo_mode_button).unwrap_or_else(|err| {
            tracing::warn!("{}, using the right stick", err);
            TurboButton::default()
        });
        Self {
            mode: config.mode,
            assignment: SlotAssignment::from_config(config),
            turbo_enabled: config.turbo_mode_enabled,
            turbo_button,
            sound_sync: config.sound_sync,
            pointer_space: PointerSpace::new(config.pointer_space.0, config.pointer_space.1),
        }
    }
}

impl Default for DecodeSettings {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}

/// Host-facing results of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// The player asked for the menu
    pub menu_requested: bool,
    /// Turbo (fast forward) is engaged this frame
    pub turbo_active: bool,
    /// Whether audio should pace emulation this frame
    pub sound_sync: bool,
}

/// Owns the button map, the cursors and the turbo latch across frames.
#[derive(Debug, Clone, Default)]
pub struct FrameDecoder {
    map: ButtonMap,
    cursors: CursorState,
    latch: TurboLatch,
    /// Mode last pushed to the sink
    ports_mode: Option<EmulationMode>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map(map: ButtonMap) -> Self {
        Self {
            map,
            ..Self::default()
        }
    }

    /// Decoder with the factory map overlaid by the persisted slices.
    pub fn from_config(config: &InputConfig) -> Self {
        let mut map = ButtonMap::new();
        map.apply_persisted(&config.button_maps);
        Self::with_map(map)
    }

    pub fn map(&self) -> &ButtonMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut ButtonMap {
        &mut self.map
    }

    pub fn cursors(&self) -> &CursorState {
        &self.cursors
    }

    pub fn latch(&self) -> TurboLatch {
        self.latch
    }

    /// Plug the mode's devices into both SNES ports.
    pub fn set_controllers<S: InputSink + ?Sized>(&mut self, mode: EmulationMode, sink: &mut S) {
        input_debug!("Emulation mode {:?}", mode);
        for (port, device) in ports(mode).into_iter().enumerate() {
            sink.set_controller(port, device);
        }
        self.ports_mode = Some(mode);
    }

    /// Decode one frame and report it to `sink`.
    pub fn decode_frame<S: InputSink + ?Sized>(
        &mut self,
        frame: &FrameInput,
        settings: &DecodeSettings,
        sink: &mut S,
    ) -> FrameOutcome {
        if self.ports_mode != Some(settings.mode) {
            self.set_controllers(settings.mode, sink);
        }

        let turbo_active = settings.turbo_enabled && turbo_held(frame, settings.turbo_button);
        let outcome = FrameOutcome {
            menu_requested: menu_requested(frame),
            turbo_active,
            sound_sync: settings.sound_sync && !turbo_active,
        };

        for slot in plan(settings.mode, &settings.assignment) {
            self.decode_slot(frame, &slot, settings.pointer_space, sink);
        }

        outcome
    }

    /// Report one emulated joypad. Channels sharing the slot are OR-ed and
    /// every code is reported once.
    fn decode_slot<S: InputSink + ?Sized>(
        &mut self,
        frame: &FrameInput,
        slot: &SlotPlan,
        space: PointerSpace,
        sink: &mut S,
    ) {
        let inputs: Vec<NormalizedChannel> = slot
            .channels
            .iter()
            .map(|&chan| {
                let input = normalize_channel(frame, chan);
                input_trace!(
                    "Channel {} -> joypad {}: pad {:#x} wpad {:#x} tablet {:#x}",
                    chan,
                    slot.emu_slot,
                    input.pad,
                    input.wpad_held(),
                    input.tablet
                );
                input
            })
            .collect();

        for i in 0..MAX_BUTTONS {
            let pressed = inputs.iter().any(|input| self.joypad_pressed(input, i));
            sink.report_button(joypad_code(slot.emu_slot, i), pressed);
        }

        if let Some((class, pointer)) = slot.pointer {
            self.report_pointer_device(class, pointer, slot.emu_slot, &inputs, sink);
            let raw: Vec<ChannelInput> =
                slot.channels.iter().map(|&chan| frame.channel(chan)).collect();
            let (x, y) = self.cursors.update_all(pointer, &raw, space).position();
            sink.report_pointer(pointer.code(), x, y);
        }

        let screenshot = inputs
            .iter()
            .any(|input| input.wpad_held() & WpadButtons::CLASSIC_ZR.bits() != 0);
        sink.report_button(SCREENSHOT, screenshot);
    }

    fn joypad_pressed(&self, input: &NormalizedChannel, i: usize) -> bool {
        let map = &self.map;
        let mut hit = map.matches(DeviceClass::Joypad, ControllerType::GcPad, i, input.pad)
            || map.matches(DeviceClass::Joypad, ControllerType::Tablet, i, input.tablet);
        if let Some(wpad) = input.wpad {
            hit |= map.matches(DeviceClass::Joypad, remote_layout(&wpad), i, wpad.held);
        }
        hit
    }

    /// Pointer devices accept the remote in every layout at once.
    fn pointer_pressed(&self, class: DeviceClass, input: &NormalizedChannel, i: usize) -> bool {
        let map = &self.map;
        let wpad = input.wpad_held();
        map.matches(class, ControllerType::GcPad, i, input.pad)
            || map.matches(class, ControllerType::Wiimote, i, wpad)
            || map.matches(class, ControllerType::Classic, i, wpad)
            || map.matches(class, ControllerType::WiiUPro, i, wpad)
            || map.matches(class, ControllerType::Tablet, i, input.tablet)
    }

    fn report_pointer_device<S: InputSink + ?Sized>(
        &mut self,
        class: DeviceClass,
        pointer: PointerSlot,
        emu_slot: usize,
        inputs: &[NormalizedChannel],
        sink: &mut S,
    ) {
        let base = button_base(class, emu_slot);
        for i in 0..class.button_count() {
            let mut pressed = inputs.iter().any(|input| self.pointer_pressed(class, input, i));
            if pressed && class == DeviceClass::SuperScope && (i == SCOPE_TURBO_ON || i == SCOPE_TURBO_OFF) {
                pressed = self.latch.apply(i);
            }
            sink.report_button(base + i as u16, pressed);
        }
        input_trace!("{:?} buttons reported from 0x{:02x}", pointer, base);
    }
}

/// Map slice used for the remote's held bits in joypad mode.
fn remote_layout(wpad: &NormalizedWpad) -> ControllerType {
    match wpad.expansion {
        Expansion::None => ControllerType::Wiimote,
        Expansion::Nunchuk => ControllerType::Nunchuk,
        Expansion::Classic if wpad.is_pro => ControllerType::WiiUPro,
        Expansion::Classic => ControllerType::Classic,
    }
}
