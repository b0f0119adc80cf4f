//! Controller fusion for oxidized-gx
//!
//! This crate turns the peripherals attached to the console into the
//! abstract button and pointer codes the SNES core understands:
//! - Native gamepad, wireless remote (with nunchuk, classic or pro
//!   controller), tablet gamepad and third-party USB adapters
//! - Bridged motion controller
//! - Super Scope, mouse and Justifier pointer tracking
//! - Menu and turbo gestures

// Physical state
pub mod buttons;
pub mod snapshot;

// Controller modules
pub mod dualshock3;
pub mod usb;

// Decode pipeline
pub mod analog;
pub mod commands;
pub mod decoder;
pub mod gesture;
pub mod mapping;
pub mod pointer;
pub mod slots;

// Re-exports for convenient access
pub use decoder::{
    DecodeSettings, FrameDecoder, FrameOutcome, InputEvent, InputSink, RecordingSink, TurboLatch,
};
pub use gesture::{menu_requested, turbo_held, TurboButton};
pub use mapping::{ButtonMap, ControllerType, DeviceClass};
pub use pointer::{Cursor, CursorState, PointerSlot, PointerSpace};
pub use slots::{PortDevice, SlotAssignment};
pub use snapshot::{
    ButtonState, ChannelInput, Expansion, FrameInput, GcPadState, PointerRay, Stick, TabletState,
    WpadState,
};

// Bridged controller
pub use dualshock3::{Ds3Link, Ds3State, LinkCommand};

// USB adapters
pub use usb::{AdapterStatus, UsbAdapter};
