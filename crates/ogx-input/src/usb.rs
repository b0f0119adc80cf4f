//! Third-party USB controller adapters
//!
//! The adapters already report in native pad layout, so the decoder only
//! sees their OR-ed held bits through [`ChannelInput::adapters`]. This module
//! carries the status line shown in the controller settings screen.
//!
//! [`ChannelInput::adapters`]: crate::snapshot::ChannelInput::adapters

use std::fmt;

/// Supported adapters, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsbAdapter {
    Retrode,
    Xbox360,
    Hornet,
    Mayflash,
}

impl UsbAdapter {
    pub const ALL: [UsbAdapter; 4] = [
        UsbAdapter::Retrode,
        UsbAdapter::Xbox360,
        UsbAdapter::Hornet,
        UsbAdapter::Mayflash,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UsbAdapter::Retrode => "Retrode",
            UsbAdapter::Xbox360 => "XBOX360",
            UsbAdapter::Hornet => "Hornet",
            UsbAdapter::Mayflash => "Mayflash",
        }
    }
}

/// Status string reported by each adapter driver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterStatus {
    statuses: [String; 4],
}

impl AdapterStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, adapter: UsbAdapter, status: impl Into<String>) {
        self.statuses[adapter as usize] = status.into();
    }

    pub fn get(&self, adapter: UsbAdapter) -> &str {
        &self.statuses[adapter as usize]
    }
}

impl fmt::Display for AdapterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, adapter) in UsbAdapter::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", adapter.name(), self.get(*adapter))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_status_line() {
        let mut status = AdapterStatus::new();
        for adapter in UsbAdapter::ALL {
            status.set(adapter, "not found");
        }
        status.set(UsbAdapter::Hornet, "connected");
        assert_eq!(
            status.to_string(),
            "Retrode: not found, XBOX360: not found, Hornet: connected, Mayflash: not found"
        );
    }
}
