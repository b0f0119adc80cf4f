//! Oxidized-GX - input replay
//!
//! Feeds a scripted sequence of controller frames through the decoder and
//! prints what the SNES core would receive.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ogx_core::config::{Config, EmulationMode};
use ogx_input::commands::default_bindings;
use ogx_input::{
    ChannelInput, DecodeSettings, Ds3Link, FrameDecoder, FrameInput, InputEvent, LinkCommand,
    RecordingSink, TabletState,
};
use serde::Deserialize;

/// A replay script.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Script {
    /// Overrides the configured emulation mode
    mode: Option<EmulationMode>,
    frames: Vec<ScriptFrame>,
}

#[derive(Debug, Deserialize)]
struct ScriptFrame {
    /// Number of consecutive frames with this input
    #[serde(default = "default_repeat")]
    repeat: u32,
    /// Channels in order; missing ones are idle
    #[serde(default)]
    channels: Vec<ChannelInput>,
    #[serde(default)]
    tablet: Option<TabletState>,
}

fn default_repeat() -> u32 {
    1
}

impl ScriptFrame {
    fn to_input(&self) -> Result<FrameInput> {
        let mut frame = FrameInput {
            tablet: self.tablet,
            ..Default::default()
        };
        if self.channels.len() > frame.channels.len() {
            bail!(
                "frame lists {} channels, at most {} are supported",
                self.channels.len(),
                frame.channels.len()
            );
        }
        frame.channels[..self.channels.len()].copy_from_slice(&self.channels);
        Ok(frame)
    }
}

fn load_script(path: &Path) -> Result<Script> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse script {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Config {
    let loaded = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    loaded.unwrap_or_else(|err| {
        eprintln!("Settings rejected ({}), using defaults", err);
        Config::default()
    })
}

/// Drop the bridged controller while it is not linked, following the
/// link gestures on channel 0.
fn apply_link(link: &mut Ds3Link, frame: &mut FrameInput) {
    match link.poll(frame.channels[0].wpad_held()) {
        LinkCommand::Open => link.set_connected(true),
        LinkCommand::Close => link.set_connected(false),
        LinkCommand::None => {}
    }
    if !link.is_connected() {
        for channel in frame.channels.iter_mut() {
            channel.bridge = None;
        }
    }
}

fn describe(event: &InputEvent, names: &HashMap<u16, String>) -> Option<String> {
    match *event {
        InputEvent::Button { code, pressed: true } => Some(
            names
                .get(&code)
                .cloned()
                .unwrap_or_else(|| format!("0x{:02x}", code)),
        ),
        InputEvent::Button { pressed: false, .. } => None,
        InputEvent::Pointer { code, x, y } => {
            let name = names.get(&code).map(String::as_str).unwrap_or("Pointer");
            Some(format!("{} ({}, {})", name, x, y))
        }
        InputEvent::Controller { .. } => Some(event.to_string()),
    }
}

fn run(script: &Script, config: &Config) -> Result<Vec<String>> {
    let mut settings = DecodeSettings::from_config(&config.input);
    if let Some(mode) = script.mode {
        settings.mode = mode;
    }

    let names: HashMap<u16, String> = default_bindings()
        .into_iter()
        .map(|b| (b.code, b.command))
        .collect();

    let mut decoder = FrameDecoder::from_config(&config.input);
    let mut link = Ds3Link::new();
    let mut sink = RecordingSink::new();
    let mut lines = Vec::new();
    let mut index = 0usize;

    for step in &script.frames {
        let input = step.to_input()?;
        for _ in 0..step.repeat {
            let mut frame = input;
            apply_link(&mut link, &mut frame);

            let outcome = decoder.decode_frame(&frame, &settings, &mut sink);
            let events: Vec<String> = sink
                .take()
                .iter()
                .filter_map(|event| describe(event, &names))
                .collect();

            let mut line = format!("frame {:>4}: {}", index, events.join(", "));
            if outcome.menu_requested {
                line.push_str(" [menu]");
            }
            if outcome.turbo_active {
                line.push_str(" [turbo]");
            }
            lines.push(line);
            index += 1;
        }
    }

    tracing::info!("Replayed {} frames", index);
    Ok(lines)
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <script.toml> [settings.toml]", args[0]);
        eprintln!("\nReplays scripted controller input through the decoder.");
        std::process::exit(1);
    }

    let script_path = PathBuf::from(&args[1]);
    let config_path = args.get(2).map(PathBuf::from);

    let config = load_config(config_path.as_deref());
    ogx_core::logging::init(&config);

    tracing::info!("Starting Oxidized-GX input replay");

    let script = load_script(&script_path)?;
    for line in run(&script, &config)? {
        println!("{}", line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
        mode = "super_scope"

        [[frames]]
        repeat = 2
        [[frames.channels]]
        pad = { buttons = { held = 0x800 } }

        [[frames]]
        [[frames.channels]]
        wpad = { ir = { valid = true, x = 320, y = 240 } }
    "#;

    #[test]
    fn replays_script() {
        let script: Script = toml::from_str(SCRIPT).unwrap();
        let lines = run(&script, &Config::default()).unwrap();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("port 1 <- SuperScope"));
        assert!(lines[0].contains("Superscope ToggleTurbo"));
        assert!(!lines[1].contains("Superscope ToggleTurbo"));
        assert!(lines[2].contains("Pointer Superscope (128, 112)"));
    }

    #[test]
    fn reads_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.toml");
        fs::write(&path, SCRIPT).unwrap();

        let script = load_script(&path).unwrap();
        assert_eq!(script.mode, Some(EmulationMode::SuperScope));
        assert_eq!(script.frames[0].repeat, 2);
        assert!(load_script(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn rejects_too_many_channels() {
        let frame = ScriptFrame {
            repeat: 1,
            channels: vec![ChannelInput::default(); 5],
            tablet: None,
        };
        assert!(frame.to_input().is_err());
    }

    #[test]
    fn bridge_dropped_until_linked() {
        let mut link = Ds3Link::new();
        let mut frame = FrameInput::default();
        frame.channels[1].bridge = Some(Default::default());
        apply_link(&mut link, &mut frame);
        assert!(frame.channels[1].bridge.is_none());
    }
}
