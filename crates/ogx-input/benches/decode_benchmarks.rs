//! Per-frame decode benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ogx_core::config::EmulationMode;
use ogx_input::buttons::{PadButtons, WpadButtons};
use ogx_input::*;

/// Every channel busy: pad, remote with classic controller and a moving stick.
fn busy_frame() -> FrameInput {
    let mut frame = FrameInput::default();
    for (i, channel) in frame.channels.iter_mut().enumerate() {
        channel.pad.buttons = ButtonState::held((PadButtons::A | PadButtons::UP).bits());
        channel.pad.stick = Stick::new(60, -60);
        channel.wpad = Some(WpadState {
            buttons: ButtonState::held(WpadButtons::CLASSIC_B.bits()),
            expansion: Expansion::Classic,
            ir: PointerRay::at(100 + i as u16 * 50, 200),
            ..Default::default()
        });
    }
    frame.tablet = Some(TabletState::default());
    frame
}

fn bench_decode(c: &mut Criterion) {
    let frame = busy_frame();

    for mode in [EmulationMode::MultiTap5, EmulationMode::SuperScope, EmulationMode::Justifier] {
        let settings = DecodeSettings {
            mode,
            ..DecodeSettings::default()
        };
        let mut decoder = FrameDecoder::new();
        let mut sink = RecordingSink::new();
        c.bench_function(&format!("decode_frame_{:?}", mode), |b| {
            b.iter(|| {
                sink.clear();
                black_box(decoder.decode_frame(black_box(&frame), &settings, &mut sink))
            })
        });
    }
}

fn bench_gestures(c: &mut Criterion) {
    let frame = busy_frame();
    c.bench_function("menu_requested", |b| b.iter(|| menu_requested(black_box(&frame))));
    c.bench_function("turbo_held_all", |b| {
        b.iter(|| {
            TurboButton::ALL
                .iter()
                .filter(|button| turbo_held(black_box(&frame), **button))
                .count()
        })
    });
}

criterion_group!(benches, bench_decode, bench_gestures);
criterion_main!(benches);
