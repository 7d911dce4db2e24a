use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glass_preview::glass::GlassCompositor;
use glass_preview::store::DEFAULT_OVERLAY;
use glass_preview::{FrameBuffer, PatternKind, PatternRenderer, Rect, ViewportSize, render_pattern};

const PHONE: ViewportSize = ViewportSize { width: 306, height: 696 };

fn bench_render_patterns(c: &mut Criterion) {
    for kind in PatternKind::ALL {
        c.bench_function(&format!("render_{}_phone", kind.label().to_lowercase()), |b| {
            b.iter(|| black_box(render_pattern(black_box(kind), 50.0, PHONE)));
        });
    }
}

fn bench_blit_scrolled(c: &mut Criterion) {
    let mut renderer = PatternRenderer::new();
    renderer.set_pattern(PatternKind::Checkerboard, 50.0);
    renderer.set_viewport(PHONE);
    let mut fb = FrameBuffer::new(PHONE.width as usize, PHONE.height as usize);
    let container = Rect::new(0, 0, PHONE.width, PHONE.height);
    let mut offset = 0.0;
    c.bench_function("blit_phone_scrolled", |b| {
        b.iter(|| {
            offset += 1.5;
            renderer.blit(&mut fb, container, black_box(offset));
        });
    });
}

fn bench_glass_composite(c: &mut Criterion) {
    let mut renderer = PatternRenderer::new();
    renderer.set_pattern(PatternKind::Stripe, 50.0);
    renderer.set_viewport(PHONE);
    let mut fb = FrameBuffer::new(PHONE.width as usize, PHONE.height as usize);
    let container = Rect::new(0, 0, PHONE.width, PHONE.height);
    renderer.blit(&mut fb, container, 0.0);

    let mut compositor = GlassCompositor::new();
    let params = DEFAULT_OVERLAY;
    let shadowed = glass_preview::OverlayParams { is_shadow_enabled: true, ..DEFAULT_OVERLAY };
    c.bench_function("glass_composite_default", |b| {
        b.iter(|| compositor.composite(&mut fb, container, black_box(&params)))
    });
    c.bench_function("glass_composite_shadow", |b| {
        b.iter(|| compositor.composite(&mut fb, container, black_box(&shadowed)))
    });
}

criterion_group!(benches, bench_render_patterns, bench_blit_scrolled, bench_glass_composite);
criterion_main!(benches);
