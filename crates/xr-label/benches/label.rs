use criterion::{Criterion, black_box, criterion_group, criterion_main};
use xr_core::{Image, Mask};
use xr_label::{LabelConfig, label_components};

fn synthetic_mask(width: usize, height: usize) -> Mask {
    // Horizontal strokes every 20 rows crossed by dashed verticals.
    let cells = Image::from_fn(width, height, |x, y| {
        let stroke = y % 20 < 2 && (32..width - 32).contains(&x);
        let dashed = x % 80 < 2 && y % 8 < 5;
        stroke || dashed
    });
    Mask::from_image(cells)
}

fn bench_label(c: &mut Criterion) {
    let mask = synthetic_mask(1280, 1024);
    let cfg = LabelConfig::default();

    c.bench_function("xr_label_components_1280x1024", |b| {
        b.iter(|| {
            let comps = label_components(black_box(&mask), black_box(&cfg));
            black_box(comps.len());
        });
    });
}

criterion_group!(benches, bench_label);
criterion_main!(benches);
