use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kezuri_core::*;
use std::hint::black_box;

const SIZES: [Size; 3] = [Size::new(300, 200), Size::new(600, 400), Size::new(1200, 800)];
const STRIDES: [usize; 4] = [1, 4, 16, 64];

/// A card with a few diagonal strokes through it, roughly a third scratched.
fn scratched_raster(size: Size) -> PixelRaster {
    let mut raster = PixelRaster::filled(size, Rgba::SILVER);
    raster.set_composite_mode(CompositeMode::Erase);
    let (w, h) = (size.width as f32, size.height as f32);
    let width = h / 5.0;
    for i in 0..4 {
        let offset = i as f32 * w / 4.0;
        raster.stroke_segment(
            Point::new(offset, 0.0),
            Point::new(offset + w / 4.0, h),
            width,
            Rgba::SILVER,
        );
    }
    raster
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate");
    for size in SIZES {
        let pixels = scratched_raster(size).read_pixels().unwrap();
        for stride in STRIDES {
            let estimator = ProgressEstimator::new(stride);
            let id = BenchmarkId::new(format!("{}x{}", size.width, size.height), stride);
            group.bench_with_input(id, &pixels, |b, pixels| {
                b.iter(|| estimator.estimate(black_box(pixels), size))
            });
        }
    }
    group.finish();
}

fn bench_stroke_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("stroke_end");
    for size in SIZES {
        let mut surface =
            ScratchSurface::new(PixelRaster::new(size), ScratchConfig::default(), ()).unwrap();
        let id = BenchmarkId::from_parameter(format!("{}x{}", size.width, size.height));
        group.bench_function(id, |b| {
            b.iter(|| {
                surface.stroke_start(Point::new(10.0, 10.0));
                surface.stroke_move(Point::new(40.0, 30.0));
                surface.stroke_end()
            })
        });
    }
    group.finish();
}

/// Prints how far each stride is from the exhaustive count, to revalidate the auto-reveal threshold.
fn report_accuracy(_c: &mut Criterion) {
    for size in SIZES {
        let pixels = scratched_raster(size).read_pixels().unwrap();
        let exact = ProgressEstimator::new(1).estimate(&pixels, size).unwrap();
        for stride in STRIDES {
            let estimate = ProgressEstimator::new(stride).estimate(&pixels, size).unwrap();
            println!(
                "{}x{} stride {:>2}: {:.4} (exact {:.4}, error {:+.4})",
                size.width,
                size.height,
                stride,
                estimate,
                exact,
                estimate - exact
            );
        }
    }
}

criterion_group!(benches, report_accuracy, bench_estimate, bench_stroke_end);
criterion_main!(benches);
