use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stereo_core::nalgebra::Point3;
use stereo_core::{CenteredPoint, StereoModel};
use stereo_geom::DisparityTriangulator;
use stereo_pinhole::CalibrationParameters;

fn observations(count: usize) -> (Vec<CenteredPoint>, Vec<CenteredPoint>) {
    let calibration = CalibrationParameters::reference();
    (0..count)
        .map(|i| {
            let i = i as f64;
            let point = Point3::new(i.sin() * 800.0, i.cos() * 400.0, 900.0 + 17.0 * i);
            let m = calibration.project(point).unwrap();
            (calibration.center(m.0), calibration.center(m.1))
        })
        .unzip()
}

fn triangulate(c: &mut Criterion) {
    let calibration = CalibrationParameters::reference();
    let triangulator = DisparityTriangulator::new();
    for count in [30, 100_000] {
        let (left, right) = observations(count);
        c.bench_function(&format!("triangulate {}", count), |b| {
            b.iter(|| {
                triangulator
                    .triangulate(&calibration, black_box(&left), black_box(&right))
                    .unwrap()
            })
        });
    }
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = triangulate
);
criterion_main!(benches);
