use criterion::{criterion_group, criterion_main, Criterion};
use sfgeom::io::wkb::{from_wkb, to_wkb};
use sfgeom::io::wkt::{from_wkt, to_wkt};
use sfgeom::Geometry;

fn create_data() -> Geometry {
    let polygons: Vec<String> = (0..500)
        .map(|i| {
            let x = f64::from(i) * 10.;
            format!(
                "(({x} 0, {x} 5, {} 5, {} 0, {x} 0), ({} 1, {} 2, {} 2, {} 1, {} 1))",
                x + 5.,
                x + 5.,
                x + 1.,
                x + 1.,
                x + 2.,
                x + 2.,
                x + 1.
            )
        })
        .collect();
    from_wkt(&format!("MULTIPOLYGON ({})", polygons.join(", "))).unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let geom = create_data();
    let wkb = to_wkb(&geom).unwrap();
    let wkt = to_wkt(&geom);

    c.bench_function("parse WKB MultiPolygon", |b| {
        b.iter(|| {
            let _ = from_wkb(&wkb).unwrap();
        })
    });
    c.bench_function("write WKB MultiPolygon", |b| {
        b.iter(|| {
            let _ = to_wkb(&geom).unwrap();
        })
    });
    c.bench_function("parse WKT MultiPolygon", |b| {
        b.iter(|| {
            let _ = from_wkt(&wkt).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
