use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use mixfft::{Direction, Fft, RealFft, SimdFft};
use num_complex::Complex;
use rand::distributions::Uniform;
use rand::prelude::*;

const LENGTHS: &[usize] = &[6, 8, 10, 12, 14, 16, 18, 20];

fn generate_signal(n: usize) -> Vec<Complex<f32>> {
    let mut rng = thread_rng();
    let uniform = Uniform::new(-1.0_f32, 1.0);
    (0..n)
        .map(|_| Complex::new(uniform.sample(&mut rng), uniform.sample(&mut rng)))
        .collect()
}

fn benchmark_recursive(c: &mut Criterion) {
    let mut group = c.benchmark_group("Recursive f32");

    for n in LENGTHS.iter() {
        let len = 1 << n;
        group.throughput(Throughput::Elements(len as u64));

        let fft = Fft::<f32>::new(len, Direction::Forward);
        group.bench_function(BenchmarkId::new("mixed-radix", len), |b| {
            b.iter_batched(
                || (generate_signal(len), vec![Complex::new(0.0, 0.0); len]),
                |(input, mut output)| fft.transform(&input, &mut output),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn benchmark_vectorized(c: &mut Criterion) {
    let mut group = c.benchmark_group("Vectorized f32");

    for n in LENGTHS.iter() {
        let len = 1 << n;
        group.throughput(Throughput::Elements(len as u64));

        let fft = SimdFft::new(len, Direction::Forward);
        group.bench_function(BenchmarkId::new("radix-2 lanes", len), |b| {
            b.iter_batched(
                || generate_signal(len),
                |mut buffer| fft.transform_in_place(&mut buffer),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn benchmark_real(c: &mut Criterion) {
    let mut group = c.benchmark_group("Real f32");

    for n in LENGTHS.iter() {
        let len = 1 << n;
        group.throughput(Throughput::Elements(len as u64));

        let fft = RealFft::<f32>::new(len, Direction::Forward);
        group.bench_function(BenchmarkId::new("real forward", len), |b| {
            b.iter_batched(
                || {
                    let mut rng = thread_rng();
                    let uniform = Uniform::new(-1.0_f32, 1.0);
                    let input: Vec<f32> = (0..len).map(|_| uniform.sample(&mut rng)).collect();
                    (input, vec![Complex::new(0.0, 0.0); len / 2 + 1])
                },
                |(input, mut output)| fft.transform_forward(&input, &mut output),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_recursive,
    benchmark_vectorized,
    benchmark_real
);
criterion_main!(benches);
