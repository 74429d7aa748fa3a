use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_huffman_image::{decode, encode, ChannelLayout};

const WIDTH: u32 = 256;
const HEIGHT: u32 = 256;

fn gradient() -> Vec<u8> {
    (0..WIDTH * HEIGHT * 3)
        .map(|i| ((i / 3 % WIDTH) / 4 + (i / 3 / WIDTH) / 8) as u8)
        .collect()
}

fn encode_benchmark(c: &mut Criterion) {
    let random_input = (0..WIDTH * HEIGHT * 3)
        .map(|_| rand::random::<u8>())
        .collect::<Vec<u8>>();
    let gradient_input = gradient();

    c.bench_function("encode random rgb", |b| {
        b.iter(|| encode(black_box(&random_input), WIDTH, HEIGHT, ChannelLayout::Rgb))
    });
    c.bench_function("encode gradient rgb", |b| {
        b.iter(|| encode(black_box(&gradient_input), WIDTH, HEIGHT, ChannelLayout::Rgb))
    });
}

fn decode_benchmark(c: &mut Criterion) {
    let compressed = encode(&gradient(), WIDTH, HEIGHT, ChannelLayout::Rgb).unwrap();

    c.bench_function("decode gradient rgb", |b| {
        b.iter(|| decode(black_box(&compressed)))
    });
}

criterion_group!(benches, encode_benchmark, decode_benchmark);
criterion_main!(benches);
