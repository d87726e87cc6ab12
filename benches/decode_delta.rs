use criterion::{criterion_group, criterion_main, Criterion};

use qdb_delta::encoding::{bitpacked::Decoder, delta_bitpacked, delta_byte_array};
use qdb_delta::{decode_byte_array, decode_int64, BufferPools, ByteArrays};

fn add_benchmark(c: &mut Criterion) {
    (10..=20).step_by(2).for_each(|log2_size| {
        let size = 2usize.pow(log2_size);

        let bytes = (0..size as u32)
            .map(|x| 0b01011011u8.rotate_left(x))
            .collect::<Vec<_>>();
        c.bench_function(&format!("bitpacking 2^{}", log2_size), |b| {
            b.iter(|| Decoder::<u32>::try_new(&bytes, 1, size).unwrap().count())
        });

        let mut encoded = vec![];
        delta_bitpacked::encode(
            (0..size).map(|x| x as i64 * 3 + (x as i64 % 7) * 1000),
            &mut encoded,
        );
        let pools = BufferPools::default();
        c.bench_function(&format!("delta int64 2^{}", log2_size), |b| {
            b.iter(|| {
                let mut dst = pools.int64.checkout();
                decode_int64(&mut dst, &encoded).unwrap();
                dst.len()
            })
        });

        let values = (0..size)
            .map(|x| format!("prefix/{:08}", x * 13).into_bytes())
            .collect::<Vec<_>>();
        let mut encoded = vec![];
        delta_byte_array::encode(values.iter().map(|v| v.as_slice()), &mut encoded);
        let mut dst = ByteArrays::new();
        c.bench_function(&format!("delta byte array 2^{}", log2_size), |b| {
            b.iter(|| {
                decode_byte_array(&mut dst, &encoded).unwrap();
                dst.len()
            })
        });
    })
}

criterion_group!(benches, add_benchmark);
criterion_main!(benches);
