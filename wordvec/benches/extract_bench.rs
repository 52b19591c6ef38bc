use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wordvec::{align, EmbeddingProvider, TableBuilder, Word2Vec};

const DIM: usize = 300;

fn synthetic(vocab_size: usize) -> Word2Vec {
    let mut builder = TableBuilder::with_capacity(DIM, vocab_size);
    let mut vector = vec![0f32; DIM];
    for i in 0..vocab_size {
        vector.iter_mut().enumerate().for_each(|(j, v)| *v = ((i + j) % 97) as f32 / 97.0);
        builder.push(format!("w{i}"), &vector).unwrap();
    }
    Word2Vec::from_table(builder.build().unwrap())
}

fn query(len: usize, vocab_size: usize) -> Vec<String> {
    // Every fourth word is out of vocabulary.
    (0..len)
        .map(|i| {
            if i % 4 == 3 {
                format!("oov{i}")
            } else {
                format!("w{}", (i * 7919) % vocab_size)
            }
        })
        .collect()
}

fn bench_extract(c: &mut Criterion) {
    let vocab_size = 200_000;
    let provider = synthetic(vocab_size);

    let mut group = c.benchmark_group("extract");
    for len in [16usize, 1_024, 65_536] {
        let words = query(len, vocab_size);
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();

        group.bench_with_input(BenchmarkId::new("align", len), &refs, |b, refs| {
            b.iter(|| align(black_box(refs), provider.table()))
        });
        group.bench_with_input(BenchmarkId::new("extract", len), &refs, |b, refs| {
            b.iter(|| provider.extract(black_box(refs)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
