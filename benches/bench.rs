use criterion::{criterion_group, criterion_main};

mod check_digit_benchmark {
    use cif_registry::tax_id::{complete, validate_full};
    use criterion::{black_box, Criterion};

    pub fn criterion_benchmark(c: &mut Criterion) {
        let tax_ids = vec![
            "B12345674",
            "A58818501",
            "Q2826000H",
            " b-1234567 ",
            "X12345678",
            "B12345678",
            "F30000004",
            "U12345682",
        ];
        c.bench_function("validate-full", |b| {
            b.iter(|| {
                for tax_id in tax_ids.iter() {
                    let _ = validate_full(black_box(tax_id));
                }
            })
        });

        let short_ids = vec!["B1234567", "A5881850", "Q2826000", "F3000000", "U1234568"];
        c.bench_function("complete", |b| {
            b.iter(|| {
                for tax_id in short_ids.iter() {
                    complete(black_box(tax_id));
                }
            })
        });
    }
}

mod dedupe_benchmark {
    use cif_registry::tax_id::complete;
    use cif_registry::{dedupe, CompanyRecord};
    use criterion::{BatchSize, BenchmarkId, Criterion};

    fn generate_records(count: usize) -> Vec<CompanyRecord> {
        (0..count)
            .filter_map(|i| {
                // Roughly a third of the records collide with another one
                let name = format!("Empresa {}", i % (count * 2 / 3 + 1));
                let record = CompanyRecord::new(&name, "bench")?;
                if i % 2 == 0 {
                    let tax_id = complete(&format!("B{:07}", i % 5_000))?;
                    Some(record.tax_id(&tax_id))
                } else {
                    Some(record)
                }
            })
            .collect()
    }

    pub fn criterion_benchmark(c: &mut Criterion) {
        let mut group = c.benchmark_group("dedupe");
        for count in [100, 10_000] {
            let records = generate_records(count);
            group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
                b.iter_batched(
                    || records.clone(),
                    dedupe,
                    BatchSize::SmallInput,
                )
            });
        }
        group.finish();
    }
}

criterion_group!(
    benches,
    check_digit_benchmark::criterion_benchmark,
    dedupe_benchmark::criterion_benchmark
);
criterion_main!(benches);
