use afl::fuzz;
use cif_registry::tax_id::{
    check_structure, complete, compute_check_digit, entity_type, normalize,
    validate_check_digit, validate_full, SHORT_TAX_ID_LENGTH,
};
use cif_registry::{dedupe, CompanyRecord};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg(not(feature = "manual_test"))]
fn main() {
    fuzz!(|data: &[u8]| {
        run_raw_fuzz(data);
    });
}

#[cfg(feature = "manual_test")]
fn main() {
    use std::io::{stdin, Read};

    let mut input = vec![];
    stdin().read_to_end(&mut input).unwrap();
    run_raw_fuzz(&input);
}

fn split_bytes_once(input: &[u8]) -> Option<(&[u8], &[u8])> {
    if let Some(i) = input.iter().position(|b| *b == b',') {
        Some((&input[0..i], &input[i + 1..]))
    } else {
        None
    }
}

fn run_raw_fuzz(bytes: &[u8]) -> Option<()> {
    let (input, rand_seed) = split_bytes_once(bytes)?;
    let input_str = std::str::from_utf8(input).ok()?;

    let mut rng_seed: u64 = 0;
    for i in 0..8 {
        if rand_seed.len() > i {
            rng_seed <<= 8;
            rng_seed += rand_seed[i] as u64;
        }
    }

    let rng = StdRng::seed_from_u64(rng_seed);
    fuzz_tax_id(input_str);
    fuzz_dedupe(input_str, rng);

    Some(())
}

fn fuzz_tax_id(input: &str) {
    #[cfg(feature = "manual_test")]
    {
        println!("Input: {:?}", input);
        println!("Normalized: {:?}", normalize(input));
        println!("Validation: {:?}", validate_full(input));
    }

    match normalize(input) {
        None => assert!(validate_full(input).is_err()),
        Some(normalized) => {
            assert_eq!(normalize(&normalized).as_deref(), Some(normalized.as_str()));

            if check_structure(&normalized).is_ok() {
                if normalized.len() == SHORT_TAX_ID_LENGTH + 1 {
                    let expected = compute_check_digit(&normalized[..SHORT_TAX_ID_LENGTH]);
                    let actual = normalized.chars().last();
                    assert_eq!(validate_check_digit(&normalized).is_ok(), expected == actual);
                } else {
                    let completed = complete(&normalized).expect("valid short ids complete");
                    assert!(validate_full(&completed).is_ok());
                }
                assert!(entity_type(&normalized).is_some());
            }
        }
    }
}

fn fuzz_dedupe(input: &str, mut rng: StdRng) {
    // One record per word, half of them keyed by the word as a tax id
    let records: Vec<CompanyRecord> = input
        .split(|c: char| c.is_whitespace())
        .filter_map(|word| {
            let record = CompanyRecord::new(word, "fuzz")?;
            if rng.gen_bool(0.5) {
                Some(record.tax_id(word))
            } else {
                Some(record)
            }
        })
        .collect();

    let once = dedupe(records.clone());
    assert!(once.len() <= records.len());
    assert_eq!(dedupe(once.clone()), once);
}
