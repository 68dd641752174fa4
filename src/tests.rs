use voxell_rng::rng::XorShift128;

use crate::{
    CodingError, CodingSchema, FrequencyTable, Strategy, build_huffman_schema, build_shannon_fano_schema,
};

const SHORT_DATA: &str = "Hello, World!";
const LONG_DATA: &str =
    "This is a longer string to test the prefix code builders. It should be able to handle various lengths and characters.";
const REPEATING_DATA: &str = "a baba da babble da dabble babble doo bee babble dabble dooble dee boo dooble daddle boo";
const TWO_SYMBOL_DATA: &str = "abbbbbbbbbbbbbbbbbbb";
const UNICODE_DATA: &str = "żółć gęślą jaźń, ÿ ü ö ä ß";

const TEST_CASES: &[(&str, &str)] = &[
    (REPEATING_DATA, "repeating data"),
    (SHORT_DATA, "short data"),
    (LONG_DATA, "long data"),
    (TWO_SYMBOL_DATA, "two symbol data"),
    (UNICODE_DATA, "unicode data"),
];

const STRATEGIES: &[Strategy] = &[Strategy::Huffman, Strategy::ShannonFano];

/// Lowercase letters skewed towards the start of the alphabet.
fn rng_data(len: usize, seed: u64) -> String {
    let mut rng = XorShift128::new(seed);
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        let data = rng.peek_next_u64();
        rng = XorShift128::new(data);
        let letter = (data % 26).min((data >> 32) % 26) as u8;
        out.push(char::from(b'a' + letter));
    }
    out
}

fn all_inputs() -> Vec<(String, String)> {
    let mut inputs: Vec<(String, String)> = TEST_CASES.iter().map(|&(data, name)| (data.to_string(), name.to_string())).collect();
    for seed in [0xdeadcafe, 0x1234_5678, 42] {
        inputs.push((rng_data(1000, seed), format!("rng data {:#x}", seed)));
    }
    inputs
}

fn schema_for(strategy: Strategy, input: &str) -> CodingSchema<char> {
    match strategy.build_from_symbols(input.chars()) {
        Ok(coding) => coding
            .into_schema()
            .unwrap_or_else(|e| panic!("{} produced no proper schema: {}", strategy, e)),
        Err(e) => panic!("fatal error while building {} code: {}", strategy, e),
    }
}

#[test]
fn schemas_are_prefix_free() {
    for (input, name) in all_inputs() {
        for &strategy in STRATEGIES {
            let schema = schema_for(strategy, &input);
            assert!(
                schema.is_prefix_free(),
                "{} schema for {} is not prefix free: {:?}",
                strategy,
                name,
                schema.entries()
            );
        }
    }
}

#[test]
fn schemas_cover_every_symbol_once() {
    for (input, name) in all_inputs() {
        let table = FrequencyTable::from_symbols(input.chars());
        for &strategy in STRATEGIES {
            let schema = schema_for(strategy, &input);
            assert_eq!(schema.len(), table.len(), "{} schema for {} misses symbols", strategy, name);
            assert_eq!(schema.total_count(), input.chars().count() as u64);
            for (symbol, count) in table.iter() {
                assert_eq!(schema.get(symbol).map(|e| e.count), Some(count), "{} count of {:?} in {}", strategy, symbol, name);
            }
        }
    }
}

#[test]
fn repeated_builds_are_identical() {
    for (input, _) in all_inputs() {
        for &strategy in STRATEGIES {
            assert_eq!(schema_for(strategy, &input), schema_for(strategy, &input));
        }
    }
}

#[test]
fn average_length_is_bounded() {
    for (input, name) in all_inputs() {
        let entropy = FrequencyTable::from_symbols(input.chars()).entropy();
        let huffman = schema_for(Strategy::Huffman, &input);
        let fano = schema_for(Strategy::ShannonFano, &input);

        for (schema, strategy) in [(&huffman, Strategy::Huffman), (&fano, Strategy::ShannonFano)] {
            let average = schema.average_codeword_length();
            eprintln!(
                "Average length for {} with {}: {:.3} bits (entropy {:.3}, factor {:.2})",
                name,
                strategy,
                average,
                entropy,
                schema.compression_factor(8)
            );
            assert!(schema.min_codeword_len() as f64 <= average);
            assert!(average <= schema.max_codeword_len() as f64);
            assert!(average + 1e-9 >= entropy, "{} beats the entropy bound on {}", strategy, name);
        }

        assert!(huffman.average_codeword_length() < entropy + 1.0);
        assert!(
            huffman.average_codeword_length() <= fano.average_codeword_length() + 1e-9,
            "huffman is worse than shannon-fano on {}",
            name
        );
    }
}

#[test]
fn empty_input_is_an_error() {
    assert_eq!(build_huffman_schema("".chars()).unwrap_err(), CodingError::EmptyInput);
    assert_eq!(build_shannon_fano_schema("".chars()).unwrap_err(), CodingError::EmptyInput);
}

#[test]
fn single_symbol_input_is_flagged() {
    for coding in [build_huffman_schema("aaaa".chars()), build_shannon_fano_schema("aaaa".chars())] {
        let coding = coding.unwrap();
        assert!(coding.is_single_symbol());
        let schema = coding.with_one_bit_fallback();
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.total_count(), 4);
        assert_eq!(schema.average_codeword_length(), 1.0);
        assert_eq!(schema.compression_factor(8), 8.0);
    }
}

#[test]
fn symbols_need_not_be_characters() {
    let words = "the cat and the dog and the bird".split_whitespace();
    let schema = build_huffman_schema(words).unwrap().into_schema().unwrap();
    // "the" outweighs the merged rest until the final merge
    assert_eq!(schema.codeword(&"the").map(|c| c.to_string()), Some("0".to_string()));
    assert!(schema.is_prefix_free());

    let bytes = build_shannon_fano_schema(b"abracadabra".iter().copied()).unwrap().into_schema().unwrap();
    assert_eq!(bytes.codeword(&b'a').map(|c| c.to_string()), Some("0".to_string()));
    assert!(bytes.is_prefix_free());
}

#[test]
fn counts_at_the_u64_limit() {
    let err = FrequencyTable::from_counts([('a', u64::MAX), ('b', 1)]).unwrap_err();
    assert!(matches!(err, CodingError::CountOverflow { .. }), "got {:?}", err);

    let table = FrequencyTable::from_counts([('a', u64::MAX - 1), ('b', 1)]).unwrap();
    for &strategy in STRATEGIES {
        let schema = strategy.build_from_table(&table).unwrap().into_schema().unwrap();
        assert!(schema.is_prefix_free(), "{} with counts at the u64 limit", strategy);
        assert_eq!(schema.total_count(), u64::MAX);
        assert_eq!(schema.total_bits(), u64::MAX);
        assert_eq!(schema.average_codeword_length(), 1.0);
    }
}
