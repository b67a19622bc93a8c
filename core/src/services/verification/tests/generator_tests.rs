//! Unit tests for code generation

use std::collections::HashSet;

use crate::domain::entities::CODE_LENGTH;
use crate::services::verification::{CodeGenerator, SecureCodeGenerator, SequenceCodeGenerator};

#[test]
fn test_generate_code_format() {
    let generator = SecureCodeGenerator::new();

    for _ in 0..1_000 {
        let code = generator.generate().unwrap();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_generate_code_distribution() {
    let generator = SecureCodeGenerator::new();
    let samples = 100_000;
    let mut leading = [0u32; 10];
    let mut trailing = [0u32; 10];
    let mut distinct = HashSet::new();

    for _ in 0..samples {
        let code = generator.generate().unwrap();
        let bytes = code.as_bytes();
        leading[(bytes[0] - b'0') as usize] += 1;
        trailing[(bytes[CODE_LENGTH - 1] - b'0') as usize] += 1;
        distinct.insert(code);
    }

    // Expected 10_000 per bucket, standard deviation ~95
    for count in leading.iter().chain(trailing.iter()) {
        assert!((9_500..=10_500).contains(count), "skewed bucket: {}", count);
    }
    // 100k draws from a million codes collide roughly 5k times
    assert!(distinct.len() > 90_000);
}

#[test]
fn test_sequence_generator_repeats_last() {
    let generator = SequenceCodeGenerator::new(["111111", "222222"]);

    assert_eq!(generator.generate().unwrap(), "111111");
    assert_eq!(generator.generate().unwrap(), "222222");
    assert_eq!(generator.generate().unwrap(), "222222");
}
