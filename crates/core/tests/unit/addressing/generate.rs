//! # Address Generator Tests
//!
//! Golden sequences for the regions used in Gen assembly introductions
//! (register region figures and the packed / broadcast / strided slides),
//! plus partition handling and iterator contracts.

use genreg_core::addressing::{Address, decode, generate, generate_with};
use genreg_core::common::RegionError;
use genreg_core::config::{GeneratorConfig, PartitionPolicy};
use genreg_core::isa::parse_region;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{addresses, expand};

// ══════════════════════════════════════════════════════════
// 1. Golden sequences
// ══════════════════════════════════════════════════════════

#[rstest]
// Two rows of eight words, horizontal stride two, one register per row.
#[case(16, "r4.1<16;8,2>:w", 2, &[
    (4, 2), (4, 6), (4, 10), (4, 14), (4, 18), (4, 22), (4, 26), (4, 30),
    (5, 2), (5, 6), (5, 10), (5, 14), (5, 18), (5, 22), (5, 26), (5, 30),
])]
// Vertical stride one interleaves the two rows inside one register.
#[case(16, "r5.0<1;8,2>:w", 2, &[
    (5, 0), (5, 4), (5, 8), (5, 12), (5, 16), (5, 20), (5, 24), (5, 28),
    (5, 2), (5, 6), (5, 10), (5, 14), (5, 18), (5, 22), (5, 26), (5, 30),
])]
// Destination short form: sequential words.
#[case(16, "r6.0<1>:w", 2, &[
    (6, 0), (6, 2), (6, 4), (6, 6), (6, 8), (6, 10), (6, 12), (6, 14),
    (6, 16), (6, 18), (6, 20), (6, 22), (6, 24), (6, 26), (6, 28), (6, 30),
])]
#[case(16, "r1.7<16;8,1>:b", 1, &[
    (1, 7), (1, 8), (1, 9), (1, 10), (1, 11), (1, 12), (1, 13), (1, 14),
    (1, 23), (1, 24), (1, 25), (1, 26), (1, 27), (1, 28), (1, 29), (1, 30),
])]
#[case(16, "r2.1<16;8,1>:b", 1, &[
    (2, 1), (2, 2), (2, 3), (2, 4), (2, 5), (2, 6), (2, 7), (2, 8),
    (2, 17), (2, 18), (2, 19), (2, 20), (2, 21), (2, 22), (2, 23), (2, 24),
])]
// Horizontal stride zero repeats each row start.
#[case(16, "r1.14<16;8,0>:b", 1, &[
    (1, 14), (1, 14), (1, 14), (1, 14), (1, 14), (1, 14), (1, 14), (1, 14),
    (1, 30), (1, 30), (1, 30), (1, 30), (1, 30), (1, 30), (1, 30), (1, 30),
])]
// Second row wraps into the next register.
#[case(16, "r2.17<16;8,1>:b", 1, &[
    (2, 17), (2, 18), (2, 19), (2, 20), (2, 21), (2, 22), (2, 23), (2, 24),
    (3, 1), (3, 2), (3, 3), (3, 4), (3, 5), (3, 6), (3, 7), (3, 8),
])]
#[case(8, "r2.1<1>:w", 2, &[
    (2, 2), (2, 4), (2, 6), (2, 8), (2, 10), (2, 12), (2, 14), (2, 16),
])]
#[case(8, "r3.5<1>:f", 4, &[
    (3, 20), (3, 24), (3, 28), (4, 0), (4, 4), (4, 8), (4, 12), (4, 16),
])]
#[case(8, "r6.0<2>:w", 2, &[
    (6, 0), (6, 4), (6, 8), (6, 12), (6, 16), (6, 20), (6, 24), (6, 28),
])]
// Runs past the end of the register file region in use; still deterministic.
#[case(8, "r7.0<4>:f", 4, &[
    (7, 0), (7, 16), (8, 0), (8, 16), (9, 0), (9, 16), (10, 0), (10, 16),
])]
#[case(16, "r0.0<8;8,1>:f", 4, &[
    (0, 0), (0, 4), (0, 8), (0, 12), (0, 16), (0, 20), (0, 24), (0, 28),
    (1, 0), (1, 4), (1, 8), (1, 12), (1, 16), (1, 20), (1, 24), (1, 28),
])]
#[case(1, "r6.3<0;1,0>:f", 4, &[(6, 12)])]
#[case(8, "r7.1<4;1,0>:b", 1, &[
    (7, 1), (7, 5), (7, 9), (7, 13), (7, 17), (7, 21), (7, 25), (7, 29),
])]
// Corrected versions of regions drawn with inconsistent descriptors.
#[case(16, "r2.8<16;8,1>:hf", 2, &[
    (2, 16), (2, 18), (2, 20), (2, 22), (2, 24), (2, 26), (2, 28), (2, 30),
    (3, 16), (3, 18), (3, 20), (3, 22), (3, 24), (3, 26), (3, 28), (3, 30),
])]
#[case(8, "r4.0<8;4,1>:df", 8, &[
    (4, 0), (4, 8), (4, 16), (4, 24), (6, 0), (6, 8), (6, 16), (6, 24),
])]
#[case(8, "r9.0<1;4,2>:w", 2, &[
    (9, 0), (9, 4), (9, 8), (9, 12), (9, 2), (9, 6), (9, 10), (9, 14),
])]
fn golden(
    #[case] simd_width: u32,
    #[case] descriptor: &str,
    #[case] bytes: u32,
    #[case] starts: &[(u64, u64)],
) {
    assert_eq!(addresses(simd_width, descriptor), expand(bytes, starts));
}

#[test]
fn first_and_last_of_figure_region() {
    let out = addresses(16, "r4.1<16;8,2>:w");
    assert_eq!(out.len(), 16);
    assert_eq!(out.first(), Some(&Address::new(4, [2, 3])));
    assert_eq!(out.last(), Some(&Address::new(5, [30, 31])));
}

#[test]
fn element_offsets_are_consecutive_bytes() {
    let out = addresses(1, "r6.3<0;1,0>:f");
    assert_eq!(out, [Address::new(6, [12, 13, 14, 15])]);
    assert_eq!(out[0].start(), Some(12));
}

// ══════════════════════════════════════════════════════════
// 2. Regions without an asserted reference layout
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(16, "r2.8<16;16,1>:hf")]
#[case(8, "r4.0<8;8,1>:df")]
#[case(8, "r9.0<1;2,4>:d")]
fn unlabelled_regions_are_total(#[case] simd_width: u32, #[case] descriptor: &str) {
    let region = parse_region(descriptor).unwrap();
    let out = addresses(simd_width, descriptor);
    assert_eq!(out.len(), simd_width as usize);
    assert!(out.iter().all(|a| a.offsets.len() == region.bytes() as usize));
    assert!(out.iter().all(|a| a.register >= u64::from(region.reg_num())));
}

#[test]
fn horizontal_steps_stay_in_the_row_register() {
    // Sixteen half-floats from byte 16 run to byte 47 of r2.
    let out = addresses(16, "r2.8<16;16,1>:hf");
    assert!(out.iter().all(|a| a.register == 2));
    assert_eq!(out[7], Address::new(2, [30, 31]));
    assert_eq!(out[8], Address::new(2, [32, 33]));
    assert_eq!(out[15], Address::new(2, [46, 47]));
}

#[test]
fn row_crossing_register_end_keeps_row_register() {
    // Second element of the row starts at byte 32 of r0.
    assert_eq!(
        addresses(2, "r0.6<0;2,2>:f"),
        [
            Address::new(0, [24, 25, 26, 27]),
            Address::new(0, [32, 33, 34, 35])
        ]
    );
}

#[test]
fn sub_register_past_register_end_is_kept_in_first_row() {
    assert_eq!(addresses(1, "r1.40<0;1,0>:b"), [Address::new(1, [40])]);
}

#[test]
fn vertical_advance_normalizes_oversized_row_start() {
    // Row 0 starts at byte 40 of r1; row 1 wraps to r2 byte 9.
    assert_eq!(
        addresses(2, "r1.40<1;1,0>:b"),
        [Address::new(1, [40]), Address::new(2, [9])]
    );
}

#[test]
fn extreme_strides_saturate_instead_of_overflowing() {
    let mut iter = decode("r0.0<0;4294967295,4294967295>:df", 4_294_967_295).unwrap();
    let address = iter.nth(536_870_913).unwrap();
    assert_eq!(address.register, 0);
    assert_eq!(address.offsets.len(), 8);
    assert_eq!(address.start(), Some(u64::MAX - 8));
    assert_eq!(address.offsets.last(), Some(&(u64::MAX - 1)));
}

#[test]
fn misaligned_element_keeps_consecutive_offsets() {
    assert_eq!(
        addresses(1, "r0.0<0;1,0>:df").first().map(|a| a.offsets.len()),
        Some(8)
    );
    assert_eq!(
        addresses(2, "r0.0<7;1,0>:ub"),
        [Address::new(0, [0]), Address::new(0, [7])]
    );
}

// ══════════════════════════════════════════════════════════
// 3. Partition handling
// ══════════════════════════════════════════════════════════

#[test]
fn non_exact_partition_is_an_error_by_default() {
    let region = parse_region("r2.0<8;3,1>:b").unwrap();
    assert_eq!(
        generate(8, &region).unwrap_err(),
        RegionError::NonExactChannelPartition {
            simd_width: 8,
            width: 3,
        }
    );
}

#[test]
fn truncate_policy_drops_trailing_channels() {
    let region = parse_region("r2.0<8;3,1>:b").unwrap();
    let config = GeneratorConfig {
        partition: PartitionPolicy::Truncate,
        ..GeneratorConfig::default()
    };
    let out: Vec<_> = generate_with(8, &region, &config).unwrap().collect();
    assert_eq!(out, expand(1, &[(2, 0), (2, 1), (2, 2), (2, 8), (2, 9), (2, 10)]));
}

#[test]
fn truncate_policy_with_simd_below_width_is_empty() {
    let region = parse_region("r2.0<8;8,1>:b").unwrap();
    let config = GeneratorConfig {
        partition: PartitionPolicy::Truncate,
        ..GeneratorConfig::default()
    };
    assert_eq!(generate_with(4, &region, &config).unwrap().count(), 0);
}

#[test]
fn zero_simd_width_is_rejected() {
    assert_eq!(
        decode("r6.0<1>:w", 0).unwrap_err(),
        RegionError::InvalidSimdWidth
    );
}

#[test]
fn decode_surfaces_parse_errors() {
    assert!(matches!(
        decode("r6.0<1>", 8),
        Err(RegionError::MalformedDescriptor { .. })
    ));
}

// ══════════════════════════════════════════════════════════
// 4. Register geometry
// ══════════════════════════════════════════════════════════

#[test]
fn wider_registers_change_wraparound() {
    let region = parse_region("r2.17<16;8,1>:b").unwrap();
    let config = GeneratorConfig {
        register_bytes: 64,
        ..GeneratorConfig::default()
    };
    let out: Vec<_> = generate_with(16, &region, &config).unwrap().collect();
    assert!(out.iter().all(|a| a.register == 2));
    assert_eq!(out[8], Address::new(2, [33]));
}

#[test]
fn zero_register_bytes_does_not_panic() {
    let region = parse_region("r0.0<1>:b").unwrap();
    let config = GeneratorConfig {
        register_bytes: 0,
        ..GeneratorConfig::default()
    };
    let out: Vec<_> = generate_with(4, &region, &config).unwrap().collect();
    assert_eq!(out.len(), 4);
}

// ══════════════════════════════════════════════════════════
// 5. Iterator contract
// ══════════════════════════════════════════════════════════

#[test]
fn exact_size_tracks_consumption() {
    let mut iter = decode("r4.1<16;8,2>:w", 16).unwrap();
    assert_eq!(iter.len(), 16);
    let _ = iter.nth(8);
    assert_eq!(iter.len(), 7);
    assert_eq!(iter.by_ref().count(), 7);
    assert_eq!(iter.len(), 0);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn nth_matches_stepping() {
    let all: Vec<_> = decode("r2.17<16;8,1>:b", 16).unwrap().collect();
    for n in [0, 3, 7, 8, 12, 15] {
        assert_eq!(decode("r2.17<16;8,1>:b", 16).unwrap().nth(n).as_ref(), all.get(n));
    }
    assert_eq!(decode("r2.17<16;8,1>:b", 16).unwrap().nth(16), None);

    let mut iter = decode("r2.17<16;8,1>:b", 16).unwrap();
    assert_eq!(iter.nth(9).as_ref(), all.get(9));
    assert_eq!(iter.collect::<Vec<_>>(), all[10..]);
}

#[test]
fn clone_replays_from_current_position() {
    let mut iter = decode("r2.17<16;8,1>:b", 16).unwrap();
    let _ = iter.nth(3);
    let replay: Vec<_> = iter.clone().collect();
    let rest: Vec<_> = iter.collect();
    assert_eq!(replay, rest);
}

#[test]
fn repeated_generation_is_identical() {
    let region = parse_region("r3.5<1>:f").unwrap();
    let a: Vec<_> = generate(8, &region).unwrap().collect();
    let b: Vec<_> = generate(8, &region).unwrap().collect();
    assert_eq!(a, b);
}

#[test]
fn early_stop_needs_no_cleanup() {
    let first_two: Vec<_> = decode("r6.0<1>:w", 16).unwrap().take(2).collect();
    assert_eq!(first_two, expand(2, &[(6, 0), (6, 2)]));
}

#[test]
fn address_display() {
    assert_eq!(Address::new(4, [2, 3]).to_string(), "r4 [2, 3]");
}
