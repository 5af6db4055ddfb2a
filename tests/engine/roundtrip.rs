// Integration tests for engine/file.rs - FileCompressor round trips.
//
// Every stream the engine writes is decoded again with the reference decoder
// and compared with the input. Covers:
//   - both policies and every explicit minimum match size
//   - multi-block inputs and stored (incompressible) blocks
//   - dictionaries, backward mode, raw blocks
//   - statistics, progress callbacks and the safe distance

use std::fs;
use std::path::Path;

use lzsa::config::{BLOCK_SIZE, MAX_DICT_SIZE};
use lzsa::engine::{CompressionOutcome, Engine, EngineFlags, EngineRequest, FileCompressor, StatusCode};
use tempfile::TempDir;

use super::decoder::{decode_frame, decode_raw, Decoded};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

struct Run {
    outcome: CompressionOutcome,
    stream: Vec<u8>,
    progress: Vec<(u64, u64)>,
}

fn compress(data: &[u8], dict: Option<&[u8]>, flags: EngineFlags, min_match: u32) -> Run {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.bin");
    let output = dir.path().join("output.lzsa");
    let dict_path = dir.path().join("dict.bin");
    fs::write(&input, data).unwrap();
    if let Some(dict) = dict {
        fs::write(&dict_path, dict).unwrap();
    }

    let request = EngineRequest {
        input_path: path_str(&input),
        output_path: path_str(&output),
        dictionary_path: dict.map(|_| path_str(&dict_path)),
        flags,
        min_match_size: min_match,
    };
    let mut progress = Vec::new();
    let outcome = FileCompressor::new().compress_file(&request, &mut |o, c| progress.push((o, c)));
    let stream = if outcome.status == StatusCode::Ok {
        fs::read(&output).unwrap()
    } else {
        Vec::new()
    };
    Run {
        outcome,
        stream,
        progress,
    }
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

/// Line-oriented text with plenty of short and long repeats.
fn sample_text(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len + 64);
    let mut i = 0u32;
    while out.len() < len {
        let line = format!(
            "record {:05} status={} payload={}\n",
            i,
            ["ok", "retry", "failed"][(i % 3) as usize],
            i.wrapping_mul(2_654_435_761) % 10_007
        );
        out.extend_from_slice(line.as_bytes());
        i += 1;
    }
    out.truncate(len);
    out
}

/// De Bruijn sequence B(256, 2): every two-byte pair occurs once, so the
/// encoder finds no match at all.
fn no_repeats() -> Vec<u8> {
    fn db(t: usize, p: usize, a: &mut [usize], seq: &mut Vec<u8>) {
        const K: usize = 256;
        const N: usize = 2;
        if t > N {
            if N % p == 0 {
                seq.extend(a[1..=p].iter().map(|&x| x as u8));
            }
        } else {
            a[t] = a[t - p];
            db(t + 1, p, a, seq);
            for j in a[t - p] + 1..K {
                a[t] = j;
                db(t + 1, t, a, seq);
            }
        }
    }
    let mut a = [0usize; 4];
    let mut seq = Vec::with_capacity(1 << 16);
    db(1, 1, &mut a, &mut seq);
    seq
}

fn reversed(data: &[u8]) -> Vec<u8> {
    data.iter().rev().copied().collect()
}

/// In-place decompression with the stream at the end of an
/// `original + safe_distance` buffer must never overwrite unread input.
fn assert_safe_in_place(decoded: &Decoded, outcome: &CompressionOutcome) {
    let n = outcome.original_size as i64;
    let c = outcome.compressed_size as i64;
    let start = n + i64::from(outcome.safe_distance) - c;
    for &(produced, consumed) in &decoded.boundaries {
        assert!(
            produced as i64 <= start + consumed as i64,
            "write head {} passes read head {} (safe distance {})",
            produced,
            start + consumed as i64,
            outcome.safe_distance
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn text_round_trips_under_both_policies() {
    let data = sample_text(20_000);
    for flags in [EngineFlags::FAVOR_RATIO, EngineFlags::NONE] {
        let run = compress(&data, None, flags, 0);
        assert_eq!(run.outcome.status, StatusCode::Ok);
        assert!(run.outcome.compressed_size < data.len() as u64 / 2);
        assert_eq!(run.outcome.compressed_size, run.stream.len() as u64);
        assert_eq!(decode_frame(&run.stream, &[]).data, data);
    }
}

#[test]
fn every_min_match_size_round_trips() {
    let data = sample_text(8_000);
    for m in 2..=5 {
        let run = compress(&data, None, EngineFlags::NONE, m);
        assert_eq!(run.outcome.status, StatusCode::Ok, "min match {m}");
        assert!(run.outcome.stats.matches.min_len >= m, "min match {m}");
        assert_eq!(decode_frame(&run.stream, &[]).data, data, "min match {m}");
    }
}

#[test]
fn multi_block_input_round_trips() {
    let data = sample_text(BLOCK_SIZE * 3 + 1234);
    let run = compress(&data, None, EngineFlags::FAVOR_RATIO, 0);
    assert_eq!(run.outcome.status, StatusCode::Ok);
    assert_eq!(run.outcome.original_size, data.len() as u64);
    assert_eq!(run.progress.len(), 4);
    assert_eq!(run.progress.last().unwrap().0, data.len() as u64);
    assert_eq!(decode_frame(&run.stream, &[]).data, data);
}

#[test]
fn incompressible_blocks_are_stored() {
    let data = no_repeats();
    assert_eq!(data.len(), 1 << 16);
    let run = compress(&data, None, EngineFlags::FAVOR_RATIO, 0);
    assert_eq!(run.outcome.status, StatusCode::Ok);
    // frame header + block header + payload + end mark
    assert_eq!(run.stream.len(), 3 + 3 + data.len() + 3);
    assert_eq!(run.outcome.command_count, 0);
    assert_eq!(decode_frame(&run.stream, &[]).data, data);
}

#[test]
fn dictionary_primes_the_window() {
    let dict = sample_text(30_000);
    let data = dict[10_000..20_000].to_vec();
    let plain = compress(&data, None, EngineFlags::FAVOR_RATIO, 0);
    let primed = compress(&data, Some(&dict), EngineFlags::FAVOR_RATIO, 0);
    assert_eq!(primed.outcome.status, StatusCode::Ok);
    assert!(primed.outcome.compressed_size < plain.outcome.compressed_size / 4);
    assert_eq!(decode_frame(&primed.stream, &dict).data, data);
}

#[test]
fn only_the_dictionary_tail_is_used() {
    let mut dict = vec![0xAAu8; 1000];
    dict.extend(sample_text(MAX_DICT_SIZE));
    let data = sample_text(5_000);
    let run = compress(&data, Some(&dict), EngineFlags::FAVOR_RATIO, 0);
    assert_eq!(run.outcome.status, StatusCode::Ok);
    let tail = &dict[dict.len() - MAX_DICT_SIZE..];
    assert_eq!(decode_frame(&run.stream, tail).data, data);
}

#[test]
fn backward_stream_decodes_from_the_end() {
    let data = sample_text(40_000);
    let dict = sample_text(3_000);
    let run = compress(
        &data,
        Some(&dict),
        EngineFlags::FAVOR_RATIO | EngineFlags::BACKWARD,
        0,
    );
    assert_eq!(run.outcome.status, StatusCode::Ok);
    let forward = reversed(&run.stream);
    let decoded = decode_frame(&forward, &reversed(&dict));
    assert_eq!(reversed(&decoded.data), data);
}

#[test]
fn raw_block_round_trips() {
    let data = sample_text(10_000);
    let run = compress(&data, None, EngineFlags::RAW_BLOCK, 0);
    assert_eq!(run.outcome.status, StatusCode::Ok);
    assert_ne!(&run.stream[..2], &[0x7B, 0x9E]);
    assert_eq!(decode_raw(&run.stream, &[]).data, data);
}

#[test]
fn raw_block_rejects_incompressible_data() {
    let run = compress(&no_repeats(), None, EngineFlags::RAW_BLOCK, 0);
    assert_eq!(run.outcome.status, StatusCode::RawBlockIncompressibleTooLarge);
}

// ─────────────────────────────────────────────────────────────────────────────
// Outcome details
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn runs_of_zeros_are_rle1() {
    let mut data = vec![0u8; 5_000];
    data.extend(b"abababababababababababababab".iter());
    let run = compress(&data, None, EngineFlags::FAVOR_RATIO, 0);
    let stats = &run.outcome.stats;
    assert!(stats.rle1.divisor >= 1);
    assert!(stats.rle2.divisor >= 1);
    assert_eq!(stats.matches.min_offset, 1);
    assert_eq!(decode_frame(&run.stream, &[]).data, data);
}

#[test]
fn progress_is_cumulative_and_monotonic() {
    let data = sample_text(BLOCK_SIZE * 2);
    let run = compress(&data, None, EngineFlags::NONE, 0);
    assert_eq!(run.progress.len(), 2);
    assert!(run.progress.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 < w[1].1));
    let (orig, comp) = *run.progress.last().unwrap();
    assert_eq!(orig, run.outcome.original_size);
    // The end mark is written after the last callback.
    assert_eq!(comp + 3, run.outcome.compressed_size);
}

#[test]
fn safe_distance_allows_in_place_decompression() {
    let mut data = vec![0u8; 70_000];
    data.extend(no_repeats());
    data.extend(sample_text(30_000));
    for flags in [EngineFlags::FAVOR_RATIO, EngineFlags::NONE] {
        let run = compress(&data, None, flags, 0);
        assert_eq!(run.outcome.status, StatusCode::Ok);
        let decoded = decode_frame(&run.stream, &[]);
        assert_eq!(decoded.data, data);
        assert_safe_in_place(&decoded, &run.outcome);
    }
}

#[test]
fn highly_compressible_data_needs_a_margin() {
    let data = vec![7u8; 100_000];
    let run = compress(&data, None, EngineFlags::FAVOR_RATIO, 0);
    assert!(run.outcome.safe_distance > 0);
    let decoded = decode_frame(&run.stream, &[]);
    assert_safe_in_place(&decoded, &run.outcome);
}
