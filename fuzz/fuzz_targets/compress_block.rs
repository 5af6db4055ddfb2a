#![no_main]
use libfuzzer_sys::fuzz_target;

use lzsa::engine::encode::compress_block;
use lzsa::engine::matcher::MatchFinder;

fuzz_target!(|data: &[u8]| {
    // First byte picks the policy, the rest is one block with no history.
    let Some((&mode, block)) = data.split_first() else {
        return;
    };
    let min_match = 2 + (mode as usize & 3);
    let lazy = mode & 0x10 != 0;
    let raw = mode & 0x20 != 0;
    let block = &block[..block.len().min(1 << 16)];

    let mut finder = MatchFinder::new(min_match, 32).expect("match finder tables");
    let Some(encoded) = compress_block(block, 0, block.len(), &mut finder, lazy, raw, 0) else {
        // Only a literal run longer than 0xFFFF may fail.
        assert_eq!(block.len(), 1 << 16);
        return;
    };

    let stats = &encoded.stats;
    assert!(encoded.command_count >= 1);
    assert_eq!(stats.matches.divisor + 1, encoded.command_count);
    assert!(stats.matches.divisor == 0 || stats.matches.min_len as usize >= min_match);
    assert!(stats.literals.total + stats.matches.total_lens == block.len() as u64);
    assert!(encoded.max_gain >= 0);
});
