#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // NUL-separated tokens form the argument list.
    let text = String::from_utf8_lossy(data);
    let argv: Vec<&str> = text.split('\0').collect();

    if let Ok(opts) = lzsa::cli::args::parse_args_from(&argv) {
        assert!(
            !(opts.favor_ratio && opts.min_match_size.is_some()),
            "ratio mode resolved with an explicit minimum: {:?}",
            opts
        );
        if let Some(m) = opts.min_match_size {
            assert!((2..=5).contains(&m));
        }
    }
});
