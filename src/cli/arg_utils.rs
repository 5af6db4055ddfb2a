// arg_utils.rs - small helpers shared by the argument parser.

/// Returns the last path component of `path`, handling both `/` and `\` separators.
///
/// Used to show a short program name in the usage banner.
pub fn last_name_from_path(path: &str) -> &str {
    let after_slash = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    match after_slash.rfind('\\') {
        Some(pos) => &after_slash[pos + 1..],
        None => after_slash,
    }
}

/// Parses `s` as a base-10 integer that must consume the whole string.
///
/// An optional leading `+` or `-` is accepted, as is leading whitespace;
/// trailing characters of any kind (including whitespace) are rejected.
/// Returns `None` for an empty string, a lone sign or an out-of-range value.
pub fn read_int_exact(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || digits.starts_with('+') {
        return None;
    }
    digits.parse::<i64>().ok()
}

/// Value glued to a short flag, as in `-Ddict.bin` or `-m3`.
///
/// `None` when `arg` is not `flag` followed by at least one more character,
/// so a bare `-D` leaves the caller to read the next token.
pub fn attached_value<'a>(arg: &'a str, flag: &str) -> Option<&'a str> {
    arg.strip_prefix(flag).filter(|rest| !rest.is_empty())
}
