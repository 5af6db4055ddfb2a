// Integration tests for cli/arg_utils.rs

use lzsa::cli::arg_utils::{last_name_from_path, read_int_exact, attached_value};

#[test]
fn basename_of_nested_path() {
    assert_eq!(last_name_from_path("./target/release/lzsa"), "lzsa");
    assert_eq!(last_name_from_path("dir\\sub/lzsa.exe"), "lzsa.exe");
    assert_eq!(last_name_from_path(""), "");
}

#[test]
fn int_parsing_is_whole_string() {
    assert_eq!(read_int_exact("5"), Some(5));
    assert_eq!(read_int_exact("05"), Some(5));
    assert_eq!(read_int_exact("5.0"), None);
    assert_eq!(read_int_exact("+"), None);
    assert_eq!(read_int_exact("++5"), None);
    assert_eq!(read_int_exact("99999999999999999999"), None);
}

#[test]
fn attached_values() {
    assert_eq!(attached_value("-m4", "-m"), Some("4"));
    assert_eq!(attached_value("-m", "-m"), None);
    assert_eq!(attached_value("-D../dict", "-D"), Some("../dict"));
    assert_eq!(attached_value("-v", "-m"), None);
}
