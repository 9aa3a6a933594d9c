//! Small leaf parsers for the value types callers typically want out of a
//! dispatched `.ini` value: `bool`, the integer widths, and `f64`.
//!
//! These are deliberately thin, living outside the core parser as an
//! external collaborator; they exist as four named free functions rather
//! than reassignable function pointers.

/// Recognizes, case-insensitively: `yes|no|true|false|1|0|on|off|enabled|disabled`.
/// Anything else returns `fallback`.
pub fn get_bool(s: &str, fallback: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" | "on" | "enabled" => true,
        "no" | "false" | "0" | "off" | "disabled" => false,
        _ => fallback,
    }
}

/// Length, in bytes, of the longest prefix of `s` that looks like a
/// `strtol`/`strtod`-style numeric literal: an optional sign, then digits,
/// optionally followed (when `allow_float`) by a fractional part and/or
/// exponent.
fn numeric_prefix_len(s: &str, allow_float: bool) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0usize;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start && !allow_float {
        return 0;
    }
    let mut end = i;
    if allow_float {
        let mut j = i;
        let mut saw_digit = i > digits_start;
        if j < bytes.len() && bytes[j] == b'.' {
            let dot = j;
            j += 1;
            let frac_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > frac_start {
                saw_digit = true;
                end = j;
            } else if saw_digit {
                end = dot + 1;
            }
        }
        if saw_digit && j < bytes.len() && (bytes[j] == b'e' || bytes[j] == b'E') {
            let mut k = j + 1;
            if k < bytes.len() && (bytes[k] == b'+' || bytes[k] == b'-') {
                k += 1;
            }
            let exp_start = k;
            while k < bytes.len() && bytes[k].is_ascii_digit() {
                k += 1;
            }
            if k > exp_start {
                end = k;
            }
        }
        if !saw_digit {
            return 0;
        }
    }
    end
}

macro_rules! int_leaf {
    ($name:ident, $ty:ty) => {
        /// Parses the longest leading numeric prefix of `s` as a
        #[doc = concat!("`", stringify!($ty), "`")]
        /// , stopping at the first non-numeric byte. Returns `0` if no
        /// numeric prefix is present.
        pub fn $name(s: &str) -> $ty {
            let len = numeric_prefix_len(s, false);
            if len == 0 {
                0
            } else {
                s[..len].parse().unwrap_or(0)
            }
        }
    };
}

int_leaf!(get_int, i32);
int_leaf!(get_long, i64);
int_leaf!(get_longlong, i128);

/// Parses the longest leading numeric prefix of `s` as an `f64`, stopping
/// at the first non-numeric byte. Returns `0.0` if no numeric prefix is
/// present.
pub fn get_double(s: &str) -> f64 {
    let len = numeric_prefix_len(s, true);
    if len == 0 {
        0.0
    } else {
        s[..len].parse().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_recognizes_all_tokens() {
        for (s, expected) in [
            ("yes", true),
            ("TRUE", true),
            ("1", true),
            ("on", true),
            ("enabled", true),
            ("no", false),
            ("FALSE", false),
            ("0", false),
            ("off", false),
            ("disabled", false),
        ] {
            assert_eq!(get_bool(s, !expected), expected, "for {:?}", s);
        }
    }

    #[test]
    fn bool_falls_back_on_unrecognized() {
        assert_eq!(get_bool("maybe", true), true);
        assert_eq!(get_bool("maybe", false), false);
    }

    #[test]
    fn int_stops_at_first_non_numeric_byte() {
        assert_eq!(get_int("42px"), 42);
        assert_eq!(get_int("-7 units"), -7);
        assert_eq!(get_int("nope"), 0);
    }

    #[test]
    fn double_parses_leading_float() {
        assert_eq!(get_double("3.5kg"), 3.5);
        assert_eq!(get_double("-2.0"), -2.0);
        assert_eq!(get_double("1e3x"), 1000.0);
        assert_eq!(get_double("nope"), 0.0);
    }

    #[test]
    fn long_and_longlong_widths() {
        assert_eq!(get_long("123abc"), 123i64);
        assert_eq!(get_longlong("999999999999"), 999_999_999_999i128);
    }
}
