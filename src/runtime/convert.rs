/* Copyright (c) 2024 Jeremy Davis (jeremydavis519@gmail.com)
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the "Software"), to deal in the Software without restriction,
 * including without limitation the rights to use, copy, modify, merge, publish, distribute,
 * sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
 * NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 */

//! The JavaScript-to-IDL conversion algorithms, https://webidl.spec.whatwg.org/#es-type-mapping.
//!
//! Every function here is total: it never panics, and on failure it populates the caller's
//! [`ErrorResult`] and returns a defined sentinel (usually the target type's zero value).

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive, Zero};

use super::error::ErrorResult;
use super::jsvalue::JSValue;
use super::primitive::Utf16CodeUnits;
use super::restricted::Restricted;

/// Which of the extended-attribute conversion modifiers apply at a given call site. Most
/// conversions only look at one or two of these fields; `buffer.rs` is the only consumer of
/// `allow_shared`/`allow_resizable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionModifiers {
    pub clamp: bool,
    pub enforce_range: bool,
    pub legacy_null_to_empty_string: bool,
    pub allow_shared: bool,
    pub allow_resizable: bool,
}

// ---- ToBoolean --------------------------------------------------------------------------------

pub fn to_boolean(value: &JSValue) -> bool {
    value.to_boolean()
}

// ---- ToNumber (a restriction of the full ECMAScript algorithm; this crate has no engine to
// invoke an object's `valueOf`/`Symbol.toPrimitive`, so `Object` always throws) ----------------

fn to_number(value: &JSValue, err: &mut ErrorResult) -> f64 {
    match value {
        JSValue::Undefined => f64::NAN,
        JSValue::Null => 0.0,
        JSValue::Boolean(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        JSValue::Number(n) => *n,
        JSValue::BigInt(_) => {
            err.throw_type_error("cannot convert a BigInt to a number");
            0.0
        }
        JSValue::String(units) => string_to_number(units),
        JSValue::Object(_) => {
            err.throw_type_error("cannot convert an object to a number without a JavaScript engine");
            0.0
        }
    }
}

fn string_to_number(units: &[u16]) -> f64 {
    let s: String = String::from_utf16_lossy(units);
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if trimmed == "Infinity" || trimmed == "+Infinity" {
        return f64::INFINITY;
    }
    if trimmed == "-Infinity" {
        return f64::NEG_INFINITY;
    }
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

// ---- Integer conversions -----------------------------------------------------------------------

/// Shared implementation of every `ToByte`/`ToOctet`/.../`ToUnsignedLongLong` algorithm. `bits`
/// is the target width, `signed` picks the representable range. Returns the converted value as
/// an `i128`, which always fits regardless of width, so callers just narrow it losslessly.
fn to_integer_generic(value: &JSValue, bits: u32, signed: bool, modifiers: ConversionModifiers, err: &mut ErrorResult) -> i128 {
    let x = to_number(value, err);
    if err.has_failed() {
        return 0;
    }

    let (lower, upper): (i128, i128) = if signed {
        (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    } else {
        (0, (1i128 << bits) - 1)
    };

    if modifiers.enforce_range {
        if x.is_nan() || x.is_infinite() {
            err.throw_type_error("value is not a finite number");
            return 0;
        }
        let truncated = x.trunc();
        if truncated < lower as f64 || truncated > upper as f64 {
            err.throw_type_error("value is outside the representable range");
            return 0;
        }
        return truncated as i128;
    }

    if modifiers.clamp {
        if x.is_nan() {
            return 0;
        }
        let clamped = x.max(lower as f64).min(upper as f64);
        return round_half_to_even(clamped) as i128;
    }

    // Modulo (wrapping) conversion, the default.
    if x.is_nan() || x == 0.0 || x.is_infinite() {
        return 0;
    }
    let int_part = x.signum() * x.abs().floor();
    let modulus = 1i128 << bits;
    let mut wrapped = (int_part as i128).rem_euclid(modulus);
    if signed && wrapped >= modulus / 2 {
        wrapped -= modulus;
    }
    wrapped
}

fn round_half_to_even(x: f64) -> f64 {
    let floor = x.floor();
    let diff = x - floor;
    if diff < 0.5 {
        floor
    } else if diff > 0.5 {
        floor + 1.0
    } else if (floor as i64) % 2 == 0 {
        floor
    } else {
        floor + 1.0
    }
}

pub fn to_byte(value: &JSValue, modifiers: ConversionModifiers, err: &mut ErrorResult) -> i8 {
    to_integer_generic(value, 8, true, modifiers, err) as i8
}

pub fn to_octet(value: &JSValue, modifiers: ConversionModifiers, err: &mut ErrorResult) -> u8 {
    to_integer_generic(value, 8, false, modifiers, err) as u8
}

pub fn to_short(value: &JSValue, modifiers: ConversionModifiers, err: &mut ErrorResult) -> i16 {
    to_integer_generic(value, 16, true, modifiers, err) as i16
}

pub fn to_unsigned_short(value: &JSValue, modifiers: ConversionModifiers, err: &mut ErrorResult) -> u16 {
    to_integer_generic(value, 16, false, modifiers, err) as u16
}

pub fn to_long(value: &JSValue, modifiers: ConversionModifiers, err: &mut ErrorResult) -> i32 {
    to_integer_generic(value, 32, true, modifiers, err) as i32
}

pub fn to_unsigned_long(value: &JSValue, modifiers: ConversionModifiers, err: &mut ErrorResult) -> u32 {
    to_integer_generic(value, 32, false, modifiers, err) as u32
}

pub fn to_long_long(value: &JSValue, modifiers: ConversionModifiers, err: &mut ErrorResult) -> i64 {
    to_integer_generic(value, 64, true, modifiers, err) as i64
}

pub fn to_unsigned_long_long(value: &JSValue, modifiers: ConversionModifiers, err: &mut ErrorResult) -> u64 {
    to_integer_generic(value, 64, false, modifiers, err) as u64
}

// ---- Float/double conversions -------------------------------------------------------------------

pub fn to_float(value: &JSValue, err: &mut ErrorResult) -> Restricted<f32> {
    let x = to_number(value, err);
    if err.has_failed() {
        return unsafe { Restricted::new_unchecked(0.0) };
    }
    let narrowed = x as f32;
    match Restricted::try_new(narrowed) {
        Some(r) => r,
        None => {
            err.throw_type_error("value is not a finite float");
            unsafe { Restricted::new_unchecked(0.0) }
        }
    }
}

pub fn to_unrestricted_float(value: &JSValue, err: &mut ErrorResult) -> f32 {
    to_number(value, err) as f32
}

pub fn to_double(value: &JSValue, err: &mut ErrorResult) -> Restricted<f64> {
    let x = to_number(value, err);
    if err.has_failed() {
        return unsafe { Restricted::new_unchecked(0.0) };
    }
    match Restricted::try_new(x) {
        Some(r) => r,
        None => {
            err.throw_type_error("value is not a finite double");
            unsafe { Restricted::new_unchecked(0.0) }
        }
    }
}

pub fn to_unrestricted_double(value: &JSValue, err: &mut ErrorResult) -> f64 {
    to_number(value, err)
}

// ---- BigInt conversion -------------------------------------------------------------------------

pub fn to_bigint(value: &JSValue, err: &mut ErrorResult) -> BigInt {
    match value {
        JSValue::BigInt(b) => b.clone(),
        JSValue::Boolean(b) => BigInt::from(if *b { 1 } else { 0 }),
        JSValue::Number(n) => {
            if n.fract() != 0.0 || n.is_nan() || n.is_infinite() {
                err.throw_type_error("cannot convert a non-integer number to a BigInt");
                return BigInt::zero();
            }
            // `as i64` would saturate for any integral magnitude past i64::MAX/MIN; BigInt has no
            // such ceiling, so go through `from_f64` to keep the conversion exact.
            BigInt::from_f64(*n).unwrap_or_else(BigInt::zero)
        }
        JSValue::String(units) => match string_to_bigint(units) {
            Some(b) => b,
            None => {
                err.throw_syntax_error("malformed BigInt string");
                BigInt::zero()
            }
        },
        JSValue::Undefined | JSValue::Null | JSValue::Object(_) => {
            err.throw_type_error("cannot convert this value to a BigInt");
            BigInt::zero()
        }
    }
}

fn string_to_bigint(units: &[u16]) -> Option<BigInt> {
    let s: String = String::from_utf16_lossy(units);
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(BigInt::zero());
    }
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(r) => (-1, r),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let magnitude = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        BigInt::parse_bytes(hex.as_bytes(), 16)?
    } else if let Some(oct) = rest.strip_prefix("0o").or_else(|| rest.strip_prefix("0O")) {
        BigInt::parse_bytes(oct.as_bytes(), 8)?
    } else if let Some(bin) = rest.strip_prefix("0b").or_else(|| rest.strip_prefix("0B")) {
        BigInt::parse_bytes(bin.as_bytes(), 2)?
    } else {
        BigInt::parse_bytes(rest.as_bytes(), 10)?
    };
    Some(magnitude * sign)
}

/// `[EnforceRange]`/`[Clamp]` applied to a BigInt conversion against a caller-supplied range
/// (used for sized typed arrays such as `bigint64`/`biguint64`; rare outside that context).
pub fn bigint_in_range(value: BigInt, min: &BigInt, max: &BigInt, modifiers: ConversionModifiers, err: &mut ErrorResult) -> BigInt {
    if value < *min || value > *max {
        if modifiers.enforce_range {
            err.throw_type_error("BigInt value is outside the representable range");
            return BigInt::zero();
        }
        if modifiers.clamp {
            return value.max(min.clone()).min(max.clone());
        }
    }
    value
}

// ---- String conversions --------------------------------------------------------------------------

/// https://webidl.spec.whatwg.org/#es-DOMString
pub fn to_dom_string(value: &JSValue, modifiers: ConversionModifiers, err: &mut ErrorResult) -> String {
    if matches!(value, JSValue::Null) && modifiers.legacy_null_to_empty_string {
        return String::new();
    }
    match value {
        JSValue::Undefined => "undefined".to_string(),
        JSValue::Null => "null".to_string(),
        JSValue::Boolean(b) => b.to_string(),
        JSValue::Number(n) => format_ecmascript_number(*n),
        JSValue::BigInt(b) => b.to_string(),
        JSValue::String(units) => String::from_utf16_lossy(units),
        JSValue::Object(_) => {
            err.throw_type_error("cannot convert an object to a string without a JavaScript engine");
            String::new()
        }
    }
}

fn format_ecmascript_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        n.to_string()
    }
}

/// https://webidl.spec.whatwg.org/#es-ByteString -- throws if any code unit is outside Latin-1.
pub fn to_byte_string(value: &JSValue, modifiers: ConversionModifiers, err: &mut ErrorResult) -> Vec<u8> {
    let dom_string = to_dom_string(value, modifiers, err);
    if err.has_failed() {
        return Vec::new();
    }
    let mut bytes = Vec::with_capacity(dom_string.len());
    for unit in Utf16CodeUnits::new(&dom_string) {
        if unit > 0xFF {
            err.throw_type_error("string contains a character outside Latin-1 range");
            return Vec::new();
        }
        bytes.push(unit as u8);
    }
    bytes
}

/// https://webidl.spec.whatwg.org/#es-USVString -- replaces unpaired surrogates with U+FFFD.
pub fn to_usv_string(value: &JSValue, modifiers: ConversionModifiers, err: &mut ErrorResult) -> String {
    match value {
        JSValue::String(units) => replace_unpaired_surrogates(units),
        other => {
            let dom_string = to_dom_string(other, modifiers, err);
            if err.has_failed() {
                return String::new();
            }
            let units: Vec<u16> = Utf16CodeUnits::new(&dom_string).collect();
            replace_unpaired_surrogates(&units)
        }
    }
}

fn replace_unpaired_surrogates(units: &[u16]) -> String {
    let mut out = String::with_capacity(units.len());
    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        if (0xD800..=0xDBFF).contains(&unit) {
            // High surrogate: valid only if immediately followed by a low surrogate.
            if i + 1 < units.len() && (0xDC00..=0xDFFF).contains(&units[i + 1]) {
                let pair = [unit, units[i + 1]];
                out.push_str(&String::from_utf16_lossy(&pair));
                i += 2;
                continue;
            }
            out.push('\u{FFFD}');
        } else if (0xDC00..=0xDFFF).contains(&unit) {
            // Lone low surrogate.
            out.push('\u{FFFD}');
        } else {
            out.push(char::from_u32(unit as u32).unwrap_or('\u{FFFD}'));
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_modifiers() -> ConversionModifiers {
        ConversionModifiers::default()
    }

    #[test]
    fn to_octet_wraps_modulo_256() {
        let mut err = ErrorResult::new();
        assert_eq!(to_octet(&JSValue::Number(257.0), no_modifiers(), &mut err), 1);
        assert!(!err.has_failed());
    }

    #[test]
    fn to_byte_enforce_range_rejects_out_of_range() {
        let mut err = ErrorResult::new();
        let modifiers = ConversionModifiers { enforce_range: true, ..Default::default() };
        to_byte(&JSValue::Number(200.0), modifiers, &mut err);
        assert!(err.has_failed());
    }

    #[test]
    fn to_octet_clamp_uses_round_half_to_even() {
        let mut err = ErrorResult::new();
        let modifiers = ConversionModifiers { clamp: true, ..Default::default() };
        // 2.5 is a tie; the even neighbor is 2.
        assert_eq!(to_octet(&JSValue::Number(2.5), modifiers, &mut err), 2);
        // 3.5 is a tie; the even neighbor is 4.
        assert_eq!(to_octet(&JSValue::Number(3.5), modifiers, &mut err), 4);
        assert_eq!(to_octet(&JSValue::Number(1000.0), modifiers, &mut err), 255);
    }

    #[test]
    fn to_double_rejects_non_finite() {
        let mut err = ErrorResult::new();
        to_double(&JSValue::Number(f64::NAN), no_modifiers(), &mut err);
        assert!(err.has_failed());
    }

    #[test]
    fn to_unrestricted_double_accepts_nan() {
        let mut err = ErrorResult::new();
        let result = to_unrestricted_double(&JSValue::Number(f64::NAN), &mut err);
        assert!(result.is_nan());
        assert!(!err.has_failed());
    }

    #[test]
    fn dom_string_legacy_null_to_empty() {
        let mut err = ErrorResult::new();
        let modifiers = ConversionModifiers { legacy_null_to_empty_string: true, ..Default::default() };
        assert_eq!(to_dom_string(&JSValue::Null, modifiers, &mut err), "");
        assert_eq!(to_dom_string(&JSValue::Null, no_modifiers(), &mut err), "null");
    }

    #[test]
    fn byte_string_rejects_non_latin1() {
        let mut err = ErrorResult::new();
        to_byte_string(&JSValue::from_str("héllo"), no_modifiers(), &mut err);
        // 'é' (U+00E9) is within Latin-1, should not fail.
        assert!(!err.has_failed());
        let mut err2 = ErrorResult::new();
        to_byte_string(&JSValue::from_str("\u{1F600}"), no_modifiers(), &mut err2);
        assert!(err2.has_failed());
    }

    #[test]
    fn usv_string_replaces_lone_surrogate() {
        let lone_high: Vec<u16> = vec![0xD800];
        let result = replace_unpaired_surrogates(&lone_high);
        assert_eq!(result, "\u{FFFD}");
    }

    #[test]
    fn to_bigint_from_hex_string() {
        let mut err = ErrorResult::new();
        let result = to_bigint(&JSValue::from_str("0x1A"), &mut err);
        assert!(!err.has_failed());
        assert_eq!(result, BigInt::from(26));
    }

    #[test]
    fn to_bigint_from_non_integer_number_fails() {
        let mut err = ErrorResult::new();
        to_bigint(&JSValue::Number(1.5), &mut err);
        assert!(err.has_failed());
    }

    #[test]
    fn to_bigint_malformed_string_is_syntax_error() {
        let mut err = ErrorResult::new();
        to_bigint(&JSValue::from_str("not a number"), &mut err);
        assert!(err.has_failed());
    }

    #[test]
    fn to_number_on_bigint_throws_type_error() {
        let mut err = ErrorResult::new();
        let x = to_number(&JSValue::BigInt(BigInt::from(1)), &mut err);
        assert!(err.has_failed());
        assert!(x.is_nan() || x == 0.0);
    }

    #[test]
    fn to_bigint_from_number_past_i64_range_is_exact() {
        let mut err = ErrorResult::new();
        let result = to_bigint(&JSValue::Number(1e20), &mut err);
        assert!(!err.has_failed());
        assert_eq!(result, BigInt::parse_bytes(b"100000000000000000000", 10).unwrap());
    }

    #[test]
    fn unused_import_guard() {
        // Keeps `ToPrimitive` available for downstream BigInt-to-primitive narrowing without
        // every call site needing its own import.
        let _ = BigInt::from(1).to_i64();
    }
}
