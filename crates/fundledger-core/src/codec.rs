//! JSON wire codec for fund records.
//!
//! A record is stored as a compact JSON object with its fields in
//! declaration order:
//!
//! ```text
//! {"fundId":"FUND1","name":"Equity Growth Fund","investor":"Alice","amount":10000,"returnRate":12.5,"duration":12}
//! ```
//!
//! ## Number formatting
//!
//! Floats are laid out the way existing ledger data has them. The digits
//! are the shortest that round-trip. Values with `1e-6 <= |v| < 1e21`, and
//! zero, are written in plain decimal with zero padding (`10000`,
//! `0.000005`, `1152921504606847000`). Everything else uses exponent form
//! with an explicit sign (`1e+21`, `5e-324`). Negative zero keeps its sign
//! (`-0`). Non-finite floats have no JSON form and fail to encode.
//!
//! ## String escaping
//!
//! Existing data also escapes `<`, `>` and `&` as `\u003c`, `\u003e` and
//! `\u0026`, and the line separators U+2028 / U+2029 as `\u2028` /
//! `\u2029`. The encoder does the same through [`LedgerFormatter`].
//!
//! ## Decoding
//!
//! Unknown fields are ignored. Missing or mistyped fields are an error: a
//! malformed value never decodes into a zeroed record.

use std::io;

use bytes::Bytes;
use serde::{ser::Error as _, Serialize, Serializer};
use serde_json::ser::Formatter;

use crate::error::{CodecError, Result};
use crate::record::FundRecord;

/// Encode a record into its wire bytes.
pub fn encode_record(record: &FundRecord) -> Result<Bytes> {
    to_ledger_json(record).map(Bytes::from)
}

/// Encode a list of records as a JSON array in the same layout.
pub fn encode_records(records: &[FundRecord]) -> Result<Bytes> {
    to_ledger_json(records).map(Bytes::from)
}

fn to_ledger_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, LedgerFormatter);
    value.serialize(&mut ser).map_err(CodecError::Encode)?;
    Ok(buf)
}

/// Decode wire bytes into a record.
pub fn decode_record(bytes: &[u8]) -> Result<FundRecord> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}

/// Reject floats that have no JSON form.
///
/// The layout itself is written by [`LedgerFormatter::write_f64`].
pub(crate) fn serialize_ledger_float<S>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !value.is_finite() {
        return Err(S::Error::custom(format!("unsupported float value: {}", value)));
    }
    serializer.serialize_f64(*value)
}

/// Compact JSON formatter with the float layout and string escapes ledger
/// data uses.
///
/// Only floats and string fragments are overridden; the default
/// `Formatter` methods already produce the compact layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerFormatter;

impl Formatter for LedgerFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(ledger_float(value)?.as_bytes())
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let escape = match c {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escape.as_bytes())?;
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Lay out a finite float as existing ledger data does.
fn ledger_float(value: f64) -> io::Result<String> {
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value == 0.0 {
        return Ok(format!("{}0", sign));
    }

    let abs = value.abs();
    let (digits, point) = shortest_digits(abs)?;
    let body = if (1e-6..1e21).contains(&abs) {
        plain_layout(&digits, point)
    } else {
        exponent_layout(&digits, point)
    };
    Ok(format!("{}{}", sign, body))
}

/// Shortest round-trip digits of a positive float, without leading or
/// trailing zeros, and the position of the decimal point relative to them:
/// `value == 0.DIGITS * 10^point`.
fn shortest_digits(value: f64) -> io::Result<(String, i32)> {
    let mut buf = ryu::Buffer::new();
    let printed = buf.format_finite(value);

    let (mantissa, exp) = match printed.split_once('e') {
        Some((mantissa, exp)) => {
            let exp = exp.parse::<i32>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("bad float exponent in {:?}: {}", printed, e),
                )
            })?;
            (mantissa, exp)
        }
        None => (printed, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all = format!("{}{}", int_part, frac_part);
    let trimmed = all.trim_start_matches('0');
    let point = int_part.len() as i32 + exp - (all.len() - trimmed.len()) as i32;
    Ok((trimmed.trim_end_matches('0').to_string(), point))
}

fn plain_layout(digits: &str, point: i32) -> String {
    let n = digits.len() as i32;
    if point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else if point >= n {
        format!("{}{}", digits, "0".repeat((point - n) as usize))
    } else {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{}.{}", int_part, frac_part)
    }
}

fn exponent_layout(digits: &str, point: i32) -> String {
    let (first, rest) = digits.split_at(1);
    let exp = point - 1;
    let exp_sign = if exp < 0 { '-' } else { '+' };
    if rest.is_empty() {
        format!("{}e{}{}", first, exp_sign, exp.abs())
    } else {
        format!("{}.{}e{}{}", first, rest, exp_sign, exp.abs())
    }
}
