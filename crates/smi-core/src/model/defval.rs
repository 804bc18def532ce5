//! `DEFVAL` values: a tagged union preserving both the interpreted value and
//! the raw MIB syntax text (spec §3 "DefVal", §8 seed scenario 5).

use super::oid::Oid;

#[derive(Debug, Clone, PartialEq)]
pub enum DefValValue {
    Int(i128),
    Uint(u128),
    Str(String),
    Bytes(Vec<u8>),
    /// An enumerated/BITS label, e.g. `up` for `INTEGER { up(1), down(2) }`.
    Enum(String),
    /// `{ a, b, c }` — a BITS label set.
    BitLabels(Vec<String>),
    Oid(Oid),
}

/// A resolved `DEFVAL { ... }` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct DefVal {
    pub raw: String,
    pub value: DefValValue,
}

impl DefVal {
    pub fn new(raw: impl Into<String>, value: DefValValue) -> Self {
        Self {
            raw: raw.into(),
            value,
        }
    }

    /// The integer interpretation of this value, when one exists. Byte
    /// strings of at most 8 bytes interpret as a big-endian unsigned integer
    /// (spec §8: `'00000000'H` → 0, `'10101010'B` → 170).
    pub fn interpreted_int(&self) -> Option<i128> {
        match &self.value {
            DefValValue::Int(v) => Some(*v),
            DefValValue::Uint(v) => Some(*v as i128),
            DefValValue::Bytes(bytes) if bytes.len() <= 8 => {
                let mut acc: i128 = 0;
                for b in bytes {
                    acc = (acc << 8) | i128::from(*b);
                }
                Some(acc)
            }
            _ => None,
        }
    }

    /// A display form suitable for user-facing output (spec §8 seed
    /// scenario 5: `defval.string == "0"` for `'00000000'H`).
    pub fn display_string(&self) -> String {
        match &self.value {
            DefValValue::Int(v) => v.to_string(),
            DefValValue::Uint(v) => v.to_string(),
            DefValValue::Str(s) => s.clone(),
            DefValValue::Bytes(_) => self
                .interpreted_int()
                .map(|v| v.to_string())
                .unwrap_or_else(|| self.raw.clone()),
            DefValValue::Enum(s) => s.clone(),
            DefValValue::BitLabels(labels) => labels.join(", "),
            DefValValue::Oid(oid) => oid.to_string(),
        }
    }
}
