//! # Field Tables
//!
//! Both TIC schemas are flat namespaces of labels. Each schema is described by
//! a [`FieldTable`]: one [`FieldSpec`] per label, naming which value token
//! feeds the field and which typed slot of the reading receives it. The table
//! is built once and drives decoding, so schema coverage can be enumerated
//! and tested label by label.
//!
//! Decoding is lenient by contract: unknown labels are skipped, and a value
//! that does not parse leaves the field at its zero value.

use crate::payload::date::decode_date;
use crate::payload::relay::RelayRegister;
use crate::payload::status::StatusRegister;
use crate::tic::frame::Frame;
use chrono::{DateTime, FixedOffset};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::num::IntErrorKind;

/// Unsigned field types, saturating at `MAX` on overflow.
pub trait TicUnsigned: Copy + Default + TryFrom<u64> {
    const MAX: Self;
}

macro_rules! tic_unsigned {
    ($($t:ty),*) => {
        $(impl TicUnsigned for $t {
            const MAX: Self = <$t>::MAX;
        })*
    };
}

tic_unsigned!(u8, u16, u32);

/// Parses an unsigned decimal token.
///
/// Anything that is not a plain run of ASCII digits yields zero. Values above
/// the target width saturate to its maximum.
pub fn decode_unsigned<T: TicUnsigned>(token: &str) -> T {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return T::default();
    }

    let wide = match token.parse::<u64>() {
        Ok(value) => value,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u64::MAX,
        Err(_) => return T::default(),
    };

    T::try_from(wide).unwrap_or(T::MAX)
}

/// Which value token of a row carries the field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueToken {
    /// `LABEL value C`
    First,
    /// `LABEL timestamp value C`
    Second,
    /// `LABEL free text with spaces C`, all tokens but the checksum
    FreeText,
}

impl ValueToken {
    pub fn extract(&self, values: &[String]) -> Option<String> {
        match self {
            ValueToken::First => values.first().cloned(),
            ValueToken::Second => values.get(1).cloned(),
            ValueToken::FreeText => values
                .split_last()
                .map(|(_checksum, text)| text.join(" ")),
        }
    }
}

/// Typed destination of a field inside a reading of type `R`.
pub enum Slot<R> {
    Text(fn(&mut R) -> &mut String),
    U8(fn(&mut R) -> &mut u8),
    U16(fn(&mut R) -> &mut u16),
    U32(fn(&mut R) -> &mut u32),
    Date(fn(&mut R) -> &mut Option<DateTime<FixedOffset>>),
    Status(fn(&mut R) -> &mut StatusRegister),
    Relay(fn(&mut R) -> &mut RelayRegister),
}

impl<R> Clone for Slot<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Slot<R> {}

impl<R> Slot<R> {
    /// Declared bit width of numeric slots.
    pub fn width(&self) -> Option<u32> {
        match self {
            Slot::U8(_) | Slot::Relay(_) => Some(u8::BITS),
            Slot::U16(_) => Some(u16::BITS),
            Slot::U32(_) | Slot::Status(_) => Some(u32::BITS),
            Slot::Text(_) | Slot::Date(_) => None,
        }
    }

    pub fn apply(&self, reading: &mut R, value: &str) {
        match self {
            Slot::Text(slot) => *slot(reading) = value.to_string(),
            Slot::U8(slot) => *slot(reading) = decode_unsigned(value),
            Slot::U16(slot) => *slot(reading) = decode_unsigned(value),
            Slot::U32(slot) => *slot(reading) = decode_unsigned(value),
            Slot::Date(slot) => *slot(reading) = decode_date(value),
            Slot::Status(slot) => *slot(reading) = StatusRegister::from_raw(decode_unsigned(value)),
            Slot::Relay(slot) => *slot(reading) = RelayRegister::from_raw(decode_unsigned(value)),
        }
    }

    /// Puts the slot back to its zero value.
    pub fn reset(&self, reading: &mut R) {
        match self {
            Slot::Text(slot) => *slot(reading) = String::new(),
            Slot::U8(slot) => *slot(reading) = 0,
            Slot::U16(slot) => *slot(reading) = 0,
            Slot::U32(slot) => *slot(reading) = 0,
            Slot::Date(slot) => *slot(reading) = None,
            Slot::Status(slot) => *slot(reading) = StatusRegister::default(),
            Slot::Relay(slot) => *slot(reading) = RelayRegister::default(),
        }
    }
}

/// One label of a schema.
pub struct FieldSpec<R> {
    /// Lowercase label as matched on the wire.
    pub name: &'static str,
    pub token: ValueToken,
    pub slot: Slot<R>,
}

impl<R> Clone for FieldSpec<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldSpec<R> {}

/// Label-indexed schema of a reading type.
pub struct FieldTable<R> {
    fields: Vec<FieldSpec<R>>,
    index: HashMap<&'static str, usize>,
}

impl<R> FieldTable<R> {
    pub fn new(fields: Vec<FieldSpec<R>>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, spec)| (spec.name, i))
            .collect();
        FieldTable { fields, index }
    }

    /// Case-insensitive label lookup.
    pub fn lookup(&self, name: &str) -> Option<&FieldSpec<R>> {
        self.index
            .get(name.to_ascii_lowercase().as_str())
            .map(|&i| &self.fields[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec<R>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decodes one row into `reading`. Returns the label whose field was set.
    ///
    /// Rows without tokens, rows missing the value token and unknown labels
    /// leave the reading untouched and return `None`.
    pub fn decode_row(&self, reading: &mut R, row: &[String]) -> Option<&'static str> {
        let (name, values) = row.split_first()?;
        if values.is_empty() {
            return None;
        }

        let Some(spec) = self.lookup(name) else {
            debug!("Ignoring unknown field {name}");
            return None;
        };

        let Some(value) = spec.token.extract(values) else {
            debug!("Field {name} has no value token");
            return None;
        };
        spec.slot.apply(reading, &value);
        Some(spec.name)
    }
}

impl<R: Default> FieldTable<R> {
    /// Builds a fresh reading from a frame. A label repeated within the
    /// frame keeps its first value.
    pub fn decode_frame(&self, frame: &Frame) -> R {
        let mut reading = R::default();
        let mut seen: HashSet<&'static str> = HashSet::new();

        for row in frame.iter() {
            if let Some(name) = row.first() {
                if let Some(spec) = self.lookup(name) {
                    if seen.contains(spec.name) {
                        debug!("Ignoring repeated field {name}");
                        continue;
                    }
                }
            }
            if let Some(name) = self.decode_row(&mut reading, row) {
                seen.insert(name);
            }
        }

        reading
    }
}
