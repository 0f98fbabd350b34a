use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::ParserError;

/// Inverse of [`crate::common::reader::Parseable`]: writes the exact on-disk layout.
pub trait Writable {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), ParserError>;
}

impl Writable for u8 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), ParserError> {
        Ok(wtr.write_u8(*self)?)
    }
}

impl Writable for u16 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), ParserError> {
        Ok(wtr.write_u16::<LittleEndian>(*self)?)
    }
}

impl Writable for i32 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), ParserError> {
        Ok(wtr.write_i32::<LittleEndian>(*self)?)
    }
}

impl Writable for u32 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), ParserError> {
        Ok(wtr.write_u32::<LittleEndian>(*self)?)
    }
}

impl Writable for f32 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), ParserError> {
        Ok(wtr.write_f32::<LittleEndian>(*self)?)
    }
}

/// Writes `value` NUL padded to `length` bytes, see [`crate::common::reader::read_padded_string`]
/// for the encoding.
pub(crate) fn write_padded_string<W: Write>(wtr: &mut W, value: &str, length: usize) -> Result<(), ParserError> {
    let mut buf = Vec::with_capacity(length);
    for c in value.chars() {
        let byte = u8::try_from(c).map_err(|_| ParserError::FormatError {
            reason: "String contains characters that can't be stored as single bytes",
        })?;
        buf.push(byte);
    }

    if buf.len() > length {
        return Err(ParserError::FormatError {
            reason: "String exceeds the fixed field length",
        });
    }

    buf.resize(length, 0);
    wtr.write_all(&buf)?;
    Ok(())
}

/// Writes a u32 element count followed by the elements.
pub(crate) fn write_counted<T: Writable, W: Write>(wtr: &mut W, list: &[T]) -> Result<(), ParserError> {
    write_count(wtr, list.len())?;
    for element in list {
        element.write(wtr)?;
    }
    Ok(())
}

pub(crate) fn write_count<W: Write>(wtr: &mut W, count: usize) -> Result<(), ParserError> {
    let count = u32::try_from(count).map_err(|_| ParserError::FormatError {
        reason: "Element count does not fit into 32 bits",
    })?;
    Ok(wtr.write_u32::<LittleEndian>(count)?)
}
