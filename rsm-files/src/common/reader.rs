use std::io::ErrorKind::UnexpectedEof;
use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::ParserError;

pub(crate) trait Parseable<T> {
    fn parse<R: Read>(rdr: &mut R) -> Result<T, ParserError>;
}

impl Parseable<u8> for u8 {
    fn parse<R: Read>(rdr: &mut R) -> Result<u8, ParserError> {
        Ok(rdr.read_u8()?)
    }
}

impl Parseable<u16> for u16 {
    fn parse<R: Read>(rdr: &mut R) -> Result<u16, ParserError> {
        Ok(rdr.read_u16::<LittleEndian>()?)
    }
}

impl Parseable<i32> for i32 {
    fn parse<R: Read>(rdr: &mut R) -> Result<i32, ParserError> {
        Ok(rdr.read_i32::<LittleEndian>()?)
    }
}

impl Parseable<u32> for u32 {
    fn parse<R: Read>(rdr: &mut R) -> Result<u32, ParserError> {
        Ok(rdr.read_u32::<LittleEndian>()?)
    }
}

impl Parseable<f32> for f32 {
    fn parse<R: Read>(rdr: &mut R) -> Result<f32, ParserError> {
        Ok(rdr.read_f32::<LittleEndian>()?)
    }
}

/// Reads a fixed-length, NUL padded string. Everything after the first NUL is ignored.
///
/// The files predate UTF-8 and carry names in whatever code page the authoring machine
/// used, so every byte is mapped to the char with the same code point (ISO-8859-1).
/// That mapping is lossless and [`crate::common::writer::write_padded_string`] reverses it.
pub(crate) fn read_padded_string<R: Read>(rdr: &mut R, length: usize) -> Result<String, ParserError> {
    let mut buf = vec![0u8; length];
    rdr.read_exact(&mut buf)?;

    Ok(buf
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as char)
        .collect())
}

/// Reads a u32 element count followed by that many elements.
pub(crate) fn read_counted<T: Parseable<T>, R: Read>(rdr: &mut R) -> Result<Vec<T>, ParserError> {
    let count = rdr.read_u32::<LittleEndian>()?;
    // The count is untrusted, a corrupt file must end in a short read and not in a huge allocation.
    let mut list = Vec::with_capacity((count as usize).min(4096));
    for _ in 0..count {
        list.push(T::parse(rdr)?);
    }
    Ok(list)
}

/// Reads a u32, but treats a clean end of file as absence instead of an error.
pub(crate) fn read_optional_u32<R: Read>(rdr: &mut R) -> Result<Option<u32>, ParserError> {
    match rdr.read_u32::<LittleEndian>() {
        Ok(value) => Ok(Some(value)),
        // weird error handling because an EoF is only fine at this point.
        Err(err) if err.kind() == UnexpectedEof => Ok(None),
        Err(err) => Err(err.into()),
    }
}
