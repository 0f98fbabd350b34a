use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::ParserError;
use crate::common::reader::Parseable;
use crate::common::writer::Writable;

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct C3Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct C2Vector {
    pub x: f32,
    pub y: f32,
}

/// Stored as x, y, z, w.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct C4Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for C4Quaternion {
    fn default() -> Self {
        C4Quaternion {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

/// 3x3 matrix in column-major order, i.e. `columns[0]` are the first three floats in the file.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct C33Matrix {
    pub columns: [C3Vector; 3],
}

impl C33Matrix {
    pub fn to_cols_array(&self) -> [f32; 9] {
        let [a, b, c] = self.columns;
        [a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z]
    }

    pub fn from_cols_array(values: &[f32; 9]) -> Self {
        C33Matrix {
            columns: [
                C3Vector {
                    x: values[0],
                    y: values[1],
                    z: values[2],
                },
                C3Vector {
                    x: values[3],
                    y: values[4],
                    z: values[5],
                },
                C3Vector {
                    x: values[6],
                    y: values[7],
                    z: values[8],
                },
            ],
        }
    }
}

impl Parseable<C3Vector> for C3Vector {
    fn parse<R: Read>(rdr: &mut R) -> Result<C3Vector, ParserError> {
        Ok(C3Vector {
            x: rdr.read_f32::<LittleEndian>()?,
            y: rdr.read_f32::<LittleEndian>()?,
            z: rdr.read_f32::<LittleEndian>()?,
        })
    }
}

impl Writable for C3Vector {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), ParserError> {
        wtr.write_f32::<LittleEndian>(self.x)?;
        wtr.write_f32::<LittleEndian>(self.y)?;
        wtr.write_f32::<LittleEndian>(self.z)?;
        Ok(())
    }
}

impl Parseable<C2Vector> for C2Vector {
    fn parse<R: Read>(rdr: &mut R) -> Result<C2Vector, ParserError> {
        Ok(C2Vector {
            x: rdr.read_f32::<LittleEndian>()?,
            y: rdr.read_f32::<LittleEndian>()?,
        })
    }
}

impl Writable for C2Vector {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), ParserError> {
        wtr.write_f32::<LittleEndian>(self.x)?;
        wtr.write_f32::<LittleEndian>(self.y)?;
        Ok(())
    }
}

impl Parseable<C4Quaternion> for C4Quaternion {
    fn parse<R: Read>(rdr: &mut R) -> Result<C4Quaternion, ParserError> {
        Ok(C4Quaternion {
            x: rdr.read_f32::<LittleEndian>()?,
            y: rdr.read_f32::<LittleEndian>()?,
            z: rdr.read_f32::<LittleEndian>()?,
            w: rdr.read_f32::<LittleEndian>()?,
        })
    }
}

impl Writable for C4Quaternion {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), ParserError> {
        wtr.write_f32::<LittleEndian>(self.x)?;
        wtr.write_f32::<LittleEndian>(self.y)?;
        wtr.write_f32::<LittleEndian>(self.z)?;
        wtr.write_f32::<LittleEndian>(self.w)?;
        Ok(())
    }
}

impl Parseable<C33Matrix> for C33Matrix {
    fn parse<R: Read>(rdr: &mut R) -> Result<C33Matrix, ParserError> {
        Ok(C33Matrix {
            columns: [C3Vector::parse(rdr)?, C3Vector::parse(rdr)?, C3Vector::parse(rdr)?],
        })
    }
}

impl Writable for C33Matrix {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), ParserError> {
        for column in &self.columns {
            column.write(wtr)?;
        }
        Ok(())
    }
}
