use byteorder::{BigEndian, ByteOrder, LittleEndian};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Byte order flag opening every WKB record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Endianness {
    BigEndian = 0,
    #[default]
    LittleEndian = 1,
}

/// Byte order flag plus type code.
pub(crate) const HEADER_BYTES: usize = 1 + 4;

/// Two doubles per coordinate.
pub(crate) const COORD_BYTES: usize = 2 * 8;

/// Count prefix of lines, rings, polygons and collections.
pub(crate) const COUNT_BYTES: usize = 4;

/// Ties a `byteorder` type to the flag written in front of records encoded with it.
pub(crate) trait WKBByteOrder: ByteOrder {
    const ENDIANNESS: Endianness;
}

impl WKBByteOrder for BigEndian {
    const ENDIANNESS: Endianness = Endianness::BigEndian;
}

impl WKBByteOrder for LittleEndian {
    const ENDIANNESS: Endianness = Endianness::LittleEndian;
}
