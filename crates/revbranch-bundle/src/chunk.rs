use std::io::{self, Write};

use byteorder::{BigEndian, WriteBytesExt};

/// Write one mercurial changegroup chunk: a big-endian `i32` total length
/// (length field included) followed by `data`.
pub fn write_chunk<W: Write>(sink: &mut W, data: &[u8]) -> io::Result<()> {
    let len = (data.len() + 4) as i32;
    sink.write_i32::<BigEndian>(len)?;
    sink.write_all(data)
}

/// Write the zero-length chunk that terminates a changegroup section.
pub fn write_end_chunk<W: Write>(sink: &mut W) -> io::Result<()> {
    sink.write_i32::<BigEndian>(0)
}
