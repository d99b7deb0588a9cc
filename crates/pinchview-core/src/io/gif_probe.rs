use std::io::{self, Cursor, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{PreviewError, Result};
use crate::frame::LoopCount;

pub const GIF_HEADER_SIZE: usize = 13;

const EXTENSION_INTRODUCER: u8 = 0x21;
const IMAGE_DESCRIPTOR: u8 = 0x2C;
const TRAILER: u8 = 0x3B;
const APPLICATION_LABEL: u8 = 0xFF;
const LOOPING_APP_IDS: [&[u8; 11]; 2] = [b"NETSCAPE2.0", b"ANIMEXTS1.0"];

/// Structural facts about a GIF, read without decoding any pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GifInfo {
    /// Logical screen size.
    pub width: u16,
    pub height: u16,
    pub frame_count: usize,
    pub loop_count: LoopCount,
    /// True when the block stream ended before the trailer.
    pub truncated: bool,
}

/// Walk the GIF block structure.
///
/// Fails only when the 13-byte header is missing or malformed; a stream cut
/// short later is reported through [`GifInfo::truncated`].
pub fn probe_gif(bytes: &[u8]) -> Result<GifInfo> {
    if bytes.len() < GIF_HEADER_SIZE {
        return Err(PreviewError::Decode("File too small for GIF header".into()));
    }
    if &bytes[0..6] != b"GIF87a" && &bytes[0..6] != b"GIF89a" {
        return Err(PreviewError::Decode("Missing GIF87a/GIF89a signature".into()));
    }

    let mut cursor = Cursor::new(bytes);
    cursor.set_position(6);
    let width = cursor.read_u16::<LittleEndian>()?;
    let height = cursor.read_u16::<LittleEndian>()?;
    let flags = cursor.read_u8()?;
    // Background color index and pixel aspect ratio.
    cursor.seek(SeekFrom::Current(2))?;
    skip_color_table(&mut cursor, flags)?;

    let mut info = GifInfo {
        width,
        height,
        frame_count: 0,
        loop_count: LoopCount::default(),
        truncated: false,
    };

    match walk_blocks(&mut cursor, &mut info) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => info.truncated = true,
        Err(e) => return Err(e.into()),
    }
    Ok(info)
}

fn walk_blocks(cursor: &mut Cursor<&[u8]>, info: &mut GifInfo) -> io::Result<()> {
    loop {
        match cursor.read_u8()? {
            EXTENSION_INTRODUCER => {
                let label = cursor.read_u8()?;
                if label == APPLICATION_LABEL {
                    if let Some(loops) = read_application_extension(cursor)? {
                        info.loop_count = loops;
                    }
                } else {
                    skip_sub_blocks(cursor)?;
                }
            }
            IMAGE_DESCRIPTOR => {
                info.frame_count += 1;
                // Left, top, width, height.
                cursor.seek(SeekFrom::Current(8))?;
                let flags = cursor.read_u8()?;
                skip_color_table(cursor, flags)?;
                // LZW minimum code size.
                cursor.read_u8()?;
                skip_sub_blocks(cursor)?;
            }
            TRAILER => return Ok(()),
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("unexpected GIF block 0x{other:02X}"),
                ))
            }
        }
    }
}

/// Returns the loop count when this is a looping application extension.
fn read_application_extension(cursor: &mut Cursor<&[u8]>) -> io::Result<Option<LoopCount>> {
    let id_len = cursor.read_u8()? as usize;
    let mut id = vec![0u8; id_len];
    cursor.read_exact(&mut id)?;

    if !LOOPING_APP_IDS.iter().any(|app| app.as_slice() == id.as_slice()) {
        skip_sub_blocks(cursor)?;
        return Ok(None);
    }

    let mut loops = None;
    loop {
        let len = cursor.read_u8()?;
        if len == 0 {
            return Ok(loops);
        }
        if len >= 3 && cursor.read_u8()? == 1 {
            let repeats = cursor.read_u16::<LittleEndian>()?;
            loops = Some(if repeats == 0 {
                LoopCount::Infinite
            } else {
                LoopCount::Finite(u32::from(repeats) + 1)
            });
            cursor.seek(SeekFrom::Current(i64::from(len) - 3))?;
        } else {
            let consumed = if len >= 3 { 1 } else { 0 };
            cursor.seek(SeekFrom::Current(i64::from(len) - consumed))?;
        }
    }
}

fn skip_color_table(cursor: &mut Cursor<&[u8]>, flags: u8) -> io::Result<()> {
    if flags & 0x80 != 0 {
        let table_size = 3 * (1i64 << ((flags & 0x07) + 1));
        cursor.seek(SeekFrom::Current(table_size))?;
    }
    Ok(())
}

fn skip_sub_blocks(cursor: &mut Cursor<&[u8]>) -> io::Result<()> {
    loop {
        let len = cursor.read_u8()?;
        if len == 0 {
            return Ok(());
        }
        cursor.seek(SeekFrom::Current(i64::from(len)))?;
    }
}
