use crate::cursor::BitCursor;
use crate::error::{Result, StegError};

fn out_of_bounds(cursor: &BitCursor, samples: usize) -> StegError {
    StegError::StreamBoundsViolation {
        pixel: cursor.pixel(),
        pixel_count: samples / crate::constants::CHANNELS_PER_PIXEL,
    }
}

/// 将一个字节的 8 个比特 (最低位在前) 依次写入游标所指的通道比特。
/// 每次只改动目标比特，通道中的其余比特保持不变。
pub fn encode_byte(value: u8, samples: &mut [u8], cursor: &mut BitCursor) -> Result<()> {
    let len = samples.len();
    for position in 0..8 {
        let index = cursor.sample_index()?;
        let sample = samples
            .get_mut(index)
            .ok_or_else(|| out_of_bounds(cursor, len))?;
        let mask = 1u8 << cursor.bit();
        if (value >> position) & 1 == 1 {
            *sample |= mask;
        } else {
            *sample &= !mask;
        }
        cursor.advance();
    }
    Ok(())
}

/// 从游标所指的通道比特中依次读出 8 个比特，组装成一个字节 (最低位在前)。
pub fn decode_byte(samples: &[u8], cursor: &mut BitCursor) -> Result<u8> {
    let mut value = 0u8;
    for position in 0..8 {
        let index = cursor.sample_index()?;
        let sample = samples
            .get(index)
            .ok_or_else(|| out_of_bounds(cursor, samples.len()))?;
        value |= ((sample >> cursor.bit()) & 1) << position;
        cursor.advance();
    }
    Ok(value)
}

/// 以小端序写入 16 位长度头部 (低字节在前)。
pub fn encode_length_header(length: u16, samples: &mut [u8], cursor: &mut BitCursor) -> Result<()> {
    length
        .to_le_bytes()
        .into_iter()
        .try_for_each(|byte| encode_byte(byte, samples, cursor))
}

/// 读取 16 位小端序长度头部。
pub fn decode_length_header(samples: &[u8], cursor: &mut BitCursor) -> Result<u16> {
    let low = decode_byte(samples, cursor)?;
    let high = decode_byte(samples, cursor)?;
    Ok(u16::from_le_bytes([low, high]))
}
