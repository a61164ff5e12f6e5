use crate::constants::{CHANNELS_PER_PIXEL, MAX_BITS_PER_PIXEL, MIN_BITS_PER_PIXEL};
use crate::error::{Result, StegError};

/// 每像素用于承载数据的比特数 (三个通道之和)。
///
/// 只能通过 [`BitDensity::new`] 构造，因此持有该值即意味着它是
/// 3 到 24 之间的 3 的倍数。该值不会写入输出图像，嵌入和提取时必须一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitDensity(u8);

impl BitDensity {
    pub fn new(bits_per_pixel: u8) -> Result<Self> {
        let in_range = (MIN_BITS_PER_PIXEL..=MAX_BITS_PER_PIXEL).contains(&bits_per_pixel);
        if !in_range || bits_per_pixel % CHANNELS_PER_PIXEL as u8 != 0 {
            return Err(StegError::InvalidBitsPerPixel(bits_per_pixel));
        }
        Ok(BitDensity(bits_per_pixel))
    }

    pub fn bits_per_pixel(self) -> u8 {
        self.0
    }

    /// 每个通道使用的低位比特数。
    pub fn bits_per_channel(self) -> u8 {
        self.0 / CHANNELS_PER_PIXEL as u8
    }
}
