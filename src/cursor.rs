//! # 比特游标模块
//!
//! 记录当前的像素下标、颜色通道和通道内的比特偏移，并按固定顺序推进：
//! 通道内从最低位开始，通道按 R、G、B 顺序，像素按像素序列的顺序。
//! 游标本身不持有像素数据，只计算位置，因此可以脱离图像单独测试。

use crate::constants::CHANNELS_PER_PIXEL;
use crate::density::BitDensity;
use crate::error::{Result, StegError};

/// 像素的颜色通道。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// 通道在 RGB 样本中的偏移。
    pub fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// 下一个通道；蓝色之后回到红色，并返回 `true` 表示需要换到下一个像素。
    fn next(self) -> (Channel, bool) {
        match self {
            Channel::Red => (Channel::Green, false),
            Channel::Green => (Channel::Blue, false),
            Channel::Blue => (Channel::Red, true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitCursor {
    pixel: usize,
    channel: Channel,
    bit: u8,
    bits_per_channel: u8,
    pixel_count: usize,
}

impl BitCursor {
    pub fn new(density: BitDensity, pixel_count: usize) -> Self {
        BitCursor {
            pixel: 0,
            channel: Channel::Red,
            bit: 0,
            bits_per_channel: density.bits_per_channel(),
            pixel_count,
        }
    }

    pub fn pixel(&self) -> usize {
        self.pixel
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// 当前通道内的比特偏移，始终小于每通道比特数。
    pub fn bit(&self) -> u8 {
        self.bit
    }

    /// 游标是否已经越过最后一个像素。
    pub fn is_exhausted(&self) -> bool {
        self.pixel >= self.pixel_count
    }

    /// 当前通道在扁平 RGB 样本缓冲区中的下标。
    ///
    /// # Errors
    ///
    /// 游标已越过最后一个像素时返回 [`StegError::StreamBoundsViolation`]。
    pub fn sample_index(&self) -> Result<usize> {
        if self.is_exhausted() {
            return Err(StegError::StreamBoundsViolation {
                pixel: self.pixel,
                pixel_count: self.pixel_count,
            });
        }
        Ok(self.pixel * CHANNELS_PER_PIXEL + self.channel.offset())
    }

    /// 前进一个比特。当前通道的低位用尽时切换到下一个通道，
    /// 蓝色通道用尽时切换到下一个像素。越过最后一个像素本身不是错误，
    /// 只有之后再访问通道才会失败。
    pub fn advance(&mut self) {
        self.bit += 1;
        if self.bit < self.bits_per_channel {
            return;
        }
        self.bit = 0;
        let (channel, wrapped) = self.channel.next();
        self.channel = channel;
        if wrapped {
            self.pixel += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn density(bpp: u8) -> BitDensity {
        BitDensity::new(bpp).unwrap()
    }

    #[test]
    fn one_bit_per_channel_rotates_every_step() {
        let mut cursor = BitCursor::new(density(3), 2);
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push((cursor.pixel(), cursor.channel(), cursor.bit()));
            cursor.advance();
        }
        assert_eq!(
            seen,
            vec![
                (0, Channel::Red, 0),
                (0, Channel::Green, 0),
                (0, Channel::Blue, 0),
                (1, Channel::Red, 0),
                (1, Channel::Green, 0),
                (1, Channel::Blue, 0),
            ]
        );
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn fills_low_bits_before_switching_channel() {
        let mut cursor = BitCursor::new(density(9), 1);
        for expected_bit in 0..3 {
            assert_eq!(cursor.channel(), Channel::Red);
            assert_eq!(cursor.bit(), expected_bit);
            cursor.advance();
        }
        assert_eq!(cursor.channel(), Channel::Green);
        assert_eq!(cursor.bit(), 0);
    }

    #[test]
    fn sample_index_maps_pixel_and_channel() {
        let mut cursor = BitCursor::new(density(3), 4);
        for _ in 0..5 {
            cursor.advance();
        }
        assert_eq!(cursor.pixel(), 1);
        assert_eq!(cursor.channel(), Channel::Blue);
        assert_eq!(cursor.sample_index().unwrap(), 5);
    }

    #[test]
    fn access_past_last_pixel_is_a_bounds_violation() {
        let mut cursor = BitCursor::new(density(24), 1);
        for _ in 0..24 {
            assert!(cursor.sample_index().is_ok());
            cursor.advance();
        }
        let err = cursor.sample_index().unwrap_err();
        assert!(matches!(
            err,
            StegError::StreamBoundsViolation {
                pixel: 1,
                pixel_count: 1
            }
        ));
    }
}
