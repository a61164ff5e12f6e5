use crate::constants::LENGTH_HEADER_SIZE;
use crate::density::BitDensity;
use crate::error::{Result, StegError};

/// 给定尺寸和比特密度下，图像最多能承载的字节数 (含长度头部)。
pub fn max_embeddable_bytes(width: u32, height: u32, density: BitDensity) -> u64 {
    u64::from(width) * u64::from(height) * u64::from(density.bits_per_pixel()) / 8
}

/// 单次可嵌入的最大载荷：受图像容量和 16 位长度头部两者限制。
pub fn payload_limit(width: u32, height: u32, density: BitDensity) -> u64 {
    let header = LENGTH_HEADER_SIZE as u64;
    max_embeddable_bytes(width, height, density)
        .saturating_sub(header)
        .min(u64::from(u16::MAX))
}

/// 检查长度为 `payload_len` 的载荷加上头部能否放进图像。
///
/// 嵌入前用于检查源数据，提取时用于检查读出的头部长度，
/// 后者能挡住非隐写图像或比特密度不一致时读出的无意义长度。
pub fn ensure_fits(payload_len: u64, width: u32, height: u32, density: BitDensity) -> Result<()> {
    let header = LENGTH_HEADER_SIZE as u64;
    let required = payload_len.saturating_add(header);
    let available = max_embeddable_bytes(width, height, density).min(u64::from(u16::MAX) + header);
    if required > available {
        return Err(StegError::CapacityExceeded {
            required,
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn density(bpp: u8) -> BitDensity {
        BitDensity::new(bpp).unwrap()
    }

    #[test]
    fn capacity_of_hundred_square_at_six_bits() {
        assert_eq!(max_embeddable_bytes(100, 100, density(6)), 7500);
        assert_eq!(payload_limit(100, 100, density(6)), 7498);
    }

    #[test]
    fn boundary_is_inclusive() {
        let d = density(3);
        let limit = payload_limit(20, 20, d);
        assert_eq!(limit, 148);
        assert!(ensure_fits(limit, 20, 20, d).is_ok());
        let err = ensure_fits(limit + 1, 20, 20, d).unwrap_err();
        assert!(matches!(
            err,
            StegError::CapacityExceeded {
                required: 151,
                available: 150
            }
        ));
    }

    #[test]
    fn header_width_caps_large_images() {
        let d = density(24);
        assert_eq!(payload_limit(1000, 1000, d), 65535);
        assert!(ensure_fits(65535, 1000, 1000, d).is_ok());
        assert!(ensure_fits(65536, 1000, 1000, d).is_err());
    }

    #[test]
    fn tiny_image_holds_nothing() {
        assert_eq!(payload_limit(1, 1, density(3)), 0);
        assert!(ensure_fits(0, 1, 1, density(3)).is_err());
    }
}
