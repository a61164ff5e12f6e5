//! # 位图读写模块
//!
//! 借助 `image` crate 读写无损图像，统一转换成 8 位 RGB 像素。
//! 像素以行优先顺序排列在一个扁平的 `R, G, B` 样本缓冲区中，
//! 编解码核心只通过 [`Bitmap::samples`] / [`Bitmap::samples_mut`] 访问。

use crate::error::{Result, StegError};
use image::{ImageFormat, RgbImage};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    image: RgbImage,
}

impl Bitmap {
    /// 读取并解码图像文件。
    ///
    /// # Errors
    ///
    /// 文件不存在或无法解码时返回带有路径的 [`StegError::Bitmap`]。
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path).map_err(|source| StegError::Bitmap {
            operation: "load",
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Bitmap {
            image: image.into_rgb8(),
        })
    }

    /// 由内存中的样本构造位图，`samples` 长度必须等于 `width * height * 3`。
    pub fn from_samples(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        let len = samples.len();
        let expected = width as usize * height as usize * crate::constants::CHANNELS_PER_PIXEL;
        Some(samples)
            .filter(|_| len == expected)
            .and_then(|samples| RgbImage::from_raw(width, height, samples))
            .map(|image| Bitmap { image })
            .ok_or(StegError::InvalidDimensions {
                width,
                height,
                samples: len,
            })
    }

    /// 按扩展名选择格式保存；扩展名缺失或无法识别时保存为 BMP。
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Bmp);
        self.image
            .save_with_format(path, format)
            .map_err(|source| StegError::Bitmap {
                operation: "save",
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn samples(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }
}
