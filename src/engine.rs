//! # 嵌入/提取流程模块
//!
//! [`Steganography`] 负责协调一次完整的嵌入或提取：校验参数、读取图像、
//! 校验容量、编解码长度头部、逐字节处理载荷并写出结果。
//!
//! 游标只存在于单次调用内部，实例上唯一的状态是进度回调，
//! 因此同一个实例可以依次执行任意多次操作。

use crate::bitmap::Bitmap;
use crate::capacity::ensure_fits;
use crate::constants::CHUNK_SIZE;
use crate::cursor::BitCursor;
use crate::density::BitDensity;
use crate::error::{Result, StegError};
use crate::progress::{ProgressCallback, ProgressReporter, ProgressSession};
use crate::steganography::{decode_byte, decode_length_header, encode_byte, encode_length_header};
use log::{debug, info, trace};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// 内存中载荷使用的占位路径，只出现在错误信息里。
const IN_MEMORY: &str = "<memory>";

/// 嵌入、提取和进度回调注册的抽象，命令行处理逻辑只依赖这个接口。
pub trait Steganographer {
    fn embed(
        &mut self,
        original_bitmap: &Path,
        source_data: &Path,
        destination_bitmap: &Path,
        bits_per_pixel: u8,
    ) -> Result<()>;

    fn extract(
        &mut self,
        source_bitmap: &Path,
        destination_data: &Path,
        bits_per_pixel: u8,
    ) -> Result<()>;

    fn register_progress_callback(
        &mut self,
        callback: ProgressCallback,
        percent_grain: u8,
    ) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct Steganography {
    progress: Option<ProgressReporter>,
}

impl Steganography {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册进度回调，之后的每次嵌入和提取都会调用它。再次注册会替换之前的回调。
    ///
    /// # Errors
    ///
    /// `percent_grain` 不在 1 到 100 之间时返回错误，已注册的回调保持不变。
    pub fn register_progress_callback(
        &mut self,
        callback: impl FnMut(u8) + 'static,
        percent_grain: u8,
    ) -> Result<()> {
        self.progress = Some(ProgressReporter::new(callback, percent_grain)?);
        Ok(())
    }

    /// 将 `source_data` 的全部内容嵌入 `original_bitmap` 的像素，结果保存到 `destination_bitmap`。
    ///
    /// 原始图像只读打开。目标文件只在全部数据编码完成后才写入，
    /// 任何一步失败都不会留下目标文件。
    ///
    /// # Errors
    ///
    /// * 比特密度非法 (此时不会打开任何文件)。
    /// * 源数据或图像无法读取，目标图像无法写入。
    /// * 载荷加上长度头部超出图像容量。
    pub fn embed(
        &mut self,
        original_bitmap: &Path,
        source_data: &Path,
        destination_bitmap: &Path,
        bits_per_pixel: u8,
    ) -> Result<()> {
        let density = BitDensity::new(bits_per_pixel)?;
        debug!("embedding with {} bits per pixel", density.bits_per_pixel());

        let mut source = File::open(source_data)
            .map_err(|e| StegError::io("open source data", source_data, e))?;
        let payload_len = source
            .metadata()
            .map_err(|e| StegError::io("inspect source data", source_data, e))?
            .len();

        let mut bitmap = Bitmap::load(original_bitmap)?;
        debug!(
            "loaded {}x{} bitmap from {}",
            bitmap.width(),
            bitmap.height(),
            original_bitmap.display()
        );

        embed_into(
            &mut bitmap,
            &mut source,
            payload_len,
            density,
            self.progress.as_mut(),
            source_data,
        )?;

        bitmap.save(destination_bitmap)?;
        info!(
            "embedded {} bytes into {}",
            payload_len,
            destination_bitmap.display()
        );
        Ok(())
    }

    /// 从 `source_bitmap` 中提取隐藏的数据并写入 `destination_data`。
    ///
    /// # Errors
    ///
    /// * 比特密度非法。
    /// * 图像无法读取，目标文件无法创建或写入。
    /// * 读出的长度超出图像容量 (图像未经嵌入或比特密度不一致)。
    /// * 像素在读完声明的长度之前耗尽。
    pub fn extract(
        &mut self,
        source_bitmap: &Path,
        destination_data: &Path,
        bits_per_pixel: u8,
    ) -> Result<()> {
        let density = BitDensity::new(bits_per_pixel)?;
        debug!("extracting with {} bits per pixel", density.bits_per_pixel());

        let bitmap = Bitmap::load(source_bitmap)?;
        debug!(
            "loaded {}x{} bitmap from {}",
            bitmap.width(),
            bitmap.height(),
            source_bitmap.display()
        );

        let mut destination = File::create(destination_data)
            .map_err(|e| StegError::io("create destination data", destination_data, e))?;

        let extracted = extract_to(
            &bitmap,
            &mut destination,
            density,
            self.progress.as_mut(),
            destination_data,
        )?;
        info!(
            "extracted {} bytes into {}",
            extracted,
            destination_data.display()
        );
        Ok(())
    }
}

impl Steganographer for Steganography {
    fn embed(
        &mut self,
        original_bitmap: &Path,
        source_data: &Path,
        destination_bitmap: &Path,
        bits_per_pixel: u8,
    ) -> Result<()> {
        Steganography::embed(
            self,
            original_bitmap,
            source_data,
            destination_bitmap,
            bits_per_pixel,
        )
    }

    fn extract(
        &mut self,
        source_bitmap: &Path,
        destination_data: &Path,
        bits_per_pixel: u8,
    ) -> Result<()> {
        Steganography::extract(self, source_bitmap, destination_data, bits_per_pixel)
    }

    fn register_progress_callback(
        &mut self,
        callback: ProgressCallback,
        percent_grain: u8,
    ) -> Result<()> {
        Steganography::register_progress_callback(self, callback, percent_grain)
    }
}

/// 从 `payload` 读取恰好 `payload_len` 字节并嵌入 `bitmap`，先写入长度头部。
///
/// `origin` 只用于错误信息。
pub fn embed_into(
    bitmap: &mut Bitmap,
    payload: &mut dyn Read,
    payload_len: u64,
    density: BitDensity,
    progress: Option<&mut ProgressReporter>,
    origin: &Path,
) -> Result<()> {
    ensure_fits(payload_len, bitmap.width(), bitmap.height(), density)?;
    let header = u16::try_from(payload_len).map_err(|_| StegError::CapacityExceeded {
        required: payload_len,
        available: u64::from(u16::MAX),
    })?;
    debug!("payload of {payload_len} bytes fits");

    let mut cursor = BitCursor::new(density, bitmap.pixel_count());
    let samples = bitmap.samples_mut();
    encode_length_header(header, samples, &mut cursor)?;
    debug!("length header encoded");

    let mut session = progress.map_or_else(ProgressSession::disabled, |r| r.start(payload_len));
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut remaining = payload_len;
    while remaining > 0 {
        let chunk = &mut buffer[..remaining.min(CHUNK_SIZE as u64) as usize];
        payload
            .read_exact(chunk)
            .map_err(|e| StegError::io("read source data", origin, e))?;
        for &byte in chunk.iter() {
            encode_byte(byte, samples, &mut cursor)?;
            session.record_byte();
        }
        remaining -= chunk.len() as u64;
    }
    Ok(())
}

/// 读取长度头部，校验容量，然后把声明长度的数据分块写入 `destination`。
/// 返回提取的字节数。
pub fn extract_to(
    bitmap: &Bitmap,
    destination: &mut dyn Write,
    density: BitDensity,
    progress: Option<&mut ProgressReporter>,
    origin: &Path,
) -> Result<u64> {
    let samples = bitmap.samples();
    let mut cursor = BitCursor::new(density, bitmap.pixel_count());
    let declared = u64::from(decode_length_header(samples, &mut cursor)?);
    debug!("length header declares {declared} bytes");
    ensure_fits(declared, bitmap.width(), bitmap.height(), density)?;

    let mut session = progress.map_or_else(ProgressSession::disabled, |r| r.start(declared));
    let mut chunk = Vec::with_capacity(CHUNK_SIZE);
    for _ in 0..declared {
        chunk.push(decode_byte(samples, &mut cursor)?);
        session.record_byte();
        if chunk.len() == CHUNK_SIZE {
            write_chunk(destination, &chunk, origin)?;
            chunk.clear();
        }
    }
    if !chunk.is_empty() {
        write_chunk(destination, &chunk, origin)?;
    }
    destination
        .flush()
        .map_err(|e| StegError::io("flush destination data", origin, e))?;
    Ok(declared)
}

fn write_chunk(destination: &mut dyn Write, chunk: &[u8], origin: &Path) -> Result<()> {
    trace!("flushing {} bytes", chunk.len());
    destination
        .write_all(chunk)
        .map_err(|e| StegError::io("write destination data", origin, e))
}

/// 把内存中的载荷嵌入 `bitmap`，不报告进度。
pub fn embed_bytes(bitmap: &mut Bitmap, payload: &[u8], density: BitDensity) -> Result<()> {
    let mut reader = io::Cursor::new(payload);
    embed_into(
        bitmap,
        &mut reader,
        payload.len() as u64,
        density,
        None,
        Path::new(IN_MEMORY),
    )
}

/// 从 `bitmap` 中提取载荷到内存，不报告进度。
pub fn extract_bytes(bitmap: &Bitmap, density: BitDensity) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    extract_to(bitmap, &mut payload, density, None, Path::new(IN_MEMORY))?;
    Ok(payload)
}
