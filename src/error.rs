//! # 错误类型模块
//!
//! 库内所有操作返回 [`StegError`]。每个变体都可以通过 [`StegError::kind`]
//! 归入四类错误之一，调用方据此区分参数错误、I/O 错误、容量不足和越界。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 错误的大类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidParameter,
    Io,
    CapacityExceeded,
    StreamBoundsViolation,
}

#[derive(Error, Debug)]
pub enum StegError {
    #[error("Invalid bits per pixel: {0}. Must be a multiple of 3 between 3 and 24")]
    InvalidBitsPerPixel(u8),

    #[error("Invalid progress granularity: {0}. Must be between 1 and 100")]
    InvalidPercentGrain(u8),

    #[error("Failed to {operation} '{}'", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to {operation} bitmap '{}'", .path.display())]
    Bitmap {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid bitmap dimensions {width}x{height}: sample buffer holds {samples} bytes")]
    InvalidDimensions {
        width: u32,
        height: u32,
        samples: usize,
    },

    #[error("Not enough space in the image. Required: {required} bytes, available: {available} bytes")]
    CapacityExceeded { required: u64, available: u64 },

    #[error("Bit cursor moved past the last pixel (pixel {pixel} of {pixel_count})")]
    StreamBoundsViolation { pixel: usize, pixel_count: usize },
}

impl StegError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StegError::InvalidBitsPerPixel(_)
            | StegError::InvalidPercentGrain(_)
            | StegError::InvalidDimensions { .. } => ErrorKind::InvalidParameter,
            StegError::Io { .. } | StegError::Bitmap { .. } => ErrorKind::Io,
            StegError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            StegError::StreamBoundsViolation { .. } => ErrorKind::StreamBoundsViolation,
        }
    }

    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StegError::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StegError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            StegError::InvalidBitsPerPixel(5).kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            StegError::io("open", "a.bin", io::Error::other("boom")).kind(),
            ErrorKind::Io
        );
        assert_eq!(
            StegError::CapacityExceeded {
                required: 10,
                available: 2
            }
            .kind(),
            ErrorKind::CapacityExceeded
        );
        assert_eq!(
            StegError::StreamBoundsViolation {
                pixel: 4,
                pixel_count: 4
            }
            .kind(),
            ErrorKind::StreamBoundsViolation
        );
    }

    #[test]
    fn io_error_names_operation_and_path() {
        let err = StegError::io("open source data", "secret.bin", io::Error::other("denied"));
        let message = err.to_string();
        assert!(message.contains("open source data"));
        assert!(message.contains("secret.bin"));
    }
}
