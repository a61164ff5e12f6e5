//! # lsb_embed 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：把任意二进制数据按比特写入 RGB 像素的低位，
//! 并带有 16 位长度头部，使提取能够自行终止。

// 声明库包含的所有模块。

pub mod bitmap;
pub mod capacity;
pub mod cli;
pub mod constants;
pub mod cursor;
pub mod density;
pub mod engine;
pub mod error;
pub mod handler;
pub mod progress;
pub mod steganography;

pub use engine::{Steganographer, Steganography};
pub use error::{ErrorKind, Result, StegError};
