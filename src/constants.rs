/// 嵌入在比特流开头的长度头部的字节数。
/// 长度以 `u16` 小端序存储，因此单次最多可嵌入 65535 字节。
pub const LENGTH_HEADER_SIZE: usize = 2;

/// 读取源数据和写出提取结果时使用的块大小 (字节)。
/// 仅影响 I/O 效率，不影响编码结果。
pub const CHUNK_SIZE: usize = 4096;

/// 每个像素的颜色通道数 (R, G, B)。
pub const CHANNELS_PER_PIXEL: usize = 3;

/// 每像素可用比特数的下限和上限。
pub const MIN_BITS_PER_PIXEL: u8 = 3;
pub const MAX_BITS_PER_PIXEL: u8 = 24;

/// 进度回调的默认粒度 (百分比)。
pub const DEFAULT_PERCENT_GRAIN: u8 = 10;

/// 进程退出码。
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_INVALID_ARGUMENTS: u8 = 1;
pub const EXIT_INVALID_OPERATION: u8 = 2;
pub const EXIT_OPERATION_FAILED: u8 = 3;
