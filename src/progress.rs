//! # 进度报告模块
//!
//! 嵌入和提取可能需要处理上万字节，调用方可以注册一个回调，
//! 每完成 `percent_grain` 个百分点的工作就收到一次通知。
//! 回调在编解码循环所在的线程上同步调用。

use crate::error::{Result, StegError};

/// 进度回调，参数为已完成的百分比 (1..=100)。
pub type ProgressCallback = Box<dyn FnMut(u8)>;

pub struct ProgressReporter {
    callback: ProgressCallback,
    percent_grain: u8,
}

impl ProgressReporter {
    /// # Errors
    ///
    /// `percent_grain` 不在 1 到 100 之间时返回 [`StegError::InvalidPercentGrain`]。
    pub fn new(callback: impl FnMut(u8) + 'static, percent_grain: u8) -> Result<Self> {
        if !(1..=100).contains(&percent_grain) {
            return Err(StegError::InvalidPercentGrain(percent_grain));
        }
        Ok(ProgressReporter {
            callback: Box::new(callback),
            percent_grain,
        })
    }

    /// 为一次处理 `total` 字节的操作开始计数。
    ///
    /// 载荷字节数少于刻度数 (`100 / percent_grain`) 时不报告进度。
    pub fn start(&mut self, total: u64) -> ProgressSession<'_> {
        let grain = u64::from(self.percent_grain);
        let ticks = 100 / grain;
        ProgressSession {
            enabled: total / ticks > 0,
            reporter: Some(self),
            total,
            processed: 0,
            grain,
            next_threshold: grain,
        }
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("percent_grain", &self.percent_grain)
            .finish_non_exhaustive()
    }
}

/// 单次嵌入或提取期间的进度计数，调用结束即丢弃。
pub struct ProgressSession<'a> {
    reporter: Option<&'a mut ProgressReporter>,
    enabled: bool,
    total: u64,
    processed: u64,
    grain: u64,
    next_threshold: u64,
}

impl ProgressSession<'_> {
    /// 未注册回调时使用的空会话，不做任何计算。
    pub fn disabled() -> Self {
        ProgressSession {
            reporter: None,
            enabled: false,
            total: 0,
            processed: 0,
            grain: 100,
            next_threshold: 100,
        }
    }

    /// 记录一个已处理的载荷字节，必要时调用回调。
    ///
    /// 已完成的百分比 (向下取整) 跨过下一个 `grain` 的整数倍时报告一次，
    /// 报告值为向上取整的百分比。每个 `grain` 区间最多报告一次，
    /// 第一次报告不小于 `grain`。最后一个字节总会报告 100。
    pub fn record_byte(&mut self) {
        let Some(reporter) = self.reporter.as_mut() else {
            return;
        };
        if !self.enabled {
            return;
        }
        self.processed += 1;
        let floor = 100 * self.processed / self.total;
        if floor >= self.next_threshold || self.processed == self.total {
            let percent = (100 * self.processed).div_ceil(self.total).min(100);
            (reporter.callback)(percent as u8);
            self.next_threshold = (floor / self.grain + 1) * self.grain;
        }
    }
}
