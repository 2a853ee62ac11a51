//! 长匹配报告：在每个位点边界 k 上检查相邻单倍型对的 divergence，
//! 输出共享后缀长度不小于阈值 L 的匹配记录。
//!
//! 每一列独立扫描，同一段共享区域在后续列中继续满足阈值时会再次报告
//! （end 递增、start 不变），这里不做合并。

use log::{debug, info};
use rayon::prelude::*;

use crate::error::{PbwtError, Result};
use crate::index::PbwtIndex;

pub mod column;

/// 匹配记录：`hap1` 与 `hap2` 在半开区间 `[start, end)` 上完全一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchRecord {
    pub hap1: u32,
    pub hap2: u32,
    pub start: u32,
    pub end: u32,
}

impl MatchRecord {
    #[inline]
    pub fn length(&self) -> u32 {
        self.end - self.start
    }
}

impl std::fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Haplotype {} <-> {} | Start: {}, End: {}, Length: {}",
            self.hap1,
            self.hap2,
            self.start,
            self.end,
            self.length()
        )
    }
}

/// 报告参数
#[derive(Debug, Clone, Copy)]
pub struct MatchOpt {
    /// 最小匹配长度 L（位点数），需 >= 1
    pub min_length: usize,
    /// 扫描列的线程数，<= 1 时串行
    pub threads: usize,
}

impl Default for MatchOpt {
    fn default() -> Self {
        Self {
            min_length: 1,
            threads: 1,
        }
    }
}

fn check_min_length(min_length: usize) -> Result<()> {
    if min_length < 1 {
        return Err(PbwtError::value(format!(
            "minimum match length must be >= 1, got {}",
            min_length
        )));
    }
    Ok(())
}

/// 串行扫描 k = 1..=M，返回按 (k, i) 递增排列的全部匹配记录。
pub fn report_matches(index: &PbwtIndex, min_length: usize) -> Result<Vec<MatchRecord>> {
    check_min_length(min_length)?;
    let mut out = Vec::new();
    for k in 1..=index.n_sites() {
        column::scan_column(index, k, min_length, &mut out);
    }
    debug!("min_length={} -> {} matches", min_length, out.len());
    Ok(out)
}

/// 按列并行扫描，每列结果独立收集后按列序拼接，输出与 `report_matches` 完全一致。
pub fn report_matches_par(index: &PbwtIndex, min_length: usize) -> Result<Vec<MatchRecord>> {
    check_min_length(min_length)?;
    let per_column: Vec<Vec<MatchRecord>> = (1..=index.n_sites())
        .into_par_iter()
        .map(|k| {
            let mut buf = Vec::new();
            column::scan_column(index, k, min_length, &mut buf);
            buf
        })
        .collect();
    let total: usize = per_column.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(total);
    for part in per_column {
        out.extend(part);
    }
    debug!("min_length={} -> {} matches (parallel)", min_length, out.len());
    Ok(out)
}

/// 根据 `opt.threads` 选择串行或在专用线程池中并行扫描。
pub fn report_with_opt(index: &PbwtIndex, opt: MatchOpt) -> Result<Vec<MatchRecord>> {
    check_min_length(opt.min_length)?;
    info!(
        "reporting matches of length >= {} over {} sites ({} thread(s))",
        opt.min_length,
        index.n_sites(),
        opt.threads.max(1)
    );
    if opt.threads <= 1 {
        return report_matches(index, opt.min_length);
    }
    let pool = rayon::ThreadPoolBuilder::new().num_threads(opt.threads).build()?;
    pool.install(|| report_matches_par(index, opt.min_length))
}
