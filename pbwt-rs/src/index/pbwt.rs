use std::io::Write;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::prefix;
use crate::error::{PbwtError, Result};
use crate::matrix::HaplotypeMatrix;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub input_file: Option<String>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
    /// 输入表中每行的 ID，按单倍型下标排列
    #[serde(default)]
    pub haplotype_ids: Vec<String>,
}

/// PBWT 索引：保存全部 M + 1 列的位置前缀数组与 divergence 数组。
///
/// - `a[k]` 为按位点 k 之前的反向后缀排序后的单倍型下标，`a[0]` 为恒等置换；
/// - `d[k][i]` 为 `a[k][i]` 与 `a[k][i-1]` 在 `[d[k][i], k)` 上一致的最小起点，`d[0]` 全 0；
/// - `d[k][0]` 没有左邻居，只是传播规则的副产物，不代表任何一对的 divergence。
///
/// 匹配报告需要每一列，因此保留完整历史，内存开销为 O(N·M) 个 u32。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PbwtIndex {
    n_haps: u32,
    n_sites: u32,
    /// 展平的前缀数组：第 k 列位于 prefix[k * N .. (k + 1) * N]
    prefix: Vec<u32>,
    /// 与 prefix 逐位对齐的 divergence 数组
    divergence: Vec<u32>,
    meta: Option<IndexMeta>,
}

impl PbwtIndex {
    /// 一次性从左到右扫描矩阵构建索引。矩阵已在构造时完成校验，这里不会失败。
    pub fn build(matrix: &HaplotypeMatrix) -> Self {
        info!(
            "building PBWT over {} haplotypes x {} sites",
            matrix.n_haps(),
            matrix.n_sites()
        );
        let (prefix, divergence) = prefix::build_prefix_divergence(matrix);
        debug!("retained {} prefix/divergence entries", prefix.len());
        Self {
            n_haps: matrix.n_haps() as u32,
            n_sites: matrix.n_sites() as u32,
            prefix,
            divergence,
            meta: None,
        }
    }

    #[inline]
    pub fn n_haps(&self) -> usize {
        self.n_haps as usize
    }

    #[inline]
    pub fn n_sites(&self) -> usize {
        self.n_sites as usize
    }

    /// 列数 M + 1（含未处理任何位点的第 0 列）
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.n_sites() + 1
    }

    #[inline]
    pub fn prefix(&self, k: usize) -> &[u32] {
        let n = self.n_haps();
        &self.prefix[k * n..(k + 1) * n]
    }

    #[inline]
    pub fn divergence(&self, k: usize) -> &[u32] {
        let n = self.n_haps();
        &self.divergence[k * n..(k + 1) * n]
    }

    pub fn meta(&self) -> Option<&IndexMeta> {
        self.meta.as_ref()
    }

    pub fn set_meta(&mut self, meta: IndexMeta) {
        self.meta = Some(meta);
    }

    /// 检查全部不变量：缓冲区长度、每列为置换、第 0 列约定、`0 <= d[k][i] <= k`。
    /// 由 `build` 得到的索引总是满足；用于拒绝被篡改或截断的索引文件。
    pub fn validate(&self) -> Result<()> {
        let n = self.n_haps();
        if n == 0 || self.n_sites == 0 {
            return Err(PbwtError::contract(format!(
                "index has empty shape ({} haplotypes x {} sites)",
                n, self.n_sites
            )));
        }
        let expected = self.n_columns() * n;
        if self.prefix.len() != expected || self.divergence.len() != expected {
            return Err(PbwtError::contract(format!(
                "prefix/divergence hold {}/{} entries, expected {}",
                self.prefix.len(),
                self.divergence.len(),
                expected
            )));
        }

        let mut seen = vec![false; n];
        for k in 0..self.n_columns() {
            seen.fill(false);
            for (i, &h) in self.prefix(k).iter().enumerate() {
                let hu = h as usize;
                if hu >= n {
                    return Err(PbwtError::contract(format!(
                        "a[{}][{}] = {} is out of range for {} haplotypes",
                        k, i, h, n
                    )));
                }
                if seen[hu] {
                    return Err(PbwtError::contract(format!(
                        "a[{}] lists haplotype {} twice",
                        k, h
                    )));
                }
                seen[hu] = true;
            }
            for (i, &dv) in self.divergence(k).iter().enumerate() {
                if dv as usize > k {
                    return Err(PbwtError::contract(format!(
                        "d[{}][{}] = {} exceeds column {}",
                        k, i, dv, k
                    )));
                }
            }
        }

        let identity = self.prefix(0).iter().enumerate().all(|(i, &h)| h as usize == i);
        if !identity {
            return Err(PbwtError::contract("a[0] is not the identity permutation"));
        }
        Ok(())
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let f = std::fs::File::create(path)?;
        let mut w = std::io::BufWriter::new(f);
        bincode::serialize_into(&mut w, self)?;
        w.flush()?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let f = std::fs::File::open(path)?;
        let idx: Self = bincode::deserialize_from(std::io::BufReader::new(f))?;
        idx.validate()?;
        Ok(idx)
    }
}
