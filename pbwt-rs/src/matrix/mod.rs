//! 二值单倍型矩阵：N 行（单倍型）× M 列（位点），取值仅限 {0, 1}。
//!
//! 所有形状与取值校验都集中在构造阶段完成，
//! 之后的 PBWT 构建与匹配报告可以直接按下标访问而无需再检查。

use crate::error::{PbwtError, Result};
use crate::util::allele;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaplotypeMatrix {
    n_haps: usize,
    n_sites: usize,
    /// 行优先展平：data[hap * n_sites + site]
    data: Vec<u8>,
}

impl HaplotypeMatrix {
    /// 从逐行数据构造矩阵，要求非空、等宽且全部为 0/1。
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let n_haps = rows.len();
        if n_haps == 0 {
            return Err(PbwtError::shape("matrix has no haplotypes"));
        }
        let n_sites = rows[0].len();
        let mut data = Vec::with_capacity(n_haps * n_sites);
        for (h, row) in rows.into_iter().enumerate() {
            if row.len() != n_sites {
                return Err(PbwtError::shape(format!(
                    "haplotype {} has {} sites, expected {}",
                    h,
                    row.len(),
                    n_sites
                )));
            }
            data.extend_from_slice(&row);
        }
        Self::from_flat(n_haps, n_sites, data)
    }

    /// 从行优先展平的缓冲区构造矩阵。
    pub fn from_flat(n_haps: usize, n_sites: usize, data: Vec<u8>) -> Result<Self> {
        if n_haps == 0 || n_sites == 0 {
            return Err(PbwtError::shape(format!(
                "matrix is empty ({} haplotypes x {} sites)",
                n_haps, n_sites
            )));
        }
        // 下标与位点在索引中以 u32 存储
        if n_haps > u32::MAX as usize || n_sites >= u32::MAX as usize {
            return Err(PbwtError::shape(format!(
                "matrix too large ({} haplotypes x {} sites)",
                n_haps, n_sites
            )));
        }
        let expected = n_haps
            .checked_mul(n_sites)
            .ok_or_else(|| PbwtError::shape("matrix dimensions overflow"))?;
        if data.len() != expected {
            return Err(PbwtError::shape(format!(
                "buffer holds {} entries, expected {} ({} x {})",
                data.len(),
                expected,
                n_haps,
                n_sites
            )));
        }
        if let Some(pos) = data.iter().position(|&v| !allele::is_binary(v)) {
            return Err(PbwtError::value(format!(
                "haplotype {} site {} has allele {}, expected 0 or 1",
                pos / n_sites,
                pos % n_sites,
                data[pos]
            )));
        }
        Ok(Self {
            n_haps,
            n_sites,
            data,
        })
    }

    #[inline]
    pub fn n_haps(&self) -> usize {
        self.n_haps
    }

    #[inline]
    pub fn n_sites(&self) -> usize {
        self.n_sites
    }

    #[inline]
    pub fn allele(&self, hap: usize, site: usize) -> u8 {
        self.data[hap * self.n_sites + site]
    }

    #[inline]
    pub fn row(&self, hap: usize) -> &[u8] {
        let start = hap * self.n_sites;
        &self.data[start..start + self.n_sites]
    }
}
