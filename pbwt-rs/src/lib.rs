//! # pbwt-rs
//!
//! 基于位置 Burrows–Wheeler 变换（PBWT）的单倍型长匹配查找。
//!
//! 本 crate 提供：
//!
//! - **矩阵校验**：N 条单倍型 × M 个位点的 0/1 矩阵，构造时完成形状与取值检查
//! - **索引构建**：逐位点推进，保留全部 M + 1 列的前缀数组 `a[k]` 与 divergence 数组 `d[k]`
//! - **匹配报告**：输出共享长度不小于 L 的相邻单倍型对，可按列并行
//! - **文件读写**：单倍型 CSV 输入、匹配 CSV 输出、索引二进制持久化
//!
//! ## 快速示例
//!
//! ```rust
//! use pbwt_rs::matrix::HaplotypeMatrix;
//! use pbwt_rs::index::PbwtIndex;
//! use pbwt_rs::report;
//!
//! let matrix = HaplotypeMatrix::from_rows(vec![
//!     vec![0, 0, 0],
//!     vec![0, 0, 1],
//!     vec![1, 1, 1],
//! ]).unwrap();
//!
//! let index = PbwtIndex::build(&matrix);
//! let matches = report::report_matches(&index, 2).unwrap();
//! for m in &matches {
//!     println!("{}", m);
//! }
//! assert!(matches.iter().any(|m| m.start == 0 && m.end == 2));
//! ```
//!
//! ## 模块说明
//!
//! - [`matrix`] — 二值单倍型矩阵
//! - [`index`] — PBWT 前缀 / divergence 数组构建与持久化
//! - [`report`] — 长匹配报告
//! - [`io`] — 单倍型 CSV 读取、匹配 CSV 写出
//! - [`error`] — 统一错误类型

pub mod error;
pub mod index;
pub mod io;
pub mod matrix;
pub mod report;
pub mod util;
