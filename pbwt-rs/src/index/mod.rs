//! PBWT 索引构建：逐位点推进的前缀/divergence 数组及其持久化。

pub mod pbwt;
pub mod prefix;

pub use pbwt::{IndexMeta, PbwtIndex};
