//! 演示如何在 library 模式下使用 pbwt-rs 查找单倍型长匹配。
//!
//! 运行方式：
//! ```bash
//! cargo run --example simple_match
//! ```

use pbwt_rs::index::PbwtIndex;
use pbwt_rs::matrix::HaplotypeMatrix;
use pbwt_rs::report::{self, MatchOpt};

fn main() -> pbwt_rs::error::Result<()> {
    // 1. 构建单倍型矩阵
    let rows = vec![
        vec![0, 1, 1, 0, 1, 0, 0, 1, 1, 0],
        vec![0, 1, 1, 0, 1, 0, 1, 1, 1, 0],
        vec![1, 0, 1, 0, 1, 0, 1, 1, 1, 0],
        vec![1, 0, 0, 1, 0, 1, 0, 0, 1, 1],
        vec![0, 1, 1, 0, 1, 0, 0, 1, 0, 1],
    ];
    let matrix = HaplotypeMatrix::from_rows(rows)?;
    println!("单倍型: {}, 位点: {}", matrix.n_haps(), matrix.n_sites());

    // 2. 构建 PBWT
    let index = PbwtIndex::build(&matrix);
    println!("\n各列前缀 / divergence 数组:");
    for k in 0..index.n_columns() {
        println!("  k={:2}  a={:?}  d={:?}", k, index.prefix(k), index.divergence(k));
    }

    // 3. 报告长度 >= 5 的匹配
    let opt = MatchOpt {
        min_length: 5,
        threads: 2,
    };
    let matches = report::report_with_opt(&index, opt)?;
    println!("\n共 {} 条匹配（L=5）:", matches.len());
    for m in &matches {
        println!("  {}", m);
    }

    // 4. 提高阈值只会减少匹配
    let strict = report::report_matches(&index, 7)?;
    println!("\nL=7 时剩余 {} 条", strict.len());

    Ok(())
}
