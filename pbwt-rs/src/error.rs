//! 统一错误类型。
//!
//! 核心算法只会产生 `Shape` / `Value` / `Contract` 三类错误，
//! 其余变体来自外层的文件读写与索引序列化。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PbwtError {
    /// 矩阵为空，或某一行的列数与首行不一致
    #[error("shape error: {message}")]
    Shape { message: String },

    /// 取值越界：非 0/1 的等位基因，或最小匹配长度 < 1
    #[error("value error: {message}")]
    Value { message: String },

    /// 内部不变量被破坏（a/d 长度不一致、非置换、divergence 越界）
    #[error("contract violation: {message}")]
    Contract { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: u64,
        column: usize,
        message: String,
    },

    #[error("xlsx error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    /// 输入文件扩展名既不是 .csv 也不是 .xlsx
    #[error("unsupported input format '{path}': expected a .csv or .xlsx file")]
    UnsupportedFormat { path: String },

    #[error("index (de)serialization error: {0}")]
    Serialize(#[from] bincode::Error),

    #[error("cannot build thread pool: {0}")]
    Threads(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, PbwtError>;

impl PbwtError {
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    pub fn value(message: impl Into<String>) -> Self {
        Self::Value {
            message: message.into(),
        }
    }

    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract {
            message: message.into(),
        }
    }

    pub fn parse(line: u64, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }
}
