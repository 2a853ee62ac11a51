use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::report::MatchRecord;

/// 输出 CSV 的一行，列名即表头：hap1,hap2,start,end,length
#[derive(Debug, Serialize)]
struct MatchRow {
    hap1: u32,
    hap2: u32,
    start: u32,
    end: u32,
    length: u32,
}

impl From<&MatchRecord> for MatchRow {
    fn from(m: &MatchRecord) -> Self {
        Self {
            hap1: m.hap1,
            hap2: m.hap2,
            start: m.start,
            end: m.end,
            length: m.length(),
        }
    }
}

pub fn write_matches<W: Write>(writer: W, matches: &[MatchRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for m in matches {
        wtr.serialize(MatchRow::from(m))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_matches_to_path(path: &str, matches: &[MatchRecord]) -> Result<()> {
    let f = std::fs::File::create(path)?;
    write_matches(std::io::BufWriter::new(f), matches)
}

/// 控制台展示一条匹配；有单倍型 ID 时在末尾附上两者的 ID
pub fn describe_match(m: &MatchRecord, ids: &[String]) -> String {
    match (ids.get(m.hap1 as usize), ids.get(m.hap2 as usize)) {
        (Some(a), Some(b)) => format!("{} [{} <-> {}]", m, a, b),
        _ => m.to_string(),
    }
}

/// 默认输出文件名
pub fn default_output_name(min_length: usize) -> String {
    format!("pbwt_matches_minL{}.csv", min_length)
}
