//! 单倍型表读取，支持 CSV 与 xlsx（取第一个工作表）。
//!
//! 格式：首行为表头；每行第一列为单倍型 ID，其余列为 0/1 等位基因。
//! 空行跳过，单元格首尾空白忽略。只有 ID 没有等位基因的行同样跳过。

use std::io::Read;
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use log::{debug, warn};

use crate::error::{PbwtError, Result};
use crate::matrix::HaplotypeMatrix;
use crate::util::allele;

#[derive(Debug, Clone)]
pub struct HaplotypeTable {
    /// 每行的 ID，与矩阵行号一一对应
    pub ids: Vec<String>,
    pub matrix: HaplotypeMatrix,
}

/// 单元格解析结果：成功为整数值，失败保留原始文本用于报错
type Cell = std::result::Result<i64, String>;

/// 逐行累积 ID 与等位基因，两种输入格式共用同一套取值与等宽检查。
#[derive(Debug, Default)]
struct TableBuilder {
    ids: Vec<String>,
    rows: Vec<Vec<u8>>,
    width: Option<usize>,
}

impl TableBuilder {
    /// `cells` 为 (列号, 单元格)，列号从 ID 列之后的 1 开始
    fn push_row<I>(&mut self, line: u64, id: String, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = (usize, Cell)>,
    {
        let mut row = Vec::new();
        for (j, cell) in cells {
            let v = cell.map_err(|raw| {
                PbwtError::parse(line, j, format!("'{}' is not an integer", raw))
            })?;
            if !(0..=1).contains(&v) {
                return Err(PbwtError::value(format!(
                    "line {}, column {}: allele {} is not 0 or 1",
                    line, j, v
                )));
            }
            row.push(v as u8);
        }

        match self.width {
            None => self.width = Some(row.len()),
            Some(w) if w != row.len() => {
                return Err(PbwtError::shape(format!(
                    "line {}: {} sites, expected {}",
                    line,
                    row.len(),
                    w
                )));
            }
            Some(_) => {}
        }

        self.ids.push(id);
        self.rows.push(row);
        Ok(())
    }

    fn finish(self) -> Result<HaplotypeTable> {
        debug!("read {} haplotypes", self.rows.len());
        let matrix = HaplotypeMatrix::from_rows(self.rows)?;
        Ok(HaplotypeTable {
            ids: self.ids,
            matrix,
        })
    }
}

pub fn read_haplotypes<R: Read>(reader: R) -> Result<HaplotypeTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut table = TableBuilder::default();
    for rec in rdr.records() {
        let rec = rec?;
        let line = rec.position().map(csv::Position::line).unwrap_or(0);
        if rec.len() <= 1 {
            if rec.iter().any(|f| !f.is_empty()) {
                warn!("line {}: haplotype without alleles skipped", line);
            }
            continue;
        }

        let id = rec.get(0).unwrap_or("").to_string();
        let cells = rec
            .iter()
            .enumerate()
            .skip(1)
            .map(|(j, f)| (j, allele::parse_cell(f).ok_or_else(|| f.to_string())));
        table.push_row(line, id, cells)?;
    }
    table.finish()
}

fn xlsx_cell(c: &Data) -> Cell {
    match c {
        Data::Int(v) => Ok(*v),
        Data::Float(f) if f.fract() == 0.0 => Ok(*f as i64),
        Data::String(s) => allele::parse_cell(s).ok_or_else(|| s.clone()),
        other => Err(other.to_string()),
    }
}

/// 读取 xlsx 第一个工作表。行号按工作表中的实际行（从 1 起）报告。
pub fn read_haplotypes_xlsx(path: &str) -> Result<HaplotypeTable> {
    let mut wb: Xlsx<_> = calamine::open_workbook(path)?;
    let range = wb
        .worksheet_range_at(0)
        .ok_or_else(|| PbwtError::shape(format!("workbook '{}' has no sheets", path)))??;
    let first_row = range.start().map(|(r, _)| u64::from(r)).unwrap_or(0);

    let mut table = TableBuilder::default();
    for (r, row) in range.rows().enumerate().skip(1) {
        let line = first_row + r as u64 + 1;
        if row.len() <= 1 || row[1..].iter().all(|c| matches!(c, Data::Empty)) {
            if row.first().is_some_and(|c| !matches!(c, Data::Empty)) {
                warn!("row {}: haplotype without alleles skipped", line);
            }
            continue;
        }
        let id = row[0].to_string();
        let cells = row
            .iter()
            .enumerate()
            .skip(1)
            .map(|(j, c)| (j, xlsx_cell(c)));
        table.push_row(line, id, cells)?;
    }
    table.finish()
}

/// 按扩展名（不区分大小写）选择 CSV 或 xlsx 读取，其它扩展名直接拒绝。
pub fn read_haplotypes_from_path(path: &str) -> Result<HaplotypeTable> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => {
            let f = std::fs::File::open(path)?;
            read_haplotypes(std::io::BufReader::new(f))
        }
        Some("xlsx") => read_haplotypes_xlsx(path),
        _ => Err(PbwtError::UnsupportedFormat {
            path: path.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_simple_table() {
        let data = b"id,s0,s1,s2\nh0,0,0,0\nh1,0,0,1\nh2,1,1,1\n";
        let t = read_haplotypes(Cursor::new(&data[..])).unwrap();
        assert_eq!(t.ids, vec!["h0", "h1", "h2"]);
        assert_eq!(t.matrix.n_haps(), 3);
        assert_eq!(t.matrix.n_sites(), 3);
        assert_eq!(t.matrix.row(1), &[0, 0, 1]);
    }

    #[test]
    fn parse_with_crlf_whitespace_and_blank_lines() {
        let data = b"id,a,b\r\n\r\nx, 1 ,0\r\ny,0, 1\r\n\r\n";
        let t = read_haplotypes(Cursor::new(&data[..])).unwrap();
        assert_eq!(t.ids, vec!["x", "y"]);
        assert_eq!(t.matrix.row(0), &[1, 0]);
        assert_eq!(t.matrix.row(1), &[0, 1]);
    }

    #[test]
    fn non_integer_cell_is_parse_error() {
        let data = b"id,a,b\nx,1,A\n";
        match read_haplotypes(Cursor::new(&data[..])).unwrap_err() {
            PbwtError::Parse { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_binary_cell_is_value_error() {
        let data = b"id,a,b\nx,1,0\ny,2,0\n";
        let err = read_haplotypes(Cursor::new(&data[..])).unwrap_err();
        assert!(matches!(err, PbwtError::Value { .. }));
    }

    #[test]
    fn ragged_rows_are_shape_error() {
        let data = b"id,a,b\nx,1,0\ny,1\n";
        let err = read_haplotypes(Cursor::new(&data[..])).unwrap_err();
        assert!(matches!(err, PbwtError::Shape { .. }));
    }

    #[test]
    fn header_only_is_shape_error() {
        let data = b"id,a,b\n";
        let err = read_haplotypes(Cursor::new(&data[..])).unwrap_err();
        assert!(matches!(err, PbwtError::Shape { .. }));
    }

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("pbwt_rs_{}_{}", std::process::id(), name))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn unknown_extension_is_rejected_before_opening() {
        for path in ["missing.txt", "missing.xls", "no_extension"] {
            let err = read_haplotypes_from_path(path).unwrap_err();
            assert!(
                matches!(err, PbwtError::UnsupportedFormat { .. }),
                "{}: {}",
                path,
                err
            );
        }
    }

    #[test]
    fn csv_extension_is_case_insensitive() {
        let path = temp_path("haps.CSV");
        std::fs::write(&path, "id,a,b\nx,1,0\ny,0,0\n").unwrap();
        let t = read_haplotypes_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(t.ids, vec!["x", "y"]);
        assert_eq!(t.matrix.row(0), &[1, 0]);
    }

    #[test]
    fn xlsx_extension_goes_through_workbook_reader() {
        // CSV 文本伪装成 xlsx：必须由 xlsx 读取器拒绝，而不是被当作 CSV 解析
        let path = temp_path("haps.xlsx");
        std::fs::write(&path, "id,a,b\nx,1,0\n").unwrap();
        let err = read_haplotypes_from_path(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, PbwtError::Xlsx(_)), "{}", err);
    }

    #[test]
    fn xlsx_cells_convert_to_integers() {
        assert_eq!(xlsx_cell(&Data::Int(1)), Ok(1));
        assert_eq!(xlsx_cell(&Data::Float(0.0)), Ok(0));
        assert_eq!(xlsx_cell(&Data::String(" 1 ".to_string())), Ok(1));
        assert_eq!(xlsx_cell(&Data::Float(0.5)), Err("0.5".to_string()));
        assert_eq!(xlsx_cell(&Data::Empty), Err(String::new()));
        assert!(xlsx_cell(&Data::Bool(true)).is_err());
    }
}
