pub const REF: u8 = 0;
pub const ALT: u8 = 1;

#[inline]
pub fn is_binary(a: u8) -> bool {
    a == REF || a == ALT
}

/// 解析单元格文本为整数值（不检查是否为 0/1，由调用方校验）。
/// 允许首尾空白，空串或非整数返回 None。
pub fn parse_cell(s: &str) -> Option<i64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<i64>().ok()
}
