// ==========================================
// 发布管理控制台 - 文件解析器实现
// ==========================================
// 阶段 1: 文件读取与解析
// 格式: 分隔符文本（默认逗号），首行为表头，标准 CSV 引号规则
// 红线: 纯转换，不做列名规范化，不修剪单元格
// 列集合: 由表头决定，短行缺失的单元格补为空字符串，多出的单元格丢弃
// ==========================================

use crate::domain::RawRow;
use crate::importer::bulk_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, warn};

/// 解析选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    pub delimiter: u8,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// 引号扫描状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// 查找未闭合的引号字段
///
/// csv reader 遇到未闭合引号时会一直读到输入结束，把后续各行并入同一单元格，
/// 不会报错；这里按同样的引号规则扫描一遍，检测输入结束时是否仍在引号内
///
/// # 返回
/// - Some(line): 未闭合引号字段起始行号（从 1 开始）
/// - None: 引号完整
fn find_unterminated_quote(content: &[u8], delimiter: u8) -> Option<usize> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1;
    let mut opened_at = 1;

    for &byte in content {
        let boundary = byte == delimiter || byte == b'\n' || byte == b'\r';
        state = match state {
            QuoteState::FieldStart if byte == b'"' => {
                opened_at = line;
                QuoteState::Quoted
            }
            QuoteState::FieldStart | QuoteState::Unquoted if boundary => QuoteState::FieldStart,
            QuoteState::FieldStart | QuoteState::Unquoted => QuoteState::Unquoted,
            QuoteState::Quoted if byte == b'"' => QuoteState::QuoteInQuoted,
            QuoteState::Quoted => QuoteState::Quoted,
            // 连续两个引号为转义
            QuoteState::QuoteInQuoted if byte == b'"' => QuoteState::Quoted,
            QuoteState::QuoteInQuoted if boundary => QuoteState::FieldStart,
            QuoteState::QuoteInQuoted => QuoteState::Unquoted,
        };
        if byte == b'\n' {
            line += 1;
        }
    }

    (state == QuoteState::Quoted).then_some(opened_at)
}

// ==========================================
// CSV Parser 实现
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    options: ParserOptions,
}

impl CsvParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// 从磁盘读取并解析
    ///
    /// 读取失败（文件被移动/修改/无权限）统一归为 FileUnreadable
    pub fn parse_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRow>> {
        let content = std::fs::read(file_path.as_ref())?;
        self.parse_rows(&content)
    }
}

impl FileParser for CsvParser {
    fn parse_rows(&self, content: &[u8]) -> ImportResult<Vec<RawRow>> {
        if let Some(line) = find_unterminated_quote(content, self.options.delimiter) {
            warn!(line, "存在未闭合的引号字段");
            return Err(ImportError::CsvParseError(format!(
                "unterminated quoted field starting on line {}",
                line
            )));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.options.delimiter)
            .flexible(true) // 允许行长度不一致
            .from_reader(content);

        // 表头原样保留
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        // 读取所有行（空行由 csv reader 跳过）
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let cells = headers
                .iter()
                .enumerate()
                .map(|(col_idx, header)| {
                    let value = record.get(col_idx).unwrap_or_default();
                    (header.clone(), value.to_string())
                })
                .collect();

            let row = RawRow::new(cells);
            rows.push(match record.position() {
                Some(pos) => row.with_line(pos.line() as usize),
                None => row,
            });
        }

        debug!(columns = headers.len(), rows = rows.len(), "CSV 解析完成");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_valid_content() {
        let content = b"name,pocEmail\nAlpha,a@x.com\nBeta,b@x.com\n";

        let parser = CsvParser::default();
        let rows = parser.parse_rows(content).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("Alpha"));
        assert_eq!(rows[1].get("pocEmail"), Some("b@x.com"));
    }

    #[test]
    fn test_csv_parser_keeps_literal_header_and_cell_text() {
        let content = b" name ,pocEmail\n  Alpha ,a@x.com\n";

        let rows = CsvParser::default().parse_rows(content).unwrap();

        assert_eq!(rows[0].get(" name "), Some("  Alpha "));
        assert_eq!(rows[0].get("name"), None);
    }

    #[test]
    fn test_csv_parser_quoted_cells() {
        let content = b"name,componentVersions\nAlpha,\"{\"\"compA\"\":\"\"1.2\"\"}\"\n";

        let rows = CsvParser::default().parse_rows(content).unwrap();

        assert_eq!(rows[0].get("componentVersions"), Some(r#"{"compA":"1.2"}"#));
    }

    #[test]
    fn test_csv_parser_skips_empty_trailing_lines() {
        let content = b"name,pocEmail\nAlpha,a@x.com\n\n\n";

        let rows = CsvParser::default().parse_rows(content).unwrap();

        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_csv_parser_keeps_delimiter_only_rows() {
        // ",," 不是空行，交由校验阶段处理
        let content = b"name,pocEmail\nAlpha,a@x.com\n,\n";

        let rows = CsvParser::default().parse_rows(content).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("name"), Some(""));
    }

    #[test]
    fn test_csv_parser_short_row_padded_to_header() {
        let content = b"name,pocEmail,region\nAlpha,a@x.com\n";

        let rows = CsvParser::default().parse_rows(content).unwrap();

        assert_eq!(rows[0].get("region"), Some(""));
        assert_eq!(rows[0].len(), 3);
    }

    #[test]
    fn test_csv_parser_long_row_drops_extra_cells() {
        let content = b"name,pocEmail\nAlpha,a@x.com,extra\n";

        let rows = CsvParser::default().parse_rows(content).unwrap();

        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].get("pocEmail"), Some("a@x.com"));
    }

    #[test]
    fn test_csv_parser_records_source_lines() {
        let content = b"name,pocEmail\nAlpha,a@x.com\n\nBeta,b@x.com\n";

        let rows = CsvParser::default().parse_rows(content).unwrap();

        assert_eq!(rows[0].line(), Some(2));
        assert_eq!(rows[1].line(), Some(4));
    }

    #[test]
    fn test_csv_parser_unterminated_quote_is_parse_error() {
        let content = b"name,pocEmail\nAlpha,\"a@x.com\nBeta,b@x.com\n";

        let result = CsvParser::default().parse_rows(content);

        match result {
            Err(ImportError::CsvParseError(message)) => {
                assert_eq!(message, "unterminated quoted field starting on line 2")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_csv_parser_quote_rules() {
        // 转义引号、字段中间的引号、引号字段内的换行均为合法输入
        let content =
            b"name,description\n\"Al \"\"A\"\"\",say \"hi\"\n\"Be\nta\",\"x\"y\n";

        let rows = CsvParser::default().parse_rows(content).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("Al \"A\""));
        assert_eq!(rows[0].get("description"), Some("say \"hi\""));
        assert_eq!(rows[1].get("name"), Some("Be\nta"));
    }

    #[test]
    fn test_unterminated_quote_respects_delimiter() {
        assert_eq!(find_unterminated_quote(b"a;\"b;c\n", b';'), Some(1));
        assert_eq!(find_unterminated_quote(b"a,\"b;c\"\n", b';'), None);
        assert_eq!(find_unterminated_quote(b"a\n\"b\"\"\n", b','), Some(2));
    }

    #[test]
    fn test_csv_parser_custom_delimiter() {
        let content = b"name;pocEmail\nAlpha;a@x.com\n";

        let parser = CsvParser::new(ParserOptions { delimiter: b';' });
        let rows = parser.parse_rows(content).unwrap();

        assert_eq!(rows[0].get("pocEmail"), Some("a@x.com"));
    }

    #[test]
    fn test_csv_parser_invalid_utf8() {
        let content = b"name,pocEmail\n\xff\xfe,a@x.com\n";

        let result = CsvParser::default().parse_rows(content);

        assert!(matches!(result, Err(ImportError::CsvParseError(_))));
    }

    #[test]
    fn test_csv_parser_empty_content_yields_no_rows() {
        let rows = CsvParser::default().parse_rows(b"").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_csv_parser_is_idempotent() {
        let content = b"name,pocEmail\nAlpha,a@x.com\n\"Be,ta\",b@x.com\n";
        let parser = CsvParser::default();

        assert_eq!(
            parser.parse_rows(content).unwrap(),
            parser.parse_rows(content).unwrap()
        );
    }

    #[test]
    fn test_csv_parser_file_roundtrip() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "name,pocEmail").unwrap();
        writeln!(temp_file, "Alpha,a@x.com").unwrap();

        let rows = CsvParser::default().parse_file(temp_file.path()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some("Alpha"));
    }

    #[test]
    fn test_csv_parser_file_not_found_is_unreadable() {
        let result = CsvParser::default().parse_file("non_existent_upload.csv");
        assert!(matches!(result, Err(ImportError::FileUnreadable(_))));
    }
}
