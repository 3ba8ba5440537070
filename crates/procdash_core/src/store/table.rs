//! Semicolon-delimited table codec.
//!
//! Reads and writes the spreadsheet export format: one header row, `;`
//! separators, `"` quoting with doubled quotes as escapes. Quoted cells may
//! span lines.

use std::io::{self, Write};

/// Field separator for source and export files.
pub const DELIMITER: char = ';';

const QUOTE: char = '"';
const UTF8_BOM: char = '\u{feff}';

/// One parsed data row with its 1-based starting line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Parsed table before column mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<RawRow>,
    /// Input ended inside a quoted cell; that opening quote was read as text.
    pub unterminated_quote: bool,
}

/// Parses delimited text into a header and data rows.
///
/// Blank and whitespace-only lines are skipped. Returns a table with an empty
/// header when the text contains no rows at all.
///
/// A quote that is still open at end of input is demoted to a literal
/// character and the text is scanned again, so one malformed cell never
/// swallows the rows that follow it.
pub fn parse_table(text: &str) -> RawTable {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    let mut literal_quotes = Vec::<usize>::new();
    let rows = loop {
        match scan_rows(text, &literal_quotes) {
            Ok(rows) => break rows,
            Err(open_at) => literal_quotes.push(open_at),
        }
    };

    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .map(|row| {
            row.fields
                .into_iter()
                .map(|name| name.trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    RawTable {
        header,
        rows: rows.collect(),
        unterminated_quote: !literal_quotes.is_empty(),
    }
}

/// Splits `text` into rows.
///
/// Quotes at the byte offsets in `literal_quotes` are plain content. Fails
/// with the offset of the opening quote when input ends inside a quoted cell.
fn scan_rows(text: &str, literal_quotes: &[usize]) -> Result<Vec<RawRow>, usize> {
    let mut rows = Vec::<RawRow>::new();

    let mut fields = Vec::<String>::new();
    let mut field = String::new();
    let mut open_quote: Option<usize> = None;
    let mut line = 1usize;
    let mut row_start_line = 1usize;
    // Set once the row has a separator or a quoted cell.
    let mut row_is_structured = false;

    let mut chars = text.char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        if open_quote.is_some() {
            match ch {
                QUOTE if matches!(chars.peek(), Some((_, QUOTE))) => {
                    chars.next();
                    field.push(QUOTE);
                }
                QUOTE => open_quote = None,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            QUOTE if field.is_empty() && !literal_quotes.contains(&offset) => {
                open_quote = Some(offset);
                row_is_structured = true;
            }
            DELIMITER => {
                fields.push(std::mem::take(&mut field));
                row_is_structured = true;
            }
            '\r' if matches!(chars.peek(), Some((_, '\n'))) => {}
            '\n' => {
                if row_is_structured || !field.trim().is_empty() {
                    fields.push(std::mem::take(&mut field));
                    rows.push(RawRow {
                        line: row_start_line,
                        fields: std::mem::take(&mut fields),
                    });
                }
                field.clear();
                row_is_structured = false;
                line += 1;
                row_start_line = line;
            }
            _ => field.push(ch),
        }
    }

    if let Some(open_at) = open_quote {
        return Err(open_at);
    }
    if row_is_structured || !field.trim().is_empty() {
        fields.push(field);
        rows.push(RawRow {
            line: row_start_line,
            fields,
        });
    }
    Ok(rows)
}

/// Writes one row, quoting cells that contain separators, quotes or newlines.
pub fn write_row<W, S>(writer: &mut W, fields: &[S]) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    let mut line = String::new();
    for (index, value) in fields.iter().enumerate() {
        if index > 0 {
            line.push(DELIMITER);
        }
        push_cell(&mut line, value.as_ref());
    }
    line.push('\n');
    writer.write_all(line.as_bytes())
}

fn push_cell(line: &mut String, value: &str) {
    let needs_quotes = value.contains([DELIMITER, QUOTE, '\n', '\r']);
    if !needs_quotes {
        line.push_str(value);
        return;
    }
    line.push(QUOTE);
    for ch in value.chars() {
        if ch == QUOTE {
            line.push(QUOTE);
        }
        line.push(ch);
    }
    line.push(QUOTE);
}

#[cfg(test)]
mod tests {
    use super::{parse_table, write_row};

    #[test]
    fn parses_header_rows_and_line_numbers() {
        let table = parse_table("Número;Marcador\n1;A\n\n2;B\n");
        assert_eq!(table.header, vec!["Número", "Marcador"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].line, 2);
        assert_eq!(table.rows[1].line, 4);
        assert_eq!(table.rows[1].fields, vec!["2", "B"]);
        assert!(!table.unterminated_quote);
    }

    #[test]
    fn strips_bom_and_handles_crlf() {
        let table = parse_table("\u{feff}Número;Assunto\r\n10;x\r\n");
        assert_eq!(table.header, vec!["Número", "Assunto"]);
        assert_eq!(table.rows[0].fields, vec!["10", "x"]);
    }

    #[test]
    fn quoted_cells_keep_separators_quotes_and_newlines() {
        let table = parse_table("Número;Descrição\n1;\"a; b \"\"c\"\"\nsecond line\"\n2;plain\n");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].fields[1], "a; b \"c\"\nsecond line");
        assert_eq!(table.rows[1].line, 4);
    }

    #[test]
    fn trailing_empty_cells_are_kept() {
        let table = parse_table("Número;Responsável;Marcador\n7;;\n");
        assert_eq!(table.rows[0].fields, vec!["7", "", ""]);
    }

    #[test]
    fn unterminated_quote_is_read_as_text() {
        let table = parse_table("Número;Descrição\n1;\"open cell");
        assert!(table.unterminated_quote);
        assert_eq!(table.rows[0].fields, vec!["1", "\"open cell"]);
    }

    #[test]
    fn unterminated_quote_keeps_following_rows() {
        let table = parse_table("Número;Descrição\n1;\"aspas sem fim\n2;b\n3;c\n4;d\n");
        assert!(table.unterminated_quote);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0].fields, vec!["1", "\"aspas sem fim"]);
        assert_eq!(table.rows[1].fields, vec!["2", "b"]);
        assert_eq!(table.rows[3].fields, vec!["4", "d"]);
        assert_eq!(table.rows[3].line, 5);
    }

    #[test]
    fn whitespace_only_lines_are_blank() {
        let table = parse_table("Número;Marcador\n1;A\n   \n\t\n2;B\n  ");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].fields, vec!["2", "B"]);
        assert_eq!(table.rows[1].line, 5);
    }

    #[test]
    fn empty_text_yields_empty_header() {
        let table = parse_table("");
        assert!(table.header.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn write_row_quotes_only_when_needed() {
        let mut out = Vec::new();
        write_row(&mut out, &["1", "a;b", "say \"hi\"", "plain"]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "1;\"a;b\";\"say \"\"hi\"\"\";plain\n");

        let reparsed = parse_table(&format!("h1;h2;h3;h4\n{text}"));
        assert_eq!(reparsed.rows[0].fields, vec!["1", "a;b", "say \"hi\"", "plain"]);
    }
}
