use crate::error::SplitError;
use crate::error::WorkbookError;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::cell::DateSystem;
use crate::spreadsheet::excel;
use crate::spreadsheet::options::ReadOptions;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::reference::reference_to_index;
use crate::spreadsheet::reference::row_to_index;
use crate::spreadsheet::reference::MAX_COLS;
use crate::spreadsheet::reference::MAX_ROWS;
use crate::spreadsheet::sheet::Sheet;
use crate::table::Table;
use quick_xml::events::Event;
use regex::Captures;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::BufRead;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::sync::LazyLock;
use tracing::debug;
use zip::ZipArchive;

// XML tag local names for SpreadsheetML parts
const TAG_CUSTOM_FORMATS: &[u8] = b"numFmts"; // Custom number formats container
const TAG_CUSTOM_FORMAT: &[u8] = b"numFmt"; // Individual custom number format
const TAG_FORMAT_INDEXES: &[u8] = b"cellXfs"; // Cell format indexes container
const TAG_FORMAT_INDEX: &[u8] = b"xf"; // Individual cell format index
const TAG_SHARED_STRING_ITEM: &[u8] = b"si"; // Shared string table item
const TAG_PHONETIC_TEXT: &[u8] = b"rPh"; // Phonetic text for Asian languages
const TAG_TEXT: &[u8] = b"t"; // Text content within strings
const TAG_WORKBOOK_PROPERTIES: &[u8] = b"workbookPr"; // Workbook properties
const TAG_SHEET: &[u8] = b"sheet"; // Worksheet definition
const TAG_ROW: &[u8] = b"row"; // Row in worksheet
const TAG_CELL: &[u8] = b"c"; // Cell in worksheet
const TAG_INLINE_STRING: &[u8] = b"is"; // Inline string value
const TAG_VALUE: &[u8] = b"v"; // Cell value content

static ESCAPED_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_x([0-9A-Fa-f]{4})_").expect("Hardcode regex pattern"));

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELATIONSHIPS_PART: &str = "xl/_rels/workbook.xml.rels";
const STYLES_PART: &str = "xl/styles.xml";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Parses an xlsx blob and returns its first worksheet as a table.
pub(crate) fn read(blob: &[u8], options: &ReadOptions) -> Result<Table, SplitError> {
    options.check_size(blob.len())?;
    excel::check_container(blob)?;

    let mut zip = ZipArchive::new(Cursor::new(blob)).map_err(WorkbookError::from)?;
    let (sheets, date_system) = load_workbook(&mut zip)?;
    let (sheet_name, zip_path) = sheets.into_iter().next().ok_or(WorkbookError::NoWorksheets)?;
    debug!(sheet = %sheet_name, part = %zip_path, ?date_system, "reading first worksheet");

    let number_formats = load_number_formats(&mut zip)?;
    let shared_strings = load_shared_strings(&mut zip)?;
    let sheet = read_sheet(&mut zip, &sheet_name, &zip_path, &number_formats)?;
    debug!(cells = sheet.cells.len(), shared_strings = shared_strings.len(), "worksheet parsed");

    sheet.into_table(&shared_strings, date_system, options.error_cells)
}

/// Loads worksheet names with their part paths, in workbook order, and the
/// date system of the workbook.
fn load_workbook<RS: Read + Seek>(
    zip: &mut ZipArchive<RS>,
) -> Result<(Vec<(String, String)>, DateSystem), WorkbookError> {
    let relationships = excel::load_relationships(zip, WORKBOOK_RELATIONSHIPS_PART)?;
    let mut reader = zip
        .xml_reader(WORKBOOK_PART)?
        .ok_or_else(|| WorkbookError::MissingPart(WORKBOOK_PART.to_owned()))?;
    let mut sheets: Vec<(String, String)> = Vec::new();
    let mut date_system = DateSystem::default();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_SHEET => {
            let name = event.get_attribute_value("name")?;
            let id = event.get_attribute_value("id")?;
            if let Some((name, id)) = name.zip(id) {
                if let Some(path) = relationships.get(&*id) {
                    sheets.push((name.to_string(), path.to_owned()));
                }
            }
        }
        Event::Start(event) if event.local_name().as_ref() == TAG_WORKBOOK_PROPERTIES => {
            let is_1904 = event.get_attribute_value("date1904")?
                .map(|value| value.eq("1") || value.eq("true"))
                .unwrap_or(false);
            if is_1904 {
                date_system = DateSystem::Epoch1904;
            }
        }
    });
    Ok((sheets, date_system))
}

/// Loads the cell type of every style entry in `styles.xml`, indexed by style id.
fn load_number_formats<RS: Read + Seek>(zip: &mut ZipArchive<RS>) -> Result<Vec<CellType>, WorkbookError> {
    let mut reader = match zip.xml_reader(STYLES_PART)? {
        Some(reader) => reader,
        None => return Ok(Vec::new()),
    };

    let mut custom_formats_context = false;
    let mut custom_formats = HashMap::<String, CellType>::new();

    let mut format_indexes_context = false;
    let mut format_indexes = Vec::<String>::new();

    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_CUSTOM_FORMATS => {
            custom_formats_context = true;
        }
        Event::End(event) if event.local_name().as_ref() == TAG_CUSTOM_FORMATS => {
            custom_formats_context = false;
        }
        Event::Start(event) if custom_formats_context && event.local_name().as_ref() == TAG_CUSTOM_FORMAT => {
            let id = event.get_attribute_value("numFmtId")?;
            let format = event.get_attribute_value("formatCode")?;
            if let Some((id, format)) = id.zip(format) {
                custom_formats.insert(id.to_string(), CellType::parse_custom_number_format(&format));
            }
        }

        Event::Start(event) if event.local_name().as_ref() == TAG_FORMAT_INDEXES => {
            format_indexes_context = true;
        }
        Event::End(event) if event.local_name().as_ref() == TAG_FORMAT_INDEXES => {
            format_indexes_context = false;
        }
        Event::Start(event) if format_indexes_context && event.local_name().as_ref() == TAG_FORMAT_INDEX => {
            let id = event.get_attribute_value("numFmtId")?.unwrap_or_default();
            format_indexes.push(id.to_string());
        }
    });

    Ok(excel::load_number_formats(format_indexes, custom_formats))
}

/// Loads the shared string table, empty when the part is absent.
fn load_shared_strings<RS: Read + Seek>(zip: &mut ZipArchive<RS>) -> Result<Vec<String>, WorkbookError> {
    let mut shared_strings = Vec::<String>::new();
    let mut reader = match zip.xml_reader(SHARED_STRINGS_PART)? {
        Some(reader) => reader,
        None => return Ok(shared_strings),
    };

    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_SHARED_STRING_ITEM => {
            let string = read_string_value(&mut reader, TAG_SHARED_STRING_ITEM, false)?;
            shared_strings.push(string);
        }
    });
    Ok(shared_strings)
}

/// Collects the populated cells of one worksheet part.
fn read_sheet<RS: Read + Seek>(
    zip: &mut ZipArchive<RS>,
    sheet_name: &str,
    zip_path: &str,
    number_formats: &[CellType],
) -> Result<Sheet, WorkbookError> {
    let mut reader = zip
        .xml_reader(zip_path)?
        .ok_or_else(|| WorkbookError::MissingPart(zip_path.to_owned()))?;

    let mut sheet = Sheet::new(sheet_name);
    let mut next_row = 0usize;
    let mut next_col = 0usize;
    let mut row = 0usize;
    let mut col = 0usize;
    let mut kind = CellType::default();
    let mut value = None::<String>;
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_ROW => {
            row = match event.get_attribute_value("r")? {
                Some(reference) => row_to_index(&reference)
                    .ok_or_else(|| invalid_reference(&reference))?,
                None => next_row,
            };
            next_row = row + 1;
            next_col = 0;
        }
        Event::Start(event) if event.local_name().as_ref() == TAG_CELL => {
            (row, col) = match event.get_attribute_value("r")? {
                Some(reference) => reference_to_index(&reference)
                    .ok_or_else(|| invalid_reference(&reference))?,
                None => (row, next_col),
            };
            if row >= MAX_ROWS || col >= MAX_COLS {
                Err(invalid_reference(&index_to_reference(row, col)))?
            }
            next_col = col + 1;
            kind = CellType::from_type_attribute(event.get_attribute_value("t")?.as_deref());
            if let Some(style) = event.get_attribute_value("s")? {
                if kind == CellType::Number && !style.is_empty() {
                    let index = style.parse::<usize>()?;
                    kind = number_formats.get(index).copied().unwrap_or(CellType::Number);
                }
            }
            value = None;
        }
        Event::Start(event) if kind != CellType::Empty && event.local_name().as_ref() == TAG_INLINE_STRING => {
            value = Some(read_string_value(&mut reader, TAG_INLINE_STRING, false)?);
        }
        Event::Start(event) if kind != CellType::Empty && event.local_name().as_ref() == TAG_VALUE => {
            value = Some(read_string_value(&mut reader, TAG_VALUE, true)?);
        }
        Event::End(event) if event.local_name().as_ref() == TAG_CELL => {
            // cells without <v> or <is> carry formatting only
            if let Some(value) = value.take() {
                sheet.push(Cell {
                    row,
                    col,
                    kind,
                    value,
                });
            }
            kind = CellType::Empty;
        }
    });
    Ok(sheet)
}

fn invalid_reference(reference: &str) -> WorkbookError {
    WorkbookError::CellValueError {
        reference: reference.to_owned(),
        value: reference.to_owned(),
        message: "reference lies outside the worksheet".to_owned(),
    }
}

/// Reads the text of a string element up to `end_tag`, joining rich-text runs
/// and skipping phonetic runs.
fn read_string_value<R: BufRead>(
    reader: &mut XmlReader<R>,
    end_tag: &[u8],
    is_text_content: bool,
) -> Result<String, WorkbookError> {
    let mut is_phonetic_text = false;
    let mut is_text = is_text_content;
    let mut text = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.local_name().as_ref() == end_tag => break,
        Event::Start(event) if event.local_name().as_ref() == TAG_PHONETIC_TEXT => is_phonetic_text = true,
        Event::End(event) if event.local_name().as_ref() == TAG_PHONETIC_TEXT => is_phonetic_text = false,
        Event::Start(event) if !is_phonetic_text && event.local_name().as_ref() == TAG_TEXT => is_text = true,
        Event::End(event) if is_text && event.local_name().as_ref() == TAG_TEXT => is_text = false,
        Event::Text(event) if is_text => text.push_str(&event.xml_content()?),
        Event::CData(event) if is_text => text.push_str(&event.xml_content()?),
        Event::GeneralRef(event) if is_text => text.push_bytes_ref(&event)?,
    });
    if let Cow::Owned(decoded) = decode_escapes(&text) {
        return Ok(decoded);
    }
    Ok(text)
}

/// Decodes `_xHHHH_` escapes, which stand for characters XML cannot carry.
/// `_x005F_` is an escaped underscore, so `_x005F_x0041_` reads `_x0041_`.
fn decode_escapes(text: &str) -> Cow<'_, str> {
    if !text.contains("_x") {
        return Cow::Borrowed(text);
    }
    ESCAPED_CHAR.replace_all(text, |captures: &Captures| {
        u32::from_str_radix(&captures[1], 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| captures[0].to_owned())
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::spreadsheet::options::ErrorCells;
    use crate::table::CellValue;
    use crate::table::DateKind;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet1.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

    const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<numFmts count="1"><numFmt numFmtId="164" formatCode="dd/mm/yyyy"/></numFmts>
<cellXfs count="4"><xf numFmtId="0"/><xf numFmtId="164"/><xf numFmtId="22"/><xf numFmtId="4"/></cellXfs>
</styleSheet>"#;

    /// Assembles a minimal xlsx package around the given parts.
    pub(crate) fn workbook(workbook_pr: &str, sheet1: &str, shared_strings: Option<&str>) -> Vec<u8> {
        let workbook = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
{workbook_pr}<sheets><sheet name="Data" sheetId="1" r:id="rId1"/><sheet name="Other" sheetId="2" r:id="rId2"/></sheets></workbook>"#
        );
        let sheet2 = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>ignored</t></is></c></row></sheetData></worksheet>"#;
        let mut parts = vec![
            ("[Content_Types].xml", CONTENT_TYPES.to_owned()),
            ("xl/workbook.xml", workbook),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_owned()),
            ("xl/styles.xml", STYLES.to_owned()),
            ("xl/worksheets/sheet1.xml", sheet1.to_owned()),
            ("xl/worksheets/sheet2.xml", sheet2.to_owned()),
        ];
        if let Some(shared_strings) = shared_strings {
            parts.push(("xl/sharedStrings.xml", shared_strings.to_owned()));
        }
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            writer.start_file(name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn sheet(rows: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{rows}</sheetData></worksheet>"#
        )
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn reads_first_sheet_with_typed_cells() {
        let shared = r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="4" uniqueCount="4">
<si><t>region</t></si>
<si><t>amount</t></si>
<si><r><t>E</t></r><r><rPr><b/></rPr><t>U</t></r><rPh sb="0" eb="1"><t>ignored</t></rPh></si>
<si><t xml:space="preserve">  a &amp; b </t></si>
</sst>"#;
        let rows = r#"
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="inlineStr"><is><t>when</t></is></c><c r="D1" t="inlineStr"><is><t>stamp</t></is></c><c r="E1" t="inlineStr"><is><t>ok</t></is></c></row>
<row r="2"><c r="A2" t="s"><v>2</v></c><c r="B2"><v>10.5</v></c><c r="C2" s="1"><v>45322</v></c><c r="D2" s="2"><v>45322.5</v></c><c r="E2" t="b"><v>1</v></c></row>
<row r="3"><c r="A3" t="s"><v>3</v></c><c r="B3" s="3"><v>3</v></c><c r="C3" s="1"/><c r="D3" t="str"><f>A1</f><v>x</v></c><c r="E3" t="e"><v>#N/A</v></c></row>
<row r="5"><c r="A5" t="inlineStr"><is><t></t></is></c></row>
<row r="7"><c r="A7" s="1"/></row>"#;
        let blob = workbook("", &sheet(rows), Some(shared));
        let table = read(&blob, &ReadOptions::default()).unwrap();

        assert_eq!(table.name(), "Data");
        assert_eq!(table.columns(), ["region", "amount", "when", "stamp", "ok"]);
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.rows()[0],
            vec![
                CellValue::from("EU"),
                CellValue::Number(10.5),
                CellValue::DateTime(datetime(2024, 1, 31, 0, 0, 0), DateKind::Date),
                CellValue::DateTime(datetime(2024, 1, 31, 12, 0, 0), DateKind::DateTime),
                CellValue::Boolean(true),
            ]
        );
        assert_eq!(
            table.rows()[1],
            vec![
                CellValue::from("  a & b "),
                CellValue::Number(3.0),
                CellValue::Null,
                CellValue::from("x"),
                CellValue::from("#N/A"),
            ]
        );
        assert!(table.rows()[2].iter().all(CellValue::is_null));
        assert_eq!(table.rows()[3][0], CellValue::from(""));
    }

    #[test]
    fn decodes_escaped_characters() {
        let shared = r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><si><t>a_x0001_b</t></si><si><t>_x005F_x0041_</t></si></sst>"#;
        let rows = r#"<row r="1"><c r="A1" t="inlineStr"><is><t>k_x0009_</t></is></c></row>
<row r="2"><c r="A2" t="s"><v>0</v></c></row><row r="3"><c r="A3" t="s"><v>1</v></c></row>
<row r="4"><c r="A4" t="inlineStr"><is><t>_x00zz_ _xD800_</t></is></c></row>"#;
        let blob = workbook("", &sheet(rows), Some(shared));
        let table = read(&blob, &ReadOptions::default()).unwrap();
        assert_eq!(table.columns(), ["k\t"]);
        assert_eq!(
            table.rows(),
            [
                vec![CellValue::from("a\u{1}b")],
                vec![CellValue::from("_x0041_")],
                vec![CellValue::from("_x00zz_ _xD800_")],
            ]
        );
    }

    #[test]
    fn escaped_characters_survive_a_written_workbook() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "k").unwrap();
        worksheet.write_string(1, 0, "a\u{1}b").unwrap();
        worksheet.write_string(2, 0, "_x0041_").unwrap();
        let blob = workbook.save_to_buffer().unwrap();

        let table = read(&blob, &ReadOptions::default()).unwrap();
        assert_eq!(
            table.rows(),
            [vec![CellValue::from("a\u{1}b")], vec![CellValue::from("_x0041_")]]
        );
    }

    #[test]
    fn far_stray_cell_reports_missing_label() {
        let rows = r#"<row r="1"><c r="A1" t="inlineStr"><is><t>k</t></is></c></row>
<row r="1048576"><c r="XFD1048576" t="inlineStr"><is><t>stray</t></is></c></row>"#;
        let blob = workbook("", &sheet(rows), None);
        match read(&blob, &ReadOptions::default()).unwrap_err() {
            SplitError::MissingColumnLabel { reference } => assert_eq!(reference, "B1"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_references_outside_the_worksheet() {
        for rows in [
            r#"<row r="1"><c r="A1" t="inlineStr"><is><t>k</t></is></c></row><row><c r="A99999999999"><v>1</v></c></row>"#,
            r#"<row r="1"><c r="A1" t="inlineStr"><is><t>k</t></is></c></row><row r="1048577"><c><v>1</v></c></row>"#,
            r#"<row r="1"><c r="XFE1" t="inlineStr"><is><t>k</t></is></c></row>"#,
        ] {
            let blob = workbook("", &sheet(rows), None);
            match read(&blob, &ReadOptions::default()).unwrap_err() {
                SplitError::MalformedInput(WorkbookError::CellValueError { .. }) => (),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn honors_1904_date_system() {
        let rows = r#"<row><c t="inlineStr"><is><t>d</t></is></c></row><row><c s="1"><v>0</v></c></row>"#;
        let blob = workbook(r#"<workbookPr date1904="1"/>"#, &sheet(rows), None);
        let table = read(&blob, &ReadOptions::default()).unwrap();
        assert_eq!(
            table.rows()[0][0],
            CellValue::DateTime(datetime(1904, 1, 1, 0, 0, 0), DateKind::Date)
        );
    }

    #[test]
    fn error_cell_policies() {
        let rows = r#"<row r="1"><c r="A1" t="inlineStr"><is><t>k</t></is></c></row><row r="2"><c r="A2" t="e"><v>#DIV/0!</v></c></row>"#;
        let blob = workbook("", &sheet(rows), None);

        let null = ReadOptions {
            error_cells: ErrorCells::Null,
            ..ReadOptions::default()
        };
        assert!(read(&blob, &null).unwrap().is_empty());

        let reject = ReadOptions {
            error_cells: ErrorCells::Reject,
            ..ReadOptions::default()
        };
        match read(&blob, &reject).unwrap_err() {
            SplitError::MalformedInput(WorkbookError::ErrorCell { reference, value }) => {
                assert_eq!(reference, "A2");
                assert_eq!(value, "#DIV/0!");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_unrecognizable_input() {
        let error = read(b"not a workbook", &ReadOptions::default()).unwrap_err();
        assert!(matches!(error, SplitError::MalformedInput(WorkbookError::ZipError(_))));

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("readme.txt", SimpleFileOptions::default()).unwrap();
        let blob = writer.finish().unwrap().into_inner();
        let error = read(&blob, &ReadOptions::default()).unwrap_err();
        assert!(matches!(error, SplitError::MalformedInput(WorkbookError::MissingPart(_))));
    }

    #[test]
    fn rejects_sheet_without_header() {
        let blob = workbook("", &sheet(""), None);
        assert!(matches!(read(&blob, &ReadOptions::default()), Err(SplitError::EmptyWorkbook)));
    }

    #[test]
    fn rejects_oversized_input() {
        let blob = workbook("", &sheet(""), None);
        let options = ReadOptions {
            max_input_bytes: Some(16),
            ..ReadOptions::default()
        };
        assert!(matches!(read(&blob, &options), Err(SplitError::ResourceExhausted { limit: 16, .. })));
    }
}
