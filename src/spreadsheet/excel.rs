//! Office Open XML package helpers
use crate::error::WorkbookError;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::CellType;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::io::Read;
use std::io::Seek;
use zip::ZipArchive;

/// XML tag name for relationship elements in Excel files
const TAG_RELATIONSHIP: &[u8] = b"Relationship";

/// Signature of an OLE compound file. Password protected xlsx files and
/// legacy xls files both start with it.
const CFB_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Rejects blobs that are compound files rather than zip packages.
pub(crate) fn check_container(blob: &[u8]) -> Result<(), WorkbookError> {
    if blob.starts_with(&CFB_SIGNATURE) {
        Err(WorkbookError::UnsupportedContainer)?
    }
    Ok(())
}

/// Loads worksheet relationships, mapping relationship ids to part paths.
pub(crate) fn load_relationships<RS: Read + Seek>(
    zip: &mut ZipArchive<RS>,
    path: &str,
) -> Result<HashMap<String, String>, WorkbookError> {
    let mut reader = zip
        .xml_reader(path)?
        .ok_or_else(|| WorkbookError::MissingPart(path.to_owned()))?;
    let mut relationships: HashMap<String, String> = HashMap::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
            let id = event.get_attribute_value("Id")?;
            let kind = event.get_attribute_value("Type")?;
            let target = event.get_attribute_value("Target")?;
            // Only worksheet relationships matter
            if kind.map(|it| it.ends_with("/worksheet")).unwrap_or(true) {
                if let Some((id, target)) = id.zip(target) {
                    relationships.insert(id.to_string(), to_zip_path(&target));
                }
            }
        }
    });
    Ok(relationships)
}

/// Maps style (`xf`) entries to cell types through their number format ids.
pub(crate) fn load_number_formats(
    format_indexes: Vec<String>,
    custom_formats: HashMap<String, CellType>,
) -> Vec<CellType> {
    format_indexes
        .iter()
        .map(|id| {
            custom_formats
                .get(id)
                .copied()
                .or_else(|| CellType::parse_builtin_number_format_id(id))
                .unwrap_or(CellType::Number)
        })
        .collect()
}

/// Resolves a relationship target against the `xl/` directory.
pub(crate) fn to_zip_path(path: &str) -> String {
    if let Some(absolute) = path.strip_prefix('/') {
        absolute.to_owned()
    } else if path.starts_with("xl/") {
        path.to_owned()
    } else {
        format!("xl/{}", path.trim_start_matches("./"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DateKind;
    use std::io::Cursor;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    #[test]
    fn zip_paths() {
        assert_eq!(to_zip_path("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(to_zip_path("/xl/worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(to_zip_path("xl/worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(to_zip_path("./worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
    }

    #[test]
    fn compound_files_are_rejected() {
        let mut blob = CFB_SIGNATURE.to_vec();
        blob.extend_from_slice(&[0; 504]);
        assert!(matches!(check_container(&blob), Err(WorkbookError::UnsupportedContainer)));
        assert!(check_container(b"PK\x03\x04").is_ok());
    }

    #[test]
    fn number_formats_prefer_custom_definitions() {
        let custom = HashMap::from([("164".to_owned(), CellType::SerialDate(DateKind::Date))]);
        let formats = load_number_formats(
            vec!["0".to_owned(), "164".to_owned(), "22".to_owned(), "999".to_owned()],
            custom,
        );
        assert_eq!(
            formats,
            vec![
                CellType::Number,
                CellType::SerialDate(DateKind::Date),
                CellType::SerialDate(DateKind::DateTime),
                CellType::Number,
            ]
        );
    }

    #[test]
    fn relationships_keep_worksheets_only() {
        let rels = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("xl/_rels/workbook.xml.rels", SimpleFileOptions::default()).unwrap();
        writer.write_all(rels.as_bytes()).unwrap();
        let mut zip = ZipArchive::new(writer.finish().unwrap()).unwrap();

        let relationships = load_relationships(&mut zip, "xl/_rels/workbook.xml.rels").unwrap();
        assert_eq!(relationships.len(), 1);
        assert_eq!(relationships["rId1"], "xl/worksheets/sheet1.xml");
        assert!(matches!(
            load_relationships(&mut zip, "xl/missing.rels"),
            Err(WorkbookError::MissingPart(_))
        ));
    }
}
