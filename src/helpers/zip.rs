//! Lookup helpers for parts stored inside an OOXML package.

use crate::error::WorkbookError;
use crate::helpers::xml::XmlReader;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use zip::read::ZipFile;
use zip::result::ZipError;
use zip::ZipArchive;

pub(crate) trait ZipHelper<RS: Read + Seek> {
    /// Finds a part by name, ignoring ASCII case and a leading or back slash.
    fn file(&'_ mut self, name: &str) -> Result<Option<ZipFile<'_, RS>>, WorkbookError>;

    /// Opens an XML reader over a part, `None` when the part is absent.
    fn xml_reader(
        &'_ mut self,
        name: &str,
    ) -> Result<Option<XmlReader<BufReader<ZipFile<'_, RS>>>>, WorkbookError>;
}

impl<RS: Read + Seek> ZipHelper<RS> for ZipArchive<RS> {
    fn file(&'_ mut self, name: &str) -> Result<Option<ZipFile<'_, RS>>, WorkbookError> {
        let pattern = normalize_part_name(name);
        let path = self
            .file_names()
            .find(|file_name| pattern.eq_ignore_ascii_case(&normalize_part_name(file_name)))
            .map(|file_name| file_name.to_owned());
        match path.map(|file_name| self.by_name(&file_name)).transpose() {
            Ok(file) => Ok(file),
            Err(ZipError::FileNotFound) => Ok(None),
            Err(error) => Err(error)?,
        }
    }

    fn xml_reader(
        &'_ mut self,
        name: &str,
    ) -> Result<Option<XmlReader<BufReader<ZipFile<'_, RS>>>>, WorkbookError> {
        let reader = self
            .file(name)?
            .map(|file| XmlReader::new(BufReader::new(file)));
        Ok(reader)
    }
}

fn normalize_part_name(name: &str) -> String {
    name.replace('\\', "/").trim_start_matches('/').to_owned()
}
