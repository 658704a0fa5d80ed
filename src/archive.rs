//! Packs the per-partition workbooks into one zip archive.

use crate::error::SplitError;
use regex::Regex;
use std::collections::HashSet;
use std::io::Cursor;
use std::io::Write;
use std::sync::LazyLock;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

/// Extension of every entry.
pub const ENTRY_EXTENSION: &str = ".xlsx";

/// Longest stem kept, in characters, before suffixes are added.
const MAX_STEM_LEN: usize = 200;

/// Characters that cannot appear in an entry name.
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\\\p{Cc}]").expect("Hardcode regex pattern"));

/// How entries are stored in the archive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Compression {
    Stored,
    #[default]
    Deflated,
}

impl From<Compression> for CompressionMethod {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub compression: Compression,

    /// Appended to every entry stem, e.g. `_2024-01-31`.
    pub name_suffix: Option<String>,
}

/// One file of the archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub blob: Vec<u8>,
}

/// Turns display forms into unique entry names, keeping their order.
///
/// Each stem is trimmed, stripped of path separators and control characters
/// and capped in length; an empty stem becomes `_`. The suffix only has its
/// unsafe characters replaced. Names already taken get
/// ` (2)`, ` (3)`, ... before the extension.
pub fn entry_names<'a>(stems: impl IntoIterator<Item = &'a str>, options: &ArchiveOptions) -> Vec<String> {
    let suffix = options
        .name_suffix
        .as_deref()
        .map(|suffix| UNSAFE_CHARS.replace_all(suffix, "_"))
        .unwrap_or_default();
    let mut used = HashSet::<String>::new();
    let mut names = Vec::<String>::new();
    for stem in stems {
        let stem = format!("{}{suffix}", sanitize_stem(stem));
        let mut name = format!("{stem}{ENTRY_EXTENSION}");
        let mut counter = 2usize;
        while used.contains(&name) {
            name = format!("{stem} ({counter}){ENTRY_EXTENSION}");
            counter += 1;
        }
        used.insert(name.to_owned());
        names.push(name);
    }
    names
}

fn sanitize_stem(stem: &str) -> String {
    let replaced = UNSAFE_CHARS.replace_all(stem.trim(), "_");
    let capped: String = replaced.chars().take(MAX_STEM_LEN).collect();
    match capped.trim_end() {
        "" => "_".to_owned(),
        trimmed => trimmed.to_owned(),
    }
}

/// Writes `entries` into a zip archive, in order.
pub fn assemble(entries: &[ArchiveEntry], options: &ArchiveOptions) -> Result<Vec<u8>, SplitError> {
    let archive_error = |error: &dyn std::fmt::Display| SplitError::ArchiveError(error.to_string());
    let file_options = SimpleFileOptions::default().compression_method(options.compression.into());

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        writer
            .start_file(entry.name.as_str(), file_options)
            .map_err(|error| archive_error(&error))?;
        writer.write_all(&entry.blob).map_err(|error| archive_error(&error))?;
    }
    let cursor = writer.finish().map_err(|error| archive_error(&error))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Read;
    use zip::ZipArchive;

    fn names(stems: &[&str]) -> Vec<String> {
        entry_names(stems.iter().copied(), &ArchiveOptions::default())
    }

    #[test]
    fn names_are_sanitized() {
        assert_eq!(names(&["a/b", "c", ""]), ["a_b.xlsx", "c.xlsx", "_.xlsx"]);
        assert_eq!(names(&["  EU  ", "x\\y\0z", "tab\there", "   "]), ["EU.xlsx", "x_y_z.xlsx", "tab_here.xlsx", "_.xlsx"]);
        assert_eq!(names(&["k".repeat(300).as_str()])[0].len(), MAX_STEM_LEN + ENTRY_EXTENSION.len());

        let cut_at_space = format!("{} tail", "k".repeat(MAX_STEM_LEN - 1));
        assert_eq!(names(&[cut_at_space.as_str()]), [format!("{}.xlsx", "k".repeat(MAX_STEM_LEN - 1))]);
    }

    #[test]
    fn collisions_get_counters() {
        assert_eq!(names(&["1", "1"]), ["1.xlsx", "1 (2).xlsx"]);
        assert_eq!(names(&["a/b", "a_b", "a\\b"]), ["a_b.xlsx", "a_b (2).xlsx", "a_b (3).xlsx"]);
        assert_eq!(names(&["1", "1 (2)", "1"]), ["1.xlsx", "1 (2).xlsx", "1 (3).xlsx"]);
        assert_eq!(names(&["EU", "eu"]), ["EU.xlsx", "eu.xlsx"]);
    }

    #[test]
    fn suffix_goes_before_extension() {
        let options = ArchiveOptions {
            name_suffix: Some("_2024-01-31".to_owned()),
            ..ArchiveOptions::default()
        };
        assert_eq!(
            entry_names(["EU", "EU"], &options),
            ["EU_2024-01-31.xlsx", "EU_2024-01-31 (2).xlsx"]
        );
    }

    #[test]
    fn suffix_is_kept_verbatim_apart_from_unsafe_chars() {
        let with = |suffix: &str| ArchiveOptions {
            name_suffix: Some(suffix.to_owned()),
            ..ArchiveOptions::default()
        };
        assert_eq!(entry_names(["EU"], &with("")), ["EU.xlsx"]);
        assert_eq!(entry_names(["EU"], &with(" v2")), ["EU v2.xlsx"]);
        assert_eq!(entry_names(["EU"], &with("_2024/01")), ["EU_2024_01.xlsx"]);
    }

    #[test]
    fn entries_keep_order_and_content() {
        for compression in [Compression::Stored, Compression::Deflated] {
            let entries = vec![
                ArchiveEntry { name: "b.xlsx".to_owned(), blob: b"second".to_vec() },
                ArchiveEntry { name: "a.xlsx".to_owned(), blob: b"first".to_vec() },
            ];
            let options = ArchiveOptions { compression, ..ArchiveOptions::default() };
            let blob = assemble(&entries, &options).unwrap();

            let mut zip = ZipArchive::new(Cursor::new(blob)).unwrap();
            assert_eq!(zip.len(), 2);
            for (index, entry) in entries.iter().enumerate() {
                let mut file = zip.by_index(index).unwrap();
                assert_eq!(file.name(), entry.name);
                assert_eq!(file.compression(), CompressionMethod::from(compression));
                let mut content = Vec::new();
                file.read_to_end(&mut content).unwrap();
                assert_eq!(content, entry.blob);
            }
        }
    }

    #[test]
    fn empty_archive_is_valid() {
        let blob = assemble(&[], &ArchiveOptions::default()).unwrap();
        let zip = ZipArchive::new(Cursor::new(blob)).unwrap();
        assert_eq!(zip.len(), 0);
    }
}
