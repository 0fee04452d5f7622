/// Extension-based file classification.
///
/// Maps file extensions to a closed set of coarse categories. The lookup is
/// a pure, total function: every string maps to exactly one category and
/// anything unrecognized falls back to [`Category::File`]. Matching is
/// case-insensitive and never touches file content.
///
/// # Examples
///
/// ```
/// use sortdesk::file_category::Category;
///
/// assert_eq!(Category::classify("png"), Category::Image);
/// assert_eq!(Category::classify("PNG"), Category::Image);
/// assert_eq!(Category::classify("xyz"), Category::File);
/// ```
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// A coarse file-type bucket derived from the extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Raster and vector images (PNG, JPG, SVG, ...).
    Image,
    /// Video containers (MP4, MKV, MOV, ...).
    Video,
    /// Audio files (MP3, FLAC, WAV, ...).
    Audio,
    /// PDF documents.
    Pdf,
    /// Word-processor documents (DOC, DOCX, ODT, ...).
    Word,
    /// Spreadsheets (XLS, XLSX, CSV, ...).
    Excel,
    /// Everything else.
    File,
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "tiff", "tif", "ico", "heic", "heif",
    "avif",
];

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "flv", "wmv", "webm", "3gp", "mpg", "mpeg", "m4v", "ts",
];

const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "ogg", "flac", "aac", "m4a", "wma", "opus", "aiff",
];

const PDF_EXTENSIONS: &[&str] = &["pdf"];

const WORD_EXTENSIONS: &[&str] = &["doc", "docx", "odt", "rtf", "hwp", "hwpx", "pages"];

const EXCEL_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "ods", "csv", "numbers"];

fn extension_table() -> &'static HashMap<&'static str, Category> {
    static TABLE: OnceLock<HashMap<&'static str, Category>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let sets = [
            (IMAGE_EXTENSIONS, Category::Image),
            (VIDEO_EXTENSIONS, Category::Video),
            (AUDIO_EXTENSIONS, Category::Audio),
            (PDF_EXTENSIONS, Category::Pdf),
            (WORD_EXTENSIONS, Category::Word),
            (EXCEL_EXTENSIONS, Category::Excel),
        ];
        let mut table = HashMap::new();
        for (extensions, category) in sets {
            for ext in extensions {
                table.insert(*ext, category);
            }
        }
        table
    })
}

impl Category {
    /// Classifies a file extension (without the leading dot).
    ///
    /// Total over all strings: unknown extensions yield [`Category::File`].
    pub fn classify(ext: &str) -> Category {
        extension_table()
            .get(ext.to_lowercase().as_str())
            .copied()
            .unwrap_or(Category::File)
    }

    /// The stable lowercase name used for `$[type]` substitution and
    /// bucket-directory names.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Image => "image",
            Category::Video => "video",
            Category::Audio => "audio",
            Category::Pdf => "pdf",
            Category::Word => "word",
            Category::Excel => "excel",
            Category::File => "file",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions_map_to_documented_category() {
        assert_eq!(Category::classify("png"), Category::Image);
        assert_eq!(Category::classify("jpeg"), Category::Image);
        assert_eq!(Category::classify("mkv"), Category::Video);
        assert_eq!(Category::classify("flac"), Category::Audio);
        assert_eq!(Category::classify("pdf"), Category::Pdf);
        assert_eq!(Category::classify("docx"), Category::Word);
        assert_eq!(Category::classify("csv"), Category::Excel);
    }

    #[test]
    fn test_unknown_extension_defaults_to_file() {
        assert_eq!(Category::classify("xyz"), Category::File);
        assert_eq!(Category::classify(""), Category::File);
        assert_eq!(Category::classify("tar.gz"), Category::File);
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(Category::classify("JPG"), Category::classify("jpg"));
        assert_eq!(Category::classify("Pdf"), Category::Pdf);
        assert_eq!(Category::classify("XLSX"), Category::Excel);
    }

    #[test]
    fn test_classification_is_idempotent() {
        for ext in ["png", "mp4", "mp3", "pdf", "doc", "xls", "zzz"] {
            assert_eq!(Category::classify(ext), Category::classify(ext));
        }
    }

    #[test]
    fn test_every_extension_maps_to_exactly_one_category() {
        // The sets must be disjoint; a duplicate would silently shadow.
        let all = [
            IMAGE_EXTENSIONS,
            VIDEO_EXTENSIONS,
            AUDIO_EXTENSIONS,
            PDF_EXTENSIONS,
            WORD_EXTENSIONS,
            EXCEL_EXTENSIONS,
        ];
        let total: usize = all.iter().map(|s| s.len()).sum();
        assert_eq!(extension_table().len(), total);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(Category::Image.name(), "image");
        assert_eq!(Category::File.name(), "file");
        assert_eq!(Category::Excel.to_string(), "excel");
    }
}
