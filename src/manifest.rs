//! Qt resource manifest (`.qrc`) reading.
//!
//! Only the `RCC > qresource > file` structure is looked at; attributes such
//! as `prefix` or `alias` are ignored.

use std::fmt;
use std::io;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::SweepError;
use crate::ports::FileSystem;

/// Default manifest file name at the project root.
pub const DEFAULT_MANIFEST: &str = "seafile-client.qrc";

/// Default path prefix of the entries this tool cares about.
pub const DEFAULT_PREFIX: &str = "images/";

/// One `file` entry taken from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclaredAsset(String);

impl DeclaredAsset {
    /// Wraps a manifest path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The path exactly as written in the manifest.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }

    /// The component after the last `/`.
    #[must_use]
    pub fn basename(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// The `:/`-prefixed form Qt code uses to load the resource.
    #[must_use]
    pub fn resource_url(&self) -> String {
        format!(":/{}", self.0)
    }
}

impl fmt::Display for DeclaredAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
struct Rcc {
    #[serde(rename = "qresource", default)]
    sections: Vec<QResource>,
}

#[derive(Deserialize)]
struct QResource {
    #[serde(rename = "file", default)]
    files: Vec<QFile>,
}

#[derive(Deserialize)]
struct QFile {
    #[serde(rename = "$text", default)]
    path: String,
}

/// Name of the document element of a Qt resource manifest.
const ROOT_ELEMENT: &str = "RCC";

fn malformed(source: &Path, message: impl Into<String>) -> SweepError {
    SweepError::ManifestMalformed { path: source.to_path_buf(), message: message.into() }
}

/// Fails unless the first element of the document is `<RCC>`.
fn check_root_element(source: &Path, xml: &str) -> Result<(), SweepError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                let name = e.name();
                if name.as_ref() == ROOT_ELEMENT.as_bytes() {
                    return Ok(());
                }
                return Err(malformed(
                    source,
                    format!(
                        "root element is <{}>, expected <{ROOT_ELEMENT}>",
                        String::from_utf8_lossy(name.as_ref())
                    ),
                ));
            }
            Ok(Event::Eof) => return Err(malformed(source, "document has no root element")),
            Ok(_) => {}
            Err(e) => return Err(malformed(source, e.to_string())),
        }
    }
}

/// Parses manifest text and keeps the entries starting with `prefix`.
///
/// Order follows the document; multiple `qresource` sections are read one
/// after another, even when other elements sit between them.
///
/// # Errors
///
/// Returns [`SweepError::ManifestMalformed`] when the text is not an
/// `RCC` document with at least one `qresource` section.
pub fn parse_declared_assets(
    source: &Path,
    xml: &str,
    prefix: &str,
) -> Result<Vec<DeclaredAsset>, SweepError> {
    check_root_element(source, xml)?;
    let rcc: Rcc = quick_xml::de::from_str(xml).map_err(|e| malformed(source, e.to_string()))?;
    if rcc.sections.is_empty() {
        return Err(malformed(source, "no <qresource> section"));
    }

    let mut assets = Vec::new();
    for file in rcc.sections.into_iter().flat_map(|section| section.files) {
        let path = file.path.trim();
        if path.starts_with(prefix) {
            trace!(asset = path, "declared asset");
            assets.push(DeclaredAsset::new(path));
        } else {
            trace!(entry = path, prefix, "skipping entry outside prefix");
        }
    }
    Ok(assets)
}

/// Reads the manifest at `path` and returns the declared assets under `prefix`.
///
/// # Errors
///
/// Returns [`SweepError::ManifestNotFound`] if the file cannot be read and
/// [`SweepError::ManifestMalformed`] if it is not UTF-8 or cannot be parsed.
pub fn read_declared_assets(
    fs: &dyn FileSystem,
    path: &Path,
    prefix: &str,
) -> Result<Vec<DeclaredAsset>, SweepError> {
    let xml = fs.read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::InvalidData {
            malformed(path, source.to_string())
        } else {
            SweepError::ManifestNotFound { path: path.to_path_buf(), source }
        }
    })?;
    parse_declared_assets(path, &xml, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted::ScriptedFileSystem;

    const MANIFEST: &str = r#"<!DOCTYPE RCC><RCC version="1.0">
<qresource prefix="/">
    <file>images/seafile.png</file>
    <file>qt/qt_zh_CN.qm</file>
    <file alias="logo.png">images/logo-small.png</file>
    <file>fonts/segoe.ttf</file>
    <file>images/sync/done.png</file>
</qresource>
</RCC>"#;

    fn paths(assets: &[DeclaredAsset]) -> Vec<&str> {
        assets.iter().map(DeclaredAsset::path).collect()
    }

    #[test]
    fn keeps_prefixed_entries_in_order() {
        let assets = parse_declared_assets(Path::new("x.qrc"), MANIFEST, DEFAULT_PREFIX).unwrap();
        assert_eq!(
            paths(&assets),
            vec!["images/seafile.png", "images/logo-small.png", "images/sync/done.png"]
        );
    }

    #[test]
    fn custom_prefix() {
        let assets = parse_declared_assets(Path::new("x.qrc"), MANIFEST, "qt/").unwrap();
        assert_eq!(paths(&assets), vec!["qt/qt_zh_CN.qm"]);
    }

    #[test]
    fn reads_every_resource_section() {
        let xml = "<RCC><qresource><file>images/a.png</file></qresource>\
                   <qresource prefix=\"/i18n\"><file>images/b.png</file></qresource></RCC>";
        let assets = parse_declared_assets(Path::new("x.qrc"), xml, DEFAULT_PREFIX).unwrap();
        assert_eq!(paths(&assets), vec!["images/a.png", "images/b.png"]);
    }

    #[test]
    fn sections_separated_by_other_elements() {
        let xml = "<RCC><qresource><file>images/a.png</file></qresource>\
                   <extra/>\
                   <qresource><file>images/b.png</file></qresource></RCC>";
        let assets = parse_declared_assets(Path::new("x.qrc"), xml, DEFAULT_PREFIX).unwrap();
        assert_eq!(paths(&assets), vec!["images/a.png", "images/b.png"]);
    }

    #[test]
    fn files_separated_by_other_elements() {
        let xml = "<RCC><qresource><file>images/a.png</file><note/>\
                   <file>images/b.png</file></qresource></RCC>";
        let assets = parse_declared_assets(Path::new("x.qrc"), xml, DEFAULT_PREFIX).unwrap();
        assert_eq!(paths(&assets), vec!["images/a.png", "images/b.png"]);
    }

    #[test]
    fn foreign_root_element_is_malformed() {
        let xml = "<html><qresource><file>images/a.png</file></qresource></html>";
        let err = parse_declared_assets(Path::new("x.qrc"), xml, DEFAULT_PREFIX).unwrap_err();
        match err {
            SweepError::ManifestMalformed { message, .. } => assert!(message.contains("<html>")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_utf8_manifest_is_malformed() {
        use crate::adapters::live::filesystem::LiveFileSystem;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seafile-client.qrc");
        std::fs::write(&path, b"<RCC><qresource><file>images/\xff.png</file></qresource></RCC>")
            .unwrap();
        let err = read_declared_assets(&LiveFileSystem, &path, DEFAULT_PREFIX).unwrap_err();
        assert!(matches!(err, SweepError::ManifestMalformed { .. }));
    }

    #[test]
    fn empty_section_yields_nothing() {
        let xml = "<RCC><qresource prefix=\"/\"></qresource></RCC>";
        let assets = parse_declared_assets(Path::new("x.qrc"), xml, DEFAULT_PREFIX).unwrap();
        assert!(assets.is_empty());
    }

    #[test]
    fn garbage_is_malformed() {
        let err = parse_declared_assets(Path::new("x.qrc"), "not xml at all <", DEFAULT_PREFIX)
            .unwrap_err();
        assert!(matches!(err, SweepError::ManifestMalformed { .. }));
    }

    #[test]
    fn missing_section_is_malformed() {
        let err =
            parse_declared_assets(Path::new("x.qrc"), "<RCC></RCC>", DEFAULT_PREFIX).unwrap_err();
        assert!(matches!(err, SweepError::ManifestMalformed { .. }));
    }

    #[test]
    fn unreadable_manifest_is_not_found() {
        let fs = ScriptedFileSystem::new();
        let err =
            read_declared_assets(&fs, Path::new("/p/seafile-client.qrc"), DEFAULT_PREFIX)
                .unwrap_err();
        assert!(matches!(err, SweepError::ManifestNotFound { .. }));
    }

    #[test]
    fn reads_through_filesystem_port() {
        let fs = ScriptedFileSystem::new().with_file("/p/seafile-client.qrc", MANIFEST);
        let assets =
            read_declared_assets(&fs, Path::new("/p/seafile-client.qrc"), DEFAULT_PREFIX).unwrap();
        assert_eq!(assets.len(), 3);
    }

    #[test]
    fn asset_accessors() {
        let asset = DeclaredAsset::new("images/toolbar/add@2x.png");
        assert_eq!(asset.basename(), "add@2x.png");
        assert_eq!(asset.resource_url(), ":/images/toolbar/add@2x.png");
        assert_eq!(DeclaredAsset::new("plain.png").basename(), "plain.png");
    }
}
