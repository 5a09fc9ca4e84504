//! Shared Office Open XML packaging.
//!
//! An OOXML file is a zip archive of XML parts wired together by
//! relationship parts and a `[Content_Types].xml` manifest. `Package`
//! collects parts in memory and writes the archive in one go.

use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::ports::ExportError;

pub(super) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub(super) const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";

const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED_PROPERTIES: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";

/// Namespace of relationship type URIs for parts inside the main document.
pub(super) fn office_rel(kind: &str) -> String {
    format!(
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/{}",
        kind
    )
}

/// Escapes text for use in XML element content or attribute values.
///
/// Control characters that XML 1.0 forbids are dropped.
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

/// A relationship part under construction.
#[derive(Debug, Default)]
pub(super) struct Relationships {
    entries: Vec<(String, String, String)>,
}

impl Relationships {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Adds a relationship and returns its id (`rId1`, `rId2`, ...).
    pub(super) fn add(&mut self, rel_type: impl Into<String>, target: impl Into<String>) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries
            .push((id.clone(), rel_type.into(), target.into()));
        id
    }

    pub(super) fn to_xml(&self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (id, rel_type, target) in &self.entries {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                id,
                rel_type,
                xml_escape(target)
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }
}

struct Part {
    path: String,
    content_type: Option<String>,
    xml: String,
}

/// In-memory OOXML package.
///
/// The package-level relationships, the content type manifest and the
/// document properties parts are generated by `finish`.
pub(super) struct Package {
    parts: Vec<Part>,
    root_rels: Relationships,
    title: String,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl Package {
    pub(super) fn new(title: &str, created: DateTime<Utc>, modified: DateTime<Utc>) -> Self {
        Self {
            parts: Vec::new(),
            root_rels: Relationships::new(),
            title: title.to_string(),
            created,
            modified,
        }
    }

    /// Registers the main document part, the target of the package's
    /// `officeDocument` relationship.
    pub(super) fn add_main_part(&mut self, path: &str, content_type: &str, xml: String) {
        self.root_rels.add(REL_OFFICE_DOCUMENT, path);
        self.add_part(path, content_type, xml);
    }

    /// Adds a part with an explicit content type override.
    pub(super) fn add_part(&mut self, path: &str, content_type: &str, xml: String) {
        self.parts.push(Part {
            path: path.to_string(),
            content_type: Some(content_type.to_string()),
            xml,
        });
    }

    /// Adds a `.rels` part (covered by the default extension mapping).
    pub(super) fn add_relationships(&mut self, path: &str, rels: &Relationships) {
        self.parts.push(Part {
            path: path.to_string(),
            content_type: None,
            xml: rels.to_xml(),
        });
    }

    /// Writes the zip archive and returns its bytes.
    pub(super) fn finish(mut self) -> Result<Vec<u8>, ExportError> {
        self.root_rels
            .add(REL_CORE_PROPERTIES, "docProps/core.xml");
        self.root_rels
            .add(REL_EXTENDED_PROPERTIES, "docProps/app.xml");

        let core = self.core_properties();
        self.add_part("docProps/core.xml", CT_CORE_PROPERTIES, core);
        self.add_part("docProps/app.xml", CT_EXTENDED_PROPERTIES, app_properties());

        let root_rels = self.root_rels.to_xml();
        let content_types = self.content_types();

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        write_entry(&mut zip, "[Content_Types].xml", &content_types, options)?;
        write_entry(&mut zip, "_rels/.rels", &root_rels, options)?;
        for part in &self.parts {
            write_entry(&mut zip, &part.path, &part.xml, options)?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| ExportError::packaging(format!("Failed to finish archive: {}", e)))?;
        Ok(cursor.into_inner())
    }

    fn content_types(&self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        xml.push_str(&format!(
            r#"<Default Extension="rels" ContentType="{}"/>"#,
            CT_RELATIONSHIPS
        ));
        xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
        for part in &self.parts {
            if let Some(content_type) = &part.content_type {
                xml.push_str(&format!(
                    r#"<Override PartName="/{}" ContentType="{}"/>"#,
                    part.path, content_type
                ));
            }
        }
        xml.push_str("</Types>");
        xml
    }

    fn core_properties(&self) -> String {
        format!(
            concat!(
                "{decl}",
                r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
                r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
                r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
                "<dc:title>{title}</dc:title>",
                "<dc:creator>DocForge</dc:creator>",
                r#"<dcterms:created xsi:type="dcterms:W3CDTF">{created}</dcterms:created>"#,
                r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{modified}</dcterms:modified>"#,
                "</cp:coreProperties>"
            ),
            decl = XML_DECLARATION,
            title = xml_escape(&self.title),
            created = w3c_datetime(&self.created),
            modified = w3c_datetime(&self.modified),
        )
    }
}

fn app_properties() -> String {
    format!(
        "{}{}",
        XML_DECLARATION,
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>DocForge</Application></Properties>"#
    )
}

fn w3c_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn write_entry(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    path: &str,
    xml: &str,
    options: FileOptions,
) -> Result<(), ExportError> {
    zip.start_file(path, options)
        .map_err(|e| ExportError::packaging(format!("Failed to add {}: {}", path, e)))?;
    zip.write_all(xml.as_bytes())
        .map_err(|e| ExportError::packaging(format!("Failed to write {}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn xml_escape_escapes_special_chars() {
        assert_eq!(
            xml_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn xml_escape_drops_forbidden_control_chars() {
        assert_eq!(xml_escape("a\u{0}b\u{1b}c\td"), "abc\td");
    }

    #[test]
    fn relationships_number_ids_in_order() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add(office_rel("styles"), "styles.xml"), "rId1");
        assert_eq!(rels.add(office_rel("theme"), "theme/theme1.xml"), "rId2");

        let xml = rels.to_xml();
        assert!(xml.contains(r#"Id="rId2""#));
        assert!(xml.contains("relationships/styles"));
    }

    #[test]
    fn package_contains_manifest_and_properties() {
        let now = Utc::now();
        let mut package = Package::new("R&D <Plan>", now, now);
        package.add_main_part("word/document.xml", "application/test+xml", "<doc/>".into());

        let bytes = package.finish().unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut manifest = String::new();
        archive
            .by_name("[Content_Types].xml")
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        assert!(manifest.contains(r#"PartName="/word/document.xml""#));
        assert!(manifest.contains(r#"PartName="/docProps/core.xml""#));

        let mut rels = String::new();
        archive
            .by_name("_rels/.rels")
            .unwrap()
            .read_to_string(&mut rels)
            .unwrap();
        assert!(rels.contains(r#"Target="word/document.xml""#));

        let mut core = String::new();
        archive
            .by_name("docProps/core.xml")
            .unwrap()
            .read_to_string(&mut core)
            .unwrap();
        assert!(core.contains("<dc:title>R&amp;D &lt;Plan&gt;</dc:title>"));
    }
}
