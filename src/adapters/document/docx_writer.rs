//! WordprocessingML (.docx) exporter.
//!
//! Layout: the project title in the `Title` style, then for every section a
//! `Heading1` paragraph followed by one paragraph per blank-line separated
//! block of its content.

use crate::domain::document::{content_blocks, sort_by_order, DocumentKind, Project, Section};
use crate::ports::{DocumentExporter, ExportError, ExportFormat, ExportedDocument};

use super::ooxml::{office_rel, xml_escape, Package, Relationships, XML_DECLARATION};

const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Renders long-form projects into `.docx` packages.
#[derive(Debug, Clone, Default)]
pub struct DocxExporter;

impl DocxExporter {
    pub fn new() -> Self {
        Self
    }

    fn document_xml(&self, project: &Project, sections: &[Section]) -> String {
        let mut body = paragraph(Some("Title"), project.title());

        for section in sections {
            body.push_str(&paragraph(Some("Heading1"), section.title()));
            for block in content_blocks(section.content().unwrap_or_default()) {
                body.push_str(&paragraph(None, block));
            }
        }

        format!(
            concat!(
                "{decl}",
                r#"<w:document xmlns:w="{ns}"><w:body>"#,
                "{body}",
                r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/>"#,
                r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>"#,
                "</w:sectPr></w:body></w:document>"
            ),
            decl = XML_DECLARATION,
            ns = W_NS,
            body = body,
        )
    }
}

impl DocumentExporter for DocxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Docx
    }

    fn export(
        &self,
        project: &Project,
        sections: &[Section],
    ) -> Result<ExportedDocument, ExportError> {
        if project.document_kind() != DocumentKind::Docx {
            return Err(ExportError::FormatMismatch {
                requested: ExportFormat::Docx,
                actual: project.document_kind(),
            });
        }

        let mut ordered = sections.to_vec();
        sort_by_order(&mut ordered);

        let mut package = Package::new(
            project.title(),
            *project.created_at().as_datetime(),
            *project.updated_at().as_datetime(),
        );

        let mut document_rels = Relationships::new();
        document_rels.add(office_rel("styles"), "styles.xml");

        package.add_main_part(
            "word/document.xml",
            CT_DOCUMENT,
            self.document_xml(project, &ordered),
        );
        package.add_relationships("word/_rels/document.xml.rels", &document_rels);
        package.add_part("word/styles.xml", CT_STYLES, styles_xml());

        let bytes = package.finish()?;
        tracing::debug!(
            project_id = %project.id(),
            sections = ordered.len(),
            bytes = bytes.len(),
            "Rendered docx"
        );
        Ok(ExportedDocument::new(bytes, ExportFormat::Docx, project.title()))
    }
}

/// One paragraph; single line breaks inside `text` become `<w:br/>`.
fn paragraph(style: Option<&str>, text: &str) -> String {
    let mut xml = String::from("<w:p>");
    if let Some(style) = style {
        xml.push_str(&format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, style));
    }
    xml.push_str("<w:r>");
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        xml.push_str(&format!(
            r#"<w:t xml:space="preserve">{}</w:t>"#,
            xml_escape(line.trim_end_matches('\r'))
        ));
    }
    xml.push_str("</w:r></w:p>");
    xml
}

fn styles_xml() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<w:styles xmlns:w="{ns}">"#,
            r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:eastAsia="Calibri" w:cs="Calibri"/>"#,
            r#"<w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="en-US"/></w:rPr></w:rPrDefault>"#,
            r#"<w:pPrDefault><w:pPr><w:spacing w:after="200" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#,
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
            r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/>"#,
            r#"<w:pPr><w:spacing w:after="300"/><w:contextualSpacing/></w:pPr>"#,
            r#"<w:rPr><w:rFonts w:ascii="Calibri Light" w:hAnsi="Calibri Light"/><w:color w:val="17365D"/><w:kern w:val="28"/><w:sz w:val="52"/><w:szCs w:val="52"/></w:rPr></w:style>"#,
            r#"<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/>"#,
            r#"<w:pPr><w:keepNext/><w:keepLines/><w:spacing w:before="480" w:after="0"/><w:outlineLvl w:val="0"/></w:pPr>"#,
            r#"<w:rPr><w:rFonts w:ascii="Calibri Light" w:hAnsi="Calibri Light"/><w:b/><w:bCs/><w:color w:val="365F91"/><w:sz w:val="28"/><w:szCs w:val="28"/></w:rPr></w:style>"#,
            "</w:styles>"
        ),
        decl = XML_DECLARATION,
        ns = W_NS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::{Outline, SectionKind};
    use crate::domain::foundation::{ProjectId, UserId};
    use proptest::prelude::*;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn project(outline: Outline) -> Project {
        Project::new(
            ProjectId::new(),
            UserId::new("u1").unwrap(),
            "Quarterly Report".to_string(),
            "Q3".to_string(),
            outline,
        )
        .unwrap()
    }

    fn section(project: &Project, title: &str, order: u32, content: Option<&str>) -> Section {
        let mut s = Section::new(*project.id(), SectionKind::Section, title.to_string(), order);
        if let Some(c) = content {
            s.set_content(c.to_string());
        }
        s
    }

    fn read_document(bytes: Vec<u8>) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn exports_title_headings_and_paragraphs() {
        let p = project(Outline::LongForm(vec!["Intro".into()]));
        let sections = vec![section(&p, "Intro", 0, Some("First.\n\n  Second.  "))];

        let doc = DocxExporter::new().export(&p, &sections).unwrap();
        assert_eq!(doc.filename, "Quarterly Report.docx");
        assert_eq!(doc.format, ExportFormat::Docx);

        let xml = read_document(doc.content);
        assert!(xml.contains(r#"<w:pStyle w:val="Title"/></w:pPr><w:r><w:t xml:space="preserve">Quarterly Report</w:t>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t xml:space="preserve">Intro</w:t>"#));
        assert!(xml.contains(r#"<w:t xml:space="preserve">First.</w:t>"#));
        assert!(xml.contains(r#"<w:t xml:space="preserve">Second.</w:t>"#));
    }

    #[test]
    fn sections_are_written_in_order_index_order() {
        let p = project(Outline::LongForm(vec!["Intro".into(), "Results".into()]));
        let sections = vec![
            section(&p, "Results", 1, Some("Numbers")),
            section(&p, "Intro", 0, Some("Hello")),
        ];

        let xml = read_document(DocxExporter::new().export(&p, &sections).unwrap().content);

        let intro = xml.find(">Intro<").unwrap();
        let results = xml.find(">Results<").unwrap();
        assert!(intro < results);
    }

    proptest! {
        #[test]
        fn headings_follow_order_index_for_any_input_order(
            order in Just((0u32..6).collect::<Vec<_>>()).prop_shuffle()
        ) {
            let titles: Vec<String> = (0..6).map(|i| format!("Part {}", i)).collect();
            let p = project(Outline::LongForm(titles));
            let sections: Vec<Section> = order
                .iter()
                .map(|&i| section(&p, &format!("Part {}", i), i, Some("Body")))
                .collect();

            let xml = read_document(DocxExporter::new().export(&p, &sections).unwrap().content);

            let positions: Vec<usize> = (0..6)
                .map(|i| xml.find(&format!(">Part {}<", i)).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn empty_content_yields_heading_only() {
        let p = project(Outline::LongForm(vec!["Intro".into()]));
        let sections = vec![section(&p, "Intro", 0, None)];

        let xml = read_document(DocxExporter::new().export(&p, &sections).unwrap().content);

        // Title + one heading.
        assert_eq!(xml.matches("<w:p>").count(), 2);
    }

    #[test]
    fn escapes_markup_in_text() {
        let p = project(Outline::LongForm(vec!["A".into()]));
        let sections = vec![section(&p, "Costs & <Risks>", 0, None)];

        let xml = read_document(DocxExporter::new().export(&p, &sections).unwrap().content);
        assert!(xml.contains("Costs &amp; &lt;Risks&gt;"));
    }

    #[test]
    fn rejects_slide_deck_projects() {
        let p = project(Outline::SlideDeck(vec!["Slide".into()]));

        let result = DocxExporter::new().export(&p, &[]);

        assert!(matches!(
            result,
            Err(ExportError::FormatMismatch {
                requested: ExportFormat::Docx,
                actual: DocumentKind::Pptx
            })
        ));
    }

    #[test]
    fn paragraph_turns_single_newlines_into_breaks() {
        assert_eq!(
            paragraph(None, "a\nb"),
            r#"<w:p><w:r><w:t xml:space="preserve">a</w:t><w:br/><w:t xml:space="preserve">b</w:t></w:r></w:p>"#
        );
    }
}
