//! PresentationML (.pptx) exporter.
//!
//! Every section becomes one "Title and Content" slide: the section title
//! in the title placeholder, its content in the body placeholder with one
//! paragraph per line.

use crate::domain::document::{sort_by_order, DocumentKind, Project, Section};
use crate::ports::{DocumentExporter, ExportError, ExportFormat, ExportedDocument};

use super::ooxml::{office_rel, xml_escape, Package, Relationships, XML_DECLARATION};

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";

const NAMESPACES: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#
);

/// 4:3 slide size in EMU.
const SLIDE_WIDTH: u32 = 9_144_000;
const SLIDE_HEIGHT: u32 = 6_858_000;

/// First id of the `sldId` range reserved by the format.
const FIRST_SLIDE_ID: u32 = 256;

/// Renders slide-deck projects into `.pptx` packages.
#[derive(Debug, Clone, Default)]
pub struct PptxExporter;

impl PptxExporter {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExporter for PptxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pptx
    }

    fn export(
        &self,
        project: &Project,
        sections: &[Section],
    ) -> Result<ExportedDocument, ExportError> {
        if project.document_kind() != DocumentKind::Pptx {
            return Err(ExportError::FormatMismatch {
                requested: ExportFormat::Pptx,
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

        // presentation.xml.rels: master, theme, then one per slide.
        let mut presentation_rels = Relationships::new();
        let master_rid = presentation_rels.add(
            office_rel("slideMaster"),
            "slideMasters/slideMaster1.xml",
        );
        presentation_rels.add(office_rel("theme"), "theme/theme1.xml");

        let mut slide_rids = Vec::with_capacity(ordered.len());
        for (i, section) in ordered.iter().enumerate() {
            let number = i + 1;
            let rid = presentation_rels.add(
                office_rel("slide"),
                format!("slides/slide{}.xml", number),
            );
            slide_rids.push(rid);

            let mut slide_rels = Relationships::new();
            slide_rels.add(
                office_rel("slideLayout"),
                "../slideLayouts/slideLayout1.xml",
            );

            package.add_part(
                &format!("ppt/slides/slide{}.xml", number),
                CT_SLIDE,
                slide_xml(section),
            );
            package.add_relationships(
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                &slide_rels,
            );
        }

        package.add_main_part(
            "ppt/presentation.xml",
            CT_PRESENTATION,
            presentation_xml(&master_rid, &slide_rids),
        );
        package.add_relationships("ppt/_rels/presentation.xml.rels", &presentation_rels);

        let mut master_rels = Relationships::new();
        master_rels.add(office_rel("slideLayout"), "../slideLayouts/slideLayout1.xml");
        master_rels.add(office_rel("theme"), "../theme/theme1.xml");
        package.add_part(
            "ppt/slideMasters/slideMaster1.xml",
            CT_SLIDE_MASTER,
            slide_master_xml(),
        );
        package.add_relationships(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &master_rels,
        );

        let mut layout_rels = Relationships::new();
        layout_rels.add(office_rel("slideMaster"), "../slideMasters/slideMaster1.xml");
        package.add_part(
            "ppt/slideLayouts/slideLayout1.xml",
            CT_SLIDE_LAYOUT,
            slide_layout_xml(),
        );
        package.add_relationships(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &layout_rels,
        );

        package.add_part("ppt/theme/theme1.xml", CT_THEME, theme_xml());

        let bytes = package.finish()?;
        tracing::debug!(
            project_id = %project.id(),
            slides = ordered.len(),
            bytes = bytes.len(),
            "Rendered pptx"
        );
        Ok(ExportedDocument::new(bytes, ExportFormat::Pptx, project.title()))
    }
}

fn presentation_xml(master_rid: &str, slide_rids: &[String]) -> String {
    let mut xml = format!(
        r#"{}<p:presentation {} saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="{}"/></p:sldMasterIdLst>"#,
        XML_DECLARATION, NAMESPACES, master_rid
    );
    if !slide_rids.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for (i, rid) in slide_rids.iter().enumerate() {
            xml.push_str(&format!(
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID + i as u32,
                rid
            ));
        }
        xml.push_str("</p:sldIdLst>");
    }
    xml.push_str(&format!(
        r#"<p:sldSz cx="{}" cy="{}" type="screen4x3"/><p:notesSz cx="{}" cy="{}"/></p:presentation>"#,
        SLIDE_WIDTH, SLIDE_HEIGHT, SLIDE_HEIGHT, SLIDE_WIDTH
    ));
    xml
}

/// Text body paragraphs, one `<a:p>` per line of `text`.
fn text_paragraphs(text: &str) -> String {
    if text.is_empty() {
        return r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#.to_string();
    }
    text.split('\n')
        .map(|line| {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#.to_string()
            } else {
                format!(
                    r#"<a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
                    xml_escape(line)
                )
            }
        })
        .collect()
}

fn group_shape_header() -> &'static str {
    concat!(
        r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
        r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#
    )
}

/// A placeholder shape. `xfrm` is empty for shapes inheriting geometry.
fn placeholder(id: u32, name: &str, ph: &str, xfrm: &str, paragraphs: &str) -> String {
    format!(
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#,
            "<p:nvPr>{ph}</p:nvPr></p:nvSpPr><p:spPr>{xfrm}</p:spPr>",
            "<p:txBody><a:bodyPr/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"
        ),
        id = id,
        name = name,
        ph = ph,
        xfrm = xfrm,
        paragraphs = paragraphs,
    )
}

const TITLE_PH: &str = r#"<p:ph type="title"/>"#;
const BODY_PH: &str = r#"<p:ph idx="1"/>"#;
const MASTER_BODY_PH: &str = r#"<p:ph type="body" idx="1"/>"#;

fn slide_xml(section: &Section) -> String {
    format!(
        r#"{}<p:sld {}><p:cSld><p:spTree>{}{}{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        XML_DECLARATION,
        NAMESPACES,
        group_shape_header(),
        placeholder(2, "Title 1", TITLE_PH, "", &text_paragraphs(section.title())),
        placeholder(
            3,
            "Content Placeholder 2",
            BODY_PH,
            "",
            &text_paragraphs(section.content().unwrap_or_default())
        ),
    )
}

fn slide_layout_xml() -> String {
    let empty = text_paragraphs("");
    format!(
        r#"{}<p:sldLayout {} type="obj" preserve="1"><p:cSld name="Title and Content"><p:spTree>{}{}{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        XML_DECLARATION,
        NAMESPACES,
        group_shape_header(),
        placeholder(2, "Title 1", TITLE_PH, "", &empty),
        placeholder(3, "Content Placeholder 2", BODY_PH, "", &empty),
    )
}

fn slide_master_xml() -> String {
    let empty = text_paragraphs("");
    let title_xfrm = r#"<a:xfrm><a:off x="457200" y="274638"/><a:ext cx="8229600" cy="1143000"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#;
    let body_xfrm = r#"<a:xfrm><a:off x="457200" y="1600200"/><a:ext cx="8229600" cy="4525963"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#;

    format!(
        concat!(
            "{decl}<p:sldMaster {ns}><p:cSld><p:bg><p:bgRef idx=\"1001\"><a:schemeClr val=\"bg1\"/></p:bgRef></p:bg>",
            "<p:spTree>{group}{title}{body}</p:spTree></p:cSld>",
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" "#,
            r#"accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            "<p:txStyles>",
            r#"<p:titleStyle><a:lvl1pPr algn="ctr"><a:defRPr sz="4400"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/></a:defRPr></a:lvl1pPr></p:titleStyle>"#,
            r#"<p:bodyStyle><a:lvl1pPr marL="342900" indent="-342900"><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/><a:defRPr sz="2800"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr></p:bodyStyle>"#,
            r#"<p:otherStyle><a:lvl1pPr><a:defRPr sz="1800"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill></a:defRPr></a:lvl1pPr></p:otherStyle>"#,
            "</p:txStyles></p:sldMaster>"
        ),
        decl = XML_DECLARATION,
        ns = NAMESPACES,
        group = group_shape_header(),
        title = placeholder(2, "Title Placeholder 1", TITLE_PH, title_xfrm, &empty),
        body = placeholder(3, "Text Placeholder 2", MASTER_BODY_PH, body_xfrm, &empty),
    )
}

fn theme_xml() -> String {
    let solid = |c: &str| format!(r#"<a:solidFill><a:schemeClr val="{}"/></a:solidFill>"#, c);
    let line = |w: u32| {
        format!(
            r#"<a:ln w="{}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln>"#,
            w
        )
    };
    let fills = format!("{0}{0}{0}", solid("phClr"));
    let lines = format!("{}{}{}", line(9525), line(25400), line(38100));
    let effects = "<a:effectStyle><a:effectLst/></a:effectStyle>".repeat(3);

    format!(
        concat!(
            "{decl}",
            r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements>"#,
            r#"<a:clrScheme name="Office">"#,
            r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
            r#"<a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2>"#,
            r#"<a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2>"#,
            r#"<a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4>"#,
            r#"<a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6>"#,
            r#"<a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink>"#,
            "</a:clrScheme>",
            r#"<a:fontScheme name="Office">"#,
            r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
            "</a:fontScheme>",
            r#"<a:fmtScheme name="Office">"#,
            "<a:fillStyleLst>{fills}</a:fillStyleLst>",
            "<a:lnStyleLst>{lines}</a:lnStyleLst>",
            "<a:effectStyleLst>{effects}</a:effectStyleLst>",
            "<a:bgFillStyleLst>{fills}</a:bgFillStyleLst>",
            "</a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"
        ),
        decl = XML_DECLARATION,
        fills = fills,
        lines = lines,
        effects = effects,
    )
}
