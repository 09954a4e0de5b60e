use std::io::{Cursor, Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::DocxError;
use super::model::{Block, Document, Paragraph, Run};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const FOOTER_REL_ID: &str = "rId2";

/// Write `doc` as a `.docx` package into `writer`
pub fn write_docx<W: Write + Seek>(doc: &Document, writer: W) -> Result<W, DocxError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let has_footer = doc.footer.is_some();

    let mut parts = vec![
        ("[Content_Types].xml", content_types(has_footer)),
        ("_rels/.rels", package_rels()),
        ("docProps/core.xml", core_properties(doc)),
        ("word/_rels/document.xml.rels", document_rels(has_footer)),
        ("word/document.xml", document_xml(doc)),
        ("word/styles.xml", styles_xml()),
    ];
    if let Some(footer) = &doc.footer {
        parts.push(("word/footer1.xml", footer_xml(footer)));
    }

    for (name, content) in parts {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }

    Ok(zip.finish()?)
}

/// Render `doc` into an in-memory `.docx`
pub fn to_bytes(doc: &Document) -> Result<Vec<u8>, DocxError> {
    Ok(write_docx(doc, Cursor::new(Vec::new()))?.into_inner())
}

fn content_types(has_footer: bool) -> String {
    let footer = if has_footer {
        r#"<Override PartName="/word/footer1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"/>"#
    } else {
        ""
    };
    format!(
        concat!(
            "{decl}",
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
            r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
            r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
            "{footer}",
            "</Types>"
        ),
        decl = XML_DECL,
        footer = footer
    )
}

fn package_rels() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
            "</Relationships>"
        ),
        decl = XML_DECL
    )
}

fn document_rels(has_footer: bool) -> String {
    let footer = if has_footer {
        format!(
            r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/>"#,
            FOOTER_REL_ID
        )
    } else {
        String::new()
    };
    format!(
        concat!(
            "{decl}",
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            "{footer}",
            "</Relationships>"
        ),
        decl = XML_DECL,
        footer = footer
    )
}

fn core_properties(doc: &Document) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties""#,
        r#" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/""#,
        r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    if let Some(title) = &doc.title {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape(title)));
    }
    if let Some(creator) = &doc.creator {
        xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape(creator)));
    }
    if let Some(created) = &doc.created {
        xml.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            created.format("%Y-%m-%dT%H:%M:%SZ")
        ));
    }
    xml.push_str("</cp:coreProperties>");
    xml
}

fn document_xml(doc: &Document) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!(
        r#"<w:document xmlns:w="{}" xmlns:r="{}"><w:body>"#,
        W_NS, R_NS
    ));

    for block in &doc.body {
        match block {
            Block::Heading { level, text } => {
                let style = format!("Heading{}", level);
                write_paragraph(&mut xml, Some(&style), None, &[Run::text(text.as_str())]);
            }
            Block::Paragraph(paragraph) => {
                write_paragraph(
                    &mut xml,
                    None,
                    paragraph.alignment.map(|a| a.as_ooxml()),
                    &paragraph.runs,
                );
            }
        }
    }

    xml.push_str("<w:sectPr>");
    if doc.footer.is_some() {
        xml.push_str(&format!(
            r#"<w:footerReference w:type="default" r:id="{}"/>"#,
            FOOTER_REL_ID
        ));
    }
    xml.push_str(concat!(
        r#"<w:pgSz w:w="12240" w:h="15840"/>"#,
        r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>"#,
        "</w:sectPr></w:body></w:document>"
    ));
    xml
}

fn footer_xml(footer: &Paragraph) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!(r#"<w:ftr xmlns:w="{}" xmlns:r="{}">"#, W_NS, R_NS));
    write_paragraph(
        &mut xml,
        None,
        footer.alignment.map(|a| a.as_ooxml()),
        &footer.runs,
    );
    xml.push_str("</w:ftr>");
    xml
}

fn write_paragraph(xml: &mut String, style: Option<&str>, alignment: Option<&str>, runs: &[Run]) {
    xml.push_str("<w:p>");
    if style.is_some() || alignment.is_some() {
        xml.push_str("<w:pPr>");
        if let Some(style) = style {
            xml.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, style));
        }
        if let Some(alignment) = alignment {
            xml.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment));
        }
        xml.push_str("</w:pPr>");
    }
    for run in runs {
        write_run(xml, run);
    }
    xml.push_str("</w:p>");
}

fn write_run(xml: &mut String, run: &Run) {
    xml.push_str("<w:r>");
    if run.bold || run.italic || run.size_pt.is_some() {
        xml.push_str("<w:rPr>");
        if run.bold {
            xml.push_str("<w:b/>");
        }
        if run.italic {
            xml.push_str("<w:i/>");
        }
        if let Some(points) = run.size_pt {
            // sizes are stored in half-points
            xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, points * 2));
        }
        xml.push_str("</w:rPr>");
    }

    let mut segment = String::new();
    for ch in run.text.chars() {
        match ch {
            '\n' | '\r' | '\t' => {
                flush_text(xml, &mut segment);
                xml.push_str(if ch == '\t' { "<w:tab/>" } else { "<w:br/>" });
            }
            _ => segment.push(ch),
        }
    }
    flush_text(xml, &mut segment);
    xml.push_str("</w:r>");
}

fn flush_text(xml: &mut String, segment: &mut String) {
    if segment.is_empty() {
        return;
    }
    xml.push_str(r#"<w:t xml:space="preserve">"#);
    xml.push_str(&escape(segment));
    xml.push_str("</w:t>");
    segment.clear();
}

fn styles_xml() -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!(r#"<w:styles xmlns:w="{}">"#, W_NS));
    xml.push_str(concat!(
        "<w:docDefaults><w:rPrDefault><w:rPr>",
        r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:eastAsia="Calibri" w:cs="Calibri"/>"#,
        r#"<w:sz w:val="22"/><w:szCs w:val="22"/>"#,
        "</w:rPr></w:rPrDefault>",
        r#"<w:pPrDefault><w:pPr><w:spacing w:after="200" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault>"#,
        "</w:docDefaults>",
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
    ));
    for (level, half_points) in [(1, 28), (2, 26), (3, 24)] {
        xml.push_str(&format!(
            concat!(
                r#"<w:style w:type="paragraph" w:styleId="Heading{level}">"#,
                r#"<w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/>"#,
                r#"<w:pPr><w:keepNext/><w:spacing w:before="240" w:after="0"/><w:outlineLvl w:val="{outline}"/></w:pPr>"#,
                r#"<w:rPr><w:b/><w:color w:val="2F5496"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr>"#,
                "</w:style>"
            ),
            level = level,
            outline = level - 1,
            size = half_points
        ));
    }
    xml.push_str("</w:styles>");
    xml
}

/// Escape markup characters and drop code points XML 1.0 cannot carry
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\u{9}' | '\u{A}' | '\u{D}' => out.push(ch),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::model::Alignment;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.title = Some("Report".to_string());
        doc.add_paragraph(
            Paragraph::new()
                .aligned(Alignment::Center)
                .with_run(Run::text("Report").bold().size(16)),
        );
        doc.extend([Block::Heading {
            level: 1,
            text: "Intro".to_string(),
        }]);
        doc.add_paragraph(
            Paragraph::new()
                .with_run(Run::text("a < b & c"))
                .with_run(Run::line_break())
                .with_run(Run::text("next").italic()),
        );
        doc.footer = Some(
            Paragraph::new()
                .aligned(Alignment::Right)
                .with_run(Run::text("Generated")),
        );
        doc
    }

    #[test]
    fn package_contains_required_parts() {
        let bytes = to_bytes(&sample()).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "word/footer1.xml",
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }
    }

    #[test]
    fn document_xml_carries_formatting() {
        let bytes = to_bytes(&sample()).unwrap();
        let xml = read_part(&bytes, "word/document.xml");

        assert!(xml.contains(r#"<w:jc w:val="center"/>"#));
        assert!(xml.contains(r#"<w:rPr><w:b/><w:sz w:val="32"/></w:rPr>"#));
        assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
        assert!(xml.contains("a &lt; b &amp; c"));
        assert!(xml.contains("<w:br/>"));
        assert!(xml.contains(r#"<w:rPr><w:i/></w:rPr><w:t xml:space="preserve">next</w:t>"#));
        assert!(xml.contains(r#"<w:footerReference w:type="default" r:id="rId2"/>"#));
    }

    #[test]
    fn footer_is_right_aligned() {
        let bytes = to_bytes(&sample()).unwrap();
        let xml = read_part(&bytes, "word/footer1.xml");
        assert!(xml.contains(r#"<w:jc w:val="right"/>"#));
        assert!(xml.contains("Generated"));
    }

    #[test]
    fn no_footer_part_without_footer() {
        let mut doc = sample();
        doc.footer = None;
        let bytes = to_bytes(&doc).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        assert!(!archive.file_names().any(|n| n == "word/footer1.xml"));
        assert!(!read_part(&bytes, "word/document.xml").contains("footerReference"));
    }

    #[test]
    fn escape_drops_control_characters() {
        assert_eq!(escape("a\u{1}b\u{0}c"), "abc");
        assert_eq!(escape("\"quoted\" 'x'"), "&quot;quoted&quot; &apos;x&apos;");
    }
}
