//! Minimal HWPX template containing every report placeholder.
//!
//! Useful for trying the converter without a template made in Hangul.

use super::{deflated, stored, HWPX_MIMETYPE, MIMETYPE_ENTRY};
use crate::error::{zip_to_io, Error};
use crate::Result;
use std::fs;
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;

const VERSION_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<hv:HCFVersion xmlns:hv="http://www.hancom.co.kr/hwpml/2011/version" tagetApplication="WORDPROCESSOR" major="5" minor="1" micro="0" buildNumber="1" os="1" xmlVersion="1.4" application="md2hwpx" appVersion="0.1.0"/>"#;

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<ocf:container xmlns:ocf="urn:oasis:names:tc:opendocument:xmlns:container" xmlns:hpf="http://www.hancom.co.kr/schema/2011/hpf"><ocf:rootfiles><ocf:rootfile full-path="Contents/content.hpf" media-type="application/hwpml-package+xml"/></ocf:rootfiles></ocf:container>"#;

const CONTENT_HPF: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<opf:package xmlns:opf="http://www.idpf.org/2007/opf/" version="" unique-identifier="" id=""><opf:metadata><opf:title/><opf:language>ko</opf:language></opf:metadata><opf:manifest><opf:item id="header" href="Contents/header.xml" media-type="application/xml"/><opf:item id="section0" href="Contents/section0.xml" media-type="application/xml"/></opf:manifest><opf:spine><opf:itemref idref="header" linear="yes"/><opf:itemref idref="section0" linear="yes"/></opf:spine></opf:package>"#;

const HEADER_XML: &str = r##"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<hh:head xmlns:hh="http://www.hancom.co.kr/hwpml/2011/head" xmlns:hc="http://www.hancom.co.kr/hwpml/2011/core" version="1.4" secCnt="1"><hh:beginNum page="1" footnote="1" endnote="1" pic="1" tbl="1" equation="1"/><hh:refList><hh:fontfaces itemCnt="1"><hh:fontface lang="HANGUL" fontCnt="1"><hh:font id="0" face="맑은 고딕" type="TTF" isEmbedded="0"/></hh:fontface></hh:fontfaces><hh:borderFills itemCnt="1"><hh:borderFill id="1" threeD="0" shadow="0" centerLine="NONE" breakCellSeparateLine="0"><hh:leftBorder type="SOLID" width="0.12 mm" color="#000000"/><hh:rightBorder type="SOLID" width="0.12 mm" color="#000000"/><hh:topBorder type="SOLID" width="0.12 mm" color="#000000"/><hh:bottomBorder type="SOLID" width="0.12 mm" color="#000000"/></hh:borderFill></hh:borderFills><hh:charProperties itemCnt="2"><hh:charPr id="0" height="1100" textColor="#000000" shadeColor="none" useFontSpace="0" useKerning="0" symMark="NONE" borderFillIDRef="1"/><hh:charPr id="1" height="2000" textColor="#000000" shadeColor="none" useFontSpace="0" useKerning="0" symMark="NONE" borderFillIDRef="1"><hh:bold/></hh:charPr></hh:charProperties><hh:paraProperties itemCnt="1"><hh:paraPr id="0" tabPrIDRef="0" condense="0"><hh:align horizontal="LEFT" vertical="BASELINE"/></hh:paraPr></hh:paraProperties><hh:styles itemCnt="1"><hh:style id="0" type="PARA" name="바탕글" engName="Normal" paraPrIDRef="0" charPrIDRef="0" nextStyleIDRef="0" langID="1042"/></hh:styles></hh:refList></hh:head>"##;

/// Section body of the sample template. Every canonical placeholder sits in
/// its own paragraph; the title paragraph carries a cached line layout.
pub const SAMPLE_SECTION_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<hs:sec xmlns:hs="http://www.hancom.co.kr/hwpml/2011/section" xmlns:hp="http://www.hancom.co.kr/hwpml/2011/paragraph">
<hp:p id="1" paraPrIDRef="0" styleIDRef="0"><hp:run charPrIDRef="1"><hp:t>{{TITLE}}</hp:t></hp:run><hp:linesegarray><hp:lineseg textpos="0" vertpos="0" vertsize="2000" textheight="2000" baseline="1700" spacing="1200" horzpos="0" horzsize="42520" flags="393216"/></hp:linesegarray></hp:p>
<hp:p id="2" paraPrIDRef="0" styleIDRef="0"><hp:run charPrIDRef="0"><hp:t>{{DATE}}</hp:t></hp:run></hp:p>
<hp:p id="3" paraPrIDRef="0" styleIDRef="0"><hp:run charPrIDRef="1"><hp:t>{{TITLE_SUMMARY}}</hp:t></hp:run></hp:p>
<hp:p id="4" paraPrIDRef="0" styleIDRef="0"><hp:run charPrIDRef="0"><hp:t>{{SUMMARY}}</hp:t></hp:run></hp:p>
<hp:p id="5" paraPrIDRef="0" styleIDRef="0"><hp:run charPrIDRef="1"><hp:t>{{TITLE_BACKGROUND}}</hp:t></hp:run></hp:p>
<hp:p id="6" paraPrIDRef="0" styleIDRef="0"><hp:run charPrIDRef="0"><hp:t>{{BACKGROUND}}</hp:t></hp:run></hp:p>
<hp:p id="7" paraPrIDRef="0" styleIDRef="0"><hp:run charPrIDRef="1"><hp:t>{{TITLE_MAIN_CONTENT}}</hp:t></hp:run></hp:p>
<hp:p id="8" paraPrIDRef="0" styleIDRef="0"><hp:run charPrIDRef="0"><hp:t>{{MAIN_CONTENT}}</hp:t></hp:run></hp:p>
<hp:p id="9" paraPrIDRef="0" styleIDRef="0"><hp:run charPrIDRef="1"><hp:t>{{TITLE_CONCLUSION}}</hp:t></hp:run></hp:p>
<hp:p id="10" paraPrIDRef="0" styleIDRef="0"><hp:run charPrIDRef="0"><hp:t>{{CONCLUSION}}</hp:t></hp:run></hp:p>
</hs:sec>"#;

const SETTINGS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<ha:HWPApplicationSetting xmlns:ha="http://www.hancom.co.kr/hwpml/2011/app"><ha:CaretPosition listIDRef="0" paraIDRef="0" pos="0"/></ha:HWPApplicationSetting>"#;

/// Entries of the sample template, in archive order.
const ENTRIES: &[(&str, &str)] = &[
    ("version.xml", VERSION_XML),
    ("META-INF/container.xml", CONTAINER_XML),
    ("Contents/content.hpf", CONTENT_HPF),
    ("Contents/header.xml", HEADER_XML),
    ("Contents/section0.xml", SAMPLE_SECTION_XML),
    ("settings.xml", SETTINGS_XML),
];

/// Writes the sample template to `path` and returns it.
pub fn write_sample_template(path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::write_failure(parent, e))?;
    }
    let mut file = fs::File::create(path).map_err(|e| Error::write_failure(path, e))?;
    write_template(&mut file).map_err(|e| Error::write_failure(path, e))?;
    Ok(path.to_path_buf())
}

fn write_template<W: Write + Seek>(writer: W) -> io::Result<W> {
    let mut zip = ZipWriter::new(writer);

    zip.start_file(MIMETYPE_ENTRY, stored()).map_err(zip_to_io)?;
    zip.write_all(HWPX_MIMETYPE.as_bytes())?;

    for (name, content) in ENTRIES {
        zip.start_file(*name, deflated()).map_err(zip_to_io)?;
        zip.write_all(content.as_bytes())?;
    }

    zip.finish().map_err(zip_to_io)
}
