use md2hwpx::{
    convert, write_sample_template, ConvertOptions, Error, MarkdownToHwpx, MissingSectionPolicy,
};
use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const SECTION: &str = "Contents/section0.xml";

fn sample_template(dir: &Path) -> PathBuf {
    write_sample_template(&dir.join("template.hwpx")).expect("sample template")
}

/// Template whose section holds one paragraph per given placeholder text.
fn template_with(dir: &Path, name: &str, texts: &[&str]) -> PathBuf {
    let mut section = String::from(
        "<hs:sec xmlns:hs=\"http://www.hancom.co.kr/hwpml/2011/section\" \
         xmlns:hp=\"http://www.hancom.co.kr/hwpml/2011/paragraph\">",
    );
    for text in texts {
        section.push_str(&format!(
            "<hp:p id=\"0\"><hp:run charPrIDRef=\"0\"><hp:t>{text}</hp:t></hp:run></hp:p>"
        ));
    }
    section.push_str("</hs:sec>");

    let path = dir.join(name);
    let mut zip = ZipWriter::new(File::create(&path).expect("create"));
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file("mimetype", stored).expect("start");
    zip.write_all(b"application/hwp+zip").expect("write");
    zip.start_file(SECTION, SimpleFileOptions::default())
        .expect("start");
    zip.write_all(section.as_bytes()).expect("write");
    zip.finish().expect("finish");
    path
}

fn read_entry(archive: &Path, name: &str) -> String {
    let mut zip = ZipArchive::new(File::open(archive).expect("open")).expect("zip");
    let mut text = String::new();
    zip.by_name(name)
        .expect("entry")
        .read_to_string(&mut text)
        .expect("read");
    text
}

fn entry_names(archive: &Path) -> Vec<String> {
    let mut zip = ZipArchive::new(File::open(archive).expect("open")).expect("zip");
    (0..zip.len())
        .map(|i| zip.by_index(i).expect("entry").name().to_string())
        .collect()
}

#[test]
fn test_output_keeps_template_entries_and_mimetype_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = sample_template(dir.path());
    let output = dir.path().join("report.hwpx");

    convert("# Report\n\n## Summary\n\nbody", &template, &output, "2025-01-01")
        .expect("convert");

    assert_eq!(entry_names(&output), entry_names(&template));

    let mut zip = ZipArchive::new(File::open(&output).expect("open")).expect("zip");
    for index in 0..zip.len() {
        let entry = zip.by_index(index).expect("entry");
        let expected = if index == 0 {
            CompressionMethod::Stored
        } else {
            CompressionMethod::Deflated
        };
        assert_eq!(entry.compression(), expected, "{}", entry.name());
    }
}

#[test]
fn test_summary_paragraphs_become_hwpx_paragraphs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = sample_template(dir.path());
    let output = dir.path().join("report.hwpx");

    convert(
        "# Report\n\n## Summary\n\nline one\n\nline two",
        &template,
        &output,
        "2025-01-01",
    )
    .expect("convert");

    let section = read_entry(&output, SECTION);
    let open = "<hp:p id=\"4\" paraPrIDRef=\"0\" styleIDRef=\"0\"><hp:run charPrIDRef=\"0\"><hp:t>";
    assert!(section.contains(&format!(
        "{open}  line one</hp:t></hp:run></hp:p>{open}  line two</hp:t></hp:run></hp:p>"
    )));
    assert!(section.contains("<hp:t>Report</hp:t>"));
    assert!(section.contains("<hp:t>2025-01-01</hp:t>"));
    assert!(section.contains("<hp:t>Summary</hp:t>"));
    // Absent roles fall back to their default heading.
    assert!(section.contains("<hp:t>배경 및 목적</hp:t>"));
    assert!(!section.contains("{{"));
    assert!(!section.contains("linesegarray"));
}

#[test]
fn test_untouched_entries_are_byte_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = sample_template(dir.path());
    let output = dir.path().join("report.hwpx");

    convert("# R\n\n## 요약\n\n내용", &template, &output, "d").expect("convert");

    for name in ["Contents/header.xml", "Contents/content.hpf", "version.xml"] {
        assert_eq!(read_entry(&output, name), read_entry(&template, name), "{name}");
    }
}

#[test]
fn test_substituted_values_are_escaped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = sample_template(dir.path());
    let output = dir.path().join("report.hwpx");

    convert(
        "# R&D <2025>\n\n## 요약\n\nTom's \"plan\" & a<b",
        &template,
        &output,
        "d",
    )
    .expect("convert");

    let section = read_entry(&output, SECTION);
    assert!(section.contains("<hp:t>R&amp;D &lt;2025&gt;</hp:t>"));
    assert!(section.contains("Tom&apos;s &quot;plan&quot; &amp; a&lt;b"));
    assert!(!section.contains("R&D"));
    assert!(!section.contains("a<b"));
}

#[test]
fn test_legacy_alias_matches_canonical_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let canonical = template_with(dir.path(), "a.hwpx", &["{{TITLE_SUMMARY}}", "{{SUMMARY}}"]);
    let legacy = template_with(dir.path(), "b.hwpx", &["{{TITLE_SUMARY}}", "{{SUMARY}}"]);
    let md = "# R\n\n## 핵심 요약\n\n첫째\n\n- 둘째\n- 셋째";

    let out_a = dir.path().join("a_out.hwpx");
    let out_b = dir.path().join("b_out.hwpx");
    convert(md, &canonical, &out_a, "d").expect("convert");
    convert(md, &legacy, &out_b, "d").expect("convert");

    let section = read_entry(&out_a, SECTION);
    assert_eq!(section, read_entry(&out_b, SECTION));
    assert!(section.contains("• 둘째<hp:lineBreak/>• 셋째"));
}

#[test]
fn test_table_becomes_hwpx_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = sample_template(dir.path());
    let output = dir.path().join("report.hwpx");

    convert(
        "# R\n\n## 주요 내용\n\n개요\n\n| A | B |\n|---|---|\n| 1 | 2 |",
        &template,
        &output,
        "d",
    )
    .expect("convert");

    let section = read_entry(&output, SECTION);
    assert_eq!(section.matches("<hp:tbl ").count(), 1);
    assert!(section.contains("rowCnt=\"2\" colCnt=\"2\""));
    assert_eq!(section.matches("<hp:tc ").count(), 4);
    assert_eq!(section.matches("header=\"1\"").count(), 2);
    assert!(section.contains("<hp:cellAddr colAddr=\"1\" rowAddr=\"1\"/>"));
    assert!(!section.contains("|---|"));
}

#[test]
fn test_failure_keeps_existing_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = dir.path().join("broken.hwpx");
    fs::write(&template, b"not a zip").expect("write");
    let output = dir.path().join("report.hwpx");
    fs::write(&output, b"previous").expect("write");

    let err = convert("# R\n\n## 요약\n\n내용", &template, &output, "d").expect_err("must fail");

    assert!(matches!(err, Error::ArchiveCorruption(_)));
    assert_eq!(fs::read(&output).expect("read"), b"previous");
    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
}

#[test]
fn test_missing_template_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("report.hwpx");

    let err = convert("# R\n\n본문", &dir.path().join("nope.hwpx"), &output, "d")
        .expect_err("must fail");

    assert!(matches!(err, Error::MissingTemplate { .. }));
    assert!(!output.exists());
}

#[test]
fn test_unclassified_sections_still_reach_main_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = sample_template(dir.path());
    let output = dir.path().join("report.hwpx");

    convert("# R\n\n## Appendix\n\nimportant body text", &template, &output, "d")
        .expect("convert");

    let section = read_entry(&output, SECTION);
    assert!(section.contains("important body text"));
    assert!(section.contains("<hp:t>주요 내용</hp:t>"));
}

#[test]
fn test_directory_as_template_is_missing_template() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = dir.path().join("template.hwpx");
    fs::create_dir(&template).expect("mkdir");
    let output = dir.path().join("report.hwpx");

    let err = convert("# R\n\n본문", &template, &output, "d").expect_err("must fail");

    assert!(matches!(err, Error::MissingTemplate { .. }));
    assert!(!output.exists());
}

#[test]
fn test_directory_output_is_write_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = sample_template(dir.path());
    let output = dir.path().join("report.hwpx");
    fs::create_dir(&output).expect("mkdir");

    let err = convert("# R\n\n## 요약\n\n내용", &template, &output, "d").expect_err("must fail");

    assert!(matches!(err, Error::WriteFailure { .. }));
    assert!(output.is_dir());
    assert_eq!(fs::read_dir(&output).expect("read dir").count(), 0);
    let staged: Vec<_> = fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(".hwpx-") && name.ends_with(".tmp"))
        .collect();
    assert!(staged.is_empty(), "{staged:?}");
}

#[test]
fn test_output_equal_to_template_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = sample_template(dir.path());
    let before = fs::read(&template).expect("read");

    let err = convert("# R\n\n## 요약\n\n내용", &template, &template, "d").expect_err("must fail");

    assert!(matches!(err, Error::WriteFailure { .. }));
    assert_eq!(fs::read(&template).expect("read"), before);
}

#[test]
fn test_template_is_never_modified() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = sample_template(dir.path());
    let before = fs::read(&template).expect("read");

    convert("# R\n\n## 요약\n\n내용", &template, &dir.path().join("o.hwpx"), "d")
        .expect("convert");

    assert_eq!(fs::read(&template).expect("read"), before);
}

#[test]
fn test_omit_policy_leaves_missing_headings_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = sample_template(dir.path());
    let output = dir.path().join("report.hwpx");

    MarkdownToHwpx::new(ConvertOptions {
        missing_sections: MissingSectionPolicy::Omit,
        ..Default::default()
    })
    .convert("# R\n\n## 요약\n\n내용", &template, &output, "d")
    .expect("convert");

    let section = read_entry(&output, SECTION);
    assert!(!section.contains("배경 및 목적"));
    assert!(section.contains("<hp:t></hp:t>"));
}

#[test]
fn test_keep_line_segments_option() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = sample_template(dir.path());
    let output = dir.path().join("report.hwpx");

    MarkdownToHwpx::new(ConvertOptions {
        clean_line_segments: false,
        ..Default::default()
    })
    .convert("# R\n\n## 요약\n\n내용", &template, &output, "d")
    .expect("convert");

    assert!(read_entry(&output, SECTION).contains("<hp:linesegarray>"));
}
