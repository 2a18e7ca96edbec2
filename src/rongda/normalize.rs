//! Normalization of raw search records into clean `FinancialReport` values.
//!
//! The search endpoint decorates titles and digests with highlighting markup
//! (`<font style='color:red;'>…</font>`) and wraps digest snippets in
//! `<div class='doc-digest-row'>…</div>` blocks. Nothing downstream wants
//! either, so everything is stripped here, in one pure pass per record.

use super::models::{composite_security, FinancialReport, RawSearchRecord};

const HIGHLIGHT_OPEN: &str = "<font style='color:red;'>";
const HIGHLIGHT_CLOSE: &str = "</font>";
const DIGEST_ROW_OPEN: &str = "<div class='doc-digest-row'>";
const DIGEST_ROW_CLOSE: &str = "</div>";

/// Strip highlight markup, keeping the enclosed text in its original order.
fn strip_highlight(text: &str) -> String {
    text.replace(HIGHLIGHT_OPEN, "").replace(HIGHLIGHT_CLOSE, "")
}

/// Digest fields concatenate several snippet rows; each row boundary becomes
/// a line break before the wrapper tags and highlight markup are removed.
fn clean_digest(digest: &str) -> String {
    let segmented = digest
        .replace(DIGEST_ROW_OPEN, "\n")
        .replace(DIGEST_ROW_CLOSE, "");
    strip_highlight(&segmented)
}

/// Reshape one raw record into the externally returned report.
///
/// Total: missing optional fields have already been defaulted during
/// deserialization, so this never fails and performs no I/O.
pub fn normalize(record: RawSearchRecord) -> FinancialReport {
    FinancialReport {
        title: strip_highlight(&record.title),
        content: clean_digest(&record.digest),
        downpath: record.downpath,
        htmlpath: record.htmlpath,
        date_str: record.date_str,
        security_code: composite_security(&record.sec_code, &record.sec_name),
        notice_type_name: record.notice_type_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_highlight_pair_from_title() {
        let record = RawSearchRecord {
            title: "<font style='color:red;'>平安银行</font>2024年年度报告".to_string(),
            ..Default::default()
        };

        let report = normalize(record);
        assert_eq!(report.title, "平安银行2024年年度报告");
        assert!(!report.title.contains("<font"));
        assert!(!report.title.contains("</font>"));
    }

    #[test]
    fn preserves_enclosed_text_order_across_multiple_highlights() {
        let record = RawSearchRecord {
            title: "关于<font style='color:red;'>财报</font>披露的<font style='color:red;'>公告</font>"
                .to_string(),
            ..Default::default()
        };

        assert_eq!(normalize(record).title, "关于财报披露的公告");
    }

    #[test]
    fn digest_row_boundary_becomes_one_line_break() {
        let record = RawSearchRecord {
            digest: "<div class='doc-digest-row'>第一段摘要</div><div class='doc-digest-row'>第二段摘要</div>"
                .to_string(),
            ..Default::default()
        };

        assert_eq!(normalize(record).content, "\n第一段摘要\n第二段摘要");
    }

    #[test]
    fn digest_highlights_are_stripped_like_titles() {
        let record = RawSearchRecord {
            digest: "<div class='doc-digest-row'>本行<font style='color:red;'>财报</font>显示</div>"
                .to_string(),
            ..Default::default()
        };

        let report = normalize(record);
        assert_eq!(report.content, "\n本行财报显示");
        assert!(!report.content.contains("<font"));
        assert!(!report.content.contains("<div"));
    }

    #[test]
    fn security_code_matches_resolver_composite_format() {
        let record = RawSearchRecord {
            sec_code: "000001".to_string(),
            sec_name: "平安银行".to_string(),
            ..Default::default()
        };

        assert_eq!(normalize(record).security_code, "000001 平安银行");
    }

    #[test]
    fn empty_record_normalizes_to_empty_report() {
        let report = normalize(RawSearchRecord::default());

        assert_eq!(report.title, "");
        assert_eq!(report.content, "");
        assert_eq!(report.downpath, "");
        assert_eq!(report.htmlpath, None);
        assert_eq!(report.date_str, "");
        assert_eq!(report.security_code, "");
        assert!(report.notice_type_name.is_empty());
    }

    #[test]
    fn untouched_fields_pass_through_verbatim() {
        let record = RawSearchRecord {
            downpath: "https://doc.rongdasoft.com/down/1.pdf".to_string(),
            htmlpath: Some("https://doc.rongdasoft.com/view/1.html".to_string()),
            date_str: "2025-03-28 16:00:00".to_string(),
            notice_type_name: vec!["年报".to_string(), "定期报告".to_string()],
            ..Default::default()
        };

        let report = normalize(record);
        assert_eq!(report.downpath, "https://doc.rongdasoft.com/down/1.pdf");
        assert_eq!(
            report.htmlpath.as_deref(),
            Some("https://doc.rongdasoft.com/view/1.html")
        );
        assert_eq!(report.date_str, "2025-03-28 16:00:00");
        assert_eq!(report.notice_type_name, vec!["年报", "定期报告"]);
    }
}
