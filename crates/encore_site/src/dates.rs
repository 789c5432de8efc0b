//! News date formatting
//!
//! Dates arrive as date-only `YYYY-MM-DD` attributes. They are parsed by hand
//! into a calendar day, pinned to UTC midnight, then rendered in a fixed
//! display timezone so every visitor sees the venue's day.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use encore_dom::{Document, DomPatch, NodeId, Query};

use crate::error::DateError;
use crate::markup::{NEWS_DATE, NEWS_SECTION};

/// Parse a `YYYY-MM-DD` calendar day without any timezone interpretation
pub fn parse_iso_date(iso: &str) -> Result<NaiveDate, DateError> {
    let malformed = || DateError::Malformed(iso.to_string());

    let parts: Vec<&str> = iso.trim().split('-').collect();
    let &[y, m, d] = parts.as_slice() else {
        return Err(malformed());
    };
    let number = |s: &str| -> Result<u32, DateError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        s.parse().map_err(|_| malformed())
    };

    let year = i32::try_from(number(y)?).map_err(|_| malformed())?;
    NaiveDate::from_ymd_opt(year, number(m)?, number(d)?)
        .ok_or_else(|| DateError::OutOfRange(iso.to_string()))
}

/// en-GB short month names; September is the odd one out
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// `"WEEKDAY DD MON"` for UTC midnight of `date`, seen from `tz`
pub fn format_display_date(date: NaiveDate, tz: Tz) -> String {
    let local = tz.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    let month = MONTHS[local.month0() as usize];
    format!("{} {month}", local.format("%a %d")).to_uppercase()
}

/// Parse and format in one step
pub fn format_news_date(iso: &str, tz: Tz) -> Result<String, DateError> {
    parse_iso_date(iso).map(|date| format_display_date(date, tz))
}

/// Rewrites every news date node's text into display form
#[derive(Clone, Copy, Debug)]
pub struct LocaleDateFormatter {
    tz: Tz,
}

impl LocaleDateFormatter {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// `#news time.news-date[datetime]`
    pub fn targets(doc: &Document) -> Vec<NodeId> {
        let Some(section) = doc.get_element_by_id(NEWS_SECTION) else {
            return Vec::new();
        };
        let query = Query::tag("time").class(NEWS_DATE).has_attr("datetime");
        doc.query_all(section, &query)
    }

    pub fn patches(&self, doc: &Document) -> Vec<DomPatch> {
        Self::targets(doc)
            .into_iter()
            .filter_map(|node| {
                let iso = doc.element(node)?.attr("datetime")?;
                match format_news_date(iso, self.tz) {
                    Ok(text) => Some(DomPatch::SetText { node, text }),
                    Err(err) => {
                        tracing::debug!(%err, "news date left as is");
                        None
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::{America, Europe, Pacific};
    use encore_dom::element;

    #[test]
    fn test_friday_in_march() {
        assert_eq!(
            format_news_date("2024-03-08", Europe::Amsterdam).unwrap(),
            "FRI 08 MAR"
        );
    }

    #[test]
    fn test_display_zone_decides_the_day() {
        // UTC midnight is still the previous evening west of Greenwich
        assert_eq!(
            format_news_date("2024-03-08", America::New_York).unwrap(),
            "THU 07 MAR"
        );
        assert_eq!(
            format_news_date("2024-12-31", Pacific::Auckland).unwrap(),
            "TUE 31 DEC"
        );
    }

    #[test]
    fn test_en_gb_month_names() {
        assert_eq!(
            format_news_date("2024-09-14", Europe::Amsterdam).unwrap(),
            "SAT 14 SEPT"
        );
        assert_eq!(
            format_news_date("2024-06-01", Europe::Amsterdam).unwrap(),
            "SAT 01 JUN"
        );
        // The month comes from the display zone too
        assert_eq!(
            format_news_date("2024-10-01", America::New_York).unwrap(),
            "MON 30 SEPT"
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "2024-03", "2024/03/08", "2024-3-x", "2024-03-08-01", "-2024-03-08", "2024-+3-08"] {
            assert!(
                matches!(parse_iso_date(bad), Err(DateError::Malformed(_))),
                "{bad}"
            );
        }
        assert_eq!(
            parse_iso_date("2023-02-29"),
            Err(DateError::OutOfRange("2023-02-29".into()))
        );
        assert_eq!(
            parse_iso_date("2024-2-9").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 9).unwrap()
        );
    }

    #[test]
    fn test_patches_skip_bad_dates() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.mount(
            root,
            element("section").id("news").children([
                element("time").class("news-date").attr("datetime", "2024-03-08").text("8 March"),
                element("time").class("news-date").attr("datetime", "soon").text("soon"),
                element("time").class("news-date").text("no attr"),
                element("span").class("news-date").attr("datetime", "2024-03-09"),
            ]),
        );
        doc.mount(
            root,
            element("time").class("news-date").attr("datetime", "2024-03-10"),
        );

        let formatter = LocaleDateFormatter::new(Europe::Amsterdam);
        assert_eq!(LocaleDateFormatter::targets(&doc).len(), 2);
        doc.apply(formatter.patches(&doc));

        let texts: Vec<String> = doc
            .query_all(root, &Query::tag("time"))
            .into_iter()
            .map(|n| doc.element(n).unwrap().text.clone())
            .collect();
        assert_eq!(texts, ["FRI 08 MAR", "soon", "no attr", ""]);
    }
}
