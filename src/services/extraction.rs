use crate::db::models::{ExtractedData, MARKET_CAPITALIZATION, METRIC_FIELDS, TEXT_FIELDS};
use crate::errors::ApiError;
use crate::Result;
use serde_json::{Number, Value};
use std::path::Path;

/// Pulls report fields out of an uploaded document
pub trait PdfExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<ExtractedData>;
}

/// Reads the PDF text layer and parses `Label: value` lines
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPdfExtractor;

impl PdfExtractor for TextPdfExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedData> {
        if !path.is_file() {
            return Err(ApiError::Extraction(format!(
                "{} does not exist",
                path.display()
            )));
        }

        let text =
            pdf_extract::extract_text(path).map_err(|e| ApiError::Extraction(e.to_string()))?;
        tracing::debug!("Extracted {} characters from {}", text.len(), path.display());

        Ok(parse_report_text(&text))
    }
}

/// Parses report text into known record fields.
///
/// A line contributes when it starts with a field label followed by `:` or whitespace.
/// The first occurrence of a label wins.
pub fn parse_report_text(text: &str) -> ExtractedData {
    // longest first so a label never shadows a longer one sharing its prefix
    let mut labels: Vec<&str> = TEXT_FIELDS.iter().chain(METRIC_FIELDS.iter()).copied().collect();
    labels.sort_by_key(|label| std::cmp::Reverse(label.len()));

    let mut data = ExtractedData::new();

    for line in text.lines().map(str::trim) {
        let Some((label, raw)) = labels
            .iter()
            .find_map(|label| split_label(line, label).map(|raw| (*label, raw)))
        else {
            continue;
        };

        if raw.is_empty() || data.contains_key(label) {
            continue;
        }

        let value = if TEXT_FIELDS.contains(&label) {
            Some(Value::from(raw))
        } else {
            parse_metric(label, raw)
        };

        match value {
            Some(value) => {
                data.insert(label.to_string(), value);
            }
            None => tracing::debug!("Skipping unparseable value for {}: {}", label, raw),
        }
    }

    data
}

fn split_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(label)?;
    if let Some(value) = rest.strip_prefix(':') {
        return Some(value.trim());
    }
    if rest.starts_with(char::is_whitespace) {
        return Some(rest.trim());
    }
    None
}

fn parse_metric(label: &str, raw: &str) -> Option<Value> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '%') && !c.is_whitespace())
        .collect();
    let number = cleaned.parse::<f64>().ok()?;

    if label == MARKET_CAPITALIZATION && number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
        return Some(Value::from(number as i64));
    }
    Number::from_f64(number).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    const REPORT: &str = "\
Annual Financial Summary
Company Name: ExampleCo
Industry: Tech
Location: San Francisco, CA
Market Capitalization: 5,000
Revenue (in millions): $1,500.00
EBITDA (in millions) 500
EBITDA Margin (%): 33.33%
Net Income Margin (%): 13.33
Debt to Equity Ratio: 0.15
P/E Ratio: n/a
Company Name: SomethingElse
";

    #[test]
    fn test_parse_report_text() {
        let data = parse_report_text(REPORT);

        assert_eq!(data["Company Name"], Value::from("ExampleCo"));
        assert_eq!(data["Industry"], Value::from("Tech"));
        assert_eq!(data["Location"], Value::from("San Francisco, CA"));
        assert_eq!(data["Market Capitalization"], Value::from(5000));
        assert_eq!(data["Revenue (in millions)"], Value::from(1500.0));
        assert_eq!(data["EBITDA (in millions)"], Value::from(500.0));
        assert_eq!(data["EBITDA Margin (%)"], Value::from(33.33));
        assert_eq!(data["Net Income Margin (%)"], Value::from(13.33));
        assert_eq!(data["Debt to Equity Ratio"], Value::from(0.15));
        assert!(!data.contains_key("P/E Ratio"));
        assert_eq!(data.len(), 9);
    }

    #[test]
    fn test_label_must_be_followed_by_separator() {
        let data = parse_report_text("Revenue (in millions)X: 12\nIndustryTech\n");
        assert!(data.is_empty());
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_report_text("").is_empty());
    }

    #[test]
    fn test_missing_file() {
        let result = TextPdfExtractor.extract(Path::new("/nonexistent/report.pdf"));
        assert!(matches!(result, Err(ApiError::Extraction(_))));
    }

    /// Writes a single page PDF with one text line per entry
    fn write_report_pdf(path: &Path, lines: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 700 - 40 * i as i64;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(72), Object::Integer(y)],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_extract_pdf_text_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        write_report_pdf(
            &path,
            &[
                "Company Name: ExampleCo",
                "Industry: Tech",
                "Market Capitalization: 5,000",
            ],
        );

        let data = TextPdfExtractor.extract(&path).unwrap();

        assert_eq!(data["Company Name"], Value::from("ExampleCo"));
        assert_eq!(data["Industry"], Value::from("Tech"));
        assert_eq!(data["Market Capitalization"], Value::from(5000));
    }

    #[test]
    fn test_extract_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"Company Name: ExampleCo").unwrap();

        let result = TextPdfExtractor.extract(&path);
        assert!(matches!(result, Err(ApiError::Extraction(_))));
    }
}
