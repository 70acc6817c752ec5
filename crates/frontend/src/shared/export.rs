/// CSV export of table rows with a browser download
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Rows that can be written to a CSV report
pub trait CsvExportable {
    /// Column headers
    fn headers() -> Vec<String>;

    /// Cell values, in header order
    fn to_csv_row(&self) -> Vec<String>;
}

/// Renders the rows as CSV text (comma-separated, UTF-8 BOM for spreadsheet apps)
pub fn build_csv<T: CsvExportable>(data: &[T]) -> String {
    let mut csv_content = String::new();
    csv_content.push('\u{FEFF}');

    let headers: Vec<String> = T::headers().iter().map(|h| escape_csv_cell(h)).collect();
    csv_content.push_str(&headers.join(","));
    csv_content.push('\n');

    for item in data {
        let row: Vec<String> = item
            .to_csv_row()
            .iter()
            .map(|cell| escape_csv_cell(cell))
            .collect();
        csv_content.push_str(&row.join(","));
        csv_content.push('\n');
    }

    csv_content
}

/// Builds the CSV and makes the browser download it as `filename`
pub fn export_to_csv<T: CsvExportable>(data: &[T], filename: &str) -> Result<(), String> {
    let blob = create_csv_blob(&build_csv(data))?;
    download_blob(&blob, filename)
}

fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        let escaped = cell.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        cell.to_string()
    }
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line {
        name: &'static str,
        count: u32,
    }

    impl CsvExportable for Line {
        fn headers() -> Vec<String> {
            vec!["Name".to_string(), "Count".to_string()]
        }

        fn to_csv_row(&self) -> Vec<String> {
            vec![self.name.to_string(), self.count.to_string()]
        }
    }

    #[test]
    fn test_build_csv() {
        let csv = build_csv(&[
            Line { name: "Prod A", count: 2 },
            Line { name: "Prod, \"B\"", count: 10 },
        ]);
        assert_eq!(
            csv,
            "\u{FEFF}Name,Count\nProd A,2\n\"Prod, \"\"B\"\"\",10\n"
        );
    }

    #[test]
    fn test_build_csv_without_rows_has_header_only() {
        let csv = build_csv::<Line>(&[]);
        assert_eq!(csv, "\u{FEFF}Name,Count\n");
    }
}
