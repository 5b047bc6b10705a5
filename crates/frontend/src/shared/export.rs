/// Table export: CSV, tab-separated "Excel" and a printable HTML report
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Rows that can be written to an export file
pub trait Exportable {
    fn headers() -> Vec<&'static str>;

    fn to_row(&self) -> Vec<String>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
    Printable,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Excel, ExportFormat::Printable];

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Excel => "Excel",
            ExportFormat::Printable => "PDF",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xls",
            ExportFormat::Printable => "html",
        }
    }

    fn mime(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8;",
            ExportFormat::Excel => "application/vnd.ms-excel;charset=utf-8;",
            ExportFormat::Printable => "text/html;charset=utf-8;",
        }
    }
}

/// "cosecha_data_2024-03-15.csv"
pub fn export_filename(prefix: &str, date: chrono::NaiveDate, format: ExportFormat) -> String {
    format!("{}_{}.{}", prefix, date.format("%Y-%m-%d"), format.extension())
}

fn escape_delimited_cell(cell: &str, separator: char) -> String {
    if cell.contains(separator) || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Header line plus one line per row, cells escaped for `separator`
pub fn build_delimited<T: Exportable>(data: &[T], separator: char) -> String {
    let sep = separator.to_string();
    let mut out = String::new();
    out.push_str(&T::headers().join(&sep));
    for item in data {
        out.push('\n');
        let row: Vec<String> = item
            .to_row()
            .iter()
            .map(|cell| escape_delimited_cell(cell, separator))
            .collect();
        out.push_str(&row.join(&sep));
    }
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Standalone HTML page with a summary and the full table, ready for the print dialog
pub fn build_printable_report<T: Exportable>(title: &str, data: &[T], date: chrono::NaiveDate) -> String {
    let head: String = T::headers()
        .iter()
        .map(|h| format!("<th>{}</th>", escape_html(h)))
        .collect();
    let body: String = data
        .iter()
        .map(|item| {
            let cells: String = item
                .to_row()
                .iter()
                .map(|c| format!("<td>{}</td>", escape_html(c)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
<style>body{{font-family:Arial,sans-serif;margin:20px}}h1{{color:#15803d}}\
table{{width:100%;border-collapse:collapse;margin-top:20px}}th,td{{border:1px solid #ddd;padding:8px;text-align:left}}\
th{{background:#f8fafc}}.summary{{padding:15px;background:#f1f5f9;border-radius:5px}}@media print{{body{{margin:0}}}}</style>\
</head><body onload=\"window.print()\"><h1>{title}</h1>\
<div class=\"summary\"><strong>Resumen:</strong> {count} registros encontrados<br>\
<strong>Fecha de exportación:</strong> {date}</div>\
<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table></body></html>",
        title = title,
        count = data.len(),
        date = date.format("%d/%m/%Y"),
        head = head,
        body = body,
    )
}

/// Builds the file for `format` and hands it to the browser
pub fn export_rows<T: Exportable>(data: &[T], title: &str, prefix: &str, format: ExportFormat) -> Result<(), String> {
    if data.is_empty() {
        return Err("No hay datos para exportar".to_string());
    }
    let today = chrono::Local::now().date_naive();
    let filename = export_filename(prefix, today, format);
    match format {
        ExportFormat::Csv => {
            // BOM so Excel reads the accents
            let content = format!("\u{FEFF}{}", build_delimited(data, ','));
            download_blob(&create_blob(&content, format)?, &filename)
        }
        ExportFormat::Excel => {
            let content = format!("\u{FEFF}{}", build_delimited(data, '\t'));
            download_blob(&create_blob(&content, format)?, &filename)
        }
        ExportFormat::Printable => {
            let content = build_printable_report(title, data, today);
            open_in_new_tab(&create_blob(&content, format)?)
        }
    }
}

fn create_blob(content: &str, format: ExportFormat) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type(format.mime());

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn open_in_new_tab(blob: &Blob) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;
    window
        .open_with_url_and_target(&url, "_blank")
        .map_err(|e| format!("Failed to open report: {:?}", e))?
        .ok_or("El navegador bloqueó la ventana emergente")?;
    Ok(())
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

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

    struct Row(&'static str, f64);

    impl Exportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["Finca", "Toneladas"]
        }

        fn to_row(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    fn date() -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default()
    }

    #[test]
    fn test_build_delimited_csv_escapes() {
        let rows = [Row("La Esperanza", 120.5), Row("Finca \"Vieja\", Norte", 80.0)];
        let csv = build_delimited(&rows, ',');
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Finca,Toneladas");
        assert_eq!(lines[1], "La Esperanza,120.5");
        assert_eq!(lines[2], "\"Finca \"\"Vieja\"\", Norte\",80");
    }

    #[test]
    fn test_build_delimited_tabs_keep_commas() {
        let rows = [Row("A, B", 1.0)];
        assert_eq!(build_delimited(&rows, '\t'), "Finca\tToneladas\nA, B\t1");
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("cosecha_data", date(), ExportFormat::Csv), "cosecha_data_2024-03-15.csv");
        assert_eq!(export_filename("cosecha_data", date(), ExportFormat::Excel), "cosecha_data_2024-03-15.xls");
    }

    #[test]
    fn test_printable_report_escapes_and_counts() {
        let rows = [Row("<b>X</b>", 1.0), Row("Y", 2.0)];
        let html = build_printable_report("Cosecha & calidad", &rows, date());
        assert!(html.contains("<h1>Cosecha &amp; calidad</h1>"));
        assert!(html.contains("2 registros encontrados"));
        assert!(html.contains("15/03/2024"));
        assert!(html.contains("<td>&lt;b&gt;X&lt;/b&gt;</td>"));
        assert!(!html.contains("<b>X</b>"));
    }
}
