//! Printable HTML table from projected rows.

/// Renders a standalone HTML page holding a single table, suitable for
/// sending straight to a printer.
pub fn render_print_table(title: &str, headers: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    out.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 1.5rem; }\n\
         h1 { font-size: 1.2rem; }\n\
         table { border-collapse: collapse; width: 100%; }\n\
         th, td { border: 1px solid #999; padding: 4px 8px; text-align: left; }\n\
         th { background: #eee; }\n\
         </style>\n</head>\n<body>\n",
    );
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));
    out.push_str("<table>\n<thead>\n<tr>");
    for header in headers {
        out.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in rows {
        out.push_str("<tr>");
        for value in row {
            out.push_str(&format!("<td>{}</td>", escape_html(value)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    out
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::render_print_table;

    #[test]
    fn escapes_markup_in_cells() {
        let headers = vec!["Name".to_string()];
        let rows = vec![vec!["<b>Juan</b> & co".to_string()]];
        let page = render_print_table("Roster", &headers, &rows);
        assert!(page.contains("<td>&lt;b&gt;Juan&lt;/b&gt; &amp; co</td>"));
        assert!(!page.contains("<b>Juan</b>"));
    }

    #[test]
    fn includes_title_and_all_rows() {
        let headers = vec!["Plate".to_string(), "Name".to_string()];
        let rows = vec![
            vec!["ABC 123".to_string(), "Juan".to_string()],
            vec!["XYZ 999".to_string(), "Maria".to_string()],
        ];
        let page = render_print_table("Active drivers", &headers, &rows);
        assert!(page.contains("<h1>Active drivers</h1>"));
        assert_eq!(page.matches("<tr>").count(), 3);
    }
}
