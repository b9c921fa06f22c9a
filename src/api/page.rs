/// HTML returned after a successful upload: the QR image and the short link
pub fn share_page(qr_data_uri: &str, short_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
    <head></head>
    <body>
        <img src="{qr}" alt="QR Code">
        <p>OR</p>
        <a href="{link}">Click me</a>
    </body>
</html>
"#,
        qr = escape_attr(qr_data_uri),
        link = escape_attr(short_url),
    )
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
