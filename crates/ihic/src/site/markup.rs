use std::fmt;

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Percent-encodes a `mailto:` query component, leaving only RFC 3986
/// unreserved characters as-is.
pub(crate) fn encode_component(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(char::from(byte))
            }
            other => encoded.push_str(&format!("%{other:02X}")),
        }
    }
    encoded
}

pub(crate) fn mailto(address: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        address.trim(),
        encode_component(subject),
        encode_component(body)
    )
}

/// Opens the document and the page container, including the i-HIC banner.
pub(crate) fn write_document_start(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    container_class: &str,
) -> fmt::Result {
    writeln!(f, "<!DOCTYPE html>")?;
    writeln!(f, "<html lang=\"en\">")?;
    writeln!(f, "<head>")?;
    writeln!(f, "    <meta charset=\"UTF-8\">")?;
    writeln!(
        f,
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(f, "    <title>{}</title>", escape_html(title))?;
    writeln!(f, "    {STYLESHEET}")?;
    writeln!(f, "</head>")?;
    writeln!(f, "<body>")?;
    writeln!(f, "    <div class=\"{container_class}\">")?;
    writeln!(f, "        <div class=\"header-container\">")?;
    writeln!(
        f,
        "            <div class=\"header-main\">INSTANT HALAL &amp; INVENTORY CHECKER</div>"
    )?;
    writeln!(f, "            <div class=\"header-sub\">(i-HIC)</div>")?;
    writeln!(f, "        </div>")
}

pub(crate) fn write_document_end(f: &mut fmt::Formatter<'_>, script: Option<&str>) -> fmt::Result {
    writeln!(f, "    </div>")?;
    if let Some(script) = script {
        writeln!(f, "{script}")?;
    }
    writeln!(f, "</body>")?;
    writeln!(f, "</html>")
}

pub(crate) const STYLESHEET: &str = r#"<style>
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body { padding: 15px; background-color: #f5f5f5; font-family: Arial, sans-serif; }
        .container { max-width: 100%; margin: 0 auto; background: white; border-radius: 10px; padding: 20px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header-container { text-align: center; margin-bottom: 20px; }
        .header-main, .header-sub { font-family: "Century Gothic", CenturyGothic, AppleGothic, sans-serif; color: #0066cc; font-weight: 800; }
        .header-main { font-size: 24px; letter-spacing: 0.5px; margin-bottom: 5px; }
        .header-sub { font-size: 20px; letter-spacing: 1px; }
        .item-name { font-size: 22px; font-weight: bold; text-align: center; margin-bottom: 25px; color: #333; padding-bottom: 10px; border-bottom: 2px solid #0066cc; }
        .info-card { background: white; border-radius: 8px; padding: 15px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); border: 1px solid #e0e0e0; margin-bottom: 20px; }
        .card-title { font-weight: bold; color: #0066cc; margin-bottom: 15px; font-size: 18px; padding-bottom: 5px; border-bottom: 1px solid #e0e0e0; }
        .detail-row { display: flex; margin-bottom: 10px; align-items: center; padding-bottom: 10px; border-bottom: 1px solid #f0f0f0; }
        .detail-row:last-child { border-bottom: none; padding-bottom: 0; margin-bottom: 0; }
        .detail-label { font-weight: bold; width: 50%; color: #555; font-size: 16px; padding-right: 5px; }
        .detail-value { width: 50%; word-break: break-word; font-size: 16px; text-align: left; padding-left: 5px; }
        .cert-available, .valid { color: #27ae60; font-weight: bold; }
        .cert-not-available, .expired { color: #e74c3c; font-weight: bold; }
        .invalid-date { color: #e67e22; font-style: italic; }
        .na-value { color: #7f8c8d; font-style: italic; }
        .btn { display: inline-block; padding: 10px 12px; color: white; text-decoration: none; border-radius: 5px; text-align: center; font-size: 15px; border: none; cursor: pointer; width: 100%; margin-top: 8px; }
        .btn:hover { opacity: 0.9; }
        .btn-blue { background-color: #3498db; }
        .btn-green { background-color: #2ecc71; }
        .btn-purple { background-color: #9b59b6; }
        .btn-red { background-color: #e74c3c; margin: 15px 0 20px 0; }
        .alert-container { margin: 10px 0 5px 0; }
        .stock-request-box { background-color: #f8f9fa; padding: 15px; border-radius: 8px; margin-top: 20px; border: 1px solid #e0e0e0; }
        .quantity-input { width: 100%; padding: 12px; margin: 10px 0; border: 1px solid #ddd; border-radius: 5px; font-size: 16px; }
        .quantity-label { display: block; margin: 10px 0 5px; font-weight: bold; color: #333; font-size: 16px; }
        .back-btn { display: block; text-align: center; margin-top: 20px; color: #3498db; text-decoration: none; font-weight: bold; font-size: 16px; }
        .evaluated-on { text-align: center; color: #7f8c8d; margin-bottom: 15px; }
        .summary { display: flex; gap: 10px; margin-bottom: 20px; }
        .summary div { flex: 1; text-align: center; padding: 10px; border-radius: 8px; background: #f8f9fa; border: 1px solid #e0e0e0; }
        .inventory-table { width: 100%; border-collapse: collapse; }
        .inventory-table th, .inventory-table td { text-align: left; padding: 8px; border-bottom: 1px solid #f0f0f0; font-size: 15px; }
        .inventory-table a { color: #0066cc; font-weight: bold; text-decoration: none; }
        @media (min-width: 600px) {
            .container { max-width: 600px; }
            .header-main { font-size: 26px; }
            .header-sub { font-size: 22px; }
            .item-name { font-size: 24px; }
        }
        @media (min-width: 900px) {
            .container.wide { max-width: 900px; }
        }
    </style>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Beef" & 'Lamb'</b>"#),
            "&lt;b&gt;&quot;Beef&quot; &amp; &#39;Lamb&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn encodes_mail_components() {
        assert_eq!(encode_component("Stock Request - A&B"), "Stock%20Request%20-%20A%26B");
        assert_eq!(encode_component("caf\u{e9}"), "caf%C3%A9");
        assert_eq!(
            mailto(" pic@example.com ", "Hi there", "x=y"),
            "mailto:pic@example.com?subject=Hi%20there&body=x%3Dy"
        );
    }
}
