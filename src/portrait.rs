//! Duck portrait generation.
//!
//! Builds a fixed 640x420 SVG from an outcome's palette and wraps it in a
//! `data:` URI. Output is fully determined by the profile.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::quiz::OutcomeProfile;

pub const PORTRAIT_WIDTH: u32 = 640;
pub const PORTRAIT_HEIGHT: u32 = 420;

// Characters encodeURIComponent leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Caption painted under the duck.
pub fn caption(profile: &OutcomeProfile) -> String {
    format!("HUZZAH, {}!", profile.title.to_uppercase())
}

pub fn portrait_svg(profile: &OutcomeProfile) -> String {
    let main = escape_xml(profile.primary());
    let background = escape_xml(profile.background());
    let accent = escape_xml(profile.accent());
    let caption = escape_xml(&caption(profile));
    let (w, h) = (PORTRAIT_WIDTH, PORTRAIT_HEIGHT);

    let mut svg = String::with_capacity(1024);
    svg.push_str(&format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>"
    ));
    svg.push_str(&format!("<rect width='{w}' height='{h}' fill='{background}'/>"));
    // ground shadow
    svg.push_str("<ellipse cx='320' cy='325' rx='205' ry='48' fill='rgba(0,0,0,.1)'/>");
    // body + head
    svg.push_str(&format!("<ellipse cx='312' cy='220' rx='145' ry='112' fill='{main}'/>"));
    svg.push_str(&format!("<circle cx='427' cy='152' r='66' fill='{main}'/>"));
    // beak + eye
    svg.push_str(&format!("<ellipse cx='486' cy='167' rx='50' ry='25' fill='{accent}'/>"));
    svg.push_str("<circle cx='445' cy='144' r='9' fill='#1f1f1f'/>");
    // wing + tail
    svg.push_str(&format!(
        "<ellipse cx='252' cy='238' rx='70' ry='50' fill='{accent}' opacity='.65'/>"
    ));
    svg.push_str(&format!("<path d='M350 283 L390 338 L325 309 Z' fill='{accent}'/>"));
    svg.push_str(&format!(
        "<text x='320' y='390' text-anchor='middle' fill='{accent}' font-size='32' font-family='Arial'>{caption}</text>"
    ));
    svg.push_str("</svg>");
    svg
}

/// SVG portrait as an image source, percent-encoded like `encodeURIComponent`.
pub fn portrait_data_uri(profile: &OutcomeProfile) -> String {
    let svg = portrait_svg(profile);
    format!(
        "data:image/svg+xml;utf8,{}",
        utf8_percent_encode(&svg, URI_COMPONENT)
    )
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mountain() -> OutcomeProfile {
        OutcomeProfile::new(
            "mountain",
            "Sky Peak Duck",
            "brave",
            ["#8ecae6", "#edf9ff", "#1d3557"],
        )
    }

    #[test]
    fn test_caption_uppercases_title() {
        assert_eq!(caption(&mountain()), "HUZZAH, SKY PEAK DUCK!");
    }

    #[test]
    fn test_svg_uses_palette_roles() {
        let svg = portrait_svg(&mountain());
        assert!(svg.contains("<rect width='640' height='420' fill='#edf9ff'/>"));
        assert!(svg.contains("<circle cx='427' cy='152' r='66' fill='#8ecae6'/>"));
        assert!(svg.contains("fill='#1d3557' font-size='32'"));
        assert!(svg.contains(">HUZZAH, SKY PEAK DUCK!</text>"));
    }

    #[test]
    fn test_escape_xml_in_title() {
        let mut p = mountain();
        p.title = "Ducks & <Drakes>".into();
        let svg = portrait_svg(&p);
        assert!(svg.contains("HUZZAH, DUCKS &amp; &lt;DRAKES&gt;!"));
    }

    #[test]
    fn test_data_uri_matches_encode_uri_component() {
        let uri = portrait_data_uri(&mountain());
        let body = uri.strip_prefix("data:image/svg+xml;utf8,").unwrap();
        assert!(body.starts_with("%3Csvg%20xmlns%3D'http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg'"));
        assert!(body.contains("%23edf9ff"));
        assert!(!body.contains(' '));
        assert!(!body.contains('<'));
        assert!(!body.contains('#'));
    }

    #[test]
    fn test_portrait_is_deterministic() {
        assert_eq!(portrait_data_uri(&mountain()), portrait_data_uri(&mountain()));
    }
}
