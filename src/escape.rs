//! HTML escaping for user-supplied text.
//!
//! Every string a user typed (book title, author, page title, content, image
//! URL) goes through [`escape_html`] before it reaches markup. The five HTML
//! metacharacters are mapped to entities; everything else passes through.
//!
//! Maud already escapes interpolated strings, but it leaves `'` alone. The
//! [`Escaped`] wrapper plugs [`escape_html`] into maud's [`Render`] trait so
//! templates use one escaping rule for text nodes and attribute values alike.

use maud::Render;

/// Replace `&`, `<`, `>`, `"` and `'` with their entity forms.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

fn push_escaped(out: &mut String, text: &str) {
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
}

/// User text for interpolation into a maud template.
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a>(pub &'a str);

impl Render for Escaped<'_> {
    fn render_to(&self, buffer: &mut String) {
        push_escaped(buffer, self.0);
    }
}
