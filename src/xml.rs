//! XML write codec for chart create/update bodies.
//!
//! The service accepts writes as a flat XML document (`<chart><name>..
//! </name></chart>`) while responding in JSON. Only encoding is needed, and
//! only for flat string fields, so this wraps tag assembly around
//! quick-xml's text escaping.

use quick_xml::escape::escape;

/// Encode `fields` as child elements of `root`, in the order given.
pub(crate) fn encode_xml(root: &str, fields: &[(&str, String)]) -> String {
    let mut out = String::new();
    out.push('<');
    out.push_str(root);
    out.push('>');
    for (tag, value) in fields {
        out.push('<');
        out.push_str(tag);
        out.push('>');
        out.push_str(&escape(value.as_str()));
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
    out.push_str("</");
    out.push_str(root);
    out.push('>');
    out
}
