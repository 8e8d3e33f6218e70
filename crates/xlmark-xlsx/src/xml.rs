//! Small helpers over quick-xml start tags.

use quick_xml::events::BytesStart;

/// Unescaped value of attribute `key`
pub(crate) fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Attribute parsed with `FromStr`
pub(crate) fn attr_parse<T: std::str::FromStr>(e: &BytesStart<'_>, key: &[u8]) -> Option<T> {
    attr(e, key).and_then(|v| v.trim().parse().ok())
}

/// OOXML boolean attribute ("1"/"true"), `None` when absent
pub(crate) fn attr_bool(e: &BytesStart<'_>, key: &[u8]) -> Option<bool> {
    attr(e, key).map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Boolean toggle elements such as `<b/>` are on unless `val` says otherwise
pub(crate) fn toggle(e: &BytesStart<'_>) -> bool {
    attr_bool(e, b"val").unwrap_or(true)
}

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// - `_x000d_` = CR
/// - `_x000a_` = LF
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }
    result.push_str(rest);
    result
}
