/// Prefix every line of `text` with `unit` repeated `amount` times.
///
/// Lines keep their terminators (`\n`, `\r\n` or a lone `\r`). A trailing
/// terminator does not start a new, prefixed line.
pub fn indent_lines(text: &str, amount: usize, unit: &str) -> String {
    if amount == 0 || unit.is_empty() {
        return text.to_string();
    }

    let prefix = unit.repeat(amount);
    let lines = text.bytes().filter(|&b| b == b'\n').count() + 1;
    let mut out = String::with_capacity(text.len() + prefix.len() * lines);
    for line in split_lines_inclusive(text) {
        out.push_str(&prefix);
        out.push_str(line);
    }
    out
}

/// Split into lines, each slice including its terminator
pub fn split_lines_inclusive(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    let mut start = 0;
    std::iter::from_fn(move || {
        if start >= bytes.len() {
            return None;
        }
        let mut i = start;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    i += 1;
                    break;
                }
                b'\r' => {
                    i += 1;
                    if i < bytes.len() && bytes[i] == b'\n' {
                        i += 1;
                    }
                    break;
                }
                _ => i += 1,
            }
        }
        let line = &text[start..i];
        start = i;
        Some(line)
    })
}
