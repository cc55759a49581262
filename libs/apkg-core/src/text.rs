//! Scanners for the markup found in note fields.
//!
//! Imported decks carry HTML fragments and cloze spans in their field
//! text. Both are small closed grammars: tags `<...>`, character entities
//! `&name;` / `&#N;` / `&#xN;`, and cloze spans `{{c<digits>::<text>}}`.
//! Each is handled with a single forward scan; malformed input passes
//! through unchanged instead of being guessed at.

/// Placeholder substituted for cloze spans in question text.
pub const CLOZE_PLACEHOLDER: &str = "{blank}";

/// Longest entity body accepted between `&` and `;` (covers `#x10FFFF`).
const MAX_ENTITY_LEN: usize = 10;

/// Normalize field markup for display: drop `<...>` tag spans, then decode
/// character entities, then replace non-breaking spaces with plain spaces.
pub fn strip_markup(input: &str) -> String {
    decode_entities(&strip_tags(input)).replace('\u{a0}', " ")
}

/// Project a cloze field into its question form: every well-formed cloze
/// span collapses to [`CLOZE_PLACEHOLDER`], whatever its index digits say.
pub fn cloze_question(input: &str) -> String {
    replace_cloze(input, |out, _| out.push_str(CLOZE_PLACEHOLDER))
}

/// Project a cloze field into its answer form: every well-formed cloze
/// span is replaced by its hidden text.
pub fn cloze_answer(input: &str) -> String {
    replace_cloze(input, |out, text| out.push_str(text))
}

/// Remove every `<...>` span. A `<` with no closing `>` is kept literally.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start + 1..].find('>') {
            Some(end) => rest = &rest[start + 1 + end + 1..],
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode the entity forms that occur in deck exports. Unknown or
/// unterminated sequences pass through unchanged.
fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match parse_entity(tail) {
            Some((decoded, consumed)) => {
                out.push(decoded);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Parse one entity at the head of `input` (which starts with `&`).
/// Returns the decoded character and the byte length consumed.
fn parse_entity(input: &str) -> Option<(char, usize)> {
    let semi = input[1..].find(';')? + 1;
    let body = &input[1..semi];
    if body.is_empty() || body.len() > MAX_ENTITY_LEN {
        return None;
    }
    let decoded = if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        char::from_u32(code)?
    } else {
        match body {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            "nbsp" => '\u{a0}',
            _ => return None,
        }
    };
    Some((decoded, semi + 1))
}

struct ClozeSpan<'a> {
    text: &'a str,
    len: usize,
}

/// Parse `{{c<digits>::<text>}}` at the head of `input`. The span ends at
/// the first `}}`, so a nested span terminates its enclosing one.
fn parse_cloze(input: &str) -> Option<ClozeSpan<'_>> {
    let body = input.strip_prefix("{{c")?;
    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let text = body[digits..].strip_prefix("::")?;
    let close = text.find("}}")?;
    Some(ClozeSpan {
        text: &text[..close],
        // "{{c" + digits + "::" + text + "}}"
        len: 3 + digits + 2 + close + 2,
    })
}

fn replace_cloze<F>(input: &str, mut emit: F) -> String
where
    F: FnMut(&mut String, &str),
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("{{c") {
        match parse_cloze(&rest[start..]) {
            Some(span) => {
                out.push_str(&rest[..start]);
                emit(&mut out, span.text);
                rest = &rest[start + span.len..];
            }
            None => {
                // Not a well-formed span: keep one brace and rescan after it.
                out.push_str(&rest[..start + 1]);
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}
