//! Join a list of parameters into a single line and split it back, e.g. for JVM options that
//! are passed through a single setting.
//!
//! * `["a", "b"]` joins to `a b`
//! * `["a=\"1 2\"", "b"]` joins to `"a=\"1 2\"" b`
//! * ` a  b ` splits to `["a", "b"]`
//! * `a="1 2" b` splits to `["a=1 2", "b"]`
//! * `a " " b` splits to `["a", " ", "b"]`

/// Join parameters into a single line that [`split`] turns back into the same parameters.
///
/// Double quotes are escaped with a backslash. Empty parameters and parameters containing a
/// space or a `|` are wrapped in double quotes. Parameters are separated by a single space.
pub fn join<I, S>(parameters: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parameters
        .into_iter()
        .map(|parameter| encode(parameter.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a line of parameters, as produced by [`join`].
///
/// Surrounding whitespace is trimmed and parameters are split on (runs of) whitespace outside
/// of double quotes. The double quotes themselves are dropped, except for escaped ones (`\"`),
/// which are kept without the backslash. `""` is an empty parameter.
pub fn split(line: &str) -> Vec<String> {
    let mut parameters = Vec::new();
    let mut token = String::new();
    let mut in_quotes = false;
    let mut escaped_quote = false;
    // Whether the token was quoted, so that `""` isn't dropped.
    let mut non_empty = false;

    let mut chars = line.trim().chars().peekable();
    while let Some(char) = chars.next() {
        match char {
            '"' => {
                if !escaped_quote {
                    in_quotes = !in_quotes;
                    non_empty = true;
                    continue;
                }
                escaped_quote = false;
            }
            char if char.is_whitespace() => {
                if !in_quotes {
                    if !token.is_empty() || non_empty {
                        parameters.push(std::mem::take(&mut token));
                        non_empty = false;
                    }
                    continue;
                }
            }
            '\\' => {
                if chars.peek() == Some(&'"') {
                    escaped_quote = true;
                    continue;
                }
            }
            _ => {}
        }
        token.push(char);
    }

    if !token.is_empty() || non_empty {
        parameters.push(token);
    }

    parameters
}

/// Escape and, if necessary, quote a single parameter.
fn encode(parameter: &str) -> String {
    let escaped = parameter.replace('"', r#"\""#);
    if escaped.is_empty() || escaped.contains([' ', '|']) {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}
