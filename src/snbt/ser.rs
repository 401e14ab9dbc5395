use crate::{Compound, Value};

use super::{parser::is_unquoted, StringifyOptions};

pub(crate) fn stringify_value(value: &Value, options: &StringifyOptions) -> String {
    Stringifier { options }.value(value, 0)
}

/// Pick the quote that needs the least escaping, looking only at the start of
/// the string.
fn pick_quote(s: &str) -> char {
    if s.chars().take(8).any(|c| c == '"') {
        '\''
    } else {
        '"'
    }
}

fn write_escaped_str(out: &mut String, s: &str, quote: char) {
    out.push(quote);
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if c != quote && c != '\\' {
            continue;
        }
        out.push_str(&s[start..i]);
        out.push('\\');
        out.push(c);
        start = i + 1;
    }
    out.push_str(&s[start..]);
    out.push(quote);
}

fn write_int<I: itoa::Integer>(out: &mut String, v: I) {
    let mut buf = itoa::Buffer::new();
    out.push_str(buf.format(v));
}

/// Typed arrays always stay on one line.
fn write_array<I>(out: &mut String, kind: char, values: I)
where
    I: Iterator,
    I::Item: itoa::Integer,
{
    out.push('[');
    out.push(kind);
    out.push(';');
    for (i, v) in values.enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_int(out, v);
    }
    out.push(']');
}

struct Stringifier<'a> {
    options: &'a StringifyOptions,
}

impl Stringifier<'_> {
    fn value(&self, value: &Value, depth: usize) -> String {
        let mut out = String::new();
        match value {
            Value::Byte(v) => {
                write_int(&mut out, *v);
                out.push('b');
            }
            Value::Short(v) => {
                write_int(&mut out, *v);
                out.push('s');
            }
            Value::Int(v) => write_int(&mut out, *v),
            Value::Long(v) => {
                write_int(&mut out, *v);
                out.push('l');
            }
            Value::Float(v) => {
                out.push_str(&v.to_string());
                out.push('f');
            }
            Value::Double(v) => {
                let s = v.to_string();
                out.push_str(&s);
                // Without a point or suffix it would read back as an int.
                if v.is_finite() && !s.contains('.') {
                    out.push_str(".0");
                }
                if self.options.strict_double {
                    out.push('d');
                }
            }
            Value::Bool(v) => {
                let s = if *v { "true" } else { "false" };
                if self.options.use_boolean {
                    out.push_str(s);
                } else {
                    self.string(&mut out, s);
                }
            }
            Value::String(v) => self.string(&mut out, v),
            Value::ByteArray(v) => write_array(&mut out, 'B', v.iter().copied()),
            Value::IntArray(v) => write_array(&mut out, 'I', v.iter().copied()),
            Value::LongArray(v) => write_array(&mut out, 'L', v.iter().copied()),
            Value::List(items) => return self.list(items, depth),
            Value::Compound(compound) => return self.compound(compound, depth, false),
        }
        out
    }

    fn string(&self, out: &mut String, s: &str) {
        let quote = match self.options.quote {
            Some(q) => q.as_char(),
            None => pick_quote(s),
        };
        write_escaped_str(out, s, quote);
    }

    fn key(&self, out: &mut String, key: &str) {
        if !key.is_empty() && key.chars().all(is_unquoted) {
            out.push_str(key);
        } else {
            self.string(out, key);
        }
    }

    fn compound(&self, compound: &Compound, depth: usize, force_break: bool) -> String {
        let children = compound
            .iter()
            .map(|(k, v)| {
                let mut entry = String::new();
                self.key(&mut entry, k);
                entry.push_str(": ");
                entry.push_str(&self.value(v, depth + 1));
                entry
            })
            .collect();

        self.layout(children, '{', '}', depth, force_break)
    }

    fn list(&self, items: &[Value], depth: usize) -> String {
        let compounds: Vec<&Compound> = items.iter().filter_map(Value::as_compound).collect();
        let hug = self.options.no_tag_list_tab
            && !compounds.is_empty()
            && compounds.len() == items.len();

        if !hug {
            let children = items.iter().map(|v| self.value(v, depth + 1)).collect();
            return self.layout(children, '[', ']', depth, false);
        }

        // Hugged compounds take the list's own depth and sit directly against
        // its brackets. When the list breaks, every compound breaks with it.
        let children: Vec<_> = compounds
            .iter()
            .map(|c| self.compound(c, depth, false))
            .collect();
        if !self.breaks(&children) {
            return format!("[{}]", children.join(", "));
        }

        let separator = if self.options.skip_comma {
            format!("{}{}", self.options.newline, self.options.tab.repeat(depth))
        } else {
            ", ".to_owned()
        };
        let children: Vec<_> = compounds
            .iter()
            .map(|c| self.compound(c, depth, true))
            .collect();
        format!("[{}]", children.join(&separator))
    }

    fn breaks(&self, children: &[String]) -> bool {
        let width: usize = children.iter().map(String::len).sum();
        self.options.pretty
            && (width > self.options.break_length || children.iter().any(|c| c.contains('\n')))
    }

    fn layout(
        &self,
        children: Vec<String>,
        open: char,
        close: char,
        depth: usize,
        force_break: bool,
    ) -> String {
        if children.is_empty() {
            return format!("{}{}", open, close);
        }

        let multiline = force_break || self.breaks(&children);

        let mut out = String::new();
        out.push(open);

        if multiline {
            let nl = &self.options.newline;
            let indent = self.options.tab.repeat(depth + 1);
            for (i, child) in children.iter().enumerate() {
                if i > 0 && !self.options.skip_comma {
                    out.push(',');
                }
                out.push_str(nl);
                out.push_str(&indent);
                out.push_str(child);
            }
            out.push_str(nl);
            out.push_str(&self.options.tab.repeat(depth));
        } else if open == '{' {
            out.push(' ');
            out.push_str(&children.join(", "));
            out.push(' ');
        } else {
            out.push_str(&children.join(", "));
        }

        out.push(close);
        out
    }
}
