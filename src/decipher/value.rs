//! Structural model of a logged TTCN-3 value.
//!
//! Payloads are written in value notation:
//!
//! ```text
//! { header := { id := 4, kind := REQ }, items := { 1, 2, 3 }, name := "x" }
//! ```
//!
//! The parser is lenient. Whatever it cannot structure (octetstrings,
//! concatenations, enumerated with parameters) is kept as an atom so a
//! broken payload degrades to fewer resolvable paths rather than an error.

/// A parsed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Unstructured token, kept verbatim (`4`, `REQ`, `'0A'O`, `omit`)
    Atom(String),
    /// Quoted charstring, quotes removed
    Text(String),
    /// `{ field := value, ... }`
    Record(Vec<(String, Value)>),
    /// `{ value, ... }` (record-of, set-of, empty `{ }`)
    List(Vec<Value>),
}

impl Value {
    pub fn parse(text: &str) -> Value {
        let mut parser = ValueParser {
            chars: text.chars().collect(),
            pos: 0,
        };
        parser.value()
    }

    /// Follow a dotted path (`header.id`, `items.0`).
    ///
    /// Numeric segments index lists; other segments name record fields.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |value, segment| match value {
                Value::Record(fields) => fields
                    .iter()
                    .find(|(name, _)| name == segment)
                    .map(|(_, field)| field),
                Value::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                Value::Atom(_) | Value::Text(_) => None,
            })
    }

    /// Display text; strings lose their quotes, structures keep notation.
    pub fn render(&self) -> String {
        match self {
            Value::Atom(text) | Value::Text(text) => text.clone(),
            Value::Record(fields) if fields.is_empty() => "{ }".to_string(),
            Value::Record(fields) => {
                let inner: Vec<String> = fields
                    .iter()
                    .map(|(name, value)| format!("{} := {}", name, value.render_nested()))
                    .collect();
                format!("{{ {} }}", inner.join(", "))
            }
            Value::List(items) if items.is_empty() => "{ }".to_string(),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::render_nested).collect();
                format!("{{ {} }}", inner.join(", "))
            }
        }
    }

    fn render_nested(&self) -> String {
        match self {
            Value::Text(text) => format!("\"{}\"", text.replace('"', "\"\"")),
            other => other.render(),
        }
    }
}

struct ValueParser {
    chars: Vec<char>,
    pos: usize,
}

impl ValueParser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn value(&mut self) -> Value {
        self.skip_whitespace();
        match self.peek() {
            Some('{') => self.compound(),
            Some('"') => {
                let start = self.pos;
                let text = self.quoted();
                self.skip_whitespace();
                match self.peek() {
                    None | Some(',') | Some('}') => Value::Text(text),
                    // `"a" & "b"` and friends
                    Some(_) => {
                        self.pos = start;
                        self.atom()
                    }
                }
            }
            _ => self.atom(),
        }
    }

    /// `"..."` with `""` as an escaped quote.
    fn quoted(&mut self) -> String {
        let mut text = String::new();
        self.pos += 1;
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == '"' {
                if self.peek() == Some('"') {
                    self.pos += 1;
                    text.push('"');
                } else {
                    break;
                }
            } else {
                text.push(c);
            }
        }
        text
    }

    /// Everything up to the next top-level `,` or `}`.
    fn atom(&mut self) -> Value {
        let start = self.pos;
        let mut depth = 0usize;
        let mut in_string = false;
        while let Some(c) = self.peek() {
            match c {
                '"' => in_string = !in_string,
                '(' if !in_string => depth += 1,
                ')' if !in_string => depth = depth.saturating_sub(1),
                ',' | '}' if !in_string && depth == 0 => break,
                _ => {}
            }
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        Value::Atom(text.trim().to_string())
    }

    fn compound(&mut self) -> Value {
        self.pos += 1;
        let mut fields = Vec::new();
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                Some(',') => {
                    self.pos += 1;
                    continue;
                }
                Some(_) => {}
            }
            match self.field_name() {
                Some(name) => fields.push((name, self.value())),
                None => items.push(self.value()),
            }
        }

        if items.is_empty() && !fields.is_empty() {
            Value::Record(fields)
        } else {
            items.extend(fields.into_iter().map(|(_, value)| value));
            Value::List(items)
        }
    }

    /// `name :=`, consumed only when present.
    fn field_name(&mut self) -> Option<String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        self.skip_whitespace();
        if !name.is_empty() && self.chars.get(self.pos..self.pos + 2) == Some(&[':', '='][..]) {
            self.pos += 2;
            Some(name)
        } else {
            self.pos = start;
            None
        }
    }
}
