// Tue Jan 13 2026 - Alex

//! Demangling for names reported by the dynamic linker.
//!
//! Covers what shows up in backtraces of mixed Rust/C++ processes. Rust
//! symbols (legacy `_ZN...17h<hash>E` and v0 `_R...`) go through
//! `rustc_demangle`; everything else under `_Z` is parsed as an Itanium name:
//! nested names, constructors/destructors, template arguments and the common
//! builtin parameter types.

pub fn demangle(name: &str) -> Option<String> {
    if is_rust_symbol(name) {
        return rustc_demangle::try_demangle(name)
            .ok()
            .map(|d| format!("{:#}", d));
    }

    let mangled = name.strip_prefix("__Z")
        .or_else(|| name.strip_prefix("_Z"))?;

    ItaniumDemangler::new(mangled).demangle()
}

pub fn is_mangled(name: &str) -> bool {
    name.starts_with("_Z") || name.starts_with("__Z") || name.starts_with("_R") || name.starts_with("__R")
}

pub fn try_demangle(name: &str) -> String {
    demangle(name).unwrap_or_else(|| name.to_string())
}

fn is_rust_symbol(name: &str) -> bool {
    if name.starts_with("_R") || name.starts_with("__R") {
        return true;
    }
    let nested = name.starts_with("_ZN") || name.starts_with("__ZN");
    nested && has_rust_hash(name.as_bytes())
}

/// Legacy Rust symbols end in `17h` + 16 hex digits + `E`.
fn has_rust_hash(name: &[u8]) -> bool {
    let Some(body) = name.strip_suffix(b"E") else {
        return false;
    };
    if body.len() < 19 {
        return false;
    }
    let segment = &body[body.len() - 19..];
    segment.starts_with(b"17h") && segment[3..].iter().all(u8::is_ascii_hexdigit)
}

struct ItaniumDemangler<'a> {
    input: &'a [u8],
    pos: usize,
    substitutions: Vec<String>,
}

impl<'a> ItaniumDemangler<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            substitutions: Vec::new(),
        }
    }

    fn demangle(&mut self) -> Option<String> {
        let name = match self.peek()? {
            b'N' => {
                self.advance();
                self.parse_nested_name()?
            }
            b'0'..=b'9' => self.parse_source_name()?,
            b'S' => {
                self.advance();
                let prefix = self.parse_substitution()?;
                let name = self.parse_source_name()?;
                format!("{}::{}", prefix, name)
            }
            _ => return None,
        };

        if self.pos >= self.input.len() {
            return Some(name);
        }

        // Anything left over is the parameter list. Give up on it rather than
        // on the whole name when it uses something we do not understand.
        match self.parse_parameters() {
            Some(params) => Some(format!("{}({})", name, params)),
            None => Some(name),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn parse_parameters(&mut self) -> Option<String> {
        if self.peek() == Some(b'v') && self.pos + 1 == self.input.len() {
            self.advance();
            return Some(String::new());
        }

        let mut params = Vec::new();
        while self.pos < self.input.len() {
            params.push(self.parse_type()?);
        }
        Some(params.join(", "))
    }

    fn parse_nested_name(&mut self) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();

        while let Some(c) = self.peek() {
            match c {
                b'E' => {
                    self.advance();
                    break;
                }
                b'K' | b'V' | b'r' | b'L' => {
                    self.advance();
                }
                b'0'..=b'9' => {
                    let name = self.parse_source_name()?;
                    parts.push(name);
                    self.substitutions.push(parts.join("::"));
                }
                b'S' => {
                    self.advance();
                    let sub = self.parse_substitution()?;
                    parts.push(sub);
                }
                b'C' | b'D' => {
                    self.advance();
                    let last = parts.last()?.rsplit("::").next()?.to_string();
                    let last = last.split('<').next().unwrap_or(&last).to_string();
                    if c == b'D' {
                        parts.push(format!("~{}", last));
                    } else {
                        parts.push(last);
                    }
                    if matches!(self.peek(), Some(b'0'..=b'9')) {
                        self.advance();
                    }
                }
                b'I' => {
                    self.advance();
                    let args = self.parse_template_args()?;
                    let last = parts.last_mut()?;
                    last.push_str(&args);
                    self.substitutions.push(parts.join("::"));
                }
                _ => return None,
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("::"))
        }
    }

    fn parse_template_args(&mut self) -> Option<String> {
        let mut args = Vec::new();
        while self.peek()? != b'E' {
            args.push(self.parse_type()?);
        }
        self.advance();
        Some(format!("<{}>", args.join(", ")))
    }

    fn parse_source_name(&mut self) -> Option<String> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance();
        }

        let len: usize = std::str::from_utf8(&self.input[start..self.pos]).ok()?.parse().ok()?;
        let end = self.pos.checked_add(len)?;
        let bytes = self.input.get(self.pos..end)?;
        let name = std::str::from_utf8(bytes).ok()?.to_string();
        self.pos = end;

        Some(name)
    }

    fn parse_substitution(&mut self) -> Option<String> {
        let c = self.peek()?;
        self.advance();

        match c {
            b't' => Some("std".to_string()),
            b'a' => Some("std::allocator".to_string()),
            b'b' => Some("std::basic_string".to_string()),
            b's' => Some("std::string".to_string()),
            b'i' => Some("std::istream".to_string()),
            b'o' => Some("std::ostream".to_string()),
            b'd' => Some("std::iostream".to_string()),
            b'_' => self.substitutions.first().cloned(),
            b'0'..=b'9' | b'A'..=b'Z' => {
                let mut idx = base36_digit(c)?;
                loop {
                    let next = self.peek()?;
                    self.advance();
                    if next == b'_' {
                        break;
                    }
                    idx = idx.checked_mul(36)?.checked_add(base36_digit(next)?)?;
                }
                self.substitutions.get(idx.checked_add(1)?).cloned()
            }
            _ => None,
        }
    }

    fn parse_type(&mut self) -> Option<String> {
        let c = self.peek()?;

        let builtin = match c {
            b'v' => Some("void"),
            b'w' => Some("wchar_t"),
            b'b' => Some("bool"),
            b'c' => Some("char"),
            b'a' => Some("signed char"),
            b'h' => Some("unsigned char"),
            b's' => Some("short"),
            b't' => Some("unsigned short"),
            b'i' => Some("int"),
            b'j' => Some("unsigned int"),
            b'l' => Some("long"),
            b'm' => Some("unsigned long"),
            b'x' => Some("long long"),
            b'y' => Some("unsigned long long"),
            b'f' => Some("float"),
            b'd' => Some("double"),
            b'e' => Some("long double"),
            b'z' => Some("..."),
            _ => None,
        };
        if let Some(name) = builtin {
            self.advance();
            return Some(name.to_string());
        }

        match c {
            b'P' | b'R' | b'O' | b'K' => {
                self.advance();
                let inner = self.parse_type()?;
                let ty = match c {
                    b'P' => format!("{}*", inner),
                    b'R' => format!("{}&", inner),
                    b'O' => format!("{}&&", inner),
                    _ => format!("{} const", inner),
                };
                self.substitutions.push(ty.clone());
                Some(ty)
            }
            b'N' => {
                self.advance();
                self.parse_nested_name()
            }
            b'0'..=b'9' => {
                let name = self.parse_source_name()?;
                self.substitutions.push(name.clone());
                Some(name)
            }
            b'S' => {
                self.advance();
                self.parse_substitution()
            }
            _ => None,
        }
    }
}

fn base36_digit(c: u8) -> Option<usize> {
    match c {
        b'0'..=b'9' => Some((c - b'0') as usize),
        b'A'..=b'Z' => Some((c - b'A') as usize + 10),
        _ => None,
    }
}
