//! Email address parsing and syntax checks (RFC 5322 §3.4, simplified).

/// A parsed email address.
///
/// # Examples
/// - `"Jane Roe <jane@example.com>"` → `display_name = "Jane Roe"`, `address = "jane@example.com"`
/// - `"user@example.com"` → `display_name = ""`, `address = "user@example.com"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    /// Human-readable display name (may be empty).
    pub display_name: String,
    /// The bare address (`user@domain`).
    pub address: String,
}

impl EmailAddress {
    /// Parse a single address.
    ///
    /// Accepts `user@domain`, `<user@domain>`, `Name <user@domain>` and
    /// `"Quoted, Name" <user@domain>`. Anything else is kept verbatim in
    /// `address`; use [`EmailAddress::is_valid`] to check it.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let (Some(open), Some(close)) = (trimmed.rfind('<'), trimmed.rfind('>')) {
            if close > open {
                return Self {
                    display_name: strip_quotes(&trimmed[..open]),
                    address: trimmed[open + 1..close].trim().to_string(),
                };
            }
        }

        Self {
            display_name: String::new(),
            address: trimmed.to_string(),
        }
    }

    /// Whether the bare address looks like `local@domain.tld`.
    ///
    /// One `@`, non-empty local part, no whitespace or angle brackets, and a
    /// domain made of non-empty dot-separated labels.
    pub fn is_valid(&self) -> bool {
        let addr = self.address.as_str();
        if addr.is_empty() || addr.chars().any(|c| c.is_whitespace() || c == '<' || c == '>') {
            return false;
        }
        let Some((local, domain)) = addr.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') || local.starts_with('.') || local.ends_with('.') {
            return false;
        }
        !domain.is_empty() && domain.split('.').all(|label| !label.is_empty() && !label.starts_with('-'))
    }

    /// Format for display: `"Display Name <address>"` or just `"address"`.
    pub fn display(&self) -> String {
        if self.display_name.is_empty() {
            self.address.clone()
        } else {
            format!("{} <{}>", self.display_name, self.address)
        }
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Syntax check on a raw address string.
pub fn is_valid_address(raw: &str) -> bool {
    EmailAddress::parse(raw).is_valid()
}

/// Split a comma-separated address list into trimmed, non-empty pieces.
///
/// Commas inside double quotes or angle brackets do not split:
/// `"Last, First" <a@b.com>, c@d.com` yields two entries.
pub fn split_address_list(raw: &str) -> Vec<String> {
    let mut results = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_angle = false;

    for ch in raw.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '<' if !in_quotes => {
                in_angle = true;
                current.push(ch);
            }
            '>' if !in_quotes => {
                in_angle = false;
                current.push(ch);
            }
            ',' if !in_quotes && !in_angle => {
                push_trimmed(&mut results, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_trimmed(&mut results, &current);

    results
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}

/// Strip surrounding double-quotes and trim whitespace.
fn strip_quotes(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}
