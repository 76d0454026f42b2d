use thiserror::Error;

// ---------------------------------------------------------------------------
// HeaderSpec – decoded "Name (symbol) [unit]" column header
// ---------------------------------------------------------------------------

/// The three parts of an axis header as stored in the first CSV record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSpec {
    pub name: String,
    pub symbol: String,
    pub unit: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("header {0:?} does not match `name (symbol) [unit]`")]
    Mismatch(String),
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// Decode a header of the form `name (symbol) [unit]`, every group optional.
///
/// The name is matched non-greedily: the first split point whose remainder
/// is an optional `(symbol)` followed by an optional `[unit]` wins. When no
/// parenthesised symbol is present the leading token *is* the symbol, so
/// `"T [s]"` yields symbol `T` and an empty name.
///
/// Line breaks never match; such headers return [`HeaderError::Mismatch`].
pub fn parse(header: &str) -> Result<HeaderSpec, HeaderError> {
    if header.contains(['\n', '\r']) {
        return Err(HeaderError::Mismatch(header.to_string()));
    }

    let text = header.trim();
    let splits = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()));

    for split in splits {
        let Some((symbol, unit)) = match_groups(&text[split..]) else {
            continue;
        };
        let token = text[..split].trim().to_string();
        return Ok(match symbol {
            Some(symbol) => HeaderSpec {
                name: token,
                symbol,
                unit,
            },
            None => HeaderSpec {
                name: String::new(),
                symbol: token,
                unit,
            },
        });
    }

    Err(HeaderError::Mismatch(header.to_string()))
}

/// Like [`parse`], but a header that fails the grammar becomes a bare symbol.
/// File loading must never abort over a single odd header.
pub fn parse_lenient(header: &str) -> HeaderSpec {
    parse(header).unwrap_or_else(|e| {
        log::warn!("{e}; using it verbatim as the axis symbol");
        HeaderSpec {
            symbol: header.trim().to_string(),
            ..HeaderSpec::default()
        }
    })
}

/// Match `\s*(\(symbol\))?\s*(\[unit\])?$` against `rest`.
///
/// Returns the trimmed symbol (if the group is present) and the trimmed unit
/// (empty if absent).
fn match_groups(rest: &str) -> Option<(Option<String>, String)> {
    let rest = rest.trim_start();

    if let Some(inner) = rest.strip_prefix('(') {
        // Non-greedy: the earliest ')' that leaves a valid unit tail.
        for (close, _) in inner.match_indices(')') {
            if close == 0 {
                continue;
            }
            if let Some(unit) = match_unit(&inner[close + 1..]) {
                return Some((Some(inner[..close].trim().to_string()), unit));
            }
        }
    }

    match_unit(rest).map(|unit| (None, unit))
}

fn match_unit(rest: &str) -> Option<String> {
    let rest = rest.trim_start();
    if rest.is_empty() {
        return Some(String::new());
    }
    let inner = rest.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    Some(inner.trim().to_string())
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// Encode axis metadata as a header string; the inverse of [`parse`] for any
/// triple with a non-empty symbol.
///
/// A unit with neither name nor symbol cannot be represented and is dropped.
pub fn format(name: &str, symbol: &str, unit: &str) -> String {
    let mut out = if name.is_empty() {
        if symbol.is_empty() {
            return String::new();
        }
        symbol.to_string()
    } else if symbol.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({symbol})")
    };

    if !unit.is_empty() {
        out.push_str(&format!(" [{unit}]"));
    }
    out
}
