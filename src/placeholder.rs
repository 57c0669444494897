use crate::{Error, Result};
use smartcow::SmartCow;
use std::{
    fmt::{self, Display, Formatter},
    ops::Range,
};

/// How a routing library spells a named path parameter.
///
/// Scenario templates are always written in the canonical [`Colon`] style
/// (`/user/:name`) and rewritten for each adapter before registration.
///
/// [`Colon`]: PlaceholderStyle::Colon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderStyle {
    /// `/user/:name`
    Colon,
    /// `/user/{name}`
    Brace,
}

impl Display for PlaceholderStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaceholderStyle::Colon => ":name",
            PlaceholderStyle::Brace => "{name}",
        })
    }
}

/// Byte ranges of each `:name` placeholder in a canonical template,
/// including the colon. A colon only opens a placeholder at the start of a
/// segment.
fn placeholders(template: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    let bytes = template.as_bytes();

    #[cfg(feature = "memchr")]
    let colons = memchr::memchr_iter(b':', bytes);
    #[cfg(not(feature = "memchr"))]
    let colons = template.match_indices(':').map(|(index, _)| index);

    colons
        .filter(move |&index| index == 0 || bytes[index - 1] == b'/')
        .map(move |start| {
            #[cfg(feature = "memchr")]
            let end = memchr::memchr(b'/', &bytes[start..]).map(|offset| start + offset);
            #[cfg(not(feature = "memchr"))]
            let end = template[start..].find('/').map(|offset| start + offset);

            start..end.unwrap_or(bytes.len())
        })
}

/// The parameter names of a canonical template, in order
pub fn param_names(template: &str) -> impl Iterator<Item = &str> + '_ {
    placeholders(template).map(move |range| &template[range.start + 1..range.end])
}

/// Number of placeholders in a canonical template
pub fn param_count(template: &str) -> usize {
    placeholders(template).count()
}

/// Check that a canonical template can be translated and filled
pub fn validate(template: &str) -> Result<()> {
    if !template.starts_with('/') {
        return Err(Error::Template {
            template: template.into(),
            reason: String::from("templates must start with `/`"),
        });
    }

    if param_names(template).any(str::is_empty) {
        return Err(Error::Template {
            template: template.into(),
            reason: String::from("params must be named"),
        });
    }

    Ok(())
}

/// Replace every placeholder, copying everything between them verbatim
fn rewrite<'t>(template: &'t str, mut replacement: impl FnMut(&'t str, &mut String)) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut last = 0;
    for range in placeholders(template) {
        out.push_str(&template[last..range.start]);
        replacement(&template[range.start + 1..range.end], &mut out);
        last = range.end;
    }
    out.push_str(&template[last..]);
    out
}

impl PlaceholderStyle {
    /// Rewrite a canonical template into this style.
    ///
    /// Colon-style translation is the identity and stays borrowed.
    pub fn translate<'t>(&self, template: &'t str) -> SmartCow<'t> {
        match self {
            PlaceholderStyle::Colon => SmartCow::from(template),
            PlaceholderStyle::Brace => SmartCow::from(rewrite(template, |name, out| {
                out.push('{');
                out.push_str(name);
                out.push('}');
            })),
        }
    }

    /// Refuse a path written in the other style. Libraries take a foreign
    /// placeholder as a literal segment, so the route would only ever 404.
    pub fn check(&self, path: &str) -> Result<()> {
        let foreign = match self {
            PlaceholderStyle::Colon => path.split('/').any(|segment| segment.starts_with('{')),
            PlaceholderStyle::Brace => param_count(path) > 0,
        };

        if foreign {
            return Err(Error::Template {
                template: path.into(),
                reason: format!("params must be written as `{self}` here"),
            });
        }

        Ok(())
    }
}

/// Turn a canonical template into a concrete request path by substituting
/// a literal for each placeholder. `value` receives the parameter name.
pub fn fill<'t, 'v>(template: &'t str, mut value: impl FnMut(&'t str) -> &'v str) -> String {
    rewrite(template, |name, out| out.push_str(value(name)))
}
