//! Parameter classification.
//!
//! Each directive kind has its own decision table turning raw parameter
//! text into a [`ParamRole`]. Quoted text is unquoted first; errors always
//! quote the original text.

use std::borrow::Cow;
use std::fmt;

use crate::{DirectiveKind, Notation};

/// Semantic role of a directive parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamRole {
    Path,
    SchemaNotation,
    Type,
    Name,
    Format,
    QueryExample,
    Version,
    Title,
    ProtocolName,
    MethodName,
    TagName,
    OperationId,
    /// Multi-valued parameters (`Tags`) carry no role name.
    Unnamed,
}

impl ParamRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            ParamRole::Path => "Path",
            ParamRole::SchemaNotation => "SchemaNotation",
            ParamRole::Type => "Type",
            ParamRole::Name => "Name",
            ParamRole::Format => "Format",
            ParamRole::QueryExample => "QueryExample",
            ParamRole::Version => "Version",
            ParamRole::Title => "Title",
            ParamRole::ProtocolName => "ProtocolName",
            ParamRole::MethodName => "MethodName",
            ParamRole::TagName => "TagName",
            ParamRole::OperationId => "OperationId",
            ParamRole::Unnamed => "",
        }
    }
}

impl fmt::Display for ParamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub role: ParamRole,
    /// Unquoted value. Bare `@Name` references are stored without the `@`.
    pub value: String,
}

/// Raw text that matches no accepted pattern for its directive kind.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("incorrect parameter \"{text}\"")]
pub struct IncorrectParameter {
    /// The original, still-quoted text.
    pub text: String,
}

/// Query format literals.
const QUERY_FORMATS: [&str; 2] = ["htmlFormEncoded", "noFormat"];

/// Classify `raw` as a parameter of a `kind` directive.
pub fn classify_parameter(kind: DirectiveKind, raw: &str) -> Result<Parameter, IncorrectParameter> {
    use DirectiveKind as K;

    let unquoted = unquote(raw);
    let text: &str = &unquoted;
    let with = |role: ParamRole, value: &str| {
        Ok(Parameter {
            role,
            value: value.to_string(),
        })
    };
    let reject = || {
        Err(IncorrectParameter {
            text: raw.to_string(),
        })
    };
    // `@Name` references must be bare to count as a name.
    let user_type = |role: ParamRole| match text.strip_prefix('@') {
        Some(name) if is_user_type_ref(text) => with(role, name),
        _ => reject(),
    };

    match kind {
        K::Url | K::Get | K::Post | K::Put | K::Patch | K::Delete | K::BaseUrl => {
            with(ParamRole::Path, text)
        }
        K::Request | K::HttpResponseCode | K::Body | K::Type => {
            let role = if kind == K::Type {
                ParamRole::Name
            } else {
                ParamRole::Type
            };
            if Notation::resolve(text).is_some() {
                with(ParamRole::SchemaNotation, text)
            } else if is_array_of_types(text) {
                with(role, text)
            } else {
                user_type(role)
            }
        }
        K::Headers | K::Path | K::Params | K::Result => match Notation::resolve(text) {
            Some(_) => with(ParamRole::SchemaNotation, text),
            None => reject(),
        },
        K::Query => {
            if QUERY_FORMATS.contains(&text) {
                with(ParamRole::Format, text)
            } else {
                with(ParamRole::QueryExample, text)
            }
        }
        K::Jsight | K::Version => with(ParamRole::Version, text),
        K::Title => with(ParamRole::Title, text),
        K::Server | K::Enum | K::Macro | K::Paste => user_type(ParamRole::Name),
        K::Protocol => with(ParamRole::ProtocolName, text),
        K::Method => with(ParamRole::MethodName, text),
        K::Tag => user_type(ParamRole::TagName),
        K::Tags => user_type(ParamRole::Unnamed),
        K::OperationId => with(ParamRole::OperationId, text),
        K::Info | K::Description => reject(),
    }
}

/// Strip one pair of surrounding double quotes, resolving `\"` and `\\`.
///
/// Text that is not wrapped in quotes is returned unchanged.
pub fn unquote(raw: &str) -> Cow<'_, str> {
    let Some(inner) = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return Cow::Borrowed(raw);
    };
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped @ ('"' | '\\')) => out.push(escaped),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// `@` followed by at least one byte of `[A-Za-z0-9_-]`.
pub fn is_user_type_ref(text: &str) -> bool {
    match text.as_bytes() {
        [b'@', rest @ ..] if !rest.is_empty() => rest
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-'),
        _ => false,
    }
}

/// `[` + exactly one user-type reference + `]`.
pub fn is_array_of_types(text: &str) -> bool {
    text.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(is_user_type_ref)
}
