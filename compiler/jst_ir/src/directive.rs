//! Directive kinds and the context grammar.
//!
//! The grammar is data, not branching code: every kind carries its
//! canonical spelling, a set of [`DirectiveFlags`], and the slice of kinds
//! permitted directly beneath it. The scanner uses [`KEYWORDS`] for
//! recognition; the validation layer uses [`DirectiveKind::is_allowed_as_child`].
//!
//! # Response codes
//!
//! [`DirectiveKind::HttpResponseCode`] has no literal spelling. It is
//! recognized by pattern (`[1-5]` followed by two digits) and is deliberately
//! absent from [`KEYWORDS`] so literal and pattern matching never collide.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Static properties of a directive kind.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct DirectiveFlags: u8 {
        /// May appear at the top level of a document.
        const ROOT = 1;
        /// One of the five HTTP methods.
        const HTTP_METHOD = 1 << 1;
        /// The body, when present, is an embedded schema.
        const SCHEMA_BODY = 1 << 2;
        /// The body, when present, is free text.
        const TEXT_BODY = 1 << 3;
    }
}

/// Every directive the language knows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectiveKind {
    Jsight,
    Info,
    Title,
    Version,
    Description,
    Server,
    BaseUrl,
    Url,
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Body,
    Request,
    HttpResponseCode,
    Path,
    Headers,
    Query,
    Type,
    Enum,
    Macro,
    Paste,
    Protocol,
    Method,
    Params,
    Result,
    Tag,
    Tags,
    OperationId,
}

/// Error for text that names no directive.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown directive \"{text}\"")]
pub struct UnknownDirective {
    pub text: String,
}

/// Literal spellings sorted by byte value.
///
/// Keywords sharing a prefix form a contiguous run, so the scanner can
/// narrow a candidate range one byte at a time.
pub const KEYWORDS: [(&str, DirectiveKind); 29] = [
    ("BaseUrl", DirectiveKind::BaseUrl),
    ("Body", DirectiveKind::Body),
    ("DELETE", DirectiveKind::Delete),
    ("Description", DirectiveKind::Description),
    ("ENUM", DirectiveKind::Enum),
    ("GET", DirectiveKind::Get),
    ("Headers", DirectiveKind::Headers),
    ("INFO", DirectiveKind::Info),
    ("JSIGHT", DirectiveKind::Jsight),
    ("MACRO", DirectiveKind::Macro),
    ("Method", DirectiveKind::Method),
    ("OperationId", DirectiveKind::OperationId),
    ("PASTE", DirectiveKind::Paste),
    ("PATCH", DirectiveKind::Patch),
    ("POST", DirectiveKind::Post),
    ("PUT", DirectiveKind::Put),
    ("Params", DirectiveKind::Params),
    ("Path", DirectiveKind::Path),
    ("Protocol", DirectiveKind::Protocol),
    ("Query", DirectiveKind::Query),
    ("Request", DirectiveKind::Request),
    ("Result", DirectiveKind::Result),
    ("SERVER", DirectiveKind::Server),
    ("TAG", DirectiveKind::Tag),
    ("TYPE", DirectiveKind::Type),
    ("Tags", DirectiveKind::Tags),
    ("Title", DirectiveKind::Title),
    ("URL", DirectiveKind::Url),
    ("Version", DirectiveKind::Version),
];

/// Every kind, in declaration order.
pub const ALL_KINDS: [DirectiveKind; 30] = [
    DirectiveKind::Jsight,
    DirectiveKind::Info,
    DirectiveKind::Title,
    DirectiveKind::Version,
    DirectiveKind::Description,
    DirectiveKind::Server,
    DirectiveKind::BaseUrl,
    DirectiveKind::Url,
    DirectiveKind::Get,
    DirectiveKind::Post,
    DirectiveKind::Put,
    DirectiveKind::Patch,
    DirectiveKind::Delete,
    DirectiveKind::Body,
    DirectiveKind::Request,
    DirectiveKind::HttpResponseCode,
    DirectiveKind::Path,
    DirectiveKind::Headers,
    DirectiveKind::Query,
    DirectiveKind::Type,
    DirectiveKind::Enum,
    DirectiveKind::Macro,
    DirectiveKind::Paste,
    DirectiveKind::Protocol,
    DirectiveKind::Method,
    DirectiveKind::Params,
    DirectiveKind::Result,
    DirectiveKind::Tag,
    DirectiveKind::Tags,
    DirectiveKind::OperationId,
];

// ─── Context grammar ─────────────────────────────────────────────────

use DirectiveKind as K;

const INFO_CHILDREN: &[DirectiveKind] = &[K::Title, K::Version, K::Description];

const SERVER_CHILDREN: &[DirectiveKind] = &[K::BaseUrl];

const URL_CHILDREN: &[DirectiveKind] = &[
    K::Get,
    K::Post,
    K::Put,
    K::Patch,
    K::Delete,
    K::Path,
    K::Protocol,
    K::Method,
    K::Description,
    K::Tags,
    K::Paste,
];

const HTTP_METHOD_CHILDREN: &[DirectiveKind] = &[
    K::Description,
    K::Request,
    K::HttpResponseCode,
    K::Path,
    K::Query,
    K::Tags,
    K::OperationId,
    K::Paste,
];

const MESSAGE_CHILDREN: &[DirectiveKind] = &[K::Headers, K::Body];

const RPC_METHOD_CHILDREN: &[DirectiveKind] = &[K::Description, K::Params, K::Result, K::Tags];

const MACRO_CHILDREN: &[DirectiveKind] = &[
    K::Get,
    K::Post,
    K::Put,
    K::Patch,
    K::Delete,
    K::Description,
    K::Request,
    K::HttpResponseCode,
    K::Path,
    K::Query,
    K::Headers,
    K::Body,
    K::Protocol,
    K::Method,
    K::Params,
    K::Result,
    K::Tags,
    K::OperationId,
    K::Paste,
];

const TAG_CHILDREN: &[DirectiveKind] = &[K::Title, K::Description, K::Tag];

impl DirectiveKind {
    /// Canonical keyword spelling; `None` for response codes.
    pub const fn spelling(self) -> Option<&'static str> {
        Some(match self {
            K::Jsight => "JSIGHT",
            K::Info => "INFO",
            K::Title => "Title",
            K::Version => "Version",
            K::Description => "Description",
            K::Server => "SERVER",
            K::BaseUrl => "BaseUrl",
            K::Url => "URL",
            K::Get => "GET",
            K::Post => "POST",
            K::Put => "PUT",
            K::Patch => "PATCH",
            K::Delete => "DELETE",
            K::Body => "Body",
            K::Request => "Request",
            K::HttpResponseCode => return None,
            K::Path => "Path",
            K::Headers => "Headers",
            K::Query => "Query",
            K::Type => "TYPE",
            K::Enum => "ENUM",
            K::Macro => "MACRO",
            K::Paste => "PASTE",
            K::Protocol => "Protocol",
            K::Method => "Method",
            K::Params => "Params",
            K::Result => "Result",
            K::Tag => "TAG",
            K::Tags => "Tags",
            K::OperationId => "OperationId",
        })
    }

    /// Static properties of this kind.
    pub const fn flags(self) -> DirectiveFlags {
        const ROOT: DirectiveFlags = DirectiveFlags::ROOT;
        const SCHEMA: DirectiveFlags = DirectiveFlags::SCHEMA_BODY;
        match self {
            K::Jsight | K::Info | K::Server | K::Url | K::Macro | K::Paste | K::Tag => ROOT,
            K::Get | K::Post | K::Put | K::Patch | K::Delete => {
                DirectiveFlags::ROOT.union(DirectiveFlags::HTTP_METHOD)
            }
            K::Type | K::Enum => ROOT.union(SCHEMA),
            K::Body
            | K::Request
            | K::HttpResponseCode
            | K::Path
            | K::Headers
            | K::Query
            | K::Params
            | K::Result => SCHEMA,
            K::Description => DirectiveFlags::TEXT_BODY,
            K::Title
            | K::Version
            | K::BaseUrl
            | K::Protocol
            | K::Method
            | K::Tags
            | K::OperationId => DirectiveFlags::empty(),
        }
    }

    /// Kinds permitted directly beneath this one.
    pub const fn children(self) -> &'static [DirectiveKind] {
        match self {
            K::Info => INFO_CHILDREN,
            K::Server => SERVER_CHILDREN,
            K::Url => URL_CHILDREN,
            K::Get | K::Post | K::Put | K::Patch | K::Delete => HTTP_METHOD_CHILDREN,
            K::Request | K::HttpResponseCode => MESSAGE_CHILDREN,
            K::Method => RPC_METHOD_CHILDREN,
            K::Macro => MACRO_CHILDREN,
            K::Tag => TAG_CHILDREN,
            _ => &[],
        }
    }

    /// Returns `true` if this kind may appear at the top level.
    pub const fn is_allowed_at_root(self) -> bool {
        self.flags().contains(DirectiveFlags::ROOT)
    }

    /// Returns `true` if `child` may appear directly beneath `self`.
    ///
    /// Only direct children are checked; the relation is not transitive.
    pub fn is_allowed_as_child(self, child: DirectiveKind) -> bool {
        self.children().contains(&child)
    }

    /// Returns `true` for GET, POST, PUT, PATCH and DELETE.
    pub const fn is_http_method(self) -> bool {
        self.flags().contains(DirectiveFlags::HTTP_METHOD)
    }

    /// Returns `true` if the body of this kind is an embedded schema.
    pub const fn has_schema_body(self) -> bool {
        self.flags().contains(DirectiveFlags::SCHEMA_BODY)
    }

    /// Returns `true` if the body of this kind is free text.
    pub const fn has_text_body(self) -> bool {
        self.flags().contains(DirectiveFlags::TEXT_BODY)
    }

    /// Resolve keyword text to a kind.
    ///
    /// Literal spellings are tried first, then the response-code pattern.
    pub fn classify(text: &str) -> Result<DirectiveKind, UnknownDirective> {
        if let Some(kind) = lookup_keyword(text.as_bytes()) {
            return Ok(kind);
        }
        if is_response_code(text.as_bytes()) {
            return Ok(K::HttpResponseCode);
        }
        Err(UnknownDirective {
            text: text.to_string(),
        })
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling().unwrap_or("HTTP response code"))
    }
}

/// Exact keyword lookup over [`KEYWORDS`].
pub fn lookup_keyword(text: &[u8]) -> Option<DirectiveKind> {
    KEYWORDS
        .binary_search_by(|(spelling, _)| spelling.as_bytes().cmp(text))
        .ok()
        .map(|index| KEYWORDS[index].1)
}

/// Returns `true` for exactly three digits, the first in `1..=5`.
pub fn is_response_code(text: &[u8]) -> bool {
    text.len() == 3 && has_response_code_prefix(text)
}

/// Returns `true` if `text` begins with a `[1-5]xx` response code.
pub fn has_response_code_prefix(text: &[u8]) -> bool {
    matches!(text, [b'1'..=b'5', b'0'..=b'9', b'0'..=b'9', ..])
}

/// Returns `true` if `text` opens a new directive.
///
/// Used at context boundaries (for example while reading a free-text body)
/// to decide whether a line starts a directive or is ordinary content. A
/// keyword spelling or response code counts only when followed by a word
/// boundary: end of text, whitespace, or `(`.
pub fn starts_with_directive(text: &[u8]) -> bool {
    let followed_by_boundary =
        |len: usize| matches!(text.get(len), None | Some(b' ' | b'\t' | b'\n' | b'\r' | b'('));

    if has_response_code_prefix(text) && followed_by_boundary(3) {
        return true;
    }
    KEYWORDS.iter().any(|(spelling, _)| {
        text.starts_with(spelling.as_bytes()) && followed_by_boundary(spelling.len())
    })
}
