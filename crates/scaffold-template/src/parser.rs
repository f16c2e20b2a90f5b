//! `template.xml` descriptor parser.
//!
//! The descriptor is a small tag-based document:
//!
//! ```xml
//! <?xml version="1.0"?>
//! <template>
//!     <id>feature</id>
//!     <name>Feature module</name>
//!     <description>Creates a feature module</description>
//!     <parameters>
//!         <parameter name="moduleName">
//!             <displayName>Module Name</displayName>
//!             <type>TEXT</type>
//!             <required>true</required>
//!         </parameter>
//!     </parameters>
//! </template>
//! ```
//!
//! Parsing is tolerant. A malformed parameter block is skipped and reported
//! as a [`ParseDiagnostic`]; bad field values fall back to defaults. The
//! parse itself never fails.

use regex::{Captures, Regex};
use scaffold_core::validators::validator_for;
use scaffold_core::{ParameterSpec, ParameterType};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, warn};

static PARAMETERS_SECTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<parameters(?:\s[^>]*)?>.*?</parameters>").expect("valid regex")
});
static PARAMETER_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<parameter(?:\s[^>]*)?>").expect("valid regex"));
static PARAMETER_BLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<parameter(?:\s[^>]*)?>.*?</parameter>").expect("valid regex")
});
static NAME_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\sname\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));
static ENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);").expect("valid regex")
});

const PARAMETER_CLOSE: &str = "</parameter>";

/// Kind of problem found while parsing a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A parameter block has no `name` attribute; the block is skipped
    MissingName,
    /// The `name` attribute is not an identifier; the block is skipped
    InvalidName,
    /// The name was already declared; the later block is skipped
    DuplicateName,
    /// A `<parameter>` is never closed; the block is skipped
    UnterminatedBlock,
    /// `<type>` is not a known type; `TEXT` is used
    UnknownType,
    /// `<required>` is neither `true` nor `false`; `true` is used
    InvalidRequired,
    /// The build fragment exists but cannot be read; it is left empty
    UnreadableBuildFragment,
}

/// A recoverable problem found while parsing one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    /// Template folder name
    pub template: String,
    /// Parameter the problem refers to, when known
    pub parameter: Option<String>,
    /// Problem classification
    pub kind: DiagnosticKind,
    /// Human readable description
    pub message: String,
}

impl ParseDiagnostic {
    /// Returns `true` if the affected parameter block was dropped.
    #[must_use]
    pub const fn is_skipped_block(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticKind::MissingName
                | DiagnosticKind::InvalidName
                | DiagnosticKind::DuplicateName
                | DiagnosticKind::UnterminatedBlock
        )
    }
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter {
            Some(parameter) => write!(f, "{}: parameter '{}': {}", self.template, parameter, self.message),
            None => write!(f, "{}: {}", self.template, self.message),
        }
    }
}

/// Template metadata and parameters read from a descriptor.
#[derive(Debug, Clone)]
pub struct TemplateDescriptor {
    /// Template id, the folder name when absent
    pub id: String,
    /// Display name, the id when absent
    pub name: String,
    /// Description, empty when absent
    pub description: String,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterSpec>,
}

/// Result of parsing a descriptor: the model plus everything that was
/// tolerated along the way.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Parsed descriptor
    pub descriptor: TemplateDescriptor,
    /// Recoverable problems, in document order
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Parses descriptor text for the template in folder `folder_name`.
///
/// # Examples
///
/// ```
/// use scaffold_core::ParameterType;
/// use scaffold_template::parser::parse_descriptor;
///
/// let xml = r#"
/// <template>
///     <name>Feature</name>
///     <parameters>
///         <parameter name="packageName">
///             <type>PACKAGE</type>
///             <default>com.example</default>
///         </parameter>
///         <parameter>
///             <type>TEXT</type>
///         </parameter>
///     </parameters>
/// </template>"#;
///
/// let outcome = parse_descriptor(xml, "feature");
/// let descriptor = outcome.descriptor;
///
/// assert_eq!(descriptor.id, "feature");
/// assert_eq!(descriptor.name, "Feature");
/// assert_eq!(descriptor.parameters.len(), 1);
/// assert_eq!(descriptor.parameters[0].parameter_type, ParameterType::Package);
/// assert_eq!(outcome.diagnostics.len(), 1);
/// ```
#[must_use]
pub fn parse_descriptor(content: &str, folder_name: &str) -> ParseOutcome {
    let header = template_level_text(content);

    let id = extract_tag(&header, "id")
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| folder_name.to_string());
    let name = extract_tag(&header, "name")
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| id.clone());
    let description = extract_tag(&header, "description").unwrap_or_default();

    let mut diagnostics = Vec::new();
    let parameters = parse_parameters(content, folder_name, &mut diagnostics);

    for diagnostic in &diagnostics {
        warn!("{diagnostic}");
    }
    debug!(
        "Parsed descriptor for '{}': {} parameters, {} diagnostics",
        id,
        parameters.len(),
        diagnostics.len()
    );

    ParseOutcome {
        descriptor: TemplateDescriptor {
            id,
            name,
            description,
            parameters,
        },
        diagnostics,
    }
}

/// Text outside the parameter section, so a parameter's `<description>`
/// never shadows the template's.
fn template_level_text(content: &str) -> String {
    let without_section = PARAMETERS_SECTION_REGEX.replace_all(content, "");
    let mut header = PARAMETER_BLOCK_REGEX
        .replace_all(&without_section, "")
        .into_owned();

    // An unclosed section or block swallows the rest of the document
    let cut = [
        header.find("<parameters"),
        PARAMETER_OPEN_REGEX.find(&header).map(|m| m.start()),
    ]
    .into_iter()
    .flatten()
    .min();
    if let Some(cut) = cut {
        header.truncate(cut);
    }
    header
}

fn parse_parameters(
    content: &str,
    template: &str,
    diagnostics: &mut Vec<ParseDiagnostic>,
) -> Vec<ParameterSpec> {
    let opens: Vec<_> = PARAMETER_OPEN_REGEX.find_iter(content).collect();
    let mut seen = HashSet::new();
    let mut parameters = Vec::new();

    for (i, open) in opens.iter().enumerate() {
        let open_tag = open.as_str();
        let name = NAME_ATTR_REGEX
            .captures(open_tag)
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| decode_entities(m.as_str()).trim().to_string());

        let mut report = |kind: DiagnosticKind, message: String| {
            diagnostics.push(ParseDiagnostic {
                template: template.to_string(),
                parameter: name.clone().filter(|n| !n.is_empty()),
                kind,
                message,
            });
        };

        let body = if open_tag.ends_with("/>") {
            ""
        } else {
            let next_open = opens.get(i + 1).map_or(content.len(), |m| m.start());
            let rest = &content[open.end()..next_open];
            match rest.find(PARAMETER_CLOSE) {
                Some(end) => &rest[..end],
                None => {
                    report(
                        DiagnosticKind::UnterminatedBlock,
                        "parameter block is not closed, skipped".to_string(),
                    );
                    continue;
                }
            }
        };

        let Some(name) = name.clone().filter(|n| !n.is_empty()) else {
            report(
                DiagnosticKind::MissingName,
                "parameter block has no name attribute, skipped".to_string(),
            );
            continue;
        };

        if !IDENTIFIER_REGEX.is_match(&name) {
            report(
                DiagnosticKind::InvalidName,
                format!("'{name}' is not a valid parameter name, skipped"),
            );
            continue;
        }

        if !seen.insert(name.clone()) {
            report(
                DiagnosticKind::DuplicateName,
                "parameter declared more than once, later declaration skipped".to_string(),
            );
            continue;
        }

        parameters.push(parse_parameter_body(name, body, &mut report));
    }

    parameters
}

fn parse_parameter_body(
    name: String,
    body: &str,
    report: &mut impl FnMut(DiagnosticKind, String),
) -> ParameterSpec {
    let display_name = extract_tag(body, "displayName")
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| name.clone());
    let description = extract_tag(body, "description").unwrap_or_default();
    let default_value = extract_tag(body, "default").unwrap_or_default();

    let parameter_type = match extract_tag(body, "type").filter(|v| !v.is_empty()) {
        None => ParameterType::Text,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            report(
                DiagnosticKind::UnknownType,
                format!("unknown type '{raw}', using TEXT"),
            );
            ParameterType::Text
        }),
    };

    let required = match extract_tag(body, "required").filter(|v| !v.is_empty()) {
        None => true,
        Some(raw) if raw.eq_ignore_ascii_case("true") => true,
        Some(raw) if raw.eq_ignore_ascii_case("false") => false,
        Some(raw) => {
            report(
                DiagnosticKind::InvalidRequired,
                format!("required value '{raw}' is not a boolean, using true"),
            );
            true
        }
    };

    let options: Option<Vec<String>> = extract_tag(body, "options")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|opts| !opts.is_empty());

    let mut spec = ParameterSpec::new(name, parameter_type)
        .with_display_name(display_name)
        .with_description(description)
        .with_default(default_value)
        .with_required(required);

    if let Some(validator) = validator_for(parameter_type, options.as_deref()) {
        spec = spec.with_validator(validator);
    }
    if let Some(options) = options {
        spec = spec.with_options(options);
    }
    spec
}

/// Returns the trimmed, entity-decoded text of the first `<tag>...</tag>`.
fn extract_tag(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = xml.find(&open)? + open.len();
    let end = xml[start..].find(&close)? + start;
    Some(decode_entities(xml[start..end].trim()))
}

/// Decodes the predefined XML entities and numeric character references.
/// Unknown or invalid references are kept verbatim.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY_REGEX
        .replace_all(text, |caps: &Captures<'_>| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let code = entity
                        .strip_prefix("#x")
                        .or_else(|| entity.strip_prefix("#X"))
                        .map_or_else(
                            || entity[1..].parse::<u32>().ok(),
                            |hex| u32::from_str_radix(hex, 16).ok(),
                        );
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
