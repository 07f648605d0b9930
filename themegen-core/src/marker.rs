//! Marker comment grammar parser.
//!
//! Marker comments are a small line-oriented directive language embedded in a
//! video's metadata sidecar, e.g.:
//!
//! ```text
//! DESCRIPTION: Enter your company tagline.
//! TEXT: Tagline | tagline | 60 | e.g., Innovation Starts Here
//! TEXTLIST-FLEX: Benefits | benefits | 2-8 | 60
//! ```
//!
//! Each non-blank line is matched against a table of directive prefixes
//! (case-sensitive, first match wins); unrecognized lines are ignored.
//! Directive arguments after the prefix are `|`-delimited and trimmed.
//! A directive with fewer than its minimum argument count is dropped
//! silently. A malformed decimal integer in a numeric argument fails the
//! parse with [`CoreError::MarkerSyntax`]; that is the one hard-failure axis
//! in this grammar.

use crate::error::{CoreError, CoreResult};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Tier granted to clips that carry no `TIER:` directive.
pub const DEFAULT_TIER: &str = "Essential";

/// Splits marker text into lines on any mix of `\r`/`\n`.
static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").expect("valid regex"));

/// Item quantity for list-shaped input fields: either an exact count or a
/// flexible min/max range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListQuantity {
    Fixed {
        count: u32,
    },
    Flexible {
        #[serde(rename = "minItems")]
        min_items: u32,
        #[serde(rename = "maxItems")]
        max_items: u32,
    },
}

/// Single-line or multi-line text input request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    pub label: String,
    #[serde(rename = "fieldId")]
    pub field_id: String,
    #[serde(rename = "maxLength")]
    pub max_length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// URL input request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlField {
    pub label: String,
    #[serde(rename = "fieldId")]
    pub field_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// List-of-texts input request with a fixed count or flexible range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextListField {
    pub label: String,
    #[serde(rename = "fieldId")]
    pub field_id: String,
    #[serde(flatten)]
    pub quantity: ListQuantity,
    #[serde(rename = "itemMaxLength")]
    pub item_max_length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Media upload request (images, logos, ...) with a fixed count or range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRequestField {
    pub label: String,
    #[serde(rename = "fieldId")]
    pub field_id: String,
    #[serde(rename = "mediaType")]
    pub media_type: String,
    #[serde(flatten)]
    pub quantity: ListQuantity,
    pub description: String,
}

/// A single user-input request attached to a clip, discriminated by
/// `inputType` in the catalog JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "inputType")]
pub enum InputField {
    #[serde(rename = "text")]
    Text(TextField),
    #[serde(rename = "textarea")]
    Textarea(TextField),
    #[serde(rename = "url")]
    Url(UrlField),
    #[serde(rename = "textList")]
    TextList(TextListField),
    #[serde(rename = "mediaRequestList")]
    MediaRequestList(MediaRequestField),
}

/// Typed result of parsing one marker comment.
///
/// Transient: consumed by the assembly engine to build either a theme record
/// (when `theme_name` is present) or a clip record. Presence of `theme_name`
/// is the sole discriminator between the two framings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerConfig {
    /// Input fields in directive order.
    pub custom_inputs: Vec<InputField>,
    pub popup_message: Option<String>,
    pub theme_name: Option<String>,
    pub theme_description: Option<String>,
    /// Set by `NO-INPUT:`; forces `requires_input()` to false.
    pub no_input: bool,
    pub is_overlay: bool,
    pub tier_requirement: Option<String>,
}

impl MarkerConfig {
    /// Whether the clip needs user input: `NO-INPUT:` wins, otherwise any
    /// custom input implies true.
    #[must_use]
    pub fn requires_input(&self) -> bool {
        !self.no_input && !self.custom_inputs.is_empty()
    }

    /// Whether this marker describes the theme preview rather than a clip.
    #[must_use]
    pub fn is_theme_preview(&self) -> bool {
        self.theme_name.is_some()
    }

    /// Tier requirement with the `"Essential"` default applied.
    #[must_use]
    pub fn tier(&self) -> String {
        self.tier_requirement
            .clone()
            .unwrap_or_else(|| DEFAULT_TIER.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
enum Directive {
    Description,
    ThemeName,
    ThemeDescription,
    Text,
    Textarea,
    Url,
    TextListFixed,
    TextListFlex,
    MediaFixed,
    MediaFlex,
    NoInput,
    Overlay,
    Tier,
}

/// Directive dispatch table; scanned in order, first match wins.
const DIRECTIVES: &[(&str, Directive)] = &[
    ("DESCRIPTION:", Directive::Description),
    ("THEME-NAME:", Directive::ThemeName),
    ("THEME-DESCRIPTION:", Directive::ThemeDescription),
    ("TEXT:", Directive::Text),
    ("TEXTAREA:", Directive::Textarea),
    ("URL:", Directive::Url),
    ("TEXTLIST-FIXED:", Directive::TextListFixed),
    ("TEXTLIST-FLEX:", Directive::TextListFlex),
    ("MEDIA-FIXED:", Directive::MediaFixed),
    ("MEDIA-FLEX:", Directive::MediaFlex),
    ("NO-INPUT:", Directive::NoInput),
    ("OVERLAY:", Directive::Overlay),
    ("TIER:", Directive::Tier),
];

/// Parses a raw marker comment into a [`MarkerConfig`].
///
/// Returns `Ok(None)` for an empty or whitespace-only comment. Unknown lines
/// are ignored without affecting subsequent valid lines. The only `Err`
/// produced is [`CoreError::MarkerSyntax`] for a malformed integer argument.
pub fn parse_marker(text: &str) -> CoreResult<Option<MarkerConfig>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut config = MarkerConfig::default();

    for raw_line in LINE_BREAKS.split(trimmed) {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((directive, rest)) = match_directive(line) else {
            log::debug!("Ignoring unrecognized marker line: {line}");
            continue;
        };

        match directive {
            Directive::Description => config.popup_message = Some(rest.trim().to_string()),
            Directive::ThemeName => config.theme_name = Some(rest.trim().to_string()),
            Directive::ThemeDescription => {
                config.theme_description = Some(rest.trim().to_string());
            }
            Directive::NoInput => config.no_input = true,
            Directive::Overlay => config.is_overlay = true,
            Directive::Tier => config.tier_requirement = Some(rest.trim().to_string()),

            Directive::Text | Directive::Textarea => {
                let parts = split_args(rest);
                if parts.len() < 3 {
                    continue;
                }
                let field = TextField {
                    label: parts[0].to_string(),
                    field_id: parts[1].to_string(),
                    max_length: parse_int("maxLength", parts[2], line)?,
                    placeholder: optional_arg(&parts, 3),
                };
                config.custom_inputs.push(match directive {
                    Directive::Text => InputField::Text(field),
                    _ => InputField::Textarea(field),
                });
            }

            Directive::Url => {
                let parts = split_args(rest);
                if parts.len() < 2 {
                    continue;
                }
                config.custom_inputs.push(InputField::Url(UrlField {
                    label: parts[0].to_string(),
                    field_id: parts[1].to_string(),
                    placeholder: optional_arg(&parts, 2),
                }));
            }

            Directive::TextListFixed => {
                let parts = split_args(rest);
                if parts.len() < 4 {
                    continue;
                }
                config.custom_inputs.push(InputField::TextList(TextListField {
                    label: parts[0].to_string(),
                    field_id: parts[1].to_string(),
                    quantity: ListQuantity::Fixed {
                        count: parse_int("count", parts[2], line)?,
                    },
                    item_max_length: parse_int("itemMaxLength", parts[3], line)?,
                    placeholder: optional_arg(&parts, 4),
                }));
            }

            Directive::TextListFlex => {
                let parts = split_args(rest);
                if parts.len() < 4 {
                    continue;
                }
                let (min_items, max_items) = parse_range(parts[2], line)?;
                config.custom_inputs.push(InputField::TextList(TextListField {
                    label: parts[0].to_string(),
                    field_id: parts[1].to_string(),
                    quantity: ListQuantity::Flexible {
                        min_items,
                        max_items,
                    },
                    item_max_length: parse_int("itemMaxLength", parts[3], line)?,
                    placeholder: optional_arg(&parts, 4),
                }));
            }

            Directive::MediaFixed => {
                let parts = split_args(rest);
                if parts.len() < 5 {
                    continue;
                }
                config
                    .custom_inputs
                    .push(InputField::MediaRequestList(MediaRequestField {
                        label: parts[0].to_string(),
                        field_id: parts[1].to_string(),
                        media_type: parts[2].to_string(),
                        quantity: ListQuantity::Fixed {
                            count: parse_int("count", parts[3], line)?,
                        },
                        description: parts[4].to_string(),
                    }));
            }

            Directive::MediaFlex => {
                let parts = split_args(rest);
                if parts.len() < 5 {
                    continue;
                }
                let (min_items, max_items) = parse_range(parts[3], line)?;
                config
                    .custom_inputs
                    .push(InputField::MediaRequestList(MediaRequestField {
                        label: parts[0].to_string(),
                        field_id: parts[1].to_string(),
                        media_type: parts[2].to_string(),
                        quantity: ListQuantity::Flexible {
                            min_items,
                            max_items,
                        },
                        description: parts[4].to_string(),
                    }));
            }
        }
    }

    Ok(Some(config))
}

fn match_directive(line: &str) -> Option<(Directive, &str)> {
    DIRECTIVES
        .iter()
        .find_map(|(prefix, directive)| line.strip_prefix(prefix).map(|rest| (*directive, rest)))
}

fn split_args(rest: &str) -> Vec<&str> {
    rest.split('|').map(str::trim).collect()
}

/// Optional trailing argument; present only when non-empty after trimming.
fn optional_arg(parts: &[&str], index: usize) -> Option<String> {
    parts
        .get(index)
        .filter(|p| !p.is_empty())
        .map(|p| (*p).to_string())
}

fn parse_int(field: &str, value: &str, line: &str) -> CoreResult<u32> {
    value.parse::<u32>().map_err(|_| {
        CoreError::MarkerSyntax(format!("invalid {field} '{value}' in directive '{line}'"))
    })
}

/// Splits a `min-max` range argument into its two integer bounds.
fn parse_range(value: &str, line: &str) -> CoreResult<(u32, u32)> {
    let bounds: Vec<&str> = value.split('-').collect();
    if bounds.len() < 2 {
        return Err(CoreError::MarkerSyntax(format!(
            "invalid range '{value}' in directive '{line}'"
        )));
    }
    Ok((
        parse_int("range minimum", bounds[0], line)?,
        parse_int("range maximum", bounds[1], line)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_comment_yields_no_config() {
        assert_eq!(parse_marker("").unwrap(), None);
        assert_eq!(parse_marker("   \n \r\n ").unwrap(), None);
    }

    #[test]
    fn test_text_directive_with_placeholder() {
        let config = parse_marker("TEXT: Tagline | tagline | 60 | e.g., Go")
            .unwrap()
            .unwrap();
        assert_eq!(
            config.custom_inputs,
            vec![InputField::Text(TextField {
                label: "Tagline".to_string(),
                field_id: "tagline".to_string(),
                max_length: 60,
                placeholder: Some("e.g., Go".to_string()),
            })]
        );
        assert!(config.requires_input());
    }

    #[test]
    fn test_empty_placeholder_is_absent() {
        let config = parse_marker("TEXT: Headline | headline | 60 |")
            .unwrap()
            .unwrap();
        match &config.custom_inputs[0] {
            InputField::Text(field) => assert_eq!(field.placeholder, None),
            other => panic!("unexpected field: {other:?}"),
        }
    }

    #[test]
    fn test_textlist_flex_range() {
        let config = parse_marker("TEXTLIST-FLEX: Benefits|benefits|2-8|60")
            .unwrap()
            .unwrap();
        assert_eq!(
            config.custom_inputs,
            vec![InputField::TextList(TextListField {
                label: "Benefits".to_string(),
                field_id: "benefits".to_string(),
                quantity: ListQuantity::Flexible {
                    min_items: 2,
                    max_items: 8,
                },
                item_max_length: 60,
                placeholder: None,
            })]
        );
    }

    #[test]
    fn test_media_directives() {
        let text = "MEDIA-FIXED: Feature Icons | featureIcons | image | 3 | 3 icons\n\
                    MEDIA-FLEX: Client Logos | clientLogos | logo | 3-20 | Client logos (PNG)";
        let config = parse_marker(text).unwrap().unwrap();
        assert_eq!(config.custom_inputs.len(), 2);
        assert_eq!(
            config.custom_inputs[1],
            InputField::MediaRequestList(MediaRequestField {
                label: "Client Logos".to_string(),
                field_id: "clientLogos".to_string(),
                media_type: "logo".to_string(),
                quantity: ListQuantity::Flexible {
                    min_items: 3,
                    max_items: 20,
                },
                description: "Client logos (PNG)".to_string(),
            })
        );
    }

    #[test]
    fn test_no_input_forces_requires_input_false() {
        let config = parse_marker("NO-INPUT: true").unwrap().unwrap();
        assert!(config.custom_inputs.is_empty());
        assert!(!config.requires_input());

        // NO-INPUT wins even when inputs are declared.
        let config = parse_marker("TEXT: L | id | 10\nNO-INPUT: true")
            .unwrap()
            .unwrap();
        assert_eq!(config.custom_inputs.len(), 1);
        assert!(!config.requires_input());
    }

    #[test]
    fn test_theme_fields() {
        let config = parse_marker("THEME-NAME: Neon Nights\nTHEME-DESCRIPTION: Bold retro style")
            .unwrap()
            .unwrap();
        assert!(config.is_theme_preview());
        assert_eq!(config.theme_name.as_deref(), Some("Neon Nights"));
        assert_eq!(
            config.theme_description.as_deref(),
            Some("Bold retro style")
        );
        assert!(!config.requires_input());
    }

    #[test]
    fn test_unknown_lines_ignored() {
        let text = "FOO: bar\nTEXT: Label | id | 30\nrandom prose line";
        let config = parse_marker(text).unwrap().unwrap();
        assert_eq!(config.custom_inputs.len(), 1);
    }

    #[test]
    fn test_directive_prefix_is_case_sensitive() {
        let config = parse_marker("text: Label | id | 30").unwrap().unwrap();
        assert!(config.custom_inputs.is_empty());
    }

    #[test]
    fn test_directive_below_min_args_dropped_silently() {
        let config = parse_marker("TEXT: Label | id\nURL: only-label")
            .unwrap()
            .unwrap();
        assert!(config.custom_inputs.is_empty());
        assert!(!config.requires_input());
    }

    #[test]
    fn test_malformed_number_is_hard_failure() {
        let err = parse_marker("TEXT: L | id | abc").unwrap_err();
        assert!(matches!(err, CoreError::MarkerSyntax(_)));

        let err = parse_marker("TEXTLIST-FLEX: L | id | 2to8 | 60").unwrap_err();
        assert!(matches!(err, CoreError::MarkerSyntax(_)));
    }

    #[test]
    fn test_directive_order_preserved() {
        let text = "TEXTAREA: Body | body | 200\n\
                    DESCRIPTION: Fill in the fields.\n\
                    TEXT: Headline | headline | 60\n\
                    URL: Link | link";
        let config = parse_marker(text).unwrap().unwrap();
        let kinds: Vec<&str> = config
            .custom_inputs
            .iter()
            .map(|f| match f {
                InputField::Text(_) => "text",
                InputField::Textarea(_) => "textarea",
                InputField::Url(_) => "url",
                InputField::TextList(_) => "textList",
                InputField::MediaRequestList(_) => "mediaRequestList",
            })
            .collect();
        assert_eq!(kinds, vec!["textarea", "text", "url"]);
        assert_eq!(config.popup_message.as_deref(), Some("Fill in the fields."));
    }

    #[test]
    fn test_tier_and_overlay() {
        let config = parse_marker("OVERLAY: true\nTIER: Premium").unwrap().unwrap();
        assert!(config.is_overlay);
        assert_eq!(config.tier(), "Premium");

        let config = parse_marker("DESCRIPTION: x").unwrap().unwrap();
        assert_eq!(config.tier(), "Essential");
    }

    #[test]
    fn test_mixed_line_endings() {
        let config = parse_marker("TEXT: A | a | 10\r\nTEXT: B | b | 20\rTEXT: C | c | 30")
            .unwrap()
            .unwrap();
        assert_eq!(config.custom_inputs.len(), 3);
    }

    #[test]
    fn test_input_field_json_shape() {
        let field = InputField::TextList(TextListField {
            label: "Benefits".to_string(),
            field_id: "benefits".to_string(),
            quantity: ListQuantity::Flexible {
                min_items: 2,
                max_items: 8,
            },
            item_max_length: 60,
            placeholder: None,
        });
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["inputType"], "textList");
        assert_eq!(json["fieldId"], "benefits");
        assert_eq!(json["minItems"], 2);
        assert_eq!(json["maxItems"], 8);
        assert_eq!(json["itemMaxLength"], 60);
        assert!(json.get("placeholder").is_none());
        assert!(json.get("count").is_none());

        let back: InputField = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_fixed_list_json_shape() {
        let field = InputField::TextList(TextListField {
            label: "Feature Titles".to_string(),
            field_id: "featureTitles".to_string(),
            quantity: ListQuantity::Fixed { count: 3 },
            item_max_length: 40,
            placeholder: Some("e.g., Feature name".to_string()),
        });
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["count"], 3);
        assert!(json.get("minItems").is_none());
        assert_eq!(json["placeholder"], "e.g., Feature name");
    }
}
