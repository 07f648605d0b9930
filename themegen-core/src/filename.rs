//! Clip filename grammar parser.
//!
//! Clip filenames follow a `category-order-Title` convention, e.g.
//! `hook-001-IntroSlide` or `features-benefits-003-ThreeFeatures`. The first
//! hyphen-separated part that parses as an integer is the order token; the
//! parts before it form the category and the parts after it form the title.

/// Result of parsing a clip filename stem.
///
/// Discarded after the corresponding clip record has been built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    pub category: String,
    pub category_order: u32,
    pub title: String,
}

/// Parses a clip filename stem into category, order, and display title.
///
/// Returns `None` when the stem does not follow the naming convention:
/// no integer token, the integer token in first position (empty category),
/// or nothing after the integer token (empty title). The category vocabulary
/// itself is not enforced.
pub fn parse_clip_filename(stem: &str) -> Option<ParsedFilename> {
    let parts: Vec<&str> = stem.split('-').collect();

    // The order token is the first part that parses as an integer; it must
    // not be the leading part.
    let order_index = parts.iter().position(|p| p.parse::<u32>().is_ok())?;
    if order_index == 0 {
        return None;
    }
    let order: u32 = parts[order_index].parse().ok()?;

    let category = parts[..order_index].join("-");
    let raw_title = parts[order_index + 1..].join(" ");
    if raw_title.is_empty() {
        return None;
    }

    Some(ParsedFilename {
        category,
        category_order: order,
        title: title_case(&raw_title),
    })
}

/// Title-cases a string: words are split on whitespace and on camel-case
/// boundaries (`IntroSlide` -> `Intro Slide`), then each word gets an
/// uppercase first letter with the remainder lowercased.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .flat_map(split_camel_boundaries)
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a single word at lowercase/digit -> uppercase transitions.
fn split_camel_boundaries(word: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_splittable = false;

    for ch in word.chars() {
        if ch.is_uppercase() && prev_splittable && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_splittable = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
