use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::types::{ExtractOutcome, LeafletRecord, SkippedItem};
use crate::validity::{ValidityError, parse_validity};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Missing required field: {0}")]
    MissingField(String),
    #[error("Failed to parse validity: {0}")]
    Validity(#[from] ValidityError),
}

static SEL_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".grid-item").expect("invalid selector: item"));
static SEL_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".grid-item-content").expect("invalid selector: title"));
static SEL_THUMBNAIL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".img-container img").expect("invalid selector: thumbnail"));
static SEL_LOGO: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lazyloadLogo").expect("invalid selector: logo"));
static SEL_VALIDITY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".hidden-sm").expect("invalid selector: validity"));

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first descendant of `node` matching `selector`.
pub fn find_text(node: ElementRef, selector: &Selector) -> Option<String> {
    node.select(selector).next().map(elem_text)
}

/// Value of `attr` on the first descendant of `node` matching `selector`.
/// Empty values count as absent.
pub fn find_attr(node: ElementRef, selector: &Selector, attr: &str) -> Option<String> {
    node.select(selector)
        .next()
        .and_then(|elem| elem.value().attr(attr))
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

/// Drops the leading "Logo" label from an image alt text.
fn shop_name_from_alt(alt: &str) -> String {
    alt.split(' ').skip(1).collect::<Vec<_>>().join(" ")
}

fn parse_leaflet(item: ElementRef, parsed_time: &str) -> Result<LeafletRecord, ParseError> {
    let title = find_text(item, &SEL_TITLE)
        .map(|text| normalize_whitespace(&text))
        .ok_or_else(|| ParseError::MissingField("title (.grid-item-content)".to_string()))?;

    // Lazy-loaded thumbnails only carry the URL in data-src.
    let thumbnail = find_attr(item, &SEL_THUMBNAIL, "src")
        .or_else(|| find_attr(item, &SEL_THUMBNAIL, "data-src"))
        .ok_or_else(|| {
            ParseError::MissingField("thumbnail (.img-container img src/data-src)".to_string())
        })?;

    let alt = item
        .select(&SEL_LOGO)
        .next()
        .and_then(|elem| elem.value().attr("alt"))
        .ok_or_else(|| ParseError::MissingField("shop name (.lazyloadLogo alt)".to_string()))?;
    let shop_name = shop_name_from_alt(alt);

    let validity = find_text(item, &SEL_VALIDITY)
        .ok_or_else(|| ParseError::MissingField("validity (.hidden-sm)".to_string()))?;
    let (valid_from, valid_to) = parse_validity(&validity)?;

    Ok(LeafletRecord {
        title,
        thumbnail,
        shop_name,
        valid_from,
        valid_to,
        parsed_time: parsed_time.to_string(),
    })
}

/// Extracts every grid item of `document`. Items that fail are logged and
/// reported in [`ExtractOutcome::skipped`] without affecting their siblings.
pub fn extract_leaflets(document: &Html, parsed_time: &str) -> ExtractOutcome {
    let mut outcome = ExtractOutcome::default();

    for (index, item) in document.select(&SEL_ITEM).enumerate() {
        match parse_leaflet(item, parsed_time) {
            Ok(record) => {
                log::debug!("Parsed {}", record);
                outcome.records.push(record);
            }
            Err(error) => {
                let skipped = SkippedItem { index, error };
                log::warn!("Failed to parse {}", skipped);
                outcome.skipped.push(skipped);
            }
        }
    }

    log::debug!(
        "Extracted {} leaflet(s), skipped {}",
        outcome.records.len(),
        outcome.skipped.len()
    );

    outcome
}

/// Parses raw markup into leaflet records. `None` means the fetch produced
/// no document and yields an empty outcome.
pub fn parse_leaflets(html: Option<&str>, parsed_time: &str) -> ExtractOutcome {
    match html {
        Some(html) => extract_leaflets(&Html::parse_document(html), parsed_time),
        None => {
            log::info!("No document to parse");
            ExtractOutcome::default()
        }
    }
}
