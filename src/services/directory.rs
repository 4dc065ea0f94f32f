//! Directory scraper - business capability layer.
//!
//! Lists the categories ("sports") visible to the authenticated account.

use tracing::info;

use crate::error::Result;
use crate::infrastructure::PortalPage;

/// Scrape the sport names from the landing page's category cards.
///
/// Only cards carrying a roster-style link count; header text is trimmed and
/// returned in encounter order. Zero matches is a valid empty result. The
/// order reflects current portal layout and is not stable across sessions.
pub async fn list_sports(page: &PortalPage) -> Result<Vec<String>> {
    let locators = page.locators();
    let mut sports = Vec::new();

    for card in page.find_all(locators.sport_card).await? {
        if card.find_element(locators.roster_link).await.is_err() {
            continue;
        }
        let Ok(header) = card.find_element(locators.card_header).await else {
            continue;
        };
        if let Some(name) = header.inner_text().await? {
            let name = name.trim().to_string();
            if !name.is_empty() {
                sports.push(name);
            }
        }
    }

    info!("✓ found {} sports", sports.len());
    Ok(sports)
}
