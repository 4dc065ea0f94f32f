//! Schedule scraper - business capability layer.
//!
//! Locates one sport's card, follows it to the schedule table and extracts
//! the event rows.

use chromiumoxide::Element;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::infrastructure::PortalPage;
use crate::models::EventDescriptor;
use crate::services::format::{clean_cell, strip_opponent_decoration};

/// Columns read from each schedule row. Fixed positions, no header-name
/// lookup: a portal column reorder breaks this, by design.
const COL_DATE: usize = 0;
const COL_RESULT: usize = 1;
const COL_OPPONENT: usize = 3;

/// Pick the card index for `sport` from the rendered headers.
///
/// An exact header match wins; otherwise the first header containing the
/// name is taken, so a sport whose name is a substring of another resolves
/// deterministically instead of depending on card order alone.
pub(crate) fn select_sport(headers: &[String], sport: &str) -> Option<usize> {
    if let Some(index) = headers.iter().position(|h| h == sport) {
        return Some(index);
    }
    headers.iter().position(|h| h.contains(sport))
}

/// Find the sport's card on the landing page.
async fn find_sport_card(page: &PortalPage, sport: &str) -> Result<Element> {
    let locators = page.locators();
    let cards = page.find_all(locators.sport_card).await?;

    let mut headers = Vec::with_capacity(cards.len());
    for card in &cards {
        let text = match card.find_element(locators.card_header).await {
            Ok(header) => header.inner_text().await?.unwrap_or_default(),
            Err(_) => String::new(),
        };
        headers.push(text.trim().to_string());
    }

    let index = select_sport(&headers, sport)
        .ok_or_else(|| AppError::SportNotFound(sport.to_string()))?;
    debug!("matched sport card {:?}", headers[index]);

    cards
        .into_iter()
        .nth(index)
        .ok_or_else(|| AppError::SportNotFound(sport.to_string()))
}

/// Navigate from the landing page into the sport's schedule and wait for the
/// table to render.
pub(crate) async fn open_sport_schedule(page: &PortalPage, sport: &str) -> Result<()> {
    let card = find_sport_card(page, sport).await?;
    let action = card
        .find_element(page.locators().card_primary_action)
        .await
        .map_err(|_| AppError::MarkupMissing(format!("schedule link on card {:?}", sport)))?;
    action.click().await?;
    page.settle().await?;
    page.wait_for(page.locators().schedule_table).await?;
    Ok(())
}

/// List the scheduled events for one sport, in table order.
pub async fn list_events(page: &PortalPage, sport: &str) -> Result<Vec<EventDescriptor>> {
    open_sport_schedule(page, sport).await?;

    let mut events = Vec::new();
    for row in page.find_all(page.locators().schedule_row).await? {
        let cells = row.find_elements(page.locators().row_cell).await?;
        if cells.len() <= COL_OPPONENT {
            // Spacer or malformed row.
            continue;
        }
        let date = clean_cell(&cell_text(&cells[COL_DATE]).await?);
        let result = clean_cell(&cell_text(&cells[COL_RESULT]).await?);
        let opponent = strip_opponent_decoration(&clean_cell(&cell_text(&cells[COL_OPPONENT]).await?));
        events.push(EventDescriptor {
            date,
            result,
            opponent,
        });
    }

    info!("✓ found {} scheduled events for {:?}", events.len(), sport);
    Ok(events)
}

async fn cell_text(cell: &Element) -> Result<String> {
    Ok(cell.inner_text().await?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_select_sport_prefers_exact_match() {
        let cards = headers(&["Boys Swimming and Diving", "Boys Swimming"]);
        assert_eq!(select_sport(&cards, "Boys Swimming"), Some(1));
    }

    #[test]
    fn test_select_sport_falls_back_to_first_substring() {
        let cards = headers(&["Announcements", "Girls Swimming", "Boys Swimming"]);
        assert_eq!(select_sport(&cards, "Swimming"), Some(1));
    }

    #[test]
    fn test_select_sport_none_when_absent() {
        let cards = headers(&["Girls Swimming"]);
        assert_eq!(select_sport(&cards, "Chess"), None);
    }
}
