//! Result submission engine - business capability layer.
//!
//! Drives the portal's multi-screen result-entry form for one event: locates
//! the event row, enters its results view, and writes each pending result
//! into the trailing empty lane card of its race section.
//!
//! Fatal conditions (sport/event not found, protocol errors) abort the call;
//! a lane whose save confirmation times out is logged, reported as a warning
//! and skipped past - an explicit degraded-continue policy. Nothing is rolled
//! back: submission is not transactional and a mid-loop fatal error leaves
//! already-saved lanes in place.

use chromiumoxide::Element;
use tokio::time::{sleep, Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::infrastructure::PortalPage;
use crate::models::{RaceResult, ResultItem};
use crate::services::format::{format_swim_time, format_swimmer_name};
use crate::services::schedule;

/// Poll step for the lane-save confirmation wait.
const CONFIRM_POLL: Duration = Duration::from_millis(250);

/// What one submission run did.
#[derive(Debug, Default)]
pub struct SubmissionReport {
    pub lanes_written: usize,
    /// Lanes whose new trailing empty card was observed after save.
    pub lanes_confirmed: usize,
    /// Non-fatal degradations, in occurrence order.
    pub warnings: Vec<String>,
}

/// True when every token of the requested date appears in the row's first
/// column.
pub(crate) fn event_row_matches(first_cell: &str, tokens: &[&str]) -> bool {
    !tokens.is_empty() && tokens.iter().all(|token| first_cell.contains(token))
}

/// Submit `results` for the event identified by `event_date` under `sport`.
///
/// Sections whose heading matches no entry in `results` are left completely
/// untouched; race names in `results` that the portal does not currently
/// render are skipped without error. Partial submission is an intended
/// capability. Success means the walk completed without a fatal error, not
/// that every lane's save was independently confirmed; unconfirmed lanes are
/// surfaced in the report's warnings.
pub async fn submit(
    page: &PortalPage,
    config: &Config,
    sport: &str,
    event_date: &str,
    results: &[RaceResult],
) -> Result<SubmissionReport> {
    schedule::open_sport_schedule(page, sport).await?;
    open_event_results(page, event_date).await?;

    let mut report = SubmissionReport::default();
    for section in page.find_all(page.locators().race_section).await? {
        let heading = match section.find_element(page.locators().race_heading).await {
            Ok(h) => h.inner_text().await?.unwrap_or_default().trim().to_string(),
            Err(_) => continue,
        };
        let Some(pending) = results.iter().find(|r| r.race.label() == heading) else {
            continue;
        };

        info!("filling {:?}: {} pending results", heading, pending.results.len());
        fill_section(page, config, &section, &heading, &pending.results, &mut report).await?;
    }

    info!(
        "✓ submission walk complete: {} lanes written, {} confirmed, {} warnings",
        report.lanes_written,
        report.lanes_confirmed,
        report.warnings.len()
    );
    Ok(report)
}

/// Locate the event's schedule row by date tokens and navigate into its
/// results view.
///
/// Every whitespace-separated token of `event_date` must be a substring of
/// the row's first column. No match is fatal and aborts before any lane is
/// written.
async fn open_event_results(page: &PortalPage, event_date: &str) -> Result<()> {
    let tokens: Vec<&str> = event_date.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(AppError::InvalidEventDate(event_date.to_string()));
    }

    let locators = page.locators();
    let mut edit_link = None;
    for row in page.find_all(locators.schedule_row).await? {
        let Ok(first) = row.find_element(locators.row_cell).await else {
            continue;
        };
        let cell = first.inner_text().await?.unwrap_or_default();
        if event_row_matches(&cell, &tokens) {
            edit_link = row.find_element(locators.row_edit_link).await.ok();
            break;
        }
    }
    let link = edit_link.ok_or_else(|| AppError::EventNotFound(event_date.to_string()))?;

    link.click().await?;
    page.settle().await?;
    debug!("on event edit page");

    page.wait_for(locators.results_nav).await?;
    let results_tab = page
        .find_by_text(locators.results_nav_link, locators.results_nav_text)
        .await?;
    results_tab.click().await?;
    page.settle().await?;
    debug!("on event results page");

    page.wait_for(locators.race_section).await?;
    Ok(())
}

/// Write each pending result into the section's trailing empty lane card, in
/// array order.
async fn fill_section(
    page: &PortalPage,
    config: &Config,
    section: &Element,
    heading: &str,
    results: &[ResultItem],
    report: &mut SubmissionReport,
) -> Result<()> {
    let locators = page.locators();

    for (index, item) in results.iter().enumerate() {
        // Re-read the live card list each pass so targeting stays aligned
        // even after an unconfirmed save.
        let lanes = section.find_elements(locators.lane_card).await?;
        let Some(last) = lanes.last() else {
            warn!("⚠️ {}: no lane cards rendered", heading);
            report.warnings.push(format!(
                "{}: no entry card rendered; {} entries not written",
                heading,
                results.len() - index
            ));
            break;
        };
        let count_before = lanes.len();

        let inputs = last.find_elements(locators.swimmer_input).await?;
        if inputs.len() != item.swimmers.len() {
            warn!(
                "⚠️ {} entry {}: {} name fields vs {} swimmers, skipping entry",
                heading,
                index + 1,
                inputs.len(),
                item.swimmers.len()
            );
            report.warnings.push(format!(
                "{} entry {}: portal renders {} name fields but {} swimmers were supplied; entry skipped",
                heading,
                index + 1,
                inputs.len(),
                item.swimmers.len()
            ));
            continue;
        }

        for (input, swimmer) in inputs.iter().zip(&item.swimmers) {
            let name = format_swimmer_name(swimmer);
            page.fill(input, &name).await?;
            // Accept the autocomplete's suggestion. The accepted value is not
            // re-read, so a mismatched suggestion goes unnoticed here.
            input.press_key("ArrowDown").await?;
            input.press_key("Enter").await?;
            debug!("{}: swimmer entered as {:?}", heading, name);
        }

        if !item.time.trim().is_empty() {
            if let Ok(time_input) = last.find_element(locators.time_input).await {
                let formatted = format_swim_time(&item.time, heading);
                page.fill(&time_input, &formatted).await?;
                debug!("{}: time {:?} -> {:?}", heading, item.time, formatted);
            }
        }

        if let Ok(place_input) = last.find_element(locators.place_input).await {
            page.fill(&place_input, &item.place.to_string()).await?;
        }

        let Some(save) = page
            .find_in_by_text(last, locators.save_button, locators.save_button_text)
            .await?
        else {
            warn!("⚠️ {} entry {}: no save button on card", heading, index + 1);
            report.warnings.push(format!(
                "{} entry {}: save button missing; entry not saved",
                heading,
                index + 1
            ));
            continue;
        };
        save.click().await?;
        report.lanes_written += 1;

        // The portal keeps one trailing empty card per section; a successful
        // save appends a fresh one. Verify the count actually grew instead of
        // assuming it.
        if confirm_lane_saved(section, locators.lane_card, count_before, config.confirm_timeout)
            .await?
        {
            report.lanes_confirmed += 1;
            debug!("{} entry {}: save confirmed", heading, index + 1);
        } else {
            warn!(
                "⚠️ {} entry {}: no new empty card within {:?}, continuing unconfirmed",
                heading,
                index + 1,
                config.confirm_timeout
            );
            sleep(config.confirm_fallback_delay).await;
            // One late re-count; a slow append still counts as confirmed.
            let count_after = section.find_elements(locators.lane_card).await?.len();
            if count_after > count_before {
                report.lanes_confirmed += 1;
                debug!("{} entry {}: save confirmed late", heading, index + 1);
            } else {
                report.warnings.push(format!(
                    "{} entry {}: save not confirmed within {:?}",
                    heading,
                    index + 1,
                    config.confirm_timeout
                ));
            }
        }
    }

    Ok(())
}

/// Wait for the section's lane-card count to grow past `count_before`,
/// bounded by `timeout`. Returns whether the new trailing card appeared.
async fn confirm_lane_saved(
    section: &Element,
    lane_selector: &str,
    count_before: usize,
    timeout: Duration,
) -> Result<bool> {
    let deadline = Instant::now() + timeout;
    loop {
        let count = section.find_elements(lane_selector).await?.len();
        if count > count_before {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        sleep(CONFIRM_POLL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_row_matches_both_tokens() {
        assert!(event_row_matches("12/4 4:00pm (Home)", &["12/4", "4:00pm"]));
        assert!(!event_row_matches("12/14 4:00pm", &["12/4", "3:00pm"]));
    }

    #[test]
    fn test_event_row_requires_every_token() {
        // "1/4" alone also matches an 11/4 row; the time token disambiguates.
        assert!(event_row_matches("11/4 4:00pm", &["1/4"]));
        assert!(!event_row_matches("11/4 4:00pm", &["1/4", "5:00pm"]));
    }

    #[test]
    fn test_event_row_rejects_empty_token_list() {
        assert!(!event_row_matches("12/4 4:00pm", &[]));
    }
}
