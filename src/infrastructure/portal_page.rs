//! Page driver - infrastructure layer.
//!
//! Holds the one CDP page an automation call drives and exposes the
//! primitives the services build on: navigation, bounded element waits,
//! text- and label-based lookup, and fill/keystroke input. It knows nothing
//! about sports, schedules or races.

use std::time::Duration;

use chromiumoxide::{Element, Page};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::services::locators::Locators;

/// Poll step for bounded element waits.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Driver for one portal page.
pub struct PortalPage {
    page: Page,
    locators: Locators,
    element_timeout: Duration,
}

impl PortalPage {
    pub fn new(page: Page, locators: Locators, element_timeout: Duration) -> Self {
        Self {
            page,
            locators,
            element_timeout,
        }
    }

    pub fn locators(&self) -> &Locators {
        &self.locators
    }

    /// Navigate and wait for the load to settle.
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!("navigating to {}", url);
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    /// Wait for an in-flight navigation (e.g. after a click) to settle.
    pub async fn settle(&self) -> Result<()> {
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    /// Wait for `selector` to appear, bounded by the configured timeout.
    pub async fn wait_for(&self, selector: &str) -> Result<Element> {
        self.wait_for_within(selector, self.element_timeout).await
    }

    /// Wait for `selector` to appear within an explicit bound.
    pub async fn wait_for_within(&self, selector: &str, timeout: Duration) -> Result<Element> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(AppError::ElementWait {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// All current matches for `selector`; empty is a valid result.
    pub async fn find_all(&self, selector: &str) -> Result<Vec<Element>> {
        Ok(self.page.find_elements(selector).await?)
    }

    /// First page-level match for `selector` whose rendered text contains
    /// `text`.
    pub async fn find_by_text(&self, selector: &str, text: &str) -> Result<Element> {
        for element in self.page.find_elements(selector).await? {
            if let Ok(Some(rendered)) = element.inner_text().await {
                if rendered.contains(text) {
                    return Ok(element);
                }
            }
        }
        Err(AppError::MarkupMissing(format!(
            "{} containing {:?}",
            selector, text
        )))
    }

    /// First match for `selector` inside `scope` whose rendered text contains
    /// `text`.
    pub async fn find_in_by_text(
        &self,
        scope: &Element,
        selector: &str,
        text: &str,
    ) -> Result<Option<Element>> {
        for element in scope.find_elements(selector).await? {
            if let Ok(Some(rendered)) = element.inner_text().await {
                if rendered.contains(text) {
                    return Ok(Some(element));
                }
            }
        }
        Ok(None)
    }

    /// Resolve an input by its `<label>` text: the label's `for` target, or
    /// an input nested inside the label.
    pub async fn labeled_input(&self, label_text: &str) -> Result<Element> {
        for label in self.page.find_elements("label").await? {
            let Ok(Some(rendered)) = label.inner_text().await else {
                continue;
            };
            if rendered.trim() != label_text {
                continue;
            }
            if let Ok(Some(target)) = label.attribute("for").await {
                if !target.is_empty() {
                    return Ok(self.page.find_element(format!("#{}", target)).await?);
                }
            }
            if let Ok(input) = label.find_element("input").await {
                return Ok(input);
            }
        }
        Err(AppError::MarkupMissing(format!(
            "input labeled {:?}",
            label_text
        )))
    }

    /// Focus an input, clear any stale value, and type `value` with real key
    /// events.
    pub async fn fill(&self, input: &Element, value: &str) -> Result<()> {
        input.click().await?;
        input
            .call_js_fn("function() { this.value = ''; }", false)
            .await?;
        input.type_str(value).await?;
        Ok(())
    }
}
