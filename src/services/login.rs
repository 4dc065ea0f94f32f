//! Authentication stage - business capability layer.
//!
//! Logs one session into the portal. The portal offers no login API, so this
//! drives the login form and infers success from a post-login marker.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::infrastructure::PortalPage;
use crate::models::Credentials;

/// Authenticate the session's page against the portal.
///
/// Navigates to the entry URL, fills the labeled username/password inputs,
/// submits, and waits (bounded) for the post-login marker. Marker absence is
/// reported as a single undifferentiated authentication failure: bad
/// credentials, changed markup and a slow network are indistinguishable from
/// here.
pub async fn authenticate(page: &PortalPage, config: &Config, credentials: &Credentials) -> Result<()> {
    info!("logging in to {}", config.portal_url);
    page.goto(&config.portal_url).await?;

    let username = page.labeled_input(page.locators().username_label).await?;
    page.fill(&username, &credentials.username).await?;
    let password = page.labeled_input(page.locators().password_label).await?;
    page.fill(&password, &credentials.password).await?;
    debug!("credentials entered for {}", credentials.username);

    let login = page
        .find_by_text(page.locators().login_button, page.locators().login_button_text)
        .await?;
    login.click().await?;
    page.settle().await?;

    page.wait_for(page.locators().post_login_marker)
        .await
        .map_err(|e| match e {
            AppError::ElementWait { timeout, .. } => AppError::AuthenticationFailed { timeout },
            other => other,
        })?;

    info!("✓ login confirmed");
    Ok(())
}
