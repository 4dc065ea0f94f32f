//! Session provider.
//!
//! Acquires one controllable browsing context per automation call. Two
//! strategies, selected by `Config::headless`:
//! - visible local browser for debugging
//! - headless with a pinned browser build fetched into a local cache first
//!
//! The caller owns the returned session and must close it on every exit
//! path; an unclosed session leaks a long-lived browser process.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, Result};

/// One controllable browsing context against the portal.
///
/// Owns the browser process, its event handler task and the single page the
/// automation drives.
pub struct PortalSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl PortalSession {
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Shut the browser down and stop the event handler.
    ///
    /// Errors here are logged, not propagated: release must succeed from the
    /// caller's point of view on every exit path.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            debug!("browser close: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("browser wait: {}", e);
        }
        self.handler_task.abort();
        debug!("session released");
    }
}

/// Acquire a fresh session using the strategy the config selects.
pub async fn acquire(config: &Config) -> Result<PortalSession> {
    let browser_config = if config.headless {
        let executable = fetch_pinned_browser(config).await?;
        BrowserConfig::builder()
            .new_headless_mode()
            .chrome_executable(executable)
            .args(vec![
                "--disable-gpu",
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--remote-debugging-port=0",
            ])
            .build()
            .map_err(AppError::SessionSetup)?
    } else {
        info!("🚀 launching visible local browser...");
        BrowserConfig::builder()
            .with_head()
            .args(vec!["--remote-debugging-port=0"])
            .build()
            .map_err(AppError::SessionSetup)?
    };

    let (mut browser, mut handler) = Browser::launch(browser_config).await?;
    debug!("browser launched");

    // Drain browser events in the background until the browser goes away.
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    // Short delay to let the browser state sync before the first command.
    sleep(Duration::from_millis(300)).await;

    let page = match browser.new_page("about:blank").await {
        Ok(page) => page,
        Err(e) => {
            warn!("page creation failed, releasing browser: {}", e);
            let _ = browser.close().await;
            let _ = browser.wait().await;
            handler_task.abort();
            return Err(e.into());
        }
    };

    Ok(PortalSession {
        browser,
        page,
        handler_task,
    })
}

/// Download the pinned browser build into the cache directory and return its
/// executable path. Fetch failure is fatal and unrecoverable for the call.
async fn fetch_pinned_browser(config: &Config) -> Result<PathBuf> {
    let cache_dir = PathBuf::from(&config.browser_cache_dir);
    tokio::fs::create_dir_all(&cache_dir).await?;

    let mut options = BrowserFetcherOptions::builder().with_path(&cache_dir);
    if let Some(revision) = config.browser_revision {
        options = options.with_revision(revision);
    }
    let options = options
        .build()
        .map_err(|e| AppError::SessionSetup(e.to_string()))?;

    info!("📦 fetching pinned browser build into {:?}...", cache_dir);
    let fetcher = BrowserFetcher::new(options);
    let fetched = fetcher.fetch().await.map_err(AppError::BrowserFetch)?;
    info!("✓ browser build ready: {:?}", fetched.executable_path);

    Ok(fetched.executable_path)
}
