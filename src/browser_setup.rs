//! Chromium discovery and launch.
//!
//! The browser is looked up in `CHROMIUM_PATH`, then in the usual install
//! locations, then on `PATH`. When none is found a managed Chromium is
//! downloaded into the user cache directory.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use chromiumoxide::Handler;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info, trace, warn};

use crate::utils::constants::CHROME_USER_AGENT;

/// Environment variable naming the browser executable to use
pub const CHROMIUM_PATH_VAR: &str = "CHROMIUM_PATH";

#[cfg(target_os = "windows")]
const INSTALL_PATHS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files\Chromium\Application\chrome.exe",
];

#[cfg(target_os = "macos")]
const INSTALL_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "~/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/opt/homebrew/bin/chromium",
];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const INSTALL_PATHS: &[&str] = &[
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/local/bin/chromium",
    "/snap/bin/chromium",
];

/// Executable names tried with `which`
const PATH_COMMANDS: [&str; 4] = ["chromium", "chromium-browser", "google-chrome", "chrome"];

/// Flags passed to every launch, besides the user agent
const LAUNCH_ARGS: &[&str] = &[
    "--disable-blink-features=AutomationControlled",
    "--disable-gpu",
    "--disable-infobars",
    "--disable-notifications",
    "--disable-extensions",
    "--disable-popup-blocking",
    "--no-first-run",
    "--no-default-browser-check",
    "--password-store=basic",
    "--use-mock-keychain",
    "--mute-audio",
];

/// A running browser plus everything that has to be released with it.
///
/// `shutdown()` closes Chrome and waits for the process. If the session is
/// dropped without it (early return, panic), `Drop` still stops the CDP
/// handler and removes the temporary profile; Chrome itself is killed when
/// the inner `Browser` drops.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    /// Profile dir created for this session; `None` once removed or when the
    /// caller supplied their own
    temp_profile: Option<PathBuf>,
}

impl BrowserSession {
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Close the browser, wait for it to exit, then clean up
    pub async fn shutdown(mut self) -> Result<()> {
        info!("Shutting down browser session");

        if let Err(e) = self.browser.close().await {
            warn!("Browser did not close cleanly: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Browser process did not exit cleanly: {e}");
        }

        self.handler.abort();
        // Chrome has released its files only after wait() returns
        self.remove_temp_profile();
        Ok(())
    }

    fn remove_temp_profile(&mut self) {
        let Some(path) = self.temp_profile.take() else {
            return;
        };
        debug!("Removing browser profile {}", path.display());
        if let Err(e) = std::fs::remove_dir_all(&path) {
            warn!("Could not remove browser profile {}: {e}", path.display());
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        if self.temp_profile.is_some() {
            warn!("BrowserSession dropped without shutdown; removing profile");
            self.remove_temp_profile();
        }
    }
}

/// Locate an installed Chrome/Chromium
pub async fn find_browser_executable() -> Result<PathBuf> {
    if let Some(path) = browser_from_env() {
        return Ok(path);
    }

    if let Some(path) = INSTALL_PATHS
        .iter()
        .filter_map(|candidate| expand_home(candidate))
        .find(|path| path.exists())
    {
        info!("Using browser at {}", path.display());
        return Ok(path);
    }

    if let Some(path) = browser_on_path() {
        info!("Using browser from PATH: {}", path.display());
        return Ok(path);
    }

    Err(anyhow::anyhow!("No Chrome/Chromium executable found"))
}

fn browser_from_env() -> Option<PathBuf> {
    let path = PathBuf::from(std::env::var_os(CHROMIUM_PATH_VAR)?);
    if path.exists() {
        info!("Using browser from {CHROMIUM_PATH_VAR}: {}", path.display());
        Some(path)
    } else {
        warn!(
            "{CHROMIUM_PATH_VAR} points to a missing file: {}",
            path.display()
        );
        None
    }
}

fn browser_on_path() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return None;
    }

    PATH_COMMANDS.iter().find_map(|cmd| {
        let output = Command::new("which").arg(cmd).output().ok()?;
        if !output.status.success() {
            return None;
        }
        let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!found.is_empty()).then(|| PathBuf::from(found))
    })
}

/// Resolve a leading `~/` against the home directory
fn expand_home(candidate: &str) -> Option<PathBuf> {
    match candidate.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(candidate)),
    }
}

fn managed_browser_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let fallback = std::env::temp_dir();
        warn!(
            "No user cache directory; keeping Chromium under {}",
            fallback.display()
        );
        fallback
    });
    base.join("socialscrape").join("chromium")
}

/// Download Chromium into the user cache directory and return the
/// executable path. Reuses an earlier download of the same revision.
pub async fn download_managed_browser() -> Result<PathBuf> {
    let install_dir = managed_browser_dir();
    info!("Fetching managed Chromium into {}", install_dir.display());

    std::fs::create_dir_all(&install_dir).with_context(|| {
        format!(
            "Failed to create browser cache directory {}",
            install_dir.display()
        )
    })?;

    let options = BrowserFetcherOptions::builder()
        .with_path(&install_dir)
        .build()
        .context("Failed to configure browser download")?;
    let revision = BrowserFetcher::new(options)
        .fetch()
        .await
        .context("Failed to download Chromium")?;

    debug!("Chromium revision unpacked at {}", revision.folder_path.display());
    Ok(revision.executable_path)
}

fn browser_config(headless: bool, executable: PathBuf, profile: &Path) -> Result<BrowserConfig> {
    let builder = BrowserConfigBuilder::default()
        .chrome_executable(executable)
        .user_data_dir(profile)
        .request_timeout(Duration::from_secs(30))
        .window_size(1920, 1080);

    let builder = if headless {
        builder.headless_mode(HeadlessMode::default())
    } else {
        builder.with_head()
    };

    LAUNCH_ARGS
        .iter()
        .fold(builder.arg(format!("--user-agent={CHROME_USER_AGENT}")), |b, arg| {
            b.arg(*arg)
        })
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid browser config: {e}"))
}

/// Drive the CDP connection until the browser goes away
fn spawn_handler(mut handler: Handler) -> JoinHandle<()> {
    task::spawn(async move {
        while let Some(event) = handler.next().await {
            let Err(e) = event else {
                continue;
            };
            let message = e.to_string();
            // chromiumoxide cannot decode some newer CDP messages
            if message.contains("data did not match any variant of untagged enum Message")
                || message.contains("Failed to deserialize WS response")
            {
                trace!("Ignoring undecodable CDP message: {message}");
            } else {
                error!("CDP handler error: {e:?}");
            }
        }
        debug!("CDP handler finished");
    })
}

/// Find or download Chrome/Chromium and launch it.
///
/// `chrome_data_dir` is used as the profile when given; otherwise a
/// per-process directory under the system temp dir is created and removed
/// again when the session ends.
pub async fn launch_browser(
    headless: bool,
    chrome_data_dir: Option<PathBuf>,
) -> Result<BrowserSession> {
    let executable = match find_browser_executable().await {
        Ok(path) => path,
        Err(e) => {
            warn!("{e}; downloading a managed Chromium");
            download_managed_browser().await?
        }
    };

    let (profile, temp_profile) = match chrome_data_dir {
        Some(dir) => (dir, None),
        None => {
            let dir =
                std::env::temp_dir().join(format!("socialscrape_chrome_{}", std::process::id()));
            (dir.clone(), Some(dir))
        }
    };
    std::fs::create_dir_all(&profile)
        .with_context(|| format!("Failed to create browser profile {}", profile.display()))?;

    let config = browser_config(headless, executable, &profile)?;

    info!("Launching browser (headless: {headless})");
    let (browser, handler) = Browser::launch(config)
        .await
        .context("Failed to launch browser")?;

    Ok(BrowserSession {
        browser,
        handler: spawn_handler(handler),
        temp_profile,
    })
}
