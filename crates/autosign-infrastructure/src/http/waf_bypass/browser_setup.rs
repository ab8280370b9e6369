use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use log::info;
use std::path::PathBuf;
use tokio::task::JoinHandle;

use crate::config::TimeoutConfig;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// One live browser session scoped to a single harvest call.
pub(super) struct BrowserSession {
    pub browser: Browser,
    pub handler_task: JoinHandle<()>,
    pub temp_dir: PathBuf,
}

/// Find an available Chromium-based browser on the system
pub(super) fn find_browser() -> Option<PathBuf> {
    let browser_paths = [
        // macOS
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        "/Applications/Brave Browser.app/Contents/MacOS/Brave Browser",
        "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        // Linux
        "/usr/bin/google-chrome",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/usr/bin/brave-browser",
        "/usr/bin/microsoft-edge",
        "/snap/bin/chromium",
        "/opt/google/chrome/chrome",
        "/opt/chromium/chromium",
    ];

    for path in browser_paths {
        let browser_path = PathBuf::from(path);
        if browser_path.exists() {
            return Some(browser_path);
        }
    }

    #[cfg(target_os = "windows")]
    {
        let windows_paths: Vec<String> = vec![
            r"C:\Program Files\Google\Chrome\Application\chrome.exe".to_string(),
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe".to_string(),
            format!(
                r"{}\Google\Chrome\Application\chrome.exe",
                std::env::var("LOCALAPPDATA").unwrap_or_default()
            ),
            r"C:\Program Files\Microsoft\Edge\Application\msedge.exe".to_string(),
            r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe".to_string(),
            r"C:\Program Files\BraveSoftware\Brave-Browser\Application\brave.exe".to_string(),
        ];

        for path_str in windows_paths {
            let browser_path = PathBuf::from(&path_str);
            if browser_path.exists() {
                return Some(browser_path);
            }
        }
    }

    None
}

/// Launch an isolated browser with a fresh profile directory.
pub(super) async fn launch_browser(account_name: &str, headless: bool) -> Result<BrowserSession> {
    // A unique profile directory per session avoids lock conflicts and keeps
    // cookie state from leaking between accounts.
    let temp_dir = std::env::temp_dir().join(format!("autosign-profile-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&temp_dir).context("Failed to create temp profile directory")?;

    let browser_path = find_browser().ok_or_else(|| {
        anyhow::anyhow!(
            "No Chromium-based browser found. Please install one of: Google Chrome, Chromium, Brave, or Microsoft Edge"
        )
    })?;

    info!(
        "[{}] Using browser at {:?} ({})",
        account_name,
        browser_path,
        if headless { "headless" } else { "headed" }
    );

    let mut builder = BrowserConfig::builder()
        .window_size(1920, 1080)
        .no_sandbox()
        .user_data_dir(&temp_dir)
        .chrome_executable(&browser_path)
        .arg(format!("--user-agent={}", USER_AGENT))
        .arg("--disable-blink-features=AutomationControlled");

    if !headless {
        builder = builder.with_head();
    }

    let config = builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {}", e))?;

    let timeouts = TimeoutConfig::global();
    let launch_result = tokio::time::timeout(timeouts.browser_launch, Browser::launch(config)).await;

    let (browser, mut handler) = match launch_result {
        Ok(Ok(browser_handler)) => browser_handler,
        Ok(Err(e)) => {
            let _ = std::fs::remove_dir_all(&temp_dir);
            anyhow::bail!("Failed to launch browser: {}", e);
        }
        Err(_) => {
            let _ = std::fs::remove_dir_all(&temp_dir);
            anyhow::bail!(
                "Browser launch timed out after {:?}",
                timeouts.browser_launch
            );
        }
    };

    info!("[{}] Browser launched", account_name);

    // The handler stream must be drained for the session to make progress.
    let handler_task = tokio::spawn(async move {
        while let Some(_event) = handler.next().await {}
    });

    Ok(BrowserSession {
        browser,
        handler_task,
        temp_dir,
    })
}
