use crate::{annotate::{AnnotationReport, AnnotationRequest, Annotator, PinRecord},
            browser::{config::{ConnectionOptions, LaunchOptions},
                      page::{PageEdit, apply_edits_script}},
            dom::DomTree,
            error::{MapsError, Result},
            message,
            tools::{ToolContext, ToolRegistry, ToolResult}};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

const OUTER_HTML_JS: &str = "document.documentElement.outerHTML";

/// Browser session that annotates the pages open in a Chrome/Chromium instance.
///
/// Pages are snapshotted into a [`DomTree`] and annotated in Rust. Only the pins are then
/// replayed in the page, by splitting the same text nodes, so every other node keeps its
/// identity, listeners and framework bindings.
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    annotator: Annotator,

    /// Tool registry for message dispatch
    tool_registry: ToolRegistry,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Keep the browser alive while the user reads the annotated page
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| MapsError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| MapsError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self::from_browser(browser))
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect(options.ws_url).map_err(|e| MapsError::ConnectionFailed(e.to_string()))?;

        Ok(Self::from_browser(browser))
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    fn from_browser(browser: Browser) -> Self {
        Self {
            browser,
            annotator: Annotator::default(),
            tool_registry: ToolRegistry::with_defaults(),
        }
    }

    /// Builder method: use a custom annotator
    pub fn with_annotator(mut self, annotator: Annotator) -> Self {
        self.annotator = annotator;
        self
    }

    pub fn annotator(&self) -> &Annotator {
        &self.annotator
    }

    /// Get the active tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        self.get_active_tab()
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| MapsError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking the document visibility and focus state
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        // Visible and focused wins; visible alone is the fallback
        for condition in [
            "document.visibilityState === 'visible' && document.hasFocus()",
            "document.visibilityState === 'visible'",
        ] {
            for tab in &tabs {
                match tab.evaluate(condition, false) {
                    Ok(remote_object) => {
                        if remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                    Err(e) => {
                        log::debug!("Failed to check tab status: {}", e);
                    }
                }
            }
        }

        // A single background tab is still the only candidate
        match tabs.as_slice() {
            [only] => Ok(only.clone()),
            _ => Err(MapsError::TabOperationFailed("No active tab found".to_string())),
        }
    }

    /// Navigate to a URL using the active tab
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| MapsError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| MapsError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Snapshot the active tab's document
    pub fn document(&self) -> Result<DomTree> {
        let result = self
            .tab()?
            .evaluate(OUTER_HTML_JS, false)
            .map_err(|e| MapsError::EvaluationFailed(e.to_string()))?;

        let html = result
            .value
            .as_ref()
            .and_then(|value| value.as_str())
            .ok_or_else(|| MapsError::EvaluationFailed("No HTML returned from page".to_string()))?;

        Ok(DomTree::parse_document(html))
    }

    /// Insert `pins` into the active tab, returning how many landed.
    ///
    /// A pin whose text node changed since the snapshot is skipped.
    pub fn apply_pins(&self, pins: &[PinRecord]) -> Result<usize> {
        let glyph = &self.annotator.options().pin_glyph;
        let edits: Vec<PageEdit> = pins.iter().map(|record| PageEdit::new(record, glyph)).collect();
        let js = apply_edits_script(&edits)?;

        let result = self
            .tab()?
            .evaluate(&js, false)
            .map_err(|e| MapsError::EvaluationFailed(e.to_string()))?;

        let applied = result.value.and_then(|value| value.as_u64()).unwrap_or(0) as usize;
        if applied < pins.len() {
            log::warn!("Applied {} of {} pins, the page changed since the snapshot", applied, pins.len());
        }

        Ok(applied)
    }

    /// Annotate the active tab, inserting any pins the pass added
    pub fn annotate_page(&self, request: &AnnotationRequest) -> Result<AnnotationReport> {
        let mut document = self.document()?;
        let report = self.annotator.annotate(&mut document, request);

        if report.pin_count() > 0 {
            self.apply_pins(&report.pins)?;
        } else {
            log::info!("No pins added, page left untouched");
        }

        Ok(report)
    }

    /// Get the tool registry
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Execute a tool by name against the active tab
    pub fn execute_tool(&self, name: &str, params: serde_json::Value) -> Result<ToolResult> {
        let mut document = self.document()?;
        let mut context = ToolContext::new(&mut document, &self.annotator);
        let result = self.tool_registry.execute(name, params, &mut context)?;

        if !context.pins.is_empty() {
            self.apply_pins(&context.pins)?;
        }

        Ok(result)
    }

    /// Handle a raw extension message against the active tab
    pub fn dispatch_message(&self, raw: &str) -> Result<ToolResult> {
        let message = message::Message::parse(raw)?;
        self.execute_tool(&message.action, serde_json::Value::Object(message.payload))
    }
}
