//! Command implementations.
//!
//! Each command returns plain data; printing lives in the binary.

use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use site_a11y::{Key, KeyAction, KeyPress};
use site_forms::{
    FieldKind, FieldSpec, FormController, FormEvent, FormPayload, SubmitError, SubmitOutcome,
    SubmitRequest, ValidationResult, format_phone, validate,
};
use site_runtime::{PageLayout, RenderUpdate, SiteConfig, SiteRuntime, VisibilitySnapshot};
use site_theme::{FileStore, MemoryStore, PreferenceStore, Theme, ThemePreference};
use site_timing::ManualScheduler;
use site_viewport::{ScrollState, Section, current_section, scroll_progress};

// =============================================================================
// VALIDATION AND FORMATTING
// =============================================================================

/// One validated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRow {
    pub value: String,
    pub result: ValidationResult,
}

/// Validate `values` as fields of `kind`.
pub fn validate_values(kind: FieldKind, required: bool, values: &[String]) -> Vec<ValidationRow> {
    values
        .iter()
        .map(|value| {
            let field = FieldSpec::new(kind.label(), kind, required).with_value(value.as_str());
            ValidationRow {
                value: value.clone(),
                result: validate(&field),
            }
        })
        .collect()
}

/// `(raw, formatted)` for each input.
pub fn format_phones(values: &[String]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|raw| (raw.clone(), format_phone(raw)))
        .collect()
}

// =============================================================================
// VIEWPORT
// =============================================================================

/// Active section at one scroll position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionRow {
    pub position: f64,
    pub section: Option<String>,
}

/// Read a JSON array of sections.
pub fn load_sections(path: &Path) -> Result<Vec<Section>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read sections file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse sections file {}", path.display()))
}

pub fn locate_sections(sections: &[Section], offset: f64, positions: &[f64]) -> Vec<SectionRow> {
    positions
        .iter()
        .map(|&position| SectionRow {
            position,
            section: current_section(sections, position, offset).map(str::to_string),
        })
        .collect()
}

pub fn progress(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    scroll_progress(scroll_top, document_height, viewport_height)
}

// =============================================================================
// THEME
// =============================================================================

/// Open the theme store at `path`, or the platform default.
pub fn theme_store(path: Option<&Path>) -> FileStore {
    path.map_or_else(FileStore::open_default, FileStore::new)
}

pub fn theme_show<S: PreferenceStore>(store: S) -> Theme {
    ThemePreference::load(store).theme()
}

pub fn theme_toggle<S: PreferenceStore>(store: S) -> Result<Theme> {
    let mut preference = ThemePreference::load(store);
    preference.toggle().map_err(|err| {
        let message = err.user_message();
        anyhow::Error::new(err).context(message)
    })
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// How the simulated endpoint answers.
#[derive(Debug, Clone, Default)]
pub struct SimulatedEndpoint {
    /// Reject with this reason instead of accepting.
    pub reject: Option<String>,
    /// Time the endpoint takes to answer.
    pub latency: Duration,
}

/// Outcome and rendered events of a simulated submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitReport {
    pub delivered: bool,
    pub outcome: String,
    pub events: Vec<FormEvent>,
}

/// Read a JSON object of field name to value.
pub fn load_payload(path: &Path) -> Result<FormPayload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse form file {}", path.display()))
}

/// Fill the contact form from `payload` and submit it to a simulated endpoint.
pub async fn simulate_submit(payload: &FormPayload, endpoint: &SimulatedEndpoint) -> SubmitReport {
    let mut form = FormController::contact_form();
    for (name, value) in payload {
        form.input(name, value);
    }
    form.take_events();

    let operation = |_payload: FormPayload| {
        let reject = endpoint.reject.clone();
        let latency = endpoint.latency;
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            match reject {
                Some(reason) => Err(SubmitError::rejected(reason)),
                None => Ok(()),
            }
        }
    };

    let result = form.submit(&operation).await;
    let delivered = result == SubmitOutcome::Delivered;
    let outcome = match result {
        SubmitOutcome::Ignored => "ignored".to_string(),
        SubmitOutcome::Invalid(errors) => format!("invalid ({} fields)", errors.len()),
        SubmitOutcome::Delivered => "delivered".to_string(),
        SubmitOutcome::Failed(err) => format!("failed: {err}"),
    };
    SubmitReport {
        delivered,
        outcome,
        events: form.take_events(),
    }
}

// =============================================================================
// REPLAY
// =============================================================================

/// A recorded page session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub layout: PageLayout,
    /// Stored theme value at page load.
    #[serde(default)]
    pub stored_theme: Option<String>,
    pub events: Vec<TimedEvent>,
    /// Advance the clock to this time after the last event.
    #[serde(default)]
    pub end_ms: Option<u64>,
}

/// An event at a point in time, in milliseconds since page load.
#[derive(Debug, Clone, Deserialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: PageEvent,
}

/// Host events a script can replay.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    Scroll {
        scroll_top: f64,
        viewport_height: f64,
        document_height: f64,
    },
    Resize {
        width: f64,
    },
    Visibility(VisibilitySnapshot),
    AnchorClick {
        target_top: Option<f64>,
        page_offset: f64,
    },
    ToggleMenu,
    BackToTop,
    Input {
        field: String,
        value: String,
    },
    Blur {
        field: String,
    },
    /// Submit and settle immediately; `reject` makes the endpoint fail.
    Submit {
        #[serde(default)]
        reject: Option<String>,
    },
    Key {
        key: String,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        active: Option<usize>,
    },
    SkipLinkFocus {
        focused: bool,
    },
    ToggleTheme,
}

/// Updates rendered at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayFrame {
    pub at_ms: u64,
    pub updates: Vec<RenderUpdate>,
}

/// Read a replay script from JSON.
pub fn load_script(path: &Path) -> Result<ReplayScript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read replay script {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse replay script {}", path.display()))
}

/// Run a script against a fresh page on a virtual clock.
///
/// Events must be in time order. Theme changes stay in memory.
pub fn replay(script: ReplayScript, config: SiteConfig) -> Result<Vec<ReplayFrame>> {
    let scheduler = Rc::new(ManualScheduler::new());
    let store = match &script.stored_theme {
        Some(value) => MemoryStore::with_value(site_theme::THEME_KEY, value.as_str()),
        None => MemoryStore::new(),
    };
    let mut page = SiteRuntime::new(config, Rc::clone(&scheduler), store, script.layout);

    let mut frames = vec![ReplayFrame {
        at_ms: 0,
        updates: page.drain_updates(),
    }];
    let mut now = 0u64;

    for timed in script.events {
        anyhow::ensure!(
            timed.at_ms >= now,
            "replay events out of order: {}ms after {}ms",
            timed.at_ms,
            now
        );
        advance_to(&scheduler, &mut page, &mut frames, &mut now, timed.at_ms);
        apply(&mut page, timed.event);
        push_frame(&mut frames, now, page.drain_updates());
    }

    if let Some(end) = script.end_ms.filter(|end| *end > now) {
        advance_to(&scheduler, &mut page, &mut frames, &mut now, end);
    }

    tracing::info!(frames = frames.len(), "Replay finished");
    Ok(frames)
}

fn advance_to(
    scheduler: &ManualScheduler,
    page: &mut SiteRuntime<ManualScheduler, MemoryStore>,
    frames: &mut Vec<ReplayFrame>,
    now: &mut u64,
    target: u64,
) {
    scheduler.advance(Duration::from_millis(target - *now));
    *now = target;
    push_frame(frames, target, page.drain_updates());
}

fn push_frame(frames: &mut Vec<ReplayFrame>, at_ms: u64, updates: Vec<RenderUpdate>) {
    if updates.is_empty() {
        return;
    }
    match frames.last_mut() {
        Some(last) if last.at_ms == at_ms => last.updates.extend(updates),
        _ => frames.push(ReplayFrame { at_ms, updates }),
    }
}

fn apply(page: &mut SiteRuntime<ManualScheduler, MemoryStore>, event: PageEvent) {
    match event {
        PageEvent::Scroll {
            scroll_top,
            viewport_height,
            document_height,
        } => page.on_scroll(ScrollState::new(scroll_top, viewport_height, document_height)),
        PageEvent::Resize { width } => page.on_resize(width),
        PageEvent::Visibility(snapshot) => page.on_visibility(&snapshot),
        PageEvent::AnchorClick {
            target_top,
            page_offset,
        } => page.on_anchor_click(target_top, page_offset),
        PageEvent::ToggleMenu => page.toggle_menu(),
        PageEvent::BackToTop => page.back_to_top(),
        PageEvent::Input { field, value } => page.on_input(&field, &value),
        PageEvent::Blur { field } => page.on_blur(&field),
        PageEvent::Submit { reject } => {
            if let SubmitRequest::Ready(_) = page.request_submit() {
                page.complete_submit(match reject {
                    Some(reason) => Err(SubmitError::rejected(reason)),
                    None => Ok(()),
                });
            }
        }
        PageEvent::Key { key, shift, active } => {
            let mut press = KeyPress::new(Key::from_dom(&key));
            if shift {
                press = press.with_shift();
            }
            let action = page.on_key(&press, active);
            if action == KeyAction::Ignored {
                tracing::debug!(key, "Key press ignored");
            }
        }
        PageEvent::SkipLinkFocus { focused } => page.on_skip_link_focus(focused),
        PageEvent::ToggleTheme => {
            if let Err(err) = page.toggle_theme() {
                tracing::warn!(error = %err, "Theme toggle failed during replay");
            }
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// The configuration in effect: the file at `path`, or the defaults.
pub fn effective_config(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::load(path).map_err(|err| {
            let message = err.user_message();
            anyhow::Error::new(err).context(message)
        }),
        None => Ok(SiteConfig::default()),
    }
}
