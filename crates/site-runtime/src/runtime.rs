//! The page: event wiring between the host and the behavior crates.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use site_a11y::{
    Key, KeyAction, KeyPress, Modal, SkipLink, aria_label_for, card_role, handle_key,
};
use site_forms::{
    FieldSpec, FormController, FormEvent, SubmitError, SubmitOperation, SubmitOutcome,
    SubmitRequest,
};
use site_theme::{PreferenceStore, StoreError, Theme, ThemePreference};
use site_timing::{Debounced, Scheduler, Throttled, debounce, throttle};
use site_viewport::{
    ActiveSectionTracker, AnchorNavigation, CounterAnimation, DeviceClass, LazyImageLoader,
    MobileMenu, RevealObserver, ScrollState, Typewriter, active_link, back_to_top_visible,
    loading_attribute, parallax_offset,
};

use crate::config::SiteConfig;
use crate::layout::{PageLayout, VisibilitySnapshot};
use crate::update::RenderUpdate;

type Updates = Rc<RefCell<Vec<RenderUpdate>>>;

/// Composition root for one page.
///
/// The host forwards raw events (scroll, resize, visibility, input, keys,
/// clicks) and periodically drains [`RenderUpdate`]s. Scroll-driven work runs
/// through throttles and resize through a debounce, all timed by the injected
/// scheduler.
pub struct SiteRuntime<S: Scheduler + 'static, P: PreferenceStore> {
    config: SiteConfig,
    scheduler: Rc<S>,
    updates: Updates,
    tracker: Rc<RefCell<ActiveSectionTracker>>,
    nav: Throttled<f64, Rc<S>>,
    indicator: Throttled<ScrollState, Rc<S>>,
    back_to_top: Throttled<f64, Rc<S>>,
    parallax: Option<Throttled<f64, Rc<S>>>,
    resize: Debounced<f64, Rc<S>>,
    anchors: AnchorNavigation,
    menu: MobileMenu,
    reveal: RevealObserver,
    images: LazyImageLoader,
    counters: Vec<Option<CounterAnimation>>,
    typing: Vec<Option<Typewriter>>,
    form: FormController,
    theme: ThemePreference<P>,
    skip_link: SkipLink,
    modal: Option<Modal>,
}

impl<S: Scheduler + 'static, P: PreferenceStore> SiteRuntime<S, P> {
    /// Build the page and load the stored theme.
    pub fn new(config: SiteConfig, scheduler: Rc<S>, store: P, layout: PageLayout) -> Self {
        let updates: Updates = Rc::new(RefCell::new(Vec::new()));
        let markup = markup_updates(&layout);
        let form = contact_form(&layout).with_labels(config.submit_labels());
        let section_count = layout.sections.len();
        let tracker = Rc::new(RefCell::new(ActiveSectionTracker::new(
            config.active_section_offset(),
        )));

        let nav = {
            let tracker = Rc::clone(&tracker);
            let updates = Rc::clone(&updates);
            let sections = layout.sections;
            let links = layout.nav_links;
            throttle(Rc::clone(&scheduler), config.nav_throttle(), move |scroll_top: f64| {
                let Some(section) = tracker.borrow_mut().update(&sections, scroll_top) else {
                    return;
                };
                let hrefs: Vec<&str> = links.iter().map(String::as_str).collect();
                let link = active_link(&hrefs, section.as_deref()).map(str::to_string);
                updates
                    .borrow_mut()
                    .push(RenderUpdate::ActiveSection { section, link });
            })
        };

        let indicator = {
            let updates = Rc::clone(&updates);
            throttle(
                Rc::clone(&scheduler),
                config.indicator_throttle(),
                move |state: ScrollState| {
                    updates.borrow_mut().push(RenderUpdate::ScrollProgress {
                        percent: state.progress(),
                    });
                },
            )
        };

        let back_to_top = {
            let updates = Rc::clone(&updates);
            let threshold = config.back_to_top_threshold;
            let mut shown = false;
            throttle(
                Rc::clone(&scheduler),
                config.back_to_top_throttle(),
                move |scroll_top: f64| {
                    let visible = back_to_top_visible(scroll_top, threshold);
                    if visible != shown {
                        shown = visible;
                        updates.borrow_mut().push(RenderUpdate::BackToTop { visible });
                    }
                },
            )
        };

        let parallax = layout.parallax.then(|| {
            let updates = Rc::clone(&updates);
            throttle(
                Rc::clone(&scheduler),
                config.parallax_throttle(),
                move |scrolled: f64| {
                    updates.borrow_mut().push(RenderUpdate::Parallax {
                        offset: parallax_offset(scrolled),
                    });
                },
            )
        });

        let resize = {
            let updates = Rc::clone(&updates);
            let mut current: Option<DeviceClass> = None;
            debounce(Rc::clone(&scheduler), config.debounce_delay(), move |width: f64| {
                let class = DeviceClass::for_width(width);
                if current != Some(class) {
                    current = Some(class);
                    updates.borrow_mut().push(RenderUpdate::DeviceClass { class });
                }
            })
        };

        let counters = layout
            .counters
            .iter()
            .map(|raw| {
                let animation = CounterAnimation::from_attribute(
                    raw,
                    config.counter_duration(),
                    config.counter_frame(),
                );
                if animation.is_none() {
                    tracing::warn!(value = %raw, "Ignoring counter with a non-numeric target");
                }
                animation
            })
            .collect();
        let typing = layout
            .typing
            .iter()
            .map(|element| Some(Typewriter::new(&element.text, element.speed.as_deref())))
            .collect();

        let theme = ThemePreference::load(store);
        updates
            .borrow_mut()
            .push(RenderUpdate::theme(theme.theme()));
        updates.borrow_mut().extend(markup);

        tracing::info!(
            sections = section_count,
            reveal = layout.reveal_elements,
            images = layout.lazy_images.len(),
            "Site runtime initialized"
        );

        Self {
            anchors: AnchorNavigation::new(config.scroll_offset),
            reveal: RevealObserver::new(layout.reveal_elements, config.reveal_stagger()),
            images: LazyImageLoader::new(layout.lazy_images),
            config,
            scheduler,
            updates,
            tracker,
            nav,
            indicator,
            back_to_top,
            parallax,
            resize,
            menu: MobileMenu::new(),
            counters,
            typing,
            form,
            theme,
            skip_link: SkipLink::default(),
            modal: None,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Take every update produced since the last drain, in event order.
    pub fn drain_updates(&mut self) -> Vec<RenderUpdate> {
        // Left behind by a dropped `submit` future.
        self.flush_form_events();
        std::mem::take(&mut *self.updates.borrow_mut())
    }

    // =========================================================================
    // SCROLL AND LAYOUT
    // =========================================================================

    /// A scroll event.
    pub fn on_scroll(&mut self, state: ScrollState) {
        self.nav.call(state.scroll_top);
        self.indicator.call(state);
        self.back_to_top.call(state.scroll_top);
        if let Some(parallax) = &self.parallax {
            parallax.call(state.scroll_top);
        }
    }

    /// A resize event, with the new viewport width.
    pub fn on_resize(&mut self, width: f64) {
        self.resize.call(width);
    }

    /// The active section id.
    pub fn active_section(&self) -> Option<String> {
        self.tracker.borrow().current().map(str::to_string)
    }

    /// An in-page anchor was clicked. `target_top` is the target's
    /// viewport-relative top, `None` if the target does not exist.
    pub fn on_anchor_click(&mut self, target_top: Option<f64>, page_offset: f64) {
        let Some(scroll) = self.anchors.click(target_top, page_offset, &mut self.menu) else {
            return;
        };
        let mut updates = self.updates.borrow_mut();
        updates.push(RenderUpdate::ScrollTo {
            top: scroll.top,
            duration_ms: duration_ms(self.config.animation_duration()),
        });
        if scroll.collapsed_menu {
            updates.push(RenderUpdate::MobileMenu { expanded: false });
        }
    }

    /// The navbar toggler was pressed.
    pub fn toggle_menu(&mut self) {
        let expanded = self.menu.toggle();
        self.push(RenderUpdate::MobileMenu { expanded });
    }

    /// The back-to-top button was pressed.
    pub fn back_to_top(&mut self) {
        self.push(RenderUpdate::ScrollTo {
            top: 0.0,
            duration_ms: duration_ms(self.config.animation_duration()),
        });
    }

    // =========================================================================
    // VISIBILITY
    // =========================================================================

    /// Intersection results for observed elements.
    pub fn on_visibility(&mut self, snapshot: &VisibilitySnapshot) {
        let viewport = snapshot.viewport;

        for index in self.reveal.update(&snapshot.reveal, viewport) {
            let delay_ms = duration_ms(self.reveal.animation_delay(index));
            self.push(RenderUpdate::Reveal { index, delay_ms });
        }

        for (index, src) in self.images.update(&snapshot.lazy_images, viewport) {
            self.push(RenderUpdate::LoadImage { index, src });
        }

        for (index, rect) in snapshot.counters.iter().enumerate() {
            if rect.intersection_ratio(viewport, 0.0) <= 0.0 {
                continue;
            }
            if let Some(animation) = self.counters.get_mut(index).and_then(Option::take) {
                run_counter(
                    Rc::clone(&self.scheduler),
                    Rc::clone(&self.updates),
                    index,
                    animation,
                    self.config.counter_frame(),
                );
            }
        }

        for (index, rect) in snapshot.typing.iter().enumerate() {
            if rect.intersection_ratio(viewport, 0.0) <= 0.0 {
                continue;
            }
            if let Some(typewriter) = self.typing.get_mut(index).and_then(Option::take) {
                run_typewriter(
                    Rc::clone(&self.scheduler),
                    Rc::clone(&self.updates),
                    index,
                    typewriter,
                );
            }
        }
    }

    /// The host has no visibility observer: load every lazy image now.
    pub fn load_all_images(&mut self) {
        for (index, src) in self.images.load_all() {
            self.push(RenderUpdate::LoadImage { index, src });
        }
    }

    // =========================================================================
    // FORM
    // =========================================================================

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn on_input(&mut self, field: &str, raw: &str) {
        self.form.input(field, raw);
        self.flush_form_events();
    }

    pub fn on_blur(&mut self, field: &str) {
        self.form.blur(field);
        self.flush_form_events();
    }

    /// Start a submission; see [`FormController::request_submit`].
    pub fn request_submit(&mut self) -> SubmitRequest {
        let request = self.form.request_submit();
        self.flush_form_events();
        request
    }

    /// Settle a submission started with [`request_submit`](Self::request_submit).
    pub fn complete_submit(&mut self, result: Result<(), SubmitError>) {
        self.form.complete(result);
        self.flush_form_events();
    }

    /// Abandon a submission that will never settle.
    pub fn reset_form(&mut self) {
        self.form.reset();
        self.flush_form_events();
    }

    /// Validate, deliver and settle in one step.
    pub async fn submit<O: SubmitOperation>(&mut self, operation: &O) -> SubmitOutcome {
        let outcome = self.form.submit(operation).await;
        self.flush_form_events();
        outcome
    }

    fn flush_form_events(&mut self) {
        let dismiss_after = self.config.notification_dismiss();
        let events = self.form.take_events();
        let mut updates = self.updates.borrow_mut();
        for event in events {
            let event = match event {
                FormEvent::Notify { notification } => FormEvent::Notify {
                    notification: notification.with_dismiss_after(dismiss_after),
                },
                other => other,
            };
            updates.push(RenderUpdate::Form(event));
        }
    }

    // =========================================================================
    // ACCESSIBILITY
    // =========================================================================

    /// Register the modal currently on the page.
    pub fn set_modal(&mut self, modal: Modal) {
        self.modal = Some(modal);
    }

    pub fn modal_mut(&mut self) -> Option<&mut Modal> {
        self.modal.as_mut()
    }

    /// A key press; `active` is the focused element's index inside the
    /// modal, if any.
    pub fn on_key(&mut self, press: &KeyPress, active: Option<usize>) -> KeyAction {
        let action = handle_key(press, self.modal.as_mut(), active);
        if action != KeyAction::Ignored {
            tracing::debug!(key = ?press.key, ?action, "Handled key press");
            self.push(RenderUpdate::Keyboard(action));
        }
        action
    }

    /// Convenience for a bare Escape press.
    pub fn escape(&mut self) -> KeyAction {
        self.on_key(&KeyPress::new(Key::Escape), None)
    }

    pub fn skip_link(&self) -> &SkipLink {
        &self.skip_link
    }

    pub fn on_skip_link_focus(&mut self, focused: bool) {
        let top = if focused {
            self.skip_link.focus()
        } else {
            self.skip_link.blur()
        };
        self.push(RenderUpdate::SkipLink { top });
    }

    // =========================================================================
    // THEME
    // =========================================================================

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Flip and persist the theme. On failure the page keeps its theme.
    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        match self.theme.toggle() {
            Ok(theme) => {
                self.push(RenderUpdate::theme(theme));
                Ok(theme)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Theme toggle not persisted");
                Err(err)
            }
        }
    }

    fn push(&self, update: RenderUpdate) {
        self.updates.borrow_mut().push(update);
    }
}

/// The controller for the page's contact form inputs.
fn contact_form(layout: &PageLayout) -> FormController {
    if layout.form_inputs.is_empty() {
        return FormController::contact_form();
    }
    FormController::new(
        layout
            .form_inputs
            .iter()
            .map(|input| {
                FieldSpec::from_input(input.name.as_str(), &input.input_type, input.required)
            })
            .collect(),
    )
}

/// Attribute fixes applied once when the page loads.
fn markup_updates(layout: &PageLayout) -> Vec<RenderUpdate> {
    let labels = layout.buttons.iter().enumerate().filter_map(|(index, button)| {
        aria_label_for(button.aria_label.as_deref(), &button.text)
            .map(|label| RenderUpdate::AriaLabel { index, label })
    });
    let roles = layout.cards.iter().enumerate().filter_map(|(index, classes)| {
        card_role(classes.split_whitespace()).map(|role| RenderUpdate::Role {
            index,
            role: role.to_string(),
        })
    });
    let loading = layout.images.iter().enumerate().filter_map(|(index, existing)| {
        loading_attribute(existing.as_deref()).map(|loading| RenderUpdate::ImageLoading {
            index,
            loading: loading.to_string(),
        })
    });
    labels.chain(roles).chain(loading).collect()
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Render one counter frame now and the rest every `frame`.
fn run_counter<S: Scheduler + 'static>(
    scheduler: Rc<S>,
    updates: Updates,
    index: usize,
    mut animation: CounterAnimation,
    frame: Duration,
) {
    let step = animation.tick();
    updates.borrow_mut().push(RenderUpdate::Counter {
        index,
        value: step.value,
    });
    if step.done {
        return;
    }
    let next = Rc::clone(&scheduler);
    scheduler.schedule(
        frame,
        Box::new(move || run_counter(next, updates, index, animation, frame)),
    );
}

/// Type one character now and the rest at the typewriter's speed.
fn run_typewriter<S: Scheduler + 'static>(
    scheduler: Rc<S>,
    updates: Updates,
    index: usize,
    mut typewriter: Typewriter,
) {
    let Some(text) = typewriter.tick() else {
        return;
    };
    updates.borrow_mut().push(RenderUpdate::Typing { index, text });
    if typewriter.is_done() {
        return;
    }
    let next = Rc::clone(&scheduler);
    let speed = typewriter.speed();
    scheduler.schedule(
        speed,
        Box::new(move || run_typewriter(next, updates, index, typewriter)),
    );
}
