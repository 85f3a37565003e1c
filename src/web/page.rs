//! DOM wiring for the page behaviours: typewriter, marquee, navigation,
//! reveal-on-scroll, project cards, the demo launcher, the focus shortcut and
//! the contact form.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    Request, RequestInit, Response, ScrollBehavior, ScrollToOptions, Window,
};

use super::demo::PixelhackDemo;
use super::WebError;
use crate::config::SiteConfig;
use crate::page::contact::{ContactConfig, ContactForm, SubmissionOutcome};
use crate::page::navigation::{
    anchor_target, is_activation_key, is_skip_to_content, navbar_is_scrolled, scroll_target,
    NAVBAR_SCROLLED_CLASS, REVEAL_CLASS, REVEAL_ROOT_MARGIN, REVEAL_SELECTOR, REVEAL_THRESHOLD,
};
use crate::page::showcase::{
    card_transform, CardTouch, DEMO_CANVAS_ID, DEMO_MODAL_ID, DEMO_OPEN_DELAY, PAGE_STYLES,
    PAGE_STYLE_ID, PROJECT_CARD_SELECTOR, TOUCH_ACTIVE_CLASS,
};
use crate::page::{MarqueeState, PlayState, Typewriter, TypewriterConfig};

thread_local! {
    /// Demos attached by [`open_demo`], by canvas id.
    static OPEN_DEMOS: RefCell<Vec<(String, PixelhackDemo)>> = const { RefCell::new(Vec::new()) };
}

/// Wire up every page behaviour. Pieces whose elements are missing are skipped.
///
/// `config_json` may hold a [`SiteConfig`] document; invalid configuration is
/// logged and replaced by the defaults.
#[wasm_bindgen]
pub fn init_site(config_json: Option<String>) {
    let config = match config_json.as_deref().map(SiteConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log::warn!("ignoring site configuration: {}", err);
            SiteConfig::default()
        }
        None => SiteConfig::default(),
    };

    let steps: [(&str, Result<(), WebError>); 10] = [
        ("page styles", inject_page_styles()),
        ("typewriter", start_typewriter("typewriter", config.typewriter).map(|_| ())),
        ("marquee", install_marquee("marqueeContent", ".service-item")),
        ("contact form", install_contact_form("contactForm", config.contact)),
        ("smooth scrolling", install_smooth_scroll()),
        ("navbar", install_navbar_scroll("mainNav")),
        ("reveal", install_reveal_on_scroll()),
        ("focus shortcut", install_focus_shortcut()),
        ("project cards", install_project_hovers()),
        ("demo launcher", install_demo_launcher()),
    ];
    for (name, result) in steps {
        if let Err(err) = result {
            log::warn!("{} not initialised: {}", name, err);
        }
    }
}

fn window() -> Result<Window, WebError> {
    web_sys::window().ok_or(WebError::NoWindow)
}

fn document() -> Result<Document, WebError> {
    window()?.document().ok_or(WebError::NoWindow)
}

fn elements(document: &Document, selector: &str) -> Result<Vec<Element>, WebError> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn set_timeout(window: &Window, callback: &Function, delay_ms: u64) -> Result<i32, WebError> {
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    Ok(window.set_timeout_with_callback_and_timeout_and_arguments_0(callback, delay)?)
}

/// Start the typewriter in the element with the given id.
/// Returns `false` when the element is missing or there is nothing to type.
#[wasm_bindgen]
pub fn start_typewriter_in(element_id: &str) -> bool {
    match start_typewriter(element_id, TypewriterConfig::default()) {
        Ok(started) => started,
        Err(err) => {
            log::warn!("typewriter not started: {}", err);
            false
        }
    }
}

fn start_typewriter(element_id: &str, config: TypewriterConfig) -> Result<bool, WebError> {
    let window = window()?;
    let Some(element) = document()?.get_element_by_id(element_id) else {
        return Ok(false);
    };
    let Some(mut typewriter) = Typewriter::new(config) else {
        return Ok(false);
    };

    // Each tick re-arms the same timeout closure.
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_slot = slot.clone();
    let tick_window = window.clone();
    *slot.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        let step = typewriter.tick();
        element.set_text_content(Some(&step.text));

        let guard = tick_slot.borrow();
        if let Some(callback) = guard.as_ref() {
            let delay = step.delay.as_millis() as u64;
            if let Err(err) = set_timeout(&tick_window, callback.as_ref().unchecked_ref(), delay) {
                log::warn!("typewriter stopped: {}", err);
            }
        }
    }));

    let guard = slot.borrow();
    if let Some(callback) = guard.as_ref() {
        set_timeout(&window, callback.as_ref().unchecked_ref(), 0)?;
    }
    Ok(true)
}

fn install_marquee(content_id: &str, item_selector: &str) -> Result<(), WebError> {
    let document = document()?;
    let Some(content) = document.get_element_by_id(content_id) else {
        return Ok(());
    };
    let content: HtmlElement = content.dyn_into().map_err(|_| WebError::NotHtml(content_id.to_owned()))?;
    let state = Rc::new(Cell::new(MarqueeState::default()));

    for item in elements(&document, item_selector)? {
        let events: [(&str, fn(&mut MarqueeState) -> PlayState); 4] = [
            ("mouseenter", MarqueeState::pointer_enter),
            ("mouseleave", MarqueeState::pointer_leave),
            ("focus", MarqueeState::focus),
            ("blur", MarqueeState::blur),
        ];
        for (event, transition) in events {
            let state = state.clone();
            let content = content.clone();
            let handler = Closure::<dyn FnMut()>::new(move || {
                let mut marquee = state.get();
                let play_state = transition(&mut marquee);
                state.set(marquee);
                if let Err(err) = content
                    .style()
                    .set_property("animation-play-state", play_state.as_css())
                {
                    log::warn!("marquee style not updated: {:?}", err);
                }
            });
            item.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
            handler.forget();
        }

        let Ok(activatable) = item.dyn_into::<HtmlElement>() else {
            continue;
        };
        let target = activatable.clone();
        let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if is_activation_key(&event.key()) {
                event.prevent_default();
                target.click();
            }
        });
        activatable.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
        on_key.forget();
    }
    Ok(())
}

fn install_smooth_scroll() -> Result<(), WebError> {
    let document = document()?;
    for link in elements(&document, "a[href^=\"#\"]")? {
        let href_source = link.clone();
        let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let href = href_source.get_attribute("href").unwrap_or_default();
            if let Err(err) = scroll_to_section(&href) {
                log::warn!("smooth scroll to '{}' failed: {}", href, err);
            }
        });
        link.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }
    Ok(())
}

fn scroll_to_section(href: &str) -> Result<(), WebError> {
    let Some(id) = anchor_target(href) else {
        return Ok(());
    };
    let window = window()?;
    let document = document()?;
    let Some(target) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(());
    };

    let options = ScrollToOptions::new();
    options.set_top(scroll_target(target.offset_top() as f64));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);

    // Collapse the mobile menu if it is open.
    let open_menu = document
        .query_selector(".navbar-collapse")?
        .map(|menu| menu.class_list().contains("show"))
        .unwrap_or(false);
    if open_menu {
        if let Some(toggler) = document
            .query_selector(".navbar-toggler")?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            toggler.click();
        }
    }
    Ok(())
}

fn install_navbar_scroll(navbar_id: &str) -> Result<(), WebError> {
    let window = window()?;
    let Some(navbar) = document()?.get_element_by_id(navbar_id) else {
        return Ok(());
    };

    let scroll_window = window.clone();
    let handler = Closure::<dyn FnMut()>::new(move || {
        let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
        let classes = navbar.class_list();
        let result = if navbar_is_scrolled(scroll_y) {
            classes.add_1(NAVBAR_SCROLLED_CLASS)
        } else {
            classes.remove_1(NAVBAR_SCROLLED_CLASS)
        };
        if let Err(err) = result {
            log::warn!("navbar class not updated: {:?}", err);
        }
    });
    window.add_event_listener_with_callback("scroll", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn install_reveal_on_scroll() -> Result<(), WebError> {
    let document = document()?;

    let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                if let Err(err) = entry.target().class_list().add_1(REVEAL_CLASS) {
                    log::warn!("reveal class not added: {:?}", err);
                }
            }
        }
    });

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for element in elements(&document, REVEAL_SELECTOR)? {
        observer.observe(&element);
    }
    Ok(())
}

fn install_focus_shortcut() -> Result<(), WebError> {
    let document = document()?;
    let key_document = document.clone();
    let handler = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let body_focused = match (key_document.active_element(), key_document.body()) {
            (Some(active), Some(body)) => {
                let body: &web_sys::Node = &body;
                active.is_same_node(Some(body))
            }
            _ => false,
        };
        if !is_skip_to_content(&event.key(), event.shift_key(), body_focused) {
            return;
        }
        let main = key_document
            .query_selector("main")
            .ok()
            .flatten()
            .or_else(|| key_document.get_element_by_id("home"))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(main) = main {
            if let Err(err) = main.focus() {
                log::warn!("could not focus main content: {:?}", err);
            }
        }
    });
    document.add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn inject_page_styles() -> Result<(), WebError> {
    let document = document()?;
    if document.get_element_by_id(PAGE_STYLE_ID).is_some() {
        return Ok(());
    }
    let Some(head) = document.head() else {
        return Ok(());
    };
    let style = document.create_element("style")?;
    style.set_id(PAGE_STYLE_ID);
    style.set_text_content(Some(PAGE_STYLES));
    head.append_child(&style)?;
    Ok(())
}

fn install_project_hovers() -> Result<(), WebError> {
    let window = window()?;
    for card in elements(&document()?, PROJECT_CARD_SELECTOR)? {
        let Ok(card) = card.dyn_into::<HtmlElement>() else {
            continue;
        };

        for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let target = card.clone();
            let handler = Closure::<dyn FnMut()>::new(move || {
                if let Err(err) = target.style().set_property("transform", card_transform(hovered)) {
                    log::warn!("card transform not updated: {:?}", err);
                }
            });
            card.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
            handler.forget();
        }

        let touch = Rc::new(Cell::new(CardTouch::default()));

        let start_touch = touch.clone();
        let start_card = card.clone();
        let on_start = Closure::<dyn FnMut()>::new(move || {
            let mut state = start_touch.get();
            state.touch_start();
            start_touch.set(state);
            if let Err(err) = start_card.class_list().add_1(TOUCH_ACTIVE_CLASS) {
                log::warn!("touch class not added: {:?}", err);
            }
        });
        card.add_event_listener_with_callback("touchstart", on_start.as_ref().unchecked_ref())?;
        on_start.forget();

        let end_card = card.clone();
        let end_window = window.clone();
        let on_end = Closure::<dyn FnMut()>::new(move || {
            let release = touch.get().touch_end();
            let release_touch = touch.clone();
            let release_card = end_card.clone();
            let later = Closure::once_into_js(move || {
                let mut state = release_touch.get();
                if state.release(release) {
                    if let Err(err) = release_card.class_list().remove_1(TOUCH_ACTIVE_CLASS) {
                        log::warn!("touch class not removed: {:?}", err);
                    }
                }
                release_touch.set(state);
            });
            let delay = release.delay.as_millis() as u64;
            if let Err(err) = set_timeout(&end_window, later.unchecked_ref(), delay) {
                log::warn!("touch release not scheduled: {}", err);
            }
        });
        card.add_event_listener_with_callback("touchend", on_end.as_ref().unchecked_ref())?;
        on_end.forget();
    }
    Ok(())
}

/// Open the demo modal, then attach the particle demo to its canvas once the
/// modal has laid out. Reopening resumes the demo already on that canvas.
#[wasm_bindgen]
pub fn open_demo(modal_id: &str, canvas_id: &str) {
    if let Err(err) = show_modal(modal_id) {
        log::warn!("could not show {}: {}", modal_id, err);
    }

    let canvas_id = canvas_id.to_owned();
    let later = Closure::once_into_js(move || attach_demo(&canvas_id));
    let delay = DEMO_OPEN_DELAY.as_millis() as u64;
    if let Err(err) = window().and_then(|w| set_timeout(&w, later.unchecked_ref(), delay)) {
        log::warn!("demo not scheduled: {}", err);
    }
}

fn attach_demo(canvas_id: &str) {
    OPEN_DEMOS.with(|open| {
        let mut open = open.borrow_mut();
        if let Some((_, demo)) = open.iter().find(|(id, _)| id == canvas_id) {
            demo.start();
            return;
        }
        let Some(demo) = PixelhackDemo::attach(canvas_id, None) else {
            return;
        };
        if let Err(err) = demo.install_globals() {
            log::warn!("demo globals not installed: {:?}", err);
        }
        open.push((canvas_id.to_owned(), demo));
    });
}

/// Expose `window.openPixelhackDemo()` for the page's launch button.
fn install_demo_launcher() -> Result<(), WebError> {
    let launch = Closure::<dyn FnMut()>::new(|| open_demo(DEMO_MODAL_ID, DEMO_CANVAS_ID));
    Reflect::set(&window()?, &"openPixelhackDemo".into(), launch.as_ref())?;
    launch.forget();
    Ok(())
}

fn install_contact_form(form_id: &str, config: ContactConfig) -> Result<(), WebError> {
    let Some(form) = document()?.get_element_by_id(form_id) else {
        return Ok(());
    };
    let form: HtmlFormElement = form.dyn_into().map_err(|_| WebError::NotHtml(form_id.to_owned()))?;

    let submit_form = form.clone();
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let form = submit_form.clone();
        let config = config.clone();
        spawn_local(async move {
            finish_submission(&form, &config).await;
        });
    });
    form.add_event_listener_with_callback("submit", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

/// Submit the contact form with the given id using the default endpoint.
/// Resolves to whether the server accepted the message; never rejects.
#[wasm_bindgen]
pub async fn submit_contact(form_id: String) -> bool {
    let form = document()
        .ok()
        .and_then(|doc| doc.get_element_by_id(&form_id))
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
    match form {
        Some(form) => finish_submission(&form, &ContactConfig::default()).await.is_success(),
        None => {
            log::warn!("contact form '{}' not found", form_id);
            false
        }
    }
}

async fn finish_submission(form: &HtmlFormElement, config: &ContactConfig) -> SubmissionOutcome {
    let outcome = submit_contact_form(form, config).await;
    if outcome.is_success() {
        form.reset();
    }
    if let Err(err) = show_modal(outcome.modal_id()) {
        log::warn!("could not show {}: {}", outcome.modal_id(), err);
    }
    outcome
}

fn read_form(form: &HtmlFormElement) -> Result<ContactForm, WebError> {
    let data = FormData::new_with_form(form)?;
    let field = |name: &str| data.get(name).as_string().unwrap_or_default();
    Ok(ContactForm {
        name: field("name"),
        email: field("email"),
        subject: field("subject"),
        message: field("message"),
        honeypot: field("honeypot"),
    })
}

/// Check, post and report a contact form. Never fails: every problem maps to
/// [`SubmissionOutcome::Failure`].
async fn submit_contact_form(form: &HtmlFormElement, config: &ContactConfig) -> SubmissionOutcome {
    let message = match read_form(form).and_then(|f| f.into_message().map_err(WebError::from)) {
        Ok(message) => message,
        Err(err) => {
            log::warn!("contact form rejected: {}", err);
            return SubmissionOutcome::Failure;
        }
    };
    let body = match message.to_json() {
        Ok(body) => body,
        Err(err) => {
            log::error!("contact form not encoded: {}", err);
            return SubmissionOutcome::Failure;
        }
    };

    let button = form
        .query_selector("button[type=\"submit\"]")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
    let original_label = button.as_ref().map(|b| b.inner_html());
    if let Some(button) = &button {
        button.set_inner_html(&config.sending_label);
        button.set_disabled(true);
    }

    let outcome = match post_json(&config.endpoint, &body).await {
        Ok(status) => SubmissionOutcome::from_status(status),
        Err(err) => {
            log::error!("contact submission failed: {}", err);
            SubmissionOutcome::Failure
        }
    };
    if outcome == SubmissionOutcome::Failure {
        log::error!("contact submission to {} was not accepted", config.endpoint);
    }

    if let (Some(button), Some(label)) = (&button, original_label) {
        button.set_inner_html(&label);
        button.set_disabled(false);
    }
    outcome
}

async fn post_json(endpoint: &str, body: &str) -> Result<u16, WebError> {
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(endpoint, &init)?;
    request.headers().set("Content-Type", "application/json")?;

    let response = JsFuture::from(window()?.fetch_with_request(&request)).await?;
    let response: Response = response.dyn_into()?;
    Ok(response.status())
}

/// Open a Bootstrap modal by element id. Missing modals are ignored.
fn show_modal(modal_id: &str) -> Result<(), WebError> {
    let Some(element) = document()?.get_element_by_id(modal_id) else {
        return Ok(());
    };
    let bootstrap = Reflect::get(&window()?, &"bootstrap".into())?;
    let modal_class: Function = Reflect::get(&bootstrap, &"Modal".into())?.dyn_into()?;
    let modal = Reflect::construct(&modal_class, &Array::of1(&element))?;
    let show: Function = Reflect::get(&modal, &"show".into())?.dyn_into()?;
    show.call0(&modal)?;
    Ok(())
}
