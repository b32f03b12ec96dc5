//! Valentine Request entry point
//!
//! Mounts the card into the page on wasm; runs a scripted headless session
//! on native.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_card {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, MouseEvent, PageTransitionEvent, PointerEvent, TouchEvent};

    use valentine_request::card::{Approach, CardEvent, CardState, Status};
    use valentine_request::consts::*;
    use valentine_request::platform::{PageHide, RevealTimer};
    use valentine_request::view::{GreetingView, Scene, View, ViewFrame, compose};
    use valentine_request::Settings;

    /// Mounted card: state plus the browser resources it owns
    struct App {
        state: CardState,
        settings: Settings,
        /// Pending headline reveal; dropping it cancels the timers
        reveal: Option<RevealTimer>,
        last_time: f64,
        document: Document,
    }

    impl App {
        fn new(settings: Settings, seed: u64, document: Document) -> Self {
            Self {
                state: CardState::new(&settings, seed),
                settings,
                reveal: None,
                last_time: 0.0,
                document,
            }
        }

        fn el(&self, id: &str) -> Option<Element> {
            self.document.get_element_by_id(id)
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.el(id) {
                if el.text_content().as_deref() != Some(text) {
                    el.set_text_content(Some(text));
                }
            }
        }

        fn set_style(&self, id: &str, style: &str) {
            if let Some(el) = self.el(id) {
                let _ = el.set_attribute("style", style);
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.el(id) {
                let _ = el.class_list().toggle_with_force("hidden", hidden);
            }
        }

        fn handle(&mut self, event: CardEvent) {
            if self.state.apply(event) && self.state.status == Status::Success {
                // Greeting is gone; stop its timers
                self.reveal = None;
            }
        }

        fn unmount(&mut self) {
            self.state.unmount();
            self.reveal = None;
            log::info!("Card unmounted");
        }

        /// Advance the card clock; the reveal has its own timers
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;
            self.state.advance_clock(dt);
        }

        /// Write the current scene into the DOM
        fn render(&self) {
            let scene = compose(&self.state, &self.settings);
            self.render_scene(&scene);
        }

        fn render_scene(&self, scene: &Scene) {
            let [a, b] = scene.background;
            self.set_style(
                "blob-a",
                &format!(
                    "opacity: {:.3}; transform: scale({:.3}) rotate({:.2}deg);",
                    a.opacity, a.scale, a.rotate_deg
                ),
            );
            self.set_style(
                "blob-b",
                &format!(
                    "opacity: {:.3}; transform: translateX({:.2}px) scale({:.3});",
                    b.opacity, b.x, b.scale
                ),
            );
            self.set_style(
                "card",
                &format!(
                    "opacity: {:.3}; transform: translateY({:.2}px) scale({:.4});",
                    scene.card.opacity, scene.card.y, scene.card.scale
                ),
            );

            match (&scene.view, &scene.exiting) {
                (View::Greeting(g), _) => {
                    self.set_hidden("confirmation", true);
                    self.render_greeting(g, true);
                }
                (View::Confirmation(c), exiting) => {
                    match exiting {
                        // Exit runs first; confirmation waits its turn
                        Some(g) => {
                            self.render_greeting(g, false);
                            self.set_hidden("confirmation", true);
                        }
                        None => {
                            self.set_hidden("greeting", true);
                            self.set_hidden("confirmation", false);
                        }
                    }
                    self.set_style("confirmation", &view_style(&c.frame));
                    self.set_style(
                        "badge",
                        &format!("transform: scale({:.3});", c.badge_scale.max(0.0)),
                    );
                    self.set_text("confirmation-title", &c.title);
                    self.set_text("confirmation-note", &c.note);
                    self.set_text(
                        "reservation",
                        &format!("Reservation Code: {}", c.reservation_code),
                    );
                }
            }

            self.set_text("footer", &scene.footer);
        }

        fn render_greeting(&self, g: &GreetingView, interactive: bool) {
            self.set_hidden("greeting", false);
            let pointer = if interactive { "" } else { " pointer-events: none;" };
            self.set_style("greeting", &format!("{}{}", view_style(&g.frame), pointer));
            self.set_style("heart", &format!("transform: translateY({:.2}px);", g.heart_y));
            self.set_text("headline", &g.headline);
            self.set_style("caret", &format!("opacity: {:.3};", g.caret_opacity));
            self.set_text("subtext", &g.subtext);
            self.set_style("subtext", &format!("opacity: {:.3};", g.subtext_opacity));

            let yes = &g.accept;
            self.set_text("yes-label", &yes.label);
            self.set_style(
                "yes",
                &format!(
                    "transform: scale({:.3}); box-shadow: 0 10px 25px rgba(236, 72, 153, {:.2});",
                    yes.scale, yes.glow
                ),
            );
            self.set_style(
                "yes-sheen",
                &format!("transform: translateY({:.1}%);", (1.0 - yes.sheen) * 100.0),
            );
            self.set_style("sparkle", &format!("opacity: {:.3};", yes.sparkle_opacity));

            let no = &g.decline;
            self.set_text("no", &no.label);
            self.set_style(
                "no",
                &format!(
                    "transform: translate({:.2}px, {:.2}px); opacity: {:.2}; filter: blur({:.1}px);",
                    no.x, no.y, no.opacity, no.blur_px
                ),
            );
        }
    }

    fn view_style(frame: &ViewFrame) -> String {
        format!(
            "opacity: {:.3}; transform: translateY({:.2}px) scale({:.3}); filter: blur({:.2}px);",
            frame.opacity, frame.y, frame.scale, frame.blur_px
        )
    }

    /// Start (or restart) the headline reveal from the card's current inputs
    fn start_reveal(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
        let (delay, every) = {
            let a = app.borrow();
            (a.state.headline.delay(), a.settings.type_interval())
        };

        let weak: Weak<RefCell<App>> = Rc::downgrade(app);
        let mut first_tick = true;
        let timer = RevealTimer::start(delay, every, move || {
            let Some(app) = weak.upgrade() else {
                return false;
            };
            // The first tick also accounts for the start delay
            let step = if first_tick { delay + every } else { every };
            first_tick = false;

            let mut a = app.borrow_mut();
            if a.state.headline.advance(step) {
                let text = a.state.headline.visible().to_string();
                a.set_text("headline", &text);
            }
            a.state.headline.is_live()
        })?;

        // Replacing an old timer drops (and cancels) it
        app.borrow_mut().reveal = Some(timer);
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Valentine Request starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(settings, seed, document)));
        log::info!("Card mounted with seed: {}", seed);

        app.borrow().render();
        start_reveal(&app)?;
        setup_buttons(&app)?;
        setup_teardown(&app)?;

        request_animation_frame(app);
        Ok(())
    }

    fn setup_buttons(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
        let (yes, no) = {
            let a = app.borrow();
            (a.el("yes"), a.el("no"))
        };
        let yes = yes.ok_or_else(|| JsValue::from_str("missing #yes"))?;
        let no = no.ok_or_else(|| JsValue::from_str("missing #no"))?;

        // Yes - accept
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().handle(CardEvent::Accept);
            });
            yes.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Yes - hover grows, leaving releases any press
        for (kind, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().handle(CardEvent::HoverAccept(hovered));
            });
            yes.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Yes - press shrinks
        for (kind, pressed) in [
            ("pointerdown", true),
            ("pointerup", false),
            ("pointercancel", false),
        ] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                app.borrow_mut().handle(CardEvent::PressAccept(pressed));
            });
            yes.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // No - hover dodges
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut()
                    .handle(CardEvent::ApproachDecline(Approach::Hover));
            });
            no.add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // No - touch dodges too
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut()
                    .handle(CardEvent::ApproachDecline(Approach::Touch));
            });
            no.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // No - click does nothing
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().handle(CardEvent::ActivateDecline);
            });
            no.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_teardown(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                let hide = PageHide::from_persisted(event.persisted());
                if hide.tears_down() {
                    app.borrow_mut().unmount();
                } else {
                    log::debug!("Page cached; card suspended");
                }
            });
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Coming back from the cache: don't count the time away as one frame
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if event.persisted() {
                    app.borrow_mut().last_time = 0.0;
                    log::debug!("Page restored; card resumed");
                }
            });
            window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
        }

        // With reduced motion nothing moves once the confirmation has settled
        let settled = {
            let a = app.borrow();
            a.state.status == Status::Success
                && a.state
                    .since_accepted()
                    .is_some_and(|t| t > GREETING_EXIT_SECS + 3.0)
                && a.state.reduced_motion()
        };
        if !settled {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_card::run() {
        log::error!("Failed to mount card: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Valentine Request (native) starting...");
    log::info!("Native mode runs a scripted session - run with `trunk serve` for the web version");

    run_scripted_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play typing, five evasions and an acceptance, printing a scene per beat
#[cfg(not(target_arch = "wasm32"))]
fn run_scripted_session() {
    use valentine_request::card::{Approach, CardEvent, CardState};
    use valentine_request::{Settings, compose};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const FRAMES: u32 = 60 * 7;
    const PRINT_EVERY: u32 = 30;

    let settings = Settings::load();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = CardState::new(&settings, seed);
    log::info!("Card mounted with seed: {}", seed);

    for frame in 0..FRAMES {
        // Pointer chases the No button from 3.0s, then gives up and says yes
        let event = match frame {
            180 | 192 | 204 | 216 | 228 => Some(CardEvent::ApproachDecline(Approach::Hover)),
            240 => Some(CardEvent::ActivateDecline),
            255 => Some(CardEvent::HoverAccept(true)),
            266 => Some(CardEvent::PressAccept(true)),
            270 => Some(CardEvent::Accept),
            _ => None,
        };
        if let Some(event) = event {
            state.apply(event);
        }

        state.advance(FRAME_DT);

        if frame % PRINT_EVERY == 0 || event.is_some() {
            match serde_json::to_string(&compose(&state, &settings)) {
                Ok(json) => println!("{}", json),
                Err(e) => log::warn!("Could not serialize scene: {}", e),
            }
        }
    }

    state.unmount();
    log::info!(
        "Session finished: status {:?}, {} evasion(s)",
        state.status,
        state.evasive.attempts()
    );
}
