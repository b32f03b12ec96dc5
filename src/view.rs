//! Scene composition
//!
//! [`compose`] turns card state plus its clock into a plain render
//! description. It is pure: the DOM layer and the native runner both just
//! draw whatever it returns. Transitions here are cosmetic only; the view
//! switches the moment `status` does.

use serde::{Deserialize, Serialize};

use crate::card::motion::{EASE_OUT_EXPO_LIKE, Easing, lerp, once, spring_pop};
use crate::card::{
    BlobFrame, CardState, Status, blob_a, blob_b, caret_opacity, heart_float, sparkle_pulse,
};
use crate::consts::*;
use crate::settings::Settings;

/// Confirmation badge pop spring
const BADGE_STIFFNESS: f32 = 100.0;
const BADGE_DAMPING: f32 = 10.0;

/// Greeting exit travel and blur
const EXIT_RISE_PX: f32 = 20.0;
const EXIT_BLUR_PX: f32 = 10.0;

/// Card entrance
const INTRO_RISE_PX: f32 = 20.0;
const INTRO_SCALE: f32 = 0.95;

/// Confirmation entrance starting scale
const CONFIRMATION_SCALE: f32 = 0.9;

/// Whole-card transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardFrame {
    pub opacity: f32,
    pub y: f32,
    pub scale: f32,
}

/// Fade/rise/blur applied to a whole view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewFrame {
    pub opacity: f32,
    pub y: f32,
    pub scale: f32,
    pub blur_px: f32,
}

impl ViewFrame {
    const STILL: ViewFrame = ViewFrame {
        opacity: 1.0,
        y: 0.0,
        scale: 1.0,
        blur_px: 0.0,
    };
}

/// The Yes button as drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptButton {
    pub label: String,
    pub scale: f32,
    /// Hover drop-shadow strength (0 = none)
    pub glow: f32,
    /// Sheen coverage, 0 = parked below, 1 = over the button
    pub sheen: f32,
    pub sparkle_opacity: f32,
}

/// The No button as drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclineButton {
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
    pub blur_px: f32,
    pub attempts: u32,
}

/// Question, heart and both buttons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreetingView {
    pub frame: ViewFrame,
    pub heart_y: f32,
    pub headline: String,
    pub caret_opacity: f32,
    pub subtext: String,
    pub subtext_opacity: f32,
    pub accept: AcceptButton,
    pub decline: DeclineButton,
}

/// Success panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationView {
    pub frame: ViewFrame,
    pub badge_scale: f32,
    pub title: String,
    pub note: String,
    pub reservation_code: String,
}

/// Exactly one of these is live at a time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum View {
    Greeting(GreetingView),
    Confirmation(ConfirmationView),
}

impl View {
    pub fn status(&self) -> Status {
        match self {
            View::Greeting(_) => Status::Idle,
            View::Confirmation(_) => Status::Success,
        }
    }
}

/// One frame of the whole screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub clock: f32,
    pub background: [BlobFrame; 2],
    pub card: CardFrame,
    pub view: View,
    /// Outgoing greeting still fading out; not interactive
    pub exiting: Option<GreetingView>,
    pub footer: String,
}

fn greeting(state: &CardState, settings: &Settings, frame: ViewFrame) -> GreetingView {
    let clock = state.clock;
    let reduced = state.reduced_motion();
    let evasive = &state.evasive;
    let offset = evasive.displayed();

    GreetingView {
        frame,
        heart_y: heart_float(clock, reduced),
        headline: state.headline.visible().to_string(),
        caret_opacity: caret_opacity(clock),
        subtext: settings.subtext.clone(),
        subtext_opacity: once(clock, SUBTEXT_DELAY_SECS, SUBTEXT_FADE_SECS, Easing::EaseInOut),
        accept: AcceptButton {
            label: settings.accept_label.clone(),
            scale: state.accept.scale(),
            glow: state.accept.glow(),
            sheen: state.accept.sheen(),
            sparkle_opacity: sparkle_pulse(clock, reduced),
        },
        decline: DeclineButton {
            label: evasive.label().to_string(),
            x: offset.x,
            y: offset.y,
            opacity: evasive.opacity(),
            blur_px: evasive.blur_px(),
            attempts: evasive.attempts(),
        },
    }
}

fn exit_frame(since: f32) -> ViewFrame {
    let p = once(since, 0.0, GREETING_EXIT_SECS, Easing::EaseInOut);
    ViewFrame {
        opacity: 1.0 - p,
        y: -EXIT_RISE_PX * p,
        scale: 1.0,
        blur_px: EXIT_BLUR_PX * p,
    }
}

fn confirmation(settings: &Settings, since: f32, reduced: bool) -> ConfirmationView {
    // The panel waits for the greeting to finish leaving
    let enter_at = GREETING_EXIT_SECS;
    let (p, badge_scale) = if reduced {
        (1.0, 1.0)
    } else {
        (
            once(since, enter_at, CONFIRMATION_ENTER_SECS, Easing::EaseInOut),
            spring_pop(since - enter_at, BADGE_STIFFNESS, BADGE_DAMPING),
        )
    };

    ConfirmationView {
        frame: ViewFrame {
            opacity: p,
            y: 0.0,
            scale: lerp(CONFIRMATION_SCALE, 1.0, p),
            blur_px: 0.0,
        },
        badge_scale,
        title: settings.confirmation_title.clone(),
        note: settings.confirmation_note.clone(),
        reservation_code: settings.reservation_code.clone(),
    }
}

/// Build the scene for the card's current clock
pub fn compose(state: &CardState, settings: &Settings) -> Scene {
    let clock = state.clock;
    let reduced = state.reduced_motion();

    let intro = if reduced {
        1.0
    } else {
        once(clock, 0.0, CARD_INTRO_SECS, EASE_OUT_EXPO_LIKE)
    };
    let card = CardFrame {
        opacity: intro,
        y: INTRO_RISE_PX * (1.0 - intro),
        scale: lerp(INTRO_SCALE, 1.0, intro),
    };

    let (view, exiting) = match state.status {
        Status::Idle => (View::Greeting(greeting(state, settings, ViewFrame::STILL)), None),
        Status::Success => {
            let since = state.since_accepted().unwrap_or(0.0);
            let exiting = (!reduced && since < GREETING_EXIT_SECS)
                .then(|| greeting(state, settings, exit_frame(since)));
            (View::Confirmation(confirmation(settings, since, reduced)), exiting)
        }
    };

    Scene {
        clock,
        background: [blob_a(clock, reduced), blob_b(clock, reduced)],
        card,
        view,
        exiting,
        footer: settings.footer.clone(),
    }
}
