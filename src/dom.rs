//! Browser adapter.
//!
//! Binds the page elements, applies `QuizView`s to them, and wires the click,
//! resize and animation-frame callbacks. Quiz state lives in one `Widget` behind
//! an `Rc<RefCell<_>>` handle shared by the listeners and the `QuizWidget`
//! returned to JS. Confetti loops never touch that handle: each one owns its own
//! `AnimationSession` plus clones of the canvas and context.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, Window, window};

use crate::confetti::{AnimationSession, ConfettiSettings, FrameStatus, Particle, session_rng};
use crate::config::{ElementIds, WidgetConfig};
use crate::error::WidgetError;
use crate::logging;
use crate::quiz::view::{QuestionView, QuizView, ResultView, render};
use crate::quiz::{Advance, Quiz};

const HIDDEN: &str = "hidden";

struct Elements {
    quiz_card: Element,
    result_card: Element,
    title: Element,
    image: Element,
    description: Element,
    play_again: Element,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Elements {
    fn bind(doc: &Document, ids: &ElementIds) -> Result<Self, WidgetError> {
        let canvas: HtmlCanvasElement = element(doc, &ids.confetti_canvas)?
            .dyn_into()
            .map_err(|_| WidgetError::WrongElementType {
                id: ids.confetti_canvas.clone(),
                expected: "canvas",
            })?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(WidgetError::dom)?
            .ok_or(WidgetError::NoCanvasContext)?
            .dyn_into()
            .map_err(|_| WidgetError::NoCanvasContext)?;
        Ok(Self {
            quiz_card: element(doc, &ids.quiz_card)?,
            result_card: element(doc, &ids.result_card)?,
            title: element(doc, &ids.title)?,
            image: element(doc, &ids.image)?,
            description: element(doc, &ids.description)?,
            play_again: element(doc, &ids.play_again)?,
            canvas,
            ctx,
        })
    }
}

fn element(doc: &Document, id: &str) -> Result<Element, WidgetError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| WidgetError::MissingElement(id.to_string()))
}

struct Widget {
    quiz: Quiz,
    confetti: ConfettiSettings,
    document: Document,
    elements: Elements,
}

type WidgetHandle = Rc<RefCell<Widget>>;

/// Handle to a mounted quiz, returned to JS.
#[wasm_bindgen]
pub struct QuizWidget {
    inner: WidgetHandle,
}

#[wasm_bindgen]
impl QuizWidget {
    /// Same as pressing "play again".
    pub fn reset(&self) -> Result<(), JsValue> {
        self.inner.borrow_mut().quiz.reset();
        paint(&self.inner)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> usize {
        self.inner.borrow().quiz.current_index()
    }

    #[wasm_bindgen(js_name = isShowingResult)]
    pub fn is_showing_result(&self) -> bool {
        self.inner.borrow().quiz.is_showing_result()
    }

    pub fn answer(&self, key: &str) -> Option<String> {
        self.inner.borrow().quiz.answer(key).map(str::to_string)
    }
}

/// Binds to the page described by `config` and renders the first question.
pub fn mount(config: WidgetConfig) -> Result<QuizWidget, WidgetError> {
    config.validate()?;
    logging::init(config.level()?);

    let win = window().ok_or(WidgetError::NoWindow)?;
    let document = win.document().ok_or(WidgetError::NoDocument)?;
    let elements = Elements::bind(&document, &config.elements)?;
    let quiz = Quiz::new(config.content)?;
    let question_count = quiz.question_count();

    resize_canvas(&win, &elements.canvas);
    let handle: WidgetHandle = Rc::new(RefCell::new(Widget {
        quiz,
        confetti: config.confetti,
        document,
        elements,
    }));

    install_listeners(&win, &handle)?;
    paint(&handle)?;
    tracing::info!(questions = question_count, "duck quiz mounted");
    Ok(QuizWidget { inner: handle })
}

// --- Listeners ----------------------------------------------------------------

enum Click {
    Option(String),
    Advance,
}

fn install_listeners(win: &Window, handle: &WidgetHandle) -> Result<(), WidgetError> {
    let (quiz_card, play_again, canvas) = {
        let w = handle.borrow();
        (
            w.elements.quiz_card.clone(),
            w.elements.play_again.clone(),
            w.elements.canvas.clone(),
        )
    };

    // One delegated listener; the card's buttons are rebuilt on every paint.
    {
        let h = handle.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            if let Err(err) = on_quiz_click(&h, &evt) {
                tracing::error!(%err, "quiz click failed");
            }
        }) as Box<dyn FnMut(_)>);
        quiz_card
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(WidgetError::dom)?;
        closure.forget();
    }

    {
        let h = handle.clone();
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            h.borrow_mut().quiz.reset();
            if let Err(err) = paint(&h) {
                tracing::error!(%err, "reset repaint failed");
            }
        }) as Box<dyn FnMut(_)>);
        play_again
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(WidgetError::dom)?;
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Some(w) = window() {
                resize_canvas(&w, &canvas);
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(WidgetError::dom)?;
        closure.forget();
    }
    Ok(())
}

fn on_quiz_click(handle: &WidgetHandle, evt: &web_sys::Event) -> Result<(), WidgetError> {
    let Some(button) = evt
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest("button").ok().flatten())
    else {
        return Ok(());
    };
    let click = if let Some(option) = button.get_attribute("data-option") {
        Click::Option(option)
    } else if button.class_list().contains("nav-btn") {
        Click::Advance
    } else {
        return Ok(());
    };

    let completed = {
        let mut widget = handle.borrow_mut();
        match click {
            Click::Option(option) => {
                widget.quiz.select_current(&option);
                false
            }
            Click::Advance => widget.quiz.advance() == Advance::Completed,
        }
    };
    paint(handle)?;
    if completed {
        launch_confetti(handle);
    }
    Ok(())
}

// --- View application -----------------------------------------------------------

fn paint(handle: &WidgetHandle) -> Result<(), WidgetError> {
    let widget = handle.borrow();
    let els = &widget.elements;
    match render(&widget.quiz) {
        QuizView::Question(view) => {
            apply_question(&widget.document, &els.quiz_card, &view)?;
            set_hidden(&els.result_card, true)?;
            set_hidden(&els.quiz_card, false)?;
        }
        QuizView::Result(view) => {
            apply_result(els, &view)?;
            set_hidden(&els.quiz_card, true)?;
            set_hidden(&els.result_card, false)?;
        }
    }
    Ok(())
}

fn apply_question(doc: &Document, card: &Element, view: &QuestionView) -> Result<(), WidgetError> {
    card.set_text_content(None);

    let title = doc.create_element("h2").map_err(WidgetError::dom)?;
    title.set_class_name("question-title");
    title.set_text_content(Some(&view.prompt));
    card.append_child(&title).map_err(WidgetError::dom)?;

    let options = doc.create_element("div").map_err(WidgetError::dom)?;
    options.set_class_name("options");
    for opt in &view.options {
        let button = button(doc, &opt.label)?;
        button.set_class_name(if opt.selected { "option-btn selected" } else { "option-btn" });
        button
            .set_attribute("data-option", &opt.label)
            .map_err(WidgetError::dom)?;
        options.append_child(&button).map_err(WidgetError::dom)?;
    }
    card.append_child(&options).map_err(WidgetError::dom)?;

    let nav = button(doc, &view.advance.label)?;
    nav.set_class_name("nav-btn");
    if !view.advance.enabled {
        nav.set_attribute("disabled", "").map_err(WidgetError::dom)?;
    }
    card.append_child(&nav).map_err(WidgetError::dom)?;
    Ok(())
}

fn button(doc: &Document, label: &str) -> Result<Element, WidgetError> {
    let el = doc.create_element("button").map_err(WidgetError::dom)?;
    el.set_attribute("type", "button").map_err(WidgetError::dom)?;
    el.set_text_content(Some(label));
    Ok(el)
}

fn apply_result(els: &Elements, view: &ResultView) -> Result<(), WidgetError> {
    els.title.set_text_content(Some(&view.heading));
    els.description.set_text_content(Some(&view.description));
    els.image
        .set_attribute("src", &view.image_src)
        .map_err(WidgetError::dom)
}

fn set_hidden(el: &Element, hidden: bool) -> Result<(), WidgetError> {
    let classes = el.class_list();
    let toggled = if hidden {
        classes.add_1(HIDDEN)
    } else {
        classes.remove_1(HIDDEN)
    };
    toggled.map_err(WidgetError::dom)
}

// --- Canvas -------------------------------------------------------------------

/// Converts a reported viewport size to a canvas dimension.
pub(crate) fn canvas_extent(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

fn resize_canvas(win: &Window, canvas: &HtmlCanvasElement) {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let width = canvas_extent(read(win.inner_width()));
    let height = canvas_extent(read(win.inner_height()));
    canvas.set_width(width);
    canvas.set_height(height);
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn launch_confetti(handle: &WidgetHandle) {
    let (settings, canvas, ctx) = {
        let w = handle.borrow();
        (
            w.confetti.clone(),
            w.elements.canvas.clone(),
            w.elements.ctx.clone(),
        )
    };
    let mut rng = session_rng(performance_now());
    let session = AnimationSession::launch(
        &settings,
        canvas.width() as f64,
        canvas.height() as f64,
        &mut rng,
    );
    tracing::info!(
        particles = session.particles().len(),
        frames = session.total_frames(),
        "confetti launched"
    );
    start_confetti_loop(session, canvas, ctx);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

// Runs until the session finishes, then drops its own callback.
fn start_confetti_loop(
    mut session: AnimationSession,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        let (width, height) = (canvas.width() as f64, canvas.height() as f64);
        ctx.clear_rect(0.0, 0.0, width, height);
        match session.step() {
            FrameStatus::Running => {
                paint_particles(&ctx, session.particles());
                let scheduled = match f.borrow().as_ref() {
                    Some(cb) => request_frame(cb),
                    None => Err("frame callback released".to_string()),
                };
                if let Err(err) = scheduled {
                    tracing::warn!(%err, "confetti frame not scheduled, clearing");
                    ctx.clear_rect(0.0, 0.0, width, height);
                    let _ = f.borrow_mut().take();
                }
            }
            FrameStatus::Finished => {
                tracing::debug!(frames = session.frame_count(), "confetti finished");
                let _ = f.borrow_mut().take();
            }
        }
    }) as Box<dyn FnMut(f64)>));
    let first = g.borrow().as_ref().map(request_frame);
    if let Some(Err(err)) = first {
        tracing::warn!(%err, "confetti not started");
        let _ = g.borrow_mut().take();
    }
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Result<i32, String> {
    frame_request(window().map(|w| w.request_animation_frame(cb.as_ref().unchecked_ref())))
}

/// Flattens a `requestAnimationFrame` attempt; `None` means there was no window.
pub(crate) fn frame_request<E: std::fmt::Debug>(
    request: Option<Result<i32, E>>,
) -> Result<i32, String> {
    match request {
        Some(Ok(id)) => Ok(id),
        Some(Err(err)) => Err(format!("{err:?}")),
        None => Err("no window".to_string()),
    }
}

#[allow(deprecated)]
fn paint_particles(ctx: &CanvasRenderingContext2d, particles: &[Particle]) {
    for p in particles {
        ctx.save();
        ctx.translate(p.x, p.y).ok();
        ctx.rotate(p.rotation).ok();
        ctx.set_fill_style(&JsValue::from_str(&p.color));
        ctx.fill_rect(-p.size / 2.0, -p.size / 2.0, p.size, p.size);
        ctx.restore();
    }
}
