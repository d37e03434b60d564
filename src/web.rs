//! Browser side: canvas, speech synthesis, timers and DOM quiz elements behind the
//! `host` traits, plus event wiring and the requestAnimationFrame loop.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlInputElement,
    SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice, Window, window,
};

use crate::config::PageConfig;
use crate::error::PageError;
use crate::host::{
    Cancel, Continuation, Point, QuizSurface, Rect, RenderSurface, SpeechService, TimerService,
};
use crate::particles::ParticleEngine;
use crate::spelling::{SharedGame, SpellingGame};

// --- Host implementations ---------------------------------------------------

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl RenderSurface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn clear(&mut self, region: Rect) {
        self.ctx.clear_rect(region.x, region.y, region.width, region.height);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(center.x, center.y, radius, 0.0, TAU) {
            log::warn!("arc at ({}, {}) r={radius} failed: {e:?}", center.x, center.y);
        }
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

pub struct WebSpeech {
    synth: SpeechSynthesis,
}

impl WebSpeech {
    fn find_voice(&self, name: &str) -> Option<SpeechSynthesisVoice> {
        self.synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
            .find(|v| v.name() == name)
    }
}

impl SpeechService for WebSpeech {
    fn speak(&self, text: &str, voice: Option<&str>, on_end: Option<Continuation>) {
        let utterance = match SpeechSynthesisUtterance::new_with_text(text) {
            Ok(u) => u,
            Err(e) => {
                log::warn!("cannot create utterance for {text:?}: {e:?}");
                return;
            }
        };
        if let Some(name) = voice {
            utterance.set_voice(self.find_voice(name).as_ref());
        }
        if let Some(on_end) = on_end {
            // Whichever of end / error arrives first runs the continuation.
            let slot = Rc::new(RefCell::new(Some(on_end)));
            let finish = Closure::wrap(Box::new(move || {
                let cb = slot.borrow_mut().take();
                if let Some(cb) = cb {
                    cb();
                }
            }) as Box<dyn FnMut()>)
            .into_js_value();
            utterance.set_onend(Some(finish.unchecked_ref()));
            utterance.set_onerror(Some(finish.unchecked_ref()));
        }
        self.synth.speak(&utterance);
    }

    fn cancel_all(&self) {
        self.synth.cancel();
    }

    fn list_voices(&self) -> Vec<String> {
        self.synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
            .map(|v| v.name())
            .collect()
    }
}

pub struct WebTimers;

impl TimerService for WebTimers {
    type Handle = Timeout;

    fn schedule_once(&self, delay_ms: u32, callback: Continuation) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}

impl Cancel for Timeout {
    fn cancel(self) {
        drop(Timeout::cancel(self));
    }
}

pub struct DomQuiz {
    input: HtmlInputElement,
    message: Element,
}

impl QuizSurface for DomQuiz {
    fn read_input_value(&self) -> String {
        self.input.value()
    }

    fn clear_input_value(&self) {
        self.input.set_value("");
    }

    fn set_feedback_text(&self, text: &str) {
        self.message.set_text_content(Some(text));
    }
}

// --- Page anchor --------------------------------------------------------------

type Particles = Rc<RefCell<ParticleEngine<CanvasSurface>>>;
type BrowserGame = SharedGame<WebSpeech, WebTimers, DomQuiz>;

pub(crate) struct Page {
    game: BrowserGame,
}

impl Page {
    pub(crate) fn check_answer(&self) {
        match self.game.try_borrow_mut() {
            Ok(mut game) => {
                game.submit_from_surface();
            }
            Err(_) => log::warn!("check_answer while game busy"),
        }
    }

    pub(crate) fn skip_word(&self) {
        match self.game.try_borrow_mut() {
            Ok(mut game) => game.skip_round(),
            Err(_) => log::warn!("skip_word while game busy"),
        }
    }
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

pub(crate) fn with_page(f: impl FnOnce(&Page)) {
    PAGE.with(|cell| match cell.borrow().as_ref() {
        Some(page) => f(page),
        None => log::warn!("page not started; call start_page() first"),
    });
}

// --- Startup ----------------------------------------------------------------

pub(crate) fn start(config: PageConfig) -> Result<(), PageError> {
    config.validate()?;
    if PAGE.with(|cell| cell.borrow().is_some()) {
        log::warn!("start_page called twice; keeping the running page");
        return Ok(());
    }
    let win = window().ok_or(PageError::NoWindow)?;
    let doc = win.document().ok_or(PageError::NoDocument)?;

    let canvas = particle_canvas(&doc, &config.canvas_id)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(PageError::NoCanvasContext)?
        .dyn_into()
        .map_err(|_| PageError::NoCanvasContext)?;
    let mut engine = ParticleEngine::new(CanvasSurface { canvas, ctx }, &config);
    let (w, h) = viewport(&win);
    engine.resize(w, h);
    let particles: Particles = Rc::new(RefCell::new(engine));

    let input: HtmlInputElement = element(&doc, &config.input_id, "input element")?;
    let message = doc
        .get_element_by_id(&config.message_id)
        .ok_or_else(|| PageError::MissingElement(config.message_id.clone()))?;
    let synth = win.speech_synthesis().map_err(|_| PageError::SpeechUnavailable)?;
    let game = SpellingGame::new(
        &config,
        WebSpeech { synth },
        WebTimers,
        DomQuiz { input: input.clone(), message },
    )?;

    // Pointer moves spawn a burst at the pointer
    {
        let particles = particles.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            if let Ok(mut engine) = particles.try_borrow_mut() {
                engine.spawn_burst(Point::new(evt.client_x() as f64, evt.client_y() as f64));
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Keep the canvas matched to the viewport
    {
        let particles = particles.clone();
        let closure = Closure::wrap(Box::new(move || {
            let Some(win) = window() else { return };
            let (w, h) = viewport(&win);
            if let Ok(mut engine) = particles.try_borrow_mut() {
                engine.resize(w, h);
            }
        }) as Box<dyn FnMut()>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Enter in the answer box submits
    {
        let game = game.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            if evt.key() != "Enter" {
                return;
            }
            evt.prevent_default();
            if let Ok(mut game) = game.try_borrow_mut() {
                game.submit_from_surface();
            }
        }) as Box<dyn FnMut(_)>);
        input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_animation_loop(particles);
    game.borrow_mut().start();
    log::info!("spell-sparkle started, {} words", config.words.len());

    PAGE.with(|cell| cell.replace(Some(Page { game })));
    Ok(())
}

fn particle_canvas(doc: &Document, id: &str) -> Result<HtmlCanvasElement, PageError> {
    if let Some(el) = doc.get_element_by_id(id) {
        return el.dyn_into().map_err(|_| PageError::WrongElementType {
            id: id.to_string(),
            expected: "canvas",
        });
    }
    // Full-window overlay that never eats clicks meant for the quiz
    let c: HtmlCanvasElement = doc
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| PageError::NoCanvasContext)?;
    c.set_id(id);
    c.set_attribute(
        "style",
        "position:fixed; left:0; top:0; pointer-events:none; z-index:0;",
    )
    .ok();
    doc.body().ok_or(PageError::NoDocument)?.append_child(&c)?;
    Ok(c)
}

fn element<T: JsCast>(doc: &Document, id: &str, expected: &'static str) -> Result<T, PageError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| PageError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| PageError::WrongElementType { id: id.to_string(), expected })
}

fn viewport(win: &Window) -> (f64, f64) {
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

// --- Animation loop -------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_animation_loop(particles: Particles) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        if let Ok(mut engine) = particles.try_borrow_mut() {
            engine.advance_frame();
        }
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(callback: &FrameCallback) {
    let Some(w) = window() else { return };
    if let Some(closure) = callback.borrow().as_ref() {
        if let Err(e) = w.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::warn!("requestAnimationFrame failed, particle loop stopped: {e:?}");
        }
    }
}
