//! Collaborators the page logic talks to. The browser implementations live in
//! `web`; tests drive the same logic with recording fakes.

/// Screen-space point in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Deferred work handed to a host service and run later on the same thread.
pub type Continuation = Box<dyn FnOnce()>;

/// 2d drawing surface (the particle canvas).
pub trait RenderSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self, region: Rect);
    fn fill_circle(&mut self, center: Point, radius: f64, color: &str);
    /// Resizing drops whatever was drawn before.
    fn set_dimensions(&mut self, width: u32, height: u32);

    fn full_rect(&self) -> Rect {
        Rect { x: 0.0, y: 0.0, width: self.width(), height: self.height() }
    }
}

/// Text-to-speech with an asynchronously populated voice catalog.
pub trait SpeechService {
    /// Queue `text`. `voice` is an exact catalog name; `None` means host default.
    /// `on_end` runs once the utterance finishes (or is cancelled by the host).
    fn speak(&self, text: &str, voice: Option<&str>, on_end: Option<Continuation>);
    fn cancel_all(&self);
    fn list_voices(&self) -> Vec<String>;
}

/// Pending timer that can be called off before it fires.
pub trait Cancel {
    fn cancel(self);
}

pub trait TimerService {
    type Handle: Cancel;
    fn schedule_once(&self, delay_ms: u32, callback: Continuation) -> Self::Handle;
}

/// Answer input box and feedback line.
pub trait QuizSurface {
    fn read_input_value(&self) -> String;
    fn clear_input_value(&self);
    fn set_feedback_text(&self, text: &str);
}
