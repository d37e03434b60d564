// Recording fakes for the host traits. Completions and timers only fire when a
// test asks for them, mirroring the browser's "later, on the same thread".
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use spell_sparkle::host::{
    Cancel, Continuation, Point, QuizSurface, Rect, RenderSurface, SpeechService, TimerService,
};

// --- Speech -----------------------------------------------------------------

pub struct Spoken {
    pub text: String,
    pub voice: Option<String>,
    on_end: Option<Continuation>,
}

#[derive(Default)]
pub struct SpeechLog {
    pub utterances: Vec<Spoken>,
    pub cancels: usize,
    pub voices: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeSpeech {
    pub log: Rc<RefCell<SpeechLog>>,
}

impl FakeSpeech {
    pub fn texts(&self) -> Vec<String> {
        self.log.borrow().utterances.iter().map(|u| u.text.clone()).collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.log.borrow().utterances.last().map(|u| u.text.clone())
    }

    pub fn last_voice(&self) -> Option<String> {
        self.log.borrow().utterances.last().and_then(|u| u.voice.clone())
    }

    pub fn set_voices(&self, names: &[&str]) {
        self.log.borrow_mut().voices = names.iter().map(|n| n.to_string()).collect();
    }

    /// Fire the completion of utterance `idx`. Returns false if it had none.
    pub fn finish(&self, idx: usize) -> bool {
        let cb = self.log.borrow_mut().utterances[idx].on_end.take();
        match cb {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }
}

impl SpeechService for FakeSpeech {
    fn speak(&self, text: &str, voice: Option<&str>, on_end: Option<Continuation>) {
        self.log.borrow_mut().utterances.push(Spoken {
            text: text.to_string(),
            voice: voice.map(str::to_string),
            on_end,
        });
    }

    fn cancel_all(&self) {
        self.log.borrow_mut().cancels += 1;
    }

    fn list_voices(&self) -> Vec<String> {
        self.log.borrow().voices.clone()
    }
}

// --- Timers -----------------------------------------------------------------

#[derive(Default)]
struct TimerQueue {
    now: u64,
    next_id: u64,
    pending: Vec<(u64, u64, Continuation)>,
}

/// One-shot timers on a manual clock.
#[derive(Clone, Default)]
pub struct ManualTimers {
    queue: Rc<RefCell<TimerQueue>>,
}

pub struct ManualHandle {
    id: u64,
    queue: Weak<RefCell<TimerQueue>>,
}

impl Cancel for ManualHandle {
    fn cancel(self) {
        if let Some(q) = self.queue.upgrade() {
            q.borrow_mut().pending.retain(|(id, _, _)| *id != self.id);
        }
    }
}

impl TimerService for ManualTimers {
    type Handle = ManualHandle;

    fn schedule_once(&self, delay_ms: u32, callback: Continuation) -> ManualHandle {
        let mut q = self.queue.borrow_mut();
        let id = q.next_id;
        q.next_id += 1;
        let due = q.now + delay_ms as u64;
        q.pending.push((id, due, callback));
        ManualHandle { id, queue: Rc::downgrade(&self.queue) }
    }
}

impl ManualTimers {
    pub fn now(&self) -> u64 {
        self.queue.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Move the clock forward, firing due timers in due order.
    pub fn advance(&self, ms: u64) {
        let target = self.queue.borrow().now + ms;
        loop {
            let next = {
                let mut q = self.queue.borrow_mut();
                let idx = q
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, due, _))| *due <= target)
                    .min_by_key(|(_, (id, due, _))| (*due, *id))
                    .map(|(i, _)| i);
                idx.map(|i| {
                    let (_, due, cb) = q.pending.remove(i);
                    q.now = due;
                    cb
                })
            };
            match next {
                Some(cb) => cb(),
                None => break,
            }
        }
        self.queue.borrow_mut().now = target;
    }
}

// --- Quiz surface -----------------------------------------------------------

#[derive(Default)]
pub struct QuizState {
    pub input: String,
    pub feedback: String,
    pub input_clears: usize,
}

#[derive(Clone, Default)]
pub struct FakeQuiz {
    pub state: Rc<RefCell<QuizState>>,
}

impl FakeQuiz {
    pub fn type_text(&self, text: &str) {
        self.state.borrow_mut().input = text.to_string();
    }

    pub fn input(&self) -> String {
        self.state.borrow().input.clone()
    }

    pub fn feedback(&self) -> String {
        self.state.borrow().feedback.clone()
    }
}

impl QuizSurface for FakeQuiz {
    fn read_input_value(&self) -> String {
        self.state.borrow().input.clone()
    }

    fn clear_input_value(&self) {
        let mut s = self.state.borrow_mut();
        s.input.clear();
        s.input_clears += 1;
    }

    fn set_feedback_text(&self, text: &str) {
        self.state.borrow_mut().feedback = text.to_string();
    }
}

// --- Canvas -----------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum Draw {
    Clear(Rect),
    Circle { center: Point, radius: f64, color: String },
    Resize(u32, u32),
}

#[derive(Default)]
pub struct RecordingCanvas {
    pub width: u32,
    pub height: u32,
    pub calls: Vec<Draw>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, calls: Vec::new() }
    }

    pub fn circles(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Draw::Circle { .. })).count()
    }
}

impl RenderSurface for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn clear(&mut self, region: Rect) {
        self.calls.push(Draw::Clear(region));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) {
        self.calls.push(Draw::Circle { center, radius, color: color.to_string() });
    }

    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.calls.push(Draw::Resize(width, height));
    }
}
