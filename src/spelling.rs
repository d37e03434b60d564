//! Spoken spelling quiz.
//!
//! A round picks a word uniformly at random (immediate repeats allowed), speaks
//! "Spell the word {word}", waits for typed input, compares it case-insensitively,
//! speaks a verdict and starts the next round after a fixed delay. There is no
//! terminal state.
//!
//! All waiting is done through host continuations (speech completion, one-shot
//! timers). Each continuation holds a weak handle to the game, so a dropped game
//! simply ignores late callbacks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::PageConfig;
use crate::error::PageError;
use crate::host::{Cancel, Continuation, QuizSurface, SpeechService, TimerService};

pub const CORRECT_UTTERANCE: &str = "Your answer is correct.";
pub const INCORRECT_UTTERANCE: &str = "The word you typed is incorrect.";

pub fn prompt_text(word: &str) -> String {
    format!("Spell the word {word}")
}

pub fn correction_text(word: &str) -> String {
    format!("The correct word is: {word}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Speaking,
    AwaitingInput,
    Evaluating,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Utterance {
    Prompt,
    Repeat,
}

pub type SharedGame<Sp, Tm, Ui> = Rc<RefCell<SpellingGame<Sp, Tm, Ui>>>;

pub struct SpellingGame<Sp, Tm: TimerService, Ui> {
    this: Weak<RefCell<SpellingGame<Sp, Tm, Ui>>>,
    speech: Sp,
    timers: Tm,
    ui: Ui,
    words: Vec<String>,
    rng: StdRng,
    current_word: String,
    phase: Phase,
    /// Held from the start of a prompt until its last utterance (repeat included) ends.
    speaking: bool,
    /// Bumped whenever prompt speech starts or is cancelled; completions from older
    /// generations are stale.
    generation: u64,
    pending_advance: Option<Tm::Handle>,
    round_delay_ms: u32,
    preferred_voice: String,
    repeat_prompt: bool,
    rounds: u64,
}

impl<Sp, Tm, Ui> SpellingGame<Sp, Tm, Ui>
where
    Sp: SpeechService + 'static,
    Tm: TimerService + 'static,
    Ui: QuizSurface + 'static,
{
    /// Build an idle game. Call [`start`](Self::start) to speak the first word.
    pub fn new(
        config: &PageConfig,
        speech: Sp,
        timers: Tm,
        ui: Ui,
    ) -> Result<SharedGame<Sp, Tm, Ui>, PageError> {
        if config.words.is_empty() {
            return Err(PageError::EmptyWordList);
        }
        let words: Vec<String> = config.words.iter().map(|w| w.to_lowercase()).collect();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Rc::new_cyclic(|this| {
            RefCell::new(Self {
                this: this.clone(),
                speech,
                timers,
                ui,
                words,
                rng,
                current_word: String::new(),
                phase: Phase::Idle,
                speaking: false,
                generation: 0,
                pending_advance: None,
                round_delay_ms: config.round_delay_ms,
                preferred_voice: config.preferred_voice.clone(),
                repeat_prompt: config.repeat_prompt,
                rounds: 0,
            })
        }))
    }

    pub fn start(&mut self) {
        self.start_round();
    }

    /// Pick a new word, clear the feedback line and speak the prompt.
    pub fn start_round(&mut self) {
        self.cancel_pending_advance();
        let idx = self.rng.gen_range(0..self.words.len());
        self.current_word = self.words[idx].clone();
        self.rounds += 1;
        self.phase = Phase::Speaking;
        self.ui.set_feedback_text("");
        log::debug!("round {} word {:?}", self.rounds, self.current_word);
        let word = self.current_word.clone();
        self.speak_prompt(&word);
    }

    /// Speak the prompt for `word` unless a prompt is already in flight.
    /// Returns whether speech was started.
    pub fn speak_prompt(&mut self, word: &str) -> bool {
        if self.speaking {
            log::debug!("prompt for {word:?} dropped, speech already in flight");
            return false;
        }
        self.speech.cancel_all();
        self.generation += 1;
        self.speaking = true;
        let text = prompt_text(word);
        self.speak_tracked(text, Utterance::Prompt);
        true
    }

    /// Evaluate an answer. `None` when no round has started yet.
    pub fn submit_answer(&mut self, input: &str) -> Option<Verdict> {
        if self.phase == Phase::Idle {
            log::debug!("answer {input:?} ignored before the first round");
            return None;
        }
        self.phase = Phase::Evaluating;
        let verdict = if input.to_lowercase() == self.current_word {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        log::debug!("answer {input:?} for {:?}: {verdict:?}", self.current_word);
        match verdict {
            Verdict::Correct => {
                self.speak_feedback(CORRECT_UTTERANCE);
                self.ui.set_feedback_text("");
                self.phase = Phase::Correct;
            }
            Verdict::Incorrect => {
                self.ui.set_feedback_text(&correction_text(&self.current_word));
                self.speak_feedback(INCORRECT_UTTERANCE);
                self.phase = Phase::Incorrect;
            }
        }
        self.schedule_advance();
        self.ui.clear_input_value();
        Some(verdict)
    }

    /// Read the input box and submit it.
    pub fn submit_from_surface(&mut self) -> Option<Verdict> {
        let input = self.ui.read_input_value();
        self.submit_answer(&input)
    }

    /// Drop the pending advance and any speech, then start a new round now.
    pub fn skip_round(&mut self) {
        self.cancel_pending_advance();
        self.stop_speaking();
        self.start_round();
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending_advance.is_some()
    }

    /// Exact-name lookup in the current catalog; `None` selects the host default.
    fn resolve_voice(&self) -> Option<String> {
        let voices = self.speech.list_voices();
        if voices.iter().any(|v| *v == self.preferred_voice) {
            Some(self.preferred_voice.clone())
        } else {
            log::debug!("voice {:?} not available, using default", self.preferred_voice);
            None
        }
    }

    fn speak_tracked(&mut self, text: String, kind: Utterance) {
        let voice = self.resolve_voice();
        let generation = self.generation;
        let spoken = text.clone();
        let on_end = self.continuation(move |game| game.on_utterance_end(generation, kind, spoken));
        self.speech.speak(&text, voice.as_deref(), Some(on_end));
    }

    fn on_utterance_end(&mut self, generation: u64, kind: Utterance, text: String) {
        if generation != self.generation {
            log::debug!("ignoring completion of cancelled utterance {text:?}");
            return;
        }
        self.speaking = false;
        if kind == Utterance::Prompt {
            if self.phase == Phase::Speaking {
                self.phase = Phase::AwaitingInput;
            }
            if self.repeat_prompt {
                self.speaking = true;
                self.speak_tracked(text, Utterance::Repeat);
            }
        }
    }

    fn speak_feedback(&mut self, text: &str) {
        self.stop_speaking();
        let voice = self.resolve_voice();
        self.speech.speak(text, voice.as_deref(), None);
    }

    fn stop_speaking(&mut self) {
        self.speech.cancel_all();
        self.speaking = false;
        self.generation += 1;
    }

    fn schedule_advance(&mut self) {
        self.cancel_pending_advance();
        let callback = self.continuation(|game| {
            game.pending_advance = None;
            game.start_round();
        });
        self.pending_advance = Some(self.timers.schedule_once(self.round_delay_ms, callback));
    }

    fn cancel_pending_advance(&mut self) {
        if let Some(handle) = self.pending_advance.take() {
            handle.cancel();
        }
    }

    fn continuation(&self, f: impl FnOnce(&mut Self) + 'static) -> Continuation {
        let this = self.this.clone();
        Box::new(move || {
            let Some(game) = this.upgrade() else {
                return;
            };
            match game.try_borrow_mut() {
                Ok(mut game) => f(&mut *game),
                Err(_) => log::warn!("spelling game busy, host callback dropped"),
            };
        })
    }
}
