use serde::Serialize;

use crate::api::game::{GameContext, MiniGame};
use crate::api::types::SoundCue;
use crate::input::queue::InputEvent;

use super::{option_index, CUSTOM_ANSWER, CUSTOM_HINT, CUSTOM_NEXT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: &'static str,
    pub answers: &'static [&'static str],
    pub correct: usize,
    pub hint: &'static str,
}

const COORDINATE_QUESTIONS: [Question; 3] = [
    Question {
        prompt: "What does the 'X' number mean?",
        answers: &["↔️ Side-to-Side", "↕️ Up-and-Down", "🔄 Spinning"],
        correct: 0,
        hint: "X is the flat line that goes left and right!",
    },
    Question {
        prompt: "If the cat moves to Y = 5, where does it go?",
        answers: &["➡️ Right", "⬆️ Up", "⬅️ Left"],
        correct: 1,
        hint: "Y is the tall line! Plus (+) numbers go UP!",
    },
    Question {
        prompt: "Which number is always in the middle (the start)?",
        answers: &["10", "100", "0"],
        correct: 2,
        hint: "Zero is the center of the world!",
    },
];

const EVENT_QUESTIONS: [Question; 3] = [
    Question {
        prompt: "Which color is the 'Magic Rule' (Event) block?",
        answers: &["🟡 Yellow", "🔵 Blue", "🟣 Purple"],
        correct: 0,
        hint: "Rules are always YELLOW like a lightning bolt! ⚡",
    },
    Question {
        prompt: "What color is the 'Moving' (Motion) block?",
        answers: &["🟡 Yellow", "🔵 Blue", "🟣 Purple"],
        correct: 1,
        hint: "Moving is BLUE like the sky! 🏃‍♂️",
    },
    Question {
        prompt: "Which color is the 'Talking' (Looks) block?",
        answers: &["🟡 Yellow", "🔵 Blue", "🟣 Purple"],
        correct: 2,
        hint: "Talking is PURPLE! 🟣",
    },
];

const LOOP_QUESTIONS: [Question; 3] = [
    Question {
        prompt: "What color is the 'Again' (Repeat) block?",
        answers: &["🟡 Yellow", "🟠 Orange", "🔵 Blue"],
        correct: 1,
        hint: "Check the 'Again' game! The block looks like an Orange C!",
    },
    Question {
        prompt: "Which block looks like a 'C'?",
        answers: &["Move Block", "Repeat Block", "Say Block"],
        correct: 1,
        hint: "The Orange block has a big mouth like a C!",
    },
    Question {
        prompt: "If you want the cat to jump 3 times, which number goes in the block?",
        answers: &["1", "3", "0"],
        correct: 1,
        hint: "Type the number of jumps you want!",
    },
];

const CONDITION_QUESTIONS: [Question; 2] = [
    Question {
        prompt: "What color is the 'Sensing' (Feeling) block?",
        answers: &["Light Blue", "Red", "Green"],
        correct: 0,
        hint: "Sensing is LIGHT BLUE like water! 🧊",
    },
    Question {
        prompt: "The 'IF' block is the Cat's _______?",
        answers: &["Tail", "Brain", "Feet"],
        correct: 1,
        hint: "The IF block helps the cat make smart choices!",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizSet {
    Coordinates,
    Events,
    Loops,
    Conditions,
}

impl QuizSet {
    pub fn questions(self) -> &'static [Question] {
        match self {
            QuizSet::Coordinates => &COORDINATE_QUESTIONS,
            QuizSet::Events => &EVENT_QUESTIONS,
            QuizSet::Loops => &LOOP_QUESTIONS,
            QuizSet::Conditions => &CONDITION_QUESTIONS,
        }
    }
}

#[derive(Serialize)]
struct QuizView {
    set: QuizSet,
    number: usize,
    total: usize,
    question: Option<Question>,
    hint: Option<&'static str>,
    score: u32,
    done: bool,
}

/// Multiple-choice quiz over one question set. Every answer moves on; the
/// quiz is won by reaching the end, whatever the score.
pub struct QuizGame {
    set: QuizSet,
    current: usize,
    score: u32,
    hint_visible: bool,
    done: bool,
    won: bool,
}

impl QuizGame {
    pub fn new(set: QuizSet) -> Self {
        Self {
            set,
            current: 0,
            score: 0,
            hint_visible: false,
            done: false,
            won: false,
        }
    }

    pub fn set(&self) -> QuizSet {
        self.set
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        if self.done {
            return None;
        }
        self.set.questions().get(self.current)
    }

    fn answer(&mut self, ctx: &mut GameContext, a: f32) {
        let Some(question) = self.current_question() else {
            return;
        };
        let Some(choice) = option_index(a).filter(|i| *i < question.answers.len()) else {
            log::warn!("quiz: answer {} out of range", a);
            return;
        };

        if choice == question.correct {
            ctx.play(SoundCue::Collect);
            self.score += 1;
        } else {
            ctx.play(SoundCue::Pop);
        }
        self.hint_visible = false;

        if self.current + 1 < self.set.questions().len() {
            self.current += 1;
        } else {
            self.done = true;
            if !self.won {
                self.won = true;
                ctx.signal_win();
            }
        }
    }
}

impl MiniGame for QuizGame {
    fn name(&self) -> &'static str {
        "quiz"
    }

    fn handle_input(&mut self, ctx: &mut GameContext, event: &InputEvent) {
        let InputEvent::Custom { kind, a, .. } = *event else {
            return;
        };
        match kind {
            CUSTOM_ANSWER => self.answer(ctx, a),
            CUSTOM_HINT if !self.done => {
                ctx.play(SoundCue::Pop);
                self.hint_visible = !self.hint_visible;
            }
            CUSTOM_NEXT if self.done => {
                ctx.play(SoundCue::Fanfare);
                ctx.request_next();
            }
            _ => {}
        }
    }

    fn reset(&mut self, _ctx: &mut GameContext) {
        self.current = 0;
        self.score = 0;
        self.hint_visible = false;
        self.done = false;
    }

    fn view(&self) -> serde_json::Value {
        let question = self.current_question();
        let view = QuizView {
            set: self.set,
            number: self.current + 1,
            total: self.set.questions().len(),
            question: question.copied(),
            hint: question.filter(|_| self.hint_visible).map(|q| q.hint),
            score: self.score,
            done: self.done,
        };
        serde_json::to_value(view).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::testing::{press, send, wins};

    fn answer_all(game: &mut QuizGame, ctx: &mut GameContext, right: bool) {
        for q in game.set().questions() {
            let choice = if right { q.correct } else { (q.correct + 1) % q.answers.len() };
            send(game, ctx, CUSTOM_ANSWER, choice as f32);
        }
    }

    #[test]
    fn every_set_has_valid_answers() {
        for set in [
            QuizSet::Coordinates,
            QuizSet::Events,
            QuizSet::Loops,
            QuizSet::Conditions,
        ] {
            assert!(!set.questions().is_empty());
            for q in set.questions() {
                assert!(q.correct < q.answers.len(), "{}", q.prompt);
            }
        }
    }

    #[test]
    fn perfect_run_scores_and_wins() {
        let mut game = QuizGame::new(QuizSet::Coordinates);
        let mut ctx = GameContext::new();

        answer_all(&mut game, &mut ctx, true);
        assert!(game.is_done());
        assert_eq!(game.score(), 3);
        assert_eq!(wins(&mut ctx), 1);
    }

    #[test]
    fn wrong_answers_still_finish_the_quiz() {
        let mut game = QuizGame::new(QuizSet::Conditions);
        let mut ctx = GameContext::new();

        send(&mut game, &mut ctx, CUSTOM_ANSWER, 2.0);
        assert!(!game.is_done());
        send(&mut game, &mut ctx, CUSTOM_ANSWER, 0.0);
        assert!(game.is_done());
        assert_eq!(game.score(), 0);
        assert_eq!(wins(&mut ctx), 1);
    }

    #[test]
    fn out_of_range_answer_is_ignored() {
        let mut game = QuizGame::new(QuizSet::Events);
        let mut ctx = GameContext::new();

        send(&mut game, &mut ctx, CUSTOM_ANSWER, 7.0);
        assert_eq!(game.view()["number"], 1);
        assert!(ctx.sounds().is_empty());
    }

    #[test]
    fn answering_hides_the_hint() {
        let mut game = QuizGame::new(QuizSet::Loops);
        let mut ctx = GameContext::new();

        press(&mut game, &mut ctx, CUSTOM_HINT);
        assert_eq!(game.view()["hint"], LOOP_QUESTIONS[0].hint);
        send(&mut game, &mut ctx, CUSTOM_ANSWER, 1.0);
        assert!(game.view()["hint"].is_null());
    }

    #[test]
    fn continue_requires_done() {
        let mut game = QuizGame::new(QuizSet::Events);
        let mut ctx = GameContext::new();

        press(&mut game, &mut ctx, CUSTOM_NEXT);
        assert!(ctx.drain_signals().is_empty());

        answer_all(&mut game, &mut ctx, false);
        wins(&mut ctx);
        press(&mut game, &mut ctx, CUSTOM_NEXT);
        assert!(ctx.sounds().contains(&SoundCue::Fanfare.into()));
        assert_eq!(
            ctx.drain_signals(),
            vec![crate::api::game::GameSignal::NextRequested]
        );
    }

    #[test]
    fn replay_does_not_rewin() {
        let mut game = QuizGame::new(QuizSet::Coordinates);
        let mut ctx = GameContext::new();

        answer_all(&mut game, &mut ctx, true);
        game.reset(&mut ctx);
        answer_all(&mut game, &mut ctx, true);
        assert_eq!(wins(&mut ctx), 1);
    }
}
