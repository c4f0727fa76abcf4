//! Full quiz runs from a question bank through scoring.

use kruprep_core::{
    CategoryFilter, Countdown, Event, MemoryRepository, Question, QuestionDraft, QuestionStore,
    QuizPhase, QuizSession, SummaryTier,
};
use proptest::prelude::*;

fn make_questions(n: usize) -> Vec<Question> {
    (1..=n)
        .map(|i| Question {
            id: format!("q{i}"),
            category: if i % 2 == 0 {
                "กฎหมายการศึกษา".to_string()
            } else {
                "ความเป็นครู".to_string()
            },
            question: format!("คำถามข้อที่ {i}"),
            choices: vec!["ถูก".to_string(), "ผิด".to_string()],
            answer: "ถูก".to_string(),
            explanation: format!("คำอธิบายข้อที่ {i}"),
        })
        .collect()
}

/// Answers the current question and moves on.
fn answer_current(session: &mut QuizSession, correctly: bool) {
    let question = session.current_question().unwrap();
    let id = question.id.clone();
    let choice = if correctly {
        question.answer.clone()
    } else {
        question
            .choices
            .iter()
            .find(|c| **c != question.answer)
            .unwrap()
            .clone()
    };
    session.select_choice(&id, &choice);
    session.confirm_answer().unwrap();
}

#[test]
fn three_of_five_scores_sixty_percent() {
    let mut session = QuizSession::with_seed(make_questions(5), 11);
    let started = session.start(&CategoryFilter::All, 5).unwrap();
    assert!(matches!(
        started,
        Event::QuizStarted {
            question_count: 5,
            duration_secs: 300,
            ..
        }
    ));

    for _ in 0..3 {
        answer_current(&mut session, true);
        session.next();
    }
    answer_current(&mut session, false);
    session.next();

    // Last question left untouched.
    let completed = session.end().unwrap();
    assert!(matches!(
        completed,
        Event::QuizCompleted {
            score: 3,
            total: 5,
            percentage: 60,
            ..
        }
    ));

    let summary = session.summary().unwrap();
    assert_eq!(summary.percentage, 60);
    assert_eq!(summary.tier(), SummaryTier::Close);
    assert_eq!(session.results().len(), 5);
    let unanswered: Vec<_> = session
        .results()
        .iter()
        .filter(|r| r.selected.is_none())
        .collect();
    assert_eq!(unanswered.len(), 1);
    assert!(!unanswered[0].correct);
}

#[test]
fn quiz_draws_from_a_seeded_bank() {
    let mut store = QuestionStore::new(Box::new(MemoryRepository::new()));
    store
        .create(QuestionDraft {
            category: "ความเป็นครู".to_string(),
            question: "คำถามเพิ่มเติม".to_string(),
            choices: vec!["ก".to_string(), "ข".to_string()],
            answer: "ก".to_string(),
            explanation: "คำอธิบาย".to_string(),
        })
        .unwrap();
    let snapshot = store.list_all().unwrap();
    assert_eq!(snapshot.len(), 4);

    let mut session = QuizSession::with_seed(snapshot, 5);
    session.start(&CategoryFilter::All, 10).unwrap();
    // Asking for more than the bank holds draws the whole bank.
    assert_eq!(session.question_set().len(), 4);

    while session.phase() == QuizPhase::InProgress {
        answer_current(&mut session, true);
        session.next();
    }
    assert_eq!(session.summary().unwrap().percentage, 100);
    assert_eq!(session.summary().unwrap().tier(), SummaryTier::Excellent);
}

#[test]
fn category_filter_restricts_the_draw() {
    let mut session = QuizSession::with_seed(make_questions(6), 3);
    session
        .start(&CategoryFilter::Only("กฎหมายการศึกษา".to_string()), 10)
        .unwrap();
    assert_eq!(session.question_set().len(), 3);
    assert!(session
        .question_set()
        .iter()
        .all(|q| q.category == "กฎหมายการศึกษา"));
}

#[test]
fn revisiting_a_question_overwrites_the_answer() {
    let mut session = QuizSession::with_seed(make_questions(2), 7);
    session.start(&CategoryFilter::All, 2).unwrap();

    answer_current(&mut session, false);
    session.next();
    answer_current(&mut session, true);
    session.previous();

    // Back on the first question the lock is released, so it can be redone.
    assert!(!session.is_feedback_locked());
    answer_current(&mut session, true);
    session.next();
    let completed = session.next().unwrap();
    assert!(matches!(
        completed,
        Event::QuizCompleted {
            score: 2,
            total: 2,
            percentage: 100,
            ..
        }
    ));
}

#[test]
fn expiry_during_feedback_waits_for_navigation() {
    let mut session =
        QuizSession::with_seed(make_questions(2), 13).with_seconds_per_question(1);
    session.start(&CategoryFilter::All, 2).unwrap();
    assert_eq!(session.remaining_secs(), 2);

    answer_current(&mut session, true);
    assert!(session.is_feedback_locked());

    // The clock runs out while feedback is on screen; the quiz holds on.
    assert!(session.tick().is_none());
    assert!(session.tick().is_none());
    assert_eq!(session.remaining_secs(), 0);
    assert_eq!(session.phase(), QuizPhase::InProgress);

    let completed = session.next().unwrap();
    assert!(matches!(completed, Event::QuizCompleted { score: 1, total: 2, .. }));
    assert_eq!(session.phase(), QuizPhase::Results);
    assert!(session.results()[1].selected.is_none());
}

#[test]
fn expiry_without_feedback_ends_immediately_and_only_once() {
    let mut session =
        QuizSession::with_seed(make_questions(1), 17).with_seconds_per_question(2);
    session.start(&CategoryFilter::All, 1).unwrap();

    assert!(session.tick().is_none());
    let completed = session.tick();
    assert!(matches!(completed, Some(Event::QuizCompleted { .. })));
    assert_eq!(session.phase(), QuizPhase::Results);

    // Further ticks are inert once the run is over.
    assert!(session.tick().is_none());
    assert_eq!(session.remaining_secs(), 0);
}

#[test]
fn reset_returns_to_setup_for_another_round() {
    let mut session = QuizSession::with_seed(make_questions(3), 19);
    session.start(&CategoryFilter::All, 3).unwrap();
    answer_current(&mut session, true);
    session.end().unwrap();

    let reset = session.reset();
    assert!(matches!(reset, Some(Event::QuizReset { .. })));
    assert_eq!(session.phase(), QuizPhase::Setup);
    assert!(session.question_set().is_empty());
    assert!(session.results().is_empty());

    session.start(&CategoryFilter::All, 3).unwrap();
    assert_eq!(session.question_set().len(), 3);
    assert_eq!(session.remaining_secs(), 180);
}

#[test]
fn event_stream_follows_the_run() {
    let mut session = QuizSession::with_seed(make_questions(1), 23);
    let mut events = Vec::new();

    events.push(session.start(&CategoryFilter::All, 1).unwrap());
    let question = session.current_question().unwrap();
    let (id, answer) = (question.id.clone(), question.answer.clone());
    session.select_choice(&id, &answer);
    events.push(session.confirm_answer().unwrap());
    if let Some(event) = session.next() {
        events.push(event);
    }

    assert!(matches!(events[0], Event::QuizStarted { .. }));
    assert!(matches!(events[1], Event::AnswerConfirmed { correct: true, .. }));
    assert!(matches!(events[2], Event::QuizCompleted { .. }));

    let serialized = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(serialized["type"], "QuizStarted");
    assert_eq!(serialized["category"], "ทั้งหมด");
}

mod draw_properties {
    use super::*;

    proptest! {
        #[test]
        fn draw_size_is_min_of_count_and_pool(
            pool_size in 1usize..40,
            count in 1usize..60,
            seed in any::<u64>(),
        ) {
            let pool = make_questions(pool_size);
            let mut session = QuizSession::with_seed(pool.clone(), seed);
            session.start(&CategoryFilter::All, count).unwrap();
            prop_assert_eq!(session.question_set().len(), pool_size.min(count));
        }

        #[test]
        fn drawn_questions_are_distinct_members_of_the_pool(
            pool_size in 1usize..40,
            count in 1usize..60,
            seed in any::<u64>(),
        ) {
            let pool = make_questions(pool_size);
            let mut session = QuizSession::with_seed(pool.clone(), seed);
            session.start(&CategoryFilter::All, count).unwrap();

            let mut ids: Vec<_> = session
                .question_set()
                .iter()
                .map(|q| q.id.clone())
                .collect();
            let drawn = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), drawn);
            for question in session.question_set() {
                prop_assert!(pool.iter().any(|p| p.id == question.id));
            }
        }

        #[test]
        fn countdown_never_underflows(duration in 0u64..600, ticks in 0usize..700) {
            let mut countdown = Countdown::default();
            countdown.start(duration);
            for _ in 0..ticks {
                let remaining = countdown.tick();
                prop_assert!(remaining <= duration);
            }
        }
    }
}
