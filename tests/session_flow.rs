use chrono::TimeDelta;
use rand::SeedableRng;
use rand::rngs::StdRng;

use mediwise::engine::{OrderMode, QuestionStatus, QuizSession, SessionStatus, fixed_clock};
use mediwise::{AnswerOption, Question, load_catalog_from_json, markup};

fn question(id: &str, correct: &str) -> Question {
    Question {
        id: id.to_string(),
        stem: format!("Stem of {id}"),
        options: ["A", "B", "C", "D", "E"]
            .into_iter()
            .map(|key| AnswerOption {
                key: key.to_string(),
                text: format!("Option {key}"),
            })
            .collect(),
        correct: correct.to_string(),
        explanation: vec![format!("Because {correct}.")],
        difficulty: None,
        topic: None,
        vignette_title: None,
        image: None,
    }
}

fn bank() -> Vec<Question> {
    (1..=5).map(|n| question(&format!("q{n}"), "A")).collect()
}

fn start(mode: OrderMode) -> QuizSession {
    let mut rng = StdRng::seed_from_u64(7);
    QuizSession::start(bank(), mode, &mut rng, fixed_clock())
}

#[test]
fn sequential_run_with_a_jump_to_the_end() {
    let mut session = start(OrderMode::Sequential);
    assert_eq!(session.order(), &[0, 1, 2, 3, 4]);

    assert!(session.select("A"));
    assert!(session.submit());
    assert!(session.go_next());

    assert!(session.select("B"));
    assert!(session.submit());

    assert!(session.jump_to(4));
    assert!(session.select("A"));
    session.clock_mut().advance(TimeDelta::seconds(95));
    assert!(session.submit());

    assert_eq!(session.status(), SessionStatus::Finished);

    let results = session.results();
    assert_eq!(results.score, 2);
    assert_eq!(results.total, 5);
    assert_eq!(results.answered, 3);
    assert_eq!(results.unanswered(), 2);
    assert_eq!(results.percentage, 40);
    assert_eq!(results.elapsed.to_string(), "01:35");

    let missed: Vec<&str> = results.missed.iter().map(|m| m.question.id.as_str()).collect();
    assert_eq!(missed, ["q2"]);
    assert_eq!(results.missed[0].display_index, 2);
    assert_eq!(results.missed[0].chosen_key, "B");
}

#[test]
fn revealed_answers_are_final() {
    let mut session = start(OrderMode::Sequential);

    assert!(!session.submit());
    assert!(session.select("C"));
    assert!(session.submit());

    assert!(!session.select("A"));
    assert!(!session.clear());
    assert!(!session.submit());
    assert_eq!(session.current_answer(), Some("C"));
    assert_eq!(
        session.status_at(0),
        Some(QuestionStatus::Revealed {
            chosen: "C",
            correct: false
        })
    );
}

#[test]
fn elapsed_time_stops_when_the_session_ends() {
    let mut session = start(OrderMode::Random);
    session.clock_mut().advance(TimeDelta::seconds(30));
    session.end();
    session.clock_mut().advance(TimeDelta::seconds(600));

    assert!(session.is_finished());
    assert_eq!(session.elapsed(), TimeDelta::seconds(30));
    assert_eq!(session.results().score, 0);
}

#[test]
fn random_order_is_a_permutation_of_the_bank() {
    let session = start(OrderMode::Random);

    let mut order = session.order().to_vec();
    order.sort_unstable();
    assert_eq!(order, [0, 1, 2, 3, 4]);
}

#[test]
fn markup_renders_safely() {
    assert_eq!(
        markup::render("A **bold** and ==key== [red]stop[/red]"),
        r#"A <strong>bold</strong> and <mark class="hl-yellow">key</mark> <mark class="hl-red">stop</mark>"#
    );
    assert_eq!(
        markup::render("<script>alert(1)</script>"),
        "&lt;script&gt;alert(1)&lt;/script&gt;"
    );
}

#[test]
fn bundled_catalog_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/catalog.json");
    let catalog = load_catalog_from_json(path).unwrap();

    assert!(!catalog.systems.is_empty());
    let delirium = catalog.find_topic("delirium").unwrap();
    let topic = catalog.topic(delirium).unwrap();
    assert!(topic.is_quiz());
    assert_eq!(topic.questions().map(<[Question]>::len), Some(5));

    let stroke = catalog.topic(catalog.find_topic("stroke").unwrap()).unwrap();
    assert!(!stroke.is_quiz());
}
