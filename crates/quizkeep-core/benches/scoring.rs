use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizkeep_core::evaluator::{completion, evaluate, matches};
use quizkeep_core::model::{AnswerKey, Question, Submission};

fn make_key(questions: usize) -> AnswerKey {
    AnswerKey::new(
        "bench",
        "Bench",
        (0..questions).map(|i| {
            (
                format!("question{i}"),
                Question::new(
                    format!("Question {i}"),
                    &["antigua", "egipto", "grecia", "roma"],
                    1.0,
                ),
            )
        }),
    )
    .unwrap()
}

fn make_submission(questions: usize) -> Submission {
    (0..questions)
        .map(|i| {
            let answer = if i % 2 == 0 {
                "Durante el Imperio Romano y en Egipto"
            } else {
                "no lo sé"
            };
            (format!("question{i}"), answer)
        })
        .collect()
}

fn bench_matches(c: &mut Criterion) {
    let mut group = c.benchmark_group("matches");
    let accepted = ["antigua", "egipto", "grecia", "roma"];

    group.bench_function("hit_first", |b| {
        b.iter(|| matches(black_box("la antigua roma"), black_box(&accepted)))
    });

    group.bench_function("miss", |b| {
        b.iter(|| matches(black_box("mesopotamia y babilonia"), black_box(&accepted)))
    });

    group.bench_function("long_answer", |b| {
        let answer = "texto libre ".repeat(200) + "Grecia";
        b.iter(|| matches(black_box(&answer), black_box(&accepted)))
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for size in [2usize, 20, 200] {
        let key = make_key(size);
        let submission = make_submission(size);
        group.bench_function(format!("questions={size}"), |b| {
            b.iter(|| evaluate(black_box(&submission), black_box(&key)))
        });
    }

    let key = make_key(200);
    let submission = make_submission(200);
    group.bench_function("completion/questions=200", |b| {
        b.iter(|| completion(black_box(&submission), black_box(&key)))
    });

    group.finish();
}

criterion_group!(benches, bench_matches, bench_evaluate);
criterion_main!(benches);
