use pdf_quiz::cli::Commands;
use pdf_quiz::{App, Config, QuizError};
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;

const DOCUMENT: &str = "Question: What is 2+2?\nAnswer: 4\n\n\
Q: Capital of France?\nA: Paris\n\n\
Q: Largest planet?\nA: Jupiter\n";

/// 临时目录里的会话文件 + 文档
fn setup(reshuffle: bool) -> (TempDir, Config, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let doc = dir.path().join("deck.txt");
    std::fs::write(&doc, DOCUMENT).unwrap();

    let config = Config {
        session_file: dir.path().join("session.json").display().to_string(),
        reshuffle_options: reshuffle,
        ..Config::default()
    };
    (dir, config, doc)
}

async fn run(app: &mut App, command: Commands, input: &str) -> anyhow::Result<String> {
    let mut output = Vec::new();
    app.run(command, Cursor::new(input.to_string()), &mut output)
        .await?;
    Ok(String::from_utf8(output).unwrap())
}

/// 根据当前会话的选项策略，构造"全部答对"或"全部答错"的输入
fn scripted_answers(app: &App, correct: bool) -> String {
    let questions = app.session().questions().unwrap().unwrap();
    let policy = app.session().policy().unwrap();

    let mut script = String::new();
    for (i, record) in questions.iter().enumerate() {
        let options = policy.options_for(&questions, i).unwrap();
        let pos = options
            .iter()
            .position(|o| (o == &record.answer) == correct)
            .unwrap();
        script.push_str(&format!("{}\n", pos + 1));
        script.push_str(if i + 1 == questions.len() { "s\n" } else { "n\n" });
    }
    script
}

#[tokio::test]
async fn test_upload_answer_and_score() {
    let (_dir, config, doc) = setup(false);
    let mut app = App::initialize(config.clone()).unwrap();

    let out = run(&mut app, Commands::Upload { file: doc, start: false }, "")
        .await
        .unwrap();
    assert!(out.contains("PDF processed successfully!"));
    assert!(out.contains("3 questions loaded from deck.txt"));

    let script = scripted_answers(&app, true);
    let out = run(&mut app, Commands::Test, &script).await.unwrap();
    assert!(out.contains("Question 3 of 3"));
    assert!(out.contains("Your score: 100%"));
    assert!(out.contains("Excellent work!"));

    // 重新打开会话文件，结果页面得到同样的分数
    let mut reopened = App::initialize(config).unwrap();
    let out = run(&mut reopened, Commands::Results { json: true }, "")
        .await
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["percent"], 100);
    assert_eq!(report["correct"], 3);
}

#[tokio::test]
async fn test_all_wrong_scores_zero() {
    let (_dir, config, doc) = setup(false);
    let mut app = App::initialize(config).unwrap();
    run(&mut app, Commands::Upload { file: doc, start: false }, "")
        .await
        .unwrap();

    let script = scripted_answers(&app, false);
    let out = run(&mut app, Commands::Test, &script).await.unwrap();
    assert!(out.contains("Your score: 0%"));
    assert!(out.contains("Try again!"));
    assert!(out.contains("Correct answer: Paris"));
}

#[test]
fn test_screens_without_upload_report_missing_data() {
    let (_dir, config, _doc) = setup(false);
    let mut app = App::initialize(config).unwrap();

    let err = tokio_test::block_on(run(&mut app, Commands::Test, "")).unwrap_err();
    let quiz_err = err.downcast_ref::<QuizError>().unwrap();
    assert!(quiz_err.redirects_to_upload());

    let err = tokio_test::block_on(run(&mut app, Commands::Results { json: false }, ""))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<QuizError>(),
        Some(QuizError::MissingSessionData { .. })
    ));
}

#[tokio::test]
async fn test_results_before_submit_report_missing_answers() {
    let (_dir, config, doc) = setup(false);
    let mut app = App::initialize(config).unwrap();
    run(&mut app, Commands::Upload { file: doc, start: false }, "")
        .await
        .unwrap();

    // 中途退出不保存作答
    let out = run(&mut app, Commands::Test, "1\nq\n").await.unwrap();
    assert!(out.contains("Answers were not saved."));

    let err = run(&mut app, Commands::Results { json: false }, "")
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<QuizError>().unwrap().user_message(),
        "No test results found. Please take the test first."
    );
}

#[tokio::test]
async fn test_retry_clears_answers_keeps_questions() {
    let (_dir, config, doc) = setup(false);
    let mut app = App::initialize(config).unwrap();
    run(&mut app, Commands::Upload { file: doc, start: false }, "")
        .await
        .unwrap();
    let script = scripted_answers(&app, true);
    run(&mut app, Commands::Test, &script).await.unwrap();
    let before = app.session().questions().unwrap();
    assert!(app.session().answers().unwrap().is_some());

    let out = run(&mut app, Commands::Retry, "q\n").await.unwrap();
    assert!(out.contains("Question 1 of 3"));
    assert!(!out.contains(" * "), "重新答题时没有已选项");
    assert_eq!(app.session().answers().unwrap(), None);
    assert_eq!(app.session().questions().unwrap(), before);
}

#[tokio::test]
async fn test_failed_upload_blocks_test() {
    let (dir, config, doc) = setup(false);
    let mut app = App::initialize(config).unwrap();
    run(&mut app, Commands::Upload { file: doc, start: false }, "")
        .await
        .unwrap();

    let missing = dir.path().join("missing.pdf");
    let err = run(&mut app, Commands::Upload { file: missing, start: true }, "")
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<QuizError>(),
        Some(QuizError::DocumentRead { .. })
    ));

    let err = run(&mut app, Commands::Test, "").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<QuizError>(),
        Some(QuizError::MissingSessionData { .. })
    ));
}

#[tokio::test]
async fn test_upload_with_start_and_status() {
    let (_dir, config, doc) = setup(true);
    let mut app = App::initialize(config).unwrap();

    let out = run(&mut app, Commands::Upload { file: doc, start: true }, "q\n")
        .await
        .unwrap();
    assert!(out.contains("Question 1 of 3"));

    let out = run(&mut app, Commands::Status, "").await.unwrap();
    assert!(out.contains("Source: deck.txt"));
    assert!(out.contains("Questions: 3"));
    assert!(out.contains("State: test not submitted yet"));
}
