use quiz_core::model::{LevelId, ProgressRecord};
use services::{AudioClip, PlaybackMode, ScreenKind, ShellEvent};
use storage::keys::{UNLOCKED_LEVELS_KEY, high_score_key};
use storage::repository::KeyValueRepository;

use super::test_harness::{ShellViewHarness, setup_shell_harness};
use super::{TUTOR_URL, UiIntent};

fn current_answer(harness: &ShellViewHarness) -> (u32, u32) {
    harness.with_shell(|shell| {
        let question = shell.session().unwrap().current_question().unwrap();
        let wrong = *question
            .options()
            .iter()
            .find(|&&o| o != question.answer())
            .unwrap();
        (question.answer(), wrong)
    })
}

#[tokio::test(flavor = "current_thread")]
async fn start_screen_smoke_renders_menu() {
    let mut harness = setup_shell_harness(ProgressRecord::new());
    let html = harness.render();
    assert!(html.contains("Math Challenge"), "missing title in {html}");
    assert!(html.contains("How to play"), "missing help button in {html}");
    assert!(html.contains("Primary school tutor"), "missing tutor button in {html}");

    harness.intent(UiIntent::OpenTutor);
    assert_eq!(harness.links.opened(), vec![TUTOR_URL.to_owned()]);
    assert!(harness.audio.played().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn level_select_smoke_locks_later_levels() {
    let mut harness = setup_shell_harness(ProgressRecord::from_persisted(
        LevelId::new(2),
        [(LevelId::FIRST, 60)],
    ));
    harness.send(ShellEvent::Start);

    let html = harness.render();
    assert!(html.contains("Choose a level"), "missing heading in {html}");
    assert_eq!(html.matches("level-card locked").count(), 6, "{html}");
    assert!(html.contains("Best: 60"), "missing best score in {html}");
    assert_eq!(
        harness.audio.played(),
        vec![(AudioClip::Background, PlaybackMode::Loop)]
    );

    harness.send(ShellEvent::SelectLevel(LevelId::new(3)));
    assert_eq!(
        harness.with_shell(|shell| shell.screen().kind()),
        ScreenKind::LevelSelect
    );
}

#[tokio::test(flavor = "current_thread")]
async fn game_screen_smoke_shows_question_and_feedback() {
    let mut harness = setup_shell_harness(ProgressRecord::new());
    harness.send(ShellEvent::Start);
    harness.send(ShellEvent::SelectLevel(LevelId::FIRST));

    let html = harness.render();
    assert!(html.contains("Question 1/10"), "missing label in {html}");
    assert!(html.contains("Score: 0"), "missing score in {html}");
    assert!(html.contains("width: 10%"), "missing progress in {html}");
    assert_eq!(html.matches("option-label").count(), 4, "{html}");
    assert_eq!(html.matches("option open").count(), 4, "{html}");
    assert!(!html.contains("next-button"), "next shown early in {html}");

    let (_, wrong) = current_answer(&harness);
    harness.send(ShellEvent::Answer(wrong));
    let html = harness.render();
    assert!(html.contains("Try again!"), "missing feedback in {html}");
    assert!(html.contains("option mistaken"), "missing wrong mark in {html}");
    assert!(html.contains("option correct"), "missing reveal in {html}");
    assert!(html.contains("Next question"), "missing next button in {html}");
    assert_eq!(harness.audio.count(AudioClip::Failure), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn game_screen_smoke_times_out() {
    let mut harness = setup_shell_harness(ProgressRecord::new());
    harness.send(ShellEvent::Start);
    harness.send(ShellEvent::SelectLevel(LevelId::FIRST));

    for _ in 0..25 {
        harness.send(ShellEvent::Tick);
    }
    let html = harness.render();
    assert!(html.contains("ring-value warning"), "missing warning in {html}");

    for _ in 0..5 {
        harness.send(ShellEvent::Tick);
    }
    let html = harness.render();
    assert!(html.contains("Time&#39;s up!") || html.contains("Time's up!"), "{html}");
    assert_eq!(harness.audio.count(AudioClip::Failure), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn perfect_run_smoke_reaches_end_and_persists() {
    let mut harness = setup_shell_harness(ProgressRecord::new());
    harness.send(ShellEvent::Start);
    harness.send(ShellEvent::SelectLevel(LevelId::FIRST));

    for _ in 0..10 {
        let (answer, _) = current_answer(&harness);
        harness.send(ShellEvent::Answer(answer));
        harness.send(ShellEvent::Advance);
    }
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Excellent!"), "missing message in {html}");
    assert!(html.contains("100/100"), "missing score in {html}");
    assert!(html.contains("Best score: 100"), "missing best in {html}");
    assert!(html.contains("New Student"), "missing rank in {html}");
    assert!(html.contains("Next level"), "missing next level in {html}");

    let progress = &harness.storage.progress;
    assert_eq!(
        progress
            .get_value(UNLOCKED_LEVELS_KEY)
            .await
            .unwrap()
            .as_deref(),
        Some("2")
    );
    assert_eq!(
        progress
            .get_value(&high_score_key(LevelId::FIRST))
            .await
            .unwrap()
            .as_deref(),
        Some("100")
    );

    harness.send(ShellEvent::NextLevel);
    let html = harness.render();
    assert!(html.contains("Question 1/10"), "next level not started: {html}");
    assert_eq!(
        harness.with_shell(|shell| shell.session().map(|s| s.level().id())),
        Some(LevelId::new(2))
    );
}

#[tokio::test(flavor = "current_thread")]
async fn failing_run_smoke_hides_next_level() {
    let mut harness = setup_shell_harness(ProgressRecord::new());
    harness.send(ShellEvent::Start);
    harness.send(ShellEvent::SelectLevel(LevelId::FIRST));

    for _ in 0..10 {
        let (_, wrong) = current_answer(&harness);
        harness.send(ShellEvent::Answer(wrong));
        harness.send(ShellEvent::Advance);
    }
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Keep trying!"), "missing message in {html}");
    assert!(html.contains("0/100"), "missing score in {html}");
    assert!(!html.contains("next-level-button"), "next level offered: {html}");

    harness.send(ShellEvent::BackToLevels);
    let html = harness.render();
    assert!(html.contains("Choose a level"), "not back on levels: {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn countdown_restarts_with_each_question() {
    use std::time::Duration;

    let mut harness = setup_shell_harness(ProgressRecord::new());
    harness.send(ShellEvent::Start);

    // Land the question between two beats of the mount-time ticker.
    tokio::time::advance(Duration::from_millis(900)).await;
    harness.drive_async().await;
    harness.send(ShellEvent::SelectLevel(LevelId::FIRST));

    tokio::time::advance(Duration::from_millis(150)).await;
    harness.drive_async().await;
    assert_eq!(
        harness.with_shell(|shell| shell.session().unwrap().time_remaining()),
        30
    );

    tokio::time::advance(Duration::from_millis(1200)).await;
    harness.drive_async().await;
    assert_eq!(
        harness.with_shell(|shell| shell.session().unwrap().time_remaining()),
        29
    );

    let (answer, _) = current_answer(&harness);
    harness.send(ShellEvent::Answer(answer));
    tokio::time::advance(Duration::from_millis(500)).await;
    harness.drive_async().await;
    harness.send(ShellEvent::Advance);

    tokio::time::advance(Duration::from_millis(150)).await;
    harness.drive_async().await;
    assert_eq!(
        harness.with_shell(|shell| {
            let session = shell.session().unwrap();
            (session.current_index(), session.time_remaining())
        }),
        (1, 30)
    );
}
