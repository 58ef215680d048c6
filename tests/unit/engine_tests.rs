use std::time::Duration;

use super::*;
use crate::content::Locale;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn english() -> Content {
    Content::embedded(Locale::En).expect("embedded english content")
}

fn ready_engine(start: Instant) -> TerminalEngine {
    let mut engine = TerminalEngine::new(english(), start);
    engine.finish_greeting();
    engine
}

fn submit(engine: &mut TerminalEngine, line: &str) -> Execution {
    assert!(engine.on_input(line), "input rejected for {line:?}");
    engine.on_key(Key::Enter)
}

#[test]
fn greeting_reveals_one_glyph_per_interval() {
    let start = Instant::now();
    let mut engine = TerminalEngine::new(english(), start);
    assert_eq!(engine.greeting_text(), "");
    assert!(!engine.greeting_complete());

    engine.tick(start + ms(100));
    assert_eq!(engine.greeting_text(), "H");
    engine.tick(start + ms(550));
    assert_eq!(engine.greeting_text(), "Hi, m");

    let glyphs = engine.content().greeting.chars().count() as u64;
    engine.tick(start + ms(100 * glyphs));
    assert!(engine.greeting_complete());
    assert_eq!(engine.greeting_text(), "Hi, my name is Afshar");
}

#[test]
fn input_is_refused_until_the_greeting_completes() {
    let start = Instant::now();
    let mut engine = TerminalEngine::new(english(), start);
    assert!(!engine.on_input("ls"));
    assert_eq!(engine.input(), "");
    assert_eq!(engine.on_key(Key::Enter), Execution::Ignored);
    engine.on_wheel(1);
    assert!(!engine.picker().is_open());

    engine.tick(start + ms(5_000));
    assert!(engine.on_input("ls"));
}

#[test]
fn caret_blinks_independently_of_the_reveal() {
    let start = Instant::now();
    let mut engine = ready_engine(start);
    assert!(engine.caret_visible());
    engine.tick(start + ms(530));
    assert!(!engine.caret_visible());
    engine.tick(start + ms(1060));
    assert!(engine.caret_visible());
}

#[test]
fn tab_and_right_arrow_accept_the_completion() {
    let mut engine = ready_engine(Instant::now());
    engine.on_input("cd r");
    assert_eq!(engine.completion(), "esume");
    engine.on_key(Key::Tab);
    assert_eq!(engine.input(), "cd resume");
    assert_eq!(engine.completion(), "");

    engine.on_input("Tell");
    engine.on_key(Key::ArrowRight);
    assert_eq!(engine.input(), "Tell me about your skills");
}

#[test]
fn accepting_after_trailing_space_does_not_double_it() {
    let mut engine = ready_engine(Instant::now());
    engine.on_input("cd ");
    assert_eq!(engine.completion(), " resume");
    engine.on_key(Key::Tab);
    assert_eq!(engine.input(), "cd resume");
}

#[test]
fn enter_records_history_and_clears_the_input() {
    let mut engine = ready_engine(Instant::now());
    let execution = submit(&mut engine, "  help  ");
    assert_eq!(execution, Execution::Responded { navigation: None });
    assert_eq!(engine.input(), "");
    assert_eq!(engine.history().entries(), ["help".to_string()]);
    assert_eq!(engine.entries().len(), 1);
    assert_eq!(engine.entries()[0].question, "help");
}

#[test]
fn blank_submission_is_a_no_op() {
    let mut engine = ready_engine(Instant::now());
    assert_eq!(submit(&mut engine, "   "), Execution::Ignored);
    assert!(engine.history().is_empty());
    assert!(engine.log().is_empty());
}

#[test]
fn history_recall_walks_back_and_returns_to_live() {
    let mut engine = ready_engine(Instant::now());
    submit(&mut engine, "ls");
    submit(&mut engine, "help");

    engine.on_key(Key::ArrowUp);
    assert_eq!(engine.input(), "help");
    engine.on_key(Key::ArrowUp);
    assert_eq!(engine.input(), "ls");
    engine.on_key(Key::ArrowUp);
    assert_eq!(engine.input(), "ls");
    engine.on_key(Key::ArrowDown);
    assert_eq!(engine.input(), "help");
    engine.on_key(Key::ArrowDown);
    assert_eq!(engine.input(), "");
    assert!(!engine.history().is_browsing());
}

#[test]
fn typing_while_browsing_returns_to_live() {
    let mut engine = ready_engine(Instant::now());
    submit(&mut engine, "ls");
    engine.on_key(Key::ArrowUp);
    assert!(engine.history().is_browsing());
    engine.on_input("ls -a");
    assert!(!engine.history().is_browsing());
    assert_eq!(engine.input(), "ls -a");
}

#[test]
fn clear_command_and_ctrl_l_empty_the_log() {
    let mut engine = ready_engine(Instant::now());
    submit(&mut engine, "ls");
    submit(&mut engine, "help");
    assert_eq!(submit(&mut engine, "clear"), Execution::Cleared);
    assert!(engine.log().is_empty());

    submit(&mut engine, "ls");
    assert_eq!(engine.on_key(Key::ClearScreen), Execution::Cleared);
    assert!(engine.log().is_empty());
    assert_eq!(engine.history().len(), 4);
}

#[test]
fn cd_defers_navigation_and_hides_the_input() {
    let start = Instant::now();
    let mut engine = ready_engine(start);
    let execution = submit(&mut engine, "cd resume");
    assert!(matches!(
        execution,
        Execution::Responded { navigation: Some(ref nav) } if nav.page == "resume"
    ));
    assert!(engine.entries()[0].loading);
    assert!(engine.is_redirecting());
    assert_eq!(engine.redirect_target(), Some("resume"));
    assert!(!engine.on_input("help"));
    assert_eq!(engine.completion(), "");

    assert!(engine.tick(start + ms(1999)).is_empty());
    assert_eq!(
        engine.tick(start + ms(2000)),
        vec![HostRequest::Navigate("resume".into())]
    );
    assert!(engine.tick(start + ms(10_000)).is_empty());
}

#[test]
fn unknown_page_does_not_redirect() {
    let start = Instant::now();
    let mut engine = ready_engine(start);
    submit(&mut engine, "cd nowhere");
    assert!(!engine.is_redirecting());
    assert!(engine.tick(start + ms(5_000)).is_empty());
    assert_eq!(engine.entries()[0].answer, "No such page: nowhere");
}

#[test]
fn a_later_navigation_replaces_a_pending_one() {
    let start = Instant::now();
    let mut engine = ready_engine(start);
    engine.execute("cd resume");
    engine.tick(start + ms(500));
    engine.execute("cd blogs");
    assert_eq!(
        engine.tick(start + ms(2500)),
        vec![HostRequest::Navigate("blogs".into())]
    );
}

#[test]
fn reinit_cancels_pending_navigation_and_keeps_history() {
    let start = Instant::now();
    let mut engine = ready_engine(start);
    submit(&mut engine, "ls");
    submit(&mut engine, "cd contact");

    engine.reinit(start + ms(1000));
    assert!(!engine.is_redirecting());
    assert!(engine.log().is_empty());
    assert_eq!(engine.greeting_text(), "");
    assert!(!engine.greeting_complete());
    assert_eq!(engine.history().len(), 2);

    let requests = engine.tick(start + ms(5_000));
    assert!(requests.is_empty());
    assert!(engine.greeting_complete());
}

#[test]
fn reinit_with_switches_locale_content() {
    let start = Instant::now();
    let mut engine = ready_engine(start);
    submit(&mut engine, "help");
    let persian = Content::embedded(Locale::Fa).expect("embedded persian content");
    let greeting = persian.greeting.clone();
    engine.reinit_with(persian, start);
    engine.finish_greeting();

    assert_eq!(engine.greeting_text(), greeting);
    assert_eq!(engine.content().locale, "fa");
    assert_eq!(engine.picker().candidates()[0], engine.content().suggestions[0]);
    assert_eq!(engine.history().entries(), ["help".to_string()]);
}

#[test]
fn teardown_cancels_every_timer() {
    let start = Instant::now();
    let mut engine = TerminalEngine::new(english(), start);
    engine.finish_greeting();
    engine.execute("cd blogs");
    engine.teardown();
    assert!(engine.scheduler().pending().is_empty());
    assert!(engine.tick(start + ms(60_000)).is_empty());
    assert!(engine.caret_visible());
}

#[test]
fn seven_wheel_events_wrap_back_to_the_first_suggestion() {
    let mut engine = ready_engine(Instant::now());
    for _ in 0..7 {
        engine.on_wheel(1);
    }
    assert!(engine.picker().is_open());
    assert_eq!(engine.picker().selected_index(), 0);

    engine.on_wheel(-1);
    assert_eq!(engine.picker().selected_index(), 5);
    engine.on_wheel(0);
    assert_eq!(engine.picker().selected_index(), 5);
}

#[test]
fn picker_confirm_submits_the_selection() {
    let mut engine = ready_engine(Instant::now());
    engine.on_wheel(1);
    engine.on_wheel(1);
    assert!(!engine.on_input("typed"));
    let execution = engine.on_key(Key::Enter);
    assert_eq!(execution, Execution::Responded { navigation: None });
    assert!(!engine.picker().is_open());
    assert_eq!(engine.entries()[0].question, "Tell me about your skills");
    assert_eq!(engine.history().entries(), ["Tell me about your skills".to_string()]);
}

#[test]
fn picker_escape_and_outside_click_cancel() {
    let mut engine = ready_engine(Instant::now());
    engine.on_wheel(1);
    engine.on_key(Key::Escape);
    assert!(!engine.picker().is_open());
    assert!(engine.log().is_empty());

    engine.on_wheel(1);
    assert!(engine.picker().is_open());
    assert_eq!(engine.on_click(false), Execution::Ignored);
    assert!(!engine.picker().is_open());
    assert!(engine.log().is_empty());
}

#[test]
fn picker_click_on_surface_confirms() {
    let mut engine = ready_engine(Instant::now());
    engine.on_wheel(-1);
    engine.on_wheel(-1);
    engine.on_click(true);
    assert_eq!(engine.entries()[0].question, "Show me your portfolio");
}

#[test]
fn clicks_without_an_open_picker_do_nothing() {
    let mut engine = ready_engine(Instant::now());
    assert_eq!(engine.on_click(true), Execution::Ignored);
    assert!(engine.log().is_empty());
}

#[test]
fn picker_stays_closed_while_redirecting() {
    let mut engine = ready_engine(Instant::now());
    engine.execute("cd resume");
    engine.on_wheel(1);
    assert!(!engine.picker().is_open());
}

#[test]
fn activating_actions_produces_host_requests() {
    let start = Instant::now();
    let mut engine = ready_engine(start);
    submit(&mut engine, "How can I contact you?");
    assert_eq!(
        engine.activate(0, 0),
        Some(HostRequest::OpenMailClient("afshar@example.com".into()))
    );
    assert_eq!(
        engine.activate(0, 1),
        Some(HostRequest::OpenExternal(
            "https://www.linkedin.com/in/afshar98".into()
        ))
    );
    assert_eq!(engine.activate(0, 2), None);
    assert_eq!(engine.activate(5, 0), None);

    submit(&mut engine, "Show me your portfolio");
    assert_eq!(engine.activate(1, 1), None);
}

#[test]
fn navigation_action_supersedes_deferred_navigation() {
    let start = Instant::now();
    let mut engine = ready_engine(start);
    engine.execute("ls");
    engine.execute("cd resume");
    assert_eq!(
        engine.activate(0, 2),
        Some(HostRequest::Navigate("contact".into()))
    );
    assert!(engine.tick(start + ms(3_000)).is_empty());
}

#[test]
fn host_requests_serialize_as_tagged_variants() {
    let value = serde_json::to_value(HostRequest::Navigate("blogs".into())).expect("serialize");
    assert_eq!(value, serde_json::json!({"kind": "navigate", "target": "blogs"}));
}
