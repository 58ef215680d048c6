use super::*;
use crate::content::Locale;

fn english() -> Content {
    Content::embedded(Locale::En).expect("embedded english content")
}

fn entry_of(outcome: Outcome) -> (ResponseEntry, Option<DeferredNavigation>) {
    match outcome {
        Outcome::Respond { entry, navigation } => (entry, navigation),
        other => panic!("expected a response, got {other:?}"),
    }
}

#[test]
fn blank_input_is_ignored() {
    let content = english();
    let interpreter = CommandInterpreter::new(&content);
    assert_eq!(interpreter.interpret(""), Outcome::Ignored);
    assert_eq!(interpreter.interpret("   \t "), Outcome::Ignored);
}

#[test]
fn ls_lists_every_page_with_a_navigation_action() {
    let content = english();
    let (entry, navigation) = entry_of(CommandInterpreter::new(&content).interpret("LS"));
    assert!(navigation.is_none());
    assert_eq!(entry.question, "ls");
    assert_eq!(entry.answer, "./pages → resume  blogs  contact");
    assert_eq!(entry.actions.len(), content.pages.len());

    let targets = entry
        .actions
        .iter()
        .map(|action| action.effect.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        targets,
        vec![
            ActionEffect::NavigateTo("resume".into()),
            ActionEffect::NavigateTo("blogs".into()),
            ActionEffect::NavigateTo("contact".into()),
        ]
    );
    assert_eq!(entry.actions[0].label, "Open resume");
    assert!(entry.actions.iter().all(|a| a.icon == Some(Icon::FileText)));
}

#[test]
fn clear_and_cls_clear_the_log() {
    let content = english();
    let interpreter = CommandInterpreter::new(&content);
    assert_eq!(interpreter.interpret("clear"), Outcome::ClearLog);
    assert_eq!(interpreter.interpret(" CLS "), Outcome::ClearLog);
}

#[test]
fn help_enumerates_commands_and_pages() {
    let content = english();
    let (entry, _) = entry_of(CommandInterpreter::new(&content).interpret("Help"));
    assert_eq!(entry.question, "help");
    assert!(entry.answer.contains("ls, cd <page>, clear (or cls), help"));
    assert!(entry.answer.ends_with("Pages: resume, blogs, contact"));
}

#[test]
fn cd_known_page_is_loading_and_defers_navigation() {
    let content = english();
    let (entry, navigation) = entry_of(CommandInterpreter::new(&content).interpret("cd resume"));
    assert!(entry.loading);
    assert_eq!(entry.question, "cd resume");
    assert_eq!(entry.answer, "Opening resume");
    assert_eq!(
        navigation,
        Some(DeferredNavigation {
            page: "resume".into(),
            delay: Duration::from_millis(2000),
        })
    );
}

#[test]
fn cd_target_matching_ignores_case() {
    let content = english();
    let (entry, navigation) = entry_of(CommandInterpreter::new(&content).interpret("CD Blogs"));
    assert_eq!(entry.answer, "Opening blogs");
    assert_eq!(navigation.map(|n| n.page), Some("blogs".to_string()));
}

#[test]
fn cd_unknown_page_reports_missing_target() {
    let content = english();
    let (entry, navigation) = entry_of(CommandInterpreter::new(&content).interpret("cd nowhere"));
    assert!(!entry.loading);
    assert!(navigation.is_none());
    assert_eq!(entry.question, "cd nowhere");
    assert_eq!(entry.answer, "No such page: nowhere");
}

#[test]
fn cd_without_target_prints_usage() {
    let content = english();
    let (entry, navigation) = entry_of(CommandInterpreter::new(&content).interpret("cd"));
    assert!(navigation.is_none());
    assert_eq!(entry.answer, "Usage: cd <page>");
}

#[test]
fn cd_joins_multi_word_targets() {
    let content = english();
    let (entry, _) = entry_of(CommandInterpreter::new(&content).interpret("cd  my   page"));
    assert_eq!(entry.answer, "No such page: my page");
}

#[test]
fn question_lookup_is_exact_and_case_sensitive() {
    let content = english();
    let interpreter = CommandInterpreter::new(&content);
    let (hit, _) = entry_of(interpreter.interpret("Tell me about your skills"));
    assert!(hit.answer.starts_with("I specialize in full-stack development"));

    let (miss, _) = entry_of(interpreter.interpret("tell me about your skills"));
    assert_eq!(miss.answer, content.messages.default_response);
    assert_eq!(miss.question, "tell me about your skills");
}

#[test]
fn surrounding_whitespace_does_not_break_lookup() {
    let content = english();
    let (hit, _) = entry_of(CommandInterpreter::new(&content).interpret("  What's your background?  "));
    assert_eq!(hit.question, "What's your background?");
    assert_eq!(hit.actions.len(), 1);
}

#[test]
fn label_keywords_resolve_icons_and_effects() {
    let content = english();
    let (entry, _) = entry_of(CommandInterpreter::new(&content).interpret("How can I contact you?"));
    assert_eq!(
        entry.actions,
        vec![
            ActionDescriptor {
                label: "Email Me".into(),
                icon: Some(Icon::Mail),
                effect: ActionEffect::OpenMailClient("afshar@example.com".into()),
            },
            ActionDescriptor {
                label: "LinkedIn".into(),
                icon: Some(Icon::Linkedin),
                effect: ActionEffect::OpenExternal(
                    "https://www.linkedin.com/in/afshar98".into()
                ),
            },
        ]
    );

    let (background, _) = entry_of(CommandInterpreter::new(&content).interpret("What's your background?"));
    assert_eq!(
        background.actions[0].effect,
        ActionEffect::NavigateTo("resume".into())
    );
    assert_eq!(background.actions[0].icon, Some(Icon::FileText));
}

#[test]
fn unmatched_label_renders_without_icon_or_effect() {
    let content = english();
    let (entry, _) = entry_of(CommandInterpreter::new(&content).interpret("Show me your portfolio"));
    assert_eq!(entry.actions[0].icon, Some(Icon::Github));
    assert_eq!(entry.actions[1].label, "Portfolio");
    assert_eq!(entry.actions[1].icon, None);
    assert_eq!(entry.actions[1].effect, ActionEffect::None);
}

#[test]
fn keyword_order_prefers_navigation_over_links() {
    let content = english();
    let interpreter = CommandInterpreter::new(&content);
    let action = interpreter.resolve_action(&ActionSpec::labeled("Contact me by email"));
    assert_eq!(action.effect, ActionEffect::NavigateTo("contact".into()));
    assert_eq!(action.icon, Some(Icon::Mail));

    let action = interpreter.resolve_action(&ActionSpec::labeled("Read the BLOGS"));
    assert_eq!(action.effect, ActionEffect::NavigateTo("blogs".into()));
}

#[test]
fn explicit_effects_win_over_label_text() {
    let content = english();
    let interpreter = CommandInterpreter::new(&content);
    let spec = ActionSpec {
        navigate: Some("Contact".into()),
        ..ActionSpec::labeled("GitHub")
    };
    let action = interpreter.resolve_action(&spec);
    assert_eq!(action.effect, ActionEffect::NavigateTo("contact".into()));
    assert_eq!(action.icon, Some(Icon::Mail));

    let spec = ActionSpec {
        open: Some("https://example.com".into()),
        icon: Some(IconName::Github),
        ..ActionSpec::labeled("Portfolio")
    };
    let action = interpreter.resolve_action(&spec);
    assert_eq!(action.effect, ActionEffect::OpenExternal("https://example.com".into()));
    assert_eq!(action.icon, Some(Icon::Github));
}

#[test]
fn persian_content_uses_explicit_effects() {
    let content = Content::embedded(Locale::Fa).expect("embedded persian content");
    let question = content.suggestions[3].clone();
    let (entry, _) = entry_of(CommandInterpreter::new(&content).interpret(&question));
    assert_eq!(
        entry.actions[0].effect,
        ActionEffect::OpenMailClient("afshar@example.com".into())
    );
    assert_eq!(entry.actions[1].icon, Some(Icon::Linkedin));
}

#[test]
fn unknown_input_falls_back() {
    let content = english();
    let (entry, navigation) = entry_of(CommandInterpreter::new(&content).interpret("sudo rm -rf /"));
    assert!(navigation.is_none());
    assert!(entry.actions.is_empty());
    assert_eq!(entry.answer, content.messages.default_response);
}
