use std::time::Duration;

use tracing::debug;

use crate::content::{ActionSpec, Content, IconName};
use crate::response_log::{ActionDescriptor, ActionEffect, Icon, ResponseEntry};

/// Label keywords checked, in order, for actions without an explicit effect.
const ACTION_KEYWORDS: [&str; 6] = ["resume", "blogs", "contact", "email", "linkedin", "github"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredNavigation {
    pub page: String,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input: nothing recorded.
    Ignored,
    /// `clear`/`cls`: the log is emptied and no entry is produced.
    ClearLog,
    Respond {
        entry: ResponseEntry,
        navigation: Option<DeferredNavigation>,
    },
}

impl Outcome {
    fn respond(entry: ResponseEntry) -> Self {
        Outcome::Respond {
            entry,
            navigation: None,
        }
    }
}

/// Turns one submitted line into an [`Outcome`]. Stateless: history and the
/// response log are updated by the caller.
#[derive(Debug, Clone, Copy)]
pub struct CommandInterpreter<'a> {
    content: &'a Content,
}

impl<'a> CommandInterpreter<'a> {
    pub fn new(content: &'a Content) -> Self {
        Self { content }
    }

    pub fn interpret(&self, raw: &str) -> Outcome {
        let command = raw.trim();
        if command.is_empty() {
            return Outcome::Ignored;
        }
        let lower = command.to_lowercase();

        match lower.as_str() {
            "ls" => return Outcome::respond(self.list_pages()),
            "clear" | "cls" => return Outcome::ClearLog,
            "help" => return Outcome::respond(self.help()),
            _ => {}
        }

        let mut tokens = command.split_whitespace();
        if tokens
            .next()
            .is_some_and(|first| first.eq_ignore_ascii_case("cd"))
        {
            let target = tokens.collect::<Vec<_>>().join(" ");
            if target.is_empty() {
                return Outcome::respond(ResponseEntry::new(
                    command,
                    self.content.messages.usage_cd.as_str(),
                ));
            }
            return self.change_page(&target);
        }

        match self.content.response(command) {
            Some(found) => {
                debug!(question = command, "matched question");
                Outcome::respond(
                    ResponseEntry::new(command, found.answer.as_str())
                        .with_actions(self.resolve_actions(&found.actions)),
                )
            }
            None => {
                debug!(input = command, "unrecognized input");
                Outcome::respond(ResponseEntry::new(
                    command,
                    self.content.messages.default_response.as_str(),
                ))
            }
        }
    }

    pub fn resolve_actions(&self, specs: &[ActionSpec]) -> Vec<ActionDescriptor> {
        specs.iter().map(|spec| self.resolve_action(spec)).collect()
    }

    pub fn resolve_action(&self, spec: &ActionSpec) -> ActionDescriptor {
        let explicit = if let Some(page) = spec.navigate.as_deref() {
            let page = self
                .content
                .page(page)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| page.to_string());
            Some(ActionEffect::NavigateTo(page))
        } else if let Some(url) = spec.open.as_deref() {
            Some(ActionEffect::OpenExternal(url.to_string()))
        } else {
            spec.mail
                .as_deref()
                .map(|address| ActionEffect::OpenMailClient(address.to_string()))
        };

        let (icon, effect) = match explicit {
            Some(effect) => (default_icon(&effect), effect),
            None => self.effect_from_label(&spec.label),
        };
        ActionDescriptor {
            label: spec.label.clone(),
            icon: spec.icon.map(icon_from_name).or(icon),
            effect,
        }
    }

    fn effect_from_label(&self, label: &str) -> (Option<Icon>, ActionEffect) {
        let label = label.to_lowercase();
        let links = &self.content.links;
        let Some(keyword) = ACTION_KEYWORDS
            .iter()
            .find(|keyword| label.contains(*keyword))
        else {
            return (None, ActionEffect::None);
        };
        match *keyword {
            "resume" | "blogs" => (
                Some(Icon::FileText),
                ActionEffect::NavigateTo((*keyword).to_string()),
            ),
            "contact" => (
                Some(Icon::Mail),
                ActionEffect::NavigateTo("contact".to_string()),
            ),
            "email" => (
                Some(Icon::Mail),
                ActionEffect::OpenMailClient(links.email.clone()),
            ),
            "linkedin" => (
                Some(Icon::Linkedin),
                ActionEffect::OpenExternal(links.linkedin.clone()),
            ),
            _ => (
                Some(Icon::Github),
                ActionEffect::OpenExternal(links.github.clone()),
            ),
        }
    }

    fn list_pages(&self) -> ResponseEntry {
        let names = self.content.page_names().collect::<Vec<_>>();
        let answer = self
            .content
            .messages
            .ls
            .replace("{pages}", &names.join("  "));
        let actions = names
            .iter()
            .map(|page| ActionDescriptor {
                label: self.content.messages.open_page.replace("{page}", page),
                icon: Some(Icon::FileText),
                effect: ActionEffect::NavigateTo((*page).to_string()),
            })
            .collect();
        ResponseEntry::new("ls", answer).with_actions(actions)
    }

    fn help(&self) -> ResponseEntry {
        let names = self.content.page_names().collect::<Vec<_>>();
        ResponseEntry::new(
            "help",
            self.content.messages.help.replace("{pages}", &names.join(", ")),
        )
    }

    fn change_page(&self, target: &str) -> Outcome {
        let question = format!("cd {target}");
        let Some(page) = self.content.page(target) else {
            debug!(target, "cd to unknown page");
            return Outcome::respond(ResponseEntry::new(
                question,
                self.content.messages.no_such_page.replace("{target}", target),
            ));
        };
        Outcome::Respond {
            entry: ResponseEntry::new(question, page.opening.as_str()).loading(),
            navigation: Some(DeferredNavigation {
                page: page.name.clone(),
                delay: self.content.timing.navigation_delay(),
            }),
        }
    }
}

fn default_icon(effect: &ActionEffect) -> Option<Icon> {
    match effect {
        ActionEffect::NavigateTo(page) if page.eq_ignore_ascii_case("contact") => Some(Icon::Mail),
        ActionEffect::NavigateTo(_) => Some(Icon::FileText),
        ActionEffect::OpenMailClient(_) => Some(Icon::Mail),
        ActionEffect::OpenExternal(_) | ActionEffect::None => None,
    }
}

fn icon_from_name(name: IconName) -> Icon {
    match name {
        IconName::File => Icon::FileText,
        IconName::Mail => Icon::Mail,
        IconName::Linkedin => Icon::Linkedin,
        IconName::Github => Icon::Github,
    }
}

#[cfg(test)]
#[path = "../tests/unit/interpreter_tests.rs"]
mod tests;
