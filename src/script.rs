//! Headless runs: feed commands to an engine on a virtual clock and report
//! each result as one JSON object per line.

use std::io::Write;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::content::Content;
use crate::engine::{Execution, HostRequest, TerminalEngine};
use crate::response_log::ResponseEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptOutcome {
    Responded,
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptRecord {
    pub command: String,
    pub outcome: ScriptOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<ResponseEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<HostRequest>,
}

/// Runs `commands` in order against one engine with the greeting skipped.
/// A deferred navigation is awaited on the virtual clock, reported, and the
/// terminal is reinitialized as if the visitor came back from the page.
/// Blank commands produce no record.
pub fn run<I, S>(content: Content, commands: I) -> Vec<ScriptRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut now = Instant::now();
    let mut engine = TerminalEngine::new(content, now);
    engine.finish_greeting();

    let mut records = Vec::new();
    for command in commands {
        let command = command.as_ref();
        let record = match engine.execute(command) {
            Execution::Ignored => continue,
            Execution::Cleared => ScriptRecord {
                command: command.trim().to_string(),
                outcome: ScriptOutcome::Cleared,
                entry: None,
                request: None,
            },
            Execution::Responded { navigation } => {
                let entry = engine.log().last().cloned();
                let request = match navigation {
                    Some(navigation) => {
                        now += navigation.delay;
                        let request = engine.tick(now).into_iter().next();
                        engine.reinit(now);
                        engine.finish_greeting();
                        request
                    }
                    None => None,
                };
                ScriptRecord {
                    command: command.trim().to_string(),
                    outcome: ScriptOutcome::Responded,
                    entry,
                    request,
                }
            }
        };
        debug!(command = %record.command, "script command executed");
        records.push(record);
    }
    engine.teardown();
    records
}

pub fn write_json_lines<W: Write>(mut out: W, records: &[ScriptRecord]) -> anyhow::Result<()> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
