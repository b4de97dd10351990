// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Line-oriented terminal driver for the docchat page.
//!
//! Each input line becomes page events; after every event the parts of the
//! page that changed (new transcript nodes, a re-rendered results pane,
//! alerts) are converted to text and written out.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use docchat_frontend::{App, Control, Field, Key, Tab, UiEvent};
use docchat_render::MessageNode;

const HELP: &str = "\
Commands:
  /chat              switch to the chat tab
  /search            switch to the search tab
  /refresh           reload the vector store list
  /store <id>        switch vector store
  /stores            show the vector store selection
  /max <n>           maximum number of search results
  /rewrite on|off    let the backend rewrite search queries
  /send              send the current message
  /help              show this help
  /quit              exit
Any other line is typed into the active tab's input and submitted.";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Tab(Tab),
    Refresh,
    Store(String),
    Stores,
    Max(String),
    Rewrite(bool),
    Send,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    let Some(rest) = line.trim_start().strip_prefix('/') else {
        return Command::Submit(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((n, a)) => (n, a.trim()),
        None => (rest.trim(), ""),
    };
    match (name, arg) {
        ("chat", "") => Command::Tab(Tab::Chat),
        ("search", "") => Command::Tab(Tab::Search),
        ("refresh", "") => Command::Refresh,
        ("store", id) if !id.is_empty() => Command::Store(id.to_string()),
        ("stores", "") => Command::Stores,
        ("max", n) if !n.is_empty() => Command::Max(n.to_string()),
        ("rewrite", "on") => Command::Rewrite(true),
        ("rewrite", "off") => Command::Rewrite(false),
        ("send", "") => Command::Send,
        ("help", "") => Command::Help,
        ("quit" | "exit", "") => Command::Quit,
        _ => Command::Invalid(line.trim().to_string()),
    }
}

/// Convert rendered markup to wrapped plain text.
pub fn html_to_text(html: &str, width: usize) -> String {
    html2text::from_read(html.as_bytes(), width)
}

pub struct Terminal<W> {
    app: App,
    out: W,
    width: usize,
    shown: usize,
    resets: u64,
    results_revision: u64,
}

impl<W: Write> Terminal<W> {
    pub fn new(app: App, out: W, width: usize) -> Self {
        Self { app, out, width, shown: 0, resets: 0, results_revision: 0 }
    }

    pub fn into_parts(self) -> (App, W) {
        (self.app, self.out)
    }

    pub async fn boot(&mut self) -> std::io::Result<()> {
        self.app.boot().await;
        self.flush()
    }

    /// Run one command.  Returns `false` once the session should end.
    pub async fn execute(&mut self, command: Command) -> std::io::Result<bool> {
        debug!(?command, "terminal command");
        match command {
            Command::Quit => return Ok(false),
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Stores => self.print_stores()?,
            Command::Invalid(line) => {
                writeln!(self.out, "Unknown command: {line} (try /help)")?
            }
            Command::Submit(text) => {
                let field = match self.app.state.active_tab {
                    Tab::Chat => Field::MessageInput,
                    Tab::Search => Field::SearchQuery,
                };
                self.app.dispatch(UiEvent::Input { field, value: text }).await;
                self.app.dispatch(UiEvent::KeyDown { field, key: Key::Enter, shift: false }).await;
            }
            Command::Tab(tab) => {
                self.app.dispatch(UiEvent::Click(Control::Tab(tab))).await;
                if self.app.variant().has_tabs() {
                    writeln!(self.out, "[{tab}]")?;
                } else {
                    writeln!(self.out, "Tabs are not available in the simple layout")?;
                }
            }
            Command::Refresh => self.app.dispatch(UiEvent::Click(Control::RefreshStores)).await,
            Command::Store(id) => self.app.dispatch(UiEvent::SelectStore(id)).await,
            Command::Max(n) => {
                self.app.dispatch(UiEvent::Input { field: Field::MaxResults, value: n }).await
            }
            Command::Rewrite(on) => self.app.dispatch(UiEvent::SetRewriteQuery(on)).await,
            Command::Send => self.app.dispatch(UiEvent::Click(Control::SendButton)).await,
        }
        self.flush()?;
        Ok(true)
    }

    /// Write whatever changed on the page since the last flush.
    pub fn flush(&mut self) -> std::io::Result<()> {
        let transcript = &self.app.page.transcript;
        if transcript.resets() != self.resets {
            self.resets = transcript.resets();
            self.shown = 0;
            writeln!(self.out, "── conversation reset ──")?;
        }
        for node in &transcript.nodes()[self.shown.min(transcript.len())..] {
            write_node(&mut self.out, node, self.width)?;
        }
        self.shown = transcript.len();

        if self.app.page.results.revision() != self.results_revision {
            self.results_revision = self.app.page.results.revision();
            write!(self.out, "{}", html_to_text(self.app.page.results.html(), self.width))?;
        }

        for alert in self.app.page.take_alerts() {
            writeln!(self.out, "! {alert}")?;
        }
        self.out.flush()
    }

    fn print_stores(&mut self) -> std::io::Result<()> {
        let select = &self.app.page.store_select;
        let selected = select.value();
        for option in select.options() {
            let mark = if Some(option.value.as_str()) == selected { '*' } else { ' ' };
            writeln!(self.out, "{mark} {:<24} {}", option.value, option.label)?;
        }
        if select.is_disabled() {
            writeln!(self.out, "(selection disabled)")?;
        }
        Ok(())
    }
}

fn write_node<W: Write>(out: &mut W, node: &MessageNode, width: usize) -> std::io::Result<()> {
    let text = html_to_text(&node.body, width);
    writeln!(out, "{}> {}", node.role, text.trim_end())
}

/// Interactive session on stdin/stdout.
pub async fn run(app: App, width: usize) -> anyhow::Result<()> {
    let mut term = Terminal::new(app, std::io::stdout(), width);
    term.boot().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if !term.execute(parse_line(&line)).await? {
            break;
        }
    }
    Ok(())
}
