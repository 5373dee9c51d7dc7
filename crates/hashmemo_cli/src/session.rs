//! Interactive menu session.
//!
//! # Responsibility
//! - Read menu choices and memo fields from a line-based input.
//! - Dispatch each `MenuAction` to one handler and render results.
//!
//! # Invariants
//! - Bad user input never ends the session; it re-prompts or prints a notice.
//! - Store failures are logged and reported, then the menu continues.
//! - Closed input ends the session cleanly.

use crate::menu::MenuAction;
use hashmemo_core::model::tags::normalize_tag_input;
use hashmemo_core::{
    memo_at, parse_tag_input, Memo, MemoDraft, MemoService, MemoStore, RepoError, TagFilter,
};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

/// Line that terminates multi-line body entry.
pub const BODY_TERMINATOR: &str = ":end";

pub type CliResult<T> = Result<T, CliError>;

/// Session failure that stops the menu loop.
#[derive(Debug)]
pub enum CliError {
    /// Input reached EOF while a value was expected.
    InputClosed,
    Io(io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputClosed => write!(f, "input closed"),
            Self::Io(err) => write!(f, "terminal i/o failed: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InputClosed => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Numbered pick from a displayed list.
enum Selection {
    Cancelled,
    Picked(usize),
    Invalid,
}

/// Menu-driven memo session over any line reader and writer.
pub struct MemoCli<'svc, S: MemoStore, R: BufRead, W: Write> {
    service: &'svc MemoService<S>,
    input: R,
    output: W,
}

impl<'svc, S: MemoStore, R: BufRead, W: Write> MemoCli<'svc, S, R, W> {
    pub fn new(service: &'svc MemoService<S>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs the menu loop until the user quits or input closes.
    ///
    /// # Errors
    /// - Returns `CliError::Io` when reading or writing the terminal fails.
    pub fn run(&mut self) -> CliResult<()> {
        match self.menu_loop() {
            Err(CliError::InputClosed) => {
                info!("event=cli_session module=cli status=ok reason=input_closed");
                Ok(())
            }
            other => other,
        }
    }

    /// Consumes the session and returns the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    fn menu_loop(&mut self) -> CliResult<()> {
        loop {
            self.print_menu()?;
            let choice = self.prompt("Select: ")?;
            let Some(action) = MenuAction::from_choice(&choice) else {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };

            if action == MenuAction::Quit {
                writeln!(self.output, "Bye.")?;
                info!("event=cli_session module=cli status=ok reason=quit");
                return Ok(());
            }

            self.dispatch(action)?;
        }
    }

    fn dispatch(&mut self, action: MenuAction) -> CliResult<()> {
        match action {
            MenuAction::Add => self.add_memo(),
            MenuAction::List => self.list_memos(),
            MenuAction::Delete => self.delete_memo(),
            MenuAction::SearchKeyword => self.search_keyword(),
            MenuAction::SearchTag => self.search_tag(),
            MenuAction::BrowseTags => self.browse_tags(),
            MenuAction::Filter => self.filter_memos(),
            MenuAction::Quit => Ok(()),
        }
    }

    fn print_menu(&mut self) -> CliResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "=== hashmemo ===")?;
        for (index, action) in MenuAction::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, action.label())?;
        }
        Ok(())
    }

    fn add_memo(&mut self) -> CliResult<()> {
        let title = self.prompt("Title: ")?.trim().to_string();
        if title.is_empty() {
            writeln!(self.output, "Title cannot be empty.")?;
            return Ok(());
        }
        let body = self.prompt_body()?;
        let tags = self.prompt_tags()?;

        match self.service.add(&MemoDraft::new(title, body, tags)) {
            Ok(memo) => writeln!(self.output, "Memo added (#{}).", memo.id())?,
            Err(err) => self.report(MenuAction::Add.event_name(), &err)?,
        }
        Ok(())
    }

    fn list_memos(&mut self) -> CliResult<()> {
        match self.service.list() {
            Ok(memos) => self.view_details(&memos),
            Err(err) => self.report(MenuAction::List.event_name(), &err),
        }
    }

    fn delete_memo(&mut self) -> CliResult<()> {
        let memos = match self.service.list() {
            Ok(memos) => memos,
            Err(err) => return self.report(MenuAction::Delete.event_name(), &err),
        };
        self.display_memos(&memos)?;
        if memos.is_empty() {
            return Ok(());
        }

        let input = self.prompt("Number of the memo to delete: ")?;
        let Ok(number) = input.trim().parse::<usize>() else {
            writeln!(self.output, "Please enter a number.")?;
            return Ok(());
        };
        let Some(memo) = memo_at(&memos, number) else {
            writeln!(self.output, "Invalid number.")?;
            return Ok(());
        };

        match self.service.delete(memo) {
            Ok(true) => writeln!(self.output, "Memo deleted.")?,
            Ok(false) => writeln!(self.output, "Delete failed: memo no longer exists.")?,
            Err(err) => self.report(MenuAction::Delete.event_name(), &err)?,
        }
        Ok(())
    }

    fn search_keyword(&mut self) -> CliResult<()> {
        let keyword = self.prompt("Keyword: ")?;
        if keyword.is_empty() {
            writeln!(self.output, "No matching memos.")?;
            return Ok(());
        }
        match self.service.search(&keyword) {
            Ok(memos) if memos.is_empty() => {
                writeln!(self.output, "No matching memos.")?;
                Ok(())
            }
            Ok(memos) => self.view_details(&memos),
            Err(err) => self.report(MenuAction::SearchKeyword.event_name(), &err),
        }
    }

    fn search_tag(&mut self) -> CliResult<()> {
        let raw = self.prompt("Tag: ")?;
        let Some(tag) = normalize_tag_input(&raw) else {
            writeln!(self.output, "No memos with that tag.")?;
            return Ok(());
        };
        match self.service.search_by_tag(&tag) {
            Ok(memos) if memos.is_empty() => {
                writeln!(self.output, "No memos with that tag.")?;
                Ok(())
            }
            Ok(memos) => {
                writeln!(self.output, "=== Tag: {tag} ===")?;
                self.view_details(&memos)
            }
            Err(err) => self.report(MenuAction::SearchTag.event_name(), &err),
        }
    }

    fn browse_tags(&mut self) -> CliResult<()> {
        let tags: Vec<String> = match self.service.all_tags() {
            Ok(tags) => tags.into_iter().collect(),
            Err(err) => return self.report(MenuAction::BrowseTags.event_name(), &err),
        };
        if tags.is_empty() {
            writeln!(self.output, "No tags yet.")?;
            return Ok(());
        }

        writeln!(self.output, "=== Tags ===")?;
        for (index, tag) in tags.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, tag)?;
        }

        let tag = match self.select("Tag number (Enter to cancel): ", tags.len())? {
            Selection::Picked(index) => &tags[index],
            Selection::Cancelled | Selection::Invalid => return Ok(()),
        };
        match self.service.search_by_tag(tag) {
            Ok(memos) => self.view_details(&memos),
            Err(err) => self.report(MenuAction::BrowseTags.event_name(), &err),
        }
    }

    fn filter_memos(&mut self) -> CliResult<()> {
        let keyword = self.prompt("Keyword (Enter for any): ")?;
        let Some(tag_filter) = self.pick_tag_filter()? else {
            return Ok(());
        };

        match self.service.filter(&keyword, &tag_filter) {
            Ok(memos) => {
                let searching = !keyword.trim().is_empty() || tag_filter != TagFilter::All;
                if memos.is_empty() && searching {
                    writeln!(self.output, "No matching memos.")?;
                    return Ok(());
                }
                self.view_details(&memos)
            }
            Err(err) => self.report(MenuAction::Filter.event_name(), &err),
        }
    }

    /// Numbered tag picker; Enter keeps every tag. `None` means the pick
    /// failed and was already reported.
    fn pick_tag_filter(&mut self) -> CliResult<Option<TagFilter>> {
        let mut choices = match self.service.tag_choices() {
            Ok(choices) => choices,
            Err(err) => {
                self.report(MenuAction::Filter.event_name(), &err)?;
                return Ok(None);
            }
        };
        if choices.len() == 1 {
            return Ok(Some(TagFilter::All));
        }

        for (index, choice) in choices.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, choice.label())?;
        }
        let input = self.prompt("Tag number (Enter to show all): ")?;
        if input.trim().is_empty() {
            return Ok(Some(TagFilter::All));
        }
        match input.trim().parse::<usize>() {
            Ok(number) if (1..=choices.len()).contains(&number) => {
                Ok(Some(choices.swap_remove(number - 1)))
            }
            Ok(_) => {
                writeln!(self.output, "No entry with that number.")?;
                Ok(None)
            }
            Err(_) => {
                writeln!(self.output, "Please enter a number.")?;
                Ok(None)
            }
        }
    }

    fn view_details(&mut self, memos: &[Memo]) -> CliResult<()> {
        self.display_memos(memos)?;
        if memos.is_empty() {
            return Ok(());
        }

        match self.select("Number to open (Enter to cancel): ", memos.len())? {
            Selection::Picked(index) => self.show_memo(memos[index].clone()),
            Selection::Cancelled | Selection::Invalid => Ok(()),
        }
    }

    fn display_memos(&mut self, memos: &[Memo]) -> CliResult<()> {
        if memos.is_empty() {
            writeln!(self.output, "No memos.")?;
            return Ok(());
        }

        writeln!(self.output, "=== Memos ===")?;
        for (index, memo) in memos.iter().enumerate() {
            writeln!(
                self.output,
                "{}. {} [{}] - {}",
                index + 1,
                memo.title(),
                memo.tags().join(", "),
                timestamp_line(memo)
            )?;
        }
        Ok(())
    }

    fn show_memo(&mut self, memo: Memo) -> CliResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Memo #{} ---", memo.id())?;
        writeln!(self.output, "[Title] {}", memo.title())?;
        writeln!(self.output, "[Tags] {}", memo.tags().join(", "))?;
        writeln!(self.output, "{}", timestamp_line(&memo))?;
        writeln!(self.output, "[Body]")?;
        writeln!(self.output, "{}", memo.body())?;
        writeln!(self.output)?;
        writeln!(self.output, "1. Close")?;
        writeln!(self.output, "2. Edit")?;
        writeln!(self.output, "3. Delete")?;

        let choice = self.prompt("Select: ")?;
        match choice.trim() {
            "" | "1" => Ok(()),
            "2" => self.edit_memo(memo),
            "3" => {
                match self.service.delete(&memo) {
                    Ok(true) => writeln!(self.output, "Memo deleted.")?,
                    Ok(false) => writeln!(self.output, "Memo no longer exists.")?,
                    Err(err) => self.report(MenuAction::Delete.event_name(), &err)?,
                }
                Ok(())
            }
            _ => {
                writeln!(self.output, "Invalid choice.")?;
                Ok(())
            }
        }
    }

    fn edit_memo(&mut self, mut memo: Memo) -> CliResult<()> {
        writeln!(self.output, "[1] Edit title")?;
        writeln!(self.output, "[2] Edit body")?;
        writeln!(self.output, "[3] Edit tags")?;
        let choice = self.prompt("Select (Enter to go back): ")?;

        let updated_field = match choice.trim() {
            "" => {
                writeln!(self.output, "Edit skipped.")?;
                return Ok(());
            }
            "1" => {
                let title = self.prompt("New title: ")?.trim().to_string();
                if title.is_empty() {
                    writeln!(self.output, "Title cannot be empty.")?;
                    return Ok(());
                }
                memo.set_title(title);
                "Title"
            }
            "2" => {
                let body = self.prompt_body()?;
                memo.set_body(body);
                "Body"
            }
            "3" => {
                let tags = self.prompt_tags()?;
                memo.set_tags(tags);
                "Tags"
            }
            _ => {
                writeln!(self.output, "Invalid choice.")?;
                return Ok(());
            }
        };

        match self.service.update(&memo) {
            Ok(true) => writeln!(self.output, "{updated_field} updated.")?,
            Ok(false) => writeln!(self.output, "Memo no longer exists.")?,
            Err(err) => self.report("edit", &err)?,
        }
        Ok(())
    }

    fn prompt_body(&mut self) -> CliResult<String> {
        writeln!(
            self.output,
            "Body (finish with a line containing only `{BODY_TERMINATOR}`):"
        )?;
        self.output.flush()?;
        let mut lines = Vec::new();
        loop {
            let line = self.read_line()?;
            if line == BODY_TERMINATOR {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n").trim().to_string())
    }

    fn prompt_tags(&mut self) -> CliResult<Vec<String>> {
        let raw = self.prompt("Tags, comma separated (e.g. #work, study): ")?;
        Ok(parse_tag_input(&raw))
    }

    fn select(&mut self, message: &str, len: usize) -> CliResult<Selection> {
        let input = self.prompt(message)?;
        let input = input.trim();
        if input.is_empty() {
            writeln!(self.output, "Cancelled.")?;
            return Ok(Selection::Cancelled);
        }
        let Ok(number) = input.parse::<usize>() else {
            writeln!(self.output, "Please enter a number.")?;
            return Ok(Selection::Invalid);
        };
        if number == 0 || number > len {
            writeln!(self.output, "No entry with that number.")?;
            return Ok(Selection::Invalid);
        }
        Ok(Selection::Picked(number - 1))
    }

    fn prompt(&mut self, message: &str) -> CliResult<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> CliResult<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::InputClosed);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    fn report(&mut self, action: &'static str, err: &RepoError) -> CliResult<()> {
        error!(
            "event=cli_action module=cli status=error action={} operation={} error={}",
            action,
            err.operation(),
            err
        );
        writeln!(self.output, "Error: {err}")?;
        Ok(())
    }
}

fn timestamp_line(memo: &Memo) -> String {
    let (kind, value) = memo.display_timestamp();
    format!("{}: {value}", kind.label())
}
