//! Line-driven board editing

use super::session;
use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use taskboard::{
    Board, BoardStore, Label, LabelCatalog, Priority, Task, TaskDraft, TaskFilter, TaskId,
    TaskboardConfig, TaskboardError, TicketStatus, User,
};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Characters of a task id shown on the board
const SHORT_ID_LEN: usize = 8;

/// Field names accepted by `add` and `set`
const TASK_FIELDS: [&str; 6] = ["assignee", "client", "labels", "ticket", "priority", "due"];

/// One line of board input
#[derive(Debug, Clone, PartialEq)]
pub enum BoardCommand {
    Add {
        title: String,
        fields: Vec<TaskField>,
    },
    Move {
        task: String,
        column: String,
    },
    Edit {
        task: String,
        title: String,
    },
    Describe {
        task: String,
        text: String,
    },
    Set {
        task: String,
        fields: Vec<TaskField>,
    },
    Comment {
        task: String,
        text: String,
    },
    Filter(TaskFilter),
    ClearFilter,
    Show,
    Quit,
}

/// One `field=value` assignment on a task. An empty value clears the field.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskField {
    Assignee(Option<String>),
    Client(Option<String>),
    Labels(Vec<Label>),
    Ticket(Option<TicketStatus>),
    Priority(Priority),
    Due(Option<DateTime<Utc>>),
}

impl TaskField {
    fn apply_to_draft(self, draft: &mut TaskDraft) {
        match self {
            Self::Assignee(assignee) => draft.assignee = assignee,
            Self::Client(client) => draft.client_name = client,
            Self::Labels(labels) => draft.labels = labels,
            Self::Ticket(ticket) => draft.ticket_status = ticket,
            Self::Priority(priority) => draft.priority = priority,
            Self::Due(due) => draft.due_date = due,
        }
    }

    fn apply_to_task(self, task: &mut Task) {
        match self {
            Self::Assignee(assignee) => task.assignee = assignee,
            Self::Client(client) => task.client_name = client,
            Self::Labels(labels) => task.labels = labels,
            Self::Ticket(ticket) => task.ticket_status = ticket,
            Self::Priority(priority) => task.priority = priority,
            Self::Due(due) => task.due_date = due,
        }
    }
}

pub async fn run(config: &TaskboardConfig) -> anyhow::Result<()> {
    let session = session::open(config).await?;
    let mut board = BoardSession::new(config.label_catalog(), session.current_user());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line, board.labels()) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("error: {e:#}");
                continue;
            }
        };
        if command == BoardCommand::Quit {
            break;
        }

        match board.execute(command) {
            Ok(output) => println!("{output}"),
            Err(e) => eprintln!("error: {e:#}"),
        }
    }
    Ok(())
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str, labels: &LabelCatalog) -> anyhow::Result<Option<BoardCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((line, ""));

    let command = match verb {
        "add" => {
            let (title, fields) = split_title(rest);
            BoardCommand::Add {
                title: required(&title, "add <title> [field=value ...]")?.to_string(),
                fields: parse_fields(&fields, labels)?,
            }
        }
        "move" => {
            let (task, column) = two_args(rest, "move <task> <column>")?;
            BoardCommand::Move { task, column }
        }
        "edit" => {
            let (task, title) = two_args(rest, "edit <task> <title>")?;
            BoardCommand::Edit { task, title }
        }
        "describe" => {
            let (task, text) = two_args(rest, "describe <task> <text>")?;
            BoardCommand::Describe { task, text }
        }
        "set" => {
            let (task, pairs) = two_args(rest, "set <task> field=value ...")?;
            let pairs: Vec<&str> = pairs.split_whitespace().collect();
            BoardCommand::Set {
                task,
                fields: parse_fields(&pairs, labels)?,
            }
        }
        "comment" => {
            let (task, text) = two_args(rest, "comment <task> <text>")?;
            BoardCommand::Comment { task, text }
        }
        "filter" => BoardCommand::Filter(parse_filter(rest, labels)?),
        "clear-filter" => BoardCommand::ClearFilter,
        "show" => BoardCommand::Show,
        "quit" | "exit" => BoardCommand::Quit,
        other => bail!("unknown command '{other}'"),
    };
    Ok(Some(command))
}

fn required<'a>(value: &'a str, usage: &str) -> anyhow::Result<&'a str> {
    if value.is_empty() {
        bail!("usage: {usage}");
    }
    Ok(value)
}

/// First word, then the rest of the line
fn two_args(rest: &str, usage: &str) -> anyhow::Result<(String, String)> {
    match rest.split_once(char::is_whitespace) {
        Some((first, second)) if !second.trim().is_empty() => {
            Ok((first.to_string(), second.trim().to_string()))
        }
        _ => bail!("usage: {usage}"),
    }
}

/// Split trailing `field=value` tokens off a title
fn split_title(rest: &str) -> (String, Vec<&str>) {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let title_len = tokens
        .iter()
        .rposition(|token| !is_field_token(token))
        .map_or(0, |last| last + 1);
    (tokens[..title_len].join(" "), tokens[title_len..].to_vec())
}

fn is_field_token(token: &str) -> bool {
    token
        .split_once('=')
        .is_some_and(|(field, _)| TASK_FIELDS.contains(&field))
}

/// Parse task `field=value` pairs. Labels are comma separated ids or names,
/// `due` is `YYYY-MM-DD`.
pub fn parse_fields(pairs: &[&str], labels: &LabelCatalog) -> anyhow::Result<Vec<TaskField>> {
    pairs
        .iter()
        .map(|pair| {
            let (field, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("expected field=value, got '{pair}'"))?;
            let text = (!value.is_empty()).then(|| value.to_string());

            Ok(match field {
                "assignee" => TaskField::Assignee(text),
                "client" => TaskField::Client(text),
                "labels" => TaskField::Labels(
                    resolve_labels(value, labels)?
                        .into_iter()
                        .cloned()
                        .collect(),
                ),
                "ticket" if value.is_empty() => TaskField::Ticket(None),
                "ticket" => TaskField::Ticket(Some(value.parse()?)),
                "priority" => TaskField::Priority(value.parse()?),
                "due" if value.is_empty() => TaskField::Due(None),
                "due" => TaskField::Due(Some(day_start(parse_date(value)?))),
                other => bail!("unknown task field '{other}'"),
            })
        })
        .collect()
}

fn resolve_labels<'a>(value: &str, labels: &'a LabelCatalog) -> anyhow::Result<Vec<&'a Label>> {
    value
        .split(',')
        .filter(|key| !key.is_empty())
        .map(|key| {
            labels
                .resolve(key)
                .ok_or_else(|| anyhow!("unknown label '{key}'"))
        })
        .collect()
}

/// Parse `field=value` pairs. Labels are comma separated ids or names; dates
/// are `YYYY-MM-DD` and both ends are inclusive.
pub fn parse_filter(args: &str, labels: &LabelCatalog) -> anyhow::Result<TaskFilter> {
    let mut filter = TaskFilter::new();

    for pair in args.split_whitespace() {
        let (field, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected field=value, got '{pair}'"))?;

        filter = match field {
            "assignee" => filter.with_assignee(value),
            "client" | "client_name" => filter.with_client_name(value),
            "ticket" | "ticket_status" => {
                filter.with_ticket_status(value.parse::<TicketStatus>()?)
            }
            "labels" => filter.with_labels(
                resolve_labels(value, labels)?
                    .into_iter()
                    .map(|label| label.id.clone()),
            ),
            "from" => filter.with_date_from(day_start(parse_date(value)?)),
            "to" => filter.with_date_to(day_end(parse_date(value)?)),
            other => bail!("unknown filter field '{other}'"),
        };
    }
    Ok(filter)
}

fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn day_end(date: NaiveDate) -> DateTime<Utc> {
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(end).and_utc()
}

/// A board, the active filter and whoever comments
pub struct BoardSession {
    store: BoardStore,
    filter: TaskFilter,
    author: Option<User>,
}

impl BoardSession {
    pub fn new(labels: LabelCatalog, author: Option<User>) -> Self {
        let mut store = BoardStore::with_labels(labels);
        store
            .processor_mut()
            .set_actor(author.as_ref().map(|user| user.email.clone()));
        Self {
            store,
            filter: TaskFilter::new(),
            author,
        }
    }

    pub fn labels(&self) -> &LabelCatalog {
        self.store.labels()
    }

    pub fn board(&self) -> &Board {
        self.store.board()
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Apply a command and describe the result
    pub fn execute(&mut self, command: BoardCommand) -> anyhow::Result<String> {
        let output = match command {
            BoardCommand::Add { title, fields } => {
                let mut draft = TaskDraft::new(title);
                for field in fields {
                    field.apply_to_draft(&mut draft);
                }
                let task = self.store.create_task(draft)?;
                format!("Created {} {}", short_id(&task.id), task.title)
            }
            BoardCommand::Move { task, column } => {
                let id = self.resolve_task(&task)?;
                let task = self.store.move_task(id, column)?;
                format!("Moved {} to {}", short_id(&task.id), task.status.title())
            }
            BoardCommand::Edit { task, title } => {
                let id = self.resolve_task(&task)?;
                let mut edited = self.task(&id)?.clone();
                edited.title = title;
                let task = self.store.update_task(edited)?;
                format!("Updated {} {}", short_id(&task.id), task.title)
            }
            BoardCommand::Describe { task, text } => {
                let id = self.resolve_task(&task)?;
                let mut edited = self.task(&id)?.clone();
                edited.description = text;
                let task = self.store.update_task(edited)?;
                format!("Updated {} {}", short_id(&task.id), task.title)
            }
            BoardCommand::Set { task, fields } => {
                let id = self.resolve_task(&task)?;
                let mut edited = self.task(&id)?.clone();
                for field in fields {
                    field.apply_to_task(&mut edited);
                }
                let task = self.store.update_task(edited)?;
                format!("Updated {} {}", short_id(&task.id), task.title)
            }
            BoardCommand::Comment { task, text } => {
                let id = self.resolve_task(&task)?;
                let task = match &self.author {
                    Some(user) => self.store.add_comment_as(id, text, user)?,
                    None => self.store.add_comment(id, text)?,
                };
                format!(
                    "Commented on {} ({} comments)",
                    short_id(&task.id),
                    task.comments.len()
                )
            }
            BoardCommand::Filter(filter) => {
                self.filter = filter;
                self.render().to_string()
            }
            BoardCommand::ClearFilter => {
                self.filter = TaskFilter::new();
                self.render().to_string()
            }
            BoardCommand::Show => self.render().to_string(),
            BoardCommand::Quit => String::new(),
        };
        Ok(output)
    }

    /// The visible board as a table, one column per status
    pub fn render(&self) -> Table {
        let visible = self.store.visible(&self.filter);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(
            visible
                .columns()
                .iter()
                .map(|column| format!("{} ({})", column.id.title(), column.len()))
                .collect::<Vec<_>>(),
        );

        let depth = visible.columns().iter().map(|c| c.len()).max().unwrap_or(0);
        for row in 0..depth {
            table.add_row(
                visible
                    .columns()
                    .iter()
                    .map(|column| column.tasks.get(row).map(|t| card(t)).unwrap_or_default())
                    .collect::<Vec<_>>(),
            );
        }
        table
    }

    /// Match a full id or a unique suffix of one, ignoring case
    fn resolve_task(&self, key: &str) -> anyhow::Result<TaskId> {
        let key = key.to_ascii_uppercase();
        let matches: Vec<&TaskId> = self
            .board()
            .tasks()
            .map(|task| &task.id)
            .filter(|id| id.as_str().to_ascii_uppercase().ends_with(&key))
            .collect();

        match matches.as_slice() {
            [id] => Ok((*id).clone()),
            [] => Err(TaskboardError::task_not_found(key).into()),
            _ => bail!("'{key}' matches {} tasks", matches.len()),
        }
    }

    fn task(&self, id: &TaskId) -> anyhow::Result<&Task> {
        self.board()
            .find_task(id)
            .map(|(_, task)| task.as_ref())
            .ok_or_else(|| TaskboardError::task_not_found(id).into())
    }
}

fn short_id(id: &TaskId) -> &str {
    let id = id.as_str();
    &id[id.len().saturating_sub(SHORT_ID_LEN)..]
}

fn card(task: &Task) -> String {
    let mut lines = vec![task.title.clone(), short_id(&task.id).to_string()];
    if let Some(assignee) = &task.assignee {
        lines.push(format!("@{assignee}"));
    }
    if let Some(client) = &task.client_name {
        lines.push(client.clone());
    }
    if let Some(ticket) = task.ticket_status {
        lines.push(format!("[{ticket}]"));
    }
    if !task.labels.is_empty() {
        let names: Vec<_> = task.labels.iter().map(|l| l.name.as_str()).collect();
        lines.push(names.join(", "));
    }
    if !task.comments.is_empty() {
        lines.push(format!("{} comments", task.comments.len()));
    }
    lines.join("\n")
}
