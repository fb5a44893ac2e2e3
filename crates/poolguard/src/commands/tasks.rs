//! Task list command handlers.

use tabled::Tabled;

use poolguard_core::{Category, EditMode, Frequency, ScheduledTask, Session};

use crate::cli::{GlobalOpts, TasksArgs, TasksCommand};
use crate::error::CliError;
use crate::output::{self, Palette};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "")]
    done: String,
    #[tabled(rename = "Task")]
    description: String,
    #[tabled(rename = "Every")]
    frequency: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl TaskRow {
    fn new(task: &ScheduledTask, palette: Palette) -> Self {
        Self {
            id: task.id.clone(),
            done: if task.completed {
                palette.good("✓")
            } else {
                "·".into()
            },
            description: if task.completed {
                palette.dim(&task.description)
            } else {
                task.description.clone()
            },
            frequency: task.frequency.to_string(),
            category: task.category.to_string(),
        }
    }
}

fn print_tasks(tasks: &[ScheduledTask], global: &GlobalOpts) -> Result<(), CliError> {
    let palette = Palette::new(&global.color);
    let out = output::render_list(
        &global.output,
        tasks,
        |t| TaskRow::new(t, palette),
        |t| t.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &mut Session,
    args: TasksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TasksCommand::List { pending } => {
            if pending {
                let open: Vec<ScheduledTask> =
                    session.schedule().pending().into_iter().cloned().collect();
                print_tasks(&open, global)
            } else {
                print_tasks(session.schedule().tasks(), global)
            }
        }

        TasksCommand::Add {
            description,
            frequency,
            category,
        } => {
            let task = session
                .add_task(
                    &description,
                    Frequency::from(frequency),
                    Category::from(category),
                )
                .await
                .ok_or_else(|| CliError::Validation {
                    field: "description".into(),
                    reason: "cannot be blank".into(),
                })?;
            util::report_sync(session, global);
            print_tasks(std::slice::from_ref(&task), global)
        }

        TasksCommand::Toggle { id, edit_mode } => {
            util::require_task(session, &id)?;
            session.set_edit_mode(EditMode::from(edit_mode));

            match session.toggle_task(&id).await {
                Some(completed) => {
                    util::report_sync(session, global);
                    let state = if completed { "done" } else { "not done" };
                    output::notice(&format!("✓ Task {id} marked {state}"), global.quiet);
                }
                None => output::notice(
                    "Task list is being configured, completion left unchanged",
                    global.quiet,
                ),
            }
            Ok(())
        }

        TasksCommand::Remove { id } => {
            util::require_task(session, &id)?;
            if !util::confirm(&format!("Remove task {id}?"), "tasks remove", global.yes)? {
                return Ok(());
            }
            if let Some(removed) = session.remove_task(&id).await {
                util::report_sync(session, global);
                output::notice(
                    &format!("✓ Removed \"{}\"", removed.description),
                    global.quiet,
                );
            }
            Ok(())
        }
    }
}
