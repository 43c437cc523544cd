use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    Clipboard, ClipboardError, CompletionTracker, CopyFeedback, SidebarTracker, load_tasks,
    sample_tasks,
};
use storage::{InMemoryStore, JsonFileStore, KeyValueStore, Storage};
use taskdeck_core::Clock;
use taskdeck_core::model::{Task, TaskId};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyValue { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyValue { flag } => write!(f, "{flag} value must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    data_dir: PathBuf,
    tasks_file: Option<PathBuf>,
    task_id: Option<TaskId>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--data-dir <dir>] [--tasks <file>] [--task-id <id>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data-dir ./taskdeck-data");
    eprintln!("  --tasks    built-in sample tasks");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TASKDECK_DATA_DIR, TASKDECK_TASKS, TASKDECK_TASK_ID");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut data_dir = std::env::var("TASKDECK_DATA_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from("taskdeck-data"), PathBuf::from);
        let mut tasks_file = std::env::var("TASKDECK_TASKS")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut task_id = std::env::var("TASKDECK_TASK_ID")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(TaskId::new);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => {
                    let value = require_value(args, "--data-dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::EmptyValue { flag: "--data-dir" });
                    }
                    data_dir = PathBuf::from(value);
                }
                "--tasks" => {
                    let value = require_value(args, "--tasks")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::EmptyValue { flag: "--tasks" });
                    }
                    tasks_file = Some(PathBuf::from(value));
                }
                "--task-id" => {
                    let value = require_value(args, "--task-id")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::EmptyValue { flag: "--task-id" });
                    }
                    task_id = Some(TaskId::new(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            data_dir,
            tasks_file,
            task_id,
        })
    }
}

/// System clipboard behind the service seam. The handle is created on
/// first use so a headless environment only fails when a copy is
/// actually attempted.
struct SystemClipboard {
    inner: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard handle poisoned".to_string()))?;
        if guard.is_none() {
            let handle = arboard::Clipboard::new()
                .map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
            *guard = Some(handle);
        }
        match guard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|err| ClipboardError::Write(err.to_string())),
            None => Err(ClipboardError::Unavailable(
                "clipboard handle missing".to_string(),
            )),
        }
    }
}

struct DesktopApp {
    tasks: Arc<Vec<Task>>,
    completion: Arc<CompletionTracker>,
    sidebar: Arc<SidebarTracker>,
    copy_feedback: Arc<CopyFeedback>,
    initial_task: Option<TaskId>,
}

impl UiApp for DesktopApp {
    fn tasks(&self) -> Arc<Vec<Task>> {
        Arc::clone(&self.tasks)
    }

    fn completion(&self) -> Arc<CompletionTracker> {
        Arc::clone(&self.completion)
    }

    fn sidebar(&self) -> Arc<SidebarTracker> {
        Arc::clone(&self.sidebar)
    }

    fn copy_feedback(&self) -> Arc<CopyFeedback> {
        Arc::clone(&self.copy_feedback)
    }

    fn initial_task_id(&self) -> Option<TaskId> {
        self.initial_task.clone()
    }
}

fn load_task_set(tasks_file: Option<&Path>) -> Vec<Task> {
    let Some(path) = tasks_file else {
        return sample_tasks();
    };
    match load_tasks(path) {
        Ok(tasks) if !tasks.is_empty() => tasks,
        Ok(_) => {
            tracing::warn!(path = %path.display(), "task file is empty, using built-in tasks");
            sample_tasks()
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to load task file, using built-in tasks");
            sample_tasks()
        }
    }
}

fn build_storage(data_dir: &Path) -> Storage {
    let state_path = data_dir.join("state.json");
    let local: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(state_path));
    let session: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    Storage::new(local, session)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;

    let tasks = Arc::new(load_task_set(args.tasks_file.as_deref()));

    let initial_task = args.task_id.filter(|wanted| {
        let known = tasks.iter().any(|task| task.id() == wanted);
        if !known {
            tracing::warn!(task_id = %wanted, "requested task is not in the task set, ignoring");
        }
        known
    });

    let storage = build_storage(&args.data_dir);
    let completion = Arc::new(CompletionTracker::new(Arc::clone(&storage.local)));
    let sidebar = Arc::new(SidebarTracker::new(Arc::clone(&storage.session)));
    let copy_feedback = Arc::new(CopyFeedback::new(
        Arc::new(SystemClipboard::new()),
        Clock::default_clock(),
    ));

    tracing::info!(
        data_dir = %args.data_dir.display(),
        tasks = tasks.len(),
        "starting taskdeck"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        tasks,
        completion,
        sidebar,
        copy_feedback,
        initial_task,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Taskdeck")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
