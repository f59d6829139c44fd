//! Interactive shell entry point.
//!
//! # Responsibility
//! - Resolve configuration, wire up storage and logging, then hand every
//!   input line to `lazytask_core` and print what comes back.
//! - Keep zero task logic here; the core owns the session.

use lazytask_core::{default_log_level, init_logging, responses, FileTaskStore, Interpreter};
use log::info;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const TASK_FILE_ENV: &str = "LAZYTASK_FILE";
const LOG_DIR_ENV: &str = "LAZYTASK_LOG_DIR";
const LOG_LEVEL_ENV: &str = "LAZYTASK_LOG_LEVEL";

const DEFAULT_TASK_FILE: &str = "data/lazytask.txt";
const DEFAULT_LOG_SUBDIR: &str = ".lazytask/logs";

fn main() {
    // Logging failure is a warning, never fatal to the session.
    if let Err(message) = init_logging(&resolve_log_level(), &resolve_log_dir()) {
        eprintln!("lazytask: logging disabled: {message}");
    }

    let task_file = resolve_task_file();
    info!(
        "event=session_start module=cli status=ok task_file={}",
        task_file.display()
    );

    let (mut session, load_error) = Interpreter::load(FileTaskStore::new(task_file));

    println!("{}", responses::greeting());
    if let Some(err) = load_error.as_ref() {
        println!("{}", responses::load_warning(err));
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("lazytask: cannot read input: {err}");
                break;
            }
        };

        let reply = session.execute(&line);
        println!("{}", reply.text);
        let _ = io::stdout().flush();

        if reply.is_farewell {
            info!("event=session_end module=cli status=ok reason=farewell");
            return;
        }
    }

    // EOF without `bye`; every mutation already synced.
    info!("event=session_end module=cli status=ok reason=eof");
}

fn resolve_task_file() -> PathBuf {
    env::var(TASK_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_TASK_FILE))
}

fn resolve_log_level() -> String {
    env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string())
}

fn resolve_log_dir() -> String {
    if let Ok(dir) = env::var(LOG_DIR_ENV) {
        return dir;
    }
    let base = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    base.join(DEFAULT_LOG_SUBDIR).to_string_lossy().into_owned()
}
