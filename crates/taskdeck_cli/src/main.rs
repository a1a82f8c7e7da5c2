//! CLI smoke probe for `taskdeck_core`.
//!
//! Prints ping and version. With `TASKDECK_DB_PATH` set it also opens that
//! store (creating the schema when the file is new) and prints the schema
//! version and per-entity row counts.

use std::error::Error;
use std::process::ExitCode;
use taskdeck_core::{
    AttachmentRepository, CategoryRepository, CoreConfig, ReminderRepository, Repository, Store,
    SubtaskRepository, TaskRepository,
};

fn main() -> ExitCode {
    println!("taskdeck_core ping={}", taskdeck_core::ping());
    println!("taskdeck_core version={}", taskdeck_core::core_version());

    let config = CoreConfig::from_env();
    if let Err(err) = config.init_logging() {
        eprintln!("logging disabled: {err}");
    }

    let Some(db_path) = config.db_path.as_deref() else {
        return ExitCode::SUCCESS;
    };

    let store = match Store::open(db_path) {
        Ok(store) => store,
        Err(err) => {
            log::error!("event=cli_probe module=cli status=error error={err}");
            eprintln!("failed to open {}: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };

    match print_counts(&store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_probe module=cli status=error error={err}");
            eprintln!("failed to read store: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_counts(store: &Store) -> Result<(), Box<dyn Error>> {
    println!("schema_version={}", store.schema_version()?);
    println!("tasks={}", TaskRepository::new(store).get_all()?.len());
    println!("categories={}", CategoryRepository::new(store).get_all()?.len());
    println!("subtasks={}", SubtaskRepository::new(store).get_all()?.len());
    println!(
        "attachments={}",
        AttachmentRepository::new(store).get_all()?.len()
    );
    println!("reminders={}", ReminderRepository::new(store).get_all()?.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::print_counts;
    use taskdeck_core::Store;

    #[test]
    fn counts_are_printed_for_a_fresh_store() {
        let store = Store::open_in_memory().unwrap();
        print_counts(&store).unwrap();
    }
}
