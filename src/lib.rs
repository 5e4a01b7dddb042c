// src/lib.rs

pub mod cli;
pub mod config;
pub mod console;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod interpreter;
pub mod launcher;
pub mod logging;
pub mod messages;

use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{EnvSnapshot, LaunchPlan, Overrides, explicit_config_path, load_effective, resolve_plan};
use crate::console::{Console, KeyPressPauser};
use crate::errors::Result;
use crate::exec::RealProcessBackend;
use crate::fs::{FileSystem, RealFileSystem};
use crate::interpreter::{PathSearch, WhichSearch};
use crate::launcher::Launcher;

/// High-level entry point used by `main.rs`.
///
/// Returns the process exit code for launch outcomes (`0` or `1`); an `Err`
/// means the launcher could not even get as far as launching (bad config,
/// unreadable file) and is reported by `main`.
pub async fn run(args: CliArgs) -> Result<i32> {
    let env = EnvSnapshot::from_process();
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    let config_path = explicit_config_path(&args, &env);
    let cfg = load_effective(fs.as_ref(), config_path.as_deref())?;
    let plan = resolve_plan(&cfg, &Overrides::from(&args), &env, fs.as_ref())?;

    if args.dry_run {
        print_dry_run(&mut std::io::stdout(), &plan, fs.as_ref(), &WhichSearch)?;
        return Ok(0);
    }

    let launcher = Launcher::new(
        plan,
        RealProcessBackend::new(),
        fs,
        Box::new(WhichSearch),
        Console::stdio(),
        Box::new(KeyPressPauser),
    );

    let report = launcher.run().await;
    let code = report.exit_code();
    info!(exit_code = code, paused = report.paused, "launcher finished");
    Ok(code)
}

/// Print the resolved plan without spawning or pausing.
pub fn print_dry_run(
    w: &mut dyn Write,
    plan: &LaunchPlan,
    fs: &dyn FileSystem,
    search: &dyn PathSearch,
) -> Result<()> {
    writeln!(w, "ipmon-launcher dry-run")?;
    writeln!(w, "  interpreter = {}", plan.interpreter)?;
    match plan.interpreter.locate(fs, search) {
        Ok(found) => writeln!(w, "    resolved to {}", found.display())?,
        Err(e) => writeln!(w, "    NOT FOUND ({e})")?,
    }
    let script_path = match &plan.working_dir {
        Some(dir) => dir.join(&plan.script),
        None => plan.script.clone(),
    };
    let script_state = if fs.exists(&script_path) { "" } else { " (missing)" };
    writeln!(w, "  script = {}{}", plan.script.display(), script_state)?;
    match &plan.working_dir {
        Some(dir) => writeln!(w, "  working_dir = {}", dir.display())?,
        None => writeln!(w, "  working_dir = <current directory>")?,
    }
    writeln!(w, "  pause = {:?}", plan.pause)?;
    writeln!(w, "  locale = {:?}", plan.locale)?;

    debug!("dry-run complete (no execution)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::PausePolicy;
    use crate::fs::mock::MockFileSystem;
    use crate::interpreter::{DirListSearch, InterpreterSpec};
    use crate::messages::{Locale, Messages};

    #[test]
    fn dry_run_reports_resolution_state() {
        let fs = MockFileSystem::new();
        fs.add_file("/py/python", b"");
        let search = DirListSearch::new(&fs, Vec::<PathBuf>::new());
        let plan = LaunchPlan {
            interpreter: InterpreterSpec::parse("/py/python"),
            script: PathBuf::from("src/main.py"),
            working_dir: None,
            pause: PausePolicy::Never,
            locale: Locale::En,
            messages: Messages::for_locale(Locale::En),
        };

        let mut buf = Vec::new();
        print_dry_run(&mut buf, &plan, &fs, &search).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("resolved to /py/python"));
        assert!(text.contains("script = src/main.py (missing)"));
        assert!(text.contains("pause = Never"));
    }

    #[test]
    fn dry_run_looks_for_script_inside_working_dir() {
        let fs = MockFileSystem::new();
        fs.add_file("/py/python", b"");
        fs.add_file("/srv/ipmon/src/main.py", b"");
        let search = DirListSearch::new(&fs, Vec::<PathBuf>::new());
        let plan = LaunchPlan {
            interpreter: InterpreterSpec::parse("/py/python"),
            script: PathBuf::from("src/main.py"),
            working_dir: Some(PathBuf::from("/srv/ipmon")),
            pause: PausePolicy::Never,
            locale: Locale::En,
            messages: Messages::for_locale(Locale::En),
        };

        let mut buf = Vec::new();
        print_dry_run(&mut buf, &plan, &fs, &search).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("script = src/main.py\n"));
        assert!(!text.contains("(missing)"));
        assert!(text.contains("working_dir = /srv/ipmon"));
    }
}
