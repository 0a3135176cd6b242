use anyhow::{anyhow, Context as _, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;
use zephyr_store::paths;

pub fn launch(db_path: Option<PathBuf>, config_path: Option<PathBuf>, verbose: bool) -> Result<()> {
    let mut command = Command::new(find_form_binary());
    if let Some(path) = db_path {
        let path = paths::resolve_db_path(Some(path)).with_context(|| "resolve database path")?;
        if verbose {
            eprintln!("db: {}", path.display());
        }
        command.arg("--db-path").arg(path);
    }
    if let Some(path) = config_path {
        command.arg("--config").arg(path);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let err = command.exec();
        Err(exec_error(err))
    }

    #[cfg(not(unix))]
    {
        let status = command.status().with_context(|| "launch zephyr-tui")?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

fn find_form_binary() -> PathBuf {
    let name = format!("zephyr-tui{}", env::consts::EXE_SUFFIX);
    env::current_exe()
        .ok()
        .and_then(|current| current.parent().map(|dir| dir.join(&name)))
        .filter(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from(name))
}

fn exec_error(err: std::io::Error) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        return anyhow!(
            "zephyr-tui binary not found; build it with `cargo build -p zephyr-tui` or install the package"
        );
    }
    anyhow!("launch zephyr-tui failed: {}", err)
}
