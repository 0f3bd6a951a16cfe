//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler, then
//! runs scan, plan, confirmation, apply and the optional undo, one phase at a time.

use anyhow::Result;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

use canon_rename::cli::Args;
use canon_rename::config::{default_config_path, load_or_init, Config, LoadResult, CONFIG_ENV};
use canon_rename::output as out;
use canon_rename::report::{export_applied, export_preview};
use canon_rename::{
    apply, count_collisions, enumerate, plan, preview, shutdown, write_csv, AppliedOperation,
    BatchSummary, CanonError, CollisionPolicy, PlannedOperation, UndoLog, UndoSummary,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(ExitCode::SUCCESS);
    }

    let mut cfg = match load_or_init()? {
        LoadResult::Loaded(cfg, _) => cfg,
        LoadResult::CreatedTemplate(path) => {
            out::print_success(&format!("A template canon_rename config was written to: {}", path.display()));
            Config::default()
        }
        LoadResult::Missing => Config::default(),
    };
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // The guard is dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        let installed = ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current phase...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        });
        if let Err(e) = installed {
            warn!(error = %e, "could not install Ctrl-C handler");
        }
    }

    debug!("Starting canon_rename: {:?}", args);

    let result = run_batch(&args, &mut cfg).inspect_err(|e| {
        if let Some(ce) = e.downcast_ref::<CanonError>() {
            error!(code = ce.code(), error = %ce, "canon_rename failed");
        } else {
            error!(error = ?e, "canon_rename failed");
        }
    });

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    result
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default canon_rename config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run without --print-config to create a template.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}

fn interrupted() -> bool {
    if shutdown::is_requested() {
        out::print_warn("Interrupted; nothing further was changed.");
        return true;
    }
    false
}

fn run_batch(args: &Args, cfg: &mut Config) -> Result<ExitCode> {
    cfg.validate_and_normalize()?;

    let candidates = enumerate(&cfg.roots, cfg.kind_filter(), cfg.depth)?;
    let ops = plan(candidates, cfg.replace_spaces);
    if ops.is_empty() {
        out::print_info("No items need renaming.");
        return Ok(ExitCode::SUCCESS);
    }
    if interrupted() {
        return Ok(ExitCode::FAILURE);
    }

    if cfg.dry_run {
        let rows = preview(&ops);
        for row in &rows {
            out::print_user(&format!(
                "{}\t{}\t{}\t{}\t{}",
                row.op.root.display(),
                row.op.source.kind,
                row.op.source.path.display(),
                row.op.intended_target.display(),
                row.status
            ));
        }
        out::print_info(&format!("Dry-run: {} item(s) would be renamed.", rows.len()));
        if let Some(csv) = &args.csv {
            write_csv(csv, &export_preview(&rows))?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    if !args.yes && !confirm_batch(&ops, cfg.policy)? {
        out::print_info("Cancelled; nothing was renamed.");
        return Ok(ExitCode::SUCCESS);
    }
    if interrupted() {
        return Ok(ExitCode::FAILURE);
    }

    let applied = apply(ops, cfg.policy);
    print_applied(&applied);
    let summary = BatchSummary::from_applied(&applied);
    print_summary(&summary);
    if let Some(csv) = &args.csv {
        write_csv(csv, &export_applied(&applied))?;
    }

    if !args.yes && out::is_interactive() && !interrupted() && summary.total() > summary.errors {
        offer_undo(applied)?;
    }

    Ok(if summary.errors > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn confirm_batch(ops: &[PlannedOperation], policy: CollisionPolicy) -> Result<bool> {
    if !out::is_interactive() {
        out::print_error("Not running on a terminal; pass --yes to apply without confirmation.");
        return Ok(false);
    }
    out::print_info(&format!("Found {} item(s) to rename.", ops.len()));
    let collisions = count_collisions(ops);
    if collisions > 0 {
        let what = match policy {
            CollisionPolicy::Suffix => "kept side by side with a _N suffix",
            CollisionPolicy::Delete => "DELETED before renaming",
            CollisionPolicy::Merge => {
                "MERGED into (folders merged recursively, identical files dropped, different files kept as _1)"
            }
        };
        out::print_warn(&format!("{collisions} existing path(s) will be {what}."));
    }
    Ok(out::confirm("Proceed?")?)
}

fn print_applied(applied: &[AppliedOperation]) {
    for a in applied {
        let mut line = format!(
            "{}\t{}\t{}\t{}",
            a.source.kind,
            a.source.path.display(),
            a.actual_target.display(),
            a.outcome
        );
        if let Some(stats) = &a.merge_stats {
            line.push_str(&format!(
                "\tmoved={} copied={} deduplicated={} kept_both={} errors={}",
                stats.moved, stats.copied, stats.deduplicated, stats.kept_both_conflicts, stats.errors
            ));
        }
        if let Some(err) = &a.error {
            line.push('\t');
            line.push_str(err);
        }
        out::print_user(&line);
    }
}

fn print_summary(s: &BatchSummary) {
    let msg = format!(
        "Renamed {} | suffixed {} | deleted-before-rename {} | merged {} | skipped identical {} | kept both {} | errors {}",
        s.renamed, s.suffixed, s.deleted_then_renamed, s.merged, s.skipped_identical, s.kept_both, s.errors
    );
    if s.errors > 0 {
        out::print_warn(&msg);
    } else {
        out::print_success(&msg);
    }
}

fn offer_undo(applied: Vec<AppliedOperation>) -> Result<()> {
    let mut log = UndoLog::new(applied);
    if !out::confirm("Undo this batch?")? {
        return Ok(());
    }
    let results = log.undo();
    for r in &results {
        out::print_user(&format!("{}\t{}\t{}", r.from.display(), r.to.display(), r.outcome));
    }
    let s = UndoSummary::from_results(&results);
    out::print_info(&format!(
        "Undone {} | merges left as is {} | missing {} | errors {}",
        s.undone, s.skipped_merge, s.missing, s.errors
    ));
    Ok(())
}
