use std::path::Path;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use scour_cli::report::{describe_frame, purge_report_table};
use scour_core::{Frame, apply_domain, deduplicate, equal_width_template, purge, shuffle};
use scour_ingest::{read_frame, write_frame};
use scour_model::{BinningOptions, Derivation, PurgeConfig, PurgeOptions, ShuffleParts};

use crate::cli::{
    ApplyArgs, DiscretizeArgs, InfoArgs, PurgeArgs, ShuffleArgs, UniqueArgs,
};

fn load(path: &Path) -> Result<Frame> {
    read_frame(path).with_context(|| format!("read table: {}", path.display()))
}

/// Write the result when `-o` was given, otherwise print a one-line summary.
fn deliver(frame: &Frame, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_frame(path, frame)
                .with_context(|| format!("write table: {}", path.display()))?;
            println!(
                "wrote {} ({} rows, {} columns)",
                path.display(),
                frame.height(),
                frame.width()
            );
        }
        None => {
            println!(
                "{} rows, {} columns (pass -o/--output to write the table)",
                frame.height(),
                frame.width()
            );
        }
    }
    Ok(())
}

pub fn run_info(args: &InfoArgs) -> Result<()> {
    let frame = load(&args.table)?;
    print!("{}", describe_frame(&frame));
    Ok(())
}

pub fn run_purge(args: &PurgeArgs) -> Result<()> {
    let frame = load(&args.table)?;
    let config = purge_config(args);
    let (purged, report) = purge(&frame, &config)?;
    println!("{}", purge_report_table(&report, &config));
    deliver(&purged, args.output.as_deref())
}

fn purge_config(args: &PurgeArgs) -> PurgeConfig {
    PurgeConfig {
        attributes: PurgeOptions {
            sort_values: !args.no_sort_features,
            remove_unused_values: !args.no_reduce_features,
            remove_constant: !args.no_remove_features,
        },
        class_vars: PurgeOptions {
            sort_values: !args.no_sort_classes,
            remove_unused_values: !args.no_reduce_classes,
            remove_constant: !args.no_remove_classes,
        },
        // Meta value lists keep their order; the dialog has no switch for it.
        metas: PurgeOptions {
            sort_values: false,
            remove_unused_values: !args.no_reduce_metas,
            remove_constant: !args.no_remove_metas,
        },
    }
}

pub fn run_unique(args: &UniqueArgs) -> Result<()> {
    let frame = load(&args.table)?;
    for key in &args.keys {
        frame.domain().require(key).context("invalid --key")?;
    }
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    match deduplicate(&frame, &args.keys, args.tiebreak.tiebreak(), &mut rng)? {
        Some(kept) => {
            println!("kept {} of {} rows", kept.height(), frame.height());
            deliver(&kept, args.output.as_deref())
        }
        None => {
            println!("no rows kept");
            Ok(())
        }
    }
}

pub fn run_apply(args: &ApplyArgs) -> Result<()> {
    let frame = load(&args.table)?;
    let template = load(&args.template)?;
    let applied = apply_domain(&frame, template.domain())
        .with_context(|| format!("apply template {}", args.template.display()))?;
    deliver(&applied, args.output.as_deref())
}

pub fn run_discretize(args: &DiscretizeArgs) -> Result<()> {
    let frame = load(&args.table)?;
    let opts = BinningOptions {
        class_vars: args.classes,
        metas: args.metas,
        remove_constant: !args.keep_constant,
    };
    let template = equal_width_template(&frame, args.bins, &opts)?;
    let binned = template
        .iter()
        .filter(|column| matches!(column.derivation, Some(Derivation::Bin { .. })))
        .count();
    let discretized = apply_domain(&frame, &template).context("materialize binned table")?;
    info!(columns = binned, bins = args.bins, "discretized table");
    println!("binned {binned} continuous columns");
    deliver(&discretized, args.output.as_deref())
}

pub fn run_shuffle(args: &ShuffleArgs) -> Result<()> {
    let frame = load(&args.table)?;
    let parts = ShuffleParts {
        class_vars: !args.no_classes,
        attributes: args.features,
        metas: args.metas,
    };
    let shuffled = shuffle(&frame, &parts, args.seed)?;
    let mut groups = Vec::new();
    if parts.attributes {
        groups.push("features");
    }
    if parts.class_vars {
        groups.push("classes");
    }
    if parts.metas {
        groups.push("metas");
    }
    if groups.is_empty() {
        println!("shuffled nothing (all groups disabled)");
    } else {
        println!("shuffled {}", groups.join(", "));
    }
    deliver(&shuffled, args.output.as_deref())
}
