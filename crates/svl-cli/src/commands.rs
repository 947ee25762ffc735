use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use svl_document::{
    EventLog, ShaderVariantDocument, SvlConfig, load_option_layout, load_variant_list,
    variant_list_path,
};
use svl_model::{ShaderOptionLayout, VariantList};

use crate::types::RunSummary;

/// Settings from `--config`, or the defaults when none was given.
pub fn load_config(path: Option<&Path>) -> Result<SvlConfig> {
    match path {
        Some(path) => {
            let config = SvlConfig::load(path)
                .with_context(|| format!("load config {}", path.display()))?;
            debug!(path = %path.display(), ?config, "loaded config");
            Ok(config)
        }
        None => Ok(SvlConfig::default()),
    }
}

pub fn load_layout(path: &Path) -> Result<ShaderOptionLayout> {
    load_option_layout(path).with_context(|| format!("load option layout {}", path.display()))
}

pub fn load_list(path: &Path) -> Result<VariantList> {
    load_variant_list(path).with_context(|| format!("load variant list {}", path.display()))
}

pub fn run_init(
    shader: &Path,
    layout: &Path,
    output: Option<&Path>,
    config: SvlConfig,
) -> Result<RunSummary> {
    let span = info_span!("init", shader = %shader.display());
    let _guard = span.enter();

    let (mut document, log) = new_document(config, Some(layout))?;
    document
        .open(shader)
        .with_context(|| format!("open shader {}", shader.display()))?;

    let target = output.map_or_else(|| variant_list_path(shader), Path::to_path_buf);
    document
        .save_as(&target)
        .with_context(|| format!("save {}", target.display()))?;

    let mut notes = Vec::new();
    if document.variant_list().is_empty() {
        notes.push("no system options found; the list is empty".to_string());
    }
    info!(variants = document.variant_list().len(), "initialized variant list");
    Ok(summary("init", &target, 0, &document, &log, notes))
}

pub fn run_append(
    list: &Path,
    layout: &Path,
    rows: &Path,
    defrag: bool,
    config: SvlConfig,
) -> Result<RunSummary> {
    let span = info_span!("append", list = %list.display());
    let _guard = span.enter();

    let (headers, matrix) = read_rows(rows)?;
    let (mut document, log) = new_document(config, Some(layout))?;
    document
        .open(list)
        .with_context(|| format!("open {}", list.display()))?;
    let before = document.variant_list().len();

    let known: BTreeSet<&str> = layout_names(&document)?;
    let mut notes: Vec<String> = headers
        .iter()
        .filter(|header| !known.contains(header.as_str()))
        .map(|header| format!("column '{header}' is not a shader option and was ignored"))
        .collect();

    document.begin_edit()?;
    let appended = document
        .append_sparse_variant_set(&headers, &matrix)
        .with_context(|| format!("append rows from {}", rows.display()))?;
    if let (Some(first), Some(last)) = (appended.ids().next(), appended.ids().last()) {
        notes.push(format!("appended stable ids {first}..={last}"));
    }
    if defrag {
        let report = document.defragment_variant_list()?;
        notes.push(format!("defragmentation removed {} duplicates", report.removed));
    }
    document.end_edit()?;

    document
        .save()
        .with_context(|| format!("save {}", list.display()))?;
    Ok(summary("append", list, before, &document, &log, notes))
}

pub fn run_defrag(list: &Path, config: SvlConfig) -> Result<RunSummary> {
    let span = info_span!("defrag", list = %list.display());
    let _guard = span.enter();

    let (mut document, log) = new_document(config, None)?;
    document
        .open(list)
        .with_context(|| format!("open {}", list.display()))?;
    let before = document.variant_list().len();

    let report = document.defragment_variant_list()?;
    let mut notes = Vec::new();
    if document.is_modified() {
        document
            .save()
            .with_context(|| format!("save {}", list.display()))?;
        notes.push(format!("removed {} duplicates", report.removed));
    } else {
        notes.push("already defragmented; file left untouched".to_string());
    }
    Ok(summary("defrag", list, before, &document, &log, notes))
}

/// Reads a CSV of sparse variants: the header row names options, each later
/// row holds one variant. Cells are trimmed; an empty cell leaves the option
/// unset.
pub fn read_rows(path: &Path) -> Result<(Vec<String>, Vec<String>)> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("open rows {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("read header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(String::is_empty) {
        bail!("{} has no header row", path.display());
    }

    let mut matrix = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read row of {}", path.display()))?;
        matrix.extend(record.iter().map(str::to_string));
    }
    debug!(
        columns = headers.len(),
        rows = matrix.len() / headers.len(),
        "read variant rows"
    );
    Ok((headers, matrix))
}

/// Column order for printing a list: layout options first, in layout order,
/// then any other option the variants mention, sorted.
pub fn column_order(list: &VariantList, layout: Option<&ShaderOptionLayout>) -> Vec<String> {
    let mut columns: Vec<String> = layout
        .map(|layout| layout.iter().map(|option| option.name().to_string()).collect())
        .unwrap_or_default();
    let extra: BTreeSet<&str> = list
        .variants
        .iter()
        .flat_map(|variant| variant.options.iter().map(|(name, _)| name))
        .filter(|name| !columns.iter().any(|column| column == name))
        .collect();
    columns.extend(extra.into_iter().map(str::to_string));
    columns
}

fn new_document(
    config: SvlConfig,
    layout: Option<&Path>,
) -> Result<(ShaderVariantDocument, EventLog)> {
    let mut document = ShaderVariantDocument::new(config);
    if let Some(path) = layout {
        document.set_catalog(Arc::new(load_layout(path)?));
    }
    let log = EventLog::new();
    document.subscribe(log.clone());
    Ok((document, log))
}

fn layout_names(document: &ShaderVariantDocument) -> Result<BTreeSet<&str>> {
    let mut names = BTreeSet::new();
    for index in 0..document.option_descriptor_count()? {
        names.insert(document.option_descriptor(index)?.name());
    }
    Ok(names)
}

fn summary(
    command: &'static str,
    path: &Path,
    variants_before: usize,
    document: &ShaderVariantDocument,
    log: &EventLog,
    notes: Vec<String>,
) -> RunSummary {
    RunSummary {
        command,
        path: path.to_path_buf(),
        variants_before,
        variants_after: document.variant_list().len(),
        history_entries: document.history_len(),
        events: log.len(),
        notes,
    }
}
