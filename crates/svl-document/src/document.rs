//! The shader variant list document.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use svl_engine::{
    AppendedRange, DefragReport, add_variant_row, append_sparse_variant_set, defragment,
    expand_default_configuration,
};
use svl_model::{CatalogError, OptionCatalog, OptionDescriptor, OptionValues, StableId, VariantList};

use crate::config::SvlConfig;
use crate::edit::{EditOutcome, EditSession};
use crate::error::{DocumentError, Result};
use crate::events::{DocumentEvent, DocumentId, DocumentObserver};
use crate::history::UndoHistory;
use crate::io::{self, DocumentSource};

/// Shared handle to the option catalog of a loaded shader asset.
pub type SharedCatalog = Arc<dyn OptionCatalog + Send + Sync>;

/// An editable variant list bound to one shader.
///
/// Every mutation runs inside an edit transaction. Callers may open one
/// explicitly with [`begin_edit`](Self::begin_edit) to group several
/// operations into a single undo step; otherwise each operation opens and
/// closes its own.
pub struct ShaderVariantDocument {
    id: DocumentId,
    absolute_path: Option<PathBuf>,
    list: VariantList,
    catalog: Option<SharedCatalog>,
    system_options: Option<OptionValues>,
    config: SvlConfig,
    modified: bool,
    session: EditSession,
    history: UndoHistory,
    observers: Vec<Box<dyn DocumentObserver>>,
}

impl ShaderVariantDocument {
    pub fn new(config: SvlConfig) -> Self {
        Self {
            id: DocumentId::next(),
            absolute_path: None,
            list: VariantList::default(),
            catalog: None,
            system_options: None,
            config,
            modified: false,
            session: EditSession::new(),
            history: UndoHistory::new(config.history.max_entries),
            observers: Vec::new(),
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn absolute_path(&self) -> Option<&Path> {
        self.absolute_path.as_deref()
    }

    pub fn variant_list(&self) -> &VariantList {
        &self.list
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Attach the option catalog once the shader asset is loaded.
    pub fn set_catalog(&mut self, catalog: SharedCatalog) {
        self.catalog = Some(catalog);
    }

    /// Override the system-option defaults instead of reading them from the
    /// `.systemoptions` file next to the shader.
    pub fn set_system_options(&mut self, system_options: OptionValues) {
        self.system_options = Some(system_options);
    }

    pub fn subscribe(&mut self, observer: impl DocumentObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn option_descriptor_count(&self) -> Result<usize> {
        Ok(ready(&self.catalog)?.option_count()?)
    }

    pub fn option_descriptor(&self, index: usize) -> Result<&OptionDescriptor> {
        Ok(ready(&self.catalog)?.option(index)?)
    }

    /// Replace the variant list.
    ///
    /// An empty list is a request for initialization: the variants are
    /// generated from the shader's system-option defaults. Without defaults
    /// the list stays empty.
    pub fn set_variant_list(&mut self, list: VariantList) -> Result<()> {
        let list = self.initialize(list)?;
        self.transact(|doc| {
            doc.list = list;
            Ok(())
        })
    }

    pub fn append_sparse_variant_set<H, V>(
        &mut self,
        headers: &[H],
        matrix: &[V],
    ) -> Result<AppendedRange>
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        self.transact(|doc| {
            let catalog = ready(&doc.catalog)?;
            Ok(append_sparse_variant_set(
                &mut doc.list,
                catalog,
                headers,
                matrix,
            )?)
        })
    }

    pub fn add_one_variant_row(&mut self) -> Result<StableId> {
        self.transact(|doc| {
            let catalog = ready(&doc.catalog)?;
            Ok(add_variant_row(&mut doc.list, catalog)?)
        })
    }

    pub fn defragment_variant_list(&mut self) -> Result<DefragReport> {
        self.transact(|doc| Ok(defragment(&mut doc.list)?))
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    pub fn begin_edit(&mut self) -> Result<()> {
        self.session.begin(&self.list)
    }

    /// Close the open edit. A change records one undo entry, marks the
    /// document modified and notifies observers.
    pub fn end_edit(&mut self) -> Result<EditOutcome> {
        match self.session.end(&self.list)? {
            Some(entry) => {
                self.history.push(entry);
                debug!(
                    document = %self.id,
                    variants = self.list.len(),
                    undo_steps = self.history.len(),
                    "committed edit"
                );
                self.modified = true;
                self.notify_changed();
                Ok(EditOutcome::Committed)
            }
            None => Ok(EditOutcome::Unchanged),
        }
    }

    /// Restore the state before the last committed edit. Returns `false`
    /// when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        if self.session.is_editing() {
            return Err(DocumentError::EditInProgress);
        }
        let Some(state) = self.history.undo().cloned() else {
            return Ok(false);
        };
        self.restore(state);
        Ok(true)
    }

    pub fn redo(&mut self) -> Result<bool> {
        if self.session.is_editing() {
            return Err(DocumentError::EditInProgress);
        }
        let Some(state) = self.history.redo().cloned() else {
            return Ok(false);
        };
        self.restore(state);
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.session.is_editing() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.session.is_editing() && self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Open a shader or a saved variant list.
    ///
    /// A `.shader` path starts a new, unsaved list for that shader, expanded
    /// from the `.systemoptions` file next to it. A `.shadervariantlist` path
    /// loads the saved list as is.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let source = DocumentSource::from_path(path).ok_or_else(|| {
            DocumentError::UnsupportedExtension {
                path: path.to_path_buf(),
            }
        })?;
        let path = std::path::absolute(path).map_err(|e| DocumentError::io("resolve", path, e))?;

        let (list, absolute_path) = match source {
            DocumentSource::Shader => {
                let defaults = match &self.system_options {
                    Some(options) => Some(options.clone()),
                    None => io::load_system_options(&io::system_options_path(&path))?,
                };
                let list = VariantList::new(path.to_string_lossy());
                (self.expand(list, defaults)?, None)
            }
            DocumentSource::VariantList => (io::load_variant_list(&path)?, Some(path.clone())),
        };

        self.session.abandon();
        self.history.clear();
        self.list = list;
        self.absolute_path = absolute_path;
        self.modified = false;
        info!(
            document = %self.id,
            path = %path.display(),
            variants = self.list.len(),
            "opened document"
        );
        self.emit(DocumentEvent::ObjectInfoInvalidated(self.id));
        Ok(())
    }

    pub fn save(&mut self) -> Result<()> {
        let path = self.absolute_path.clone().ok_or(DocumentError::NoSavePath)?;
        io::save_variant_list(&self.list, &path)?;
        self.modified = false;
        Ok(())
    }

    /// Save to `path` and make it the document's location.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        io::save_variant_list(&self.list, path)?;
        let path = std::path::absolute(path).map_err(|e| DocumentError::io("resolve", path, e))?;
        self.absolute_path = Some(path);
        self.modified = false;
        Ok(())
    }

    /// Write a copy to `path`. The document keeps its location and its
    /// modified state.
    pub fn save_as_copy(&self, path: &Path) -> Result<()> {
        io::save_variant_list(&self.list, path)
    }

    /// Reset to an empty, unsaved document. The catalog stays attached.
    pub fn clear(&mut self) {
        self.session.abandon();
        self.history.clear();
        self.list = VariantList::default();
        self.absolute_path = None;
        self.system_options = None;
        self.modified = false;
        self.emit(DocumentEvent::ObjectInfoInvalidated(self.id));
    }

    /// Runs `edit` inside an edit transaction, joining the open one if any.
    /// A failed operation leaves the list untouched, so its transaction is
    /// dropped without recording anything.
    fn transact<T>(&mut self, edit: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.session.is_editing() {
            return edit(self);
        }
        self.begin_edit()?;
        match edit(self) {
            Ok(value) => {
                self.end_edit()?;
                Ok(value)
            }
            Err(error) => {
                self.session.abandon();
                Err(error)
            }
        }
    }

    fn initialize(&self, list: VariantList) -> Result<VariantList> {
        if !list.is_empty() {
            return Ok(list);
        }
        let defaults = match &self.system_options {
            Some(options) => Some(options.clone()),
            None if list.shader_file_path.is_empty() => None,
            None => {
                let shader =
                    io::resolve_shader_path(self.absolute_path.as_deref(), &list.shader_file_path);
                io::load_system_options(&io::system_options_path(&shader))?
            }
        };
        self.expand(list, defaults)
    }

    fn expand(&self, mut list: VariantList, defaults: Option<OptionValues>) -> Result<VariantList> {
        let catalog = ready(&self.catalog)?;
        match defaults {
            Some(defaults) if !defaults.is_empty() => {
                let expansion =
                    expand_default_configuration(catalog, &defaults, &self.config.expansion)?;
                if !expansion.is_consistent() {
                    warn!(
                        shader = %list.shader_file_path,
                        expected = expansion.expected_count,
                        generated = expansion.variants.len(),
                        "expansion size differs from the option value counts"
                    );
                }
                debug!(variants = expansion.variants.len(), "initialized variant list");
                list.variants = expansion.variants;
            }
            _ => {
                warn!(
                    shader = %list.shader_file_path,
                    "system option setting not found, variant list left empty"
                );
            }
        }
        Ok(list)
    }

    fn restore(&mut self, state: VariantList) {
        self.list = state;
        self.modified = true;
        self.notify_changed();
    }

    fn notify_changed(&mut self) {
        self.emit(DocumentEvent::ObjectInfoInvalidated(self.id));
        self.emit(DocumentEvent::Modified(self.id));
    }

    fn emit(&mut self, event: DocumentEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }
}

fn ready(catalog: &Option<SharedCatalog>) -> Result<&(dyn OptionCatalog + Send + Sync)> {
    catalog
        .as_deref()
        .ok_or(DocumentError::Catalog(CatalogError::NotReady))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;
    use svl_model::ShaderOptionLayout;

    fn catalog() -> SharedCatalog {
        Arc::new(
            ShaderOptionLayout::new(vec![
                OptionDescriptor::boolean("o_fog", false).unwrap(),
                OptionDescriptor::enumeration("o_quality", ["Low", "High"], "Low").unwrap(),
            ])
            .unwrap(),
        )
    }

    fn document() -> ShaderVariantDocument {
        let mut doc = ShaderVariantDocument::new(SvlConfig::default());
        doc.set_catalog(catalog());
        doc
    }

    #[test]
    fn operations_without_catalog_are_not_ready() {
        let mut doc = ShaderVariantDocument::new(SvlConfig::default());
        assert!(doc.option_descriptor_count().unwrap_err().is_not_ready());
        assert!(doc.add_one_variant_row().unwrap_err().is_not_ready());
        assert!(!doc.is_editing());
        assert!(doc.variant_list().is_empty());
    }

    #[test]
    fn descriptor_index_out_of_range() {
        let doc = document();
        assert_eq!(doc.option_descriptor_count().unwrap(), 2);
        assert_eq!(doc.option_descriptor(1).unwrap().name(), "o_quality");
        assert!(matches!(
            doc.option_descriptor(2),
            Err(DocumentError::Catalog(CatalogError::OutOfRange { index: 2, count: 2 }))
        ));
    }

    #[test]
    fn each_operation_is_one_undo_step() {
        let mut doc = document();
        let log = EventLog::new();
        doc.subscribe(log.clone());

        doc.add_one_variant_row().unwrap();
        doc.add_one_variant_row().unwrap();
        assert_eq!(doc.history_len(), 2);
        assert_eq!(log.count_modified(), 2);
        assert!(doc.is_modified());
    }

    #[test]
    fn explicit_edit_groups_operations() {
        let mut doc = document();
        doc.begin_edit().unwrap();
        doc.add_one_variant_row().unwrap();
        doc.append_sparse_variant_set(&["o_fog"], &["True"]).unwrap();
        assert!(!doc.can_undo());
        assert_eq!(doc.end_edit().unwrap(), EditOutcome::Committed);

        assert_eq!(doc.variant_list().len(), 2);
        assert_eq!(doc.history_len(), 1);
        assert!(doc.undo().unwrap());
        assert!(doc.variant_list().is_empty());
    }

    #[test]
    fn failed_operation_records_nothing() {
        let mut doc = document();
        let log = EventLog::new();
        doc.subscribe(log.clone());

        let result = doc.append_sparse_variant_set(&["o_fog", "o_quality"], &["True"]);
        assert!(result.is_err());
        assert!(!doc.is_editing());
        assert!(!doc.can_undo());
        assert!(log.is_empty());
    }

    #[test]
    fn unchanged_edit_is_silent() {
        let mut doc = document();
        let log = EventLog::new();
        doc.subscribe(log.clone());

        doc.begin_edit().unwrap();
        assert_eq!(doc.end_edit().unwrap(), EditOutcome::Unchanged);
        assert!(log.is_empty());
        assert!(!doc.is_modified());
    }

    #[test]
    fn undo_is_refused_during_an_edit() {
        let mut doc = document();
        doc.add_one_variant_row().unwrap();
        doc.begin_edit().unwrap();
        assert!(matches!(doc.undo(), Err(DocumentError::EditInProgress)));
        assert!(matches!(doc.begin_edit(), Err(DocumentError::EditInProgress)));
    }

    #[test]
    fn set_variant_list_expands_an_empty_list() {
        let mut doc = document();
        doc.set_system_options([("o_fog", ""), ("o_quality", "High")].into_iter().collect());
        doc.set_variant_list(VariantList::new("Forward.shader")).unwrap();

        let list = doc.variant_list();
        assert_eq!(list.len(), 2);
        assert_eq!(list.variants[0].options.get("o_fog"), Some("False"));
        assert_eq!(list.variants[1].options.get("o_fog"), Some("True"));
        assert!(list.variants.iter().all(|v| v.options.get("o_quality") == Some("High")));
    }

    #[test]
    fn set_variant_list_without_defaults_stays_empty() {
        let mut doc = document();
        doc.set_variant_list(VariantList::default()).unwrap();
        assert!(doc.variant_list().is_empty());
        assert!(!doc.can_undo());
    }

    #[test]
    fn clear_keeps_the_catalog() {
        let mut doc = document();
        doc.add_one_variant_row().unwrap();
        doc.clear();
        assert!(doc.variant_list().is_empty());
        assert!(!doc.can_undo());
        assert!(!doc.is_modified());
        assert_eq!(doc.option_descriptor_count().unwrap(), 2);
    }

    #[test]
    fn save_needs_a_path() {
        let mut doc = document();
        assert!(matches!(doc.save(), Err(DocumentError::NoSavePath)));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let mut doc = document();
        let err = doc.open(Path::new("Forward.azsl")).unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedExtension { .. }));
    }
}
