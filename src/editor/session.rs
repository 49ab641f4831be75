use std::sync::Arc;

use serde_json::Value;

use crate::codegen::generator::{generate, GeneratedSource, Language};
use crate::document::io::{export_document, fingerprint, import_document};
use crate::factory::element_factory::ElementFactory;
use crate::model::element::{ElementId, ElementList, FormElement};
use crate::model::field::Field;
use crate::persistence::model::{FormId, FormPayload, FormUpdate};
use crate::persistence::store::FormStore;
use crate::projection::flatten::{flatten, unflatten};
use crate::sandbox::packager::{build_package, SandboxOptions, SandboxPackage};
use crate::trace::logger::EditLogger;
use crate::trace::trace::EditEvent;
use crate::tree::drop_resolver::{resolve_drop, DropOutcome};
use crate::tree::navigator::{contains, find_by_id, remove_by_id, update_by_id, walk};

use super::error::EditorError;
use super::properties::{
    add_checkbox_option, add_option, apply_property, change_checkbox_option, change_option,
    delete_checkbox_option, delete_option, CheckboxEdit,
};

// ============================================================================
// Editor session
// ============================================================================

/// The state behind one editing surface: the current forest, the active
/// selection, id allocation, and the saved form it came from.
///
/// Every operation either replaces the forest wholesale or leaves it exactly
/// as it was. Failed operations never leave partial edits behind.
#[derive(Debug)]
pub struct EditorSession {
    forest: ElementList,
    selection: Option<ElementId>,
    factory: ElementFactory,

    form_id: Option<FormId>,
    form_name: String,
    saved_fingerprint: String,

    logger: EditLogger,
    step: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::with_logger(EditLogger::disabled())
    }

    pub fn with_logger(logger: EditLogger) -> Self {
        let forest = ElementList::new();
        Self {
            saved_fingerprint: fingerprint(&forest),
            forest,
            selection: None,
            factory: ElementFactory::new(),
            form_id: None,
            form_name: String::new(),
            logger,
            step: 0,
        }
    }

    /// Session over an existing forest, treated as unmodified.
    pub fn from_forest(forest: ElementList) -> Self {
        let mut session = Self::new();
        session.factory.reserve_past(&forest);
        session.saved_fingerprint = fingerprint(&forest);
        session.forest = forest;
        session
    }

    /// Route edit events to `logger` from now on.
    pub fn set_logger(&mut self, logger: EditLogger) {
        self.logger = logger;
    }

    pub fn forest(&self) -> &ElementList {
        &self.forest
    }

    pub fn selection(&self) -> Option<&ElementId> {
        self.selection.as_ref()
    }

    pub fn selected(&self) -> Option<&Arc<FormElement>> {
        self.selection.as_ref().and_then(|id| find_by_id(&self.forest, id))
    }

    pub fn find(&self, id: &ElementId) -> Option<&Arc<FormElement>> {
        find_by_id(&self.forest, id)
    }

    pub fn form_id(&self) -> Option<&str> {
        self.form_id.as_deref()
    }

    pub fn form_name(&self) -> &str {
        &self.form_name
    }

    pub fn set_form_name(&mut self, name: impl Into<String>) {
        self.form_name = name.into();
    }

    /// Make later saves update the stored form `id` instead of creating one.
    pub fn attach_form(&mut self, id: impl Into<FormId>) {
        self.form_id = Some(id.into());
    }

    pub fn factory(&self) -> &ElementFactory {
        &self.factory
    }

    fn record(&mut self, event: impl FnOnce(u64) -> EditEvent) {
        self.step += 1;
        let event = event(self.step).with_count(count_nodes(&self.forest));
        self.logger.log(&event);
    }

    // ------------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------------

    /// Apply a drop gesture. A successful drop selects the new node; every
    /// rejected drop leaves forest, selection and id counter untouched.
    pub fn drop_element(&mut self, source: &str, target: &str) -> DropOutcome {
        let outcome = resolve_drop(&self.forest, source, target, &mut self.factory);

        if let DropOutcome::Inserted { forest, id } = &outcome {
            self.forest = forest.clone();
            self.selection = Some(id.clone());
        }

        let described = outcome.describe();
        let inserted = outcome.inserted_id().cloned();
        self.record(|step| {
            let event = EditEvent::now(step, "drop")
                .with_type(source)
                .with_target(target)
                .with_outcome(described);
            match &inserted {
                Some(id) => event.with_element(id),
                None => event,
            }
        });
        outcome
    }

    /// Select a node. Selecting an id that is not in the tree clears the
    /// selection and returns `false`.
    pub fn select(&mut self, id: &ElementId) -> bool {
        let found = contains(&self.forest, id);
        self.selection = found.then(|| id.clone());
        found
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Replace a node with `updater(node)`. Returns whether a node changed.
    pub fn update<F>(&mut self, id: &ElementId, updater: F) -> bool
    where
        F: FnOnce(&FormElement) -> FormElement,
    {
        let updated = update_by_id(&self.forest, id, updater);
        if ElementList::ptr_eq(&updated, &self.forest) {
            return false;
        }
        self.forest = updated;
        true
    }

    pub fn rename(&mut self, id: &ElementId, name: &str) -> bool {
        let changed = self.update(id, |node| FormElement {
            name: name.to_string(),
            ..node.clone()
        });
        if changed {
            self.record(|step| EditEvent::now(step, "rename").with_element(id).with_detail(name));
        }
        changed
    }

    /// Remove a node (and, for rows, everything inside it). The selection is
    /// cleared when the selected node is no longer in the tree.
    pub fn remove(&mut self, id: &ElementId) -> bool {
        let updated = remove_by_id(&self.forest, id);
        if ElementList::ptr_eq(&updated, &self.forest) {
            return false;
        }
        self.forest = updated;

        if let Some(selected) = &self.selection {
            if !contains(&self.forest, selected) {
                self.selection = None;
            }
        }
        self.record(|step| EditEvent::now(step, "remove").with_element(id));
        true
    }

    /// Run a fallible edit on one node. Unknown ids are a silent no-op
    /// (`Ok(false)`); a rejected edit leaves the forest unchanged.
    fn edit<F>(&mut self, id: &ElementId, operation: &str, edit: F) -> Result<bool, EditorError>
    where
        F: FnOnce(&FormElement) -> Result<FormElement, EditorError>,
    {
        let Some(node) = find_by_id(&self.forest, id) else {
            return Ok(false);
        };
        let replacement = edit(node.as_ref())?;

        let changed = self.update(id, move |_| replacement);
        if changed {
            self.record(|step| EditEvent::now(step, operation).with_element(id));
        }
        Ok(changed)
    }

    pub fn set_property(&mut self, id: &ElementId, key: &str, value: &Value) -> Result<bool, EditorError> {
        self.edit(id, "set_property", |node| apply_property(node, key, value))
    }

    pub fn change_option(&mut self, id: &ElementId, index: usize, value: &str) -> Result<bool, EditorError> {
        self.edit(id, "change_option", |node| change_option(node, index, value))
    }

    pub fn add_option(&mut self, id: &ElementId) -> Result<bool, EditorError> {
        self.edit(id, "add_option", add_option)
    }

    pub fn delete_option(&mut self, id: &ElementId, index: usize) -> Result<bool, EditorError> {
        self.edit(id, "delete_option", |node| delete_option(node, index))
    }

    pub fn change_checkbox_option(
        &mut self,
        id: &ElementId,
        index: usize,
        edit: CheckboxEdit,
    ) -> Result<bool, EditorError> {
        self.edit(id, "change_checkbox_option", |node| change_checkbox_option(node, index, edit))
    }

    pub fn add_checkbox_option(&mut self, id: &ElementId) -> Result<bool, EditorError> {
        self.edit(id, "add_checkbox_option", add_checkbox_option)
    }

    pub fn delete_checkbox_option(&mut self, id: &ElementId, index: usize) -> Result<bool, EditorError> {
        self.edit(id, "delete_checkbox_option", |node| delete_checkbox_option(node, index))
    }

    // ------------------------------------------------------------------------
    // Documents and output
    // ------------------------------------------------------------------------

    /// Replace the forest with an imported document. On any error the
    /// forest, selection and id counter are left as they were.
    pub fn import_json(&mut self, text: &str) -> Result<usize, EditorError> {
        let mut factory = self.factory.clone();
        let forest = match import_document(text, &mut factory) {
            Ok(forest) => forest,
            Err(e) => {
                self.record(|step| EditEvent::now(step, "import").with_outcome("rejected").with_detail(&e));
                return Err(e);
            }
        };

        self.factory = factory;
        self.forest = forest;
        if let Some(selected) = &self.selection {
            if !contains(&self.forest, selected) {
                self.selection = None;
            }
        }

        let count = count_nodes(&self.forest);
        self.record(|step| EditEvent::now(step, "import").with_outcome("imported"));
        Ok(count)
    }

    pub fn export_json(&self) -> Result<String, EditorError> {
        export_document(&self.forest)
    }

    /// Flat field list as persisted.
    pub fn fields(&self) -> Vec<Field> {
        flatten(&self.forest)
    }

    pub fn generate(&self, language: Language) -> GeneratedSource {
        generate(&self.forest, &self.form_name, language)
    }

    pub fn sandbox(&self, language: Language, options: &SandboxOptions) -> SandboxPackage {
        build_package(&self.generate(language), options)
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Create or update the saved form. The name is trimmed and required.
    pub fn save(&mut self, store: &dyn FormStore) -> Result<FormId, EditorError> {
        let name = self.form_name.trim().to_string();
        if name.is_empty() {
            return Err(EditorError::Validation("Form name is required".to_string()));
        }
        let fields = self.fields();

        let created = match &self.form_id {
            Some(id) => store.update(
                id,
                &FormUpdate {
                    name: Some(name.clone()),
                    fields: Some(fields),
                },
            )?,
            None => store.create(&FormPayload {
                name: name.clone(),
                fields,
            })?,
        };

        self.form_id = Some(created.id.clone());
        self.form_name = name;
        self.saved_fingerprint = fingerprint(&self.forest);
        self.record(|step| EditEvent::now(step, "save").with_detail(&created.id));
        Ok(created.id)
    }

    /// Load a saved form. Rows do not survive persistence, so the loaded
    /// tree is always flat.
    pub fn load(&mut self, store: &dyn FormStore, id: &str) -> Result<usize, EditorError> {
        let document = store.get(id)?;

        let mut factory = ElementFactory::new();
        let forest = unflatten(&document.fields, &mut factory);

        self.saved_fingerprint = fingerprint(&forest);
        self.forest = forest;
        self.factory = factory;
        self.selection = None;
        self.form_id = Some(document.id);
        self.form_name = document.name;

        let count = self.forest.len();
        self.record(|step| EditEvent::now(step, "load").with_detail(id));
        Ok(count)
    }

    /// Start over with an empty, unsaved form.
    pub fn reset(&mut self) {
        self.forest = ElementList::new();
        self.selection = None;
        self.factory = ElementFactory::new();
        self.form_id = None;
        self.form_name.clear();
        self.saved_fingerprint = fingerprint(&self.forest);
    }

    /// Whether the tree differs from what was last saved or loaded.
    pub fn is_dirty(&self) -> bool {
        fingerprint(&self.forest) != self.saved_fingerprint
    }
}

fn count_nodes(forest: &ElementList) -> usize {
    let mut count = 0;
    walk(forest, &mut |_, _| count += 1);
    count
}
