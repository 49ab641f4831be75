use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;

use crate::cli::config::{resolve_form_name, resolve_language, AppConfig, FormsCommand, OptionAction};
use crate::codegen::generator::Language;
use crate::document::io::{read_or_empty, read_text, write_document, write_text};
use crate::editor::outline::{outline, outline_fields};
use crate::editor::properties::CheckboxEdit;
use crate::editor::session::EditorSession;
use crate::factory::element_factory::ElementFactory;
use crate::model::attributes::FieldKind;
use crate::model::element::ElementId;
use crate::persistence::forms::{delete_form, display_name, duplicate_form, rename_form, summary_line};
use crate::persistence::http::HttpFormStore;
use crate::persistence::store::FormStore;
use crate::sandbox::packager::decode_parameters;
use crate::trace::logger::EditLogger;
use crate::tree::drop_resolver::DropOutcome;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub file: PathBuf,
    pub verbose: u8,
    pub config: AppConfig,
    pub api_url: String,
}

impl CommandContext {
    pub fn new(file: impl Into<PathBuf>, verbose: u8, config: AppConfig, api_url: String) -> Self {
        Self {
            file: file.into(),
            verbose,
            config,
            api_url,
        }
    }

    fn logger(&self) -> EditLogger {
        if self.config.trace.enabled {
            EditLogger::new(&self.config.trace.path)
        } else {
            EditLogger::disabled()
        }
    }

    /// HTTP store for the configured service.
    pub fn http_store(&self) -> HttpFormStore {
        let timeout = self.config.api.timeout_secs.map(Duration::from_secs);
        HttpFormStore::with_timeout(&self.api_url, timeout)
    }
}

// ============================================================================
// Document helpers
// ============================================================================

/// Open the document named by the context; a missing file is an empty form.
pub fn open_session(ctx: &CommandContext) -> Result<EditorSession, Box<dyn std::error::Error>> {
    let mut factory = ElementFactory::new();
    let forest = read_or_empty(&ctx.file, &mut factory)?;
    let mut session = EditorSession::from_forest(forest);
    session.set_logger(ctx.logger());

    if ctx.verbose > 1 {
        eprintln!("Opened {} ({} top-level elements)", ctx.file.display(), session.forest().len());
    }
    Ok(session)
}

fn store_session(ctx: &CommandContext, session: &EditorSession) -> Result<(), Box<dyn std::error::Error>> {
    write_document(&ctx.file, session.forest())?;
    if ctx.verbose > 0 {
        eprintln!("Wrote {}", ctx.file.display());
    }
    Ok(())
}

fn parse_language(ctx: &CommandContext, cli_value: Option<&str>) -> Result<Language, Box<dyn std::error::Error>> {
    let name = resolve_language(cli_value, &ctx.config);
    Language::parse(name).ok_or_else(|| format!("Unknown language '{}' (use javascript or typescript)", name).into())
}

// ============================================================================
// Editing subcommands
// ============================================================================

pub fn cmd_add(ctx: &CommandContext, element_type: &str, target: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx)?;

    match session.drop_element(element_type, target) {
        DropOutcome::Inserted { id, .. } => {
            store_session(ctx, &session)?;
            println!("Added {} element {}", element_type, id);
        }
        rejected => eprintln!("Nothing added: {}", rejected.describe()),
    }
    Ok(())
}

pub fn cmd_remove(ctx: &CommandContext, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx)?;

    if session.remove(&ElementId::from(id)) {
        store_session(ctx, &session)?;
        println!("Removed element {}", id);
    } else {
        eprintln!("No element with id '{}'", id);
    }
    Ok(())
}

pub fn cmd_rename(ctx: &CommandContext, id: &str, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx)?;

    if session.rename(&ElementId::from(id), name) {
        store_session(ctx, &session)?;
        println!("Renamed element {}", id);
    } else {
        eprintln!("No element with id '{}'", id);
    }
    Ok(())
}

/// Command-line values are JSON when they parse as JSON, text otherwise.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn cmd_set(ctx: &CommandContext, id: &str, key: &str, raw_value: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx)?;

    if session.set_property(&ElementId::from(id), key, &parse_value(raw_value))? {
        store_session(ctx, &session)?;
        println!("Set {} on element {}", key, id);
    } else {
        eprintln!("No change to element '{}'", id);
    }
    Ok(())
}

pub fn cmd_options(ctx: &CommandContext, id: &str, action: &OptionAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(ctx)?;
    let id = ElementId::from(id);

    let is_checkbox = match session.find(&id) {
        Some(element) => matches!(element.field(), Some(FieldKind::Checkbox(_))),
        None => {
            eprintln!("No element with id '{}'", id);
            return Ok(());
        }
    };

    let changed = match (action, is_checkbox) {
        (OptionAction::Add, true) => session.add_checkbox_option(&id)?,
        (OptionAction::Add, false) => session.add_option(&id)?,
        (OptionAction::Change { index, value }, true) => {
            session.change_checkbox_option(&id, *index, CheckboxEdit::Label(value.clone()))?
        }
        (OptionAction::Change { index, value }, false) => session.change_option(&id, *index, value)?,
        (OptionAction::Check { index, checked }, true) => {
            session.change_checkbox_option(&id, *index, CheckboxEdit::Checked(*checked))?
        }
        (OptionAction::Check { .. }, false) => {
            return Err(format!("Element '{}' is not a checkbox group", id).into());
        }
        (OptionAction::Delete { index }, true) => session.delete_checkbox_option(&id, *index)?,
        (OptionAction::Delete { index }, false) => session.delete_option(&id, *index)?,
    };

    if changed {
        store_session(ctx, &session)?;
        println!("Updated options of element {}", id);
    }
    Ok(())
}

pub fn cmd_import(ctx: &CommandContext, input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_text(Path::new(input))?;
    let mut session = open_session(ctx)?;

    let count = session.import_json(&text)?;
    store_session(ctx, &session)?;
    println!("Imported {} elements from {}", count, input);
    Ok(())
}

// ============================================================================
// Output subcommands
// ============================================================================

pub fn cmd_outline(ctx: &CommandContext) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(ctx)?;
    print!("{}", outline(session.forest()));
    Ok(())
}

pub fn cmd_flatten(ctx: &CommandContext) -> Result<(), Box<dyn std::error::Error>> {
    let session = open_session(ctx)?;
    println!("{}", serde_json::to_string_pretty(&session.fields())?);
    Ok(())
}

pub fn cmd_generate(
    ctx: &CommandContext,
    language: Option<&str>,
    name: Option<&str>,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let language = parse_language(ctx, language)?;
    let mut session = open_session(ctx)?;
    session.set_form_name(resolve_form_name(name, &ctx.config));

    let generated = session.generate(language);
    match output {
        Some(path) => {
            write_text(Path::new(path), &generated.source)?;
            println!("Wrote component {} to {}", generated.component_name, path);
        }
        None => print!("{}", generated.source),
    }
    Ok(())
}

pub fn cmd_sandbox(
    ctx: &CommandContext,
    language: Option<&str>,
    name: Option<&str>,
    inspect: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let language = parse_language(ctx, language)?;
    let mut session = open_session(ctx)?;
    session.set_form_name(resolve_form_name(name, &ctx.config));

    let package = session.sandbox(language, &ctx.config.sandbox.options());
    if inspect {
        let manifest = decode_parameters(&package.parameters)?;
        println!("{}", serde_json::to_string_pretty(&manifest)?);
    } else {
        if ctx.verbose > 0 {
            eprintln!("Files: {}", package.manifest.paths().collect::<Vec<_>>().join(", "));
        }
        println!("{}", package.url());
    }
    Ok(())
}

// ============================================================================
// forms subcommand
// ============================================================================

pub fn cmd_forms(
    ctx: &CommandContext,
    action: &FormsCommand,
    store: &dyn FormStore,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        FormsCommand::List => {
            let forms = store.list()?;
            if forms.is_empty() {
                println!("No saved forms.");
            }
            for form in &forms {
                println!("{}  {}", form.id, display_name(form));
                println!("    {}", summary_line(form));
            }
        }
        FormsCommand::Get { id } => {
            let form = store.get(id)?;
            println!("{} ({})", display_name(&form), form.id);
            print!("{}", outline_fields(&form.fields));
        }
        FormsCommand::Save { name, id } => {
            let mut session = open_session(ctx)?;
            session.set_form_name(name.as_str());
            if let Some(id) = id {
                session.attach_form(id.as_str());
            }
            let saved = session.save(store)?;
            println!("Saved form {}", saved);
        }
        FormsCommand::Load { id } => {
            let mut session = open_session(ctx)?;
            let count = session.load(store, id)?;
            store_session(ctx, &session)?;
            println!("Loaded '{}' ({} fields) into {}", session.form_name(), count, ctx.file.display());
        }
        FormsCommand::Duplicate { id, name } => {
            let created = duplicate_form(store, id, name.as_deref())?;
            println!("Created copy {}", created.id);
        }
        FormsCommand::Rename { id, name } => {
            rename_form(store, id, name)?;
            println!("Renamed form {}", id);
        }
        FormsCommand::Delete { id } => {
            delete_form(store, id)?;
            println!("Deleted form {}", id);
        }
    }
    Ok(())
}
