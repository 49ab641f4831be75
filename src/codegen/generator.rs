use std::fmt;

use crate::model::element::ElementList;

use super::imports::ImportSet;
use super::naming::component_name;
use super::renderers::{render_forest, Emitter};

// ============================================================================
// Target language
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    JavaScript,
    TypeScript,
}

impl Language {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "js" | "jsx" | "javascript" => Some(Language::JavaScript),
            "ts" | "tsx" | "typescript" => Some(Language::TypeScript),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
        }
    }

    /// Extension of the generated component file.
    pub fn component_extension(self) -> &'static str {
        match self {
            Language::JavaScript => "jsx",
            Language::TypeScript => "tsx",
        }
    }

    /// Extension of the sandbox entry and app files.
    pub fn script_extension(self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::TypeScript => "tsx",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Generation
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSource {
    pub source: String,
    pub component_name: String,
    pub language: Language,
    pub imports: ImportSet,
}

impl GeneratedSource {
    /// File name of the component, e.g. `ContactForm.tsx`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.component_name, self.language.component_extension())
    }
}

/// Render the forest as a self-contained React component.
///
/// The output holds the import block, one default-exported component and
/// a submit handler. JavaScript and TypeScript output differ only in the
/// component signature and the handler's event type.
pub fn generate(forest: &ElementList, form_name: &str, language: Language) -> GeneratedSource {
    let component = component_name(form_name);

    let mut emitter = Emitter::new();
    if forest.is_empty() {
        emitter.comment(3, "No fields yet");
    } else {
        render_forest(forest, &mut emitter, 3);
    }
    let (body, imports) = emitter.into_parts();

    let (signature, event) = match language {
        Language::JavaScript => (format!("export default function {}() {{", component), "event"),
        Language::TypeScript => (
            format!("export default function {}(): JSX.Element {{", component),
            "event: React.FormEvent<HTMLFormElement>",
        ),
    };

    let source = format!(
        r#"{imports}
{signature}
  const handleSubmit = ({event}) => {{
    event.preventDefault();
    const data = Object.fromEntries(new FormData(event.currentTarget).entries());
    console.log(data);
  }};

  return (
    <Box
      component="form"
      onSubmit={{handleSubmit}}
      sx={{{{ display: 'flex', flexDirection: 'column', gap: 2, maxWidth: 720, mx: 'auto', p: 2 }}}}
      noValidate
    >
{body}    </Box>
  );
}}
"#,
        imports = imports.render(),
        signature = signature,
        event = event,
        body = body,
    );

    GeneratedSource {
        source,
        component_name: component,
        language,
        imports,
    }
}
