use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::codegen::generator::{GeneratedSource, Language};
use crate::editor::error::EditorError;

/// CodeSandbox endpoint that accepts a `parameters` query value.
pub const DEFINE_ENDPOINT: &str = "https://codesandbox.io/api/v1/sandboxes/define";

// ============================================================================
// Manifest
// ============================================================================

/// Dependency versions written into the virtual `package.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct SandboxOptions {
    pub endpoint: String,
    pub react_version: String,
    pub mui_version: String,
}

impl Default for SandboxOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFINE_ENDPOINT.to_string(),
            react_version: "^18.2.0".to_string(),
            mui_version: "^5.15.0".to_string(),
        }
    }
}

/// Content of one virtual file: plain text, or a JSON document embedded
/// as-is (the sandbox accepts `package.json` as an object).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FileContent {
    Text(String),
    Json(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SandboxFile {
    pub content: FileContent,
}

impl SandboxFile {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: FileContent::Text(content.into()),
        }
    }

    pub fn json(content: Value) -> Self {
        Self {
            content: FileContent::Json(content),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            FileContent::Text(text) => Some(text),
            FileContent::Json(_) => None,
        }
    }
}

/// Virtual project keyed by path. Paths are kept sorted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SandboxManifest {
    pub files: BTreeMap<String, SandboxFile>,
}

impl SandboxManifest {
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn file(&self, path: &str) -> Option<&SandboxFile> {
        self.files.get(path)
    }

    pub fn to_json(&self) -> Value {
        let files: serde_json::Map<String, Value> = self
            .files
            .iter()
            .map(|(path, file)| {
                let content = match &file.content {
                    FileContent::Text(text) => Value::String(text.clone()),
                    FileContent::Json(value) => value.clone(),
                };
                (path.clone(), json!({ "content": content }))
            })
            .collect();
        json!({ "files": files })
    }
}

/// Build the virtual project around a generated component.
pub fn build_manifest(generated: &GeneratedSource, options: &SandboxOptions) -> SandboxManifest {
    let language = generated.language;
    let component = &generated.component_name;
    let script = language.script_extension();

    let mut files = BTreeMap::new();
    files.insert("package.json".to_string(), SandboxFile::json(package_json(component, language, options)));
    files.insert("public/index.html".to_string(), SandboxFile::text(INDEX_HTML));
    files.insert(format!("src/index.{}", script), SandboxFile::text(index_source(language)));
    files.insert(format!("src/App.{}", script), SandboxFile::text(app_source(component)));
    files.insert(format!("src/{}", generated.file_name()), SandboxFile::text(generated.source.clone()));
    if language == Language::TypeScript {
        files.insert("tsconfig.json".to_string(), SandboxFile::json(tsconfig()));
    }

    SandboxManifest { files }
}

fn package_json(component: &str, language: Language, options: &SandboxOptions) -> Value {
    let mut dependencies = json!({
        "@emotion/react": "^11.11.0",
        "@emotion/styled": "^11.11.0",
        "@mui/icons-material": options.mui_version,
        "@mui/material": options.mui_version,
        "react": options.react_version,
        "react-dom": options.react_version,
        "react-scripts": "5.0.1",
    });
    if language == Language::TypeScript {
        if let Value::Object(map) = &mut dependencies {
            map.insert("typescript".to_string(), json!("^4.9.5"));
            map.insert("@types/react".to_string(), json!("^18.2.0"));
            map.insert("@types/react-dom".to_string(), json!("^18.2.0"));
        }
    }

    let main = format!("src/index.{}", language.script_extension());
    json!({
        "name": package_name(component),
        "version": "1.0.0",
        "private": true,
        "main": main,
        "dependencies": dependencies,
        "scripts": {
            "start": "react-scripts start",
            "build": "react-scripts build"
        },
        "browserslist": [">0.2%", "not dead", "not ie <= 11", "not op_mini all"]
    })
}

/// `ContactForm` -> `contact-form`
fn package_name(component: &str) -> String {
    let mut name = String::new();
    for (i, c) in component.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                name.push('-');
            }
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

fn tsconfig() -> Value {
    json!({
        "compilerOptions": {
            "target": "es5",
            "lib": ["dom", "dom.iterable", "esnext"],
            "allowJs": true,
            "skipLibCheck": true,
            "esModuleInterop": true,
            "strict": true,
            "module": "esnext",
            "moduleResolution": "node",
            "resolveJsonModule": true,
            "isolatedModules": true,
            "noEmit": true,
            "jsx": "react-jsx"
        },
        "include": ["src"]
    })
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Form preview</title>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

fn index_source(language: Language) -> String {
    let root = match language {
        Language::JavaScript => "document.getElementById('root')",
        Language::TypeScript => "document.getElementById('root') as HTMLElement",
    };
    format!(
        r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';

const root = ReactDOM.createRoot({root});
root.render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);
"#,
        root = root
    )
}

fn app_source(component: &str) -> String {
    format!(
        r#"import React from 'react';
import {component} from './{component}';

export default function App() {{
  return <{component} />;
}}
"#,
        component = component
    )
}

// ============================================================================
// Transport encoding
// ============================================================================

/// Manifest plus its encoded `parameters` value.
#[derive(Debug, Clone, PartialEq)]
pub struct SandboxPackage {
    pub manifest: SandboxManifest,
    pub parameters: String,
    pub endpoint: String,
}

impl SandboxPackage {
    /// Define-endpoint URL carrying the project. Nothing is sent.
    pub fn url(&self) -> String {
        format!("{}?parameters={}", self.endpoint, self.parameters)
    }
}

pub fn build_package(generated: &GeneratedSource, options: &SandboxOptions) -> SandboxPackage {
    let manifest = build_manifest(generated, options);
    let parameters = encode_parameters(&manifest.to_json());
    SandboxPackage {
        manifest,
        parameters,
        endpoint: options.endpoint.clone(),
    }
}

/// lz-string base64 compression of the JSON text, made URL-safe.
pub fn encode_parameters(manifest: &Value) -> String {
    let compressed = lz_str::compress_to_base64(manifest.to_string().as_str());
    compressed
        .replace('+', "-")
        .replace('/', "_")
        .trim_end_matches('=')
        .to_string()
}

/// Reverse of `encode_parameters`.
pub fn decode_parameters(parameters: &str) -> Result<Value, EditorError> {
    let mut padded = parameters.replace('-', "+").replace('_', "/");
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    let wide = lz_str::decompress_from_base64(padded.as_str())
        .ok_or_else(|| EditorError::Validation("sandbox parameters are not valid lz-string data".to_string()))?;
    let text = String::from_utf16(&wide)
        .map_err(|e| EditorError::Validation(format!("sandbox parameters are not UTF-16 text: {}", e)))?;

    serde_json::from_str(&text).map_err(|source| EditorError::JsonParse {
        context: "sandbox parameters".to_string(),
        source,
    })
}
