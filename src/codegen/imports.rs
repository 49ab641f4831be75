use std::collections::BTreeSet;

const MATERIAL_PACKAGE: &str = "@mui/material";
const ICONS_PACKAGE: &str = "@mui/icons-material";

/// The UI symbols a generated component references.
///
/// Renderers record every symbol they emit; the set is sorted and
/// de-duplicated so the import block is stable for a given tree. The form
/// wrapper `Box` is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSet {
    material: BTreeSet<&'static str>,
    icons: BTreeSet<&'static str>,
}

impl ImportSet {
    pub fn new() -> Self {
        let mut material = BTreeSet::new();
        material.insert("Box");
        Self {
            material,
            icons: BTreeSet::new(),
        }
    }

    pub fn use_material(&mut self, symbol: &'static str) {
        self.material.insert(symbol);
    }

    /// Record an icon component such as `SaveIcon`.
    pub fn use_icon(&mut self, symbol: &'static str) {
        self.icons.insert(symbol);
    }

    pub fn material(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.material.iter().copied()
    }

    pub fn icons(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.icons.iter().copied()
    }

    /// Import statements, one per line, ending with a newline.
    pub fn render(&self) -> String {
        let mut out = String::from("import React from 'react';\n");

        let named: Vec<&str> = self.material().collect();
        out.push_str(&format!(
            "import {{ {} }} from '{}';\n",
            named.join(", "),
            MATERIAL_PACKAGE
        ));

        for icon in self.icons() {
            let module = icon.strip_suffix("Icon").unwrap_or(icon);
            out.push_str(&format!("import {} from '{}/{}';\n", icon, ICONS_PACKAGE, module));
        }
        out
    }
}

impl Default for ImportSet {
    fn default() -> Self {
        Self::new()
    }
}
