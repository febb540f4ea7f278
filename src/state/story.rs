// User story classification

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Label used when no table entry matches the test's file name
pub const UNKNOWN_STORY: &str = "Desconocida";

/// One pattern → label pair. Patterns are plain substrings matched against
/// the test's originating file name, evaluated top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryEntry {
    pub pattern: String,
    pub label: String,
}

impl StoryEntry {
    fn new(pattern: &str, label: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            label: label.to_string(),
        }
    }
}

/// The calendar suite's user stories, keyed by test file name
static DEFAULT_STORIES: Lazy<Vec<StoryEntry>> = Lazy::new(|| {
    vec![
        StoryEntry::new("test_01_registro_usuario.py", "HU-01: Registro de Usuario"),
        StoryEntry::new("test_02_login.py", "HU-02: Inicio de sesión"),
        StoryEntry::new("test_03_crear_evento.py", "HU-03: Crear evento académico"),
        StoryEntry::new(
            "test_04_visualizar_calendario.py",
            "HU-04: Visualización de calendario mensual",
        ),
        StoryEntry::new("test_05_eliminar_evento.py", "HU-05: Eliminar evento"),
        StoryEntry::new("test_06_navegacion.py", "HU-06: Navegación en la interfaz"),
        StoryEntry::new("test_07_logout.py", "HU-07: Logout"),
    ]
});

/// Ordered mapping from file-name patterns to user story labels.
/// First match wins; no match resolves to [`UNKNOWN_STORY`].
#[derive(Debug, Clone)]
pub struct StoryMap {
    entries: Vec<StoryEntry>,
}

impl Default for StoryMap {
    fn default() -> Self {
        Self {
            entries: DEFAULT_STORIES.clone(),
        }
    }
}

impl StoryMap {
    /// Build a map from explicit entries. An empty list falls back to the
    /// built-in table so a bare config file does not erase the mapping.
    pub fn new(entries: Vec<StoryEntry>) -> Self {
        if entries.is_empty() {
            Self::default()
        } else {
            Self { entries }
        }
    }

    /// Resolve the story label for a test file name. Deterministic and
    /// total: every input maps to exactly one label.
    pub fn resolve(&self, test_file: &str) -> &str {
        self.entries
            .iter()
            .find(|entry| test_file.contains(&entry.pattern))
            .map(|entry| entry.label.as_str())
            .unwrap_or(UNKNOWN_STORY)
    }

    pub fn entries(&self) -> &[StoryEntry] {
        &self.entries
    }
}
