use indexmap::IndexMap;

/// Accentizer outputs known to be wrong, with their corrected form
const BUILTIN_PATCHES: &[(&str, &str)] = &[("Не шм+огла", "Не шмогл+а")];

/// Exact-match corrections applied to the whole normalized text
#[derive(Debug, Clone)]
pub struct LexicalPatches {
    patches: IndexMap<String, String>,
}

impl Default for LexicalPatches {
    fn default() -> Self {
        Self {
            patches: BUILTIN_PATCHES
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
        }
    }
}

impl LexicalPatches {
    /// Built-in patches plus `extra`, later entries winning
    pub fn with_extra<'a>(extra: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut patches = Self::default();
        patches
            .patches
            .extend(extra.into_iter().map(|(from, to)| (from.clone(), to.clone())));
        patches
    }

    /// Replace `text` if it matches a known faulty phrase exactly
    pub fn apply(&self, text: String) -> String {
        match self.patches.get(&text) {
            Some(corrected) => {
                tracing::debug!(from = %text, to = %corrected, "lexical patch applied");
                corrected.clone()
            }
            None => text,
        }
    }
}
