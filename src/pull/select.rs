/// How a category decides which remote items to pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every remote item; never prompts.
    All,
    /// Exactly these identifiers.
    Explicit(Vec<String>),
    /// Ask once through the selection provider.
    Interactive,
}

impl Scope {
    /// Bulk mode wins over explicit ids; explicit ids win over prompting.
    pub fn resolve(bulk: bool, ids: &[String]) -> Self {
        if bulk {
            Scope::All
        } else if !ids.is_empty() {
            Scope::Explicit(ids.to_vec())
        } else {
            Scope::Interactive
        }
    }
}
