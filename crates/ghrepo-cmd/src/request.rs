//! Mode selection for a single invocation.

use anyhow::Result;

use crate::create::CreateOptions;
use crate::delete::DeleteOptions;
use crate::factory::Factory;

/// What one invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Create a private repository and push the checkout to it.
    CreateAndPush(CreateOptions),
    /// Delete repositories after confirmation.
    Delete(DeleteOptions),
}

impl Request {
    /// Pick the mode from the command-line values.
    ///
    /// `create_and_push` takes precedence over `repos`. Returns `None` when
    /// neither is given.
    pub fn select(
        repos: Vec<String>,
        owner: Option<String>,
        create_and_push: Option<String>,
    ) -> Option<Self> {
        if let Some(name) = create_and_push {
            return Some(Self::CreateAndPush(CreateOptions { name }));
        }
        if repos.is_empty() {
            return None;
        }
        Some(Self::Delete(DeleteOptions { repos, owner }))
    }

    /// Run the selected command.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        match self {
            Self::CreateAndPush(opts) => opts.run(factory).await,
            Self::Delete(opts) => opts.run(factory).await,
        }
    }
}
