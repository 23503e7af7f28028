//! Repository owner resolution.

use ghrepo_core::CoreError;
use ghrepo_git::LocalRepo;
use tracing::debug;

/// Determine the owner for repository operations.
///
/// A non-empty `flag` wins. Otherwise the git `user.name` of the local
/// checkout is used; `local` is `None` when git is unavailable.
///
/// `user.name` is a display name and need not match the GitHub login, so a
/// wrong owner here shows up later as a 404.
///
/// # Errors
///
/// Returns [`CoreError::MissingOwner`] when neither source yields a name.
pub async fn resolve_owner(
    flag: Option<&str>,
    local: Option<&dyn LocalRepo>,
) -> Result<String, CoreError> {
    if let Some(owner) = flag.map(str::trim).filter(|o| !o.is_empty()) {
        return Ok(owner.to_string());
    }

    let Some(local) = local else {
        debug!("git unavailable, cannot infer owner");
        return Err(CoreError::MissingOwner);
    };

    match local.identity().await {
        Ok(Some(name)) if !name.trim().is_empty() => {
            let name = name.trim().to_string();
            debug!(owner = %name, "using git user.name as owner; it may differ from the GitHub login");
            Ok(name)
        }
        Ok(_) => Err(CoreError::MissingOwner),
        Err(e) => {
            debug!(error = %e, "failed to read git user.name");
            Err(CoreError::MissingOwner)
        }
    }
}
