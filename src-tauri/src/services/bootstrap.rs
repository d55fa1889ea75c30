//! Family bootstrap service
//!
//! Resolves an identity to its family, creating the family and its
//! primary member on first use. The family insert is an upsert keyed
//! on the creating account, so repeated or concurrent bootstraps all
//! resolve to the same row; a family row left without its primary
//! member by an earlier interrupted run is repaired on the next call.

use crate::config;
use crate::database::{Family, FamilyMember, MemberRole, Repository};
use crate::error::Result;
use crate::services::session::Identity;

/// Service performing first-use family setup
#[derive(Clone)]
pub struct FamilyService {
    repo: Repository,
}

impl FamilyService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Look up the identity's family and primary member, creating
    /// whichever of the two does not exist yet
    pub async fn ensure_family(&self, identity: &Identity) -> Result<(Family, FamilyMember)> {
        let family = match self.repo.find_family_by_creator(&identity.id).await? {
            Some(family) => family,
            None => {
                let name = format!(
                    "{} {}",
                    config::DEFAULT_FAMILY_NAME_PREFIX,
                    member_name(&identity.email)
                );
                tracing::info!("First sign-in for {}, creating family: {}", identity.email, name);
                self.repo.upsert_family(&name, &identity.id).await?
            }
        };

        let member = match self
            .repo
            .find_member_by_user(&family.id, &identity.id)
            .await?
        {
            Some(member) => member,
            None => {
                tracing::info!("Creating primary member for family: {}", family.id);
                self.repo
                    .create_member(
                        &family.id,
                        member_name(&identity.email),
                        MemberRole::Mae,
                        Some(&identity.id),
                    )
                    .await?
            }
        };

        Ok((family, member))
    }
}

/// Display name derived from the e-mail local part
fn member_name(email: &str) -> &str {
    match email.split('@').next() {
        Some(local) if !local.is_empty() => local,
        _ => config::DEFAULT_MEMBER_NAME,
    }
}
