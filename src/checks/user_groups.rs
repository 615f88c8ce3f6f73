// SPDX-License-Identifier: MIT
//! User group check.
//!
//! Verifies that the four required role groups exist, then chains through a
//! per-group pass over their allowed sections: Administrators get every
//! section, Marketing and End Users get exactly content/media/forms, Third
//! Party gets everything except users and members. Each chained action can
//! be re-run in any order, any number of times — the fixes reset sections
//! wholesale rather than accumulating.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::uuid;

use crate::error::{HealthCheckError, Result};
use crate::health::text::TextService;
use crate::health::{CheckMeta, HealthCheck, HealthCheckAction, HealthCheckStatus};
use crate::services::{SectionService, UserGroup, UserService};

pub const FIX_MISSING_USER_GROUPS: &str = "fixMissingUserGroups";
pub const CHECK_ADMINISTRATOR_ALLOWED_SECTIONS: &str = "checkAdministratorAllowedSections";
pub const FIX_ADMINISTRATOR_ALLOWED_SECTIONS: &str = "fixAdministratorAllowedSections";
pub const CHECK_MARKETING_ALLOWED_SECTIONS: &str = "checkMarketingAllowedSections";
pub const FIX_MARKETING_ALLOWED_SECTIONS: &str = "fixMarketingAllowedSections";
pub const CHECK_END_USERS_ALLOWED_SECTIONS: &str = "checkEndUsersAllowedSections";
pub const FIX_END_USERS_ALLOWED_SECTIONS: &str = "fixEndUsersAllowedSections";
pub const CHECK_THIRD_PARTY_ALLOWED_SECTIONS: &str = "checkThirdPartyAllowedSections";
pub const FIX_THIRD_PARTY_ALLOWED_SECTIONS: &str = "fixThirdPartyAllowedSections";

/// Role groups every deployment is expected to carry: (name, alias).
const REQUIRED_GROUPS: &[(&str, &str)] = &[
    ("Administrators", "admin"),
    ("Marketing", "marketing"),
    ("End Users", "endUsers"),
    ("Third Party", "thirdParty"),
];

/// Section aliases an editor-level group is limited to.
const EDITOR_SECTION_ALIASES: &[&str] = &["content", "media", "forms"];

/// Section aliases the Third Party group must never see.
const THIRD_PARTY_EXCLUDED_ALIASES: &[&str] = &["users", "members"];

pub struct UserGroupsCheck {
    meta: CheckMeta,
    users: Arc<dyn UserService>,
    sections: Arc<dyn SectionService>,
    text: Arc<dyn TextService>,
}

impl UserGroupsCheck {
    pub fn new(
        users: Arc<dyn UserService>,
        sections: Arc<dyn SectionService>,
        text: Arc<dyn TextService>,
    ) -> Self {
        Self {
            meta: CheckMeta::new(
                uuid!("86367ceb-575f-43b4-8e54-58969570560a"),
                "User Groups Check",
                "Checks that all required user groups have been created.",
                "User Groups",
            ),
            users,
            sections,
            text,
        }
    }

    fn action(&self, alias: &str, name_key: &str, description_key: &str) -> HealthCheckAction {
        HealthCheckAction::new(
            alias,
            self.meta.id,
            self.text.localize(name_key),
            self.text.localize(description_key),
        )
    }

    fn find_group(&self, name: &str) -> Option<UserGroup> {
        self.users
            .get_all_user_groups()
            .into_iter()
            .find(|g| g.name.eq_ignore_ascii_case(name))
    }

    fn group_missing_status(&self, name: &str) -> HealthCheckStatus {
        HealthCheckStatus::error(format!(
            "{}{}",
            self.text.localize("userGroupsCheck/groupMissing"),
            name
        ))
        .with_action(self.action(
            FIX_MISSING_USER_GROUPS,
            "userGroupsCheck/fixGroupsName",
            "userGroupsCheck/fixGroupsDescription",
        ))
    }

    fn admin_sections_action(&self) -> HealthCheckAction {
        self.action(
            CHECK_ADMINISTRATOR_ALLOWED_SECTIONS,
            "userGroupsCheck/adminSectionsName",
            "userGroupsCheck/adminSectionsDescription",
        )
    }

    // ─── Group existence ──────────────────────────────────────────────────────

    fn check_user_groups(&self) -> HealthCheckStatus {
        let groups = self.users.get_all_user_groups();
        let all_present = REQUIRED_GROUPS.iter().all(|(name, _)| {
            groups.iter().any(|g| g.name.eq_ignore_ascii_case(name))
        });

        if all_present {
            HealthCheckStatus::success(self.text.localize("userGroupsCheck/success"))
                .with_action(self.admin_sections_action())
        } else {
            HealthCheckStatus::error(self.text.localize("userGroupsCheck/failed")).with_action(
                self.action(
                    FIX_MISSING_USER_GROUPS,
                    "userGroupsCheck/fixGroupsName",
                    "userGroupsCheck/fixGroupsDescription",
                ),
            )
        }
    }

    fn fix_missing_user_groups(&self) -> HealthCheckStatus {
        let groups = self.users.get_all_user_groups();
        for (name, alias) in REQUIRED_GROUPS {
            let exists = groups.iter().any(|g| g.name.eq_ignore_ascii_case(name));
            if !exists {
                info!(group = *name, "creating missing user group");
                self.users.save_user_group(UserGroup {
                    name: (*name).to_string(),
                    alias: (*alias).to_string(),
                    allowed_sections: Vec::new(),
                });
            }
        }

        HealthCheckStatus::success(self.text.localize("userGroupsCheck/groupsCreated"))
            .with_action(self.admin_sections_action())
    }

    // ─── Administrators: every section ────────────────────────────────────────

    fn check_administrator_allowed_sections(&self) -> HealthCheckStatus {
        let group = match self.find_group("Administrators") {
            Some(g) => g,
            None => return self.group_missing_status("Administrators"),
        };

        if group.allowed_sections.len() == self.sections.get_sections().len() {
            HealthCheckStatus::success(self.text.localize("userGroupsCheck/adminSectionsSuccess"))
                .with_action(self.action(
                    CHECK_MARKETING_ALLOWED_SECTIONS,
                    "userGroupsCheck/marketingSectionsName",
                    "userGroupsCheck/marketingSectionsDescription",
                ))
        } else {
            HealthCheckStatus::error(self.text.localize("userGroupsCheck/adminSectionsFailed"))
                .with_action(self.action(
                    FIX_ADMINISTRATOR_ALLOWED_SECTIONS,
                    "userGroupsCheck/fixSectionsName",
                    "userGroupsCheck/fixAdminSectionsDescription",
                ))
        }
    }

    fn fix_administrator_allowed_sections(&self) -> HealthCheckStatus {
        let mut group = match self.find_group("Administrators") {
            Some(g) => g,
            None => return self.group_missing_status("Administrators"),
        };

        for section in self.sections.get_sections() {
            if !group.allowed_sections.contains(&section.alias) {
                group.allowed_sections.push(section.alias);
            }
        }
        self.users.save_user_group(group);

        HealthCheckStatus::success(self.text.localize("userGroupsCheck/adminSectionsFixed"))
            .with_action(self.action(
                CHECK_MARKETING_ALLOWED_SECTIONS,
                "userGroupsCheck/marketingSectionsName",
                "userGroupsCheck/marketingSectionsDescription",
            ))
    }

    // ─── Marketing / End Users: content, media and forms only ─────────────────

    fn editor_sections_ok(group: &UserGroup) -> bool {
        group.allowed_sections.len() == EDITOR_SECTION_ALIASES.len()
            && group
                .allowed_sections
                .iter()
                .all(|alias| EDITOR_SECTION_ALIASES.contains(&alias.as_str()))
    }

    /// Reset an editor-level group to exactly content/media/forms, keeping
    /// the section service's ordering.
    fn reset_editor_sections(&self, mut group: UserGroup) {
        group.allowed_sections = self
            .sections
            .get_sections()
            .into_iter()
            .filter(|s| EDITOR_SECTION_ALIASES.contains(&s.alias.as_str()))
            .map(|s| s.alias)
            .collect();
        self.users.save_user_group(group);
    }

    fn check_marketing_allowed_sections(&self) -> HealthCheckStatus {
        let group = match self.find_group("Marketing") {
            Some(g) => g,
            None => return self.group_missing_status("Marketing"),
        };

        if Self::editor_sections_ok(&group) {
            HealthCheckStatus::success(
                self.text.localize("userGroupsCheck/marketingSectionsSuccess"),
            )
            .with_action(self.action(
                CHECK_END_USERS_ALLOWED_SECTIONS,
                "userGroupsCheck/endUsersSectionsName",
                "userGroupsCheck/endUsersSectionsDescription",
            ))
        } else {
            HealthCheckStatus::error(self.text.localize("userGroupsCheck/marketingSectionsFailed"))
                .with_action(self.action(
                    FIX_MARKETING_ALLOWED_SECTIONS,
                    "userGroupsCheck/fixSectionsName",
                    "userGroupsCheck/fixMarketingSectionsDescription",
                ))
        }
    }

    fn fix_marketing_allowed_sections(&self) -> HealthCheckStatus {
        let group = match self.find_group("Marketing") {
            Some(g) => g,
            None => return self.group_missing_status("Marketing"),
        };
        self.reset_editor_sections(group);

        HealthCheckStatus::success(self.text.localize("userGroupsCheck/marketingSectionsFixed"))
            .with_action(self.action(
                CHECK_END_USERS_ALLOWED_SECTIONS,
                "userGroupsCheck/endUsersSectionsName",
                "userGroupsCheck/endUsersSectionsDescription",
            ))
    }

    fn check_end_users_allowed_sections(&self) -> HealthCheckStatus {
        let group = match self.find_group("End Users") {
            Some(g) => g,
            None => return self.group_missing_status("End Users"),
        };

        if Self::editor_sections_ok(&group) {
            HealthCheckStatus::success(
                self.text.localize("userGroupsCheck/endUsersSectionsSuccess"),
            )
            .with_action(self.action(
                CHECK_THIRD_PARTY_ALLOWED_SECTIONS,
                "userGroupsCheck/thirdPartySectionsName",
                "userGroupsCheck/thirdPartySectionsDescription",
            ))
        } else {
            HealthCheckStatus::error(self.text.localize("userGroupsCheck/endUsersSectionsFailed"))
                .with_action(self.action(
                    FIX_END_USERS_ALLOWED_SECTIONS,
                    "userGroupsCheck/fixSectionsName",
                    "userGroupsCheck/fixEndUsersSectionsDescription",
                ))
        }
    }

    fn fix_end_users_allowed_sections(&self) -> HealthCheckStatus {
        let group = match self.find_group("End Users") {
            Some(g) => g,
            None => return self.group_missing_status("End Users"),
        };
        self.reset_editor_sections(group);

        HealthCheckStatus::success(self.text.localize("userGroupsCheck/endUsersSectionsFixed"))
            .with_action(self.action(
                CHECK_THIRD_PARTY_ALLOWED_SECTIONS,
                "userGroupsCheck/thirdPartySectionsName",
                "userGroupsCheck/thirdPartySectionsDescription",
            ))
    }

    // ─── Third Party: everything except users and members ─────────────────────

    fn check_third_party_allowed_sections(&self) -> HealthCheckStatus {
        let group = match self.find_group("Third Party") {
            Some(g) => g,
            None => return self.group_missing_status("Third Party"),
        };

        let expected = self.sections.get_sections().len() - THIRD_PARTY_EXCLUDED_ALIASES.len();
        let ok = group.allowed_sections.len() == expected
            && !group
                .allowed_sections
                .iter()
                .any(|alias| THIRD_PARTY_EXCLUDED_ALIASES.contains(&alias.as_str()));

        if ok {
            HealthCheckStatus::success(
                self.text.localize("userGroupsCheck/thirdPartySectionsSuccess"),
            )
        } else {
            HealthCheckStatus::error(
                self.text.localize("userGroupsCheck/thirdPartySectionsFailed"),
            )
            .with_action(self.action(
                FIX_THIRD_PARTY_ALLOWED_SECTIONS,
                "userGroupsCheck/fixSectionsName",
                "userGroupsCheck/fixThirdPartySectionsDescription",
            ))
        }
    }

    fn fix_third_party_allowed_sections(&self) -> HealthCheckStatus {
        let mut group = match self.find_group("Third Party") {
            Some(g) => g,
            None => return self.group_missing_status("Third Party"),
        };

        group.allowed_sections = self
            .sections
            .get_sections()
            .into_iter()
            .filter(|s| !THIRD_PARTY_EXCLUDED_ALIASES.contains(&s.alias.as_str()))
            .map(|s| s.alias)
            .collect();
        self.users.save_user_group(group);

        HealthCheckStatus::success(self.text.localize("userGroupsCheck/thirdPartySectionsFixed"))
    }
}

#[async_trait]
impl HealthCheck for UserGroupsCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    async fn get_status(&self) -> Result<Vec<HealthCheckStatus>> {
        Ok(vec![self.check_user_groups()])
    }

    async fn execute_action(&self, alias: &str) -> Result<HealthCheckStatus> {
        let status = match alias {
            FIX_MISSING_USER_GROUPS => self.fix_missing_user_groups(),
            CHECK_ADMINISTRATOR_ALLOWED_SECTIONS => self.check_administrator_allowed_sections(),
            FIX_ADMINISTRATOR_ALLOWED_SECTIONS => self.fix_administrator_allowed_sections(),
            CHECK_MARKETING_ALLOWED_SECTIONS => self.check_marketing_allowed_sections(),
            FIX_MARKETING_ALLOWED_SECTIONS => self.fix_marketing_allowed_sections(),
            CHECK_END_USERS_ALLOWED_SECTIONS => self.check_end_users_allowed_sections(),
            FIX_END_USERS_ALLOWED_SECTIONS => self.fix_end_users_allowed_sections(),
            CHECK_THIRD_PARTY_ALLOWED_SECTIONS => self.check_third_party_allowed_sections(),
            FIX_THIRD_PARTY_ALLOWED_SECTIONS => self.fix_third_party_allowed_sections(),
            _ => {
                return Err(HealthCheckError::UnknownAction {
                    alias: alias.to_string(),
                })
            }
        };
        Ok(status)
    }
}
