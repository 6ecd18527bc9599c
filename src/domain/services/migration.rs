use std::collections::HashMap;

use crate::domain::models::{
    attendance::NewAttendance, briefing::NewBriefing, project::NewProject, user::NewUser,
};
use crate::domain::ports::Stores;
use crate::error::AppError;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Tally {
    pub total: u32,
    pub succeeded: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    pub users: Tally,
    pub projects: Tally,
    pub briefings: Tally,
    pub attendances: Tally,
}

impl MigrationReport {
    pub fn failed_total(&self) -> u32 {
        self.users.failed + self.projects.failed + self.briefings.failed + self.attendances.failed
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MigrationStatus {
    Idle,
    Migrating,
    Success { report: MigrationReport },
    Error { message: String, report: Option<MigrationReport> },
}

/// Copies every local record to the remote store, in dependency order:
/// users, projects, briefings, attendances. The remote side assigns fresh
/// ids, so references are rewritten through local→remote id maps as each
/// batch lands. Per-record failures are tallied and never abort the batch;
/// only a failure to read the local store is fatal. Users are deduplicated
/// by email; re-running may duplicate everything else.
pub async fn migrate_all(source: &Stores, target: &Stores) -> Result<MigrationReport, AppError> {
    let mut report = MigrationReport::default();

    let mut user_ids: HashMap<i64, i64> = HashMap::new();
    let users = source.users.list().await?;
    report.users.total = users.len() as u32;
    for user in users {
        match target.users.find_by_email(&user.email).await {
            Ok(Some(existing)) => {
                info!("User {} already exists remotely, skipping", user.email);
                user_ids.insert(user.id, existing.id);
                report.users.succeeded += 1;
            }
            Ok(None) => {
                let new_user = NewUser {
                    name: user.name.clone(),
                    email: user.email.clone(),
                    password: user.password.clone(),
                    role: user.role,
                    company: user.company.clone(),
                };
                match target.users.create(&new_user).await {
                    Ok(created) => {
                        user_ids.insert(user.id, created.id);
                        report.users.succeeded += 1;
                    }
                    Err(e) => {
                        warn!("Failed to migrate user {}: {}", user.email, e);
                        report.users.failed += 1;
                    }
                }
            }
            Err(e) => {
                warn!("Failed to check remote user {}: {}", user.email, e);
                report.users.failed += 1;
            }
        }
    }

    let mut project_ids: HashMap<i64, i64> = HashMap::new();
    let projects = source.projects.list().await?;
    report.projects.total = projects.len() as u32;
    for project in projects {
        let Some(&created_by) = user_ids.get(&project.created_by) else {
            warn!("Skipping project {}: creator {} was not migrated", project.id, project.created_by);
            report.projects.failed += 1;
            continue;
        };
        let new_project = NewProject {
            name: project.name.clone(),
            location: project.location.clone(),
            client: project.client.clone(),
            description: project.description.clone(),
            created_by,
        };
        match target.projects.create(&new_project).await {
            Ok(created) => {
                project_ids.insert(project.id, created.id);
                report.projects.succeeded += 1;
            }
            Err(e) => {
                warn!("Failed to migrate project {}: {}", project.name, e);
                report.projects.failed += 1;
            }
        }
    }

    let mut briefing_ids: HashMap<i64, i64> = HashMap::new();
    let briefings = source.briefings.list().await?;
    report.briefings.total = briefings.len() as u32;
    for briefing in briefings {
        let Some(&project_id) = project_ids.get(&briefing.project_id) else {
            warn!("Skipping briefing {}: project {} was not migrated", briefing.id, briefing.project_id);
            report.briefings.failed += 1;
            continue;
        };
        let Some(&created_by) = user_ids.get(&briefing.created_by) else {
            warn!("Skipping briefing {}: creator {} was not migrated", briefing.id, briefing.created_by);
            report.briefings.failed += 1;
            continue;
        };
        let new_briefing = NewBriefing {
            project_id,
            date: briefing.date,
            location: briefing.location.clone(),
            description: briefing.description.clone(),
            hazards: briefing.hazards.0.clone(),
            controls: briefing.controls.0.clone(),
            created_by,
        };
        match target.briefings.create(&new_briefing).await {
            Ok(created) => {
                briefing_ids.insert(briefing.id, created.id);
                report.briefings.succeeded += 1;
            }
            Err(e) => {
                warn!("Failed to migrate briefing {}: {}", briefing.id, e);
                report.briefings.failed += 1;
            }
        }
    }

    let attendances = source.attendances.list().await?;
    report.attendances.total = attendances.len() as u32;
    for attendance in attendances {
        let Some(&briefing_id) = briefing_ids.get(&attendance.briefing_id) else {
            warn!(
                "Skipping attendance {}: briefing {} was not migrated",
                attendance.id, attendance.briefing_id
            );
            report.attendances.failed += 1;
            continue;
        };
        // The worker reference is optional; if that user did not migrate we
        // keep the record and drop the link rather than losing the sign-on.
        let user_id = attendance.user_id.and_then(|id| user_ids.get(&id).copied());
        let new_attendance = NewAttendance {
            briefing_id,
            user_id,
            name: attendance.name.clone(),
            time_on: attendance.time_on.clone(),
            time_off: attendance.time_off.clone(),
            bac: attendance.bac,
        };
        match target.attendances.create(&new_attendance).await {
            Ok(_) => report.attendances.succeeded += 1,
            Err(e) => {
                warn!("Failed to migrate attendance {}: {}", attendance.id, e);
                report.attendances.failed += 1;
            }
        }
    }

    info!(
        "Migration pass finished: users {}/{}, projects {}/{}, briefings {}/{}, attendances {}/{}",
        report.users.succeeded, report.users.total,
        report.projects.succeeded, report.projects.total,
        report.briefings.succeeded, report.briefings.total,
        report.attendances.succeeded, report.attendances.total,
    );

    Ok(report)
}
