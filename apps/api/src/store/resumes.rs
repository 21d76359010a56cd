use chrono::Utc;

use crate::errors::AppError;
use crate::models::resume::{NewResume, Resume, ResumePatch, ResumeStatus};
use crate::storage::keys;

use super::{ids, Store};

/// Filter for `Store::list_resumes`. Both conditions must hold when both
/// are given.
#[derive(Debug, Clone, Default)]
pub struct ResumeFilter {
    pub user_id: Option<String>,
    pub status: Option<ResumeStatus>,
}

impl Store {
    /// Resumes matching the filter, in storage order. Callers sort further
    /// as needed.
    pub async fn list_resumes(&self, filter: ResumeFilter) -> Result<Vec<Resume>, AppError> {
        let _guard = self.op_lock.lock().await;
        let mut resumes = self.load_resumes().await?;
        if let Some(user_id) = &filter.user_id {
            resumes.retain(|r| &r.user_id == user_id);
        }
        if let Some(status) = filter.status {
            resumes.retain(|r| r.status == status);
        }
        Ok(resumes)
    }

    pub async fn get_resume(&self, id: &str) -> Result<Option<Resume>, AppError> {
        let _guard = self.op_lock.lock().await;
        Ok(self.load_resumes().await?.into_iter().find(|r| r.id == id))
    }

    /// Persists a new resume with a fresh id and both timestamps stamped
    /// now. Defaults apply first (`draft` status, empty collections), then
    /// explicit input overrides them; the submission wizard relies on this
    /// by sending `status: "submitted"` outright. Appends a `CREATE_RESUME`
    /// audit entry attributed to the owner.
    pub async fn create_resume(&self, new: NewResume) -> Result<Resume, AppError> {
        let _guard = self.op_lock.lock().await;
        let now = Utc::now();
        let resume = Resume {
            id: ids::entity_id(),
            user_id: new.user_id,
            personal_info: new.personal_info,
            education: new.education,
            experience: new.experience,
            skills: new.skills,
            certifications: new.certifications,
            attachment: new.attachment,
            status: new.status.unwrap_or(ResumeStatus::Draft),
            created_at: now,
            updated_at: now,
        };

        let mut resumes = self.load_resumes().await?;
        resumes.push(resume.clone());
        self.save_resumes(&resumes).await?;

        self.append_audit_log(
            "CREATE_RESUME",
            &resume.user_id,
            &resume.id,
            "Created new resume draft",
        )
        .await?;
        Ok(resume)
    }

    /// Merges the present patch fields into the resume and forces
    /// `updatedAt` to now. `createdAt` and ownership never change here.
    pub async fn update_resume(&self, id: &str, patch: ResumePatch) -> Result<Resume, AppError> {
        let _guard = self.op_lock.lock().await;
        let mut resumes = self.load_resumes().await?;
        let resume = resumes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::ResumeNotFound)?;

        if let Some(personal_info) = patch.personal_info {
            resume.personal_info = personal_info;
        }
        if let Some(education) = patch.education {
            resume.education = education;
        }
        if let Some(experience) = patch.experience {
            resume.experience = experience;
        }
        if let Some(skills) = patch.skills {
            resume.skills = skills;
        }
        if let Some(certifications) = patch.certifications {
            resume.certifications = certifications;
        }
        if let Some(attachment) = patch.attachment {
            resume.attachment = Some(attachment);
        }
        if let Some(status) = patch.status {
            resume.status = status;
        }
        resume.updated_at = Utc::now();
        let updated = resume.clone();
        self.save_resumes(&resumes).await?;
        Ok(updated)
    }

    /// Removes the resume if present; silently does nothing otherwise.
    pub async fn delete_resume(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.op_lock.lock().await;
        let mut resumes = self.load_resumes().await?;
        resumes.retain(|r| r.id != id);
        self.save_resumes(&resumes).await?;
        Ok(())
    }

    pub(crate) async fn load_resumes(&self) -> Result<Vec<Resume>, AppError> {
        Ok(self.read_json(keys::RESUMES).await?.unwrap_or_default())
    }

    pub(crate) async fn save_resumes(&self, resumes: &[Resume]) -> Result<(), AppError> {
        self.write_json(keys::RESUMES, resumes).await
    }
}
