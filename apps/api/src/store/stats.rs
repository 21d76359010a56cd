use chrono::Local;

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::models::stats::{DashboardStats, DaySubmissions, SkillCount};

use super::Store;

/// Placeholder until experience durations are parsed from entries.
const AVG_EXPERIENCE_YEARS: f64 = 4.2;

impl Store {
    /// Aggregates for the admin dashboard. "Today" means the current local
    /// calendar day, not a rolling 24-hour window.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        let _guard = self.op_lock.lock().await;
        let accounts = self.load_accounts().await?;
        let resumes = self.load_resumes().await?;

        let today = Local::now().date_naive();
        let submitted_today = resumes
            .iter()
            .filter(|r| r.created_at.with_timezone(&Local).date_naive() == today)
            .count() as u64;

        Ok(DashboardStats {
            total_users: accounts.len() as u64,
            total_resumes: resumes.len() as u64,
            submitted_today,
            avg_experience_years: AVG_EXPERIENCE_YEARS,
            skills_data: top_skills(&resumes),
            submissions_by_day: week_series(),
        })
    }
}

/// Top five skills by submission count. Counting preserves first-seen order
/// and the sort is stable, so equal counts rank in the order the skill
/// first appeared and the chart does not reshuffle between refreshes.
fn top_skills(resumes: &[Resume]) -> Vec<SkillCount> {
    let mut data: Vec<SkillCount> = Vec::new();
    for resume in resumes {
        for skill in &resume.skills {
            match data.iter_mut().find(|s| &s.name == skill) {
                Some(entry) => entry.value += 1,
                None => data.push(SkillCount {
                    name: skill.clone(),
                    value: 1,
                }),
            }
        }
    }
    data.sort_by(|a, b| b.value.cmp(&a.value));
    data.truncate(5);
    data
}

/// Static weekly series shown on the dashboard; not derived from stored
/// data.
fn week_series() -> Vec<DaySubmissions> {
    [
        ("Mon", 4),
        ("Tue", 7),
        ("Wed", 12),
        ("Thu", 9),
        ("Fri", 15),
        ("Sat", 5),
        ("Sun", 3),
    ]
    .into_iter()
    .map(|(day, count)| DaySubmissions {
        day: day.to_string(),
        count,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::models::resume::{PersonalInfo, ResumeStatus};
    use crate::storage::keys;
    use crate::store::testing;

    fn make_resume(id: &str, skills: &[&str], created_days_ago: i64) -> Resume {
        let created = Utc::now() - Duration::days(created_days_ago);
        Resume {
            id: id.to_string(),
            user_id: "u1".to_string(),
            personal_info: PersonalInfo {
                full_name: "Rahul Sharma".to_string(),
                email: "rahul.sharma@example.in".to_string(),
                phone: String::new(),
                address: String::new(),
                linkedin: String::new(),
                summary: String::new(),
            },
            education: vec![],
            experience: vec![],
            skills: skills.iter().map(|s| s.to_string()).collect(),
            certifications: vec![],
            attachment: None,
            status: ResumeStatus::Submitted,
            created_at: created,
            updated_at: created,
        }
    }

    #[tokio::test]
    async fn test_totals_and_today_count() {
        let store = testing::store();
        let resumes = vec![
            make_resume("r1", &["Rust"], 0),
            make_resume("r2", &["Go"], 2),
        ];
        store.write_json(keys::RESUMES, &resumes).await.unwrap();

        let stats = store.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_users, 1); // the seeded admin
        assert_eq!(stats.total_resumes, 2);
        assert_eq!(stats.submitted_today, 1);
        assert_eq!(stats.avg_experience_years, 4.2);
    }

    #[test]
    fn test_top_skills_orders_by_count() {
        let resumes = vec![
            make_resume("r1", &["React", "AWS"], 0),
            make_resume("r2", &["React"], 0),
            make_resume("r3", &["React", "AWS", "Go"], 0),
        ];
        let skills = top_skills(&resumes);
        assert_eq!(skills[0].name, "React");
        assert_eq!(skills[0].value, 3);
        assert_eq!(skills[1].name, "AWS");
        assert_eq!(skills[2].name, "Go");
    }

    #[test]
    fn test_top_skills_breaks_ties_by_first_seen() {
        // Node and Python both appear twice; Node appeared first.
        let resumes = vec![
            make_resume("r1", &["Node", "Python"], 0),
            make_resume("r2", &["Python", "Node"], 0),
        ];
        let skills = top_skills(&resumes);
        assert_eq!(skills[0].name, "Node");
        assert_eq!(skills[1].name, "Python");
    }

    #[test]
    fn test_top_skills_caps_at_five() {
        let resumes = vec![
            make_resume("r1", &["A", "B", "C", "D", "E", "F", "G"], 0),
            make_resume("r2", &["G"], 0),
        ];
        let skills = top_skills(&resumes);
        assert_eq!(skills.len(), 5);
        assert_eq!(skills[0].name, "G");
        assert_eq!(skills[0].value, 2);
    }

    #[test]
    fn test_week_series_is_fixed() {
        let series = week_series();
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].day, "Mon");
        assert_eq!(series[0].count, 4);
        assert_eq!(series[4].day, "Fri");
        assert_eq!(series[4].count, 15);
        assert_eq!(series[6].day, "Sun");
        assert_eq!(series[6].count, 3);
    }
}
