use serde::{Deserialize, Serialize};

/// Count of resumes mentioning one skill, shaped for the dashboard chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillCount {
    pub name: String,
    pub value: u64,
}

/// One bar of the weekly submissions chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySubmissions {
    pub day: String,
    pub count: u64,
}

/// Aggregates backing the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_resumes: u64,
    pub submitted_today: u64,
    /// Placeholder average until real experience parsing lands.
    pub avg_experience_years: f64,
    /// Top five skills by submission count, most frequent first.
    pub skills_data: Vec<SkillCount>,
    /// Illustrative fixed weekly series, Monday through Sunday.
    pub submissions_by_day: Vec<DaySubmissions>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_serialize_with_frontend_field_names() {
        let stats = DashboardStats {
            total_users: 3,
            total_resumes: 5,
            submitted_today: 1,
            avg_experience_years: 4.2,
            skills_data: vec![SkillCount {
                name: "Rust".to_string(),
                value: 2,
            }],
            submissions_by_day: vec![DaySubmissions {
                day: "Mon".to_string(),
                count: 4,
            }],
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalUsers"], 3);
        assert_eq!(json["submittedToday"], 1);
        assert_eq!(json["avgExperienceYears"], 4.2);
        assert_eq!(json["skillsData"][0]["name"], "Rust");
        assert_eq!(json["submissionsByDay"][0]["day"], "Mon");
    }
}
