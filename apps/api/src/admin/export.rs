use crate::models::resume::Resume;

/// Columns of the administrative export.
const HEADER: &str = "Name,Email,Phone,Status,Skills,Education Entries,Experience Entries,Created";

/// Renders all resumes as CSV. Fields containing commas, quotes, or line
/// breaks are wrapped in double quotes with inner quotes doubled, per
/// RFC 4180.
pub fn resumes_to_csv(resumes: &[Resume]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for resume in resumes {
        let fields = [
            escape(&resume.personal_info.full_name),
            escape(&resume.personal_info.email),
            escape(&resume.personal_info.phone),
            resume.status.as_str().to_string(),
            escape(&resume.skills.join(", ")),
            resume.education.len().to_string(),
            resume.experience.len().to_string(),
            resume.created_at.format("%Y-%m-%d").to_string(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

fn escape(field: &str) -> String {
    if field.contains(|c| matches!(c, '"' | ',' | '\n' | '\r')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::models::resume::{PersonalInfo, ResumeStatus};

    fn make_resume(full_name: &str, skills: &[&str]) -> Resume {
        Resume {
            id: "r1".to_string(),
            user_id: "u1".to_string(),
            personal_info: PersonalInfo {
                full_name: full_name.to_string(),
                email: "rahul.sharma@example.in".to_string(),
                phone: "+91 98765 43210".to_string(),
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
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_export_is_header_only() {
        assert_eq!(
            resumes_to_csv(&[]),
            "Name,Email,Phone,Status,Skills,Education Entries,Experience Entries,Created\n"
        );
    }

    #[test]
    fn test_row_layout_and_date_format() {
        let csv = resumes_to_csv(&[make_resume("Rahul Sharma", &["Rust"])]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "Rahul Sharma,rahul.sharma@example.in,+91 98765 43210,submitted,Rust,0,0,2024-03-15"
        );
    }

    #[test]
    fn test_joined_skills_are_quoted() {
        let csv = resumes_to_csv(&[make_resume("Rahul Sharma", &["Rust", "Go"])]);
        assert!(csv.contains("\"Rust, Go\""));
    }

    #[test]
    fn test_quotes_and_commas_escape() {
        let csv = resumes_to_csv(&[make_resume("Sharma, Rahul \"RS\"", &[])]);
        assert!(csv.contains("\"Sharma, Rahul \"\"RS\"\"\""));
    }
}
