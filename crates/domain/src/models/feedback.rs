//! Feedback submission domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::errors::FeedbackValidationError;

/// Error returned when a label does not name any variant of a choice field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown choice: {0}")]
pub struct UnknownChoice(pub String);

/// Academic department the submission concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Computer Science")]
    ComputerScience,
    Engineering,
    #[serde(rename = "Business Administration")]
    BusinessAdministration,
    #[serde(rename = "Arts & Humanities")]
    ArtsHumanities,
    #[serde(rename = "Natural Sciences")]
    NaturalSciences,
    #[serde(rename = "Social Sciences")]
    SocialSciences,
    Education,
    Law,
    Medicine,
}

impl Department {
    pub const ALL: [Department; 9] = [
        Department::ComputerScience,
        Department::Engineering,
        Department::BusinessAdministration,
        Department::ArtsHumanities,
        Department::NaturalSciences,
        Department::SocialSciences,
        Department::Education,
        Department::Law,
        Department::Medicine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::ComputerScience => "Computer Science",
            Department::Engineering => "Engineering",
            Department::BusinessAdministration => "Business Administration",
            Department::ArtsHumanities => "Arts & Humanities",
            Department::NaturalSciences => "Natural Sciences",
            Department::SocialSciences => "Social Sciences",
            Department::Education => "Education",
            Department::Law => "Law",
            Department::Medicine => "Medicine",
        }
    }
}

/// Kind of submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackType {
    Feedback,
    Grievance,
    Suggestion,
    Complaint,
    Appreciation,
}

impl FeedbackType {
    pub const ALL: [FeedbackType; 5] = [
        FeedbackType::Feedback,
        FeedbackType::Grievance,
        FeedbackType::Suggestion,
        FeedbackType::Complaint,
        FeedbackType::Appreciation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Feedback => "Feedback",
            FeedbackType::Grievance => "Grievance",
            FeedbackType::Suggestion => "Suggestion",
            FeedbackType::Complaint => "Complaint",
            FeedbackType::Appreciation => "Appreciation",
        }
    }
}

/// Area of university life the submission is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Academic,
    Administrative,
    Facilities,
    #[serde(rename = "Student Services")]
    StudentServices,
    Faculty,
    Financial,
    Technology,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Academic,
        Category::Administrative,
        Category::Facilities,
        Category::StudentServices,
        Category::Faculty,
        Category::Financial,
        Category::Technology,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Academic => "Academic",
            Category::Administrative => "Administrative",
            Category::Facilities => "Facilities",
            Category::StudentServices => "Student Services",
            Category::Faculty => "Faculty",
            Category::Financial => "Financial",
            Category::Technology => "Technology",
            Category::Other => "Other",
        }
    }
}

/// Urgency declared by the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    /// High and Urgent submissions count towards the "high priority" figure.
    pub fn is_high(&self) -> bool {
        matches!(self, Priority::High | Priority::Urgent)
    }
}

/// Review status. Admins may move a submission between any two statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FeedbackStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Rejected,
}

impl FeedbackStatus {
    pub const ALL: [FeedbackStatus; 4] = [
        FeedbackStatus::Pending,
        FeedbackStatus::InProgress,
        FeedbackStatus::Completed,
        FeedbackStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "Pending",
            FeedbackStatus::InProgress => "In Progress",
            FeedbackStatus::Completed => "Completed",
            FeedbackStatus::Rejected => "Rejected",
        }
    }
}

macro_rules! impl_choice_traits {
    ($($ty:ty),+ $(,)?) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownChoice;

            /// Parses the display label, ignoring case and surrounding whitespace.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| UnknownChoice(s.to_string()))
            }
        }
    )+};
}

impl_choice_traits!(Department, FeedbackType, Category, Priority, FeedbackStatus);

/// A stored feedback submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedbackSubmission {
    pub id: i64,
    pub student_id: String,
    pub student_name: String,
    pub email: String,
    pub department: Department,
    pub course_code: Option<String>,
    pub feedback_type: FeedbackType,
    pub category: Category,
    pub priority: Priority,
    pub feedback_text: String,
    pub submission_date: DateTime<Utc>,
    pub status: FeedbackStatus,
    pub admin_response: Option<String>,
    pub response_date: Option<DateTime<Utc>>,
}

/// Raw submission form as sent by the client.
///
/// Choice fields arrive as free strings so that unselected placeholders can be
/// reported as missing fields instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateFeedbackRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Student ID must be at most 100 characters"))]
    pub student_id: String,

    #[serde(default)]
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub student_name: String,

    #[serde(default)]
    #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
    pub email: String,

    #[serde(default)]
    pub department: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "Course code must be at most 20 characters"))]
    pub course_code: Option<String>,

    #[serde(default)]
    pub feedback_type: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub priority: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Feedback must be at most 5000 characters"))]
    pub feedback_text: String,
}

/// A validated submission, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub student_id: String,
    pub student_name: String,
    pub email: String,
    pub department: Department,
    pub course_code: Option<String>,
    pub feedback_type: FeedbackType,
    pub category: Category,
    pub priority: Priority,
    pub feedback_text: String,
}

fn required_text(field: &'static str, value: &str) -> Result<String, FeedbackValidationError> {
    shared::validation::validate_required(value)
        .map(|_| value.trim().to_string())
        .map_err(|_| FeedbackValidationError::MissingField(field))
}

/// Parses a select-box value. Empty input and the form's "Select ..."
/// placeholders count as unselected.
fn required_choice<T>(field: &'static str, value: &str) -> Result<T, FeedbackValidationError>
where
    T: FromStr<Err = UnknownChoice>,
{
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with("Select ") {
        return Err(FeedbackValidationError::MissingField(field));
    }
    trimmed
        .parse()
        .map_err(|_| FeedbackValidationError::InvalidChoice {
            field,
            value: trimmed.to_string(),
        })
}

impl TryFrom<CreateFeedbackRequest> for NewFeedback {
    type Error = FeedbackValidationError;

    /// Checks fields in form order and reports the first failure.
    fn try_from(request: CreateFeedbackRequest) -> Result<Self, Self::Error> {
        let student_id = required_text("student_id", &request.student_id)?;
        let student_name = required_text("student_name", &request.student_name)?;
        let email = required_text("email", &request.email)?;
        shared::validation::validate_contact_email(&email)
            .map_err(|_| FeedbackValidationError::InvalidEmail)?;
        let department = required_choice("department", &request.department)?;
        let feedback_type = required_choice("feedback_type", &request.feedback_type)?;
        let category = required_choice("category", &request.category)?;
        let priority = required_choice("priority", &request.priority)?;
        let feedback_text = required_text("feedback_text", &request.feedback_text)?;

        request.validate()?;

        Ok(NewFeedback {
            student_id,
            student_name,
            email,
            department,
            course_code: shared::validation::non_blank(request.course_code.as_deref()),
            feedback_type,
            category,
            priority,
            feedback_text,
        })
    }
}

/// Criteria for narrowing the submission list. `None` means "All".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
    pub status: Option<FeedbackStatus>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
}

impl FeedbackFilter {
    pub fn matches(&self, submission: &FeedbackSubmission) -> bool {
        self.status.map_or(true, |s| submission.status == s)
            && self.priority.map_or(true, |p| submission.priority == p)
            && self.category.map_or(true, |c| submission.category == c)
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.category.is_none()
    }
}

/// Query parameters for listing submissions. Each criterion accepts a label
/// or "All".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedbackListQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

fn optional_choice<T>(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, FeedbackValidationError>
where
    T: FromStr<Err = UnknownChoice>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| FeedbackValidationError::InvalidChoice {
                field,
                value: v.to_string(),
            }),
    }
}

impl TryFrom<FeedbackListQuery> for FeedbackFilter {
    type Error = FeedbackValidationError;

    fn try_from(query: FeedbackListQuery) -> Result<Self, Self::Error> {
        Ok(FeedbackFilter {
            status: optional_choice("status", query.status.as_deref())?,
            priority: optional_choice("priority", query.priority.as_deref())?,
            category: optional_choice("category", query.category.as_deref())?,
        })
    }
}

/// Admin update of a submission's status and response.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateFeedbackStatusRequest {
    pub status: FeedbackStatus,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Response must be at most 5000 characters"))]
    pub admin_response: Option<String>,
}

/// Allowed values for every choice field of the submission form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedbackOptions {
    pub departments: Vec<&'static str>,
    pub feedback_types: Vec<&'static str>,
    pub categories: Vec<&'static str>,
    pub priorities: Vec<&'static str>,
    pub statuses: Vec<&'static str>,
}

impl FeedbackOptions {
    pub fn catalogue() -> Self {
        Self {
            departments: Department::ALL.iter().map(|v| v.as_str()).collect(),
            feedback_types: FeedbackType::ALL.iter().map(|v| v.as_str()).collect(),
            categories: Category::ALL.iter().map(|v| v.as_str()).collect(),
            priorities: Priority::ALL.iter().map(|v| v.as_str()).collect(),
            statuses: FeedbackStatus::ALL.iter().map(|v| v.as_str()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateFeedbackRequest {
        CreateFeedbackRequest {
            student_id: "CU2023099".to_string(),
            student_name: "Tobi Adeyemi".to_string(),
            email: "tobi@caleb.edu.ng".to_string(),
            department: "Engineering".to_string(),
            course_code: None,
            feedback_type: "Complaint".to_string(),
            category: "Facilities".to_string(),
            priority: "Urgent".to_string(),
            feedback_text: "Broken elevator".to_string(),
        }
    }

    #[test]
    fn test_labels_roundtrip_through_from_str() {
        for d in Department::ALL {
            assert_eq!(d.as_str().parse::<Department>().unwrap(), d);
        }
        for s in FeedbackStatus::ALL {
            assert_eq!(s.to_string().parse::<FeedbackStatus>().unwrap(), s);
        }
    }

    #[test]
    fn test_from_str_ignores_case_and_whitespace() {
        assert_eq!(
            " in progress ".parse::<FeedbackStatus>().unwrap(),
            FeedbackStatus::InProgress
        );
        assert_eq!(
            "student services".parse::<Category>().unwrap(),
            Category::StudentServices
        );
        let err = "Select Priority".parse::<Priority>().unwrap_err();
        assert_eq!(err.to_string(), "unknown choice: Select Priority");
    }

    #[test]
    fn test_serde_uses_display_labels() {
        assert_eq!(
            serde_json::to_string(&FeedbackStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(
            serde_json::to_string(&Department::ArtsHumanities).unwrap(),
            "\"Arts & Humanities\""
        );
        let status: FeedbackStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(status, FeedbackStatus::Completed);
    }

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(FeedbackStatus::default(), FeedbackStatus::Pending);
    }

    #[test]
    fn test_priority_is_high() {
        assert!(Priority::Urgent.is_high());
        assert!(Priority::High.is_high());
        assert!(!Priority::Medium.is_high());
        assert!(!Priority::Low.is_high());
    }

    #[test]
    fn test_valid_request_converts() {
        let new = NewFeedback::try_from(valid_request()).unwrap();
        assert_eq!(new.department, Department::Engineering);
        assert_eq!(new.feedback_type, FeedbackType::Complaint);
        assert_eq!(new.category, Category::Facilities);
        assert_eq!(new.priority, Priority::Urgent);
        assert_eq!(new.course_code, None);
    }

    #[test]
    fn test_blank_course_code_is_absent() {
        let mut request = valid_request();
        request.course_code = Some("   ".to_string());
        assert_eq!(NewFeedback::try_from(request).unwrap().course_code, None);

        let mut request = valid_request();
        request.course_code = Some(" CSC101 ".to_string());
        assert_eq!(
            NewFeedback::try_from(request).unwrap().course_code,
            Some("CSC101".to_string())
        );
    }

    #[test]
    fn test_placeholders_are_missing_fields() {
        let cases: [(&str, fn(&mut CreateFeedbackRequest)); 4] = [
            ("department", |r| r.department = "Select Department".into()),
            ("feedback_type", |r| r.feedback_type = "Select Type".into()),
            ("category", |r| r.category = "Select Category".into()),
            ("priority", |r| r.priority = "Select Priority".into()),
        ];

        for (field, mutate) in cases {
            let mut request = valid_request();
            mutate(&mut request);
            assert_eq!(
                NewFeedback::try_from(request).unwrap_err(),
                FeedbackValidationError::MissingField(field)
            );
        }
    }

    #[test]
    fn test_empty_text_fields_are_missing() {
        let mut request = valid_request();
        request.student_name = "  ".to_string();
        assert_eq!(
            NewFeedback::try_from(request).unwrap_err(),
            FeedbackValidationError::MissingField("student_name")
        );

        let mut request = valid_request();
        request.feedback_text = String::new();
        assert_eq!(
            NewFeedback::try_from(request).unwrap_err(),
            FeedbackValidationError::MissingField("feedback_text")
        );
    }

    #[test]
    fn test_first_missing_field_in_form_order() {
        let request = CreateFeedbackRequest::default();
        assert_eq!(
            NewFeedback::try_from(request).unwrap_err(),
            FeedbackValidationError::MissingField("student_id")
        );
    }

    #[test]
    fn test_email_without_at_or_dot_rejected() {
        for email in ["tobi.caleb.edu.ng", "tobi@calebedung"] {
            let mut request = valid_request();
            request.email = email.to_string();
            assert_eq!(
                NewFeedback::try_from(request).unwrap_err(),
                FeedbackValidationError::InvalidEmail
            );
        }
    }

    #[test]
    fn test_unknown_choice_rejected() {
        let mut request = valid_request();
        request.department = "Astrology".to_string();
        assert_eq!(
            NewFeedback::try_from(request).unwrap_err(),
            FeedbackValidationError::InvalidChoice {
                field: "department",
                value: "Astrology".to_string()
            }
        );
    }

    #[test]
    fn test_overlong_feedback_rejected() {
        let mut request = valid_request();
        request.feedback_text = "x".repeat(5001);
        let err = NewFeedback::try_from(request).unwrap_err();
        assert!(matches!(
            err,
            FeedbackValidationError::Invalid { field: ref f, .. } if f == "feedback_text"
        ));
    }

    #[test]
    fn test_length_limits_at_and_over_boundary() {
        type Setter = fn(&mut CreateFeedbackRequest, String);
        let email = |len: usize| format!("{}@caleb.edu", "a".repeat(len - 10));
        let cases: [(&str, usize, Setter); 5] = [
            ("student_id", 100, |r, v| r.student_id = v),
            ("student_name", 200, |r, v| r.student_name = v),
            ("email", 254, |r, v| r.email = v),
            ("course_code", 20, |r, v| r.course_code = Some(v)),
            ("feedback_text", 5000, |r, v| r.feedback_text = v),
        ];

        for (field, limit, set) in cases {
            let value = |len: usize| {
                if field == "email" {
                    email(len)
                } else {
                    "x".repeat(len)
                }
            };

            let mut request = valid_request();
            set(&mut request, value(limit));
            assert!(
                NewFeedback::try_from(request).is_ok(),
                "{} of {} chars should be accepted",
                field,
                limit
            );

            let mut request = valid_request();
            set(&mut request, value(limit + 1));
            let err = NewFeedback::try_from(request).unwrap_err();
            assert_eq!(err.field(), Some(field), "{} over the limit", field);
        }
    }

    #[test]
    fn test_update_request_response_limit() {
        let at_limit = UpdateFeedbackStatusRequest {
            status: FeedbackStatus::Completed,
            admin_response: Some("r".repeat(5000)),
        };
        assert!(at_limit.validate().is_ok());

        let over = UpdateFeedbackStatusRequest {
            status: FeedbackStatus::Completed,
            admin_response: Some("r".repeat(5001)),
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_filter_from_query_treats_all_as_absent() {
        let query = FeedbackListQuery {
            status: Some("All".to_string()),
            priority: Some("Urgent".to_string()),
            category: None,
        };
        let filter = FeedbackFilter::try_from(query).unwrap();
        assert_eq!(filter.status, None);
        assert_eq!(filter.priority, Some(Priority::Urgent));
        assert_eq!(filter.category, None);
    }

    #[test]
    fn test_filter_from_query_rejects_unknown_status() {
        let query = FeedbackListQuery {
            status: Some("Archived".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            FeedbackFilter::try_from(query),
            Err(FeedbackValidationError::InvalidChoice { field: "status", .. })
        ));
    }

    #[test]
    fn test_update_request_deserialize() {
        let json = r#"{"status":"In Progress","admin_response":"Maintenance notified"}"#;
        let req: UpdateFeedbackStatusRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, FeedbackStatus::InProgress);
        assert_eq!(req.admin_response.as_deref(), Some("Maintenance notified"));

        let req: UpdateFeedbackStatusRequest =
            serde_json::from_str(r#"{"status":"Rejected"}"#).unwrap();
        assert!(req.admin_response.is_none());
    }

    #[test]
    fn test_options_catalogue() {
        let options = FeedbackOptions::catalogue();
        assert_eq!(options.departments.len(), 9);
        assert_eq!(options.feedback_types.len(), 5);
        assert_eq!(options.categories.len(), 8);
        assert_eq!(options.priorities, vec!["Low", "Medium", "High", "Urgent"]);
        assert_eq!(
            options.statuses,
            vec!["Pending", "In Progress", "Completed", "Rejected"]
        );
    }
}
