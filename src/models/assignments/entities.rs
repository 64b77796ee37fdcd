use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub course_code: String,
    pub title: String,
    pub content: String,
    // 截止时间；为空表示不设截止
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 截止时间是否已过（未设截止视为未过期）
    pub fn is_past_due(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        match self.due_at {
            Some(due) => due < now,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn assignment_with_due(due_at: Option<chrono::DateTime<Utc>>) -> Assignment {
        Assignment {
            id: 1,
            course_code: "CS101".to_string(),
            title: "hw1".to_string(),
            content: "content".to_string(),
            due_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_past_due() {
        let now = Utc::now();
        assert!(assignment_with_due(Some(now - Duration::minutes(1))).is_past_due(now));
        assert!(!assignment_with_due(Some(now + Duration::minutes(1))).is_past_due(now));
    }

    #[test]
    fn test_no_deadline_never_expires() {
        assert!(!assignment_with_due(None).is_past_due(Utc::now()));
    }
}
