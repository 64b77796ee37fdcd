use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

// 课程代码：字母、数字、连字符、下划线
static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid course code regex"));

/// 课程代码最大长度
pub const COURSE_CODE_MAX_LEN: usize = 20;
/// 课程名称最大长度
pub const COURSE_NAME_MAX_LEN: usize = 100;
/// 作业标题最大长度
pub const ASSIGNMENT_TITLE_MAX_LEN: usize = 200;
/// 作业内容最大长度
pub const ASSIGNMENT_CONTENT_MAX_LEN: usize = 5000;
/// 提交内容最大长度
pub const SUBMISSION_CONTENT_MAX_LEN: usize = 5000;
/// 评语最大长度
pub const FEEDBACK_MAX_LEN: usize = 1000;
/// 问题/答案内容最大长度
pub const QA_CONTENT_MAX_LEN: usize = 3000;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：5 <= x <= 16
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 校验课程代码（非空，限长，仅字母数字连字符下划线）
pub fn validate_course_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Course code must not be empty");
    }
    if code.len() > COURSE_CODE_MAX_LEN {
        return Err("Course code is too long (max 20 characters)");
    }
    if !COURSE_CODE_RE.is_match(code) {
        return Err("Course code must contain only letters, numbers, hyphens or underscores");
    }
    Ok(())
}

/// 校验分数必须落在 [0, 100] 闭区间
pub fn validate_score(score: i32) -> Result<(), &'static str> {
    if !(0..=100).contains(&score) {
        return Err("Score must be between 0 and 100");
    }
    Ok(())
}

/// 非空 + 限长校验，用于标题与正文类字段
pub fn validate_text(value: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("Field must not be empty".to_string());
    }
    if value.chars().count() > max_len {
        return Err(format!("Field is too long (max {max_len} characters)"));
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    // 1. 长度检查：至少 8 个字符
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    // 2. 大写字母检查
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    // 3. 小写字母检查
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 4. 数字检查
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 5. 常见弱密码检查
    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        assert!(!validate_password("Ab1").is_valid);
    }

    #[test]
    fn test_weak_password_denylist() {
        assert!(!validate_password("Password1").is_valid);
        assert!(!validate_password("password1").is_valid);
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name!").is_err());
    }

    #[test]
    fn test_course_code_rules() {
        assert!(validate_course_code("CS101").is_ok());
        assert!(validate_course_code("ML-2026_A").is_ok());
        assert!(validate_course_code("").is_err());
        assert!(validate_course_code("CS 101").is_err());
        assert!(validate_course_code("数据结构").is_err());
        assert!(validate_course_code(&"X".repeat(21)).is_err());
    }

    #[test]
    fn test_score_bounds() {
        assert!(validate_score(0).is_ok());
        assert!(validate_score(100).is_ok());
        assert!(validate_score(-1).is_err());
        assert!(validate_score(101).is_err());
    }

    #[test]
    fn test_text_length() {
        assert!(validate_text("hello", 10).is_ok());
        assert!(validate_text("   ", 10).is_err());
        assert!(validate_text("toolongvalue", 5).is_err());
    }
}
