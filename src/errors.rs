//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_coursehub_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CourseHubError {
            $($variant(String),)*
        }

        impl CourseHubError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CourseHubError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CourseHubError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CourseHubError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CourseHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CourseHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_coursehub_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    AlreadyExists("E013", "Already Exists"),
}

impl CourseHubError {
    /// 是否为唯一约束等导致的"已存在"冲突
    pub fn is_already_exists(&self) -> bool {
        matches!(self, CourseHubError::AlreadyExists(_))
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CourseHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CourseHubError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CourseHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一约束冲突单独归类，服务层据此返回 409
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) = err.sql_err() {
            return CourseHubError::AlreadyExists(msg);
        }
        CourseHubError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CourseHubError {
    fn from(err: std::io::Error) -> Self {
        CourseHubError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CourseHubError {
    fn from(err: serde_json::Error) -> Self {
        CourseHubError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CourseHubError {
    fn from(err: chrono::ParseError) -> Self {
        CourseHubError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CourseHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CourseHubError::cache_connection("test").code(), "E001");
        assert_eq!(CourseHubError::database_config("test").code(), "E003");
        assert_eq!(CourseHubError::validation("test").code(), "E007");
        assert_eq!(CourseHubError::authentication("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CourseHubError::database_operation("test").error_type(),
            "Database Operation Error"
        );
        assert_eq!(
            CourseHubError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CourseHubError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_already_exists_classification() {
        assert!(CourseHubError::already_exists("dup").is_already_exists());
        assert!(!CourseHubError::not_found("missing").is_already_exists());
    }

    #[test]
    fn test_format_simple() {
        let err = CourseHubError::validation("Invalid course code");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid course code"));
    }
}
