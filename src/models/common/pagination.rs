use serde::{Deserialize, Serialize};

/// 分页查询参数
///
/// 查询串里页码常以字符串形式到达（尤其和 flatten 组合时），
/// 这里的自定义反序列化同时接受整数与数字字符串。
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    #[serde(default = "default_page", deserialize_with = "lenient_i64")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "lenient_i64")]
    pub size: i64,
}

/// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct LenientI64;

    impl<'de> Visitor<'de> for LenientI64 {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(value)
        }

        fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
            i64::try_from(value)
                .map_err(|_| Error::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(LenientI64)
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let q = PaginationQuery::default();
        assert_eq!(q.page, 1);
        assert_eq!(q.size, 10);
    }

    #[test]
    fn test_string_page_is_accepted() {
        let q: PaginationQuery = serde_json::from_str(r#"{"page":"3","size":"20"}"#).unwrap();
        assert_eq!(q.page, 3);
        assert_eq!(q.size, 20);
    }

    #[test]
    fn test_integer_page_is_accepted() {
        let q: PaginationQuery = serde_json::from_str(r#"{"page":2,"size":50}"#).unwrap();
        assert_eq!(q.page, 2);
        assert_eq!(q.size, 50);
    }
}
